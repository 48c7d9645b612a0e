pub mod app;
pub mod dialog;
