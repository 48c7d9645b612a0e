pub mod form;
pub mod host;
pub mod model;
