pub mod datetime;
pub mod logging;
pub mod render;
