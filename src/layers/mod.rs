pub mod custom_marker;
pub mod marker;
