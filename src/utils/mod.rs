pub mod color;
pub mod paths;
