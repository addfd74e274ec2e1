pub mod message;
pub mod size;
pub mod status;
