pub mod address;
pub mod composite;
pub mod scalar;
pub mod tag;
pub mod write;
