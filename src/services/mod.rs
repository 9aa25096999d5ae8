pub mod auth_service;
pub mod recipe_service;
pub mod storage_service;

pub use storage_service::ImageStore;
