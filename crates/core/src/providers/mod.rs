pub mod traits;

// API client implementations
pub mod backend;
pub mod cloud_storage;
