pub mod agents;
pub mod manifest;
pub mod models;
pub mod roi;
pub mod services;
pub mod summary;
pub mod utils;
