pub mod core;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod portal;
pub mod stores;
pub mod utils;
pub mod validation;
