pub mod auth;
pub mod dashboard;
pub mod directory;
pub mod fallback;
pub mod health;
pub mod metrics;
pub mod pages;
