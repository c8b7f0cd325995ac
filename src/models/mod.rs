pub mod alumni;
pub mod api;
pub mod registration;
pub mod role;
pub mod session;
