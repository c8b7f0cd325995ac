pub mod email;
pub mod registration;
