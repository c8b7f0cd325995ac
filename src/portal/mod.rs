pub mod controller;
pub mod dashboard;
