pub mod dto;
pub mod ports;
pub mod project_use_cases;
pub mod service;

pub use project_use_cases::ProjectUseCases;
