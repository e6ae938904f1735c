pub mod engine;
pub mod error;
pub mod local_client;
pub mod service;


pub use engine::Calculator;
pub use error::DomainError;
pub use service::Service;
