// Service exports
pub mod generator;
pub mod sessions;

pub use generator::{GeneratorClient, GeneratorError};
pub use sessions::SessionStore;
