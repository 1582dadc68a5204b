pub mod book_manager;
pub mod services;

pub use book_manager::{BookManager, LoadMetadata};
