//! Git operations for change collection.

pub mod parse;
pub mod repository;

pub use repository::GitRepository;
