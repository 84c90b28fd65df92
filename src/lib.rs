pub mod config;
pub mod database;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod menu;
pub mod models;
pub mod repository;
pub mod resource;

// Re-export commonly used types for easier access
pub use models::{Autor, Emprestimo, Livro, Usuario};
pub use repository::{BackendKind, RepositorySet};
