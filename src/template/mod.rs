// file: src/template/mod.rs
// description: book config and template rendering module exports
// reference: internal module structure

pub mod book_config;
pub mod renderer;
pub mod substitutions;

pub use book_config::set_path_to_book;
pub use renderer::TemplateRenderer;
pub use substitutions::{DEFAULT_SUBSTITUTIONS_KEY, Substitutions};
