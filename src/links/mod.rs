// file: src/links/mod.rs
// description: launch link rewriting module exports
// reference: internal module structure

pub mod patterns;
pub mod rewriter;

pub use rewriter::{LinkRewriter, RewriteReport};
