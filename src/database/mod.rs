// file: src/database/mod.rs
// description: database operations module exports
// reference: internal module structure

pub mod client;
pub mod insert;
pub mod query;
pub mod schema;

pub use client::PaperStore;
pub use schema::SchemaManager;
