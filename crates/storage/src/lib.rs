#![forbid(unsafe_code)]

pub mod cache;
pub mod csv_source;
pub mod repository;
pub mod sqlite;

pub use cache::VocabularyCache;
pub use csv_source::{LoadError, VocabularyTable};
