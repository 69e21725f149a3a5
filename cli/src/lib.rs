//! Offline maintenance tools for an mdpress site: the article indexer and
//! the base64 image extractor.

pub mod cli;
pub mod commands;
pub mod utils;
