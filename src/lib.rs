// src/lib.rs

pub mod config;
pub mod corpus;
pub mod fetcher;
pub mod handle;
pub mod llm;
pub mod pipeline;
pub mod platform;
pub mod prompt;
pub mod store;
pub mod synthesizer;
