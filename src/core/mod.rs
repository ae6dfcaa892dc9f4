pub mod api_key;
pub mod app;
pub mod assistant;
pub mod cli;
pub mod config;
pub mod history;
pub mod languages;
pub mod llm;
pub mod media;
pub mod paths;
pub mod persistence;
pub mod solution;
pub mod speech;
