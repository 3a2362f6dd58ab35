pub mod api;
pub mod config;
pub mod data_models;
pub mod dom;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod locator;
pub mod normalize;
pub mod pipeline;
