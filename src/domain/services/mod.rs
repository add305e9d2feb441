pub mod aggregation;
pub mod autosave;
pub mod charts;
pub mod content_generator;
pub mod date_parser;
pub mod filters;
pub mod local_store;
pub mod media;
pub mod report;
pub mod session;
