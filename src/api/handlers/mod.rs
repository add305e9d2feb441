pub mod auth;
pub mod content;
pub mod dashboard;
pub mod event;
pub mod health;
pub mod job;
pub mod report;
