pub mod factory;
pub mod repositories;
pub mod table;
pub mod webhook;
