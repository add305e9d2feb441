pub mod event;
pub mod job;
pub mod table_row;
