pub mod baserow_service;
