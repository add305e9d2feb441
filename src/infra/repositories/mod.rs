pub mod sqlite_kv_repo;
pub mod sqlite_job_repo;

pub mod postgres_kv_repo;
pub mod postgres_job_repo;
