pub mod queries;
pub mod schema;
pub mod storage;
