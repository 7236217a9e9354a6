pub mod entities;
pub mod query;
pub mod seed;
