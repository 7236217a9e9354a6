pub mod customer;
pub mod deal;
pub mod kind;
pub mod lead;
pub mod record;
pub mod report;
pub mod sale;
pub mod session;
pub mod settings;
pub mod tabular;
pub mod task;
pub mod vehicle;
