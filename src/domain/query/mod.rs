pub mod date_range;
pub mod search;
pub mod sort;
pub mod stats;
pub mod task_order;
