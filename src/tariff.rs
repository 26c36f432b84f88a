pub mod free_hour;
pub mod plan;
pub mod registry;
pub mod schedule;
