pub mod aggregator;
pub mod allocator;
pub mod decomposer;
pub mod demand;
pub mod observer;
pub mod schedule;
pub mod scheduler;
pub mod statistics;
pub mod utils;
