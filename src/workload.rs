pub mod config;
pub mod execute_workload;
pub mod report;
