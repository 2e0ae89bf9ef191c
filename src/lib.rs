pub mod batch;
pub mod cli;
pub mod connect;
pub mod logger;
pub mod migrate;
pub mod pipeline;
pub mod sanitize;
pub mod scan;
pub mod store;
pub mod summary;

pub use migrate::{MigrateOptions, run_migration};
pub use summary::MigrationSummary;
