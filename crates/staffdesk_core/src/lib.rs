//! Core domain logic for staffdesk.
//! This crate is the single source of truth for business invariants.

pub mod command;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use command::{Command, CommandContext, CommandExecutor, CommandReply, Field, FieldValues};
pub use export::{open_with_default_handler, write_csv, ExportError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{Employee, EmployeeId, EmployeeValidationError};
pub use repo::employee_repo::{
    EmployeeRepository, RepoError, RepoResult, SqliteEmployeeRepository,
};
pub use service::employee_service::EmployeeService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
