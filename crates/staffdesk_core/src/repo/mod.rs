//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for employee rows.
//! - Isolate SQLite query details from command/service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Employee::validate()` before persistence.
//! - Repository APIs return semantic errors (`DuplicateId`) in addition to DB
//!   transport errors.

pub mod employee_repo;
