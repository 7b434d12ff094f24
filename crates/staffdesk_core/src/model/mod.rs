//! Domain model for employee records.
//!
//! # Responsibility
//! - Define the canonical record shape used by every layer above storage.
//!
//! # Invariants
//! - Every employee is identified by a caller-assigned integer `EmployeeId`.
//! - Deletion is a hard delete; there is no tombstone state.

pub mod employee;
