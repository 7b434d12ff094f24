//! Employee domain record.
//!
//! # Responsibility
//! - Define the canonical employee row and its structural validation.
//!
//! # Invariants
//! - `id` is assigned by the caller and never reused for another employee.
//! - `name` is non-empty after trimming.
//! - `salary`, when present, is a finite number.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for an employee row.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EmployeeId = i64;

/// Canonical employee record.
///
/// Optional fields mirror nullable storage columns so one shape serves
/// repository reads, command replies and CSV export without copying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Serialized as `emp_id` to match the storage schema naming.
    #[serde(rename = "emp_id")]
    pub id: EmployeeId,
    /// Display name; required and non-empty.
    pub name: String,
    /// Organizational unit, nullable.
    pub department: Option<String>,
    /// Job title, nullable.
    pub role: Option<String>,
    /// Current wage, nullable. Must be finite when set.
    pub salary: Option<f64>,
}

impl Employee {
    /// Creates an employee with the required fields only.
    ///
    /// # Invariants
    /// - Optional fields are initialized to `None`.
    pub fn new(id: EmployeeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            department: None,
            role: None,
            salary: None,
        }
    }

    /// Checks structural invariants before the record may be persisted.
    ///
    /// # Errors
    /// - [`EmployeeValidationError::EmptyName`] when `name` trims to nothing.
    /// - [`EmployeeValidationError::NonFiniteSalary`] for NaN or infinite
    ///   salary values, which parse as `f64` but are never a meaningful wage.
    pub fn validate(&self) -> Result<(), EmployeeValidationError> {
        if self.name.trim().is_empty() {
            return Err(EmployeeValidationError::EmptyName);
        }
        if let Some(salary) = self.salary {
            if !salary.is_finite() {
                return Err(EmployeeValidationError::NonFiniteSalary(salary));
            }
        }
        Ok(())
    }
}

/// Structural validation failure for an [`Employee`] record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EmployeeValidationError {
    EmptyName,
    NonFiniteSalary(f64),
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "employee name must not be empty"),
            Self::NonFiniteSalary(value) => {
                write!(f, "employee salary must be a finite number, got {value}")
            }
        }
    }
}

impl Error for EmployeeValidationError {}
