//! Employee use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for the command layer.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::employee::{Employee, EmployeeId};
use crate::repo::employee_repo::{EmployeeRepository, RepoResult};

/// Use-case service wrapper for employee record operations.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a new employee through repository persistence.
    ///
    /// # Contract
    /// - Fails with `DuplicateId` when the id is already taken.
    /// - Fails with `Validation` on structural violations.
    pub fn add_employee(&self, employee: &Employee) -> RepoResult<EmployeeId> {
        self.repo.insert(employee)
    }

    /// Removes the employee with the given id; absent ids are a no-op.
    pub fn remove_by_id(&self, id: EmployeeId) -> RepoResult<usize> {
        self.repo.delete_by_id(id)
    }

    /// Removes every employee whose name matches exactly.
    pub fn remove_by_name(&self, name: &str) -> RepoResult<usize> {
        self.repo.delete_by_name(name)
    }

    /// Looks up one employee by id.
    pub fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        self.repo.find_by_id(id)
    }

    /// Lists employees whose name contains the given text.
    pub fn search_by_name(&self, needle: &str) -> RepoResult<Vec<Employee>> {
        self.repo.find_by_name_contains(needle)
    }

    /// Lists every employee in id order.
    pub fn list_all(&self) -> RepoResult<Vec<Employee>> {
        self.repo.list_all()
    }

    /// Sets the salary of the employee with the given id.
    ///
    /// Returns rows affected; 0 means the id was absent (no-op).
    pub fn update_salary_by_id(&self, id: EmployeeId, salary: f64) -> RepoResult<usize> {
        self.repo.update_salary_by_id(id, salary)
    }

    /// Sets the salary of every employee whose name contains the given text.
    pub fn update_salary_by_name(&self, needle: &str, salary: f64) -> RepoResult<usize> {
        self.repo.update_salary_by_name_contains(needle, salary)
    }
}
