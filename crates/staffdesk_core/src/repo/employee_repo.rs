//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical `employees` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Employee::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Substring matches treat user text as literal content, never as a
//!   `LIKE` pattern.

use crate::db::{migrations::latest_version, DbError};
use crate::model::employee::{Employee, EmployeeId, EmployeeValidationError};
use rusqlite::ffi::{SQLITE_CONSTRAINT_PRIMARYKEY, SQLITE_CONSTRAINT_UNIQUE};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    emp_id,
    name,
    department,
    role,
    salary
FROM employees";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EmployeeValidationError),
    Db(DbError),
    DuplicateId(EmployeeId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "employee id {id} already exists"),
            Self::InvalidData(message) => write!(f, "invalid employee data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EmployeeValidationError> for RepoError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for employee CRUD operations.
///
/// Mutating operations auto-commit per statement; counts report rows
/// affected, with 0 meaning a successful no-op.
pub trait EmployeeRepository {
    /// Persists a new employee row.
    fn insert(&self, employee: &Employee) -> RepoResult<EmployeeId>;
    /// Removes the row with the given id, if present.
    fn delete_by_id(&self, id: EmployeeId) -> RepoResult<usize>;
    /// Removes all rows whose name matches exactly.
    fn delete_by_name(&self, name: &str) -> RepoResult<usize>;
    /// Returns the single matching row, or `None`.
    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    /// Returns rows whose name contains the given text, ordered by id.
    fn find_by_name_contains(&self, needle: &str) -> RepoResult<Vec<Employee>>;
    /// Returns all rows ordered by id.
    fn list_all(&self) -> RepoResult<Vec<Employee>>;
    /// Sets the salary on the matching row.
    fn update_salary_by_id(&self, id: EmployeeId, salary: f64) -> RepoResult<usize>;
    /// Sets the salary on all rows whose name contains the given text.
    fn update_salary_by_name_contains(&self, needle: &str, salary: f64) -> RepoResult<usize>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    ///
    /// # Errors
    /// - [`RepoError::UninitializedConnection`] when the connection schema
    ///   version does not match this binary's migration registry.
    /// - [`RepoError::MissingRequiredTable`] / [`RepoError::MissingRequiredColumn`]
    ///   when the `employees` shape is not usable.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn insert(&self, employee: &Employee) -> RepoResult<EmployeeId> {
        employee.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO employees (emp_id, name, department, role, salary)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                employee.id,
                employee.name.as_str(),
                employee.department.as_deref(),
                employee.role.as_deref(),
                employee.salary,
            ],
        );

        match inserted {
            Ok(_) => Ok(employee.id),
            Err(err) => Err(map_insert_error(err, employee.id)),
        }
    }

    fn delete_by_id(&self, id: EmployeeId) -> RepoResult<usize> {
        let deleted = self
            .conn
            .execute("DELETE FROM employees WHERE emp_id = ?1;", [id])?;
        Ok(deleted)
    }

    fn delete_by_name(&self, name: &str) -> RepoResult<usize> {
        let deleted = self
            .conn
            .execute("DELETE FROM employees WHERE name = ?1;", [name])?;
        Ok(deleted)
    }

    fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE emp_id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }

        Ok(None)
    }

    fn find_by_name_contains(&self, needle: &str) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EMPLOYEE_SELECT_SQL}
             WHERE name LIKE '%' || ?1 || '%' ESCAPE '\\'
             ORDER BY emp_id ASC;"
        ))?;

        let mut rows = stmt.query([escape_like(needle)])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn list_all(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY emp_id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }

        Ok(employees)
    }

    fn update_salary_by_id(&self, id: EmployeeId, salary: f64) -> RepoResult<usize> {
        require_finite_salary(salary)?;

        let changed = self.conn.execute(
            "UPDATE employees SET salary = ?1 WHERE emp_id = ?2;",
            params![salary, id],
        )?;
        Ok(changed)
    }

    fn update_salary_by_name_contains(&self, needle: &str, salary: f64) -> RepoResult<usize> {
        require_finite_salary(salary)?;

        let changed = self.conn.execute(
            "UPDATE employees
             SET salary = ?1
             WHERE name LIKE '%' || ?2 || '%' ESCAPE '\\';",
            params![salary, escape_like(needle)],
        )?;
        Ok(changed)
    }
}

/// Escapes `LIKE` metacharacters so user text is matched literally.
pub fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn require_finite_salary(salary: f64) -> RepoResult<()> {
    if salary.is_finite() {
        Ok(())
    } else {
        Err(EmployeeValidationError::NonFiniteSalary(salary).into())
    }
}

fn map_insert_error(err: rusqlite::Error, id: EmployeeId) -> RepoError {
    if let rusqlite::Error::SqliteFailure(ref failure, ref message) = err {
        match failure.extended_code {
            SQLITE_CONSTRAINT_PRIMARYKEY | SQLITE_CONSTRAINT_UNIQUE => {
                return RepoError::DuplicateId(id);
            }
            _ if failure.code == rusqlite::ErrorCode::ConstraintViolation => {
                let detail = message.clone().unwrap_or_else(|| failure.to_string());
                return RepoError::InvalidData(detail);
            }
            _ => {}
        }
    }
    err.into()
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let employee = Employee {
        id: row.get("emp_id")?,
        name: row.get("name")?,
        department: row.get("department")?,
        role: row.get("role")?,
        salary: row.get("salary")?,
    };
    employee.validate()?;
    Ok(employee)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "employees")? {
        return Err(RepoError::MissingRequiredTable("employees"));
    }

    for column in ["emp_id", "name", "department", "role", "salary"] {
        if !table_has_column(conn, "employees", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "employees",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
