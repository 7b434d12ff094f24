//! Command layer: named operations over the employee store.
//!
//! # Responsibility
//! - Parse raw text fields into typed values before touching the service.
//! - Map every outcome, success or failure, to a display message.
//! - Declare which input fields each command consumes and clears.
//!
//! # Invariants
//! - No error escapes `CommandExecutor::execute`; failures become messages.
//! - Parse failures and failed commands clear no fields.
//! - Only fields consumed by the executed command are ever cleared.

use crate::export;
use crate::model::employee::{Employee, EmployeeId};
use crate::repo::employee_repo::{EmployeeRepository, RepoError};
use crate::service::employee_service::EmployeeService;
use log::{info, warn};
use std::collections::HashMap;
use std::path::PathBuf;

/// Named, user-triggerable operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddEmployee,
    RemoveById,
    RemoveByName,
    SearchById,
    SearchByName,
    ListAll,
    UpdateSalaryById,
    UpdateSalaryByName,
    ExportCsv,
}

impl Command {
    /// Every command in menu order.
    pub const ALL: [Command; 9] = [
        Command::AddEmployee,
        Command::RemoveById,
        Command::RemoveByName,
        Command::SearchById,
        Command::SearchByName,
        Command::ListAll,
        Command::UpdateSalaryById,
        Command::UpdateSalaryByName,
        Command::ExportCsv,
    ];

    /// Human-readable menu label.
    pub fn label(self) -> &'static str {
        match self {
            Command::AddEmployee => "Add employee",
            Command::RemoveById => "Remove employee by ID",
            Command::RemoveByName => "Remove employee(s) by name",
            Command::SearchById => "Search employee by ID",
            Command::SearchByName => "Search employees by name",
            Command::ListAll => "Display all employees",
            Command::UpdateSalaryById => "Update salary by ID",
            Command::UpdateSalaryByName => "Update salary by name",
            Command::ExportCsv => "Export to CSV",
        }
    }

    /// Stable name used in logging events.
    pub fn name(self) -> &'static str {
        match self {
            Command::AddEmployee => "add_employee",
            Command::RemoveById => "remove_by_id",
            Command::RemoveByName => "remove_by_name",
            Command::SearchById => "search_by_id",
            Command::SearchByName => "search_by_name",
            Command::ListAll => "list_all",
            Command::UpdateSalaryById => "update_salary_by_id",
            Command::UpdateSalaryByName => "update_salary_by_name",
            Command::ExportCsv => "export_csv",
        }
    }

    /// Input fields this command reads, in prompt order.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Command::AddEmployee => &[
                Field::EmpId,
                Field::Name,
                Field::Department,
                Field::Role,
                Field::Salary,
            ],
            Command::RemoveById | Command::SearchById => &[Field::SearchId],
            Command::RemoveByName | Command::SearchByName => &[Field::SearchName],
            Command::ListAll | Command::ExportCsv => &[],
            Command::UpdateSalaryById => &[Field::UpdateId, Field::NewSalary],
            Command::UpdateSalaryByName => &[Field::UpdateName, Field::NewSalary],
        }
    }
}

/// Labeled single-line input fields of the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    EmpId,
    Name,
    Department,
    Role,
    Salary,
    SearchId,
    SearchName,
    UpdateId,
    UpdateName,
    NewSalary,
}

impl Field {
    /// Prompt label shown next to the field.
    pub fn label(self) -> &'static str {
        match self {
            Field::EmpId => "Employee ID",
            Field::Name => "Name",
            Field::Department => "Department",
            Field::Role => "Role",
            Field::Salary => "Salary",
            Field::SearchId => "Search/Remove ID",
            Field::SearchName => "Search/Remove name",
            Field::UpdateId => "Update ID",
            Field::UpdateName => "Update name",
            Field::NewSalary => "New salary",
        }
    }
}

/// Current raw text of every input field.
///
/// Fields keep their text across commands until a successful mutating
/// command clears the ones it consumed.
#[derive(Debug, Default)]
pub struct FieldValues {
    values: HashMap<Field, String>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current text of a field; unset fields read as empty.
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn clear(&mut self, field: Field) {
        self.values.remove(&field);
    }

    /// Clears every field named in a command reply.
    pub fn apply_clear(&mut self, reply: &CommandReply) {
        for field in reply.clear {
            self.clear(*field);
        }
    }
}

/// Result of one executed command.
#[derive(Debug)]
pub struct CommandReply {
    /// Display text fully replacing the output area content.
    pub message: String,
    /// Fields consumed by a successful mutating command.
    pub clear: &'static [Field],
}

const NO_FIELDS: &[Field] = &[];

/// Executor configuration supplied by the presentation layer.
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Destination of the CSV export, overwritten on each export.
    pub export_path: PathBuf,
    /// Whether to hand the exported file to the host's default viewer.
    /// Tests run with `false`.
    pub open_exports: bool,
}

impl CommandContext {
    pub fn new(export_path: impl Into<PathBuf>, open_exports: bool) -> Self {
        Self {
            export_path: export_path.into(),
            open_exports,
        }
    }
}

/// Dispatches commands to the employee service and renders replies.
pub struct CommandExecutor<R: EmployeeRepository> {
    service: EmployeeService<R>,
    context: CommandContext,
}

impl<R: EmployeeRepository> CommandExecutor<R> {
    pub fn new(service: EmployeeService<R>, context: CommandContext) -> Self {
        Self { service, context }
    }

    /// Runs one command against the current field values.
    ///
    /// Never returns an error: parse failures, repository errors and export
    /// failures are all rendered into the reply message.
    pub fn execute(&self, command: Command, fields: &FieldValues) -> CommandReply {
        match self.run(command, fields) {
            Ok(reply) => {
                info!(
                    "event=command module=command status=ok name={}",
                    command.name()
                );
                reply
            }
            Err(message) => {
                warn!(
                    "event=command module=command status=error name={} error={}",
                    command.name(),
                    message
                );
                CommandReply {
                    message,
                    clear: NO_FIELDS,
                }
            }
        }
    }

    fn run(&self, command: Command, fields: &FieldValues) -> Result<CommandReply, String> {
        match command {
            Command::AddEmployee => {
                let id = parse_id(fields.get(Field::EmpId), Field::EmpId)?;
                let name = require_text(fields.get(Field::Name), Field::Name)?;
                let mut employee = Employee::new(id, name);
                employee.department = optional_text(fields.get(Field::Department));
                employee.role = optional_text(fields.get(Field::Role));
                employee.salary = parse_optional_salary(fields.get(Field::Salary), Field::Salary)?;

                self.service
                    .add_employee(&employee)
                    .map_err(render_repo_error)?;
                Ok(CommandReply {
                    message: format!("Employee {} added successfully.", employee.name),
                    clear: Command::AddEmployee.fields(),
                })
            }
            Command::RemoveById => {
                let id = parse_id(fields.get(Field::SearchId), Field::SearchId)?;
                let removed = self.service.remove_by_id(id).map_err(render_repo_error)?;
                Ok(CommandReply {
                    message: format!("Removed {removed} employee(s) with ID {id}."),
                    clear: Command::RemoveById.fields(),
                })
            }
            Command::RemoveByName => {
                let name = require_text(fields.get(Field::SearchName), Field::SearchName)?;
                let removed = self
                    .service
                    .remove_by_name(&name)
                    .map_err(render_repo_error)?;
                Ok(CommandReply {
                    message: format!("Removed {removed} employee(s) named '{name}'."),
                    clear: Command::RemoveByName.fields(),
                })
            }
            Command::SearchById => {
                let id = parse_id(fields.get(Field::SearchId), Field::SearchId)?;
                let message = match self.service.find_by_id(id).map_err(render_repo_error)? {
                    Some(employee) => render_employee(&employee),
                    None => format!("No employee found with ID {id}."),
                };
                Ok(CommandReply {
                    message,
                    clear: NO_FIELDS,
                })
            }
            Command::SearchByName => {
                let needle = require_text(fields.get(Field::SearchName), Field::SearchName)?;
                let matches = self
                    .service
                    .search_by_name(&needle)
                    .map_err(render_repo_error)?;
                let message = if matches.is_empty() {
                    format!("No employee found with name containing '{needle}'.")
                } else {
                    render_employees(&matches)
                };
                Ok(CommandReply {
                    message,
                    clear: NO_FIELDS,
                })
            }
            Command::ListAll => {
                let employees = self.service.list_all().map_err(render_repo_error)?;
                let message = if employees.is_empty() {
                    "No employees in the database.".to_string()
                } else {
                    render_employees(&employees)
                };
                Ok(CommandReply {
                    message,
                    clear: NO_FIELDS,
                })
            }
            Command::UpdateSalaryById => {
                let id = parse_id(fields.get(Field::UpdateId), Field::UpdateId)?;
                let salary = parse_salary(fields.get(Field::NewSalary), Field::NewSalary)?;
                let changed = self
                    .service
                    .update_salary_by_id(id, salary)
                    .map_err(render_repo_error)?;
                let message = if changed == 0 {
                    format!("No employee found with ID {id}.")
                } else {
                    format!("Updated salary of employee ID {id} to ${salary}.")
                };
                Ok(CommandReply {
                    message,
                    clear: Command::UpdateSalaryById.fields(),
                })
            }
            Command::UpdateSalaryByName => {
                let needle = require_text(fields.get(Field::UpdateName), Field::UpdateName)?;
                let salary = parse_salary(fields.get(Field::NewSalary), Field::NewSalary)?;
                let changed = self
                    .service
                    .update_salary_by_name(&needle, salary)
                    .map_err(render_repo_error)?;
                let message = if changed == 0 {
                    format!("No employee found with name containing '{needle}'.")
                } else {
                    format!(
                        "Updated salary of {changed} employee(s) with name containing '{needle}' to ${salary}."
                    )
                };
                Ok(CommandReply {
                    message,
                    clear: Command::UpdateSalaryByName.fields(),
                })
            }
            Command::ExportCsv => {
                let employees = self.service.list_all().map_err(render_repo_error)?;
                export::write_csv(&employees, &self.context.export_path)
                    .map_err(|err| format!("Export failed: {err}"))?;
                info!(
                    "event=export module=command status=ok rows={} path={}",
                    employees.len(),
                    self.context.export_path.display()
                );

                let mut message = format!(
                    "Exported {} employee(s) to '{}'.",
                    employees.len(),
                    self.context.export_path.display()
                );
                if self.context.open_exports {
                    // Open failure does not retract export success.
                    if let Err(err) = export::open_with_default_handler(&self.context.export_path)
                    {
                        warn!("event=export_open module=command status=error error={err}");
                        message.push_str(&format!(
                            " The file was written but could not be opened: {err}"
                        ));
                    }
                }
                Ok(CommandReply {
                    message,
                    clear: NO_FIELDS,
                })
            }
        }
    }
}

fn parse_id(raw: &str, field: Field) -> Result<EmployeeId, String> {
    raw.trim()
        .parse::<EmployeeId>()
        .map_err(|_| parse_error(field, raw))
}

fn parse_salary(raw: &str, field: Field) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| parse_error(field, raw))
}

fn parse_optional_salary(raw: &str, field: Field) -> Result<Option<f64>, String> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_salary(raw, field).map(Some)
}

fn require_text(raw: &str, field: Field) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("Enter a value for {}.", field.label()));
    }
    Ok(trimmed.to_string())
}

fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_error(field: Field, raw: &str) -> String {
    format!(
        "Enter a numeric value for {}; got '{}'.",
        field.label(),
        raw.trim()
    )
}

fn render_repo_error(err: RepoError) -> String {
    match err {
        RepoError::DuplicateId(id) => format!("Employee ID {id} already exists."),
        other => format!("Operation failed: {other}."),
    }
}

fn render_employee(employee: &Employee) -> String {
    format!(
        "ID: {}, Name: {}, Dept: {}, Role: {}, Salary: {}",
        employee.id,
        employee.name,
        employee.department.as_deref().unwrap_or("-"),
        employee.role.as_deref().unwrap_or("-"),
        employee
            .salary
            .map(|value| format!("${value}"))
            .unwrap_or_else(|| "-".to_string()),
    )
}

fn render_employees(employees: &[Employee]) -> String {
    employees
        .iter()
        .map(render_employee)
        .collect::<Vec<_>>()
        .join("\n")
}
