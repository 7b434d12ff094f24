//! Export adapter: CSV serialization and default-handler launch.
//!
//! # Responsibility
//! - Serialize the full employee table to a comma-separated text file.
//! - Hand the written file to the host's default associated application.
//!
//! # Invariants
//! - The header row is exactly `Employee ID,Name,Department,Role,Salary`.
//! - An existing file at the export path is overwritten.
//! - Export success and open success are independent outcomes.

use crate::model::employee::Employee;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;
use std::process::Command;

const CSV_HEADER: &str = "Employee ID,Name,Department,Role,Salary";

#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    OpenFailed(String),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::OpenFailed(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::OpenFailed(_) => None,
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Writes the employee rows as UTF-8 comma-separated text.
///
/// An empty slice produces a file containing only the header row.
pub fn write_csv(employees: &[Employee], path: impl AsRef<Path>) -> Result<(), ExportError> {
    let mut output = String::from(CSV_HEADER);
    output.push('\n');

    for employee in employees {
        let row = [
            employee.id.to_string(),
            employee.name.clone(),
            employee.department.clone().unwrap_or_default(),
            employee.role.clone().unwrap_or_default(),
            employee
                .salary
                .map(|value| value.to_string())
                .unwrap_or_default(),
        ];
        let encoded: Vec<String> = row.iter().map(|value| csv_field(value)).collect();
        output.push_str(&encoded.join(","));
        output.push('\n');
    }

    fs::write(path, output)?;
    Ok(())
}

/// Quotes a CSV field when it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Opens the file with the host environment's default associated application.
///
/// - macOS: `open`
/// - Linux: `xdg-open`
/// - Windows: `cmd /C start`
pub fn open_with_default_handler(path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();

    #[cfg(target_os = "macos")]
    let status = Command::new("open").arg(path).status();

    #[cfg(target_os = "linux")]
    let status = Command::new("xdg-open").arg(path).status();

    #[cfg(target_os = "windows")]
    let status = Command::new("cmd").args(["/C", "start", ""]).arg(path).status();

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    let status: std::io::Result<std::process::ExitStatus> = Err(std::io::Error::other(
        "no default-handler launcher on this platform",
    ));

    let status = status.map_err(|err| {
        ExportError::OpenFailed(format!(
            "failed to launch a viewer for '{}': {err}",
            path.display()
        ))
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(ExportError::OpenFailed(format!(
            "viewer for '{}' exited with {status}",
            path.display()
        )))
    }
}
