use rusqlite::Connection;
use staffdesk_core::db::open_db_in_memory;
use staffdesk_core::{
    Command, CommandContext, CommandExecutor, Employee, EmployeeRepository, EmployeeService,
    Field, FieldValues, SqliteEmployeeRepository,
};
use std::path::PathBuf;

fn executor(conn: &Connection) -> CommandExecutor<SqliteEmployeeRepository<'_>> {
    executor_with_export(conn, PathBuf::from("unused.csv"))
}

fn executor_with_export(
    conn: &Connection,
    export_path: PathBuf,
) -> CommandExecutor<SqliteEmployeeRepository<'_>> {
    let repo = SqliteEmployeeRepository::try_new(conn).unwrap();
    let service = EmployeeService::new(repo);
    // open_exports=false keeps tests from launching a viewer.
    CommandExecutor::new(service, CommandContext::new(export_path, false))
}

fn add_form(id: &str, name: &str, department: &str, role: &str, salary: &str) -> FieldValues {
    let mut fields = FieldValues::new();
    fields.set(Field::EmpId, id);
    fields.set(Field::Name, name);
    fields.set(Field::Department, department);
    fields.set(Field::Role, role);
    fields.set(Field::Salary, salary);
    fields
}

fn seeded_connection() -> Connection {
    let conn = open_db_in_memory().unwrap();
    {
        let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();
        let mut alice = Employee::new(1, "Alice");
        alice.department = Some("Eng".to_string());
        alice.role = Some("SWE".to_string());
        alice.salary = Some(90_000.0);
        repo.insert(&alice).unwrap();

        let mut bob = Employee::new(2, "Bob");
        bob.department = Some("Sales".to_string());
        bob.role = Some("Rep".to_string());
        bob.salary = Some(60_000.0);
        repo.insert(&bob).unwrap();
    }
    conn
}

#[test]
fn add_command_inserts_row_and_clears_its_fields() {
    let conn = open_db_in_memory().unwrap();
    let executor = executor(&conn);

    let mut fields = add_form("1", "Alice", "Eng", "SWE", "90000");
    fields.set(Field::SearchName, "pending search");

    let reply = executor.execute(Command::AddEmployee, &fields);
    assert_eq!(reply.message, "Employee Alice added successfully.");
    assert_eq!(reply.clear, Command::AddEmployee.fields());

    fields.apply_clear(&reply);
    assert_eq!(fields.get(Field::EmpId), "");
    assert_eq!(fields.get(Field::Name), "");
    // Fields of other pending commands are untouched.
    assert_eq!(fields.get(Field::SearchName), "pending search");

    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();
    let stored = repo.find_by_id(1).unwrap().unwrap();
    assert_eq!(stored.name, "Alice");
    assert_eq!(stored.salary, Some(90_000.0));
}

#[test]
fn add_command_treats_blank_optional_fields_as_null() {
    let conn = open_db_in_memory().unwrap();
    let executor = executor(&conn);

    let fields = add_form("7", "Eve", "", "", "");
    let reply = executor.execute(Command::AddEmployee, &fields);
    assert_eq!(reply.message, "Employee Eve added successfully.");

    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();
    let stored = repo.find_by_id(7).unwrap().unwrap();
    assert_eq!(stored.department, None);
    assert_eq!(stored.role, None);
    assert_eq!(stored.salary, None);
}

#[test]
fn non_numeric_id_yields_parse_error_and_clears_nothing() {
    let conn = open_db_in_memory().unwrap();
    let executor = executor(&conn);

    let fields = add_form("abc", "Alice", "Eng", "SWE", "90000");
    let reply = executor.execute(Command::AddEmployee, &fields);

    assert!(reply.message.contains("Employee ID"));
    assert!(reply.message.contains("'abc'"));
    assert!(reply.clear.is_empty());

    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();
    assert!(repo.list_all().unwrap().is_empty());
}

#[test]
fn non_numeric_salary_yields_parse_error() {
    let conn = seeded_connection();
    let executor = executor(&conn);

    let mut fields = FieldValues::new();
    fields.set(Field::UpdateId, "1");
    fields.set(Field::NewSalary, "lots");

    let reply = executor.execute(Command::UpdateSalaryById, &fields);
    assert!(reply.message.contains("New salary"));
    assert!(reply.message.contains("'lots'"));
    assert!(reply.clear.is_empty());
}

#[test]
fn duplicate_add_reports_existing_id_and_clears_nothing() {
    let conn = seeded_connection();
    let executor = executor(&conn);

    let fields = add_form("1", "Mallory", "Ops", "SRE", "1");
    let reply = executor.execute(Command::AddEmployee, &fields);

    assert_eq!(reply.message, "Employee ID 1 already exists.");
    assert!(reply.clear.is_empty());

    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();
    assert_eq!(repo.find_by_id(1).unwrap().unwrap().name, "Alice");
}

#[test]
fn search_by_id_renders_the_row_or_reports_absence() {
    let conn = seeded_connection();
    let executor = executor(&conn);

    let mut fields = FieldValues::new();
    fields.set(Field::SearchId, "1");
    let reply = executor.execute(Command::SearchById, &fields);
    assert_eq!(
        reply.message,
        "ID: 1, Name: Alice, Dept: Eng, Role: SWE, Salary: $90000"
    );
    assert!(reply.clear.is_empty());

    fields.set(Field::SearchId, "99");
    let reply = executor.execute(Command::SearchById, &fields);
    assert_eq!(reply.message, "No employee found with ID 99.");
}

#[test]
fn search_by_name_lists_matches_one_per_line() {
    let conn = seeded_connection();
    let executor = executor(&conn);

    let mut fields = FieldValues::new();
    fields.set(Field::SearchName, "b");
    let reply = executor.execute(Command::SearchByName, &fields);
    assert_eq!(
        reply.message,
        "ID: 2, Name: Bob, Dept: Sales, Role: Rep, Salary: $60000"
    );

    fields.set(Field::SearchName, "zzz");
    let reply = executor.execute(Command::SearchByName, &fields);
    assert_eq!(
        reply.message,
        "No employee found with name containing 'zzz'."
    );
}

#[test]
fn list_all_renders_every_row() {
    let conn = seeded_connection();
    let executor = executor(&conn);

    let reply = executor.execute(Command::ListAll, &FieldValues::new());
    let lines: Vec<&str> = reply.message.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("ID: 1, Name: Alice"));
    assert!(lines[1].starts_with("ID: 2, Name: Bob"));
}

#[test]
fn list_all_reports_empty_store() {
    let conn = open_db_in_memory().unwrap();
    let executor = executor(&conn);

    let reply = executor.execute(Command::ListAll, &FieldValues::new());
    assert_eq!(reply.message, "No employees in the database.");
}

#[test]
fn remove_by_id_reports_affected_count_and_clears_its_field() {
    let conn = seeded_connection();
    let executor = executor(&conn);

    let mut fields = FieldValues::new();
    fields.set(Field::SearchId, "2");
    let reply = executor.execute(Command::RemoveById, &fields);
    assert_eq!(reply.message, "Removed 1 employee(s) with ID 2.");
    fields.apply_clear(&reply);
    assert_eq!(fields.get(Field::SearchId), "");

    fields.set(Field::SearchId, "2");
    let reply = executor.execute(Command::RemoveById, &fields);
    assert_eq!(reply.message, "Removed 0 employee(s) with ID 2.");
}

#[test]
fn update_salary_by_name_reports_match_count() {
    let conn = seeded_connection();
    let executor = executor(&conn);

    let mut fields = FieldValues::new();
    fields.set(Field::UpdateName, "o");
    fields.set(Field::NewSalary, "65000");
    let reply = executor.execute(Command::UpdateSalaryByName, &fields);
    assert_eq!(
        reply.message,
        "Updated salary of 1 employee(s) with name containing 'o' to $65000."
    );

    let repo = SqliteEmployeeRepository::try_new(&conn).unwrap();
    assert_eq!(repo.find_by_id(2).unwrap().unwrap().salary, Some(65_000.0));
    assert_eq!(repo.find_by_id(1).unwrap().unwrap().salary, Some(90_000.0));
}

#[test]
fn update_salary_by_id_reports_absent_id() {
    let conn = seeded_connection();
    let executor = executor(&conn);

    let mut fields = FieldValues::new();
    fields.set(Field::UpdateId, "99");
    fields.set(Field::NewSalary, "1000");
    let reply = executor.execute(Command::UpdateSalaryById, &fields);
    assert_eq!(reply.message, "No employee found with ID 99.");
}

#[test]
fn export_command_writes_csv_without_opening_a_viewer() {
    let dir = tempfile::tempdir().unwrap();
    let export_path = dir.path().join("employee_data.csv");

    let conn = seeded_connection();
    let executor = executor_with_export(&conn, export_path.clone());

    let reply = executor.execute(Command::ExportCsv, &FieldValues::new());
    assert!(reply.message.contains("Exported 2 employee(s)"));
    assert!(reply.clear.is_empty());

    let contents = std::fs::read_to_string(&export_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "Employee ID,Name,Department,Role,Salary");
    assert_eq!(lines[1], "1,Alice,Eng,SWE,90000");
    assert_eq!(lines[2], "2,Bob,Sales,Rep,60000");
}
