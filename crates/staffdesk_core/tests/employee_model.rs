use staffdesk_core::{Employee, EmployeeValidationError};

#[test]
fn new_sets_optional_fields_to_none() {
    let employee = Employee::new(7, "Alice");

    assert_eq!(employee.id, 7);
    assert_eq!(employee.name, "Alice");
    assert_eq!(employee.department, None);
    assert_eq!(employee.role, None);
    assert_eq!(employee.salary, None);
    assert!(employee.validate().is_ok());
}

#[test]
fn validate_rejects_blank_name() {
    let employee = Employee::new(1, "   ");
    assert_eq!(
        employee.validate().unwrap_err(),
        EmployeeValidationError::EmptyName
    );
}

#[test]
fn validate_rejects_non_finite_salary() {
    let mut employee = Employee::new(1, "Alice");
    employee.salary = Some(f64::NAN);
    assert!(matches!(
        employee.validate().unwrap_err(),
        EmployeeValidationError::NonFiniteSalary(_)
    ));

    employee.salary = Some(f64::INFINITY);
    assert!(matches!(
        employee.validate().unwrap_err(),
        EmployeeValidationError::NonFiniteSalary(_)
    ));
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let mut employee = Employee::new(3, "Carol");
    employee.department = Some("Eng".to_string());
    employee.role = Some("SWE".to_string());
    employee.salary = Some(90_000.0);

    let json = serde_json::to_value(&employee).unwrap();
    assert_eq!(json["emp_id"], 3);
    assert_eq!(json["name"], "Carol");
    assert_eq!(json["department"], "Eng");
    assert_eq!(json["role"], "SWE");
    assert_eq!(json["salary"], 90_000.0);

    let decoded: Employee = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, employee);
}
