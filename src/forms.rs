use serde::Deserialize;

use crate::errors::FormError;
use crate::models::Employee;

/// Request body for creating or updating an employee. Every field is optional
/// on the wire; `validate` decides what is acceptable.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeForm {
    pub id:         Option<i64>,
    pub first_name: Option<String>,
    pub last_name:  Option<String>,
    pub email:      Option<String>,
}

impl EmployeeForm {
    /// Turns the form into an unsaved record. A submitted `id` is dropped.
    pub fn into_draft(self) -> Result<Employee, FormError> {
        let (first_name, last_name, email) = self.validate()?;
        Ok(Employee::draft(first_name, last_name, email))
    }

    /// Overwrites the mutable fields of `employee`, leaving its id alone.
    pub fn apply_to(self, employee: &mut Employee) -> Result<(), FormError> {
        let (first_name, last_name, email) = self.validate()?;
        employee.first_name = first_name;
        employee.last_name = last_name;
        employee.email = email;
        Ok(())
    }

    fn validate(self) -> Result<(String, String, String), FormError> {
        Ok((
            required("firstName", self.first_name)?,
            required("lastName", self.last_name)?,
            required("email", self.email)?,
        ))
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, FormError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(FormError::Missing(field)),
    }
}
