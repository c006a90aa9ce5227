use diesel::prelude::*;

use super::schema::employees;
use crate::models::Employee;

#[derive(Clone, Debug, Queryable, Selectable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EmployeeRow {
    pub id:         i64,
    pub first_name: String,
    pub last_name:  String,
    pub email:      String,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id:         row.id,
            first_name: row.first_name,
            last_name:  row.last_name,
            email:      row.email,
        }
    }
}

/// Insert without an id, letting `BIGSERIAL` assign one.
#[derive(Insertable)]
#[diesel(table_name = employees)]
pub struct NewEmployeeRow<'a> {
    pub first_name: &'a str,
    pub last_name:  &'a str,
    pub email:      &'a str,
}

/// Insert carrying an explicit id, used for upserts.
#[derive(Insertable)]
#[diesel(table_name = employees)]
pub struct EmployeeUpsertRow<'a> {
    pub id:         i64,
    pub first_name: &'a str,
    pub last_name:  &'a str,
    pub email:      &'a str,
}
