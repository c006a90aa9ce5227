use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{Catcher, Request, Route, State};

use crate::errors::{ApiError, ErrorMessage};
use crate::forms::EmployeeForm;
use crate::models::{Employee, Envelope};
use crate::service::{EmployeeService, ServiceError};

type Reply = (Status, Json<Envelope<Employee>>);

fn respond(status: Status, message: impl Into<String>, data: Option<Employee>) -> Reply {
    (status, Json(Envelope::new(status, message, data)))
}

// -----------------------------------------------------------------------------
// HTTP Errors
// -----------------------------------------------------------------------------

/// Anything Rocket rejects before a route runs (unknown path, bad body, bad id)
/// answers 404 with the error body.
#[catch(default)]
fn unhandled(status: Status, _req: &Request) -> (Status, Json<ErrorMessage>) {
    let message = status.reason().unwrap_or("Unhandled failure");
    (Status::NotFound, Json(ErrorMessage::new(Status::NotFound, message)))
}

// -----------------------------------------------------------------------------
// HTTP GET, PUT, POST & DELETE
// -----------------------------------------------------------------------------

#[post("/api/employees", format = "json", data = "<json_employee>")]
fn employee_create(service: &State<EmployeeService>, json_employee: Json<EmployeeForm>) -> Result<Reply, ApiError> {
    let candidate = json_employee.into_inner().into_draft()?;

    match service.create(candidate) {
        Ok(saved) => Ok(respond(Status::Created, "New employee added", Some(saved))),
        Err(err @ ServiceError::DuplicateResource(_)) => Ok(respond(Status::BadRequest, err.to_string(), None)),
        Err(err) => Err(err.into()),
    }
}

#[get("/api/employees")]
fn employee_list(service: &State<EmployeeService>) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(service.list()?))
}

#[get("/api/employees/<employee_id>")]
fn employee_get(service: &State<EmployeeService>, employee_id: i64) -> Result<Reply, ApiError> {
    match service.get_by_id(employee_id) {
        Ok(employee) => Ok(respond(Status::Ok, "Employee detail is given", Some(employee))),
        Err(err @ ServiceError::NotFound(_)) => Ok(respond(Status::NotFound, err.to_string(), None)),
        Err(err) => Err(err.into()),
    }
}

#[put("/api/employees/<employee_id>", format = "json", data = "<json_employee>")]
fn employee_update(
    service: &State<EmployeeService>,
    employee_id: i64,
    json_employee: Json<EmployeeForm>,
) -> Result<Reply, ApiError> {
    let mut existing = match service.get_by_id(employee_id) {
        Ok(employee) => employee,
        Err(ServiceError::NotFound(_)) => {
            return Ok(respond(Status::NotFound, "Employee not found for update", None))
        },
        Err(err) => return Err(err.into()),
    };

    json_employee.into_inner().apply_to(&mut existing)?;
    let updated = service.update(existing)?;
    Ok(respond(Status::Ok, "Employee updated successfully", Some(updated)))
}

#[delete("/api/employees/<employee_id>")]
fn employee_delete(service: &State<EmployeeService>, employee_id: i64) -> Result<Reply, ApiError> {
    match service.get_by_id(employee_id) {
        Ok(_) => {
            service.delete(employee_id)?;
            Ok(respond(Status::Ok, "Successfully deleted the employee !!!!", None))
        },
        Err(ServiceError::NotFound(_)) => Ok(respond(Status::NotFound, "Employee not found", None)),
        Err(err) => Err(err.into()),
    }
}

// -----------------------------------------------------------------------------
// HTTP Routes
// -----------------------------------------------------------------------------

pub fn gen_routes() -> Vec<Route> {
    routes![employee_create, employee_list, employee_get, employee_update, employee_delete]
}

pub fn gen_errors() -> Vec<Catcher> {
    catchers![unhandled]
}
