#[macro_use]
extern crate rocket;

pub mod api;
pub mod config;
pub mod errors;
pub mod forms;
pub mod models;
pub mod service;
pub mod store;

use rocket::figment::Figment;
use rocket::{Build, Rocket};

use api::{gen_errors, gen_routes};
use service::EmployeeService;

/// Assembles the Rocket instance around an already constructed service.
pub fn build(figment: Figment, service: EmployeeService) -> Rocket<Build> {
    rocket::custom(figment)
        .manage(service)
        .mount("/", gen_routes())
        .register("/", gen_errors())
}
