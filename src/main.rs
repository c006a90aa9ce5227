use std::error::Error;

use log::{info, warn};
use rocket::fairing::AdHoc;

use employees::config::AppConfig;
use employees::service::EmployeeService;
use employees::store;

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    let (repository, backend) = store::open(&config)?;

    let launched = employees::build(config.figment(), EmployeeService::new(repository))
        .attach(AdHoc::on_liftoff("Record store", move |_| {
            Box::pin(async move {
                if backend.is_durable() {
                    info!("employee records kept in the {} store", backend);
                } else {
                    warn!("employee records kept in the {} store and lost on restart; build with --features postgres to persist them", backend);
                }
            })
        }))
        .launch()
        .await;

    if let Err(err) = launched {
        let reason = err.pretty_print();
        return Err(reason.into());
    }
    Ok(())
}
