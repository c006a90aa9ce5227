use log::error;
use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use serde::{Deserialize, Serialize};

use crate::models::status_name;
use crate::service::ServiceError;

/// Body written for any failure that is not shaped into an envelope by a route.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub status:  String,
    pub message: String,
}

impl ErrorMessage {
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        ErrorMessage {
            status:  status_name(status),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} must not be empty")]
    Missing(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Form(#[from] FormError),
}

impl ApiError {
    /// `NotFound` is 404 and `DuplicateResource` is 400. Everything else also
    /// answers 404.
    pub fn status(&self) -> Status {
        match self {
            ApiError::Service(ServiceError::DuplicateResource(_)) => Status::BadRequest,
            _ => Status::NotFound,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        if let ApiError::Service(ServiceError::Store(ref err)) = self {
            error!("{} {} failed: {}", req.method(), req.uri(), err);
        }

        let status = self.status();
        (status, Json(ErrorMessage::new(status, self.to_string()))).respond_to(req)
    }
}
