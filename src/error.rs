use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{error, warn};
use sea_orm::DbErr;
use thiserror::Error;

use crate::forms::FieldError;
use crate::responses::responses::{ErrorResponse, ValidationErrorResponse};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{entity} with id {id} does not exist")]
    NotFound { entity: &'static str, id: i32 },
    #[error("invalid form submission")]
    Validation(Vec<FieldError>),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl AppError {
    pub fn song_not_found(id: i32) -> Self {
        AppError::NotFound { entity: "Song", id }
    }

    pub fn playlist_not_found(id: i32) -> Self {
        AppError::NotFound {
            entity: "Playlist",
            id,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            AppError::NotFound { .. } => {
                warn!("{}", message);
                let ret = ErrorResponse::from_error_code(70, message);
                (StatusCode::NOT_FOUND, Json(ret)).into_response()
            }
            AppError::Validation(errors) => {
                warn!("Rejected form with {} invalid field(s)", errors.len());
                let ret = ValidationErrorResponse::from_field_errors(errors);
                (StatusCode::UNPROCESSABLE_ENTITY, Json(ret)).into_response()
            }
            AppError::Database(err) => {
                error!("Error in database connection: {}", err);
                let ret =
                    ErrorResponse::from_error_code(0, "Error connecting to database".to_string());
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ret)).into_response()
            }
        }
    }
}
