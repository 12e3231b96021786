use serde::Serialize;

use crate::forms::FieldError;

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub(crate) status: String,
    pub(crate) error: ErrorResponseContainer,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponseContainer {
    pub(crate) code: i32,
    pub(crate) message: String,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrorResponse {
    pub(crate) status: String,
    pub(crate) errors: Vec<FieldError>,
}

impl ErrorResponse {
    pub fn from_error_code(code: i32, message: String) -> Self {
        ErrorResponse {
            status: "failed".to_string(),
            error: ErrorResponseContainer { code, message },
        }
    }
}

impl ValidationErrorResponse {
    pub fn from_field_errors(errors: Vec<FieldError>) -> Self {
        ValidationErrorResponse {
            status: "failed".to_string(),
            errors,
        }
    }
}
