//! Error types for the recipe server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Stable error codes exposed to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UnexpectedError,
    InvalidData,
    RecipeNotFound,
}

impl ErrorCode {
    pub fn code(self) -> u16 {
        match self {
            Self::UnexpectedError => 100,
            Self::InvalidData => 101,
            Self::RecipeNotFound => 102,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::UnexpectedError => "Unexpected Error",
            Self::InvalidData => "Invalid data",
            Self::RecipeNotFound => "Data not found",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::UnexpectedError => "An unexpected error has occurred, please try again.",
            Self::InvalidData => "The data provided is invalid for this operation.",
            Self::RecipeNotFound => "Recipe not found.",
        }
    }
}

/// Validation failure for one request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub name: String,
    pub details: Vec<String>,
}

impl FieldError {
    pub fn new(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: vec![detail.into()],
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(i64),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Single-field validation failure.
    pub fn invalid_field(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(name, detail)])
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            Error::RecipeNotFound(_) => ErrorCode::RecipeNotFound,
            Error::InvalidRequest(_) | Error::Validation(_) => ErrorCode::InvalidData,
            Error::Database(_) | Error::Internal(_) | Error::Other(_) => {
                ErrorCode::UnexpectedError
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.error_code() {
            ErrorCode::RecipeNotFound => StatusCode::NOT_FOUND,
            ErrorCode::InvalidData => StatusCode::BAD_REQUEST,
            ErrorCode::UnexpectedError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = Vec::new();
        flatten_validation_errors("", &errors, &mut fields);
        fields.sort_by(|a, b| a.name.cmp(&b.name));
        Error::Validation(fields)
    }
}

fn flatten_validation_errors(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<FieldError>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let name = if prefix.is_empty() {
            format!("{field}")
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                let details = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                out.push(FieldError { name, details });
            }
            ValidationErrorsKind::Struct(inner) => {
                flatten_validation_errors(&name, inner, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten_validation_errors(&format!("{name}[{index}]"), inner, out);
                }
            }
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    code: u16,
    title: &'static str,
    message: &'static str,
    field_errors: Vec<FieldError>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let code = self.error_code();
        let status = self.status();

        match code {
            ErrorCode::UnexpectedError => tracing::error!(error = %self, "Unexpected error"),
            _ => tracing::info!(error = %self, "Request rejected"),
        }

        // Unreadable bodies carry no field errors; the reason is only logged.
        let field_errors = match self {
            Error::Validation(fields) => fields,
            _ => Vec::new(),
        };

        let body = ErrorBody {
            code: code.code(),
            title: code.title(),
            message: code.message(),
            field_errors,
        };

        (status, Json(body)).into_response()
    }
}
