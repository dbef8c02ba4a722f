use actix_web::{body, http::{self, header::ContentType, StatusCode}, HttpResponse};
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayrollError {
    #[error("period parameters not configured")]
    MissingParameters,
    #[error("invalid ad-hoc item `{code}`: {reason}")]
    InvalidAdHocItem {
        code: String,
        reason: &'static str,
    },
    #[error("worked days must be between 1 and 31, got {0}")]
    InvalidWorkedDays(u8),
    #[error("invalid period parameters: {0}")]
    InvalidParameters(&'static str),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("payroll is closed, reopen it before saving")]
    Closed,
    #[error("payroll is not closed")]
    NotClosed,
    #[error("period parameters are referenced by closed payrolls")]
    ParametersLocked,
    #[error("persistence conflict: {0}")]
    Persistence(#[from] DbErr),
}

impl PayrollError {
    pub(crate) fn invalid_item(code: &str, reason: &'static str) -> Self {
        Self::InvalidAdHocItem {
            code: code.to_owned(),
            reason,
        }
    }
}

impl actix_web::error::ResponseError for PayrollError {
    fn error_response(&self) -> HttpResponse<body::BoxBody> {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }

    fn status_code(&self) -> http::StatusCode {
        match self {
            PayrollError::MissingParameters => StatusCode::UNPROCESSABLE_ENTITY,
            PayrollError::InvalidAdHocItem { .. }
            | PayrollError::InvalidWorkedDays(_)
            | PayrollError::InvalidParameters(_) => StatusCode::BAD_REQUEST,
            PayrollError::NotFound(_) => StatusCode::NOT_FOUND,
            PayrollError::Closed
            | PayrollError::NotClosed
            | PayrollError::ParametersLocked
            | PayrollError::Persistence(_) => StatusCode::CONFLICT,
        }
    }
}
