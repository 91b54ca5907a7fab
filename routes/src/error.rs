use axum::{extract::multipart::MultipartError, http::StatusCode};
use scholar::{traits::intake::IntakeError, validate::ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
	#[error("{0}")]
	Invalid(#[from] ValidationError),

	#[error("malformed multipart body: {0}")]
	Multipart(#[from] MultipartError),

	#[error("database error: {0}")]
	Database(#[from] sea_orm::DbErr),

	#[error("storage error: {0}")]
	Storage(#[from] std::io::Error),

	// wrapper error to return arbitraty status codes
	#[error("{0}")]
	Status(StatusCode),
}

impl ApiError {
	pub fn not_found() -> Self {
		Self::Status(axum::http::StatusCode::NOT_FOUND)
	}

	pub fn forbidden() -> Self {
		Self::Status(axum::http::StatusCode::FORBIDDEN)
	}

	pub fn unauthorized() -> Self {
		Self::Status(axum::http::StatusCode::UNAUTHORIZED)
	}
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<IntakeError> for ApiError {
	fn from(value: IntakeError) -> Self {
		match value {
			IntakeError::Invalid(e) => ApiError::Invalid(e),
			IntakeError::Storage(e) => ApiError::Storage(e),
			IntakeError::Database(e) => ApiError::Database(e),
		}
	}
}

impl axum::response::IntoResponse for ApiError {
	fn into_response(self) -> axum::response::Response {
		tracing::debug!("emitting error response: {self:?}");
		let descr = self.to_string();
		let (status, kind) = match self {
			ApiError::Invalid(_) => (StatusCode::BAD_REQUEST, "validation"),
			ApiError::Multipart(ref e) => (e.status(), "multipart"),
			ApiError::Database(ref e) => {
				tracing::error!("database error while serving request: {e}");
				(StatusCode::INTERNAL_SERVER_ERROR, "database")
			},
			ApiError::Storage(ref e) => {
				tracing::error!("storage error while serving request: {e}");
				(StatusCode::INTERNAL_SERVER_ERROR, "storage")
			},
			ApiError::Status(status) => (status, status.canonical_reason().unwrap_or("unknown")),
		};

		(
			status,
			axum::Json(serde_json::json!({
				"error": kind,
				"description": descr,
			}))
		).into_response()
	}
}
