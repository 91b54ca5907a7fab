use axum::{extract::{Multipart, State}, http::StatusCode, Json};
use scholar::{
	model::application,
	traits::Intake,
	validate::{check_size, Certificate, Slot, Submission, ValidationError},
	Context,
};

use crate::{auth::AdminAccess, ApiResult};

pub async fn post(
	State(ctx): State<Context>,
	mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<application::Model>)> {
	let submission = read_submission(&mut multipart).await?;
	let record = ctx.submit(submission).await?;
	Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list(
	State(ctx): State<Context>,
	_admin: AdminAccess,
) -> ApiResult<Json<Vec<application::Model>>> {
	Ok(Json(ctx.applications().await?))
}

/// collect form fields and both certificates, refusing oversized parts while they stream in
pub async fn read_submission(multipart: &mut Multipart) -> ApiResult<Submission> {
	let mut submission = Submission::default();

	while let Some(mut field) = multipart.next_field().await? {
		let Some(name) = field.name().map(str::to_string) else {
			tracing::debug!("skipping unnamed multipart field");
			continue;
		};

		let Some(slot) = Slot::from_field(&name) else {
			let value = field.text().await?;
			if !submission.form.set(&name, value) {
				tracing::debug!("ignoring unknown multipart field '{name}'");
			}
			continue;
		};

		if submission.certificate(slot).is_some() {
			return Err(ValidationError::DuplicateFile(slot).into());
		}

		let filename = field.file_name().unwrap_or_default().to_string();
		let media_type = field.content_type().map(str::to_string);
		let mut data = Vec::new();
		while let Some(chunk) = field.chunk().await? {
			check_size(slot, data.len() + chunk.len())?;
			data.extend_from_slice(&chunk);
		}

		// browsers send an empty part for file inputs left blank
		if filename.is_empty() && data.is_empty() {
			continue;
		}

		*submission.certificate_mut(slot) = Some(Certificate { filename, media_type, data });
	}

	Ok(submission)
}
