use axum::{extract::{Path, State}, http::header, response::IntoResponse};
use tokio::io::AsyncReadExt;
use scholar::Context;

pub async fn download(
	State(ctx): State<Context>,
	Path(filename): Path<String>,
) -> crate::ApiResult<impl IntoResponse> {
	let path = ctx.upload_path(&filename).ok_or_else(crate::ApiError::not_found)?;
	let media_type = scholar::validate::extension(&filename)
		.map_or("application/octet-stream", |ext| scholar::validate::media_type_for(&ext));

	let mut buffer = Vec::new();
	let mut file = tokio::fs::File::open(path)
		.await
		.map_err(|e| match e.kind() {
			std::io::ErrorKind::NotFound => crate::ApiError::not_found(),
			_ => e.into(),
		})?;
	file.read_to_end(&mut buffer).await?;

	Ok(([(header::CONTENT_TYPE, media_type)], buffer))
}
