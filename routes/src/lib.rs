use std::time::Duration;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::classify::{SharedClassifier, StatusInRangeAsFailures};

pub mod auth;
pub use auth::AdminAccess;

pub mod error;
pub use error::{ApiError, ApiResult};

pub mod applications;
pub mod uploads;


pub fn router(ctx: scholar::Context) -> Router {
	use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

	Router::new()
		.route("/api/applications", get(applications::list).post(applications::post))
		.route("/uploads/{filename}", get(uploads::download))
		.layer(DefaultBodyLimit::max(ctx.cfg().files.request_limit))
		.layer(TimeoutLayer::new(Duration::from_secs(ctx.cfg().security.request_timeout)))
		.layer(
			// 4xx count as failures too
			TraceLayer::new(SharedClassifier::new(StatusInRangeAsFailures::new(400..=599)))
				.make_span_with(|req: &axum::http::Request<_>| {
					tracing::span!(
						tracing::Level::INFO,
						"request",
						method = %req.method(),
						uri = %req.uri(),
					)
				})
		)
		.layer(CorsLayer::permissive())
		.with_state(ctx)
}

pub async fn serve(ctx: scholar::Context, bind: String, shutdown: impl ShutdownToken) -> Result<(), std::io::Error> {
	if ctx.cfg().security.admin_key.is_empty() {
		tracing::warn!("no admin key configured, application listing is disabled");
	}

	let router = router(ctx);

	tracing::info!("serving api routes on {bind}");

	let listener = tokio::net::TcpListener::bind(bind).await?;
	axum::serve(listener, router)
		.with_graceful_shutdown(shutdown.event())
		.await?;

	Ok(())
}


pub trait ShutdownToken: Sync + Send + 'static {
	fn event(self) -> impl std::future::Future<Output = ()> + std::marker::Send;
}
