use futures::TryStreamExt;
use sea_orm::EntityTrait;
use scholar::model::application;

/// returns the ids of applications with at least one dangling certificate reference
pub async fn audit(ctx: scholar::Context) -> Result<Vec<i64>, sea_orm::DbErr> {
	let mut dangling = Vec::new();
	let mut checked = 0;

	let mut stream = application::Entity::find().stream(ctx.db()).await?;
	while let Some(record) = stream.try_next().await? {
		checked += 1;
		let mut intact = true;
		for reference in record.certificates() {
			let present = ctx.resolve(reference).is_some_and(|path| path.is_file());
			if !present {
				tracing::error!("application #{} references missing certificate '{reference}'", record.internal);
				intact = false;
			}
		}
		if !intact {
			dangling.push(record.internal);
		}
	}

	tracing::info!("audited {checked} applications, {} with missing certificates", dangling.len());
	Ok(dangling)
}
