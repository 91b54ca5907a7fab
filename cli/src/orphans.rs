use std::collections::HashSet;

use sea_orm::{EntityTrait, QuerySelect, SelectColumns};
use scholar::model::application;

/// every stored filename referenced by at least one application
pub async fn referenced(ctx: &scholar::Context) -> Result<HashSet<String>, sea_orm::DbErr> {
	let references = application::Entity::find()
		.select_only()
		.select_column(application::Column::SeeCertificate)
		.select_column(application::Column::PlusTwoCertificate)
		.into_tuple::<(String, String)>()
		.all(ctx.db())
		.await?;

	Ok(
		references
			.iter()
			.flat_map(|(see, plus_two)| [see, plus_two])
			.filter_map(|x| scholar::storage::filename(x))
			.map(str::to_string)
			.collect()
	)
}

/// returns the orphaned filenames found, deleting them when running for real
pub async fn orphans(ctx: scholar::Context, for_real: bool, min_age: i64) -> Result<Vec<String>, crate::MaintenanceError> {
	if !for_real {
		tracing::warn!("THIS IS A DRY RUN! pass --for-real to actually delete orphaned certificates");
	}

	let threshold = chrono::Duration::try_minutes(min_age)
		.and_then(|age| chrono::Utc::now().checked_sub_signed(age))
		.ok_or(crate::MaintenanceError::MinAge(min_age))?;
	let referenced = referenced(&ctx).await?;

	let mut found = Vec::new();
	let mut entries = tokio::fs::read_dir(ctx.uploads()).await?;
	while let Some(entry) = entries.next_entry().await? {
		let meta = entry.metadata().await?;
		if !meta.is_file() {
			continue;
		}

		let name = entry.file_name().to_string_lossy().to_string();
		if referenced.contains(&name) {
			continue;
		}

		let modified: chrono::DateTime<chrono::Utc> = meta.modified()?.into();
		if modified > threshold {
			tracing::debug!("skipping recent unreferenced file {name}");
			continue;
		}

		if for_real {
			tokio::fs::remove_file(entry.path()).await?;
			tracing::info!("deleted orphaned certificate {name}");
		} else {
			tracing::info!("would delete orphaned certificate {name}");
		}
		found.push(name);
	}

	tracing::info!("found {} orphaned certificates in {}", found.len(), ctx.uploads().display());
	Ok(found)
}
