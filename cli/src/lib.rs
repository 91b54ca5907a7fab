mod orphans;
pub use orphans::*;

mod audit;
pub use audit::*;


#[derive(Debug, thiserror::Error)]
pub enum MaintenanceError {
	#[error("database error: {0}")]
	Database(#[from] sea_orm::DbErr),

	#[error("upload directory error: {0}")]
	Io(#[from] std::io::Error),

	#[error("minimum age of {0} minutes is out of range")]
	MinAge(i64),
}

#[derive(Debug, Clone, clap::Subcommand)]
pub enum CliCommand {
	/// find stored certificates no application references, left behind by failed or interrupted submissions
	Orphans {
		/// unless this is set, orphans will only be listed
		#[arg(long, default_value_t = false)]
		for_real: bool,

		/// skip files younger than this many minutes, their submission may still be in flight
		#[arg(long, default_value_t = 60)]
		min_age: i64,
	},

	/// check that every application references certificates present on disk
	Audit,
}

pub async fn run(ctx: scholar::Context, command: CliCommand) -> Result<(), Box<dyn std::error::Error>> {
	tracing::info!("running cli task: {command:?}");
	match command {
		CliCommand::Orphans { for_real, min_age } =>
			Ok(orphans(ctx, for_real, min_age).await.map(|_| ())?),
		CliCommand::Audit =>
			Ok(audit(ctx).await.map(|_| ())?),
	}
}
