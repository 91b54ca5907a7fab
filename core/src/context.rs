use std::{path::{Path, PathBuf}, sync::Arc};

use sea_orm::DatabaseConnection;

use crate::config::Config;

#[derive(Clone)]
pub struct Context(Arc<ContextInner>);
struct ContextInner {
	db: DatabaseConnection,
	config: Config,
	base_url: String,
	uploads: PathBuf,
}

impl Context {
	pub async fn new(db: DatabaseConnection, config: Config) -> Result<Self, std::io::Error> {
		let mut base_url = config.instance.base_url.clone();
		if base_url.ends_with('/') {
			base_url.replace_range(base_url.len()-1.., "");
		}

		let uploads = PathBuf::from(&config.files.path);
		if !tokio::fs::try_exists(&uploads).await? {
			tracing::info!("creating upload directory {}", uploads.display());
			tokio::fs::create_dir_all(&uploads).await?;
		}

		Ok(Context(Arc::new(ContextInner {
			db, config, base_url, uploads,
		})))
	}

	pub fn db(&self) -> &DatabaseConnection {
		&self.0.db
	}

	pub fn cfg(&self) -> &Config {
		&self.0.config
	}

	pub fn base(&self) -> &str {
		&self.0.base_url
	}

	/// directory holding every stored certificate
	pub fn uploads(&self) -> &Path {
		&self.0.uploads
	}

	/// on-disk location of a stored file, given its bare filename
	pub fn upload_path(&self, filename: &str) -> Option<PathBuf> {
		crate::storage::is_plain_filename(filename)
			.then(|| self.uploads().join(filename))
	}

	/// on-disk location of a stored file reference, as kept in application records
	pub fn resolve(&self, reference: &str) -> Option<PathBuf> {
		self.upload_path(crate::storage::filename(reference)?)
	}

	/// full public url of a stored file reference
	pub fn url(&self, reference: &str) -> String {
		crate::storage::url(self.base(), reference)
	}
}
