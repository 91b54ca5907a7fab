#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct Config {
	#[serde(default)]
	pub instance: InstanceConfig,

	#[serde(default)]
	pub datasource: DatasourceConfig,

	#[serde(default)]
	pub security: SecurityConfig,

	#[serde(default)]
	pub files: FileStorageConfig,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct InstanceConfig {
	#[serde_inline_default("scholarship portal".into())]
	/// portal name, shown in client views
	pub name: String,

	#[serde_inline_default("http://127.0.0.1:5000".into())]
	/// public base url of this portal, stored certificate links are resolved against it
	pub base_url: String,

	#[serde_inline_default(500)]
	/// processing fee, in NPR, applicants are asked to pay after submitting
	pub service_fee: u32,

	#[serde_inline_default("Scholarship Portal".into())]
	/// account name shown in payment instructions
	pub payment_account: String,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct DatasourceConfig {
	#[serde(default)]
	/// database connection uri, there is no default: serving without one is refused
	pub connection_string: String,

	#[serde_inline_default(32)]
	pub max_connections: u32,

	#[serde_inline_default(1)]
	pub min_connections: u32,

	#[serde_inline_default(90u64)]
	pub connect_timeout_seconds: u64,

	#[serde_inline_default(30u64)]
	pub acquire_timeout_seconds: u64,

	#[serde_inline_default(10u64)]
	/// threshold for queries to be considered slow
	pub slow_query_warn_seconds: u64,

	#[serde_inline_default(true)]
	/// enable logging warn for slow queries
	pub slow_query_warn_enable: bool,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct SecurityConfig {
	#[serde(default)]
	/// key admins must present to list applications, listing is disabled while this is empty
	pub admin_key: String,

	#[serde_inline_default(60)]
	/// max time, in seconds, before requests fail with timeout
	pub request_timeout: u64,
}

#[serde_inline_default::serde_inline_default]
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize, serde_default::DefaultFromSerde)]
pub struct FileStorageConfig {
	#[serde_inline_default("uploads/".to_string())]
	/// path where certificate files should be stored
	pub path: String,

	#[serde_inline_default(16 * 1024 * 1024)]
	/// max size of a whole submission request body, in bytes
	pub request_limit: usize,
}

impl Config {
	pub fn load(path: Option<&std::path::PathBuf>) -> Self {
		let Some(cfg_path) = path else { return Config::default() };
		match std::fs::read_to_string(cfg_path) {
			Ok(x) => match toml::from_str(&x) {
				Ok(cfg) => return cfg,
				Err(e) => tracing::error!("failed parsing config file: {e}"),
			},
			Err(e) => tracing::error!("failed reading config file: {e}"),
		}
		Config::default()
	}
}

#[cfg(test)]
mod test {
	#[test]
	fn partial_config_falls_back_to_defaults() {
		let cfg: super::Config = toml::from_str(r#"
			[datasource]
			connection_string = "sqlite://./scholar.db?mode=rwc"

			[security]
			admin_key = "hunter2"
		"#).unwrap();

		assert_eq!(cfg.datasource.connection_string, "sqlite://./scholar.db?mode=rwc");
		assert_eq!(cfg.datasource.max_connections, 32);
		assert_eq!(cfg.security.admin_key, "hunter2");
		assert_eq!(cfg.files.path, "uploads/");
		assert_eq!(cfg.instance.service_fee, 500);
	}

	#[test]
	fn default_config_has_no_database() {
		assert!(super::Config::default().datasource.connection_string.is_empty());
		assert!(super::Config::default().security.admin_key.is_empty());
	}
}
