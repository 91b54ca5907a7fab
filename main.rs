use std::path::PathBuf;
use clap::{Parser, Subcommand};
use sea_orm::{ConnectOptions, Database};
use signal_hook::consts::signal::*;
use signal_hook_tokio::Signals;
use futures::stream::StreamExt;

use scholar::ext::LoggableError;
#[cfg(feature = "cli")]
use scholar_cli as cli;

#[cfg(feature = "client")]
use scholar_client as client;

#[cfg(feature = "migrate")]
use scholar_migrations as migrations;

#[cfg(feature = "serve")]
use scholar_routes as routes;


#[derive(Parser)]
/// scholarship application intake portal
struct Args {
	#[clap(subcommand)]
	/// command to run
	command: Mode,

	/// path to config file, leave empty to not use any
	#[arg(short, long)]
	config: Option<PathBuf>,

	#[arg(long = "db", env = "SCHOLAR_DATABASE_URL")]
	/// database connection uri, overrides config value
	database: Option<String>,

	#[arg(long, env = "SCHOLAR_ADMIN_KEY")]
	/// key required to list applications, overrides config value
	admin_key: Option<String>,

	#[arg(long, default_value_t=false)]
	/// run with debug level tracing
	debug: bool,

	#[arg(long)]
	/// force set number of worker threads for async runtime, defaults to number of cores
	threads: Option<usize>,
}

#[derive(Clone, Subcommand)]
enum Mode {
	/// print current or default configuration
	Config,

	#[cfg(feature = "migrate")]
	/// apply database migrations
	Migrate,

	#[cfg(feature = "cli")]
	/// run maintenance CLI tasks
	Cli {
		#[clap(subcommand)]
		/// task to run
		command: cli::CliCommand,
	},

	#[cfg(feature = "client")]
	/// submit or browse applications on a running portal
	Client {
		#[clap(subcommand)]
		/// action to take
		command: client::ClientCommand,
	},

	#[cfg(feature = "serve")]
	/// start api routes server
	Serve {
		#[arg(short, long, default_value="127.0.0.1:5000", env = "SCHOLAR_BIND")]
		/// addr to bind and serve onto
		bind: String,
	},
}

fn main() {
	let args = Args::parse();

	tracing_subscriber::fmt()
		.compact()
		.with_max_level(if args.debug { tracing::Level::DEBUG } else { tracing::Level::INFO })
		.init();

	let mut config = scholar::Config::load(args.config.as_ref());
	if let Some(database) = args.database.clone() {
		config.datasource.connection_string = database;
	}
	if let Some(admin_key) = args.admin_key.clone() {
		config.security.admin_key = admin_key;
	}

	if matches!(args.command, Mode::Config) {
		println!("{}", toml::to_string_pretty(&config).expect("failed serializing config"));
		return;
	}

	let mut runtime = tokio::runtime::Builder::new_multi_thread();

	if let Some(threads) = args.threads {
		runtime.worker_threads(threads);
	}

	runtime
		.enable_io()
		.enable_time()
		.thread_name("scholar-async-worker")
		.build()
		.expect("failed creating tokio async runtime")
		.block_on(async { init(args, config).await })
}

async fn init(args: Args, config: scholar::Config) {
	#[cfg(feature = "client")]
	if let Mode::Client { command } = args.command {
		if let Err(e) = client::run(&config, command).await {
			tracing::debug!("client task failed: {e}");
			std::process::exit(1);
		}
		return;
	}

	if config.datasource.connection_string.is_empty() {
		tracing::error!("no database connection string configured: set datasource.connection_string, --db or SCHOLAR_DATABASE_URL");
		std::process::exit(1);
	}

	let mut opts = ConnectOptions::new(&config.datasource.connection_string);

	opts
		.sqlx_logging(true)
		.sqlx_logging_level(tracing::log::LevelFilter::Debug)
		.max_connections(config.datasource.max_connections)
		.min_connections(config.datasource.min_connections)
		.acquire_timeout(std::time::Duration::from_secs(config.datasource.acquire_timeout_seconds))
		.connect_timeout(std::time::Duration::from_secs(config.datasource.connect_timeout_seconds))
		.sqlx_slow_statements_logging_settings(
			if config.datasource.slow_query_warn_enable { tracing::log::LevelFilter::Warn } else { tracing::log::LevelFilter::Debug },
			std::time::Duration::from_secs(config.datasource.slow_query_warn_seconds)
		);

	let db = match Database::connect(opts).await {
		Ok(db) => db,
		Err(e) => {
			tracing::error!("error connecting to db: {e}");
			std::process::exit(1);
		},
	};

	#[cfg(feature = "migrate")]
	if matches!(args.command, Mode::Migrate) {
		use migrations::MigratorTrait;

		migrations::Migrator::up(&db, None)
			.await
			.expect("error applying migrations");

		return;
	}

	let (tx, rx) = tokio::sync::watch::channel(false);
	let signals = Signals::new([SIGTERM, SIGINT]).expect("failed registering signal handler");
	let handle = signals.handle();
	let signals_task = tokio::spawn(handle_signals(signals, tx));
	let stop = CancellationToken(rx);

	let ctx = scholar::Context::new(db, config)
		.await.expect("failed creating server context");

	match args.command {
		#[cfg(feature = "cli")]
		Mode::Cli { command } =>
			cli::run(ctx, command)
				.await.expect("failed running cli task"),

		#[cfg(feature = "serve")]
		Mode::Serve { bind } =>
			routes::serve(ctx, bind, stop)
				.await.expect("failed serving api routes"),

		#[cfg(feature = "client")]
		Mode::Client { .. } => unreachable!(),
		Mode::Config => unreachable!(),
		#[cfg(feature = "migrate")]
		Mode::Migrate => unreachable!(),
	}

	handle.close();
	signals_task.await.expect("failed joining signal handler task");
}

#[derive(Clone)]
#[allow(unused)]
struct CancellationToken(tokio::sync::watch::Receiver<bool>);

#[cfg(feature = "serve")]
impl routes::ShutdownToken for CancellationToken {
	async fn event(mut self) {
		self.0.changed().await.warn_failed("cancellation token channel closed, stopping...");
	}
}

async fn handle_signals(
	mut signals: signal_hook_tokio::Signals,
	tx: tokio::sync::watch::Sender<bool>,
) {
	while let Some(signal) = signals.next().await {
		match signal {
			SIGTERM | SIGINT => {
				tracing::info!("received stop signal, closing tasks");
				tx.send(true).info_failed("error sending stop signal to tasks")
			},
			_ => unreachable!(),
		}
	}
}
