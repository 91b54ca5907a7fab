pub mod config;
pub mod context;
pub mod ext;
pub mod model;
pub mod storage;
pub mod traits;
pub mod validate;

pub use config::Config;
pub use context::Context;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
