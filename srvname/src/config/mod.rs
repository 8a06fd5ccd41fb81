//! Configuration system for srvname.
//!
//! Configuration is merged from several sources with the following
//! precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`SRVNAME_*`)
//! 3. The configuration file (`<data dir>/config.yaml`)
//! 4. Built-in defaults
//!
//! ```yaml
//! database:
//!   path: /var/lib/srvname/srvname.db
//!   busy_timeout_ms: 5000
//! operation_timeout_ms: 10000
//! delete_policy: forbid-committed
//! log_mode: normal
//! naming:
//!   defaults:
//!     unit_code: XXX
//!     region: XXXX
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE_NAME};
pub use merger::ConfigMerger;
pub use schema::{Config, DatabaseSettings, DeletePolicy, NamingConfig};
pub use validator::ConfigValidator;
