//! CLI command implementations.

pub(crate) mod content;
pub(crate) mod page;
pub(crate) mod save;
pub(crate) mod theme;
pub(crate) mod tree;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use sx_cache::{ContentCache, MemoryContentCache, NullContentCache};
use sx_config::{CliSettings, Config};
use sx_site::Site;
use sx_transport::HttpTransport;

use crate::error::CliError;

pub(crate) use content::{ContentArgs, ContentIdArgs};
pub(crate) use page::PageArgs;
pub(crate) use save::{SaveContentArgs, SaveTreeArgs};
pub(crate) use theme::ThemeArgs;
pub(crate) use tree::TreeArgs;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover sitexml.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Site base URL (overrides config).
    #[arg(long, global = true, env = "SX_BASE_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds (overrides config).
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Disable the in-memory content cache.
    #[arg(long, global = true)]
    no_cache: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Load configuration and build a site handle from it.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub(crate) fn open_site(&self) -> Result<Site, CliError> {
        let cli_settings = CliSettings {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout,
            cache_enabled: self.no_cache.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Using configuration file");
        }

        let transport = Arc::new(HttpTransport::with_timeout(
            &config.server.base_url,
            config.server.timeout(),
        ));
        let cache: Box<dyn ContentCache> = if config.cache.enabled {
            Box::new(MemoryContentCache::new())
        } else {
            Box::new(NullContentCache)
        };

        Ok(Site::new(transport, cache))
    }
}
