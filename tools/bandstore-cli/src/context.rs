//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use bandstore_cart::notify::Notifier;
use bandstore_cart::CartStore;
use bandstore_storage::FileBackend;

use crate::config::CliConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, data_dir: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let mut config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            Self::find_config(&cwd).unwrap_or_default()
        };

        if let Some(dir) = data_dir {
            config.storage.data_dir = PathBuf::from(dir);
        }

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let config_names = ["bandstore.toml", ".bandstore.toml", "bandstore.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some(config),
                        Err(e) => {
                            tracing::warn!(path = %config_path.display(), error = %e, "skipping config")
                        }
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Open the cart store over the configured data directory.
    pub fn open_store(&self) -> Result<CartStore<FileBackend>> {
        let dir = self.resolve_path(&self.config.storage.data_dir);
        let backend = FileBackend::open(&dir)
            .with_context(|| format!("Failed to open cart storage at {}", dir.display()))?;
        self.output.debug(&format!("Using cart storage at {}", dir.display()));

        let store = CartStore::from_config(backend, &self.config.cart)
            .context("Invalid cart configuration")?
            .with_notifier(ConsoleNotifier {
                output: self.output.clone(),
            });
        Ok(store)
    }
}

/// Prints store notifications as they happen.
struct ConsoleNotifier {
    output: Output,
}

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, message: &str) {
        self.output.success(message);
    }
}
