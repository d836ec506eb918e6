//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use feed_auth::{AuthGate, FileStore};
use feed_core::ClientConfig;
use feed_data::{HttpGateway, SharedGateway};

use crate::output::Output;

/// Config file names searched from the working directory upwards.
const CONFIG_NAMES: [&str; 2] = ["feed.toml", ".feed.toml"];

/// Execution context for CLI commands.
pub struct Context {
    pub config: ClientConfig,
    /// File the config came from, if any.
    pub config_path: Option<PathBuf>,
    pub output: Output,
    pub gate: AuthGate<FileStore>,
}

impl Context {
    /// Resolve config (file, then environment, then flags) and open the session store.
    pub fn load(config_path: Option<&str>, api_base_url: Option<&str>, output: Output) -> Result<Self> {
        let (config, config_path) = match config_path {
            Some(path) => (
                ClientConfig::load(path).with_context(|| format!("Failed to load config: {}", path))?,
                Some(PathBuf::from(path)),
            ),
            None => {
                let cwd = std::env::current_dir().context("Failed to get current directory")?;
                match find_config(&cwd) {
                    Some(path) => (
                        ClientConfig::load(&path)
                            .with_context(|| format!("Failed to load config: {}", path.display()))?,
                        Some(path),
                    ),
                    None => (ClientConfig::default(), None),
                }
            }
        };

        let mut config = config.with_env();
        if let Some(url) = api_base_url {
            config = config.with_api_base_url(url);
        }
        config.validate().context("Invalid configuration")?;

        let store = match &config.session_path {
            Some(path) => FileStore::open(path),
            None => FileStore::open_default().context("Failed to locate session store")?,
        };
        output.debug(&format!("session store: {}", store.path().display()));

        Ok(Self {
            config,
            config_path,
            output,
            gate: AuthGate::new(store),
        })
    }

    /// HTTP gateway for the configured base URL.
    pub fn gateway(&self) -> Result<SharedGateway> {
        let gateway = HttpGateway::new(&self.config.api_base_url)
            .context("Failed to create gateway client")?;
        Ok(Arc::new(gateway))
    }

    /// Fail unless a session is active.
    pub fn require_login(&self) -> Result<()> {
        if !self.gate.is_authenticated().context("Failed to read session")? {
            bail!("Not logged in. Run `feed login` first.");
        }
        Ok(())
    }
}

/// Find a config file in `start` or one of its parents.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("feed.toml"), "page_size = 5\n").unwrap();

        assert_eq!(find_config(&nested), Some(dir.path().join("feed.toml")));
    }
}
