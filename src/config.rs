use anyhow::{bail, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

const APP_DIR: &str = "huectl";
const CONFIG_FILE: &str = "config.yml";

/// Bridge address and the username handed out by the bridge on pairing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(rename = "bridgeAddress")]
    pub bridge_address: String,
    #[serde(rename = "clientID")]
    pub client_id: String,
}

/// `<user config dir>/huectl/config.yml`
pub fn default_path() -> Result<PathBuf> {
    let mut path = dirs::config_dir().context("Unable to find the configuration directory")?;
    path.push(APP_DIR);
    path.push(CONFIG_FILE);
    Ok(path)
}

impl Config {
    pub async fn read() -> Result<Self> {
        Self::read_from(default_path()?).await
    }

    pub async fn read_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => bail!(
                "Config file does not exist at {}, run `huectl connect` first",
                path.display()
            ),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Unable to open config file {}", path.display()))
            }
        };
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Unable to decode config file {}", path.display()))?;
        if config.bridge_address.is_empty() {
            bail!("Config file {} has no bridgeAddress", path.display());
        }
        if config.client_id.is_empty() {
            bail!("Config file {} has no clientID", path.display());
        }
        debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    pub async fn write(&self) -> Result<()> {
        self.write_to(default_path()?).await
    }

    pub async fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Could not create config directory {}", dir.display()))?;
        }
        let serialized = serde_yaml::to_string(self).context("Could not marshal config")?;
        fs::write(path, serialized)
            .await
            .with_context(|| format!("Unable to write config file {}", path.display()))?;
        debug!("Wrote config to {}", path.display());
        Ok(())
    }
}
