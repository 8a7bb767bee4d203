// Run configuration. Values come from CLI flags, then environment
// variables (both handled by clap), then an optional JSON file, and
// finally interactive prompts for missing credentials.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};

/// Default config file name, looked up in the user's home directory.
pub const CONFIG_FILE_NAME: &str = ".lgp_tender.json";

/// Create a freight tender through the LGP API and report its status.
#[derive(Parser, Debug, Default)]
#[command(version, about)]
pub struct Cli {
    /// API host, e.g. https://lgp.example.com
    #[arg(long, env = "LGP_API_HOST")]
    pub host: Option<String>,

    /// Company account API key
    #[arg(long, env = "LGP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Login of the technical account
    #[arg(long, env = "LGP_LOGIN")]
    pub login: Option<String>,

    #[arg(long, env = "LGP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// JSON config file [default: ~/.lgp_tender.json]
    #[arg(long, env = "LGP_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Shape of the JSON config file. Every key is optional.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct FileConfig {
    pub host: Option<String>,
    pub api_key: Option<String>,
    pub login: Option<String>,
    pub password: Option<String>,
}

impl FileConfig {
    pub fn read(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Parsing config file {}", path.display()))
    }
}

/// Login and password of the technical account.
#[derive(Clone)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"***")
            .finish()
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub api_key: String,
    pub credentials: Credentials,
}

impl Config {
    /// Resolve the configuration, prompting for missing credentials when
    /// stdin is a terminal.
    pub fn load(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::read(path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => FileConfig::read(&path)?,
                _ => FileConfig::default(),
            },
        };
        Self::resolve(cli, file, std::io::stdin().is_terminal())
    }

    /// Merge flags/env over the file. Host and API key must be known;
    /// login and password are prompted for only when `interactive`.
    pub fn resolve(cli: &Cli, file: FileConfig, interactive: bool) -> Result<Self> {
        let Some(host) = cli.host.clone().or(file.host) else {
            bail!("API host is not set (use --host, LGP_API_HOST or the config file)");
        };
        let Some(api_key) = cli.api_key.clone().or(file.api_key) else {
            bail!("API key is not set (use --api-key, LGP_API_KEY or the config file)");
        };

        let login = match cli.login.clone().or(file.login) {
            Some(login) => login,
            None if interactive => Input::<String>::new().with_prompt("Login").interact_text()?,
            None => bail!("login is not set (use --login, LGP_LOGIN or the config file)"),
        };
        let password = match cli.password.clone().or(file.password) {
            Some(password) => password,
            None if interactive => Password::new().with_prompt("Password").interact()?,
            None => bail!("password is not set (use --password, LGP_PASSWORD or the config file)"),
        };

        Ok(Config {
            host,
            api_key,
            credentials: Credentials { login, password },
        })
    }
}

/// `~/.lgp_tender.json`, if a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}
