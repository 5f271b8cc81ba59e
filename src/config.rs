use clap::{Parser, Subcommand};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::ui::Page;

/// Config file picked up from the working directory when none is given.
const CWD_CONFIG_FILE: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Base URL the HTTP fetcher resolves resource paths against
    #[arg(long, env = "API_BASE_URL")]
    pub api_base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the roster server (default)
    Serve,
    /// Render a page against the server at the configured base URL and print it
    Render {
        #[arg(value_enum)]
        page: Page,
    },
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub client: ClientConfig,
    pub directory: DirectoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    /// How long a server-rendered page waits for its component to settle.
    pub render_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DirectoryConfig {
    pub seed_members: Vec<String>,
}

impl AppConfig {
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Self::from_cli(&cli)
    }

    pub fn from_cli(cli: &Cli) -> Result<Self, config::ConfigError> {
        // 1. Defaults
        let mut builder = Config::builder()
            .set_default("server.port", 8081)?
            .set_default("server.host", "127.0.0.1")?
            .set_default("client.base_url", "http://127.0.0.1:8081")?
            .set_default("client.request_timeout_secs", 10)?
            .set_default("client.render_timeout_ms", 500)?
            .set_default(
                "directory.seed_members",
                vec!["Member1", "Member2", "Member3"],
            )?;

        // 2. Config file: explicit path, else ./config.yaml when present
        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path));
        } else if Path::new(CWD_CONFIG_FILE).exists() {
            builder = builder.add_source(File::with_name(CWD_CONFIG_FILE));
        }

        // 3. Environment variables, e.g. ROSTER_SERVER__PORT=8000
        builder = builder.add_source(
            Environment::with_prefix("ROSTER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("directory.seed_members"),
        );

        // 4. CLI flags (and their clap-mapped env vars) win
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(host) = &cli.host {
            builder = builder.set_override("server.host", host.as_str())?;
        }
        if let Some(url) = &cli.api_base_url {
            builder = builder.set_override("client.base_url", url.as_str())?;
        }

        builder.build()?.try_deserialize()
    }
}
