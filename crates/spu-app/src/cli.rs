//! CLI argument definitions for the Spu application.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use spu_core::config::EnhancerConfig;

/// Spu - the RevX business assistant, over a terminal or over HTTP.
#[derive(Parser, Debug)]
#[command(name = "spu", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Knowledge base TOML file, replacing the built-in corpus.
    #[arg(short = 'k', long = "knowledge", global = true)]
    pub knowledge: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive conversation in the terminal (the default).
    Chat {
        /// Disable the simulated voice channel.
        #[arg(long = "no-voice")]
        no_voice: bool,
    },
    /// Serve the chat API over HTTP.
    Serve {
        /// API server port.
        #[arg(short = 'p', long = "port")]
        port: Option<u16>,

        /// Address to bind.
        #[arg(long = "host")]
        host: Option<String>,
    },
}

impl CliArgs {
    /// The subcommand to run; a bare `spu` starts a chat.
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Chat { no_voice: false })
    }

    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > SPU_CONFIG env var > ~/.spu/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("SPU_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the API server port.
    ///
    /// Priority: --port flag > SPU_PORT env var > config file value.
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        let env_port = std::env::var("SPU_PORT").ok();
        pick_port(self.port_flag(), env_port.as_deref(), config_port)
    }

    /// Resolve the bind address. Priority: --host flag > config file value.
    pub fn resolve_host(&self, config_host: &str) -> String {
        match &self.command {
            Some(Command::Serve {
                host: Some(host), ..
            }) => host.clone(),
            _ => config_host.to_string(),
        }
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    fn port_flag(&self) -> Option<u16> {
        match &self.command {
            Some(Command::Serve { port, .. }) => *port,
            _ => None,
        }
    }
}

fn pick_port(flag: Option<u16>, env: Option<&str>, config_port: u16) -> u16 {
    if let Some(p) = flag {
        return p;
    }
    if let Some(p) = env.and_then(|v| v.parse::<u16>().ok()) {
        return p;
    }
    config_port
}

/// Apply `OPENROUTER_API_KEY` and `OPENROUTER_URL` to the enhancer section.
///
/// A key in the environment turns enhancement on.
pub fn apply_enhancer_env(config: &mut EnhancerConfig) {
    apply_enhancer_overrides(
        config,
        std::env::var("OPENROUTER_API_KEY").ok(),
        std::env::var("OPENROUTER_URL").ok(),
    );
}

fn apply_enhancer_overrides(
    config: &mut EnhancerConfig,
    api_key: Option<String>,
    url: Option<String>,
) {
    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        config.api_key = Some(key);
        config.enabled = true;
    }
    if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
        config.endpoint = url;
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".spu").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".spu").join("config.toml");
    }
    PathBuf::from("config.toml")
}
