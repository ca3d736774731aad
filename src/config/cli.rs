use crate::config::ClientConfig;
use crate::core::Params;
use crate::utils::error::{FiftyStatesError, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "fiftystates")]
#[command(about = "Query the Fifty State Project legislative API")]
pub struct Cli {
    #[arg(long, help = "TOML file with base_url / user_agent")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Override the API base URL")]
    pub base_url: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// State metadata and its sessions
    State { abbrev: String },
    Bill {
        state: String,
        session: String,
        chamber: String,
        bill_id: String,
    },
    SearchBills {
        query: String,
        /// Extra query parameters as key=value
        #[arg(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },
    Legislator { id: u64 },
    SearchLegislators {
        #[arg(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },
    Vote { id: u64 },
    District {
        state: String,
        session: String,
        chamber: String,
        district: String,
    },
    /// District containing a coordinate
    DistrictGeo {
        state: String,
        session: String,
        chamber: String,
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        long: f64,
    },
}

fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{}`", raw))
}

pub fn to_params(pairs: &[(String, String)]) -> Params {
    pairs.iter().cloned().collect()
}

impl Cli {
    /// 合併設定檔與命令列參數，命令列優先
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path).map_err(|e| match e {
                FiftyStatesError::IoError(io) => FiftyStatesError::ConfigError {
                    message: format!("Cannot read {}: {}", path.display(), io),
                },
                other => other,
            })?,
            None => ClientConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }

        Ok(config)
    }
}
