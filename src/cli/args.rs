//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

/// Callscribe - call recording transcription and summarization pipeline
#[derive(Parser, Debug)]
#[command(name = "callscribe")]
#[command(version)]
#[command(about = "Ingest, transcribe, and summarize call recordings")]
#[command(long_about = None)]
pub struct Cli {
    /// Process at most N new recordings this run
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// List new recordings without processing them
    #[arg(long)]
    pub dry_run: bool,

    /// Recordings API base URL
    #[arg(long, value_name = "URL")]
    pub source_url: Option<String>,

    /// Callback endpoint URL
    #[arg(long, value_name = "URL")]
    pub callback_url: Option<String>,

    /// Stop when the record store already holds N rows
    #[arg(long, value_name = "N")]
    pub max_records: Option<u64>,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed run options
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub limit: Option<usize>,
    pub dry_run: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "openai_api_key",
    "supabase_url",
    "supabase_key",
    "source_base_url",
    "source_token",
    "callback_url",
    "storage_bucket",
    "table",
    "transcription_model",
    "summary_model",
    "request_timeout_secs",
    "max_records",
];

/// Config keys holding secrets, masked in `config get`/`config list`
pub const SECRET_CONFIG_KEYS: &[&str] = &["openai_api_key", "supabase_key", "source_token"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["callscribe"]);
        assert!(cli.limit.is_none());
        assert!(!cli.dry_run);
        assert!(cli.source_url.is_none());
        assert!(cli.callback_url.is_none());
        assert!(cli.max_records.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_limit() {
        let cli = Cli::parse_from(["callscribe", "--limit", "5"]);
        assert_eq!(cli.limit, Some(5));
    }

    #[test]
    fn cli_parses_dry_run() {
        let cli = Cli::parse_from(["callscribe", "--dry-run"]);
        assert!(cli.dry_run);
    }

    #[test]
    fn cli_parses_urls() {
        let cli = Cli::parse_from([
            "callscribe",
            "--source-url",
            "https://api.example.com/recordings",
            "--callback-url",
            "https://api.example.com/results",
        ]);
        assert_eq!(
            cli.source_url,
            Some("https://api.example.com/recordings".to_string())
        );
        assert_eq!(
            cli.callback_url,
            Some("https://api.example.com/results".to_string())
        );
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["callscribe", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["callscribe", "config", "set", "table", "call_recordings"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "table");
            assert_eq!(value, "call_recordings");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("openai_api_key"));
        assert!(is_valid_config_key("supabase_url"));
        assert!(is_valid_config_key("max_records"));
        assert!(!is_valid_config_key("invalid_key"));
    }

    #[test]
    fn secret_keys_are_valid_keys() {
        for key in SECRET_CONFIG_KEYS {
            assert!(is_valid_config_key(key));
        }
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
