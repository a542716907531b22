//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, SECRET_CONFIG_KEYS, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    // Validate value based on key type
    validate_config_value(key, value)?;

    // Load existing config
    let mut config = store.load().await?;

    // Update the appropriate field
    match key {
        "openai_api_key" => config.openai_api_key = Some(value.to_string()),
        "supabase_url" => config.supabase_url = Some(value.to_string()),
        "supabase_key" => config.supabase_key = Some(value.to_string()),
        "source_base_url" => config.source_base_url = Some(value.to_string()),
        "source_token" => config.source_token = Some(value.to_string()),
        "callback_url" => config.callback_url = Some(value.to_string()),
        "storage_bucket" => config.storage_bucket = Some(value.to_string()),
        "table" => config.table = Some(value.to_string()),
        "transcription_model" => config.transcription_model = Some(value.to_string()),
        "summary_model" => config.summary_model = Some(value.to_string()),
        "request_timeout_secs" => {
            config.request_timeout_secs =
                Some(parse_number(key, value)?);
        }
        "max_records" => {
            config.max_records = Some(parse_number(key, value)?);
        }
        _ => unreachable!(), // Already validated
    }

    // Save config
    store.save(&config).await?;
    if SECRET_CONFIG_KEYS.contains(&key) {
        presenter.success(&format!("{} = {}", key, mask_secret(value)));
    } else {
        presenter.success(&format!("{} = {}", key, value));
    }

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    let config = store.load().await?;
    let value = display_value(&config, key);

    match value {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = display_value(&config, key).unwrap_or_else(|| "(not set)".to_string());
        presenter.key_value(key, &value);
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// The display form of a config value, with secrets masked
fn display_value(config: &AppConfig, key: &str) -> Option<String> {
    let value = match key {
        "openai_api_key" => config.openai_api_key.clone(),
        "supabase_url" => config.supabase_url.clone(),
        "supabase_key" => config.supabase_key.clone(),
        "source_base_url" => config.source_base_url.clone(),
        "source_token" => config.source_token.clone(),
        "callback_url" => config.callback_url.clone(),
        "storage_bucket" => config.storage_bucket.clone(),
        "table" => config.table.clone(),
        "transcription_model" => config.transcription_model.clone(),
        "summary_model" => config.summary_model.clone(),
        "request_timeout_secs" => config.request_timeout_secs.map(|n| n.to_string()),
        "max_records" => config.max_records.map(|n| n.to_string()),
        _ => None,
    };

    if SECRET_CONFIG_KEYS.contains(&key) {
        value.map(|s| mask_secret(&s))
    } else {
        value
    }
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "request_timeout_secs" | "max_records" => {
            parse_number(key, value)?;
        }
        _ => {} // String keys accept any value
    }
    Ok(())
}

/// Parse a non-negative number value
fn parse_number(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::ValidationError {
        key: key.to_string(),
        message: "Value must be a non-negative number".to_string(),
    })
}

/// Mask a secret for display (show first 4 and last 4 chars)
fn mask_secret(secret: &str) -> String {
    if secret.len() <= 8 {
        "*".repeat(secret.len())
    } else {
        format!("{}...{}", &secret[..4], &secret[secret.len() - 4..])
    }
}
