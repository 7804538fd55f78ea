use crate::cli::QueryArgs;
use crate::client::{Credentials, DEFAULT_API_BASE};
use crate::error::D1Error;
use crate::format::OutputFormat;
use directories::ProjectDirs;
use secrecy::SecretString;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub connection: ConnectionConfig,
    pub timeout_secs: u64,
    pub format: OutputFormat,
    pub verbose: bool,
    pub show_secrets: bool,
    pub output_file: Option<PathBuf>,
}

/// Resolved D1 target.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub account_id: String,
    pub api_token: SecretString,
    pub database_id: String,
    pub api_base: String,
}

impl ConnectionConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.account_id.clone(),
            self.api_token.clone(),
            self.database_id.clone(),
        )
    }
}

// --- TOML config file structs ---

#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    #[serde(default)]
    defaults: TomlDefaults,
    #[serde(default)]
    profiles: HashMap<String, TomlProfile>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlDefaults {
    timeout: Option<u64>,
    verbose: Option<bool>,
    format: Option<OutputFormat>,
}

#[derive(Debug, Deserialize, Default, Clone)]
struct TomlProfile {
    account_id: Option<String>,
    api_token: Option<String>,
    api_token_env: Option<String>,
    database_id: Option<String>,
    api_base: Option<String>,
}

struct ResolvedConfigPath {
    path: PathBuf,
    /// true if given via --config or D1QUERY_CONFIG
    explicit: bool,
}

/// Resolve the config file path: --config flag > env var > platform default.
fn resolve_config_path(cli_config: Option<&PathBuf>) -> Option<ResolvedConfigPath> {
    if let Some(path) = cli_config {
        return Some(ResolvedConfigPath { path: path.clone(), explicit: true });
    }
    if let Some(path) = env_non_empty("D1QUERY_CONFIG") {
        return Some(ResolvedConfigPath { path: PathBuf::from(path), explicit: true });
    }
    ProjectDirs::from("", "", "d1query").map(|dirs| ResolvedConfigPath {
        path: dirs.config_dir().join("config.toml"),
        explicit: false,
    })
}

fn load_toml_config(resolved: Option<&ResolvedConfigPath>) -> Result<TomlConfig, D1Error> {
    let resolved = match resolved {
        Some(r) => r,
        None => return Ok(TomlConfig::default()),
    };

    if !resolved.path.exists() {
        if resolved.explicit {
            return Err(D1Error::Config {
                message: format!("config file not found: {}", resolved.path.display()),
            });
        }
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&resolved.path).map_err(|e| D1Error::Config {
        message: format!("cannot read config file {}: {}", resolved.path.display(), e),
    })?;

    toml::from_str(&content).map_err(|e| D1Error::Config {
        message: format!("invalid config file {}: {}", resolved.path.display(), e),
    })
}

/// Treat empty strings as unset.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Read an env var, treating empty values as unset.
pub fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Resolve the API token: flag > profile env indirection > profile value >
/// standard Cloudflare env var.
fn resolve_token(args: &QueryArgs, profile: &TomlProfile) -> Option<SecretString> {
    if let Some(val) = non_empty(args.api_token.as_deref()) {
        return Some(SecretString::from(val.to_string()));
    }
    if let Some(key) = non_empty(profile.api_token_env.as_deref())
        && let Some(val) = env_non_empty(key)
    {
        return Some(SecretString::from(val));
    }
    if let Some(val) = non_empty(profile.api_token.as_deref()) {
        return Some(SecretString::from(val.to_string()));
    }
    env_non_empty("CLOUDFLARE_API_TOKEN").map(SecretString::from)
}

/// Build AppConfig from subcommand args.
pub fn load_from_query_args(
    args: &QueryArgs,
    verbose: bool,
    show_secrets: bool,
    config_path: Option<&PathBuf>,
) -> Result<AppConfig, D1Error> {
    let resolved_path = resolve_config_path(config_path);
    let toml_config = load_toml_config(resolved_path.as_ref())?;

    let profile = args
        .profile
        .as_ref()
        .map(|name| {
            toml_config.profiles.get(name).cloned().ok_or_else(|| D1Error::Config {
                message: format!("profile '{}' not found in config file", name),
            })
        })
        .transpose()?
        .unwrap_or_default();

    // account: CLI/ENV > profile > CLOUDFLARE_ACCOUNT_ID
    let account_id = non_empty(args.account_id.as_deref())
        .or(non_empty(profile.account_id.as_deref()))
        .map(str::to_string)
        .or_else(|| env_non_empty("CLOUDFLARE_ACCOUNT_ID"))
        .ok_or_else(|| D1Error::Config {
            message: "no account ID specified — use --account-id or CLOUDFLARE_ACCOUNT_ID"
                .to_string(),
        })?;

    let api_token = resolve_token(args, &profile).ok_or_else(|| D1Error::Config {
        message: "no API token specified — use --api-token or CLOUDFLARE_API_TOKEN".to_string(),
    })?;

    let database_id = non_empty(args.database_id.as_deref())
        .or(non_empty(profile.database_id.as_deref()))
        .ok_or_else(|| D1Error::Config {
            message: "no database ID specified — use --database-id or configure a profile"
                .to_string(),
        })?
        .to_string();

    let api_base = non_empty(args.api_base.as_deref())
        .or(non_empty(profile.api_base.as_deref()))
        .unwrap_or(DEFAULT_API_BASE)
        .trim_end_matches('/')
        .to_string();

    // timeout: CLI/ENV > TOML > 60
    let timeout_secs = args
        .timeout
        .unwrap_or_else(|| toml_config.defaults.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS));

    let format = args
        .format
        .or(toml_config.defaults.format)
        .unwrap_or_default();

    let verbose = verbose || toml_config.defaults.verbose.unwrap_or(false);

    Ok(AppConfig {
        connection: ConnectionConfig {
            account_id,
            api_token,
            database_id,
            api_base,
        },
        timeout_secs,
        format,
        verbose,
        show_secrets,
        output_file: args.output.clone(),
    })
}
