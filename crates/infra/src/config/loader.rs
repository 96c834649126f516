//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. `LINKPAGE_DB_PATH` set: build from environment variables
//! 2. Otherwise look for a config file (JSON or TOML)
//! 3. Nothing found: built-in defaults
//!
//! ## Environment Variables
//! - `LINKPAGE_DB_PATH`: Database file path (selects the env strategy)
//! - `LINKPAGE_DB_POOL_SIZE`: Connection pool size
//! - `LINKPAGE_STORAGE_BACKEND`: `local` or `remote`
//! - `LINKPAGE_STORAGE_LOCAL_ROOT`: Upload directory for the local backend
//! - `LINKPAGE_STORAGE_PUBLIC_BASE_URL`: URL prefix serving local uploads
//! - `LINKPAGE_STORAGE_REMOTE_URL`: Object storage base URL
//! - `LINKPAGE_STORAGE_BUCKET`: Bucket name
//! - `LINKPAGE_STORAGE_API_KEY`: Object storage service key
//! - `LINKPAGE_STORAGE_MAX_UPLOAD_BYTES`: Upload size cap
//! - `LINKPAGE_BIND_ADDRESS`: HTTP listen address
//! - `LINKPAGE_LOG_JSON`: JSON log output (true/false)
//!
//! ## File Locations
//! `config.{json,toml}` and `linkpage.{json,toml}` in the working directory
//! and its two parents, then next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use linkpage_domain::{Config, LinkpageError, Result, StorageBackend};

const FILE_NAMES: [&str; 4] = ["config.json", "config.toml", "linkpage.json", "linkpage.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `LinkpageError::Config` when the selected source is malformed.
pub fn load() -> Result<Config> {
    if std::env::var_os("LINKPAGE_DB_PATH").is_some() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    match find_config_file() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Load configuration from environment variables
///
/// `LINKPAGE_DB_PATH` is required; every other variable falls back to its
/// default.
///
/// # Errors
/// Returns `LinkpageError::Config` if `LINKPAGE_DB_PATH` is missing or a
/// value does not parse.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    config.database.path = env_var("LINKPAGE_DB_PATH")?;
    if let Some(size) = env_parse::<u32>("LINKPAGE_DB_POOL_SIZE")? {
        config.database.pool_size = size;
    }

    let storage = &mut config.storage;
    if let Some(backend) = optional_env("LINKPAGE_STORAGE_BACKEND") {
        storage.backend = parse_backend(&backend)?;
    }
    if let Some(root) = optional_env("LINKPAGE_STORAGE_LOCAL_ROOT") {
        storage.local_root = root;
    }
    if let Some(url) = optional_env("LINKPAGE_STORAGE_PUBLIC_BASE_URL") {
        storage.public_base_url = url;
    }
    storage.remote_url = optional_env("LINKPAGE_STORAGE_REMOTE_URL");
    if let Some(bucket) = optional_env("LINKPAGE_STORAGE_BUCKET") {
        storage.bucket = bucket;
    }
    storage.api_key = optional_env("LINKPAGE_STORAGE_API_KEY");
    if let Some(limit) = env_parse::<usize>("LINKPAGE_STORAGE_MAX_UPLOAD_BYTES")? {
        storage.max_upload_bytes = limit;
    }

    if let Some(address) = optional_env("LINKPAGE_BIND_ADDRESS") {
        config.server.bind_address = address;
    }
    config.server.log_json = env_bool("LINKPAGE_LOG_JSON", config.server.log_json);

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, searches the standard locations. Format is chosen by
/// extension.
///
/// # Errors
/// Returns `LinkpageError::Config` if no file is found, it cannot be read,
/// or it does not parse.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) if p.exists() => p,
        Some(p) => {
            return Err(LinkpageError::Config(format!("Config file not found: {}", p.display())))
        }
        None => find_config_file().ok_or_else(|| {
            LinkpageError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| LinkpageError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| LinkpageError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| LinkpageError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(LinkpageError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file among the standard locations
pub fn find_config_file() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
        dirs.push(cwd.join("../.."));
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

fn parse_backend(value: &str) -> Result<StorageBackend> {
    match value.trim().to_ascii_lowercase().as_str() {
        "local" => Ok(StorageBackend::Local),
        "remote" => Ok(StorageBackend::Remote),
        other => Err(LinkpageError::Config(format!("Invalid storage backend: {other}"))),
    }
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| LinkpageError::Config(format!("Missing required environment variable: {key}")))
}

/// Set and non-empty
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional_env(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| LinkpageError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
