use std::path::{Path, PathBuf};

use {
    secrecy::{ExposeSecret, Secret},
    tracing::{debug, warn},
};

use crate::{env_subst::substitute_with, error::ConfigError, schema::HeraldConfig};

/// Standard config file names, checked in order.
pub const CONFIG_FILENAMES: &[&str] = &["herald.toml", "herald.yaml", "herald.yml", "herald.json"];

/// Environment variables read by [`apply_env_overrides`].
pub const ENV_SENDER_IDENTITY: &str = "HERALD_SENDER_IDENTITY";
pub const ENV_RECIPIENT_IDENTITY: &str = "HERALD_RECIPIENT_IDENTITY";
pub const ENV_ACCOUNT_ID: &str = "HERALD_ACCOUNT_ID";
pub const ENV_AUTH_TOKEN: &str = "HERALD_AUTH_TOKEN";
pub const ENV_API_BASE_URL: &str = "HERALD_API_BASE_URL";

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> Result<HeraldConfig, ConfigError> {
    load_config_with(path, env_lookup)
}

/// Same as [`load_config`], resolving `${VAR}` placeholders through `lookup`.
///
/// A value that still contains a placeholder whose variable had no value is
/// dropped, so it reads as missing instead of as a literal credential.
pub fn load_config_with(
    path: &Path,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<HeraldConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let substituted = substitute_with(&raw, lookup);
    for name in &substituted.unresolved {
        warn!(path = %path.display(), var = %name, "unresolved env placeholder in config");
    }
    let mut config = parse_config(&substituted.text, path)?;
    drop_unresolved(&mut config, &substituted.unresolved);
    Ok(config)
}

/// Load configuration from file (if any) and then the environment.
///
/// With `explicit` set, that file must exist. Otherwise standard locations
/// are searched and a missing file just means "environment only".
pub fn discover_and_load(explicit: Option<&Path>) -> Result<HeraldConfig, ConfigError> {
    discover_and_load_with(explicit, env_lookup)
}

/// Same as [`discover_and_load`] with a caller-supplied environment.
pub fn discover_and_load_with(
    explicit: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<HeraldConfig, ConfigError> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => find_config_file(),
    };

    let mut config = match path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config_with(&path, &lookup)?
        },
        None => {
            debug!("no config file found, using environment only");
            HeraldConfig::default()
        },
    };

    apply_env_overrides(&mut config, lookup);
    Ok(config)
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn drop_unresolved(config: &mut HeraldConfig, unresolved: &[String]) {
    if unresolved.is_empty() {
        return;
    }
    let placeholders: Vec<String> = unresolved.iter().map(|n| format!("${{{n}}}")).collect();
    let holds_placeholder = |value: &str| placeholders.iter().any(|p| value.contains(p.as_str()));

    let t = &mut config.twilio;
    for (key, field) in [
        ("sender_identity", &mut t.sender_identity),
        ("recipient_identity", &mut t.recipient_identity),
        ("account_id", &mut t.account_id),
        ("api_base_url", &mut t.api_base_url),
    ] {
        if field.as_deref().is_some_and(holds_placeholder) {
            debug!(key, "dropping value with unresolved placeholder");
            *field = None;
        }
    }
    if t
        .auth_token
        .as_ref()
        .is_some_and(|s| holds_placeholder(s.expose_secret().as_str()))
    {
        debug!(key = "auth_token", "dropping value with unresolved placeholder");
        t.auth_token = None;
    }
}

/// Overlay `HERALD_*` variables onto `config`. Blank values are ignored.
pub fn apply_env_overrides(config: &mut HeraldConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
    let t = &mut config.twilio;

    if let Some(v) = get(ENV_SENDER_IDENTITY) {
        t.sender_identity = Some(v);
    }
    if let Some(v) = get(ENV_RECIPIENT_IDENTITY) {
        t.recipient_identity = Some(v);
    }
    if let Some(v) = get(ENV_ACCOUNT_ID) {
        t.account_id = Some(v);
    }
    if let Some(v) = get(ENV_AUTH_TOKEN) {
        t.auth_token = Some(Secret::new(v));
    }
    if let Some(v) = get(ENV_API_BASE_URL) {
        t.api_base_url = Some(v);
    }
}

/// Find the first config file in standard locations.
///
/// Search order:
/// 1. `./herald.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/herald/herald.{toml,yaml,yml,json}` (user-global)
pub fn find_config_file() -> Option<PathBuf> {
    find_in(Path::new(".")).or_else(|| config_dir().and_then(|dir| find_in(&dir)))
}

fn find_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Returns `~/.config/herald/` on all platforms.
pub fn config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().join(".config").join("herald"))
}

fn parse_config(raw: &str, path: &Path) -> Result<HeraldConfig, ConfigError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");
    let parse_err = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };

    match ext {
        "toml" => toml::from_str(raw).map_err(|e| parse_err(e.to_string())),
        "yaml" | "yml" => serde_yaml::from_str(raw).map_err(|e| parse_err(e.to_string())),
        "json" => serde_json::from_str(raw).map_err(|e| parse_err(e.to_string())),
        _ => Err(ConfigError::UnsupportedFormat(ext.to_string())),
    }
}
