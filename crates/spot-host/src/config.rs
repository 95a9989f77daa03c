use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::{Deserialize, Serialize};
use spot_core::Config;
use uuid::Uuid;

use crate::allow_list::AllowList;
use crate::error::{HostError, Result};

pub const CONFIG_FILE: &str = "config.toml";

/// Default base directory for spot files.
pub fn default_base_dir() -> PathBuf {
    dirs_home().join(".logout-spots")
}

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Contents of `config.toml`: tracker settings plus the friends list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(default)]
    pub friends: Vec<String>,
    #[serde(flatten)]
    pub tracker: Config,
}

impl HostConfig {
    /// Reject values the core assumes are already sane.
    pub fn validate(&self) -> Result<()> {
        let scale = self.tracker.render.scale;
        if !scale.is_finite() || scale < 0.0 {
            return Err(HostError::InvalidData(format!(
                "render.scale must be a non-negative number, got {scale}"
            )));
        }
        if self.tracker.view_distance_chunks == 0 {
            return Err(HostError::InvalidData(
                "view_distance_chunks must be at least 1".to_string(),
            ));
        }
        self.allow_list().map(|_| ())
    }

    pub fn allow_list(&self) -> Result<AllowList> {
        self.friends
            .iter()
            .map(|s| {
                Uuid::parse_str(s.trim())
                    .map_err(|e| HostError::InvalidData(format!("friend '{s}': {e}")))
            })
            .collect()
    }
}

/// Where the config came from, for logging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed on the command line; must exist.
    Explicit(PathBuf),
    /// `SPOT_CONFIG`; must exist.
    Env(PathBuf),
    /// `<base>/config.toml`; may be absent.
    Default(PathBuf),
}

impl ConfigSource {
    pub fn path(&self) -> &Path {
        match self {
            ConfigSource::Explicit(p) | ConfigSource::Env(p) | ConfigSource::Default(p) => p,
        }
    }

    fn required(&self) -> bool {
        !matches!(self, ConfigSource::Default(_))
    }
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

/// Priority: explicit path > `SPOT_CONFIG` > `<base>/config.toml`.
pub fn resolve_config_source(
    explicit: Option<&Path>,
    env_config: Option<PathBuf>,
    base_dir: &Path,
) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }
    if let Some(path) = env_config.filter(|p| !p.as_os_str().is_empty()) {
        return ConfigSource::Env(path);
    }
    ConfigSource::Default(base_dir.join(CONFIG_FILE))
}

pub fn parse_config(content: &str) -> Result<HostConfig> {
    let config: HostConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// I/O wrappers
// ---------------------------------------------------------------------------

/// Resolve and load the host config. A missing default file yields defaults.
pub fn load_config(explicit: Option<&Path>, base_dir: Option<&Path>) -> Result<HostConfig> {
    let base = base_dir.map(PathBuf::from).unwrap_or_else(default_base_dir);
    let env_config = env::var_os("SPOT_CONFIG").map(PathBuf::from);
    let source = resolve_config_source(explicit, env_config, &base);
    load_from(&source)
}

pub fn load_from(source: &ConfigSource) -> Result<HostConfig> {
    let path = source.path();
    if !source.required() && !path.exists() {
        tracing::info!("no config at {}, using defaults", path.display());
        return Ok(HostConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    tracing::info!(
        friends = config.friends.len(),
        "loaded config from {}",
        path.display()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spot_core::{NotifyMode, ShapeMode};
    use tempfile::TempDir;

    #[test]
    fn test_resolve_priority() {
        let base = Path::new("/base");
        let explicit = Path::new("/explicit.toml");
        let env_path = PathBuf::from("/env.toml");

        assert_eq!(
            resolve_config_source(Some(explicit), Some(env_path.clone()), base),
            ConfigSource::Explicit(explicit.to_path_buf())
        );
        assert_eq!(
            resolve_config_source(None, Some(env_path.clone()), base),
            ConfigSource::Env(env_path)
        );
        assert_eq!(
            resolve_config_source(None, Some(PathBuf::new()), base),
            ConfigSource::Default(base.join("config.toml"))
        );
        assert_eq!(
            resolve_config_source(None, None, base),
            ConfigSource::Default(base.join("config.toml"))
        );
    }

    #[test]
    fn test_parse_full_config() {
        let content = r#"
friends = ["6f9619ff-8b86-d011-b42d-00c04fc964ff"]
ignore_friends = false
view_distance_chunks = 8

[notify]
message = "leave_only"
sound = "join_only"

[render]
scale = 1.5
shape_mode = "lines"
"#;
        let config = parse_config(content).unwrap();
        assert!(!config.tracker.ignore_friends);
        assert_eq!(config.tracker.view_distance_chunks, 8);
        assert_eq!(config.tracker.notify.message, NotifyMode::LeaveOnly);
        assert_eq!(config.tracker.notify.sound, NotifyMode::JoinOnly);
        assert_eq!(config.tracker.render.shape_mode, ShapeMode::Lines);
        assert!((config.tracker.render.scale - 1.5).abs() < 1e-10);
        assert_eq!(config.allow_list().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config, HostConfig::default());
    }

    #[test]
    fn test_rejects_negative_scale() {
        let err = parse_config("[render]\nscale = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("render.scale"), "{err}");
    }

    #[test]
    fn test_rejects_zero_view_distance() {
        assert!(parse_config("view_distance_chunks = 0\n").is_err());
    }

    #[test]
    fn test_rejects_bad_friend() {
        let err = parse_config("friends = [\"not-a-uuid\"]\n").unwrap_err();
        assert!(err.to_string().contains("not-a-uuid"), "{err}");
    }

    #[test]
    fn test_missing_default_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let source = ConfigSource::Default(dir.path().join("config.toml"));
        assert_eq!(load_from(&source).unwrap(), HostConfig::default());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let source = ConfigSource::Explicit(dir.path().join("nope.toml"));
        match load_from(&source) {
            Err(HostError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected I/O error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "ignore_friends = false\n").unwrap();
        let config = load_from(&ConfigSource::Default(path)).unwrap();
        assert!(!config.tracker.ignore_friends);
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let mut config = HostConfig::default();
        config.friends.push(Uuid::new_v4().to_string());
        config.tracker.notify.sound = NotifyMode::Both;
        let text = toml::to_string(&config).unwrap();
        assert_eq!(parse_config(&text).unwrap(), config);
    }
}
