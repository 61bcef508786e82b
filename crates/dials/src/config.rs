use crate::events::AppEvent;
use crate::macros::string_newtype;
use async_channel::{Receiver, Sender};
use dial::SliderConfig;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

pub const DEFAULT_SIZE: f64 = 360.0;

/// Where the dial group appears when the overlay is shown.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    #[strum(serialize = "cursor", serialize = "pointer")]
    Cursor,
    #[strum(serialize = "center", serialize = "centre")]
    Center,
}

string_newtype! {
    /// Shell command run on every value change; `{value}` is substituted.
    pub struct ExecCommand;
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct DialConfig {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(flatten)]
    pub slider: SliderConfig,
    #[serde(default)]
    pub on_change: Option<ExecCommand>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub placement: Placement,
    #[serde(default = "default_size")]
    pub size: f64,
    #[serde(default)]
    pub dials: Vec<DialConfig>,
}

fn default_size() -> f64 {
    DEFAULT_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            size: DEFAULT_SIZE,
            dials: Vec::new(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("org", "dials", "dials")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .ok_or(ConfigError::ConfigDirNotFound)
}

fn build(source: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Config, ConfigError> {
    Ok(source.build()?.try_deserialize()?)
}

/// Reads the config file, if any, with `DIALS_*` environment overrides on top.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = get_config_path()?;
    build(
        config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("DIALS")),
    )
}

pub fn default_config() -> Config {
    let bundled = config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml);
    build(config::Config::builder().add_source(bundled)).unwrap_or_else(|e| {
        log::error!("Bundled default config is broken: {}", e);
        Config::default()
    })
}

/// Loads the user config, writing the bundled default first if none exists.
pub fn load_or_setup() -> Config {
    match write_default_config() {
        Ok(Some(path)) => log::info!("Wrote default config to {}", path.display()),
        Ok(None) => {}
        Err(e) => log::error!("Failed to write default config: {}", e),
    }

    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        default_config()
    })
}

/// Returns the written path, or `None` when a config file already exists.
pub fn write_default_config() -> Result<Option<PathBuf>, ConfigError> {
    let path = get_config_path()?;
    if path.exists() {
        return Ok(None);
    }
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(&path, DEFAULT_CONFIG)?;
    Ok(Some(path))
}

fn is_config_change(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// Watches the config directory; editors often replace the file instead of writing it.
fn watch_config_dir(
    config_path: &Path,
) -> Result<(RecommendedWatcher, Receiver<notify::Result<notify::Event>>), ConfigError> {
    let dir = config_path.parent().ok_or(ConfigError::ConfigDirNotFound)?;
    fs_err::create_dir_all(dir)?;

    let (events_tx, events_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = events_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok((watcher, events_rx))
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let watched = get_config_path().and_then(|path| {
        let (watcher, events) = watch_config_dir(&path)?;
        Ok((path, watcher, events))
    });
    // the watcher stops when dropped
    let (config_path, _watcher, events) = match watched {
        Ok(w) => w,
        Err(e) => {
            log::error!("Config watcher disabled: {}", e);
            return;
        }
    };

    while let Ok(res) = events.recv().await {
        match res {
            Ok(event) if is_config_change(&event, &config_path) => {
                log::debug!("Config changed: {:?}", event.kind);
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_deserialization() {
        let cases = vec![
            ("\"cursor\"", Placement::Cursor),
            ("\"Pointer\"", Placement::Cursor),
            ("\"CENTER\"", Placement::Center),
            ("\"centre\"", Placement::Center),
        ];

        for (json, expected) in cases {
            let deserialized: Placement = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_dial_config_flattens_slider_fields() {
        let json = r##"{
            "placement": "center",
            "dials": [
                {"label": "Volume", "max": 150, "value": 40, "on_change": "echo {value}"},
                {"radius": 270, "markers": false}
            ]
        }"##;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.placement, Placement::Center);
        assert_eq!(config.size, DEFAULT_SIZE);
        assert_eq!(config.dials.len(), 2);

        let volume = &config.dials[0];
        assert_eq!(volume.label.as_deref(), Some("Volume"));
        assert_eq!(volume.slider.max, Some(150.0));
        assert_eq!(volume.slider.value, Some(40.0));
        assert_eq!(volume.on_change, Some(ExecCommand::new("echo {value}")));

        assert_eq!(config.dials[1].slider.radius, Some(270.0));
        assert!(!config.dials[1].slider.markers);
    }

    #[test]
    fn test_bundled_default_config_parses() {
        let config = default_config();
        assert!(!config.dials.is_empty());
        assert!(
            config
                .dials
                .iter()
                .all(|d| dial::Params::from_config(&d.slider).validate().is_ok())
        );
    }

    #[test]
    fn test_only_config_file_changes_trigger_reload() {
        use notify::event::{AccessKind, CreateKind, ModifyKind};

        let config_path = Path::new("/home/u/.config/dials/config.toml");
        let event = |kind, path: &str| notify::Event::new(kind).add_path(PathBuf::from(path));

        let cases = vec![
            (event(EventKind::Modify(ModifyKind::Any), "/home/u/.config/dials/config.toml"), true),
            (event(EventKind::Create(CreateKind::File), "/home/u/.config/dials/config.toml"), true),
            (event(EventKind::Modify(ModifyKind::Any), "/home/u/.config/dials/other.toml"), false),
            (event(EventKind::Access(AccessKind::Any), "/home/u/.config/dials/config.toml"), false),
        ];

        for (event, expected) in cases {
            assert_eq!(is_config_change(&event, config_path), expected, "{:?}", event);
        }
    }
}
