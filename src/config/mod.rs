use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_FIT_PADDING_PX, DEFAULT_START_CENTER, DEFAULT_VIEW_SCALE};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Application configuration persisted to disk.
///
/// Only view preferences live here; parcels are session-only by design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Startup view center as [longitude, latitude]
    #[serde(default = "default_start_center")]
    pub start_center: [f64; 2],

    /// Startup camera zoom scale
    #[serde(default = "default_view_scale")]
    pub start_scale: f32,

    /// Padding in pixels around a parcel when fitting the viewport to it
    #[serde(default = "default_fit_padding")]
    pub fit_padding_px: f32,
}

fn default_start_center() -> [f64; 2] {
    DEFAULT_START_CENTER
}

fn default_view_scale() -> f32 {
    DEFAULT_VIEW_SCALE
}

fn default_fit_padding() -> f32 {
    DEFAULT_FIT_PADDING_PX
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            start_center: DEFAULT_START_CENTER,
            start_scale: DEFAULT_VIEW_SCALE,
            fit_padding_px: DEFAULT_FIT_PADDING_PX,
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: get_config_path(),
            dirty: false,
        }
    }
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Get the path to the config file (platform-appropriate location)
fn get_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("parcelmap")
        .join("config.json")
}

/// Load configuration from disk, falling back to defaults on any error
fn load_config() -> AppConfig {
    let config_path = get_config_path();

    let data = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    data
                }
                Err(e) => {
                    warn!("Failed to parse config file, using defaults: {}", e);
                    AppConfigData::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config file, using defaults: {}", e);
                AppConfigData::default()
            }
        }
    } else {
        info!("No config file found, using defaults");
        AppConfigData::default()
    };

    AppConfig {
        data,
        config_path,
        dirty: false,
    }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    if let Some(parent) = config.config_path.parent()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        error!("Failed to create config directory: {}", e);
        return;
    }

    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(mut config: ResMut<AppConfig>) {
    let loaded = load_config();
    config.data = loaded.data;
    config.config_path = loaded.config_path;
    config.dirty = false;
}

/// System to save config when requested
fn save_config_system(mut events: MessageReader<SaveConfigRequest>, mut config: ResMut<AppConfig>) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .add_message::<SaveConfigRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                save_config_system.run_if(on_message::<SaveConfigRequest>),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_data_default() {
        let data = AppConfigData::default();
        assert_eq!(data.start_center, DEFAULT_START_CENTER);
        assert_eq!(data.start_scale, DEFAULT_VIEW_SCALE);
        assert_eq!(data.fit_padding_px, DEFAULT_FIT_PADDING_PX);
    }

    #[test]
    fn test_app_config_data_serialization() {
        let data = AppConfigData {
            start_center: [10.5, -33.25],
            start_scale: 0.75,
            fit_padding_px: 24.0,
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed: AppConfigData = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.start_center, data.start_center);
        assert_eq!(parsed.start_scale, data.start_scale);
        assert_eq!(parsed.fit_padding_px, data.fit_padding_px);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let parsed: AppConfigData = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.start_center, DEFAULT_START_CENTER);
        assert_eq!(parsed.fit_padding_px, DEFAULT_FIT_PADDING_PX);
    }
}
