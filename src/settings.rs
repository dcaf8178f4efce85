//! Layered application settings.
//!
//! Later sources override earlier ones:
//! `$USER_CONFIG_DIR/arc-progress/settings.toml`, `./settings.toml`, the file
//! given on the command line and finally `ARC_` environment variables, where
//! `__` separates nested keys (`ARC_PROGRESS__LINE_WIDTH=6`).
use crate::{description::ViewDescription, view::defaults};
use anyhow::{Context, Result};
use config::{Config, ConfigError};
use embedded_graphics::geometry::Size;
use log::{debug, info};
use std::{path::Path, time::Duration};

pub fn load(extra: Option<&Path>) -> Result<Config> {
    let mut settings = Config::default();

    if let Some(user_config_dir) = dirs::config_dir() {
        let path = user_config_dir.join("arc-progress/settings");
        debug!("Looking for settings in {}", path.display());
        settings.merge(config::File::with_name(&path.to_string_lossy()).required(false))?;
    }

    settings.merge(config::File::with_name("settings").required(false))?;

    if let Some(path) = extra {
        info!("Loading settings from {}", path.display());
        settings
            .merge(config::File::from(path))
            .with_context(|| format!("Failed to load settings from {}", path.display()))?;
    }

    settings.merge(config::Environment::with_prefix("ARC").separator("__"))?;

    Ok(settings)
}

/// The `progress` table, or a default view if there is none.
pub fn view_description(settings: &Config) -> Result<ViewDescription> {
    match settings.get::<ViewDescription>("progress") {
        Ok(description) => Ok(description),
        Err(ConfigError::NotFound(_)) => Ok(ViewDescription::default()),
        Err(e) => Err(e).context("Invalid `progress` settings"),
    }
}

/// Size of the display the view is rendered to.
pub fn display_size(settings: &Config) -> Size {
    let dimension = |key: &str, fallback: u32| {
        settings
            .get_int(key)
            .ok()
            .and_then(|value| u32::try_from(value).ok())
            .unwrap_or(fallback)
    };

    Size::new(
        dimension("display.width", defaults::SIZE.width),
        dimension("display.height", defaults::SIZE.height),
    )
}

/// The scripted progress updates of the demo binary.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoSettings {
    pub steps: Vec<f32>,
    pub interval: Duration,
    pub animated: bool,
    /// Start over after the last step.
    pub repeat: bool,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            steps: vec![0.25, 0.5, 0.8, 1.0, 0.0],
            interval: Duration::from_millis(1500),
            animated: true,
            repeat: true,
        }
    }
}

impl DemoSettings {
    pub fn from_config(settings: &Config) -> Result<Self> {
        let fallback = Self::default();

        let steps = match settings.get::<Vec<f32>>("demo.steps") {
            Ok(steps) => steps,
            Err(ConfigError::NotFound(_)) => fallback.steps,
            Err(e) => return Err(e).context("Invalid `demo.steps`"),
        };

        let interval = settings
            .get_int("demo.interval")
            .ok()
            .and_then(|ms| u64::try_from(ms).ok())
            .map_or(fallback.interval, Duration::from_millis);

        Ok(Self {
            steps,
            interval,
            animated: settings.get_bool("demo.animated").unwrap_or(fallback.animated),
            repeat: settings.get_bool("demo.repeat").unwrap_or(fallback.repeat),
        })
    }
}
