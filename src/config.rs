//! Global configuration management
//! This module handles the loading and parsing of configuration files
//! and environment variables for the application.
//!
//! Sources, later ones winning:
//! 1. the built-in `Config.toml`
//! 2. a `Config.toml` next to the executable
//! 3. an explicit file given with `--config`
//! 4. `MDFETCH__*` environment variables, e.g. `MDFETCH__NORMALIZE=trim-only`
//!    or `MDFETCH__CONVERTER__LINK_STYLE=inlined`
//!
//! ```rust
//! use mdfetch::config::get_settings;
//!
//! let cfg = get_settings();
//! println!("{:?}", cfg.normalize);
//! ```

use config::{Config, ConfigError, Environment, File, FileFormat};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use crate::fetch::FetchSettings;
use crate::generator::html2md::{ConverterOptions, HeadingStyle, LinkStyle};
use crate::normalizer::NormalizeMode;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub normalize: NormalizeMode,
    pub converter: ConverterOptions,
    pub fetch: FetchSettings,
    pub output_path: Option<PathBuf>,
}

pub static SETTINGS: Lazy<RwLock<Settings>> = Lazy::new(|| {
    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration, using defaults: {}", e);
        Settings::default()
    });
    RwLock::new(settings)
});

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        // 1. built-in default config
        let mut builder = Config::builder().add_source(File::from_str(
            include_str!("../Config.toml"),
            FileFormat::Toml,
        ));

        // 2. try to load external config file
        if let Ok(exe_path) = env::current_exe() {
            if let Some(dir) = exe_path.parent() {
                let external = dir.join("Config.toml");
                if fs::metadata(&external).is_ok() {
                    builder = builder.add_source(File::from(external).required(false));
                }
            }
        }

        // 3. file given on the command line
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        // 4. load environment variables
        builder = builder.add_source(Environment::with_prefix("MDFETCH").separator("__"));

        builder.build()?.try_deserialize()
    }
}

/// Replaces the global settings, e.g. after loading an explicit config file.
pub fn replace_settings(settings: Settings) {
    let mut current = SETTINGS.write().unwrap_or_else(|e| e.into_inner());
    *current = settings;
}

/// Applies command line overrides on top of the global settings.
pub fn update_settings_with_cli_args(
    output_path: Option<PathBuf>,
    normalize: Option<NormalizeMode>,
    link_style: Option<LinkStyle>,
    heading_style: Option<HeadingStyle>,
) {
    let mut settings = SETTINGS.write().unwrap_or_else(|e| e.into_inner());

    if let Some(path) = output_path {
        settings.output_path = Some(path);
    }
    if let Some(mode) = normalize {
        settings.normalize = mode;
    }
    if let Some(style) = link_style {
        settings.converter.link_style = style;
    }
    if let Some(style) = heading_style {
        settings.converter.heading_style = style;
    }
}

pub fn get_settings() -> Settings {
    SETTINGS.read().unwrap_or_else(|e| e.into_inner()).clone()
}
