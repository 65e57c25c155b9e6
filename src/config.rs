//! Application configuration
//!
//! Window dimensions and asset paths, loaded from an optional TOML file.
//! A missing file falls back to the built-in defaults; a malformed file is
//! an error so typos do not silently vanish.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub assets: AssetPaths,
}

/// Initial window dimensions and title.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: "OpenGL Renderer".to_string(),
        }
    }
}

/// Fixed asset paths loaded at renderer init time.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub texture: String,
    pub vertex_shader: String,
    pub fragment_shader: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            texture: "assets/textures/crate.png".to_string(),
            vertex_shader: "shaders/basic.vert".to_string(),
            fragment_shader: "shaders/basic.frag".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, using defaults when the file is absent.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)?;
        let config = toml::from_str(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 480);
        assert_eq!(config.window.title, "OpenGL Renderer");
        assert_eq!(config.assets.texture, "assets/textures/crate.png");
        assert_eq!(config.assets.vertex_shader, "shaders/basic.vert");
        assert_eq!(config.assets.fragment_shader, "shaders/basic.frag");
    }

    #[test]
    fn test_parse_full_config() {
        let text = r#"
            [window]
            width = 1280
            height = 720
            title = "Crate Viewer"

            [assets]
            texture = "tex/box.png"
            vertex_shader = "sh/a.vert"
            fragment_shader = "sh/a.frag"
        "#;

        let config: AppConfig = toml::from_str(text).unwrap();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.window.title, "Crate Viewer");
        assert_eq!(config.assets.texture, "tex/box.png");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let text = r#"
            [window]
            width = 800
        "#;

        let config: AppConfig = toml::from_str(text).unwrap();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 480);
        assert_eq!(config.assets.texture, "assets/textures/crate.png");
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let result: Result<AppConfig, _> = toml::from_str("[window\nwidth = ");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(config.window.width, 640);
    }
}
