//! Demo configuration, read from a TOML file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Antagonists".to_string(),
            width: 640,
            height: 400,
        }
    }
}

/// One antagonist to spawn. Without a `position` it is placed at random.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AntagonistConfig {
    pub name: Option<String>,
    pub texture: Option<PathBuf>,
    pub color: [u8; 4],
    pub size: [f32; 2],
    pub position: Option<[f32; 2]>,
    pub z_position: f32,
    pub intern: bool,
    pub faster: bool,
}

impl Default for AntagonistConfig {
    fn default() -> Self {
        Self {
            name: None,
            texture: None,
            color: [220, 60, 60, 255],
            size: [32.0, 32.0],
            position: None,
            z_position: 0.0,
            intern: false,
            faster: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub background: [u8; 4],
    pub antagonists: Vec<AntagonistConfig>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            background: [16, 16, 24, 255],
            antagonists: Vec::new(),
        }
    }
}

impl DemoConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!(
            "Loaded config from {:?} ({} antagonists)",
            path,
            config.antagonists.len()
        );
        Ok(config)
    }

    /// Like [`DemoConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("Config {:?} not found, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        for (i, a) in self.antagonists.iter().enumerate() {
            let [w, h] = a.size;
            if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "antagonist {i} needs a finite positive size, got {w}x{h}"
                )));
            }
            if let Some([x, y]) = a.position {
                if !(x.is_finite() && y.is_finite()) {
                    return Err(ConfigError::Invalid(format!(
                        "antagonist {i} has non-finite position ({x}, {y})"
                    )));
                }
            }
            if !a.z_position.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "antagonist {i} has non-finite z_position {}",
                    a.z_position
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn empty_file_gives_defaults() {
        let config = DemoConfig::from_toml_str("").expect("empty config is valid");
        assert_eq!(config, DemoConfig::default());
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 400);
        assert!(config.antagonists.is_empty());
    }

    #[test]
    fn parses_antagonist_list() {
        let text = r#"
            background = [0, 0, 0, 255]

            [window]
            title = "Office"
            width = 320
            height = 240

            [[antagonists]]
            name = "boss"
            texture = "assets/boss.png"
            position = [100.0, 50.0]
            z_position = 2.0

            [[antagonists]]
            intern = true
            faster = true
            size = [16.0, 24.0]
        "#;
        let config = DemoConfig::from_toml_str(text).expect("valid config");
        assert_eq!(config.window.title, "Office");
        assert_eq!(config.background, [0, 0, 0, 255]);
        assert_eq!(config.antagonists.len(), 2);

        let boss = &config.antagonists[0];
        assert_eq!(boss.name.as_deref(), Some("boss"));
        assert_eq!(boss.texture, Some(PathBuf::from("assets/boss.png")));
        assert_eq!(boss.position, Some([100.0, 50.0]));
        assert_eq!(boss.size, [32.0, 32.0]);
        assert!(!boss.intern);

        let intern = &config.antagonists[1];
        assert!(intern.intern);
        assert!(intern.faster);
        assert_eq!(intern.position, None);
        assert_eq!(intern.size, [16.0, 24.0]);
    }

    #[rstest]
    #[case("[window]\nwidth = 0")]
    #[case("[window]\nheight = 0")]
    #[case("[[antagonists]]\nsize = [0.0, 10.0]")]
    #[case("[[antagonists]]\nsize = [10.0, -1.0]")]
    #[case("[[antagonists]]\nsize = [inf, 10.0]")]
    #[case("[[antagonists]]\nsize = [10.0, nan]")]
    #[case("[[antagonists]]\nposition = [-inf, 200.0]")]
    #[case("[[antagonists]]\nposition = [320.0, nan]")]
    #[case("[[antagonists]]\nz_position = inf")]
    fn rejects_invalid_geometry(#[case] text: &str) {
        let err = DemoConfig::from_toml_str(text).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got {err}");
    }

    #[test]
    fn accepts_large_finite_sizes() {
        let config = DemoConfig::from_toml_str(
            "[[antagonists]]\nsize = [1.0e10, 10.0]\nposition = [320.0, 200.0]",
        )
        .expect("large but finite sizes are valid");
        assert_eq!(config.antagonists[0].size, [1.0e10, 10.0]);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = DemoConfig::from_toml_str("window = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = DemoConfig::load_or_default("no/such/antagonists.toml").expect("defaults");
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = DemoConfig::load("no/such/antagonists.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
