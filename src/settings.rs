//! Performance and control settings
//!
//! Persisted as RON in the platform config directory on native builds.
//! Load failures fall back to defaults; the game must never refuse to
//! start over a bad settings file. WASM keeps defaults in memory.

use serde::{Deserialize, Serialize};

/// FPS limit setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FpsLimit {
    /// 30 FPS (battery saver)
    Fps30,
    /// 60 FPS (smooth gameplay)
    #[default]
    Fps60,
    /// Unlocked (as fast as possible)
    Unlocked,
}

impl FpsLimit {
    /// Get the target frame time in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fps30 => Some(1.0 / 30.0),
            FpsLimit::Fps60 => Some(1.0 / 60.0),
            FpsLimit::Unlocked => None,
        }
    }

    /// Cycle to next value
    pub fn next(self) -> Self {
        match self {
            FpsLimit::Fps30 => FpsLimit::Fps60,
            FpsLimit::Fps60 => FpsLimit::Unlocked,
            FpsLimit::Unlocked => FpsLimit::Fps30,
        }
    }

    /// Display name
    pub fn label(&self) -> &'static str {
        match self {
            FpsLimit::Fps30 => "30",
            FpsLimit::Fps60 => "60",
            FpsLimit::Unlocked => "Unlocked",
        }
    }
}

/// Error type for settings persistence
#[derive(Debug)]
pub enum SettingsError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for SettingsError {
    fn from(e: ron::error::SpannedError) -> Self {
        SettingsError::ParseError(e)
    }
}

impl From<ron::Error> for SettingsError {
    fn from(e: ron::Error) -> Self {
        SettingsError::SerializeError(e)
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::IoError(e) => write!(f, "IO error: {}", e),
            SettingsError::ParseError(e) => write!(f, "Parse error: {}", e),
            SettingsError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub fps_limit: FpsLimit,
    pub show_fps: bool,
    pub touch_controls: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps_limit: FpsLimit::default(),
            show_fps: true,
            touch_controls: true,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults on any failure.
    pub fn load() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            match Self::load_from(&Self::file_path()) {
                Ok(settings) => return settings,
                Err(SettingsError::IoError(e))
                    if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => eprintln!("Failed to load settings: {}", e),
            }
        }
        Self::default()
    }

    /// Save settings to the config directory. Best-effort; callers log
    /// the error and move on.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to(&Self::file_path())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), SettingsError> {
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn file_path() -> std::path::PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("pixel-rpg")
            .join("settings.ron")
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&contents)?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_limit_cycle() {
        let mut limit = FpsLimit::Fps30;
        limit = limit.next();
        assert_eq!(limit, FpsLimit::Fps60);
        limit = limit.next();
        assert_eq!(limit, FpsLimit::Unlocked);
        assert_eq!(limit.frame_time(), None);
        limit = limit.next();
        assert_eq!(limit, FpsLimit::Fps30);
        assert_eq!(limit.frame_time(), Some(1.0 / 30.0));
    }

    #[test]
    fn test_settings_persist_through_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.ron");

        let settings = Settings {
            fps_limit: FpsLimit::Fps30,
            show_fps: false,
            touch_controls: true,
        };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_from(&dir.path().join("absent.ron")).unwrap_err();
        assert!(matches!(err, SettingsError::IoError(_)));
    }

    #[test]
    fn test_garbage_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ron");
        std::fs::write(&path, "not ron at all {{{").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, SettingsError::ParseError(_)));
    }
}
