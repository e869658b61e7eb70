use crate::config;

/// Effective settings plus the reasons, if any, they fell back to defaults.
///
/// Settings are read before logging exists, so warnings are carried out and
/// logged once the subscriber is installed.
pub struct LoadedSettings {
    pub settings: config::Settings,
    pub warnings: Vec<String>,
}

pub fn load_settings() -> LoadedSettings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                LoadedSettings {
                    settings: config::Settings::default(),
                    warnings: vec![format!("invalid config, using defaults: {msg}")],
                }
            } else {
                LoadedSettings {
                    settings: s,
                    warnings: Vec::new(),
                }
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            LoadedSettings {
                settings: config::Settings::default(),
                warnings: vec![format!("failed to load config, using defaults: {e}")],
            }
        }
    }
}
