use serde::Deserialize;
use std::path::PathBuf;
use stroke_core::config::{load_layered, ServerSettings, TelemetrySettings};
use stroke_core::error::AppError;

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    #[serde(default)]
    pub assets: AssetSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AssetSettings {
    /// Directory served under `/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
        }
    }
}

fn default_static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static")
}

pub fn get_configuration() -> Result<Settings, AppError> {
    let base_path = std::env::current_dir()?;

    // Run either from the workspace root or from inside stroke-web
    let configuration_directory = if base_path.ends_with("stroke-web") {
        base_path.join("config")
    } else {
        base_path.join("stroke-web").join("config")
    };

    load_layered(&configuration_directory)
}
