use std::collections::HashMap;
use std::{env, path::PathBuf};

use color_eyre::Result;
use directories::ProjectDirs;
use form::StyleOverrides;
use lazy_static::lazy_static;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::ui::palette::ClassStyle;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub config_dir: PathBuf,
}

/// Host configuration.
///
/// ```toml
/// schema = "contact.toml"
///
/// [custom_classes]
/// submit = "submit primary"
///
/// [error_messages]
/// pattern = "has the wrong format"
///
/// [class_styles.primary]
/// fg = "White"
/// bg = "Blue"
/// bold = true
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub schema: Option<PathBuf>,
    #[serde(default)]
    pub custom_classes: StyleOverrides,
    #[serde(default)]
    pub error_messages: HashMap<String, String>,
    #[serde(default)]
    pub class_styles: HashMap<String, ClassStyle>,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

const CONFIG_FILES: [(&str, config::FileFormat); 2] = [
    ("config.json5", config::FileFormat::Json5),
    ("config.toml", config::FileFormat::Toml),
];

impl Config {
    pub fn new() -> Result<Self> {
        Self::load_from(get_config_dir())
    }

    /// Load `config.json5` / `config.toml` from `config_dir` (both optional).
    pub fn load_from(config_dir: PathBuf) -> Result<Self> {
        let data_dir = get_data_dir();
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().as_ref())?
            .set_default("config_dir", config_dir.to_string_lossy().as_ref())?;

        let mut found_config = false;
        for (file, format) in &CONFIG_FILES {
            let path = config_dir.join(file);
            builder = builder.add_source(config::File::from(path.clone()).format(*format).required(false));
            if path.exists() {
                debug!(path = %path.display(), "using config file");
                found_config = true;
            }
        }
        if !found_config {
            warn!("No configuration file found, using built-in defaults");
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;
        // relative schema paths are resolved against the config directory
        if let Some(schema) = cfg.schema.take() {
            cfg.schema = Some(if schema.is_relative() {
                config_dir.join(schema)
            } else {
                schema
            });
        }
        Ok(cfg)
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "lucaslab", env!("CARGO_PKG_NAME"))
}
