use crate::error::Error;
use crate::result::Result;
use crate::task::{ArchiveTask, MissingAssets};
use crate::tpl::Tpl;
use crate::utils;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub archive: ArchiveConfig,
}

/// `[archive]` table; every key overrides one default of the task
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ArchiveConfig {
    #[serde(default)]
    pub assets: Option<String>,

    #[serde(default)]
    pub prefix: Option<String>,

    #[serde(default)]
    pub output: Option<String>,

    #[serde(default)]
    pub allow_missing_assets: Option<bool>,

    #[serde(default)]
    pub standalone: Option<StandaloneConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct StandaloneConfig {
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

impl ArchiveConfig {
    /// Load the `[archive]` table from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.archive)
    }

    /// Override `task` with the configured values. Relative paths are
    /// resolved against `base_dir`, strings expand `$PLATFORM`, `$DATE`
    /// and `$NAME`.
    pub fn apply(&self, task: &mut ArchiveTask, base_dir: &Path) -> Result<()> {
        let mut tpl = Tpl::with_build_vars();
        let standalone = self.standalone.clone().unwrap_or_default();

        if let Some(name) = &standalone.name {
            task.standalone_name = non_empty("standalone.name", tpl.parse(name))?;
        }
        let stem = Path::new(&task.standalone_name)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        tpl.register("NAME", stem);

        let path = |value: &str| -> PathBuf {
            utils::resolve(base_dir, Path::new(&tpl.parse(value)))
        };

        if let Some(assets) = &self.assets {
            task.assets_root = path(assets);
        }
        if let Some(standalone_path) = &standalone.path {
            task.standalone_path = path(standalone_path);
        }
        if let Some(output) = &self.output {
            task.output_path = path(output);
        }
        if let Some(prefix) = &self.prefix {
            task.assets_prefix = non_empty("prefix", tpl.parse(prefix))?;
        }
        if let Some(allow) = self.allow_missing_assets {
            task.missing_assets = if allow {
                MissingAssets::Empty
            } else {
                MissingAssets::Fail
            };
        }

        Ok(())
    }
}

/// Directory a config file's relative paths are resolved against
pub fn base_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn non_empty(key: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(Error::InvalidConfig(format!("`{}` must not be empty", key)));
    }
    Ok(value)
}
