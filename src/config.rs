//! Conversion configuration
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! whatever the command line (or its environment fallbacks) sets.
//!
//! ```yaml
//! input: Aakhar_list.xlsx
//! output_dir: assets/data
//! index_file_name: _categories.json
//! emit_index: true
//! ```

use crate::error::{ConvertError, ConvertResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "Aakhar_list.xlsx";
pub const DEFAULT_OUTPUT_DIR: &str = "assets/data";
pub const DEFAULT_INDEX_FILE_NAME: &str = "_categories.json";

/// Everything a conversion run needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Source workbook
    pub input: PathBuf,
    /// Destination directory for generated documents
    pub output_dir: PathBuf,
    /// File name of the category index, inside `output_dir`
    pub index_file_name: String,
    pub emit_index: bool,
    /// Do everything except touching the filesystem
    pub dry_run: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            index_file_name: DEFAULT_INDEX_FILE_NAME.to_string(),
            emit_index: true,
            dry_run: false,
        }
    }
}

/// On-disk form of the configuration; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub index_file_name: Option<String>,
    pub emit_index: Option<bool>,
}

/// Command-line level overrides
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub index_file_name: Option<String>,
    pub no_index: bool,
    pub dry_run: bool,
}

impl ConfigFile {
    /// Parse a YAML config file. Relative paths are resolved against the
    /// directory holding the file.
    pub fn load(path: &Path) -> ConvertResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConvertError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let mut file = Self::from_yaml(&content)?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            file.input = file.input.map(|p| base.join(p));
            file.output_dir = file.output_dir.map(|p| base.join(p));
        }

        Ok(file)
    }

    pub fn from_yaml(content: &str) -> ConvertResult<Self> {
        // An empty document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

impl ConvertConfig {
    /// Build the final configuration from the optional file and overrides
    pub fn resolve(file: Option<ConfigFile>, overrides: ConfigOverrides) -> ConvertResult<Self> {
        let mut config = Self::default();

        if let Some(file) = file {
            if let Some(input) = file.input {
                config.input = input;
            }
            if let Some(output_dir) = file.output_dir {
                config.output_dir = output_dir;
            }
            if let Some(name) = file.index_file_name {
                config.index_file_name = name;
            }
            if let Some(emit) = file.emit_index {
                config.emit_index = emit;
            }
        }

        if let Some(input) = overrides.input {
            config.input = input;
        }
        if let Some(output_dir) = overrides.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(name) = overrides.index_file_name {
            config.index_file_name = name;
        }
        if overrides.no_index {
            config.emit_index = false;
        }
        config.dry_run = overrides.dry_run;

        config.validate()?;
        Ok(config)
    }

    /// Reject index names that would escape the output directory
    pub fn validate(&self) -> ConvertResult<()> {
        if !self.emit_index {
            return Ok(());
        }

        let name = self.index_file_name.as_str();
        let is_plain_file_name = Path::new(name)
            .file_name()
            .is_some_and(|f| f == name);
        if name.is_empty() || !is_plain_file_name {
            return Err(ConvertError::Config(format!(
                "index file name must be a plain file name, got {:?}",
                name
            )));
        }

        Ok(())
    }

    /// Where the category index goes
    pub fn index_path(&self) -> PathBuf {
        self.output_dir.join(&self.index_file_name)
    }
}
