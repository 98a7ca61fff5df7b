//! Configuration management for `hueshift.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section    # [recolor], [palette], [output]
//! ├── error      # ConfigError, diagnostics
//! ├── util       # config file lookup
//! └── mod.rs     # Config (this file)
//! ```
//!
//! # Sections
//!
//! | Section     | Purpose                                         |
//! |-------------|-------------------------------------------------|
//! | `[recolor]` | Background color, contrast target, search step  |
//! | `[palette]` | Dominant color sampling                         |
//! | `[output]`  | Output directory or file suffix                 |

mod error;
mod section;
mod util;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};
pub use section::{OutputSection, PaletteSection, RecolorSection};
pub use util::find_config_file;

use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{debug, log};

/// Config file looked up when no path is given.
pub const DEFAULT_CONFIG_NAME: &str = "hueshift.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing hueshift.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path the config was loaded from (None when using defaults)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Background color and search policy
    pub recolor: RecolorSection,

    /// Dominant color sampling
    pub palette: PaletteSection,

    /// Output location
    pub output: OutputSection,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `hueshift.toml` is searched
    /// upward from cwd and a missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let name = path.unwrap_or(Path::new(DEFAULT_CONFIG_NAME));
        match find_config_file(name) {
            Some(found) => {
                let config = Self::from_path(&found)?;
                debug!("config"; "loaded {}", found.display());
                Ok(config)
            }
            None if path.is_some() => Err(ConfigError::Io(
                name.to_path_buf(),
                io::Error::new(io::ErrorKind::NotFound, "config file not found"),
            )),
            None => {
                debug!("config"; "{} not found, using defaults", name.display());
                Ok(Self::default())
            }
        }
    }

    /// Load and validate configuration from a file path.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.config_path = Some(path.to_path_buf());
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    pub fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Check every section, reporting all problems at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.recolor.validate(&mut diag);
        self.palette.validate(&mut diag);
        self.output.validate(&mut diag);
        diag.into_result()
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "ignoring unknown fields in {}:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }
}

// ============================================================================
// tests
// ============================================================================
