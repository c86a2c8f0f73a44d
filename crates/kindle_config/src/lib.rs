use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A field exposed by a host class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostFieldEntry {
  pub name: String,
  /// Type name as written in the manifest (e.g. "String", "int", "Bar")
  #[serde(rename = "type")]
  pub type_name: String,
}

/// A method exposed by a host class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostMethodEntry {
  pub name: String,
  #[serde(default)]
  pub params: Vec<String>,
  /// Return type name (defaults to "void")
  #[serde(default = "default_return_type")]
  pub returns: String,
}

fn default_return_type() -> String {
  "void".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostClassEntry {
  pub name: String,
  #[serde(default, rename = "field")]
  pub fields: Vec<HostFieldEntry>,
  #[serde(default, rename = "method")]
  pub methods: Vec<HostMethodEntry>,
}

/// Whitelist of host classes visible to scripts.
///
/// Expected format:
/// ```toml
/// [[class]]
/// name = "Foo"
///
/// [[class.field]]
/// name = "bar"
/// type = "Bar"
///
/// [[class.method]]
/// name = "b"
/// params = []
/// returns = "String"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClassManifest {
  #[serde(default, rename = "class")]
  pub classes: Vec<HostClassEntry>,
}

impl ClassManifest {
  pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
    toml::from_str(text).map_err(|err| ConfigError::TomlParseError {
      path: None,
      message: err.to_string(),
    })
  }

  /// Same shape as the TOML form, e.g.
  /// `{"class": [{"name": "Foo", "field": [{"name": "bar", "type": "Bar"}]}]}`.
  pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
    serde_json::from_str(text).map_err(|err| ConfigError::JsonParseError {
      path: None,
      message: err.to_string(),
    })
  }

  /// Load a manifest from disk. Files ending in `.json` are read as JSON,
  /// anything else as TOML.
  pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
      path: path.to_path_buf(),
      source,
    })?;

    if path.extension().is_some_and(|ext| ext == "json") {
      return serde_json::from_str(&text).map_err(|err| ConfigError::JsonParseError {
        path: Some(path.to_path_buf()),
        message: err.to_string(),
      });
    }

    toml::from_str(&text).map_err(|err| ConfigError::TomlParseError {
      path: Some(path.to_path_buf()),
      message: err.to_string(),
    })
  }

  pub fn get_class(
    &self,
    name: &str,
  ) -> Option<&HostClassEntry> {
    self.classes.iter().find(|c| c.name == name)
  }
}

#[derive(Debug)]
pub enum ConfigError {
  /// I/O error while reading a manifest.
  IoError { path: PathBuf, source: std::io::Error },

  /// Manifest is not valid TOML or does not match the expected shape.
  TomlParseError { path: Option<PathBuf>, message: String },

  JsonParseError { path: Option<PathBuf>, message: String },
}

impl fmt::Display for ConfigError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      ConfigError::IoError { path, source } => {
        write!(f, "failed to read '{}': {}", path.display(), source)
      },
      ConfigError::TomlParseError { path: Some(path), message }
      | ConfigError::JsonParseError { path: Some(path), message } => {
        write!(f, "failed to parse '{}': {}", path.display(), message)
      },
      ConfigError::TomlParseError { path: None, message } | ConfigError::JsonParseError { path: None, message } => {
        write!(f, "failed to parse class manifest: {}", message)
      },
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ConfigError::IoError { source, .. } => Some(source),
      _ => None,
    }
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugTrace {
  Analyzer,
  Lowering,
  Collect,
  Eval,
}

/// Controls the verbosity level of compiler output.
///
/// - `Quiet`: No output except errors
/// - `Detailed`: Structured progress output (default)
/// - `Verbose`: Detailed output with internal phases
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OutputLevel {
  Quiet,
  #[default]
  Detailed,
  Verbose,
}

#[derive(Debug, Clone, Default)]
pub struct KindleConfig {
  pub debug: bool,
  pub debug_trace: Vec<DebugTrace>,
  pub quiet: bool,
  pub verbose: u8,
  pub output_level: OutputLevel,
  pub manifest: ClassManifest,
}

impl KindleConfig {
  pub fn new_basic(
    debug: bool,
    debug_trace: Vec<DebugTrace>,
    quiet: bool,
    verbose: u8,
  ) -> Self {
    let output_level = if quiet {
      OutputLevel::Quiet
    } else if verbose > 0 {
      OutputLevel::Verbose
    } else {
      OutputLevel::Detailed
    };

    Self {
      debug,
      debug_trace,
      quiet,
      verbose,
      output_level,
      ..Self::default()
    }
  }

  /// Silent configuration, used by embedders that only want diagnostics.
  pub fn quiet() -> Self {
    Self::new_basic(false, Vec::new(), true, 0)
  }

  pub fn with_manifest(
    mut self,
    manifest: ClassManifest,
  ) -> Self {
    self.manifest = manifest;
    self
  }
}
