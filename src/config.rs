//! # Configuration Module
//!
//! Optional configuration support, allowing users to extend or override the
//! builtin comment style tables. Configuration lives in a `.spdxheader.toml`
//! file in the working directory, or wherever `--config` points.
//!
//! ```toml
//! [comment-styles.xyz]
//! line = "## "
//!
//! [comment-styles.tpl]
//! block-start = "{#"
//! block-inner = ""
//! block-end = "#}"
//!
//! [filenames.Justfile]
//! line = "# "
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::styles::CommentStyle;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".spdxheader.toml";

/// A user-defined comment style: either a line form or a block form.
///
/// Exactly one of the two forms must be given; `validate` rejects entries
/// that mix them or specify neither.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct CommentStyleConfig {
  /// Line-comment prefix, including any separating space (e.g. `"// "`)
  #[serde(default)]
  pub line: Option<String>,

  /// Block opening delimiter (e.g. `"/*"`)
  #[serde(default)]
  pub block_start: Option<String>,

  /// Prefix for each line inside the block (e.g. `" * "`); may be empty
  #[serde(default)]
  pub block_inner: Option<String>,

  /// Block closing delimiter (e.g. `"*/"`)
  #[serde(default)]
  pub block_end: Option<String>,
}

impl CommentStyleConfig {
  /// Create a line-comment style entry.
  #[allow(dead_code)]
  pub fn line(prefix: &str) -> Self {
    Self {
      line: Some(prefix.to_string()),
      ..Self::default()
    }
  }

  /// Create a block-comment style entry.
  #[allow(dead_code)]
  pub fn block(start: &str, inner: &str, end: &str) -> Self {
    Self {
      line: None,
      block_start: Some(start.to_string()),
      block_inner: Some(inner.to_string()),
      block_end: Some(end.to_string()),
    }
  }

  /// Convert a validated entry into a [`CommentStyle`].
  pub fn to_style(&self) -> CommentStyle {
    if let Some(prefix) = &self.line {
      CommentStyle::line(prefix)
    } else {
      CommentStyle::block(
        self.block_start.as_deref().unwrap_or_default(),
        self.block_inner.as_deref().unwrap_or_default(),
        self.block_end.as_deref().unwrap_or_default(),
      )
    }
  }

  fn check(&self, key: &str) -> Result<(), ConfigError> {
    let has_line = self.line.is_some();
    let has_block = self.block_start.is_some() || self.block_end.is_some();
    match (has_line, has_block) {
      (true, true) => Err(ConfigError::InvalidStyle {
        key: key.to_string(),
        message: "specify either `line` or the block fields, not both".to_string(),
      }),
      (false, false) => Err(ConfigError::InvalidStyle {
        key: key.to_string(),
        message: "specify `line` or `block-start`/`block-end`".to_string(),
      }),
      (false, true) if self.block_start.is_none() || self.block_end.is_none() => Err(ConfigError::InvalidStyle {
        key: key.to_string(),
        message: "block styles need both `block-start` and `block-end`".to_string(),
      }),
      _ => Ok(()),
    }
  }
}

/// Main configuration struct.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
  /// Custom comment styles keyed by file extension without the leading dot.
  #[serde(default, rename = "comment-styles")]
  pub comment_styles: HashMap<String, CommentStyleConfig>,

  /// Comment styles keyed by exact filename or glob pattern.
  #[serde(default)]
  pub filenames: HashMap<String, CommentStyleConfig>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  Read { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  Parse { path: PathBuf, source: toml::de::Error },

  /// A comment style entry is invalid.
  #[error("Invalid comment style for '{key}': {message}")]
  InvalidStyle { key: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;
    Ok(config.normalize())
  }

  /// Validate every style entry and reject extensions with a leading dot.
  fn validate(&self) -> Result<(), ConfigError> {
    for (ext, style) in &self.comment_styles {
      style.check(ext)?;
      if ext.starts_with('.') {
        return Err(ConfigError::InvalidStyle {
          key: ext.clone(),
          message: "extension should not include leading dot".to_string(),
        });
      }
    }
    for (name, style) in &self.filenames {
      style.check(name)?;
    }
    Ok(())
  }

  /// Normalize keys to lowercase for case-insensitive matching.
  fn normalize(self) -> Self {
    Self {
      comment_styles: self
        .comment_styles
        .into_iter()
        .map(|(k, v)| (k.to_lowercase(), v))
        .collect(),
      filenames: self
        .filenames
        .into_iter()
        .map(|(k, v)| (k.to_lowercase(), v))
        .collect(),
    }
  }
}

/// Load the configuration, if any.
///
/// An explicit `--config` path must load successfully; the default file is
/// only loaded when present. `no_config` disables loading entirely.
pub fn load_config(explicit: Option<&Path>, cwd: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    return Ok(None);
  }

  if let Some(path) = explicit {
    return Ok(Some(Config::load(path)?));
  }

  let default_path = cwd.join(DEFAULT_CONFIG_FILENAME);
  if default_path.exists() {
    return Ok(Some(Config::load(&default_path)?));
  }

  Ok(None)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_line_and_block_styles() {
    let content = r###"
[comment-styles.xyz]
line = "## "

[comment-styles.tpl]
block-start = "{#"
block-inner = ""
block-end = "#}"

[filenames.Justfile]
line = "# "
"###;
    let config: Config = toml::from_str(content).expect("parse");
    let config = config.normalize();

    assert_eq!(config.comment_styles["xyz"].to_style(), CommentStyle::line("## "));
    assert_eq!(
      config.comment_styles["tpl"].to_style(),
      CommentStyle::block("{#", "", "#}")
    );
    // Filename keys are lowercased for case-insensitive matching.
    assert!(config.filenames.contains_key("justfile"));
  }

  #[test]
  fn test_validate_rejects_mixed_forms() {
    let style = CommentStyleConfig {
      line: Some("# ".to_string()),
      block_start: Some("/*".to_string()),
      block_inner: None,
      block_end: Some("*/".to_string()),
    };
    assert!(style.check("bad").is_err());
  }

  #[test]
  fn test_validate_rejects_empty_entry() {
    assert!(CommentStyleConfig::default().check("empty").is_err());
  }

  #[test]
  fn test_validate_rejects_half_block() {
    let style = CommentStyleConfig {
      line: None,
      block_start: Some("/*".to_string()),
      block_inner: None,
      block_end: None,
    };
    assert!(style.check("half").is_err());
  }

  #[test]
  fn test_validate_rejects_leading_dot_extension() {
    let mut comment_styles = HashMap::new();
    comment_styles.insert(".rs".to_string(), CommentStyleConfig::line("// "));
    let config = Config {
      comment_styles,
      filenames: HashMap::new(),
    };
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_load_config_default_absent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let loaded = load_config(None, dir.path(), false).expect("load");
    assert!(loaded.is_none());
  }

  #[test]
  fn test_load_config_no_config_wins() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join(DEFAULT_CONFIG_FILENAME), "[comment-styles.x]\nline = \"# \"\n").expect("write");
    let loaded = load_config(None, dir.path(), true).expect("load");
    assert!(loaded.is_none());
  }

  #[test]
  fn test_load_config_explicit_missing_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.toml");
    assert!(load_config(Some(&missing), dir.path(), false).is_err());
  }
}
