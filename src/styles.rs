//! # Comment Styles Module
//!
//! This module maps file types to comment styles and renders header lines in
//! the appropriate style. Lookup goes through a [`StyleResolver`] so that a
//! configuration file can override the builtin tables.
//!
//! Resolution order:
//! 1. Special filenames without a usable extension (Makefile, Dockerfile, ...)
//! 2. Case-insensitive extension lookup
//! 3. Shebang sniffing for extensionless files
//!
//! A file that resolves to no style is unsupported and is skipped, not an
//! error.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::verbose_log;

/// How header text is rendered as a comment for one file type.
///
/// Exactly one of the two forms applies: a *line* form where every header
/// line carries a literal prefix, or a *block* form where the lines are
/// bracketed by start/end delimiters and each carries an inner prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentStyle {
  /// Line comments: each header line is `<prefix><text>`.
  Line {
    /// The prefix for each line, including any separating space (e.g. `"# "`)
    prefix: String,
  },
  /// Block comments: delimiters on their own lines around prefixed content.
  Block {
    /// The opening delimiter (e.g. `"/*"`)
    start: String,
    /// The prefix for each content line (e.g. `" * "`, possibly empty)
    inner: String,
    /// The closing delimiter (e.g. `"*/"`)
    end: String,
  },
}

impl CommentStyle {
  /// Create a line-comment style from a prefix.
  pub fn line(prefix: &str) -> Self {
    CommentStyle::Line {
      prefix: prefix.to_string(),
    }
  }

  /// Create a block-comment style from its delimiters and inner prefix.
  pub fn block(start: &str, inner: &str, end: &str) -> Self {
    CommentStyle::Block {
      start: start.to_string(),
      inner: inner.to_string(),
      end: end.to_string(),
    }
  }

  /// Render a single header line in this style.
  ///
  /// Blank content renders as the bare prefix with trailing whitespace
  /// trimmed, so blank notice lines stay inside the comment without leaving
  /// trailing spaces.
  pub fn format_line(&self, text: &str) -> String {
    let prefix = match self {
      CommentStyle::Line { prefix } => prefix,
      CommentStyle::Block { inner, .. } => inner,
    };
    if text.is_empty() {
      prefix.trim_end().to_string()
    } else {
      format!("{prefix}{text}")
    }
  }

  /// Render a full header: every content line prefixed, and for block styles
  /// the whole bracketed by the start/end delimiters on their own lines.
  pub fn format_header(&self, lines: &[String]) -> Vec<String> {
    let mut formatted: Vec<String> = Vec::with_capacity(lines.len() + 2);
    if let CommentStyle::Block { start, .. } = self {
      formatted.push(start.clone());
    }
    formatted.extend(lines.iter().map(|line| self.format_line(line)));
    if let CommentStyle::Block { end, .. } = self {
      formatted.push(end.clone());
    }
    formatted
  }
}

/// Trait for resolving comment styles for file paths.
///
/// Implementations can use the builtin tables, user configuration, or both.
/// Returning `None` marks the file as unsupported.
pub trait StyleResolver: Send + Sync {
  /// Resolve the comment style for the given file path, if any.
  fn resolve(&self, path: &Path) -> Option<CommentStyle>;
}

/// Default resolver using only the builtin tables.
#[derive(Debug, Default)]
pub struct BuiltinResolver;

impl StyleResolver for BuiltinResolver {
  fn resolve(&self, path: &Path) -> Option<CommentStyle> {
    builtin_style_for(path)
  }
}

/// Resolver that checks user config overrides first, then falls back to the
/// builtin tables.
pub struct ConfigurableResolver {
  config: Arc<Config>,
}

impl ConfigurableResolver {
  /// Create a new configurable resolver with the given config.
  pub fn new(config: Config) -> Self {
    Self {
      config: Arc::new(config),
    }
  }
}

impl StyleResolver for ConfigurableResolver {
  fn resolve(&self, path: &Path) -> Option<CommentStyle> {
    let file_name = path
      .file_name()
      .and_then(|name| name.to_str())
      .unwrap_or("")
      .to_lowercase();

    // 1. Exact filename overrides
    if let Some(style) = self.config.filenames.get(&file_name) {
      verbose_log!("Using config filename override for: {}", file_name);
      return Some(style.to_style());
    }

    // 2. Filename overrides with glob patterns
    for (pattern, style) in &self.config.filenames {
      if pattern.contains('*')
        && let Ok(glob_pattern) = glob::Pattern::new(&pattern.to_lowercase())
        && glob_pattern.matches(&file_name)
      {
        verbose_log!("Using config filename glob override '{}' for: {}", pattern, file_name);
        return Some(style.to_style());
      }
    }

    // 3. Extension overrides
    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .unwrap_or("")
      .to_lowercase();

    if let Some(style) = self.config.comment_styles.get(&extension) {
      verbose_log!("Using config extension override for: .{}", extension);
      return Some(style.to_style());
    }

    // 4. Builtin tables
    builtin_style_for(path)
  }
}

/// Create a comment style resolver based on the provided configuration.
pub fn create_resolver(config: Option<Config>) -> Box<dyn StyleResolver> {
  match config {
    Some(cfg) => Box::new(ConfigurableResolver::new(cfg)),
    None => Box::new(BuiltinResolver),
  }
}

/// Determine the comment style for a file from the builtin tables.
///
/// Special filenames win over extension lookup. Extensionless files fall
/// back to shebang sniffing, which reads the first line of the file.
pub fn builtin_style_for(path: &Path) -> Option<CommentStyle> {
  let file_name = path.file_name().and_then(|name| name.to_str()).unwrap_or("");

  if let Some(style) = special_filename_style(file_name) {
    return Some(style);
  }

  let extension = path
    .extension()
    .and_then(|ext| ext.to_str())
    .map(str::to_lowercase);

  match extension {
    Some(ext) => extension_style(&ext),
    None => {
      let first_line = read_first_line(path)?;
      shebang_style(&first_line)
    }
  }
}

/// Comment styles for well-known filenames that carry no usable extension.
fn special_filename_style(file_name: &str) -> Option<CommentStyle> {
  match file_name {
    "Dockerfile" | "Makefile" | "Vagrantfile" | "Rakefile" | "Gemfile" | "Podfile" | "Fastfile"
    | "CMakeLists.txt" => Some(CommentStyle::line("# ")),
    "Jenkinsfile" => Some(CommentStyle::line("// ")),
    _ => None,
  }
}

/// Comment styles by lowercase file extension.
fn extension_style(extension: &str) -> Option<CommentStyle> {
  match extension {
    "sh" | "bash" | "zsh" | "fish" | "py" | "rb" | "pl" | "r" | "yaml" | "yml" | "toml" | "cmake" => {
      Some(CommentStyle::line("# "))
    }
    "go" | "js" | "jsx" | "ts" | "tsx" | "c" | "cpp" | "cc" | "cxx" | "h" | "hpp" | "hh" | "hxx" | "java"
    | "scala" | "kt" | "swift" | "cs" | "rs" | "php" | "m" | "mm" | "gradle" | "groovy" | "scss" | "sass"
    | "less" => Some(CommentStyle::line("// ")),
    "sql" | "lua" | "hs" | "elm" => Some(CommentStyle::line("-- ")),
    "vim" => Some(CommentStyle::line("\" ")),
    "css" => Some(CommentStyle::block("/*", " * ", "*/")),
    "html" | "xml" | "svg" => Some(CommentStyle::block("<!--", "", "-->")),
    _ => None,
  }
}

/// Infer a style from a shebang line for extensionless files.
///
/// Script interpreters map to `#` comments; node-style interpreters map to
/// `//` comments. Anything else stays unsupported.
fn shebang_style(first_line: &str) -> Option<CommentStyle> {
  if !first_line.starts_with("#!") {
    return None;
  }
  if ["python", "sh", "bash", "ruby"].iter().any(|lang| first_line.contains(lang)) {
    Some(CommentStyle::line("# "))
  } else if ["node", "javascript"].iter().any(|lang| first_line.contains(lang)) {
    Some(CommentStyle::line("// "))
  } else {
    None
  }
}

/// Read the first line of a file, if it is readable.
///
/// Invalid UTF-8 is replaced rather than treated as an error; the line is
/// only used for shebang sniffing.
fn read_first_line(path: &Path) -> Option<String> {
  let file = File::open(path).ok()?;
  let mut reader = BufReader::new(file);
  let mut buf = Vec::new();
  reader.read_until(b'\n', &mut buf).ok()?;
  Some(String::from_utf8_lossy(&buf).trim().to_string())
}
