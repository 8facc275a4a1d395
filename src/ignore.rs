//! # Ignore Module
//!
//! This module decides which files are excluded from processing. Exclusion
//! comes from three layers, checked in order:
//!
//! 1. A fixed set of directory names (version control, dependencies, build
//!    artifacts) that are skipped wherever they appear in a path.
//! 2. A fixed set of filename globs (minified assets, generated code, lock
//!    files, formats that never take a header).
//! 3. Rules loaded from an ignore file (`--ignore-file`, `.licenseignore`,
//!    or `.gitignore`), evaluated gitignore-style: the last matching rule
//!    wins, and `!`-prefixed rules re-include previously excluded paths.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use tracing::debug;

/// Directory names that are never descended into or processed.
const EXCLUDE_DIRS: &[&str] = &[
  ".git",
  ".svn",
  ".hg",
  "__pycache__",
  ".pytest_cache",
  ".mypy_cache",
  "node_modules",
  "vendor",
  "third_party",
  "venv",
  ".venv",
  "env",
  ".env",
  "build",
  "dist",
  "target",
  "out",
  ".idea",
  ".vscode",
  ".vs",
  "bin",
  ".air",
];

/// Filename globs that are always skipped.
const EXCLUDE_PATTERNS: &[&str] = &[
  "*.min.js",
  "*.min.css",
  "*.generated.*",
  "*.pb.go",
  "*.pb.cc",
  "*_pb2.py",
  "*.log",
  "*.lock",
  "*.sum",
  "*.json",
  "*.toml",
  "*.yml",
  "*.yaml",
  "*.md",
  "*.svg",
  "*.sh",
  "LICENSE",
  "NOTICE",
  ".gitkeep",
  ".gitignore",
  ".licenseignore",
  ".go-version",
  "go.mod",
  ".pre-commit-config.yaml",
  ".golangci.yml",
];

static EXCLUDE_GLOBS: LazyLock<Vec<glob::Pattern>> = LazyLock::new(|| {
  EXCLUDE_PATTERNS
    .iter()
    .map(|pattern| glob::Pattern::new(pattern).expect("builtin exclude patterns must compile"))
    .collect()
});

/// Whether a path segment names a directory that is always excluded.
pub fn is_excluded_dir(name: &str) -> bool {
  EXCLUDE_DIRS.contains(&name)
}

/// One rule from an ignore file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRule {
  /// The pattern with any `!` prefix and `/` suffix stripped
  pub pattern: String,
  /// Whether a match re-includes the path instead of excluding it
  pub negate: bool,
  /// Whether the rule only matches directory segments (trailing `/`)
  pub dir_only: bool,
}

/// Parse ignore rules from file content.
///
/// Blank lines and `#` comments are skipped. A leading `!` negates the rule;
/// a trailing `/` restricts it to directory segments.
pub fn parse_rules(content: &str) -> Vec<IgnoreRule> {
  let mut rules = Vec::new();
  for line in content.lines() {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
      continue;
    }
    let negate = line.starts_with('!');
    let dir_only = line.ends_with('/');
    let mut pattern = line;
    if negate {
      pattern = &pattern[1..];
    }
    if dir_only {
      pattern = &pattern[..pattern.len() - 1];
    }
    rules.push(IgnoreRule {
      pattern: pattern.to_string(),
      negate,
      dir_only,
    });
  }
  rules
}

/// Pick the ignore file to load: the explicit argument when it exists, else
/// `.licenseignore` in the working directory, else `.gitignore`, else none.
pub fn resolve_ignore_source(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit
    && path.exists()
  {
    return Some(path.to_path_buf());
  }
  for candidate in [".licenseignore", ".gitignore"] {
    let path = cwd.join(candidate);
    if path.exists() {
      return Some(path);
    }
  }
  None
}

/// Load rules from an ignore file, tolerating a missing or unreadable file.
pub fn load_rules(path: Option<&Path>) -> Vec<IgnoreRule> {
  let Some(path) = path else {
    return Vec::new();
  };
  match fs::read_to_string(path) {
    Ok(content) => {
      let rules = parse_rules(&content);
      debug!("Loaded {} ignore rules from {}", rules.len(), path.display());
      rules
    }
    Err(e) => {
      debug!("Could not read ignore file {}: {}", path.display(), e);
      Vec::new()
    }
  }
}

/// A rule with its glob compiled once at construction.
#[derive(Debug, Clone)]
struct CompiledRule {
  pattern: Option<glob::Pattern>,
  raw: String,
  negate: bool,
  dir_only: bool,
}

impl CompiledRule {
  fn compile(rule: &IgnoreRule) -> Self {
    let pattern = glob::Pattern::new(&rule.pattern).ok();
    if pattern.is_none() {
      debug!("Ignore pattern '{}' is not a valid glob, matching literally", rule.pattern);
    }
    Self {
      pattern,
      raw: rule.pattern.clone(),
      negate: rule.negate,
      dir_only: rule.dir_only,
    }
  }

  /// Whether this rule matches the given relative path.
  ///
  /// `dir_segments` are the path's components without the final filename.
  fn matches(&self, rel_path: &str, file_name: &str, dir_segments: &[&str]) -> bool {
    match &self.pattern {
      Some(pattern) => {
        if self.dir_only {
          dir_segments.iter().any(|segment| pattern.matches(segment))
        } else {
          pattern.matches(rel_path)
            || pattern.matches(file_name)
            || dir_segments.iter().any(|segment| pattern.matches(segment))
        }
      }
      None => {
        if self.dir_only {
          dir_segments.contains(&self.raw.as_str())
        } else {
          rel_path == self.raw || file_name == self.raw
        }
      }
    }
  }
}

/// Applies the static exclusions and loaded ignore rules to candidate paths.
pub struct IgnoreEvaluator {
  rules: Vec<CompiledRule>,
  base_dir: PathBuf,
}

impl IgnoreEvaluator {
  /// Create an evaluator over the given rules, resolving paths relative to
  /// `base_dir` (normally the working directory).
  pub fn new(rules: &[IgnoreRule], base_dir: PathBuf) -> Self {
    Self {
      rules: rules.iter().map(CompiledRule::compile).collect(),
      base_dir,
    }
  }

  /// Whether the given file is excluded from processing.
  pub fn should_skip(&self, path: &Path) -> bool {
    let has_excluded_segment = path.components().any(|component| {
      matches!(component, Component::Normal(name) if name.to_str().is_some_and(is_excluded_dir))
    });
    if has_excluded_segment {
      return true;
    }

    let file_name = path.file_name().and_then(|name| name.to_str()).unwrap_or("");
    if EXCLUDE_GLOBS.iter().any(|pattern| pattern.matches(file_name)) {
      return true;
    }

    if self.rules.is_empty() {
      return false;
    }

    let rel_path = self.relative_path(path);
    let mut dir_segments: Vec<&str> = rel_path.split('/').collect();
    dir_segments.pop();

    // Last matching rule wins: fold the rules carrying the running decision.
    let mut skip = false;
    for rule in &self.rules {
      if rule.matches(&rel_path, file_name, &dir_segments) {
        skip = !rule.negate;
      }
    }
    skip
  }

  /// The path relative to the base directory, with `/` separators.
  fn relative_path(&self, path: &Path) -> String {
    let rel = if path.is_absolute() {
      path
        .strip_prefix(&self.base_dir)
        .map(Path::to_path_buf)
        .ok()
        .or_else(|| pathdiff::diff_paths(path, &self.base_dir))
        .unwrap_or_else(|| path.to_path_buf())
    } else {
      path
        .strip_prefix(".")
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
    };
    rel.to_string_lossy().replace('\\', "/")
  }
}
