//! # Header Module
//!
//! Detection and rewriting of SPDX license headers. This is the core of the
//! tool: given a file's contents and a comment style, it finds any existing
//! SPDX and copyright lines inside a bounded prefix window, decides what (if
//! anything) must change to reach the requested license/author/year, and
//! produces the minimally rewritten contents.
//!
//! The rewrite is idempotent: applying it twice with the same target yields
//! no change on the second pass. Shebang lines and all content outside the
//! touched lines are preserved verbatim, including their line endings.

use std::sync::LazyLock;

use regex::Regex;

use crate::styles::CommentStyle;

/// Lines examined for an existing header, after any leading shebang.
const SCAN_WINDOW: usize = 20;

static SPDX_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"SPDX-License-Identifier:\s*(.+?)\s*(?:-->|\*/|$)").expect("spdx regex must compile")
});

static COPYRIGHT_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"Copyright\s*(?:\(C\)|©)?\s*(\d{4})(?:\s*-\s*(\d{4}))?\s+(.+?)\s*(?:-->|\*/|$)")
    .expect("copyright regex must compile")
});

/// A parsed copyright line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyrightLine {
  /// The 4-digit start year
  pub start_year: String,
  /// The 4-digit end year, when the line carries a range
  pub end_year: Option<String>,
  /// The holder name, trimmed of the closing comment delimiter
  pub holder: String,
}

/// Classifies single lines as SPDX or copyright lines.
///
/// Kept separate from the scan/rewrite logic so the regex behavior can be
/// tested without any file contents or I/O.
#[derive(Debug, Default)]
pub struct LineClassifier;

impl LineClassifier {
  /// Whether the line contains the SPDX marker at all.
  pub fn has_spdx_marker(&self, line: &str) -> bool {
    line.contains("SPDX-License-Identifier")
  }

  /// Extract the declared license id from an SPDX line.
  ///
  /// The id runs from the marker to end-of-line or a closing `-->`/`*/`
  /// delimiter. Returns `None` when the marker is present but nothing
  /// parseable follows it.
  pub fn spdx_id<'a>(&self, line: &'a str) -> Option<&'a str> {
    SPDX_RE
      .captures(line)
      .and_then(|caps| caps.get(1))
      .map(|id| id.as_str())
  }

  /// Parse a copyright line into its year(s) and holder.
  pub fn copyright(&self, line: &str) -> Option<CopyrightLine> {
    let caps = COPYRIGHT_RE.captures(line)?;
    Some(CopyrightLine {
      start_year: caps[1].to_string(),
      end_year: caps.get(2).map(|m| m.as_str().to_string()),
      holder: caps[3].trim().to_string(),
    })
  }
}

/// The SPDX line found during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpdxField {
  /// Line index in the file
  pub index: usize,
  /// The declared id, when parseable
  pub id: Option<String>,
}

/// The copyright line found during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyrightField {
  /// Line index in the file
  pub index: usize,
  /// The parsed line
  pub line: CopyrightLine,
}

/// What a scan of the file's prefix window found.
///
/// Derived per file and discarded after the rewrite decision; nothing here
/// is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderState {
  /// Whether line 0 is a shebang
  pub has_shebang: bool,
  /// The first SPDX line inside the window, if any
  pub spdx: Option<SpdxField>,
  /// The first copyright line inside the window, if any
  pub copyright: Option<CopyrightField>,
}

/// The header the tool is asked to establish.
#[derive(Debug, Clone)]
pub struct HeaderTarget {
  /// SPDX license identifier (e.g. `Apache-2.0`)
  pub license_id: String,
  /// Copyright holder for freshly inserted lines
  pub author: String,
  /// Target copyright year
  pub year: String,
  /// Optional notice block appended after the copyright line on insertion
  pub notice_lines: Vec<String>,
}

/// One line-level edit of the rewrite plan.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Edit {
  /// Replace the line at `index` with `text`
  ReplaceLine { index: usize, text: String },
  /// Insert `text` as a new line directly after `index`
  InsertAfter { index: usize, text: String },
  /// Insert a full header block before `index`; `pad_blank` appends a blank
  /// separator line when the displaced line is non-blank
  InsertHeader {
    index: usize,
    lines: Vec<String>,
    pad_blank: bool,
  },
}

/// Result of processing one file's contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
  /// Whether the file differs from the requested header
  pub needs_update: bool,
  /// The rewritten contents, present exactly when `needs_update` is true
  pub rewritten: Option<String>,
}

impl ProcessOutcome {
  const fn unchanged() -> Self {
    Self {
      needs_update: false,
      rewritten: None,
    }
  }
}

/// Scans file prefixes for existing headers and rewrites them toward a
/// target license, holder, and year.
pub struct HeaderRewriter {
  classifier: LineClassifier,
  target: HeaderTarget,
}

impl HeaderRewriter {
  pub fn new(target: HeaderTarget) -> Self {
    Self {
      classifier: LineClassifier,
      target,
    }
  }

  /// Scan the prefix window of the given lines for an existing header.
  ///
  /// At most [`SCAN_WINDOW`] lines after any shebang are examined, and only
  /// the first SPDX line and first copyright line are tracked; later
  /// duplicates are ignored.
  pub fn scan(&self, lines: &[&str]) -> HeaderState {
    let has_shebang = lines.first().is_some_and(|line| line.starts_with("#!"));
    let start = usize::from(has_shebang);

    let mut state = HeaderState {
      has_shebang,
      ..HeaderState::default()
    };

    for (index, raw) in lines.iter().enumerate().skip(start).take(SCAN_WINDOW) {
      let line = raw.trim_end_matches(['\r', '\n']);
      if state.spdx.is_none() && self.classifier.has_spdx_marker(line) {
        state.spdx = Some(SpdxField {
          index,
          id: self.classifier.spdx_id(line).map(str::to_string),
        });
      }
      if state.copyright.is_none()
        && let Some(parsed) = self.classifier.copyright(line)
      {
        state.copyright = Some(CopyrightField { index, line: parsed });
      }
    }

    state
  }

  /// Decide whether the contents need an update and, if so, rewrite them.
  ///
  /// Empty contents are never modified; the caller reports them separately.
  pub fn process(&self, contents: &str, style: &CommentStyle) -> ProcessOutcome {
    if contents.is_empty() {
      return ProcessOutcome::unchanged();
    }

    let lines: Vec<&str> = contents.split_inclusive('\n').collect();
    let state = self.scan(&lines);
    let edits = self.plan(&state, &lines, style);

    if edits.is_empty() {
      return ProcessOutcome::unchanged();
    }

    ProcessOutcome {
      needs_update: true,
      rewritten: Some(apply_edits(&lines, &edits)),
    }
  }

  /// Compute the ordered line-level edits needed to reach the target.
  ///
  /// An empty plan means the file already complies.
  fn plan(&self, state: &HeaderState, lines: &[&str], style: &CommentStyle) -> Vec<Edit> {
    let mut edits = Vec::new();

    let Some(spdx) = &state.spdx else {
      // No SPDX line at all: insert a complete header after any shebang.
      let index = usize::from(state.has_shebang);
      let pad_blank = lines
        .get(index)
        .is_some_and(|line| !line.trim().is_empty());
      edits.push(Edit::InsertHeader {
        index,
        lines: self.full_header(style),
        pad_blank,
      });
      return edits;
    };

    if let Some(id) = &spdx.id
      && id != &self.target.license_id
    {
      edits.push(Edit::ReplaceLine {
        index: spdx.index,
        text: style.format_line(&format!("SPDX-License-Identifier: {}", self.target.license_id)),
      });
    }

    match &state.copyright {
      Some(found) => {
        if let Some(text) = self.updated_copyright_text(&found.line) {
          edits.push(Edit::ReplaceLine {
            index: found.index,
            text: style.format_line(&text),
          });
        }
      }
      None => {
        edits.push(Edit::InsertAfter {
          index: spdx.index,
          text: style.format_line(&format!(
            "Copyright (C) {}  {}",
            self.target.year, self.target.author
          )),
        });
      }
    }

    edits
  }

  /// The fresh copyright text for an existing line, or `None` when the
  /// stored year(s) already cover the target year.
  ///
  /// A stale single year `Y` becomes the range `Y-target`; a stale range
  /// `A-B` becomes `A-target`. The holder is preserved from the existing
  /// line.
  fn updated_copyright_text(&self, existing: &CopyrightLine) -> Option<String> {
    let current = match &existing.end_year {
      Some(end_year) => end_year,
      None => &existing.start_year,
    };
    if current == &self.target.year {
      return None;
    }
    Some(format!(
      "Copyright (C) {}-{}  {}",
      existing.start_year, self.target.year, existing.holder
    ))
  }

  /// The full header block: SPDX line, copyright line, and the notice block
  /// (separated by one blank comment line) when one is configured.
  fn full_header(&self, style: &CommentStyle) -> Vec<String> {
    let mut content = vec![
      format!("SPDX-License-Identifier: {}", self.target.license_id),
      format!("Copyright (C) {}  {}", self.target.year, self.target.author),
    ];
    if !self.target.notice_lines.is_empty() {
      content.push(String::new());
      content.extend(self.target.notice_lines.iter().cloned());
    }
    style.format_header(&content)
  }
}

/// Apply a rewrite plan to the original lines.
///
/// Untouched lines are emitted verbatim with their original endings; lines
/// the plan writes always end in `\n`. A missing newline on the line before
/// an insertion point is repaired so inserted text never merges into it.
fn apply_edits(lines: &[&str], edits: &[Edit]) -> String {
  let mut out = String::with_capacity(lines.iter().map(|l| l.len()).sum::<usize>() + 256);

  let push_line = |out: &mut String, text: &str| {
    if !out.is_empty() && !out.ends_with('\n') {
      out.push('\n');
    }
    out.push_str(text);
    out.push('\n');
  };

  for (index, raw) in lines.iter().enumerate() {
    if let Some(Edit::InsertHeader {
      lines: header,
      pad_blank,
      ..
    }) = edits.iter().find(
      |edit| matches!(edit, Edit::InsertHeader { index: at, .. } if *at == index),
    ) {
      for line in header {
        push_line(&mut out, line);
      }
      if *pad_blank {
        out.push('\n');
      }
    }

    match edits.iter().find(
      |edit| matches!(edit, Edit::ReplaceLine { index: at, .. } if *at == index),
    ) {
      Some(Edit::ReplaceLine { text, .. }) => push_line(&mut out, text),
      _ => out.push_str(raw),
    }

    if let Some(Edit::InsertAfter { text, .. }) = edits.iter().find(
      |edit| matches!(edit, Edit::InsertAfter { index: at, .. } if *at == index),
    ) {
      push_line(&mut out, text);
    }
  }

  // Header insertion at end-of-file (e.g. a file holding only a shebang).
  if let Some(Edit::InsertHeader { lines: header, .. }) = edits.iter().find(
    |edit| matches!(edit, Edit::InsertHeader { index: at, .. } if *at >= lines.len()),
  ) {
    for line in header {
      push_line(&mut out, line);
    }
  }

  out
}
