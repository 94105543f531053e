//! Match highlighting for ranked results.
//!
//! Highlights are returned as text segments flagged as matching or not, so the
//! presentation layer decides how to render emphasis.

use crate::record::{RecordField, SearchRecord};
use crate::searchers::tokenizer::fold_graphemes;
use crate::types::SearchResult;
use serde::{Deserialize, Serialize};

/// A run of text that either matches the query or does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
  pub text: String,
  pub is_match: bool,
}

impl Segment {
  fn plain(text: &str) -> Self {
    Self {
      text: text.to_string(),
      is_match: false,
    }
  }

  fn matched(text: &str) -> Self {
    Self {
      text: text.to_string(),
      is_match: true,
    }
  }
}

/// One matched field split into segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightedField {
  pub field: RecordField,
  pub segments: Vec<Segment>,
}

impl HighlightedField {
  /// Joins the segments, wrapping matches in `open` and `close`.
  pub fn render(&self, open: &str, close: &str) -> String {
    let mut out = String::new();
    for segment in &self.segments {
      if segment.is_match {
        out.push_str(open);
        out.push_str(&segment.text);
        out.push_str(close);
      } else {
        out.push_str(&segment.text);
      }
    }
    out
  }

  /// Whether any segment matched.
  pub fn has_match(&self) -> bool {
    self.segments.iter().any(|s| s.is_match)
  }
}

/// A ranked result together with highlights for each matched field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightedResult {
  pub result: SearchResult,
  pub highlights: Vec<HighlightedField>,
}

impl HighlightedResult {
  /// Builds highlights for every matched field of `result`.
  pub fn new(result: SearchResult, query: &str) -> Self {
    let highlights = result
      .matched_fields
      .iter()
      .filter_map(|&field| {
        let value = result.item.field_value(field)?;
        Some(HighlightedField {
          field,
          segments: highlight_segments(&value, query),
        })
      })
      .collect();

    Self { result, highlights }
  }

  /// A copy of the record with matched text fields replaced by their
  /// rendered markup. The original record is left untouched.
  pub fn highlighted_item(&self, open: &str, close: &str) -> SearchRecord {
    let mut item = self.result.item.clone();
    for highlight in &self.highlights {
      item.set_text(highlight.field, highlight.render(open, close));
    }
    item
  }
}

/// Split `text` into segments marking every case-insensitive, non-overlapping
/// occurrence of `query` (trimmed). Matches never split a grapheme cluster.
pub fn highlight_segments(text: &str, query: &str) -> Vec<Segment> {
  let (needle, _) = fold_graphemes(query.trim());
  if needle.is_empty() || text.is_empty() {
    return if text.is_empty() {
      Vec::new()
    } else {
      vec![Segment::plain(text)]
    };
  }

  let (folded, bounds) = fold_graphemes(text);
  let original_offset = |folded_offset: usize| {
    bounds
      .binary_search_by_key(&folded_offset, |&(f, _)| f)
      .ok()
      .map(|i| bounds[i].1)
  };

  let mut segments = Vec::new();
  let mut cursor = 0;
  let mut search_from = 0;

  while let Some(pos) = folded[search_from..].find(needle.as_str()) {
    let start = search_from + pos;
    let end = start + needle.len();

    match (original_offset(start), original_offset(end)) {
      (Some(orig_start), Some(orig_end)) => {
        if orig_start > cursor {
          segments.push(Segment::plain(&text[cursor..orig_start]));
        }
        segments.push(Segment::matched(&text[orig_start..orig_end]));
        cursor = orig_end;
        search_from = end;
      }
      _ => {
        let step = folded[start..].chars().next().map_or(1, char::len_utf8);
        search_from = start + step;
      }
    }
  }

  if cursor < text.len() {
    segments.push(Segment::plain(&text[cursor..]));
  }

  segments
}
