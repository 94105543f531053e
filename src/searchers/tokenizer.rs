//! Query normalization and case folding.

use unicode_segmentation::UnicodeSegmentation;

/// A query prepared once and shared by every record scored against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedQuery {
  /// The trimmed, case-folded full query.
  pub text: String,
  /// `text` split on runs of whitespace.
  pub words: Vec<String>,
  pub case_sensitive: bool,
}

impl PreparedQuery {
  /// Trims `query`, folds case unless `case_sensitive`, and splits it into words.
  pub fn new(query: &str, case_sensitive: bool) -> Self {
    let trimmed = query.trim();
    let text = if case_sensitive {
      trimmed.to_string()
    } else {
      fold_case(trimmed)
    };
    let words = split_words(&text);

    Self {
      text,
      words,
      case_sensitive,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.text.is_empty()
  }

  /// Applies the same case handling to a field value.
  pub fn normalize<'a>(&self, value: &'a str) -> std::borrow::Cow<'a, str> {
    if self.case_sensitive {
      std::borrow::Cow::Borrowed(value)
    } else {
      std::borrow::Cow::Owned(fold_case(value))
    }
  }
}

/// Split text on whitespace runs, dropping empty tokens.
pub fn split_words(text: &str) -> Vec<String> {
  text.split_whitespace().map(str::to_string).collect()
}

/// Lowercase text one grapheme cluster at a time.
///
/// Folding a grapheme never depends on its neighbours, so a folded query is
/// always a substring of a folded value that contains it. Every matcher in the
/// crate folds through here.
pub fn fold_case(text: &str) -> String {
  let mut folded = String::with_capacity(text.len());
  for grapheme in text.graphemes(true) {
    folded.push_str(&grapheme.to_lowercase());
  }
  folded
}

/// [`fold_case`] that also records where each grapheme went.
///
/// Returns the folded text and, for every grapheme boundary, the pair
/// `(folded offset, original offset)`. The last pair marks the end of both
/// strings. Offsets in the folded text that are not in this list do not fall
/// on a grapheme boundary of the original.
pub fn fold_graphemes(text: &str) -> (String, Vec<(usize, usize)>) {
  let mut folded = String::with_capacity(text.len());
  let mut bounds = Vec::new();

  for (offset, grapheme) in text.grapheme_indices(true) {
    bounds.push((folded.len(), offset));
    folded.push_str(&grapheme.to_lowercase());
  }
  bounds.push((folded.len(), text.len()));

  (folded, bounds)
}
