use super::*;

/// One rendered row of the suggestion list.
///
/// The row shows the query verbatim followed by the rest of the label. The
/// remainder is found by position only: the label loses as many characters
/// from its front as the query has, whatever those characters are.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SuggestionItem {
  pub(crate) label: String,
  pub(crate) prefix: String,
  pub(crate) remainder: String,
}

impl SuggestionItem {
  pub(crate) fn new(query: &str, suggestion: &Suggestion) -> Self {
    Self {
      label: suggestion.label.clone(),
      prefix: query.to_string(),
      remainder: skip_chars(&suggestion.label, query.chars().count())
        .to_string(),
    }
  }
}
