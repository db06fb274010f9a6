use super::*;

#[derive(Debug, Default)]
pub(crate) struct SuggestionList {
  items: Vec<SuggestionItem>,
  offset: usize,
}

impl SuggestionList {
  pub(crate) fn clear(&mut self) {
    self.items.clear();
    self.offset = 0;
  }

  pub(crate) fn get(&self, index: usize) -> Option<&SuggestionItem> {
    self.items.get(index)
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub(crate) fn items(&self) -> &[SuggestionItem] {
    &self.items
  }

  pub(crate) fn len(&self) -> usize {
    self.items.len()
  }

  pub(crate) fn offset(&self) -> usize {
    if self.items.is_empty() {
      0
    } else {
      self.offset.min(self.items.len().saturating_sub(1))
    }
  }

  /// Rebuilds the list from `results`, showing at most `limit` of them.
  pub(crate) fn render(
    &mut self,
    query: &str,
    results: &[Suggestion],
    limit: Option<usize>,
  ) {
    self.clear();

    let count = limit.map_or(results.len(), |limit| limit.min(results.len()));

    self.items.extend(
      results
        .iter()
        .take(count)
        .map(|suggestion| SuggestionItem::new(query, suggestion)),
    );
  }

  pub(crate) fn set_offset(&mut self, offset: usize) {
    if self.items.is_empty() {
      self.offset = 0;
    } else {
      let max_offset = self.items.len().saturating_sub(1);
      self.offset = offset.min(max_offset);
    }
  }
}
