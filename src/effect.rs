#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Effect {
  FetchSuggestions { query: String, request_id: u64 },
}
