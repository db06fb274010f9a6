use super::*;

pub(crate) enum Event {
  FetchFailed {
    message: String,
  },
  Suggestions {
    request_id: u64,
    result: Result<Vec<Suggestion>>,
  },
}
