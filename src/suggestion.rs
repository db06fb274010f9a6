use super::*;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub(crate) struct Suggestion {
  pub(crate) label: String,
}
