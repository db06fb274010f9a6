#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum Error {
  #[error("invalid data source url `{url}`: {reason}")]
  InvalidDataSource { reason: String, url: String },
  #[error("no data source available")]
  MissingDataSource,
}
