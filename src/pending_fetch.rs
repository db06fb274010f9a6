#[derive(Debug)]
pub(crate) struct PendingFetch {
  pub(crate) query: String,
  pub(crate) request_id: u64,
}
