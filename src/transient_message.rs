use super::*;

/// Status line text that reverts to `original` once it expires.
#[derive(Clone, Debug)]
pub(crate) struct TransientMessage {
  current: String,
  expires_at: Instant,
  original: String,
}

impl TransientMessage {
  const LIFETIME: Duration = Duration::from_secs(3);

  pub(crate) fn current(&self) -> &str {
    &self.current
  }

  pub(crate) fn is_expired(&self) -> bool {
    Instant::now() >= self.expires_at
  }

  pub(crate) fn new(current: String, original: String) -> Self {
    Self::with_lifetime(current, original, Self::LIFETIME)
  }

  pub(crate) fn original(&self) -> &str {
    &self.original
  }

  pub(crate) fn with_lifetime(
    current: String,
    original: String,
    lifetime: Duration,
  ) -> Self {
    Self {
      current,
      expires_at: Instant::now() + lifetime,
      original,
    }
  }
}
