use {super::*, anyhow::Context};

#[derive(Clone)]
pub(crate) struct Client {
  client: reqwest::Client,
  data_source_url: String,
  param: String,
}

impl Client {
  pub(crate) async fn fetch_suggestions(
    &self,
    query: &str,
  ) -> Result<Vec<Suggestion>> {
    let url = self.request_url(query);

    tracing::debug!(%url, "requesting suggestions");

    let body = self
      .client
      .get(&url)
      .send()
      .await
      .with_context(|| format!("request to {url} failed"))?
      .error_for_status()?
      .text()
      .await?;

    let suggestions = serde_json::from_str::<Vec<Suggestion>>(&body)
      .with_context(|| format!("malformed suggestions from {url}"))?;

    tracing::debug!(%url, count = suggestions.len(), "received suggestions");

    Ok(suggestions)
  }

  pub(crate) fn new(config: &Config) -> Self {
    Self {
      client: reqwest::Client::new(),
      data_source_url: config.data_source_url().to_string(),
      param: config.param().to_string(),
    }
  }

  /// The query goes out as typed, without percent-encoding.
  pub(crate) fn request_url(&self, query: &str) -> String {
    format!("{}?{}={query}", self.data_source_url, self.param)
  }
}
