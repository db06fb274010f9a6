use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Config {
  data_source_url: String,
  max_suggestions: Option<usize>,
  min_input: usize,
  param: String,
}

impl Config {
  pub(crate) const DEFAULT_PARAM: &str = "q";

  pub(crate) fn data_source_url(&self) -> &str {
    &self.data_source_url
  }

  pub(crate) fn max_suggestions(&self) -> Option<usize> {
    self.max_suggestions
  }

  pub(crate) fn min_input(&self) -> usize {
    self.min_input
  }

  /// Validates the data source before anything else is set up. A missing or
  /// empty url is rejected.
  pub(crate) fn new(data_source_url: Option<String>) -> Result<Self, Error> {
    let Some(data_source_url) =
      data_source_url.filter(|url| !url.trim().is_empty())
    else {
      return Err(Error::MissingDataSource);
    };

    if let Err(error) = reqwest::Url::parse(&data_source_url) {
      return Err(Error::InvalidDataSource {
        reason: error.to_string(),
        url: data_source_url,
      });
    }

    Ok(Self {
      data_source_url,
      max_suggestions: None,
      min_input: 0,
      param: Self::DEFAULT_PARAM.into(),
    })
  }

  pub(crate) fn param(&self) -> &str {
    &self.param
  }

  #[must_use]
  pub(crate) fn with_max_suggestions(
    mut self,
    max_suggestions: Option<usize>,
  ) -> Self {
    self.max_suggestions = max_suggestions.filter(|max| *max > 0);
    self
  }

  #[must_use]
  pub(crate) fn with_min_input(mut self, min_input: Option<usize>) -> Self {
    self.min_input = min_input.unwrap_or(0);
    self
  }

  #[must_use]
  pub(crate) fn with_param(mut self, param: Option<String>) -> Self {
    if let Some(param) = param.filter(|param| !param.is_empty()) {
      self.param = param;
    }

    self
  }
}
