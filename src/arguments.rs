use super::*;

#[derive(Debug, Parser)]
#[command(
  name = "autocomplete",
  about = "Typeahead search over a remote suggestion endpoint",
  version
)]
pub(crate) struct Arguments {
  /// Pre-filled input value.
  #[arg(long)]
  pub(crate) initial: Option<String>,
  /// Write logs to this file.
  #[arg(long, env = "AUTOCOMPLETE_LOG_FILE")]
  pub(crate) log_file: Option<PathBuf>,
  /// Cap on the number of rendered suggestions, 0 shows all of them.
  #[arg(long, env = "AUTOCOMPLETE_MAX_SUGGESTIONS")]
  pub(crate) max_suggestions: Option<usize>,
  /// Minimum query length before suggestions are requested.
  #[arg(long, env = "AUTOCOMPLETE_MIN_INPUT")]
  pub(crate) min_input: Option<usize>,
  /// Query-string key the current query is sent under.
  #[arg(long, env = "AUTOCOMPLETE_PARAM")]
  pub(crate) param: Option<String>,
  /// Suggestion endpoint, queried as `{url}?{param}={query}`.
  #[arg(long, env = "AUTOCOMPLETE_URL")]
  pub(crate) url: Option<String>,
}

impl Arguments {
  pub(crate) fn config(&self) -> Result<Config, Error> {
    Ok(
      Config::new(self.url.clone())?
        .with_param(self.param.clone())
        .with_max_suggestions(self.max_suggestions)
        .with_min_input(self.min_input),
    )
  }
}
