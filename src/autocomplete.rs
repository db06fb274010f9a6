use super::*;

pub(crate) type FailureHandler = Box<dyn FnMut(&anyhow::Error)>;

/// Typeahead controller bound to a single input.
///
/// Fetches are requested as [`Effect`]s and answered through
/// [`Autocomplete::handle_response`]. Every fetch gets a fresh request id and
/// only the most recent one is allowed to touch the result set, so a slow
/// response can never overwrite newer suggestions.
pub(crate) struct Autocomplete {
  config: Config,
  failure_handler: Option<FailureHandler>,
  focus: Focus,
  input: Input,
  next_request_id: u64,
  pending_effects: Vec<Effect>,
  pending_fetch: Option<PendingFetch>,
  query: String,
  results: Vec<Suggestion>,
  suggestions: SuggestionList,
}

impl Autocomplete {
  fn cancel_pending_fetch(&mut self) {
    if let Some(pending) = self.pending_fetch.take() {
      tracing::debug!(
        request_id = pending.request_id,
        query = %pending.query,
        "abandoning suggestion request"
      );
    }
  }

  /// Empties the rendered list. The query and result set are left alone.
  pub(crate) fn clear_suggestions(&mut self) {
    self.suggestions.clear();

    if matches!(self.focus, Focus::Item(_)) {
      self.focus = Focus::None;
    }
  }

  fn click(&mut self, index: usize) {
    if index >= self.suggestions.len() {
      return;
    }

    self.focus = Focus::Item(index);
    self.select_suggestion();
    self.clear_suggestions();
  }

  pub(crate) fn dispatch(&mut self, action: Action) -> Dispatch {
    debug_assert!(
      self.pending_effects.is_empty(),
      "dispatch should start without pending effects"
    );

    match action {
      Action::Insert(ch) => {
        self.focus = Focus::Input;
        self.input.insert(ch);
        self.input_changed();
      }
      Action::DeleteBackward => {
        self.focus = Focus::Input;

        if self.input.delete_backward() {
          self.input_changed();
        }
      }
      Action::ClearInput => {
        self.focus = Focus::Input;
        self.input.clear();
        self.input_changed();
      }
      Action::Refresh => self.input_changed(),
      Action::FocusNext => self.focus = self.focus.next(self.suggestions.len()),
      Action::FocusPrevious => {
        self.focus = self.focus.previous(self.suggestions.len());
      }
      Action::Select => {
        self.select_suggestion();
        self.clear_suggestions();
      }
      Action::Click(index) => self.click(index),
      Action::Blur => {
        self.cancel_pending_fetch();
        self.clear_suggestions();
        self.focus = Focus::Input;
      }
      Action::HideHelp | Action::None | Action::Quit | Action::ShowHelp => {}
    }

    Dispatch {
      effects: std::mem::take(&mut self.pending_effects),
      should_exit: false,
    }
  }

  /// Rebuilds the list from the current result set, capped at the
  /// configured maximum. A focused item stays focused at the same position,
  /// clamped to the new length.
  pub(crate) fn display_suggestions(&mut self) {
    let focused = self.focus.item();

    self.clear_suggestions();

    self.suggestions.render(
      &self.query,
      &self.results,
      self.config.max_suggestions(),
    );

    if let Some(index) = focused {
      self.focus = self
        .suggestions
        .len()
        .checked_sub(1)
        .map_or(Focus::None, |last| Focus::Item(index.min(last)));
    }
  }

  pub(crate) fn fetch_suggestions(&mut self) {
    let request_id = self.next_request_id;

    self.next_request_id = self.next_request_id.wrapping_add(1);

    tracing::debug!(
      request_id,
      query = %self.query,
      "issuing suggestion request"
    );

    self.pending_fetch = Some(PendingFetch {
      query: self.query.clone(),
      request_id,
    });

    self.pending_effects.push(Effect::FetchSuggestions {
      query: self.query.clone(),
      request_id,
    });
  }

  pub(crate) fn focus(&self) -> Focus {
    self.focus
  }

  pub(crate) fn handle_key(&self, key: KeyEvent) -> Action {
    self.focus.handle_key(key)
  }

  pub(crate) fn handle_response(
    &mut self,
    request_id: u64,
    result: Result<Vec<Suggestion>>,
  ) {
    let Some(pending) = self
      .pending_fetch
      .take_if(|pending| pending.request_id == request_id)
    else {
      let current = self
        .pending_fetch
        .as_ref()
        .map(|pending| pending.request_id);

      tracing::debug!(
        request_id,
        current = ?current,
        "dropping stale suggestion response"
      );
      return;
    };

    match result {
      Ok(results) => {
        tracing::info!(
          query = %pending.query,
          count = results.len(),
          "suggestions received"
        );

        if !results.is_empty() {
          self.results = results;
          self.display_suggestions();
        }
      }
      Err(error) => {
        tracing::warn!(
          query = %pending.query,
          "could not fetch suggestions: {error:#}"
        );

        if let Some(handler) = self.failure_handler.as_mut() {
          handler(&error);
        }
      }
    }
  }

  pub(crate) fn input(&self) -> &Input {
    &self.input
  }

  /// Re-derives the query after the input changed and either requests
  /// suggestions or, below the minimum length, clears the list.
  fn input_changed(&mut self) {
    self.set_query();

    if self.query.chars().count() >= self.config.min_input() {
      self.fetch_suggestions();
    } else {
      self.cancel_pending_fetch();
      self.clear_suggestions();
    }
  }

  pub(crate) fn is_loading(&self) -> bool {
    self.pending_fetch.is_some()
  }

  pub(crate) fn new(config: Config, input: Input) -> Self {
    let mut autocomplete = Self {
      config,
      failure_handler: None,
      focus: Focus::Input,
      input,
      next_request_id: 0,
      pending_effects: Vec::new(),
      pending_fetch: None,
      query: String::new(),
      results: Vec::new(),
      suggestions: SuggestionList::default(),
    };

    autocomplete.set_query();

    autocomplete
  }

  pub(crate) fn query(&self) -> &str {
    &self.query
  }

  pub(crate) fn results(&self) -> &[Suggestion] {
    &self.results
  }

  /// Commits the focused suggestion's full label into the input.
  pub(crate) fn select_suggestion(&mut self) {
    let Some(label) = self
      .focus
      .item()
      .and_then(|index| self.suggestions.get(index))
      .map(|item| item.label.clone())
    else {
      return;
    };

    tracing::info!(%label, "suggestion selected");

    self.cancel_pending_fetch();
    self.input.set_value(&label);
    self.set_query();
    self.focus = Focus::Input;
  }

  pub(crate) fn set_failure_handler(&mut self, handler: FailureHandler) {
    self.failure_handler = Some(handler);
  }

  pub(crate) fn set_query(&mut self) -> &str {
    self.input.value().clone_into(&mut self.query);
    &self.query
  }

  pub(crate) fn suggestions(&self) -> &SuggestionList {
    &self.suggestions
  }

  pub(crate) fn suggestions_mut(&mut self) -> &mut SuggestionList {
    &mut self.suggestions
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    std::{cell::RefCell, rc::Rc},
  };

  fn autocomplete(
    max_suggestions: Option<usize>,
    min_input: usize,
  ) -> Autocomplete {
    let config = Config::new(Some("http://localhost/suggest".to_string()))
      .expect("valid config")
      .with_param(Some("q".to_string()))
      .with_max_suggestions(max_suggestions)
      .with_min_input(Some(min_input));

    Autocomplete::new(config, Input::default())
  }

  fn fruit() -> Vec<Suggestion> {
    ["apple", "apricot", "avocado"]
      .into_iter()
      .map(|label| Suggestion {
        label: label.to_string(),
      })
      .collect()
  }

  fn type_text(autocomplete: &mut Autocomplete, text: &str) -> Vec<Effect> {
    let mut effects = Vec::new();

    for ch in text.chars() {
      effects.extend(autocomplete.dispatch(Action::Insert(ch)).effects);
    }

    effects
  }

  fn last_request_id(effects: &[Effect]) -> u64 {
    match effects.last() {
      Some(Effect::FetchSuggestions { request_id, .. }) => *request_id,
      None => panic!("expected a fetch effect"),
    }
  }

  fn with_results(max_suggestions: Option<usize>, query: &str) -> Autocomplete {
    let mut autocomplete = autocomplete(max_suggestions, 0);

    let effects = type_text(&mut autocomplete, query);

    autocomplete.handle_response(last_request_id(&effects), Ok(fruit()));

    autocomplete
  }

  #[test]
  fn starts_on_input_with_empty_list() {
    let autocomplete = autocomplete(None, 0);

    assert_eq!(autocomplete.focus(), Focus::Input);
    assert!(autocomplete.suggestions().is_empty());
    assert_eq!(autocomplete.query(), "");
    assert!(!autocomplete.is_loading());
  }

  #[test]
  fn new_syncs_query_with_initial_input() {
    let config = Config::new(Some("http://localhost/suggest".to_string()))
      .expect("valid config");

    let autocomplete = Autocomplete::new(config, Input::new("pre".to_string()));

    assert_eq!(autocomplete.query(), "pre");
  }

  #[test]
  fn typing_issues_fetch_with_current_query() {
    let mut autocomplete = autocomplete(None, 0);

    let effects = type_text(&mut autocomplete, "ap");

    assert_eq!(effects.len(), 2);
    assert_eq!(
      effects.last(),
      Some(&Effect::FetchSuggestions {
        query: "ap".to_string(),
        request_id: 1,
      })
    );
    assert_eq!(autocomplete.query(), "ap");
    assert!(autocomplete.is_loading());
  }

  #[test]
  fn short_query_skips_fetch_and_clears_list() {
    let mut autocomplete = autocomplete(None, 3);

    let effects = type_text(&mut autocomplete, "ap");

    assert!(effects.is_empty());
    assert!(autocomplete.suggestions().is_empty());
    assert!(!autocomplete.is_loading());
  }

  #[test]
  fn dropping_below_minimum_clears_rendered_list() {
    let mut autocomplete = autocomplete(None, 2);

    let effects = type_text(&mut autocomplete, "ap");
    autocomplete.handle_response(last_request_id(&effects), Ok(fruit()));
    assert_eq!(autocomplete.suggestions().len(), 3);

    let dispatch = autocomplete.dispatch(Action::DeleteBackward);

    assert!(dispatch.effects.is_empty());
    assert!(autocomplete.suggestions().is_empty());
    assert_eq!(autocomplete.query(), "a");
  }

  #[test]
  fn minimum_length_is_inclusive() {
    let mut autocomplete = autocomplete(None, 2);

    let effects = type_text(&mut autocomplete, "ap");

    assert_eq!(effects.len(), 1);
  }

  #[test]
  fn rendered_items_are_capped_by_max_suggestions() {
    let autocomplete = with_results(Some(2), "ap");

    let items = autocomplete.suggestions().items();

    assert_eq!(items.len(), 2);

    assert_eq!(items[0].label, "apple");
    assert_eq!(items[0].prefix, "ap");
    assert_eq!(items[0].remainder, "ple");

    assert_eq!(items[1].label, "apricot");
    assert_eq!(items[1].prefix, "ap");
    assert_eq!(items[1].remainder, "ricot");
  }

  #[test]
  fn unset_max_renders_every_result() {
    let autocomplete = with_results(None, "a");

    assert_eq!(autocomplete.suggestions().len(), 3);
    assert_eq!(autocomplete.results().len(), 3);
  }

  #[test]
  fn arrows_walk_items_and_wrap_to_input() {
    let mut autocomplete = with_results(None, "a");

    autocomplete.dispatch(Action::FocusNext);
    assert_eq!(autocomplete.focus(), Focus::Item(0));

    autocomplete.dispatch(Action::FocusNext);
    assert_eq!(autocomplete.focus(), Focus::Item(1));

    autocomplete.dispatch(Action::FocusNext);
    assert_eq!(autocomplete.focus(), Focus::Item(2));

    autocomplete.dispatch(Action::FocusNext);
    assert_eq!(autocomplete.focus(), Focus::Input);

    autocomplete.dispatch(Action::FocusPrevious);
    assert_eq!(autocomplete.focus(), Focus::Item(2));
  }

  #[test]
  fn navigating_an_empty_list_is_a_no_op() {
    let mut autocomplete = autocomplete(None, 0);

    autocomplete.dispatch(Action::FocusNext);
    assert_eq!(autocomplete.focus(), Focus::Input);

    autocomplete.dispatch(Action::FocusPrevious);
    assert_eq!(autocomplete.focus(), Focus::Input);
  }

  #[test]
  fn enter_commits_label_and_empties_list() {
    let mut autocomplete = with_results(None, "ap");

    autocomplete.dispatch(Action::FocusNext);
    autocomplete.dispatch(Action::FocusNext);

    let dispatch = autocomplete.dispatch(Action::Select);

    assert!(dispatch.effects.is_empty());
    assert_eq!(autocomplete.input().value(), "apricot");
    assert_eq!(autocomplete.query(), "apricot");
    assert!(autocomplete.suggestions().is_empty());
    assert_eq!(autocomplete.focus(), Focus::Input);
  }

  #[test]
  fn selection_keeps_result_set() {
    let mut autocomplete = with_results(None, "ap");

    autocomplete.dispatch(Action::FocusNext);
    autocomplete.dispatch(Action::Select);

    assert_eq!(autocomplete.results().len(), 3);
  }

  #[test]
  fn click_commits_clicked_item() {
    let mut autocomplete = with_results(None, "a");

    autocomplete.dispatch(Action::Click(2));

    assert_eq!(autocomplete.input().value(), "avocado");
    assert_eq!(autocomplete.query(), "avocado");
    assert!(autocomplete.suggestions().is_empty());
  }

  #[test]
  fn click_outside_list_is_ignored() {
    let mut autocomplete = with_results(None, "a");

    autocomplete.dispatch(Action::Click(7));

    assert_eq!(autocomplete.input().value(), "a");
    assert_eq!(autocomplete.suggestions().len(), 3);
  }

  #[test]
  fn select_without_focused_item_does_nothing() {
    let mut autocomplete = with_results(None, "a");

    autocomplete.select_suggestion();

    assert_eq!(autocomplete.input().value(), "a");
    assert_eq!(autocomplete.suggestions().len(), 3);
  }

  #[test]
  fn blur_clears_list_and_returns_to_input() {
    let mut autocomplete = with_results(None, "a");

    autocomplete.dispatch(Action::FocusNext);
    autocomplete.dispatch(Action::Blur);

    assert!(autocomplete.suggestions().is_empty());
    assert_eq!(autocomplete.focus(), Focus::Input);
    assert_eq!(autocomplete.query(), "a");
  }

  #[test]
  fn clearing_twice_leaves_list_empty() {
    let mut autocomplete = with_results(None, "a");

    autocomplete.clear_suggestions();
    autocomplete.clear_suggestions();

    assert!(autocomplete.suggestions().is_empty());
    assert_eq!(autocomplete.query(), "a");
    assert_eq!(autocomplete.results().len(), 3);
  }

  #[test]
  fn clearing_under_focused_item_detaches_focus() {
    let mut autocomplete = with_results(None, "a");

    autocomplete.dispatch(Action::FocusNext);
    autocomplete.clear_suggestions();

    assert_eq!(autocomplete.focus(), Focus::None);
  }

  #[test]
  fn stale_responses_are_discarded() {
    let mut autocomplete = autocomplete(None, 0);

    let first = last_request_id(&type_text(&mut autocomplete, "a"));
    let second = last_request_id(&type_text(&mut autocomplete, "v"));

    autocomplete.handle_response(
      second,
      Ok(vec![Suggestion {
        label: "avocado".to_string(),
      }]),
    );

    autocomplete.handle_response(first, Ok(fruit()));

    assert_eq!(autocomplete.suggestions().len(), 1);
    assert_eq!(autocomplete.suggestions().items()[0].label, "avocado");
  }

  #[test]
  fn response_after_falling_below_minimum_is_ignored() {
    let mut autocomplete = autocomplete(None, 1);

    let request_id = last_request_id(&type_text(&mut autocomplete, "a"));

    autocomplete.dispatch(Action::DeleteBackward);
    autocomplete.handle_response(request_id, Ok(fruit()));

    assert!(autocomplete.suggestions().is_empty());
  }

  #[test]
  fn empty_response_keeps_previous_results() {
    let mut autocomplete = with_results(None, "a");

    let request_id = last_request_id(&type_text(&mut autocomplete, "x"));

    autocomplete.handle_response(request_id, Ok(Vec::new()));

    assert_eq!(autocomplete.results().len(), 3);
    assert_eq!(autocomplete.suggestions().len(), 3);
    assert!(
      autocomplete.suggestions().len() <= autocomplete.results().len()
    );
    assert!(!autocomplete.is_loading());
  }

  #[test]
  fn rebuilding_list_keeps_focused_item() {
    let mut autocomplete = with_results(None, "a");

    let request_id = last_request_id(&type_text(&mut autocomplete, "p"));

    autocomplete.dispatch(Action::FocusNext);
    assert_eq!(autocomplete.focus(), Focus::Item(0));

    autocomplete.handle_response(request_id, Ok(fruit()));
    assert_eq!(autocomplete.focus(), Focus::Item(0));

    let action =
      autocomplete.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
    assert_eq!(action, Action::Blur);

    autocomplete.dispatch(action);
    assert!(autocomplete.suggestions().is_empty());
    assert_eq!(autocomplete.focus(), Focus::Input);
  }

  #[test]
  fn rebuilding_shorter_list_clamps_focus() {
    let mut autocomplete = with_results(None, "a");

    let request_id = last_request_id(&type_text(&mut autocomplete, "v"));

    autocomplete.dispatch(Action::FocusPrevious);
    assert_eq!(autocomplete.focus(), Focus::Item(2));

    autocomplete.handle_response(
      request_id,
      Ok(vec![Suggestion {
        label: "avocado".to_string(),
      }]),
    );

    assert_eq!(autocomplete.focus(), Focus::Item(0));
  }

  #[test]
  fn new_results_replace_rendered_items() {
    let mut autocomplete = with_results(None, "a");

    let request_id = last_request_id(&type_text(&mut autocomplete, "v"));

    autocomplete.handle_response(
      request_id,
      Ok(vec![Suggestion {
        label: "avocado".to_string(),
      }]),
    );

    let items = autocomplete.suggestions().items();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].prefix, "av");
    assert_eq!(items[0].remainder, "ocado");
  }

  #[test]
  fn failures_reach_the_failure_handler() {
    let mut autocomplete = autocomplete(None, 0);

    let failures = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&failures);

    autocomplete.set_failure_handler(Box::new(move |error: &anyhow::Error| {
      sink.borrow_mut().push(error.to_string());
    }));

    let request_id = last_request_id(&type_text(&mut autocomplete, "a"));

    autocomplete.handle_response(request_id, Err(anyhow::anyhow!("boom")));

    assert_eq!(*failures.borrow(), vec!["boom".to_string()]);
    assert!(autocomplete.suggestions().is_empty());
    assert!(!autocomplete.is_loading());
  }

  #[test]
  fn failure_without_handler_is_silent() {
    let mut autocomplete = autocomplete(None, 0);

    let request_id = last_request_id(&type_text(&mut autocomplete, "a"));

    autocomplete.handle_response(request_id, Err(anyhow::anyhow!("boom")));

    assert!(autocomplete.suggestions().is_empty());
  }

  #[test]
  fn late_response_after_selection_is_ignored() {
    let mut autocomplete = with_results(None, "a");

    let request_id = last_request_id(&type_text(&mut autocomplete, "p"));

    autocomplete.dispatch(Action::FocusNext);
    autocomplete.dispatch(Action::Select);
    autocomplete.handle_response(request_id, Ok(fruit()));

    assert!(autocomplete.suggestions().is_empty());
    assert_eq!(autocomplete.input().value(), "apple");
  }

  #[test]
  fn typing_from_detached_focus_refocuses_input() {
    let mut autocomplete = with_results(None, "a");

    autocomplete.dispatch(Action::FocusNext);
    autocomplete.clear_suggestions();

    autocomplete.dispatch(Action::Insert('p'));

    assert_eq!(autocomplete.focus(), Focus::Input);
    assert_eq!(autocomplete.query(), "ap");
  }

  #[test]
  fn refresh_fetches_for_prefilled_input() {
    let config = Config::new(Some("http://localhost/suggest".to_string()))
      .expect("valid config");

    let mut autocomplete =
      Autocomplete::new(config, Input::new("ap".to_string()));

    let dispatch = autocomplete.dispatch(Action::Refresh);

    assert_eq!(
      dispatch.effects,
      vec![Effect::FetchSuggestions {
        query: "ap".to_string(),
        request_id: 0,
      }]
    );
  }
}
