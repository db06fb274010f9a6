use super::*;

pub(crate) struct State {
  autocomplete: Autocomplete,
  help: HelpView,
  message: String,
  transient_message: Option<TransientMessage>,
}

impl State {
  pub(crate) fn autocomplete(&self) -> &Autocomplete {
    &self.autocomplete
  }

  pub(crate) fn autocomplete_mut(&mut self) -> &mut Autocomplete {
    &mut self.autocomplete
  }

  pub(crate) fn dispatch_action(&mut self, action: Action) -> Dispatch {
    match action {
      Action::Quit => {
        return Dispatch {
          effects: Vec::new(),
          should_exit: true,
        };
      }
      Action::ShowHelp => self.help.show(&mut self.message),
      Action::HideHelp => self.help.hide(&mut self.message),
      _ => {
        let dispatch = self.autocomplete.dispatch(action);
        self.refresh_status();
        return dispatch;
      }
    }

    Dispatch::default()
  }

  pub(crate) fn handle_event(&mut self, event: Event) {
    match event {
      Event::Suggestions { request_id, result } => {
        self.autocomplete.handle_response(request_id, result);
        self.refresh_status();
      }
      Event::FetchFailed { message } => {
        if !self.help.is_visible() {
          self.set_transient_message(message);
        }
      }
    }
  }

  pub(crate) fn help(&self) -> &HelpView {
    &self.help
  }

  pub(crate) fn help_is_visible(&self) -> bool {
    self.help.is_visible()
  }

  pub(crate) fn message(&self) -> &str {
    &self.message
  }

  pub(crate) fn new(autocomplete: Autocomplete) -> Self {
    Self {
      autocomplete,
      help: HelpView::new(),
      message: INPUT_STATUS.into(),
      transient_message: None,
    }
  }

  fn refresh_status(&mut self) {
    if self.help.is_visible() || self.transient_message.is_some() {
      return;
    }

    self.message = match self.autocomplete.focus() {
      Focus::Item(_) => LIST_STATUS,
      Focus::Input | Focus::None => INPUT_STATUS,
    }
    .into();
  }

  pub(crate) fn set_transient_message(&mut self, message: String) {
    let original = self.transient_message.as_ref().map_or_else(
      || self.message.clone(),
      |transient| transient.original().to_string(),
    );

    self.transient_message =
      Some(TransientMessage::new(message.clone(), original));

    self.message = message;
  }

  pub(crate) fn update_transient_message(&mut self) {
    if let Some(transient) = self.transient_message.clone() {
      if self.message != transient.current() {
        self.transient_message = None;
      } else if transient.is_expired() {
        self.message = transient.original().to_string();
        self.transient_message = None;
        self.refresh_status();
      }
    }
  }
}
