use super::*;

pub(crate) struct App {
  client: Client,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  list_area: Rect,
  state: State,
}

impl App {
  fn click_action(&self, mouse: MouseEvent) -> Action {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
      return Action::None;
    }

    Self::item_at(
      self.list_area,
      self.state.autocomplete().suggestions().offset(),
      mouse.column,
      mouse.row,
    )
    .map_or(Action::None, Action::Click)
  }

  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
      ])
      .split(frame.area());

    let autocomplete = self.state.autocomplete();

    let mut title = format!(" {}", truncate(&self.client.request_url(""), 60));

    if autocomplete.is_loading() {
      title.push(' ');
      title.push_str(LOADING_STATUS);
    } else if !autocomplete.suggestions().is_empty() {
      title.push_str(&format!(
        " [{}/{}]",
        autocomplete.suggestions().len(),
        autocomplete.results().len()
      ));
    }

    title.push(' ');

    let input = Paragraph::new(autocomplete.input().value().to_string()).block(
      Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(if autocomplete.focus() == Focus::Input {
          Style::default().fg(Color::Cyan)
        } else {
          Style::default().fg(Color::DarkGray)
        }),
    );

    frame.render_widget(input, layout[0]);

    if autocomplete.focus() == Focus::Input && !self.state.help_is_visible() {
      let width = saturating_u16(autocomplete.input().value().chars().count());

      let max_x = layout[0].right().saturating_sub(2);

      frame.set_cursor_position((
        layout[0].x.saturating_add(1).saturating_add(width).min(max_x),
        layout[0].y.saturating_add(1),
      ));
    }

    self.list_area = layout[1];

    let suggestions = autocomplete.suggestions();

    let list_items: Vec<ListItem> = suggestions
      .items()
      .iter()
      .map(Self::suggestion_line)
      .map(ListItem::new)
      .collect();

    let mut list_state = ListState::default()
      .with_selected(autocomplete.focus().item())
      .with_offset(suggestions.offset());

    let list = List::new(list_items)
      .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
      .highlight_symbol("");

    frame.render_stateful_widget(list, layout[1], &mut list_state);

    self
      .state
      .autocomplete_mut()
      .suggestions_mut()
      .set_offset(list_state.offset());

    let status = Paragraph::new(self.state.message().to_string())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, layout[2]);

    self.state.help().draw(frame);
  }

  fn execute_effect(&mut self, effect: Effect) {
    match effect {
      Effect::FetchSuggestions { query, request_id } => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        let handle = self.handle.clone();

        handle.spawn(async move {
          let _ = sender.send(Event::Suggestions {
            request_id,
            result: client.fetch_suggestions(&query).await,
          });
        });
      }
    }
  }

  fn item_at(
    area: Rect,
    offset: usize,
    column: u16,
    row: u16,
  ) -> Option<usize> {
    let inside = column >= area.x
      && column < area.right()
      && row >= area.y
      && row < area.bottom();

    inside.then(|| offset.saturating_add(usize::from(row - area.y)))
  }

  pub(crate) fn new(client: Client, autocomplete: Autocomplete) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    let mut state = State::new(autocomplete);

    let sender = event_tx.clone();

    state.autocomplete_mut().set_failure_handler(Box::new(
      move |error: &anyhow::Error| {
        let _ = sender.send(Event::FetchFailed {
          message: format!(
            "Could not load suggestions: {}",
            truncate(&error.to_string(), 80)
          ),
        });
      },
    ));

    Self {
      client,
      event_rx,
      event_tx,
      handle: Handle::current(),
      list_area: Rect::default(),
      state,
    }
  }

  fn process_pending_events(&mut self) {
    self.state.update_transient_message();

    while let Ok(event) = self.event_rx.try_recv() {
      self.state.handle_event(event);
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    if !self.state.autocomplete().input().value().is_empty() {
      let dispatch = self.state.dispatch_action(Action::Refresh);

      for effect in dispatch.effects {
        self.execute_effect(effect);
      }
    }

    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(100))? {
        continue;
      }

      let action = match crossterm_event::read()? {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
          if self.state.help_is_visible() {
            HelpView::handle_key(key)
          } else {
            self.state.autocomplete().handle_key(key)
          }
        }
        CrosstermEvent::Mouse(mouse) if !self.state.help_is_visible() => {
          self.click_action(mouse)
        }
        _ => continue,
      };

      let dispatch = self.state.dispatch_action(action);

      for effect in dispatch.effects {
        self.execute_effect(effect);
      }

      if dispatch.should_exit {
        break;
      }
    }

    Ok(())
  }

  fn suggestion_line(item: &SuggestionItem) -> Line<'static> {
    Line::from(vec![
      Span::raw(BASE_INDENT),
      Span::styled(item.prefix.clone(), Style::default().fg(Color::White)),
      Span::styled(
        item.remainder.clone(),
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      ),
    ])
  }
}
