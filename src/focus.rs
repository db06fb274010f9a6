use super::*;

/// Where keyboard input currently lands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Focus {
  #[default]
  Input,
  Item(usize),
  /// The focused item was removed from the list and nothing took its place.
  None,
}

impl Focus {
  pub(crate) fn handle_key(self, key: KeyEvent) -> Action {
    let modifiers = key.modifiers;

    if key.code == KeyCode::Char('c')
      && modifiers.contains(KeyModifiers::CONTROL)
    {
      return Action::Quit;
    }

    match self {
      Focus::Input | Focus::None => match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::F(1) => Action::ShowHelp,
        KeyCode::Down => Action::FocusNext,
        KeyCode::Up => Action::FocusPrevious,
        KeyCode::Backspace => Action::DeleteBackward,
        KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
          Action::ClearInput
        }
        KeyCode::Char(ch) => {
          if modifiers.contains(KeyModifiers::CONTROL)
            || modifiers.contains(KeyModifiers::ALT)
            || modifiers.contains(KeyModifiers::SUPER)
          {
            Action::None
          } else {
            Action::Insert(ch)
          }
        }
        _ => Action::None,
      },
      Focus::Item(_) => match key.code {
        KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab => Action::Blur,
        KeyCode::F(1) => Action::ShowHelp,
        KeyCode::Down => Action::FocusNext,
        KeyCode::Up => Action::FocusPrevious,
        KeyCode::Enter => Action::Select,
        _ => Action::None,
      },
    }
  }

  pub(crate) fn item(self) -> Option<usize> {
    match self {
      Focus::Item(index) => Some(index),
      Focus::Input | Focus::None => None,
    }
  }

  /// Focus after a down arrow in a list of `len` items. From the input this
  /// enters the list at the top; past the last item it returns to the input.
  pub(crate) fn next(self, len: usize) -> Focus {
    match self {
      Focus::Input | Focus::None if len == 0 => Focus::Input,
      Focus::Input | Focus::None => Focus::Item(0),
      Focus::Item(index) if index.saturating_add(1) < len => {
        Focus::Item(index + 1)
      }
      Focus::Item(_) => Focus::Input,
    }
  }

  /// Mirror of [`Focus::next`] for the up arrow.
  pub(crate) fn previous(self, len: usize) -> Focus {
    match self {
      Focus::Input | Focus::None => {
        len.checked_sub(1).map_or(Focus::Input, Focus::Item)
      }
      Focus::Item(index) => index
        .checked_sub(1)
        .filter(|previous| *previous < len)
        .map_or(Focus::Input, Focus::Item),
    }
  }
}
