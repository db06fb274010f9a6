#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
  Blur,
  ClearInput,
  Click(usize),
  DeleteBackward,
  FocusNext,
  FocusPrevious,
  HideHelp,
  Insert(char),
  None,
  Quit,
  Refresh,
  Select,
  ShowHelp,
}
