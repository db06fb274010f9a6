/// Single-line text field the suggestions complete.
#[derive(Debug, Default)]
pub(crate) struct Input {
  value: String,
}

impl Input {
  pub(crate) fn clear(&mut self) {
    self.value.clear();
  }

  pub(crate) fn delete_backward(&mut self) -> bool {
    self.value.pop().is_some()
  }

  pub(crate) fn insert(&mut self, ch: char) {
    self.value.push(ch);
  }

  pub(crate) fn new(value: String) -> Self {
    Self { value }
  }

  pub(crate) fn set_value(&mut self, value: &str) {
    value.clone_into(&mut self.value);
  }

  pub(crate) fn value(&self) -> &str {
    &self.value
  }
}
