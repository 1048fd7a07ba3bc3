use color_eyre::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use form::{FieldDescriptor, FieldKind, FormComponent};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::action::Action;

/// Interactive editing state on top of a `FormComponent`.
///
/// Responsibilities:
/// - Focus & scroll management
/// - Text editing lifecycle (enter edit, commit, cancel)
/// - Choice cycling and checkbox toggling
/// - Key mapping → `Action`s
///
/// Leaving a field (focus change or committed edit) marks it touched.
#[derive(Default)]
pub struct FormView {
    focused: usize,
    scroll: usize,
    editing: bool,
    input: Input,
    option_cursor: usize,
    last_inner_height: u16,
}

impl FormView {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Accessors used by the renderer --------------------------------------------------------

    pub fn focused_index(&self) -> usize {
        self.focused
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn input_value(&self) -> &str {
        self.input.value()
    }

    pub fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    pub fn set_last_inner_height(&mut self, h: u16) {
        self.last_inner_height = h;
    }

    /// Number of fields that fit in `inner_height` rows.
    pub fn max_visible(inner_height: u16) -> usize {
        let reserve = if inner_height > 8 { 4 } else { 2 };
        (inner_height.saturating_sub(reserve) / 3).max(1) as usize
    }

    /// Visible field bounds (start, end) for the given inner height.
    pub fn visible_bounds(&self, total: usize, inner_height: u16) -> (usize, usize) {
        if total == 0 {
            return (0, 0);
        }
        let start = self.scroll.min(self.focused).min(total.saturating_sub(1));
        let end = (start + Self::max_visible(inner_height)).min(total);
        (start, end)
    }

    /// Ensure the focused field is within the visible window.
    pub fn ensure_visible(&mut self, inner_height: u16) {
        let max_visible = Self::max_visible(inner_height);
        if self.focused < self.scroll {
            self.scroll = self.focused;
        } else if self.focused >= self.scroll + max_visible {
            self.scroll = self.focused + 1 - max_visible;
        }
    }

    /// Back to the first field, not editing.
    pub fn reset(&mut self) {
        *self = Self {
            last_inner_height: self.last_inner_height,
            ..Self::default()
        };
    }

    // --- Navigation / editing helpers ----------------------------------------------------------

    fn current_field<'a>(&self, form: &'a FormComponent) -> Option<&'a FieldDescriptor> {
        form.schema().fields().get(self.focused)
    }

    fn blur(&mut self, form: &mut FormComponent) -> Result<()> {
        if let Some(property) = self.current_field(form).map(|f| f.property.clone()) {
            form.mark_touched(&property)?;
        }
        Ok(())
    }

    fn focus_to(&mut self, form: &mut FormComponent, index: usize) -> Result<()> {
        let count = form.schema().field_count();
        if count == 0 || index == self.focused {
            return Ok(());
        }
        self.blur(form)?;
        self.focused = index.min(count - 1);
        self.option_cursor = 0;
        Ok(())
    }

    fn focus_next(&mut self, form: &mut FormComponent) -> Result<()> {
        let count = form.schema().field_count();
        if count == 0 {
            return Ok(());
        }
        self.focus_to(form, (self.focused + 1) % count)
    }

    fn focus_prev(&mut self, form: &mut FormComponent) -> Result<()> {
        let count = form.schema().field_count();
        if count == 0 {
            return Ok(());
        }
        let prev = if self.focused == 0 {
            count - 1
        } else {
            self.focused - 1
        };
        self.focus_to(form, prev)
    }

    fn start_editing(&mut self, form: &FormComponent) {
        let existing = self
            .current_field(form)
            .and_then(|f| form.control(&f.property))
            .and_then(|c| c.value.as_text())
            .unwrap_or("")
            .to_string();
        self.editing = true;
        self.input = Input::default().with_value(existing);
    }

    fn cancel_editing(&mut self) {
        self.editing = false;
        self.input = Input::default();
    }

    fn commit_editing(&mut self, form: &mut FormComponent) -> Result<()> {
        let value = self.input.value().to_string();
        self.cancel_editing();
        if let Some(property) = self.current_field(form).map(|f| f.property.clone()) {
            form.set_value(&property, value)?;
            form.mark_touched(&property)?;
        }
        Ok(())
    }

    /// Select / radio: move the stored key through the options.
    fn cycle_choice(&mut self, form: &mut FormComponent, dir: i32) -> Result<()> {
        let Some(field) = self.current_field(form) else {
            return Ok(());
        };
        if field.options.is_empty() {
            return Ok(());
        }
        let property = field.property.clone();
        let current = form
            .control(&property)
            .and_then(|c| c.value.as_text())
            .and_then(|v| field.options.iter().position(|o| o.key == v));
        let len = field.options.len() as i32;
        let next = match current {
            Some(idx) => (idx as i32 + dir).rem_euclid(len) as usize,
            None if dir < 0 => field.options.len() - 1,
            None => 0,
        };
        let key = field.options[next].key.clone();
        form.set_value(&property, key)?;
        Ok(())
    }

    fn move_option_cursor(&mut self, form: &FormComponent, dir: i32) {
        let len = self
            .current_field(form)
            .map(|f| f.options.len())
            .unwrap_or(0);
        if len == 0 {
            return;
        }
        self.option_cursor = (self.option_cursor as i32 + dir).rem_euclid(len as i32) as usize;
    }

    fn toggle_option(&mut self, form: &mut FormComponent) -> Result<()> {
        let Some(field) = self.current_field(form) else {
            return Ok(());
        };
        let Some(option) = field.options.get(self.option_cursor).cloned() else {
            return Ok(());
        };
        let property = field.property.clone();
        form.update_checkbox_selection(&property, &option)?;
        Ok(())
    }

    // --- Key handling --------------------------------------------------------------------------

    pub fn handle_key_events(
        &mut self,
        form: &mut FormComponent,
        key: KeyEvent,
    ) -> Result<Option<Action>> {
        if self.editing {
            match key.code {
                KeyCode::Enter => self.commit_editing(form)?,
                KeyCode::Esc => self.cancel_editing(),
                _ => {
                    self.input.handle_event(&Event::Key(key));
                }
            }
            return Ok(Some(Action::Update));
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(match key.code {
                KeyCode::Char('s') => Some(Action::Submit),
                KeyCode::Char('r') => Some(Action::Reset),
                KeyCode::Char('q') | KeyCode::Char('c') => Some(Action::Quit),
                _ => None,
            });
        }

        let kind = self.current_field(form).map(|f| f.kind);
        let action = match key.code {
            KeyCode::Up | KeyCode::BackTab => {
                self.focus_prev(form)?;
                Some(Action::Update)
            }
            KeyCode::Down | KeyCode::Tab => {
                self.focus_next(form)?;
                Some(Action::Update)
            }
            KeyCode::PageDown | KeyCode::PageUp => {
                let jump = Self::max_visible(self.last_inner_height).saturating_sub(1).max(1);
                let last = form.schema().field_count().saturating_sub(1);
                let target = if key.code == KeyCode::PageDown {
                    (self.focused + jump).min(last)
                } else {
                    self.focused.saturating_sub(jump)
                };
                self.focus_to(form, target)?;
                Some(Action::Update)
            }
            KeyCode::Home => {
                self.focus_to(form, 0)?;
                Some(Action::Update)
            }
            KeyCode::End => {
                let last = form.schema().field_count().saturating_sub(1);
                self.focus_to(form, last)?;
                Some(Action::Update)
            }
            KeyCode::Left | KeyCode::Right => {
                let dir = if key.code == KeyCode::Left { -1 } else { 1 };
                match kind {
                    Some(FieldKind::Select | FieldKind::Radio) => {
                        self.cycle_choice(form, dir)?;
                        Some(Action::Update)
                    }
                    Some(FieldKind::Checkbox) => {
                        self.move_option_cursor(form, dir);
                        Some(Action::Update)
                    }
                    _ => None,
                }
            }
            KeyCode::Char(' ') => match kind {
                Some(FieldKind::Checkbox) => {
                    self.toggle_option(form)?;
                    Some(Action::Update)
                }
                Some(FieldKind::Select | FieldKind::Radio) => {
                    self.cycle_choice(form, 1)?;
                    Some(Action::Update)
                }
                _ => None,
            },
            KeyCode::Enter => match kind {
                Some(k) if k.is_textual() => {
                    self.start_editing(form);
                    Some(Action::Update)
                }
                _ => Some(Action::Submit),
            },
            KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        };
        Ok(action)
    }
}
