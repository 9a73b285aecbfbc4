//! Single-line query editor.

use cder_picker_api::{Key as PickerKey, KeyPress};
use tui_textarea::{Input, Key, TextArea};

pub(crate) struct QueryInput {
	textarea: TextArea<'static>,
}

impl QueryInput {
	pub fn new() -> Self {
		let mut textarea = TextArea::default();
		textarea.set_cursor_line_style(ratatui::style::Style::default());
		Self { textarea }
	}

	pub fn text(&self) -> &str {
		self.textarea.lines().first().map(String::as_str).unwrap_or_default()
	}

	/// Feed an editing key. Returns `true` when the query text changed.
	pub fn handle(&mut self, press: KeyPress) -> bool {
		let Some(input) = textarea_input(press) else {
			return false;
		};
		let before = self.text().to_owned();
		self.textarea.input(input);
		self.text() != before
	}

	pub fn textarea(&self) -> &TextArea<'static> {
		&self.textarea
	}
}

fn textarea_input(press: KeyPress) -> Option<Input> {
	let ctrl = press.modifiers.ctrl;
	let key = match press.key {
		// Anything that would open a second line.
		PickerKey::Enter | PickerKey::Tab | PickerKey::BackTab => return None,
		PickerKey::Char('m') if ctrl => return None,
		PickerKey::Char(ch) => Key::Char(ch),
		PickerKey::Backspace => Key::Backspace,
		PickerKey::Delete => Key::Delete,
		PickerKey::Left => Key::Left,
		PickerKey::Right => Key::Right,
		PickerKey::Home => Key::Home,
		PickerKey::End => Key::End,
		PickerKey::Esc
		| PickerKey::Insert
		| PickerKey::Up
		| PickerKey::Down
		| PickerKey::PageUp
		| PickerKey::PageDown
		| PickerKey::F(_) => return None,
	};
	Some(Input {
		key,
		ctrl,
		alt: press.modifiers.alt,
		shift: press.modifiers.shift,
	})
}
