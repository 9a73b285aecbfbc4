//! Translation from terminal key events to picker key presses.

use cder_picker_api::{Key, KeyPress, Modifiers};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Convert a crossterm key event. Keys the picker cannot bind yield `None`.
pub(crate) fn key_press(event: KeyEvent) -> Option<KeyPress> {
	let key = match event.code {
		KeyCode::Char(ch) => Key::Char(ch),
		KeyCode::Enter => Key::Enter,
		KeyCode::Esc => Key::Esc,
		KeyCode::Tab => Key::Tab,
		KeyCode::BackTab => Key::BackTab,
		KeyCode::Backspace => Key::Backspace,
		KeyCode::Delete => Key::Delete,
		KeyCode::Insert => Key::Insert,
		KeyCode::Up => Key::Up,
		KeyCode::Down => Key::Down,
		KeyCode::Left => Key::Left,
		KeyCode::Right => Key::Right,
		KeyCode::Home => Key::Home,
		KeyCode::End => Key::End,
		KeyCode::PageUp => Key::PageUp,
		KeyCode::PageDown => Key::PageDown,
		KeyCode::F(n) => Key::F(n),
		_ => return None,
	};
	let modifiers = Modifiers {
		ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
		alt: event.modifiers.contains(KeyModifiers::ALT),
		shift: event.modifiers.contains(KeyModifiers::SHIFT),
	};
	Some(KeyPress::new(key, modifiers))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
		KeyEvent::new(code, modifiers)
	}

	#[test]
	fn ctrl_letters_match_notation() {
		let press = key_press(event(KeyCode::Char('t'), KeyModifiers::CONTROL));
		assert_eq!(press, Some(KeyPress::ctrl('t')));
	}

	#[test]
	fn shifted_letters_are_plain_uppercase() {
		let press = key_press(event(KeyCode::Char('G'), KeyModifiers::SHIFT)).unwrap();
		assert_eq!(press, KeyPress::plain(Key::Char('G')));
	}

	#[test]
	fn shift_tab_is_back_tab() {
		let press = key_press(event(KeyCode::BackTab, KeyModifiers::SHIFT)).unwrap();
		assert_eq!(press, KeyPress::plain(Key::BackTab));
	}

	#[test]
	fn unbindable_keys_are_dropped() {
		assert_eq!(key_press(event(KeyCode::CapsLock, KeyModifiers::NONE)), None);
	}
}
