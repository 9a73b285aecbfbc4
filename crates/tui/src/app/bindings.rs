//! Key lookup for the picker: user bindings layered over the built-in ones.

use cder_picker_api::{Key, KeyBinding, KeyMode, KeyPress, KeySequence, PickerAction, Trigger};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Builtin {
	SelectDefault,
	Cancel,
	MoveUp,
	MoveDown,
	Top,
	Bottom,
	InsertMode,
	NormalMode,
	PreviewUp,
	PreviewDown,
}

#[derive(Clone)]
pub(crate) enum Bound {
	Builtin(Builtin),
	Action(PickerAction),
}

pub(crate) enum Lookup {
	Exact(Bound),
	/// The pending keys start a longer binding.
	Prefix,
	Unbound,
}

struct Entry {
	mode: KeyMode,
	keys: KeySequence,
	bound: Bound,
}

pub(crate) struct Keymap {
	user: Vec<Entry>,
	builtin: Vec<Entry>,
	default_action: Option<PickerAction>,
}

impl Keymap {
	/// Build the keymap from registered bindings. A later binding for the same
	/// keys wins; the last default binding replaces plain selection.
	pub fn new(bindings: Vec<KeyBinding>) -> Self {
		let mut user: Vec<Entry> = Vec::new();
		let mut default_action = None;
		for binding in bindings {
			match binding.trigger {
				Trigger::Default => default_action = Some(binding.action),
				Trigger::Keys(keys) => {
					user.retain(|entry| !(entry.mode == binding.mode && entry.keys == keys));
					user.push(Entry {
						mode: binding.mode,
						keys,
						bound: Bound::Action(binding.action),
					});
				}
			}
		}
		Self {
			user,
			builtin: builtin_entries(),
			default_action,
		}
	}

	pub fn default_action(&self) -> Option<&PickerAction> {
		self.default_action.as_ref()
	}

	pub fn lookup(&self, mode: KeyMode, pending: &[KeyPress]) -> Lookup {
		let in_mode = |entry: &&Entry| entry.mode == mode;
		if let Some(entry) = self.user.iter().filter(in_mode).find(|entry| entry.keys.keys() == pending) {
			return Lookup::Exact(entry.bound.clone());
		}
		let longer = |entry: &&Entry| entry.keys.len() > pending.len() && entry.keys.starts_with(pending);
		if self.user.iter().chain(&self.builtin).filter(in_mode).any(|entry| longer(&entry)) {
			return Lookup::Prefix;
		}
		match self.builtin.iter().filter(in_mode).find(|entry| entry.keys.keys() == pending) {
			Some(entry) => Lookup::Exact(entry.bound.clone()),
			None => Lookup::Unbound,
		}
	}
}

fn builtin_entries() -> Vec<Entry> {
	use Builtin::*;

	let shared = [
		(press(KeyPress::plain(Key::Enter)), SelectDefault),
		(press(KeyPress::ctrl('c')), Cancel),
		(press(KeyPress::plain(Key::Up)), MoveUp),
		(press(KeyPress::plain(Key::Down)), MoveDown),
		(press(KeyPress::ctrl('p')), MoveUp),
		(press(KeyPress::ctrl('n')), MoveDown),
		(press(KeyPress::ctrl('u')), PreviewUp),
		(press(KeyPress::ctrl('d')), PreviewDown),
	];
	let insert_only = [(press(KeyPress::plain(Key::Esc)), NormalMode)];
	let normal_only = [
		(press(KeyPress::plain(Key::Esc)), Cancel),
		(char_keys("q"), Cancel),
		(char_keys("k"), MoveUp),
		(char_keys("j"), MoveDown),
		(char_keys("gg"), Top),
		(char_keys("G"), Bottom),
		(char_keys("i"), InsertMode),
		(char_keys("a"), InsertMode),
	];

	let entry = |mode: KeyMode| {
		move |(keys, builtin): (KeySequence, Builtin)| Entry {
			mode,
			keys,
			bound: Bound::Builtin(builtin),
		}
	};
	shared
		.clone()
		.into_iter()
		.chain(insert_only)
		.map(entry(KeyMode::Insert))
		.chain(shared.into_iter().chain(normal_only).map(entry(KeyMode::Normal)))
		.collect()
}

fn press(key: KeyPress) -> KeySequence {
	KeySequence::from(key)
}

fn char_keys(text: &str) -> KeySequence {
	KeySequence::new(text.chars().map(|ch| KeyPress::plain(Key::Char(ch))).collect())
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use cder_picker_api::PickerControl;

	use super::*;

	fn action() -> PickerAction {
		Arc::new(|_control: &mut dyn PickerControl| -> anyhow::Result<()> { Ok(()) })
	}

	fn keys(notation: &str) -> Vec<KeyPress> {
		notation.parse::<KeySequence>().expect("notation").keys().to_vec()
	}

	fn binding(mode: KeyMode, notation: &str) -> KeyBinding {
		KeyBinding::new(mode, notation.parse().expect("trigger"), action())
	}

	#[test]
	fn builtins_answer_without_user_bindings() {
		let keymap = Keymap::new(Vec::new());
		assert!(matches!(
			keymap.lookup(KeyMode::Insert, &keys("<CR>")),
			Lookup::Exact(Bound::Builtin(Builtin::SelectDefault))
		));
		assert!(matches!(
			keymap.lookup(KeyMode::Insert, &keys("<Esc>")),
			Lookup::Exact(Bound::Builtin(Builtin::NormalMode))
		));
		assert!(matches!(
			keymap.lookup(KeyMode::Normal, &keys("<Esc>")),
			Lookup::Exact(Bound::Builtin(Builtin::Cancel))
		));
		assert!(matches!(keymap.lookup(KeyMode::Insert, &keys("j")), Lookup::Unbound));
	}

	#[test]
	fn user_bindings_shadow_builtins_in_their_mode() {
		let keymap = Keymap::new(vec![binding(KeyMode::Insert, "<C-n>")]);
		assert!(matches!(keymap.lookup(KeyMode::Insert, &keys("<C-n>")), Lookup::Exact(Bound::Action(_))));
		assert!(matches!(
			keymap.lookup(KeyMode::Normal, &keys("<C-n>")),
			Lookup::Exact(Bound::Builtin(Builtin::MoveDown))
		));
	}

	#[test]
	fn multi_key_sequences_wait_for_completion() {
		let keymap = Keymap::new(vec![binding(KeyMode::Normal, "gw")]);
		assert!(matches!(keymap.lookup(KeyMode::Normal, &keys("g")), Lookup::Prefix));
		assert!(matches!(keymap.lookup(KeyMode::Normal, &keys("gw")), Lookup::Exact(Bound::Action(_))));
		assert!(matches!(
			keymap.lookup(KeyMode::Normal, &keys("gg")),
			Lookup::Exact(Bound::Builtin(Builtin::Top))
		));
		assert!(matches!(keymap.lookup(KeyMode::Normal, &keys("gx")), Lookup::Unbound));
	}

	#[test]
	fn default_trigger_is_kept_apart() {
		let keymap = Keymap::new(vec![binding(KeyMode::Insert, "default")]);
		assert!(keymap.default_action().is_some());
		assert!(keymap.user.is_empty());
	}
}
