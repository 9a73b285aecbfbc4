use cder_picker_api::{
	DirEntry, HostError, KeyBinding, LineStream, PickerControl, PickerHost, PickerSpec,
};

use crate::app::App;
use crate::style::Theme;
use crate::{process, runtime};

/// A [`PickerHost`] that draws the picker in the current terminal.
///
/// Bindings registered with [`register_key_binding`](PickerHost::register_key_binding)
/// apply to the next [`show_list`](PickerHost::show_list) call only.
#[derive(Default)]
pub struct TerminalHost {
	bindings: Vec<KeyBinding>,
	last_selection: Option<DirEntry>,
	theme: Theme,
}

impl TerminalHost {
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_theme(mut self, theme: Theme) -> Self {
		self.theme = theme;
		self
	}
}

impl PickerControl for TerminalHost {
	/// The terminal picker closes itself before `show_list` returns.
	fn close_list(&mut self) {}

	/// Entry highlighted when the last picker closed.
	fn selection(&self) -> Option<DirEntry> {
		self.last_selection.clone()
	}
}

impl PickerHost for TerminalHost {
	fn spawn_process(&mut self, argv: &[String]) -> Result<LineStream, HostError> {
		process::spawn_lines(argv)
	}

	fn register_key_binding(&mut self, binding: KeyBinding) {
		log::trace!("registering {binding:?}");
		self.bindings.push(binding);
	}

	fn show_list(&mut self, spec: PickerSpec) -> Result<(), HostError> {
		let mut app = App::new(spec, std::mem::take(&mut self.bindings), self.theme);
		let result = runtime::run(&mut app);
		self.last_selection = app.selection();
		result
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use cder_picker_api::{KeyMode, PickerAction, Trigger};

	use super::*;

	#[test]
	fn bindings_are_collected_until_shown() {
		let mut host = TerminalHost::new();
		let action: PickerAction = Arc::new(|control: &mut dyn PickerControl| -> anyhow::Result<()> {
			control.close_list();
			Ok(())
		});
		host.register_key_binding(KeyBinding::new(KeyMode::Insert, Trigger::Default, action));
		assert_eq!(host.bindings.len(), 1);
		assert!(host.selection().is_none());
	}

	#[cfg(unix)]
	#[test]
	fn spawns_processes_for_the_finder() {
		let mut host = TerminalHost::new();
		let lines: Vec<String> = host
			.spawn_process(&["echo".to_string(), "/tmp".to_string()])
			.expect("spawn")
			.map(|line| line.expect("line"))
			.collect();
		assert_eq!(lines, ["/tmp"]);
	}
}
