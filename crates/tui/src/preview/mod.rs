//! Preview pane state.

mod ansi;
mod worker;

use cder_picker_api::{DirEntry, Previewer};
use ratatui::text::Text;

use self::worker::PreviewRuntime;

#[derive(Debug, Clone)]
pub(crate) enum PreviewContent {
	/// Nothing is highlighted, or the command printed nothing.
	Empty,
	Disabled,
	Loading,
	Text(Text<'static>),
	Error(String),
}

pub(crate) struct PreviewPane {
	previewer: Previewer,
	runtime: Option<PreviewRuntime>,
	/// Value of the entry the content belongs to.
	target: Option<String>,
	pub content: PreviewContent,
	pub scroll: u16,
}

impl PreviewPane {
	pub fn new(previewer: Previewer) -> Self {
		let (runtime, content) = match previewer {
			Previewer::Disabled => (None, PreviewContent::Disabled),
			Previewer::Command(_) => (Some(PreviewRuntime::new()), PreviewContent::Empty),
		};
		Self {
			previewer,
			runtime,
			target: None,
			content,
			scroll: 0,
		}
	}

	pub fn is_enabled(&self) -> bool {
		self.runtime.is_some()
	}

	/// Point the pane at `entry`, starting a new preview when it changed.
	pub fn show(&mut self, entry: Option<&DirEntry>) {
		let Some(runtime) = self.runtime.as_mut() else {
			return;
		};
		if self.target.as_deref() == entry.map(|entry| entry.value.as_str()) {
			return;
		}

		self.target = entry.map(|entry| entry.value.clone());
		self.scroll = 0;
		let Some(entry) = entry else {
			runtime.cancel();
			self.content = PreviewContent::Empty;
			return;
		};

		match self.previewer.argv_for(entry) {
			Some(Ok(argv)) => {
				log::trace!("previewing {} with {argv:?}", entry.value);
				runtime.request(argv);
				self.content = PreviewContent::Loading;
			}
			Some(Err(err)) => {
				runtime.cancel();
				self.content = PreviewContent::Error(format!("{err:#}"));
			}
			None => self.content = PreviewContent::Disabled,
		}
	}

	/// Apply finished previews. Returns `true` when the content changed.
	pub fn pump(&mut self) -> bool {
		let Some(runtime) = self.runtime.as_ref() else {
			return false;
		};
		let mut changed = false;
		while let Ok(result) = runtime.try_recv() {
			if runtime.is_current(result.id) {
				self.content = result.content;
				changed = true;
			}
		}
		changed
	}

	pub fn scroll_by(&mut self, delta: i32) {
		let lines = match &self.content {
			PreviewContent::Text(text) => text.lines.len(),
			_ => 0,
		};
		let max = u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX);
		let next = i32::from(self.scroll).saturating_add(delta).clamp(0, i32::from(max));
		self.scroll = u16::try_from(next).unwrap_or(max);
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;

	#[test]
	fn disabled_previewer_never_spawns_work() {
		let mut pane = PreviewPane::new(Previewer::Disabled);
		pane.show(Some(&DirEntry::new("/tmp")));
		assert!(!pane.is_enabled());
		assert!(matches!(pane.content, PreviewContent::Disabled));
	}

	#[test]
	fn command_errors_are_shown_in_place() {
		let previewer = Previewer::command(|_entry: &DirEntry| -> anyhow::Result<Vec<String>> {
			anyhow::bail!("path contains a quote")
		});
		let mut pane = PreviewPane::new(previewer);
		pane.show(Some(&DirEntry::new("/tmp/it's")));
		let PreviewContent::Error(message) = &pane.content else {
			panic!("expected an error");
		};
		assert!(message.contains("quote"));
	}

	#[test]
	fn same_entry_is_not_requested_twice() {
		let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
		let counter = Arc::clone(&calls);
		let previewer = Previewer::command(move |_entry: &DirEntry| -> anyhow::Result<Vec<String>> {
			counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
			Ok(vec!["true".into()])
		});
		let mut pane = PreviewPane::new(previewer);
		let entry = DirEntry::new("/srv");
		pane.show(Some(&entry));
		pane.show(Some(&entry));
		assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);

		pane.show(None);
		assert!(matches!(pane.content, PreviewContent::Empty));
	}

	#[test]
	fn scrolling_is_clamped_to_content() {
		let mut pane = PreviewPane::new(Previewer::Disabled);
		pane.content = PreviewContent::Text(Text::from("a\nb\nc"));
		pane.scroll_by(10);
		assert_eq!(pane.scroll, 2);
		pane.scroll_by(-5);
		assert_eq!(pane.scroll, 0);
	}
}
