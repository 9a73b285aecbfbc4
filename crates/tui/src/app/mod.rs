//! Picker state: query, results, preview, and key dispatch.

mod bindings;
mod render;
mod results;

use std::mem;
use std::sync::mpsc::{Receiver, TryRecvError};

use cder_picker_api::{
	DirEntry, HostError, KeyBinding, KeyMode, KeyPress, PickerAction, PickerControl, PickerSpec,
};
use throbber_widgets_tui::ThrobberState;

use self::bindings::{Bound, Builtin, Keymap, Lookup};
use self::results::ResultList;
use crate::finder::{self, FinderEvent};
use crate::input::QueryInput;
use crate::preview::PreviewPane;
use crate::style::Theme;

/// Rows moved per preview scroll step.
const PREVIEW_STEP: i32 = 10;

pub(crate) struct App {
	title: String,
	input: QueryInput,
	mode: KeyMode,
	results: ResultList,
	keymap: Keymap,
	pending: Vec<KeyPress>,
	preview: PreviewPane,
	finder: Option<Receiver<FinderEvent>>,
	throbber: ThrobberState,
	status: Option<String>,
	closed: bool,
	cancelled: bool,
	teardown: Option<Box<dyn FnOnce()>>,
	list_offset: usize,
	theme: Theme,
}

impl App {
	pub fn new(spec: PickerSpec, bindings: Vec<KeyBinding>, theme: Theme) -> Self {
		log::debug!("opening picker {:?} with {} bindings", spec.title, bindings.len());
		Self {
			title: spec.title,
			input: QueryInput::new(),
			mode: KeyMode::Insert,
			results: ResultList::new(spec.sorter),
			keymap: Keymap::new(bindings),
			pending: Vec::new(),
			preview: PreviewPane::new(spec.previewer),
			finder: Some(finder::spawn(spec.finder)),
			throbber: ThrobberState::default(),
			status: None,
			closed: false,
			cancelled: false,
			teardown: None,
			list_offset: 0,
			theme,
		}
	}

	/// Run `teardown` once, the first time the list is closed.
	pub fn on_close(&mut self, teardown: impl FnOnce() + 'static) {
		self.teardown = Some(Box::new(teardown));
	}

	pub fn is_closed(&self) -> bool {
		self.closed
	}

	pub fn was_cancelled(&self) -> bool {
		self.cancelled
	}

	pub fn is_loading(&self) -> bool {
		self.finder.is_some()
	}

	/// Pull finished work from the finder and preview threads.
	pub fn pump(&mut self) {
		while let Some(rx) = self.finder.as_ref() {
			match rx.try_recv() {
				Ok(FinderEvent::Entries(batch)) => self.results.extend(batch),
				Ok(FinderEvent::LineError(err)) => self.status = Some(err),
				Ok(FinderEvent::Done) | Err(TryRecvError::Disconnected) => {
					log::debug!("finder produced {} entries", self.results.total());
					self.finder = None;
				}
				Err(TryRecvError::Empty) => break,
			}
		}
		self.sync_preview();
		self.preview.pump();
		if self.is_loading() {
			self.throbber.calc_next();
		}
	}

	pub fn handle_key(&mut self, press: KeyPress) -> Result<(), HostError> {
		self.pending.push(press);
		match self.keymap.lookup(self.mode, &self.pending) {
			Lookup::Prefix => Ok(()),
			Lookup::Exact(bound) => {
				self.pending.clear();
				self.run(bound)
			}
			Lookup::Unbound => {
				let pending = mem::take(&mut self.pending);
				let Some((first, rest)) = pending.split_first() else {
					return Ok(());
				};
				self.unbound_key(*first);
				// Keys after an abandoned prefix may still form bindings.
				for &press in rest {
					if self.closed {
						break;
					}
					self.handle_key(press)?;
				}
				Ok(())
			}
		}
	}

	fn unbound_key(&mut self, press: KeyPress) {
		if self.mode == KeyMode::Insert && self.input.handle(press) {
			self.results.set_query(self.input.text());
			self.sync_preview();
		}
	}

	fn run(&mut self, bound: Bound) -> Result<(), HostError> {
		match bound {
			Bound::Action(action) => self.invoke(&action),
			Bound::Builtin(builtin) => {
				self.builtin(builtin)?;
				self.sync_preview();
				Ok(())
			}
		}
	}

	fn builtin(&mut self, builtin: Builtin) -> Result<(), HostError> {
		match builtin {
			Builtin::SelectDefault => match self.keymap.default_action().cloned() {
				Some(action) => return self.invoke(&action),
				None => self.close_list(),
			},
			Builtin::Cancel => {
				self.cancelled = true;
				self.close_list();
			}
			Builtin::MoveUp => self.results.move_by(-1),
			Builtin::MoveDown => self.results.move_by(1),
			Builtin::Top => self.results.select_first(),
			Builtin::Bottom => self.results.select_last(),
			Builtin::InsertMode => self.mode = KeyMode::Insert,
			Builtin::NormalMode => self.mode = KeyMode::Normal,
			Builtin::PreviewUp => self.preview.scroll_by(-PREVIEW_STEP),
			Builtin::PreviewDown => self.preview.scroll_by(PREVIEW_STEP),
		}
		Ok(())
	}

	fn invoke(&mut self, action: &PickerAction) -> Result<(), HostError> {
		let result = action(self);
		// An action that failed still leaves no half-open picker behind.
		if result.is_err() {
			self.close_list();
		}
		result.map_err(HostError::Action)
	}

	fn sync_preview(&mut self) {
		if !self.closed {
			self.preview.show(self.results.selected());
		}
	}
}

impl PickerControl for App {
	fn close_list(&mut self) {
		if mem::replace(&mut self.closed, true) {
			return;
		}
		log::debug!("closing picker {:?}", self.title);
		if let Some(teardown) = self.teardown.take() {
			teardown();
		}
	}

	fn selection(&self) -> Option<DirEntry> {
		self.results.selected().cloned()
	}
}
