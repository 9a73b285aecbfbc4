//! Filtered and ranked view over the entries streamed in by the finder.

use cder_picker_api::{DirEntry, Sorter};
use frizbee::{Options, match_indices, match_list};

pub(crate) struct ResultList {
	entries: Vec<DirEntry>,
	/// Indices into `entries`, best match first.
	visible: Vec<usize>,
	query: String,
	sorter: Sorter,
	/// Position of the highlighted row inside `visible`.
	selected: usize,
}

fn fuzzy_options() -> Options {
	Options {
		prefilter: true,
		max_typos: Some(0),
		sort: false,
		..Options::default()
	}
}

impl ResultList {
	pub fn new(sorter: Sorter) -> Self {
		Self {
			entries: Vec::new(),
			visible: Vec::new(),
			query: String::new(),
			sorter,
			selected: 0,
		}
	}

	pub fn extend(&mut self, batch: Vec<DirEntry>) {
		let start = self.entries.len();
		self.entries.extend(batch);
		if self.query.is_empty() {
			self.visible.extend(start..self.entries.len());
		} else {
			self.refilter();
		}
	}

	pub fn set_query(&mut self, query: &str) {
		let query = query.trim();
		if query == self.query {
			return;
		}
		self.query = query.to_owned();
		self.refilter();
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	fn refilter(&mut self) {
		let keep = self.selected_index();
		self.visible = if self.query.is_empty() {
			(0..self.entries.len()).collect()
		} else {
			match self.sorter {
				Sorter::FuzzyFile => self.rank_fuzzy(),
			}
		};
		self.selected = keep
			.and_then(|index| self.visible.iter().position(|&visible| visible == index))
			.unwrap_or(0);
	}

	fn rank_fuzzy(&self) -> Vec<usize> {
		let haystacks: Vec<&str> = self.entries.iter().map(|entry| entry.ordinal.as_str()).collect();
		let mut matches: Vec<(u16, usize)> = match_list(&self.query, &haystacks, fuzzy_options())
			.into_iter()
			.filter(|found| found.score > 0)
			.map(|found| (found.score, found.index_in_haystack as usize))
			.collect();
		matches.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
		matches.into_iter().map(|(_, index)| index).collect()
	}

	/// Byte offsets in `text` that matched the current query.
	pub fn match_positions(&self, text: &str) -> Vec<usize> {
		if self.query.is_empty() || text.is_empty() {
			return Vec::new();
		}
		match self.sorter {
			Sorter::FuzzyFile => match_indices(&self.query, text, fuzzy_options())
				.map(|found| found.indices)
				.unwrap_or_default(),
		}
	}

	pub fn len(&self) -> usize {
		self.visible.len()
	}

	pub fn total(&self) -> usize {
		self.entries.len()
	}

	/// Visible entries, best first.
	pub fn iter(&self) -> impl Iterator<Item = &DirEntry> {
		self.visible.iter().map(|&index| &self.entries[index])
	}

	pub fn selected_position(&self) -> Option<usize> {
		(!self.visible.is_empty()).then_some(self.selected)
	}

	fn selected_index(&self) -> Option<usize> {
		self.visible.get(self.selected).copied()
	}

	pub fn selected(&self) -> Option<&DirEntry> {
		self.selected_index().map(|index| &self.entries[index])
	}

	pub fn move_by(&mut self, delta: isize) {
		if self.visible.is_empty() {
			return;
		}
		let last = self.visible.len() - 1;
		self.selected = self.selected.saturating_add_signed(delta).min(last);
	}

	pub fn select_first(&mut self) {
		self.selected = 0;
	}

	pub fn select_last(&mut self) {
		self.selected = self.visible.len().saturating_sub(1);
	}
}
