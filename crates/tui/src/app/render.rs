use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph, Wrap};
use throbber_widgets_tui::Throbber;
use unicode_width::UnicodeWidthStr;

use cder_picker_api::{DirEntry, KeyMode};

use super::App;
use crate::preview::PreviewContent;

/// Narrower terminals hide the preview pane.
const MIN_PREVIEW_WIDTH: u16 = 60;

impl App {
	pub fn draw(&mut self, frame: &mut Frame) {
		let area = frame.area();
		let (list_area, preview_area) = if self.preview.is_enabled() && area.width >= MIN_PREVIEW_WIDTH {
			let [left, right] =
				Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
			(left, Some(right))
		} else {
			(area, None)
		};

		let [prompt_area, results_area] =
			Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(list_area);
		self.draw_prompt(frame, prompt_area);
		self.draw_results(frame, results_area);
		if let Some(preview_area) = preview_area {
			self.draw_preview(frame, preview_area);
		}
	}

	fn draw_prompt(&mut self, frame: &mut Frame, area: Rect) {
		let mut counts = Vec::new();
		if self.is_loading() {
			counts.push(Throbber::default().throbber_style(self.theme.status).to_symbol_span(&self.throbber));
		}
		counts.push(Span::styled(
			format!("{} / {} ", self.results.len(), self.results.total()),
			self.theme.status,
		));

		let mut block = Block::bordered()
			.border_style(self.theme.border)
			.title(Span::styled(format!(" {} ", self.title), self.theme.title))
			.title(Line::from(counts).right_aligned());
		if let Some(status) = &self.status {
			block = block.title_bottom(Span::styled(format!(" {status} "), self.theme.error));
		}
		let inner = block.inner(area);
		frame.render_widget(block, area);

		let indicator = match self.mode {
			KeyMode::Insert => "> ",
			KeyMode::Normal => "N ",
		};
		let [indicator_area, input_area] =
			Layout::horizontal([Constraint::Length(indicator.width() as u16), Constraint::Min(1)])
				.areas(inner);
		frame.render_widget(Span::styled(indicator, self.theme.prompt), indicator_area);
		frame.render_widget(self.input.textarea(), input_area);
	}

	fn draw_results(&mut self, frame: &mut Frame, area: Rect) {
		let block = Block::bordered().border_style(self.theme.border);
		let inner = block.inner(area);
		frame.render_widget(block, area);

		let height = usize::from(inner.height);
		let selected = self.results.selected_position();
		if let Some(selected) = selected {
			if selected < self.list_offset {
				self.list_offset = selected;
			} else if height > 0 && selected >= self.list_offset + height {
				self.list_offset = selected + 1 - height;
			}
		} else {
			self.list_offset = 0;
		}

		let items: Vec<ListItem> = self
			.results
			.iter()
			.skip(self.list_offset)
			.take(height)
			.map(|entry| ListItem::new(self.entry_line(entry)))
			.collect();
		let list = List::new(items)
			.highlight_style(self.theme.selected)
			.highlight_symbol("> ");
		let mut state = ListState::default().with_selected(selected.map(|index| index - self.list_offset));
		frame.render_stateful_widget(list, inner, &mut state);
	}

	/// Style the entry display: highlight groups first, query matches on top.
	fn entry_line(&self, entry: &DirEntry) -> Line<'static> {
		let text = entry.display.as_str();
		let group_ranges: Vec<(usize, usize, Style)> = entry
			.highlights
			.iter()
			.filter_map(|span| {
				let (start, end) = span.snapped_to(text)?;
				Some((start, end, self.theme.group(span.group)))
			})
			.collect();
		let matched = self.results.match_positions(text);

		let mut spans: Vec<Span<'static>> = Vec::new();
		for (byte, ch) in text.char_indices() {
			let mut style = group_ranges
				.iter()
				.find(|(start, end, _)| (*start..*end).contains(&byte))
				.map_or_else(Style::default, |(_, _, style)| *style);
			if matched.contains(&byte) {
				style = style.patch(self.theme.matched);
			}
			match spans.last_mut() {
				Some(last) if last.style == style => last.content.to_mut().push(ch),
				_ => spans.push(Span::styled(ch.to_string(), style)),
			}
		}
		Line::from(spans)
	}

	fn draw_preview(&self, frame: &mut Frame, area: Rect) {
		let block = Block::bordered()
			.border_style(self.theme.border)
			.title(Span::styled(" Preview ", self.theme.title));
		let paragraph = match &self.preview.content {
			PreviewContent::Text(text) => Paragraph::new(text.clone()).scroll((self.preview.scroll, 0)),
			PreviewContent::Loading => Paragraph::new(Span::styled("Loading…", self.theme.status)),
			PreviewContent::Error(message) => {
				Paragraph::new(Span::styled(message.clone(), self.theme.error)).wrap(Wrap { trim: false })
			}
			PreviewContent::Empty | PreviewContent::Disabled => Paragraph::new(""),
		};
		frame.render_widget(paragraph.block(block), area);
	}
}
