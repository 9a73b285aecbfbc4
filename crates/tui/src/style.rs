use ratatui::style::{Color, Modifier, Style};

/// Colours used by the picker.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
	pub border: Style,
	pub title: Style,
	pub prompt: Style,
	/// Matched query characters.
	pub matched: Style,
	/// The highlighted row.
	pub selected: Style,
	/// Entries' `"Directory"` highlight group.
	pub directory: Style,
	pub status: Style,
	pub error: Style,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			border: Style::new().fg(Color::DarkGray),
			title: Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
			prompt: Style::new().fg(Color::Magenta),
			matched: Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
			selected: Style::new().bg(Color::Rgb(50, 50, 70)),
			directory: Style::new().fg(Color::Blue),
			status: Style::new().fg(Color::DarkGray),
			error: Style::new().fg(Color::Red),
		}
	}
}

impl Theme {
	/// Style for an entry highlight group; unknown groups render unstyled.
	#[must_use]
	pub fn group(&self, group: &str) -> Style {
		match group {
			"Directory" => self.directory,
			_ => Style::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn only_directory_groups_are_coloured() {
		let theme = Theme::default();
		assert_eq!(theme.group("Directory"), theme.directory);
		for group in ["Error", "Comment", "directory", ""] {
			assert_eq!(theme.group(group), Style::default(), "{group}");
		}
	}
}
