//! Turns coloured pager output into styled ratatui text.

use std::iter::Peekable;
use std::mem;
use std::str::Chars;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

const ESC: char = '\u{1b}';
const BEL: char = '\u{7}';

/// Convert `input` into [`Text`], keeping SGR styling and dropping every other
/// escape or control sequence.
pub(crate) fn to_text(input: &str) -> Text<'static> {
	let mut builder = TextBuilder::default();
	let mut chars = input.chars().peekable();

	while let Some(ch) = chars.next() {
		match ch {
			ESC => builder.escape(&mut chars),
			'\n' => builder.newline(),
			'\t' => builder.pending.push_str("    "),
			ch if ch.is_control() => {}
			ch => builder.pending.push(ch),
		}
	}

	builder.finish()
}

#[derive(Default)]
struct TextBuilder {
	lines: Vec<Line<'static>>,
	spans: Vec<Span<'static>>,
	pending: String,
	style: Style,
}

impl TextBuilder {
	fn flush(&mut self) {
		if !self.pending.is_empty() {
			self.spans.push(Span::styled(mem::take(&mut self.pending), self.style));
		}
	}

	fn newline(&mut self) {
		self.flush();
		self.lines.push(Line::from(mem::take(&mut self.spans)));
	}

	fn finish(mut self) -> Text<'static> {
		self.flush();
		if !self.spans.is_empty() {
			self.lines.push(Line::from(self.spans));
		}
		Text::from(self.lines)
	}

	fn escape(&mut self, chars: &mut Peekable<Chars<'_>>) {
		match chars.next() {
			Some('[') => {
				let mut params = String::new();
				for next in chars.by_ref() {
					if ('@'..='~').contains(&next) {
						if next == 'm' {
							self.flush();
							self.style = apply_sgr(self.style, &params);
						}
						return;
					}
					params.push(next);
				}
			}
			Some(']') => skip_until_terminator(chars, true),
			Some('P' | 'X' | '^' | '_') => skip_until_terminator(chars, false),
			// Charset designations carry one more byte.
			Some('(' | ')' | '*' | '+') => {
				chars.next();
			}
			_ => {}
		}
	}
}

fn skip_until_terminator(chars: &mut Peekable<Chars<'_>>, bell_ends: bool) {
	while let Some(next) = chars.next() {
		if bell_ends && next == BEL {
			return;
		}
		if next == ESC && chars.next_if_eq(&'\\').is_some() {
			return;
		}
	}
}

fn apply_sgr(mut style: Style, params: &str) -> Style {
	let codes: Vec<u16> = params
		.split([';', ':'])
		.map(|code| code.parse().unwrap_or(0))
		.collect();
	let mut codes = codes.into_iter();

	while let Some(code) = codes.next() {
		style = match code {
			0 => Style::reset(),
			1 => style.add_modifier(Modifier::BOLD),
			2 => style.add_modifier(Modifier::DIM),
			3 => style.add_modifier(Modifier::ITALIC),
			4 => style.add_modifier(Modifier::UNDERLINED),
			5 => style.add_modifier(Modifier::SLOW_BLINK),
			7 => style.add_modifier(Modifier::REVERSED),
			9 => style.add_modifier(Modifier::CROSSED_OUT),
			22 => style.remove_modifier(Modifier::BOLD | Modifier::DIM),
			23 => style.remove_modifier(Modifier::ITALIC),
			24 => style.remove_modifier(Modifier::UNDERLINED),
			25 => style.remove_modifier(Modifier::SLOW_BLINK),
			27 => style.remove_modifier(Modifier::REVERSED),
			29 => style.remove_modifier(Modifier::CROSSED_OUT),
			30..=37 => style.fg(palette(code - 30)),
			38 => match extended_color(&mut codes) {
				Some(color) => style.fg(color),
				None => style,
			},
			39 => style.fg(Color::Reset),
			40..=47 => style.bg(palette(code - 40)),
			48 => match extended_color(&mut codes) {
				Some(color) => style.bg(color),
				None => style,
			},
			49 => style.bg(Color::Reset),
			90..=97 => style.fg(palette(code - 90 + 8)),
			100..=107 => style.bg(palette(code - 100 + 8)),
			_ => style,
		};
	}
	style
}

fn extended_color(codes: &mut impl Iterator<Item = u16>) -> Option<Color> {
	match codes.next()? {
		5 => Some(Color::Indexed(byte(codes.next()?))),
		2 => {
			let (r, g, b) = (codes.next()?, codes.next()?, codes.next()?);
			Some(Color::Rgb(byte(r), byte(g), byte(b)))
		}
		_ => None,
	}
}

fn byte(value: u16) -> u8 {
	u8::try_from(value).unwrap_or(u8::MAX)
}

fn palette(index: u16) -> Color {
	match index {
		0 => Color::Black,
		1 => Color::Red,
		2 => Color::Green,
		3 => Color::Yellow,
		4 => Color::Blue,
		5 => Color::Magenta,
		6 => Color::Cyan,
		7 => Color::Gray,
		8 => Color::DarkGray,
		9 => Color::LightRed,
		10 => Color::LightGreen,
		11 => Color::LightYellow,
		12 => Color::LightBlue,
		13 => Color::LightMagenta,
		14 => Color::LightCyan,
		_ => Color::White,
	}
}
