//! Vim-style key notation (`<C-t>`, `<CR>`, `gg`) and the triggers built on it.

use std::fmt;
use std::str::FromStr;

use crate::error::KeyParseError;

/// A single key, independent of modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        alt: false,
        shift: false,
    };

    pub fn is_empty(self) -> bool {
        !(self.ctrl || self.alt || self.shift)
    }
}

/// A key together with its modifiers, normalised so that equal presses compare
/// equal regardless of how they were written or reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    /// Build a normalised key press.
    ///
    /// Shift is folded into the character for printable keys (`<S-a>` is `A`),
    /// control combinations are case-insensitive (`<C-T>` is `<C-t>`) and
    /// shifted tab becomes [`Key::BackTab`].
    pub fn new(key: Key, mut modifiers: Modifiers) -> Self {
        let key = match key {
            Key::Char(ch) if modifiers.ctrl => {
                modifiers.shift = false;
                Key::Char(ch.to_ascii_lowercase())
            }
            Key::Char(ch) if modifiers.shift => {
                modifiers.shift = false;
                Key::Char(ch.to_ascii_uppercase())
            }
            Key::Tab if modifiers.shift => {
                modifiers.shift = false;
                Key::BackTab
            }
            Key::BackTab => {
                modifiers.shift = false;
                Key::BackTab
            }
            other => other,
        };
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    pub fn ctrl(ch: char) -> Self {
        Self::new(Key::Char(ch), Modifiers::CTRL)
    }

    fn parse_notation(inner: &str) -> Result<Self, KeyParseError> {
        let mut modifiers = Modifiers::default();
        let mut name = inner;
        while name.len() > 2 && name.as_bytes()[1] == b'-' {
            let modifier = name.as_bytes()[0] as char;
            match modifier.to_ascii_uppercase() {
                'C' => modifiers.ctrl = true,
                'M' | 'A' => modifiers.alt = true,
                'S' => modifiers.shift = true,
                _ => {
                    return Err(KeyParseError::UnknownModifier {
                        modifier,
                        notation: format!("<{inner}>"),
                    });
                }
            }
            name = &name[2..];
        }

        let key = named_key(name).ok_or_else(|| KeyParseError::UnknownKey {
            name: name.to_string(),
        })?;
        Ok(Self::new(key, modifiers))
    }
}

fn named_key(name: &str) -> Option<Key> {
    let lower = name.to_ascii_lowercase();
    let key = match lower.as_str() {
        "cr" | "enter" | "return" => Key::Enter,
        "esc" | "escape" => Key::Esc,
        "tab" => Key::Tab,
        "bs" | "backspace" => Key::Backspace,
        "del" | "delete" => Key::Delete,
        "insert" => Key::Insert,
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" => Key::PageUp,
        "pagedown" => Key::PageDown,
        "space" => Key::Char(' '),
        "lt" => Key::Char('<'),
        "bslash" => Key::Char('\\'),
        "bar" => Key::Char('|'),
        _ => {
            let mut chars = name.chars();
            return match (chars.next(), chars.next()) {
                (Some(ch), None) => Some(Key::Char(ch)),
                (Some('f' | 'F'), Some(_)) => lower[1..]
                    .parse::<u8>()
                    .ok()
                    .filter(|n| (1..=12).contains(n))
                    .map(Key::F),
                _ => None,
            };
        }
    };
    Some(key)
}

impl fmt::Display for KeyPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty()
            && let Key::Char(ch) = self.key
            && ch != ' '
            && ch != '<'
        {
            return write!(f, "{ch}");
        }

        f.write_str("<")?;
        if self.modifiers.ctrl {
            f.write_str("C-")?;
        }
        if self.modifiers.alt {
            f.write_str("M-")?;
        }
        if self.modifiers.shift {
            f.write_str("S-")?;
        }
        match self.key {
            Key::Char(' ') => f.write_str("Space")?,
            Key::Char('<') => f.write_str("lt")?,
            Key::Char(ch) => write!(f, "{ch}")?,
            Key::Enter => f.write_str("CR")?,
            Key::Esc => f.write_str("Esc")?,
            Key::Tab => f.write_str("Tab")?,
            Key::BackTab => f.write_str("S-Tab")?,
            Key::Backspace => f.write_str("BS")?,
            Key::Delete => f.write_str("Del")?,
            Key::Insert => f.write_str("Insert")?,
            Key::Up => f.write_str("Up")?,
            Key::Down => f.write_str("Down")?,
            Key::Left => f.write_str("Left")?,
            Key::Right => f.write_str("Right")?,
            Key::Home => f.write_str("Home")?,
            Key::End => f.write_str("End")?,
            Key::PageUp => f.write_str("PageUp")?,
            Key::PageDown => f.write_str("PageDown")?,
            Key::F(n) => write!(f, "F{n}")?,
        }
        f.write_str(">")
    }
}

/// One or more key presses that fire a binding together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeySequence(Vec<KeyPress>);

impl KeySequence {
    pub fn new(keys: Vec<KeyPress>) -> Self {
        Self(keys)
    }

    pub fn keys(&self) -> &[KeyPress] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `pending` is a (possibly complete) prefix of this sequence.
    pub fn starts_with(&self, pending: &[KeyPress]) -> bool {
        self.0.starts_with(pending)
    }
}

impl From<KeyPress> for KeySequence {
    fn from(key: KeyPress) -> Self {
        Self(vec![key])
    }
}

impl FromStr for KeySequence {
    type Err = KeyParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() {
            return Err(KeyParseError::Empty);
        }

        let mut keys = Vec::new();
        let mut offset = 0;
        while offset < input.len() {
            let rest = &input[offset..];
            let Some(ch) = rest.chars().next() else {
                break;
            };

            if ch == '<' {
                let close = rest[1..]
                    .find('>')
                    .ok_or(KeyParseError::Unterminated { position: offset })?;
                let inner = &rest[1..=close];
                keys.push(KeyPress::parse_notation(inner)?);
                offset += close + 2;
            } else {
                keys.push(KeyPress::plain(Key::Char(ch)));
                offset += ch.len_utf8();
            }
        }

        Ok(Self(keys))
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in &self.0 {
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

/// What fires a directory handler: the primary selection, or a key sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Trigger {
    Default,
    Keys(KeySequence),
}

impl Trigger {
    pub const DEFAULT_NAME: &'static str = "default";

    pub fn is_default(&self) -> bool {
        matches!(self, Trigger::Default)
    }
}

impl FromStr for Trigger {
    type Err = KeyParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input == Self::DEFAULT_NAME {
            return Ok(Trigger::Default);
        }
        input.parse().map(Trigger::Keys)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Default => f.write_str(Self::DEFAULT_NAME),
            Trigger::Keys(keys) => write!(f, "{keys}"),
        }
    }
}

/// Input state of the picker a binding is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyMode {
    Insert,
    Normal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(input: &str) -> KeySequence {
        input.parse().expect("valid notation")
    }

    #[test]
    fn parses_control_notation() {
        assert_eq!(seq("<C-t>").keys(), &[KeyPress::ctrl('t')]);
        assert_eq!(seq("<C-T>"), seq("<c-t>"));
    }

    #[test]
    fn parses_plain_multi_key_sequences() {
        let keys = seq("gd");
        assert_eq!(
            keys.keys(),
            &[
                KeyPress::plain(Key::Char('g')),
                KeyPress::plain(Key::Char('d'))
            ]
        );
    }

    #[test]
    fn parses_named_and_function_keys() {
        assert_eq!(seq("<CR>").keys(), &[KeyPress::plain(Key::Enter)]);
        assert_eq!(seq("<F5>").keys(), &[KeyPress::plain(Key::F(5))]);
        assert_eq!(seq("<Space>").keys(), &[KeyPress::plain(Key::Char(' '))]);
        assert_eq!(seq("<S-Tab>").keys(), &[KeyPress::plain(Key::BackTab)]);
        assert_eq!(seq("<S-a>"), seq("A"));
    }

    #[test]
    fn mixes_notation_and_characters() {
        let keys = seq("<M-x>q");
        assert_eq!(keys.len(), 2);
        assert!(keys.keys()[0].modifiers.alt);
        assert_eq!(keys.keys()[1], KeyPress::plain(Key::Char('q')));
    }

    #[test]
    fn rejects_malformed_notation() {
        assert_eq!("".parse::<KeySequence>(), Err(KeyParseError::Empty));
        assert_eq!(
            "a<C-t".parse::<KeySequence>(),
            Err(KeyParseError::Unterminated { position: 1 })
        );
        assert!(matches!(
            "<Hyper>".parse::<KeySequence>(),
            Err(KeyParseError::UnknownKey { .. })
        ));
        assert!(matches!(
            "<X-a>".parse::<KeySequence>(),
            Err(KeyParseError::UnknownModifier { modifier: 'X', .. })
        ));
    }

    #[test]
    fn display_round_trips() {
        for notation in ["<C-t>", "gg", "<CR>", "<M-S-Up>", "<lt>", "<C-Space>", "<F12>"] {
            let parsed = seq(notation);
            assert_eq!(seq(&parsed.to_string()), parsed, "{notation}");
        }
        assert_eq!(seq("<C-t>").to_string(), "<C-t>");
    }

    #[test]
    fn default_trigger_is_recognised() {
        assert_eq!("default".parse::<Trigger>(), Ok(Trigger::Default));
        assert_eq!(
            "<C-t>".parse::<Trigger>(),
            Ok(Trigger::Keys(seq("<C-t>")))
        );
        assert_eq!(Trigger::Default.to_string(), "default");
    }

    #[test]
    fn prefix_matching() {
        let keys = seq("gd");
        assert!(keys.starts_with(&[KeyPress::plain(Key::Char('g'))]));
        assert!(!keys.starts_with(&[KeyPress::plain(Key::Char('d'))]));
    }
}
