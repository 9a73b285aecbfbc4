//! Adapts raw listing output into picker entries.

use std::env;
use std::sync::Arc;

use cder_picker_api::{DirEntry, EntryMaker, HighlightSpan};
use directories::BaseDirs;

use crate::platform::Platform;

/// Nerd-font folder glyph shown in front of every entry.
pub const DIR_ICON: &str = "\u{f07b}";

/// Span covering [`DIR_ICON`] at the start of the display string.
pub const ICON_HIGHLIGHT: HighlightSpan = HighlightSpan::new(1, 3, "Directory");

/// Resolve the home directory prefix stripped from displayed paths.
///
/// Reads `HOME` (`USERPROFILE` on Windows) and falls back to the platform's
/// notion of the home directory when the variable is unset or empty.
pub fn home_prefix(platform: Platform) -> Option<String> {
    env::var(platform.home_var())
        .ok()
        .filter(|value| !value.is_empty())
        .or_else(|| {
            BaseDirs::new().map(|dirs| dirs.home_dir().to_string_lossy().into_owned())
        })
}

/// Remove a leading `prefix` plus separator from `line`.
///
/// Lines outside of `prefix` (including `prefix` itself) pass through
/// unchanged.
pub fn strip_prefix<'a>(line: &'a str, prefix: &str, platform: Platform) -> &'a str {
    let separator = platform.separator();
    let prefix = prefix.trim_end_matches(separator);
    if prefix.is_empty() {
        return line;
    }

    line.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix(separator))
        .unwrap_or(line)
}

/// Build the entry for one line of listing output; blank lines yield `None`.
pub fn make_entry(line: &str, prefix: Option<&str>, platform: Platform) -> Option<DirEntry> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return None;
    }

    let shown = match prefix {
        Some(prefix) => strip_prefix(line, prefix, platform),
        None => line,
    };

    Some(
        DirEntry::new(line)
            .with_display(format!("{DIR_ICON} {shown}"))
            .with_highlight(ICON_HIGHLIGHT),
    )
}

/// The default entry maker, capturing the home prefix once.
pub fn entry_maker(platform: Platform, prefix: Option<String>) -> Arc<EntryMaker> {
    Arc::new(move |line: &str| make_entry(line, prefix.as_deref(), platform))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_home_and_separator() {
        assert_eq!(strip_prefix("/home/u/a", "/home/u", Platform::Unix), "a");
        assert_eq!(
            strip_prefix("/home/u/projects/b", "/home/u/", Platform::Unix),
            "projects/b"
        );
    }

    #[test]
    fn leaves_unrelated_paths_alone() {
        for line in ["/tmp/x", "/home/user/a", "/home/u", "relative/home/u/a"] {
            assert_eq!(strip_prefix(line, "/home/u", Platform::Unix), line);
        }
    }

    #[test]
    fn empty_or_root_prefix_never_strips() {
        assert_eq!(strip_prefix("/tmp/x", "", Platform::Unix), "/tmp/x");
        assert_eq!(strip_prefix("/tmp/x", "/", Platform::Unix), "/tmp/x");
    }

    #[test]
    fn strips_windows_profile() {
        assert_eq!(
            strip_prefix(r"C:\Users\u\docs", r"C:\Users\u", Platform::Windows),
            "docs"
        );
        assert_eq!(
            strip_prefix("/home/u/a", "/home/u", Platform::Windows),
            "/home/u/a"
        );
    }

    #[test]
    fn entries_carry_icon_display_and_full_ordinal() {
        let prefix = Some("/home/u");
        let a = make_entry("/home/u/a", prefix, Platform::Unix).expect("entry");
        let b = make_entry("/home/u/projects/b", prefix, Platform::Unix).expect("entry");

        assert_eq!(a.display, format!("{DIR_ICON} a"));
        assert_eq!(b.display, format!("{DIR_ICON} projects/b"));
        assert_eq!(a.value, "/home/u/a");
        assert_eq!(a.ordinal, "/home/u/a");
        assert_eq!(b.ordinal, "/home/u/projects/b");
        assert_eq!(a.highlights, vec![ICON_HIGHLIGHT]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert!(make_entry("", Some("/home/u"), Platform::Unix).is_none());
        assert!(make_entry("\r", None, Platform::Windows).is_none());
    }

    #[test]
    fn long_paths_are_kept_verbatim() {
        let long = format!("/srv/{}", "x".repeat(4096));
        let entry = make_entry(&long, None, Platform::Unix).expect("entry");
        assert_eq!(entry.value, long);
        assert!(entry.display.ends_with(&long));
    }
}
