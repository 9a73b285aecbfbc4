//! The capability set a picker host offers to the glue.

use std::fmt;
use std::io;
use std::sync::Arc;

use crate::entry::DirEntry;
use crate::error::HostError;
use crate::keys::{KeyMode, Trigger};

/// Lines produced by a spawned process, in the order they were written.
pub type LineStream = Box<dyn Iterator<Item = io::Result<String>> + Send>;

/// Turns one raw output line into an entry; `None` skips the line.
pub type EntryMaker = dyn Fn(&str) -> Option<DirEntry> + Send + Sync;

/// Builds the argv that previews an entry.
pub type PreviewCommandFn = dyn Fn(&DirEntry) -> anyhow::Result<Vec<String>> + Send + Sync;

/// Callback run when a bound key (or the default selection) fires.
pub type PickerAction = Arc<dyn Fn(&mut dyn PickerControl) -> anyhow::Result<()> + Send + Sync>;

/// Operations available on an open picker.
pub trait PickerControl {
    /// Close the list UI. Closing twice is a no-op.
    fn close_list(&mut self);

    /// The currently highlighted entry.
    ///
    /// Hosts must keep answering with the last highlighted entry after
    /// [`close_list`](Self::close_list) so that actions can close first and
    /// read afterwards.
    fn selection(&self) -> Option<DirEntry>;
}

/// A host that can spawn processes, bind keys, and show a filterable list.
pub trait PickerHost: PickerControl {
    /// Spawn `argv` and stream its standard output line by line.
    fn spawn_process(&mut self, argv: &[String]) -> Result<LineStream, HostError>;

    /// Register a binding for the next [`show_list`](Self::show_list) call.
    ///
    /// A binding with [`Trigger::Default`] replaces the host's own default
    /// selection action.
    fn register_key_binding(&mut self, binding: KeyBinding);

    /// Show the picker and block until it is closed or cancelled.
    fn show_list(&mut self, spec: PickerSpec) -> Result<(), HostError>;
}

#[derive(Clone)]
pub struct KeyBinding {
    pub mode: KeyMode,
    pub trigger: Trigger,
    pub action: PickerAction,
}

impl KeyBinding {
    pub fn new(mode: KeyMode, trigger: Trigger, action: PickerAction) -> Self {
        Self {
            mode,
            trigger,
            action,
        }
    }
}

impl fmt::Debug for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyBinding")
            .field("mode", &self.mode)
            .field("trigger", &self.trigger)
            .finish_non_exhaustive()
    }
}

/// Data source of the picker: a process output stream plus the entry maker
/// applied to each line.
pub struct Finder {
    lines: LineStream,
    entry_maker: Arc<EntryMaker>,
}

impl Finder {
    pub fn new(lines: LineStream, entry_maker: Arc<EntryMaker>) -> Self {
        Self { lines, entry_maker }
    }

    /// Consume the finder, yielding entries as the underlying lines arrive.
    pub fn entries(self) -> FinderEntries {
        FinderEntries {
            lines: self.lines,
            entry_maker: self.entry_maker,
        }
    }
}

impl fmt::Debug for Finder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Finder").finish_non_exhaustive()
    }
}

pub struct FinderEntries {
    lines: LineStream,
    entry_maker: Arc<EntryMaker>,
}

impl Iterator for FinderEntries {
    type Item = io::Result<DirEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.lines.next()? {
                Ok(line) => {
                    if let Some(entry) = (self.entry_maker)(&line) {
                        return Some(Ok(entry));
                    }
                }
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

#[derive(Clone, Default)]
pub enum Previewer {
    /// Run the argv built for the highlighted entry and show its output.
    Command(Arc<PreviewCommandFn>),
    #[default]
    Disabled,
}

impl Previewer {
    pub fn command<F>(build: F) -> Self
    where
        F: Fn(&DirEntry) -> anyhow::Result<Vec<String>> + Send + Sync + 'static,
    {
        Previewer::Command(Arc::new(build))
    }

    /// The argv for `entry`, or `None` when previews are disabled.
    pub fn argv_for(&self, entry: &DirEntry) -> Option<anyhow::Result<Vec<String>>> {
        match self {
            Previewer::Command(build) => Some(build(entry)),
            Previewer::Disabled => None,
        }
    }
}

impl fmt::Debug for Previewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Previewer::Command(_) => f.write_str("Previewer::Command(..)"),
            Previewer::Disabled => f.write_str("Previewer::Disabled"),
        }
    }
}

/// Ranking applied to entries while the user types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sorter {
    /// The host's fuzzy matcher over entry ordinals.
    #[default]
    FuzzyFile,
}

#[derive(Debug)]
pub struct PickerSpec {
    pub title: String,
    pub finder: Finder,
    pub previewer: Previewer,
    pub sorter: Sorter,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(lines: &[&str]) -> LineStream {
        let lines: Vec<io::Result<String>> = lines.iter().map(|l| Ok(l.to_string())).collect();
        Box::new(lines.into_iter())
    }

    #[test]
    fn finder_skips_lines_the_maker_rejects() {
        let maker: Arc<EntryMaker> = Arc::new(|line: &str| {
            (!line.is_empty()).then(|| DirEntry::new(line))
        });
        let finder = Finder::new(stream(&["/a", "", "/b"]), maker);
        let values: Vec<String> = finder
            .entries()
            .map(|entry| entry.expect("line").value)
            .collect();
        assert_eq!(values, ["/a", "/b"]);
    }

    #[test]
    fn finder_forwards_read_errors() {
        let lines: Vec<io::Result<String>> = vec![
            Ok("/a".into()),
            Err(io::Error::new(io::ErrorKind::InvalidData, "bad utf-8")),
        ];
        let maker: Arc<EntryMaker> = Arc::new(|line: &str| Some(DirEntry::new(line)));
        let mut entries = Finder::new(Box::new(lines.into_iter()), maker).entries();
        assert!(entries.next().expect("first").is_ok());
        assert!(entries.next().expect("second").is_err());
        assert!(entries.next().is_none());
    }

    #[test]
    fn disabled_previewer_builds_nothing() {
        assert!(Previewer::Disabled.argv_for(&DirEntry::new("/a")).is_none());
        let previewer = Previewer::command(|entry| Ok(vec![entry.value.clone()]));
        let argv = previewer
            .argv_for(&DirEntry::new("/a"))
            .expect("enabled")
            .expect("built");
        assert_eq!(argv, ["/a"]);
    }
}
