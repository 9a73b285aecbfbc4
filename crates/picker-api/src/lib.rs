//! Interfaces shared between the `cder` glue and the picker hosts that render it.
//!
//! The glue never talks to a terminal or spawns a process itself. Everything it
//! needs from the outside world goes through [`PickerHost`]: spawning the
//! listing command, registering key bindings, showing the list, and (through
//! [`PickerControl`]) closing it and reading the highlighted entry.

pub mod entry;
pub mod error;
pub mod host;
pub mod keys;

pub use entry::{DirEntry, HighlightSpan};
pub use error::{HostError, KeyParseError};
pub use host::{
    EntryMaker, Finder, FinderEntries, KeyBinding, LineStream, PickerAction, PickerControl,
    PickerHost, PickerSpec, PreviewCommandFn, Previewer, Sorter,
};
pub use keys::{Key, KeyMode, KeyPress, KeySequence, Modifiers, Trigger};
