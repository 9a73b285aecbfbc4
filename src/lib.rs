//! A directory picker: list directories with an external command, filter them
//! fuzzily, preview the highlighted one, and hand the choice to a handler.
//!
//! The glue in this crate only talks to a [`PickerHost`]; the terminal host in
//! `cder-tui` is one implementation, tests drive it with scripted hosts.

pub mod actions;
pub mod app_dirs;
pub mod command;
pub mod config;
pub mod entry;
pub mod handlers;
pub mod logging;
pub mod picker;
pub mod platform;

pub use cder_picker_api::{DirEntry, PickerControl, PickerHost, Trigger};
pub use command::{CommandError, build_preview_command, quote_entry_value};
pub use config::{CderConfig, DirHandler, Overrides, Title};
pub use handlers::{CwdChange, CwdScope, ShellWorkspace, Workspace};
pub use picker::{Cder, PickerError};
pub use platform::Platform;
