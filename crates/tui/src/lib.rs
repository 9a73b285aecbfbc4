//! A terminal picker host for `cder`.
//!
//! [`TerminalHost`] implements [`PickerHost`](cder_picker_api::PickerHost) on
//! top of ratatui: the finder streams in on a background thread, `frizbee`
//! ranks entries as the query changes, and previews run on a worker thread
//! that only ever answers the most recent request.

mod app;
mod finder;
mod host;
mod input;
mod keymap;
mod preview;
mod process;
mod runtime;
pub mod style;

pub use host::TerminalHost;
pub use style::Theme;
