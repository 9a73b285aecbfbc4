//! Configuration loading: config files, environment and CLI flags folded into
//! a set of [`Overrides`](cder::Overrides).
//!
//! `load` is the entry point used by `main`.

mod errors;
mod loader;
mod raw;
mod sources;

pub(crate) use loader::load;
