use cder_picker_api::KeyParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum SettingsError {
    #[error("invalid trigger `{trigger}` in mappings: {source}")]
    InvalidTrigger {
        trigger: String,
        #[source]
        source: KeyParseError,
    },

    #[error("unknown handler `{name}` for trigger `{trigger}` (expected one of: {expected})")]
    UnknownHandler {
        trigger: String,
        name: String,
        expected: String,
    },

    #[error("`{key}` must contain at least one word")]
    EmptyCommand { key: &'static str },
}
