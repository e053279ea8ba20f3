//! Configuration errors.
//!
//! Composing a key never fails; these errors only surface while building a
//! [`KeyComposer`](crate::KeyComposer) or parsing axis and flag names.

use thiserror::Error;

use crate::Axis;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("axis `{0}` appears more than once in the composition order")]
    DuplicateAxis(Axis),

    #[error("axis `{0}` is missing from the composition order")]
    MissingAxis(Axis),

    #[error("unknown vary-by axis: {0}")]
    UnknownAxis(String),

    #[error("unknown vary-by flag: {0}")]
    UnknownFlag(String),
}
