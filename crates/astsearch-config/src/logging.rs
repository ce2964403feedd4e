use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Format of the diagnostic log written to stderr.
///
/// Search results always go to stdout as plain text; this only affects
/// `tracing` output.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event, with fields flattened.
    Json,
    /// Single-line text, the default for interactive use.
    #[default]
    Compact,
}

/// Error returned when a [`LogFormat`] name is not recognised.
pub type LogFormatParseError = strum::ParseError;
