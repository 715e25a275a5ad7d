//! Replay configuration.
//!
//! The defaults reproduce the reference deployment: challenge scalars are
//! drawn with the statistically uniform width of the native field and reply
//! scalars use the field's canonical little-endian encoding. Widths can be
//! overridden per deployment; both sides of the protocol must agree on them.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::{OverflowPolicy, ScalarCodec, MAX_SCALAR_WIDTH};
use crate::field::NativeField;

/// Per-deployment knobs of the transcript engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Bytes squeezed per challenge scalar; `None` picks the uniform width.
    pub challenge_width: Option<usize>,
    /// Bytes absorbed per reply scalar; `None` picks the encoded width.
    pub reply_width: Option<usize>,
    /// Handling of reply encodings that are not below the modulus.
    pub reply_overflow: OverflowPolicy,
    /// Whether [`finish`](crate::arthur::Arthur::finish) tolerates
    /// interactions left unconsumed.
    pub allow_unconsumed: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            challenge_width: None,
            reply_width: None,
            reply_overflow: OverflowPolicy::Reject,
            allow_unconsumed: false,
        }
    }
}

impl ReplayConfig {
    /// Checks the configured widths.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_width("challenge_width", self.challenge_width)?;
        check_width("reply_width", self.reply_width)
    }

    /// Layout of squeezed challenge scalars over `F`.
    pub fn challenge_codec<F: NativeField>(&self) -> ScalarCodec {
        let codec = ScalarCodec::challenge::<F>();
        match self.challenge_width {
            Some(width) => codec.with_width(width),
            None => codec,
        }
    }

    /// Layout of absorbed reply scalars over `F`.
    pub fn reply_codec<F: NativeField>(&self) -> ScalarCodec {
        let codec = ScalarCodec {
            overflow: self.reply_overflow,
            ..ScalarCodec::reply::<F>()
        };
        match self.reply_width {
            Some(width) => codec.with_width(width),
            None => codec,
        }
    }
}

fn check_width(field: &'static str, width: Option<usize>) -> Result<(), ConfigError> {
    match width {
        Some(0) => Err(ConfigError::ZeroWidth { field }),
        Some(width) if width > MAX_SCALAR_WIDTH => Err(ConfigError::WidthTooLarge {
            field,
            width,
            max: MAX_SCALAR_WIDTH,
        }),
        _ => Ok(()),
    }
}

/// Invalid [`ReplayConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A width override is zero.
    ZeroWidth {
        /// Name of the offending setting.
        field: &'static str,
    },
    /// A width override exceeds [`MAX_SCALAR_WIDTH`].
    WidthTooLarge {
        /// Name of the offending setting.
        field: &'static str,
        /// Configured width.
        width: usize,
        /// Largest supported width.
        max: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroWidth { field } => write!(f, "{field} must be non-zero"),
            ConfigError::WidthTooLarge { field, width, max } => {
                write!(f, "{field} of {width} bytes exceeds the maximum of {max}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
