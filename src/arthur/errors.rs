use core::fmt;

use crate::codec::ScalarRangeError;
use crate::config::ConfigError;
use crate::pattern::{Interaction, Op, ParseError};

/// Operation and byte length a fill call asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    /// Requested direction.
    pub op: Op,
    /// Requested byte length.
    pub length: usize,
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op, self.length)
    }
}

/// Fill call that does not match the next scheduled interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleMismatchError {
    /// Schedule cursor at the time of the call.
    pub position: usize,
    /// Interaction scheduled at `position`; `None` once the schedule is exhausted.
    pub expected: Option<Interaction>,
    /// What the caller asked for.
    pub requested: Request,
}

impl fmt::Display for ScheduleMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expected {
            Some(expected) => write!(
                f,
                "interaction {}: requested {} but schedule expects {}",
                self.position, self.requested, expected
            ),
            None => write!(
                f,
                "interaction {}: requested {} past the end of the schedule",
                self.position, self.requested
            ),
        }
    }
}

impl std::error::Error for ScheduleMismatchError {}

/// Absorb that would read past the end of the transcript buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferExhaustionError {
    /// Schedule cursor at the time of the call.
    pub position: usize,
    /// Buffer cursor at the time of the call.
    pub offset: usize,
    /// Number of bytes the interaction needs.
    pub requested: usize,
    /// Number of bytes left in the buffer.
    pub remaining: usize,
}

impl fmt::Display for BufferExhaustionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "interaction {}: needs {} transcript bytes at offset {} but only {} remain",
            self.position, self.requested, self.offset, self.remaining
        )
    }
}

impl std::error::Error for BufferExhaustionError {}

/// Failure while constructing an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// Schedule text could not be parsed.
    Parse(ParseError),
    /// The commitment does not cover the transcript byte for byte.
    CommitmentLength {
        /// Transcript length in bytes.
        transcript: usize,
        /// Number of commitment variables.
        commitment: usize,
    },
    /// Configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructionError::Parse(err) => write!(f, "invalid schedule: {err}"),
            ConstructionError::CommitmentLength {
                transcript,
                commitment,
            } => write!(
                f,
                "commitment has {commitment} variables for a {transcript}-byte transcript"
            ),
            ConstructionError::Config(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl std::error::Error for ConstructionError {}

impl From<ParseError> for ConstructionError {
    fn from(err: ParseError) -> Self {
        ConstructionError::Parse(err)
    }
}

impl From<ConfigError> for ConstructionError {
    fn from(err: ConfigError) -> Self {
        ConstructionError::Config(err)
    }
}

/// Failure of a replay operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArthurError {
    /// Call does not match the schedule.
    ScheduleMismatch(ScheduleMismatchError),
    /// Transcript buffer is too short.
    BufferExhaustion(BufferExhaustionError),
    /// Reply bytes do not decode to a scalar.
    ScalarRange(ScalarRangeError),
    /// Interactions are left when the replay is finished.
    Unconsumed {
        /// Schedule cursor at the time of the call.
        position: usize,
        /// Number of interactions not replayed.
        remaining: usize,
    },
}

impl fmt::Display for ArthurError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArthurError::ScheduleMismatch(err) => write!(f, "schedule mismatch: {err}"),
            ArthurError::BufferExhaustion(err) => write!(f, "buffer exhausted: {err}"),
            ArthurError::ScalarRange(err) => write!(f, "scalar out of range: {err}"),
            ArthurError::Unconsumed {
                position,
                remaining,
            } => write!(
                f,
                "replay stopped at interaction {position} with {remaining} interactions left"
            ),
        }
    }
}

impl std::error::Error for ArthurError {}

impl From<ScheduleMismatchError> for ArthurError {
    fn from(err: ScheduleMismatchError) -> Self {
        ArthurError::ScheduleMismatch(err)
    }
}

impl From<BufferExhaustionError> for ArthurError {
    fn from(err: BufferExhaustionError) -> Self {
        ArthurError::BufferExhaustion(err)
    }
}

impl From<ScalarRangeError> for ArthurError {
    fn from(err: ScalarRangeError) -> Self {
        ArthurError::ScalarRange(err)
    }
}

/// Convenience alias for replay results.
pub type ReplayResult<T> = Result<T, ArthurError>;
