use core::fmt;

/// Error raised while reading or building a schedule.
///
/// `field` counts NUL-separated wire fields: 0 is the domain separator and
/// `i >= 1` is the `i`-th interaction. For the pretty form it is the line
/// index instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Field is not valid UTF-8.
    InvalidUtf8 {
        /// Offending field.
        field: usize,
    },
    /// Operation character is neither `S` nor `A` (or the field is empty).
    InvalidOp {
        /// Offending field.
        field: usize,
        /// Byte found in place of the operation, if any.
        found: Option<u8>,
    },
    /// No decimal digits follow the operation character.
    MissingLength {
        /// Offending field.
        field: usize,
    },
    /// Length has a leading zero or does not fit into `usize`.
    InvalidLength {
        /// Offending field.
        field: usize,
    },
    /// Declared length is zero.
    ZeroLength {
        /// Offending field.
        field: usize,
    },
    /// Domain separator without any interaction.
    EmptySchedule {
        /// Index of the first missing interaction field.
        field: usize,
    },
    /// Label contains NUL or starts with an ASCII digit.
    InvalidLabel {
        /// Offending field.
        field: usize,
    },
    /// Domain separator contains NUL.
    InvalidDomain {
        /// Offending field.
        field: usize,
    },
    /// Line of the pretty rendering could not be read back.
    MalformedLine {
        /// Offending line.
        field: usize,
    },
}

impl ParseError {
    /// Index of the offending field.
    pub fn field(&self) -> usize {
        match *self {
            ParseError::InvalidUtf8 { field }
            | ParseError::InvalidOp { field, .. }
            | ParseError::MissingLength { field }
            | ParseError::InvalidLength { field }
            | ParseError::ZeroLength { field }
            | ParseError::EmptySchedule { field }
            | ParseError::InvalidLabel { field }
            | ParseError::InvalidDomain { field }
            | ParseError::MalformedLine { field } => field,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidUtf8 { field } => write!(f, "field {field}: invalid utf-8"),
            ParseError::InvalidOp { field, found } => match found {
                Some(byte) => write!(f, "field {field}: unknown operation {:?}", *byte as char),
                None => write!(f, "field {field}: missing operation"),
            },
            ParseError::MissingLength { field } => write!(f, "field {field}: missing length"),
            ParseError::InvalidLength { field } => write!(f, "field {field}: invalid length"),
            ParseError::ZeroLength { field } => write!(f, "field {field}: zero-length interaction"),
            ParseError::EmptySchedule { field } => {
                write!(f, "field {field}: schedule declares no interaction")
            }
            ParseError::InvalidLabel { field } => write!(f, "field {field}: invalid label"),
            ParseError::InvalidDomain { field } => {
                write!(f, "field {field}: domain separator contains NUL")
            }
            ParseError::MalformedLine { field } => write!(f, "line {field}: malformed pattern line"),
        }
    }
}

impl std::error::Error for ParseError {}
