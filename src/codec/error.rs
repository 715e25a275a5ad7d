use core::fmt;

/// Failure converting between bytes and native-field scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarRangeError {
    /// Width is zero, above the supported maximum, or not the layout's width.
    Width {
        /// Width that was requested.
        width: usize,
        /// Largest acceptable width.
        max: usize,
    },
    /// Encoded integer is not smaller than the modulus and the policy rejects it.
    NonCanonical {
        /// Width of the offending encoding.
        width: usize,
    },
    /// Value does not fit into the requested width.
    Overflow {
        /// Width that was requested.
        width: usize,
        /// Number of significant bytes of the value.
        required: usize,
    },
}

impl fmt::Display for ScalarRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarRangeError::Width { width, max } => {
                write!(f, "scalar width {width} outside supported range 1..={max}")
            }
            ScalarRangeError::NonCanonical { width } => {
                write!(f, "{width}-byte scalar encoding is not below the field modulus")
            }
            ScalarRangeError::Overflow { width, required } => {
                write!(f, "scalar needs {required} bytes but only {width} are available")
            }
        }
    }
}

impl std::error::Error for ScalarRangeError {}
