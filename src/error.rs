/// Coarse classification of a [`SerialError`], used by forms to pick a
/// field-specific message without matching on the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedSerial,
    RangeMismatch,
    RangeOrderInvalid,
    WidthMismatch,
    RangeTooLarge,
    DuplicateSerial,
    InvalidArgument,
    Io,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum SerialError {
    #[error("Malformed serial: '{input}' must end in a digit run")]
    Malformed { input: String },

    #[error("Range prefix mismatch: '{from_prefix}' vs '{to_prefix}'")]
    RangeMismatch {
        from_prefix: String,
        to_prefix: String,
    },

    #[error("Invalid range order: {from} is after {to}")]
    RangeOrderInvalid { from: String, to: String },

    #[error("Digit width mismatch: {from_width} vs {to_width} digits")]
    WidthMismatch { from_width: usize, to_width: usize },

    #[error("Range too large: {size} serials (limit {limit})")]
    RangeTooLarge { size: u64, limit: u64 },

    #[error("Duplicate serials: {}", .serials.join(", "))]
    DuplicateSerial { serials: Vec<String> },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SerialError {
    pub(crate) fn malformed(input: impl Into<String>) -> Self {
        SerialError::Malformed {
            input: input.into(),
        }
    }

    /// Return the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SerialError::Malformed { .. } => ErrorKind::MalformedSerial,
            SerialError::RangeMismatch { .. } => ErrorKind::RangeMismatch,
            SerialError::RangeOrderInvalid { .. } => ErrorKind::RangeOrderInvalid,
            SerialError::WidthMismatch { .. } => ErrorKind::WidthMismatch,
            SerialError::RangeTooLarge { .. } => ErrorKind::RangeTooLarge,
            SerialError::DuplicateSerial { .. } => ErrorKind::DuplicateSerial,
            SerialError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            SerialError::Io(_) => ErrorKind::Io,
            SerialError::Json(_) => ErrorKind::Json,
        }
    }

    /// True for the conditions a user can fix by editing form input.
    pub fn is_user_correctable(&self) -> bool {
        !matches!(self, SerialError::Io(_) | SerialError::Json(_))
    }
}

pub type Result<T> = std::result::Result<T, SerialError>;
