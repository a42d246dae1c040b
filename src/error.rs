/// Broad failure category, used by callers to branch and by the binary to
/// pick an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Sample size or dimension is zero.
    InvalidSize,
    /// Row/column counts of two operands disagree.
    DimensionMismatch,
    /// The singular value decomposition did not produce a result.
    Decomposition,
    /// Malformed user input (CSV cells, column names, JSON).
    Input,
    /// Filesystem or stream failure.
    Io,
}

#[derive(Clone)]
pub struct EstError {
    kind: ErrorKind,
    message: String,
}

impl EstError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_size(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSize, message)
    }

    pub fn dimension_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DimensionMismatch, message)
    }

    pub fn decomposition(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decomposition, message)
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Input, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Process exit code for the `est` binary.
    pub fn exit_code(&self) -> u8 {
        match self.kind {
            ErrorKind::InvalidSize
            | ErrorKind::DimensionMismatch
            | ErrorKind::Input
            | ErrorKind::Io => 2,
            ErrorKind::Decomposition => 4,
        }
    }
}

impl std::fmt::Display for EstError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for EstError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EstError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for EstError {}
