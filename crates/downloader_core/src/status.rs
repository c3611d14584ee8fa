#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    None,
    Success,
    Warning,
    Error,
}

/// Outcome shown by the status banner.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub message: String,
    pub details: Option<String>,
}

impl StatusMessage {
    pub fn success(message: impl Into<String>, details: Option<String>) -> Self {
        Self::new(StatusKind::Success, message, details)
    }

    pub fn warning(message: impl Into<String>, details: Option<String>) -> Self {
        Self::new(StatusKind::Warning, message, details)
    }

    pub fn error(message: impl Into<String>, details: Option<String>) -> Self {
        Self::new(StatusKind::Error, message, details)
    }

    fn new(kind: StatusKind, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details,
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind == StatusKind::None
    }
}
