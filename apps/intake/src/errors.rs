use thiserror::Error;

use crate::upload::SlotKind;

/// User-correctable failures raised by the upload form.
/// The `Display` text is exactly what the notifier shows the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("Please select a PDF file only.")]
    InvalidFileType { mime_type: String },

    #[error("{}", .0.missing_input_message())]
    MissingRequiredInput(SlotKind),
}

impl IntakeError {
    /// Stable machine-readable code, used in replay reports.
    pub fn code(&self) -> &'static str {
        match self {
            IntakeError::InvalidFileType { .. } => "INVALID_FILE_TYPE",
            IntakeError::MissingRequiredInput(_) => "MISSING_REQUIRED_INPUT",
        }
    }
}

/// Failures loading a replay script in the page-host harness.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read replay script: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid replay script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to render drop-zone markup: {0}")]
    Render(#[from] askama::Error),
}
