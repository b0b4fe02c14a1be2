//! What the form sends once both slots pass the submit check.
//!
//! Pasted text wins over an uploaded file when it is non-blank, matching how
//! the analyzer resolves `resume_text` against `resume_file`.

use serde::Serialize;

use crate::errors::IntakeError;
use crate::upload::slot::{SelectedFile, SlotKind, UploadSlot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SlotPayload {
    Text { field: String, value: String },
    File { file: SelectedFile },
}

impl SlotPayload {
    /// `None` when the slot has neither non-blank text nor a file.
    pub fn resolve(slot: &UploadSlot) -> Option<Self> {
        if !slot.text.is_blank() {
            return Some(SlotPayload::Text {
                field: slot.text.name().to_string(),
                value: slot.text.value().to_string(),
            });
        }
        slot.selected_file()
            .cloned()
            .map(|file| SlotPayload::File { file })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSubmission {
    pub resume: SlotPayload,
    pub job_description: SlotPayload,
}

impl FormSubmission {
    /// Resume is checked before job description; only the first gap is returned.
    pub fn from_slots(
        resume: &UploadSlot,
        job_description: &UploadSlot,
    ) -> Result<Self, IntakeError> {
        let resume = SlotPayload::resolve(resume)
            .ok_or(IntakeError::MissingRequiredInput(SlotKind::Resume))?;
        let job_description = SlotPayload::resolve(job_description)
            .ok_or(IntakeError::MissingRequiredInput(SlotKind::JobDescription))?;
        Ok(Self {
            resume,
            job_description,
        })
    }
}
