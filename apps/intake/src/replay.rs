//! Page host harness. Builds the form the way the analysis page does on load,
//! then feeds it a scripted sequence of DOM events.
//!
//! An allowed submit ends the page: any events after it are counted as
//! skipped and never reach the coordinator.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::errors::{IntakeError, ReplayError};
use crate::upload::{
    EventDisposition, FormSubmission, InputRole, Notifier, RecordingNotifier, SelectedFile,
    SlotKind, TracingNotifier, UploadFormCoordinator, UploadSlot,
};

// ────────────────────────────────────────────────────────────────────────────
// Script
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormEvent {
    FileChanged {
        slot: SlotKind,
        #[serde(default)]
        input: InputRole,
        #[serde(default)]
        files: Vec<SelectedFile>,
    },
    DragEnter {
        slot: SlotKind,
    },
    DragOver {
        slot: SlotKind,
    },
    DragLeave {
        slot: SlotKind,
    },
    Drop {
        slot: SlotKind,
        #[serde(default)]
        files: Vec<SelectedFile>,
    },
    TextInput {
        slot: SlotKind,
        value: String,
    },
    Submit,
}

impl FormEvent {
    pub fn name(&self) -> &'static str {
        match self {
            FormEvent::FileChanged { .. } => "file_changed",
            FormEvent::DragEnter { .. } => "drag_enter",
            FormEvent::DragOver { .. } => "drag_over",
            FormEvent::DragLeave { .. } => "drag_leave",
            FormEvent::Drop { .. } => "drop",
            FormEvent::TextInput { .. } => "text_input",
            FormEvent::Submit => "submit",
        }
    }

    pub fn slot(&self) -> Option<SlotKind> {
        match self {
            FormEvent::FileChanged { slot, .. }
            | FormEvent::DragEnter { slot }
            | FormEvent::DragOver { slot }
            | FormEvent::DragLeave { slot }
            | FormEvent::Drop { slot, .. }
            | FormEvent::TextInput { slot, .. } => Some(*slot),
            FormEvent::Submit => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReplayScript {
    pub events: Vec<FormEvent>,
}

impl ReplayScript {
    pub fn from_json(raw: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the script from `path`, or from stdin when no path is given.
    pub async fn load(path: Option<&Path>) -> Result<Self, ReplayError> {
        let raw = match path {
            Some(path) => {
                debug!("Reading replay script from {}", path.display());
                tokio::fs::read_to_string(path).await?
            }
            None => {
                debug!("Reading replay script from stdin");
                let mut raw = String::new();
                tokio::io::stdin().read_to_string(&mut raw).await?;
                raw
            }
        };
        Self::from_json(&raw)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Report
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub code: String,
    pub message: String,
}

impl From<&IntakeError> for ErrorReport {
    fn from(err: &IntakeError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<SlotKind>,
    pub disposition: EventDisposition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<SelectedFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorReport>,
}

/// Final state of one slot plus what its drop-zone would display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotSnapshot {
    #[serde(flatten)]
    pub slot: UploadSlot,
    pub markup: Option<String>,
}

impl SlotSnapshot {
    fn capture(slot: &UploadSlot) -> Result<Self, ReplayError> {
        Ok(Self {
            markup: slot.drop_zone.markup()?,
            slot: slot.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<StepReport>,
    pub notifications: Vec<String>,
    pub slots: Vec<SlotSnapshot>,
    pub submission: Option<FormSubmission>,
    pub skipped_events: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Replay
// ────────────────────────────────────────────────────────────────────────────

pub fn replay(script: &ReplayScript) -> Result<ReplayReport, ReplayError> {
    let notifier = RecordingNotifier::default();
    let mut form = UploadFormCoordinator::new(
        UploadSlot::for_page(SlotKind::Resume),
        UploadSlot::for_page(SlotKind::JobDescription),
        (&notifier, TracingNotifier),
    );

    let mut steps = Vec::with_capacity(script.events.len());
    let mut submission = None;

    for (index, event) in script.events.iter().enumerate() {
        let step = apply(&mut form, index, event, &mut submission);
        steps.push(step);
        if submission.is_some() {
            break;
        }
    }

    let skipped_events = script.events.len() - steps.len();
    if skipped_events > 0 {
        info!(skipped_events, "events after submission were not delivered");
    }

    let slots = SlotKind::ALL
        .iter()
        .map(|kind| SlotSnapshot::capture(form.slot(*kind)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ReplayReport {
        steps,
        notifications: notifier.messages(),
        slots,
        submission,
        skipped_events,
    })
}

fn apply<N: Notifier>(
    form: &mut UploadFormCoordinator<N>,
    index: usize,
    event: &FormEvent,
    submission: &mut Option<FormSubmission>,
) -> StepReport {
    let mut step = StepReport {
        index,
        event: event.name(),
        slot: event.slot(),
        disposition: EventDisposition::PASSTHROUGH,
        file: None,
        error: None,
    };

    match event {
        FormEvent::FileChanged { slot, input, files } => {
            step.file = form.on_file_changed(*slot, *input, files);
        }
        FormEvent::DragEnter { slot } => step.disposition = form.on_drag_enter(*slot),
        FormEvent::DragOver { slot } => step.disposition = form.on_drag_over(*slot),
        FormEvent::DragLeave { slot } => step.disposition = form.on_drag_leave(*slot),
        FormEvent::Drop { slot, files } => {
            let handled = form.on_drop(*slot, files);
            step.disposition = handled.disposition;
            match handled.outcome {
                Ok(file) => step.file = file,
                Err(err) => step.error = Some(ErrorReport::from(&err)),
            }
        }
        FormEvent::TextInput { slot, value } => form.on_text_input(*slot, value.as_str()),
        FormEvent::Submit => {
            let handled = form.validate_submit();
            step.disposition = handled.disposition;
            match handled.outcome {
                Ok(accepted) => *submission = Some(accepted),
                Err(err) => step.error = Some(ErrorReport::from(&err)),
            }
        }
    }

    step
}
