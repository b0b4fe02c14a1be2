//! Upload form coordinator: one handler per DOM event the form listens to.
//!
//! Invariants held after every handler returns:
//! - a slot's primary and fallback inputs report the same file list
//! - a rejected drop leaves both inputs untouched
//! - submission is refused unless each slot has a file or non-blank text

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::IntakeError;
use crate::upload::notifier::Notifier;
use crate::upload::slot::{InputRole, SelectedFile, SlotKind, UploadSlot};
use crate::upload::submission::FormSubmission;

/// What the DOM binding must do with the event after a handler ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventDisposition {
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl EventDisposition {
    pub const PASSTHROUGH: Self = Self {
        default_prevented: false,
        propagation_stopped: false,
    };

    /// Every drag-family event on a drop-zone, so the browser never navigates
    /// to the dragged file.
    pub const SUPPRESSED: Self = Self {
        default_prevented: true,
        propagation_stopped: true,
    };

    pub const PREVENT_DEFAULT: Self = Self {
        default_prevented: true,
        propagation_stopped: false,
    };
}

/// Handler result paired with its event disposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handled<T> {
    pub disposition: EventDisposition,
    pub outcome: T,
}

pub struct UploadFormCoordinator<N: Notifier> {
    resume: UploadSlot,
    job_description: UploadSlot,
    notifier: N,
}

impl<N: Notifier> UploadFormCoordinator<N> {
    pub fn new(resume: UploadSlot, job_description: UploadSlot, notifier: N) -> Self {
        Self {
            resume,
            job_description,
            notifier,
        }
    }

    pub fn slot(&self, kind: SlotKind) -> &UploadSlot {
        match kind {
            SlotKind::Resume => &self.resume,
            SlotKind::JobDescription => &self.job_description,
        }
    }

    fn slot_mut(&mut self, kind: SlotKind) -> &mut UploadSlot {
        match kind {
            SlotKind::Resume => &mut self.resume,
            SlotKind::JobDescription => &mut self.job_description,
        }
    }

    /// `change` on either file input. The first file becomes the active
    /// selection and the whole list is mirrored into the sibling input.
    pub fn on_file_changed(
        &mut self,
        kind: SlotKind,
        source: InputRole,
        files: &[SelectedFile],
    ) -> Option<SelectedFile> {
        let Some(active) = files.first().cloned() else {
            debug!(slot = kind.as_str(), ?source, "empty file list ignored");
            return None;
        };

        let slot = self.slot_mut(kind);
        slot.input_mut(source).set_files(files);
        slot.input_mut(source.sibling()).set_files(files);
        slot.drop_zone.show_selected(&active.name);

        info!(
            slot = kind.as_str(),
            ?source,
            file = %active.name,
            "file selected"
        );
        Some(active)
    }

    /// `input` on the slot's pasted-text field.
    pub fn on_text_input(&mut self, kind: SlotKind, value: impl Into<String>) {
        let slot = self.slot_mut(kind);
        slot.text.set_value(value);
        debug!(
            slot = kind.as_str(),
            blank = slot.text.is_blank(),
            "text input updated"
        );
    }

    pub fn on_drag_enter(&mut self, kind: SlotKind) -> EventDisposition {
        self.slot_mut(kind).drop_zone.highlight();
        EventDisposition::SUPPRESSED
    }

    pub fn on_drag_over(&mut self, kind: SlotKind) -> EventDisposition {
        self.slot_mut(kind).drop_zone.highlight();
        EventDisposition::SUPPRESSED
    }

    pub fn on_drag_leave(&mut self, kind: SlotKind) -> EventDisposition {
        self.slot_mut(kind).drop_zone.clear_highlight();
        EventDisposition::SUPPRESSED
    }

    /// `drop` on a drop-zone. Only the first file is checked; a PDF is
    /// installed into both inputs, anything else is reported and discarded.
    pub fn on_drop(
        &mut self,
        kind: SlotKind,
        files: &[SelectedFile],
    ) -> Handled<Result<Option<SelectedFile>, IntakeError>> {
        let slot = self.slot_mut(kind);
        slot.drop_zone.clear_highlight();

        let outcome = match files.first() {
            None => {
                debug!(slot = kind.as_str(), "drop carried no files");
                Ok(None)
            }
            Some(file) if file.is_pdf() => {
                slot.install(files);
                slot.drop_zone.show_selected(&file.name);
                info!(slot = kind.as_str(), file = %file.name, "file dropped");
                Ok(Some(file.clone()))
            }
            Some(file) => {
                warn!(
                    slot = kind.as_str(),
                    file = %file.name,
                    mime_type = %file.mime_type,
                    "rejected non-PDF drop"
                );
                Err(IntakeError::InvalidFileType {
                    mime_type: file.mime_type.clone(),
                })
            }
        };

        if let Err(err) = &outcome {
            self.notifier.report(&err.to_string());
        }

        Handled {
            disposition: EventDisposition::SUPPRESSED,
            outcome,
        }
    }

    /// `submit` on the form. On failure the default submit is prevented and
    /// only the first missing slot is reported.
    pub fn validate_submit(&self) -> Handled<Result<FormSubmission, IntakeError>> {
        match FormSubmission::from_slots(&self.resume, &self.job_description) {
            Ok(submission) => {
                info!("form submission allowed");
                Handled {
                    disposition: EventDisposition::PASSTHROUGH,
                    outcome: Ok(submission),
                }
            }
            Err(err) => {
                warn!(code = err.code(), "form submission blocked: {err}");
                self.notifier.report(&err.to_string());
                Handled {
                    disposition: EventDisposition::PREVENT_DEFAULT,
                    outcome: Err(err),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::notifier::{RecordingNotifier, TracingNotifier};
    use crate::upload::slot::{DropZoneView, SlotState};
    use crate::upload::submission::SlotPayload;

    fn coordinator(notifier: &RecordingNotifier) -> UploadFormCoordinator<&RecordingNotifier> {
        UploadFormCoordinator::new(
            UploadSlot::for_page(SlotKind::Resume),
            UploadSlot::for_page(SlotKind::JobDescription),
            notifier,
        )
    }

    fn pdf(name: &str) -> SelectedFile {
        SelectedFile::new(name, "application/pdf")
    }

    #[test]
    fn test_primary_change_mirrors_into_fallback() {
        let notifier = RecordingNotifier::default();
        let mut form = coordinator(&notifier);

        let active = form.on_file_changed(SlotKind::Resume, InputRole::Primary, &[pdf("cv.pdf")]);

        assert_eq!(active, Some(pdf("cv.pdf")));
        let slot = form.slot(SlotKind::Resume);
        assert_eq!(slot.fallback.files(), &[pdf("cv.pdf")]);
        assert!(slot.inputs_in_sync());
        assert_eq!(
            slot.drop_zone.view(),
            &DropZoneView::Selected {
                file_name: "cv.pdf".to_string()
            }
        );
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_fallback_change_mirrors_into_primary() {
        let notifier = RecordingNotifier::default();
        let mut form = coordinator(&notifier);

        form.on_file_changed(
            SlotKind::JobDescription,
            InputRole::Fallback,
            &[pdf("jd.pdf")],
        );

        let slot = form.slot(SlotKind::JobDescription);
        assert_eq!(slot.primary.files(), &[pdf("jd.pdf")]);
        assert!(slot.inputs_in_sync());
        // Other slot untouched.
        assert_eq!(form.slot(SlotKind::Resume).state(), SlotState::Empty);
    }

    #[test]
    fn test_change_takes_first_file_of_many() {
        let notifier = RecordingNotifier::default();
        let mut form = coordinator(&notifier);
        let files = [pdf("a.pdf"), pdf("b.pdf")];

        let active = form.on_file_changed(SlotKind::Resume, InputRole::Primary, &files);

        assert_eq!(active, Some(pdf("a.pdf")));
        assert_eq!(form.slot(SlotKind::Resume).fallback.files(), &files);
    }

    #[test]
    fn test_empty_change_is_noop() {
        let notifier = RecordingNotifier::default();
        let mut form = coordinator(&notifier);
        form.on_file_changed(SlotKind::Resume, InputRole::Primary, &[pdf("cv.pdf")]);

        let active = form.on_file_changed(SlotKind::Resume, InputRole::Fallback, &[]);

        assert_eq!(active, None);
        assert_eq!(
            form.slot(SlotKind::Resume).state(),
            SlotState::Selected {
                file_name: "cv.pdf".to_string()
            }
        );
    }

    #[test]
    fn test_reselection_replaces_file() {
        let notifier = RecordingNotifier::default();
        let mut form = coordinator(&notifier);
        form.on_file_changed(SlotKind::Resume, InputRole::Primary, &[pdf("old.pdf")]);
        form.on_file_changed(SlotKind::Resume, InputRole::Fallback, &[pdf("new.pdf")]);

        let slot = form.slot(SlotKind::Resume);
        assert_eq!(slot.primary.files(), &[pdf("new.pdf")]);
        assert_eq!(slot.fallback.files(), &[pdf("new.pdf")]);
    }

    #[test]
    fn test_pdf_drop_installs_into_both_inputs() {
        let notifier = RecordingNotifier::default();
        let mut form = coordinator(&notifier);
        form.on_drag_enter(SlotKind::JobDescription);

        let handled = form.on_drop(SlotKind::JobDescription, &[pdf("jd.pdf")]);

        assert_eq!(handled.outcome, Ok(Some(pdf("jd.pdf"))));
        assert_eq!(handled.disposition, EventDisposition::SUPPRESSED);
        let slot = form.slot(SlotKind::JobDescription);
        assert_eq!(slot.primary.files(), &[pdf("jd.pdf")]);
        assert_eq!(slot.fallback.files(), &[pdf("jd.pdf")]);
        assert!(!slot.drop_zone.is_highlighted());
        assert!(slot.drop_zone.markup().unwrap().unwrap().contains("jd.pdf"));
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_non_pdf_drop_rejected_without_mutation() {
        let notifier = RecordingNotifier::default();
        let mut form = coordinator(&notifier);
        form.on_file_changed(SlotKind::Resume, InputRole::Primary, &[pdf("cv.pdf")]);
        let before = form.slot(SlotKind::Resume).clone();

        let handled = form.on_drop(
            SlotKind::Resume,
            &[SelectedFile::new("photo.png", "image/png")],
        );

        assert_eq!(
            handled.outcome,
            Err(IntakeError::InvalidFileType {
                mime_type: "image/png".to_string()
            })
        );
        assert_eq!(handled.disposition, EventDisposition::SUPPRESSED);
        assert_eq!(form.slot(SlotKind::Resume), &before);
        assert_eq!(notifier.messages(), vec!["Please select a PDF file only."]);
    }

    #[test]
    fn test_drop_checks_only_first_file() {
        let notifier = RecordingNotifier::default();
        let mut form = coordinator(&notifier);

        let handled = form.on_drop(
            SlotKind::Resume,
            &[SelectedFile::new("notes.txt", "text/plain"), pdf("cv.pdf")],
        );

        assert!(handled.outcome.is_err());
        assert_eq!(form.slot(SlotKind::Resume).state(), SlotState::Empty);
        assert_eq!(notifier.len(), 1);
    }

    #[test]
    fn test_rejected_drop_allows_retry() {
        let notifier = RecordingNotifier::default();
        let mut form = coordinator(&notifier);

        form.on_drop(SlotKind::Resume, &[SelectedFile::new("cv.doc", "application/msword")]);
        let handled = form.on_drop(SlotKind::Resume, &[pdf("cv.pdf")]);

        assert_eq!(handled.outcome, Ok(Some(pdf("cv.pdf"))));
        assert_eq!(notifier.len(), 1);
    }

    #[test]
    fn test_empty_drop_is_noop() {
        let notifier = RecordingNotifier::default();
        let mut form = coordinator(&notifier);
        form.on_drag_over(SlotKind::Resume);

        let handled = form.on_drop(SlotKind::Resume, &[]);

        assert_eq!(handled.outcome, Ok(None));
        let slot = form.slot(SlotKind::Resume);
        assert_eq!(slot.state(), SlotState::Empty);
        assert!(!slot.drop_zone.is_highlighted());
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_drag_enter_then_leave_restores_idle() {
        let notifier = RecordingNotifier::default();
        let mut form = coordinator(&notifier);
        let before = form.slot(SlotKind::Resume).clone();

        assert_eq!(form.on_drag_enter(SlotKind::Resume), EventDisposition::SUPPRESSED);
        assert_eq!(form.on_drag_over(SlotKind::Resume), EventDisposition::SUPPRESSED);
        assert!(form.slot(SlotKind::Resume).drop_zone.is_highlighted());
        assert!(!form.slot(SlotKind::JobDescription).drop_zone.is_highlighted());

        assert_eq!(form.on_drag_leave(SlotKind::Resume), EventDisposition::SUPPRESSED);
        assert_eq!(form.slot(SlotKind::Resume), &before);
    }

    #[test]
    fn test_submit_allowed_with_resume_file_and_jd_text() {
        let notifier = RecordingNotifier::default();
        let mut form = coordinator(&notifier);
        form.on_file_changed(SlotKind::Resume, InputRole::Primary, &[pdf("cv.pdf")]);
        form.on_text_input(SlotKind::JobDescription, "Senior Rust engineer");

        let handled = form.validate_submit();

        assert_eq!(handled.disposition, EventDisposition::PASSTHROUGH);
        let submission = handled.outcome.unwrap();
        assert_eq!(submission.resume, SlotPayload::File { file: pdf("cv.pdf") });
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_submit_blocked_on_missing_resume_short_circuits() {
        let notifier = RecordingNotifier::default();
        let mut form = coordinator(&notifier);
        form.on_text_input(SlotKind::Resume, "   ");
        form.on_file_changed(SlotKind::JobDescription, InputRole::Primary, &[pdf("jd.pdf")]);

        let handled = form.validate_submit();

        assert_eq!(handled.disposition, EventDisposition::PREVENT_DEFAULT);
        assert_eq!(
            handled.outcome,
            Err(IntakeError::MissingRequiredInput(SlotKind::Resume))
        );
        assert_eq!(
            notifier.messages(),
            vec!["Please provide resume text or upload a resume file."]
        );
    }

    #[test]
    fn test_submit_blocked_on_both_missing_reports_resume_only() {
        let notifier = RecordingNotifier::default();
        let form = coordinator(&notifier);

        let handled = form.validate_submit();

        assert!(handled.disposition.default_prevented);
        assert_eq!(notifier.len(), 1);
        assert!(notifier.messages()[0].contains("resume"));
    }

    #[test]
    fn test_submit_allowed_with_resume_text_and_jd_file() {
        let notifier = RecordingNotifier::default();
        let mut form = coordinator(&notifier);
        form.on_text_input(SlotKind::Resume, "Experienced engineer");
        form.on_drop(SlotKind::JobDescription, &[pdf("jd.pdf")]);

        let handled = form.validate_submit();

        assert!(handled.outcome.is_ok());
        assert!(!handled.disposition.default_prevented);
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_submit_blocked_on_missing_job_description() {
        let notifier = RecordingNotifier::default();
        let mut form = coordinator(&notifier);
        form.on_text_input(SlotKind::Resume, "Experienced engineer");

        let handled = form.validate_submit();

        assert_eq!(
            handled.outcome,
            Err(IntakeError::MissingRequiredInput(SlotKind::JobDescription))
        );
        assert_eq!(
            notifier.messages(),
            vec!["Please provide job description text or upload a job description file."]
        );

        // Recoverable: add the missing input and resubmit.
        form.on_text_input(SlotKind::JobDescription, "Platform team lead");
        assert!(form.validate_submit().outcome.is_ok());
        assert_eq!(notifier.len(), 1);
    }

    #[test]
    fn test_tracing_notifier_still_blocks_submit() {
        let form = UploadFormCoordinator::new(
            UploadSlot::for_page(SlotKind::Resume),
            UploadSlot::for_page(SlotKind::JobDescription),
            TracingNotifier,
        );

        let handled = form.validate_submit();

        assert_eq!(handled.disposition, EventDisposition::PREVENT_DEFAULT);
        assert!(handled.outcome.is_err());
    }
}
