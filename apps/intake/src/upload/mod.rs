// Upload form: two slots (resume, job description), each with a drop-zone,
// primary and fallback file inputs, and a pasted-text field.
// Handlers take `&mut self` and run on the page's single event loop.

pub mod coordinator;
pub mod notifier;
pub mod slot;
pub mod submission;

pub use coordinator::{EventDisposition, Handled, UploadFormCoordinator};
pub use notifier::{Notifier, RecordingNotifier, TracingNotifier};
pub use slot::{
    DropZone, DropZoneView, FileInput, InputRole, SelectedFile, SlotElementIds, SlotKind,
    SlotState, TextInput, UploadSlot,
};
pub use submission::{FormSubmission, SlotPayload};
