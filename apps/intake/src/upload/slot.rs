//! Slot model: the element handles one upload target owns.
//!
//! Every handle is an owned value injected at construction; nothing here looks
//! elements up by id at runtime. The ids are kept only so a DOM binding (or a
//! replay report) can say which element a handle stands for.

use askama::Template;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Slot identity
// ────────────────────────────────────────────────────────────────────────────

/// Which upload target a slot serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Resume,
    JobDescription,
}

impl SlotKind {
    /// Submission checks run in this order and stop at the first failure.
    pub const ALL: [SlotKind; 2] = [SlotKind::Resume, SlotKind::JobDescription];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKind::Resume => "resume",
            SlotKind::JobDescription => "job_description",
        }
    }

    /// `name` attribute of the slot's pasted-text field.
    pub fn text_field_name(&self) -> &'static str {
        match self {
            SlotKind::Resume => "jd_resume_text",
            SlotKind::JobDescription => "jd_text",
        }
    }

    pub fn missing_input_message(&self) -> &'static str {
        match self {
            SlotKind::Resume => "Please provide resume text or upload a resume file.",
            SlotKind::JobDescription => {
                "Please provide job description text or upload a job description file."
            }
        }
    }

    /// Element ids used by the analysis page markup.
    pub fn element_ids(&self) -> SlotElementIds {
        match self {
            SlotKind::Resume => SlotElementIds {
                drop_zone: "resumeUploadArea",
                primary: "resumeFile",
                fallback: "resumeFileFallback",
            },
            SlotKind::JobDescription => SlotElementIds {
                drop_zone: "jdUploadArea",
                primary: "jdFile",
                fallback: "jdFileFallback",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotElementIds {
    pub drop_zone: &'static str,
    pub primary: &'static str,
    pub fallback: &'static str,
}

/// Which of a slot's two file inputs an event came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputRole {
    #[default]
    Primary,
    Fallback,
}

impl InputRole {
    pub fn sibling(self) -> Self {
        match self {
            InputRole::Primary => InputRole::Fallback,
            InputRole::Fallback => InputRole::Primary,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Element handles
// ────────────────────────────────────────────────────────────────────────────

/// A file picked or dropped by the user. Replaced wholesale on each selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Exact MIME string match; parameters or case variants do not count.
    pub fn is_pdf(&self) -> bool {
        self.mime_type == mime::APPLICATION_PDF.essence_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInput {
    id: String,
    files: Vec<SelectedFile>,
}

impl FileInput {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            files: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn first(&self) -> Option<&SelectedFile> {
        self.files.first()
    }

    pub fn set_files(&mut self, files: &[SelectedFile]) {
        self.files = files.to_vec();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextInput {
    name: String,
    value: String,
}

impl TextInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// What the drop-zone currently displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DropZoneView {
    /// The page's own prompt markup, untouched.
    Idle,
    Selected { file_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropZone {
    id: String,
    highlighted: bool,
    view: DropZoneView,
}

impl DropZone {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            highlighted: false,
            view: DropZoneView::Idle,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn highlight(&mut self) {
        self.highlighted = true;
    }

    pub fn clear_highlight(&mut self) {
        self.highlighted = false;
    }

    pub fn view(&self) -> &DropZoneView {
        &self.view
    }

    pub fn show_selected(&mut self, file_name: &str) {
        self.view = DropZoneView::Selected {
            file_name: file_name.to_string(),
        };
    }

    /// Inner markup for the selected state. `None` while idle.
    pub fn markup(&self) -> askama::Result<Option<String>> {
        match &self.view {
            DropZoneView::Idle => Ok(None),
            DropZoneView::Selected { file_name } => {
                DropZoneSelected {
                    file_name: file_name.as_str(),
                }
                .render()
                .map(Some)
            }
        }
    }
}

#[derive(Template)]
#[template(path = "drop_zone_selected.html")]
struct DropZoneSelected<'a> {
    file_name: &'a str,
}

// ────────────────────────────────────────────────────────────────────────────
// Slot
// ────────────────────────────────────────────────────────────────────────────

/// Per-slot lifecycle. There is no way back to `Empty`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SlotState {
    Empty,
    Selected { file_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadSlot {
    pub kind: SlotKind,
    pub drop_zone: DropZone,
    pub primary: FileInput,
    pub fallback: FileInput,
    pub text: TextInput,
}

impl UploadSlot {
    pub fn new(
        kind: SlotKind,
        drop_zone: DropZone,
        primary: FileInput,
        fallback: FileInput,
        text: TextInput,
    ) -> Self {
        Self {
            kind,
            drop_zone,
            primary,
            fallback,
            text,
        }
    }

    /// Builds a slot with the element ids and field names of the analysis page.
    pub fn for_page(kind: SlotKind) -> Self {
        let ids = kind.element_ids();
        Self::new(
            kind,
            DropZone::new(ids.drop_zone),
            FileInput::new(ids.primary),
            FileInput::new(ids.fallback),
            TextInput::new(kind.text_field_name()),
        )
    }

    pub fn input(&self, role: InputRole) -> &FileInput {
        match role {
            InputRole::Primary => &self.primary,
            InputRole::Fallback => &self.fallback,
        }
    }

    pub fn input_mut(&mut self, role: InputRole) -> &mut FileInput {
        match role {
            InputRole::Primary => &mut self.primary,
            InputRole::Fallback => &mut self.fallback,
        }
    }

    /// Writes the same file list into both inputs.
    pub fn install(&mut self, files: &[SelectedFile]) {
        self.primary.set_files(files);
        self.fallback.set_files(files);
    }

    /// The active selection. Submission reads the primary input.
    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.input(InputRole::Primary).first()
    }

    pub fn has_usable_input(&self) -> bool {
        self.selected_file().is_some() || !self.text.is_blank()
    }

    pub fn state(&self) -> SlotState {
        match self.selected_file() {
            Some(file) => SlotState::Selected {
                file_name: file.name.clone(),
            },
            None => SlotState::Empty,
        }
    }

    pub fn inputs_in_sync(&self) -> bool {
        self.input(InputRole::Primary).files() == self.input(InputRole::Fallback).files()
    }
}
