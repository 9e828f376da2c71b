//! Page abstractions over the two practice UI flows.

mod form;
mod web_table;

pub use form::{FormDraft, Gender, Hobby, PracticeFormPage};
pub use web_table::{RecordDraft, RecordPatch, TableRecord, WebTablePage};

/// Border/label color Bootstrap renders on required fields that failed
/// validation.
pub const INVALID_FIELD_COLOR: &str = "rgb(220, 53, 69)";
