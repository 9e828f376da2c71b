//! Web table page.
//!
//! CRUD surface over the client-rendered, searchable, paginated record
//! table. The table re-renders asynchronously after a search with no
//! completion event, so [`WebTablePage::search`] waits for two consecutive
//! identical extractions instead of sleeping a fixed interval.

use tracing::debug;

use crate::error::{SuiteError, SuiteResult};
use crate::pages::INVALID_FIELD_COLOR;
use crate::session::{BrowserSession, PageHandle};
use crate::wait::{poll_until, until_stable};

const ADD_BUTTON: &str = "#addNewRecordButton";
const MODAL: &str = ".modal-content";
const MODAL_CLOSE: &str = ".modal-content .close";
const FIRST_NAME: &str = "#firstName";
const LAST_NAME: &str = "#lastName";
const EMAIL: &str = "#userEmail";
const AGE: &str = "#age";
const SALARY: &str = "#salary";
const DEPARTMENT: &str = "#department";
const SUBMIT: &str = "#submit";
const SEARCH_BOX: &str = "#searchBox";
const ROW_GROUPS: &str = ".rt-tr-group:not(.-padRow)";
const EDIT_BUTTONS: &str = r#"span[title="Edit"]"#;
const DELETE_BUTTONS: &str = r#"span[title="Delete"]"#;
const NO_DATA: &str = ".rt-noData";

/// Rendered rows carry six data cells plus the action cell.
const CELLS_PER_ROW: usize = 7;

/// Upper bound on delete-all sweeps, in case the table keeps re-rendering.
const DELETE_ALL_LIMIT: usize = 50;

/// One structured row extracted from the table, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRecord {
    /// First name cell
    pub first_name: String,
    /// Last name cell
    pub last_name: String,
    /// Age cell
    pub age: String,
    /// Email cell (lookup key)
    pub email: String,
    /// Salary cell
    pub salary: String,
    /// Department cell
    pub department: String,
}

/// Input for creating a record through the entry dialog.
#[derive(Debug, Clone)]
pub struct RecordDraft {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Age (typed as rendered, the control is a text input)
    pub age: String,
    /// Salary
    pub salary: String,
    /// Department
    pub department: String,
}

impl RecordDraft {
    /// The record this draft should render as once submitted.
    #[must_use]
    pub fn expected_record(&self) -> TableRecord {
        TableRecord {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            age: self.age.clone(),
            email: self.email.clone(),
            salary: self.salary.clone(),
            department: self.department.clone(),
        }
    }
}

/// Partial update for an existing record; only present fields overwrite.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    /// Replacement first name
    pub first_name: Option<String>,
    /// Replacement last name
    pub last_name: Option<String>,
    /// Replacement email
    pub email: Option<String>,
    /// Replacement age
    pub age: Option<String>,
    /// Replacement salary
    pub salary: Option<String>,
    /// Replacement department
    pub department: Option<String>,
}

impl RecordPatch {
    /// Empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first name
    #[must_use]
    pub fn with_first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    /// Set the last name
    #[must_use]
    pub fn with_last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    /// Set the email
    #[must_use]
    pub fn with_email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    /// Set the age
    #[must_use]
    pub fn with_age(mut self, value: impl Into<String>) -> Self {
        self.age = Some(value.into());
        self
    }

    /// Set the salary
    #[must_use]
    pub fn with_salary(mut self, value: impl Into<String>) -> Self {
        self.salary = Some(value.into());
        self
    }

    /// Set the department
    #[must_use]
    pub fn with_department(mut self, value: impl Into<String>) -> Self {
        self.department = Some(value.into());
        self
    }

    /// Every field a draft carries, for full-replacement edits.
    #[must_use]
    pub fn from_draft(draft: &RecordDraft) -> Self {
        Self {
            first_name: Some(draft.first_name.clone()),
            last_name: Some(draft.last_name.clone()),
            email: Some(draft.email.clone()),
            age: Some(draft.age.clone()),
            salary: Some(draft.salary.clone()),
            department: Some(draft.department.clone()),
        }
    }
}

/// Shape raw rendered rows into records.
///
/// The table renderer injects padding rows to fill the page; anything
/// without the fixed cell count, or with nothing but whitespace in its data
/// cells, is layout rather than data.
fn records_from_rows(rows: &[Vec<String>]) -> Vec<TableRecord> {
    rows.iter()
        .filter(|cells| cells.len() == CELLS_PER_ROW)
        .map(|cells| TableRecord {
            first_name: cells[0].trim().to_string(),
            last_name: cells[1].trim().to_string(),
            age: cells[2].trim().to_string(),
            email: cells[3].trim().to_string(),
            salary: cells[4].trim().to_string(),
            department: cells[5].trim().to_string(),
        })
        .filter(|record| {
            !(record.first_name.is_empty()
                && record.last_name.is_empty()
                && record.age.is_empty()
                && record.email.is_empty()
                && record.salary.is_empty()
                && record.department.is_empty())
        })
        .collect()
}

/// Driver for the web table.
#[derive(Debug, Clone)]
pub struct WebTablePage {
    page: PageHandle,
}

impl WebTablePage {
    /// Path of the table under the site root.
    pub const PATH: &'static str = "/webtables";

    /// Wrap an already-open page.
    #[must_use]
    pub fn new(page: PageHandle) -> Self {
        Self { page }
    }

    /// Open the table in a new tab of the session.
    pub async fn open(session: &BrowserSession) -> SuiteResult<Self> {
        Ok(Self::new(session.open(Self::PATH).await?))
    }

    /// Open the entry dialog and wait for it to render.
    pub async fn open_entry_dialog(&self) -> SuiteResult<()> {
        self.page.click(ADD_BUTTON).await?;
        self.wait_for_dialog(true).await
    }

    /// Fill every entry dialog field from a draft.
    pub async fn fill_entry_form(&self, draft: &RecordDraft) -> SuiteResult<()> {
        self.page.fill(FIRST_NAME, &draft.first_name).await?;
        self.page.fill(LAST_NAME, &draft.last_name).await?;
        self.page.fill(EMAIL, &draft.email).await?;
        self.page.fill(AGE, &draft.age).await?;
        self.page.fill(SALARY, &draft.salary).await?;
        self.page.fill(DEPARTMENT, &draft.department).await?;
        Ok(())
    }

    /// Submit the entry dialog, expecting it to accept and close.
    pub async fn submit_entry(&self) -> SuiteResult<()> {
        self.page.click(SUBMIT).await?;
        self.wait_for_dialog(false).await
    }

    /// Submit the entry dialog, expecting validation to reject it and keep
    /// the dialog open.
    pub async fn submit_entry_expecting_rejection(&self) -> SuiteResult<()> {
        self.page.click(SUBMIT).await?;
        if self.page.visible(MODAL).await? {
            Ok(())
        } else {
            Err(SuiteError::assertion(
                "entry dialog closed despite invalid input",
            ))
        }
    }

    /// Close the entry dialog without submitting; no mutation happens.
    pub async fn cancel_entry(&self) -> SuiteResult<()> {
        self.page.click(MODAL_CLOSE).await?;
        self.wait_for_dialog(false).await
    }

    /// Create a record end to end: open dialog, fill, submit.
    pub async fn create(&self, draft: &RecordDraft) -> SuiteResult<()> {
        debug!(email = %draft.email, "creating table record");
        self.open_entry_dialog().await?;
        self.fill_entry_form(draft).await?;
        self.submit_entry().await
    }

    /// Write a filter term and wait for the rendered rows to settle.
    pub async fn search(&self, term: &str) -> SuiteResult<()> {
        debug!(term, "filtering table");
        self.page.fill(SEARCH_BOX, term).await?;
        let page = self.page.clone();
        until_stable(page.wait(), "filtered rows to settle", || {
            let page = page.clone();
            async move { extract_rows(&page).await }
        })
        .await?;
        Ok(())
    }

    /// Extract the currently rendered records.
    pub async fn records(&self) -> SuiteResult<Vec<TableRecord>> {
        let rows = extract_rows(&self.page).await?;
        Ok(records_from_rows(&rows))
    }

    /// Search by email and return the matching record, if any.
    pub async fn record_by_email(&self, email: &str) -> SuiteResult<Option<TableRecord>> {
        self.search(email).await?;
        let records = self.records().await?;
        Ok(records.into_iter().find(|record| record.email == email))
    }

    /// Edit the first record matching `email`: only fields present in the
    /// patch overwrite the current values.
    pub async fn edit(&self, email: &str, patch: &RecordPatch) -> SuiteResult<()> {
        debug!(email, "editing table record");
        self.search(email).await?;
        self.page.click(EDIT_BUTTONS).await?;
        self.wait_for_dialog(true).await?;

        if let Some(value) = &patch.first_name {
            self.page.fill(FIRST_NAME, value).await?;
        }
        if let Some(value) = &patch.last_name {
            self.page.fill(LAST_NAME, value).await?;
        }
        if let Some(value) = &patch.email {
            self.page.fill(EMAIL, value).await?;
        }
        if let Some(value) = &patch.age {
            self.page.fill(AGE, value).await?;
        }
        if let Some(value) = &patch.salary {
            self.page.fill(SALARY, value).await?;
        }
        if let Some(value) = &patch.department {
            self.page.fill(DEPARTMENT, value).await?;
        }

        self.submit_entry().await
    }

    /// Delete the first record matching `email`.
    pub async fn delete(&self, email: &str) -> SuiteResult<()> {
        debug!(email, "deleting table record");
        self.search(email).await?;
        self.page.click(DELETE_BUTTONS).await
    }

    /// Delete every currently visible record.
    pub async fn delete_all_visible(&self) -> SuiteResult<()> {
        for _ in 0..DELETE_ALL_LIMIT {
            if self.page.count(DELETE_BUTTONS).await? == 0 {
                return Ok(());
            }
            self.page.click(DELETE_BUTTONS).await?;
        }
        Err(SuiteError::assertion(format!(
            "table still has rows after {DELETE_ALL_LIMIT} delete sweeps"
        )))
    }

    /// Assert a record with `email` is present (or absent).
    pub async fn verify_exists(&self, email: &str, should_exist: bool) -> SuiteResult<()> {
        let found = self.record_by_email(email).await?.is_some();
        match (found, should_exist) {
            (true, true) | (false, false) => Ok(()),
            (false, true) => Err(SuiteError::assertion(format!(
                "record {email:?} not found in table"
            ))),
            (true, false) => Err(SuiteError::assertion(format!(
                "record {email:?} unexpectedly present in table"
            ))),
        }
    }

    /// Assert the empty-state indicator is shown.
    pub async fn verify_empty_state(&self) -> SuiteResult<()> {
        let page = self.page.clone();
        poll_until(page.wait(), "empty-state indicator", || {
            let page = page.clone();
            async move {
                Ok(if page.visible(NO_DATA).await? {
                    Some(())
                } else {
                    None
                })
            }
        })
        .await?;
        let text = self.page.text(NO_DATA).await?;
        if text.contains("No rows found") {
            Ok(())
        } else {
            Err(SuiteError::assertion(format!(
                "empty-state indicator shows {text:?}"
            )))
        }
    }

    /// Assert every required entry field shows the validation border.
    pub async fn verify_validation_errors(&self) -> SuiteResult<()> {
        let page = self.page.clone();
        let probe_js = format!(
            "(() => {{ \
             const border = s => {{ const el = document.querySelector(s); return el ? getComputedStyle(el).borderColor : ''; }}; \
             return [border({FIRST_NAME:?}), border({LAST_NAME:?}), border({EMAIL:?}), \
                     border({AGE:?}), border({SALARY:?}), border({DEPARTMENT:?})]; \
             }})()"
        );
        poll_until(page.wait(), "entry-field validation borders", || {
            let page = page.clone();
            let probe_js = probe_js.clone();
            async move {
                let colors: Vec<String> = page.eval(&probe_js).await?;
                Ok(if colors.iter().all(|c| c == INVALID_FIELD_COLOR) {
                    Some(())
                } else {
                    None
                })
            }
        })
        .await
    }

    async fn wait_for_dialog(&self, visible: bool) -> SuiteResult<()> {
        let what = if visible {
            "entry dialog to open"
        } else {
            "entry dialog to close"
        };
        let page = self.page.clone();
        poll_until(page.wait(), what, || {
            let page = page.clone();
            async move {
                Ok(if page.visible(MODAL).await? == visible {
                    Some(())
                } else {
                    None
                })
            }
        })
        .await
    }
}

/// Raw cell texts of every non-padding row group.
async fn extract_rows(page: &PageHandle) -> SuiteResult<Vec<Vec<String>>> {
    page.eval(&format!(
        "Array.from(document.querySelectorAll({ROW_GROUPS:?})) \
         .map(row => Array.from(row.querySelectorAll('.rt-td')).map(td => td.textContent))"
    ))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_row(first: &str, email: &str) -> Vec<String> {
        vec![
            first.to_string(),
            "Poudel".to_string(),
            "30".to_string(),
            email.to_string(),
            "50000".to_string(),
            "Engineering".to_string(),
            String::new(),
        ]
    }

    fn padding_row() -> Vec<String> {
        vec!["\u{a0}".to_string(); CELLS_PER_ROW]
    }

    #[test]
    fn extraction_keeps_only_data_rows() {
        let rows = vec![
            data_row("Binay", "binaypoudel@gmail.com"),
            padding_row(),
            data_row("Mohan", "mohan.kumar@gmail.com"),
            padding_row(),
            padding_row(),
        ];
        let records = records_from_rows(&rows);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].email, "binaypoudel@gmail.com");
        assert_eq!(records[1].first_name, "Mohan");
    }

    #[test]
    fn extraction_drops_rows_with_wrong_cell_count() {
        let rows = vec![
            vec!["No rows found".to_string()],
            data_row("Binay", "binaypoudel@gmail.com"),
            vec!["a".to_string(), "b".to_string()],
        ];
        let records = records_from_rows(&rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].first_name, "Binay");
    }

    #[test]
    fn extraction_trims_cell_whitespace() {
        let mut row = data_row(" Binay ", " binaypoudel@gmail.com\u{a0}");
        row[2] = " 30 ".to_string();
        let records = records_from_rows(&[row]);
        assert_eq!(records[0].first_name, "Binay");
        assert_eq!(records[0].age, "30");
        assert_eq!(records[0].email, "binaypoudel@gmail.com");
    }

    #[test]
    fn draft_renders_to_expected_record() {
        let draft = RecordDraft {
            first_name: "binay".to_string(),
            last_name: "poudel".to_string(),
            email: "binaypoudel@gmail.com".to_string(),
            age: "30".to_string(),
            salary: "50000".to_string(),
            department: "Engineering".to_string(),
        };
        let record = draft.expected_record();
        assert_eq!(record.email, draft.email);
        assert_eq!(record.department, "Engineering");
    }

    #[test]
    fn patch_builder_marks_only_set_fields() {
        let patch = RecordPatch::new().with_salary("60000");
        assert_eq!(patch.salary.as_deref(), Some("60000"));
        assert!(patch.first_name.is_none());
        assert!(patch.email.is_none());

        let draft = RecordDraft {
            first_name: "a".to_string(),
            last_name: "b".to_string(),
            email: "c@d.e".to_string(),
            age: "1".to_string(),
            salary: "2".to_string(),
            department: "f".to_string(),
        };
        let full = RecordPatch::from_draft(&draft);
        assert_eq!(full.email.as_deref(), Some("c@d.e"));
        assert!(full.department.is_some());
    }
}
