//! Student registration form page.
//!
//! Each control gets one idempotent "set to value" operation. The subjects
//! autocomplete needs per-character typing (the widget builds its suggestion
//! list reactively), and state/city is a cascading pair: picking a state
//! re-populates the city options, so the city is always selected after the
//! state, by position.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::error::{SuiteError, SuiteResult};
use crate::pages::INVALID_FIELD_COLOR;
use crate::session::{BrowserSession, PageHandle};
use crate::wait::poll_until;

const FIRST_NAME: &str = "#firstName";
const LAST_NAME: &str = "#lastName";
const EMAIL: &str = "#userEmail";
const PHONE: &str = "#userNumber";
const DATE_OF_BIRTH: &str = "#dateOfBirthInput";
const SUBJECTS_INPUT: &str = "#subjectsInput";
const SUBJECT_LABELS: &str = ".subjects-auto-complete__multi-value__label";
const UPLOAD_PICTURE: &str = "#uploadPicture";
const ADDRESS: &str = "#currentAddress";
const STATE: &str = "#state";
const CITY: &str = "#city";
const SUBMIT: &str = "#submit";
const MODAL: &str = ".modal-content";
const MODAL_CLOSE: &str = "#closeLargeModal";

/// Keystroke pacing for the subjects autocomplete.
const AUTOCOMPLETE_KEY_DELAY: Duration = Duration::from_millis(100);

/// Gender radio options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    /// "Male"
    Male,
    /// "Female"
    Female,
    /// "Other"
    Other,
}

impl Gender {
    /// All options, in rendered order.
    pub const ALL: [Self; 3] = [Self::Male, Self::Female, Self::Other];

    /// Rendered label text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }

    /// Selector of the clickable label (the radio input itself is hidden).
    #[must_use]
    pub const fn label_selector(self) -> &'static str {
        match self {
            Self::Male => r#"label[for="gender-radio-1"]"#,
            Self::Female => r#"label[for="gender-radio-2"]"#,
            Self::Other => r#"label[for="gender-radio-3"]"#,
        }
    }

    /// Selector of the underlying radio input, for checked-state readback.
    #[must_use]
    pub const fn input_selector(self) -> &'static str {
        match self {
            Self::Male => "#gender-radio-1",
            Self::Female => "#gender-radio-2",
            Self::Other => "#gender-radio-3",
        }
    }
}

/// Hobby checkbox options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hobby {
    /// "Sports"
    Sports,
    /// "Reading"
    Reading,
    /// "Music"
    Music,
}

impl Hobby {
    /// All options, in rendered order.
    pub const ALL: [Self; 3] = [Self::Sports, Self::Reading, Self::Music];

    /// Rendered label text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sports => "Sports",
            Self::Reading => "Reading",
            Self::Music => "Music",
        }
    }

    /// Selector of the clickable label.
    #[must_use]
    pub const fn label_selector(self) -> &'static str {
        match self {
            Self::Sports => r#"label[for="hobbies-checkbox-1"]"#,
            Self::Reading => r#"label[for="hobbies-checkbox-2"]"#,
            Self::Music => r#"label[for="hobbies-checkbox-3"]"#,
        }
    }

    /// Selector of the underlying checkbox input.
    #[must_use]
    pub const fn input_selector(self) -> &'static str {
        match self {
            Self::Sports => "#hobbies-checkbox-1",
            Self::Reading => "#hobbies-checkbox-2",
            Self::Music => "#hobbies-checkbox-3",
        }
    }
}

/// The react-select widgets assign positional option ids per dropdown.
fn state_option_selector(index: usize) -> String {
    format!(r#"div[id="react-select-3-option-{index}"]"#)
}

fn city_option_selector(index: usize) -> String {
    format!(r#"div[id="react-select-4-option-{index}"]"#)
}

/// Everything a single form submission scenario needs, owned per scenario.
#[derive(Debug, Clone)]
pub struct FormDraft {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Gender radio choice
    pub gender: Gender,
    /// Ten-digit phone number
    pub phone: String,
    /// Date of birth as typed into the picker ("13 Feb 1996")
    pub date_of_birth: String,
    /// Date of birth as the confirmation modal renders it
    pub date_of_birth_confirmation: String,
    /// Subjects picked through the autocomplete
    pub subjects: Vec<String>,
    /// Hobby checkboxes to tick
    pub hobbies: Vec<Hobby>,
    /// Picture to upload
    pub picture: PathBuf,
    /// Current address
    pub address: String,
    /// Positional index of the state option
    pub state_index: usize,
    /// Expected state label
    pub state_name: String,
    /// Positional index of the city option (valid for the chosen state)
    pub city_index: usize,
    /// Expected city label
    pub city_name: String,
}

/// Driver for the registration form.
#[derive(Debug, Clone)]
pub struct PracticeFormPage {
    page: PageHandle,
}

impl PracticeFormPage {
    /// Path of the form under the site root.
    pub const PATH: &'static str = "/automation-practice-form";

    /// Wrap an already-open page.
    #[must_use]
    pub fn new(page: PageHandle) -> Self {
        Self { page }
    }

    /// Open the form in a new tab of the session.
    pub async fn open(session: &BrowserSession) -> SuiteResult<Self> {
        Ok(Self::new(session.open(Self::PATH).await?))
    }

    /// Set the first name field.
    pub async fn fill_first_name(&self, name: &str) -> SuiteResult<()> {
        self.page.fill(FIRST_NAME, name).await
    }

    /// Set the last name field.
    pub async fn fill_last_name(&self, name: &str) -> SuiteResult<()> {
        self.page.fill(LAST_NAME, name).await
    }

    /// Set the email field.
    pub async fn fill_email(&self, email: &str) -> SuiteResult<()> {
        self.page.fill(EMAIL, email).await
    }

    /// Set the phone number field.
    pub async fn fill_phone(&self, number: &str) -> SuiteResult<()> {
        self.page.fill(PHONE, number).await
    }

    /// Set the address field.
    pub async fn fill_address(&self, address: &str) -> SuiteResult<()> {
        self.page.fill(ADDRESS, address).await
    }

    /// Current value of the address field.
    pub async fn address_value(&self) -> SuiteResult<String> {
        self.page.value(ADDRESS).await
    }

    /// Pick a gender radio.
    pub async fn select_gender(&self, gender: Gender) -> SuiteResult<()> {
        self.page.click(gender.label_selector()).await
    }

    /// Whether a gender radio is currently selected.
    pub async fn gender_selected(&self, gender: Gender) -> SuiteResult<bool> {
        self.page.checked(gender.input_selector()).await
    }

    /// Type a date and confirm the picker with Enter.
    pub async fn set_date_of_birth(&self, date: &str) -> SuiteResult<()> {
        self.page.fill(DATE_OF_BIRTH, date).await?;
        self.page.press(DATE_OF_BIRTH, "Enter").await
    }

    /// Pick one subject through the autocomplete: focus, type character by
    /// character so the suggestion list renders, confirm with Enter.
    pub async fn select_subject(&self, subject: &str) -> SuiteResult<()> {
        debug!(subject, "selecting subject");
        self.page
            .type_slowly(SUBJECTS_INPUT, subject, AUTOCOMPLETE_KEY_DELAY)
            .await?;
        self.page.press(SUBJECTS_INPUT, "Enter").await
    }

    /// Pick several subjects in order.
    pub async fn select_subjects(&self, subjects: &[impl AsRef<str>]) -> SuiteResult<()> {
        for subject in subjects {
            self.select_subject(subject.as_ref()).await?;
        }
        Ok(())
    }

    /// Labels of the currently selected subjects.
    pub async fn selected_subjects(&self) -> SuiteResult<Vec<String>> {
        self.page
            .eval(&format!(
                "Array.from(document.querySelectorAll({SUBJECT_LABELS:?})).map(el => el.textContent)"
            ))
            .await
    }

    /// Toggle one hobby checkbox.
    pub async fn toggle_hobby(&self, hobby: Hobby) -> SuiteResult<()> {
        self.page.click(hobby.label_selector()).await
    }

    /// Whether a hobby checkbox is ticked.
    pub async fn hobby_checked(&self, hobby: Hobby) -> SuiteResult<bool> {
        self.page.checked(hobby.input_selector()).await
    }

    /// Tick each hobby in the slice.
    pub async fn select_hobbies(&self, hobbies: &[Hobby]) -> SuiteResult<()> {
        for &hobby in hobbies {
            self.toggle_hobby(hobby).await?;
        }
        Ok(())
    }

    /// Untick any currently ticked hobby.
    pub async fn clear_hobbies(&self) -> SuiteResult<()> {
        for hobby in Hobby::ALL {
            if self.hobby_checked(hobby).await? {
                self.toggle_hobby(hobby).await?;
            }
        }
        Ok(())
    }

    /// Attach one picture to the upload control.
    pub async fn upload_picture(&self, path: &Path) -> SuiteResult<()> {
        self.upload_pictures(&[path.to_path_buf()]).await
    }

    /// Attach files to the upload control.
    ///
    /// The control is a single-file input; handing it more than one file is
    /// rejected up front so negative scenarios can assert on the message.
    pub async fn upload_pictures(&self, paths: &[PathBuf]) -> SuiteResult<()> {
        if paths.len() > 1 {
            let element = self.page.find(UPLOAD_PICTURE).await?;
            let multiple = element
                .attribute("multiple")
                .await
                .map_err(|e| SuiteError::Page {
                    message: e.to_string(),
                })?;
            if multiple.is_none() {
                return Err(SuiteError::Input {
                    message: "non-multiple file input can only accept a single file".to_string(),
                });
            }
        }
        self.page.set_input_files(UPLOAD_PICTURE, paths).await
    }

    /// Current value of the upload control (browser-mangled file path).
    pub async fn picture_value(&self) -> SuiteResult<String> {
        self.page.value(UPLOAD_PICTURE).await
    }

    /// Pick a state by position. Re-populates the city options.
    pub async fn select_state(&self, index: usize) -> SuiteResult<()> {
        self.page.click(STATE).await?;
        self.page.click(&state_option_selector(index)).await
    }

    /// Pick a city by position. Only valid after a state is selected.
    pub async fn select_city(&self, index: usize) -> SuiteResult<()> {
        self.page.click(CITY).await?;
        self.page.click(&city_option_selector(index)).await
    }

    /// Rendered text of the state dropdown.
    pub async fn state_text(&self) -> SuiteResult<String> {
        self.page.text(STATE).await
    }

    /// Rendered text of the city dropdown.
    pub async fn city_text(&self) -> SuiteResult<String> {
        self.page.text(CITY).await
    }

    /// Fill every control from a draft. Submission stays separate.
    pub async fn fill_draft(&self, draft: &FormDraft) -> SuiteResult<()> {
        self.fill_first_name(&draft.first_name).await?;
        self.fill_last_name(&draft.last_name).await?;
        self.fill_email(&draft.email).await?;
        self.select_gender(draft.gender).await?;
        self.fill_phone(&draft.phone).await?;
        self.set_date_of_birth(&draft.date_of_birth).await?;
        self.select_subjects(&draft.subjects).await?;
        self.select_hobbies(&draft.hobbies).await?;
        self.upload_picture(&draft.picture).await?;
        self.fill_address(&draft.address).await?;
        self.select_state(draft.state_index).await?;
        self.select_city(draft.city_index).await?;
        Ok(())
    }

    /// Submit the form.
    pub async fn submit(&self) -> SuiteResult<()> {
        self.page.click(SUBMIT).await
    }

    /// Whether the confirmation modal is currently shown.
    pub async fn confirmation_visible(&self) -> SuiteResult<bool> {
        self.page.visible(MODAL).await
    }

    /// Wait for the confirmation modal to appear.
    pub async fn wait_for_confirmation(&self) -> SuiteResult<()> {
        let page = self.page.clone();
        poll_until(page.wait(), "submission confirmation modal", || {
            let page = page.clone();
            async move {
                Ok(if page.visible(MODAL).await? {
                    Some(())
                } else {
                    None
                })
            }
        })
        .await
    }

    /// Value the confirmation table shows for a label.
    pub async fn submitted_value(&self, label: &str) -> SuiteResult<String> {
        let value: Option<String> = self
            .page
            .eval(&format!(
                "(() => {{ \
                 const cell = Array.from(document.querySelectorAll('.modal-content td')) \
                     .find(td => td.textContent.trim() === {label:?}); \
                 return cell && cell.nextElementSibling ? cell.nextElementSibling.textContent : null; \
                 }})()"
            ))
            .await?;
        value.ok_or_else(|| SuiteError::assertion(format!("no confirmation row labeled {label:?}")))
    }

    /// Assert the confirmation value for `label` contains `expected`.
    pub async fn verify_submitted(&self, label: &str, expected: &str) -> SuiteResult<()> {
        let actual = self.submitted_value(label).await?;
        if actual.contains(expected) {
            Ok(())
        } else {
            Err(SuiteError::assertion(format!(
                "confirmation row {label:?}: expected {expected:?} within {actual:?}"
            )))
        }
    }

    /// Close the confirmation modal and wait for it to disappear.
    pub async fn close_confirmation(&self) -> SuiteResult<()> {
        self.page.click(MODAL_CLOSE).await?;
        let page = self.page.clone();
        poll_until(page.wait(), "confirmation modal to close", || {
            let page = page.clone();
            async move {
                Ok(if page.visible(MODAL).await? {
                    None
                } else {
                    Some(())
                })
            }
        })
        .await
    }

    /// Assert every required field shows its validation color after an
    /// empty submission: error border on the text inputs, error label color
    /// on the gender radios.
    pub async fn verify_required_field_errors(&self) -> SuiteResult<()> {
        let page = self.page.clone();
        let probe_js = format!(
            "(() => {{ \
             const border = s => {{ const el = document.querySelector(s); return el ? getComputedStyle(el).borderColor : ''; }}; \
             const color = s => {{ const el = document.querySelector(s); return el ? getComputedStyle(el).color : ''; }}; \
             return [border({FIRST_NAME:?}), border({LAST_NAME:?}), border({PHONE:?}), \
                     color({male:?}), color({female:?}), color({other:?})]; \
             }})()",
            male = Gender::Male.label_selector(),
            female = Gender::Female.label_selector(),
            other = Gender::Other.label_selector(),
        );
        poll_until(page.wait(), "required-field validation colors", || {
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

    /// Assert the email field shows the validation border.
    pub async fn verify_email_rejected(&self) -> SuiteResult<()> {
        self.verify_field_border(EMAIL).await
    }

    /// Assert the phone field shows the validation border.
    pub async fn verify_phone_rejected(&self) -> SuiteResult<()> {
        self.verify_field_border(PHONE).await
    }

    async fn verify_field_border(&self, selector: &str) -> SuiteResult<()> {
        let page = self.page.clone();
        let selector = selector.to_string();
        poll_until(page.wait(), "field validation border", || {
            let page = page.clone();
            let selector = selector.clone();
            async move {
                let color = page.computed_style(&selector, "border-color").await?;
                Ok((color == INVALID_FIELD_COLOR).then_some(()))
            }
        })
        .await
    }
}
