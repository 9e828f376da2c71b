//! Registration form scenarios.
//!
//! Browser-driven and opt-in: `cargo test --test practice_form -- --ignored`
//! with a chromium install available.

mod common;

use common::{ensure, UiScenario};
use demoqa_e2e::{fixtures, Gender, Hobby, PracticeFormPage, SuiteError};

#[tokio::test]
#[ignore = "drives a live browser against DemoQA"]
async fn valid_draft_submits_and_confirms_every_field() {
    let scenario = UiScenario::open(
        "valid_draft_submits_and_confirms_every_field",
        PracticeFormPage::PATH,
    )
    .await;
    let form = PracticeFormPage::new(scenario.page());
    let draft = fixtures::form_draft();

    let outcome = async {
        form.fill_draft(&draft).await?;
        form.submit().await?;
        form.wait_for_confirmation().await?;

        let full_name = format!("{} {}", draft.first_name, draft.last_name);
        form.verify_submitted("Student Name", &full_name).await?;
        form.verify_submitted("Student Email", &draft.email).await?;
        form.verify_submitted("Gender", draft.gender.label()).await?;
        form.verify_submitted("Mobile", &draft.phone).await?;
        form.verify_submitted("Date of Birth", &draft.date_of_birth_confirmation)
            .await?;
        form.verify_submitted("Subjects", &draft.subjects.join(", "))
            .await?;
        let hobbies = draft
            .hobbies
            .iter()
            .map(|h| h.label())
            .collect::<Vec<_>>()
            .join(", ");
        form.verify_submitted("Hobbies", &hobbies).await?;
        let picture_name = draft
            .picture
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        form.verify_submitted("Picture", &picture_name).await?;
        form.verify_submitted("Address", &draft.address).await?;
        let state_and_city = format!("{} {}", draft.state_name, draft.city_name);
        form.verify_submitted("State and City", &state_and_city)
            .await?;
        Ok(())
    }
    .await;
    scenario.finish(outcome).await;
}

#[tokio::test]
#[ignore = "drives a live browser against DemoQA"]
async fn empty_submission_flags_required_fields_and_shows_no_confirmation() {
    let scenario = UiScenario::open(
        "empty_submission_flags_required_fields_and_shows_no_confirmation",
        PracticeFormPage::PATH,
    )
    .await;
    let form = PracticeFormPage::new(scenario.page());

    let outcome = async {
        form.submit().await?;
        form.verify_required_field_errors().await?;
        ensure(
            !form.confirmation_visible().await?,
            "confirmation modal appeared for an empty submission",
        )
    }
    .await;
    scenario.finish(outcome).await;
}

#[tokio::test]
#[ignore = "drives a live browser against DemoQA"]
async fn malformed_email_is_rejected() {
    let scenario =
        UiScenario::open("malformed_email_is_rejected", PracticeFormPage::PATH).await;
    let form = PracticeFormPage::new(scenario.page());

    let outcome = async {
        form.fill_email(fixtures::invalid_email()).await?;
        form.submit().await?;
        form.verify_email_rejected().await
    }
    .await;
    scenario.finish(outcome).await;
}

#[tokio::test]
#[ignore = "drives a live browser against DemoQA"]
async fn malformed_phone_numbers_are_rejected() {
    let scenario =
        UiScenario::open("malformed_phone_numbers_are_rejected", PracticeFormPage::PATH).await;
    let form = PracticeFormPage::new(scenario.page());

    let outcome = async {
        for phone in fixtures::invalid_phones() {
            form.fill_phone(phone).await?;
            form.submit().await?;
            form.verify_phone_rejected().await?;
        }
        Ok(())
    }
    .await;
    scenario.finish(outcome).await;
}

#[tokio::test]
#[ignore = "drives a live browser against DemoQA"]
async fn gender_selection_toggles_each_radio() {
    let scenario =
        UiScenario::open("gender_selection_toggles_each_radio", PracticeFormPage::PATH).await;
    let form = PracticeFormPage::new(scenario.page());

    let outcome = async {
        for gender in Gender::ALL {
            form.select_gender(gender).await?;
            ensure(
                form.gender_selected(gender).await?,
                format!("{} radio did not select", gender.label()),
            )?;
        }
        Ok(())
    }
    .await;
    scenario.finish(outcome).await;
}

#[tokio::test]
#[ignore = "drives a live browser against DemoQA"]
async fn subjects_accumulate_in_selection_order() {
    let scenario = UiScenario::open(
        "subjects_accumulate_in_selection_order",
        PracticeFormPage::PATH,
    )
    .await;
    let form = PracticeFormPage::new(scenario.page());
    let draft = fixtures::form_draft();

    let outcome = async {
        form.select_subjects(&draft.subjects).await?;
        let selected = form.selected_subjects().await?;
        ensure(
            selected == draft.subjects,
            format!("expected {:?}, got {selected:?}", draft.subjects),
        )
    }
    .await;
    scenario.finish(outcome).await;
}

#[tokio::test]
#[ignore = "drives a live browser against DemoQA"]
async fn unknown_subject_is_not_added() {
    let scenario = UiScenario::open("unknown_subject_is_not_added", PracticeFormPage::PATH).await;
    let form = PracticeFormPage::new(scenario.page());

    let outcome = async {
        form.select_subject("abcdef").await?;
        let selected = form.selected_subjects().await?;
        ensure(
            selected.is_empty(),
            format!("autocomplete accepted an unknown subject: {selected:?}"),
        )
    }
    .await;
    scenario.finish(outcome).await;
}

#[tokio::test]
#[ignore = "drives a live browser against DemoQA"]
async fn hobby_combinations_tick_exactly_the_requested_boxes() {
    let scenario = UiScenario::open(
        "hobby_combinations_tick_exactly_the_requested_boxes",
        PracticeFormPage::PATH,
    )
    .await;
    let form = PracticeFormPage::new(scenario.page());

    let outcome = async {
        for combo in fixtures::hobby_combinations() {
            form.clear_hobbies().await?;
            form.select_hobbies(&combo).await?;
            for hobby in Hobby::ALL {
                let expected = combo.contains(&hobby);
                let actual = form.hobby_checked(hobby).await?;
                ensure(
                    actual == expected,
                    format!(
                        "{} checkbox: expected checked={expected} for combo {combo:?}",
                        hobby.label()
                    ),
                )?;
            }
        }
        Ok(())
    }
    .await;
    scenario.finish(outcome).await;
}

#[tokio::test]
#[ignore = "drives a live browser against DemoQA"]
async fn state_change_repopulates_city_options() {
    let scenario = UiScenario::open(
        "state_change_repopulates_city_options",
        PracticeFormPage::PATH,
    )
    .await;
    let form = PracticeFormPage::new(scenario.page());

    let outcome = async {
        for (state_index, (state, cities)) in fixtures::state_city_map().into_iter().enumerate() {
            // City always follows state: the selection resets the options.
            form.select_state(state_index).await?;
            let state_text = form.state_text().await?;
            ensure(
                state_text.contains(state),
                format!("state dropdown shows {state_text:?}, expected {state:?}"),
            )?;

            for (city_index, city) in cities.iter().enumerate() {
                form.select_city(city_index).await?;
                let city_text = form.city_text().await?;
                ensure(
                    city_text.contains(city),
                    format!("city dropdown shows {city_text:?}, expected {city:?}"),
                )?;
            }
        }
        Ok(())
    }
    .await;
    scenario.finish(outcome).await;
}

#[tokio::test]
#[ignore = "drives a live browser against DemoQA"]
async fn address_value_round_trips() {
    let scenario = UiScenario::open("address_value_round_trips", PracticeFormPage::PATH).await;
    let form = PracticeFormPage::new(scenario.page());
    let draft = fixtures::form_draft();

    let outcome = async {
        form.fill_address(&draft.address).await?;
        let value = form.address_value().await?;
        ensure(
            value == draft.address,
            format!("address field holds {value:?}"),
        )
    }
    .await;
    scenario.finish(outcome).await;
}

#[tokio::test]
#[ignore = "drives a live browser against DemoQA"]
async fn uploaded_picture_name_shows_in_the_control() {
    let scenario = UiScenario::open(
        "uploaded_picture_name_shows_in_the_control",
        PracticeFormPage::PATH,
    )
    .await;
    let form = PracticeFormPage::new(scenario.page());

    let outcome = async {
        form.upload_picture(&fixtures::picture_asset()).await?;
        let value = form.picture_value().await?;
        ensure(
            value.contains("sample-photo.jpg"),
            format!("upload control shows {value:?}"),
        )
    }
    .await;
    scenario.finish(outcome).await;
}

#[tokio::test]
#[ignore = "drives a live browser against DemoQA"]
async fn multi_file_upload_is_rejected_with_a_clear_message() {
    let scenario = UiScenario::open(
        "multi_file_upload_is_rejected_with_a_clear_message",
        PracticeFormPage::PATH,
    )
    .await;
    let form = PracticeFormPage::new(scenario.page());

    let outcome = async {
        let result = form
            .upload_pictures(&[fixtures::document_asset(), fixtures::picture_asset()])
            .await;
        match result {
            Err(SuiteError::Input { message }) => ensure(
                message.contains("single file"),
                format!("unexpected rejection message: {message:?}"),
            ),
            Ok(()) => Err(SuiteError::assertion(
                "multi-file upload was accepted by a single-file control",
            )),
            Err(other) => Err(other),
        }
    }
    .await;
    scenario.finish(outcome).await;
}

#[tokio::test]
#[ignore = "drives a live browser against DemoQA"]
async fn closing_the_confirmation_returns_to_the_form() {
    let scenario = UiScenario::open(
        "closing_the_confirmation_returns_to_the_form",
        PracticeFormPage::PATH,
    )
    .await;
    let form = PracticeFormPage::new(scenario.page());
    let draft = fixtures::form_draft();

    let outcome = async {
        form.fill_draft(&draft).await?;
        form.submit().await?;
        form.wait_for_confirmation().await?;
        form.close_confirmation().await?;
        ensure(
            !form.confirmation_visible().await?,
            "confirmation modal still visible after close",
        )
    }
    .await;
    scenario.finish(outcome).await;
}
