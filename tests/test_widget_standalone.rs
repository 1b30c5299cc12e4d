//! Widget behavior when running as the top-level page.

mod mocks;

use deliverease_widget::domain::DeliveryAvailability;
use deliverease_widget::{
    FrameContext, Language, LookupOutcome, ManualEntryError, ManualField, OutcomeKind,
    PostalCode, WidgetError,
};
use mocks::{harness, harness_with_language, MockLookupClient, MockResponse};
use std::sync::Mutex;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_success_shows_toast_only() {
    let h = harness(FrameContext::Standalone, MockLookupClient::found());

    h.widget.on_input("91234567");
    let outcome = assert_ok!(h.widget.submit().await);

    assert_eq!(outcome.kind(), OutcomeKind::Success);
    assert_eq!(h.ui.toasts(), vec!["Address found!".to_string()]);
    assert!(h.ui.opened_forms().is_empty());
    assert_eq!(h.parent.count(), 0);
    assert!(!h.widget.is_loading());
}

#[tokio::test]
async fn test_rate_limit_opens_modal_with_busy_text() {
    let h = harness(
        FrameContext::Standalone,
        MockLookupClient::new(MockResponse::Status(429)),
    );

    h.widget.on_input("91234567");
    let outcome = assert_ok!(h.widget.submit().await);
    assert_eq!(outcome, LookupOutcome::RateLimited);

    let form = h.widget.manual_entry().unwrap();
    assert_eq!(form.phone().as_str(), "91234567");
    assert!(form.advisory().unwrap().contains("temporarily busy"));
    assert!(form.is_empty());
    assert!(h.ui.modal_visible());
    assert!(h.ui.toasts().is_empty());
    assert_eq!(h.parent.count(), 0);
}

#[tokio::test]
async fn test_norwegian_catalog_drives_messages() {
    let h = harness_with_language(
        FrameContext::Standalone,
        MockLookupClient::found(),
        Language::No,
    );

    h.widget.on_input("91234567");
    assert_ok!(h.widget.submit().await);
    assert_eq!(h.ui.toasts(), vec!["Adresse funnet!".to_string()]);
}

#[tokio::test]
async fn test_not_found_opens_modal() {
    let h = harness(
        FrameContext::Standalone,
        MockLookupClient::new(MockResponse::Status(404)),
    );

    h.widget.on_input("91234567");
    let outcome = assert_ok!(h.widget.submit().await);
    assert_eq!(outcome, LookupOutcome::LookupFailed { status: 404 });

    let forms = h.ui.opened_forms();
    assert_eq!(forms.len(), 1);
    assert_eq!(
        forms[0].advisory(),
        Some("We could not find your address. Please enter it manually.")
    );
}

#[tokio::test]
async fn test_input_is_sanitized() {
    let h = harness(FrameContext::Standalone, MockLookupClient::found());

    let state = h.widget.on_input("+47 912-34-567");
    assert_eq!(state.value, "4791234567");
    assert!(state.changed);
    assert!(!state.valid);

    let state = h.widget.on_input("91234567");
    assert!(!state.changed);
    assert!(state.submit_enabled);
    assert_eq!(h.widget.input_state(), state);
}

#[tokio::test]
async fn test_paste_is_sanitized() {
    let h = harness(FrameContext::Standalone, MockLookupClient::found());

    let field = Mutex::new(String::from("9"));

    // The host inserts the pasted text after the paste event fires.
    let (state, _) = tokio::join!(
        h.widget.on_paste(|| field.lock().unwrap().clone()),
        async {
            *field.lock().unwrap() = "9 12 34 567 ".to_string();
        }
    );

    assert_eq!(state.value, "91234567");
    assert!(state.changed);
    assert!(state.valid);
    assert_eq!(h.widget.input_state().value, "91234567");
}

#[tokio::test]
async fn test_manual_submit_after_failure() {
    let h = harness(
        FrameContext::Standalone,
        MockLookupClient::new(MockResponse::Status(503)),
    );

    h.widget.on_input("91234567");
    assert_ok!(h.widget.submit().await);

    h.widget
        .set_manual_field(ManualField::FullName, "Ola Nordmann")
        .unwrap();
    h.widget
        .set_manual_field(ManualField::Address, "Storgata 1")
        .unwrap();
    h.widget
        .set_manual_field(ManualField::PostalCode, "0155")
        .unwrap();

    // City missing: the form stays open with what was typed.
    let err = assert_err!(h.widget.submit_manual_entry());
    assert!(matches!(
        err,
        WidgetError::ManualEntry(ManualEntryError::MissingField("city"))
    ));
    assert_eq!(h.widget.manual_entry().unwrap().address, "Storgata 1");

    h.widget.set_manual_field(ManualField::City, "Oslo").unwrap();
    let data = assert_ok!(h.widget.submit_manual_entry());
    assert_eq!(data.phone_number.as_str(), "91234567");
    assert_eq!(data.postal_code, "0155");

    assert!(!h.ui.modal_visible());
    assert_eq!(
        h.ui.toasts(),
        vec!["Thank you! Your address has been saved.".to_string()]
    );
    assert_eq!(h.parent.count(), 0);
}

#[tokio::test]
async fn test_open_manual_entry_requires_valid_phone() {
    let h = harness(FrameContext::Standalone, MockLookupClient::found());

    h.widget.on_input("123");
    assert!(matches!(
        h.widget.open_manual_entry(),
        Err(WidgetError::Validation(_))
    ));
    assert!(h.widget.manual_entry().is_none());

    assert!(matches!(
        h.widget.cancel_manual_entry(),
        Err(WidgetError::ManualEntry(ManualEntryError::NotOpen))
    ));
}

#[tokio::test]
async fn test_reset_closes_modal_and_clears_input() {
    let h = harness(
        FrameContext::Standalone,
        MockLookupClient::new(MockResponse::Status(429)),
    );

    h.widget.on_input("91234567");
    assert_ok!(h.widget.submit().await);
    assert!(h.ui.modal_visible());

    h.widget.reset();
    assert!(!h.ui.modal_visible());
    assert!(h.widget.manual_entry().is_none());
    assert_eq!(h.widget.input_state().value, "");
    assert!(!h.widget.input_state().submit_enabled);
    assert_eq!(h.widget.metrics().summary().manual_entries_cancelled, 1);

    // Nothing open: a second reset records no further cancellation.
    h.widget.reset();
    assert_eq!(h.widget.metrics().summary().manual_entries_cancelled, 1);
}

#[tokio::test]
async fn test_check_delivery_uses_catalog_language() {
    let client = MockLookupClient::found().with_availability(DeliveryAvailability {
        serviceable: true,
        delivery_options: vec!["Hjemlevering".to_string()],
        message: None,
    });
    let h = harness_with_language(FrameContext::Standalone, client, Language::No);

    let availability = assert_ok!(
        h.widget
            .check_delivery(&PostalCode::new("0155").unwrap())
            .await
    );
    assert!(availability.serviceable);
    assert_eq!(h.client.last_language(), Some(Language::No));
    assert_eq!(h.client.get_call_count("check_delivery"), 1);
}

#[tokio::test]
async fn test_check_delivery_error_surfaces() {
    let h = harness(FrameContext::Standalone, MockLookupClient::found());

    let err = assert_err!(
        h.widget
            .check_delivery(&PostalCode::new("9999").unwrap())
            .await
    );
    assert!(matches!(err, WidgetError::Delivery(_)));
    assert!(h.ui.untouched());
}
