// ABOUTME: Performs onboarding step requests against the vendor API
// The state machine stays pure; this is the only place wizard steps touch the network

use super::state::{OnboardingState, StepPayload, StepRecord, WizardEffect};
use crate::api::{ApiError, VendorApi};
use tracing::debug;

/// Execute the create call described by a step payload
pub async fn perform(api: &dyn VendorApi, payload: &StepPayload) -> Result<StepRecord, ApiError> {
    match payload {
        StepPayload::Vendor(draft) => {
            debug!("Creating vendor '{}'", draft.business_name);
            api.create_vendor(draft).await.map(StepRecord::Vendor)
        }
        StepPayload::Contact(contact) => {
            debug!("Adding contact for vendor {}", contact.vendor_id);
            api.create_contact(contact).await.map(StepRecord::Contact)
        }
        StepPayload::Deal(deal) => {
            debug!("Creating deal for vendor {}", deal.vendor_id);
            api.create_deal(deal).await.map(StepRecord::Deal)
        }
        StepPayload::Note(note) => {
            debug!("Adding note for vendor {}", note.vendor_id);
            api.create_note(note).await.map(StepRecord::Note)
        }
    }
}

/// Carry an effect to its settled outcome, performing the request inline if one was emitted.
///
/// For callers that own the state across the await (CLI, tests). The TUI instead
/// spawns [`perform`] and applies the result when it arrives.
pub async fn settle(state: &mut OnboardingState, api: &dyn VendorApi, effect: WizardEffect) -> WizardEffect {
    match effect {
        WizardEffect::Perform(request) => {
            let result = perform(api, &request.payload).await;
            state.apply(request.ticket, result)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockVendorApi, Note, RecordId, Vendor, VendorDraft};
    use crate::components::onboarding::state::{OnboardingStep, WizardExit};

    fn acme(id: i64) -> Vendor {
        Vendor {
            id: RecordId::Int(id),
            fields: VendorDraft {
                business_name: "Acme".to_string(),
                name: "Jo".to_string(),
                email: "jo@acme.com".to_string(),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_submit_vendor_scenario() {
        let mut api = MockVendorApi::new();
        api.expect_create_vendor()
            .withf(|draft| draft.business_name == "Acme" && draft.email == "jo@acme.com")
            .times(1)
            .returning(|_| Ok(acme(42)));

        let mut state = OnboardingState::new();
        state.open();
        state.vendor.business_name = "Acme".to_string();
        state.vendor.name = "Jo".to_string();
        state.vendor.email = "jo@acme.com".to_string();

        let effect = state.submit_vendor();
        settle(&mut state, &api, effect).await;

        assert_eq!(state.current_step(), OnboardingStep::Contact);
        assert_eq!(state.created_vendor().map(|v| v.id.clone()), Some(RecordId::Int(42)));
    }

    #[tokio::test]
    async fn test_vendor_rejection_shows_detail() {
        let mut api = MockVendorApi::new();
        api.expect_create_vendor().times(1).returning(|_| {
            Err(ApiError::Rejected {
                status: 422,
                detail: Some("email required".to_string()),
            })
        });

        let mut state = OnboardingState::new();
        state.open();
        let effect = state.submit_vendor();
        settle(&mut state, &api, effect).await;

        assert_eq!(state.error_message.as_deref(), Some("email required"));
        assert_eq!(state.current_step(), OnboardingStep::Vendor);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_blank_steps_make_no_calls() {
        let mut api = MockVendorApi::new();
        api.expect_create_vendor().times(1).returning(|_| Ok(acme(42)));
        api.expect_create_contact().times(0);
        api.expect_create_deal().times(0);
        api.expect_create_note().times(0);

        let mut state = OnboardingState::new();
        state.open();
        let effect = state.submit_vendor();
        settle(&mut state, &api, effect).await;

        let effect = state.submit();
        settle(&mut state, &api, effect).await;
        assert_eq!(state.current_step(), OnboardingStep::Deal);

        let effect = state.submit();
        settle(&mut state, &api, effect).await;
        assert_eq!(state.current_step(), OnboardingStep::Note);

        let effect = state.submit();
        let exit = settle(&mut state, &api, effect).await.into_exit();
        assert_eq!(exit, Some(WizardExit::Completed(acme(42))));
    }

    #[tokio::test]
    async fn test_note_scenario_completes_with_vendor() {
        let mut api = MockVendorApi::new();
        api.expect_create_vendor().times(1).returning(|_| Ok(acme(42)));
        api.expect_create_note()
            .withf(|note| note.vendor_id == RecordId::Int(42) && note.content == "follow up")
            .times(1)
            .returning(|note| {
                Ok(Note {
                    id: RecordId::Int(9),
                    vendor_id: note.vendor_id.clone(),
                    content: note.content.clone(),
                    author: None,
                })
            });

        let mut state = OnboardingState::new();
        state.open();
        let effect = state.submit_vendor();
        settle(&mut state, &api, effect).await;
        state.skip();
        state.skip();
        state.note.content = "follow up".to_string();

        let effect = state.submit_note();
        let exit = settle(&mut state, &api, effect).await.into_exit();

        assert_eq!(exit, Some(WizardExit::Completed(acme(42))));
        assert!(!state.visible);
        assert_eq!(state.current_step(), OnboardingStep::Vendor);
        assert!(state.note.content.is_empty());
    }

    #[tokio::test]
    async fn test_note_failure_keeps_step() {
        let mut api = MockVendorApi::new();
        api.expect_create_vendor().returning(|_| Ok(acme(42)));
        api.expect_create_note().returning(|_| {
            Err(ApiError::Rejected {
                status: 500,
                detail: None,
            })
        });

        let mut state = OnboardingState::new();
        state.open();
        let effect = state.submit_vendor();
        settle(&mut state, &api, effect).await;
        state.skip();
        state.skip();
        state.note.content = "follow up".to_string();

        let effect = state.submit_note();
        settle(&mut state, &api, effect).await;

        assert_eq!(state.current_step(), OnboardingStep::Note);
        assert_eq!(state.error_message.as_deref(), Some("Failed to add note"));
        assert!(state.visible);
        assert!(state.created_vendor().is_some());
    }
}
