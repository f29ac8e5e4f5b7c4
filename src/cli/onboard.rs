// ABOUTME: CLI onboard command - drives the onboarding wizard from flags without a terminal UI
//
// Each step is submitted in order with the same rules as the TUI: blank optional
// steps advance without a request, and the first failure stops the run.

use super::util::print_json;
use super::{OnboardArgs, OutputFormat};
use crate::api::{ContactDraft, DealDraft, NoteDraft, Vendor, VendorApi};
use crate::components::onboarding::runner;
use crate::components::onboarding::{AdvanceReason, OnboardingState, OnboardingStep, WizardEffect};
use anyhow::{anyhow, bail, Result};
use serde::Serialize;
use tracing::info;

/// What happened at each step of a headless run
#[derive(Debug, Clone, Serialize)]
pub struct OnboardReport {
    pub vendor: Vendor,
    pub steps: Vec<StepOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub step: String,
    pub outcome: &'static str,
}

impl StepOutcome {
    fn new(step: OnboardingStep, reason: AdvanceReason) -> Self {
        let outcome = match reason {
            AdvanceReason::Created => "created",
            AdvanceReason::EmptyDraft | AdvanceReason::Skipped => "skipped",
        };
        Self {
            step: step.title().to_string(),
            outcome,
        }
    }
}

/// Execute the onboard command
pub async fn execute(api: &dyn VendorApi, args: OnboardArgs, format: OutputFormat) -> Result<()> {
    let mut wizard = OnboardingState::new();
    wizard.open();
    fill_drafts(&mut wizard, &args);

    let report = run(&mut wizard, api).await?;

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            println!(
                "Onboarded {} ({})",
                report.vendor.fields.business_name, report.vendor.id
            );
            for step in &report.steps {
                println!("  {:<24} {}", step.step, step.outcome);
            }
        }
    }
    Ok(())
}

fn fill_drafts(wizard: &mut OnboardingState, args: &OnboardArgs) {
    wizard.vendor = args.vendor.to_draft();
    wizard.contact = ContactDraft {
        name: args.contact_name.clone(),
        email: args.contact_email.clone(),
        phone: args.contact_phone.clone(),
        title: args.contact_title.clone(),
    };
    wizard.deal = DealDraft {
        title: args.deal_title.clone(),
        value: args.deal_value.clone(),
        currency: args.deal_currency.clone(),
        stage: args.deal_stage,
    };
    wizard.note = NoteDraft {
        content: args.note.clone(),
    };
}

/// Submit steps until the wizard completes or a step fails
pub async fn run(wizard: &mut OnboardingState, api: &dyn VendorApi) -> Result<OnboardReport> {
    let mut steps = Vec::new();

    loop {
        let step = wizard.current_step();
        let effect = wizard.submit();
        match runner::settle(wizard, api, effect).await {
            WizardEffect::Advanced(transition) => {
                steps.push(StepOutcome::new(transition.from, transition.reason));
            }
            WizardEffect::Completed { vendor, reason } => {
                steps.push(StepOutcome::new(step, reason));
                info!("Headless onboarding finished for vendor {}", vendor.id);
                return Ok(OnboardReport { vendor, steps });
            }
            WizardEffect::Failed(message) => bail!("{}: {}", step.title(), message),
            other => return Err(anyhow!("Onboarding stalled at {}: {:?}", step.title(), other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockVendorApi, NewContact, RecordId, VendorDraft};
    use pretty_assertions::assert_eq;

    fn wizard_with_vendor() -> OnboardingState {
        let mut wizard = OnboardingState::new();
        wizard.open();
        wizard.vendor = VendorDraft {
            business_name: "Acme".to_string(),
            name: "Jo".to_string(),
            email: "jo@acme.com".to_string(),
            ..Default::default()
        };
        wizard
    }

    #[tokio::test]
    async fn test_vendor_only_skips_the_rest() {
        let mut api = MockVendorApi::new();
        api.expect_create_vendor().times(1).returning(|draft| {
            Ok(Vendor {
                id: RecordId::Int(42),
                fields: draft.clone(),
            })
        });
        api.expect_create_contact().times(0);
        api.expect_create_deal().times(0);
        api.expect_create_note().times(0);

        let mut wizard = wizard_with_vendor();
        let report = run(&mut wizard, &api).await.unwrap();

        assert_eq!(report.vendor.id, RecordId::Int(42));
        let outcomes: Vec<&str> = report.steps.iter().map(|s| s.outcome).collect();
        assert_eq!(outcomes, vec!["created", "skipped", "skipped", "skipped"]);
        assert!(!wizard.visible);
    }

    #[tokio::test]
    async fn test_contact_failure_stops_run() {
        let mut api = MockVendorApi::new();
        api.expect_create_vendor().returning(|draft| {
            Ok(Vendor {
                id: RecordId::Int(42),
                fields: draft.clone(),
            })
        });
        api.expect_create_contact()
            .withf(|contact: &NewContact| contact.vendor_id == RecordId::Int(42))
            .returning(|_| {
                Err(ApiError::Rejected {
                    status: 422,
                    detail: Some("email invalid".to_string()),
                })
            });
        api.expect_create_deal().times(0);

        let mut wizard = wizard_with_vendor();
        wizard.contact.name = "Sam".to_string();
        let err = run(&mut wizard, &api).await.unwrap_err();

        assert_eq!(err.to_string(), "Contact: email invalid");
        assert_eq!(wizard.current_step(), OnboardingStep::Contact);
    }
}
