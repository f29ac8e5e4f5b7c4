// ABOUTME: Vendor onboarding wizard: four-step state machine, request runner and overlay rendering

pub mod component;
pub mod runner;
pub mod state;

pub use component::OnboardingComponent;
pub use state::{
    AdvanceReason, FieldKind, FieldSpec, OnboardingState, OnboardingStep, StepPayload, StepRecord, StepRequest,
    StepTicket, StepTransition, WizardEffect, WizardExit,
};
