// ABOUTME: State management for the vendor onboarding wizard
// Tracks current step, per-step drafts, the created vendor, and request generations

use crate::api::{
    ApiError, Contact, ContactDraft, Deal, DealDraft, NewContact, NewDeal, NewNote, Note,
    NoteDraft, RecordId, Vendor, VendorDraft,
};
use tracing::{debug, info, warn};

/// Steps in the onboarding wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnboardingStep {
    Vendor,
    Contact,
    Deal,
    Note,
}

impl OnboardingStep {
    /// Get all steps in order
    pub const fn all() -> &'static [Self] {
        &[Self::Vendor, Self::Contact, Self::Deal, Self::Note]
    }

    /// Get the step number (1-indexed for display)
    pub const fn number(self) -> usize {
        match self {
            Self::Vendor => 1,
            Self::Contact => 2,
            Self::Deal => 3,
            Self::Note => 4,
        }
    }

    /// Get the total number of steps
    pub const fn total() -> usize {
        4
    }

    /// Get display title for this step
    pub const fn title(self) -> &'static str {
        match self {
            Self::Vendor => "Vendor",
            Self::Contact => "Contact",
            Self::Deal => "Deal",
            Self::Note => "Note",
        }
    }

    /// Get description for this step
    pub const fn description(self) -> &'static str {
        match self {
            Self::Vendor => "Start by adding the vendor's basic info.",
            Self::Contact => "Add a primary contact (optional). You can skip this step.",
            Self::Deal => "Create a first deal to track in your pipeline (optional).",
            Self::Note => "Leave a note to capture any context (optional).",
        }
    }

    /// Message shown when this step's create call fails without a server detail
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Vendor => "Failed to create vendor",
            Self::Contact => "Failed to add contact",
            Self::Deal => "Failed to create deal",
            Self::Note => "Failed to add note",
        }
    }

    /// Get the next step, if any
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Vendor => Some(Self::Contact),
            Self::Contact => Some(Self::Deal),
            Self::Deal => Some(Self::Note),
            Self::Note => None,
        }
    }

    /// Get the previous step, if any
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Vendor => None,
            Self::Contact => Some(Self::Vendor),
            Self::Deal => Some(Self::Contact),
            Self::Note => Some(Self::Deal),
        }
    }

    /// Optional steps can be skipped and auto-skip when left blank
    pub const fn is_optional(self) -> bool {
        !matches!(self, Self::Vendor)
    }

    /// Form fields shown on this step
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Vendor => &VENDOR_FIELDS,
            Self::Contact => &CONTACT_FIELDS,
            Self::Deal => &DEAL_FIELDS,
            Self::Note => &NOTE_FIELDS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Accepts digits, sign and decimal point only
    Numeric,
    /// Cycled with left/right rather than typed
    Choice,
    Multiline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn field(label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { label, kind }
}

const VENDOR_FIELDS: [FieldSpec; 6] = [
    field("Business name", FieldKind::Text),
    field("Category", FieldKind::Text),
    field("Primary contact name", FieldKind::Text),
    field("Primary contact email", FieldKind::Text),
    field("Phone", FieldKind::Text),
    field("Website", FieldKind::Text),
];

const CONTACT_FIELDS: [FieldSpec; 4] = [
    field("Name", FieldKind::Text),
    field("Email", FieldKind::Text),
    field("Phone", FieldKind::Text),
    field("Title / Role", FieldKind::Text),
];

const DEAL_FIELDS: [FieldSpec; 4] = [
    field("Deal title", FieldKind::Text),
    field("Value", FieldKind::Numeric),
    field("Currency", FieldKind::Text),
    field("Stage", FieldKind::Choice),
];

const NOTE_FIELDS: [FieldSpec; 1] = [field("Note content", FieldKind::Multiline)];

/// Identifies one in-flight create call.
///
/// A result is applied only while its ticket is still the one the wizard is
/// waiting on; open, close and finish all start a new generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTicket {
    pub generation: u64,
    pub step: OnboardingStep,
}

/// The create call a step asks its host to perform
#[derive(Debug, Clone, PartialEq)]
pub enum StepPayload {
    Vendor(VendorDraft),
    Contact(NewContact),
    Deal(NewDeal),
    Note(NewNote),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepRequest {
    pub ticket: StepTicket,
    pub payload: StepPayload,
}

/// The record a successful step call produced
#[derive(Debug, Clone, PartialEq)]
pub enum StepRecord {
    Vendor(Vendor),
    Contact(Contact),
    Deal(Deal),
    Note(Note),
}

/// Why the wizard moved forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceReason {
    /// The step's record was created on the server
    Created,
    /// The draft was blank, so no call was made
    EmptyDraft,
    /// The user skipped the step explicitly
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTransition {
    pub from: OnboardingStep,
    pub to: OnboardingStep,
    pub reason: AdvanceReason,
}

/// How the wizard ended, handed back to its host
#[derive(Debug, Clone, PartialEq)]
pub enum WizardExit {
    /// Closed without finishing
    Dismissed,
    /// Finished, possibly after skips, with the vendor created in step 1
    Completed(Vendor),
}

/// Result of a wizard action
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEffect {
    /// The host must perform this request and feed the result to [`OnboardingState::apply`]
    Perform(StepRequest),
    Advanced(StepTransition),
    /// The flow finished and the wizard has reset
    Completed { vendor: Vendor, reason: AdvanceReason },
    Dismissed,
    /// The error is also stored in `error_message`; the step did not change
    Failed(String),
    /// Nothing happened: hidden, busy, wrong step, or a stale result
    Ignored,
}

impl WizardEffect {
    /// The exit this effect represents, if the flow ended
    pub fn into_exit(self) -> Option<WizardExit> {
        match self {
            Self::Completed { vendor, .. } => Some(WizardExit::Completed(vendor)),
            Self::Dismissed => Some(WizardExit::Dismissed),
            _ => None,
        }
    }
}

/// Full onboarding wizard state
#[derive(Debug)]
pub struct OnboardingState {
    /// Whether the wizard overlay is shown
    pub visible: bool,
    /// A create call is in flight; submits are ignored until it settles
    pub loading: bool,
    /// Error message to display
    pub error_message: Option<String>,
    pub vendor: VendorDraft,
    pub contact: ContactDraft,
    pub deal: DealDraft,
    pub note: NoteDraft,
    /// Index into the current step's fields
    pub focused_field: usize,
    current_step: OnboardingStep,
    created_vendor: Option<Vendor>,
    generation: u64,
    in_flight: Option<StepTicket>,
}

impl OnboardingState {
    pub fn new() -> Self {
        Self {
            visible: false,
            loading: false,
            error_message: None,
            vendor: VendorDraft::default(),
            contact: ContactDraft::default(),
            deal: DealDraft::default(),
            note: NoteDraft::default(),
            focused_field: 0,
            current_step: OnboardingStep::Vendor,
            created_vendor: None,
            generation: 0,
            in_flight: None,
        }
    }

    pub const fn current_step(&self) -> OnboardingStep {
        self.current_step
    }

    pub const fn created_vendor(&self) -> Option<&Vendor> {
        self.created_vendor.as_ref()
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Clear all progress and start a new generation
    fn reset(&mut self) {
        let generation = self.generation.wrapping_add(1);
        let visible = self.visible;
        *self = Self::new();
        self.generation = generation;
        self.visible = visible;
    }

    /// Show the wizard with blank drafts on step 1
    pub fn open(&mut self) {
        self.reset();
        self.visible = true;
        info!("Onboarding wizard opened (generation {})", self.generation);
    }

    /// Discard everything and hide the wizard
    pub fn close(&mut self) -> WizardExit {
        self.reset();
        self.visible = false;
        info!("Onboarding wizard dismissed");
        WizardExit::Dismissed
    }

    /// End the flow, handing back the created vendor.
    ///
    /// Does nothing before a vendor exists.
    pub fn finish(&mut self) -> Option<WizardExit> {
        let vendor = self.created_vendor.take()?;
        self.reset();
        self.visible = false;
        info!("Onboarding wizard completed for vendor {}", vendor.id);
        Some(WizardExit::Completed(vendor))
    }

    const fn accepts_actions(&self) -> bool {
        self.visible && !self.loading
    }

    /// Submit whatever step is showing
    pub fn submit(&mut self) -> WizardEffect {
        match self.current_step {
            OnboardingStep::Vendor => self.submit_vendor(),
            OnboardingStep::Contact => self.submit_contact(),
            OnboardingStep::Deal => self.submit_deal(),
            OnboardingStep::Note => self.submit_note(),
        }
    }

    pub fn submit_vendor(&mut self) -> WizardEffect {
        if !self.accepts_actions() || self.current_step != OnboardingStep::Vendor {
            return WizardEffect::Ignored;
        }
        self.begin_request(StepPayload::Vendor(self.vendor.clone()))
    }

    pub fn submit_contact(&mut self) -> WizardEffect {
        let Some(vendor_id) = self.step_vendor_id(OnboardingStep::Contact) else {
            return WizardEffect::Ignored;
        };
        if self.contact.is_blank() {
            return self.advance(AdvanceReason::EmptyDraft);
        }
        self.begin_request(StepPayload::Contact(NewContact {
            vendor_id,
            fields: self.contact.clone(),
        }))
    }

    pub fn submit_deal(&mut self) -> WizardEffect {
        let Some(vendor_id) = self.step_vendor_id(OnboardingStep::Deal) else {
            return WizardEffect::Ignored;
        };
        if self.deal.is_blank() {
            return self.advance(AdvanceReason::EmptyDraft);
        }
        let Some(value) = self.deal.numeric_value() else {
            let message = "Deal value must be a number".to_string();
            self.error_message = Some(message.clone());
            return WizardEffect::Failed(message);
        };
        self.begin_request(StepPayload::Deal(NewDeal {
            vendor_id,
            title: self.deal.title.clone(),
            value,
            currency: self.deal.currency.clone(),
            stage: self.deal.stage,
        }))
    }

    pub fn submit_note(&mut self) -> WizardEffect {
        let Some(vendor_id) = self.step_vendor_id(OnboardingStep::Note) else {
            return WizardEffect::Ignored;
        };
        if self.note.is_blank() {
            return self.complete(AdvanceReason::EmptyDraft);
        }
        self.begin_request(StepPayload::Note(NewNote {
            vendor_id,
            content: self.note.content.clone(),
            author: None,
        }))
    }

    /// Move past an optional step without creating anything.
    /// Skipping the note step finishes the flow.
    pub fn skip(&mut self) -> WizardEffect {
        if !self.accepts_actions() || !self.current_step.is_optional() {
            return WizardEffect::Ignored;
        }
        if self.current_step == OnboardingStep::Note {
            self.complete(AdvanceReason::Skipped)
        } else {
            self.advance(AdvanceReason::Skipped)
        }
    }

    /// Go back one step, keeping drafts and created records
    pub fn back(&mut self) -> bool {
        if !self.accepts_actions() {
            return false;
        }
        let Some(previous) = self.current_step.previous() else {
            return false;
        };
        debug!("Onboarding back: {:?} -> {:?}", self.current_step, previous);
        self.current_step = previous;
        self.focused_field = 0;
        self.error_message = None;
        true
    }

    /// Feed back the outcome of a [`StepRequest`].
    ///
    /// Outcomes for tickets the wizard is no longer waiting on are dropped.
    pub fn apply(&mut self, ticket: StepTicket, result: Result<StepRecord, ApiError>) -> WizardEffect {
        if !self.is_awaiting(ticket) {
            debug!(
                "Ignoring stale {:?} result from generation {} (current {})",
                ticket.step, ticket.generation, self.generation
            );
            return WizardEffect::Ignored;
        }

        self.in_flight = None;
        self.loading = false;
        let step = self.current_step;

        match (step, result) {
            (_, Err(e)) => {
                warn!("Onboarding {:?} step failed: {}", step, e);
                self.fail(e.display_message(step.failure_message()))
            }
            (OnboardingStep::Vendor, Ok(StepRecord::Vendor(vendor))) => {
                info!("Created vendor {} during onboarding", vendor.id);
                self.created_vendor = Some(vendor);
                self.advance(AdvanceReason::Created)
            }
            (OnboardingStep::Contact, Ok(StepRecord::Contact(_)))
            | (OnboardingStep::Deal, Ok(StepRecord::Deal(_))) => self.advance(AdvanceReason::Created),
            (OnboardingStep::Note, Ok(StepRecord::Note(_))) => self.complete(AdvanceReason::Created),
            (_, Ok(record)) => {
                warn!("Onboarding {:?} step got mismatched record: {:?}", step, record);
                self.fail(step.failure_message().to_string())
            }
        }
    }

    /// Whether `ticket` is the request the wizard is waiting on
    pub fn is_awaiting(&self, ticket: StepTicket) -> bool {
        ticket.generation == self.generation && self.in_flight == Some(ticket)
    }

    fn step_vendor_id(&self, step: OnboardingStep) -> Option<RecordId> {
        if !self.accepts_actions() || self.current_step != step {
            return None;
        }
        self.created_vendor.as_ref().map(|v| v.id.clone())
    }

    fn begin_request(&mut self, payload: StepPayload) -> WizardEffect {
        let ticket = StepTicket {
            generation: self.generation,
            step: self.current_step,
        };
        info!("Onboarding {:?} step submitting", ticket.step);
        self.loading = true;
        self.error_message = None;
        self.in_flight = Some(ticket);
        WizardEffect::Perform(StepRequest { ticket, payload })
    }

    fn fail(&mut self, message: String) -> WizardEffect {
        self.error_message = Some(message.clone());
        WizardEffect::Failed(message)
    }

    fn advance(&mut self, reason: AdvanceReason) -> WizardEffect {
        let from = self.current_step;
        let Some(to) = from.next() else {
            return WizardEffect::Ignored;
        };
        info!("Onboarding advanced {:?} -> {:?} ({:?})", from, to, reason);
        self.current_step = to;
        self.focused_field = 0;
        self.error_message = None;
        WizardEffect::Advanced(StepTransition { from, to, reason })
    }

    fn complete(&mut self, reason: AdvanceReason) -> WizardEffect {
        match self.finish() {
            Some(WizardExit::Completed(vendor)) => WizardEffect::Completed { vendor, reason },
            _ => WizardEffect::Ignored,
        }
    }

    /// Move focus to the next field, wrapping
    pub fn focus_next(&mut self) {
        let count = self.current_step.fields().len();
        self.focused_field = (self.focused_field + 1) % count;
    }

    /// Move focus to the previous field, wrapping
    pub fn focus_previous(&mut self) {
        let count = self.current_step.fields().len();
        self.focused_field = (self.focused_field + count - 1) % count;
    }

    pub fn focused_spec(&self) -> Option<&'static FieldSpec> {
        self.current_step.fields().get(self.focused_field)
    }

    fn text_field_mut(&mut self, index: usize) -> Option<&mut String> {
        match (self.current_step, index) {
            (OnboardingStep::Vendor, 0) => Some(&mut self.vendor.business_name),
            (OnboardingStep::Vendor, 1) => Some(&mut self.vendor.category),
            (OnboardingStep::Vendor, 2) => Some(&mut self.vendor.name),
            (OnboardingStep::Vendor, 3) => Some(&mut self.vendor.email),
            (OnboardingStep::Vendor, 4) => Some(&mut self.vendor.phone),
            (OnboardingStep::Vendor, 5) => Some(&mut self.vendor.website),
            (OnboardingStep::Contact, 0) => Some(&mut self.contact.name),
            (OnboardingStep::Contact, 1) => Some(&mut self.contact.email),
            (OnboardingStep::Contact, 2) => Some(&mut self.contact.phone),
            (OnboardingStep::Contact, 3) => Some(&mut self.contact.title),
            (OnboardingStep::Deal, 0) => Some(&mut self.deal.title),
            (OnboardingStep::Deal, 1) => Some(&mut self.deal.value),
            (OnboardingStep::Deal, 2) => Some(&mut self.deal.currency),
            (OnboardingStep::Note, 0) => Some(&mut self.note.content),
            _ => None,
        }
    }

    /// Display value of a field on the current step
    pub fn field_value(&self, index: usize) -> String {
        match (self.current_step, index) {
            (OnboardingStep::Vendor, 0) => self.vendor.business_name.clone(),
            (OnboardingStep::Vendor, 1) => self.vendor.category.clone(),
            (OnboardingStep::Vendor, 2) => self.vendor.name.clone(),
            (OnboardingStep::Vendor, 3) => self.vendor.email.clone(),
            (OnboardingStep::Vendor, 4) => self.vendor.phone.clone(),
            (OnboardingStep::Vendor, 5) => self.vendor.website.clone(),
            (OnboardingStep::Contact, 0) => self.contact.name.clone(),
            (OnboardingStep::Contact, 1) => self.contact.email.clone(),
            (OnboardingStep::Contact, 2) => self.contact.phone.clone(),
            (OnboardingStep::Contact, 3) => self.contact.title.clone(),
            (OnboardingStep::Deal, 0) => self.deal.title.clone(),
            (OnboardingStep::Deal, 1) => self.deal.value.clone(),
            (OnboardingStep::Deal, 2) => self.deal.currency.clone(),
            (OnboardingStep::Deal, 3) => self.deal.stage.label().to_string(),
            (OnboardingStep::Note, 0) => self.note.content.clone(),
            _ => String::new(),
        }
    }

    /// Handle text input character
    pub fn input_char(&mut self, c: char) {
        if self.loading {
            return;
        }
        let Some(spec) = self.focused_spec() else {
            return;
        };
        let accepted = match spec.kind {
            FieldKind::Text | FieldKind::Multiline => !c.is_control(),
            FieldKind::Numeric => c.is_ascii_digit() || matches!(c, '.' | '-'),
            FieldKind::Choice => false,
        };
        if accepted {
            if let Some(value) = self.text_field_mut(self.focused_field) {
                value.push(c);
            }
        }
    }

    /// Handle backspace
    pub fn backspace(&mut self) {
        if self.loading {
            return;
        }
        if let Some(value) = self.text_field_mut(self.focused_field) {
            value.pop();
        }
    }

    /// Cycle a choice field (the deal stage)
    pub fn cycle_option(&mut self, forward: bool) {
        if self.loading || self.focused_spec().map(|s| s.kind) != Some(FieldKind::Choice) {
            return;
        }
        self.deal.stage = if forward {
            self.deal.stage.next()
        } else {
            self.deal.stage.previous()
        };
    }

    /// Check if we're on the final step
    pub fn is_final_step(&self) -> bool {
        self.current_step == OnboardingStep::Note
    }

    /// Check if we can go back
    pub const fn can_go_back(&self) -> bool {
        self.current_step.previous().is_some()
    }
}

impl Default for OnboardingState {
    fn default() -> Self {
        Self::new()
    }
}
