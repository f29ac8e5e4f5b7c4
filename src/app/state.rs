// ABOUTME: Application state for the TUI and the App driver that runs queued backend actions

use crate::api::{ApiError, RecordKind, Vendor, VendorApi, VendorApiClient, VendorDraft};
use crate::components::onboarding::runner;
use crate::components::onboarding::{OnboardingState, StepRecord, StepRequest, StepTicket, WizardEffect};
use crate::components::vendor_detail::{QuickRecord, VendorDetailState};
use crate::components::vendor_form::VendorFormState;
use crate::components::vendor_list::VendorListState;
use crate::config::AppConfig;
use anyhow::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Which pane receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    Search,
    List,
    Detail,
}

impl Focus {
    pub const fn next(self) -> Self {
        match self {
            Self::Form => Self::Search,
            Self::Search => Self::List,
            Self::List => Self::Detail,
            Self::Detail => Self::Form,
        }
    }

    pub const fn previous(self) -> Self {
        match self {
            Self::Form => Self::Detail,
            Self::Search => Self::Form,
            Self::List => Self::Search,
            Self::Detail => Self::List,
        }
    }

    /// Whether typed characters edit text in this pane
    pub const fn is_text_input(self) -> bool {
        matches!(self, Self::Form | Self::Search)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Notification {
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

/// Backend work queued by event processing and executed on the next tick
#[derive(Debug, Clone, PartialEq)]
pub enum AsyncAction {
    LoadVendors,
    LoadDetail(Vendor),
    SubmitVendorForm(VendorDraft),
    QuickOnboard,
    QuickAdd(RecordKind),
    RunWizardStep(StepRequest),
    /// Reload the list and open the vendor the wizard just created
    ShowOnboardedVendor(Vendor),
}

#[derive(Debug)]
pub struct AppState {
    pub should_quit: bool,
    pub focus: Focus,
    pub vendor_list: VendorListState,
    pub detail: Option<VendorDetailState>,
    pub form: VendorFormState,
    pub onboarding: OnboardingState,
    pub notifications: Vec<Notification>,
    pub pending_async_action: Option<AsyncAction>,
    pub notification_duration: Duration,
    /// Shown in the header
    pub backend_label: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            should_quit: false,
            focus: Focus::List,
            vendor_list: VendorListState::default(),
            detail: None,
            form: VendorFormState::default(),
            onboarding: OnboardingState::new(),
            notifications: Vec::new(),
            pending_async_action: None,
            notification_duration: Duration::from_secs(5),
            backend_label: String::new(),
        }
    }
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            notification_duration: Duration::from_secs(config.ui.notification_secs),
            backend_label: config.backend.base_url.clone(),
            ..Self::default()
        }
    }

    pub fn add_notification(&mut self, message: String, notification_type: NotificationType) {
        self.notifications.push(Notification {
            message,
            notification_type,
            created_at: Instant::now(),
            duration: self.notification_duration,
        });
    }

    pub fn add_success_notification(&mut self, message: String) {
        self.add_notification(message, NotificationType::Success);
    }

    pub fn add_error_notification(&mut self, message: String) {
        self.add_notification(message, NotificationType::Error);
    }

    pub fn add_info_notification(&mut self, message: String) {
        self.add_notification(message, NotificationType::Info);
    }

    pub fn cleanup_expired_notifications(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    /// Most recent notification still on screen
    pub fn current_notification(&self) -> Option<&Notification> {
        self.notifications.iter().rev().find(|n| !n.is_expired())
    }

    pub fn open_onboarding(&mut self) {
        self.onboarding.open();
    }

    /// Route a wizard effect: queue requests, react to the flow ending
    pub fn handle_wizard_effect(&mut self, effect: WizardEffect) {
        match effect {
            WizardEffect::Perform(request) => {
                self.pending_async_action = Some(AsyncAction::RunWizardStep(request));
            }
            WizardEffect::Completed { vendor, reason } => {
                info!("Onboarding finished for vendor {} ({:?})", vendor.id, reason);
                self.add_success_notification(format!(
                    "✅ Onboarded {}",
                    vendor.fields.business_name
                ));
                self.pending_async_action = Some(AsyncAction::ShowOnboardedVendor(vendor));
            }
            WizardEffect::Dismissed => {
                debug!("Onboarding dismissed");
            }
            WizardEffect::Advanced(_) | WizardEffect::Failed(_) | WizardEffect::Ignored => {}
        }
    }

    /// Open the detail pane for the selected list row
    pub fn select_current_vendor(&mut self) {
        if let Some(vendor) = self.vendor_list.selected_vendor().cloned() {
            self.detail = Some(VendorDetailState::new(vendor.clone()));
            self.pending_async_action = Some(AsyncAction::LoadDetail(vendor));
        }
    }
}

/// Outcome of a spawned wizard request, sent back to the event loop
#[derive(Debug)]
pub struct WizardResult {
    pub ticket: StepTicket,
    pub result: Result<StepRecord, ApiError>,
}

pub struct App {
    pub state: AppState,
    api: Arc<dyn VendorApi>,
    wizard_tx: mpsc::UnboundedSender<WizardResult>,
    wizard_rx: mpsc::UnboundedReceiver<WizardResult>,
}

impl App {
    /// Build the app against the configured backend
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = VendorApiClient::new(&config.backend)?;
        let mut app = Self::with_api(Arc::new(client));
        app.state = AppState::new(config);
        Ok(app)
    }

    /// Build the app against any [`VendorApi`] implementation
    pub fn with_api(api: Arc<dyn VendorApi>) -> Self {
        let (wizard_tx, wizard_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            api,
            wizard_tx,
            wizard_rx,
        }
    }

    /// Initial data load
    pub async fn init(&mut self) {
        self.load_vendors().await;
    }

    /// Expire notifications, apply finished wizard requests, run the queued action
    pub async fn tick(&mut self) -> Result<()> {
        self.state.cleanup_expired_notifications();
        self.drain_wizard_results();

        if let Some(action) = self.state.pending_async_action.take() {
            self.run_action(action).await;
        }

        Ok(())
    }

    /// Apply every wizard result that has already arrived
    pub fn drain_wizard_results(&mut self) {
        while let Ok(message) = self.wizard_rx.try_recv() {
            self.apply_wizard_result(message);
        }
    }

    /// Wait for the next wizard result and apply it. Returns false if none can arrive.
    pub async fn wait_for_wizard_result(&mut self) -> bool {
        match self.wizard_rx.recv().await {
            Some(message) => {
                self.apply_wizard_result(message);
                true
            }
            None => false,
        }
    }

    fn apply_wizard_result(&mut self, message: WizardResult) {
        let effect = self.state.onboarding.apply(message.ticket, message.result);
        self.state.handle_wizard_effect(effect);
    }

    async fn run_action(&mut self, action: AsyncAction) {
        match action {
            AsyncAction::LoadVendors => self.load_vendors().await,
            AsyncAction::LoadDetail(vendor) => self.load_detail(vendor).await,
            AsyncAction::SubmitVendorForm(draft) => self.submit_form(draft).await,
            AsyncAction::QuickOnboard => self.quick_onboard().await,
            AsyncAction::QuickAdd(kind) => self.quick_add(kind).await,
            AsyncAction::RunWizardStep(request) => self.spawn_wizard_step(request),
            AsyncAction::ShowOnboardedVendor(vendor) => {
                self.load_vendors().await;
                self.state.vendor_list.select_id(&vendor.id);
                self.state.detail = Some(VendorDetailState::new(vendor.clone()));
                self.load_detail(vendor).await;
            }
        }
    }

    /// Run a wizard request off the event loop; the result comes back over the channel
    fn spawn_wizard_step(&self, request: StepRequest) {
        let api = Arc::clone(&self.api);
        let tx = self.wizard_tx.clone();
        info!("Spawning onboarding {:?} request", request.ticket.step);

        tokio::spawn(async move {
            let result = runner::perform(api.as_ref(), &request.payload).await;
            if tx.send(WizardResult { ticket: request.ticket, result }).is_err() {
                warn!("Event loop gone before onboarding result arrived");
            }
        });
    }

    async fn load_vendors(&mut self) {
        self.state.vendor_list.loading = true;
        let query = self.state.vendor_list.query.clone();

        match self.api.list_vendors(&query).await {
            Ok(vendors) => {
                debug!("Loaded {} vendors", vendors.len());
                self.state.vendor_list.set_items(vendors);
            }
            Err(e) => {
                error!("Failed to load vendors: {}", e);
                self.state.vendor_list.set_items(Vec::new());
                self.state
                    .add_error_notification(e.display_message("Failed to load vendors"));
            }
        }

        self.state.vendor_list.loading = false;
    }

    async fn load_detail(&mut self, vendor: Vendor) {
        let (contacts, deals, notes) = tokio::join!(
            self.api.list_contacts(&vendor.id),
            self.api.list_deals(&vendor.id),
            self.api.list_notes(&vendor.id),
        );

        // The user may have picked another vendor meanwhile
        let Some(detail) = self.state.detail.as_mut().filter(|d| d.vendor.id == vendor.id) else {
            debug!("Dropping detail load for vendor {}", vendor.id);
            return;
        };

        let mut failed = false;
        detail.contacts = contacts.unwrap_or_else(|e| {
            warn!("Failed to load contacts: {}", e);
            failed = true;
            Vec::new()
        });
        detail.deals = deals.unwrap_or_else(|e| {
            warn!("Failed to load deals: {}", e);
            failed = true;
            Vec::new()
        });
        detail.notes = notes.unwrap_or_else(|e| {
            warn!("Failed to load notes: {}", e);
            failed = true;
            Vec::new()
        });
        detail.loading = false;

        if failed {
            self.state
                .add_error_notification("Failed to load some vendor details".to_string());
        }
    }

    async fn submit_form(&mut self, draft: VendorDraft) {
        self.state.form.loading = true;
        let result = self.api.create_vendor(&draft).await;
        self.state.form.loading = false;

        match result {
            Ok(vendor) => {
                info!("Created vendor {} from form", vendor.id);
                self.state.form.clear();
                self.state.add_success_notification(format!(
                    "Vendor {} created! Find it in the list to view details.",
                    vendor.fields.business_name
                ));
                self.load_vendors().await;
            }
            Err(e) => {
                warn!("Vendor form submit failed: {}", e);
                self.state
                    .add_error_notification(e.display_message("Failed to create vendor"));
            }
        }
    }

    async fn quick_onboard(&mut self) {
        match self.api.create_vendor(&VendorDraft::sample()).await {
            Ok(vendor) => {
                info!("Created sample vendor {}", vendor.id);
                self.state.add_success_notification(
                    "Sample vendor created! Use the list to select it.".to_string(),
                );
                self.load_vendors().await;
            }
            Err(e) => {
                warn!("Sample vendor creation failed: {}", e);
                self.state
                    .add_error_notification(e.display_message("Failed to create vendor"));
            }
        }
    }

    async fn quick_add(&mut self, kind: RecordKind) {
        let Some(vendor) = self.state.detail.as_ref().map(|d| d.vendor.clone()) else {
            self.state
                .add_info_notification("Select a vendor first".to_string());
            return;
        };

        let result = match QuickRecord::for_vendor(kind, &vendor) {
            QuickRecord::Contact(contact) => self.api.create_contact(&contact).await.map(|_| ()),
            QuickRecord::Deal(deal) => self.api.create_deal(&deal).await.map(|_| ()),
            QuickRecord::Note(note) => self.api.create_note(&note).await.map(|_| ()),
        };

        if let Err(e) = result {
            warn!("Quick-add {} failed: {}", kind.label(), e);
            self.state
                .add_error_notification(e.display_message(&format!("Failed to add {}", kind.label())));
        }

        self.load_detail(vendor).await;
    }
}
