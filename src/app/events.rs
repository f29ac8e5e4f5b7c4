// ABOUTME: Event handling system for keyboard input and app actions

use crate::api::RecordKind;
use crate::app::state::{AppState, AsyncAction, Focus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    FocusNext,
    FocusPrevious,
    FocusSearch,
    RefreshVendors,
    NextVendor,
    PreviousVendor,
    SelectVendor,
    QuickOnboard,
    QuickAdd(RecordKind),
    // Plain form events
    FormInputChar(char),
    FormBackspace,
    FormNextField,
    FormPreviousField,
    FormSubmit,
    // Search box events
    SearchInputChar(char),
    SearchBackspace,
    SearchSubmit,
    // Onboarding wizard events
    OnboardingOpen,
    OnboardingClose,
    OnboardingInputChar(char),
    OnboardingBackspace,
    OnboardingNextField,
    OnboardingPreviousField,
    OnboardingCycleOption { forward: bool },
    OnboardingSubmit,
    OnboardingSkip,
    OnboardingBack,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c') {
            return Some(AppEvent::Quit);
        }

        // The wizard overlay captures every key while it is open
        if state.onboarding.visible {
            return Self::handle_onboarding_keys(key_event);
        }

        match key_event.code {
            KeyCode::Tab => return Some(AppEvent::FocusNext),
            KeyCode::BackTab => return Some(AppEvent::FocusPrevious),
            _ => {}
        }

        match state.focus {
            Focus::Form => Self::handle_form_keys(key_event),
            Focus::Search => Self::handle_search_keys(key_event),
            Focus::List => Self::handle_list_keys(key_event),
            Focus::Detail => Self::handle_detail_keys(key_event),
        }
    }

    fn handle_onboarding_keys(key_event: KeyEvent) -> Option<AppEvent> {
        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return match key_event.code {
                KeyCode::Char('s') => Some(AppEvent::OnboardingSkip),
                KeyCode::Char('b') => Some(AppEvent::OnboardingBack),
                _ => None,
            };
        }

        match key_event.code {
            KeyCode::Esc => Some(AppEvent::OnboardingClose),
            KeyCode::Enter => Some(AppEvent::OnboardingSubmit),
            KeyCode::Tab | KeyCode::Down => Some(AppEvent::OnboardingNextField),
            KeyCode::BackTab | KeyCode::Up => Some(AppEvent::OnboardingPreviousField),
            KeyCode::Left => Some(AppEvent::OnboardingCycleOption { forward: false }),
            KeyCode::Right => Some(AppEvent::OnboardingCycleOption { forward: true }),
            KeyCode::Backspace => Some(AppEvent::OnboardingBackspace),
            KeyCode::Char(c) => Some(AppEvent::OnboardingInputChar(c)),
            _ => None,
        }
    }

    fn handle_form_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Enter => Some(AppEvent::FormSubmit),
            KeyCode::Down => Some(AppEvent::FormNextField),
            KeyCode::Up => Some(AppEvent::FormPreviousField),
            KeyCode::Backspace => Some(AppEvent::FormBackspace),
            KeyCode::Esc => Some(AppEvent::FocusNext),
            KeyCode::Char(c) => Some(AppEvent::FormInputChar(c)),
            _ => None,
        }
    }

    fn handle_search_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Enter => Some(AppEvent::SearchSubmit),
            KeyCode::Backspace => Some(AppEvent::SearchBackspace),
            KeyCode::Esc | KeyCode::Down => Some(AppEvent::FocusNext),
            KeyCode::Char(c) => Some(AppEvent::SearchInputChar(c)),
            _ => None,
        }
    }

    fn handle_global_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Char('q') => Some(AppEvent::Quit),
            KeyCode::Char('o') => Some(AppEvent::OnboardingOpen),
            KeyCode::Char('s') => Some(AppEvent::QuickOnboard),
            KeyCode::Char('r') => Some(AppEvent::RefreshVendors),
            KeyCode::Char('/') => Some(AppEvent::FocusSearch),
            _ => None,
        }
    }

    fn handle_list_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => Some(AppEvent::NextVendor),
            KeyCode::Char('k') | KeyCode::Up => Some(AppEvent::PreviousVendor),
            KeyCode::Enter => Some(AppEvent::SelectVendor),
            _ => Self::handle_global_keys(key_event),
        }
    }

    fn handle_detail_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Char('c') => Some(AppEvent::QuickAdd(RecordKind::Contact)),
            KeyCode::Char('d') => Some(AppEvent::QuickAdd(RecordKind::Deal)),
            KeyCode::Char('n') => Some(AppEvent::QuickAdd(RecordKind::Note)),
            _ => Self::handle_global_keys(key_event),
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        debug!("Processing event {:?}", event);
        match event {
            AppEvent::Quit => state.should_quit = true,
            AppEvent::FocusNext => state.focus = state.focus.next(),
            AppEvent::FocusPrevious => state.focus = state.focus.previous(),
            AppEvent::FocusSearch => state.focus = Focus::Search,
            AppEvent::RefreshVendors => {
                state.pending_async_action = Some(AsyncAction::LoadVendors);
            }
            AppEvent::NextVendor => state.vendor_list.next(),
            AppEvent::PreviousVendor => state.vendor_list.previous(),
            AppEvent::SelectVendor => state.select_current_vendor(),
            AppEvent::QuickOnboard => {
                state.pending_async_action = Some(AsyncAction::QuickOnboard);
            }
            AppEvent::QuickAdd(kind) => {
                state.pending_async_action = Some(AsyncAction::QuickAdd(kind));
            }
            AppEvent::FormInputChar(c) => state.form.input_char(c),
            AppEvent::FormBackspace => state.form.backspace(),
            AppEvent::FormNextField => state.form.next_field(),
            AppEvent::FormPreviousField => state.form.previous_field(),
            AppEvent::FormSubmit => {
                if state.form.loading {
                    return;
                }
                match state.form.prepare_submit() {
                    Ok(draft) => {
                        state.pending_async_action = Some(AsyncAction::SubmitVendorForm(draft));
                    }
                    Err(message) => state.add_error_notification(message),
                }
            }
            AppEvent::SearchInputChar(c) => state.vendor_list.query.push(c),
            AppEvent::SearchBackspace => {
                state.vendor_list.query.pop();
            }
            AppEvent::SearchSubmit => {
                state.focus = Focus::List;
                state.pending_async_action = Some(AsyncAction::LoadVendors);
            }
            AppEvent::OnboardingOpen => {
                info!("Opening onboarding wizard");
                state.open_onboarding();
            }
            AppEvent::OnboardingClose => {
                let exit = state.onboarding.close();
                debug!("Wizard closed: {:?}", exit);
            }
            AppEvent::OnboardingInputChar(c) => state.onboarding.input_char(c),
            AppEvent::OnboardingBackspace => state.onboarding.backspace(),
            AppEvent::OnboardingNextField => state.onboarding.focus_next(),
            AppEvent::OnboardingPreviousField => state.onboarding.focus_previous(),
            AppEvent::OnboardingCycleOption { forward } => state.onboarding.cycle_option(forward),
            AppEvent::OnboardingSubmit => {
                let effect = state.onboarding.submit();
                state.handle_wizard_effect(effect);
            }
            AppEvent::OnboardingSkip => {
                let effect = state.onboarding.skip();
                state.handle_wizard_effect(effect);
            }
            AppEvent::OnboardingBack => {
                state.onboarding.back();
            }
        }
    }
}
