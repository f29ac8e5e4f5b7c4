// ABOUTME: Unit tests for event handling to ensure keyboard inputs map to correct app actions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use vendorbox::api::RecordKind;
use vendorbox::app::{AppEvent, AppState, AsyncAction, EventHandler, Focus};

const fn create_key_event(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

const fn create_key_event_with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

#[test]
fn test_quit_key_events() {
    let mut state = AppState::default();

    let quit = EventHandler::handle_key_event(create_key_event(KeyCode::Char('q')), &mut state);
    assert_eq!(quit, Some(AppEvent::Quit));

    // Ctrl-C quits from anywhere, even inside the wizard
    state.open_onboarding();
    let quit = EventHandler::handle_key_event(
        create_key_event_with_modifiers(KeyCode::Char('c'), KeyModifiers::CONTROL),
        &mut state,
    );
    assert_eq!(quit, Some(AppEvent::Quit));

    EventHandler::process_event(AppEvent::Quit, &mut state);
    assert!(state.should_quit);
}

#[test]
fn test_focus_cycling() {
    let mut state = AppState::default();
    assert_eq!(state.focus, Focus::List);

    let event = EventHandler::handle_key_event(create_key_event(KeyCode::Tab), &mut state).unwrap();
    EventHandler::process_event(event, &mut state);
    assert_eq!(state.focus, Focus::Detail);

    let event = EventHandler::handle_key_event(create_key_event(KeyCode::BackTab), &mut state).unwrap();
    EventHandler::process_event(event, &mut state);
    assert_eq!(state.focus, Focus::List);

    let event = EventHandler::handle_key_event(create_key_event(KeyCode::Char('/')), &mut state).unwrap();
    EventHandler::process_event(event, &mut state);
    assert_eq!(state.focus, Focus::Search);
}

#[test]
fn test_list_keys() {
    let mut state = AppState::default();

    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Char('j')), &mut state),
        Some(AppEvent::NextVendor)
    );
    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Up), &mut state),
        Some(AppEvent::PreviousVendor)
    );
    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Enter), &mut state),
        Some(AppEvent::SelectVendor)
    );
    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Char('s')), &mut state),
        Some(AppEvent::QuickOnboard)
    );
    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Char('r')), &mut state),
        Some(AppEvent::RefreshVendors)
    );
}

#[test]
fn test_quick_add_keys_only_in_detail() {
    let mut state = AppState::default();

    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Char('d')), &mut state),
        None
    );

    state.focus = Focus::Detail;
    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Char('c')), &mut state),
        Some(AppEvent::QuickAdd(RecordKind::Contact))
    );
    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Char('d')), &mut state),
        Some(AppEvent::QuickAdd(RecordKind::Deal))
    );
    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Char('n')), &mut state),
        Some(AppEvent::QuickAdd(RecordKind::Note))
    );

    EventHandler::process_event(AppEvent::QuickAdd(RecordKind::Note), &mut state);
    assert_eq!(
        state.pending_async_action,
        Some(AsyncAction::QuickAdd(RecordKind::Note))
    );
}

#[test]
fn test_form_typing() {
    let mut state = AppState::default();
    state.focus = Focus::Form;

    for c in "Jo".chars() {
        let event = EventHandler::handle_key_event(create_key_event(KeyCode::Char(c)), &mut state).unwrap();
        EventHandler::process_event(event, &mut state);
    }
    let event = EventHandler::handle_key_event(create_key_event(KeyCode::Backspace), &mut state).unwrap();
    EventHandler::process_event(event, &mut state);

    assert_eq!(state.form.draft.name, "J");
    // 'q' is text here, not quit
    assert_eq!(
        EventHandler::handle_key_event(create_key_event(KeyCode::Char('q')), &mut state),
        Some(AppEvent::FormInputChar('q'))
    );
}

#[test]
fn test_wizard_navigation_keys() {
    let mut state = AppState::default();
    state.open_onboarding();

    let cases = [
        (create_key_event(KeyCode::Tab), AppEvent::OnboardingNextField),
        (create_key_event(KeyCode::Down), AppEvent::OnboardingNextField),
        (create_key_event(KeyCode::BackTab), AppEvent::OnboardingPreviousField),
        (create_key_event(KeyCode::Up), AppEvent::OnboardingPreviousField),
        (
            create_key_event(KeyCode::Left),
            AppEvent::OnboardingCycleOption { forward: false },
        ),
        (
            create_key_event(KeyCode::Right),
            AppEvent::OnboardingCycleOption { forward: true },
        ),
        (create_key_event(KeyCode::Enter), AppEvent::OnboardingSubmit),
        (create_key_event(KeyCode::Backspace), AppEvent::OnboardingBackspace),
        (create_key_event(KeyCode::Esc), AppEvent::OnboardingClose),
    ];

    for (key, expected) in cases {
        assert_eq!(EventHandler::handle_key_event(key, &mut state), Some(expected));
    }
}

#[test]
fn test_escape_closes_and_discards_wizard() {
    let mut state = AppState::default();
    state.open_onboarding();
    EventHandler::process_event(AppEvent::OnboardingInputChar('A'), &mut state);
    assert_eq!(state.onboarding.vendor.business_name, "A");

    EventHandler::process_event(AppEvent::OnboardingClose, &mut state);
    assert!(!state.onboarding.visible);

    EventHandler::process_event(AppEvent::OnboardingOpen, &mut state);
    assert!(state.onboarding.vendor.business_name.is_empty());
}
