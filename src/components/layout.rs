// ABOUTME: Main layout component handling split-pane arrangement, key hint bar and notifications

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::theme::{
    CORNFLOWER_BLUE, DARK_BG, ERROR_RED, GOLD, MUTED_GRAY, PANEL_BG, SELECTION_GREEN, SUBDUED_BORDER,
};
use super::{OnboardingComponent, VendorDetailComponent, VendorFormComponent, VendorListComponent};
use crate::app::state::{AppState, Focus, NotificationType};

pub struct LayoutComponent {
    form: VendorFormComponent,
    vendor_list: VendorListComponent,
    detail: VendorDetailComponent,
    onboarding: OnboardingComponent,
}

impl LayoutComponent {
    pub const fn new() -> Self {
        Self {
            form: VendorFormComponent::new(),
            vendor_list: VendorListComponent::new(),
            detail: VendorDetailComponent::new(),
            onboarding: OnboardingComponent::new(),
        }
    }

    pub fn render(&self, frame: &mut Frame, state: &AppState) {
        let area = frame.size();
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(10), Constraint::Length(3)])
            .split(area);

        self.render_header(frame, rows[0], state);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(rows[1]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(5)])
            .split(columns[0]);

        self.form.render(frame, left[0], &state.form, state.focus == Focus::Form);
        self.vendor_list.render(
            frame,
            left[1],
            &state.vendor_list,
            state.focus == Focus::Search,
            state.focus == Focus::List,
        );
        self.detail
            .render(frame, columns[1], state.detail.as_ref(), state.focus == Focus::Detail);

        self.render_footer(frame, rows[2], state);

        // Wizard draws last so it sits on top of everything
        self.onboarding.render(frame, area, &state.onboarding);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let header = Paragraph::new(Line::from(vec![
            Span::styled("vendorbox", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
            Span::styled("  │  ", Style::default().fg(SUBDUED_BORDER)),
            Span::styled(state.backend_label.clone(), Style::default().fg(MUTED_GRAY)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(CORNFLOWER_BLUE))
                .style(Style::default().bg(PANEL_BG)),
        );
        frame.render_widget(header, area);
    }

    /// Latest notification if any, otherwise key hints for the focused pane
    fn render_footer(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let line = match state.current_notification() {
            Some(notification) => {
                let (icon, color) = match notification.notification_type {
                    NotificationType::Success => ("✓ ", SELECTION_GREEN),
                    NotificationType::Error => ("✗ ", ERROR_RED),
                    NotificationType::Info => ("ℹ ", CORNFLOWER_BLUE),
                };
                Line::from(vec![
                    Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                    Span::styled(notification.message.clone(), Style::default().fg(color)),
                ])
            }
            None => Line::from(key_hints(state.focus)),
        };

        let footer = Paragraph::new(line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(SUBDUED_BORDER))
                    .style(Style::default().bg(PANEL_BG)),
            )
            .alignment(Alignment::Center);
        frame.render_widget(footer, area);
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}

fn hint<'a>(key: &'a str, label: &'a str) -> [Span<'a>; 2] {
    [
        Span::styled(key, Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
        Span::styled(label, Style::default().fg(MUTED_GRAY)),
    ]
}

fn key_hints(focus: Focus) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    match focus {
        Focus::Form => {
            spans.extend(hint("↑↓", " field "));
            spans.extend(hint("Enter", " create "));
        }
        Focus::Search => {
            spans.extend(hint("Enter", " search "));
        }
        Focus::List => {
            spans.extend(hint("j/k", " move "));
            spans.extend(hint("Enter", " open "));
        }
        Focus::Detail => {
            spans.extend(hint("c", " contact "));
            spans.extend(hint("d", " deal "));
            spans.extend(hint("n", " note "));
        }
    }
    spans.push(Span::styled("│ ", Style::default().fg(SUBDUED_BORDER)));
    if !focus.is_text_input() {
        spans.extend(hint("o", " onboard "));
        spans.extend(hint("s", " sample "));
        spans.extend(hint("r", " refresh "));
        spans.extend(hint("q", " quit "));
    }
    spans.extend(hint("Tab", " focus"));
    spans
}
