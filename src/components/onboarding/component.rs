// ABOUTME: Onboarding wizard overlay component
// Renders the step progress, the current step's form, and navigation hints

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::state::{FieldKind, OnboardingState, OnboardingStep};
use crate::components::theme::{
    CORNFLOWER_BLUE, DARK_BG, ERROR_RED, GOLD, MUTED_GRAY, PANEL_BG, SELECTION_GREEN,
    SOFT_WHITE, SUBDUED_BORDER,
};

/// The onboarding wizard overlay
pub struct OnboardingComponent;

impl OnboardingComponent {
    pub const fn new() -> Self {
        Self
    }

    /// Render the wizard centered over `area`, if it is visible
    pub fn render(&self, frame: &mut Frame, area: Rect, state: &OnboardingState) {
        if !state.visible {
            return;
        }

        let dialog = centered_rect(area, 72, 22);
        frame.render_widget(Clear, dialog);

        let container = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CORNFLOWER_BLUE))
            .style(Style::default().bg(DARK_BG))
            .title(" Vendor Onboarding ")
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));
        let inner = container.inner(dialog);
        frame.render_widget(container, dialog);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // Progress
                Constraint::Length(2), // Description
                Constraint::Length(2), // Error
                Constraint::Min(6),    // Fields
                Constraint::Length(1), // Navigation
            ])
            .split(inner);

        self.render_progress(frame, layout[0], state);

        let description = Paragraph::new(Span::styled(
            state.current_step().description(),
            Style::default().fg(MUTED_GRAY),
        ))
        .wrap(Wrap { trim: true });
        frame.render_widget(description, layout[1]);

        if let Some(error) = &state.error_message {
            let error = Paragraph::new(Span::styled(format!("✗ {error}"), Style::default().fg(ERROR_RED)))
                .wrap(Wrap { trim: true });
            frame.render_widget(error, layout[2]);
        }

        self.render_fields(frame, layout[3], state);
        self.render_navigation(frame, layout[4], state);
    }

    /// Render step progress dots
    fn render_progress(&self, frame: &mut Frame, area: Rect, state: &OnboardingState) {
        let steps = OnboardingStep::all();
        let current_idx = state.current_step().number() - 1;

        let mut spans = Vec::new();
        for (idx, step) in steps.iter().enumerate() {
            let (icon, style) = if idx < current_idx {
                ("●", Style::default().fg(SELECTION_GREEN))
            } else if idx == current_idx {
                ("◉", Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
            } else {
                ("○", Style::default().fg(MUTED_GRAY))
            };

            spans.push(Span::styled(icon, style));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                step.title(),
                if idx == current_idx {
                    Style::default().fg(SOFT_WHITE)
                } else {
                    Style::default().fg(MUTED_GRAY)
                },
            ));

            if idx < steps.len() - 1 {
                spans.push(Span::styled(" → ", Style::default().fg(SUBDUED_BORDER)));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
    }

    fn render_fields(&self, frame: &mut Frame, area: Rect, state: &OnboardingState) {
        let fields = state.current_step().fields();

        let lines: Vec<Line> = fields
            .iter()
            .enumerate()
            .map(|(idx, spec)| {
                let focused = idx == state.focused_field;
                let marker = if focused { "▸ " } else { "  " };
                let value = state.field_value(idx);

                let value_span = match spec.kind {
                    FieldKind::Choice => Span::styled(
                        format!("◂ {value} ▸"),
                        Style::default().fg(if focused { GOLD } else { SOFT_WHITE }),
                    ),
                    _ if value.is_empty() && !focused => {
                        Span::styled(spec.label.to_lowercase(), Style::default().fg(SUBDUED_BORDER))
                    }
                    _ => {
                        let cursor = if focused && !state.loading { "█" } else { "" };
                        Span::styled(format!("{value}{cursor}"), Style::default().fg(SOFT_WHITE))
                    }
                };

                Line::from(vec![
                    Span::styled(marker, Style::default().fg(GOLD)),
                    Span::styled(
                        format!("{:<22}", spec.label),
                        if focused {
                            Style::default().fg(CORNFLOWER_BLUE).add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(MUTED_GRAY)
                        },
                    ),
                    value_span,
                ])
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(SUBDUED_BORDER))
            .style(Style::default().bg(PANEL_BG));

        frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
    }

    fn render_navigation(&self, frame: &mut Frame, area: Rect, state: &OnboardingState) {
        let key = Style::default().fg(GOLD);
        let text = Style::default().fg(MUTED_GRAY);

        let primary = match (state.loading, state.is_final_step()) {
            (true, _) => "Saving…",
            (false, true) => "Finish",
            (false, false) => "Save & Continue",
        };

        let mut spans = vec![Span::styled("Enter ", key), Span::styled(primary, text)];

        if state.current_step().is_optional() {
            spans.push(Span::styled("  Ctrl+S ", key));
            spans.push(Span::styled("Skip", text));
        }
        if state.can_go_back() {
            spans.push(Span::styled("  Ctrl+B ", key));
            spans.push(Span::styled("Back", text));
        }
        spans.push(Span::styled("  Tab ", key));
        spans.push(Span::styled("Next field", text));
        spans.push(Span::styled("  Esc ", key));
        spans.push(Span::styled("Close", text));

        frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
    }
}

impl Default for OnboardingComponent {
    fn default() -> Self {
        Self::new()
    }
}

/// A rect of at most `width` x `height`, centered in `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
