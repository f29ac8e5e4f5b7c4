// ABOUTME: Plain vendor creation form (no wizard), with required-field presence checks

use crate::api::VendorDraft;
use crate::components::theme::{CORNFLOWER_BLUE, GOLD, MUTED_GRAY, PANEL_BG, SOFT_WHITE, SUBDUED_BORDER};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

const FIELD_LABELS: [&str; 6] = [
    "Contact name*",
    "Email*",
    "Business name*",
    "Phone",
    "Category",
    "Website",
];

#[derive(Debug, Default)]
pub struct VendorFormState {
    pub draft: VendorDraft,
    pub focused_field: usize,
    pub loading: bool,
}

impl VendorFormState {
    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.draft.name),
            1 => Some(&mut self.draft.email),
            2 => Some(&mut self.draft.business_name),
            3 => Some(&mut self.draft.phone),
            4 => Some(&mut self.draft.category),
            5 => Some(&mut self.draft.website),
            _ => None,
        }
    }

    fn field(&self, index: usize) -> &str {
        match index {
            0 => &self.draft.name,
            1 => &self.draft.email,
            2 => &self.draft.business_name,
            3 => &self.draft.phone,
            4 => &self.draft.category,
            5 => &self.draft.website,
            _ => "",
        }
    }

    pub fn input_char(&mut self, c: char) {
        if self.loading || c.is_control() {
            return;
        }
        if let Some(value) = self.field_mut(self.focused_field) {
            value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.loading {
            return;
        }
        if let Some(value) = self.field_mut(self.focused_field) {
            value.pop();
        }
    }

    pub fn next_field(&mut self) {
        self.focused_field = (self.focused_field + 1) % FIELD_LABELS.len();
    }

    pub fn previous_field(&mut self) {
        self.focused_field = (self.focused_field + FIELD_LABELS.len() - 1) % FIELD_LABELS.len();
    }

    /// Validate required fields, returning the draft to send
    pub fn prepare_submit(&self) -> Result<VendorDraft, String> {
        let missing = self.draft.missing_required();
        if missing.is_empty() {
            Ok(self.draft.clone())
        } else {
            Err(format!("Please fill in: {}", missing.join(", ")))
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub struct VendorFormComponent;

impl VendorFormComponent {
    pub const fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &VendorFormState, focused: bool) {
        let title = if state.loading { " Onboard Vendor (creating…) " } else { " Onboard Vendor " };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if focused { GOLD } else { CORNFLOWER_BLUE }))
            .style(Style::default().bg(PANEL_BG))
            .title(title)
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));

        let lines: Vec<Line> = FIELD_LABELS
            .iter()
            .enumerate()
            .map(|(idx, label)| {
                let active = focused && idx == state.focused_field;
                let value = state.field(idx);
                let value_span = if value.is_empty() && !active {
                    Span::styled("—", Style::default().fg(SUBDUED_BORDER))
                } else {
                    let cursor = if active { "█" } else { "" };
                    Span::styled(format!("{value}{cursor}"), Style::default().fg(SOFT_WHITE))
                };
                Line::from(vec![
                    Span::styled(
                        format!("{label:<15}"),
                        Style::default().fg(if active { CORNFLOWER_BLUE } else { MUTED_GRAY }),
                    ),
                    value_span,
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl Default for VendorFormComponent {
    fn default() -> Self {
        Self::new()
    }
}
