// ABOUTME: Detail pane for the selected vendor: contacts, deals and notes with quick-add

use crate::api::{Contact, ContactDraft, Deal, DealStage, NewContact, NewDeal, NewNote, Note, RecordKind, Vendor};
use crate::components::theme::{CORNFLOWER_BLUE, GOLD, MUTED_GRAY, PANEL_BG, SOFT_WHITE};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

#[derive(Debug, Clone)]
pub struct VendorDetailState {
    pub vendor: Vendor,
    pub contacts: Vec<Contact>,
    pub deals: Vec<Deal>,
    pub notes: Vec<Note>,
    pub loading: bool,
}

impl VendorDetailState {
    pub const fn new(vendor: Vendor) -> Self {
        Self {
            vendor,
            contacts: Vec::new(),
            deals: Vec::new(),
            notes: Vec::new(),
            loading: true,
        }
    }
}

/// Placeholder record posted by a quick-add action
#[derive(Debug, Clone, PartialEq)]
pub enum QuickRecord {
    Contact(NewContact),
    Deal(NewDeal),
    Note(NewNote),
}

impl QuickRecord {
    pub fn for_vendor(kind: RecordKind, vendor: &Vendor) -> Self {
        let vendor_id = vendor.id.clone();
        match kind {
            RecordKind::Contact => Self::Contact(NewContact {
                vendor_id,
                fields: ContactDraft {
                    name: "New Contact".to_string(),
                    ..Default::default()
                },
            }),
            RecordKind::Deal => Self::Deal(NewDeal {
                vendor_id,
                title: "New Deal".to_string(),
                value: 0.0,
                currency: "USD".to_string(),
                stage: DealStage::Prospect,
            }),
            RecordKind::Note => Self::Note(NewNote {
                vendor_id,
                content: "New note".to_string(),
                author: Some("System".to_string()),
            }),
        }
    }
}

pub struct VendorDetailComponent;

impl VendorDetailComponent {
    pub const fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: Option<&VendorDetailState>, focused: bool) {
        let Some(detail) = state else {
            let placeholder = Paragraph::new(Span::styled(
                "Select a vendor from the list to manage contacts, deals, and notes.",
                Style::default().fg(MUTED_GRAY),
            ))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(section_block(" Details ", focused));
            frame.render_widget(placeholder, area);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
                Constraint::Min(3),
            ])
            .split(area);

        let vendor = &detail.vendor;
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                vendor.fields.business_name.clone(),
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} • {}", vendor.fields.name, vendor.fields.email),
                Style::default().fg(SOFT_WHITE),
            )),
        ])
        .block(section_block(" Vendor ", focused));
        frame.render_widget(header, chunks[0]);

        let contacts = detail
            .contacts
            .iter()
            .map(|c| {
                if c.fields.email.is_empty() {
                    c.fields.name.clone()
                } else {
                    format!("{} • {}", c.fields.name, c.fields.email)
                }
            })
            .collect();
        render_section(frame, chunks[1], " Contacts [c] ", contacts, "No contacts yet", detail.loading);

        let deals = detail
            .deals
            .iter()
            .map(|d| format!("{} • ${} • {}", d.title, d.value, d.stage))
            .collect();
        render_section(frame, chunks[2], " Deals [d] ", deals, "No deals yet", detail.loading);

        let notes = detail.notes.iter().map(|n| n.content.clone()).collect();
        render_section(frame, chunks[3], " Notes [n] ", notes, "No notes yet", detail.loading);
    }
}

impl Default for VendorDetailComponent {
    fn default() -> Self {
        Self::new()
    }
}

fn section_block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused { GOLD } else { CORNFLOWER_BLUE }))
        .style(Style::default().bg(PANEL_BG))
        .title(title)
        .title_style(Style::default().fg(GOLD))
}

fn render_section(frame: &mut Frame, area: Rect, title: &str, rows: Vec<String>, empty: &str, loading: bool) {
    let lines: Vec<Line> = if loading {
        vec![Line::from(Span::styled("Loading…", Style::default().fg(MUTED_GRAY)))]
    } else if rows.is_empty() {
        vec![Line::from(Span::styled(empty.to_string(), Style::default().fg(MUTED_GRAY)))]
    } else {
        rows.into_iter()
            .map(|row| Line::from(Span::styled(row, Style::default().fg(SOFT_WHITE))))
            .collect()
    };

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(section_block(title, false)),
        area,
    );
}
