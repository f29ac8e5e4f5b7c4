// ABOUTME: Vendor list with business-name search

use crate::api::Vendor;
use crate::components::theme::{CORNFLOWER_BLUE, GOLD, MUTED_GRAY, PANEL_BG, SOFT_WHITE, SUBDUED_BORDER};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

#[derive(Debug, Default)]
pub struct VendorListState {
    pub items: Vec<Vendor>,
    pub query: String,
    pub selected: usize,
    pub loading: bool,
}

impl VendorListState {
    pub fn selected_vendor(&self) -> Option<&Vendor> {
        self.items.get(self.selected)
    }

    /// Replace the items, keeping the selection in range
    pub fn set_items(&mut self, items: Vec<Vendor>) {
        self.items = items;
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    /// Select the vendor with `id` if it is listed
    pub fn select_id(&mut self, id: &crate::api::RecordId) -> bool {
        if let Some(index) = self.items.iter().position(|v| &v.id == id) {
            self.selected = index;
            return true;
        }
        false
    }

    pub fn next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    pub fn previous(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + self.items.len() - 1) % self.items.len();
        }
    }
}

pub struct VendorListComponent;

impl VendorListComponent {
    pub const fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &VendorListState,
        search_focused: bool,
        list_focused: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(area);

        let search_border = if search_focused { GOLD } else { SUBDUED_BORDER };
        let cursor = if search_focused { "█" } else { "" };
        let search_text = if state.query.is_empty() && !search_focused {
            Span::styled("Search business name (/)", Style::default().fg(MUTED_GRAY))
        } else {
            Span::styled(format!("{}{}", state.query, cursor), Style::default().fg(SOFT_WHITE))
        };
        let search = Paragraph::new(search_text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(search_border))
                .style(Style::default().bg(PANEL_BG)),
        );
        frame.render_widget(search, chunks[0]);

        let title = if state.loading { " Vendors (loading…) " } else { " Vendors " };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if list_focused { GOLD } else { CORNFLOWER_BLUE }))
            .style(Style::default().bg(PANEL_BG))
            .title(title)
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));

        if state.items.is_empty() {
            let empty = Paragraph::new(Span::styled("No vendors found", Style::default().fg(MUTED_GRAY)))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, chunks[1]);
            return;
        }

        let items: Vec<ListItem> = state
            .items
            .iter()
            .map(|vendor| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        vendor.fields.business_name.clone(),
                        Style::default().fg(SOFT_WHITE).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("{} • {}", vendor.fields.name, vendor.fields.email),
                        Style::default().fg(MUTED_GRAY),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(SUBDUED_BORDER))
            .highlight_symbol("▸ ");

        let mut list_state = ListState::default().with_selected(Some(state.selected));
        frame.render_stateful_widget(list, chunks[1], &mut list_state);
    }
}

impl Default for VendorListComponent {
    fn default() -> Self {
        Self::new()
    }
}
