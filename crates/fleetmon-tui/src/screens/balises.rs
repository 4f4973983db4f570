//! Balises screen — the device inventory table.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table, TableState};

use fleetmon_core::{Balise, BaliseStatus};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::fmt;

pub struct BalisesScreen {
    focused: bool,
    balises: Vec<Balise>,
    selected: usize,
    loaded: bool,
}

impl BalisesScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            balises: Vec::new(),
            selected: 0,
            loaded: false,
        }
    }

    fn clamp_selection(&mut self) {
        if self.balises.is_empty() {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(self.balises.len() - 1);
        }
    }

    fn status_style(status: BaliseStatus) -> Style {
        match status {
            BaliseStatus::Active => Style::default().fg(theme::OK_GREEN),
            BaliseStatus::Inactive => Style::default().fg(theme::ALERT_RED),
            _ => Style::default().fg(theme::SLATE),
        }
    }

    fn status_text(status: BaliseStatus) -> &'static str {
        match status {
            BaliseStatus::Active => "ACTIVE",
            BaliseStatus::Inactive => "INACTIVE",
            _ => "UNKNOWN",
        }
    }
}

impl Component for BalisesScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if !self.balises.is_empty() {
                    self.selected = (self.selected + 1).min(self.balises.len() - 1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('g') => self.selected = 0,
            KeyCode::Char('G') => {
                self.selected = self.balises.len().saturating_sub(1);
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::DataLoaded { snapshot, .. } = action {
            self.balises = snapshot.balises.clone();
            self.loaded = true;
            self.clamp_selection();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = format!(" Balises ({}) ", self.balises.len());
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        if self.balises.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let text = if self.loaded {
                "no balises on record"
            } else {
                "loading…"
            };
            frame.render_widget(
                ratatui::widgets::Paragraph::new(text).style(theme::key_hint()),
                inner,
            );
            return;
        }

        let header = Row::new(vec!["Name", "Status", "IMEI", "Customer", "Battery", "Last Seen"])
            .style(theme::table_header());

        let rows = self.balises.iter().map(|b| {
            Row::new(vec![
                Cell::from(b.name.clone()),
                Cell::from(Self::status_text(b.status)).style(Self::status_style(b.status)),
                Cell::from(b.imei.clone()),
                Cell::from(fmt::customer_cell(b.customer.as_deref())),
                Cell::from(fmt::battery_cell(b.battery_level)),
                Cell::from(fmt::last_seen_cell(b.last_seen)),
            ])
            .style(theme::table_row())
        });

        let table = Table::new(
            rows,
            [
                Constraint::Min(16),
                Constraint::Length(8),
                Constraint::Length(17),
                Constraint::Min(12),
                Constraint::Length(8),
                Constraint::Length(12),
            ],
        )
        .header(header)
        .row_highlight_style(theme::table_selected())
        .block(block);

        let mut state = TableState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "balises"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use fleetmon_core::Snapshot;

    use super::*;

    fn balise(id: i64) -> Balise {
        serde_json::from_value(serde_json::json!({
            "id": id, "name": format!("B-{id}"), "imei": format!("86{id}")
        }))
        .unwrap()
    }

    #[test]
    fn selection_clamps_when_the_list_shrinks() {
        let mut screen = BalisesScreen::new();
        let load = |balises: Vec<Balise>| Action::DataLoaded {
            generation: 0,
            snapshot: Snapshot {
                balises,
                ..Snapshot::default()
            },
            reports: Vec::new(),
        };

        screen.update(&load(vec![balise(1), balise(2), balise(3)])).unwrap();
        screen
            .handle_key_event(KeyEvent::from(KeyCode::Char('G')))
            .unwrap();
        assert_eq!(screen.selected, 2);

        // Reload with fewer rows — the cursor must not dangle.
        screen.update(&load(vec![balise(1)])).unwrap();
        assert_eq!(screen.selected, 0);
    }
}
