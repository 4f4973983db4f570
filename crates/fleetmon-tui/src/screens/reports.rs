//! Reports screen — read-only table of raw device reports.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Row, Table, TableState};

use fleetmon_core::Report;

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::fmt;

pub struct ReportsScreen {
    focused: bool,
    reports: Vec<Report>,
    selected: usize,
    loaded: bool,
}

impl ReportsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            reports: Vec::new(),
            selected: 0,
            loaded: false,
        }
    }
}

impl Component for ReportsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if !self.reports.is_empty() {
                    self.selected = (self.selected + 1).min(self.reports.len() - 1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('g') => self.selected = 0,
            KeyCode::Char('G') => {
                self.selected = self.reports.len().saturating_sub(1);
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::DataLoaded { reports, .. } = action {
            self.reports = reports.clone();
            self.loaded = true;
            if self.reports.is_empty() {
                self.selected = 0;
            } else {
                self.selected = self.selected.min(self.reports.len() - 1);
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = format!(" Device Reports ({}) ", self.reports.len());
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

        if self.reports.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let text = if self.loaded { "no reports" } else { "loading…" };
            frame.render_widget(Paragraph::new(text).style(theme::key_hint()), inner);
            return;
        }

        let header = Row::new(vec!["ID", "Lock Code", "Command Type", "Received At", "Raw Data"])
            .style(theme::table_header());

        let rows = self.reports.iter().map(|r| {
            Row::new(vec![
                r.id.to_string(),
                fmt::dash_cell(r.lock_code.as_deref()),
                fmt::dash_cell(r.command_type.as_deref()),
                fmt::dash_cell(r.received_at.as_deref()),
                fmt::truncate(&r.report_data, 60),
            ])
            .style(theme::table_row())
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),
                Constraint::Length(10),
                Constraint::Length(14),
                Constraint::Length(20),
                Constraint::Min(20),
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
        "reports"
    }
}
