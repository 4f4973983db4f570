//! Dashboard screen — stat cards, known customers, and action triggers.
//!
//! Layout:
//! ┌─ Total ──┐ ┌─ Active ─┐ ┌─ CMA-CGM ─┐ ┌─ Unassigned ─┐
//! ├─ Customers ─────────────┬─ Actions ──────────────────┤
//! └─────────────────────────┴────────────────────────────┘

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use fleetmon_core::StatsSummary;

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct DashboardScreen {
    focused: bool,
    stats: StatsSummary,
    customers: Vec<String>,
    /// False until the first load completes — drives the placeholder text.
    loaded: bool,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            stats: StatsSummary::default(),
            customers: Vec::new(),
            loaded: false,
        }
    }

    fn render_stat_card(frame: &mut Frame, area: Rect, label: &str, value: u64) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::from(Span::styled(
                value.to_string(),
                Style::default()
                    .fg(theme::AMBER)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            Line::from(Span::styled(label.to_owned(), theme::key_hint()))
                .alignment(Alignment::Center),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for DashboardScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::DataLoaded { snapshot, .. } = action {
            self.stats = snapshot.stats;
            self.customers = snapshot.customers.clone();
            self.loaded = true;
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Length(4), // stat cards
            Constraint::Min(1),    // customers + actions
        ])
        .split(area);

        let cards = Layout::horizontal([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(rows[0]);

        Self::render_stat_card(frame, cards[0], "Total Balises", self.stats.total);
        Self::render_stat_card(frame, cards[1], "Active", self.stats.active);
        Self::render_stat_card(frame, cards[2], "CMA-CGM", self.stats.cmacgm);
        Self::render_stat_card(frame, cards[3], "Unassigned", self.stats.unassigned);

        let panels =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[1]);

        // Customers panel
        let customers_block = Block::default()
            .title(" Customers ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = customers_block.inner(panels[0]);
        frame.render_widget(customers_block, panels[0]);

        let customer_lines: Vec<Line> = if self.customers.is_empty() {
            let placeholder = if self.loaded { "none on record" } else { "loading…" };
            vec![Line::from(Span::styled(placeholder, theme::key_hint()))]
        } else {
            self.customers
                .iter()
                .map(|c| Line::from(Span::styled(format!("• {c}"), theme::table_row())))
                .collect()
        };
        frame.render_widget(Paragraph::new(customer_lines), inner);

        // Actions panel
        let actions_block = Block::default()
            .title(" Actions ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = actions_block.inner(panels[1]);
        frame.render_widget(actions_block, panels[1]);

        let action_lines = vec![
            Line::from(vec![
                Span::styled("  a  ", theme::key_hint_key()),
                Span::styled("Assign balise to customer", theme::table_row()),
            ]),
            Line::from(vec![
                Span::styled("  s  ", theme::key_hint_key()),
                Span::styled("Trigger manual CMA-CGM sync", theme::table_row()),
            ]),
            Line::from(vec![
                Span::styled("  r  ", theme::key_hint_key()),
                Span::styled("Reload data", theme::table_row()),
            ]),
        ];
        frame.render_widget(Paragraph::new(action_lines), inner);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "dashboard"
    }
}
