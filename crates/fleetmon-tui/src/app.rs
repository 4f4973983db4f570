//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use fleetmon_core::{Fleet, Snapshot};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::assign::AssignModal;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
#[allow(clippy::struct_excessive_bools)]
pub struct App {
    /// Current active screen.
    active_screen: ScreenId,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Initial load in flight (full-screen spinner semantics).
    loading: bool,
    /// Manual reload in flight — indicated independently of `loading`.
    refreshing: bool,
    /// Help overlay visibility.
    help_visible: bool,
    /// Assignment modal, present while the workflow surface is open.
    assign: Option<AssignModal>,
    /// Latest loaded data — feeds the modal's balise picker.
    snapshot: Snapshot,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
    /// Terminal size for responsive layout.
    terminal_size: (u16, u16),
    /// Action sender — components dispatch through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Backend handle.
    fleet: Fleet,
    /// Generation counter for loads — a response from a superseded load
    /// is dropped instead of overwriting fresher data.
    load_generation: Arc<AtomicU64>,
    /// Spinner state for the status bar.
    throbber: throbber_widgets_tui::ThrobberState,
}

impl App {
    pub fn new(fleet: Fleet) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens().into_iter().collect();

        Self {
            active_screen: ScreenId::Dashboard,
            screens,
            running: true,
            loading: false,
            refreshing: false,
            help_visible: false,
            assign: None,
            snapshot: Snapshot::default(),
            notification: None,
            terminal_size: (0, 0),
            action_tx,
            action_rx,
            fleet,
            load_generation: Arc::new(AtomicU64::new(0)),
            throbber: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.terminal_size = tui.size().unwrap_or((80, 24));
        self.init_screens()?;

        // Kick off the initial load.
        self.action_tx.send(Action::Refresh { manual: false })?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // Drain and process all queued actions.
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys go to the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // The assignment modal captures all input except Ctrl+C.
        if let Some(modal) = self.assign.as_mut() {
            if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
                return Ok(Some(Action::Quit));
            }
            return modal.handle_key_event(key);
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        match (key.modifiers, key.code) {
            // Quit
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            // Help
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),

            // Manual reload (pull-to-refresh)
            (KeyModifiers::NONE, KeyCode::Char('r')) => {
                return Ok(Some(Action::Refresh { manual: true }));
            }

            // Assignment workflow
            (KeyModifiers::NONE, KeyCode::Char('a')) => return Ok(Some(Action::OpenAssign)),

            // Manual sync trigger
            (KeyModifiers::NONE, KeyCode::Char('s')) => return Ok(Some(Action::TriggerSync)),

            // Screen navigation via number keys
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='3')) => {
                let n = c as u8 - b'0';
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            // Tab / Shift+Tab for screen cycling
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }

            _ => {}
        }

        // Delegate to the active screen component.
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Process a single action — update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                self.terminal_size = (*w, *h);
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            // ── Loading ───────────────────────────────────────────────

            Action::Refresh { manual } => {
                if *manual {
                    self.refreshing = true;
                } else {
                    self.loading = true;
                }
                self.spawn_load();
            }

            Action::DataLoaded {
                generation,
                snapshot,
                ..
            } => {
                // A newer load was started after this one — drop it.
                if *generation != self.load_generation.load(Ordering::Relaxed) {
                    debug!(generation, "dropping stale load result");
                    return Ok(());
                }
                self.loading = false;
                self.refreshing = false;
                self.snapshot = snapshot.clone();
                // Data updates go to ALL screens so they stay in sync.
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            // ── Assignment workflow ───────────────────────────────────

            Action::OpenAssign => {
                if self.assign.is_none() {
                    let mut modal = AssignModal::new(&self.snapshot.balises);
                    modal.init(self.action_tx.clone())?;
                    self.assign = Some(modal);
                }
            }

            Action::CloseAssign => {
                self.assign = None;
            }

            Action::SubmitAssignment(request) => {
                let fleet = self.fleet.clone();
                let tx = self.action_tx.clone();
                let request = request.clone();
                tokio::spawn(async move {
                    let result = fleet
                        .assign(&request)
                        .await
                        .map_err(|e| e.to_string());
                    let _ = tx.send(Action::AssignmentResult(result));
                });
            }

            Action::AssignmentResult(Ok(())) => {
                // Confirmation, close the surface, and reload — the list
                // only reflects backend state after this refetch.
                self.assign = None;
                self.action_tx.send(Action::Notify(Notification::success(
                    "Balise assigned successfully",
                )))?;
                self.action_tx.send(Action::Refresh { manual: true })?;
            }

            Action::AssignmentResult(Err(message)) => {
                warn!(error = %message, "assignment rejected");
                self.action_tx
                    .send(Action::Notify(Notification::error(format!(
                        "Assignment failed: {message}"
                    ))))?;
                if let Some(modal) = self.assign.as_mut() {
                    modal.update(action)?;
                }
            }

            // ── Manual sync ───────────────────────────────────────────

            Action::TriggerSync => {
                let fleet = self.fleet.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let result = fleet.trigger_sync().await.map_err(|e| e.to_string());
                    let _ = tx.send(Action::SyncResult(result));
                });
            }

            // One-shot acknowledgment either way; deliberately no reload.
            Action::SyncResult(Ok(())) => {
                self.action_tx.send(Action::Notify(Notification::success(
                    "Manual sync triggered",
                )))?;
            }

            Action::SyncResult(Err(message)) => {
                warn!(error = %message, "sync trigger failed");
                self.action_tx
                    .send(Action::Notify(Notification::error(format!(
                        "Sync failed: {message}"
                    ))))?;
            }

            // ── Notifications / housekeeping ──────────────────────────

            Action::Notify(n) => {
                self.notification = Some((n.clone(), Instant::now()));
            }

            Action::DismissNotification => {
                self.notification = None;
            }

            Action::Tick => {
                // Auto-dismiss notifications after 3 seconds.
                if let Some((_, created)) = &self.notification {
                    if created.elapsed() > Duration::from_secs(3) {
                        self.notification = None;
                    }
                }
                if self.loading || self.refreshing {
                    self.throbber.calc_next();
                }
            }

            Action::Render => {}
        }

        Ok(())
    }

    /// Start one full load. Bumps the generation so that any still-running
    /// previous load lands stale and gets dropped — requests themselves
    /// are never aborted.
    fn spawn_load(&self) {
        let generation = self.load_generation.fetch_add(1, Ordering::Relaxed) + 1;
        let gen_ref = self.load_generation.clone();
        let fleet = self.fleet.clone();
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let (snapshot, reports) = tokio::join!(fleet.load_snapshot(), fleet.load_reports());

            if gen_ref.load(Ordering::Relaxed) != generation {
                return;
            }
            let _ = tx.send(Action::DataLoaded {
                generation,
                snapshot,
                reports,
            });
        });
    }

    // ── Rendering ─────────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }

        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        // Overlays, last on top.
        if let Some(ref modal) = self.assign {
            modal.render(frame, area);
        }

        if let Some((ref notif, _)) = self.notification {
            self.render_notification(frame, area, notif);
        }

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if self.loading || self.refreshing {
            let label = if self.loading {
                " loading"
            } else {
                " refreshing"
            };
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(label)
                .style(Style::default().fg(theme::FOG))
                .throbber_style(Style::default().fg(theme::AMBER));
            let split =
                Layout::horizontal([Constraint::Length(14), Constraint::Min(1)]).split(area);
            frame.render_stateful_widget(throbber, split[0], &mut self.throbber.clone());
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "│ a assign  s sync  r refresh  ? help  q quit",
                    theme::key_hint(),
                ))),
                split[1],
            );
            return;
        }

        let server = Span::styled(
            format!(" ● {}", self.fleet.client().base_url()),
            Style::default().fg(theme::TEAL),
        );
        let hints = Span::styled(
            "  │ a assign  s sync  r refresh  ? help  q quit",
            theme::key_hint(),
        );
        frame.render_widget(Paragraph::new(Line::from(vec![server, hints])), area);
    }

    /// Render the help overlay centered on screen.
    #[allow(clippy::unused_self)]
    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_width = 54u16.min(area.width.saturating_sub(4));
        let help_height = 16u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let hint = |key: &'static str, text: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<9}"), theme::key_hint_key()),
                Span::styled(text, theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            Line::from(Span::styled("  Navigation", Style::default().fg(theme::TEAL))),
            hint("1-3", "Jump to screen"),
            hint("Tab", "Next screen"),
            hint("j/k ↑/↓", "Move up/down"),
            hint("g/G", "Top / bottom"),
            Line::from(""),
            Line::from(Span::styled("  Actions", Style::default().fg(theme::TEAL))),
            hint("a", "Assign balise to customer"),
            hint("s", "Trigger manual CMA-CGM sync"),
            hint("r", "Reload all data"),
            Line::from(""),
            hint("?", "This help"),
            hint("q", "Quit"),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }

    /// Render a notification toast in the bottom-right corner.
    #[allow(clippy::unused_self, clippy::cast_possible_truncation)]
    fn render_notification(&self, frame: &mut Frame, area: Rect, notif: &Notification) {
        let msg_len = notif.message.len() as u16;
        let width = (msg_len + 6).clamp(20, 60);
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2); // above status bar
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        let (border_color, icon) = match notif.level {
            NotificationLevel::Success => (theme::OK_GREEN, "✓"),
            NotificationLevel::Error => (theme::ALERT_RED, "✗"),
            NotificationLevel::Info => (theme::SKY, "·"),
        };

        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            toast_area,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(&notif.message, Style::default().fg(theme::FOG)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}
