//! Application core: event loop, action dispatch, service task routing.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use autoseo_core::{GenerationOptions, SiteService};

use crate::action::{Action, Notification, NotificationLevel};
use crate::bridge;
use crate::component::Component;
use crate::event::{Event, EventReader, Rates};
use crate::screens::dashboard::DashboardScreen;
use crate::theme;
use crate::tui::Tui;

const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Site Service reachability as seen by the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// No health check has answered yet.
    #[default]
    Connecting,
    Connected,
    Disconnected,
}

/// Top-level application state and event loop.
pub struct App<S> {
    service: S,
    dashboard: DashboardScreen,
    /// Whether the app should keep running.
    running: bool,
    connection_status: ConnectionStatus,
    /// Shown in the status bar.
    api_url: String,
    /// `None` disables polling.
    refresh_interval: Option<Duration>,
    last_refresh: Instant,
    /// Spawned service tasks report back through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Drained by the main loop.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
}

impl<S> App<S>
where
    S: SiteService + Clone + 'static,
{
    pub fn new(
        service: S,
        options: GenerationOptions,
        refresh_interval: Option<Duration>,
        api_url: String,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            service,
            dashboard: DashboardScreen::new(options),
            running: true,
            connection_status: ConnectionStatus::default(),
            api_url,
            refresh_interval,
            last_refresh: Instant::now(),
            action_tx,
            action_rx,
            notification: None,
        }
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let mut events = EventReader::spawn(Rates::default());

        self.start()?;
        info!(api_url = %self.api_url, "TUI event loop started");

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
                Event::Paste(text) => self.dashboard.paste(&text),
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        tui.exit();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Queue the initial load and health check.
    fn start(&mut self) -> Result<()> {
        self.last_refresh = Instant::now();
        self.action_tx.send(Action::RefreshSites)?;
        self.action_tx.send(Action::CheckHealth)?;
        Ok(())
    }

    /// Global keys first; everything else goes to the dashboard.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c' | 'q')) => Ok(Some(Action::Quit)),
            _ => self.dashboard.handle_key_event(key),
        }
    }

    /// Process a single action: spawn service work, update app state,
    /// and propagate to the dashboard.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Render | Action::Resize(..) => {}

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, created)| created.elapsed() > NOTIFICATION_TTL)
                {
                    self.notification = None;
                }
                if self.poll_due() {
                    self.last_refresh = Instant::now();
                    self.action_tx.send(Action::RefreshSites)?;
                    self.action_tx.send(Action::CheckHealth)?;
                }
                self.forward(action)?;
            }

            // ── Service work ──────────────────────────────────────
            Action::FetchSites(ticket) => {
                debug!(?ticket, "fetching sites");
                bridge::fetch_sites(self.service.clone(), self.action_tx.clone(), *ticket);
                bridge::fetch_stats(self.service.clone(), self.action_tx.clone(), *ticket);
            }

            Action::SubmitGeneration(request) => {
                info!(
                    keyword = request.keyword(),
                    provider = %request.options().cloud_provider,
                    "submitting generation request"
                );
                bridge::generate(
                    self.service.clone(),
                    self.action_tx.clone(),
                    request.clone(),
                );
            }

            Action::InspectSite(id) => {
                bridge::inspect(self.service.clone(), self.action_tx.clone(), id.clone());
            }

            Action::CheckHealth => {
                bridge::check_health(self.service.clone(), self.action_tx.clone());
            }

            // ── Results ───────────────────────────────────────────
            Action::GenerationFinished(result) => {
                let notification = match result {
                    Ok(Some(site)) if !site.domain.is_empty() => {
                        Notification::success(format!("Generating {}", site.domain))
                    }
                    Ok(_) => Notification::success("Generation started"),
                    Err(e) => Notification::error(e.clone()),
                };
                self.action_tx.send(Action::Notify(notification))?;
                self.forward(action)?;
            }

            Action::SiteDetailLoaded(Err(e)) => {
                self.action_tx.send(Action::Notify(Notification::error(e.clone())))?;
            }

            Action::HealthChecked(healthy) => {
                let status = if *healthy {
                    ConnectionStatus::Connected
                } else {
                    ConnectionStatus::Disconnected
                };
                if status != self.connection_status {
                    info!(?status, "site service connection changed");
                    if self.connection_status == ConnectionStatus::Disconnected {
                        self.action_tx.send(Action::Notify(Notification::info(
                            "Site service reachable again",
                        )))?;
                    }
                }
                self.connection_status = status;
            }

            Action::Notify(n) => {
                self.notification = Some((n.clone(), Instant::now()));
            }

            other => self.forward(other)?,
        }

        Ok(())
    }

    /// Hand an action to the dashboard and queue its follow-up, if any.
    fn forward(&mut self, action: &Action) -> Result<()> {
        if let Some(follow_up) = self.dashboard.update(action)? {
            self.action_tx.send(follow_up)?;
        }
        Ok(())
    }

    fn poll_due(&self) -> bool {
        self.refresh_interval
            .is_some_and(|interval| self.last_refresh.elapsed() >= interval)
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),    // Dashboard
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        self.dashboard.render(frame, layout[0]);
        self.render_status_bar(frame, layout[1]);

        if let Some((ref notif, _)) = self.notification {
            Self::render_notification(frame, area, notif);
        }
    }

    /// Render the bottom status bar with connection status and key hints.
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let connection_indicator = match self.connection_status {
            ConnectionStatus::Connected => {
                Span::styled("● connected", Style::default().fg(theme::SUCCESS_GREEN))
            }
            ConnectionStatus::Disconnected => {
                Span::styled("○ disconnected", Style::default().fg(theme::ERROR_RED))
            }
            ConnectionStatus::Connecting => {
                Span::styled("◐ connecting", Style::default().fg(theme::ELECTRIC_YELLOW))
            }
        };

        let mut spans = vec![
            Span::raw(" "),
            connection_indicator,
            Span::styled(format!(" {}", self.api_url), theme::key_hint()),
            Span::styled(" │ ", theme::key_hint()),
        ];
        for (key, label) in [
            ("Enter", "generate"),
            ("Tab", "focus"),
            ("↑/↓", "select"),
            ("^R", "reload"),
            ("^C", "quit"),
        ] {
            spans.push(Span::styled(key, theme::key_hint_key()));
            spans.push(Span::styled(format!(" {label}  "), theme::key_hint()));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Render a notification toast in the bottom-right corner.
    fn render_notification(frame: &mut Frame, area: Rect, notif: &Notification) {
        let msg_len = u16::try_from(notif.message.chars().count()).unwrap_or(u16::MAX);
        let width = msg_len.saturating_add(6).clamp(20, 60).min(area.width);
        let height = 3u16.min(area.height);

        let x = area.width.saturating_sub(width.saturating_add(1));
        let y = area.height.saturating_sub(height.saturating_add(2)); // above status bar
        let toast_area = Rect::new(area.x + x, area.y + y, width, height).intersection(area);
        if toast_area.is_empty() {
            return;
        }

        let border_color = theme::notification_color(notif.level);
        let icon = match notif.level {
            NotificationLevel::Success => "✓",
            NotificationLevel::Error => "✗",
            NotificationLevel::Info => "·",
        };

        frame.render_widget(Clear, toast_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme::BG_DARK));

        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(notif.message.as_str(), Style::default().fg(theme::DIM_WHITE)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};

    use autoseo_core::{
        CoreError, DashboardStats, GenerationRequest, SeoScore, Site, SiteDetail, SiteId,
        SiteStatus,
    };

    use super::*;

    /// Records every call; serves an in-memory site list.
    #[derive(Clone, Default)]
    struct FakeService {
        calls: Arc<Mutex<Vec<String>>>,
        sites: Arc<Mutex<Vec<Site>>>,
        fail_list: Arc<Mutex<bool>>,
        fail_generate: Arc<Mutex<bool>>,
        stats_delay: Arc<Mutex<Option<Duration>>>,
    }

    impl FakeService {
        fn with_sites(sites: Vec<Site>) -> Self {
            let fake = Self::default();
            *fake.sites.lock().unwrap() = sites;
            fake
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn count(&self, name: &str) -> usize {
            self.calls().iter().filter(|c| c.starts_with(name)).count()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    fn site(id: i64, domain: &str, keyword: &str, status: SiteStatus, score: f64) -> Site {
        Site {
            id: SiteId::Numeric(id),
            domain: domain.into(),
            keyword: keyword.into(),
            status,
            seo_score: SeoScore(score),
            title: None,
            cloud_url: None,
            created_at: None,
        }
    }

    impl SiteService for FakeService {
        async fn list_sites(&self) -> Result<Vec<Site>, CoreError> {
            self.record("list".into());
            if *self.fail_list.lock().unwrap() {
                return Err(CoreError::ConnectionFailed {
                    url: "http://localhost:8000/api/sites".into(),
                    reason: "connection refused".into(),
                });
            }
            Ok(self.sites.lock().unwrap().clone())
        }

        async fn generate_site(
            &self,
            request: &GenerationRequest,
        ) -> Result<Option<Site>, CoreError> {
            self.record(format!(
                "generate:{}:{}:{}",
                request.keyword(),
                request.options().cloud_provider,
                request.options().tone
            ));
            if *self.fail_generate.lock().unwrap() {
                return Err(CoreError::Service {
                    status: 500,
                    message: "Failed to generate site".into(),
                });
            }
            let mut sites = self.sites.lock().unwrap();
            let id = i64::try_from(sites.len()).unwrap() + 1;
            let created = site(
                id,
                &format!("{}.com", request.keyword().replace(' ', "")),
                request.keyword(),
                SiteStatus::Generating,
                0.0,
            );
            sites.insert(0, created.clone());
            Ok(Some(created))
        }

        async fn get_site(&self, id: &SiteId) -> Result<SiteDetail, CoreError> {
            self.record(format!("detail:{id}"));
            Err(CoreError::NotFound {
                identifier: id.to_string(),
            })
        }

        async fn dashboard_stats(&self) -> Result<DashboardStats, CoreError> {
            self.record("stats".into());
            let delay = *self.stats_delay.lock().unwrap();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            Ok(DashboardStats::default())
        }

        async fn health(&self) -> Result<bool, CoreError> {
            self.record("health".into());
            Ok(true)
        }
    }

    fn app(fake: &FakeService) -> App<FakeService> {
        polling_app(fake, None)
    }

    fn polling_app(fake: &FakeService, refresh: Option<Duration>) -> App<FakeService> {
        App::new(
            fake.clone(),
            GenerationOptions::default(),
            refresh,
            "http://localhost:8000".into(),
        )
    }

    /// Process queued and spawned-task actions until the app goes quiet.
    async fn settle(app: &mut App<FakeService>) {
        while let Ok(Some(action)) =
            tokio::time::timeout(Duration::from_millis(200), app.action_rx.recv()).await
        {
            app.process_action(&action).unwrap();
        }
    }

    fn press(app: &mut App<FakeService>, code: KeyCode) {
        if let Some(action) = app
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
        {
            app.action_tx.send(action).unwrap();
        }
    }

    fn type_text(app: &mut App<FakeService>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen_text(app: &App<FakeService>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[tokio::test]
    async fn startup_loads_sites_and_checks_health() {
        let fake = FakeService::with_sites(vec![site(
            1,
            "x.com",
            "x",
            SiteStatus::Deployed,
            87.0,
        )]);
        let mut app = app(&fake);
        app.start().unwrap();
        settle(&mut app).await;

        assert_eq!(fake.count("list"), 1);
        assert_eq!(fake.count("health"), 1);
        assert_eq!(app.connection_status, ConnectionStatus::Connected);

        let rendered = screen_text(&app);
        assert!(rendered.contains("x.com"));
        assert!(rendered.contains("87"));
        assert!(rendered.contains("● deployed"));
    }

    #[tokio::test]
    async fn blank_keyword_makes_no_request() {
        let fake = FakeService::default();
        let mut app = app(&fake);

        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        assert_eq!(fake.count("generate"), 0);
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn coffee_makers_scenario() {
        let fake = FakeService::default();
        let mut app = app(&fake);
        app.start().unwrap();
        settle(&mut app).await;
        assert!(app.dashboard.state().sites().is_empty());

        type_text(&mut app, "best coffee makers");
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        assert_eq!(
            fake.calls()
                .into_iter()
                .filter(|c| c != "stats" && c != "health")
                .collect::<Vec<_>>(),
            vec![
                "list".to_owned(),
                "generate:best coffee makers:aws:professional".to_owned(),
                "list".to_owned(),
            ]
        );

        let state = app.dashboard.state();
        assert_eq!(state.keyword(), "");
        assert!(!state.is_submitting());
        assert_eq!(state.sites().len(), 1);
        assert_eq!(state.sites()[0].keyword, "best coffee makers");
        assert_eq!(state.sites()[0].status, SiteStatus::Generating);

        let rendered = screen_text(&app);
        assert!(rendered.contains("◐ generating"));
        assert!(rendered.contains("Generating bestcoffeemakers.com"));
    }

    #[tokio::test]
    async fn trigger_disabled_while_generation_in_flight() {
        let fake = FakeService::default();
        let mut app = app(&fake);

        type_text(&mut app, "coffee");
        press(&mut app, KeyCode::Enter);
        // Dispatch the submission but don't settle it yet.
        let action = app.action_rx.recv().await.unwrap();
        assert!(matches!(action, Action::SubmitGeneration(_)));
        app.process_action(&action).unwrap();

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        assert_eq!(fake.count("generate"), 1);
        assert_eq!(fake.count("list"), 1);
    }

    #[tokio::test]
    async fn failed_generation_keeps_keyword_and_skips_refresh() {
        let fake = FakeService::default();
        *fake.fail_generate.lock().unwrap() = true;
        let mut app = app(&fake);

        type_text(&mut app, "coffee");
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        assert_eq!(fake.count("list"), 0);
        let state = app.dashboard.state();
        assert_eq!(state.keyword(), "coffee");
        assert_eq!(
            state.submit_error(),
            Some("Failed to generate site (HTTP 500)")
        );
        assert!(state.can_submit());
    }

    #[tokio::test]
    async fn load_failure_keeps_previous_list() {
        let fake = FakeService::with_sites(vec![site(
            1,
            "x.com",
            "x",
            SiteStatus::Deployed,
            87.0,
        )]);
        let mut app = app(&fake);
        app.start().unwrap();
        settle(&mut app).await;

        *fake.fail_list.lock().unwrap() = true;
        app.action_tx.send(Action::RefreshSites).unwrap();
        settle(&mut app).await;

        let state = app.dashboard.state();
        assert_eq!(state.sites().len(), 1);
        assert_eq!(state.sites()[0].domain, "x.com");
        assert_eq!(state.load_error(), Some("Site service unreachable"));
        assert!(screen_text(&app).contains("Site service unreachable"));
    }

    #[tokio::test]
    async fn detail_failure_notifies_without_touching_list() {
        let fake = FakeService::with_sites(vec![site(
            4,
            "x.com",
            "x",
            SiteStatus::Pending,
            12.5,
        )]);
        let mut app = app(&fake);
        app.start().unwrap();
        settle(&mut app).await;

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        assert_eq!(fake.count("detail:4"), 1);
        assert!(app.dashboard.detail().is_none());
        assert_eq!(app.dashboard.state().sites().len(), 1);
        let (notif, _) = app.notification.as_ref().unwrap();
        assert_eq!(notif.level, NotificationLevel::Error);
    }

    #[tokio::test]
    async fn slow_stats_do_not_hold_back_the_list() {
        let fake = FakeService::with_sites(vec![site(
            1,
            "x.com",
            "x",
            SiteStatus::Deployed,
            87.0,
        )]);
        *fake.stats_delay.lock().unwrap() = Some(Duration::from_secs(5));
        let mut app = app(&fake);
        app.start().unwrap();
        settle(&mut app).await;

        assert_eq!(fake.count("stats"), 1);
        let state = app.dashboard.state();
        assert!(state.loaded());
        assert!(!state.is_loading());
        assert_eq!(state.sites().len(), 1);
        assert!(state.stats().is_none());
        assert!(screen_text(&app).contains("x.com"));
    }

    #[tokio::test]
    async fn tick_after_interval_reloads_sites() {
        let fake = FakeService::default();
        let mut app = polling_app(&fake, Some(Duration::from_millis(50)));
        app.start().unwrap();
        settle(&mut app).await;
        assert_eq!(fake.count("list"), 1);
        assert_eq!(fake.count("health"), 1);

        tokio::time::sleep(Duration::from_millis(60)).await;
        app.action_tx.send(Action::Tick).unwrap();
        settle(&mut app).await;
        assert_eq!(fake.count("list"), 2);
        assert_eq!(fake.count("health"), 2);
    }

    #[tokio::test]
    async fn tick_before_interval_does_nothing() {
        let fake = FakeService::default();
        let mut app = polling_app(&fake, Some(Duration::from_secs(60)));
        app.start().unwrap();
        settle(&mut app).await;

        app.action_tx.send(Action::Tick).unwrap();
        settle(&mut app).await;

        assert_eq!(fake.count("list"), 1);
    }

    #[tokio::test]
    async fn no_interval_means_no_polling() {
        let fake = FakeService::default();
        let mut app = polling_app(&fake, None);
        app.start().unwrap();
        settle(&mut app).await;

        tokio::time::sleep(Duration::from_millis(60)).await;
        for _ in 0..3 {
            app.action_tx.send(Action::Tick).unwrap();
        }
        settle(&mut app).await;

        assert_eq!(fake.count("list"), 1);
        assert_eq!(fake.count("health"), 1);
    }

    #[test]
    fn toast_fits_tiny_terminals() {
        let fake = FakeService::default();
        let mut app = app(&fake);
        app.notification = Some((
            Notification::error("Site service unreachable"),
            Instant::now(),
        ));

        for (width, height) in [(80, 2), (80, 1)] {
            let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
            terminal.draw(|f| app.render(f)).unwrap();
        }

        let mut terminal = Terminal::new(TestBackend::new(80, 3)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(rendered.contains("✗"));
    }

    #[tokio::test]
    async fn ctrl_c_quits() {
        let fake = FakeService::default();
        let mut app = app(&fake);
        let action = app
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        app.process_action(&action.unwrap()).unwrap();
        assert!(!app.running);
    }
}
