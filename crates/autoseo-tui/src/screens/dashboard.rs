//! Dashboard screen: keyword input, generate trigger, site list and detail overlay.

use chrono::Utc;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap,
    },
};
use throbber_widgets_tui::{Throbber, ThrobberState};

use autoseo_core::{DashboardState, GenerationOptions, SiteDetail};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::status_badge::badge_span;
use crate::widgets::time_fmt::{fmt_age, fmt_timestamp};

/// Newest sites listed in the overview strip.
const RECENT_SHOWN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Focus {
    #[default]
    Input,
    List,
}

pub struct DashboardScreen {
    state: DashboardState,
    focus: Focus,
    detail: Option<SiteDetail>,
    throbber_state: ThrobberState,
}

impl DashboardScreen {
    pub fn new(options: GenerationOptions) -> Self {
        Self {
            state: DashboardState::new(options),
            focus: Focus::Input,
            detail: None,
            throbber_state: ThrobberState::default(),
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn detail(&self) -> Option<&SiteDetail> {
        self.detail.as_ref()
    }

    /// Pasted text goes into the keyword; line breaks become spaces.
    pub fn paste(&mut self, text: &str) {
        if self.detail.is_some() {
            return;
        }
        for c in text.chars() {
            if c.is_whitespace() {
                self.state.push_char(' ');
            } else if !c.is_control() {
                self.state.push_char(c);
            }
        }
        self.focus = Focus::Input;
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::List,
            Focus::List => Focus::Input,
        };
    }

    fn border_for(&self, focus: Focus) -> Style {
        if self.focus == focus {
            theme::border_focused()
        } else {
            theme::border_default()
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_overview(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" AutoSEO ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let line = match self.state.stats() {
            Some(stats) => {
                let mut spans = vec![
                    Span::styled(" Sites ", theme::key_hint()),
                    Span::styled(stats.total_sites.to_string(), theme::title_style()),
                    Span::styled("   Deployed ", theme::key_hint()),
                    Span::styled(
                        stats.deployed_sites.to_string(),
                        Style::default().fg(theme::SUCCESS_GREEN),
                    ),
                    Span::styled("   Avg SEO ", theme::key_hint()),
                    Span::styled(stats.average_seo_score.to_string(), theme::score_style()),
                ];
                if !stats.recent_sites.is_empty() {
                    spans.push(Span::styled("   Latest", theme::key_hint()));
                }
                for recent in stats.recent_sites.iter().take(RECENT_SHOWN) {
                    spans.push(Span::raw(" "));
                    spans.push(badge_span(&recent.status));
                    spans.push(Span::styled(
                        format!(" {}", recent.domain),
                        theme::table_row(),
                    ));
                }
                Line::from(spans)
            }
            None => Line::from(Span::styled(" Overview unavailable", theme::key_hint())),
        };

        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let cols = Layout::horizontal([Constraint::Min(10), Constraint::Length(18)]).split(area);

        let block = Block::default()
            .title(" Keyword ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.border_for(Focus::Input));

        let keyword = self.state.keyword();
        let mut spans = Vec::with_capacity(2);
        if keyword.is_empty() && self.focus != Focus::Input {
            spans.push(Span::styled(
                " e.g. best coffee makers",
                theme::key_hint(),
            ));
        } else {
            spans.push(Span::styled(
                format!(" {keyword}"),
                Style::default().fg(theme::NEON_CYAN),
            ));
        }
        if self.focus == Focus::Input {
            spans.push(Span::styled("█", Style::default().fg(theme::NEON_CYAN)));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), cols[0]);

        self.render_trigger(frame, cols[1]);
    }

    fn render_trigger(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.state.is_submitting() {
            let throbber = Throbber::default()
                .label("Generating")
                .style(Style::default().fg(theme::NEON_CYAN))
                .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
            frame.render_stateful_widget(throbber, inner, &mut self.throbber_state.clone());
            return;
        }

        let style = if self.state.can_submit() {
            theme::button_active()
        } else {
            theme::button_disabled()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(" Generate ⏎ ", style)).alignment(Alignment::Center),
            inner,
        );
    }

    fn render_submit_error(&self, frame: &mut Frame, area: Rect) {
        if let Some(err) = self.state.submit_error() {
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" ✗ {err}"), theme::error_text())),
                area,
            );
        }
    }

    fn render_sites(&self, frame: &mut Frame, area: Rect) {
        let sites = self.state.sites();
        let block = Block::default()
            .title(format!(" Sites ({}) ", sites.len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.border_for(Focus::List));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let banner_height = u16::from(self.state.load_error().is_some());
        let rows = Layout::vertical([Constraint::Length(banner_height), Constraint::Min(1)])
            .split(inner);

        if let Some(err) = self.state.load_error() {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(format!(" ⚠ {err}"), theme::error_text()),
                    Span::styled("  Ctrl+R retry", theme::key_hint()),
                ])),
                rows[0],
            );
        }

        if sites.is_empty() {
            let message = if !self.state.loaded() {
                if self.state.load_error().is_some() {
                    return;
                }
                " Loading sites…"
            } else {
                " No sites yet. Enter a keyword to generate one."
            };
            frame.render_widget(
                Paragraph::new(Span::styled(message, theme::key_hint())),
                rows[1],
            );
            return;
        }

        let now = Utc::now();
        let table_rows: Vec<Row> = sites
            .iter()
            .map(|site| {
                Row::new(vec![
                    Cell::from(site.domain.clone()),
                    Cell::from(site.keyword.clone()),
                    Cell::from(Line::from(badge_span(&site.status))),
                    Cell::from(Span::styled(site.seo_score.to_string(), theme::score_style())),
                    Cell::from(
                        site.created_at
                            .map(|t| fmt_age(t, now))
                            .unwrap_or_default(),
                    ),
                ])
                .style(theme::table_row())
            })
            .collect();

        let header = Row::new(["Domain", "Keyword", "Status", "SEO", "Age"])
            .style(theme::table_header());

        let table = Table::new(
            table_rows,
            [
                Constraint::Percentage(32),
                Constraint::Percentage(32),
                Constraint::Length(14),
                Constraint::Length(6),
                Constraint::Length(7),
            ],
        )
        .header(header)
        .row_highlight_style(theme::table_selected());

        let mut table_state = TableState::default();
        if self.focus == Focus::List {
            table_state.select(self.state.selected_index());
        }
        frame.render_stateful_widget(table, rows[1], &mut table_state);
    }

    fn render_detail(frame: &mut Frame, area: Rect, detail: &SiteDetail) {
        let width = 70u16.min(area.width.saturating_sub(4));
        let height = 20u16.min(area.height.saturating_sub(2));
        let popup = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );

        frame.render_widget(Clear, popup);
        let block = Block::default()
            .title(format!(" {} ", detail.site.domain))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));

        let site = &detail.site;
        let now = Utc::now();
        let field = |label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(format!(" {label:<12}"), theme::key_hint()),
                Span::styled(value, Style::default().fg(theme::DIM_WHITE)),
            ])
        };
        let dash = || "—".to_owned();

        let mut lines = vec![
            Line::from(vec![
                Span::styled(format!(" {:<12}", "Status"), theme::key_hint()),
                badge_span(&site.status),
            ]),
            field("Keyword", site.keyword.clone()),
            field("SEO score", site.seo_score.to_string()),
            field("Title", site.title.clone().unwrap_or_else(dash)),
            field("URL", site.cloud_url.clone().unwrap_or_else(dash)),
            field("Provider", detail.cloud_provider.clone().unwrap_or_else(dash)),
            field(
                "Created",
                site.created_at
                    .map_or_else(dash, |t| fmt_timestamp(t, now)),
            ),
            field(
                "Updated",
                detail
                    .updated_at
                    .map_or_else(dash, |t| fmt_timestamp(t, now)),
            ),
        ];

        if let Some(meta) = &detail.meta_description {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(" {meta}"),
                Style::default()
                    .fg(theme::DIM_WHITE)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        if let Some(analytics) = detail.analytics.as_ref().and_then(|a| a.as_object()) {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(" Analytics", theme::title_style())));
            for (key, value) in analytics {
                let value = value
                    .as_str()
                    .map_or_else(|| value.to_string(), str::to_owned);
                lines.push(field_owned(key, value));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(" Esc close", theme::key_hint())));

        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

fn field_owned(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("   {label:<10}"), theme::key_hint()),
        Span::styled(value, Style::default().fg(theme::DIM_WHITE)),
    ])
}

impl Component for DashboardScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.detail.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.detail = None;
            }
            return Ok(None);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('r')) => return Ok(Some(Action::RefreshSites)),
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => self.state.clear_keyword(),
            (_, KeyCode::Tab | KeyCode::BackTab) => self.toggle_focus(),
            (_, KeyCode::Up) => {
                self.state.select_previous();
                self.focus = Focus::List;
            }
            (_, KeyCode::Down) => {
                self.state.select_next();
                self.focus = Focus::List;
            }
            (_, KeyCode::Enter) => {
                return Ok(match self.focus {
                    Focus::Input => self.state.begin_submit().map(Action::SubmitGeneration),
                    Focus::List => self
                        .state
                        .selected_site()
                        .map(|site| Action::InspectSite(site.id.clone())),
                });
            }
            (_, KeyCode::Backspace) => {
                self.state.pop_char();
                self.focus = Focus::Input;
            }
            (_, KeyCode::Esc) => self.focus = Focus::Input,
            (modifiers, KeyCode::Char(c))
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.state.push_char(c);
                self.focus = Focus::Input;
            }
            _ => {}
        }

        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                if self.state.is_submitting() {
                    self.throbber_state.calc_next();
                }
            }
            Action::RefreshSites => {
                return Ok(Some(Action::FetchSites(self.state.begin_load())));
            }
            Action::SitesLoaded { ticket, result } => {
                self.state.apply_load(*ticket, result.clone());
            }
            Action::StatsLoaded { ticket, stats } => {
                self.state.apply_stats(*ticket, stats.clone());
            }
            Action::GenerationFinished(result) => {
                let settled = result.as_ref().map(|_| ()).map_err(String::clone);
                if self.state.finish_submit(settled) {
                    return Ok(Some(Action::RefreshSites));
                }
            }
            Action::SiteDetailLoaded(Ok(detail)) => {
                self.detail = Some(detail.clone());
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(3), // Overview
            Constraint::Length(3), // Keyword + trigger
            Constraint::Length(1), // Submit error
            Constraint::Min(5),    // Sites
        ])
        .split(area);

        self.render_overview(frame, layout[0]);
        self.render_input(frame, layout[1]);
        self.render_submit_error(frame, layout[2]);
        self.render_sites(frame, layout[3]);

        if let Some(detail) = &self.detail {
            Self::render_detail(frame, area, detail);
        }
    }
}
