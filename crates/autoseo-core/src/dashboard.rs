// ── Dashboard view state ──
//
// Pure state machine behind the dashboard screen. It performs no I/O:
// callers ask it for the next request to make (`begin_submit`,
// `begin_load`) and feed responses back (`finish_submit`, `apply_load`).
//
// Submission lifecycle: Idle -> Submitting -> Idle (optionally with an
// inline error). Loads are independent of submissions and are ordered by
// ticket so a slow, superseded response never overwrites newer data.

use crate::config::GenerationOptions;
use crate::model::{DashboardStats, Site};
use crate::service::GenerationRequest;

/// Where the submission trigger is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
}

/// Monotonic identifier for one list load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    sites: Vec<Site>,
    loaded: bool,
    load_error: Option<String>,

    keyword: String,
    /// Input buffer as it was when the in-flight request was sent.
    submitted: String,
    phase: SubmitPhase,
    submit_error: Option<String>,
    options: GenerationOptions,

    selected: usize,
    issued: u64,
    applied: u64,
    stats_applied: u64,

    stats: Option<DashboardStats>,
}

impl DashboardState {
    pub fn new(options: GenerationOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    // ── Keyword input ───────────────────────────────────────────────

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn push_char(&mut self, c: char) {
        self.keyword.push(c);
    }

    pub fn pop_char(&mut self) {
        self.keyword.pop();
    }

    pub fn clear_keyword(&mut self) {
        self.keyword.clear();
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    // ── Submission ──────────────────────────────────────────────────

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    /// Whether the trigger is enabled right now.
    pub fn can_submit(&self) -> bool {
        self.phase == SubmitPhase::Idle && !self.keyword.trim().is_empty()
    }

    /// Start a submission.
    ///
    /// Returns the request to send, or `None` (and leaves state untouched)
    /// when a submission is already in flight or the keyword is blank.
    pub fn begin_submit(&mut self) -> Option<GenerationRequest> {
        if self.phase != SubmitPhase::Idle {
            return None;
        }
        let request = GenerationRequest::new(&self.keyword, self.options.clone())?;
        self.submitted.clone_from(&self.keyword);
        self.phase = SubmitPhase::Submitting;
        self.submit_error = None;
        Some(request)
    }

    /// Settle the in-flight submission.
    ///
    /// Returns `true` when the list should be refreshed. A result that
    /// arrives while idle is ignored.
    pub fn finish_submit(&mut self, result: Result<(), String>) -> bool {
        if self.phase != SubmitPhase::Submitting {
            return false;
        }
        self.phase = SubmitPhase::Idle;
        match result {
            Ok(()) => {
                // Text edited while the request was in flight is kept.
                if self.keyword == self.submitted {
                    self.keyword.clear();
                }
                self.submit_error = None;
                true
            }
            Err(message) => {
                self.submit_error = Some(message);
                false
            }
        }
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Reserve a ticket for a new list load.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// Apply a load result. Returns `false` if it was superseded and dropped.
    ///
    /// On failure the previous list is kept and the error is recorded.
    pub fn apply_load(&mut self, ticket: LoadTicket, result: Result<Vec<Site>, String>) -> bool {
        if ticket.0 <= self.applied {
            return false;
        }
        self.applied = ticket.0;
        match result {
            Ok(sites) => {
                self.sites = sites;
                self.loaded = true;
                self.load_error = None;
                self.clamp_selection();
            }
            Err(message) => self.load_error = Some(message),
        }
        true
    }

    /// A load has been issued and not yet applied.
    pub fn is_loading(&self) -> bool {
        self.issued > self.applied
    }

    /// `true` once any load has succeeded.
    pub fn loaded(&self) -> bool {
        self.loaded
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    // ── Selection ───────────────────────────────────────────────────

    pub fn selected_index(&self) -> Option<usize> {
        (!self.sites.is_empty()).then_some(self.selected)
    }

    pub fn selected_site(&self) -> Option<&Site> {
        self.sites.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.sites.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.sites.len().saturating_sub(1));
    }

    // ── Overview ────────────────────────────────────────────────────

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    /// Apply the overview fetched alongside load `ticket`. `None` means the
    /// fetch failed and blanks the panel. Returns `false` if superseded.
    ///
    /// Independent of [`apply_load`](Self::apply_load): either may land first.
    pub fn apply_stats(&mut self, ticket: LoadTicket, stats: Option<DashboardStats>) -> bool {
        if ticket.0 <= self.stats_applied {
            return false;
        }
        self.stats_applied = ticket.0;
        self.stats = stats;
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{SeoScore, SiteId, SiteStatus};
    use pretty_assertions::assert_eq;

    fn site(id: i64, domain: &str, status: SiteStatus) -> Site {
        Site {
            id: SiteId::Numeric(id),
            domain: domain.into(),
            keyword: domain.trim_end_matches(".com").into(),
            status,
            seo_score: SeoScore(0.0),
            title: None,
            cloud_url: None,
            created_at: None,
        }
    }

    fn typed(keyword: &str) -> DashboardState {
        let mut state = DashboardState::new(GenerationOptions::default());
        keyword.chars().for_each(|c| state.push_char(c));
        state
    }

    #[test]
    fn blank_keyword_does_not_submit() {
        for keyword in ["", "   ", "\t \t"] {
            let mut state = typed(keyword);
            assert!(!state.can_submit());
            assert_eq!(state.begin_submit(), None);
            assert_eq!(state.phase(), SubmitPhase::Idle);
        }
    }

    #[test]
    fn submit_sends_trimmed_keyword_with_defaults() {
        let mut state = typed("  best coffee makers ");
        let req = state.begin_submit().unwrap();
        assert_eq!(req.keyword(), "best coffee makers");
        assert_eq!(req.options(), &GenerationOptions::default());
        assert!(state.is_submitting());
    }

    #[test]
    fn trigger_is_disabled_while_in_flight() {
        let mut state = typed("coffee");
        assert!(state.begin_submit().is_some());
        assert!(!state.can_submit());
        assert_eq!(state.begin_submit(), None);
    }

    #[test]
    fn success_clears_input_and_requests_refresh() {
        let mut state = typed("coffee");
        state.begin_submit();
        assert!(state.finish_submit(Ok(())));
        assert_eq!(state.keyword(), "");
        assert_eq!(state.phase(), SubmitPhase::Idle);
        assert_eq!(state.submit_error(), None);
    }

    #[test]
    fn success_keeps_text_typed_during_flight() {
        let mut state = typed("coffee");
        state.begin_submit();
        " grinders".chars().for_each(|c| state.push_char(c));

        assert!(state.finish_submit(Ok(())));
        assert_eq!(state.keyword(), "coffee grinders");
        assert!(state.can_submit());
    }

    #[test]
    fn failure_keeps_input_and_shows_error() {
        let mut state = typed("coffee");
        state.begin_submit();
        assert!(!state.finish_submit(Err("boom (HTTP 500)".into())));
        assert_eq!(state.keyword(), "coffee");
        assert_eq!(state.submit_error(), Some("boom (HTTP 500)"));
        assert!(state.can_submit());

        // The next attempt clears the stale error.
        state.begin_submit();
        assert_eq!(state.submit_error(), None);
    }

    #[test]
    fn stray_settlement_while_idle_is_ignored() {
        let mut state = typed("coffee");
        assert!(!state.finish_submit(Ok(())));
        assert_eq!(state.keyword(), "coffee");
    }

    #[test]
    fn load_failure_keeps_previous_list() {
        let mut state = DashboardState::default();
        let t1 = state.begin_load();
        state.apply_load(t1, Ok(vec![site(1, "x.com", SiteStatus::Deployed)]));

        let t2 = state.begin_load();
        state.apply_load(t2, Err("Site service unreachable".into()));

        assert_eq!(state.sites().len(), 1);
        assert_eq!(state.sites()[0].domain, "x.com");
        assert_eq!(state.load_error(), Some("Site service unreachable"));
        assert!(state.loaded());
    }

    #[test]
    fn superseded_loads_are_dropped() {
        let mut state = DashboardState::default();
        let old = state.begin_load();
        let new = state.begin_load();
        assert!(state.is_loading());

        assert!(state.apply_load(new, Ok(vec![site(2, "new.com", SiteStatus::Pending)])));
        assert!(!state.apply_load(old, Ok(vec![site(1, "old.com", SiteStatus::Pending)])));

        assert_eq!(state.sites()[0].domain, "new.com");
        assert!(!state.is_loading());
    }

    #[test]
    fn list_keeps_service_order() {
        let mut state = DashboardState::default();
        let t = state.begin_load();
        state.apply_load(
            t,
            Ok(vec![
                site(9, "z.com", SiteStatus::Pending),
                site(1, "a.com", SiteStatus::Deployed),
            ]),
        );
        let domains: Vec<&str> = state.sites().iter().map(|s| s.domain.as_str()).collect();
        assert_eq!(domains, vec!["z.com", "a.com"]);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut state = DashboardState::default();
        assert_eq!(state.selected_index(), None);

        let t = state.begin_load();
        state.apply_load(
            t,
            Ok(vec![
                site(1, "a.com", SiteStatus::Pending),
                site(2, "b.com", SiteStatus::Pending),
            ]),
        );
        state.select_next();
        state.select_next();
        assert_eq!(state.selected_index(), Some(1));

        let t = state.begin_load();
        state.apply_load(t, Ok(vec![site(1, "a.com", SiteStatus::Pending)]));
        assert_eq!(state.selected_site().map(|s| s.domain.as_str()), Some("a.com"));

        state.select_previous();
        assert_eq!(state.selected_index(), Some(0));
    }

    #[test]
    fn stats_are_ordered_independently_of_the_list() {
        let mut state = DashboardState::new(GenerationOptions::default());
        let first = state.begin_load();
        let second = state.begin_load();
        let stats = |total| DashboardStats {
            total_sites: total,
            ..DashboardStats::default()
        };

        // Stats for the newer load arrive before any list.
        assert!(state.apply_stats(second, Some(stats(2))));
        assert!(!state.apply_stats(first, Some(stats(1))));
        assert_eq!(state.stats().map(|s| s.total_sites), Some(2));
        assert!(state.is_loading());

        assert!(state.apply_load(second, Ok(vec![site(1, "x.com", SiteStatus::Deployed)])));
        assert_eq!(state.sites().len(), 1);

        let third = state.begin_load();
        assert!(state.apply_stats(third, None));
        assert!(state.stats().is_none());
        assert_eq!(state.sites().len(), 1);
    }
}
