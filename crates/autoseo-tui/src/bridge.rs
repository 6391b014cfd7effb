//! Service bridge. Runs [`SiteService`] calls off the UI loop.
//!
//! Each function spawns one tokio task and reports the outcome back as an
//! [`Action`] through the TUI's action channel. The event loop never awaits
//! network I/O directly.

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use autoseo_core::{GenerationRequest, LoadTicket, SiteId, SiteService};

use crate::action::Action;

/// Load the site list for `ticket`.
pub fn fetch_sites<S>(service: S, tx: UnboundedSender<Action>, ticket: LoadTicket)
where
    S: SiteService + 'static,
{
    tokio::spawn(async move {
        let result = service.list_sites().await.map_err(|e| {
            warn!(error = %e, kind = ?e.kind(), "failed to load sites");
            e.user_message()
        });
        let _ = tx.send(Action::SitesLoaded { ticket, result });
    });
}

/// Load the overview stats for `ticket` on their own task, so a slow
/// analytics endpoint never holds back the list.
pub fn fetch_stats<S>(service: S, tx: UnboundedSender<Action>, ticket: LoadTicket)
where
    S: SiteService + 'static,
{
    tokio::spawn(async move {
        let stats = service
            .dashboard_stats()
            .await
            .inspect_err(|e| debug!(error = %e, "overview stats unavailable"))
            .ok();
        let _ = tx.send(Action::StatsLoaded { ticket, stats });
    });
}

/// Submit one generation request.
pub fn generate<S>(service: S, tx: UnboundedSender<Action>, request: GenerationRequest)
where
    S: SiteService + 'static,
{
    tokio::spawn(async move {
        let result = service.generate_site(&request).await;
        match &result {
            Ok(_) => info!(keyword = request.keyword(), "generation accepted"),
            Err(e) => warn!(keyword = request.keyword(), error = %e, "generation failed"),
        }
        let _ = tx.send(Action::GenerationFinished(
            result.map_err(|e| e.user_message()),
        ));
    });
}

/// Fetch the full record for one site.
pub fn inspect<S>(service: S, tx: UnboundedSender<Action>, id: SiteId)
where
    S: SiteService + 'static,
{
    tokio::spawn(async move {
        let result = service.get_site(&id).await.map_err(|e| {
            warn!(site = %id, error = %e, "failed to load site detail");
            e.user_message()
        });
        let _ = tx.send(Action::SiteDetailLoaded(result));
    });
}

/// Call the health endpoint. Any error counts as unhealthy.
pub fn check_health<S>(service: S, tx: UnboundedSender<Action>)
where
    S: SiteService + 'static,
{
    tokio::spawn(async move {
        let healthy = match service.health().await {
            Ok(healthy) => healthy,
            Err(e) => {
                debug!(error = %e, "health check failed");
                false
            }
        };
        let _ = tx.send(Action::HealthChecked(healthy));
    });
}
