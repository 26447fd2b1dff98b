//! Sites controller: fetch, render, search and per-site file totals.

use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::{info, warn};

use crate::core::error::UiResult;
use crate::core::route::NavigationTicket;
use crate::core::router::ListController;
use crate::features::context::{ControllerContext, discard_stale};
use crate::features::list::{CountCell, Listing};
use crate::features::sites::rows::site_row;

const VIEW: &str = "sites";

/// Controller for `/sites`.
#[derive(Clone)]
pub struct SitesController {
    ctx: ControllerContext,
}

#[async_trait(?Send)]
impl ListController for SitesController {
    async fn init(&self, ticket: NavigationTicket, _parent_id: Option<&str>) {
        if let Err(err) = self.load(ticket).await {
            self.ctx.fail(ticket, VIEW, &err);
        }
    }
}

impl SitesController {
    /// Build the controller.
    #[must_use]
    pub const fn new(ctx: ControllerContext) -> Self {
        Self { ctx }
    }

    async fn load(&self, ticket: NavigationTicket) -> UiResult<()> {
        let _busy = self.ctx.store.busy();
        let sites = self.ctx.api.sites().await?;
        let loaded = sites.len();
        let applied = self.ctx.store.reduce_if_current(ticket, |store| {
            for site in &sites {
                store.names.remember_site(&site.id, &site.display_name);
            }
            store.sites.set_items(sites);
        });
        if applied.is_none() {
            discard_stale(ticket, VIEW);
            return Ok(());
        }
        info!(count = loaded, "sites loaded");
        self.render()
    }

    fn render(&self) -> UiResult<()> {
        let (displayed, counts) = self
            .ctx
            .store
            .read(|store| (store.sites.displayed.clone(), store.sites.counts.clone()));
        let bundle = &self.ctx.bundle;
        self.ctx.table.render(&displayed, |site| {
            let count = counts.get(&site.id).copied().unwrap_or_default();
            (site.row_key(), site_row(site, count, bundle))
        })
    }

    /// Filter the displayed sites by name or URL.
    ///
    /// # Errors
    /// Returns a render error when the sites view is not active.
    pub fn search(&self, term: &str) -> UiResult<()> {
        self.ctx
            .store
            .reduce_mut(|store| store.sites.apply_search(term));
        self.render()
    }

    /// Sum the files of every drive of a site and show the total in its row.
    ///
    /// Drives are fetched first, then every drive's files concurrently. On
    /// failure the trigger reappears so the user can retry.
    pub async fn count_site_files(&self, site_id: &str) {
        let ticket = self.ctx.store.current_ticket();
        let site_name = self.ctx.store.read(|store| {
            store
                .sites
                .find(site_id)
                .map(|site| site.display_name.clone())
        });
        self.set_count(ticket, site_id, CountCell::Loading);
        match self.total_files(site_id, site_name.as_deref()).await {
            Ok(total) => {
                info!(site_id, total, "site file total computed");
                self.set_count(ticket, site_id, CountCell::Ready(total));
            }
            Err(err) => {
                warn!(site_id, error = ?err, "site file total failed");
                self.set_count(ticket, site_id, CountCell::Failed);
            }
        }
    }

    async fn total_files(&self, site_id: &str, site_name: Option<&str>) -> UiResult<usize> {
        let drives = self.ctx.api.drives(site_id, site_name).await?;
        let counts = try_join_all(
            drives
                .iter()
                .map(|drive| self.ctx.api.file_count(&drive.id)),
        )
        .await?;
        Ok(counts.into_iter().sum())
    }

    fn set_count(&self, ticket: NavigationTicket, site_id: &str, cell: CountCell) {
        let bundle = &self.ctx.bundle;
        let applied = self.ctx.store.reduce_if_current(ticket, |store| {
            store.sites.counts.insert(site_id.to_string(), cell);
            if let Some(site) = store.sites.find(site_id).cloned() {
                store
                    .table
                    .replace_row(&site.row_key(), &site_row(&site, cell, bundle));
            }
        });
        if applied.is_none() {
            discard_stale(ticket, VIEW);
        }
    }
}
