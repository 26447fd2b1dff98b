//! Drives controller: resolve the site, list its drives, fill file counts.

use async_trait::async_trait;
use futures::future::join_all;
use sitenav_api_models::Drive;
use tracing::{info, warn};

use crate::core::breadcrumb::{DriveName, TabId, site_href};
use crate::core::error::{UiError, UiResult};
use crate::core::route::NavigationTicket;
use crate::core::router::ListController;
use crate::features::context::{ControllerContext, discard_stale};
use crate::features::drives::rows::drive_row;
use crate::features::list::{CountCell, Listing};

const VIEW: &str = "drives";

/// Controller for `/drives/:siteId`.
#[derive(Clone)]
pub struct DrivesController {
    ctx: ControllerContext,
}

#[async_trait(?Send)]
impl ListController for DrivesController {
    async fn init(&self, ticket: NavigationTicket, parent_id: Option<&str>) {
        let Some(site_id) = parent_id else {
            self.ctx.fail(
                ticket,
                VIEW,
                &UiError::RenderTargetMissing { target: "site id" },
            );
            return;
        };
        match self.load(ticket, site_id).await {
            Ok(Some(drive_ids)) => self.fill_counts(ticket, drive_ids).await,
            Ok(None) => {}
            Err(err) => self.ctx.fail(ticket, VIEW, &err),
        }
    }
}

impl DrivesController {
    /// Build the controller.
    #[must_use]
    pub const fn new(ctx: ControllerContext) -> Self {
        Self { ctx }
    }

    /// Returns the rendered drive ids, or `None` when the view went stale.
    async fn load(&self, ticket: NavigationTicket, site_id: &str) -> UiResult<Option<Vec<String>>> {
        let _busy = self.ctx.store.busy();
        let site = self.ctx.api.site(site_id).await?;
        if !self.ctx.store.is_current(ticket) {
            discard_stale(ticket, VIEW);
            return Ok(None);
        }
        self.ctx
            .store
            .reduce_mut(|store| store.names.remember_site(site_id, &site.display_name));
        self.ctx.tabs.resolve(
            ticket,
            TabId::Site,
            site.display_name.clone(),
            site_href(site_id),
        );

        let drives = self
            .ctx
            .api
            .drives(site_id, Some(&site.display_name))
            .await?;
        let drive_ids: Vec<String> = drives.iter().map(|drive| drive.id.clone()).collect();
        let applied = self.ctx.store.reduce_if_current(ticket, |store| {
            for drive in &drives {
                store.names.remember_drive(&drive.id, drive_name(drive, site_id, &site.display_name));
                store
                    .drives
                    .counts
                    .insert(drive.id.clone(), CountCell::Loading);
            }
            store.drives.set_items(drives);
        });
        if applied.is_none() {
            discard_stale(ticket, VIEW);
            return Ok(None);
        }
        info!(site_id, count = drive_ids.len(), "drives loaded");
        self.render()?;
        Ok(Some(drive_ids))
    }

    fn render(&self) -> UiResult<()> {
        let (displayed, counts) = self
            .ctx
            .store
            .read(|store| (store.drives.displayed.clone(), store.drives.counts.clone()));
        let bundle = &self.ctx.bundle;
        self.ctx.table.render(&displayed, |drive| {
            let count = counts.get(&drive.id).copied().unwrap_or_default();
            (drive.row_key(), drive_row(drive, count, bundle))
        })
    }

    /// Filter the displayed drives by name or URL.
    ///
    /// # Errors
    /// Returns a render error when the drives view is not active.
    pub fn search(&self, term: &str) -> UiResult<()> {
        self.ctx
            .store
            .reduce_mut(|store| store.drives.apply_search(term));
        self.render()
    }

    async fn fill_counts(&self, ticket: NavigationTicket, drive_ids: Vec<String>) {
        join_all(drive_ids.iter().map(|drive_id| async move {
            let cell = match self.ctx.api.file_count(drive_id).await {
                Ok(total) => CountCell::Ready(total),
                Err(err) => {
                    warn!(drive_id = drive_id.as_str(), error = ?err, "drive file count failed");
                    CountCell::Failed
                }
            };
            self.set_count(ticket, drive_id, cell);
        }))
        .await;
    }

    fn set_count(&self, ticket: NavigationTicket, drive_id: &str, cell: CountCell) {
        let bundle = &self.ctx.bundle;
        let applied = self.ctx.store.reduce_if_current(ticket, |store| {
            store.drives.counts.insert(drive_id.to_string(), cell);
            if let Some(drive) = store.drives.find(drive_id).cloned() {
                store
                    .table
                    .replace_row(&drive.row_key(), &drive_row(&drive, cell, bundle));
            }
        });
        if applied.is_none() {
            discard_stale(ticket, VIEW);
        }
    }
}

fn drive_name(drive: &Drive, site_id: &str, site_name: &str) -> DriveName {
    DriveName {
        name: drive.name.clone(),
        site_id: Some(drive.site_id.clone().unwrap_or_else(|| site_id.to_string())),
        site_name: Some(
            drive
                .site_name
                .clone()
                .unwrap_or_else(|| site_name.to_string()),
        ),
    }
}
