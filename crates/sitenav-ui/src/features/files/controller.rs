//! Files controller: resolve the drive, list files, search, sort, delete.

use std::rc::Rc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::core::breadcrumb::{DriveName, SITES_HREF, TabId, drive_href, site_href};
use crate::core::error::{UiError, UiResult};
use crate::core::route::NavigationTicket;
use crate::core::router::ListController;
use crate::core::store::NoticeKind;
use crate::features::context::{ControllerContext, discard_stale};
use crate::features::files::rows::file_row;
use crate::features::list::{Listing, SortColumn, SortDirection};

const VIEW: &str = "files";

/// Interactive yes/no confirmation.
pub trait Confirmer {
    /// Ask the user; `true` means proceed.
    fn confirm(&self, message: &str) -> bool;
}

/// Result of a delete request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined the confirmation.
    Cancelled,
    /// The file is gone and its row was removed.
    Deleted,
    /// The server refused; the row is untouched.
    Failed,
}

/// Controller for `/files/:driveId`.
#[derive(Clone)]
pub struct FilesController {
    ctx: ControllerContext,
    confirmer: Rc<dyn Confirmer>,
}

#[async_trait(?Send)]
impl ListController for FilesController {
    async fn init(&self, ticket: NavigationTicket, parent_id: Option<&str>) {
        let Some(drive_id) = parent_id else {
            self.ctx.fail(
                ticket,
                VIEW,
                &UiError::RenderTargetMissing { target: "drive id" },
            );
            return;
        };
        if let Err(err) = self.load(ticket, drive_id).await {
            self.ctx.fail(ticket, VIEW, &err);
        }
    }
}

impl FilesController {
    /// Build the controller.
    #[must_use]
    pub fn new(ctx: ControllerContext, confirmer: Rc<dyn Confirmer>) -> Self {
        Self { ctx, confirmer }
    }

    async fn load(&self, ticket: NavigationTicket, drive_id: &str) -> UiResult<()> {
        let _busy = self.ctx.store.busy();
        let drive = self.ctx.api.drive(drive_id).await?;
        if !self.ctx.store.is_current(ticket) {
            discard_stale(ticket, VIEW);
            return Ok(());
        }
        let drive_label = non_empty(&drive.name)
            .unwrap_or_else(|| self.ctx.text("tabs.unknown_drive", "Unknown Drive"));
        let cached_site = drive
            .site_id
            .as_deref()
            .and_then(|id| self.ctx.store.read(|store| store.names.site_name(id).map(ToString::to_string)));
        let site_label = drive
            .site_name
            .as_deref()
            .and_then(non_empty)
            .or(cached_site)
            .unwrap_or_else(|| self.ctx.text("tabs.unknown_site", "Unknown Site"));
        self.ctx.store.reduce_mut(|store| {
            store.names.remember_drive(
                drive_id,
                DriveName {
                    name: drive_label.clone(),
                    site_id: drive.site_id.clone(),
                    site_name: drive.site_name.clone(),
                },
            );
        });
        self.ctx
            .tabs
            .resolve(ticket, TabId::Drive, drive_label, drive_href(drive_id));
        self.ctx.tabs.resolve(
            ticket,
            TabId::Site,
            site_label,
            drive
                .site_id
                .as_deref()
                .map_or_else(|| SITES_HREF.to_string(), site_href),
        );

        let files = self.ctx.api.files(drive_id).await?;
        let loaded = files.len();
        if self
            .ctx
            .store
            .reduce_if_current(ticket, |store| store.files.set_items(files))
            .is_none()
        {
            discard_stale(ticket, VIEW);
            return Ok(());
        }
        info!(drive_id, count = loaded, "files loaded");
        self.render()
    }

    fn render(&self) -> UiResult<()> {
        let displayed = self.ctx.store.read(|store| store.files.displayed.clone());
        let bundle = &self.ctx.bundle;
        self.ctx
            .table
            .render(&displayed, |file| (file.row_key(), file_row(file, bundle)))
    }

    /// Filter the displayed files by name or URL.
    ///
    /// # Errors
    /// Returns a render error when the files view is not active.
    pub fn search(&self, term: &str) -> UiResult<()> {
        self.ctx
            .store
            .reduce_mut(|store| store.files.apply_search(term));
        self.render()
    }

    /// Toggle the size sort over the displayed files.
    ///
    /// # Errors
    /// Returns a render error when the files view is not active.
    pub fn sort_by_size(&self) -> UiResult<SortDirection> {
        self.sort_by(SortColumn::Size)
    }

    /// Toggle the last-modified sort over the displayed files.
    ///
    /// # Errors
    /// Returns a render error when the files view is not active.
    pub fn sort_by_date(&self) -> UiResult<SortDirection> {
        self.sort_by(SortColumn::Date)
    }

    /// Toggle `column` and re-render.
    ///
    /// # Errors
    /// Returns a render error when the files view is not active.
    pub fn sort_by(&self, column: SortColumn) -> UiResult<SortDirection> {
        let direction = self
            .ctx
            .store
            .reduce_mut(|store| store.files.toggle_sort(column));
        self.render()?;
        Ok(direction)
    }

    /// Delete one file after confirmation, removing only its row on success.
    pub async fn delete_file(&self, file_id: &str) -> DeleteOutcome {
        let ticket = self.ctx.store.current_ticket();
        let Some(drive_id) = self
            .ctx
            .store
            .read(|store| store.route.current.drive_id().map(ToString::to_string))
        else {
            self.ctx.fail(
                ticket,
                VIEW,
                &UiError::RenderTargetMissing { target: "drive id" },
            );
            return DeleteOutcome::Failed;
        };
        let prompt = self
            .ctx
            .text("files.confirm_delete", "Are you sure you want to delete this file?");
        if !self.confirmer.confirm(&prompt) {
            return DeleteOutcome::Cancelled;
        }

        let result = {
            let _busy = self.ctx.store.busy();
            self.ctx.api.delete_file(&drive_id, file_id).await
        };
        match result {
            Ok(()) => {
                let notice = self.ctx.text("files.deleted", "File deleted successfully.");
                let key = format!("file-row-{file_id}");
                let applied = self.ctx.store.reduce_if_current(ticket, |store| {
                    store.files.remove(file_id);
                    store.table.remove_row(&key);
                    store.page.push_notice(NoticeKind::Success, notice);
                });
                if applied.is_none() {
                    discard_stale(ticket, VIEW);
                }
                info!(drive_id, file_id, "file deleted");
                DeleteOutcome::Deleted
            }
            Err(err) => {
                warn!(drive_id, file_id, error = ?err, "file delete failed");
                self.ctx.fail(ticket, VIEW, &err);
                DeleteOutcome::Failed
            }
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
