//! Row template for the drives table.

use sitenav_api_models::Drive;

use crate::core::breadcrumb::drive_href;
use crate::core::logic::{escape_html, format_date};
use crate::features::list::CountCell;
use crate::i18n::TranslationBundle;

/// Raw `<tr>` markup for a drive.
#[must_use]
pub fn drive_row(drive: &Drive, count: CountCell, bundle: &TranslationBundle) -> String {
    let count = match count {
        CountCell::Idle => String::new(),
        CountCell::Loading => format!(
            r#"<span class="loading-text">{}</span>"#,
            bundle.text("table.loading", "Loading…")
        ),
        CountCell::Ready(total) => total.to_string(),
        CountCell::Failed => bundle.text("table.error", "Error"),
    };
    format!(
        r#"<tr id="drive-row-{id}"><td><a href="{href}">{name}</a></td><td><a href="{url}" target="_blank">{url}</a></td><td>{modified}</td><td class="file-count">{count}</td></tr>"#,
        id = escape_html(&drive.id),
        href = escape_html(&drive_href(&drive.id)),
        name = escape_html(&drive.name),
        url = escape_html(&drive.web_url),
        modified = format_date(drive.last_modified_date_time.as_deref()),
    )
}
