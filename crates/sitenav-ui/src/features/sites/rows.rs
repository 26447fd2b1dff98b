//! Row template for the sites table.

use sitenav_api_models::Site;

use crate::core::breadcrumb::site_href;
use crate::core::logic::escape_html;
use crate::features::list::CountCell;
use crate::i18n::TranslationBundle;

/// Action name carried by the file-count trigger.
pub const COUNT_ACTION: &str = "count-files";

/// Raw `<tr>` markup for a site.
#[must_use]
pub fn site_row(site: &Site, count: CountCell, bundle: &TranslationBundle) -> String {
    let href = escape_html(&site_href(&site.id));
    format!(
        r#"<tr id="site-row-{id}"><td><a href="{href}" class="edit-button">{name}</a></td><td><a href="{href}" class="edit-button">{url}</a></td><td class="file-count">{cell}</td></tr>"#,
        id = escape_html(&site.id),
        name = escape_html(&site.display_name),
        url = escape_html(&site.web_url),
        cell = count_cell(&site.id, count, bundle),
    )
}

fn count_cell(site_id: &str, count: CountCell, bundle: &TranslationBundle) -> String {
    let trigger = format!(
        r#"<button type="button" class="total-file-count-button" data-action="{COUNT_ACTION}" data-id="{}">{}</button>"#,
        escape_html(site_id),
        bundle.text("sites.count_files", "Get total file count")
    );
    match count {
        CountCell::Idle => trigger,
        CountCell::Loading => format!(
            r#"<span class="loading-text">{}</span><span class="tinyspinner"></span>"#,
            bundle.text("table.loading", "Loading…")
        ),
        CountCell::Ready(total) => format!(r#"<span class="file-total">{total}</span>"#),
        CountCell::Failed => format!(
            r#"{trigger}<span class="file-total error">{}</span>"#,
            bundle.text("table.error", "Error")
        ),
    }
}
