//! Row template for the files table.

use sitenav_api_models::DriveFile;

use crate::core::logic::{escape_html, format_date, format_size_mb, modifier_label, truncate_url};
use crate::i18n::TranslationBundle;

/// Action name carried by the delete trigger.
pub const DELETE_ACTION: &str = "delete";

/// Raw `<tr>` markup for a file.
#[must_use]
pub fn file_row(file: &DriveFile, bundle: &TranslationBundle) -> String {
    format!(
        r#"<tr id="file-row-{id}"><td>{name}</td><td><a href="{url}" target="_blank">{shown}</a></td><td>{size}</td><td>{modified}</td><td>{by}</td><td><button type="button" class="delete-button" data-action="{DELETE_ACTION}" data-id="{id}">{delete}</button></td></tr>"#,
        id = escape_html(&file.id),
        name = escape_html(&file.name),
        url = escape_html(&file.web_url),
        shown = escape_html(&truncate_url(&file.web_url)),
        size = format_size_mb(file.size),
        modified = format_date(file.last_modified_date_time.as_deref()),
        by = escape_html(&modifier_label(
            file.last_modified_by_display_name.as_deref(),
            &bundle.text("files.unknown_modifier", "Unknown"),
        )),
        delete = bundle.text("files.delete", "Delete"),
    )
}
