//! Pre-resolved view templates swapped into the content region.
//!
//! # Design
//! - Templates are plain descriptors resolved once at startup; activating
//!   one guarantees the table target and controls exist before a controller
//!   attaches handlers, so nothing has to wait for markup to appear.

use std::fmt::Write;

use crate::core::route::Route;
use crate::features::list::{SortColumn, SortState};
use crate::i18n::TranslationBundle;

/// Action name carried by sortable headers.
pub const SORT_ACTION: &str = "sort";

/// List views backed by a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    /// Sites table.
    Sites,
    /// Drives table.
    Drives,
    /// Files table.
    Files,
}

/// One table column header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Translation key for the header label.
    pub label_key: &'static str,
    /// Sort handler attached to the header, when sortable.
    pub sort: Option<SortColumn>,
}

impl ColumnSpec {
    const fn plain(label_key: &'static str) -> Self {
        Self {
            label_key,
            sort: None,
        }
    }

    const fn sortable(label_key: &'static str, column: SortColumn) -> Self {
        Self {
            label_key,
            sort: Some(column),
        }
    }
}

/// Descriptor of a list view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewTemplate {
    /// Which list this is.
    pub kind: ViewKind,
    /// Translation key for the heading.
    pub title_key: &'static str,
    /// Column headers in order.
    pub columns: Vec<ColumnSpec>,
}

impl ViewTemplate {
    /// Number of table columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Full `<table>` markup for a list view around an already sanitised body.
///
/// Sortable headers carry `data-action="sort"` so one delegated listener on
/// the container handles header and row clicks alike.
#[must_use]
pub fn table_markup(
    template: &ViewTemplate,
    bundle: &TranslationBundle,
    sort: &SortState,
    body: &str,
) -> String {
    let mut html = String::from(r#"<table class="table striped"><thead><tr>"#);
    for column in &template.columns {
        let label = bundle.text(column.label_key, column.label_key);
        match column.sort {
            Some(sort_column) => {
                let _ = write!(
                    html,
                    r#"<th id="{id}" class="sortable" data-action="{SORT_ACTION}" data-id="{name}">{label} <span id="{name}-sort-indicator">{indicator}</span></th>"#,
                    id = sort_column.header_id(),
                    name = sort_column.name(),
                    indicator = sort.indicator(sort_column),
                );
            }
            None => {
                let _ = write!(html, "<th>{label}</th>");
            }
        }
    }
    let _ = write!(html, r#"</tr></thead><tbody id="table-rows">{body}</tbody></table>"#);
    html
}

/// What the content region currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ContentView {
    /// Before the first navigation.
    #[default]
    Blank,
    /// Landing page.
    Home,
    /// Static informational page.
    NoNavigo,
    /// A table-backed list view.
    List(ViewTemplate),
    /// Terminal not-found message.
    NotFound {
        /// Path that failed to match.
        path: String,
    },
    /// Prompt shown when the session is absent or rejected.
    LoggedOut,
}

impl ContentView {
    /// Column count when this is a list view.
    #[must_use]
    pub fn table_columns(&self) -> Option<usize> {
        match self {
            Self::List(template) => Some(template.column_count()),
            _ => None,
        }
    }
}

/// All templates, loaded before the router is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateSet {
    sites: ViewTemplate,
    drives: ViewTemplate,
    files: ViewTemplate,
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl TemplateSet {
    /// Built-in templates for the three list views.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            sites: ViewTemplate {
                kind: ViewKind::Sites,
                title_key: "sites.title",
                columns: vec![
                    ColumnSpec::plain("sites.column.name"),
                    ColumnSpec::plain("sites.column.url"),
                    ColumnSpec::plain("sites.column.file_count"),
                ],
            },
            drives: ViewTemplate {
                kind: ViewKind::Drives,
                title_key: "drives.title",
                columns: vec![
                    ColumnSpec::plain("drives.column.name"),
                    ColumnSpec::plain("drives.column.url"),
                    ColumnSpec::plain("drives.column.modified"),
                    ColumnSpec::plain("drives.column.file_count"),
                ],
            },
            files: ViewTemplate {
                kind: ViewKind::Files,
                title_key: "files.title",
                columns: vec![
                    ColumnSpec::plain("files.column.name"),
                    ColumnSpec::plain("files.column.url"),
                    ColumnSpec::sortable("files.column.size", SortColumn::Size),
                    ColumnSpec::sortable("files.column.modified", SortColumn::Date),
                    ColumnSpec::plain("files.column.modified_by"),
                    ColumnSpec::plain("files.column.actions"),
                ],
            },
        }
    }

    /// Content view activated for `route`.
    #[must_use]
    pub fn view_for(&self, route: &Route) -> ContentView {
        match route {
            Route::Home => ContentView::Home,
            Route::NoNavigo => ContentView::NoNavigo,
            Route::Sites => ContentView::List(self.sites.clone()),
            Route::Drives { .. } => ContentView::List(self.drives.clone()),
            Route::Files { .. } => ContentView::List(self.files.clone()),
            Route::NotFound { path } => ContentView::NotFound { path: path.clone() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_routes_activate_tables() {
        let templates = TemplateSet::standard();
        assert_eq!(templates.view_for(&Route::Sites).table_columns(), Some(3));
        let files = templates.view_for(&Route::Files {
            drive_id: "D1".into(),
        });
        assert_eq!(files.table_columns(), Some(6));
        assert_eq!(templates.view_for(&Route::Home).table_columns(), None);
    }

    #[test]
    fn table_markup_marks_sortable_headers() {
        let templates = TemplateSet::standard();
        let ContentView::List(files) = templates.view_for(&Route::Files {
            drive_id: "D1".into(),
        }) else {
            panic!("files route must activate a list view");
        };
        let mut sort = SortState::default();
        sort.toggle(SortColumn::Date);
        let html = table_markup(&files, &TranslationBundle::default(), &sort, "<tr><td>x</td></tr>");
        assert!(html.contains(r#"<th id="size-header" class="sortable" data-action="sort" data-id="size">Size <span id="size-sort-indicator"></span></th>"#));
        assert!(html.contains(r#"<span id="date-sort-indicator">▲</span>"#));
        assert!(html.contains("<th>Name</th>"));
        assert!(html.ends_with(r#"<tbody id="table-rows"><tr><td>x</td></tr></tbody></table>"#));
    }

    #[test]
    fn only_files_expose_sortable_headers() {
        let templates = TemplateSet::standard();
        let ContentView::List(files) = templates.view_for(&Route::Files {
            drive_id: "D1".into(),
        }) else {
            panic!("files route must activate a list view");
        };
        let sortable: Vec<_> = files.columns.iter().filter_map(|c| c.sort).collect();
        assert_eq!(sortable, vec![SortColumn::Size, SortColumn::Date]);
    }
}
