//! Sanitised table-body rendering.
//!
//! # Design
//! - Row markup is untrusted (names and URLs come from the API), so every row
//!   passes through [`sanitize_rows`] before reaching the store.
//! - Rows are wrapped in a synthetic `<table>` for sanitising because table
//!   rows only parse inside a table context.
//! - Rendering replaces the whole body; single-row edits exist only for
//!   delete and count updates.

use std::sync::LazyLock;

use ammonia::Builder;
use tracing::error;

use crate::core::error::{UiError, UiResult};
use crate::core::store::SharedStore;

/// Class carried by the empty-state placeholder row.
pub const EMPTY_ROW_CLASS: &str = "empty-state";

/// Render target for the table body of the active list view.
pub const TABLE_TARGET: &str = "table-rows";

static SANITIZER: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut builder = Builder::default();
    builder
        .add_tags(["button"])
        .add_generic_attributes(["class", "id"])
        .add_generic_attribute_prefixes(["data-"])
        .add_tag_attributes("a", ["target"])
        .add_tag_attributes("button", ["type"]);
    builder
});

/// Sanitise table-row markup inside a synthetic table container.
#[must_use]
pub fn sanitize_rows(markup: &str) -> String {
    let wrapped = format!("<table>{markup}</table>");
    let cleaned = SANITIZER.clean(&wrapped).to_string();
    let inner = cleaned
        .strip_prefix("<table>")
        .and_then(|rest| rest.strip_suffix("</table>"))
        .unwrap_or(&cleaned);
    inner
        .strip_prefix("<tbody>")
        .and_then(|rest| rest.strip_suffix("</tbody>"))
        .unwrap_or(inner)
        .trim()
        .to_string()
}

/// Placeholder row spanning `columns` columns.
#[must_use]
pub fn empty_row(columns: usize, label: &str) -> String {
    format!(r#"<tr class="{EMPTY_ROW_CLASS}"><td colspan="{columns}">{label}</td></tr>"#)
}

/// One rendered, sanitised row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedRow {
    /// Row element id (e.g. `file-row-F9`).
    pub key: String,
    /// Sanitised `<tr>` markup.
    pub markup: String,
}

/// Current table body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableBody {
    /// Nothing rendered yet.
    Unrendered,
    /// Empty-state placeholder markup.
    Placeholder(String),
    /// Rendered rows in display order.
    Rows(Vec<RenderedRow>),
}

/// Table slice of the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableState {
    /// Column count of the active list template; `None` outside list views.
    pub columns: Option<usize>,
    /// Rendered body.
    pub body: TableBody,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            columns: None,
            body: TableBody::Unrendered,
        }
    }
}

impl TableState {
    /// Attach to a freshly activated list template.
    pub fn activate(&mut self, columns: Option<usize>) {
        self.columns = columns;
        self.body = TableBody::Unrendered;
    }

    /// Number of data rows (the placeholder does not count).
    #[must_use]
    pub fn row_count(&self) -> usize {
        match &self.body {
            TableBody::Rows(rows) => rows.len(),
            _ => 0,
        }
    }

    /// Whether a row with `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        matches!(&self.body, TableBody::Rows(rows) if rows.iter().any(|row| row.key == key))
    }

    /// Concatenated body markup as inserted into the document.
    #[must_use]
    pub fn markup(&self) -> String {
        match &self.body {
            TableBody::Unrendered => String::new(),
            TableBody::Placeholder(markup) => markup.clone(),
            TableBody::Rows(rows) => rows.iter().map(|row| row.markup.as_str()).collect(),
        }
    }

    /// Remove the row with `key`; returns whether one was removed.
    pub fn remove_row(&mut self, key: &str) -> bool {
        let TableBody::Rows(rows) = &mut self.body else {
            return false;
        };
        let before = rows.len();
        rows.retain(|row| row.key != key);
        rows.len() != before
    }

    /// Replace the markup of the row with `key`, sanitising it first.
    pub fn replace_row(&mut self, key: &str, markup: &str) -> bool {
        let TableBody::Rows(rows) = &mut self.body else {
            return false;
        };
        rows.iter_mut().find(|row| row.key == key).is_some_and(|row| {
            row.markup = sanitize_rows(markup);
            true
        })
    }
}

/// Paints the active table body from records and a row template.
#[derive(Clone)]
pub struct TableRenderer {
    store: SharedStore,
    empty_label: String,
}

impl TableRenderer {
    /// Bind to the store with the localised empty-state label.
    #[must_use]
    pub fn new(store: SharedStore, empty_label: impl Into<String>) -> Self {
        Self {
            store,
            empty_label: empty_label.into(),
        }
    }

    /// Replace the table body with one sanitised row per item.
    ///
    /// `row` yields the row key and its raw markup.
    ///
    /// # Errors
    /// Returns [`UiError::RenderTargetMissing`] when no list view is active.
    pub fn render<T, F>(&self, items: &[T], row: F) -> UiResult<()>
    where
        F: Fn(&T) -> (String, String),
    {
        let body = if items.is_empty() {
            None
        } else {
            Some(
                items
                    .iter()
                    .map(|item| {
                        let (key, markup) = row(item);
                        RenderedRow {
                            key,
                            markup: sanitize_rows(&markup),
                        }
                    })
                    .collect::<Vec<_>>(),
            )
        };
        let empty_label = self.empty_label.as_str();
        self.store.reduce_mut(|store| {
            let Some(columns) = store.table.columns else {
                return Err(UiError::RenderTargetMissing {
                    target: TABLE_TARGET,
                });
            };
            store.table.body = body.map_or_else(
                || TableBody::Placeholder(empty_row(columns, empty_label)),
                TableBody::Rows,
            );
            Ok(())
        })
        .inspect_err(|err| error!(error = %err, "table render target missing"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizer_strips_scripts_and_handlers() {
        let dirty = r#"<tr id="file-row-1"><td onclick="steal()">a<script>alert(1)</script></td><td><a href="javascript:alert(1)">x</a></td></tr>"#;
        let clean = sanitize_rows(dirty);
        assert!(clean.starts_with(r#"<tr id="file-row-1">"#));
        assert!(!clean.contains("script"));
        assert!(!clean.contains("onclick"));
        assert!(!clean.contains("javascript:"));
    }

    #[test]
    fn sanitizer_keeps_row_hooks() {
        let row = r#"<tr id="file-row-F9"><td><button type="button" class="delete-file" data-action="delete" data-id="F9">Delete</button></td><td><a href="https://x/f" target="_blank">f</a></td></tr>"#;
        let clean = sanitize_rows(row);
        assert!(clean.contains(r#"data-action="delete""#));
        assert!(clean.contains(r#"data-id="F9""#));
        assert!(clean.contains(r#"class="delete-file""#));
        assert!(clean.contains(r#"target="_blank""#));
        assert!(clean.contains(r#"href="https://x/f""#));
    }

    #[test]
    fn render_requires_active_target() {
        let store = SharedStore::default();
        let renderer = TableRenderer::new(store, "No results");
        let err = renderer.render(&[1_u8], |n| (n.to_string(), String::new())).unwrap_err();
        assert_eq!(
            err,
            UiError::RenderTargetMissing {
                target: TABLE_TARGET
            }
        );
    }

    #[test]
    fn empty_state_is_idempotent() {
        let store = SharedStore::default();
        store.reduce_mut(|s| s.table.activate(Some(3)));
        let renderer = TableRenderer::new(store.clone(), "No results");
        let template = |n: &u8| (format!("row-{n}"), format!(r#"<tr id="row-{n}"><td>{n}</td></tr>"#));

        renderer.render(&[], template).unwrap();
        let placeholder = store.read(|s| s.table.markup());
        assert_eq!(placeholder, r#"<tr class="empty-state"><td colspan="3">No results</td></tr>"#);

        renderer.render(&[1, 2], template).unwrap();
        assert_eq!(store.read(|s| s.table.row_count()), 2);

        renderer.render(&[], template).unwrap();
        assert_eq!(store.read(|s| s.table.markup()), placeholder);
    }

    #[test]
    fn rows_can_be_removed_and_replaced() {
        let mut table = TableState::default();
        table.activate(Some(1));
        table.body = TableBody::Rows(vec![
            RenderedRow {
                key: "a".into(),
                markup: "<tr><td>a</td></tr>".into(),
            },
            RenderedRow {
                key: "b".into(),
                markup: "<tr><td>b</td></tr>".into(),
            },
        ]);
        assert!(table.replace_row("b", "<tr><td>B</td></tr>"));
        assert!(table.markup().ends_with("<tr><td>B</td></tr>"));
        assert!(table.remove_row("a"));
        assert!(!table.remove_row("a"));
        assert_eq!(table.row_count(), 1);
    }
}
