//! Shared list-view state: full collection, displayed subset, search and sort.
//!
//! # Design
//! - The full collection is never touched by search; the displayed subset is
//!   recomputed from it on every keystroke.
//! - Sorting reorders the displayed subset only, with a stable sort so equal
//!   keys keep their filtered order.
//! - Per-column sort direction persists for the life of a view and resets on
//!   navigation via [`ListSlice::reset`].

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sitenav_api_models::{Drive, DriveFile, Site};

/// Entity shown as one table row.
pub trait Listing: Clone {
    /// Stable id.
    fn id(&self) -> &str;
    /// Element id of the rendered row.
    fn row_key(&self) -> String;
    /// Fields matched by the search box.
    fn search_fields(&self) -> [&str; 2];
}

impl Listing for Site {
    fn id(&self) -> &str {
        &self.id
    }

    fn row_key(&self) -> String {
        format!("site-row-{}", self.id)
    }

    fn search_fields(&self) -> [&str; 2] {
        [&self.display_name, &self.web_url]
    }
}

impl Listing for Drive {
    fn id(&self) -> &str {
        &self.id
    }

    fn row_key(&self) -> String {
        format!("drive-row-{}", self.id)
    }

    fn search_fields(&self) -> [&str; 2] {
        [&self.name, &self.web_url]
    }
}

impl Listing for DriveFile {
    fn id(&self) -> &str {
        &self.id
    }

    fn row_key(&self) -> String {
        format!("file-row-{}", self.id)
    }

    fn search_fields(&self) -> [&str; 2] {
        [&self.name, &self.web_url]
    }
}

/// Case-insensitive substring filter over an entity's search fields.
#[must_use]
pub fn filter_items<T: Listing>(items: &[T], term: &str) -> Vec<T> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| {
            item.search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Sortable columns of the files table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortColumn {
    /// File size.
    Size,
    /// Last-modified timestamp.
    Date,
}

impl SortColumn {
    /// Short name used in `data-id` attributes.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::Date => "date",
        }
    }

    /// Parse a short name.
    #[must_use]
    pub fn from_name(value: &str) -> Option<Self> {
        match value {
            "size" => Some(Self::Size),
            "date" => Some(Self::Date),
            _ => None,
        }
    }

    /// DOM id of the header cell.
    #[must_use]
    pub const fn header_id(self) -> &'static str {
        match self {
            Self::Size => "size-header",
            Self::Date => "date-header",
        }
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest/oldest first.
    Ascending,
    /// Largest/newest first.
    Descending,
}

impl SortDirection {
    /// Opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Header indicator glyph.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Per-column toggle state plus the last-applied column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    size: Option<SortDirection>,
    date: Option<SortDirection>,
    active: Option<SortColumn>,
}

impl SortState {
    /// Advance `column` to its next direction (ascending first).
    pub fn toggle(&mut self, column: SortColumn) -> SortDirection {
        let slot = match column {
            SortColumn::Size => &mut self.size,
            SortColumn::Date => &mut self.date,
        };
        let next = slot.map_or(SortDirection::Ascending, SortDirection::flipped);
        *slot = Some(next);
        self.active = Some(column);
        next
    }

    /// Indicator for a header; only the last-applied column shows one.
    #[must_use]
    pub fn indicator(&self, column: SortColumn) -> &'static str {
        if self.active != Some(column) {
            return "";
        }
        let direction = match column {
            SortColumn::Size => self.size,
            SortColumn::Date => self.date,
        };
        direction.map_or("", SortDirection::indicator)
    }
}

/// Size key; absent sizes sort as zero.
#[must_use]
pub fn size_key(file: &DriveFile) -> u64 {
    file.size.unwrap_or(0)
}

/// Date key; absent or unparseable timestamps sort as earliest.
#[must_use]
pub fn date_key(file: &DriveFile) -> Option<DateTime<Utc>> {
    file.last_modified_date_time
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Stable sort of files by `column` in `direction`.
pub fn sort_files(files: &mut [DriveFile], column: SortColumn, direction: SortDirection) {
    let compare = |a: &DriveFile, b: &DriveFile| -> Ordering {
        match column {
            SortColumn::Size => size_key(a).cmp(&size_key(b)),
            SortColumn::Date => date_key(a).cmp(&date_key(b)),
        }
    };
    match direction {
        SortDirection::Ascending => files.sort_by(compare),
        SortDirection::Descending => files.sort_by(|a, b| compare(b, a)),
    }
}

/// Click on an element carrying `data-action`/`data-id` inside a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableAction {
    /// Delete the file with this id.
    Delete(String),
    /// Compute the file total of the site with this id.
    CountFiles(String),
    /// Toggle a header sort.
    Sort(SortColumn),
}

impl TableAction {
    /// Interpret a delegated click; unknown actions are ignored.
    #[must_use]
    pub fn parse(action: &str, id: &str) -> Option<Self> {
        if id.is_empty() {
            return None;
        }
        match action {
            "delete" => Some(Self::Delete(id.to_string())),
            "count-files" => Some(Self::CountFiles(id.to_string())),
            "sort" => SortColumn::from_name(id).map(Self::Sort),
            _ => None,
        }
    }
}

/// Progress of a per-row file count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CountCell {
    /// Not requested yet; the trigger is shown.
    #[default]
    Idle,
    /// Request in flight.
    Loading,
    /// Count available.
    Ready(usize),
    /// Request failed; the trigger is shown again.
    Failed,
}

/// State of one list view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListSlice<T> {
    /// Full collection as fetched.
    pub items: Vec<T>,
    /// Currently displayed subset, in display order.
    pub displayed: Vec<T>,
    /// Active search term.
    pub search: String,
    /// Sort toggles.
    pub sort: SortState,
    /// Per-row file counts keyed by entity id.
    pub counts: HashMap<String, CountCell>,
}

impl<T> Default for ListSlice<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            displayed: Vec::new(),
            search: String::new(),
            sort: SortState::default(),
            counts: HashMap::new(),
        }
    }
}

impl<T: Listing> ListSlice<T> {
    /// Clear everything for a fresh view.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Install a freshly fetched collection.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.displayed = filter_items(&items, &self.search);
        self.items = items;
    }

    /// Apply a search term against the full collection.
    pub fn apply_search(&mut self, term: &str) {
        term.clone_into(&mut self.search);
        self.displayed = filter_items(&self.items, term);
    }

    /// Remove an entity from both the collection and the displayed subset.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.displayed.retain(|item| item.id() != id);
        self.counts.remove(id);
        before != self.items.len()
    }

    /// Look up an entity in the full collection.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Count cell for an entity.
    #[must_use]
    pub fn count(&self, id: &str) -> CountCell {
        self.counts.get(id).copied().unwrap_or_default()
    }
}

impl ListSlice<DriveFile> {
    /// Toggle `column` and re-sort the displayed subset.
    pub fn toggle_sort(&mut self, column: SortColumn) -> SortDirection {
        let direction = self.sort.toggle(column);
        sort_files(&mut self.displayed, column, direction);
        direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(id: &str, name: &str, url: &str) -> Site {
        Site {
            id: id.into(),
            display_name: name.into(),
            web_url: url.into(),
        }
    }

    fn file(id: &str, size: Option<u64>, modified: Option<&str>) -> DriveFile {
        DriveFile {
            id: id.into(),
            name: format!("{id}.docx"),
            web_url: format!("https://x/{id}"),
            size,
            last_modified_date_time: modified.map(ToString::to_string),
            last_modified_by_display_name: None,
        }
    }

    fn ids<T: Listing>(items: &[T]) -> Vec<&str> {
        items.iter().map(Listing::id).collect()
    }

    #[test]
    fn filter_is_case_insensitive_over_designated_fields() {
        let sites = vec![
            site("1", "Legal", "https://corp/legal"),
            site("2", "Finance", "https://corp/FIN"),
            site("3", "People", "https://corp/hr"),
        ];
        assert_eq!(ids(&filter_items(&sites, "LEG")), vec!["1"]);
        assert_eq!(ids(&filter_items(&sites, "fin")), vec!["2"]);
        assert_eq!(ids(&filter_items(&sites, "corp")), vec!["1", "2", "3"]);
        assert!(filter_items(&sites, "3").is_empty());
    }

    #[test]
    fn filter_is_idempotent() {
        let sites = vec![site("1", "Legal", "a"), site("2", "Legacy", "b"), site("3", "x", "c")];
        let once = filter_items(&sites, "leg");
        let twice = filter_items(&once, "leg");
        assert_eq!(once, twice);
    }

    #[test]
    fn search_recomputes_from_full_collection() {
        let mut slice = ListSlice::default();
        slice.set_items(vec![site("1", "Legal", "a"), site("2", "Sales", "b")]);
        slice.apply_search("legal");
        assert_eq!(ids(&slice.displayed), vec!["1"]);
        slice.apply_search("");
        assert_eq!(ids(&slice.displayed), vec!["1", "2"]);
        assert_eq!(slice.items.len(), 2);
    }

    #[test]
    fn size_sort_toggles_and_treats_missing_as_zero() {
        let mut slice = ListSlice::default();
        slice.set_items(vec![file("a", Some(30), None), file("b", None, None), file("c", Some(10), None)]);
        assert_eq!(slice.toggle_sort(SortColumn::Size), SortDirection::Ascending);
        assert_eq!(ids(&slice.displayed), vec!["b", "c", "a"]);
        assert_eq!(slice.toggle_sort(SortColumn::Size), SortDirection::Descending);
        assert_eq!(ids(&slice.displayed), vec!["a", "c", "b"]);
        assert_eq!(slice.sort.indicator(SortColumn::Size), "▼");
        assert_eq!(slice.sort.indicator(SortColumn::Date), "");
    }

    #[test]
    fn date_sort_places_missing_first_and_keeps_columns_independent() {
        let mut slice = ListSlice::default();
        slice.set_items(vec![
            file("new", Some(1), Some("2024-03-01T00:00:00Z")),
            file("none", Some(2), None),
            file("old", Some(3), Some("2023-01-01T10:00:00+02:00")),
            file("bad", Some(4), Some("yesterday")),
        ]);
        slice.toggle_sort(SortColumn::Size);
        assert_eq!(slice.toggle_sort(SortColumn::Date), SortDirection::Ascending);
        assert_eq!(ids(&slice.displayed), vec!["none", "bad", "old", "new"]);
        assert_eq!(slice.sort.indicator(SortColumn::Date), "▲");
        assert_eq!(slice.sort.indicator(SortColumn::Size), "");
        assert_eq!(slice.toggle_sort(SortColumn::Size), SortDirection::Descending);
    }

    #[test]
    fn sort_applies_to_filtered_subset_only() {
        let mut slice = ListSlice::default();
        slice.set_items(vec![file("a1", Some(5), None), file("b1", Some(1), None), file("a2", Some(3), None)]);
        slice.apply_search("a");
        slice.toggle_sort(SortColumn::Size);
        assert_eq!(ids(&slice.displayed), vec!["a2", "a1"]);
    }

    #[test]
    fn delegated_clicks_parse_into_actions() {
        assert_eq!(TableAction::parse("delete", "F9"), Some(TableAction::Delete("F9".into())));
        assert_eq!(
            TableAction::parse("count-files", "S1"),
            Some(TableAction::CountFiles("S1".into()))
        );
        assert_eq!(TableAction::parse("sort", "date"), Some(TableAction::Sort(SortColumn::Date)));
        assert_eq!(TableAction::parse("sort", "weight"), None);
        assert_eq!(TableAction::parse("delete", ""), None);
        assert_eq!(TableAction::parse("explode", "x"), None);
    }

    #[test]
    fn remove_drops_from_collection_and_display() {
        let mut slice = ListSlice::default();
        slice.set_items(vec![file("F9", None, None), file("F1", None, None)]);
        slice.counts.insert("F9".into(), CountCell::Ready(1));
        assert!(slice.remove("F9"));
        assert!(!slice.remove("F9"));
        assert_eq!(ids(&slice.items), vec!["F1"]);
        assert_eq!(ids(&slice.displayed), vec!["F1"]);
        assert_eq!(slice.count("F9"), CountCell::Idle);
        slice.apply_search("");
        assert_eq!(ids(&slice.displayed), vec!["F1"]);
    }
}
