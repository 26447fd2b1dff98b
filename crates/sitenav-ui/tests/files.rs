use anyhow::Context;
use sitenav_test_support::fixtures::{TestApp, api_url, drive, file, site};
use sitenav_ui::core::breadcrumb::TabId;
use sitenav_ui::core::http::Method;
use sitenav_ui::core::store::NoticeKind;
use sitenav_ui::features::files::DeleteOutcome;
use sitenav_ui::features::list::{SortColumn, TableAction};

fn files_app(files: &[sitenav_api_models::DriveFile]) -> TestApp {
    let app = TestApp::signed_in();
    app.transport.respond_json(
        Method::Get,
        api_url("/drives/D1"),
        200,
        &drive("D1", "Contracts", "S1", "Legal"),
    );
    app.transport
        .respond_json(Method::Get, api_url("/files?driveId=D1"), 200, &files.to_vec());
    app
}

fn two_files() -> Vec<sitenav_api_models::DriveFile> {
    vec![
        file("F1", "nda.pdf", Some(3_145_728), Some("2024-03-01T00:00:00Z")),
        file("F2", "budget.xlsx", Some(1_048_576), Some("2023-12-24T00:00:00Z")),
    ]
}

fn row_position(markup: &str, id: &str) -> usize {
    markup
        .find(&format!(r#"id="file-row-{id}""#))
        .unwrap_or_else(|| panic!("row {id} missing from {markup}"))
}

#[tokio::test]
async fn files_view_resolves_both_tabs() {
    let app = files_app(&two_files());

    app.engine.navigate("#/files/D1").await;

    let state = app.engine.store().snapshot();
    let drive_tab = state.breadcrumb.tab(TabId::Drive);
    assert_eq!(drive_tab.label.as_deref(), Some("Contracts"));
    assert_eq!(drive_tab.href, "#/files/D1");
    let site_tab = state.breadcrumb.tab(TabId::Site);
    assert_eq!(site_tab.label.as_deref(), Some("Legal"));
    assert_eq!(site_tab.href, "#/drives/S1");
    let markup = app.table_markup();
    assert!(markup.contains("<td>3.00 MB</td>"));
    assert!(markup.contains("<td>1/3/2024</td>"));
    assert!(markup.contains("<td>Ada</td>"));
}

#[tokio::test]
async fn delete_removes_only_that_row_without_refetch() {
    let app = files_app(&two_files());
    app.transport
        .respond(Method::Delete, api_url("/files/D1/items/F1"), 204, "");
    app.engine.navigate("#/files/D1").await;

    let outcome = app.engine.delete_file("F1").await;

    assert_eq!(outcome, DeleteOutcome::Deleted);
    let state = app.engine.store().snapshot();
    assert!(!state.table.contains("file-row-F1"));
    assert!(state.table.contains("file-row-F2"));
    assert_eq!(state.table.row_count(), 1);
    assert!(state.files.find("F1").is_none());
    assert_eq!(
        app.transport.count_for(Method::Get, &api_url("/files?driveId=D1")),
        1
    );
    let notice = state.page.notices.last().expect("success notice");
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.message, "File deleted successfully.");
    assert_eq!(
        app.confirmer.prompts(),
        vec!["Are you sure you want to delete this file?".to_string()]
    );

    app.engine.search("");
    assert!(!app.table_markup().contains("file-row-F1"));
}

#[tokio::test]
async fn delete_failure_keeps_row_and_shows_server_message() {
    let app = files_app(&two_files());
    app.engine.navigate("#/files/D1").await;

    let outcome = app.engine.delete_file("F1").await;

    assert_eq!(outcome, DeleteOutcome::Failed);
    assert!(app.table_markup().contains("file-row-F1"));
    assert_eq!(app.error().as_deref(), Some("not found"));
    assert!(app.engine.store().read(|state| state.page.notices.is_empty()));
}

#[tokio::test]
async fn declined_confirmation_sends_nothing() {
    let app = files_app(&two_files());
    app.engine.navigate("#/files/D1").await;
    app.confirmer.answer(false);

    let outcome = app.engine.delete_file("F1").await;

    assert_eq!(outcome, DeleteOutcome::Cancelled);
    assert_eq!(
        app.transport
            .count_for(Method::Delete, &api_url("/files/D1/items/F1")),
        0
    );
    assert!(app.table_markup().contains("file-row-F1"));
}

#[tokio::test]
async fn empty_listing_shows_placeholder_spanning_all_columns() {
    let app = files_app(&[]);

    app.engine.navigate("#/files/D1").await;

    let markup = app.table_markup();
    assert!(markup.contains(r#"<tr class="empty-state"><td colspan="6">No results found</td></tr>"#));
    assert_eq!(app.engine.store().read(|state| state.table.row_count()), 0);
}

#[tokio::test]
async fn search_filters_and_clearing_restores_rows() {
    let app = files_app(&two_files());
    app.engine.navigate("#/files/D1").await;
    let full = app.table_markup();

    app.engine.search("NDA");
    let once = app.table_markup();
    app.engine.search("NDA");
    assert_eq!(app.table_markup(), once);
    assert!(once.contains("file-row-F1"));
    assert!(!once.contains("file-row-F2"));

    app.engine.search("zzz");
    assert!(app.table_markup().contains("empty-state"));

    app.engine.search("");
    assert_eq!(app.table_markup(), full);
}

#[tokio::test]
async fn header_clicks_toggle_sort_direction() {
    let app = files_app(&two_files());
    app.engine.navigate("#/files/D1").await;

    app.engine
        .handle_action(TableAction::Sort(SortColumn::Size))
        .await;
    let ascending = app.table_markup();
    assert!(row_position(&ascending, "F2") < row_position(&ascending, "F1"));
    assert_eq!(
        app.engine
            .store()
            .read(|state| state.files.sort.indicator(SortColumn::Size)),
        "▲"
    );

    app.engine.sort(SortColumn::Size);
    let descending = app.table_markup();
    assert!(row_position(&descending, "F1") < row_position(&descending, "F2"));

    app.engine.sort(SortColumn::Date);
    let by_date = app.table_markup();
    assert!(row_position(&by_date, "F2") < row_position(&by_date, "F1"));
    assert_eq!(
        app.engine
            .store()
            .read(|state| state.files.sort.indicator(SortColumn::Size)),
        ""
    );
}

#[tokio::test]
async fn delegated_delete_click_runs_delete() -> anyhow::Result<()> {
    let app = files_app(&two_files());
    app.transport
        .respond(Method::Delete, api_url("/files/D1/items/F2"), 200, "{}");
    app.engine.navigate("#/files/D1").await;

    let action = TableAction::parse("delete", "F2").context("delete action")?;
    app.engine.handle_action(action).await;

    let recorded = app.transport.requests();
    let delete = recorded
        .iter()
        .find(|request| request.method == Method::Delete)
        .context("delete issued")?;
    assert_eq!(delete.options.header("Authorization"), Some("Bearer test-token"));
    assert!(!app.table_markup().contains("file-row-F2"));
    Ok(())
}

#[tokio::test]
async fn delete_finishing_after_navigation_leaves_new_view_untouched() {
    let app = files_app(&two_files());
    app.transport
        .respond(Method::Delete, api_url("/files/D1/items/F1"), 204, "");
    app.transport
        .respond_json(Method::Get, api_url("/sites"), 200, &vec![site("S1", "Legal")]);
    app.engine.navigate("#/files/D1").await;
    let gate = app
        .transport
        .gate(Method::Delete, &api_url("/files/D1/items/F1"));

    let (outcome, _, ()) = futures::join!(
        app.engine.delete_file("F1"),
        app.engine.navigate("#/sites"),
        async { gate.open() },
    );

    assert_eq!(outcome, DeleteOutcome::Deleted);
    let state = app.engine.store().snapshot();
    assert!(state.page.notices.is_empty());
    assert_eq!(state.page.error, None);
    assert!(state.files.items.is_empty());
    assert!(app.table_markup().contains("site-row-S1"));
}
