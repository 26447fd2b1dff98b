use anyhow::Context;
use sitenav_test_support::fixtures::{TEST_TOKEN, TestApp, api_url, site};
use sitenav_test_support::mocks::FakeIdentityProvider;
use sitenav_ui::core::http::Method;
use sitenav_ui::core::session::{ProviderError, TOKEN_STORAGE_KEY, TokenStorage};
use sitenav_ui::core::templates::ContentView;

#[tokio::test]
async fn login_retries_interactively_and_reloads_route() -> anyhow::Result<()> {
    let identity = FakeIdentityProvider::default()
        .with_silent(Err(ProviderError::InteractionRequired))
        .with_interactive(Ok("fresh-token"));
    let app = TestApp::with_identity(identity);
    app.transport
        .respond_json(Method::Get, api_url("/sites"), 200, &vec![site("S1", "Legal")]);
    app.engine.navigate("#/sites").await;
    assert_eq!(app.engine.store().read(|s| s.page.view.clone()), ContentView::LoggedOut);

    app.engine.login().await?;

    assert_eq!(app.identity.silent_calls(), 1);
    assert_eq!(app.identity.interactive_calls(), 1);
    assert_eq!(
        app.storage.get(TOKEN_STORAGE_KEY).as_deref(),
        Some("fresh-token")
    );
    let state = app.engine.store().snapshot();
    assert!(state.session.authenticated);
    assert!(matches!(state.page.view, ContentView::List(_)));
    assert_eq!(state.page.error, None);
    let request = app.transport.requests().pop().context("sites requested")?;
    assert_eq!(
        request.options.header("Authorization"),
        Some("Bearer fresh-token")
    );
    assert!(app.table_markup().contains("site-row-S1"));
    Ok(())
}

#[tokio::test]
async fn login_failure_writes_error_region() {
    let identity =
        FakeIdentityProvider::default().with_silent(Err(ProviderError::Failed("popup blocked".into())));
    let app = TestApp::with_identity(identity);

    let result = app.engine.login().await;

    assert!(result.is_err());
    assert_eq!(app.identity.interactive_calls(), 0);
    assert_eq!(
        app.error().as_deref(),
        Some("Failed to log in. Please try again.")
    );
    assert_eq!(app.storage.get(TOKEN_STORAGE_KEY), None);
}

#[tokio::test]
async fn logout_clears_token_even_when_sign_out_fails() {
    let identity = FakeIdentityProvider::default().with_failing_sign_out();
    let app = TestApp::with_identity(identity);
    app.storage.set(TOKEN_STORAGE_KEY, TEST_TOKEN);
    app.engine.navigate("#/sites").await;

    app.engine.logout().await;

    assert_eq!(app.identity.sign_out_calls(), 1);
    assert_eq!(app.storage.get(TOKEN_STORAGE_KEY), None);
    let state = app.engine.store().snapshot();
    assert!(!state.session.authenticated);
    assert_eq!(state.page.view, ContentView::LoggedOut);
}
