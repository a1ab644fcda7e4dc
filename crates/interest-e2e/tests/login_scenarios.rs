//! Login flow scenarios.
//!
//! These drive a live chromium against the configured environment; opt in
//! with `--features browser` and `E2E_BROWSER=1`.

#![cfg(feature = "browser")]

mod common;

use interest_e2e::{PageModel, SuiteResult};

#[tokio::test]
async fn login_with_test_user_and_save_session_state() -> SuiteResult<()> {
    let Some(mut ctx) = common::launch().await? else {
        return Ok(());
    };
    let login = ctx.login_page();

    // Arrange
    login.visit(ctx.page_mut()).await?;
    login.should_be_loaded(ctx.page()).await?;

    // Act
    login.login_with_test_account(ctx.page()).await?;

    // Assert
    login.should_be_logged_in(ctx.page()).await?;
    login.save_storage_state(ctx.page()).await?;
    login.logout(ctx.page()).await?;

    ctx.close().await
}

#[tokio::test]
async fn login_with_invalid_password_shows_error_message() -> SuiteResult<()> {
    let Some(mut ctx) = common::launch().await? else {
        return Ok(());
    };
    let login = ctx.login_page();

    // Arrange
    let valid_email =
        std::env::var("EMAIL").unwrap_or_else(|_| "test@example.com".to_string());
    let invalid_password = "InvalidPassword123!";
    login.visit(ctx.page_mut()).await?;
    login.should_be_loaded(ctx.page()).await?;

    // Act
    login.login(ctx.page(), &valid_email, invalid_password).await?;

    // Assert
    login
        .should_show_login_error(ctx.page(), "Invalid login attempt.")
        .await?;

    ctx.close().await
}

#[tokio::test]
async fn login_without_details_shows_validation_errors() -> SuiteResult<()> {
    let Some(mut ctx) = common::launch().await? else {
        return Ok(());
    };
    let login = ctx.login_page();

    // Arrange
    login.visit(ctx.page_mut()).await?;
    login.should_be_loaded(ctx.page()).await?;

    // Act
    login.login_button().click(ctx.page()).await?;

    // Assert
    login.should_show_validation_errors(ctx.page()).await?;
    login.should_still_be_on_login_page(ctx.page()).await?;

    ctx.close().await
}
