//! Login page model.

use async_trait::async_trait;
use tracing::info;

use crate::browser::Page;
use crate::config::Credentials;
use crate::locator::Locator;
use crate::page_object::{expect_contains, PageModel};
use crate::result::{SuiteError, SuiteResult};
use crate::session::{StorageState, AUTH_STATE_PATH};

const LOGIN_PATH: &str = "/Account/Login";
const BRAND_TEXT: &str = "Ten10TechTest";

/// Page object for the login route.
#[derive(Debug, Clone, Default)]
pub struct LoginPage;

impl LoginPage {
    /// Create the page object.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    // Locators

    /// Username/email input
    #[must_use]
    pub fn user_email_field(&self) -> Locator {
        Locator::css("#UserName")
    }

    /// Password input
    #[must_use]
    pub fn user_password_field(&self) -> Locator {
        Locator::css("#Password")
    }

    /// Submit control
    #[must_use]
    pub fn login_button(&self) -> Locator {
        Locator::role("button", "Log in")
    }

    /// Error region shown for a rejected login attempt
    #[must_use]
    pub fn login_error_message(&self) -> Locator {
        Locator::role_any("alert")
    }

    /// Field-level validation error under the username input
    #[must_use]
    pub fn user_name_validation_error(&self) -> Locator {
        Locator::css("#UserName-error")
    }

    /// Field-level validation error under the password input
    #[must_use]
    pub fn password_validation_error(&self) -> Locator {
        Locator::css("#Password-error")
    }

    /// Page heading
    #[must_use]
    pub fn page_heading(&self) -> Locator {
        Locator::role("heading", "Please enter your login")
    }

    /// Navbar brand element
    #[must_use]
    pub fn navbar_brand(&self) -> Locator {
        Locator::css(".navbar-brand")
    }

    /// Logout control (only visible when logged in)
    #[must_use]
    pub fn logout_button(&self) -> Locator {
        Locator::role("button", "Logout")
    }

    // Actions

    /// Fill the credential fields and submit.
    pub async fn login(&self, page: &Page, username: &str, password: &str) -> SuiteResult<()> {
        self.user_email_field().fill(page, username).await?;
        self.user_password_field().fill(page, password).await?;
        self.login_button().click(page).await
    }

    /// Log in with the environment-provided test account.
    ///
    /// Fails with [`SuiteError::MissingCredentials`] before touching the
    /// UI when `EMAIL`/`PASSWORD` are absent.
    pub async fn login_with_test_account(&self, page: &Page) -> SuiteResult<()> {
        let credentials = Credentials::from_env()?;
        info!(username = %credentials.username, "signing in with test account");
        self.login(page, &credentials.username, &credentials.password)
            .await
    }

    /// Log out; a no-op when the logout control is not visible.
    pub async fn logout(&self, page: &Page) -> SuiteResult<()> {
        if self.logout_button().is_visible_now(page).await? {
            self.logout_button().click(page).await?;
        }
        Ok(())
    }

    /// Persist the current session to the auth-state file.
    pub async fn save_storage_state(&self, page: &Page) -> SuiteResult<()> {
        StorageState::capture(page).await?.save(AUTH_STATE_PATH)
    }

    // Assertions

    /// The rejected-login error region is visible and carries `expected`.
    pub async fn should_show_login_error(&self, page: &Page, expected: &str) -> SuiteResult<()> {
        self.login_error_message().expect_visible(page).await?;
        let actual = self.login_error_message().text_content(page).await?;
        expect_contains("login error message", &actual, expected)
    }

    /// Both field-level validation errors are visible with their exact texts.
    pub async fn should_show_validation_errors(&self, page: &Page) -> SuiteResult<()> {
        self.user_name_validation_error().expect_visible(page).await?;
        let user_text = self.user_name_validation_error().text_content(page).await?;
        expect_contains(
            "username validation error",
            &user_text,
            "The UserName field is required.",
        )?;

        self.password_validation_error().expect_visible(page).await?;
        let password_text = self.password_validation_error().text_content(page).await?;
        expect_contains(
            "password validation error",
            &password_text,
            "The Password field is required.",
        )
    }

    /// The submission left us on the login page.
    pub async fn should_still_be_on_login_page(&self, page: &Page) -> SuiteResult<()> {
        let current = page.current_url().await?;
        if !current.contains("Login") {
            return Err(SuiteError::assertion(
                "still on login page",
                "URL containing 'Login'",
                current,
            ));
        }
        self.login_button().expect_visible(page).await
    }

    /// The login succeeded: away from the login route, no login control,
    /// branded navbar present.
    pub async fn should_be_logged_in(&self, page: &Page) -> SuiteResult<()> {
        let current = page.current_url().await?;
        if current.contains("Login") {
            return Err(SuiteError::assertion(
                "logged in",
                "URL away from 'Login'",
                current,
            ));
        }
        self.login_button().expect_hidden(page).await?;
        let brand = self.navbar_brand().text_content(page).await?;
        expect_contains("navbar brand", &brand, BRAND_TEXT)
    }
}

#[async_trait]
impl PageModel for LoginPage {
    fn path(&self) -> &str {
        LOGIN_PATH
    }

    fn page_name(&self) -> &str {
        "LoginPage"
    }

    fn loaded_markers(&self) -> Vec<Locator> {
        vec![
            self.page_heading(),
            self.user_email_field(),
            self.user_password_field(),
            self.login_button(),
        ]
    }

    async fn loaded_checks(&self, page: &Page) -> SuiteResult<()> {
        let brand = self.navbar_brand().text_content(page).await?;
        expect_contains("navbar brand", &brand, BRAND_TEXT)
    }
}
