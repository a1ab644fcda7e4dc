//! Interest calculator page model.

use async_trait::async_trait;
use tracing::info;

use crate::browser::Page;
use crate::dialog::{DialogCapture, DialogType, DEFAULT_DIALOG_TIMEOUT_MS};
use crate::locator::Locator;
use crate::oracle::{format_currency, validate_principal, Duration, RatePercent};
use crate::page_object::{expect_contains, PageModel};
use crate::result::{SuiteError, SuiteResult};

const CALCULATOR_PATH: &str = "/";
const BRAND_TEXT: &str = "Ten10TechTest";
const INTEREST_PREFIX: &str = "Interest Amount:";
const TOTAL_PREFIX: &str = "Total Amount with Interest:";

/// Page object for the interest calculator route.
#[derive(Debug, Clone, Default)]
pub struct InterestCalculatorPage;

impl InterestCalculatorPage {
    /// Create the page object.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    // Locators

    /// Document body (used to close the rate dropdown)
    #[must_use]
    pub fn body(&self) -> Locator {
        Locator::css("body")
    }

    /// Navbar brand element
    #[must_use]
    pub fn navbar_brand(&self) -> Locator {
        Locator::css(".navbar-brand")
    }

    /// Page heading
    #[must_use]
    pub fn page_heading(&self) -> Locator {
        Locator::role("heading", "Interest Calculator")
    }

    /// Principal amount slider
    #[must_use]
    pub fn principal_amount_slider(&self) -> Locator {
        Locator::css("#customRange1")
    }

    /// Interest-rate dropdown toggle
    #[must_use]
    pub fn interest_rate_dropdown_button(&self) -> Locator {
        Locator::css("#dropdownMenuButton")
    }

    /// One rate option inside the dropdown, bound by its label text
    #[must_use]
    pub fn interest_rate_option(&self, rate: RatePercent) -> Locator {
        Locator::label(rate.label())
    }

    /// Duration list container
    #[must_use]
    pub fn duration_list(&self) -> Locator {
        Locator::css("#durationList")
    }

    /// One duration option, bound by its `data-value`
    #[must_use]
    pub fn duration_option(&self, duration: Duration) -> Locator {
        Locator::css(format!(
            "#durationList a[data-value=\"{}\"]",
            duration.as_str()
        ))
    }

    /// Mandatory consent checkbox
    #[must_use]
    pub fn consent_checkbox(&self) -> Locator {
        Locator::css("#gridCheck1")
    }

    /// Calculate control
    #[must_use]
    pub fn calculate_button(&self) -> Locator {
        Locator::role("button", "Calculate")
    }

    /// Interest result field
    #[must_use]
    pub fn interest_amount_result(&self) -> Locator {
        Locator::css("#interestAmount")
    }

    /// Total result field
    #[must_use]
    pub fn total_amount_result(&self) -> Locator {
        Locator::css("#totalAmount")
    }

    // Actions

    /// Set the principal amount through the slider.
    ///
    /// Values outside `[0, 15000]` are rejected at the call site, before
    /// any UI interaction.
    pub async fn set_principal_amount(&self, page: &Page, amount: f64) -> SuiteResult<()> {
        validate_principal(amount)?;
        self.principal_amount_slider()
            .fill(page, &format_amount(amount))
            .await
    }

    /// Choose an interest rate from the dropdown, closing it afterwards.
    pub async fn select_interest_rate(&self, page: &Page, rate: RatePercent) -> SuiteResult<()> {
        self.interest_rate_dropdown_button().click(page).await?;
        self.interest_rate_option(rate).check(page).await?;
        // Click elsewhere to close the dropdown
        self.body().click(page).await
    }

    /// Choose a duration option.
    pub async fn select_duration(&self, page: &Page, duration: Duration) -> SuiteResult<()> {
        self.duration_option(duration).click(page).await
    }

    /// Tick the mandatory consent checkbox.
    pub async fn accept_consent(&self, page: &Page) -> SuiteResult<()> {
        self.consent_checkbox().check(page).await
    }

    /// Press Calculate.
    pub async fn click_calculate(&self, page: &Page) -> SuiteResult<()> {
        self.calculate_button().click(page).await
    }

    /// Complete calculation flow: principal, rate, duration, consent,
    /// calculate.
    pub async fn calculate_interest(
        &self,
        page: &Page,
        principal: f64,
        rate: RatePercent,
        duration: Duration,
    ) -> SuiteResult<()> {
        info!(principal, rate = %rate, duration = %duration, "calculating interest");
        self.set_principal_amount(page, principal).await?;
        self.select_interest_rate(page, rate).await?;
        self.select_duration(page, duration).await?;
        self.accept_consent(page).await?;
        self.click_calculate(page).await
    }

    // Assertions

    async fn read_result(&self, page: &Page, locator: Locator, prefix: &str) -> SuiteResult<f64> {
        locator.expect_visible(page).await?;
        let text = locator.text_content(page).await?;
        expect_contains("result field", &text, prefix)?;
        let value = text.replace(prefix, "").trim().to_string();
        value.parse::<f64>().map_err(|_| {
            SuiteError::assertion("result field", "a currency amount", format!("'{value}'"))
        })
    }

    /// The rendered interest equals `expected` at 2-decimal precision.
    pub async fn should_show_correct_interest(
        &self,
        page: &Page,
        expected: f64,
    ) -> SuiteResult<()> {
        let actual = self
            .read_result(page, self.interest_amount_result(), INTEREST_PREFIX)
            .await?;
        expect_currency_eq("interest amount", expected, actual)
    }

    /// The rendered total equals `expected` at 2-decimal precision.
    pub async fn should_show_correct_total(&self, page: &Page, expected: f64) -> SuiteResult<()> {
        let actual = self
            .read_result(page, self.total_amount_result(), TOTAL_PREFIX)
            .await?;
        expect_currency_eq("total amount", expected, actual)
    }

    /// The consent checkbox is marked required by the page.
    pub async fn should_require_consent(&self, page: &Page) -> SuiteResult<()> {
        let required = self.consent_checkbox().attribute(page, "required").await?;
        if required.is_some() {
            Ok(())
        } else {
            Err(SuiteError::assertion(
                "consent checkbox",
                "required attribute present",
                "absent",
            ))
        }
    }

    /// The given duration option is the active selection.
    pub async fn should_have_selected_duration(
        &self,
        page: &Page,
        duration: Duration,
    ) -> SuiteResult<()> {
        let class = self
            .duration_option(duration)
            .attribute(page, "class")
            .await?
            .unwrap_or_default();
        if class.split_whitespace().any(|c| c == "active") {
            Ok(())
        } else {
            Err(SuiteError::assertion(
                format!("duration '{duration}' selected"),
                "class list containing 'active'",
                format!("'{class}'"),
            ))
        }
    }

    /// Both result fields are empty.
    pub async fn should_have_empty_results(&self, page: &Page) -> SuiteResult<()> {
        let interest = self.interest_amount_result().text_content(page).await?;
        let total = self.total_amount_result().text_content(page).await?;
        if interest.trim().is_empty() && total.trim().is_empty() {
            Ok(())
        } else {
            Err(SuiteError::assertion(
                "result fields",
                "both empty",
                format!("interest '{}', total '{}'", interest.trim(), total.trim()),
            ))
        }
    }

    /// Pressing Calculate raises an alert carrying exactly `expected`.
    ///
    /// The capture slot is armed before the click; afterwards we await a
    /// captured dialog or a bounded timeout, never a fixed sleep.
    pub async fn should_alert_on_calculate(&self, page: &Page, expected: &str) -> SuiteResult<()> {
        let mut capture = DialogCapture::new();
        capture.arm(page).await?;
        self.click_calculate(page).await?;
        match capture.wait_captured(page, DEFAULT_DIALOG_TIMEOUT_MS).await? {
            Some(dialog) => {
                if dialog.kind != DialogType::Alert {
                    return Err(SuiteError::assertion(
                        "dialog type",
                        DialogType::Alert.to_string(),
                        dialog.kind.to_string(),
                    ));
                }
                if dialog.message == expected {
                    Ok(())
                } else {
                    Err(SuiteError::assertion(
                        "alert message",
                        format!("'{expected}'"),
                        format!("'{}'", dialog.message),
                    ))
                }
            }
            None => Err(SuiteError::assertion(
                "alert message",
                format!("'{expected}'"),
                "<no dialog captured>",
            )),
        }
    }
}

#[async_trait]
impl PageModel for InterestCalculatorPage {
    fn path(&self) -> &str {
        CALCULATOR_PATH
    }

    fn page_name(&self) -> &str {
        "InterestCalculatorPage"
    }

    fn loaded_markers(&self) -> Vec<Locator> {
        vec![
            self.page_heading(),
            self.principal_amount_slider(),
            self.interest_rate_dropdown_button(),
            self.duration_list(),
            self.consent_checkbox(),
            self.calculate_button(),
        ]
    }

    async fn loaded_checks(&self, page: &Page) -> SuiteResult<()> {
        let brand = self.navbar_brand().text_content(page).await?;
        expect_contains("navbar brand", &brand, BRAND_TEXT)
    }
}

/// Render a principal the way the slider expects it (no trailing `.0` for
/// whole amounts).
fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        amount.to_string()
    }
}

fn expect_currency_eq(context: &str, expected: f64, actual: f64) -> SuiteResult<()> {
    let expected = format_currency(expected);
    let actual = format_currency(actual);
    if expected == actual {
        Ok(())
    } else {
        Err(SuiteError::assertion(context, expected, actual))
    }
}
