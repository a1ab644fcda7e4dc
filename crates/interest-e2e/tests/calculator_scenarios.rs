//! Interest calculator scenarios.
//!
//! Every rendered amount is cross-checked against the oracle. These drive
//! a live chromium against the configured environment; opt in with
//! `--features browser` and `E2E_BROWSER=1`.

#![cfg(feature = "browser")]

mod common;

use interest_e2e::oracle::{compute_interest, compute_total};
use interest_e2e::{Duration, PageModel, RatePercent, SuiteResult, TestContext};

const CONSENT_ALERT: &str = "Please accept the mandatory consent.";
const MISSING_FIELDS_ALERT: &str = "Please fill in all fields.";

async fn open_calculator() -> SuiteResult<Option<TestContext>> {
    let Some(mut ctx) = common::launch().await? else {
        return Ok(None);
    };
    ctx.ensure_authenticated().await?;
    let calculator = ctx.calculator_page();
    calculator.visit(ctx.page_mut()).await?;
    calculator.should_be_loaded(ctx.page()).await?;
    Ok(Some(ctx))
}

async fn calculate_and_verify(
    principal: f64,
    percent: u32,
    duration: Duration,
) -> SuiteResult<()> {
    let Some(ctx) = open_calculator().await? else {
        return Ok(());
    };
    let calculator = ctx.calculator_page();
    let rate = RatePercent::new(percent)?;

    // Act
    calculator
        .calculate_interest(ctx.page(), principal, rate, duration)
        .await?;

    // Assert
    let expected_interest = compute_interest(principal, rate, duration);
    let expected_total = compute_total(principal, rate, duration);
    calculator
        .should_show_correct_interest(ctx.page(), expected_interest)
        .await?;
    calculator
        .should_show_correct_total(ctx.page(), expected_total)
        .await?;

    ctx.close().await
}

// Basic calculation

#[tokio::test]
async fn calculate_interest_with_one_percent_yearly() -> SuiteResult<()> {
    // 1500 at 1% yearly is the reference case: 15.00 interest, 1515.00 total.
    assert_eq!(compute_interest(1500.0, RatePercent::new(1)?, Duration::Yearly), 15.00);
    assert_eq!(compute_total(1500.0, RatePercent::new(1)?, Duration::Yearly), 1515.00);
    calculate_and_verify(1500.0, 1, Duration::Yearly).await
}

#[tokio::test]
async fn calculate_interest_with_daily_duration() -> SuiteResult<()> {
    calculate_and_verify(10_000.0, 5, Duration::Daily).await
}

#[tokio::test]
async fn calculate_interest_with_monthly_duration() -> SuiteResult<()> {
    calculate_and_verify(5_000.0, 10, Duration::Monthly).await
}

// Different interest rates

#[tokio::test]
async fn calculate_with_maximum_interest_rate() -> SuiteResult<()> {
    calculate_and_verify(8_000.0, 15, Duration::Yearly).await
}

#[tokio::test]
async fn calculate_with_seven_percent_interest_rate() -> SuiteResult<()> {
    calculate_and_verify(3_000.0, 7, Duration::Yearly).await
}

// Decimal rounding

#[tokio::test]
async fn result_is_rounded_to_two_decimal_places() -> SuiteResult<()> {
    let Some(ctx) = open_calculator().await? else {
        return Ok(());
    };
    let calculator = ctx.calculator_page();
    let rate = RatePercent::new(3)?;

    // Act
    calculator
        .calculate_interest(ctx.page(), 1000.0, rate, Duration::Daily)
        .await?;

    // Assert
    let expected = compute_interest(1000.0, rate, Duration::Daily);
    let text = calculator
        .interest_amount_result()
        .text_content(ctx.page())
        .await?;
    let value = text.replace("Interest Amount:", "").trim().to_string();
    if let Some((_, decimals)) = value.split_once('.') {
        assert!(
            decimals.len() <= 2,
            "rendered interest '{value}' has more than two decimals"
        );
    }
    calculator
        .should_show_correct_interest(ctx.page(), expected)
        .await?;

    ctx.close().await
}

// Field validation

#[tokio::test]
async fn does_not_calculate_with_consent_unchecked() -> SuiteResult<()> {
    let Some(ctx) = open_calculator().await? else {
        return Ok(());
    };
    let calculator = ctx.calculator_page();

    // Act: everything but the consent checkbox
    calculator.set_principal_amount(ctx.page(), 1000.0).await?;
    calculator
        .select_interest_rate(ctx.page(), RatePercent::new(5)?)
        .await?;
    calculator
        .select_duration(ctx.page(), Duration::Yearly)
        .await?;

    // Assert
    calculator.should_require_consent(ctx.page()).await?;
    calculator
        .should_alert_on_calculate(ctx.page(), CONSENT_ALERT)
        .await?;
    calculator.should_have_empty_results(ctx.page()).await?;

    ctx.close().await
}

#[tokio::test]
async fn displays_no_results_before_calculation() -> SuiteResult<()> {
    let Some(ctx) = open_calculator().await? else {
        return Ok(());
    };
    let calculator = ctx.calculator_page();
    calculator.should_have_empty_results(ctx.page()).await?;
    ctx.close().await
}

#[tokio::test]
async fn daily_duration_is_selected_by_default() -> SuiteResult<()> {
    let Some(ctx) = open_calculator().await? else {
        return Ok(());
    };
    let calculator = ctx.calculator_page();
    calculator
        .should_have_selected_duration(ctx.page(), Duration::default())
        .await?;
    ctx.close().await
}

// Error messages

#[tokio::test]
async fn alerts_when_calculating_without_an_interest_rate() -> SuiteResult<()> {
    let Some(ctx) = open_calculator().await? else {
        return Ok(());
    };
    let calculator = ctx.calculator_page();

    // Act
    calculator.set_principal_amount(ctx.page(), 1000.0).await?;
    calculator
        .select_duration(ctx.page(), Duration::Yearly)
        .await?;

    // Assert
    calculator
        .should_alert_on_calculate(ctx.page(), MISSING_FIELDS_ALERT)
        .await?;

    ctx.close().await
}

#[tokio::test]
async fn alerts_when_mandatory_fields_are_not_selected() -> SuiteResult<()> {
    let Some(ctx) = open_calculator().await? else {
        return Ok(());
    };
    let calculator = ctx.calculator_page();

    // Act
    calculator.accept_consent(ctx.page()).await?;

    // Assert
    calculator
        .should_alert_on_calculate(ctx.page(), MISSING_FIELDS_ALERT)
        .await?;

    ctx.close().await
}

// Boundary values

#[tokio::test]
async fn calculate_with_minimum_principal_amount() -> SuiteResult<()> {
    let Some(ctx) = open_calculator().await? else {
        return Ok(());
    };
    let calculator = ctx.calculator_page();

    calculator
        .calculate_interest(ctx.page(), 0.0, RatePercent::new(5)?, Duration::Yearly)
        .await?;

    calculator.should_show_correct_interest(ctx.page(), 0.00).await?;
    calculator.should_show_correct_total(ctx.page(), 0.00).await?;

    ctx.close().await
}

#[tokio::test]
async fn calculate_with_maximum_principal_amount() -> SuiteResult<()> {
    calculate_and_verify(15_000.0, 10, Duration::Yearly).await
}

#[tokio::test]
async fn calculate_with_minimum_interest_rate() -> SuiteResult<()> {
    let Some(ctx) = open_calculator().await? else {
        return Ok(());
    };
    let calculator = ctx.calculator_page();

    calculator
        .calculate_interest(ctx.page(), 10_000.0, RatePercent::new(1)?, Duration::Yearly)
        .await?;

    calculator.should_show_correct_interest(ctx.page(), 100.00).await?;
    calculator.should_show_correct_total(ctx.page(), 10_100.00).await?;

    ctx.close().await
}
