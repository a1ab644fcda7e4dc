//! Concrete page models for the target application.

mod calculator;
mod login;

pub use calculator::InterestCalculatorPage;
pub use login::LoginPage;
