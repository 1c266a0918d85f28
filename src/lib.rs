//! `mortgage_calculator` is a Rust library for exploring fixed-payment mortgage
//! scenarios.
//!
//! Given a principal, a nominal annual rate, an amortization period, a payment
//! frequency and a term, it calculates:
//! - **the fixed periodic payment** from the standard amortization formula;
//! - **interest paid and total cost** over the term and over the whole
//!   amortization period;
//! - **the effect of prepayments**: extra principal paid every `n` payments or
//!   once, which can close the loan early with a smaller final payment.
//!
//! ## Usage
//!
//! Add `mortgage_calculator` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! mortgage_calculator = "0.1.0"
//! ```
//!
//! Then, use the `calculate_mortgage` function to get the results for the
//! term and the amortization period:
//!
//! ```rust
//! use mortgage_calculator::{calculate_mortgage, LoanParameters, PrepaymentInput};
//!
//! fn main() {
//!     let params = LoanParameters {
//!         principal: 500_000.0,
//!         annual_rate: 5.0,
//!         amortization_years: 25,
//!         amortization_months: 0,
//!         payment_frequency: "BiW".to_string(),
//!         term_years: 5,
//!         prepayment: Some(PrepaymentInput {
//!             amount: Some(2_000.0),
//!             frequency: Some("Y".to_string()),
//!             start_period: Some(1),
//!         }),
//!     };
//!
//!     match calculate_mortgage(&params).and_then(|summary| summary.amortization_period.rounded()) {
//!         Ok(period) => {
//!             println!("Payment:            {}", period.payment);
//!             println!("Number of payments: {}", period.number_of_payments);
//!             println!("Interest paid:      {}", period.interest_paid);
//!             println!("Total cost:         {}", period.total_cost);
//!         }
//!         Err(e) => {
//!             eprintln!("Error calculating mortgage: {}", e);
//!         }
//!     }
//! }
//! ```
//!
//! The lower level pieces ([`resolve_payment_count`], [`fixed_payment`] and
//! [`walk_schedule`]) are exported for callers that validate their own
//! inputs.

pub mod amortization;
pub mod calculator;
pub mod error;
pub mod frequency;

pub use amortization::{
    PaymentScheduleResult, PrepaymentFrequency, PrepaymentRule, fixed_payment, walk_schedule,
};
pub use calculator::{
    LoanParameters, MortgageSummary, PrepaymentInput, RoundedBreakdown, WindowBreakdown,
    calculate_mortgage,
};
pub use error::{MortgageError, MortgageResult};
pub use frequency::{PaymentFrequency, resolve_payment_count};
