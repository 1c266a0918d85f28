//! Loan parameters as entered on the calculator form, and the summary
//! reported for the mortgage term and for the whole amortization period.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::amortization::{
    PaymentScheduleResult, PrepaymentFrequency, PrepaymentRule, fixed_payment, walk_schedule,
};
use crate::error::{MortgageError, MortgageResult};
use crate::frequency::PaymentFrequency;

/// Longest amortization period the calculator form offers.
pub const MAX_AMORTIZATION_YEARS: u32 = 30;
/// Longest mortgage term the calculator form offers.
pub const MAX_TERM_YEARS: u32 = 10;

/// Prepayment fields of the form. All optional; only meaningful when
/// `amount` is positive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentInput {
    pub amount: Option<f64>,
    /// `"once"`, `"Y"` (once a year) or a number of payment periods.
    pub frequency: Option<String>,
    /// 1-based payment number of the first prepayment.
    pub start_period: Option<u32>,
}

/// Input parameters for a mortgage calculation.
///
/// Missing fields take the calculator's defaults when decoded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanParameters {
    /// The principal amount of the mortgage.
    pub principal: f64,
    /// The nominal annual interest rate as a percentage (e.g. 4 for 4%).
    pub annual_rate: f64,
    pub amortization_years: u32,
    /// Months on top of `amortization_years`.
    pub amortization_months: u32,
    /// Payment frequency code, see [`PaymentFrequency`].
    pub payment_frequency: String,
    /// Length of the mortgage term in years.
    pub term_years: u32,
    pub prepayment: Option<PrepaymentInput>,
}

impl Default for LoanParameters {
    fn default() -> Self {
        Self {
            principal: 1_000_000.0,
            annual_rate: 4.0,
            amortization_years: 30,
            amortization_months: 0,
            payment_frequency: PaymentFrequency::Monthly.code().to_string(),
            term_years: 2,
            prepayment: None,
        }
    }
}

impl LoanParameters {
    pub fn from_json(json: &str) -> MortgageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks the parameters the way the input form does and returns the
    /// first failure.
    ///
    /// # Errors
    ///
    /// [`MortgageError::InvalidInput`] for an out of range field,
    /// [`MortgageError::InvalidFrequency`] for an unknown payment frequency
    /// and [`MortgageError::InvalidPrepaymentFrequency`] for an unknown
    /// prepayment frequency.
    pub fn validate(&self) -> MortgageResult<()> {
        if !(self.principal.is_finite() && self.principal > 0.0) {
            return Err(MortgageError::invalid_input("principal", "must be positive"));
        }
        if !(self.annual_rate > 0.0 && self.annual_rate <= 100.0) {
            return Err(MortgageError::invalid_input(
                "annual_rate",
                "must be greater than 0 and at most 100",
            ));
        }
        if !(1..=MAX_AMORTIZATION_YEARS).contains(&self.amortization_years) {
            return Err(MortgageError::invalid_input(
                "amortization_years",
                format!("must be between 1 and {MAX_AMORTIZATION_YEARS}"),
            ));
        }
        if self.amortization_months > 12 {
            return Err(MortgageError::invalid_input(
                "amortization_months",
                "must be at most 12",
            ));
        }
        let max_term_years = self.amortization_years.min(MAX_TERM_YEARS);
        if !(1..=max_term_years).contains(&self.term_years) {
            return Err(MortgageError::invalid_input(
                "term_years",
                format!("must be between 1 and {max_term_years}"),
            ));
        }
        self.frequency()?;

        if let Some(prepayment) = self.active_prepayment() {
            if prepayment.frequency.is_none() {
                return Err(MortgageError::invalid_input(
                    "prepayment.frequency",
                    "required when a prepayment amount is given",
                ));
            }
            match prepayment.start_period {
                None => {
                    return Err(MortgageError::invalid_input(
                        "prepayment.start_period",
                        "required when a prepayment amount is given",
                    ));
                }
                Some(0) => {
                    return Err(MortgageError::invalid_input(
                        "prepayment.start_period",
                        "must be at least 1",
                    ));
                }
                Some(_) => {}
            }
            self.prepayment_rule()?;
        }
        Ok(())
    }

    pub fn frequency(&self) -> MortgageResult<PaymentFrequency> {
        self.payment_frequency.parse()
    }

    fn active_prepayment(&self) -> Option<&PrepaymentInput> {
        self.prepayment
            .as_ref()
            .filter(|prepayment| prepayment.amount.is_some_and(|amount| amount > 0.0))
    }

    /// Builds the prepayment rule handed to the schedule walk, `None` when no
    /// positive amount is given.
    ///
    /// The annual code `"Y"` becomes the number of payments in a year for the
    /// loan's payment frequency (12 for monthly payments).
    pub fn prepayment_rule(&self) -> MortgageResult<Option<PrepaymentRule>> {
        let Some(prepayment) = self.active_prepayment() else {
            return Ok(None);
        };
        let (Some(amount), Some(code), Some(start_period)) = (
            prepayment.amount,
            prepayment.frequency.as_deref(),
            prepayment.start_period,
        ) else {
            return Ok(None);
        };

        let frequency = match code.trim() {
            "once" => PrepaymentFrequency::Once,
            "Y" => {
                let periods_per_year = self.frequency()?.periods_per_year();
                PrepaymentFrequency::Every(periods_per_year.round() as u32)
            }
            count => count
                .parse::<u32>()
                .map(PrepaymentFrequency::from_period_count)
                .map_err(|_| MortgageError::InvalidPrepaymentFrequency {
                    code: code.to_string(),
                })?,
        };
        Ok(Some(PrepaymentRule::new(amount, frequency, start_period)))
    }
}

/// Figures for one reporting window: the mortgage term or the whole
/// amortization period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowBreakdown {
    /// Payments the window would have without prepayments. May be
    /// fractional for weekly based frequencies.
    pub scheduled_payments: f64,
    pub number_of_payments: u32,
    /// The fixed periodic payment.
    pub payment: f64,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub total_cost: f64,
    pub last_partial_payment: f64,
}

impl WindowBreakdown {
    fn from_schedule(scheduled_payments: f64, payment: f64, schedule: PaymentScheduleResult) -> Self {
        Self {
            scheduled_payments,
            number_of_payments: schedule.actual_number_of_payments,
            payment,
            principal_paid: schedule.total_cost - schedule.total_interest_paid,
            interest_paid: schedule.total_interest_paid,
            total_cost: schedule.total_cost,
            last_partial_payment: schedule.last_partial_payment,
        }
    }

    /// Rounds every amount to cents.
    ///
    /// # Errors
    ///
    /// Returns [`MortgageError::NonFiniteResult`] if an amount is NaN or
    /// infinite.
    pub fn rounded(&self) -> MortgageResult<RoundedBreakdown> {
        Ok(RoundedBreakdown {
            scheduled_payments: round_to("scheduled_payments", self.scheduled_payments, 0)?,
            number_of_payments: self.number_of_payments,
            payment: round_to("payment", self.payment, 2)?,
            principal_paid: round_to("principal_paid", self.principal_paid, 2)?,
            interest_paid: round_to("interest_paid", self.interest_paid, 2)?,
            total_cost: round_to("total_cost", self.total_cost, 2)?,
            last_partial_payment: round_to("last_partial_payment", self.last_partial_payment, 2)?,
        })
    }
}

/// A [`WindowBreakdown`] with amounts rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundedBreakdown {
    pub scheduled_payments: Decimal,
    pub number_of_payments: u32,
    pub payment: Decimal,
    pub principal_paid: Decimal,
    pub interest_paid: Decimal,
    pub total_cost: Decimal,
    pub last_partial_payment: Decimal,
}

fn round_to(field: &str, value: f64, dp: u32) -> MortgageResult<Decimal> {
    Decimal::from_f64(value)
        .map(|value| value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
        .ok_or_else(|| MortgageError::NonFiniteResult {
            field: field.to_string(),
        })
}

/// Results of a mortgage calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageSummary {
    pub payment_frequency: PaymentFrequency,
    pub rate_per_period: f64,
    pub fixed_payment: f64,
    pub prepayment: Option<PrepaymentRule>,
    pub term: WindowBreakdown,
    pub amortization_period: WindowBreakdown,
}

/// Calculates the fixed payment and the term and amortization period
/// totals for a mortgage.
///
/// This is the main entry point of the library.
///
/// # Errors
///
/// Returns an error if the parameters fail [`LoanParameters::validate`].
pub fn calculate_mortgage(params: &LoanParameters) -> MortgageResult<MortgageSummary> {
    params.validate()?;

    let frequency = params.frequency()?;
    let rate_per_period = params.annual_rate / frequency.periods_per_year() / 100.0;

    let amortization_months = params.amortization_years * 12 + params.amortization_months;
    let periods_in_amortization = frequency.payment_count(amortization_months);
    let periods_in_term = frequency.payment_count(params.term_years * 12);

    let payment = fixed_payment(params.principal, rate_per_period, periods_in_amortization);
    let prepayment = params.prepayment_rule()?;

    debug!(
        frequency = %frequency,
        periods_in_term,
        periods_in_amortization,
        payment,
        prepayment = prepayment.is_some(),
        "Calculating mortgage"
    );

    let walk = |periods: f64| {
        walk_schedule(
            params.principal,
            payment,
            rate_per_period,
            periods,
            1,
            prepayment.as_ref(),
        )
    };
    let term = WindowBreakdown::from_schedule(periods_in_term, payment, walk(periods_in_term));
    let amortization_period = WindowBreakdown::from_schedule(
        periods_in_amortization,
        payment,
        walk(periods_in_amortization),
    );

    Ok(MortgageSummary {
        payment_frequency: frequency,
        rate_per_period,
        fixed_payment: payment,
        prepayment,
        term,
        amortization_period,
    })
}
