//! Fixed-payment amortization: the payment formula and the period-by-period
//! schedule walk with optional prepayments.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Below this outstanding balance a loan is treated as paid off.
const PAID_OFF_THRESHOLD: f64 = 1.0;

/// How often a prepayment repeats once it has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrepaymentFrequency {
    /// A single prepayment at the start period.
    Once,
    /// On every period whose index is a multiple of the count
    /// (every period when the count is 1).
    Every(u32),
}

impl PrepaymentFrequency {
    /// Maps a period count to a frequency, `0` meaning a single prepayment.
    pub fn from_period_count(count: u32) -> Self {
        match count {
            0 => PrepaymentFrequency::Once,
            n => PrepaymentFrequency::Every(n),
        }
    }
}

/// Extra principal paid on top of the regular payment on qualifying periods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentRule {
    pub amount: f64,
    pub frequency: PrepaymentFrequency,
    /// 1-based index of the first period a prepayment may be made on.
    pub start_period: u32,
}

impl PrepaymentRule {
    pub fn new(amount: f64, frequency: PrepaymentFrequency, start_period: u32) -> Self {
        Self {
            amount,
            frequency,
            start_period,
        }
    }

    /// A rule with a non-positive (or NaN) amount never fires.
    pub fn is_active(&self) -> bool {
        self.amount > 0.0
    }

    /// Whether a prepayment is made on the period at `period_index`.
    pub fn triggers_at(&self, period_index: u32) -> bool {
        if !self.is_active() || period_index < self.start_period {
            return false;
        }
        match self.frequency {
            PrepaymentFrequency::Once | PrepaymentFrequency::Every(0) => {
                period_index == self.start_period
            }
            PrepaymentFrequency::Every(1) => true,
            PrepaymentFrequency::Every(n) => period_index % n == 0,
        }
    }
}

/// Running totals of a schedule walk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentScheduleResult {
    pub total_interest_paid: f64,
    /// Every payment made, regular payments and prepayments included.
    pub total_cost: f64,
    /// The smaller closing payment when the loan is paid off before its
    /// configured length, otherwise 0.
    pub last_partial_payment: f64,
    pub actual_number_of_payments: u32,
}

impl PaymentScheduleResult {
    fn closed_before(period_index: u32) -> Self {
        Self {
            total_interest_paid: 0.0,
            total_cost: 0.0,
            last_partial_payment: 0.0,
            actual_number_of_payments: period_index.saturating_sub(1),
        }
    }

    fn payoff(period_index: u32, balance: f64, interest: f64) -> Self {
        let payoff = balance + interest;
        Self {
            total_interest_paid: interest,
            total_cost: payoff,
            last_partial_payment: payoff,
            actual_number_of_payments: period_index,
        }
    }

    /// True when the loan ended with a closing payment smaller than the
    /// regular one.
    pub fn paid_off_early(&self) -> bool {
        self.last_partial_payment > 0.0
    }
}

/// Calculates the constant periodic payment that amortizes `principal` over
/// `num_periods` periods.
///
/// The formula is: PMT = P * [i(1 + i)^n] / [(1 + i)^n – 1]
///
/// No validation is made: a zero rate divides by zero and negative inputs
/// give meaningless results.
pub fn fixed_payment(principal: f64, rate_per_period: f64, num_periods: f64) -> f64 {
    let growth = (1.0 + rate_per_period).powf(num_periods);
    principal * rate_per_period * growth / (growth - 1.0)
}

struct RegularPeriod {
    interest: f64,
    paid: f64,
}

/// Walks the loan one period at a time from `period_index` until either
/// `remaining_periods` runs out or the balance is paid off.
///
/// Each period, in order:
///
/// 1. stop if no periods remain;
/// 2. stop if the balance is below one currency unit;
/// 3. if the balance plus this period's interest is more than one unit short
///    of the fixed payment, pay it off with a smaller closing payment;
/// 4. otherwise pay the fixed payment, plus the prepayment when the rule
///    triggers on this period.
///
/// The walk is bounded by `remaining_periods` whatever the balance does.
/// Totals are summed from the last period back to the first.
pub fn walk_schedule(
    balance: f64,
    fixed_payment: f64,
    rate_per_period: f64,
    remaining_periods: f64,
    period_index: u32,
    prepayment: Option<&PrepaymentRule>,
) -> PaymentScheduleResult {
    let mut balance = balance;
    let mut remaining_periods = remaining_periods;
    let mut period_index = period_index;
    let mut periods: Vec<RegularPeriod> = Vec::new();

    let closing = loop {
        if !(remaining_periods > 0.0) {
            debug!(period_index, balance, "schedule ended: periods exhausted");
            break PaymentScheduleResult::closed_before(period_index);
        }
        if balance < PAID_OFF_THRESHOLD {
            debug!(period_index, balance, "schedule ended: balance exhausted");
            break PaymentScheduleResult::closed_before(period_index);
        }

        let interest = balance * rate_per_period;
        if balance + interest + PAID_OFF_THRESHOLD < fixed_payment {
            debug!(period_index, balance, "schedule ended: closing payment");
            break PaymentScheduleResult::payoff(period_index, balance, interest);
        }

        let mut next_balance = balance - (fixed_payment - interest);
        let mut paid = fixed_payment;
        if let Some(rule) = prepayment.filter(|rule| rule.triggers_at(period_index)) {
            trace!(period_index, amount = rule.amount, "prepayment applied");
            next_balance -= rule.amount;
            paid += rule.amount;
        }
        periods.push(RegularPeriod { interest, paid });

        balance = next_balance;
        remaining_periods -= 1.0;
        period_index += 1;
    };

    periods
        .iter()
        .rev()
        .fold(closing, |acc, period| PaymentScheduleResult {
            total_interest_paid: period.interest + acc.total_interest_paid,
            total_cost: period.paid + acc.total_cost,
            ..acc
        })
}
