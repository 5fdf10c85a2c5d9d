use log::{debug, warn};
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::constants::{
    DAYS_PER_YEAR, RETURN_SOLVER_DERIVATIVE_FLOOR, RETURN_SOLVER_MAX_ITERATIONS,
    RETURN_SOLVER_SEED, RETURN_SOLVER_TOLERANCE,
};
use crate::portfolio::performance::CashFlow;

/// Rates are clamped above -1 before exponentiating; at -1 the discount
/// factor is undefined and below it the powers go complex.
const RATE_FLOOR: f64 = -1.0 + 1e-9;

/// Annualized money-weighted rate of return (XIRR), in percent.
///
/// Solves `0 = Σ amount_i * (1+rate)^(-years_i)` by Newton-Raphson, where
/// `years_i` counts days from the earliest flow over 365. Matches the XIRR
/// definition of spreadsheet tooling for the same cash-flow set.
///
/// Needs at least one contribution and one distribution; anything else
/// returns 0 - a defined edge case, not an error. Non-convergence is also
/// not an error: the last finite estimate comes back, lower-confidence but
/// usable.
pub fn xirr(flows: &[CashFlow]) -> Decimal {
    let has_contribution = flows.iter().any(|flow| flow.amount.is_sign_negative());
    let has_distribution = flows
        .iter()
        .any(|flow| flow.amount.is_sign_positive() && !flow.amount.is_zero());
    if !has_contribution || !has_distribution {
        debug!("Return solver needs flows in both directions; returning 0");
        return Decimal::ZERO;
    }

    let earliest = match flows.iter().map(|flow| flow.date).min() {
        Some(date) => date,
        None => return Decimal::ZERO,
    };

    // The iteration runs in f64: fractional exponents are not Decimal
    // territory, and the tolerances are float-scale anyway.
    let terms: Vec<(f64, f64)> = flows
        .iter()
        .filter_map(|flow| {
            let amount = flow.amount.to_f64()?;
            let years = (flow.date - earliest).num_days() as f64 / DAYS_PER_YEAR;
            Some((amount, years))
        })
        .collect();

    let mut rate = RETURN_SOLVER_SEED;
    for iteration in 0..RETURN_SOLVER_MAX_ITERATIONS {
        rate = rate.max(RATE_FLOOR);
        let (residual, derivative) = evaluate(&terms, rate);

        if residual.abs() < RETURN_SOLVER_TOLERANCE {
            debug!(
                "Return solver converged to {} after {} iterations",
                rate, iteration
            );
            return to_percent(rate);
        }
        if derivative.abs() < RETURN_SOLVER_DERIVATIVE_FLOOR {
            warn!(
                "Return solver derivative vanished at rate {}; keeping best estimate",
                rate
            );
            break;
        }

        let next = rate - residual / derivative;
        if !next.is_finite() {
            warn!("Return solver stepped to a non-finite rate; keeping best estimate");
            break;
        }
        rate = next;
    }

    if rate.is_finite() {
        to_percent(rate.max(RATE_FLOOR))
    } else {
        Decimal::ZERO
    }
}

/// Residual and derivative of the discounted cash-flow equation at `rate`.
fn evaluate(terms: &[(f64, f64)], rate: f64) -> (f64, f64) {
    let base = 1.0 + rate;
    let mut residual = 0.0;
    let mut derivative = 0.0;
    for &(amount, years) in terms {
        residual += amount * base.powf(-years);
        derivative += amount * (-years) * base.powf(-years - 1.0);
    }
    (residual, derivative)
}

fn to_percent(rate: f64) -> Decimal {
    Decimal::from_f64(rate * 100.0).unwrap_or(Decimal::ZERO)
}

/// Simple (non-annualized) return over the measurement period, in percent.
///
/// `(current value + distributions - contributions) / contributions * 100`.
/// Answers a different question than the annualized money-weighted figure;
/// the two are exposed side by side, never conflated.
pub fn simple_return(
    current_value: Decimal,
    distributions: Decimal,
    contributions: Decimal,
) -> Decimal {
    if contributions.is_sign_positive() && !contributions.is_zero() {
        (current_value + distributions - contributions) / contributions * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}
