/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Quantity threshold for significant positions
pub const QUANTITY_THRESHOLD: &str = "0.00000001";

/// Day-count divisor for annualizing cash-flow intervals.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Starting guess for the money-weighted return iteration.
pub const RETURN_SOLVER_SEED: f64 = 0.1;

/// Residual below which the return solver accepts the current rate.
pub const RETURN_SOLVER_TOLERANCE: f64 = 1e-7;

/// Derivative magnitude below which the return solver cannot make progress.
pub const RETURN_SOLVER_DERIVATIVE_FLOOR: f64 = 1e-9;

/// Iteration cap for the return solver.
pub const RETURN_SOLVER_MAX_ITERATIONS: u32 = 50;
