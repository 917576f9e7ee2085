//! Closed-form solving for equations of degree at most two.

use crate::{
    equation::Equation,
    expr::Expr,
    simplify::accumulate,
    trace::{Snapshot, Trace},
};
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    mem,
};

/// The outcome of solving an [`Equation`].
#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
    /// Finitely many real roots: rounded, sorted ascending, and
    /// deduplicated. An empty list means the equation has no real
    /// solution.
    Roots(Vec<f64>),

    /// The equation is an identity; every value of `x` satisfies it.
    Infinite,

    /// The canonical polynomial has a degree outside `{0, 1, 2}`, which
    /// this solver has no closed form for.
    Unsupported,
}

/// Internal invariant violations surfaced by [`Equation::solve`].
///
/// These indicate a bug in the simplifier rather than malformed input:
/// simplification guarantees that both sides reduce to a monomial or a
/// sum of monomials before any term is migrated.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// A side survived simplification as something other than a
    /// monomial or a sum of monomials.
    NonCanonicalSide,
}

impl Display for SolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::NonCanonicalSide => {
                write!(f, "a side failed to reduce to a sum of monomials")
            },
        }
    }
}

impl Error for SolveError {}

impl Equation {
    /// Solve for `x`, rounding every root to `digits` decimal places.
    ///
    /// Rounding is half away from zero (the [`f64::round`] rule), and a
    /// root of `-0` is normalised to plain `0`.
    ///
    /// Also returns the solve trace: the merged starting equation, the
    /// full simplification trace of each side, the merged simplified
    /// equation, and finally the merged equation after every term has
    /// moved to the left.
    pub fn solve(
        mut self,
        digits: u32,
    ) -> Result<(Solution, Trace), SolveError> {
        let mut trace = vec![self.merged_snapshot()];

        trace.extend(self.left.simplify());
        trace.extend(self.right.simplify());
        trace.push(self.merged_snapshot());

        self.migrate_terms()?;
        // collect the like terms the migration just introduced; this
        // pass is bookkeeping, so its sub-trace is not recorded
        let _ = self.left.simplify();
        trace.push(self.merged_snapshot());

        let coeff_by_deg = classify(&self.left)?;
        Ok((solve_classified(&coeff_by_deg, digits), trace))
    }

    fn merged_snapshot(&self) -> Snapshot {
        Snapshot::merge(&self.left.snapshot(0), &self.right.snapshot(0), "=")
    }

    /// Move every term of the (simplified) right side over to the left
    /// with its sign flipped, leaving the zero monomial on the right.
    fn migrate_terms(&mut self) -> Result<(), SolveError> {
        if self.left.is_monomial() {
            let left = mem::replace(&mut self.left, Expr::monomial(0.0, 0.0));
            self.left = Expr::Sum(vec![left]);
        }

        let right = mem::replace(&mut self.right, Expr::monomial(0.0, 0.0));
        let terms = match &mut self.left {
            Expr::Sum(terms) => terms,
            // a monomial was wrapped above, so only a product that the
            // simplifier could not reduce lands here
            _ => return Err(SolveError::NonCanonicalSide),
        };

        match right {
            Expr::Monomial { coefficient, degree } => {
                terms.push(Expr::monomial(-coefficient, degree));
            },
            Expr::Sum(right_terms) => {
                for term in right_terms {
                    match term {
                        Expr::Monomial { coefficient, degree } => {
                            terms.push(Expr::monomial(-coefficient, degree));
                        },
                        _ => return Err(SolveError::NonCanonicalSide),
                    }
                }
            },
            Expr::Product(_) => return Err(SolveError::NonCanonicalSide),
        }

        Ok(())
    }
}

/// The degree-to-coefficient map of the canonical left side.
fn classify(left: &Expr) -> Result<Vec<(f64, f64)>, SolveError> {
    let mut coeff_by_deg = Vec::new();

    match left {
        Expr::Monomial { coefficient, degree } => {
            accumulate(&mut coeff_by_deg, *degree, *coefficient);
        },
        Expr::Sum(terms) => {
            for term in terms {
                match *term {
                    Expr::Monomial { coefficient, degree } => {
                        accumulate(&mut coeff_by_deg, degree, coefficient);
                    },
                    _ => return Err(SolveError::NonCanonicalSide),
                }
            }
        },
        Expr::Product(_) => return Err(SolveError::NonCanonicalSide),
    }

    Ok(coeff_by_deg)
}

fn solve_classified(coeff_by_deg: &[(f64, f64)], digits: u32) -> Solution {
    let coefficient_at = |degree: f64| {
        coeff_by_deg
            .iter()
            .find(|(d, _)| *d == degree)
            .map(|(_, c)| *c)
    };

    if coeff_by_deg
        .iter()
        .any(|(d, _)| *d != 0.0 && *d != 1.0 && *d != 2.0)
    {
        return Solution::Unsupported;
    }

    if let Some(a) = coefficient_at(2.0) {
        let b = coefficient_at(1.0).unwrap_or(0.0);
        let c = coefficient_at(0.0).unwrap_or(0.0);
        let discriminant = b * b - 4.0 * a * c;

        if discriminant < 0.0 {
            return Solution::Roots(Vec::new());
        }

        let root = discriminant.sqrt();
        return roots(vec![
            round_to((-b + root) / (2.0 * a), digits),
            round_to((-b - root) / (2.0 * a), digits),
        ]);
    }

    if let Some(a) = coefficient_at(1.0) {
        let c = coefficient_at(0.0).unwrap_or(0.0);
        return roots(vec![round_to(-c / a, digits)]);
    }

    match coefficient_at(0.0) {
        Some(a) if a != 0.0 => Solution::Roots(Vec::new()),
        // `0 = 0`, or no terms at all
        _ => Solution::Infinite,
    }
}

fn roots(mut values: Vec<f64>) -> Solution {
    for value in values.iter_mut() {
        // IEEE -0 would print as "-0"
        if *value == 0.0 {
            *value = 0.0;
        }
    }
    values.sort_by(f64::total_cmp);
    values.dedup();

    Solution::Roots(values)
}

fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (value * scale).round() / scale
}
