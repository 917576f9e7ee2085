//! The tree-rewriting simplifier.
//!
//! [`Expr::simplify`] expands products over sums and collects like
//! terms until the expression is a canonical sum of monomials with
//! pairwise-distinct degrees, or a single monomial. The rewrite happens
//! in place, and every stage is bracketed by [`Snapshot`]s so a
//! renderer can replay the derivation afterwards.
//!
//! [`Snapshot`]: crate::trace::Snapshot

use crate::{expr::Expr, trace::Trace};
use std::mem;

impl Expr {
    /// Rewrite this expression into canonical form in place.
    ///
    /// Returns the chronological snapshots taken along the way: each
    /// sum or product contributes one snapshot before and one after its
    /// own rewrite, with the sub-traces of its children in between. A
    /// bare monomial is already canonical and yields a single-snapshot
    /// trace.
    pub fn simplify(&mut self) -> Trace {
        match self {
            Expr::Monomial { .. } => vec![self.snapshot(0)],
            Expr::Sum(_) => self.simplify_sum(),
            Expr::Product(_) => self.simplify_product(),
        }
    }

    fn simplify_sum(&mut self) -> Trace {
        let mut trace = vec![self.snapshot(0)];

        let replacement = {
            let terms = match self {
                Expr::Sum(terms) => terms,
                _ => unreachable!("simplify_sum is only called on sums"),
            };

            for term in terms.iter_mut() {
                trace.extend(term.simplify());
            }

            // inline nested sums so collection sees every monomial
            let mut flat = Vec::with_capacity(terms.len());
            for term in mem::take(terms) {
                flatten_sum(term, &mut flat);
            }
            *terms = flat;

            let mut coeff_by_deg = Vec::new();
            terms.retain(|term| match *term {
                Expr::Monomial { coefficient, degree } => {
                    accumulate(&mut coeff_by_deg, degree, coefficient);
                    false
                },
                _ => true,
            });

            for (degree, coefficient) in coeff_by_deg {
                if coefficient != 0.0 {
                    terms.push(Expr::monomial(coefficient, degree));
                }
            }

            if terms.is_empty() {
                // every term cancelled
                Some(Expr::monomial(0.0, 0.0))
            } else {
                promote_single_monomial(terms)
            }
        };

        if let Some(expr) = replacement {
            *self = expr;
        }

        trace.push(self.snapshot(0));
        trace
    }

    fn simplify_product(&mut self) -> Trace {
        let mut trace = vec![self.snapshot(0)];

        if let Some(sum) = self.distribute() {
            // the product became a sum of smaller products; simplifying
            // that sum distributes again if more sums remain inside
            *self = sum;
            trace.extend(self.simplify());
            return trace;
        }

        let replacement = {
            let factors = match self {
                Expr::Product(factors) => factors,
                _ => unreachable!("simplify_product is only called on products"),
            };

            let mut coefficient = 1.0;
            let mut degree = 0.0;
            let mut kept = Vec::new();

            for factor in mem::take(factors) {
                if coefficient == 0.0 {
                    // a zero factor annihilates everything after it
                    continue;
                }
                match factor {
                    Expr::Monomial { coefficient: c, degree: d } => {
                        coefficient *= c;
                        degree += d;
                    },
                    other => kept.push(other),
                }
            }

            if coefficient == 0.0 {
                Some(Expr::monomial(0.0, 0.0))
            } else {
                // the multiplicative identity is only worth keeping
                // when nothing else survived
                if !(coefficient == 1.0 && degree == 0.0 && !kept.is_empty())
                {
                    kept.push(Expr::monomial(coefficient, degree));
                }
                *factors = kept;
                promote_single_monomial(factors)
            }
        };

        if let Some(expr) = replacement {
            *self = expr;
        }

        trace.push(self.snapshot(0));
        trace
    }

    /// If any factor is a sum, remove the first one and distribute the
    /// remaining factors over its terms, returning the resulting sum of
    /// products. Returns `None` when no factor is a sum.
    fn distribute(&mut self) -> Option<Expr> {
        let factors = match self {
            Expr::Product(factors) => factors,
            _ => return None,
        };

        let i = factors.iter().position(|f| matches!(f, Expr::Sum(_)))?;
        let addends = match factors.remove(i) {
            Expr::Sum(addends) => addends,
            _ => unreachable!("position() found a sum at this index"),
        };
        let rest = mem::take(factors);

        Some(Expr::Sum(
            addends
                .into_iter()
                .map(|addend| {
                    let mut product = rest.clone();
                    product.push(addend);
                    Expr::Product(product)
                })
                .collect(),
        ))
    }
}

fn flatten_sum(term: Expr, out: &mut Vec<Expr>) {
    match term {
        Expr::Sum(terms) => {
            for term in terms {
                flatten_sum(term, out);
            }
        },
        other => out.push(other),
    }
}

/// A term list that has shrunk to a single monomial replaces its parent
/// node outright, so `(3x)` and `3x` are the same expression.
fn promote_single_monomial(terms: &mut Vec<Expr>) -> Option<Expr> {
    if terms.len() == 1 && terms[0].is_monomial() {
        Some(terms.remove(0))
    } else {
        None
    }
}

/// Adds `coefficient` into the entry for `degree`, keying on exact
/// float equality. Entries keep the order in which their degree first
/// appeared.
pub(crate) fn accumulate(
    coeff_by_deg: &mut Vec<(f64, f64)>,
    degree: f64,
    coefficient: f64,
) {
    match coeff_by_deg.iter_mut().find(|(d, _)| *d == degree) {
        Some((_, c)) => *c += coefficient,
        None => coeff_by_deg.push((degree, coefficient)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn simplified(s: &str) -> Expr {
        let mut expr = parse(s).unwrap();
        expr.simplify();
        expr
    }

    /// The degree-to-coefficient mapping of a canonical expression.
    fn degree_map(expr: &Expr) -> Vec<(f64, f64)> {
        let mut map = Vec::new();
        match expr {
            Expr::Monomial { coefficient, degree } => {
                accumulate(&mut map, *degree, *coefficient);
            },
            Expr::Sum(terms) => {
                for term in terms {
                    match *term {
                        Expr::Monomial { coefficient, degree } => {
                            accumulate(&mut map, degree, coefficient);
                        },
                        _ => panic!("non-monomial in canonical sum: {}", term),
                    }
                }
            },
            Expr::Product(_) => panic!("canonical form contains a product"),
        }
        map.sort_by(|a, b| a.0.total_cmp(&b.0));
        map
    }

    #[test]
    fn collect_like_terms() {
        let got = simplified("(2x + x + 1 + 0)");
        assert_eq!(got.to_string(), "(3x + 1)");
    }

    #[test]
    fn collect_factors_multiplies_coefficients_and_adds_degrees() {
        let mut product =
            Expr::monomial(2.0, 1.0) * Expr::monomial(3.0, 2.0);
        product.simplify();

        assert_eq!(product, Expr::monomial(6.0, 3.0));
    }

    #[test]
    fn product_of_monomials_promotes_to_a_monomial() {
        let got = simplified("(2x * x * 3 * 1)");
        assert_eq!(got, Expr::monomial(6.0, 2.0));
    }

    #[test]
    fn distribution() {
        let got = simplified("((x + 1) * (x + 1))");
        assert_eq!(
            degree_map(&got),
            vec![(0.0, 1.0), (1.0, 2.0), (2.0, 1.0)]
        );
        assert_eq!(got.to_string(), "(x^2 + 2x + 1)");
    }

    #[test]
    fn difference_of_squares() {
        let got = simplified("((x + -1) * (x + 1))");
        assert_eq!(degree_map(&got), vec![(0.0, -1.0), (2.0, 1.0)]);
    }

    #[test]
    fn like_terms_cancel_to_the_zero_monomial() {
        let mut sum = Expr::Sum(vec![
            Expr::monomial(1.0, 1.0),
            Expr::monomial(-1.0, 0.0) * Expr::monomial(1.0, 1.0),
        ]);
        sum.simplify();

        assert_eq!(sum, Expr::monomial(0.0, 0.0));
    }

    #[test]
    fn zero_factor_short_circuits_the_product() {
        let mut product = Expr::Product(vec![
            Expr::monomial(2.0, 1.0),
            Expr::monomial(0.0, 0.0),
            Expr::monomial(5.0, 3.0),
        ]);
        product.simplify();

        assert_eq!(product, Expr::monomial(0.0, 0.0));
    }

    #[test]
    fn lone_multiplicative_identity_is_materialised() {
        let got = simplified("(1 * 1)");
        assert_eq!(got, Expr::monomial(1.0, 0.0));
    }

    #[test]
    fn nested_sums_flatten() {
        let got = simplified("((x + 1) + (x + 2))");
        assert_eq!(got.to_string(), "(2x + 3)");
    }

    #[test]
    fn simplify_is_idempotent() {
        let mut expr = simplified("((x + 3) * (x + 3))");
        let canonical = expr.clone();

        expr.simplify();

        assert_eq!(expr, canonical);
    }

    #[test]
    fn monomial_trace_is_a_single_snapshot() {
        let mut expr = Expr::monomial(6.0, 2.0);
        let trace = expr.simplify();

        assert_eq!(trace.len(), 1);
        assert_eq!(trace[0], expr.snapshot(0));
    }

    #[test]
    fn sum_trace_starts_and_ends_with_the_sum() {
        let mut expr = parse("(2x + x + 1)").unwrap();
        let before = expr.snapshot(0);

        let trace = expr.simplify();

        // before, one snapshot per monomial child, after
        assert_eq!(trace.len(), 5);
        assert_eq!(trace[0], before);
        assert_eq!(trace[trace.len() - 1], expr.snapshot(0));
    }

    #[test]
    fn parse_render_round_trip() {
        for src in &["(3x + 1)", "6x^2", "(x^2 + 2x + 1)", "-7", "(0.5x + 2.25)"] {
            let expr = simplified(src);
            let reparsed = simplified(&expr.to_string());
            assert_eq!(degree_map(&reparsed), degree_map(&expr), "{}", src);
        }
    }
}
