use std::{
    fmt::{self, Display, Formatter},
    ops::{Add, Mul, Neg},
};

/// A polynomial expression in a single unknown, `x`.
///
/// Expressions form a tree: the interior nodes are n-ary sums and
/// products, the leaves are monomials `a*x^n`. Every node owns its
/// children outright, so the simplifier can rewrite any subtree in
/// place without aliasing hazards. A node's variant is not fixed for
/// its lifetime: simplification may overwrite a [`Expr::Sum`] slot with
/// the single [`Expr::Monomial`] it reduced to.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `coefficient * x^degree`. A degree of zero makes this a plain
    /// constant.
    Monomial { coefficient: f64, degree: f64 },

    /// The sum of the contained terms.
    Sum(Vec<Expr>),

    /// The product of the contained factors.
    Product(Vec<Expr>),
}

impl Expr {
    /// The monomial `coefficient * x^degree`.
    pub fn monomial(coefficient: f64, degree: f64) -> Self {
        Expr::Monomial { coefficient, degree }
    }

    pub(crate) fn is_monomial(&self) -> bool {
        matches!(self, Expr::Monomial { .. })
    }
}

/// Renders the canonical textual form, which [`crate::parse()`]
/// accepts back.
///
/// Monomials print as `a`, `ax`, or `ax^n`, with unit coefficients
/// omitted (`x`, `-x`) and whole-number floats printed without a
/// decimal point. Sums and products parenthesise their operator-joined
/// children. Children are ordered for display only: monomials first in
/// nonincreasing degree, then products, then sums, with ties left in
/// encounter order. The underlying term lists are never reordered.
impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Monomial { coefficient, degree } => {
                write_monomial(*coefficient, *degree, f)
            },
            Expr::Sum(terms) => write_compound(terms, " + ", f),
            Expr::Product(factors) => write_compound(factors, " * ", f),
        }
    }
}

fn write_monomial(
    coefficient: f64,
    degree: f64,
    f: &mut Formatter<'_>,
) -> fmt::Result {
    if degree == 0.0 {
        return write!(f, "{}", coefficient);
    }

    if coefficient == -1.0 {
        write!(f, "-")?;
    } else if coefficient != 1.0 {
        write!(f, "{}", coefficient)?;
    }

    if degree == 1.0 {
        write!(f, "x")
    } else {
        write!(f, "x^{}", degree)
    }
}

fn write_compound(
    terms: &[Expr],
    joiner: &str,
    f: &mut Formatter<'_>,
) -> fmt::Result {
    let mut ordered: Vec<&Expr> = terms.iter().collect();
    ordered.sort_by(|a, b| {
        let (class_a, degree_a) = display_rank(a);
        let (class_b, degree_b) = display_rank(b);
        class_b
            .cmp(&class_a)
            .then(degree_b.total_cmp(&degree_a))
    });

    write!(f, "(")?;
    let mut iter = ordered.into_iter();
    if let Some(term) = iter.next() {
        write!(f, "{}", term)?;
        for term in iter {
            write!(f, "{}{}", joiner, term)?;
        }
    }
    write!(f, ")")
}

/// Display priority of a child node. Higher ranks print first; the
/// sort is stable so equal ranks keep their encounter order.
fn display_rank(expr: &Expr) -> (u8, f64) {
    match expr {
        Expr::Monomial { degree, .. } => (2, *degree),
        Expr::Product(_) => (1, 0.0),
        Expr::Sum(_) => (0, 0.0),
    }
}

// Operator overloads for building unsimplified trees. Nothing here
// combines coefficients; sums and products are merely flattened into a
// single term list where possible.

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        match (self, rhs) {
            (Expr::Sum(mut terms), Expr::Sum(rhs_terms)) => {
                terms.extend(rhs_terms);
                Expr::Sum(terms)
            },
            (Expr::Sum(mut terms), other) => {
                terms.push(other);
                Expr::Sum(terms)
            },
            (other, Expr::Sum(mut terms)) => {
                terms.insert(0, other);
                Expr::Sum(terms)
            },
            (lhs, rhs) => Expr::Sum(vec![lhs, rhs]),
        }
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        match (self, rhs) {
            (Expr::Product(mut factors), Expr::Product(rhs_factors)) => {
                factors.extend(rhs_factors);
                Expr::Product(factors)
            },
            (Expr::Product(mut factors), other) => {
                factors.push(other);
                Expr::Product(factors)
            },
            (other, Expr::Product(mut factors)) => {
                factors.insert(0, other);
                Expr::Product(factors)
            },
            (lhs, rhs) => Expr::Product(vec![lhs, rhs]),
        }
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        match self {
            Expr::Monomial { coefficient, degree } => {
                Expr::monomial(-coefficient, degree)
            },
            Expr::Product(mut factors) => {
                factors.insert(0, Expr::monomial(-1.0, 0.0));
                Expr::Product(factors)
            },
            other => Expr::Product(vec![Expr::monomial(-1.0, 0.0), other]),
        }
    }
}
