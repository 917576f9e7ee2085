use crate::{
    expr::Expr,
    parse::{parse, ParseError},
};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// The two sides of `left = right`.
///
/// Solving consumes the equation: both sides are simplified in place,
/// then every term migrates to the left until the right side is the
/// bare zero monomial.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    pub(crate) left: Expr,
    pub(crate) right: Expr,
}

impl Equation {
    pub fn new(left: Expr, right: Expr) -> Self {
        Equation { left, right }
    }
}

impl FromStr for Equation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut halves = s.split(" = ");

        match (halves.next(), halves.next(), halves.next()) {
            (Some(left), Some(right), None) => {
                Ok(Equation::new(parse(left)?, parse(right)?))
            },
            _ => Err(ParseError::MissingSeparator),
        }
    }
}

impl Display for Equation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_an_equation() {
        let got: Equation = "(2x + x + 1) = (2x * x * 3)".parse().unwrap();

        assert_eq!(got.to_string(), "(2x + x + 1) = (2x * x * 3)");
    }

    #[test]
    fn both_sides_can_be_bare_monomials() {
        let got: Equation = "7 = 7".parse().unwrap();

        assert_eq!(
            got,
            Equation::new(
                Expr::monomial(7.0, 0.0),
                Expr::monomial(7.0, 0.0)
            )
        );
    }

    #[test]
    fn missing_separator_is_rejected() {
        let got = "(x + 1)".parse::<Equation>().unwrap_err();
        assert_eq!(got, ParseError::MissingSeparator);
    }

    #[test]
    fn doubled_separator_is_rejected() {
        let got = "1 = 2 = 3".parse::<Equation>().unwrap_err();
        assert_eq!(got, ParseError::MissingSeparator);
    }

    #[test]
    fn parse_failures_bubble_up_from_either_side() {
        assert!("(x + ] = 0".parse::<Equation>().is_err());
        assert!("0 = (x +".parse::<Equation>().is_err());
    }
}
