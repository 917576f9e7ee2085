//! Reading expressions from their constrained text form.
//!
//! The grammar, where `a` and `n` are real literals:
//!
//! ```text
//! unit := a | x | -x | ax | x^n | ax^n
//!       | "(" unit OP unit OP ... OP unit ")"
//! ```
//!
//! A parenthesised group uses a single operator (`+` or `*`) for all of
//! its separators, each written with one space on either side. Mixing
//! `+` and `*` at the same nesting depth has no defined precedence and
//! is rejected outright rather than guessed at.

use crate::expr::Expr;
use smol_str::SmolStr;
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Parse an [`Expr`] tree from some text.
pub fn parse(s: &str) -> Result<Expr, ParseError> {
    if let Some((index, character)) =
        s.char_indices().find(|(_, c)| !c.is_ascii())
    {
        return Err(ParseError::InvalidCharacter { character, index });
    }

    parse_unit(s)
}

// The grammar is unambiguous on sight: a base term contains no operator
// at all, anything else must be a parenthesised group. All indices
// below are byte offsets into ASCII-checked input, so slicing is safe.
fn parse_unit(s: &str) -> Result<Expr, ParseError> {
    if !s.contains('+') && !s.contains('*') {
        parse_monomial(s)
    } else {
        parse_compound(s)
    }
}

fn parse_monomial(s: &str) -> Result<Expr, ParseError> {
    if s.is_empty() {
        return Err(ParseError::EmptyTerm);
    }

    match s.find('x') {
        // a plain constant
        None => Ok(Expr::monomial(parse_number(s)?, 0.0)),
        Some(0) if s.len() == 1 => Ok(Expr::monomial(1.0, 1.0)),
        Some(0) => Ok(Expr::monomial(1.0, parse_degree(&s[1..])?)),
        _ if s == "-x" => Ok(Expr::monomial(-1.0, 1.0)),
        Some(i) => {
            let coefficient = parse_number(&s[..i])?;
            let degree = if i == s.len() - 1 {
                1.0
            } else {
                parse_degree(&s[i + 1..])?
            };
            Ok(Expr::monomial(coefficient, degree))
        },
    }
}

/// Parses the `^n` tail of a monomial.
fn parse_degree(s: &str) -> Result<f64, ParseError> {
    match s.strip_prefix('^') {
        Some(digits) => parse_number(digits),
        None => Err(ParseError::MissingCaret { found: s.into() }),
    }
}

fn parse_number(text: &str) -> Result<f64, ParseError> {
    text.parse()
        .map_err(|_| ParseError::InvalidNumber { text: text.into() })
}

fn parse_compound(s: &str) -> Result<Expr, ParseError> {
    let bytes = s.as_bytes();

    if bytes.first() != Some(&b'(') || bytes.last() != Some(&b')') {
        return Err(ParseError::MalformedCompound);
    }

    // scan for this level's operator: every occurrence of `+` or `*`
    // at nesting depth exactly 1
    let mut op = None;
    let mut positions = Vec::new();
    let mut depth = 0usize;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(ParseError::UnbalancedParens)?;
            },
            b'+' | b'*' if depth == 1 => match op {
                None => {
                    op = Some(b);
                    positions.push(i);
                },
                Some(expected) if expected == b => positions.push(i),
                Some(_) => {
                    return Err(ParseError::MixedOperators { index: i })
                },
            },
            _ => {},
        }
    }

    if depth != 0 {
        return Err(ParseError::UnbalancedParens);
    }

    let op = match op {
        Some(op) => op,
        // an operator exists somewhere (parse_unit saw one), just not
        // at depth 1, e.g. `((x + 1))`
        None => return Err(ParseError::MalformedCompound),
    };

    // each separator is ` OP `, one space either side
    for &i in &positions {
        if i < 2
            || i + 2 >= s.len()
            || bytes[i - 1] != b' '
            || bytes[i + 1] != b' '
        {
            return Err(ParseError::MalformedCompound);
        }
    }

    let mut terms = Vec::with_capacity(positions.len() + 1);
    let mut start = 1;
    for &i in &positions {
        terms.push(&s[start..i - 1]);
        start = i + 2;
    }
    terms.push(&s[start..s.len() - 1]);

    let mut parsed = Vec::with_capacity(terms.len());
    for term in terms {
        if term.is_empty() {
            return Err(ParseError::EmptyTerm);
        }
        parsed.push(parse_unit(term)?);
    }

    Ok(match op {
        b'+' => Expr::Sum(parsed),
        _ => Expr::Product(parsed),
    })
}

/// Possible errors that may occur while parsing.
///
/// Callers that only relay the failure to a user can treat every
/// variant as "incorrect format"; the distinctions exist for tests and
/// diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The input contains a character outside the ASCII grammar.
    InvalidCharacter { character: char, index: usize },
    /// A numeral failed to parse as a real number.
    InvalidNumber { text: SmolStr },
    /// `x` was followed by something other than `^degree`.
    MissingCaret { found: SmolStr },
    /// An operand between two operators (or inside parentheses) was
    /// empty.
    EmptyTerm,
    /// The parentheses did not balance.
    UnbalancedParens,
    /// A group mixed `+` and `*` at the same nesting depth.
    MixedOperators { index: usize },
    /// A string with an operator did not have the `(term OP term)`
    /// shape.
    MalformedCompound,
    /// An equation did not contain exactly one `" = "` separator.
    MissingSeparator,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidCharacter { character, index } => {
                write!(f, "invalid character {:?} at byte {}", character, index)
            },
            ParseError::InvalidNumber { text } => {
                write!(f, "{:?} is not a number", text.as_str())
            },
            ParseError::MissingCaret { found } => {
                write!(f, "expected `^` after `x`, found {:?}", found.as_str())
            },
            ParseError::EmptyTerm => write!(f, "empty operand"),
            ParseError::UnbalancedParens => {
                write!(f, "unbalanced parentheses")
            },
            ParseError::MixedOperators { index } => {
                write!(f, "`+` and `*` mixed at the same depth (byte {})", index)
            },
            ParseError::MalformedCompound => {
                write!(f, "expected `(term OP term OP ...)`")
            },
            ParseError::MissingSeparator => {
                write!(f, "expected exactly one \" = \" separator")
            },
        }
    }
}

impl Error for ParseError {}
