//! A symbolic solver for single-variable polynomial equations.
//!
//! An equation is written in a small fully-parenthesised grammar, e.g.
//! `(2x + x + 1) = (2x * x * 3)`. Both sides are parsed into [`Expr`]
//! trees, symbolically expanded into a canonical sum of monomials, and
//! the resulting polynomial (degree at most two) is solved in closed
//! form.
//!
//! Every intermediate rewrite is captured as a [`Snapshot`], a plain
//! edges-plus-labels tree, and the ordered list of snapshots is handed
//! back so an external renderer can replay the whole derivation step by
//! step.

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

mod equation;
mod expr;
mod parse;
mod simplify;
mod solve;
mod trace;

pub use equation::Equation;
pub use expr::Expr;
pub use parse::{parse, ParseError};
pub use solve::{Solution, SolveError};
pub use trace::{Snapshot, Trace};
