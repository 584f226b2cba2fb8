//! Literal factor extraction for regular expressions.
//!
//! Any string matching a regex must contain certain literal substrings
//! in certain positions. This crate computes four such "factor" sets
//! from a parsed `regex_syntax::Expr`:
//!
//! - `exact`: every string the expression can match, when finite;
//! - `prefix`: literals every match begins with;
//! - `suffix`: literals every match ends with;
//! - `fragment`: literals every match contains somewhere.
//!
//! A component that cannot be bounded is marked with the infinite
//! sentinel θ. The sets feed multi-pattern literal filters (trigram
//! indexes, Aho-Corasick) that discard candidates long before the real
//! regex engine runs.

#[macro_use]
extern crate log;
extern crate regex_syntax;

pub mod analyze;
pub mod factor;
pub mod set;
pub mod tree;

pub use analyze::{analyze, parse_tree, CHAR_CLASS_LIMIT};
pub use factor::{alternate, concatenate, Factor};
pub use set::{best, cross, union, Set};
pub use tree::Node;
