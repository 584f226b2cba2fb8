//! Recursive factor analysis over a parsed regex tree.

use std::char;

use regex_syntax::{CharClass, ClassRange, Expr, Repeater};

use factor::{alternate, concatenate, Factor};
use tree::Node;

/// Character classes spanning more than this many characters are not
/// enumerated; they collapse to the "any single character" factor.
pub const CHAR_CLASS_LIMIT: usize = 100;

/// Computes the factor quadruple of a parsed expression.
pub fn analyze(expr: &Expr) -> Factor {
    let factor = walk(expr, false).factor;
    debug!("analyze {:?} -> {}", expr, factor);
    factor
}

/// Computes the factor quadruple of every subexpression, returning the
/// annotated tree for rendering. Unlike `analyze`, alternations are
/// never short-circuited, so every child node is present.
pub fn parse_tree(expr: &Expr) -> Node {
    walk(expr, true)
}

fn walk<'a>(expr: &'a Expr, tree: bool) -> Node<'a> {
    match *expr {
        Expr::Empty
        | Expr::StartLine
        | Expr::EndLine
        | Expr::StartText
        | Expr::EndText
        | Expr::WordBoundary
        | Expr::NotWordBoundary
        | Expr::WordBoundaryAscii
        | Expr::NotWordBoundaryAscii => Node::new(Factor::literal(""), expr),
        Expr::Literal { ref chars, casei } => {
            if !casei {
                let literal: String = chars.iter().cloned().collect();
                return Node::new(Factor::literal(&literal), expr);
            }
            let factor = match chars.len() {
                0 => Factor::infinite(),
                1 => folded_char_factor(chars[0]),
                // A longer case-folded literal is the concatenation of
                // its independently folded characters.
                _ => chars.iter().fold(Factor::literal(""), |acc, &c| {
                    concatenate(&acc, &folded_char_factor(c))
                }),
            };
            Node::new(factor, expr)
        }
        Expr::AnyChar | Expr::AnyCharNoNL => Node::new(Factor::any_char(), expr),
        Expr::Group { ref e, .. } => {
            let child = walk(e, tree);
            let mut node = Node::new(child.factor.clone(), expr);
            if tree {
                node.children.push(child);
            }
            node
        }
        Expr::Concat(ref subs) => {
            if subs.is_empty() {
                return Node::new(Factor::infinite(), expr);
            }
            let mut children = Vec::new();
            let mut folded: Option<Factor> = None;
            for sub in subs {
                let child = walk(sub, tree);
                folded = Some(match folded {
                    None => child.factor.clone(),
                    Some(f) => concatenate(&f, &child.factor),
                });
                if tree {
                    children.push(child);
                }
            }
            let mut node = Node::new(folded.unwrap_or_else(Factor::infinite), expr);
            node.children = children;
            node
        }
        Expr::Alternate(ref subs) => {
            if subs.is_empty() {
                return Node::new(Factor::infinite(), expr);
            }
            // A starred branch admits unbounded strings, which drags
            // every component to θ; skip the descent entirely.
            if !tree && subs.iter().any(is_star) {
                return Node::new(Factor::infinite(), expr);
            }
            let mut children = Vec::new();
            let mut folded: Option<Factor> = None;
            for sub in subs {
                let child = walk(sub, tree);
                if !tree && child.factor.is_infinite() {
                    return Node::new(Factor::infinite(), expr);
                }
                folded = Some(match folded {
                    None => child.factor.clone(),
                    Some(f) => alternate(&f, &child.factor),
                });
                if tree {
                    children.push(child);
                }
            }
            let mut node = Node::new(folded.unwrap_or_else(Factor::infinite), expr);
            node.children = children;
            node
        }
        Expr::Repeat { ref e, ref r, .. } => {
            let min = match *r {
                Repeater::ZeroOrOne | Repeater::ZeroOrMore => 0,
                Repeater::OneOrMore => 1,
                Repeater::Range { min, .. } => min,
            };
            if min == 0 {
                // The body may repeat zero times, so nothing it
                // promises survives.
                let mut node = Node::new(Factor::infinite(), expr);
                if tree {
                    node.children.push(walk(e, true));
                }
                return node;
            }
            // At least one copy of the body appears, so its prefix,
            // suffix and fragment obligations hold; only the exact set
            // becomes unbounded.
            let child = walk(e, tree);
            let mut factor = child.factor.clone();
            if !factor.exact.is_infinite() {
                factor.exact.set_infinite();
            }
            let mut node = Node::new(factor, expr);
            if tree {
                node.children.push(child);
            }
            node
        }
        Expr::Class(ref class) => Node::new(class_factor(class), expr),
        // Byte-oriented expressions carry no usable literal text.
        _ => Node::new(Factor::infinite(), expr),
    }
}

fn is_star(expr: &Expr) -> bool {
    match *expr {
        Expr::Repeat {
            r: Repeater::ZeroOrMore,
            ..
        } => true,
        _ => false,
    }
}

/// Factor of a single case-insensitive character: the class of the
/// character and its whole simple-case-fold orbit.
fn folded_char_factor(c: char) -> Factor {
    let class = CharClass::new(vec![ClassRange { start: c, end: c }]).case_fold();
    class_factor(&class)
}

fn class_factor(class: &CharClass) -> Factor {
    if class.is_empty() {
        return Factor::literal("");
    }
    if class.len() == 1 && class[0].start == class[0].end {
        let mut s = String::new();
        s.push(class[0].start);
        return Factor::literal(&s);
    }
    let total: usize = class
        .iter()
        .map(|r| r.end as usize - r.start as usize + 1)
        .sum();
    if total > CHAR_CLASS_LIMIT {
        return Factor::any_char();
    }
    let mut factor = Factor::new();
    for range in class.iter() {
        for cp in range.start as u32..range.end as u32 + 1 {
            if let Some(c) = char::from_u32(cp) {
                let mut s = String::new();
                s.push(c);
                factor.add(&s);
            }
        }
    }
    factor
}
