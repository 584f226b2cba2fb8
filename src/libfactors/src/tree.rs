//! Annotated parse tree and its Graphviz rendering.

use std::io::{self, Write};

use regex_syntax::{CharClass, Expr, Repeater};

use factor::Factor;

/// Rendered set text longer than this is cut off in node labels.
const MAX_LABEL_LEN: usize = 30;

/// A node of the analyzed parse tree: the factor quadruple computed for
/// a subexpression, a borrow of that subexpression, and the analyzed
/// children in source order. Owned by its parent; exists only for
/// rendering.
#[derive(Debug)]
pub struct Node<'a> {
    pub factor: Factor,
    pub expr: &'a Expr,
    pub children: Vec<Node<'a>>,
}

impl<'a> Node<'a> {
    pub fn new(factor: Factor, expr: &'a Expr) -> Node<'a> {
        Node {
            factor: factor,
            expr: expr,
            children: Vec::new(),
        }
    }

    /// Writes the tree as an undirected Graphviz graph. Each node is a
    /// record of the subexpression and its four factor sets; operator
    /// nodes are interposed between a node and its children.
    pub fn dot<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "graph regexptree {{")?;
        writeln!(w, "\tdpi=48;")?;
        writeln!(w, "\tnode [shape=record];")?;
        let mut ids = 0;
        self.emit(w, &mut ids)?;
        writeln!(w, "}}")
    }

    fn emit<W: Write>(&self, w: &mut W, ids: &mut usize) -> io::Result<usize> {
        let id = next_id(ids);
        if is_anchor(self.expr) {
            write_circle(w, id, op_label(self.expr))?;
        } else {
            write_record(w, id, self)?;
        }
        if self.children.is_empty() {
            return Ok(id);
        }
        let op = next_id(ids);
        write_circle(w, op, op_label(self.expr))?;
        write_edge(w, id, op)?;
        for child in &self.children {
            if let Expr::Class(_) = *child.expr {
                // bridge node so the class record hangs below a small
                // operator circle instead of inline with its siblings
                let bridge = next_id(ids);
                write_circle(w, bridge, op_label(child.expr))?;
                write_edge(w, op, bridge)?;
                let child_id = child.emit(w, ids)?;
                write_edge(w, bridge, child_id)?;
            } else {
                let child_id = child.emit(w, ids)?;
                write_edge(w, op, child_id)?;
            }
        }
        Ok(id)
    }
}

fn next_id(ids: &mut usize) -> usize {
    let id = *ids;
    *ids += 1;
    id
}

fn write_record<W: Write>(w: &mut W, id: usize, node: &Node) -> io::Result<()> {
    writeln!(
        w,
        "\t\"n{}\" [label=\"{{ {} |{{ {} | {} | {} | {} }}}}\"];",
        id,
        escape(&expr_text(node.expr)),
        escape(&abbreviate(&node.factor.exact.to_string())),
        escape(&abbreviate(&node.factor.prefix.to_string())),
        escape(&abbreviate(&node.factor.suffix.to_string())),
        escape(&abbreviate(&node.factor.fragment.to_string()))
    )
}

fn write_circle<W: Write>(w: &mut W, id: usize, label: &str) -> io::Result<()> {
    writeln!(
        w,
        "\t\"n{}\" [shape=doublecircle, label=\"{}\"];",
        id,
        escape(label)
    )
}

fn write_edge<W: Write>(w: &mut W, from: usize, to: usize) -> io::Result<()> {
    writeln!(w, "\t\"n{}\" -- \"n{}\";", from, to)
}

fn is_anchor(expr: &Expr) -> bool {
    match *expr {
        Expr::StartLine | Expr::EndLine | Expr::StartText | Expr::EndText => true,
        _ => false,
    }
}

fn op_label(expr: &Expr) -> &'static str {
    match *expr {
        Expr::Empty => "empty",
        Expr::Literal { .. } | Expr::LiteralBytes { .. } => "lit",
        Expr::AnyChar | Expr::AnyCharNoNL | Expr::AnyByte | Expr::AnyByteNoNL => "any",
        Expr::Class(_) | Expr::ClassBytes(_) => "class",
        Expr::StartLine => "^",
        Expr::EndLine => "$",
        Expr::StartText => "\\A",
        Expr::EndText => "\\z",
        Expr::WordBoundary | Expr::WordBoundaryAscii => "\\b",
        Expr::NotWordBoundary | Expr::NotWordBoundaryAscii => "\\B",
        Expr::Group { .. } => "()",
        Expr::Repeat { ref r, .. } => match *r {
            Repeater::ZeroOrOne => "?",
            Repeater::ZeroOrMore => "*",
            Repeater::OneOrMore => "+",
            Repeater::Range { .. } => "{m,n}",
        },
        Expr::Concat(_) => "concat",
        Expr::Alternate(_) => "|",
    }
}

/// Approximate source text of a subexpression, for node labels.
fn expr_text(expr: &Expr) -> String {
    match *expr {
        Expr::Empty => String::new(),
        Expr::Literal { ref chars, casei } => {
            let s: String = chars.iter().cloned().collect();
            if casei {
                format!("(?i:{})", s)
            } else {
                s
            }
        }
        Expr::AnyChar => String::from("(?s:.)"),
        Expr::AnyCharNoNL => String::from("."),
        Expr::Class(ref class) => class_text(class),
        Expr::StartLine => String::from("^"),
        Expr::EndLine => String::from("$"),
        Expr::StartText => String::from("\\A"),
        Expr::EndText => String::from("\\z"),
        Expr::WordBoundary | Expr::WordBoundaryAscii => String::from("\\b"),
        Expr::NotWordBoundary | Expr::NotWordBoundaryAscii => String::from("\\B"),
        Expr::Group { ref e, .. } => format!("({})", expr_text(e)),
        Expr::Repeat {
            ref e,
            ref r,
            greedy,
        } => {
            let suffix = match *r {
                Repeater::ZeroOrOne => String::from("?"),
                Repeater::ZeroOrMore => String::from("*"),
                Repeater::OneOrMore => String::from("+"),
                Repeater::Range { min, max: None } => format!("{{{},}}", min),
                Repeater::Range {
                    min,
                    max: Some(max),
                } => format!("{{{},{}}}", min, max),
            };
            let lazy = if greedy { "" } else { "?" };
            format!("{}{}{}", expr_text(e), suffix, lazy)
        }
        Expr::Concat(ref subs) => subs.iter().map(expr_text).collect::<Vec<_>>().join(""),
        Expr::Alternate(ref subs) => subs.iter().map(expr_text).collect::<Vec<_>>().join("|"),
        _ => String::from("<bytes>"),
    }
}

fn class_text(class: &CharClass) -> String {
    let mut s = String::from("[");
    for range in class.iter() {
        s.push(range.start);
        if range.end != range.start {
            s.push('-');
            s.push(range.end);
        }
    }
    s.push(']');
    s
}

/// Prefixes `\` to the characters Graphviz record labels reserve.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' | '|' | '"' | '{' | '}' | '[' | ']' => out.push('\\'),
            _ => {}
        }
        out.push(c);
    }
    out
}

/// Cuts a label at the first char boundary past the length cap,
/// closing the brace so the record still reads as a set.
fn abbreviate(s: &str) -> String {
    if s.len() <= MAX_LABEL_LEN {
        return s.to_string();
    }
    for (i, _) in s.char_indices() {
        if i > MAX_LABEL_LEN {
            return format!("{}...}}", &s[..i]);
        }
    }
    s.to_string()
}
