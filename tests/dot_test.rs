extern crate regex_syntax;

extern crate libfactors;

use regex_syntax::Expr;

use libfactors::parse_tree;

fn dot_for(pattern: &str) -> String {
    let expr = match Expr::parse(pattern) {
        Ok(e) => e,
        Err(e) => panic!("failed to parse `{}`: {}", pattern, e),
    };
    let root = parse_tree(&expr);
    let mut buf = Vec::new();
    root.dot(&mut buf).expect("writing to a Vec cannot fail");
    String::from_utf8(buf).expect("dot output is utf-8")
}

#[test]
fn test_dot_frame() {
    let dot = dot_for(r"ab");
    assert!(dot.starts_with("graph regexptree {\n"));
    assert!(dot.ends_with("}\n"));
    assert!(dot.contains("node [shape=record];"));
}

#[test]
fn test_leaf_record_carries_factor_sets() {
    let dot = dot_for(r"ab");
    // a literal leaf shows the same singleton in all four positions
    assert!(dot.contains("ab |{ \\{ab\\} | \\{ab\\} | \\{ab\\} | \\{ab\\} }"));
}

#[test]
fn test_operator_nodes_interpose_between_parent_and_children() {
    let dot = dot_for(r"a|b");
    assert!(dot.contains("doublecircle"));
    assert!(dot.contains("label=\"\\|\""));
    assert!(dot.contains(" -- "));
}

#[test]
fn test_char_class_gets_bridge_node() {
    let dot = dot_for(r"X[abc]Y");
    assert!(dot.contains("label=\"class\""));
    assert!(dot.contains("\\[a-c\\]"));
}

#[test]
fn test_anchors_render_as_operator_circles() {
    let dot = dot_for(r"(?m)^a");
    assert!(dot.contains("[shape=doublecircle, label=\"^\"];"));
}

#[test]
fn test_infinite_sets_render_as_theta() {
    let dot = dot_for(r"a+");
    assert!(dot.contains("θ"));
}

#[test]
fn test_long_set_labels_are_abbreviated() {
    let dot = dot_for(r"abcdefghij|klmnopqrst|uvwxyz0123");
    assert!(dot.contains("...\\}"));
}
