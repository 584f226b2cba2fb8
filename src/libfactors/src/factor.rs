//! The factor quadruple and its composition operators.

use std::fmt;

use set::{best, cross, union, Set};

/// Literal factors of a regular expression: the strings any match must
/// equal (`exact`), begin with (`prefix`), end with (`suffix`) or
/// contain somewhere (`fragment`). Each component carries its own
/// infinity state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Factor {
    pub exact: Set,
    pub prefix: Set,
    pub suffix: Set,
    pub fragment: Set,
}

impl Factor {
    /// All four components empty.
    pub fn new() -> Factor {
        Factor::default()
    }

    /// Every component is the singleton `{literal}`.
    pub fn literal(literal: &str) -> Factor {
        let mut ret = Factor::new();
        ret.add(literal);
        ret
    }

    /// Every component is θ.
    pub fn infinite() -> Factor {
        Factor {
            exact: Set::infinite(),
            prefix: Set::infinite(),
            suffix: Set::infinite(),
            fragment: Set::infinite(),
        }
    }

    /// Factor of `.`: the match is some single character, so the only
    /// prefix/suffix/fragment that can be promised is the empty string,
    /// and the exact set is unbounded.
    pub fn any_char() -> Factor {
        let mut ret = Factor::literal("");
        ret.exact.set_infinite();
        ret
    }

    /// Inserts a literal into all four components.
    pub fn add(&mut self, literal: &str) {
        self.exact.add(literal);
        self.prefix.add(literal);
        self.suffix.add(literal);
        self.fragment.add(literal);
    }

    /// True iff all four components are θ.
    pub fn is_infinite(&self) -> bool {
        self.exact.is_infinite()
            && self.prefix.is_infinite()
            && self.suffix.is_infinite()
            && self.fragment.is_infinite()
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "<exact:{}, prefix:{}, suffix:{}, fragment:{}>",
            self.exact, self.prefix, self.suffix, self.fragment
        )
    }
}

/// Factor of `a|b`: every component is the union of the corresponding
/// components.
pub fn alternate(a: &Factor, b: &Factor) -> Factor {
    Factor {
        exact: union(&a.exact, &b.exact),
        prefix: union(&a.prefix, &b.prefix),
        suffix: union(&a.suffix, &b.suffix),
        fragment: union(&a.fragment, &b.fragment),
    }
}

/// Factor of `a·b`.
///
/// The prefix of the concatenation is either a prefix of `a` alone, or
/// the whole of `a` followed by a prefix of `b` — whichever carries the
/// longer minimum literal. Symmetric for the suffix. A fragment can sit
/// inside `a`, inside `b`, or straddle the join as suffix(a)·prefix(b).
pub fn concatenate(a: &Factor, b: &Factor) -> Factor {
    let exact = cross(&a.exact, &b.exact);

    let mut ep = cross(&a.exact, &b.prefix);
    ep.drop_redundant_prefix();
    let prefix = best(a.prefix.clone(), vec![ep]);

    let mut se = cross(&a.suffix, &b.exact);
    se.drop_redundant_suffix();
    let suffix = best(b.suffix.clone(), vec![se]);

    let mut sp = cross(&a.suffix, &b.prefix);
    sp.drop_redundant_fragment();
    let fragment = best(a.fragment.clone(), vec![b.fragment.clone(), sp]);

    Factor {
        exact: exact,
        prefix: prefix,
        suffix: suffix,
        fragment: fragment,
    }
}
