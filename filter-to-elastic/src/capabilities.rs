//! Which filter kinds translate without residual in-memory filtering.

use ogc_filter::{Expression, Filter, FilterKind};
use std::collections::BTreeSet;
use strum::IntoEnumIterator;

const UNSUPPORTED: &[FilterKind] = &[
    FilterKind::PropertyIsNil,
    FilterKind::Crosses,
    FilterKind::Touches,
    FilterKind::Overlaps,
    FilterKind::Equals,
    FilterKind::Meets,
    FilterKind::MetBy,
    FilterKind::TOverlaps,
    FilterKind::OverlappedBy,
    FilterKind::AnyInteracts,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    supported: BTreeSet<FilterKind>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            supported: FilterKind::iter()
                .filter(|kind| !UNSUPPORTED.contains(kind))
                .collect(),
        }
    }
}

impl Capabilities {
    pub fn with(mut self, kind: FilterKind) -> Self {
        self.supported.insert(kind);
        self
    }

    pub fn without(mut self, kind: FilterKind) -> Self {
        self.supported.remove(&kind);
        self
    }

    pub fn supports(&self, kind: FilterKind) -> bool {
        self.supported.contains(&kind)
    }

    /// True when every node of `filter` is a supported kind and every operand
    /// is a plain property or literal.
    pub fn fully_supports(&self, filter: &Filter) -> bool {
        if !self.supports(filter.kind()) {
            return false;
        }
        match filter {
            Filter::And(children) | Filter::Or(children) => {
                children.iter().all(|child| self.fully_supports(child))
            }
            Filter::Not(child) => self.fully_supports(child),
            Filter::Include | Filter::Exclude | Filter::Id(_) => true,
            Filter::Compare(c) => operands_simple(&[&c.left, &c.right]),
            Filter::Between(b) => operands_simple(&[&b.expression, &b.lower, &b.upper]),
            Filter::Like(l) => operands_simple(&[&l.expression]),
            Filter::IsNull(e) | Filter::IsNil(e) => operands_simple(&[e]),
            Filter::Spatial(s) => operands_simple(&[&s.left, &s.right]),
            Filter::Temporal(t) => operands_simple(&[&t.left, &t.right]),
        }
    }

    /// Every filter kind with its supported flag, in declaration order.
    pub fn report(&self) -> Vec<(FilterKind, bool)> {
        FilterKind::iter()
            .map(|kind| (kind, self.supports(kind)))
            .collect()
    }
}

fn operands_simple(operands: &[&Expression]) -> bool {
    operands.iter().all(|operand| operand.is_simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ogc_filter::{ArithmeticOp, TemporalOp};

    fn p(name: &str) -> Expression {
        Expression::property(name)
    }

    #[test]
    fn test_default_support() {
        let caps = Capabilities::default();
        assert!(caps.supports(FilterKind::PropertyIsLike));
        assert!(caps.supports(FilterKind::BBox));
        assert!(caps.supports(FilterKind::TEquals));
        assert!(!caps.supports(FilterKind::PropertyIsNil));
        assert!(!caps.supports(FilterKind::Crosses));
        assert!(!caps.supports(FilterKind::AnyInteracts));
    }

    #[test]
    fn test_fully_supports_recurses_into_logic() {
        let caps = Capabilities::default();
        let supported = Filter::and(vec![
            Filter::equals(p("a"), Expression::literal(1)),
            Filter::not(Filter::is_null(p("b"))),
        ]);
        assert!(caps.fully_supports(&supported));

        let nil_inside = Filter::or(vec![Filter::Include, Filter::is_nil(p("b"))]);
        assert!(!caps.fully_supports(&nil_inside));
    }

    #[test]
    fn test_computed_operands_are_not_fully_supported() {
        let caps = Capabilities::default();
        let sum = Expression::arithmetic(ArithmeticOp::Add, p("a"), Expression::literal(1));
        assert!(!caps.fully_supports(&Filter::equals(sum, Expression::literal(2))));
        let upper = Expression::function("strToUpperCase", vec![p("a")]);
        assert!(!caps.fully_supports(&Filter::like(upper, "A*")));
        assert!(!caps.fully_supports(&Filter::temporal(
            TemporalOp::After,
            Expression::function("now", vec![]),
            p("t")
        )));
    }

    #[test]
    fn test_overrides_and_report() {
        let caps = Capabilities::default()
            .without(FilterKind::PropertyIsLike)
            .with(FilterKind::Crosses);
        assert!(!caps.fully_supports(&Filter::like(p("a"), "x*")));
        let report = caps.report();
        assert_eq!(report.len(), FilterKind::iter().count());
        assert!(report.contains(&(FilterKind::Crosses, true)));
        assert!(report.contains(&(FilterKind::PropertyIsLike, false)));
        assert_eq!(report[0], (FilterKind::Include, true));
    }
}
