use crate::compare::operator::OperatorKind;
use crate::types::comparator_type::ComparatorType;
use crate::types::typed_value::TypedValue;

/// A constant operand of a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Int32(i32),
    Int64(i64),
    Float64(f64),
    Boolean(bool),
}

impl Literal {
    /// Converts the literal to a value of the target type, if no information is lost.
    ///
    /// Integers widen or narrow between `Int32` and `Int64` when the value fits,
    /// and become `Float64` when the float holds them exactly. A NaN float and
    /// any `Boolean` never convert.
    pub(crate) fn coerce_to(&self, target: ComparatorType) -> Option<TypedValue> {
        match (self, target) {
            (Literal::String(value), ComparatorType::String) => Some(TypedValue::String(value.clone())),
            (Literal::Int32(value), ComparatorType::Int32) => Some(TypedValue::Int32(*value)),
            (Literal::Int32(value), ComparatorType::Int64) => Some(TypedValue::Int64(*value as i64)),
            (Literal::Int32(value), ComparatorType::Float64) => Some(TypedValue::Float64(*value as f64)),
            (Literal::Int64(value), ComparatorType::Int32) => i32::try_from(*value).ok().map(TypedValue::Int32),
            (Literal::Int64(value), ComparatorType::Int64) => Some(TypedValue::Int64(*value)),
            (Literal::Int64(value), ComparatorType::Float64) => {
                let float = *value as f64;
                (float as i128 == *value as i128).then_some(TypedValue::Float64(float))
            }
            (Literal::Float64(value), ComparatorType::Float64) if !value.is_nan() => {
                Some(TypedValue::Float64(*value))
            }
            _ => None,
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Int32(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int64(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float64(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

/// One side of a comparison: a named column or a literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Column(String),
    Literal(Literal),
}

impl Operand {
    pub fn column(name: &str) -> Self {
        Operand::Column(name.to_string())
    }

    pub fn literal(value: impl Into<Literal>) -> Self {
        Operand::Literal(value.into())
    }
}

/// The binary operators of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Eq,
    NotEq,
    Greater,
    GreaterEq,
    Lesser,
    LesserEq,
    Like,
}

impl BinaryOperator {
    /// Returns the operator that holds with the operands swapped: `a < b` iff `b > a`.
    ///
    /// `Like` has no such operator, its operands are not interchangeable.
    pub(crate) fn reversed(&self) -> Option<BinaryOperator> {
        match self {
            BinaryOperator::Eq => Some(BinaryOperator::Eq),
            BinaryOperator::NotEq => Some(BinaryOperator::NotEq),
            BinaryOperator::Greater => Some(BinaryOperator::Lesser),
            BinaryOperator::GreaterEq => Some(BinaryOperator::LesserEq),
            BinaryOperator::Lesser => Some(BinaryOperator::Greater),
            BinaryOperator::LesserEq => Some(BinaryOperator::GreaterEq),
            BinaryOperator::Like => None,
        }
    }

    pub(crate) fn operator_kind(&self) -> OperatorKind {
        match self {
            BinaryOperator::Eq => OperatorKind::Equal,
            BinaryOperator::NotEq => OperatorKind::NotEqual,
            BinaryOperator::Greater => OperatorKind::GreaterThan,
            BinaryOperator::GreaterEq => OperatorKind::GreaterThanOrEqual,
            BinaryOperator::Lesser => OperatorKind::LessThan,
            BinaryOperator::LesserEq => OperatorKind::LessThanOrEqual,
            BinaryOperator::Like => OperatorKind::Like,
        }
    }
}

/// `PredicateExpr` is the predicate tree handed over by the query layer.
///
/// It is deliberately independent of any query engine's expression types;
/// a host converts its own filter expressions into this tree before
/// asking for a decomposition.
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateExpr {
    /// A binary comparison (e.g., `sid > 1`).
    Comparison {
        left: Operand,
        operator: BinaryOperator,
        right: Operand,
    },
    And(Box<PredicateExpr>, Box<PredicateExpr>),
    Or(Box<PredicateExpr>, Box<PredicateExpr>),
    Not(Box<PredicateExpr>),
    /// Holds when the named column is absent.
    IsNull(String),
}

impl PredicateExpr {
    /// Creates a comparison between two operands.
    pub fn comparison(left: Operand, operator: BinaryOperator, right: Operand) -> Self {
        PredicateExpr::Comparison {
            left,
            operator,
            right,
        }
    }

    /// Creates a comparison of a column against a literal, column on the left.
    ///
    /// # Arguments
    ///
    /// * `column_name` - The name of the column to compare.
    /// * `operator` - The operator to compare with.
    /// * `literal` - The literal value to compare against.
    pub fn column(column_name: &str, operator: BinaryOperator, literal: impl Into<Literal>) -> Self {
        Self::comparison(Operand::column(column_name), operator, Operand::literal(literal))
    }

    pub fn is_null(column_name: &str) -> Self {
        PredicateExpr::IsNull(column_name.to_string())
    }

    pub fn and(self, other: PredicateExpr) -> Self {
        PredicateExpr::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: PredicateExpr) -> Self {
        PredicateExpr::Or(Box::new(self), Box::new(other))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        PredicateExpr::Not(Box::new(self))
    }

    /// Flattens nested conjunctions into their terms, left to right.
    pub fn conjuncts(&self) -> Vec<&PredicateExpr> {
        let mut terms = Vec::new();
        collect_conjuncts(self, &mut terms);
        terms
    }

    /// Joins the terms with `And`, left-associative. Returns `None` for no terms.
    pub fn conjunction(terms: Vec<PredicateExpr>) -> Option<PredicateExpr> {
        terms.into_iter().reduce(PredicateExpr::and)
    }
}

fn collect_conjuncts<'a>(expr: &'a PredicateExpr, out: &mut Vec<&'a PredicateExpr>) {
    match expr {
        PredicateExpr::And(left, right) => {
            collect_conjuncts(left, out);
            collect_conjuncts(right, out);
        }
        _ => out.push(expr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_literals_to_their_own_type() {
        assert_eq!(Some(TypedValue::from("brian")), Literal::from("brian").coerce_to(ComparatorType::String));
        assert_eq!(Some(TypedValue::Int32(1)), Literal::Int32(1).coerce_to(ComparatorType::Int32));
        assert_eq!(Some(TypedValue::Int64(1)), Literal::Int64(1).coerce_to(ComparatorType::Int64));
        assert_eq!(Some(TypedValue::Float64(1.5)), Literal::Float64(1.5).coerce_to(ComparatorType::Float64));
    }

    #[test]
    fn coerce_integers_across_widths() {
        assert_eq!(Some(TypedValue::Int64(778)), Literal::Int32(778).coerce_to(ComparatorType::Int64));
        assert_eq!(Some(TypedValue::Int32(1)), Literal::Int64(1).coerce_to(ComparatorType::Int32));
        assert_eq!(None, Literal::Int64(i64::MAX).coerce_to(ComparatorType::Int32));
    }

    #[test]
    fn coerce_integers_to_float_only_when_exact() {
        assert_eq!(Some(TypedValue::Float64(55.0)), Literal::Int32(55).coerce_to(ComparatorType::Float64));
        assert_eq!(
            Some(TypedValue::Float64(9007199254740992.0)),
            Literal::Int64(1 << 53).coerce_to(ComparatorType::Float64)
        );
        assert_eq!(None, Literal::Int64((1 << 53) + 1).coerce_to(ComparatorType::Float64));
        assert_eq!(None, Literal::Int64(i64::MAX).coerce_to(ComparatorType::Float64));
    }

    #[test]
    fn attempt_to_coerce_incompatible_literals() {
        assert_eq!(None, Literal::Float64(1.0).coerce_to(ComparatorType::Int32));
        assert_eq!(None, Literal::from("1").coerce_to(ComparatorType::Int32));
        assert_eq!(None, Literal::Int32(1).coerce_to(ComparatorType::String));
        assert_eq!(None, Literal::Boolean(true).coerce_to(ComparatorType::String));
        assert_eq!(None, Literal::Float64(f64::NAN).coerce_to(ComparatorType::Float64));
    }

    #[test]
    fn reverse_operators() {
        assert_eq!(Some(BinaryOperator::Lesser), BinaryOperator::Greater.reversed());
        assert_eq!(Some(BinaryOperator::GreaterEq), BinaryOperator::LesserEq.reversed());
        assert_eq!(Some(BinaryOperator::NotEq), BinaryOperator::NotEq.reversed());
        assert_eq!(None, BinaryOperator::Like.reversed());
    }

    #[test]
    fn flatten_nested_conjunctions() {
        let first = PredicateExpr::column("sid", BinaryOperator::Greater, 1);
        let second = PredicateExpr::column("dgrs", BinaryOperator::GreaterEq, 55.6);
        let third = PredicateExpr::column("mills", BinaryOperator::Lesser, 778i64);

        let expr = first.clone().and(second.clone().and(third.clone()));
        assert_eq!(vec![&first, &second, &third], expr.conjuncts());
    }

    #[test]
    fn disjunction_is_a_single_conjunct() {
        let expr = PredicateExpr::column("sid", BinaryOperator::Eq, 1)
            .or(PredicateExpr::column("sid", BinaryOperator::Eq, 2));

        assert_eq!(vec![&expr], expr.conjuncts());
    }

    #[test]
    fn join_terms_into_a_conjunction() {
        let first = PredicateExpr::column("sid", BinaryOperator::Greater, 1);
        let second = PredicateExpr::is_null("name");

        assert_eq!(None, PredicateExpr::conjunction(Vec::new()));
        assert_eq!(
            Some(first.clone()),
            PredicateExpr::conjunction(vec![first.clone()])
        );
        assert_eq!(
            Some(first.clone().and(second.clone())),
            PredicateExpr::conjunction(vec![first, second])
        );
    }
}
