use crate::compare::comparator::TypedComparator;
use crate::compare::error::CompareError;
use crate::compare::operator::{ComparisonOperator, OperatorKind};
use crate::filter::error::FilterError;
use crate::storage::cell::Column;
use crate::types::comparator_type::ComparatorType;
use crate::types::typed_value::TypedValue;
use crate::types::RawValue;
use std::collections::BTreeMap;

/// Option holding the target column as `hex(family)|hex(qualifier)`.
///
/// Family and qualifier are arbitrary bytes, so both are hex-encoded to keep
/// the separator unambiguous.
pub const COLUMN_OPTION: &str = "column";
/// Option holding the comparator type name.
pub const COMPARATOR_OPTION: &str = "comparator";
/// Option holding the operator name.
pub const OPERATOR_OPTION: &str = "operator";
/// Option holding the hex-encoded constant bytes.
pub const CONSTANT_OPTION: &str = "constant";

const COLUMN_SEPARATOR: char = '|';

/// The configuration of one `RowFilterStage`: which column it reads, how it
/// compares, against what constant, and where it sits in the stack.
///
/// The ordinal decides stacking order. Stage `0` reads raw cells from the
/// store; stage `k > 0` reads the envelopes emitted by stage `k - 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFilterStageConfig {
    ordinal: usize,
    column: Column,
    comparator_type: ComparatorType,
    operator_kind: OperatorKind,
    constant: RawValue,
}

impl RowFilterStageConfig {
    /// Creates a new `RowFilterStageConfig`.
    ///
    /// # Arguments
    ///
    /// * `ordinal` - The stage's position in the stack, starting at 0.
    /// * `column` - The column the stage tests.
    /// * `comparator_type` - The declared type of the column.
    /// * `operator_kind` - The relational test to apply.
    /// * `constant` - The constant operand in the declared type's byte layout.
    pub fn new(
        ordinal: usize,
        column: Column,
        comparator_type: ComparatorType,
        operator_kind: OperatorKind,
        constant: impl Into<RawValue>,
    ) -> Self {
        Self {
            ordinal,
            column,
            comparator_type,
            operator_kind,
            constant: constant.into(),
        }
    }

    /// Creates a config whose comparator type is the type of `constant`.
    pub fn typed(
        ordinal: usize,
        column: Column,
        operator_kind: OperatorKind,
        constant: TypedValue,
    ) -> Self {
        Self::new(
            ordinal,
            column,
            constant.comparator_type(),
            operator_kind,
            constant.to_bytes(),
        )
    }

    /// Rebuilds a config from the option map it was installed with.
    ///
    /// # Returns
    ///
    /// * `Ok(RowFilterStageConfig)` - If every option is present and parseable.
    /// * `Err(FilterError::MissingOption)` - If an option is absent.
    /// * `Err(FilterError::InvalidOption)` - If an option cannot be parsed.
    pub fn from_options(
        ordinal: usize,
        options: &BTreeMap<String, String>,
    ) -> Result<Self, FilterError> {
        let column = parse_option(options, COLUMN_OPTION, decode_column)?;
        let comparator_type = parse_option(options, COMPARATOR_OPTION, ComparatorType::parse)?;
        let operator_kind = parse_option(options, OPERATOR_OPTION, OperatorKind::parse)?;
        let constant = parse_option(options, CONSTANT_OPTION, |value| hex::decode(value).ok())?;

        Ok(Self::new(
            ordinal,
            column,
            comparator_type,
            operator_kind,
            constant,
        ))
    }

    /// Returns the option map this stage is installed with.
    pub fn to_options(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (COLUMN_OPTION.to_string(), encode_column(&self.column)),
            (
                COMPARATOR_OPTION.to_string(),
                self.comparator_type.name().to_string(),
            ),
            (
                OPERATOR_OPTION.to_string(),
                self.operator_kind.name().to_string(),
            ),
            (CONSTANT_OPTION.to_string(), hex::encode(&self.constant)),
        ])
    }

    /// Builds the stage's comparator and operator.
    ///
    /// This is where setup-time errors surface: a constant that does not match
    /// the declared type, or an operator the type does not support.
    pub fn prepare(&self) -> Result<ComparisonOperator, CompareError> {
        let comparator = TypedComparator::init(self.comparator_type, &self.constant)?;
        ComparisonOperator::new(self.operator_kind, comparator)
    }

    /// The name the stage is installed under.
    pub fn name(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.ordinal)
    }

    /// The iterator priority the stage is installed with; lower runs closer to the data.
    pub fn priority(&self) -> usize {
        self.ordinal + 1
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn comparator_type(&self) -> ComparatorType {
        self.comparator_type
    }

    pub fn operator_kind(&self) -> OperatorKind {
        self.operator_kind
    }

    pub fn constant(&self) -> &[u8] {
        &self.constant
    }
}

fn encode_column(column: &Column) -> String {
    format!(
        "{}{}{}",
        hex::encode(column.family()),
        COLUMN_SEPARATOR,
        hex::encode(column.qualifier())
    )
}

fn decode_column(value: &str) -> Option<Column> {
    let (family, qualifier) = value.split_once(COLUMN_SEPARATOR)?;
    let family = hex::decode(family).ok()?;
    if family.is_empty() {
        return None;
    }
    Some(Column::new(family, hex::decode(qualifier).ok()?))
}

fn parse_option<T>(
    options: &BTreeMap<String, String>,
    name: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, FilterError> {
    let value = options
        .get(name)
        .ok_or_else(|| FilterError::MissingOption(name.to_string()))?;

    parse(value).ok_or_else(|| FilterError::InvalidOption {
        name: name.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn degrees_at_least() -> RowFilterStageConfig {
        RowFilterStageConfig::typed(
            0,
            Column::new("cf", "dgrs"),
            OperatorKind::GreaterThanOrEqual,
            TypedValue::Float64(55.6),
        )
    }

    #[test]
    fn typed_config_takes_the_type_of_its_constant() {
        let config = degrees_at_least();

        assert_eq!(ComparatorType::Float64, config.comparator_type());
        assert_eq!(&55.6f64.to_be_bytes(), config.constant());
    }

    #[test]
    fn config_to_options() {
        let options = RowFilterStageConfig::new(
            1,
            Column::new("cf", "sid"),
            ComparatorType::Int32,
            OperatorKind::GreaterThan,
            1i32.to_be_bytes().to_vec(),
        )
        .to_options();

        assert_eq!("6366|736964", options[COLUMN_OPTION]);
        assert_eq!("int32", options[COMPARATOR_OPTION]);
        assert_eq!("gt", options[OPERATOR_OPTION]);
        assert_eq!("00000001", options[CONSTANT_OPTION]);
    }

    #[test]
    fn config_from_its_own_options() {
        let config = degrees_at_least();
        let rebuilt = RowFilterStageConfig::from_options(0, &config.to_options()).unwrap();

        assert_eq!(config, rebuilt);
    }

    #[test]
    fn config_with_byte_valued_columns_from_its_own_options() {
        let columns = [
            Column::new("a|b", "q"),
            Column::new(vec![0xffu8, b'f'], vec![0u8, b'|', 0xfe]),
            Column::new("cf", ""),
        ];

        for column in columns {
            let config = RowFilterStageConfig::new(
                0,
                column,
                ComparatorType::Int32,
                OperatorKind::Equal,
                7i32.to_be_bytes().to_vec(),
            );
            let rebuilt = RowFilterStageConfig::from_options(0, &config.to_options()).unwrap();

            assert_eq!(config, rebuilt);
        }
    }

    #[test]
    fn attempt_to_build_config_with_a_column_that_is_not_hex() {
        let mut options = degrees_at_least().to_options();
        options.insert(COLUMN_OPTION.to_string(), "cf|dgrs".to_string());

        let result = RowFilterStageConfig::from_options(0, &options);
        assert!(matches!(result, Err(FilterError::InvalidOption { name, .. }) if name == "column"));
    }

    #[test]
    fn attempt_to_build_config_with_an_empty_column_family() {
        let mut options = degrees_at_least().to_options();
        options.insert(COLUMN_OPTION.to_string(), "|6467".to_string());

        let result = RowFilterStageConfig::from_options(0, &options);
        assert!(matches!(result, Err(FilterError::InvalidOption { name, .. }) if name == "column"));
    }

    #[test]
    fn attempt_to_build_config_with_a_missing_option() {
        let mut options = degrees_at_least().to_options();
        options.remove(OPERATOR_OPTION);

        let result = RowFilterStageConfig::from_options(0, &options);
        assert!(matches!(result, Err(FilterError::MissingOption(name)) if name == "operator"));
    }

    #[test]
    fn attempt_to_build_config_with_an_unknown_comparator() {
        let mut options = degrees_at_least().to_options();
        options.insert(COMPARATOR_OPTION.to_string(), "decimal".to_string());

        let result = RowFilterStageConfig::from_options(0, &options);
        assert!(matches!(
            result,
            Err(FilterError::InvalidOption { name, value }) if name == "comparator" && value == "decimal"
        ));
    }

    #[test]
    fn attempt_to_build_config_with_a_constant_that_is_not_hex() {
        let mut options = degrees_at_least().to_options();
        options.insert(CONSTANT_OPTION.to_string(), "zz".to_string());

        let result = RowFilterStageConfig::from_options(0, &options);
        assert!(matches!(result, Err(FilterError::InvalidOption { name, .. }) if name == "constant"));
    }

    #[test]
    fn prepare_a_valid_stage() {
        let operator = degrees_at_least().prepare().unwrap();

        assert_eq!(OperatorKind::GreaterThanOrEqual, operator.kind());
        assert!(operator.accept(&65.5f64.to_be_bytes()).unwrap());
    }

    #[test]
    fn attempt_to_prepare_a_stage_with_a_malformed_constant() {
        let config = RowFilterStageConfig::new(
            0,
            Column::new("cf", "dgrs"),
            ComparatorType::Float64,
            OperatorKind::Equal,
            1i32.to_be_bytes().to_vec(),
        );

        assert!(matches!(
            config.prepare(),
            Err(CompareError::MalformedConstant { .. })
        ));
    }

    #[test]
    fn attempt_to_prepare_like_on_a_numeric_stage() {
        let config = RowFilterStageConfig::typed(
            0,
            Column::new("cf", "mills"),
            OperatorKind::Like,
            TypedValue::Int64(5),
        );

        assert!(matches!(
            config.prepare(),
            Err(CompareError::UnsupportedOperatorForType { .. })
        ));
    }

    #[test]
    fn stage_name_and_priority_follow_the_ordinal() {
        let config = RowFilterStageConfig::typed(
            2,
            Column::new("cf", "name"),
            OperatorKind::Equal,
            TypedValue::from("brian"),
        );

        assert_eq!("sieve_2", config.name("sieve_"));
        assert_eq!(3, config.priority());
    }
}
