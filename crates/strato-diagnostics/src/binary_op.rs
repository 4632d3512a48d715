//! Binary-operator diagnostic: `output = operator(field_1, field_2)`.
//!
//! The second operand is either another field or, for the
//! constant-scaled operators, a physical constant from the registry.
//! Units are reconciled through the unit algebra: addition and
//! subtraction require equal units, multiplication and division combine
//! them, and the constant operators fold in the constant's own unit.

use std::fmt;
use strato_diagnostic::{
    CompatibilityError, ConfigError, Diagnostic, DiagnosticCore, DiagnosticError, GridsProvider,
    ParameterList, RequestKind,
};
use strato_field::{Field, FieldError, FieldIdentifier, TimeStamp};
use strato_units::{constants, Unit};

/// The closed set of binary operators.
///
/// The first four take two fields; the last four scale one field by a
/// physical constant (liquid-water density or gravitational
/// acceleration).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Elementwise add; requires equal units.
    Plus,
    /// Elementwise subtract; requires equal units.
    Minus,
    /// Elementwise multiply; output unit is the product.
    Times,
    /// Elementwise divide; output unit is the quotient.
    Over,
    /// Multiply by the liquid-water density constant.
    TimesRhoH2o,
    /// Divide by the liquid-water density constant.
    OverRhoH2o,
    /// Multiply by the gravitational-acceleration constant.
    TimesGravit,
    /// Divide by the gravitational-acceleration constant.
    OverGravit,
}

impl BinaryOp {
    /// Every operator, in stable code order.
    pub const ALL: [BinaryOp; 8] = [
        Self::Plus,
        Self::Minus,
        Self::Times,
        Self::Over,
        Self::TimesRhoH2o,
        Self::OverRhoH2o,
        Self::TimesGravit,
        Self::OverGravit,
    ];

    /// Parse an operator name. Returns `None` for anything outside the
    /// closed set.
    pub fn parse(op: &str) -> Option<Self> {
        match op {
            "plus" => Some(Self::Plus),
            "minus" => Some(Self::Minus),
            "times" => Some(Self::Times),
            "over" => Some(Self::Over),
            "times_rho_h2o" => Some(Self::TimesRhoH2o),
            "over_rho_h2o" => Some(Self::OverRhoH2o),
            "times_gravit" => Some(Self::TimesGravit),
            "over_gravit" => Some(Self::OverGravit),
            _ => None,
        }
    }

    /// The configuration name of the operator.
    pub fn name(self) -> &'static str {
        match self {
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::Times => "times",
            Self::Over => "over",
            Self::TimesRhoH2o => "times_rho_h2o",
            Self::OverRhoH2o => "over_rho_h2o",
            Self::TimesGravit => "times_gravit",
            Self::OverGravit => "over_gravit",
        }
    }

    /// Stable non-negative operator code.
    pub fn code(self) -> i32 {
        match self {
            Self::Plus => 0,
            Self::Minus => 1,
            Self::Times => 2,
            Self::Over => 3,
            Self::TimesRhoH2o => 4,
            Self::OverRhoH2o => 5,
            Self::TimesGravit => 6,
            Self::OverGravit => 7,
        }
    }

    /// Whether the operator takes a second field (rather than a constant).
    pub fn needs_second_field(self) -> bool {
        matches!(self, Self::Plus | Self::Minus | Self::Times | Self::Over)
    }

    /// The unit of the output, per the operator's unit-transfer rule.
    ///
    /// `None` means the operator requires equal units and `a != b`.
    pub fn output_unit(self, a: Unit, b: Unit) -> Option<Unit> {
        let pc = constants();
        match self {
            Self::Plus | Self::Minus => (a == b).then_some(a),
            Self::Times => Some(a * b),
            Self::Over => Some(a / b),
            Self::TimesRhoH2o => Some(a * pc.rho_h2o.unit),
            Self::OverRhoH2o => Some(a / pc.rho_h2o.unit),
            Self::TimesGravit => Some(a * pc.gravit.unit),
            Self::OverGravit => Some(a / pc.gravit.unit),
        }
    }

    /// Apply the operator in place. `target` must already hold a copy of
    /// input 1; `second` is ignored by the constant-scaled operators.
    pub fn apply(self, target: &Field, second: &Field) -> Result<(), FieldError> {
        let pc = constants();
        match self {
            Self::Plus => target.update(second, 1.0, 1.0),
            Self::Minus => target.update(second, -1.0, 1.0),
            Self::Times => target.scale_by(second),
            Self::Over => target.scale_inv_by(second),
            Self::TimesRhoH2o => target.scale(pc.rho_h2o.value),
            Self::OverRhoH2o => target.scale(1.0 / pc.rho_h2o.value),
            Self::TimesGravit => target.scale(pc.gravit.value),
            Self::OverGravit => target.scale(1.0 / pc.gravit.value),
        }
    }

    fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|op| op.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Resolve an operator name to its stable code, or `-1` for any string
/// outside the closed set.
pub fn binary_operator_code(op: &str) -> i32 {
    BinaryOp::parse(op).map_or(-1, BinaryOp::code)
}

const NAME: &str = "BinaryOpDiag";

const KNOWN_KEYS: [&str; 4] = ["field_1", "field_2", "binary_op", "grid_name"];

/// A diagnostic computing `output = operator(field_1, field_2)`.
///
/// # Parameters
///
/// | key | type | meaning |
/// |-----|------|---------|
/// | `field_1` | string, required | first operand field name |
/// | `field_2` | string, optional | second operand; absent or empty means "use the operator's constant" |
/// | `binary_op` | string, required | one of the eight [`BinaryOp`] names |
/// | `grid_name` | string, required | grid both fields must reside on |
///
/// Unrecognized keys, missing required keys, an operator outside the
/// closed set, and a missing `field_2` for the two-field operators are
/// all rejected at construction, before any field resolution.
///
/// The output field is named `<field_1>_<op>` (constant operand) or
/// `<field_1>_<op>_<field_2>`, carries the layout and grid of the
/// (validated-equal) inputs, and the unit produced by the operator's
/// unit-transfer rule. Each `compute` deep-copies input 1 into the
/// output's own buffer (the output never aliases an input) and then
/// applies the operator in place.
pub struct BinaryOpDiag {
    core: DiagnosticCore,
    field_1: String,
    field_2: Option<String>,
    op: BinaryOp,
    grid_name: String,
    output: Option<Field>,
}

impl BinaryOpDiag {
    /// Construct from a parameter block, validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] wrapped in [`DiagnosticError::Config`]
    /// if a key is unrecognized, a required key is missing, the operator
    /// name is invalid, or a two-field operator lacks `field_2`.
    pub fn new(params: ParameterList) -> Result<Self, DiagnosticError> {
        for key in params.keys() {
            if !KNOWN_KEYS.contains(&key) {
                return Err(ConfigError::UnrecognizedKey {
                    key: key.to_string(),
                }
                .into());
            }
        }

        let field_1 = params.get_str("field_1")?.to_string();
        let op_name = params.get_str("binary_op")?.to_string();
        let grid_name = params.get_str("grid_name")?.to_string();
        let field_2 = params
            .opt_str("field_2")?
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let op = BinaryOp::parse(&op_name).ok_or_else(|| ConfigError::InvalidValue {
            key: "binary_op".to_string(),
            value: op_name.clone(),
            reason: format!("valid operators are: {}", BinaryOp::valid_names()),
        })?;

        if op.needs_second_field() && field_2.is_none() {
            return Err(ConfigError::InvalidValue {
                key: "field_2".to_string(),
                value: String::new(),
                reason: format!("operator '{}' requires a second input field", op.name()),
            }
            .into());
        }

        Ok(Self {
            core: DiagnosticCore::new(params),
            field_1,
            field_2,
            op,
            grid_name,
            output: None,
        })
    }

    /// The configured operator.
    pub fn operator(&self) -> BinaryOp {
        self.op
    }

    /// The deterministic name of the output field.
    pub fn output_field_name(&self) -> String {
        match &self.field_2 {
            Some(f2) => format!("{}_{}_{}", self.field_1, self.op.name(), f2),
            None => format!("{}_{}", self.field_1, self.op.name()),
        }
    }

    /// The materialized output field, once initialized.
    pub fn output(&self) -> Option<&Field> {
        self.output.as_ref()
    }

    fn input(&self, name: &str) -> Result<Field, DiagnosticError> {
        self.core
            .ledger()
            .field_in(name)
            .cloned()
            .ok_or_else(|| DiagnosticError::NotBound {
                diagnostic: NAME.to_string(),
                field: name.to_string(),
            })
    }

    fn field_err(source: FieldError) -> DiagnosticError {
        DiagnosticError::Field {
            diagnostic: NAME.to_string(),
            source,
        }
    }
}

impl Diagnostic for BinaryOpDiag {
    fn name(&self) -> &str {
        NAME
    }

    fn core(&self) -> &DiagnosticCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DiagnosticCore {
        &mut self.core
    }

    fn declare_grids_impl(&mut self, grids: &dyn GridsProvider) -> Result<(), DiagnosticError> {
        grids
            .grid(&self.grid_name)
            .ok_or_else(|| DiagnosticError::UnknownGrid {
                diagnostic: NAME.to_string(),
                grid: self.grid_name.clone(),
            })?;

        let mut names = vec![self.field_1.clone()];
        names.extend(self.field_2.clone());
        for name in names {
            let id = grids
                .field_identifier(&name, &self.grid_name)
                .ok_or_else(|| DiagnosticError::UnknownField {
                    diagnostic: NAME.to_string(),
                    field: name.clone(),
                    grid: self.grid_name.clone(),
                })?;
            self.core.ledger_mut().add_field(
                RequestKind::Required,
                id.name(),
                id.layout().clone(),
                id.unit(),
                id.grid_name(),
            );
        }
        Ok(())
    }

    fn initialize_impl(&mut self) -> Result<(), DiagnosticError> {
        let f1 = self.input(&self.field_1)?;
        let f2 = match &self.field_2 {
            Some(name) => self.input(name)?,
            None => f1.clone(),
        };

        let id1 = f1.identifier();
        let id2 = f2.identifier();

        // The three structural checks are independent; each reports the
        // specific fields and values involved.
        if id1.layout() != id2.layout() {
            return Err(CompatibilityError::LayoutMismatch {
                field_1: id1.name().to_string(),
                layout_1: id1.layout().to_string(),
                field_2: id2.name().to_string(),
                layout_2: id2.layout().to_string(),
            }
            .into());
        }
        if f1.data_type() != f2.data_type() {
            return Err(CompatibilityError::DataTypeMismatch {
                field_1: id1.name().to_string(),
                type_1: f1.data_type(),
                field_2: id2.name().to_string(),
                type_2: f2.data_type(),
            }
            .into());
        }
        if id1.grid_name() != id2.grid_name() {
            return Err(CompatibilityError::GridMismatch {
                field_1: id1.name().to_string(),
                grid_1: id1.grid_name().to_string(),
                field_2: id2.name().to_string(),
                grid_2: id2.grid_name().to_string(),
            }
            .into());
        }

        let unit = self.op.output_unit(id1.unit(), id2.unit()).ok_or_else(|| {
            CompatibilityError::IncompatibleUnits {
                operator: self.op.name().to_string(),
                field_1: id1.name().to_string(),
                unit_1: id1.unit(),
                field_2: id2.name().to_string(),
                unit_2: id2.unit(),
            }
        })?;

        let out_id = FieldIdentifier::new(
            self.output_field_name(),
            id1.layout().clone(),
            unit,
            id1.grid_name(),
        );
        let output = Field::with_data_type(out_id, f1.data_type());

        self.core.ledger_mut().add_field(
            RequestKind::Computed,
            output.name(),
            output.identifier().layout().clone(),
            unit,
            output.identifier().grid_name(),
        );
        let diagnostic = NAME.to_string();
        self.core
            .ledger_mut()
            .set_computed_field(output.clone())
            .map_err(|source| DiagnosticError::Binding { diagnostic, source })?;

        self.output = Some(output);
        Ok(())
    }

    fn compute_impl(&mut self, timestamp: TimeStamp) -> Result<(), DiagnosticError> {
        let f1 = self.input(&self.field_1)?;
        let f2 = match &self.field_2 {
            Some(name) => self.input(name)?,
            None => f1.clone(),
        };
        let output = self
            .output
            .clone()
            .ok_or_else(|| DiagnosticError::NotBound {
                diagnostic: NAME.to_string(),
                field: self.output_field_name(),
            })?;

        output.deep_copy_from(&f1).map_err(Self::field_err)?;
        self.op.apply(&output, &f2).map_err(Self::field_err)?;
        output.stamp(timestamp);
        Ok(())
    }

    fn finalize_impl(&mut self) -> Result<(), DiagnosticError> {
        self.output = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strato_units::{K, KG, M, S};

    fn params(field_1: &str, field_2: &str, op: &str, grid: &str) -> ParameterList {
        let mut p = ParameterList::new();
        p.set("field_1", field_1);
        if !field_2.is_empty() {
            p.set("field_2", field_2);
        }
        p.set("binary_op", op);
        p.set("grid_name", grid);
        p
    }

    // ---------------------------------------------------------------
    // Operator table
    // ---------------------------------------------------------------

    #[test]
    fn operator_codes_stable_unique_non_negative() {
        let mut seen = Vec::new();
        for op in BinaryOp::ALL {
            let code = binary_operator_code(op.name());
            assert!(code >= 0, "code for '{}' must be non-negative", op.name());
            assert_eq!(code, op.code());
            assert!(!seen.contains(&code), "duplicate code {code}");
            seen.push(code);
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn invalid_operator_string_yields_sentinel() {
        assert_eq!(binary_operator_code("foo"), -1);
        assert_eq!(binary_operator_code(""), -1);
        assert_eq!(binary_operator_code("PLUS"), -1);
        assert!(BinaryOp::parse("modulo").is_none());
    }

    #[test]
    fn parse_round_trips_every_name() {
        for op in BinaryOp::ALL {
            assert_eq!(BinaryOp::parse(op.name()), Some(op));
        }
    }

    #[test]
    fn unit_rules_for_field_operators() {
        let density = KG / M.pow(3);

        // Equal units pass through for plus/minus.
        assert_eq!(BinaryOp::Plus.output_unit(K, K), Some(K));
        assert_eq!(BinaryOp::Minus.output_unit(density, density), Some(density));

        // Unequal units are rejected.
        assert_eq!(BinaryOp::Plus.output_unit(K, density), None);
        assert_eq!(BinaryOp::Minus.output_unit(K, K.pow(2)), None);

        // Multiplication and division combine exactly.
        assert_eq!(BinaryOp::Times.output_unit(density, K), Some(density * K));
        assert_eq!(BinaryOp::Over.output_unit(density, K), Some(density / K));
        assert_eq!(
            BinaryOp::Over.output_unit(density, density),
            Some(strato_units::Unit::nondimensional())
        );
    }

    #[test]
    fn unit_rules_for_constant_operators() {
        let density = KG / M.pow(3);
        let gravity = M / S.pow(2);

        assert_eq!(BinaryOp::TimesRhoH2o.output_unit(K, K), Some(K * density));
        assert_eq!(BinaryOp::OverRhoH2o.output_unit(K, K), Some(K / density));
        assert_eq!(BinaryOp::TimesGravit.output_unit(K, K), Some(K * gravity));
        assert_eq!(BinaryOp::OverGravit.output_unit(K, K), Some(K / gravity));
    }

    #[test]
    fn constant_operators_do_not_need_second_field() {
        for op in BinaryOp::ALL {
            let is_field_op = matches!(
                op,
                BinaryOp::Plus | BinaryOp::Minus | BinaryOp::Times | BinaryOp::Over
            );
            assert_eq!(op.needs_second_field(), is_field_op);
        }
    }

    // ---------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------

    #[test]
    fn invalid_operator_names_value_and_lists_all_eight() {
        let err = BinaryOpDiag::new(params("a", "b", "foo", "g")).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("foo"), "message should name the operator: {msg}");
        for op in BinaryOp::ALL {
            assert!(
                msg.contains(op.name()),
                "message should list '{}': {msg}",
                op.name()
            );
        }
    }

    #[test]
    fn missing_required_keys_rejected() {
        let mut p = ParameterList::new();
        p.set("field_1", "a");
        p.set("binary_op", "plus");
        // grid_name missing
        p.set("field_2", "b");
        let err = BinaryOpDiag::new(p).unwrap_err();
        assert!(err.to_string().contains("grid_name"), "{err}");

        let mut p = ParameterList::new();
        p.set("binary_op", "plus");
        p.set("grid_name", "g");
        let err = BinaryOpDiag::new(p).unwrap_err();
        assert!(err.to_string().contains("field_1"), "{err}");
    }

    #[test]
    fn unrecognized_key_rejected() {
        let mut p = params("a", "b", "plus", "g");
        p.set("fudge_factor", 2.0);
        let err = BinaryOpDiag::new(p).unwrap_err();
        assert!(matches!(
            err,
            DiagnosticError::Config(ConfigError::UnrecognizedKey { .. })
        ));
        assert!(err.to_string().contains("fudge_factor"), "{err}");
    }

    #[test]
    fn two_field_operators_require_field_2() {
        for op in ["plus", "minus", "times", "over"] {
            let err = BinaryOpDiag::new(params("a", "", op, "g")).unwrap_err();
            let msg = err.to_string();
            assert!(msg.contains("field_2"), "{msg}");
            assert!(msg.contains(op), "{msg}");
        }
    }

    #[test]
    fn empty_field_2_means_constant_operand() {
        let mut p = params("q", "", "times_gravit", "g");
        p.set("field_2", "");
        let diag = BinaryOpDiag::new(p).unwrap();
        assert_eq!(diag.output_field_name(), "q_times_gravit");

        let diag = BinaryOpDiag::new(params("q", "", "over_rho_h2o", "g")).unwrap();
        assert_eq!(diag.output_field_name(), "q_over_rho_h2o");
    }

    #[test]
    fn output_name_includes_second_field_when_present() {
        let diag = BinaryOpDiag::new(params("a", "b", "plus", "g")).unwrap();
        assert_eq!(diag.output_field_name(), "a_plus_b");
        assert_eq!(diag.operator(), BinaryOp::Plus);
        assert_eq!(diag.name(), "BinaryOpDiag");
    }
}
