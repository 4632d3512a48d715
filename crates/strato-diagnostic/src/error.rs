//! Error types for diagnostic configuration, binding, and lifecycle.
//!
//! Every error here is a programmer or configuration defect, not a
//! transient condition: none are retried, and all carry the offending
//! names and values so the failure is diagnosable from the message alone.

use crate::diagnostic::LifecycleState;
use std::error::Error;
use std::fmt;
use strato_field::{DataType, FieldError};
use strato_units::Unit;

/// Errors from a diagnostic's parameter block, detected at construction.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A required parameter key is absent.
    MissingKey {
        /// The absent key.
        key: String,
    },
    /// A parameter holds a value of the wrong type.
    WrongType {
        /// The key.
        key: String,
        /// The type the caller asked for.
        expected: &'static str,
        /// The type actually stored.
        actual: &'static str,
    },
    /// A parameter key is not recognized by the diagnostic.
    UnrecognizedKey {
        /// The unknown key.
        key: String,
    },
    /// A parameter value is outside the accepted set.
    InvalidValue {
        /// The key.
        key: String,
        /// The rejected value.
        value: String,
        /// What would have been accepted.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey { key } => write!(f, "missing required parameter '{key}'"),
            Self::WrongType {
                key,
                expected,
                actual,
            } => write!(
                f,
                "parameter '{key}' holds a {actual}, expected a {expected}"
            ),
            Self::UnrecognizedKey { key } => write!(f, "unrecognized parameter '{key}'"),
            Self::InvalidValue { key, value, reason } => {
                write!(f, "invalid value '{value}' for parameter '{key}': {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors from binding a field against the request ledger.
///
/// A bind failure means the orchestrator's resolution logic handed a
/// diagnostic a field it never asked for: a defect up the call stack,
/// not a user-recoverable condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindError {
    /// The field's identifier matches no declared Required request.
    NotRequired {
        /// Id string of the rejected field.
        field_id: String,
    },
    /// The field's identifier matches no declared Computed request.
    NotComputed {
        /// Id string of the rejected field.
        field_id: String,
    },
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRequired { field_id } => write!(
                f,
                "field {field_id} does not match any declared required request"
            ),
            Self::NotComputed { field_id } => write!(
                f,
                "field {field_id} does not match any declared computed request"
            ),
        }
    }
}

impl Error for BindError {}

/// Cross-field compatibility violations, detected at initialize time.
///
/// The three structural checks (layout, datatype, grid) are independent;
/// each failure names both fields and the specific mismatched attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum CompatibilityError {
    /// The two operand fields have different layouts.
    LayoutMismatch {
        /// Name of the first field.
        field_1: String,
        /// Layout string of the first field.
        layout_1: String,
        /// Name of the second field.
        field_2: String,
        /// Layout string of the second field.
        layout_2: String,
    },
    /// The two operand fields have different numeric datatypes.
    DataTypeMismatch {
        /// Name of the first field.
        field_1: String,
        /// Datatype of the first field.
        type_1: DataType,
        /// Name of the second field.
        field_2: String,
        /// Datatype of the second field.
        type_2: DataType,
    },
    /// The two operand fields reside on different grids.
    GridMismatch {
        /// Name of the first field.
        field_1: String,
        /// Grid of the first field.
        grid_1: String,
        /// Name of the second field.
        field_2: String,
        /// Grid of the second field.
        grid_2: String,
    },
    /// An operator that requires equal units was given unequal units.
    IncompatibleUnits {
        /// The operator name.
        operator: String,
        /// Name of the first field.
        field_1: String,
        /// Unit of the first field.
        unit_1: Unit,
        /// Name of the second field.
        field_2: String,
        /// Unit of the second field.
        unit_2: Unit,
    },
}

impl fmt::Display for CompatibilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LayoutMismatch {
                field_1,
                layout_1,
                field_2,
                layout_2,
            } => write!(
                f,
                "input fields must have the same layout: \
                 field '{field_1}' has layout {layout_1}, \
                 field '{field_2}' has layout {layout_2}"
            ),
            Self::DataTypeMismatch {
                field_1,
                type_1,
                field_2,
                type_2,
            } => write!(
                f,
                "input fields must have the same data type: \
                 field '{field_1}' is {type_1}, field '{field_2}' is {type_2}"
            ),
            Self::GridMismatch {
                field_1,
                grid_1,
                field_2,
                grid_2,
            } => write!(
                f,
                "input fields must be on the same grid: \
                 field '{field_1}' is on '{grid_1}', field '{field_2}' is on '{grid_2}'"
            ),
            Self::IncompatibleUnits {
                operator,
                field_1,
                unit_1,
                field_2,
                unit_2,
            } => write!(
                f,
                "operator '{operator}' requires equal units: \
                 field '{field_1}' is [{unit_1}], field '{field_2}' is [{unit_2}]"
            ),
        }
    }
}

impl Error for CompatibilityError {}

/// Errors from diagnostic construction, binding, and lifecycle calls.
///
/// Any of these is fatal to the diagnostic instance: the composition is
/// expected to abort startup rather than proceed with a partially-valid
/// diagnostic.
#[derive(Clone, Debug, PartialEq)]
pub enum DiagnosticError {
    /// Invalid or missing configuration, detected at construction.
    Config(ConfigError),
    /// A field handed to a set operation matches no declared request.
    Binding {
        /// Name of the diagnostic.
        diagnostic: String,
        /// The underlying bind failure.
        source: BindError,
    },
    /// Cross-field compatibility violated at initialize time.
    Compatibility(CompatibilityError),
    /// A field kernel failed during compute.
    Field {
        /// Name of the diagnostic.
        diagnostic: String,
        /// The underlying field error.
        source: FieldError,
    },
    /// The grids provider knows no grid with the requested name.
    UnknownGrid {
        /// Name of the diagnostic.
        diagnostic: String,
        /// The unknown grid name.
        grid: String,
    },
    /// The grids provider knows no field with the requested name on the
    /// requested grid.
    UnknownField {
        /// Name of the diagnostic.
        diagnostic: String,
        /// The unknown field name.
        field: String,
        /// The grid that was searched.
        grid: String,
    },
    /// A field the diagnostic needs was never bound.
    NotBound {
        /// Name of the diagnostic.
        diagnostic: String,
        /// The missing field name.
        field: String,
    },
    /// A lifecycle call arrived in a state that does not permit it.
    InvalidTransition {
        /// Name of the diagnostic.
        diagnostic: String,
        /// The lifecycle operation that was attempted.
        operation: &'static str,
        /// The state the diagnostic was in.
        state: LifecycleState,
    },
}

impl fmt::Display for DiagnosticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(source) => write!(f, "configuration error: {source}"),
            Self::Binding { diagnostic, source } => {
                write!(f, "binding error in '{diagnostic}': {source}")
            }
            Self::Compatibility(source) => write!(f, "compatibility error: {source}"),
            Self::Field { diagnostic, source } => {
                write!(f, "field operation failed in '{diagnostic}': {source}")
            }
            Self::UnknownGrid { diagnostic, grid } => {
                write!(f, "diagnostic '{diagnostic}' references unknown grid '{grid}'")
            }
            Self::UnknownField {
                diagnostic,
                field,
                grid,
            } => write!(
                f,
                "diagnostic '{diagnostic}' references unknown field '{field}' on grid '{grid}'"
            ),
            Self::NotBound { diagnostic, field } => write!(
                f,
                "diagnostic '{diagnostic}' has no bound field '{field}'"
            ),
            Self::InvalidTransition {
                diagnostic,
                operation,
                state,
            } => write!(
                f,
                "diagnostic '{diagnostic}': '{operation}' is not valid in state {state}"
            ),
        }
    }
}

impl Error for DiagnosticError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(source) => Some(source),
            Self::Binding { source, .. } => Some(source),
            Self::Compatibility(source) => Some(source),
            Self::Field { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for DiagnosticError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<CompatibilityError> for DiagnosticError {
    fn from(e: CompatibilityError) -> Self {
        Self::Compatibility(e)
    }
}
