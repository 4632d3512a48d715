//! Field-copy diagnostic: publishes a field under an alias name.
//!
//! The simplest concrete diagnostic: no arithmetic, no compatibility
//! checks beyond its single input. It exists to carry a field into an
//! output stream under a stable alias, and doubles as the minimal
//! reference implementation of the lifecycle contract.

use strato_diagnostic::{
    Diagnostic, DiagnosticCore, DiagnosticError, GridsProvider, ParameterList, RequestKind,
};
use strato_field::{Field, FieldError, FieldIdentifier, TimeStamp};

const NAME: &str = "FieldCopyDiag";

const KNOWN_KEYS: [&str; 2] = ["field_name", "grid_name"];

/// A diagnostic that copies one required field into a computed
/// `<field_name>_copy` alias on every compute.
///
/// # Parameters
///
/// | key | type | meaning |
/// |-----|------|---------|
/// | `field_name` | string, required | the field to copy |
/// | `grid_name` | string, required | the grid the field resides on |
pub struct FieldCopyDiag {
    core: DiagnosticCore,
    field_name: String,
    grid_name: String,
    output: Option<Field>,
}

impl FieldCopyDiag {
    /// Construct from a parameter block, validating the configuration.
    pub fn new(params: ParameterList) -> Result<Self, DiagnosticError> {
        for key in params.keys() {
            if !KNOWN_KEYS.contains(&key) {
                return Err(strato_diagnostic::ConfigError::UnrecognizedKey {
                    key: key.to_string(),
                }
                .into());
            }
        }
        let field_name = params.get_str("field_name")?.to_string();
        let grid_name = params.get_str("grid_name")?.to_string();
        Ok(Self {
            core: DiagnosticCore::new(params),
            field_name,
            grid_name,
            output: None,
        })
    }

    /// The deterministic name of the output field.
    pub fn output_field_name(&self) -> String {
        format!("{}_copy", self.field_name)
    }

    fn input(&self) -> Result<Field, DiagnosticError> {
        self.core
            .ledger()
            .field_in(&self.field_name)
            .cloned()
            .ok_or_else(|| DiagnosticError::NotBound {
                diagnostic: NAME.to_string(),
                field: self.field_name.clone(),
            })
    }

    fn field_err(source: FieldError) -> DiagnosticError {
        DiagnosticError::Field {
            diagnostic: NAME.to_string(),
            source,
        }
    }
}

impl Diagnostic for FieldCopyDiag {
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
        let id = grids
            .field_identifier(&self.field_name, &self.grid_name)
            .ok_or_else(|| DiagnosticError::UnknownField {
                diagnostic: NAME.to_string(),
                field: self.field_name.clone(),
                grid: self.grid_name.clone(),
            })?;
        self.core.ledger_mut().add_field(
            RequestKind::Required,
            id.name(),
            id.layout().clone(),
            id.unit(),
            id.grid_name(),
        );
        Ok(())
    }

    fn initialize_impl(&mut self) -> Result<(), DiagnosticError> {
        let input = self.input()?;
        let id = input.identifier();
        let out_id = FieldIdentifier::new(
            self.output_field_name(),
            id.layout().clone(),
            id.unit(),
            id.grid_name(),
        );
        let output = Field::with_data_type(out_id, input.data_type());

        self.core.ledger_mut().add_field(
            RequestKind::Computed,
            output.name(),
            output.identifier().layout().clone(),
            output.identifier().unit(),
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
        let input = self.input()?;
        let output = self
            .output
            .clone()
            .ok_or_else(|| DiagnosticError::NotBound {
                diagnostic: NAME.to_string(),
                field: self.output_field_name(),
            })?;
        output.deep_copy_from(&input).map_err(Self::field_err)?;
        output.stamp(timestamp);
        Ok(())
    }

    fn finalize_impl(&mut self) -> Result<(), DiagnosticError> {
        self.output = None;
        Ok(())
    }
}
