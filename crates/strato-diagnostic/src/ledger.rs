//! The request ledger: declared field requests and bound field handles.

use crate::error::BindError;
use crate::request::{FieldRequest, RequestKind};
use strato_field::{Field, FieldIdentifier, FieldLayout};
use strato_units::Unit;

/// Per-diagnostic mapping from declared requests to bound fields.
///
/// The ledger holds the Required and Computed request lists built during
/// declaration, plus the input/output field handles the orchestrator (or
/// the diagnostic itself, for outputs) binds afterward. The two `set`
/// operations are the sole mutation points for the bound lists after
/// declaration: each rejects a field whose identifier matches no declared
/// request of its kind, and silently skips re-insertion of an equal
/// field, so no field appears twice.
#[derive(Debug, Default)]
pub struct RequestLedger {
    required: Vec<FieldRequest>,
    computed: Vec<FieldRequest>,
    fields_in: Vec<Field>,
    fields_out: Vec<Field>,
}

impl RequestLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request for a field with the given identity.
    ///
    /// No deduplication happens at this layer; membership queries key on
    /// identifier equality.
    pub fn add_field(
        &mut self,
        kind: RequestKind,
        name: impl Into<String>,
        layout: FieldLayout,
        unit: Unit,
        grid_name: impl Into<String>,
    ) {
        let id = FieldIdentifier::new(name, layout, unit, grid_name);
        let request = FieldRequest::new(kind, id);
        match kind {
            RequestKind::Required => self.required.push(request),
            RequestKind::Computed => self.computed.push(request),
        }
    }

    /// Whether a Required request with exactly this identifier exists.
    pub fn has_required_field(&self, id: &FieldIdentifier) -> bool {
        self.required.iter().any(|req| req.identifier() == id)
    }

    /// Whether a Computed request with exactly this identifier exists.
    pub fn has_computed_field(&self, id: &FieldIdentifier) -> bool {
        self.computed.iter().any(|req| req.identifier() == id)
    }

    /// Bind an input field.
    ///
    /// Fails if the field's identifier matches no declared Required
    /// request. Binding the same field twice is a no-op.
    pub fn set_required_field(&mut self, field: Field) -> Result<(), BindError> {
        if !self.has_required_field(field.identifier()) {
            return Err(BindError::NotRequired {
                field_id: field.identifier().to_string(),
            });
        }
        if !self.fields_in.contains(&field) {
            self.fields_in.push(field);
        }
        Ok(())
    }

    /// Bind an output field. Symmetric to
    /// [`set_required_field`](Self::set_required_field) for Computed
    /// requests and the bound-outputs list.
    pub fn set_computed_field(&mut self, field: Field) -> Result<(), BindError> {
        if !self.has_computed_field(field.identifier()) {
            return Err(BindError::NotComputed {
                field_id: field.identifier().to_string(),
            });
        }
        if !self.fields_out.contains(&field) {
            self.fields_out.push(field);
        }
        Ok(())
    }

    /// Ordered view of the declared Required requests.
    pub fn required_field_requests(&self) -> &[FieldRequest] {
        &self.required
    }

    /// Ordered view of the declared Computed requests.
    pub fn computed_field_requests(&self) -> &[FieldRequest] {
        &self.computed
    }

    /// Ordered view of the bound input fields.
    pub fn fields_in(&self) -> &[Field] {
        &self.fields_in
    }

    /// Ordered view of the bound output fields.
    pub fn fields_out(&self) -> &[Field] {
        &self.fields_out
    }

    /// Look up a bound input field by name.
    pub fn field_in(&self, name: &str) -> Option<&Field> {
        self.fields_in.iter().find(|f| f.name() == name)
    }

    /// Look up a bound output field by name.
    pub fn field_out(&self, name: &str) -> Option<&Field> {
        self.fields_out.iter().find(|f| f.name() == name)
    }
}
