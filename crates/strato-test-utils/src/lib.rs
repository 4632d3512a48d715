//! Test utilities and fixtures for Strato development.
//!
//! Provides a no-op concrete diagnostic ([`ProbeDiagnostic`]) for
//! exercising the ledger and lifecycle contract, a static
//! [`GridsProvider`] backed by in-memory catalogs
//! ([`StaticGridsProvider`]), and field fixtures with deterministic
//! random data.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use indexmap::IndexMap;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use strato_diagnostic::{
    Diagnostic, DiagnosticCore, DiagnosticError, GridsProvider, ParameterList,
};
use strato_field::{Field, FieldIdentifier, FieldLayout, Grid, TimeStamp};
use strato_units::Unit;

/// A concrete diagnostic whose hooks do nothing.
///
/// Useful for testing the request ledger and the lifecycle state machine
/// without any field math: declare requests through
/// [`ledger`](ProbeDiagnostic::ledger), then drive the lifecycle calls.
pub struct ProbeDiagnostic {
    core: DiagnosticCore,
}

impl ProbeDiagnostic {
    pub fn new(params: ParameterList) -> Self {
        Self {
            core: DiagnosticCore::new(params),
        }
    }

    /// Mutable ledger access for declaring requests directly in tests.
    pub fn ledger(&mut self) -> &mut strato_diagnostic::RequestLedger {
        self.core.ledger_mut()
    }
}

impl Default for ProbeDiagnostic {
    fn default() -> Self {
        Self::new(ParameterList::new())
    }
}

impl Diagnostic for ProbeDiagnostic {
    fn name(&self) -> &str {
        "ProbeDiagnostic"
    }

    fn core(&self) -> &DiagnosticCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut DiagnosticCore {
        &mut self.core
    }

    fn declare_grids_impl(&mut self, _grids: &dyn GridsProvider) -> Result<(), DiagnosticError> {
        Ok(())
    }

    fn initialize_impl(&mut self) -> Result<(), DiagnosticError> {
        Ok(())
    }

    fn compute_impl(&mut self, _timestamp: TimeStamp) -> Result<(), DiagnosticError> {
        Ok(())
    }
}

/// A [`GridsProvider`] backed by in-memory catalogs.
///
/// Populate grids with [`add_grid`](StaticGridsProvider::add_grid) and
/// simulation-field identities with
/// [`add_field_identifier`](StaticGridsProvider::add_field_identifier)
/// (or [`register_field`](StaticGridsProvider::register_field)) before
/// handing the provider to `declare_grids`.
#[derive(Default)]
pub struct StaticGridsProvider {
    grids: IndexMap<String, Grid>,
    fields: IndexMap<(String, String), FieldIdentifier>,
}

impl StaticGridsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a grid to the catalog.
    pub fn add_grid(&mut self, grid: Grid) {
        self.grids.insert(grid.name().to_string(), grid);
    }

    /// Add a simulation field's identity to the catalog.
    pub fn add_field_identifier(&mut self, id: FieldIdentifier) {
        self.fields.insert(
            (id.grid_name().to_string(), id.name().to_string()),
            id,
        );
    }

    /// Add an existing field's identity to the catalog.
    pub fn register_field(&mut self, field: &Field) {
        self.add_field_identifier(field.identifier().clone());
    }
}

impl GridsProvider for StaticGridsProvider {
    fn grid(&self, name: &str) -> Option<&Grid> {
        self.grids.get(name)
    }

    fn field_identifier(&self, field_name: &str, grid_name: &str) -> Option<FieldIdentifier> {
        self.fields
            .get(&(grid_name.to_string(), field_name.to_string()))
            .cloned()
    }
}

/// Allocate a field and fill it with the given values.
pub fn field_with_values(
    name: &str,
    layout: FieldLayout,
    unit: Unit,
    grid_name: &str,
    values: &[f64],
) -> Field {
    let field = Field::new(FieldIdentifier::new(name, layout, unit, grid_name));
    field
        .set_values(values)
        .expect("fixture values must match the layout size");
    field
}

/// Allocate a field filled with a constant value.
pub fn uniform_field(
    name: &str,
    layout: FieldLayout,
    unit: Unit,
    grid_name: &str,
    value: f64,
) -> Field {
    let size = layout.size();
    field_with_values(name, layout, unit, grid_name, &vec![value; size])
}

/// Deterministic pseudo-random values in `[0, 1)` for test data.
///
/// Same seed, same sequence; keeps cross-run comparisons stable.
pub fn random_values(seed: u64, n: usize) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.random::<f64>()).collect()
}
