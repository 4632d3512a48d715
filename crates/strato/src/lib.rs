//! Strato: diagnostic composition for atmospheric simulations.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Strato sub-crates. For most users, adding `strato` as a
//! single dependency is sufficient.
//!
//! A diagnostic declares the fields it needs and produces through a
//! request ledger; the surrounding orchestrator resolves those requests
//! against available simulation fields, binds concrete handles, and
//! drives the lifecycle: declare-grids → initialize → compute →
//! finalize.
//!
//! # Quick start
//!
//! ```rust
//! use strato::prelude::*;
//! use strato::units::K;
//!
//! // The orchestrator's catalog of grids and known simulation fields.
//! struct OneGrid {
//!     grid: Grid,
//!     ids: Vec<FieldIdentifier>,
//! }
//!
//! impl GridsProvider for OneGrid {
//!     fn grid(&self, name: &str) -> Option<&Grid> {
//!         (self.grid.name() == name).then_some(&self.grid)
//!     }
//!     fn field_identifier(&self, field_name: &str, grid_name: &str) -> Option<FieldIdentifier> {
//!         self.ids
//!             .iter()
//!             .find(|id| id.name() == field_name && id.grid_name() == grid_name)
//!             .cloned()
//!     }
//! }
//!
//! // Two kelvin fields on a 4-column, 8-level grid.
//! let grid = Grid::new("physics", 4, 8);
//! let layout = grid.scalar_3d_mid();
//! let a = Field::new(FieldIdentifier::new("T_a", layout.clone(), K, "physics"));
//! let b = Field::new(FieldIdentifier::new("T_b", layout.clone(), K, "physics"));
//! a.fill(1.0).unwrap();
//! b.fill(1.0).unwrap();
//!
//! let provider = OneGrid {
//!     grid,
//!     ids: vec![a.identifier().clone(), b.identifier().clone()],
//! };
//!
//! // A diagnostic summing the two fields.
//! let mut params = ParameterList::new();
//! params.set("field_1", "T_a");
//! params.set("field_2", "T_b");
//! params.set("binary_op", "plus");
//! params.set("grid_name", "physics");
//! let mut diag = BinaryOpDiag::new(params).unwrap();
//!
//! diag.declare_grids(&provider).unwrap();
//! diag.set_required_field(a).unwrap();
//! diag.set_required_field(b).unwrap();
//! diag.initialize().unwrap();
//! diag.compute(TimeStamp(1)).unwrap();
//!
//! let out = &diag.fields_out()[0];
//! assert_eq!(out.name(), "T_a_plus_T_b");
//! assert_eq!(out.identifier().unit(), K);
//! assert_eq!(out.values().unwrap(), vec![2.0; layout.size()]);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`units`] | `strato-units` | Unit algebra, physical constants |
//! | [`field`] | `strato-field` | Layouts, identifiers, grids, fields |
//! | [`diagnostic`] | `strato-diagnostic` | Request ledger, lifecycle contract, registry |
//! | [`diagnostics`] | `strato-diagnostics` | Concrete diagnostics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Unit algebra and the physical-constants registry.
pub mod units {
    pub use strato_units::*;
}

/// Field identity model, grids, and field storage.
pub mod field {
    pub use strato_field::*;
}

/// Request ledger, lifecycle contract, parameters, and registry.
pub mod diagnostic {
    pub use strato_diagnostic::*;
}

/// Concrete diagnostics.
pub mod diagnostics {
    pub use strato_diagnostics::*;
}

/// The most commonly used types, re-exported in one place.
pub mod prelude {
    pub use strato_diagnostic::{
        Diagnostic, DiagnosticError, DiagnosticId, DiagnosticRegistry, GridsProvider,
        LifecycleState, ParameterList, RequestKind,
    };
    pub use strato_diagnostics::{BinaryOp, BinaryOpDiag, FieldCopyDiag};
    pub use strato_field::{
        DataType, Field, FieldIdentifier, FieldLayout, FieldTag, Grid, TimeStamp,
    };
    pub use strato_units::{constants, PhysicalConstant, Unit};
}
