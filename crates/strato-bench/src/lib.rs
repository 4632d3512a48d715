//! Benchmark scenarios for the Strato diagnostics framework.
//!
//! Provides pre-built, initialized diagnostics over a realistically
//! sized grid so benches measure steady-state `compute` cost rather
//! than setup.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use strato_diagnostic::{Diagnostic, ParameterList};
use strato_diagnostics::{BinaryOp, BinaryOpDiag};
use strato_field::Grid;
use strato_test_utils::{random_values, uniform_field, StaticGridsProvider};
use strato_units::K;

/// The benchmark grid: 128 columns by 72 midpoint levels (9216 cells).
pub fn reference_grid() -> Grid {
    Grid::new("physics", 128, 72)
}

/// Build a fully initialized binary-operator diagnostic over the
/// reference grid, with deterministic pseudo-random input data.
///
/// The two-field operators read fields `a` and `b` (both kelvin, so the
/// scenario also works for `plus`/`minus`); the constant-scaled
/// operators read only `a`.
pub fn binary_op_scenario(op: BinaryOp) -> BinaryOpDiag {
    let grid = reference_grid();
    let layout = grid.scalar_3d_mid();
    let size = layout.size();

    let a = uniform_field("a", layout.clone(), K, grid.name(), 0.0);
    a.set_values(&random_values(1, size))
        .expect("scenario values match the layout");
    let b = uniform_field("b", layout, K, grid.name(), 0.0);
    b.set_values(&random_values(2, size))
        .expect("scenario values match the layout");

    let mut provider = StaticGridsProvider::new();
    provider.add_grid(grid.clone());
    provider.register_field(&a);
    provider.register_field(&b);

    let mut params = ParameterList::new();
    params.set("field_1", "a");
    if op.needs_second_field() {
        params.set("field_2", "b");
    }
    params.set("binary_op", op.name());
    params.set("grid_name", grid.name());

    let mut diag = BinaryOpDiag::new(params).expect("scenario configuration is valid");
    diag.declare_grids(&provider)
        .expect("scenario grids resolve");
    diag.set_required_field(a).expect("field a is declared");
    if op.needs_second_field() {
        diag.set_required_field(b).expect("field b is declared");
    }
    diag.initialize().expect("scenario inputs are compatible");
    diag
}
