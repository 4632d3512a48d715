//! The [`Diagnostic`] trait: the lifecycle contract every derived-quantity
//! implementation follows.
//!
//! Lifecycle: declare-grids → initialize → compute (re-enterable) →
//! finalize. The provided wrapper methods enforce the state machine and
//! delegate to the `_impl` hooks; concrete diagnostics implement only the
//! hooks. Errors at any transition are non-recoverable for the instance:
//! the composition aborts startup rather than proceed with a
//! partially-valid diagnostic.

use crate::error::DiagnosticError;
use crate::ledger::RequestLedger;
use crate::params::ParameterList;
use crate::request::FieldRequest;
use std::fmt;
use strato_field::{Field, FieldIdentifier, Grid, TimeStamp};

/// Where a diagnostic instance is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    /// Constructed; grids not yet declared.
    Created,
    /// Field requests declared; awaiting binding and initialization.
    Declared,
    /// Initialized; output materialized, ready for the first compute.
    Initialized,
    /// Steady state: computed at least once, re-enterable.
    Ready,
    /// Finalized; no further calls are valid.
    Finalized,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Declared => write!(f, "declared"),
            Self::Initialized => write!(f, "initialized"),
            Self::Ready => write!(f, "ready"),
            Self::Finalized => write!(f, "finalized"),
        }
    }
}

/// The orchestrator's view of available grids and simulation fields,
/// injected into `declare_grids`.
///
/// A diagnostic typically knows its inputs only by name and grid; the
/// provider supplies the full identifier (layout, unit) so requests can
/// be declared with exact identity.
pub trait GridsProvider {
    /// Look up a grid by name.
    fn grid(&self, name: &str) -> Option<&Grid>;

    /// Full identifier of a simulation field, by name and grid.
    fn field_identifier(&self, field_name: &str, grid_name: &str) -> Option<FieldIdentifier>;
}

/// Per-instance state every concrete diagnostic owns: the request
/// ledger, the lifecycle state, and the parameter block it was
/// constructed from.
#[derive(Debug)]
pub struct DiagnosticCore {
    params: ParameterList,
    ledger: RequestLedger,
    state: LifecycleState,
}

impl DiagnosticCore {
    /// Create the core for a freshly constructed diagnostic.
    pub fn new(params: ParameterList) -> Self {
        Self {
            params,
            ledger: RequestLedger::new(),
            state: LifecycleState::Created,
        }
    }

    /// The parameter block the diagnostic was configured from.
    pub fn params(&self) -> &ParameterList {
        &self.params
    }

    /// The request ledger.
    pub fn ledger(&self) -> &RequestLedger {
        &self.ledger
    }

    /// Mutable access to the request ledger.
    pub fn ledger_mut(&mut self) -> &mut RequestLedger {
        &mut self.ledger
    }

    /// The current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    fn set_state(&mut self, state: LifecycleState) {
        self.state = state;
    }
}

fn require_state(
    diagnostic: &str,
    state: LifecycleState,
    operation: &'static str,
    allowed: &[LifecycleState],
) -> Result<(), DiagnosticError> {
    if allowed.contains(&state) {
        Ok(())
    } else {
        Err(DiagnosticError::InvalidTransition {
            diagnostic: diagnostic.to_string(),
            operation,
            state,
        })
    }
}

/// A component that computes a derived field from one or more existing
/// fields.
///
/// # Contract
///
/// - `compute()` MUST be deterministic and pure with respect to current
///   input contents: it recomputes the bound outputs entirely from the
///   bound inputs, with no side effects beyond its own output buffers
///   and their provenance timestamps.
/// - Bound inputs are never mutated; they are shared with their upstream
///   owner. Output fields are exclusively owned by the diagnostic.
/// - The lifecycle calls never overlap for one instance; ordering is the
///   orchestrator's responsibility.
///
/// # Object safety
///
/// This trait is object-safe; the orchestrator stores diagnostics in a
/// [`DiagnosticRegistry`](crate::DiagnosticRegistry) as
/// `Box<dyn Diagnostic>`.
///
/// Concrete diagnostics implement `name()`, the core accessors, and the
/// `_impl` hooks; callers go through the provided wrappers, which enforce
/// the state machine.
pub trait Diagnostic: Send {
    /// Stable identifier of the diagnostic kind, used in error messages
    /// and output-field naming.
    fn name(&self) -> &str;

    /// The per-instance core state.
    fn core(&self) -> &DiagnosticCore;

    /// Mutable access to the per-instance core state.
    fn core_mut(&mut self) -> &mut DiagnosticCore;

    /// Declaration hook: call `add_field` on the ledger for every input
    /// and output the diagnostic needs, scoped to grids supplied by the
    /// provider.
    fn declare_grids_impl(&mut self, grids: &dyn GridsProvider) -> Result<(), DiagnosticError>;

    /// Initialization hook: validate cross-field compatibility and
    /// materialize the Computed output field(s). May assume all Required
    /// fields have been bound.
    fn initialize_impl(&mut self) -> Result<(), DiagnosticError>;

    /// Compute hook: recompute the bound output field(s) from the
    /// current bound input field(s).
    fn compute_impl(&mut self, timestamp: TimeStamp) -> Result<(), DiagnosticError>;

    /// Finalization hook: release diagnostic-private resources.
    fn finalize_impl(&mut self) -> Result<(), DiagnosticError> {
        Ok(())
    }

    /// The current lifecycle state.
    fn state(&self) -> LifecycleState {
        self.core().state()
    }

    /// Declare grid-scoped field requests. Valid exactly once, before
    /// initialization.
    fn declare_grids(&mut self, grids: &dyn GridsProvider) -> Result<(), DiagnosticError> {
        require_state(
            self.name(),
            self.state(),
            "declare_grids",
            &[LifecycleState::Created],
        )?;
        self.declare_grids_impl(grids)?;
        self.core_mut().set_state(LifecycleState::Declared);
        Ok(())
    }

    /// Initialize the diagnostic. All Required fields must already be
    /// bound via [`set_required_field`](Self::set_required_field).
    fn initialize(&mut self) -> Result<(), DiagnosticError> {
        require_state(
            self.name(),
            self.state(),
            "initialize",
            &[LifecycleState::Declared],
        )?;
        self.initialize_impl()?;
        self.core_mut().set_state(LifecycleState::Initialized);
        Ok(())
    }

    /// Recompute the outputs from the current inputs. May be invoked any
    /// number of times once initialized.
    fn compute(&mut self, timestamp: TimeStamp) -> Result<(), DiagnosticError> {
        require_state(
            self.name(),
            self.state(),
            "compute",
            &[LifecycleState::Initialized, LifecycleState::Ready],
        )?;
        self.compute_impl(timestamp)?;
        self.core_mut().set_state(LifecycleState::Ready);
        Ok(())
    }

    /// Release diagnostic-private resources. Valid once, after
    /// initialization.
    fn finalize(&mut self) -> Result<(), DiagnosticError> {
        require_state(
            self.name(),
            self.state(),
            "finalize",
            &[LifecycleState::Initialized, LifecycleState::Ready],
        )?;
        self.finalize_impl()?;
        self.core_mut().set_state(LifecycleState::Finalized);
        Ok(())
    }

    /// Bind an input field against the declared Required requests.
    fn set_required_field(&mut self, field: Field) -> Result<(), DiagnosticError> {
        let diagnostic = self.name().to_string();
        self.core_mut()
            .ledger_mut()
            .set_required_field(field)
            .map_err(|source| DiagnosticError::Binding { diagnostic, source })
    }

    /// Bind an output field against the declared Computed requests.
    fn set_computed_field(&mut self, field: Field) -> Result<(), DiagnosticError> {
        let diagnostic = self.name().to_string();
        self.core_mut()
            .ledger_mut()
            .set_computed_field(field)
            .map_err(|source| DiagnosticError::Binding { diagnostic, source })
    }

    /// Ordered view of the declared Required requests.
    fn required_field_requests(&self) -> &[FieldRequest] {
        self.core().ledger().required_field_requests()
    }

    /// Ordered view of the declared Computed requests.
    fn computed_field_requests(&self) -> &[FieldRequest] {
        self.core().ledger().computed_field_requests()
    }

    /// Ordered view of the bound input fields.
    fn fields_in(&self) -> &[Field] {
        self.core().ledger().fields_in()
    }

    /// Ordered view of the bound output fields.
    fn fields_out(&self) -> &[Field] {
        self.core().ledger().fields_out()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestKind;
    use strato_units::K;

    /// Declares one required field and counts hook invocations.
    struct CountingDiag {
        core: DiagnosticCore,
        initialized: usize,
        computed: usize,
        finalized: usize,
    }

    impl CountingDiag {
        fn new() -> Self {
            Self {
                core: DiagnosticCore::new(ParameterList::new()),
                initialized: 0,
                computed: 0,
                finalized: 0,
            }
        }
    }

    impl Diagnostic for CountingDiag {
        fn name(&self) -> &str {
            "CountingDiag"
        }

        fn core(&self) -> &DiagnosticCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut DiagnosticCore {
            &mut self.core
        }

        fn declare_grids_impl(
            &mut self,
            grids: &dyn GridsProvider,
        ) -> Result<(), DiagnosticError> {
            let grid = grids
                .grid("grid1")
                .ok_or_else(|| DiagnosticError::UnknownGrid {
                    diagnostic: "CountingDiag".to_string(),
                    grid: "grid1".to_string(),
                })?;
            self.core.ledger_mut().add_field(
                RequestKind::Required,
                "T_mid",
                grid.scalar_3d_mid(),
                K,
                grid.name(),
            );
            Ok(())
        }

        fn initialize_impl(&mut self) -> Result<(), DiagnosticError> {
            self.initialized += 1;
            Ok(())
        }

        fn compute_impl(&mut self, _timestamp: TimeStamp) -> Result<(), DiagnosticError> {
            self.computed += 1;
            Ok(())
        }

        fn finalize_impl(&mut self) -> Result<(), DiagnosticError> {
            self.finalized += 1;
            Ok(())
        }
    }

    struct OneGridProvider {
        grid: Grid,
    }

    impl OneGridProvider {
        fn new() -> Self {
            Self {
                grid: Grid::new("grid1", 4, 8),
            }
        }
    }

    impl GridsProvider for OneGridProvider {
        fn grid(&self, name: &str) -> Option<&Grid> {
            (self.grid.name() == name).then_some(&self.grid)
        }

        fn field_identifier(
            &self,
            field_name: &str,
            grid_name: &str,
        ) -> Option<FieldIdentifier> {
            (field_name == "T_mid" && grid_name == "grid1").then(|| {
                FieldIdentifier::new("T_mid", self.grid.scalar_3d_mid(), K, "grid1")
            })
        }
    }

    fn declared_diag() -> CountingDiag {
        let mut diag = CountingDiag::new();
        diag.declare_grids(&OneGridProvider::new()).unwrap();
        diag
    }

    fn bound_field(provider: &OneGridProvider) -> Field {
        Field::new(provider.field_identifier("T_mid", "grid1").unwrap())
    }

    #[test]
    fn full_lifecycle() {
        let provider = OneGridProvider::new();
        let mut diag = CountingDiag::new();
        assert_eq!(diag.state(), LifecycleState::Created);

        diag.declare_grids(&provider).unwrap();
        assert_eq!(diag.state(), LifecycleState::Declared);
        assert_eq!(diag.required_field_requests().len(), 1);

        diag.set_required_field(bound_field(&provider)).unwrap();
        diag.initialize().unwrap();
        assert_eq!(diag.state(), LifecycleState::Initialized);

        diag.compute(TimeStamp(1)).unwrap();
        diag.compute(TimeStamp(2)).unwrap();
        diag.compute(TimeStamp(3)).unwrap();
        assert_eq!(diag.state(), LifecycleState::Ready);
        assert_eq!(diag.computed, 3);

        diag.finalize().unwrap();
        assert_eq!(diag.state(), LifecycleState::Finalized);
        assert_eq!(diag.finalized, 1);
    }

    #[test]
    fn declare_grids_at_most_once() {
        let provider = OneGridProvider::new();
        let mut diag = declared_diag();
        let err = diag.declare_grids(&provider).unwrap_err();
        match err {
            DiagnosticError::InvalidTransition {
                operation, state, ..
            } => {
                assert_eq!(operation, "declare_grids");
                assert_eq!(state, LifecycleState::Declared);
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    #[test]
    fn compute_before_initialize_rejected() {
        let mut diag = declared_diag();
        assert!(matches!(
            diag.compute(TimeStamp(1)),
            Err(DiagnosticError::InvalidTransition {
                operation: "compute",
                ..
            })
        ));
        assert_eq!(diag.computed, 0);
    }

    #[test]
    fn initialize_before_declare_rejected() {
        let mut diag = CountingDiag::new();
        assert!(matches!(
            diag.initialize(),
            Err(DiagnosticError::InvalidTransition {
                operation: "initialize",
                ..
            })
        ));
    }

    #[test]
    fn no_calls_after_finalize() {
        let provider = OneGridProvider::new();
        let mut diag = declared_diag();
        diag.set_required_field(bound_field(&provider)).unwrap();
        diag.initialize().unwrap();
        diag.finalize().unwrap();

        assert!(diag.compute(TimeStamp(1)).is_err());
        assert!(diag.finalize().is_err());
        assert!(diag.initialize().is_err());
    }

    #[test]
    fn binding_error_names_the_diagnostic() {
        let mut diag = declared_diag();
        let stray = Field::new(FieldIdentifier::new(
            "q_mid",
            Grid::new("grid1", 4, 8).scalar_3d_mid(),
            K,
            "grid1",
        ));
        let err = diag.set_required_field(stray).unwrap_err();
        match err {
            DiagnosticError::Binding { diagnostic, .. } => {
                assert_eq!(diagnostic, "CountingDiag");
            }
            other => panic!("expected Binding, got {other:?}"),
        }
    }
}
