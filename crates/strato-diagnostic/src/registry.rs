//! The orchestrator-owned store of diagnostic instances.

use crate::diagnostic::Diagnostic;
use std::fmt;

/// Stable index of a diagnostic within a [`DiagnosticRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiagnosticId(pub usize);

impl fmt::Display for DiagnosticId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Holds diagnostic instances and hands out stable ids.
///
/// The registry is owned by the orchestrator; diagnostics never hold
/// handles to themselves. Ids are assigned sequentially at registration
/// and remain valid for the registry's lifetime. Nothing is ever
/// removed; a failed diagnostic aborts the whole composition instead.
#[derive(Default)]
pub struct DiagnosticRegistry {
    diagnostics: Vec<Box<dyn Diagnostic>>,
}

impl DiagnosticRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a diagnostic, returning its stable id.
    pub fn register(&mut self, diagnostic: Box<dyn Diagnostic>) -> DiagnosticId {
        let id = DiagnosticId(self.diagnostics.len());
        self.diagnostics.push(diagnostic);
        id
    }

    /// Shared access to a diagnostic by id.
    pub fn get(&self, id: DiagnosticId) -> Option<&dyn Diagnostic> {
        self.diagnostics.get(id.0).map(|d| &**d)
    }

    /// Mutable access to a diagnostic by id.
    pub fn get_mut(&mut self, id: DiagnosticId) -> Option<&mut (dyn Diagnostic + 'static)> {
        self.diagnostics.get_mut(id.0).map(|d| &mut **d)
    }

    /// Number of registered diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Iterate over the registered diagnostics in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Diagnostic> {
        self.diagnostics.iter().map(|d| &**d)
    }

    /// Mutable iteration in registration order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (dyn Diagnostic + 'static)> {
        self.diagnostics.iter_mut().map(|d| &mut **d)
    }
}

impl fmt::Debug for DiagnosticRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|d| d.name().to_string()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{DiagnosticCore, GridsProvider};
    use crate::error::DiagnosticError;
    use crate::params::ParameterList;
    use strato_field::TimeStamp;

    struct Named {
        core: DiagnosticCore,
        name: &'static str,
    }

    impl Named {
        fn boxed(name: &'static str) -> Box<dyn Diagnostic> {
            Box::new(Self {
                core: DiagnosticCore::new(ParameterList::new()),
                name,
            })
        }
    }

    impl Diagnostic for Named {
        fn name(&self) -> &str {
            self.name
        }
        fn core(&self) -> &DiagnosticCore {
            &self.core
        }
        fn core_mut(&mut self) -> &mut DiagnosticCore {
            &mut self.core
        }
        fn declare_grids_impl(
            &mut self,
            _grids: &dyn GridsProvider,
        ) -> Result<(), DiagnosticError> {
            Ok(())
        }
        fn initialize_impl(&mut self) -> Result<(), DiagnosticError> {
            Ok(())
        }
        fn compute_impl(&mut self, _timestamp: TimeStamp) -> Result<(), DiagnosticError> {
            Ok(())
        }
    }

    #[test]
    fn ids_are_stable_and_sequential() {
        let mut registry = DiagnosticRegistry::new();
        let a = registry.register(Named::boxed("a"));
        let b = registry.register(Named::boxed("b"));

        assert_eq!(a, DiagnosticId(0));
        assert_eq!(b, DiagnosticId(1));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(a).unwrap().name(), "a");
        assert_eq!(registry.get(b).unwrap().name(), "b");
        assert!(registry.get(DiagnosticId(2)).is_none());
    }

    #[test]
    fn iteration_preserves_registration_order() {
        let mut registry = DiagnosticRegistry::new();
        registry.register(Named::boxed("first"));
        registry.register(Named::boxed("second"));
        let names: Vec<_> = registry.iter().map(|d| d.name().to_string()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
