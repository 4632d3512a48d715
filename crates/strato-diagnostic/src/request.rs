//! Field requests: declared intent to consume or produce a field.

use std::fmt;
use strato_field::FieldIdentifier;

/// Whether a request names a field the diagnostic consumes or produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// The diagnostic reads this field; the orchestrator must bind it
    /// before `initialize()`.
    Required,
    /// The diagnostic produces this field and owns its storage.
    Computed,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::Computed => write!(f, "computed"),
        }
    }
}

/// A diagnostic's declared need for, or production of, a field with an
/// exact identifier.
///
/// Requests are created during the declaration phase and immutable
/// afterward. Binding a concrete field succeeds only when its identifier
/// exactly equals a declared request of the matching kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldRequest {
    kind: RequestKind,
    id: FieldIdentifier,
}

impl FieldRequest {
    /// Construct a request.
    pub fn new(kind: RequestKind, id: FieldIdentifier) -> Self {
        Self { kind, id }
    }

    /// The request kind.
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    /// The requested field identifier.
    pub fn identifier(&self) -> &FieldIdentifier {
        &self.id
    }
}

impl fmt::Display for FieldRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}
