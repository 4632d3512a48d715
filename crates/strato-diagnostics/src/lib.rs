//! Concrete diagnostics for the Strato framework.
//!
//! Each diagnostic here implements the
//! [`Diagnostic`](strato_diagnostic::Diagnostic) lifecycle contract:
//!
//! - [`BinaryOpDiag`]: combines two fields (or a field and a physical
//!   constant) with a unit-aware arithmetic operator.
//! - [`FieldCopyDiag`]: publishes a field under an alias name.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod binary_op;
pub mod identity;

pub use binary_op::{binary_operator_code, BinaryOp, BinaryOpDiag};
pub use identity::FieldCopyDiag;
