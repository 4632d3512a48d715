//! Field identity model and field storage for the Strato framework.
//!
//! Defines the immutable descriptors that key all field matching and
//! lookup ([`FieldLayout`], [`FieldIdentifier`]) together with the
//! named [`Grid`] discretization and the [`Field`] handle: identifier
//! plus provenance metadata plus a data buffer conforming to the layout.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod field;
mod grid;
mod identifier;
mod layout;

pub use field::{Field, FieldError, TimeStamp};
pub use grid::Grid;
pub use identifier::{DataType, FieldIdentifier};
pub use layout::{FieldLayout, FieldTag};
