//! Unit algebra and physical constants for the Strato diagnostics framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! dimensional-analysis algebra ([`Unit`]) used to validate and combine
//! physical units, and the process-wide constants registry
//! ([`Constants`], [`constants`]) in which every numeric constant carries
//! its unit.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod constants;
mod units;

pub use constants::{constants, gas_mol_weight, Constants, PhysicalConstant};
pub use units::{Unit, A, CD, J, K, KG, M, MOL, PA, S};
