//! Immutable field identifiers: the key for all field matching.

use crate::layout::FieldLayout;
use std::fmt;
use strato_units::Unit;

/// Numeric datatype of a field's storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 64-bit floating point.
    Real,
    /// 64-bit signed integer.
    Int,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real => write!(f, "real"),
            Self::Int => write!(f, "int"),
        }
    }
}

/// Uniquely identifies a field within a grid's namespace.
///
/// An identifier is the quadruple (name, layout, unit, grid name),
/// immutable once constructed. Two identifiers are equal iff all four
/// components match; identifier equality is the matching rule for
/// request/field binding throughout the framework.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldIdentifier {
    name: String,
    layout: FieldLayout,
    unit: Unit,
    grid_name: String,
}

impl FieldIdentifier {
    /// Construct an identifier.
    pub fn new(
        name: impl Into<String>,
        layout: FieldLayout,
        unit: Unit,
        grid_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            layout,
            unit,
            grid_name: grid_name.into(),
        }
    }

    /// The field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field layout.
    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    /// The field unit.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// The name of the grid the field resides on.
    pub fn grid_name(&self) -> &str {
        &self.grid_name
    }
}

impl fmt::Display for FieldIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] {} [{}]",
            self.name, self.grid_name, self.layout, self.unit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FieldTag;
    use strato_units::K;

    fn layout() -> FieldLayout {
        FieldLayout::new([(FieldTag::Column, 4), (FieldTag::Level, 72)])
    }

    #[test]
    fn equality_requires_all_four_components() {
        let base = FieldIdentifier::new("T_mid", layout(), K, "physics");
        assert_eq!(base, FieldIdentifier::new("T_mid", layout(), K, "physics"));

        assert_ne!(base, FieldIdentifier::new("T_int", layout(), K, "physics"));
        assert_ne!(
            base,
            FieldIdentifier::new(
                "T_mid",
                FieldLayout::new([(FieldTag::Column, 4), (FieldTag::Level, 73)]),
                K,
                "physics"
            )
        );
        assert_ne!(
            base,
            FieldIdentifier::new("T_mid", layout(), K.pow(2), "physics")
        );
        assert_ne!(base, FieldIdentifier::new("T_mid", layout(), K, "dynamics"));
    }

    #[test]
    fn id_string_names_every_component() {
        let id = FieldIdentifier::new("T_mid", layout(), K, "physics");
        assert_eq!(id.to_string(), "T_mid[physics] <COL,LEV>(4,72) [K]");
    }
}
