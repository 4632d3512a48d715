//! Named grids and their standard layout factories.

use crate::layout::{FieldLayout, FieldTag};

/// A named discretization of physical space over which fields are defined.
///
/// A grid carries the two structural extents every atmosphere layout is
/// built from: the number of horizontal columns and the number of
/// vertical midpoint levels. The layout factories produce the standard
/// shapes so that callers never assemble tag sequences by hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    name: String,
    num_cols: usize,
    num_levs: usize,
}

impl Grid {
    /// Create a grid with the given column and midpoint-level counts.
    pub fn new(name: impl Into<String>, num_cols: usize, num_levs: usize) -> Self {
        Self {
            name: name.into(),
            num_cols,
            num_levs,
        }
    }

    /// The grid name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of horizontal columns.
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Number of vertical midpoint levels.
    pub fn num_levs(&self) -> usize {
        self.num_levs
    }

    /// Layout of a horizontal scalar field: `<COL>`.
    pub fn scalar_2d(&self) -> FieldLayout {
        FieldLayout::new([(FieldTag::Column, self.num_cols)])
    }

    /// Layout of a scalar field at level midpoints: `<COL,LEV>`.
    pub fn scalar_3d_mid(&self) -> FieldLayout {
        FieldLayout::new([
            (FieldTag::Column, self.num_cols),
            (FieldTag::Level, self.num_levs),
        ])
    }

    /// Layout of a scalar field at level interfaces: `<COL,ILEV>`,
    /// one more entry than midpoints in the vertical.
    pub fn scalar_3d_int(&self) -> FieldLayout {
        FieldLayout::new([
            (FieldTag::Column, self.num_cols),
            (FieldTag::Interface, self.num_levs + 1),
        ])
    }

    /// Layout of an `n`-component vector field at level midpoints:
    /// `<COL,CMP,LEV>`.
    pub fn vector_3d_mid(&self, n: usize) -> FieldLayout {
        FieldLayout::new([
            (FieldTag::Column, self.num_cols),
            (FieldTag::Component, n),
            (FieldTag::Level, self.num_levs),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_factories() {
        let grid = Grid::new("physics", 8, 72);
        assert_eq!(grid.scalar_2d().to_string(), "<COL>(8)");
        assert_eq!(grid.scalar_3d_mid().to_string(), "<COL,LEV>(8,72)");
        assert_eq!(grid.scalar_3d_int().to_string(), "<COL,ILEV>(8,73)");
        assert_eq!(grid.vector_3d_mid(3).to_string(), "<COL,CMP,LEV>(8,3,72)");
        assert_eq!(grid.scalar_3d_mid().size(), 8 * 72);
    }
}
