//! Field layouts: ordered dimension tags with extents.

use smallvec::SmallVec;
use std::fmt;

/// Tag classifying one dimension of a field layout.
///
/// Tags identify what a dimension ranges over, independent of its
/// extent. Matching is exact: a `Level` dimension never lines up with an
/// `Interface` dimension even when the extents agree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldTag {
    /// Horizontal column index.
    Column,
    /// Vertical level midpoint index.
    Level,
    /// Vertical level interface index (one more than midpoints).
    Interface,
    /// Vector/tensor component index.
    Component,
}

impl FieldTag {
    /// The short tag name used in layout strings.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Column => "COL",
            Self::Level => "LEV",
            Self::Interface => "ILEV",
            Self::Component => "CMP",
        }
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Ordered sequence of `(tag, extent)` pairs describing a field's shape.
///
/// Two layouts are equal iff the tag sequence and the extents match
/// exactly; equality is required wherever two fields must line up for an
/// elementwise operation. Up to four dimensions are stored inline
/// (covering every layout the framework produces); larger ranks spill to
/// the heap transparently.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldLayout {
    dims: SmallVec<[(FieldTag, usize); 4]>,
}

impl FieldLayout {
    /// Build a layout from `(tag, extent)` pairs, in order.
    pub fn new(dims: impl IntoIterator<Item = (FieldTag, usize)>) -> Self {
        Self {
            dims: dims.into_iter().collect(),
        }
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Total number of scalar entries: the product of all extents.
    /// A rank-0 layout has size 1.
    pub fn size(&self) -> usize {
        self.dims.iter().map(|&(_, extent)| extent).product()
    }

    /// The ordered `(tag, extent)` pairs.
    pub fn dims(&self) -> &[(FieldTag, usize)] {
        &self.dims
    }

    /// Iterator over the dimension tags, in order.
    pub fn tags(&self) -> impl Iterator<Item = FieldTag> + '_ {
        self.dims.iter().map(|&(tag, _)| tag)
    }

    /// Iterator over the extents, in order.
    pub fn extents(&self) -> impl Iterator<Item = usize> + '_ {
        self.dims.iter().map(|&(_, extent)| extent)
    }

    /// Whether any dimension carries the given tag.
    pub fn has_tag(&self, tag: FieldTag) -> bool {
        self.dims.iter().any(|&(t, _)| t == tag)
    }
}

impl fmt::Display for FieldLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<")?;
        for (i, (tag, _)) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{tag}")?;
        }
        write!(f, ">(")?;
        for (i, (_, extent)) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{extent}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_tag() -> impl Strategy<Value = FieldTag> {
        prop_oneof![
            Just(FieldTag::Column),
            Just(FieldTag::Level),
            Just(FieldTag::Interface),
            Just(FieldTag::Component),
        ]
    }

    fn arb_layout() -> impl Strategy<Value = FieldLayout> {
        prop::collection::vec((arb_tag(), 1usize..64), 0..4).prop_map(FieldLayout::new)
    }

    proptest! {
        #[test]
        fn size_is_extent_product(layout in arb_layout()) {
            let expected: usize = layout.extents().product();
            prop_assert_eq!(layout.size(), expected);
        }

        #[test]
        fn equality_is_reflexive(layout in arb_layout()) {
            prop_assert_eq!(layout.clone(), layout);
        }

        #[test]
        fn extent_change_breaks_equality(layout in arb_layout()) {
            prop_assume!(layout.rank() > 0);
            let mut dims: Vec<_> = layout.dims().to_vec();
            dims[0].1 += 1;
            prop_assert_ne!(FieldLayout::new(dims), layout);
        }
    }

    #[test]
    fn tag_order_matters() {
        let a = FieldLayout::new([(FieldTag::Column, 4), (FieldTag::Level, 72)]);
        let b = FieldLayout::new([(FieldTag::Level, 72), (FieldTag::Column, 4)]);
        assert_ne!(a, b);
    }

    #[test]
    fn tag_identity_matters() {
        let mid = FieldLayout::new([(FieldTag::Column, 4), (FieldTag::Level, 72)]);
        let int = FieldLayout::new([(FieldTag::Column, 4), (FieldTag::Interface, 72)]);
        assert_ne!(mid, int);
    }

    #[test]
    fn rank0_size_is_one() {
        assert_eq!(FieldLayout::new([]).size(), 1);
    }

    #[test]
    fn display_rendering() {
        let layout = FieldLayout::new([(FieldTag::Column, 10), (FieldTag::Level, 20)]);
        assert_eq!(layout.to_string(), "<COL,LEV>(10,20)");
        assert_eq!(FieldLayout::new([]).to_string(), "<>()");
    }
}
