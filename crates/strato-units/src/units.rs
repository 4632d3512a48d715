//! The [`Unit`] type: integer dimension exponents over the SI base set.

use std::fmt;
use std::ops::{Div, Mul};

/// Number of base dimensions tracked: kg, m, s, K, mol, A, cd.
const NUM_BASES: usize = 7;

/// Symbols for the base dimensions, in exponent-array order.
const BASE_SYMBOLS: [&str; NUM_BASES] = ["kg", "m", "s", "K", "mol", "A", "cd"];

/// A physical unit as a vector of integer exponents over the seven SI
/// base dimensions (mass, length, time, temperature, amount, current,
/// luminous intensity).
///
/// Units form a commutative group under multiplication: [`Mul`], [`Div`],
/// and [`Unit::pow`] are pure and never fail. Equality is exact structural
/// equality of the exponent vector (dimensions are integers, so there is
/// no tolerance). Two units are compatible for addition/subtraction iff
/// they are equal.
///
/// # Examples
///
/// ```
/// use strato_units::{Unit, KG, M, S};
///
/// let density = KG / M.pow(3);
/// let velocity = M / S;
/// assert_eq!(density * velocity, KG / (M.pow(2) * S));
/// assert_ne!(density, Unit::nondimensional());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Unit {
    exps: [i8; NUM_BASES],
}

/// Mass: kilogram.
pub const KG: Unit = Unit::base(0);
/// Length: metre.
pub const M: Unit = Unit::base(1);
/// Time: second.
pub const S: Unit = Unit::base(2);
/// Temperature: kelvin.
pub const K: Unit = Unit::base(3);
/// Amount of substance: mole.
pub const MOL: Unit = Unit::base(4);
/// Electric current: ampere.
pub const A: Unit = Unit::base(5);
/// Luminous intensity: candela.
pub const CD: Unit = Unit::base(6);

/// Pressure: pascal (kg m^-1 s^-2).
pub const PA: Unit = Unit {
    exps: [1, -1, -2, 0, 0, 0, 0],
};
/// Energy: joule (kg m^2 s^-2).
pub const J: Unit = Unit {
    exps: [1, 2, -2, 0, 0, 0, 0],
};

impl Unit {
    /// The dimensionless unit (all exponents zero).
    pub const fn nondimensional() -> Self {
        Self {
            exps: [0; NUM_BASES],
        }
    }

    const fn base(index: usize) -> Self {
        let mut exps = [0i8; NUM_BASES];
        exps[index] = 1;
        Self { exps }
    }

    /// Raise the unit to an integer power. `pow(0)` is nondimensional,
    /// negative powers invert.
    pub fn pow(self, n: i32) -> Self {
        let mut exps = [0i8; NUM_BASES];
        for (out, &e) in exps.iter_mut().zip(self.exps.iter()) {
            *out = (e as i32 * n) as i8;
        }
        Self { exps }
    }

    /// The reciprocal unit, `self.pow(-1)`.
    pub fn recip(self) -> Self {
        self.pow(-1)
    }

    /// Whether all exponents are zero.
    pub fn is_nondimensional(self) -> bool {
        self.exps == [0; NUM_BASES]
    }
}

impl Mul for Unit {
    type Output = Unit;

    fn mul(self, rhs: Unit) -> Unit {
        let mut exps = [0i8; NUM_BASES];
        for i in 0..NUM_BASES {
            exps[i] = self.exps[i] + rhs.exps[i];
        }
        Unit { exps }
    }
}

impl Div for Unit {
    type Output = Unit;

    fn div(self, rhs: Unit) -> Unit {
        let mut exps = [0i8; NUM_BASES];
        for i in 0..NUM_BASES {
            exps[i] = self.exps[i] - rhs.exps[i];
        }
        Unit { exps }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nondimensional() {
            return write!(f, "1");
        }
        let mut first = true;
        for (symbol, &e) in BASE_SYMBOLS.iter().zip(self.exps.iter()) {
            if e == 0 {
                continue;
            }
            if !first {
                write!(f, " ")?;
            }
            first = false;
            if e == 1 {
                write!(f, "{symbol}")?;
            } else {
                write!(f, "{symbol}^{e}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_unit() -> impl Strategy<Value = Unit> {
        prop::array::uniform7(-4i8..=4).prop_map(|exps| Unit { exps })
    }

    proptest! {
        #[test]
        fn mul_commutative(a in arb_unit(), b in arb_unit()) {
            prop_assert_eq!(a * b, b * a);
        }

        #[test]
        fn mul_associative(a in arb_unit(), b in arb_unit(), c in arb_unit()) {
            prop_assert_eq!((a * b) * c, a * (b * c));
        }

        #[test]
        fn nondimensional_is_identity(a in arb_unit()) {
            prop_assert_eq!(a * Unit::nondimensional(), a);
            prop_assert_eq!(a / Unit::nondimensional(), a);
        }

        #[test]
        fn div_inverts_mul(a in arb_unit(), b in arb_unit()) {
            prop_assert_eq!(a * b / b, a);
        }

        #[test]
        fn self_division_is_nondimensional(a in arb_unit()) {
            prop_assert_eq!(a / a, Unit::nondimensional());
        }

        #[test]
        fn pow_matches_repeated_mul(a in arb_unit(), n in 0i32..=5) {
            let mut expected = Unit::nondimensional();
            for _ in 0..n {
                expected = expected * a;
            }
            prop_assert_eq!(a.pow(n), expected);
        }

        #[test]
        fn recip_cancels(a in arb_unit()) {
            prop_assert_eq!(a * a.recip(), Unit::nondimensional());
        }
    }

    #[test]
    fn named_composites() {
        assert_eq!(PA, KG / (M * S.pow(2)));
        assert_eq!(J, KG * M.pow(2) / S.pow(2));
        assert_eq!(J / (KG * K), M.pow(2) / (S.pow(2) * K));
    }

    #[test]
    fn equality_is_exact() {
        assert_eq!(K, K);
        assert_ne!(K, K.pow(2));
        assert_ne!(KG / M.pow(3), KG / M.pow(2));
    }

    #[test]
    fn display_rendering() {
        assert_eq!(Unit::nondimensional().to_string(), "1");
        assert_eq!(K.to_string(), "K");
        assert_eq!((KG / M.pow(3)).to_string(), "kg m^-3");
        assert_eq!((M / S.pow(2)).to_string(), "m s^-2");
    }
}
