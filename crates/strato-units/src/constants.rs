//! Physical constants with units, and the process-wide [`Constants`] registry.
//!
//! Every constant is a [`PhysicalConstant`]: a numeric value paired with
//! its [`Unit`]. Derived constants are expressed through the arithmetic
//! on `PhysicalConstant`, so their units are the dimensionally-correct
//! combination of their inputs by construction.

use crate::units::{Unit, J, K, KG, M, MOL, PA, S};
use std::fmt;
use std::ops::{Div, Mul};
use std::sync::OnceLock;

/// A numeric constant paired with its physical unit.
///
/// Immutable once constructed. The raw value is available both as the
/// public `value` field (for numeric call sites) and via
/// `From<PhysicalConstant> for f64`; both views read the same `f64`, so
/// there is no precision loss between them.
///
/// Multiplication and division combine values and units together, which
/// is how derived constants keep their units consistent:
///
/// ```
/// use strato_units::constants;
///
/// let c = constants();
/// assert_eq!(c.inv_rho_h2o.unit, c.rho_h2o.unit.recip());
/// assert_eq!(c.inv_rho_h2o.value, 1.0 / c.rho_h2o.value);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalConstant {
    /// The numeric value.
    pub value: f64,
    /// The unit attached to the value.
    pub unit: Unit,
}

impl PhysicalConstant {
    /// Construct a constant from a value and a unit.
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// The reciprocal constant: inverse value, inverse unit.
    pub fn recip(self) -> Self {
        Self {
            value: 1.0 / self.value,
            unit: self.unit.recip(),
        }
    }

    /// Scale the value by a dimensionless factor, keeping the unit.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            value: self.value * factor,
            unit: self.unit,
        }
    }
}

impl Mul for PhysicalConstant {
    type Output = PhysicalConstant;

    fn mul(self, rhs: PhysicalConstant) -> PhysicalConstant {
        PhysicalConstant {
            value: self.value * rhs.value,
            unit: self.unit * rhs.unit,
        }
    }
}

impl Div for PhysicalConstant {
    type Output = PhysicalConstant;

    fn div(self, rhs: PhysicalConstant) -> PhysicalConstant {
        PhysicalConstant {
            value: self.value / rhs.value,
            unit: self.unit / rhs.unit,
        }
    }
}

impl From<PhysicalConstant> for f64 {
    fn from(c: PhysicalConstant) -> f64 {
        c.value
    }
}

impl fmt::Display for PhysicalConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.value, self.unit)
    }
}

/// The table of physical constants used by atmosphere diagnostics.
///
/// Built once by [`Constants::build`] and exposed process-wide through
/// [`constants`]. Primitive constants are literal (value, unit) pairs;
/// derived constants are computed from primitives through
/// [`PhysicalConstant`] arithmetic, in dependency order, so a circular
/// derivation cannot be written.
///
/// Values follow the reference atmosphere model. Molecular weights carry
/// kg kmol^-1 (dimensions mass·amount^-1) so that gas-constant
/// derivations close dimensionally.
#[derive(Clone, Debug)]
pub struct Constants {
    /// Specific heat of dry air at constant pressure.
    pub cpair: PhysicalConstant,
    /// Gas constant for dry air.
    pub rair: PhysicalConstant,
    /// Gas constant for water vapor.
    pub rh2o: PhysicalConstant,
    /// Gas constant for water vapor (alias of [`rh2o`](Self::rh2o)).
    pub rv: PhysicalConstant,
    /// Density of liquid water.
    pub rho_h2o: PhysicalConstant,
    /// Inverse liquid-water density (derived reciprocal).
    pub inv_rho_h2o: PhysicalConstant,
    /// Density of ice at 0 C.
    pub rho_ice: PhysicalConstant,
    /// Molecular weight of water.
    pub mw_h2o: PhysicalConstant,
    /// Molecular weight of dry air.
    pub mw_dry: PhysicalConstant,
    /// Ratio of water to dry-air molecular weight (derived, ~0.622).
    pub ep_2: PhysicalConstant,
    /// O2 mass mixing ratio.
    pub o2mmr: PhysicalConstant,
    /// Gravitational acceleration at the surface.
    pub gravit: PhysicalConstant,
    /// Latent heat of vaporization.
    pub lat_vap: PhysicalConstant,
    /// Latent heat of fusion.
    pub lat_ice: PhysicalConstant,
    /// Specific heat of liquid water.
    pub cp_liq: PhysicalConstant,
    /// Melting point of water.
    pub t_melt: PhysicalConstant,
    /// Pi.
    pub pi: PhysicalConstant,
    /// Reference surface pressure.
    pub p0: PhysicalConstant,
    /// Gas constant for dry air (alias of [`rair`](Self::rair)).
    pub rd: PhysicalConstant,
    /// Avogadro's number per kmol.
    pub avogad: PhysicalConstant,
    /// Boltzmann's constant.
    pub boltz: PhysicalConstant,
    /// Universal gas constant (derived, `avogad * boltz`).
    pub rgas: PhysicalConstant,
    /// Water-vapor gas constant derived from first principles
    /// (`rgas / mw_h2o`).
    pub rwv: PhysicalConstant,
    /// Virtual-temperature coefficient (derived, `rwv / rair - 1`).
    pub zvir: PhysicalConstant,
    /// Von Karman constant.
    pub karman: PhysicalConstant,
    /// Radius of the earth.
    pub r_earth: PhysicalConstant,
    /// Stefan-Boltzmann constant.
    pub stebol: PhysicalConstant,
    /// Earth's angular velocity.
    pub omega: PhysicalConstant,
    /// Reference air density at the surface (derived,
    /// `p0 / (rd * t_melt)`).
    pub rhosur: PhysicalConstant,
}

impl Constants {
    /// Build the constants table: primitives first, then derived values
    /// in dependency order.
    fn build() -> Self {
        let heat_capacity = J / (KG * K);

        // Primitives.
        let cpair = PhysicalConstant::new(1004.64, heat_capacity);
        let rair = PhysicalConstant::new(287.042, heat_capacity);
        let rh2o = PhysicalConstant::new(461.505, heat_capacity);
        let rho_h2o = PhysicalConstant::new(1000.0, KG / M.pow(3));
        let rho_ice = PhysicalConstant::new(917.0, KG / M.pow(3));
        let mw_h2o = PhysicalConstant::new(18.016, KG / MOL);
        let mw_dry = PhysicalConstant::new(28.966, KG / MOL);
        let o2mmr = PhysicalConstant::new(0.23143, Unit::nondimensional());
        let gravit = PhysicalConstant::new(9.80616, M / S.pow(2));
        let lat_vap = PhysicalConstant::new(2_501_000.0, M.pow(2) / S.pow(2));
        let lat_ice = PhysicalConstant::new(333_700.0, M.pow(2) / S.pow(2));
        let cp_liq = PhysicalConstant::new(4188.0, heat_capacity);
        let t_melt = PhysicalConstant::new(273.15, K);
        let pi = PhysicalConstant::new(std::f64::consts::PI, Unit::nondimensional());
        let p0 = PhysicalConstant::new(100_000.0, PA);
        let avogad = PhysicalConstant::new(6.02214e26, Unit::nondimensional() / MOL);
        let boltz = PhysicalConstant::new(1.38065e-23, J / K);
        let karman = PhysicalConstant::new(0.4, Unit::nondimensional());
        let r_earth = PhysicalConstant::new(6.376e6, M);
        let stebol = PhysicalConstant::new(5.670374419e-8, KG / (S.pow(3) * K.pow(4)));
        let omega = PhysicalConstant::new(7.292e-5, Unit::nondimensional() / S);

        // Derived.
        let rv = rh2o;
        let rd = rair;
        let inv_rho_h2o = rho_h2o.recip();
        let ep_2 = mw_h2o / mw_dry;
        let rgas = avogad * boltz;
        let rwv = rgas / mw_h2o;
        let zvir = {
            let ratio = rwv / rair;
            PhysicalConstant::new(ratio.value - 1.0, ratio.unit)
        };
        let rhosur = p0 / (rd * t_melt);

        Self {
            cpair,
            rair,
            rh2o,
            rv,
            rho_h2o,
            inv_rho_h2o,
            rho_ice,
            mw_h2o,
            mw_dry,
            ep_2,
            o2mmr,
            gravit,
            lat_vap,
            lat_ice,
            cp_liq,
            t_melt,
            pi,
            p0,
            rd,
            avogad,
            boltz,
            rgas,
            rwv,
            zvir,
            karman,
            r_earth,
            stebol,
            omega,
            rhosur,
        }
    }
}

/// The process-wide constants registry.
///
/// Initialized once at first use and immutable thereafter; lives until
/// process exit.
pub fn constants() -> &'static Constants {
    static CONSTANTS: OnceLock<Constants> = OnceLock::new();
    CONSTANTS.get_or_init(Constants::build)
}

/// Molecular weight of a named gas, in kg kmol^-1.
///
/// Lookup is case-insensitive. Returns `None` for an unknown gas name;
/// callers must check before using the value.
pub fn gas_mol_weight(gas_name: &str) -> Option<f64> {
    let name = gas_name.to_ascii_lowercase();
    match name.as_str() {
        "h2o" => Some(constants().mw_h2o.value),
        "co2" => Some(44.0095),
        "o3" => Some(47.9982),
        "n2o" => Some(44.0128),
        "co" => Some(28.0101),
        "ch4" => Some(16.04246),
        "o2" => Some(31.998),
        "n2" => Some(28.0134),
        "cfc11" => Some(136.0),
        "cfc12" => Some(120.0),
        _ => None,
    }
}
