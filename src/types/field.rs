//! Exported field names and the vacuum/matter schemas.
//!
//! Field order is fixed: the 16 vacuum fields come first, followed by the
//! 6 hydrodynamic fields. Exporters return their arrays in this order.

use std::fmt;

/// Number of fields in the vacuum schema.
pub const N_VACUUM_FIELDS: usize = 16;

/// Number of fields in the matter schema (and in every [`FieldBuffer`](crate::FieldBuffer)).
pub const N_FIELDS: usize = 22;

/// A scalar field exported on the evaluation grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Lapse
    Alpha,
    /// Shift, x component
    BetaX,
    /// Shift, y component
    BetaY,
    /// Shift, z component
    BetaZ,
    /// Spatial metric, xx
    GammaXx,
    /// Spatial metric, xy
    GammaXy,
    /// Spatial metric, xz
    GammaXz,
    /// Spatial metric, yy
    GammaYy,
    /// Spatial metric, yz
    GammaYz,
    /// Spatial metric, zz
    GammaZz,
    /// Extrinsic curvature, xx
    KXx,
    /// Extrinsic curvature, xy
    KXy,
    /// Extrinsic curvature, xz
    KXz,
    /// Extrinsic curvature, yy
    KYy,
    /// Extrinsic curvature, yz
    KYz,
    /// Extrinsic curvature, zz
    KZz,
    /// Rest-mass density
    Rho,
    /// Specific internal energy
    Epsilon,
    /// Pressure
    Pressure,
    /// Fluid velocity, x component
    VelX,
    /// Fluid velocity, y component
    VelY,
    /// Fluid velocity, z component
    VelZ,
}

impl Field {
    /// All fields in storage order.
    pub const ALL: [Field; N_FIELDS] = [
        Field::Alpha,
        Field::BetaX,
        Field::BetaY,
        Field::BetaZ,
        Field::GammaXx,
        Field::GammaXy,
        Field::GammaXz,
        Field::GammaYy,
        Field::GammaYz,
        Field::GammaZz,
        Field::KXx,
        Field::KXy,
        Field::KXz,
        Field::KYy,
        Field::KYz,
        Field::KZz,
        Field::Rho,
        Field::Epsilon,
        Field::Pressure,
        Field::VelX,
        Field::VelY,
        Field::VelZ,
    ];

    /// Position of this field in storage order.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Variable name used in level files.
    pub const fn name(self) -> &'static str {
        match self {
            Field::Alpha => "alpha",
            Field::BetaX => "beta_x",
            Field::BetaY => "beta_y",
            Field::BetaZ => "beta_z",
            Field::GammaXx => "gamma_xx",
            Field::GammaXy => "gamma_xy",
            Field::GammaXz => "gamma_xz",
            Field::GammaYy => "gamma_yy",
            Field::GammaYz => "gamma_yz",
            Field::GammaZz => "gamma_zz",
            Field::KXx => "K_xx",
            Field::KXy => "K_xy",
            Field::KXz => "K_xz",
            Field::KYy => "K_yy",
            Field::KYz => "K_yz",
            Field::KZz => "K_zz",
            Field::Rho => "rho",
            Field::Epsilon => "epsilon",
            Field::Pressure => "pressure",
            Field::VelX => "v_x",
            Field::VelY => "v_y",
            Field::VelZ => "v_z",
        }
    }

    /// Look up a field by its level file name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// True for the hydrodynamic fields absent from the vacuum schema.
    #[inline]
    pub const fn is_hydro(self) -> bool {
        self.index() >= N_VACUUM_FIELDS
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of fields an exporter fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Schema {
    /// Metric quantities only (black hole binaries)
    Vacuum,
    /// Metric plus hydrodynamic quantities
    Matter,
}

impl Schema {
    /// Fields of this schema, in the order exporters return them.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Schema::Vacuum => &Field::ALL[..N_VACUUM_FIELDS],
            Schema::Matter => &Field::ALL,
        }
    }

    /// Number of fields in this schema.
    #[inline]
    pub fn len(self) -> usize {
        self.fields().len()
    }

    /// Whether the schema includes `field`.
    #[inline]
    pub fn contains(self, field: Field) -> bool {
        match self {
            Schema::Vacuum => !field.is_hydro(),
            Schema::Matter => true,
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Vacuum => write!(f, "vacuum ({} fields)", N_VACUUM_FIELDS),
            Schema::Matter => write!(f, "matter ({} fields)", N_FIELDS),
        }
    }
}
