//! Interfaces to the spectral solver.
//!
//! The solver's configuration format and its solution files are owned by the
//! solver library. This crate only needs a handful of values from them, so
//! it reads them through these traits:
//!
//! - [`SolverBackend`]: loads configurations and opens solution files
//! - [`SolverConfig`]: scalar lookups plus the path of the solution file
//! - [`SpectralSolution`]: per-object access to the domain decomposition
//! - [`Domain`]: collocation point counts and Cartesian coordinates

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::BinaryType;

/// Scalar keys read from a solver configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// x offset of the center of mass
    CenterOfMass,
    /// ADM mass of an isolated neutron star
    AdmMass,
    /// Christodoulou mass of a black hole
    ChristodoulouMass,
}

impl ConfigKey {
    /// Key name as written in solver configurations.
    pub const fn name(self) -> &'static str {
        match self {
            ConfigKey::CenterOfMass => "com",
            ConfigKey::AdmMass => "madm",
            ConfigKey::ChristodoulouMass => "mch",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Configuration section of one binary component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Component {
    /// First compact object
    Bco1,
    /// Second compact object
    Bco2,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Bco1 => f.write_str("bco1"),
            Component::Bco2 => f.write_str("bco2"),
        }
    }
}

/// Compact object whose domains the solution exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompactObject {
    /// First neutron star of a NS-NS binary
    Ns1,
    /// Second neutron star of a NS-NS binary
    Ns2,
    /// First black hole of a BH-BH binary
    Bh1,
    /// Second black hole of a BH-BH binary
    Bh2,
    /// Neutron star of a BH-NS binary
    Ns,
    /// Black hole of a BH-NS binary
    Bh,
}

/// Cartesian axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Multi-dimensional index of a collocation point within a domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointIndex {
    dims: Vec<usize>,
    coords: Vec<usize>,
}

impl PointIndex {
    /// Index of the first collocation point of a domain with `dims` points per dimension.
    pub fn origin(dims: Vec<usize>) -> Self {
        let coords = vec![0; dims.len()];
        Self { dims, coords }
    }

    /// Points per dimension.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Current coordinates.
    pub fn coords(&self) -> &[usize] {
        &self.coords
    }
}

/// One domain of the spectral decomposition.
pub trait Domain {
    /// Collocation points per dimension.
    fn point_count(&self) -> Vec<usize>;

    /// Cartesian coordinate `axis` of the collocation point at `index`.
    fn cartesian_coordinate(&self, axis: Axis, index: &PointIndex) -> f64;
}

/// Spectral solution loaded from disk.
pub trait SpectralSolution {
    /// Innermost domain of `object`.
    ///
    /// # Errors
    /// If the solution has no such object (e.g. a black hole in a NS-NS solution).
    fn object_domain(&self, object: CompactObject) -> Result<&dyn Domain>;
}

/// Solver configuration.
pub trait SolverConfig {
    /// Solution file the configuration refers to.
    fn space_filename(&self) -> PathBuf;

    /// Scalar value of `key`, optionally within a component section.
    ///
    /// # Errors
    /// `MissingConfigKey` if the value is absent.
    fn get(&self, key: ConfigKey, component: Option<Component>) -> Result<f64>;
}

/// Entry point to the solver library's files.
pub trait SolverBackend {
    /// Configuration type.
    type Config: SolverConfig;
    /// Solution type.
    type Solution: SpectralSolution;

    /// Load the configuration at `path`.
    ///
    /// # Errors
    /// `ConfigUnreadable` or `ConfigMalformed`.
    fn load_config(&self, path: &Path) -> Result<Self::Config>;

    /// Open the solution at `path` as a solution for `binary_type`.
    ///
    /// # Errors
    /// `SolutionUnreadable`.
    fn open_solution(&self, path: &Path, binary_type: BinaryType) -> Result<Self::Solution>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_index_origin() {
        let index = PointIndex::origin(vec![17, 9, 8]);
        assert_eq!(index.dims(), &[17, 9, 8]);
        assert_eq!(index.coords(), &[0, 0, 0]);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(ConfigKey::AdmMass.to_string(), "madm");
        assert_eq!(ConfigKey::ChristodoulouMass.to_string(), "mch");
        assert_eq!(Component::Bco2.to_string(), "bco2");
    }
}
