//! Masses and positions of the binary components.
//!
//! | type  | mass1            | mass2            | positions   |
//! |-------|------------------|------------------|-------------|
//! | NS-NS | ADM (bco1)       | ADM (bco2)       | NS1, NS2    |
//! | BH-BH | Christodoulou    | Christodoulou    | BH1, BH2    |
//! | BH-NS | ADM (bco1)       | Christodoulou    | NS, BH      |
//!
//! Positions are the x coordinate of the first collocation point of each
//! object's innermost domain, shifted by the center-of-mass offset.

use std::path::Path;

use tracing::debug;

use crate::backend::{
    Axis, CompactObject, Component, ConfigKey, PointIndex, SolverBackend, SolverConfig, SpectralSolution,
};
use crate::error::Result;
use crate::types::BinaryType;

/// Global metadata of a binary.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BinaryInfo {
    /// Mass of the first component
    pub mass1: f64,
    /// Mass of the second component
    pub mass2: f64,
    /// x position of the first component
    pub position_x1: f64,
    /// x position of the second component
    pub position_x2: f64,
}

/// Which objects and mass definitions describe each binary type.
struct ComponentLayout {
    objects: [CompactObject; 2],
    masses: [ConfigKey; 2],
}

impl ComponentLayout {
    fn for_binary(binary_type: BinaryType) -> Self {
        match binary_type {
            BinaryType::Bns => Self {
                objects: [CompactObject::Ns1, CompactObject::Ns2],
                masses: [ConfigKey::AdmMass, ConfigKey::AdmMass],
            },
            BinaryType::Bbh => Self {
                objects: [CompactObject::Bh1, CompactObject::Bh2],
                masses: [ConfigKey::ChristodoulouMass, ConfigKey::ChristodoulouMass],
            },
            BinaryType::Bhns => Self {
                objects: [CompactObject::Ns, CompactObject::Bh],
                masses: [ConfigKey::AdmMass, ConfigKey::ChristodoulouMass],
            },
        }
    }
}

/// Read component masses and positions for `binary_type` from the
/// configuration at `config_path` and the solution it references.
///
/// # Errors
/// Propagates configuration, missing-key and solution errors from `backend`.
pub fn read_binary_info<B: SolverBackend>(
    backend: &B,
    binary_type: BinaryType,
    config_path: &Path,
) -> Result<BinaryInfo> {
    let config = backend.load_config(config_path)?;
    let layout = ComponentLayout::for_binary(binary_type);

    let com = config.get(ConfigKey::CenterOfMass, None)?;
    let mass1 = config.get(layout.masses[0], Some(Component::Bco1))?;
    let mass2 = config.get(layout.masses[1], Some(Component::Bco2))?;

    let space_filename = config.space_filename();
    debug!(%binary_type, solution = %space_filename.display(), "opening spectral solution");
    let solution = backend.open_solution(&space_filename, binary_type)?;

    let position_x1 = com + reference_x(&solution, layout.objects[0])?;
    let position_x2 = com + reference_x(&solution, layout.objects[1])?;

    Ok(BinaryInfo {
        mass1,
        mass2,
        position_x1,
        position_x2,
    })
}

/// x coordinate of the first collocation point of `object`'s innermost domain.
fn reference_x<S: SpectralSolution>(solution: &S, object: CompactObject) -> Result<f64> {
    let domain = solution.object_domain(object)?;
    let index = PointIndex::origin(domain.point_count());
    Ok(domain.cartesian_coordinate(Axis::X, &index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Domain;
    use crate::error::ExportError;
    use std::cell::Cell;
    use std::io;
    use std::path::PathBuf;

    struct Center(f64);

    impl Domain for Center {
        fn point_count(&self) -> Vec<usize> {
            vec![5, 5, 4]
        }

        fn cartesian_coordinate(&self, axis: Axis, index: &PointIndex) -> f64 {
            assert_eq!(index.coords(), &[0, 0, 0]);
            match axis {
                Axis::X => self.0,
                _ => 0.0,
            }
        }
    }

    struct Solution {
        first: (CompactObject, Center),
        second: (CompactObject, Center),
    }

    impl SpectralSolution for Solution {
        fn object_domain(&self, object: CompactObject) -> Result<&dyn Domain> {
            if object == self.first.0 {
                Ok(&self.first.1)
            } else if object == self.second.0 {
                Ok(&self.second.1)
            } else {
                Err(ExportError::SolutionUnreadable {
                    path: PathBuf::from("space.dat"),
                    message: format!("no domain for {:?}", object),
                })
            }
        }
    }

    /// Which collaborator call the mock backend fails.
    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Failure {
        None,
        ConfigUnreadable,
        ConfigMalformed,
        MissingMass,
        SolutionUnreadable,
        NeutronStarSolution,
    }

    struct Config {
        failure: Failure,
    }

    impl SolverConfig for Config {
        fn space_filename(&self) -> PathBuf {
            PathBuf::from("space.dat")
        }

        fn get(&self, key: ConfigKey, component: Option<Component>) -> Result<f64> {
            let missing = || ExportError::MissingConfigKey {
                key: match component {
                    Some(c) => format!("{}.{}", c, key),
                    None => key.to_string(),
                },
            };
            if self.failure == Failure::MissingMass && component == Some(Component::Bco2) {
                return Err(missing());
            }
            match (key, component) {
                (ConfigKey::CenterOfMass, None) => Ok(0.5),
                (ConfigKey::AdmMass, Some(Component::Bco1)) => Ok(1.4),
                (ConfigKey::AdmMass, Some(Component::Bco2)) => Ok(1.3),
                (ConfigKey::ChristodoulouMass, Some(Component::Bco1)) => Ok(7.0),
                (ConfigKey::ChristodoulouMass, Some(Component::Bco2)) => Ok(5.0),
                _ => Err(missing()),
            }
        }
    }

    struct Backend {
        failure: Failure,
        opened: Cell<usize>,
    }

    impl Backend {
        fn new() -> Self {
            Self::failing(Failure::None)
        }

        fn failing(failure: Failure) -> Self {
            Self {
                failure,
                opened: Cell::new(0),
            }
        }
    }

    impl SolverBackend for Backend {
        type Config = Config;
        type Solution = Solution;

        fn load_config(&self, path: &Path) -> Result<Config> {
            match self.failure {
                Failure::ConfigUnreadable => Err(ExportError::ConfigUnreadable {
                    path: path.to_path_buf(),
                    source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
                }),
                Failure::ConfigMalformed => Err(ExportError::ConfigMalformed {
                    path: path.to_path_buf(),
                    message: "expected `key = value`".into(),
                }),
                failure => Ok(Config { failure }),
            }
        }

        fn open_solution(&self, path: &Path, binary_type: BinaryType) -> Result<Solution> {
            self.opened.set(self.opened.get() + 1);
            let layout_type = match self.failure {
                Failure::SolutionUnreadable => {
                    return Err(ExportError::SolutionUnreadable {
                        path: path.to_path_buf(),
                        message: "bad magic".into(),
                    });
                }
                Failure::NeutronStarSolution => BinaryType::Bns,
                _ => binary_type,
            };
            let [a, b] = ComponentLayout::for_binary(layout_type).objects;
            Ok(Solution {
                first: (a, Center(-10.0)),
                second: (b, Center(12.0)),
            })
        }
    }

    #[test]
    fn test_mass_labels_per_binary_type() {
        let backend = Backend::new();
        let bns = read_binary_info(&backend, BinaryType::Bns, Path::new("bns.info")).unwrap();
        assert_eq!((bns.mass1, bns.mass2), (1.4, 1.3));

        let bbh = read_binary_info(&backend, BinaryType::Bbh, Path::new("bbh.info")).unwrap();
        assert_eq!((bbh.mass1, bbh.mass2), (7.0, 5.0));

        let bhns = read_binary_info(&backend, BinaryType::Bhns, Path::new("bhns.info")).unwrap();
        assert_eq!((bhns.mass1, bhns.mass2), (1.4, 5.0));
        assert_eq!(backend.opened.get(), 3);
    }

    #[test]
    fn test_positions_shifted_by_com() {
        let info = read_binary_info(&Backend::new(), BinaryType::Bhns, Path::new("bhns.info")).unwrap();
        assert_eq!(info.position_x1, -9.5);
        assert_eq!(info.position_x2, 12.5);
    }

    #[test]
    fn test_unreadable_config() {
        let backend = Backend::failing(Failure::ConfigUnreadable);
        let err = read_binary_info(&backend, BinaryType::Bns, Path::new("missing.info")).unwrap_err();
        match err {
            ExportError::ConfigUnreadable { path, source } => {
                assert_eq!(path, PathBuf::from("missing.info"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected ConfigUnreadable, got {other}"),
        }
        assert_eq!(backend.opened.get(), 0);
    }

    #[test]
    fn test_malformed_config() {
        let backend = Backend::failing(Failure::ConfigMalformed);
        let err = read_binary_info(&backend, BinaryType::Bbh, Path::new("bbh.info")).unwrap_err();
        assert!(matches!(
            err,
            ExportError::ConfigMalformed { ref path, .. } if path == Path::new("bbh.info")
        ));
        assert_eq!(backend.opened.get(), 0);
    }

    #[test]
    fn test_missing_component_mass() {
        let backend = Backend::failing(Failure::MissingMass);
        let err = read_binary_info(&backend, BinaryType::Bhns, Path::new("bhns.info")).unwrap_err();
        assert!(matches!(
            err,
            ExportError::MissingConfigKey { ref key } if key == "bco2.mch"
        ));
        assert_eq!(backend.opened.get(), 0);
    }

    #[test]
    fn test_unreadable_solution() {
        let backend = Backend::failing(Failure::SolutionUnreadable);
        let err = read_binary_info(&backend, BinaryType::Bns, Path::new("bns.info")).unwrap_err();
        assert!(matches!(
            err,
            ExportError::SolutionUnreadable { ref path, .. } if path == Path::new("space.dat")
        ));
        assert_eq!(backend.opened.get(), 1);
    }

    #[test]
    fn test_solution_without_requested_object() {
        let backend = Backend::failing(Failure::NeutronStarSolution);
        let err = read_binary_info(&backend, BinaryType::Bbh, Path::new("bbh.info")).unwrap_err();
        assert!(matches!(err, ExportError::SolutionUnreadable { .. }));
    }
}
