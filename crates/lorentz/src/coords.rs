//! Coordinate-system tags and field-name classification.
//!
//! A vector's layout is described by one tag per axis group: azimuthal
//! (`XY` or `RhoPhi`), longitudinal (`Z`, `Theta` or `Eta`) and temporal
//! (`T` or `Tau`). [`System`] combines them so that a temporal tag without a
//! longitudinal one cannot be expressed.

use core::fmt;

use alloc::string::String;

use crate::error::{Result, VectorError};

/// Representation of the azimuthal (transverse-plane) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AzimuthalKind {
    XY,
    RhoPhi,
}

/// Representation of the component along the beam (z) axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LongitudinalKind {
    Z,
    Theta,
    Eta,
}

/// Representation of the fourth (time/energy) component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemporalKind {
    T,
    Tau,
}

/// Number of stored components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dim {
    D2,
    D3,
    D4,
}

impl Dim {
    #[inline]
    pub const fn len(self) -> usize {
        match self {
            Self::D2 => 2,
            Self::D3 => 3,
            Self::D4 => 4,
        }
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.len())
    }
}

/// Axis group a coordinate belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Group {
    Azimuthal,
    Longitudinal,
    Temporal,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Azimuthal => "azimuthal",
            Self::Longitudinal => "longitudinal",
            Self::Temporal => "temporal",
        })
    }
}

/// Full coordinate system of a vector: dimensionality plus one tag per group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum System {
    Planar(AzimuthalKind),
    Spatial(AzimuthalKind, LongitudinalKind),
    Lorentz(AzimuthalKind, LongitudinalKind, TemporalKind),
}

/// How many leading axis groups an operation needs in canonical form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Needs {
    /// Azimuthal as `XY`.
    Azimuthal,
    /// Azimuthal as `XY`, longitudinal as `Z`.
    Spatial,
    /// Every group canonical.
    All,
}

impl System {
    /// Every representable coordinate system.
    pub const ALL: [System; 20] = {
        use AzimuthalKind::*;
        use LongitudinalKind::*;
        use TemporalKind::*;
        [
            System::Planar(XY),
            System::Planar(RhoPhi),
            System::Spatial(XY, Z),
            System::Spatial(XY, Theta),
            System::Spatial(XY, Eta),
            System::Spatial(RhoPhi, Z),
            System::Spatial(RhoPhi, Theta),
            System::Spatial(RhoPhi, Eta),
            System::Lorentz(XY, Z, T),
            System::Lorentz(XY, Z, Tau),
            System::Lorentz(XY, Theta, T),
            System::Lorentz(XY, Theta, Tau),
            System::Lorentz(XY, Eta, T),
            System::Lorentz(XY, Eta, Tau),
            System::Lorentz(RhoPhi, Z, T),
            System::Lorentz(RhoPhi, Z, Tau),
            System::Lorentz(RhoPhi, Theta, T),
            System::Lorentz(RhoPhi, Theta, Tau),
            System::Lorentz(RhoPhi, Eta, T),
            System::Lorentz(RhoPhi, Eta, Tau),
        ]
    };

    /// Build a system from per-group tags.
    ///
    /// A temporal tag requires a longitudinal one.
    pub fn from_kinds(
        azimuthal: AzimuthalKind,
        longitudinal: Option<LongitudinalKind>,
        temporal: Option<TemporalKind>,
    ) -> Result<Self> {
        match (longitudinal, temporal) {
            (None, None) => Ok(Self::Planar(azimuthal)),
            (Some(lon), None) => Ok(Self::Spatial(azimuthal, lon)),
            (Some(lon), Some(tem)) => Ok(Self::Lorentz(azimuthal, lon, tem)),
            (None, Some(_)) => Err(VectorError::IncompleteFields {
                group: Group::Longitudinal,
            }),
        }
    }

    /// Canonical (`XY`, `Z`, `T`) system of the given dimensionality.
    pub const fn canonical_of(dim: Dim) -> Self {
        match dim {
            Dim::D2 => Self::Planar(AzimuthalKind::XY),
            Dim::D3 => Self::Spatial(AzimuthalKind::XY, LongitudinalKind::Z),
            Dim::D4 => Self::Lorentz(AzimuthalKind::XY, LongitudinalKind::Z, TemporalKind::T),
        }
    }

    #[inline]
    pub const fn dim(self) -> Dim {
        match self {
            Self::Planar(_) => Dim::D2,
            Self::Spatial(..) => Dim::D3,
            Self::Lorentz(..) => Dim::D4,
        }
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.dim().len()
    }

    #[inline]
    pub const fn azimuthal(self) -> AzimuthalKind {
        match self {
            Self::Planar(az) | Self::Spatial(az, _) | Self::Lorentz(az, _, _) => az,
        }
    }

    #[inline]
    pub const fn longitudinal(self) -> Option<LongitudinalKind> {
        match self {
            Self::Planar(_) => None,
            Self::Spatial(_, lon) | Self::Lorentz(_, lon, _) => Some(lon),
        }
    }

    #[inline]
    pub const fn temporal(self) -> Option<TemporalKind> {
        match self {
            Self::Lorentz(_, _, tem) => Some(tem),
            _ => None,
        }
    }

    /// Same dimensionality, every group canonical.
    #[inline]
    pub const fn canonical(self) -> Self {
        Self::canonical_of(self.dim())
    }

    #[inline]
    pub fn is_canonical(self) -> bool {
        self == self.canonical()
    }

    /// Replace the groups named by `needs` with their canonical tags, keeping
    /// the rest.
    pub const fn canonicalize(self, needs: Needs) -> Self {
        use AzimuthalKind::XY;
        use LongitudinalKind::Z;
        match (self, needs) {
            (Self::Planar(_), _) => Self::Planar(XY),
            (Self::Spatial(_, lon), Needs::Azimuthal) => Self::Spatial(XY, lon),
            (Self::Spatial(..), _) => Self::Spatial(XY, Z),
            (Self::Lorentz(_, lon, tem), Needs::Azimuthal) => Self::Lorentz(XY, lon, tem),
            (Self::Lorentz(_, _, tem), Needs::Spatial) => Self::Lorentz(XY, Z, tem),
            (Self::Lorentz(..), Needs::All) => self.canonical(),
        }
    }

    /// Stored fields, in storage order.
    pub fn fields(self) -> impl Iterator<Item = Field> {
        let (a, b) = match self.azimuthal() {
            AzimuthalKind::XY => (Field::X, Field::Y),
            AzimuthalKind::RhoPhi => (Field::Rho, Field::Phi),
        };
        let lon = self.longitudinal().map(|lon| match lon {
            LongitudinalKind::Z => Field::Z,
            LongitudinalKind::Theta => Field::Theta,
            LongitudinalKind::Eta => Field::Eta,
        });
        let tem = self.temporal().map(|tem| match tem {
            TemporalKind::T => Field::T,
            TemporalKind::Tau => Field::Tau,
        });
        [a, b].into_iter().chain(lon).chain(tem)
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Planar(_) => "Planar",
            Self::Spatial(..) => "Spatial",
            Self::Lorentz(..) => "Lorentz",
        };
        write!(f, "{label}(")?;
        for (i, field) in self.fields().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(field.name())?;
        }
        f.write_str(")")
    }
}

/// A single named coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    X,
    Y,
    Rho,
    Phi,
    Z,
    Theta,
    Eta,
    T,
    Tau,
}

impl Field {
    /// Resolve a field name, including the momentum aliases
    /// (`px`, `py`, `pt`, `pz`, `E`, `energy`, `M`, `mass`, ...).
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "x" | "px" => Self::X,
            "y" | "py" => Self::Y,
            "rho" | "pt" => Self::Rho,
            "phi" => Self::Phi,
            "z" | "pz" => Self::Z,
            "theta" => Self::Theta,
            "eta" => Self::Eta,
            "t" | "E" | "e" | "energy" => Self::T,
            "tau" | "M" | "m" | "mass" => Self::Tau,
            _ => return None,
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Rho => "rho",
            Self::Phi => "phi",
            Self::Z => "z",
            Self::Theta => "theta",
            Self::Eta => "eta",
            Self::T => "t",
            Self::Tau => "tau",
        }
    }

    pub const fn group(self) -> Group {
        match self {
            Self::X | Self::Y | Self::Rho | Self::Phi => Group::Azimuthal,
            Self::Z | Self::Theta | Self::Eta => Group::Longitudinal,
            Self::T | Self::Tau => Group::Temporal,
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

/// Result of classifying a set of field names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub system: System,
    /// `order[k]` is the position, among the classified names, of the `k`-th
    /// stored component of `system`.
    pub order: [usize; 4],
}

/// Classify an exact set of field names into one coordinate system.
///
/// The classification is total: every name must be recognized, each group
/// may be described at most once, and the azimuthal group must be complete.
pub fn classify(names: &[&str]) -> Result<Layout> {
    const NONE: Option<usize> = None;
    let mut seen = [NONE; 9];

    for (i, name) in names.iter().enumerate() {
        let field = Field::parse(name).ok_or_else(|| VectorError::UnknownField(String::from(*name)))?;
        if let Some(prev) = seen[field.slot()] {
            return Err(ambiguous(field.group(), names[prev], name));
        }
        seen[field.slot()] = Some(i);
    }

    let get = |field: Field| seen[field.slot()];

    let cartesian = [get(Field::X), get(Field::Y)];
    let polar = [get(Field::Rho), get(Field::Phi)];
    let (azimuthal, az_idx) = match (cartesian, polar) {
        ([Some(x), Some(y)], [None, None]) => (AzimuthalKind::XY, [x, y]),
        ([None, None], [Some(rho), Some(phi)]) => (AzimuthalKind::RhoPhi, [rho, phi]),
        _ => {
            let first_cartesian = cartesian.iter().flatten().next();
            let first_polar = polar.iter().flatten().next();
            return Err(match (first_cartesian, first_polar) {
                (Some(&a), Some(&b)) => ambiguous(Group::Azimuthal, names[a], names[b]),
                _ => VectorError::IncompleteFields {
                    group: Group::Azimuthal,
                },
            });
        }
    };

    let longitudinal = single(
        names,
        Group::Longitudinal,
        [
            (LongitudinalKind::Z, get(Field::Z)),
            (LongitudinalKind::Theta, get(Field::Theta)),
            (LongitudinalKind::Eta, get(Field::Eta)),
        ],
    )?;
    let temporal = single(
        names,
        Group::Temporal,
        [(TemporalKind::T, get(Field::T)), (TemporalKind::Tau, get(Field::Tau))],
    )?;

    let system = System::from_kinds(
        azimuthal,
        longitudinal.map(|(kind, _)| kind),
        temporal.map(|(kind, _)| kind),
    )?;

    let mut order = [0; 4];
    order[0] = az_idx[0];
    order[1] = az_idx[1];
    if let Some((_, i)) = longitudinal {
        order[2] = i;
    }
    if let Some((_, i)) = temporal {
        order[3] = i;
    }
    Ok(Layout { system, order })
}

/// At most one of `candidates` may be present.
fn single<K: Copy, const N: usize>(
    names: &[&str],
    group: Group,
    candidates: [(K, Option<usize>); N],
) -> Result<Option<(K, usize)>> {
    let mut found: Option<(K, usize)> = None;
    for (kind, idx) in candidates {
        let Some(i) = idx else { continue };
        if let Some((_, prev)) = found {
            let (a, b) = if prev < i { (prev, i) } else { (i, prev) };
            return Err(ambiguous(group, names[a], names[b]));
        }
        found = Some((kind, i));
    }
    Ok(found)
}

fn ambiguous(group: Group, first: &str, second: &str) -> VectorError {
    VectorError::AmbiguousFields {
        group,
        first: String::from(first),
        second: String::from(second),
    }
}
