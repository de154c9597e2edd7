//! Binary system classification.

use std::fmt;
use std::str::FromStr;

use crate::error::ExportError;
use crate::types::Schema;

/// Kind of compact binary the initial data describes.
///
/// The integer codes match the exporter library's enum:
/// NS-NS = 0, BH-BH = 1, BH-NS = 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryType {
    /// Two neutron stars
    Bns,
    /// Two black holes
    Bbh,
    /// Black hole and neutron star
    Bhns,
}

impl BinaryType {
    /// All binary types, ordered by code.
    pub const ALL: [BinaryType; 3] = [BinaryType::Bns, BinaryType::Bbh, BinaryType::Bhns];

    /// Integer code of this binary type.
    #[inline]
    pub const fn code(self) -> i32 {
        match self {
            BinaryType::Bns => 0,
            BinaryType::Bbh => 1,
            BinaryType::Bhns => 2,
        }
    }

    /// Decode an integer code.
    ///
    /// # Errors
    /// `UnknownBinaryType` for codes outside 0..=2.
    pub fn from_code(code: i32) -> Result<Self, ExportError> {
        match code {
            0 => Ok(BinaryType::Bns),
            1 => Ok(BinaryType::Bbh),
            2 => Ok(BinaryType::Bhns),
            other => Err(ExportError::UnknownBinaryType(other.to_string())),
        }
    }

    /// Short lowercase name (`bns`, `bbh`, `bhns`).
    pub const fn name(self) -> &'static str {
        match self {
            BinaryType::Bns => "bns",
            BinaryType::Bbh => "bbh",
            BinaryType::Bhns => "bhns",
        }
    }

    /// Field schema the exporter for this binary type returns.
    #[inline]
    pub const fn schema(self) -> Schema {
        match self {
            BinaryType::Bbh => Schema::Vacuum,
            BinaryType::Bns | BinaryType::Bhns => Schema::Matter,
        }
    }

    /// Slot of this type in fixed-size per-type tables.
    #[inline]
    pub(crate) const fn slot(self) -> usize {
        self.code() as usize
    }
}

impl fmt::Display for BinaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BinaryType {
    type Err = ExportError;

    /// Accepts the short names and the hyphenated forms (`ns-ns`, `bh-bh`, `bh-ns`),
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bns" | "ns-ns" => Ok(BinaryType::Bns),
            "bbh" | "bh-bh" => Ok(BinaryType::Bbh),
            "bhns" | "bh-ns" | "nsbh" | "ns-bh" => Ok(BinaryType::Bhns),
            _ => Err(ExportError::UnknownBinaryType(s.to_string())),
        }
    }
}

impl TryFrom<i32> for BinaryType {
    type Error = ExportError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}
