//! Filtration algorithms understood by the homology engine

use alloc::string::String;

use crate::{FlagError, Result};

/// Names of every filtration algorithm, in [`Filtration`] order
pub const AVAILABLE_FILTRATIONS: [&str; 11] = [
    "dimension",
    "zero",
    "max",
    "max3",
    "max_plus_one",
    "product",
    "sum",
    "pmean",
    "pmoment",
    "remove_edges",
    "vertex_degree",
];

/// Algorithm assigning filtration values to higher-dimensional cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Filtration {
    Dimension,
    Zero,
    #[default]
    Max,
    Max3,
    MaxPlusOne,
    Product,
    Sum,
    Pmean,
    Pmoment,
    RemoveEdges,
    VertexDegree,
}

impl Filtration {
    pub const ALL: [Filtration; 11] = [
        Filtration::Dimension,
        Filtration::Zero,
        Filtration::Max,
        Filtration::Max3,
        Filtration::MaxPlusOne,
        Filtration::Product,
        Filtration::Sum,
        Filtration::Pmean,
        Filtration::Pmoment,
        Filtration::RemoveEdges,
        Filtration::VertexDegree,
    ];

    /// Name passed to the engine
    pub const fn name(self) -> &'static str {
        AVAILABLE_FILTRATIONS[self as usize]
    }

    /// Look a filtration up by its exact name
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| FlagError::UnknownFiltration(String::from(name)))
    }
}

impl core::str::FromStr for Filtration {
    type Err = FlagError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl core::fmt::Display for Filtration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for filtration in Filtration::ALL {
            assert_eq!(Filtration::from_name(filtration.name()), Ok(filtration));
        }
        assert_eq!(Filtration::default().name(), "max");
        assert_eq!(Filtration::MaxPlusOne.name(), "max_plus_one");
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            "bogus".parse::<Filtration>(),
            Err(FlagError::UnknownFiltration("bogus".into()))
        );
        // Names are exact
        assert!(Filtration::from_name("MAX").is_err());
    }
}
