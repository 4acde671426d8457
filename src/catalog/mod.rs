//! The archetype catalog.
//!
//! Every (collection, jewelry type) pair is one [`Archetype`] variant with
//! its own typed parameter struct and static [`ParameterSchema`]. Rendering
//! is a pure function of those parameters.

mod holder;
mod lissajous;
pub mod schema;
mod session;
mod torsion;

pub use holder::HolderLoop;
pub use lissajous::{
    LissajousBraceletParams, LissajousEarringParams, LissajousPendantParams, LissajousRingParams, CURVE_STEPS,
};
pub use schema::{ParameterKind, ParameterSchema, ParameterSpec, ParameterValue, ParameterValues};
pub use session::{RenderTicket, Session, SessionState};
pub use torsion::{
    TorsionBraceletParams, TorsionEarringParams, TorsionPendantParams, TorsionRingParams, SECTION_STACKS,
};

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::tessellation::TriangleMesh;

use schema::ValueReader;

/// A family of designs sharing a generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Tubes swept along Lissajous figures.
    Lissajous,
    /// Twisted rounded-square bands.
    Torsion,
}

/// What the piece is worn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JewelryType {
    /// Worn on the finger.
    Ring,
    /// Worn on the wrist.
    Bracelet,
    /// Hung from the ear.
    Earring,
    /// Hung from a chain.
    Pendant,
}

/// Identifies one archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArchetypeKey {
    /// The collection.
    pub collection: Collection,
    /// The jewelry type.
    pub jewelry: JewelryType,
}

impl ArchetypeKey {
    /// Every archetype in catalog order.
    pub const ALL: [ArchetypeKey; 8] = [
        Self::new(Collection::Lissajous, JewelryType::Ring),
        Self::new(Collection::Lissajous, JewelryType::Bracelet),
        Self::new(Collection::Lissajous, JewelryType::Earring),
        Self::new(Collection::Lissajous, JewelryType::Pendant),
        Self::new(Collection::Torsion, JewelryType::Ring),
        Self::new(Collection::Torsion, JewelryType::Bracelet),
        Self::new(Collection::Torsion, JewelryType::Earring),
        Self::new(Collection::Torsion, JewelryType::Pendant),
    ];

    /// Creates a key.
    #[must_use]
    pub const fn new(collection: Collection, jewelry: JewelryType) -> Self {
        Self { collection, jewelry }
    }

    /// The parameter schema of this archetype.
    #[must_use]
    pub fn schema(&self) -> &'static ParameterSchema {
        match (self.collection, self.jewelry) {
            (Collection::Lissajous, JewelryType::Ring) => &LissajousRingParams::SCHEMA,
            (Collection::Lissajous, JewelryType::Bracelet) => &LissajousBraceletParams::SCHEMA,
            (Collection::Lissajous, JewelryType::Earring) => &LissajousEarringParams::SCHEMA,
            (Collection::Lissajous, JewelryType::Pendant) => &LissajousPendantParams::SCHEMA,
            (Collection::Torsion, JewelryType::Ring) => &TorsionRingParams::SCHEMA,
            (Collection::Torsion, JewelryType::Bracelet) => &TorsionBraceletParams::SCHEMA,
            (Collection::Torsion, JewelryType::Earring) => &TorsionEarringParams::SCHEMA,
            (Collection::Torsion, JewelryType::Pendant) => &TorsionPendantParams::SCHEMA,
        }
    }
}

impl fmt::Display for ArchetypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema().archetype)
    }
}

/// One parametric design with fully typed parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Archetype {
    /// Wire wound around the finger.
    LissajousRing(LissajousRingParams),
    /// Flat figure bent around the wrist.
    LissajousBracelet(LissajousBraceletParams),
    /// Flat figure with a holder loop.
    LissajousEarring(LissajousEarringParams),
    /// Spatial figure with a holder loop.
    LissajousPendant(LissajousPendantParams),
    /// Closed twisted band.
    TorsionRing(TorsionRingParams),
    /// Open tapered band with a screw rise.
    TorsionBracelet(TorsionBraceletParams),
    /// Small twisted band with a holder loop.
    TorsionEarring(TorsionEarringParams),
    /// Large twisted band with a holder loop.
    TorsionPendant(TorsionPendantParams),
}

impl Archetype {
    /// The archetype at its default parameters.
    #[must_use]
    pub fn defaults(key: ArchetypeKey) -> Self {
        match (key.collection, key.jewelry) {
            (Collection::Lissajous, JewelryType::Ring) => Self::LissajousRing(LissajousRingParams::default()),
            (Collection::Lissajous, JewelryType::Bracelet) => {
                Self::LissajousBracelet(LissajousBraceletParams::default())
            }
            (Collection::Lissajous, JewelryType::Earring) => {
                Self::LissajousEarring(LissajousEarringParams::default())
            }
            (Collection::Lissajous, JewelryType::Pendant) => {
                Self::LissajousPendant(LissajousPendantParams::default())
            }
            (Collection::Torsion, JewelryType::Ring) => Self::TorsionRing(TorsionRingParams::default()),
            (Collection::Torsion, JewelryType::Bracelet) => Self::TorsionBracelet(TorsionBraceletParams::default()),
            (Collection::Torsion, JewelryType::Earring) => Self::TorsionEarring(TorsionEarringParams::default()),
            (Collection::Torsion, JewelryType::Pendant) => Self::TorsionPendant(TorsionPendantParams::default()),
        }
    }

    /// Validates `values` against the schema of `key` and builds the archetype.
    ///
    /// Missing values take their defaults; out-of-range numbers are clamped
    /// and snapped.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`](crate::error::ParameterError) for unknown
    /// names, wrong kinds or non-finite numbers.
    pub fn from_values(key: ArchetypeKey, values: &ParameterValues) -> Result<Self> {
        let schema = key.schema();
        let validated = schema.validate(values)?;
        let reader = ValueReader::new(schema, &validated);
        Ok(match (key.collection, key.jewelry) {
            (Collection::Lissajous, JewelryType::Ring) => Self::LissajousRing(LissajousRingParams::read(&reader)?),
            (Collection::Lissajous, JewelryType::Bracelet) => {
                Self::LissajousBracelet(LissajousBraceletParams::read(&reader)?)
            }
            (Collection::Lissajous, JewelryType::Earring) => {
                Self::LissajousEarring(LissajousEarringParams::read(&reader)?)
            }
            (Collection::Lissajous, JewelryType::Pendant) => {
                Self::LissajousPendant(LissajousPendantParams::read(&reader)?)
            }
            (Collection::Torsion, JewelryType::Ring) => Self::TorsionRing(TorsionRingParams::read(&reader)?),
            (Collection::Torsion, JewelryType::Bracelet) => {
                Self::TorsionBracelet(TorsionBraceletParams::read(&reader)?)
            }
            (Collection::Torsion, JewelryType::Earring) => {
                Self::TorsionEarring(TorsionEarringParams::read(&reader)?)
            }
            (Collection::Torsion, JewelryType::Pendant) => {
                Self::TorsionPendant(TorsionPendantParams::read(&reader)?)
            }
        })
    }

    /// The key of this archetype.
    #[must_use]
    pub fn key(&self) -> ArchetypeKey {
        let (collection, jewelry) = match self {
            Self::LissajousRing(_) => (Collection::Lissajous, JewelryType::Ring),
            Self::LissajousBracelet(_) => (Collection::Lissajous, JewelryType::Bracelet),
            Self::LissajousEarring(_) => (Collection::Lissajous, JewelryType::Earring),
            Self::LissajousPendant(_) => (Collection::Lissajous, JewelryType::Pendant),
            Self::TorsionRing(_) => (Collection::Torsion, JewelryType::Ring),
            Self::TorsionBracelet(_) => (Collection::Torsion, JewelryType::Bracelet),
            Self::TorsionEarring(_) => (Collection::Torsion, JewelryType::Earring),
            Self::TorsionPendant(_) => (Collection::Torsion, JewelryType::Pendant),
        };
        ArchetypeKey::new(collection, jewelry)
    }

    /// The parameters as a value map.
    #[must_use]
    pub fn values(&self) -> ParameterValues {
        match self {
            Self::LissajousRing(p) => p.values(),
            Self::LissajousBracelet(p) => p.values(),
            Self::LissajousEarring(p) => p.values(),
            Self::LissajousPendant(p) => p.values(),
            Self::TorsionRing(p) => p.values(),
            Self::TorsionBracelet(p) => p.values(),
            Self::TorsionEarring(p) => p.values(),
            Self::TorsionPendant(p) => p.values(),
        }
    }

    /// Builds the mesh from scratch.
    ///
    /// # Errors
    ///
    /// Returns an error if a pipeline stage fails; validated parameters are
    /// not expected to trigger one.
    pub fn render(&self) -> Result<TriangleMesh> {
        debug!(archetype = %self.key(), "rendering");
        match self {
            Self::LissajousRing(p) => p.render(),
            Self::LissajousBracelet(p) => p.render(),
            Self::LissajousEarring(p) => p.render(),
            Self::LissajousPendant(p) => p.render(),
            Self::TorsionRing(p) => p.render(),
            Self::TorsionBracelet(p) => p.render(),
            Self::TorsionEarring(p) => p.render(),
            Self::TorsionPendant(p) => p.render(),
        }
    }
}
