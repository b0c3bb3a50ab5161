//! Reference data for upstream excel enumerations
//!
//! Closed lookup tables mapping the upstream quality and weapon-type codes
//! onto the pack's canonical vocabulary. Lookups never guess: an unknown
//! quality code yields `None`, an unknown weapon-type code passes through.

pub mod quality;
pub mod weapon;

#[doc(inline)]
pub use quality::{quality_by_code, rarity_from_quality, QualityTier, QUALITY_TIERS};
#[doc(inline)]
pub use weapon::{
    weapon_type_by_code, weapon_type_short, WeaponType, UNKNOWN_WEAPON_TYPE, WEAPON_TYPES,
};
