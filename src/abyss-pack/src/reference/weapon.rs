//! Weapon type definitions

/// Weapon type information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponType {
    pub code: &'static str,
    pub name: &'static str,
}

/// Label used when a record carries no weapon-type code at all
pub const UNKNOWN_WEAPON_TYPE: &str = "Unknown";

/// All known weapon types
pub const WEAPON_TYPES: &[WeaponType] = &[
    WeaponType {
        code: "WEAPON_SWORD_ONE_HAND",
        name: "Sword",
    },
    WeaponType {
        code: "WEAPON_CLAYMORE",
        name: "Claymore",
    },
    WeaponType {
        code: "WEAPON_POLE",
        name: "Polearm",
    },
    WeaponType {
        code: "WEAPON_CATALYST",
        name: "Catalyst",
    },
    WeaponType {
        code: "WEAPON_BOW",
        name: "Bow",
    },
];

/// Get weapon type by upstream code
pub fn weapon_type_by_code(code: &str) -> Option<&'static WeaponType> {
    WEAPON_TYPES.iter().find(|w| w.code == code)
}

/// Canonical short label for an upstream `weaponType` code.
///
/// Unknown codes are passed through verbatim; a missing or empty code
/// becomes [`UNKNOWN_WEAPON_TYPE`].
pub fn weapon_type_short(code: Option<&str>) -> String {
    match code {
        None | Some("") => UNKNOWN_WEAPON_TYPE.to_string(),
        Some(code) => weapon_type_by_code(code)
            .map(|w| w.name.to_string())
            .unwrap_or_else(|| code.to_string()),
    }
}
