//! Canonical entity records and the kinds they are selected for.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity kinds carried by the pack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Character,
    Weapon,
}

impl EntityKind {
    /// Required prefix of an accepted icon reference
    pub fn icon_prefix(self) -> &'static str {
        match self {
            EntityKind::Character => "UI_AvatarIcon_",
            EntityKind::Weapon => "UI_EquipIcon_",
        }
    }

    /// Upstream field holding the icon reference
    pub fn icon_field(self) -> &'static str {
        match self {
            EntityKind::Character => "iconName",
            EntityKind::Weapon => "icon",
        }
    }

    /// Artifact file name of the entity table
    pub fn table_file(self) -> &'static str {
        match self {
            EntityKind::Character => "characters.json",
            EntityKind::Weapon => "weapons.json",
        }
    }

    /// Artifact file name of the hash index
    pub fn index_file(self) -> &'static str {
        match self {
            EntityKind::Character => "hash_index_characters.json",
            EntityKind::Weapon => "hash_index_weapons.json",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Character => write!(f, "characters"),
            EntityKind::Weapon => write!(f, "weapons"),
        }
    }
}

/// A selected character or weapon, as written to its table.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub name: String,
    /// Star rarity. Characters are always 1..=5; weapons carry the raw
    /// upstream rank level.
    pub rarity: i64,
    /// Reserved, always null
    pub element: Option<String>,
    pub weapon_type: String,
    pub icon_name: String,
}
