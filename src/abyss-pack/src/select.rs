//! Deterministic selection of a bounded record subset per entity kind.
//!
//! Candidates are ordered by numeric id and scanned in that order; the
//! first `max` candidates passing every filter make up the table. Filters
//! run in a fixed order and stop at the first failure:
//!
//! 1. id present and truthy
//! 2. icon reference present and truthy
//! 3. icon reference starts with the kind's prefix
//! 4. rarity resolvable (quality code for characters, integer rank level
//!    for weapons)

use serde_json::Value;
use std::fmt;
use tracing::{debug, trace};

use crate::record::{EntityKind, EntityRecord};
use crate::reference::{rarity_from_quality, weapon_type_short};
use crate::table::EntityTable;
use crate::textmap::TextMap;

/// Why a candidate was left out of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    MissingId,
    MissingIcon,
    IconPrefix(String),
    Rarity(Option<Value>),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingId => write!(f, "missing id"),
            Rejection::MissingIcon => write!(f, "missing icon"),
            Rejection::IconPrefix(icon) => write!(f, "icon {} has wrong prefix", icon),
            Rejection::Rarity(Some(raw)) => write!(f, "unresolvable rarity {}", raw),
            Rejection::Rarity(None) => write!(f, "no rarity"),
        }
    }
}

/// Select characters from `AvatarExcelConfigData` rows
pub fn build_characters(candidates: &[Value], textmap: &TextMap, max: usize) -> EntityTable {
    select(EntityKind::Character, candidates, textmap, max)
}

/// Select weapons from `WeaponExcelConfigData` rows
pub fn build_weapons(candidates: &[Value], textmap: &TextMap, max: usize) -> EntityTable {
    select(EntityKind::Weapon, candidates, textmap, max)
}

/// Build the table for `kind`: the first `max` candidates, in ascending id
/// order, that pass all filters.
///
/// Should two candidates share an id, the later one replaces the earlier
/// value in place; the table does not grow and the replaced record still
/// counts toward `max` only once.
pub fn select(
    kind: EntityKind,
    candidates: &[Value],
    textmap: &TextMap,
    max: usize,
) -> EntityTable {
    let mut sorted: Vec<&Value> = candidates.iter().collect();
    // Stable sort: equal ids keep upstream order
    sorted.sort_by_key(|c| numeric_id(c));

    let mut table = EntityTable::new();
    for candidate in sorted {
        if table.len() >= max {
            break;
        }

        match accept(kind, candidate, textmap) {
            Ok((key, record)) => {
                if table.insert(key.clone(), record).is_some() {
                    debug!("{}: duplicate id {} replaced earlier record", kind, key);
                }
            }
            Err(reason) => {
                trace!(
                    "{}: rejected {}: {}",
                    kind,
                    candidate.get("id").map(key_text).unwrap_or_default(),
                    reason
                );
            }
        }
    }

    table
}

/// Run the filters for one candidate, producing its table key and record.
pub fn accept(
    kind: EntityKind,
    candidate: &Value,
    textmap: &TextMap,
) -> Result<(String, EntityRecord), Rejection> {
    let id = candidate
        .get("id")
        .filter(|v| is_truthy(v))
        .ok_or(Rejection::MissingId)?;

    let icon = candidate
        .get(kind.icon_field())
        .filter(|v| is_truthy(v))
        .ok_or(Rejection::MissingIcon)?;
    let icon = key_text(icon);
    if !icon.starts_with(kind.icon_prefix()) {
        return Err(Rejection::IconPrefix(icon));
    }

    let rarity = match kind {
        EntityKind::Character => {
            let quality = candidate.get("qualityType");
            quality
                .and_then(Value::as_str)
                .and_then(rarity_from_quality)
                .map(i64::from)
                .ok_or_else(|| Rejection::Rarity(quality.cloned()))?
        }
        EntityKind::Weapon => {
            let rank = candidate.get("rankLevel");
            rank.and_then(parse_rank)
                .ok_or_else(|| Rejection::Rarity(rank.cloned()))?
        }
    };

    let key = key_text(id);
    let name_hash = candidate
        .get("nameTextMapHash")
        .map(key_text)
        .unwrap_or_default();
    let weapon_type = candidate
        .get("weaponType")
        .filter(|v| !v.is_null())
        .map(key_text);

    let record = EntityRecord {
        name: textmap.resolve_name(&name_hash, &key),
        rarity,
        element: None,
        weapon_type: weapon_type_short(weapon_type.as_deref()),
        icon_name: icon,
    };

    Ok((key, record))
}

/// Sort key for a candidate; missing or non-numeric ids sort as 0.
fn numeric_id(candidate: &Value) -> i64 {
    match candidate.get("id") {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Weapon rank level as an integer. No range check is applied.
fn parse_rank(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// String form of a scalar used for keys and lookups (`10000002`, not `"10000002"`).
fn key_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ayaka() -> Value {
        json!({
            "id": 10000002,
            "iconName": "UI_AvatarIcon_Ayaka",
            "qualityType": "QUALITY_PURPLE",
            "weaponType": "WEAPON_SWORD_ONE_HAND",
            "nameTextMapHash": "123"
        })
    }

    fn character(id: u64, quality: &str) -> Value {
        json!({
            "id": id,
            "iconName": format!("UI_AvatarIcon_C{}", id),
            "qualityType": quality,
            "weaponType": "WEAPON_BOW",
            "nameTextMapHash": id * 7
        })
    }

    fn weapon(id: u64, rank: Value) -> Value {
        json!({
            "id": id,
            "icon": format!("UI_EquipIcon_W{}", id),
            "weaponType": "WEAPON_CLAYMORE",
            "rankLevel": rank,
            "nameTextMapHash": id * 3
        })
    }

    fn textmap() -> TextMap {
        TextMap::from_value(json!({"123": "Kamisato Ayaka"})).unwrap()
    }

    #[test]
    fn test_ayaka_entry() {
        let table = build_characters(&[ayaka()], &textmap(), 30);
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get("10000002"),
            Some(&EntityRecord {
                name: "Kamisato Ayaka".to_string(),
                rarity: 4,
                element: None,
                weapon_type: "Sword".to_string(),
                icon_name: "UI_AvatarIcon_Ayaka".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_quality_excluded() {
        let mut red = ayaka();
        red["qualityType"] = json!("QUALITY_RED");
        let table = build_characters(&[red], &textmap(), 30);
        assert!(table.is_empty());
    }

    #[test]
    fn test_sorted_by_numeric_id() {
        let candidates = vec![
            character(10000030, "QUALITY_ORANGE"),
            character(10000005, "QUALITY_WHITE"),
            character(900, "QUALITY_BLUE"),
        ];
        let table = build_characters(&candidates, &TextMap::default(), 30);
        let keys: Vec<&str> = table.keys().collect();
        assert_eq!(keys, vec!["900", "10000005", "10000030"]);
    }

    #[test]
    fn test_string_ids_sort_numerically() {
        let mut a = character(0, "QUALITY_BLUE");
        a["id"] = json!("100");
        let mut b = character(0, "QUALITY_BLUE");
        b["id"] = json!("20");
        let table = build_characters(&[a, b], &TextMap::default(), 30);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["20", "100"]);
    }

    #[test]
    fn test_cardinality_bound_takes_first_passing() {
        let candidates: Vec<Value> = (1..=10)
            .map(|i| {
                let quality = if i % 2 == 0 { "QUALITY_RED" } else { "QUALITY_BLUE" };
                character(i, quality)
            })
            .collect();

        let table = build_characters(&candidates, &TextMap::default(), 3);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["1", "3", "5"]);

        let all = build_characters(&candidates, &TextMap::default(), 30);
        assert_eq!(all.len(), 5);

        let none = build_characters(&candidates, &TextMap::default(), 0);
        assert!(none.is_empty());
    }

    #[test]
    fn test_prefix_filters() {
        let mut wrong = character(1, "QUALITY_BLUE");
        wrong["iconName"] = json!("UI_EquipIcon_Sword");
        let table = build_characters(&[wrong], &TextMap::default(), 30);
        assert!(table.is_empty());

        let mut weapon_wrong = weapon(2, json!(3));
        weapon_wrong["icon"] = json!("UI_AvatarIcon_Nope");
        let table = build_weapons(&[weapon_wrong], &TextMap::default(), 30);
        assert!(table.is_empty());
    }

    #[test]
    fn test_missing_id_or_icon_rejected() {
        let mut no_id = character(1, "QUALITY_BLUE");
        no_id.as_object_mut().unwrap().remove("id");
        let mut zero_id = character(1, "QUALITY_BLUE");
        zero_id["id"] = json!(0);
        let mut empty_icon = character(2, "QUALITY_BLUE");
        empty_icon["iconName"] = json!("");

        let kind = EntityKind::Character;
        let map = TextMap::default();
        assert_eq!(accept(kind, &no_id, &map), Err(Rejection::MissingId));
        assert_eq!(accept(kind, &zero_id, &map), Err(Rejection::MissingId));
        assert_eq!(accept(kind, &empty_icon, &map), Err(Rejection::MissingIcon));
    }

    #[test]
    fn test_weapon_rank_parsing() {
        let candidates = vec![
            weapon(11101, json!(1)),
            weapon(11201, json!("3")),
            weapon(11301, json!("three")),
            weapon(11401, Value::Null),
            weapon(11501, json!(9)),
        ];
        let table = build_weapons(&candidates, &TextMap::default(), 30);
        assert_eq!(
            table.keys().collect::<Vec<_>>(),
            vec!["11101", "11201", "11501"]
        );
        assert_eq!(table.get("11201").map(|r| r.rarity), Some(3));
        // Rank levels are not range-checked
        assert_eq!(table.get("11501").map(|r| r.rarity), Some(9));
    }

    #[test]
    fn test_weapon_record_shape() {
        let map = TextMap::from_value(json!({"33303": "Dull Blade"})).unwrap();
        let table = build_weapons(&[weapon(11101, json!(1))], &map, 30);
        let record = table.get("11101").unwrap();
        assert_eq!(record.name, "Dull Blade");
        assert_eq!(record.weapon_type, "Claymore");
        assert_eq!(record.icon_name, "UI_EquipIcon_W11101");
        assert_eq!(record.element, None);
    }

    #[test]
    fn test_numeric_name_hash_and_fallback() {
        let map = TextMap::from_value(json!({"700000007": "Bow User"})).unwrap();
        let table = build_characters(&[character(100000001, "QUALITY_GREEN")], &map, 30);
        assert_eq!(table.get("100000001").unwrap().name, "Bow User");

        let table = build_characters(
            &[character(100000001, "QUALITY_GREEN")],
            &TextMap::default(),
            30,
        );
        assert_eq!(table.get("100000001").unwrap().name, "#100000001");
    }

    #[test]
    fn test_weapon_type_fallbacks() {
        let mut unknown = character(1, "QUALITY_BLUE");
        unknown["weaponType"] = json!("WEAPON_GUN");
        let mut missing = character(2, "QUALITY_BLUE");
        missing.as_object_mut().unwrap().remove("weaponType");

        let table = build_characters(&[unknown, missing], &TextMap::default(), 30);
        assert_eq!(table.get("1").unwrap().weapon_type, "WEAPON_GUN");
        assert_eq!(table.get("2").unwrap().weapon_type, "Unknown");
    }

    #[test]
    fn test_duplicate_id_overwrites_without_growing() {
        let first = character(7, "QUALITY_BLUE");
        let mut second = character(7, "QUALITY_ORANGE");
        second["iconName"] = json!("UI_AvatarIcon_Second");
        let third = character(8, "QUALITY_BLUE");

        let table = build_characters(&[first, second, third], &TextMap::default(), 2);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["7", "8"]);
        let seven = table.get("7").unwrap();
        assert_eq!(seven.icon_name, "UI_AvatarIcon_Second");
        assert_eq!(seven.rarity, 5);
    }

    #[test]
    fn test_invariants_hold_for_mixed_input() {
        let mut candidates: Vec<Value> = (1..=40)
            .map(|i| {
                let quality = ["QUALITY_ORANGE", "QUALITY_ORANGE_SP", "QUALITY_WHITE"];
                character(i, quality[i as usize % 3])
            })
            .collect();
        candidates.push(json!({
            "iconName": "UI_AvatarIcon_NoId",
            "qualityType": "QUALITY_BLUE"
        }));

        let table = build_characters(&candidates, &TextMap::default(), 30);
        assert!(table.len() <= 30);
        for (_, record) in table.iter() {
            assert!(record.icon_name.starts_with("UI_AvatarIcon_"));
            assert!((1..=5).contains(&record.rarity));
        }
    }
}
