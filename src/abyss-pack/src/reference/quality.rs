//! Quality tier definitions

/// Quality tier information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityTier {
    pub code: &'static str,
    pub rarity: u8,
}

/// All known quality tiers, highest rarity first
pub const QUALITY_TIERS: &[QualityTier] = &[
    QualityTier {
        code: "QUALITY_ORANGE",
        rarity: 5,
    },
    QualityTier {
        code: "QUALITY_PURPLE",
        rarity: 4,
    },
    QualityTier {
        code: "QUALITY_BLUE",
        rarity: 3,
    },
    QualityTier {
        code: "QUALITY_GREEN",
        rarity: 2,
    },
    QualityTier {
        code: "QUALITY_WHITE",
        rarity: 1,
    },
];

/// Get quality tier by upstream code
pub fn quality_by_code(code: &str) -> Option<&'static QualityTier> {
    QUALITY_TIERS.iter().find(|q| q.code == code)
}

/// Star rarity (1..=5) for an upstream `qualityType` code.
///
/// Any code outside the five known tiers (e.g. `QUALITY_ORANGE_SP`,
/// `QUALITY_RED`) yields `None` and the record must be dropped.
pub fn rarity_from_quality(code: &str) -> Option<u8> {
    quality_by_code(code).map(|q| q.rarity)
}
