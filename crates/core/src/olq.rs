//! Officer-Like Qualities
//!
//! The fixed 15-quality taxonomy that questions target and responses are
//! scored against, grouped into the four SSB factors.

use serde::{Deserialize, Serialize};

/// SSB factor grouping for an OLQ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OlqCategory {
    /// Factor I: Planning & Organizing
    Intellectual,
    /// Factor II: Social Adjustment
    Social,
    /// Factor III: Social Effectiveness
    Dynamic,
    /// Factor IV: Dynamic (character and physical)
    Character,
}

impl OlqCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Intellectual => "Intellectual Qualities",
            Self::Social => "Social Qualities",
            Self::Dynamic => "Dynamic Qualities",
            Self::Character => "Character & Physical Qualities",
        }
    }

    /// SSB factor number (1-4).
    pub fn factor_number(&self) -> u8 {
        match self {
            Self::Intellectual => 1,
            Self::Social => 2,
            Self::Dynamic => 3,
            Self::Character => 4,
        }
    }

    pub fn from_factor_number(factor: u8) -> Option<Self> {
        match factor {
            1 => Some(Self::Intellectual),
            2 => Some(Self::Social),
            3 => Some(Self::Dynamic),
            4 => Some(Self::Character),
            _ => None,
        }
    }
}

/// One Officer-Like Quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Olq {
    EffectiveIntelligence,
    ReasoningAbility,
    OrganizingAbility,
    PowerOfExpression,
    SocialAdjustment,
    Cooperation,
    SenseOfResponsibility,
    Initiative,
    SelfConfidence,
    SpeedOfDecision,
    InfluenceGroup,
    Liveliness,
    Determination,
    Courage,
    Stamina,
}

impl Olq {
    pub const ALL: [Olq; 15] = [
        Olq::EffectiveIntelligence,
        Olq::ReasoningAbility,
        Olq::OrganizingAbility,
        Olq::PowerOfExpression,
        Olq::SocialAdjustment,
        Olq::Cooperation,
        Olq::SenseOfResponsibility,
        Olq::Initiative,
        Olq::SelfConfidence,
        Olq::SpeedOfDecision,
        Olq::InfluenceGroup,
        Olq::Liveliness,
        Olq::Determination,
        Olq::Courage,
        Olq::Stamina,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Olq::EffectiveIntelligence => "Effective Intelligence",
            Olq::ReasoningAbility => "Reasoning Ability",
            Olq::OrganizingAbility => "Organizing Ability",
            Olq::PowerOfExpression => "Power of Expression",
            Olq::SocialAdjustment => "Social Adjustment",
            Olq::Cooperation => "Cooperation",
            Olq::SenseOfResponsibility => "Sense of Responsibility",
            Olq::Initiative => "Initiative",
            Olq::SelfConfidence => "Self Confidence",
            Olq::SpeedOfDecision => "Speed of Decision",
            Olq::InfluenceGroup => "Ability to Influence Group",
            Olq::Liveliness => "Liveliness",
            Olq::Determination => "Determination",
            Olq::Courage => "Courage",
            Olq::Stamina => "Stamina",
        }
    }

    pub fn category(&self) -> OlqCategory {
        match self {
            Olq::EffectiveIntelligence
            | Olq::ReasoningAbility
            | Olq::OrganizingAbility
            | Olq::PowerOfExpression => OlqCategory::Intellectual,
            Olq::SocialAdjustment | Olq::Cooperation | Olq::SenseOfResponsibility => {
                OlqCategory::Social
            }
            Olq::Initiative
            | Olq::SelfConfidence
            | Olq::SpeedOfDecision
            | Olq::InfluenceGroup
            | Olq::Liveliness => OlqCategory::Dynamic,
            Olq::Determination | Olq::Courage | Olq::Stamina => OlqCategory::Character,
        }
    }

    /// Critical qualities: reasoning, every Factor II quality, liveliness and courage.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            Olq::ReasoningAbility
                | Olq::SocialAdjustment
                | Olq::Cooperation
                | Olq::SenseOfResponsibility
                | Olq::Liveliness
                | Olq::Courage
        )
    }

    pub fn by_category(category: OlqCategory) -> Vec<Olq> {
        Self::ALL
            .iter()
            .copied()
            .filter(|olq| olq.category() == category)
            .collect()
    }
}
