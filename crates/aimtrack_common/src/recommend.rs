//! Recommendation engine
//!
//! Turns current K/D and HS% into coaching statements using fixed thresholds.
//! K/D rules run before HS% rules; inside each metric the low check wins.

use serde::{Deserialize, Serialize};

/// K/D below this means the player dies more than they kill
pub const LOW_KD: f64 = 1.0;
/// K/D at or above this (with enough headshots) counts as elite
pub const ELITE_KD: f64 = 1.2;
/// HS% needed alongside `ELITE_KD`
pub const ELITE_HS_PCT: f64 = 50.0;
/// HS% below this points at aim problems
pub const LOW_HS_PCT: f64 = 40.0;
/// HS% above this is precise shooting
pub const HIGH_HS_PCT: f64 = 55.0;

/// Sentence used when no rule fires
pub const GENERIC_RECOMMENDATION: &str =
    "Keep up your current training pace and review your positioning on the map.";

/// A single coaching statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    LowSurvivability,
    EliteMechanics,
    LowHeadshotRate,
    ImpressivePrecision,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::LowSurvivability => {
                "Your survivability is low; focus on defensive play and avoid unnecessary engagements."
            }
            Recommendation::EliteMechanics => {
                "Your mechanics are at a very high level; consider playing in more demanding leagues."
            }
            Recommendation::LowHeadshotRate => {
                "A low HS% points to problems with recoil (spray) control or aiming at head height."
            }
            Recommendation::ImpressivePrecision => {
                "Your precision is impressive; now focus on the tactical use of grenades."
            }
        }
    }
}

/// Generate recommendations for the current session ratios
///
/// An empty result means nothing specific to say; the report falls back to
/// `GENERIC_RECOMMENDATION`.
pub fn recommend(kd: f64, hs_pct: f64) -> Vec<Recommendation> {
    let mut result = Vec::new();

    result.extend(check_kd(kd, hs_pct));
    result.extend(check_headshots(hs_pct));

    result
}

/// Rule 1: survivability / elite mechanics
fn check_kd(kd: f64, hs_pct: f64) -> Option<Recommendation> {
    if kd < LOW_KD {
        Some(Recommendation::LowSurvivability)
    } else if kd >= ELITE_KD && hs_pct >= ELITE_HS_PCT {
        Some(Recommendation::EliteMechanics)
    } else {
        None
    }
}

/// Rule 2: aim quality
fn check_headshots(hs_pct: f64) -> Option<Recommendation> {
    if hs_pct < LOW_HS_PCT {
        Some(Recommendation::LowHeadshotRate)
    } else if hs_pct > HIGH_HS_PCT {
        Some(Recommendation::ImpressivePrecision)
    } else {
        None
    }
}

/// Space-joined messages, or the generic sentence when empty
pub fn render_recommendations(recommendations: &[Recommendation]) -> String {
    if recommendations.is_empty() {
        return GENERIC_RECOMMENDATION.to_string();
    }

    recommendations
        .iter()
        .map(|r| r.message())
        .collect::<Vec<_>>()
        .join(" ")
}
