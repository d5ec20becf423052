//! Personal carbon footprint calculator.
//!
//! Daily emissions are estimated from three inputs:
//!
//! | Source | Factor |
//! |---|---|
//! | Car travel | 0.25 kg CO2 per km |
//! | Electricity | 0.6 kg CO2 per kWh |
//! | Diet | fixed kg CO2 per [`FoodProfile`] |
//!
//! The emission breakdown is then matched against a small set of lifestyle
//! profiles by cosine similarity to pick a suggestion.
//!
//! # Quick Start
//!
//! ```
//! use sustainrec::footprint::{calculate, FoodProfile, FootprintInput};
//!
//! let input = FootprintInput::new(40.0, 5.0, FoodProfile::MeatHeavy);
//! let report = calculate(&input).expect("valid input");
//! assert!((report.total_co2 - 20.0).abs() < 1e-9);
//! assert_eq!(report.recommendation, "Use public transport!");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SustainError};
use crate::primitives::Vector;
use crate::text::similarity::cosine_similarity;

/// kg CO2 per km driven.
pub const CAR_KG_PER_KM: f64 = 0.25;

/// kg CO2 per kWh consumed.
pub const ELECTRICITY_KG_PER_KWH: f64 = 0.6;

/// Suggestion text and its `[car, electricity, food]` profile, in priority order.
pub const LIFESTYLE_PROFILES: [(&str, [f64; 3]); 4] = [
    ("Use public transport!", [1.0, 0.0, 0.0]),
    ("Switch to solar energy!", [0.0, 1.0, 0.0]),
    ("Try a vegan diet!", [0.0, 0.0, 1.0]),
    ("Hybrid lifestyle is great!", [0.5, 0.5, 0.0]),
];

/// Diet category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodProfile {
    /// Plant-based only
    #[serde(rename = "Vegan")]
    Vegan,
    /// No meat
    #[serde(rename = "Vegetarian")]
    Vegetarian,
    /// Some meat
    #[serde(rename = "Mixed (Meat & Veg)")]
    Mixed,
    /// Mostly meat
    #[serde(rename = "Meat-heavy")]
    MeatHeavy,
}

impl FoodProfile {
    /// Every profile, lightest first.
    pub const ALL: [FoodProfile; 4] = [
        FoodProfile::Vegan,
        FoodProfile::Vegetarian,
        FoodProfile::Mixed,
        FoodProfile::MeatHeavy,
    ];

    /// Display label, as accepted over the API.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FoodProfile::Vegan => "Vegan",
            FoodProfile::Vegetarian => "Vegetarian",
            FoodProfile::Mixed => "Mixed (Meat & Veg)",
            FoodProfile::MeatHeavy => "Meat-heavy",
        }
    }

    /// Daily kg CO2 attributed to the diet.
    #[must_use]
    pub fn emission(self) -> f64 {
        match self {
            FoodProfile::Vegan => 2.0,
            FoodProfile::Vegetarian => 3.0,
            FoodProfile::Mixed => 5.0,
            FoodProfile::MeatHeavy => 7.0,
        }
    }
}

impl fmt::Display for FoodProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FoodProfile {
    type Err = SustainError;

    /// Case-insensitive match on the label.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|p| p.label()).collect();
                SustainError::validation(
                    "food",
                    format!("unknown category '{wanted}' (expected one of: {})", known.join(", ")),
                )
            })
    }
}

/// Calculator input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FootprintInput {
    /// km driven
    pub distance: f64,
    /// kWh consumed
    pub electricity: f64,
    /// Diet category
    pub food: FoodProfile,
}

impl FootprintInput {
    /// Build an input.
    #[must_use]
    pub fn new(distance: f64, electricity: f64, food: FoodProfile) -> Self {
        Self {
            distance,
            electricity,
            food,
        }
    }

    /// Reject negative or non-finite quantities.
    ///
    /// # Errors
    ///
    /// Returns [`SustainError::Validation`] naming the bad field.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("distance", self.distance), ("electricity", self.electricity)] {
            if !value.is_finite() || value < 0.0 {
                return Err(SustainError::validation(
                    field,
                    "must be a non-negative finite number",
                ));
            }
        }
        Ok(())
    }
}

/// Calculator output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintReport {
    /// Total kg CO2
    pub total_co2: f64,
    /// Suggested lifestyle change
    pub recommendation: String,
}

/// Estimate emissions and suggest the closest lifestyle profile.
///
/// Ties between profiles go to the earlier entry in [`LIFESTYLE_PROFILES`].
///
/// # Errors
///
/// Fails validation for negative or non-finite inputs.
pub fn calculate(input: &FootprintInput) -> Result<FootprintReport> {
    input.validate()?;

    let car = input.distance * CAR_KG_PER_KM;
    let electricity = input.electricity * ELECTRICITY_KG_PER_KWH;
    let food = input.food.emission();
    let user = Vector::from_slice(&[car, electricity, food]);

    let mut best: Option<(&str, f64)> = None;
    for (label, profile) in LIFESTYLE_PROFILES {
        let score = cosine_similarity(&user, &Vector::from_slice(&profile))?;
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((label, score));
        }
    }

    let recommendation = best
        .map(|(label, _)| label.to_string())
        .ok_or_else(|| SustainError::EmptyInput("no lifestyle profiles".to_string()))?;

    Ok(FootprintReport {
        total_co2: car + electricity + food,
        recommendation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(distance: f64, electricity: f64, food: FoodProfile) -> FootprintReport {
        calculate(&FootprintInput::new(distance, electricity, food)).expect("valid input")
    }

    #[test]
    fn test_total_uses_emission_factors() {
        let r = report(10.0, 10.0, FoodProfile::Vegetarian);
        assert!((r.total_co2 - (2.5 + 6.0 + 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_diet_dominated_suggests_vegan() {
        let r = report(0.0, 0.0, FoodProfile::Mixed);
        assert_eq!(r.recommendation, "Try a vegan diet!");
        assert!((r.total_co2 - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_electricity_dominated_suggests_solar() {
        let r = report(0.0, 100.0, FoodProfile::Vegan);
        assert_eq!(r.recommendation, "Switch to solar energy!");
    }

    #[test]
    fn test_balanced_travel_and_power_suggests_hybrid() {
        // car 25, electricity 25, food 2
        let r = report(100.0, 41.666_666_666_666_664, FoodProfile::Vegan);
        assert_eq!(r.recommendation, "Hybrid lifestyle is great!");
    }

    #[test]
    fn test_negative_input_rejected() {
        let err = calculate(&FootprintInput::new(-1.0, 0.0, FoodProfile::Vegan))
            .expect_err("negative distance");
        assert!(err.is_validation());
        assert!(err.to_string().contains("distance"));
    }

    #[test]
    fn test_food_parsing() {
        assert_eq!("vegan".parse::<FoodProfile>().ok(), Some(FoodProfile::Vegan));
        assert_eq!(
            " Mixed (Meat & Veg) ".parse::<FoodProfile>().ok(),
            Some(FoodProfile::Mixed)
        );
        assert_eq!("MEAT-HEAVY".parse::<FoodProfile>().ok(), Some(FoodProfile::MeatHeavy));
        let err = "Carnivore".parse::<FoodProfile>().expect_err("unknown");
        assert!(err.is_validation());
    }

    #[test]
    fn test_food_serde_uses_labels() {
        let json = serde_json::to_string(&FoodProfile::Mixed).expect("serialize");
        assert_eq!(json, "\"Mixed (Meat & Veg)\"");
        let parsed: FootprintInput =
            serde_json::from_str(r#"{"distance": 1.0, "electricity": 2.0, "food": "Meat-heavy"}"#)
                .expect("deserialize");
        assert_eq!(parsed.food, FoodProfile::MeatHeavy);
        assert!(serde_json::from_str::<FootprintInput>(
            r#"{"distance": 1.0, "electricity": 2.0, "food": "Fish"}"#
        )
        .is_err());
    }
}
