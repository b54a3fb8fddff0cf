use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnStatus {
    Returned,
    NotReturned,
}

impl ReturnStatus {
    pub const fn ordered() -> [Self; 2] {
        [Self::Returned, Self::NotReturned]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Returned => "Returned",
            Self::NotReturned => "Not Returned",
        }
    }

    /// Only the two export spellings are accepted; anything else is a data-quality error.
    pub fn parse(value: &str) -> Option<Self> {
        let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
        match collapsed.to_ascii_lowercase().as_str() {
            "returned" => Some(Self::Returned),
            "not returned" => Some(Self::NotReturned),
            _ => None,
        }
    }
}

/// Ordinal customer feedback tier. Unrecognized text lands in `Unknown`.
///
/// Deserialization goes through [`Feedback::parse`], so it is case-insensitive and never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Feedback {
    Poor,
    Bad,
    Average,
    Good,
    Excellent,
    Unknown,
}

impl Feedback {
    pub const NEUTRAL_SCORE: u8 = 3;

    pub const fn ordered() -> [Self; 5] {
        [
            Self::Poor,
            Self::Bad,
            Self::Average,
            Self::Good,
            Self::Excellent,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Bad => "Bad",
            Self::Average => "Average",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
            Self::Unknown => "Unknown",
        }
    }

    pub const fn score(self) -> u8 {
        match self {
            Self::Poor => 1,
            Self::Bad => 2,
            Self::Average => 3,
            Self::Good => 4,
            Self::Excellent => 5,
            Self::Unknown => Self::NEUTRAL_SCORE,
        }
    }

    /// The two lowest tiers.
    pub const fn is_low(self) -> bool {
        matches!(self, Self::Poor | Self::Bad)
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "poor" => Self::Poor,
            "bad" => Self::Bad,
            "average" => Self::Average,
            "good" => Self::Good,
            "excellent" => Self::Excellent,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for Feedback {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl FromStr for Feedback {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EcoCertification {
    Uncertified,
    Certified(String),
}

impl EcoCertification {
    pub fn parse(value: Option<&str>) -> Self {
        let Some(trimmed) = value.map(str::trim).filter(|value| !value.is_empty()) else {
            return Self::Uncertified;
        };

        match trimmed.to_ascii_lowercase().as_str() {
            "none" | "n/a" | "na" | "-" => Self::Uncertified,
            _ => Self::Certified(trimmed.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Uncertified => "None",
            Self::Certified(name) => name,
        }
    }
}

/// Customer age bracket. `[low, high)` except `Senior`, which is closed at 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeGroup {
    GenZ,
    YoungAdult,
    Adult,
    MiddleAge,
    Senior,
    Unclassified,
}

impl AgeGroup {
    pub const MIN_AGE: i32 = 18;
    pub const MAX_AGE: i32 = 100;

    pub const fn label(self) -> &'static str {
        match self {
            Self::GenZ => "Gen Z",
            Self::YoungAdult => "Young Adult",
            Self::Adult => "Adult",
            Self::MiddleAge => "Middle Age",
            Self::Senior => "Senior",
            Self::Unclassified => "Unclassified",
        }
    }

    pub const fn from_age(age: i32) -> Self {
        match age {
            18..=24 => Self::GenZ,
            25..=34 => Self::YoungAdult,
            35..=44 => Self::Adult,
            45..=59 => Self::MiddleAge,
            60..=100 => Self::Senior,
            _ => Self::Unclassified,
        }
    }
}

/// One purchase or return event as read from the export.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub order_date: NaiveDate,
    pub unit_price: Option<f64>,
    pub total_revenue: f64,
    pub material: String,
    pub category: String,
    pub gender: String,
    pub age: i32,
    pub location: Option<String>,
    pub return_status: ReturnStatus,
    /// Present only when `return_status` is `Returned`.
    pub return_reason: Option<String>,
    pub feedback: Feedback,
    pub recycled_pct: f64,
    pub water_usage_liters: f64,
    pub carbon_offset_investment: f64,
    pub eco_certification: EcoCertification,
}

/// An order record plus the attributes derived from it. Built once by the enricher.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedOrder {
    pub record: OrderRecord,
    pub is_returned: bool,
    pub age_group: AgeGroup,
    pub country: String,
    pub feedback_score: u8,
    pub return_carbon_waste_kg: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_brackets_are_half_open_with_closed_senior_bracket() {
        assert_eq!(AgeGroup::from_age(17), AgeGroup::Unclassified);
        assert_eq!(AgeGroup::from_age(18), AgeGroup::GenZ);
        assert_eq!(AgeGroup::from_age(24), AgeGroup::GenZ);
        assert_eq!(AgeGroup::from_age(25), AgeGroup::YoungAdult);
        assert_eq!(AgeGroup::from_age(35), AgeGroup::Adult);
        assert_eq!(AgeGroup::from_age(45), AgeGroup::MiddleAge);
        assert_eq!(AgeGroup::from_age(59), AgeGroup::MiddleAge);
        assert_eq!(AgeGroup::from_age(60), AgeGroup::Senior);
        assert_eq!(AgeGroup::from_age(100), AgeGroup::Senior);
        assert_eq!(AgeGroup::from_age(101), AgeGroup::Unclassified);
        assert_eq!(AgeGroup::from_age(-4), AgeGroup::Unclassified);
    }

    #[test]
    fn every_age_maps_to_exactly_one_bracket() {
        for age in -10..=120 {
            let group = AgeGroup::from_age(age);
            let inside = (AgeGroup::MIN_AGE..=AgeGroup::MAX_AGE).contains(&age);
            assert_eq!(group == AgeGroup::Unclassified, !inside, "age {age}");
        }
    }

    #[test]
    fn feedback_parsing_never_fails() {
        assert_eq!(Feedback::parse(" poor "), Feedback::Poor);
        assert_eq!(Feedback::parse("EXCELLENT"), Feedback::Excellent);
        assert_eq!(Feedback::parse("meh"), Feedback::Unknown);
        assert_eq!(Feedback::parse(""), Feedback::Unknown);
        assert_eq!(Feedback::Unknown.score(), 3);
        assert_eq!(
            Feedback::ordered().map(Feedback::score),
            [1, 2, 3, 4, 5]
        );
        assert!(Feedback::Bad.is_low());
        assert!(!Feedback::Average.is_low());
    }

    #[test]
    fn feedback_deserializes_through_the_lenient_parser() {
        let tiers: Vec<Feedback> =
            serde_json::from_str(r#"["Poor", "POOR", "poor", "Excellent", "meh", ""]"#)
                .expect("feedback deserialization never fails");
        assert_eq!(
            tiers,
            vec![
                Feedback::Poor,
                Feedback::Poor,
                Feedback::Poor,
                Feedback::Excellent,
                Feedback::Unknown,
                Feedback::Unknown,
            ]
        );
        assert_eq!(serde_json::to_string(&Feedback::Poor).unwrap(), r#""poor""#);
    }

    #[test]
    fn return_status_accepts_only_known_spellings() {
        assert_eq!(ReturnStatus::parse("Returned"), Some(ReturnStatus::Returned));
        assert_eq!(
            ReturnStatus::parse("not  returned"),
            Some(ReturnStatus::NotReturned)
        );
        assert_eq!(ReturnStatus::parse("Exchanged"), None);
    }

    #[test]
    fn eco_certification_treats_placeholders_as_uncertified() {
        assert_eq!(EcoCertification::parse(None), EcoCertification::Uncertified);
        assert_eq!(
            EcoCertification::parse(Some("None")),
            EcoCertification::Uncertified
        );
        assert_eq!(
            EcoCertification::parse(Some(" Fair Trade ")),
            EcoCertification::Certified("Fair Trade".to_string())
        );
        assert_eq!(EcoCertification::Uncertified.label(), "None");
    }
}
