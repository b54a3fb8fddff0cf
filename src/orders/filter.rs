use super::domain::EnrichedOrder;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("date range start {lower} is after end {upper}")]
    InvertedRange { lower: NaiveDate, upper: NaiveDate },
}

/// Inclusive order-date window. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    lower: Option<NaiveDate>,
    upper: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(lower: Option<NaiveDate>, upper: Option<NaiveDate>) -> Result<Self, FilterError> {
        if let (Some(lower), Some(upper)) = (lower, upper) {
            if lower > upper {
                return Err(FilterError::InvertedRange { lower, upper });
            }
        }
        Ok(Self { lower, upper })
    }

    pub const fn unbounded() -> Self {
        Self {
            lower: None,
            upper: None,
        }
    }

    pub fn lower(&self) -> Option<NaiveDate> {
        self.lower
    }

    pub fn upper(&self) -> Option<NaiveDate> {
        self.upper
    }

    pub fn is_unbounded(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.lower, self.upper) {
            (Some(lower), Some(upper)) => lower <= date && date <= upper,
            (Some(lower), None) => date >= lower,
            (None, Some(upper)) => date <= upper,
            (None, None) => true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialSelection {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl MaterialSelection {
    /// Collapses to `All` when the selection covers every observed material.
    pub fn from_selected<I, S>(selected: I, universe: &[String]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selected: BTreeSet<String> = selected.into_iter().map(Into::into).collect();
        if !universe.is_empty() && universe.iter().all(|material| selected.contains(material)) {
            Self::All
        } else {
            Self::Only(selected)
        }
    }

    pub fn admits(&self, material: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected.contains(material),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderFilter {
    #[default]
    All,
    Only(String),
}

impl GenderFilter {
    pub const ALL_SENTINEL: &'static str = "All";

    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Self::ALL_SENTINEL) {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }

    pub fn admits(&self, gender: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == gender,
        }
    }
}

/// User-selected constraints. Replaced wholesale on every interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    date_range: DateRange,
    materials: MaterialSelection,
    gender: GenderFilter,
}

impl FilterState {
    pub fn new(date_range: DateRange, materials: MaterialSelection, gender: GenderFilter) -> Self {
        Self {
            date_range,
            materials,
            gender,
        }
    }

    pub fn unrestricted() -> Self {
        Self::default()
    }

    pub fn with_date_range(self, date_range: DateRange) -> Self {
        Self { date_range, ..self }
    }

    pub fn with_materials(self, materials: MaterialSelection) -> Self {
        Self { materials, ..self }
    }

    pub fn with_gender(self, gender: GenderFilter) -> Self {
        Self { gender, ..self }
    }

    pub fn date_range(&self) -> &DateRange {
        &self.date_range
    }

    pub fn materials(&self) -> &MaterialSelection {
        &self.materials
    }

    pub fn gender(&self) -> &GenderFilter {
        &self.gender
    }

    pub fn is_unrestricted(&self) -> bool {
        self.date_range.is_unbounded()
            && self.materials == MaterialSelection::All
            && self.gender == GenderFilter::All
    }

    pub fn admits(&self, order: &EnrichedOrder) -> bool {
        self.date_range.contains(order.record.order_date)
            && self.materials.admits(&order.record.material)
            && self.gender.admits(&order.record.gender)
    }
}

/// Keeps the orders admitted by `state`, preserving input order.
pub fn apply<'a, I>(records: I, state: &FilterState) -> Vec<&'a EnrichedOrder>
where
    I: IntoIterator<Item = &'a EnrichedOrder>,
{
    if state.is_unrestricted() {
        return records.into_iter().collect();
    }

    let kept: Vec<&EnrichedOrder> = records
        .into_iter()
        .filter(|order| state.admits(order))
        .collect();
    debug!(kept = kept.len(), "filter applied");
    kept
}
