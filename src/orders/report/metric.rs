use serde::{Serialize, Serializer};

/// A mean or rate that may be undefined. `NoData` means no underlying records,
/// which is distinct from a measured zero. Serializes as a number or `null`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Value(f64),
    NoData,
}

impl Metric {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(value),
            Self::NoData => None,
        }
    }

    /// Share of `hits` in `total` as a percentage rounded to 2 decimals.
    pub fn percentage(hits: usize, total: usize) -> Self {
        if total == 0 {
            return Self::NoData;
        }
        Self::Value(round2(hits as f64 / total as f64 * 100.0))
    }

    /// Mean of `count` values summing to `sum`, rounded to 2 decimals.
    pub fn average(sum: f64, count: usize) -> Self {
        if count == 0 {
            return Self::NoData;
        }
        Self::Value(round2(sum / count as f64))
    }
}

impl Serialize for Metric {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Value(value) => serializer.serialize_f64(*value),
            Self::NoData => serializer.serialize_none(),
        }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
