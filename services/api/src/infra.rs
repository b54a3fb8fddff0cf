use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use order_insights::orders::{DatasetCache, Feedback};
use order_insights::simulator::RiskConfig;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) dataset: Arc<DatasetCache>,
    pub(crate) risk: Arc<RiskConfig>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_feedback(raw: &str) -> Result<Feedback, String> {
    match Feedback::parse(raw) {
        Feedback::Unknown => Err(format!(
            "unknown feedback '{raw}', expected one of: {}",
            Feedback::ordered()
                .iter()
                .map(|tier| tier.label())
                .collect::<Vec<_>>()
                .join(", ")
        )),
        feedback => Ok(feedback),
    }
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.filter(|value| !value.trim().is_empty())
        .map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_parser_rejects_unknown_tiers() {
        assert_eq!(parse_feedback("excellent"), Ok(Feedback::Excellent));
        let error = parse_feedback("meh").expect_err("unknown tier");
        assert!(error.contains("Poor"));
    }

    #[test]
    fn date_parser_reports_offending_value() {
        assert_eq!(
            parse_date(" 2024-02-29 "),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );
        assert!(parse_date("29/02/2024").unwrap_err().contains("29/02/2024"));
    }
}
