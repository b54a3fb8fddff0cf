use super::normalizer::{normalize_optional, normalize_text};
use super::DatasetError;
use crate::orders::domain::{EcoCertification, Feedback, OrderRecord, ReturnStatus};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) const ORDER_DATE: &str = "Order_Date";
pub(crate) const UNIT_PRICE: &str = "Unit_Price ($)";
pub(crate) const TOTAL_REVENUE: &str = "Total_Revenue ($)";
pub(crate) const MATERIAL: &str = "Material";
pub(crate) const CATEGORY: &str = "Category_Name";
pub(crate) const GENDER: &str = "Gender";
pub(crate) const AGE: &str = "Age";
pub(crate) const RETURN_STATUS: &str = "Return_Status";
pub(crate) const RECYCLED_PCT: &str = "Percentage_Recycled_Material (%)";
pub(crate) const WATER_USAGE: &str = "Water_Usage (liters)";
pub(crate) const CARBON_OFFSET: &str = "Carbon_Offset_Investment ($)";

pub const REQUIRED_COLUMNS: [&str; 10] = [
    ORDER_DATE,
    TOTAL_REVENUE,
    MATERIAL,
    CATEGORY,
    GENDER,
    AGE,
    RETURN_STATUS,
    RECYCLED_PCT,
    WATER_USAGE,
    CARBON_OFFSET,
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParseSummary {
    pub(crate) rows: usize,
    pub(crate) returned: usize,
    pub(crate) dropped_reasons: usize,
}

pub(crate) fn parse_records<R: Read>(
    reader: R,
) -> Result<(Vec<OrderRecord>, ParseSummary), DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: StringRecord = csv_reader
        .headers()?
        .iter()
        .map(normalize_text)
        .collect();
    check_required_columns(&headers)?;

    let mut records = Vec::new();
    let mut summary = ParseSummary::default();

    for result in csv_reader.records() {
        let raw = result?;
        let line = raw.position().map(|pos| pos.line()).unwrap_or_default();
        let row: OrderRow = raw.deserialize(Some(&headers))?;
        let record = row.into_record(line, &mut summary)?;
        if record.return_status == ReturnStatus::Returned {
            summary.returned += 1;
        }
        records.push(record);
    }

    summary.rows = records.len();
    Ok((records, summary))
}

fn check_required_columns(headers: &StringRecord) -> Result<(), DatasetError> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(DatasetError::MissingColumn(column));
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct OrderRow {
    #[serde(rename = "Order_Date")]
    order_date: String,
    #[serde(rename = "Unit_Price ($)", default)]
    unit_price: Option<f64>,
    #[serde(rename = "Total_Revenue ($)")]
    total_revenue: f64,
    #[serde(rename = "Material")]
    material: String,
    #[serde(rename = "Category_Name")]
    category: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Age")]
    age: String,
    #[serde(
        rename = "Customer_Location",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    location: Option<String>,
    #[serde(rename = "Return_Status")]
    return_status: String,
    #[serde(
        rename = "Return_Reason",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    return_reason: Option<String>,
    #[serde(
        rename = "Customer_Feedback",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    feedback: Option<String>,
    #[serde(rename = "Percentage_Recycled_Material (%)")]
    recycled_pct: f64,
    #[serde(rename = "Water_Usage (liters)")]
    water_usage: f64,
    #[serde(rename = "Carbon_Offset_Investment ($)")]
    carbon_offset: f64,
    #[serde(
        rename = "Eco_Certification",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    eco_certification: Option<String>,
}

impl OrderRow {
    fn into_record(
        self,
        line: u64,
        summary: &mut ParseSummary,
    ) -> Result<OrderRecord, DatasetError> {
        let order_date = parse_order_date(&self.order_date).ok_or_else(|| {
            DatasetError::invalid(line, ORDER_DATE, &self.order_date, "expected a calendar date")
        })?;

        let return_status = ReturnStatus::parse(&self.return_status).ok_or_else(|| {
            DatasetError::invalid(
                line,
                RETURN_STATUS,
                &self.return_status,
                "expected 'Returned' or 'Not Returned'",
            )
        })?;

        let age = parse_age(&self.age)
            .ok_or_else(|| DatasetError::invalid(line, AGE, &self.age, "expected a whole number"))?;

        let unit_price = self
            .unit_price
            .map(|price| non_negative(line, UNIT_PRICE, price))
            .transpose()?;
        let total_revenue = non_negative(line, TOTAL_REVENUE, self.total_revenue)?;
        let water_usage_liters = non_negative(line, WATER_USAGE, self.water_usage)?;
        let carbon_offset_investment = non_negative(line, CARBON_OFFSET, self.carbon_offset)?;
        let recycled_pct = percentage(line, RECYCLED_PCT, self.recycled_pct)?;

        let material = required_text(line, MATERIAL, &self.material)?;
        let category = required_text(line, CATEGORY, &self.category)?;
        let gender = required_text(line, GENDER, &self.gender)?;

        let return_reason = match (return_status, normalize_optional(self.return_reason)) {
            (ReturnStatus::Returned, reason) => reason,
            (ReturnStatus::NotReturned, Some(_)) => {
                summary.dropped_reasons += 1;
                None
            }
            (ReturnStatus::NotReturned, None) => None,
        };

        let feedback = self
            .feedback
            .as_deref()
            .map(Feedback::parse)
            .unwrap_or(Feedback::Unknown);
        let eco_certification =
            EcoCertification::parse(normalize_optional(self.eco_certification).as_deref());

        Ok(OrderRecord {
            order_date,
            unit_price,
            total_revenue,
            material,
            category,
            gender,
            age,
            location: normalize_optional(self.location),
            return_status,
            return_reason,
            feedback,
            recycled_pct,
            water_usage_liters,
            carbon_offset_investment,
            eco_certification,
        })
    }
}

fn non_negative(line: u64, column: &'static str, value: f64) -> Result<f64, DatasetError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DatasetError::invalid(
            line,
            column,
            &value.to_string(),
            "expected a finite, non-negative amount",
        ))
    }
}

fn percentage(line: u64, column: &'static str, value: f64) -> Result<f64, DatasetError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(DatasetError::invalid(
            line,
            column,
            &value.to_string(),
            "expected a percentage between 0 and 100",
        ))
    }
}

fn required_text(line: u64, column: &'static str, value: &str) -> Result<String, DatasetError> {
    let cleaned = normalize_text(value);
    if cleaned.is_empty() {
        return Err(DatasetError::invalid(line, column, value, "must not be blank"));
    }
    Ok(cleaned)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_age(value: &str) -> Option<i32> {
    let trimmed = value.trim();
    if let Ok(age) = trimmed.parse::<i32>() {
        return Some(age);
    }

    // Spreadsheet exports sometimes write integral ages as "34.0".
    let parsed = trimmed.parse::<f64>().ok()?;
    if parsed.is_finite() && parsed.fract() == 0.0 && parsed.abs() <= i32::MAX as f64 {
        Some(parsed as i32)
    } else {
        None
    }
}

fn parse_order_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    ["%m/%d/%Y", "%d-%m-%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

#[cfg(test)]
pub(crate) fn parse_order_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_order_date(value)
}

#[cfg(test)]
pub(crate) fn parse_age_for_tests(value: &str) -> Option<i32> {
    parse_age(value)
}
