use chrono::NaiveDate;

use crate::orders::domain::{
    EcoCertification, EnrichedOrder, Feedback, OrderRecord, ReturnStatus,
};
use crate::orders::enrich::{enrich, EnrichmentConfig};

pub(super) struct OrderFixture {
    pub(super) date: (i32, u32, u32),
    pub(super) revenue: f64,
    pub(super) material: &'static str,
    pub(super) category: &'static str,
    pub(super) gender: &'static str,
    pub(super) age: i32,
    pub(super) location: Option<&'static str>,
    pub(super) returned: bool,
    pub(super) reason: Option<&'static str>,
    pub(super) recycled_pct: f64,
    pub(super) certification: Option<&'static str>,
}

impl Default for OrderFixture {
    fn default() -> Self {
        Self {
            date: (2024, 1, 15),
            revenue: 100.0,
            material: "Recycled Polyester",
            category: "Jackets",
            gender: "Female",
            age: 30,
            location: Some("USA, Portland"),
            returned: false,
            reason: None,
            recycled_pct: 50.0,
            certification: None,
        }
    }
}

pub(super) fn order(fixture: OrderFixture) -> EnrichedOrder {
    let (year, month, day) = fixture.date;
    let return_status = if fixture.returned {
        ReturnStatus::Returned
    } else {
        ReturnStatus::NotReturned
    };
    let record = OrderRecord {
        order_date: NaiveDate::from_ymd_opt(year, month, day).expect("valid date"),
        unit_price: Some(fixture.revenue),
        total_revenue: fixture.revenue,
        material: fixture.material.to_string(),
        category: fixture.category.to_string(),
        gender: fixture.gender.to_string(),
        age: fixture.age,
        location: fixture.location.map(str::to_string),
        return_status,
        return_reason: fixture.reason.map(str::to_string),
        feedback: Feedback::Good,
        recycled_pct: fixture.recycled_pct,
        water_usage_liters: 10.0,
        carbon_offset_investment: 2.0,
        eco_certification: EcoCertification::parse(fixture.certification),
    };
    enrich(record, &EnrichmentConfig::default())
}

/// Six orders across two materials, three months, two countries and two genders.
pub(super) fn sample_orders() -> Vec<EnrichedOrder> {
    vec![
        order(OrderFixture {
            date: (2024, 1, 5),
            revenue: 200.0,
            returned: true,
            reason: Some("Wrong size"),
            recycled_pct: 80.0,
            certification: Some("Fair Trade"),
            ..OrderFixture::default()
        }),
        order(OrderFixture {
            date: (2024, 1, 20),
            revenue: 100.0,
            material: "Organic Cotton",
            category: "Shirts",
            gender: "Male",
            age: 22,
            location: Some("Chile, Santiago"),
            recycled_pct: 20.0,
            ..OrderFixture::default()
        }),
        order(OrderFixture {
            date: (2024, 3, 2),
            revenue: 50.0,
            material: "Organic Cotton",
            category: "Shirts",
            gender: "Male",
            age: 41,
            returned: true,
            reason: Some("Defective"),
            recycled_pct: 30.0,
            certification: Some("Fair Trade"),
            ..OrderFixture::default()
        }),
        order(OrderFixture {
            date: (2024, 3, 18),
            revenue: 150.0,
            age: 62,
            location: Some("Chile, Valparaiso"),
            recycled_pct: 70.0,
            certification: Some("Bluesign"),
            ..OrderFixture::default()
        }),
        order(OrderFixture {
            date: (2024, 4, 9),
            revenue: 50.0,
            material: "Organic Cotton",
            gender: "Female",
            age: 28,
            returned: true,
            reason: None,
            recycled_pct: 40.0,
            ..OrderFixture::default()
        }),
        order(OrderFixture {
            date: (2024, 4, 30),
            revenue: 250.0,
            age: 36,
            location: None,
            recycled_pct: 60.0,
            certification: Some("Bluesign"),
            ..OrderFixture::default()
        }),
    ]
}

pub(super) fn refs(orders: &[EnrichedOrder]) -> Vec<&EnrichedOrder> {
    orders.iter().collect()
}
