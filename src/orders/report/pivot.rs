use super::metric::Metric;
use super::views::{PivotRow, ReturnRatePivot};
use crate::orders::domain::{AgeGroup, EnrichedOrder};
use std::collections::{BTreeMap, BTreeSet};

/// Return rate (%) by age group (rows) and category (columns).
///
/// Rows follow bracket order and columns are sorted by name; only groups and
/// categories present in `orders` appear. A cell with no orders is `NoData`,
/// never `0.0`.
pub fn return_rate_pivot(orders: &[&EnrichedOrder]) -> ReturnRatePivot {
    let mut cells: BTreeMap<(AgeGroup, &str), (usize, usize)> = BTreeMap::new();
    let mut groups: BTreeSet<AgeGroup> = BTreeSet::new();
    let mut categories: BTreeSet<&str> = BTreeSet::new();

    for order in orders {
        let category = order.record.category.as_str();
        groups.insert(order.age_group);
        categories.insert(category);
        let cell = cells.entry((order.age_group, category)).or_default();
        cell.1 += 1;
        if order.is_returned {
            cell.0 += 1;
        }
    }

    let rows = groups
        .into_iter()
        .map(|group| PivotRow {
            age_group: group,
            age_group_label: group.label(),
            cells: categories
                .iter()
                .map(|category| match cells.get(&(group, *category)) {
                    Some(&(returned, total)) => Metric::percentage(returned, total),
                    None => Metric::NoData,
                })
                .collect(),
        })
        .collect();

    ReturnRatePivot {
        categories: categories.into_iter().map(str::to_string).collect(),
        rows,
    }
}

impl ReturnRatePivot {
    pub fn cell(&self, group: AgeGroup, category: &str) -> Metric {
        let Some(column) = self.categories.iter().position(|name| name == category) else {
            return Metric::NoData;
        };
        self.rows
            .iter()
            .find(|row| row.age_group == group)
            .and_then(|row| row.cells.get(column).copied())
            .unwrap_or(Metric::NoData)
    }
}
