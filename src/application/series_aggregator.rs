// Merges per-entity evolution series into one row per date
use crate::domain::evolution::EvolutionPoint;
use crate::domain::selection::MultiSelection;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// One date of a multi-entity chart. Serializes flat, as
/// `{"date": "2025-12-01", "Ana": 10.0, "Bruno": 12.5}`; an entity with no
/// point on that date has no key at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedRow {
    pub date: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl AggregatedRow {
    pub fn get(&self, entity: &str) -> Option<f64> {
        self.values.get(entity).copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregatedTable {
    pub columns: Vec<String>,
    pub rows: Vec<AggregatedRow>,
}

impl AggregatedTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keeps only the selected columns; rows stay even if they end up empty
    /// so the date axis does not shift while toggling.
    pub fn project(&self, selection: &MultiSelection) -> AggregatedTable {
        let columns: Vec<String> = self
            .columns
            .iter()
            .filter(|c| selection.is_selected(c))
            .cloned()
            .collect();

        let rows = self
            .rows
            .iter()
            .map(|row| AggregatedRow {
                date: row.date.clone(),
                values: row
                    .values
                    .iter()
                    .filter(|(name, _)| selection.is_selected(name))
                    .map(|(name, value)| (name.clone(), *value))
                    .collect(),
            })
            .collect();

        AggregatedTable { columns, rows }
    }
}

/// Builds the shared date axis of several series.
///
/// Dates are the ascending union over all entities and values are matched by
/// date, never by position, so series of different lengths line up. Column
/// order follows `entity_order` when given (unknown names skipped, unlisted
/// entities appended), otherwise input order. No input, or an empty first
/// series, gives an empty table.
pub fn aggregate(
    series: &[(&str, &[EvolutionPoint])],
    entity_order: Option<&[String]>,
) -> AggregatedTable {
    match series.first() {
        Some((_, points)) if !points.is_empty() => {}
        _ => return AggregatedTable::default(),
    }

    let mut lookups: HashMap<&str, HashMap<&str, f64>> = HashMap::new();
    let mut input_order: Vec<&str> = Vec::new();
    let mut dates: BTreeSet<&str> = BTreeSet::new();

    for &(name, points) in series {
        if lookups.contains_key(name) {
            tracing::warn!("Duplicate series for {}, keeping the first", name);
            continue;
        }
        let mut by_date = HashMap::with_capacity(points.len());
        for point in points {
            by_date.entry(point.date.as_str()).or_insert(point.value);
            dates.insert(point.date.as_str());
        }
        lookups.insert(name, by_date);
        input_order.push(name);
    }

    let columns = column_order(&input_order, entity_order);

    let rows = dates
        .into_iter()
        .map(|date| {
            let values = columns
                .iter()
                .filter_map(|name| {
                    lookups
                        .get(name.as_str())
                        .and_then(|by_date| by_date.get(date))
                        .map(|value| (name.clone(), *value))
                })
                .collect();
            AggregatedRow {
                date: date.to_string(),
                values,
            }
        })
        .collect();

    AggregatedTable { columns, rows }
}

fn column_order(input_order: &[&str], hint: Option<&[String]>) -> Vec<String> {
    let mut columns: Vec<String> = Vec::with_capacity(input_order.len());
    if let Some(hint) = hint {
        for name in hint {
            if input_order.contains(&name.as_str()) && !columns.contains(name) {
                columns.push(name.clone());
            }
        }
    }
    for name in input_order {
        if !columns.iter().any(|c| c == name) {
            columns.push(name.to_string());
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(entries: &[(&str, f64)]) -> Vec<EvolutionPoint> {
        entries
            .iter()
            .map(|(d, v)| EvolutionPoint::new(*d, *v))
            .collect()
    }

    #[test]
    fn test_missing_dates_leave_column_absent() {
        let a = pts(&[("2025-12-01", 1.0), ("2025-12-02", 2.0), ("2025-12-03", 3.0)]);
        let b = pts(&[("2025-12-01", 10.0), ("2025-12-03", 30.0)]);
        let table = aggregate(&[("A", a.as_slice()), ("B", b.as_slice())], None);

        assert_eq!(table.columns, vec!["A", "B"]);
        assert_eq!(table.rows.len(), 3);
        let second = &table.rows[1];
        assert_eq!(second.date, "2025-12-02");
        assert_eq!(second.get("A"), Some(2.0));
        assert_eq!(second.get("B"), None);
        assert_eq!(table.rows[2].get("B"), Some(30.0));
    }

    #[test]
    fn test_rows_unique_and_ascending() {
        let a = pts(&[("2025-12-03", 3.0), ("2025-12-01", 1.0), ("2025-12-03", 99.0)]);
        let b = pts(&[("2025-11-30", 5.0), ("2025-12-02", 6.0)]);
        let c = pts(&[("2025-12-02", 7.0), ("2026-01-05", 8.0), ("2025-12-01", 9.0)]);
        let table = aggregate(&[("A", a.as_slice()), ("B", b.as_slice()), ("C", c.as_slice())], None);

        let dates: Vec<&str> = table.rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2025-11-30", "2025-12-01", "2025-12-02", "2025-12-03", "2026-01-05"]
        );
        for pair in table.rows.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
        // first point for a repeated date wins
        assert_eq!(table.rows[3].get("A"), Some(3.0));
    }

    #[test]
    fn test_shorter_series_do_not_shift() {
        // index pairing would put B's 2025-12-03 value on 2025-12-02
        let a = pts(&[("2025-12-01", 1.0), ("2025-12-02", 2.0), ("2025-12-03", 3.0)]);
        let b = pts(&[("2025-12-03", 30.0)]);
        let table = aggregate(&[("A", a.as_slice()), ("B", b.as_slice())], None);
        assert_eq!(table.rows[0].get("B"), None);
        assert_eq!(table.rows[2].get("B"), Some(30.0));
    }

    #[test]
    fn test_empty_inputs_give_empty_table() {
        assert!(aggregate(&[], None).is_empty());

        let b = pts(&[("2025-12-01", 1.0)]);
        let empty: Vec<EvolutionPoint> = Vec::new();
        let table = aggregate(&[("A", empty.as_slice()), ("B", b.as_slice())], None);
        assert!(table.is_empty());
        assert!(table.columns.is_empty());
    }

    #[test]
    fn test_entity_order_hint() {
        let a = pts(&[("2025-12-01", 1.0)]);
        let b = pts(&[("2025-12-01", 2.0)]);
        let c = pts(&[("2025-12-01", 3.0)]);
        let hint = vec!["C".to_string(), "Ghost".to_string(), "A".to_string()];
        let table = aggregate(&[("A", a.as_slice()), ("B", b.as_slice()), ("C", c.as_slice())], Some(hint.as_slice()));
        assert_eq!(table.columns, vec!["C", "A", "B"]);

        let no_hint: Vec<String> = Vec::new();
        let table = aggregate(&[("A", a.as_slice()), ("B", b.as_slice())], Some(no_hint.as_slice()));
        assert_eq!(table.columns, vec!["A", "B"]);
    }

    #[test]
    fn test_row_serializes_flat() {
        let a = pts(&[("2025-12-01", 1.5)]);
        let b = pts(&[("2025-12-02", 2.0)]);
        let table = aggregate(&[("Ana", a.as_slice()), ("Bruno", b.as_slice())], None);
        let json = serde_json::to_value(&table.rows[0]).unwrap();
        assert_eq!(json, serde_json::json!({"date": "2025-12-01", "Ana": 1.5}));
    }

    #[test]
    fn test_project_selected_columns() {
        let a = pts(&[("2025-12-01", 1.0)]);
        let b = pts(&[("2025-12-01", 2.0)]);
        let table = aggregate(&[("A", a.as_slice()), ("B", b.as_slice())], None);

        let mut selection = MultiSelection::new(table.columns.clone());
        selection.toggle("A");
        let projected = table.project(&selection);
        assert_eq!(projected.columns, vec!["B"]);
        assert_eq!(projected.rows[0].get("A"), None);
        assert_eq!(projected.rows[0].get("B"), Some(2.0));

        selection.clear_all();
        let projected = table.project(&selection);
        assert_eq!(projected.rows.len(), 1);
        assert!(projected.rows[0].values.is_empty());
    }
}
