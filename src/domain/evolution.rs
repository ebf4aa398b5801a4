// Evolution series domain models
use serde::{Deserialize, Serialize};

/// One reporting day of a PL or captação series. `date` stays the raw
/// `YYYY-MM-DD` string from the API; it is the join key across entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionPoint {
    pub date: String,
    pub value: f64,
}

impl EvolutionPoint {
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySeries {
    pub name: String,
    pub evolution: Vec<EvolutionPoint>,
    pub initial: f64,
    #[serde(rename = "final")]
    pub final_value: f64,
    pub variation: f64,
}

impl EntitySeries {
    pub fn from_points(name: impl Into<String>, evolution: Vec<EvolutionPoint>) -> Self {
        let initial = evolution.first().map(|p| p.value).unwrap_or(0.0);
        let final_value = evolution.last().map(|p| p.value).unwrap_or(0.0);
        Self {
            name: name.into(),
            evolution,
            initial,
            final_value,
            variation: final_value - initial,
        }
    }

    pub fn first_date(&self) -> Option<&str> {
        self.evolution.first().map(|p| p.date.as_str())
    }

    pub fn last_date(&self) -> Option<&str> {
        self.evolution.last().map(|p| p.date.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.evolution.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_uses_endpoints() {
        let series = EntitySeries::from_points(
            "Ana",
            vec![
                EvolutionPoint::new("2025-12-01", 100.0),
                EvolutionPoint::new("2025-12-02", 80.0),
                EvolutionPoint::new("2025-12-03", 130.0),
            ],
        );
        assert_eq!(series.initial, 100.0);
        assert_eq!(series.final_value, 130.0);
        assert_eq!(series.variation, 30.0);
        assert_eq!(series.first_date(), Some("2025-12-01"));
        assert_eq!(series.last_date(), Some("2025-12-03"));
    }

    #[test]
    fn test_empty_series_is_zeroed() {
        let series = EntitySeries::from_points("Ana", Vec::new());
        assert!(series.is_empty());
        assert_eq!(series.variation, 0.0);
        assert_eq!(series.first_date(), None);
    }
}
