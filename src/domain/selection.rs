// Entity selection state for banker filters
use super::evolution::EvolutionPoint;
use serde::Serialize;
use std::collections::BTreeSet;

/// Checkbox filter over a list of entities; everything starts selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MultiSelection {
    available: Vec<String>,
    selected: BTreeSet<String>,
}

impl MultiSelection {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut available: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !available.contains(&name) {
                available.push(name);
            }
        }
        let selected = available.iter().cloned().collect();
        Self {
            available,
            selected,
        }
    }

    /// Called whenever a fetch brings a new entity list.
    pub fn reset<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self = Self::new(names);
    }

    pub fn toggle(&mut self, name: &str) {
        if !self.available.iter().any(|n| n == name) {
            return;
        }
        if !self.selected.remove(name) {
            self.selected.insert(name.to_string());
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.available.iter().cloned().collect();
    }

    pub fn clear_all(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    /// Selected names in the order they are offered.
    pub fn selected_in_order(&self) -> Vec<String> {
        self.available
            .iter()
            .filter(|n| self.selected.contains(n.as_str()))
            .cloned()
            .collect()
    }
}

/// Dropdown filter holding at most one entity; empty means "all".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SingleSelection {
    available: Vec<String>,
    selected: Option<String>,
}

impl SingleSelection {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut available: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !available.contains(&name) {
                available.push(name);
            }
        }
        Self {
            available,
            selected: None,
        }
    }

    /// Replaces the current choice, or clears it when `name` is already
    /// chosen. Unknown names are ignored.
    pub fn toggle(&mut self, name: &str) {
        if !self.available.iter().any(|n| n == name) {
            return;
        }
        if self.selected.as_deref() == Some(name) {
            self.selected = None;
        } else {
            self.selected = Some(name.to_string());
        }
    }

    pub fn select(&mut self, name: &str) {
        if self.available.iter().any(|n| n == name) {
            self.selected = Some(name.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn matches(&self, name: &str) -> bool {
        self.selected.as_deref().is_none_or(|s| s == name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Dropdown {
    #[default]
    Closed,
    Open,
}

impl Dropdown {
    pub fn toggle(&mut self) {
        *self = match self {
            Dropdown::Closed => Dropdown::Open,
            Dropdown::Open => Dropdown::Closed,
        };
    }

    /// Explicit close or a click outside the menu.
    pub fn close(&mut self) {
        *self = Dropdown::Closed;
    }

    pub fn is_open(&self) -> bool {
        *self == Dropdown::Open
    }

    /// Applies a dropdown choice; `None` is the "all" entry. Any commit
    /// closes the menu.
    pub fn commit_single(&mut self, selection: &mut SingleSelection, choice: Option<&str>) {
        match choice {
            Some(name) => selection.select(name),
            None => selection.clear(),
        }
        self.close();
    }
}

/// True when the series did not start on the cohort reference date.
///
/// This is a raw string comparison; `reference_date` must use the API's
/// `YYYY-MM-DD` form or every entity reads as new. An empty series counts
/// as new.
pub fn is_new_entity(points: &[EvolutionPoint], reference_date: &str) -> bool {
    points.first().map(|p| p.date.as_str()) != Some(reference_date)
}
