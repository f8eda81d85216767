//! Product filter selection.
//!
//! A product is visible when it matches every filter dimension that has at
//! least one value checked; within a dimension any checked value matches.

use std::collections::BTreeSet;
use std::str::FromStr;

/// A filterable product attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    Category,
    Collection,
}

impl FilterDimension {
    /// The input `name` this dimension is submitted under.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Collection => "collection",
        }
    }
}

impl FromStr for FilterDimension {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "category" => Ok(Self::Category),
            "collection" => Ok(Self::Collection),
            _ => Err(()),
        }
    }
}

/// Anything that carries the attributes the filter matches on.
pub trait Filterable {
    fn category(&self) -> &str;
    fn collection(&self) -> &str;
}

/// The currently checked filter values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    category: BTreeSet<String>,
    collection: BTreeSet<String>,
}

impl FilterSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from submitted `(name, value)` pairs.
    ///
    /// Pairs for unknown names and empty values are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut selection = Self::new();
        for (name, value) in pairs {
            if let Ok(dimension) = name.as_ref().parse::<FilterDimension>() {
                selection.select(dimension, value);
            }
        }
        selection
    }

    /// Check `value` in `dimension`.
    pub fn select(&mut self, dimension: FilterDimension, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            return;
        }
        self.values_mut(dimension).insert(value);
    }

    #[must_use]
    pub fn is_selected(&self, dimension: FilterDimension, value: &str) -> bool {
        self.values(dimension).contains(value)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.category.is_empty() && self.collection.is_empty()
    }

    /// Whether a product with these attributes stays visible.
    #[must_use]
    pub fn is_visible(&self, category: &str, collection: &str) -> bool {
        Self::dimension_matches(&self.category, category)
            && Self::dimension_matches(&self.collection, collection)
    }

    #[must_use]
    pub fn matches<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        self.is_visible(item.category(), item.collection())
    }

    fn dimension_matches(checked: &BTreeSet<String>, value: &str) -> bool {
        checked.is_empty() || checked.contains(value)
    }

    const fn values(&self, dimension: FilterDimension) -> &BTreeSet<String> {
        match dimension {
            FilterDimension::Category => &self.category,
            FilterDimension::Collection => &self.collection,
        }
    }

    const fn values_mut(&mut self, dimension: FilterDimension) -> &mut BTreeSet<String> {
        match dimension {
            FilterDimension::Category => &mut self.category,
            FilterDimension::Collection => &mut self.collection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Card(&'static str, &'static str);

    impl Filterable for Card {
        fn category(&self) -> &str {
            self.0
        }

        fn collection(&self) -> &str {
            self.1
        }
    }

    const CARDS: [Card; 4] = [
        Card("tees", "summer"),
        Card("tees", "winter"),
        Card("hoodies", "winter"),
        Card("caps", "summer"),
    ];

    fn visible(selection: &FilterSelection) -> Vec<bool> {
        CARDS.iter().map(|card| selection.matches(card)).collect()
    }

    #[test]
    fn test_empty_selection_shows_everything() {
        let selection = FilterSelection::new();
        assert!(selection.is_empty());
        assert_eq!(visible(&selection), vec![true; 4]);
    }

    #[test]
    fn test_or_within_dimension() {
        let selection =
            FilterSelection::from_pairs([("category", "tees"), ("category", "caps")]);
        assert_eq!(visible(&selection), vec![true, true, false, true]);
    }

    #[test]
    fn test_and_across_dimensions() {
        let selection =
            FilterSelection::from_pairs([("category", "tees"), ("collection", "winter")]);
        assert_eq!(visible(&selection), vec![false, true, false, false]);
    }

    #[test]
    fn test_every_combination_follows_rule() {
        let categories = ["tees", "hoodies", "caps"];
        let collections = ["summer", "winter"];

        for cat_mask in 0u8..8 {
            for col_mask in 0u8..4 {
                let mut selection = FilterSelection::new();
                let checked_cats: Vec<&str> = categories
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| cat_mask & (1 << i) != 0)
                    .map(|(_, c)| *c)
                    .collect();
                let checked_cols: Vec<&str> = collections
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| col_mask & (1 << i) != 0)
                    .map(|(_, c)| *c)
                    .collect();
                for c in &checked_cats {
                    selection.select(FilterDimension::Category, *c);
                }
                for c in &checked_cols {
                    selection.select(FilterDimension::Collection, *c);
                }

                for card in &CARDS {
                    let expected = (checked_cats.is_empty() || checked_cats.contains(&card.0))
                        && (checked_cols.is_empty() || checked_cols.contains(&card.1));
                    assert_eq!(
                        selection.matches(card),
                        expected,
                        "cats={checked_cats:?} cols={checked_cols:?} card=({}, {})",
                        card.0,
                        card.1
                    );
                }
            }
        }
    }

    #[test]
    fn test_unknown_names_and_blank_values_ignored() {
        let selection =
            FilterSelection::from_pairs([("sort", "price"), ("category", ""), ("colour", "red")]);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_is_selected() {
        let selection = FilterSelection::from_pairs([("collection", "summer")]);
        assert!(selection.is_selected(FilterDimension::Collection, "summer"));
        assert!(!selection.is_selected(FilterDimension::Category, "summer"));
    }
}
