//! Shopping list aggregation over a user's cart.
//!
//! Every recipe in the cart contributes its ingredient lines; lines with the
//! same `(ingredient_name, measurement_unit)` pair are summed into a single
//! [`AggregatedLine`]. The same ingredient measured in different units stays
//! on separate lines.
//!
//! Output is ordered by ingredient name (byte order), then by unit, so the
//! same cart always produces the same list.

use serde::Serialize;
use std::collections::BTreeMap;

/// One ingredient line of a recipe in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub ingredient_name: String,
    pub measurement_unit: String,
    pub amount: u32,
}

impl CartLine {
    pub fn new(
        ingredient_name: impl Into<String>,
        measurement_unit: impl Into<String>,
        amount: u32,
    ) -> Self {
        Self {
            ingredient_name: ingredient_name.into(),
            measurement_unit: measurement_unit.into(),
            amount,
        }
    }
}

/// Total required amount of one ingredient across the whole cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedLine {
    pub ingredient_name: String,
    pub measurement_unit: String,
    pub amount: u64,
}

/// Sums cart lines by `(ingredient_name, measurement_unit)`.
///
/// Takes one iterable of lines per recipe. Inputs are trusted: amounts and
/// names were validated when the recipes were stored.
pub fn aggregate<'a, R, L>(recipes: R) -> Vec<AggregatedLine>
where
    R: IntoIterator<Item = L>,
    L: IntoIterator<Item = &'a CartLine>,
{
    let mut totals: BTreeMap<(&'a str, &'a str), u64> = BTreeMap::new();

    for line in recipes.into_iter().flatten() {
        *totals
            .entry((line.ingredient_name.as_str(), line.measurement_unit.as_str()))
            .or_insert(0) += u64::from(line.amount);
    }

    totals
        .into_iter()
        .map(|((name, unit), amount)| AggregatedLine {
            ingredient_name: name.to_string(),
            measurement_unit: unit.to_string(),
            amount,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(name: &str, unit: &str, amount: u32) -> CartLine {
        CartLine::new(name, unit, amount)
    }

    fn aggregated(name: &str, unit: &str, amount: u64) -> AggregatedLine {
        AggregatedLine {
            ingredient_name: name.to_string(),
            measurement_unit: unit.to_string(),
            amount,
        }
    }

    #[test]
    fn test_sums_across_recipes() {
        let first = vec![line("Salt", "g", 10)];
        let second = vec![line("Salt", "g", 5), line("Sugar", "g", 3)];

        let result = aggregate([&first, &second]);

        assert_eq!(
            result,
            vec![aggregated("Salt", "g", 15), aggregated("Sugar", "g", 3)]
        );
    }

    #[test]
    fn test_empty_cart_yields_empty_list() {
        let recipes: Vec<Vec<CartLine>> = Vec::new();
        assert!(aggregate(&recipes).is_empty());
    }

    #[test]
    fn test_recipe_without_lines_contributes_nothing() {
        let empty: Vec<CartLine> = Vec::new();
        let other = vec![line("Egg", "pcs", 2)];

        assert_eq!(aggregate([&empty, &other]), vec![aggregated("Egg", "pcs", 2)]);
    }

    #[test]
    fn test_different_units_stay_separate() {
        let first = vec![line("Milk", "ml", 200)];
        let second = vec![line("Milk", "l", 1)];

        let result = aggregate([&first, &second]);

        assert_eq!(result.len(), 2);
        assert!(result.contains(&aggregated("Milk", "ml", 200)));
        assert!(result.contains(&aggregated("Milk", "l", 1)));
    }

    #[test]
    fn test_ordered_by_name_case_sensitive() {
        let recipe = vec![
            line("sugar", "g", 1),
            line("Butter", "g", 1),
            line("apple", "pcs", 1),
            line("Zest", "g", 1),
        ];

        let names: Vec<String> = aggregate([&recipe])
            .into_iter()
            .map(|l| l.ingredient_name)
            .collect();

        assert_eq!(names, vec!["Butter", "Zest", "apple", "sugar"]);
    }

    #[test]
    fn test_order_independent_of_input_order() {
        let a = vec![line("Salt", "g", 1), line("Flour", "g", 500)];
        let b = vec![line("Flour", "g", 100), line("Salt", "g", 2)];

        assert_eq!(aggregate([&a, &b]), aggregate([&b, &a]));
    }

    #[test]
    fn test_sum_does_not_overflow_u32() {
        let recipes: Vec<Vec<CartLine>> = (0..3)
            .map(|_| vec![line("Water", "ml", u32::MAX)])
            .collect();

        let result = aggregate(&recipes);

        assert_eq!(result[0].amount, 3 * u64::from(u32::MAX));
    }
}
