//! Shopping list aggregation.
//!
//! Pure transformations from recipe ingredients to shopping items. The two
//! entry points intentionally disagree on item identity, matching the app's
//! long-standing behavior:
//!
//! - [`add_recipe_to_list`] merges into the existing list, keyed by
//!   `(name, category)` with the unit folded into the display name.
//! - [`add_week_plan_to_list`] rebuilds the list from scratch, keyed by
//!   ingredient name alone.
//!
//! Callers own all I/O: load the current list, call in, persist the result
//! as a single whole-collection write.

use std::collections::HashMap;

use crate::items::repo::Item;
use crate::mealplans::repo::MealPlan;
use crate::recipes::repo::{IngredientCategory, Recipe};

/// Fractional quantities always round up: 1.2 cups still means buying two
/// whole units when shopping in discrete items.
fn ceil_quantity(quantity: f64) -> i64 {
    quantity.ceil() as i64
}

/// Merge one recipe's ingredients into an existing shopping list.
///
/// Each ingredient becomes a candidate item named `"<name> (<unit>)"` with
/// its quantity ceiling-rounded. Candidates are appended after the existing
/// items and grouped by `(name, category)` in first-seen order; quantities
/// within a group are summed and the first item keeps its remaining fields,
/// so a previously bought item that gets topped up stays bought.
pub fn add_recipe_to_list(recipe: &Recipe, existing: Vec<Item>) -> Vec<Item> {
    let candidates = recipe.ingredients.iter().map(|ingredient| {
        Item::new(
            format!("{} ({})", ingredient.name, ingredient.unit),
            ceil_quantity(ingredient.quantity),
            ingredient.category,
        )
    });

    let mut merged: Vec<Item> = Vec::new();
    let mut positions: HashMap<(String, IngredientCategory), usize> = HashMap::new();
    for item in existing.into_iter().chain(candidates) {
        let key = (item.name.clone(), item.category);
        match positions.get(&key) {
            Some(&at) => merged[at].quantity += item.quantity,
            None => {
                positions.insert(key, merged.len());
                merged.push(item);
            }
        }
    }
    merged
}

/// Build the shopping list for a whole week's meal plan.
///
/// Recipes are flattened in ascending day order, breakfast → lunch → dinner
/// within a day. Ingredients are ceiling-rounded and grouped by name alone
/// (units and categories do not split groups here; the first occurrence's
/// category wins). The result replaces the previous list wholesale: manual
/// entries and bought flags are discarded. A missing plan leaves the
/// existing list untouched.
pub fn add_week_plan_to_list(plan: Option<&MealPlan>, existing: Vec<Item>) -> Vec<Item> {
    let Some(plan) = plan else {
        return existing;
    };

    let mut items: Vec<Item> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for day in plan.daily_plans.values() {
        let meals = [
            day.breakfast.as_ref(),
            day.lunch.as_ref(),
            day.dinner.as_ref(),
        ];
        for recipe in meals.into_iter().flatten() {
            for ingredient in &recipe.ingredients {
                let quantity = ceil_quantity(ingredient.quantity);
                match positions.get(&ingredient.name) {
                    Some(&at) => items[at].quantity += quantity,
                    None => {
                        positions.insert(ingredient.name.clone(), items.len());
                        items.push(Item::new(
                            ingredient.name.clone(),
                            quantity,
                            ingredient.category,
                        ));
                    }
                }
            }
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mealplans::repo::DayPlan;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    fn ingredient(name: &str, quantity: f64, unit: &str, category: IngredientCategory) -> crate::recipes::repo::Ingredient {
        crate::recipes::repo::Ingredient {
            name: name.into(),
            quantity,
            unit: unit.into(),
            category,
        }
    }

    fn recipe(name: &str, ingredients: Vec<crate::recipes::repo::Ingredient>) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            name: name.into(),
            ingredients,
            instructions: vec![],
            preparation_time: 10,
            image_uri: None,
        }
    }

    fn week_plan(days: Vec<(u8, DayPlan)>) -> MealPlan {
        MealPlan {
            id: Uuid::new_v4(),
            week_start_date: 1_735_430_400_000,
            daily_plans: BTreeMap::from_iter(days),
        }
    }

    #[test]
    fn quantities_round_up_to_whole_units() {
        assert_eq!(ceil_quantity(1.0), 1);
        assert_eq!(ceil_quantity(1.1), 2);
        assert_eq!(ceil_quantity(0.0), 0);
    }

    #[test]
    fn recipe_ingredients_become_items_with_unit_in_name() {
        let r = recipe(
            "Pasta",
            vec![ingredient("Tomato", 2.5, "kg", IngredientCategory::Vegetables)],
        );
        let items = add_recipe_to_list(&r, vec![]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Tomato (kg)");
        assert_eq!(items[0].quantity, 3);
        assert_eq!(items[0].category, IngredientCategory::Vegetables);
        assert!(!items[0].is_bought);
    }

    #[test]
    fn duplicate_ingredients_in_one_recipe_sum_quantities() {
        let r = recipe(
            "Double Garlic",
            vec![
                ingredient("Garlic", 1.0, "cloves", IngredientCategory::SpicesAndSeasonings),
                ingredient("Garlic", 2.0, "cloves", IngredientCategory::SpicesAndSeasonings),
            ],
        );
        let items = add_recipe_to_list(&r, vec![]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);
    }

    #[test]
    fn merging_into_bought_item_keeps_bought_flag_and_sums() {
        let existing = vec![Item {
            is_bought: true,
            ..Item::new("Milk (l)".into(), 2, IngredientCategory::Dairy)
        }];
        let existing_id = existing[0].id;

        let r = recipe(
            "Porridge",
            vec![ingredient("Milk", 1.0, "l", IngredientCategory::Dairy)],
        );
        let items = add_recipe_to_list(&r, existing);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);
        assert!(items[0].is_bought);
        assert_eq!(items[0].id, existing_id);
    }

    #[test]
    fn same_name_different_category_stays_separate_in_recipe_path() {
        let existing = vec![Item::new("Oil (tbsp)".into(), 1, IngredientCategory::Other)];
        let r = recipe(
            "Fry",
            vec![ingredient("Oil", 1.0, "tbsp", IngredientCategory::OilsAndVinegars)],
        );
        let items = add_recipe_to_list(&r, existing);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn existing_items_keep_their_positions_after_merge() {
        let existing = vec![
            Item::new("Bread (loaf)".into(), 1, IngredientCategory::GrainsAndPasta),
            Item::new("Milk (l)".into(), 1, IngredientCategory::Dairy),
        ];
        let r = recipe(
            "Porridge",
            vec![
                ingredient("Milk", 1.0, "l", IngredientCategory::Dairy),
                ingredient("Oats", 1.0, "cup", IngredientCategory::GrainsAndPasta),
            ],
        );
        let items = add_recipe_to_list(&r, existing);
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Bread (loaf)", "Milk (l)", "Oats (cup)"]);
    }

    #[test]
    fn empty_recipe_leaves_list_unchanged() {
        let existing = vec![Item::new("Salt (tsp)".into(), 1, IngredientCategory::SpicesAndSeasonings)];
        let items = add_recipe_to_list(&recipe("Nothing", vec![]), existing.clone());
        assert_eq!(items, existing);
    }

    #[test]
    fn missing_week_plan_is_a_no_op() {
        let existing = vec![Item::new("Milk (l)".into(), 2, IngredientCategory::Dairy)];
        let items = add_week_plan_to_list(None, existing.clone());
        assert_eq!(items, existing);
    }

    #[test]
    fn week_plan_sums_same_ingredient_across_days() {
        let breakfast = recipe(
            "Scramble",
            vec![ingredient("Eggs", 2.0, "pieces", IngredientCategory::Dairy)],
        );
        let dinner = recipe(
            "Frittata",
            vec![ingredient("Eggs", 3.0, "pieces", IngredientCategory::Dairy)],
        );
        let plan = week_plan(vec![
            (
                1,
                DayPlan {
                    breakfast: Some(breakfast),
                    ..DayPlan::default()
                },
            ),
            (
                5,
                DayPlan {
                    dinner: Some(dinner),
                    ..DayPlan::default()
                },
            ),
        ]);

        let items = add_week_plan_to_list(Some(&plan), vec![]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Eggs");
        assert_eq!(items[0].quantity, 5);
    }

    // The week path keys on name alone, unlike the single-recipe path
    // which keys on (name-with-unit, category). Both groupings are pinned
    // here; do not unify them.
    #[test]
    fn week_plan_groups_by_name_ignoring_unit_and_category() {
        let lunch = recipe(
            "Soup",
            vec![ingredient("Garlic", 2.0, "cloves", IngredientCategory::SpicesAndSeasonings)],
        );
        let dinner = recipe(
            "Confit",
            vec![ingredient("Garlic", 1.0, "heads", IngredientCategory::Vegetables)],
        );
        let plan = week_plan(vec![(
            2,
            DayPlan {
                lunch: Some(lunch),
                dinner: Some(dinner),
                ..DayPlan::default()
            },
        )]);

        let items = add_week_plan_to_list(Some(&plan), vec![]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Garlic");
        assert_eq!(items[0].quantity, 3);
        // First occurrence (lunch before dinner) decides the category.
        assert_eq!(items[0].category, IngredientCategory::SpicesAndSeasonings);
    }

    #[test]
    fn week_plan_replaces_existing_list_wholesale() {
        let existing = vec![Item {
            is_bought: true,
            ..Item::new("Manual entry".into(), 1, IngredientCategory::Other)
        }];
        let plan = week_plan(vec![(
            3,
            DayPlan {
                breakfast: Some(recipe(
                    "Toast",
                    vec![ingredient("Bread", 0.5, "loaf", IngredientCategory::GrainsAndPasta)],
                )),
                ..DayPlan::default()
            },
        )]);

        let items = add_week_plan_to_list(Some(&plan), existing);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Bread");
        assert_eq!(items[0].quantity, 1);
        assert!(!items[0].is_bought);
    }

    #[test]
    fn week_plan_with_empty_days_yields_empty_list() {
        let plan = week_plan(vec![(1, DayPlan::default()), (7, DayPlan::default())]);
        assert!(add_week_plan_to_list(Some(&plan), vec![]).is_empty());
    }

    #[test]
    fn week_plan_flattens_days_in_ascending_order() {
        let day_recipe = |name: &str| {
            recipe(
                name,
                vec![ingredient(name, 1.0, "piece", IngredientCategory::Other)],
            )
        };
        // Inserted out of order; BTreeMap iteration restores day order.
        let plan = week_plan(vec![
            (
                6,
                DayPlan {
                    lunch: Some(day_recipe("Friday dish")),
                    ..DayPlan::default()
                },
            ),
            (
                2,
                DayPlan {
                    dinner: Some(day_recipe("Monday dish")),
                    ..DayPlan::default()
                },
            ),
        ]);

        let items = add_week_plan_to_list(Some(&plan), vec![]);
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Monday dish", "Friday dish"]);
    }
}
