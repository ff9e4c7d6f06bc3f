use std::collections::BTreeMap;

use anyhow::Context;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::mealplans::repo::{DayPlan, MealPlan, MealType};
use crate::recipes::repo::Recipe;

/// Snap an epoch-millis timestamp to the Sunday 00:00:00.000 UTC that
/// starts its week. Idempotent; every plan's `week_start_date` goes
/// through here before lookup or storage.
pub fn normalize_week_start(millis: i64) -> anyhow::Result<i64> {
    let dt = OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000)
        .context("timestamp out of range")?;
    let date = dt.date();
    let sunday = date - Duration::days(date.weekday().number_days_from_sunday() as i64);
    Ok(sunday.midnight().assume_utc().unix_timestamp() * 1000)
}

/// Assign (or clear, with `recipe = None`) one slot in the plan for the
/// given week, creating the plan if the week has none yet. The caller
/// passes an owned `Recipe` clone; the plan stores that snapshot, so a
/// later edit of the recipe book leaves historical plans untouched.
/// Returns the updated collection; at most one plan per week start.
pub fn assign_slot(
    mut plans: Vec<MealPlan>,
    week_start_date: i64,
    day_of_week: u8,
    meal_type: MealType,
    recipe: Option<Recipe>,
) -> Vec<MealPlan> {
    match plans
        .iter_mut()
        .find(|p| p.week_start_date == week_start_date)
    {
        Some(plan) => {
            let day = plan.daily_plans.entry(day_of_week).or_default();
            *day.slot_mut(meal_type) = recipe;
        }
        None => {
            let mut day = DayPlan::default();
            *day.slot_mut(meal_type) = recipe;
            plans.push(MealPlan {
                id: Uuid::new_v4(),
                week_start_date,
                daily_plans: BTreeMap::from([(day_of_week, day)]),
            });
        }
    }
    plans
}
