use std::collections::HashMap;

use crate::domain::menu::{
    entities::MealType,
    value_objects::{MealChangeFrequency, MealsPerDay},
};

/// One day × slot coordinate with the candidate index the variety policy
/// wants to place there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedSlot {
    pub day_number: i32,
    pub meal_type: MealType,
    /// Index into the per-meal-type candidate pool. Days inside the same
    /// change-frequency block share indices; a new block advances them.
    pub variety_key: usize,
}

/// Number of distinct candidates needed per meal type for a full plan.
pub fn candidates_needed(
    days: i32,
    pattern: MealsPerDay,
    frequency: MealChangeFrequency,
) -> HashMap<MealType, usize> {
    let block_days = frequency.block_days() as i32;
    let blocks = ((days + block_days - 1) / block_days) as usize;

    let mut needed: HashMap<MealType, usize> = HashMap::new();
    for meal_type in pattern.slots() {
        *needed.entry(*meal_type).or_insert(0) += blocks;
    }
    needed
}

/// Lay out every day × slot combination implied by the pattern, assigning
/// variety keys according to the change frequency. The plan is pure: it
/// depends only on its arguments.
pub fn plan_slots(
    days: i32,
    pattern: MealsPerDay,
    frequency: MealChangeFrequency,
) -> Vec<PlannedSlot> {
    let block_days = frequency.block_days() as i32;
    let mut slots = Vec::with_capacity(days as usize * pattern.slots_per_day());

    for day in 1..=days {
        let block = ((day - 1) / block_days) as usize;
        let mut occurrence: HashMap<MealType, usize> = HashMap::new();

        for meal_type in pattern.slots() {
            let occ = occurrence.entry(*meal_type).or_insert(0);
            let per_block = pattern
                .slots()
                .iter()
                .filter(|t| *t == meal_type)
                .count();

            slots.push(PlannedSlot {
                day_number: day,
                meal_type: *meal_type,
                variety_key: block * per_block + *occ,
            });
            *occ += 1;
        }
    }

    slots
}

/// Resolve a variety key against the candidates the generator actually
/// produced. When the pool is shorter than the plan asked for, ties are
/// broken by preferring candidates not yet used in the current menu.
pub fn pick_candidate(pool_len: usize, variety_key: usize, use_counts: &[usize]) -> Option<usize> {
    if pool_len == 0 {
        return None;
    }
    if variety_key < pool_len {
        return Some(variety_key);
    }

    let least_used = (0..pool_len).min_by_key(|&i| (use_counts.get(i).copied().unwrap_or(0), i));
    least_used
}

/// Fixed clock times per slot position when the caller asked for the same
/// meal times every day.
pub fn default_slot_time(meal_type: MealType, occurrence: usize) -> &'static str {
    match (meal_type, occurrence) {
        (MealType::Breakfast, _) => "08:00",
        (MealType::Lunch, _) => "13:00",
        (MealType::Dinner, _) => "19:00",
        (MealType::Snack, 0) => "10:30",
        (MealType::Snack, _) => "16:00",
        (MealType::Intermediate, _) => "16:00",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PATTERNS: [MealsPerDay; 3] = [
        MealsPerDay::ThreeMain,
        MealsPerDay::ThreePlusTwoSnacks,
        MealsPerDay::TwoPlusOneIntermediate,
    ];

    #[test]
    fn plan_has_exactly_days_times_slots_meals() {
        for days in 1..=30 {
            for pattern in ALL_PATTERNS {
                let slots = plan_slots(days, pattern, MealChangeFrequency::Daily);
                assert_eq!(slots.len(), days as usize * pattern.slots_per_day());
            }
        }
    }

    #[test]
    fn every_day_number_is_in_range_and_type_from_pattern() {
        for pattern in ALL_PATTERNS {
            let slots = plan_slots(9, pattern, MealChangeFrequency::Every3Days);
            for slot in &slots {
                assert!(slot.day_number >= 1 && slot.day_number <= 9);
                assert!(pattern.slots().contains(&slot.meal_type));
            }
        }
    }

    #[test]
    fn daily_frequency_gives_each_day_its_own_keys() {
        let slots = plan_slots(5, MealsPerDay::ThreeMain, MealChangeFrequency::Daily);
        for slot in &slots {
            assert_eq!(slot.variety_key, (slot.day_number - 1) as usize);
        }
    }

    #[test]
    fn weekly_frequency_repeats_keys_inside_the_week() {
        let slots = plan_slots(14, MealsPerDay::ThreeMain, MealChangeFrequency::Weekly);
        let breakfast_keys: Vec<usize> = slots
            .iter()
            .filter(|s| s.meal_type == MealType::Breakfast)
            .map(|s| s.variety_key)
            .collect();

        assert_eq!(&breakfast_keys[..7], &[0; 7]);
        assert_eq!(&breakfast_keys[7..], &[1; 7]);
    }

    #[test]
    fn snack_slots_get_distinct_keys_within_one_day() {
        let slots = plan_slots(1, MealsPerDay::ThreePlusTwoSnacks, MealChangeFrequency::Daily);
        let snack_keys: Vec<usize> = slots
            .iter()
            .filter(|s| s.meal_type == MealType::Snack)
            .map(|s| s.variety_key)
            .collect();

        assert_eq!(snack_keys, vec![0, 1]);
    }

    #[test]
    fn candidates_needed_matches_block_count() {
        let needed = candidates_needed(7, MealsPerDay::ThreeMain, MealChangeFrequency::Daily);
        assert_eq!(needed[&MealType::Breakfast], 7);

        let needed = candidates_needed(7, MealsPerDay::ThreeMain, MealChangeFrequency::Weekly);
        assert_eq!(needed[&MealType::Breakfast], 1);

        let needed = candidates_needed(
            8,
            MealsPerDay::ThreePlusTwoSnacks,
            MealChangeFrequency::Weekly,
        );
        assert_eq!(needed[&MealType::Snack], 4);
    }

    #[test]
    fn pick_prefers_unused_candidates_when_pool_is_short() {
        // Pool of 2, key asks for a third candidate; index 0 already used twice.
        let picked = pick_candidate(2, 2, &[2, 0]);
        assert_eq!(picked, Some(1));
    }

    #[test]
    fn pick_is_direct_when_key_is_in_pool() {
        assert_eq!(pick_candidate(3, 1, &[0, 0, 0]), Some(1));
    }

    #[test]
    fn pick_on_empty_pool_is_none() {
        assert_eq!(pick_candidate(0, 0, &[]), None);
    }
}
