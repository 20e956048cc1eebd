// src/planner.rs

use crate::catalog::Catalog;
use crate::constants::*;
use crate::curriculum::Curriculum;
use crate::models::{CardTag, DayPlan, Item, Level, StudyCard};
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

// --- Public Interface ---

/// Maps (curriculum, catalog, day, weak items) to the day's item sets.
pub struct DayPlanner<'a> {
    catalog: &'a Catalog,
    curriculum: Curriculum<'a>,
}

impl<'a> DayPlanner<'a> {
    pub fn new(catalog: &'a Catalog, curriculum: Curriculum<'a>) -> Self {
        DayPlanner {
            catalog,
            curriculum,
        }
    }

    pub fn curriculum(&self) -> &Curriculum<'a> {
        &self.curriculum
    }

    /// Builds the plan for `day`. `rng` only shuffles the random filler pool;
    /// new and review items are fully determined by the day index.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        level: Level,
        day: u32,
        weak_item_ids: &[u32],
        rng: &mut R,
    ) -> DayPlan {
        let Some(entry) = self.curriculum.entry(day).copied() else {
            warn!("Day {} is past the curriculum for {}. Nothing to plan.", day, level);
            return DayPlan {
                day,
                ..Default::default()
            };
        };
        debug!("Planning {} day {}: {:?}", level, day, entry);

        let level_items = self.catalog.level_items(level);

        // 1. New (catalog order, offset by everything introduced before today)
        let new_items = self.introduced_on(level_items, day).to_vec();

        // 2. Base review (items introduced on each lag day)
        let review_items = self.base_review(level_items, day);
        debug!(
            "New: {:?}, Review: {:?}",
            ids(&new_items),
            ids(&review_items)
        );

        // 3. Extra mix (weak first, then shuffled filler)
        let taken: HashSet<u32> = new_items
            .iter()
            .chain(review_items.iter())
            .map(|i| i.id)
            .collect();

        let weak_pool = resolve_weak(level_items, weak_item_ids, &taken);

        let studied_so_far = self.curriculum.new_offset(day) + entry.new;
        let filler_source = if day >= FINAL_REINFORCEMENT_DAY {
            level_items
        } else {
            &level_items[..studied_so_far.min(level_items.len())]
        };
        let mut random_pool: Vec<Item> = filler_source
            .iter()
            .filter(|i| !taken.contains(&i.id) && !weak_pool.iter().any(|w| w.id == i.id))
            .cloned()
            .collect();
        random_pool.shuffle(rng);

        let extra_target = (entry.review + entry.extra).saturating_sub(review_items.len());
        let mut extra_mix = weak_pool;
        extra_mix.extend(random_pool);
        extra_mix.truncate(extra_target);
        debug!("Extra mix (target {}): {:?}", extra_target, ids(&extra_mix));

        DayPlan {
            day,
            entry: Some(entry),
            new_items,
            review_items,
            extra_mix,
        }
    }

    fn introduced_on<'i>(&self, level_items: &'i [Item], day: u32) -> &'i [Item] {
        let range = self.curriculum.new_range(day);
        let end = range.end.min(level_items.len());
        let start = range.start.min(end);
        &level_items[start..end]
    }

    fn base_review(&self, level_items: &[Item], day: u32) -> Vec<Item> {
        REVIEW_LAG_DAYS
            .iter()
            .filter(|&&lag| day > lag)
            .flat_map(|&lag| self.introduced_on(level_items, day - lag).iter().cloned())
            .collect()
    }
}

/// Learning pass: today's new items, then the base review items.
pub fn learning_deck(plan: &DayPlan) -> Vec<StudyCard> {
    plan.new_items
        .iter()
        .map(|item| StudyCard {
            item: item.clone(),
            tag: CardTag::New,
        })
        .chain(plan.review_items.iter().map(|item| StudyCard {
            item: item.clone(),
            tag: CardTag::Review,
        }))
        .collect()
}

// --- Internal Helpers ---

fn resolve_weak(level_items: &[Item], weak_item_ids: &[u32], taken: &HashSet<u32>) -> Vec<Item> {
    let mut seen = HashSet::new();
    weak_item_ids
        .iter()
        .filter(|id| seen.insert(**id))
        .filter_map(|id| {
            let found = level_items.iter().find(|i| i.id == *id);
            if found.is_none() {
                warn!("Weak item {} is not part of this level. Skipping.", id);
            }
            found
        })
        .filter(|i| !taken.contains(&i.id))
        .cloned()
        .collect()
}

fn ids(items: &[Item]) -> Vec<u32> {
    items.iter().map(|i| i.id).collect()
}
