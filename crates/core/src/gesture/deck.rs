use std::collections::HashMap;

use crate::CategoryId;

use super::controller::{GestureConfig, RailController};
use super::frames::FrameScheduler;

/// One controller per mounted rail, keyed by category.
///
/// Rails are independent: a gesture on one never touches another's state.
#[derive(Debug)]
pub struct RailDeck<S> {
    config: GestureConfig,
    rails: HashMap<CategoryId, RailController<S>>,
}

impl<S: FrameScheduler + Default> Default for RailDeck<S> {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl<S: FrameScheduler + Default> RailDeck<S> {
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            rails: HashMap::new(),
        }
    }

    /// Controller for `category`, created on first use.
    pub fn rail_mut(&mut self, category: &CategoryId) -> &mut RailController<S> {
        let config = self.config;
        self.rails
            .entry(category.clone())
            .or_insert_with(|| RailController::with_config(config, S::default()))
    }

    #[must_use]
    pub fn get(&self, category: &CategoryId) -> Option<&RailController<S>> {
        self.rails.get(category)
    }

    /// Unmount a rail, cancelling anything it had in flight.
    pub fn remove(&mut self, category: &CategoryId) -> Option<RailController<S>> {
        let mut controller = self.rails.remove(category)?;
        controller.cancel();
        Some(controller)
    }

    /// Drop controllers for rails no longer shown (for example after a
    /// filter change hides a category).
    pub fn retain_categories<'a, I>(&mut self, visible: I)
    where
        I: IntoIterator<Item = &'a CategoryId>,
    {
        let visible: Vec<&CategoryId> = visible.into_iter().collect();
        self.rails.retain(|category, controller| {
            let keep = visible.contains(&category);
            if !keep {
                controller.cancel();
            }
            keep
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rails.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rails.is_empty()
    }
}
