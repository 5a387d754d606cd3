use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::BingoError;
use crate::items::{Item, ItemPool};
use crate::layout::CardConfig;

/// The items drawn for one card, in placement order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card<'a> {
    items: Vec<&'a Item>,
}

impl<'a> Card<'a> {
    pub fn new(items: Vec<&'a Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[&'a Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Draws a card's worth of distinct items from the pool.
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    draw_size: usize,
}

impl Sampler {
    pub fn new(config: &CardConfig) -> Self {
        Self {
            draw_size: config.cell_count(),
        }
    }

    pub fn draw_size(&self) -> usize {
        self.draw_size
    }

    /// Pick `draw_size` items uniformly without replacement, in random order.
    pub fn draw<'a, R: Rng + ?Sized>(
        &self,
        pool: &'a ItemPool,
        rng: &mut R,
    ) -> Result<Card<'a>, BingoError> {
        if pool.len() < self.draw_size {
            return Err(BingoError::InsufficientData {
                needed: self.draw_size,
                available: pool.len(),
            });
        }
        let items = pool.items().choose_multiple(rng, self.draw_size).collect();
        Ok(Card::new(items))
    }
}
