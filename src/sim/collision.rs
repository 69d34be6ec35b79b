//! Basket/item collision detection
//!
//! Everything is an axis-aligned box in screen space (y grows downward).
//! The basket's box spans from `basket_top` to the bottom of the screen.

use glam::Vec2;

use super::state::{Basket, FallingItem, Field};

/// Axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Open-interval overlap on the x axis (touching edges do not count)
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x < other.max().x && self.max().x > other.min.x
    }
}

/// Box occupied by a falling item
pub fn item_box(item: &FallingItem, field: &Field) -> Aabb {
    Aabb::new(item.pos, field.item_size())
}

/// Box occupied by the basket
pub fn basket_box(basket: &Basket, field: &Field) -> Aabb {
    Aabb::new(
        Vec2::new(basket.x(), field.basket_top()),
        Vec2::new(field.basket_width, field.basket_height),
    )
}

/// Whether an item has dropped into the basket.
///
/// The item must overlap the basket horizontally and its bottom edge must be
/// below the top of the basket band. There is no lower bound: an item that
/// slips past the band while the basket is elsewhere can still be caught if
/// the basket arrives before it leaves the screen.
pub fn item_hits_basket(item: &FallingItem, basket: &Basket, field: &Field) -> bool {
    let item = item_box(item, field);
    let basket = basket_box(basket, field);
    item.overlaps_x(&basket) && item.max().y > basket.min.y
}

/// Whether an item has left the bottom of the screen
#[inline]
pub fn fell_off_screen(item: &FallingItem, field: &Field) -> bool {
    item.pos.y >= field.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;
    use crate::sim::state::ItemKind;

    fn field() -> Field {
        GameConfig::default().field()
    }

    fn item_at(x: f32, y: f32) -> FallingItem {
        FallingItem {
            id: 1,
            pos: Vec2::new(x, y),
            kind: ItemKind::Fruit,
            glyph: '🍒',
        }
    }

    #[test]
    fn test_hit_requires_vertical_band() {
        let field = field();
        let basket = Basket::at(80.0, &field);
        let top = field.basket_top();

        // Bottom edge exactly at the band top: not yet
        assert!(!item_hits_basket(&item_at(100.0, top - field.item_height), &basket, &field));
        // One unit further: caught
        assert!(item_hits_basket(&item_at(100.0, top - field.item_height + 1.0), &basket, &field));
    }

    #[test]
    fn test_hit_requires_horizontal_overlap() {
        let field = field();
        let basket = Basket::at(80.0, &field);
        let y = field.basket_top();

        // Touching the left edge exactly
        assert!(!item_hits_basket(&item_at(80.0 - field.item_width, y), &basket, &field));
        // Touching the right edge exactly
        assert!(!item_hits_basket(&item_at(80.0 + field.basket_width, y), &basket, &field));
        // Barely overlapping either side
        assert!(item_hits_basket(&item_at(80.0 - field.item_width + 0.5, y), &basket, &field));
        assert!(item_hits_basket(&item_at(80.0 + field.basket_width - 0.5, y), &basket, &field));
    }

    #[test]
    fn test_off_screen() {
        let field = field();
        assert!(!fell_off_screen(&item_at(0.0, field.height - 0.1), &field));
        assert!(fell_off_screen(&item_at(0.0, field.height), &field));
    }
}
