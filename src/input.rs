//! Basket position sources
//!
//! A source turns raw device signals into basket positions. The embedding
//! layer feeds readings in as they arrive; the session polls the source on
//! its sampling timer (tilt) or before every scheduled event (pointer).
//! A source with nothing new to report returns `None` and the basket stays
//! where it is, which is also how an unavailable device degrades.

use crate::clamp_basket_x;
use crate::consts::TILT_SAMPLE_PERIOD_MS;
use crate::settings::GameConfig;
use crate::sim::{Basket, FallingItem, Field, ItemKind};

/// Read-only view a source may consult when polled
#[derive(Debug, Clone, Copy)]
pub struct SourceView<'a> {
    pub basket: &'a Basket,
    pub field: &'a Field,
    /// Items as currently rendered
    pub items: &'a [FallingItem],
}

/// Produces basket-position updates
pub trait PositionSource {
    /// Sampling period in ms, or `None` for event-driven sources
    fn sample_period_ms(&self) -> Option<u32>;

    /// New (already clamped) basket x, if the source has anything to report
    fn poll(&mut self, view: &SourceView<'_>) -> Option<f32>;

    /// Drop any input received but not yet applied
    fn clear(&mut self) {}
}

/// Accelerometer-driven source: tilt nudges the basket relative to where it is
#[derive(Debug, Clone)]
pub struct TiltSource {
    sensitivity: f32,
    period_ms: u32,
    reading: Option<f32>,
}

impl TiltSource {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            sensitivity,
            period_ms: TILT_SAMPLE_PERIOD_MS,
            reading: None,
        }
    }

    /// Sensitivity and sampling period taken from the game config
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.tilt_sensitivity).with_period(config.tilt_sample_period_ms)
    }

    pub fn with_period(mut self, period_ms: u32) -> Self {
        self.period_ms = period_ms.max(1);
        self
    }

    /// Record the device's latest x-axis tilt. Applied once, on the next sample.
    pub fn push_reading(&mut self, tilt_x: f32) {
        if tilt_x.is_finite() {
            self.reading = Some(tilt_x);
        }
    }
}

impl PositionSource for TiltSource {
    fn sample_period_ms(&self) -> Option<u32> {
        Some(self.period_ms)
    }

    fn poll(&mut self, view: &SourceView<'_>) -> Option<f32> {
        let tilt = self.reading.take()?;
        Some(view.basket.tilted(tilt, self.sensitivity, view.field))
    }

    fn clear(&mut self) {
        self.reading = None;
    }
}

/// Mouse/touch-driven source: the basket centers under the pointer
#[derive(Debug, Clone, Default)]
pub struct PointerSource {
    pending: Option<f32>,
}

impl PointerSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer move. Only the latest position before a poll matters.
    pub fn pointer_moved(&mut self, pointer_x: f32) {
        if pointer_x.is_finite() {
            self.pending = Some(pointer_x);
        }
    }
}

impl PositionSource for PointerSource {
    fn sample_period_ms(&self) -> Option<u32> {
        None
    }

    fn poll(&mut self, view: &SourceView<'_>) -> Option<f32> {
        let pointer_x = self.pending.take()?;
        Some(Basket::under_pointer(pointer_x, view.field))
    }

    fn clear(&mut self) {
        self.pending = None;
    }
}

/// Idle/demo player: chases the lowest fruit and sidesteps bombs about to land
#[derive(Debug, Clone)]
pub struct AutopilotSource {
    /// Most the basket may move per sample
    max_step: f32,
    /// How far above the basket band a bomb starts to matter
    lookahead: f32,
    period_ms: u32,
}

impl Default for AutopilotSource {
    fn default() -> Self {
        Self {
            max_step: 40.0,
            lookahead: 120.0,
            period_ms: TILT_SAMPLE_PERIOD_MS,
        }
    }
}

impl AutopilotSource {
    pub fn new(max_step: f32, lookahead: f32) -> Self {
        Self {
            max_step,
            lookahead,
            ..Default::default()
        }
    }

    fn target_x(&self, view: &SourceView<'_>) -> f32 {
        let field = view.field;

        let mut target = view
            .items
            .iter()
            .filter(|item| item.kind == ItemKind::Fruit)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|fruit| fruit.pos.x + field.item_width / 2.0 - field.basket_width / 2.0)
            .unwrap_or_else(|| field.centered_basket_x());
        target = clamp_basket_x(target, field.max_basket_x());

        let danger_line = field.basket_top() - self.lookahead;
        let threat = view.items.iter().find(|item| {
            item.kind == ItemKind::Bomb
                && item.pos.y + field.item_height > danger_line
                && item.pos.x < target + field.basket_width
                && item.pos.x + field.item_width > target
        });

        if let Some(bomb) = threat {
            let left = bomb.pos.x - field.basket_width - 1.0;
            let right = bomb.pos.x + field.item_width + 1.0;
            let here = view.basket.x();
            let left_ok = left >= 0.0;
            let right_ok = right <= field.max_basket_x();

            target = match (left_ok, right_ok) {
                (true, true) if (left - here).abs() <= (right - here).abs() => left,
                (true, true) => right,
                (true, false) => left,
                (false, true) => right,
                // Nowhere to hide
                (false, false) => target,
            };
        }

        target
    }
}

impl PositionSource for AutopilotSource {
    fn sample_period_ms(&self) -> Option<u32> {
        Some(self.period_ms)
    }

    fn poll(&mut self, view: &SourceView<'_>) -> Option<f32> {
        let here = view.basket.x();
        let step = (self.target_x(view) - here).clamp(-self.max_step, self.max_step);
        if step.abs() < 0.5 {
            return None;
        }
        Some(clamp_basket_x(here + step, view.field.max_basket_x()))
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::settings::GameConfig;

    fn field() -> Field {
        GameConfig::default().field()
    }

    fn item(id: u64, x: f32, y: f32, kind: ItemKind) -> FallingItem {
        FallingItem {
            id,
            pos: Vec2::new(x, y),
            kind,
            glyph: '🍇',
        }
    }

    #[test]
    fn test_tilt_applies_latest_reading_once() {
        let field = field();
        let basket = Basket::at(100.0, &field);
        let view = SourceView {
            basket: &basket,
            field: &field,
            items: &[],
        };
        let mut tilt = TiltSource::new(80.0);

        assert_eq!(tilt.poll(&view), None);

        tilt.push_reading(0.1);
        tilt.push_reading(0.25);
        assert_eq!(tilt.poll(&view), Some(120.0));
        assert_eq!(tilt.poll(&view), None);

        tilt.push_reading(-10.0);
        assert_eq!(tilt.poll(&view), Some(0.0));
    }

    #[test]
    fn test_tilt_from_config() {
        let config = GameConfig::from_json(
            r#"{ "tilt_sensitivity": 10, "tilt_sample_period_ms": 500 }"#,
        )
        .unwrap();
        let field = config.field();
        let basket = Basket::at(100.0, &field);
        let view = SourceView {
            basket: &basket,
            field: &field,
            items: &[],
        };
        let mut tilt = TiltSource::from_config(&config);

        assert_eq!(tilt.sample_period_ms(), Some(500));
        tilt.push_reading(0.5);
        assert_eq!(tilt.poll(&view), Some(105.0));
    }

    #[test]
    fn test_clear_drops_pending_input() {
        let field = field();
        let basket = Basket::centered(&field);
        let view = SourceView {
            basket: &basket,
            field: &field,
            items: &[],
        };

        let mut tilt = TiltSource::new(80.0);
        tilt.push_reading(1.0);
        tilt.clear();
        assert_eq!(tilt.poll(&view), None);

        let mut pointer = PointerSource::new();
        pointer.pointer_moved(0.0);
        pointer.clear();
        assert_eq!(pointer.poll(&view), None);
    }

    #[test]
    fn test_tilt_ignores_garbage() {
        let mut tilt = TiltSource::new(80.0);
        tilt.push_reading(f32::NAN);
        tilt.push_reading(f32::INFINITY);
        let field = field();
        let basket = Basket::centered(&field);
        let view = SourceView {
            basket: &basket,
            field: &field,
            items: &[],
        };
        assert_eq!(tilt.poll(&view), None);
    }

    #[test]
    fn test_pointer_latest_wins_and_clamps() {
        let field = field();
        let basket = Basket::centered(&field);
        let view = SourceView {
            basket: &basket,
            field: &field,
            items: &[],
        };
        let mut pointer = PointerSource::new();
        assert_eq!(pointer.sample_period_ms(), None);

        pointer.pointer_moved(10.0);
        pointer.pointer_moved(200.0);
        assert_eq!(pointer.poll(&view), Some(155.0));
        assert_eq!(pointer.poll(&view), None);

        pointer.pointer_moved(field.width + 50.0);
        assert_eq!(pointer.poll(&view), Some(field.max_basket_x()));
    }

    #[test]
    fn test_autopilot_chases_lowest_fruit() {
        let field = field();
        let basket = Basket::at(150.0, &field);
        let items = [
            item(1, 20.0, 100.0, ItemKind::Fruit),
            item(2, 300.0, 400.0, ItemKind::Fruit),
        ];
        let view = SourceView {
            basket: &basket,
            field: &field,
            items: &items,
        };
        let mut pilot = AutopilotSource::new(40.0, 120.0);

        // Target is 300 + 20 - 45 = 275, one capped step to the right
        assert_eq!(pilot.poll(&view), Some(190.0));
    }

    #[test]
    fn test_autopilot_dodges_bomb() {
        let field = field();
        let basket = Basket::at(150.0, &field);
        let items = [item(1, 170.0, field.basket_top() - 60.0, ItemKind::Bomb)];
        let view = SourceView {
            basket: &basket,
            field: &field,
            items: &items,
        };
        let mut pilot = AutopilotSource::new(500.0, 120.0);

        let x = pilot.poll(&view).unwrap();
        let clear = x + field.basket_width <= 170.0 || x >= 170.0 + field.item_width;
        assert!(clear, "basket at {x} still under the bomb");
    }

    #[test]
    fn test_autopilot_idles_when_centered() {
        let field = field();
        let basket = Basket::centered(&field);
        let view = SourceView {
            basket: &basket,
            field: &field,
            items: &[],
        };
        assert_eq!(AutopilotSource::default().poll(&view), None);
    }
}
