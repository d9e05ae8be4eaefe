//! Dual-handle price range slider state.
//!
//! The selection is purely local until some apply action reads it; this
//! widget only keeps the pair in bounds and mirrors it into the host
//! input as a formatted string.

use crate::dom::{Element, ElementLocator, MountError};
use crate::theme::{PRICE_FROM, PRICE_MAX, PRICE_MIN, PRICE_PREFIX, PRICE_TO};

/// Bounds and initial selection for [`PriceSlider::mount`].
#[derive(Debug, Clone)]
pub struct SliderConfig {
    pub min: u32,
    pub max: u32,
    pub from: u32,
    pub to: u32,
    pub prefix: String,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: PRICE_MIN,
            max: PRICE_MAX,
            from: PRICE_FROM,
            to: PRICE_TO,
            prefix: PRICE_PREFIX.to_owned(),
        }
    }
}

pub struct PriceSlider {
    input: Element,
    min: u32,
    max: u32,
    from: u32,
    to: u32,
    prefix: String,
}

impl PriceSlider {
    /// Bind the slider to its host input and write the initial selection.
    pub fn mount<L: ElementLocator>(
        locator: &L,
        input_id: &str,
        config: SliderConfig,
    ) -> Result<Self, MountError> {
        let input = locator.require(input_id)?;
        // a reversed bounds pair would make clamp panic
        let min = config.min;
        let max = config.max.max(min);
        let mut slider = Self {
            input,
            min,
            max,
            from: config.from,
            to: config.to,
            prefix: config.prefix,
        };
        slider.set_range(config.from, config.to);
        Ok(slider)
    }

    /// Update the selection and rewrite the display input.
    ///
    /// Both values are clamped into the bounds, then `from` is clamped
    /// down to `to`.
    pub fn set_range(&mut self, from: u32, to: u32) {
        let to = to.clamp(self.min, self.max);
        let from = from.clamp(self.min, self.max).min(to);
        self.from = from;
        self.to = to;
        self.input.set_value(&self.display_text());
    }

    pub fn range(&self) -> (u32, u32) {
        (self.from, self.to)
    }

    /// The formatted selection, e.g. `"$100 - $500"`.
    pub fn display_text(&self) -> String {
        format!(
            "{prefix}{from} - {prefix}{to}",
            prefix = self.prefix,
            from = self.from,
            to = self.to
        )
    }
}
