//! LED renderer trait
//!
//! The renderer owns the pixel pipeline and advances the animation on its
//! own clock. The staircase only selects the effect and its parameters.

/// RGBW color as stored by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl Color {
    /// All channels off
    pub const BLACK: Color = Color::rgbw(0, 0, 0, 0);

    /// Create a color from its four channels
    pub const fn rgbw(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }

    /// Check if every channel is zero
    pub const fn is_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0 && self.w == 0
    }
}

/// Effects the staircase asks the renderer for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Solid primary color
    Static,
    /// Fill the strip from one end, then clear it with the secondary color
    ColorWipe,
}

/// Host lighting renderer
pub trait Renderer {
    /// Primary color of the active segment
    fn primary_color(&self) -> Color;

    /// Secondary color of the active segment
    fn secondary_color(&self) -> Color;

    /// Currently selected effect
    fn effect(&self) -> Effect;

    /// Select an effect
    fn set_effect(&mut self, effect: Effect);

    /// Current animation speed
    fn speed(&self) -> u8;

    /// Set the animation speed
    fn set_speed(&mut self, speed: u8);

    /// Restart the animation clock at zero
    fn reset_animation_clock(&mut self);

    /// Move the animation clock so that it currently reads `offset_ms`
    fn seek_animation_clock(&mut self, offset_ms: u32);

    /// Play the effect from the far end of the segment
    fn set_reversed(&mut self, reversed: bool);

    /// Duration of the next brightness/color transition
    fn set_transition(&mut self, duration_ms: u16);

    /// Current master brightness
    fn brightness(&self) -> u8;

    /// Set master brightness (0 = off)
    fn set_brightness(&mut self, brightness: u8);

    /// Brightness the strip had the last time it was on
    fn last_on_brightness(&self) -> u8;

    /// Apply pending effect and color changes
    fn color_updated(&mut self);

    /// Apply pending brightness / power changes
    fn state_updated(&mut self);

    /// Check if the renderer is pushing a frame right now
    fn is_updating(&self) -> bool {
        false
    }

    /// Check if the wipe would be visible at all
    fn has_visible_colors(&self) -> bool {
        !(self.primary_color().is_black() && self.secondary_color().is_black())
    }
}
