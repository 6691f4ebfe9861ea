//! Wipe durations derived from the animation speed
//!
//! The renderer's color wipe fills the strip in one cycle and clears it in
//! the next, so both halves share the same cycle length.

/// Cycle length at full speed (ms)
pub const CYCLE_BASE_MS: u32 = 360;

/// Extra cycle length per speed step below 255 (ms)
pub const CYCLE_MS_PER_STEP: u32 = 75;

/// Switch to solid this long before the fill completes (ms)
pub const SWITCH_MARGIN_MS: u32 = 25;

/// Let the clearing half finish before switching off (ms)
pub const OFF_SETTLE_MS: u32 = 5;

/// Length of one wipe cycle at `speed`
pub const fn cycle_duration_ms(speed: u8) -> u32 {
    CYCLE_BASE_MS + (255 - speed as u32) * CYCLE_MS_PER_STEP
}

/// Time from wipe start until the strip is held solid
pub const fn wipe_on_duration_ms(speed: u8) -> u32 {
    cycle_duration_ms(speed) - SWITCH_MARGIN_MS
}

/// Time from off-wipe start until the strip is dark
pub const fn wipe_off_duration_ms(speed: u8) -> u32 {
    cycle_duration_ms(speed) + OFF_SETTLE_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_duration() {
        assert_eq!(cycle_duration_ms(255), 360);
        assert_eq!(cycle_duration_ms(225), 2610);
        assert_eq!(cycle_duration_ms(0), 19_485);
    }

    #[test]
    fn test_switch_points() {
        assert_eq!(wipe_on_duration_ms(255), 335);
        assert_eq!(wipe_on_duration_ms(225), 2585);
        assert_eq!(wipe_off_duration_ms(225), 2615);
    }
}
