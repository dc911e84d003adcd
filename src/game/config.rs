//! Fixed game rules
//!
//! The grid, tick rate and scoring rules are constants, not runtime settings.

/// Cells per side of the square grid
pub const TILE_COUNT: i32 = 30;

/// Simulation tick period in milliseconds (~30 Hz)
pub const TICK_MS: u64 = 33;

/// Lives at the start of every run
pub const STARTING_LIVES: u32 = 10;

/// Length of the canonical starting chain
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Points per food before combo and power-up multipliers
pub const BASE_POINTS: u32 = 10;

/// Upper bound of the combo multiplier
pub const MAX_COMBO: u32 = 5;

/// Ticks the combo survives without another food
pub const COMBO_WINDOW_TICKS: u32 = 150;

/// Manhattan distance at which a magnet pulls the head onto the food
pub const MAGNET_RANGE: i32 = 2;

/// Probability of rolling a power-up item on each food respawn
pub const POWER_UP_SPAWN_CHANCE: f64 = 0.12;

/// Random draws before spawn placement falls back to scanning free cells
pub const MAX_SPAWN_ATTEMPTS: usize = 64;

/// Cosmetic food glyphs, indexed by `Food::variant`
pub const FOOD_VARIANTS: &[&str] = &[
    "🍎", "🍐", "🍊", "🍋", "🍌", "🍉", "🍇", "🍓", "🍒", "🍑", "🍍", "🥝", "🍅", "🥑", "🥕",
    "🌽", "🥐", "🧀", "🍔", "🍕", "🌮", "🍩", "🍪", "🍰",
];

/// Score thresholds of the cosmetic snake color tiers
pub const TIER_THRESHOLDS: [u32; 5] = [0, 200, 500, 1000, 2000];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_chain_fits_grid() {
        let center = TILE_COUNT / 2;
        assert!(center - INITIAL_SNAKE_LENGTH as i32 + 1 >= 0);
        assert!(center < TILE_COUNT);
    }

    #[test]
    fn test_tiers_are_sorted() {
        assert!(TIER_THRESHOLDS.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(TIER_THRESHOLDS[0], 0);
    }

    #[test]
    fn test_spawn_chance_is_probability() {
        assert!((0.0..=1.0).contains(&POWER_UP_SPAWN_CHANCE));
    }
}
