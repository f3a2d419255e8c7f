//! Rainbow state machine: walks the red→green→blue hue ring.
//!
//! The ring is the cyclic sequence of the three pure primaries connected
//! by linear channel ramps. Each [`Rainbow::step`] moves two channels by
//! a fixed increment: the phase's channel rises while the previous leg's
//! channel falls. Because every increment is an exact divisor of 255,
//! repeated steps land precisely on a pure primary, and that equality is
//! what advances the phase to the next leg.

use crate::Color;

// ── Phase ────────────────────────────────────────────────────────────

/// The active leg of the hue ring: phase `X` means channel X is rising.
///
/// While red rises, blue falls (the blue→red leg); while green rises,
/// red falls; while blue rises, green falls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Red,
    Green,
    Blue,
}

impl Phase {
    /// The next leg of the ring: Red → Green → Blue → Red.
    pub fn next(self) -> Phase {
        match self {
            Phase::Red => Phase::Green,
            Phase::Green => Phase::Blue,
            Phase::Blue => Phase::Red,
        }
    }

    /// The pure primary this phase ramps toward.
    fn target(self) -> Color {
        match self {
            Phase::Red => Color::RED,
            Phase::Green => Color::GREEN,
            Phase::Blue => Color::BLUE,
        }
    }
}

// ── Rainbow ──────────────────────────────────────────────────────────

/// Color-cycling state machine.
///
/// Holds the current color and the active phase; [`step`](Self::step)
/// advances both. A `Rainbow` only ever visits colors on the boundary of
/// the ring: at most two channels are non-zero and the non-zero pair
/// always sums to 255.
#[derive(Clone, Debug)]
pub struct Rainbow {
    color: Color,
    speed: u8,
    phase: Phase,
}

impl Rainbow {
    /// Create a new rainbow at speed tier 1-7, starting on the pure
    /// primary named by `start`.
    ///
    /// The initial phase is the leg that leaves `start`, so
    /// `Rainbow::new(1, Phase::Red)` begins at pure red and ramps toward
    /// green. Speed tiers outside 1-7 silently fall through to the
    /// largest increment (see [`increment`](Self::increment)).
    pub fn new(speed: u8, start: Phase) -> Self {
        Self {
            color: start.target(),
            speed,
            phase: start.next(),
        }
    }

    /// Test-only constructor for injecting arbitrary state, including
    /// colors off the ring.
    #[cfg(test)]
    fn with_state(color: Color, speed: u8, phase: Phase) -> Self {
        Self {
            color,
            speed,
            phase,
        }
    }

    /// Translate the speed tier into a channel increment.
    ///
    /// Each value is an exact divisor of 255, so repeated addition from 0
    /// reaches exactly 255 (in 255, 85, 51, 17, 15, 5, or 3 steps). Any
    /// tier outside 1-7 takes the default arm and moves at the largest
    /// increment.
    fn increment(&self) -> u8 {
        match self.speed {
            1 => 1,
            2 => 3,
            3 => 5,
            4 => 15,
            5 => 17,
            6 => 51,
            _ => 85,
        }
    }

    /// Advance the color by one step and return it.
    ///
    /// # Rust concept: wrapping arithmetic
    /// `u8::wrapping_add`/`wrapping_sub` wrap modulo 256 instead of
    /// panicking in debug builds. On the ring the increments always land
    /// exactly on 0 or 255, but the wraparound is part of the contract:
    /// channels never saturate.
    pub fn step(&mut self) -> Color {
        let inc = self.increment();
        match self.phase {
            Phase::Red => {
                self.color.r = self.color.r.wrapping_add(inc);
                self.color.b = self.color.b.wrapping_sub(inc);
            }
            Phase::Green => {
                self.color.g = self.color.g.wrapping_add(inc);
                self.color.r = self.color.r.wrapping_sub(inc);
            }
            Phase::Blue => {
                self.color.b = self.color.b.wrapping_add(inc);
                self.color.g = self.color.g.wrapping_sub(inc);
            }
        }
        self.inspect_phase();
        self.color
    }

    /// Move to the next leg the instant the color lands exactly on a
    /// pure primary. The increments are exact divisors of 255, so every
    /// ramp terminates on one of these three sentinels.
    fn inspect_phase(&mut self) {
        if self.color == Color::RED || self.color == Color::GREEN || self.color == Color::BLUE {
            self.phase = self.phase.next();
        }
    }

    /// The current color, without advancing.
    pub fn color(&self) -> Color {
        self.color
    }

    /// The currently active phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    // ── Construction ───────────────────────────────────────────────

    #[rstest]
    #[case(Phase::Red, Color::RED, Phase::Green)]
    #[case(Phase::Green, Color::GREEN, Phase::Blue)]
    #[case(Phase::Blue, Color::BLUE, Phase::Red)]
    fn new_starts_on_primary_with_departing_leg(
        #[case] start: Phase,
        #[case] color: Color,
        #[case] phase: Phase,
    ) {
        let r = Rainbow::new(1, start);
        assert_eq!(r.color(), color);
        assert_eq!(r.phase(), phase);
    }

    // ── Speed tiers ────────────────────────────────────────────────

    #[rstest]
    #[case(1, 255)]
    #[case(2, 85)]
    #[case(3, 51)]
    #[case(4, 17)]
    #[case(5, 15)]
    #[case(6, 5)]
    #[case(7, 3)]
    fn ramp_reaches_next_primary_in_exact_step_count(#[case] speed: u8, #[case] steps: u32) {
        let mut r = Rainbow::new(speed, Phase::Red);
        for i in 1..=steps {
            let c = r.step();
            if i < steps {
                assert_ne!(c, Color::GREEN, "reached green early at step {i}");
            } else {
                assert_eq!(c, Color::GREEN, "expected green after {steps} steps");
            }
        }
    }

    #[rstest]
    #[case(0)]
    #[case(8)]
    #[case(99)]
    fn out_of_range_speed_falls_through_to_largest_increment(#[case] speed: u8) {
        let mut fast = Rainbow::new(speed, Phase::Blue);
        let mut tier7 = Rainbow::new(7, Phase::Blue);
        for _ in 0..9 {
            assert_eq!(fast.step(), tier7.step());
        }
    }

    // ── Phase cycling ──────────────────────────────────────────────

    #[rstest]
    #[case(Phase::Red)]
    #[case(Phase::Green)]
    #[case(Phase::Blue)]
    fn phase_sequence_is_cyclic_with_period_three(#[case] start: Phase) {
        let mut r = Rainbow::new(7, start);
        let first = r.phase();
        let mut visited = Vec::new();
        let mut prev = first;
        // 9 steps of 85 = three full ramps
        for _ in 0..9 {
            r.step();
            if r.phase() != prev {
                prev = r.phase();
                visited.push(prev);
            }
        }
        assert_eq!(
            visited,
            vec![first.next(), first.next().next(), first],
            "expected three transitions returning to the starting leg"
        );
        assert_eq!(r.color(), start.target());
    }

    #[test]
    fn full_cycle_at_speed_one_returns_to_start() {
        let mut r = Rainbow::new(1, Phase::Red);
        for _ in 0..(3 * 255) {
            r.step();
        }
        assert_eq!(r.color(), Color::RED);
        assert_eq!(r.phase(), Phase::Green);
    }

    // ── Ring invariant ─────────────────────────────────────────────

    #[rstest]
    #[case(1)]
    #[case(4)]
    #[case(7)]
    fn colors_stay_on_ring_boundary(#[case] speed: u8) {
        let mut r = Rainbow::new(speed, Phase::Green);
        for _ in 0..600 {
            let c = r.step();
            let sum = c.r as u16 + c.g as u16 + c.b as u16;
            assert_eq!(sum, 255, "channels off the ring: {c:?}");
            let non_zero = [c.r, c.g, c.b].iter().filter(|&&ch| ch != 0).count();
            assert!(non_zero <= 2, "more than two non-zero channels: {c:?}");
        }
    }

    // ── Wraparound ─────────────────────────────────────────────────

    #[test]
    fn channel_arithmetic_wraps_modulo_256() {
        // Injected off-ring state: rising red wraps past 255, falling
        // blue wraps below 0.
        let mut r = Rainbow::with_state(Color::new(200, 0, 55), 7, Phase::Red);
        let c = r.step();
        assert_eq!(c, Color::new(29, 0, 226));
    }

    // ── Accessors ──────────────────────────────────────────────────

    #[test]
    fn color_accessor_does_not_mutate() {
        let r = Rainbow::new(3, Phase::Blue);
        assert_eq!(r.color(), Color::BLUE);
        assert_eq!(r.color(), Color::BLUE);
        assert_eq!(r.phase(), Phase::Red);
    }

    #[test]
    fn step_returns_the_updated_color() {
        let mut r = Rainbow::new(1, Phase::Red);
        assert_eq!(r.step(), Color::new(254, 1, 0));
        assert_eq!(r.color(), Color::new(254, 1, 0));
    }
}
