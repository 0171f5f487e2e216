/// How a brightness command relates to the light's current brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Replace the current value.
    Set(u8),
    /// Add to the current value, saturating at 255.
    IncreaseBy(u8),
    /// Subtract from the current value, never going below 1.
    DecreaseBy(u8),
}

impl Transform {
    pub const MIN: u8 = 1;

    /// Computes the new brightness for a light currently at `current`.
    ///
    /// Relative changes are clamped to `[1, 255]` so that dimming never turns
    /// a light off and brightening never wraps around. `Set` passes its
    /// operand through untouched.
    pub fn apply(self, current: u8) -> u8 {
        match self {
            Transform::Set(val) => val,
            Transform::IncreaseBy(val) => current.saturating_add(val),
            Transform::DecreaseBy(val) => current.saturating_sub(val).max(Self::MIN),
        }
    }

    /// Picks the transform matching the `--inc` / `--dec` flags.
    pub fn from_flags(value: u8, increase: bool, decrease: bool) -> Self {
        match (increase, decrease) {
            (true, _) => Transform::IncreaseBy(value),
            (_, true) => Transform::DecreaseBy(value),
            _ => Transform::Set(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_pairs() -> impl Iterator<Item = (u8, u8)> {
        (0..=u8::MAX).flat_map(|a| (0..=u8::MAX).map(move |b| (a, b)))
    }

    #[test]
    fn increase_never_exceeds_max() {
        for (a, b) in all_pairs() {
            let res = Transform::IncreaseBy(a).apply(b);
            assert!(res >= b, "increase({}) on {} went down to {}", a, b, res);
            assert_eq!(res as u16, (a as u16 + b as u16).min(255));
        }
    }

    #[test]
    fn decrease_never_below_one() {
        for (a, b) in all_pairs() {
            let res = Transform::DecreaseBy(a).apply(b);
            assert!(res >= 1, "decrease({}) on {} gave {}", a, b, res);
            if a >= b {
                assert_eq!(res, 1);
            } else {
                assert_eq!(res, b - a);
            }
        }
    }

    #[test]
    fn increase_by_zero_is_identity() {
        for b in 0..=u8::MAX {
            assert_eq!(Transform::IncreaseBy(0).apply(b), b);
        }
    }

    #[test]
    fn set_ignores_current() {
        for (a, b) in all_pairs() {
            assert_eq!(Transform::Set(a).apply(b), a);
        }
    }

    #[test]
    fn concrete_cases() {
        assert_eq!(Transform::IncreaseBy(10).apply(250), 255);
        assert_eq!(Transform::DecreaseBy(50).apply(30), 1);
        assert_eq!(Transform::DecreaseBy(10).apply(100), 90);
        assert_eq!(Transform::Set(200).apply(17), 200);
    }

    #[test]
    fn flags_select_mode() {
        assert_eq!(Transform::from_flags(5, false, false), Transform::Set(5));
        assert_eq!(Transform::from_flags(5, true, false), Transform::IncreaseBy(5));
        assert_eq!(Transform::from_flags(5, false, true), Transform::DecreaseBy(5));
    }
}
