//! Count-up animation for the home page statistics.

/// Interval between animation frames.
pub const TICK_MS: u64 = 16;

/// Share of the element that must be on screen before the animation starts.
pub const VISIBILITY_THRESHOLD: f64 = 0.5;

/// Fixed-step count from zero up to `target`.
///
/// The step is `ceil(target / (duration / TICK_MS))`, so the count reaches the
/// target in about `duration` milliseconds. Values never pass the target.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: u64,
    step: u64,
    value: u64,
}

impl CounterAnimation {
    pub fn new(target: u64, duration_ms: u64) -> Self {
        let frames = duration_ms as f64 / TICK_MS as f64;
        let step = if frames >= 1.0 {
            (target as f64 / frames).ceil() as u64
        } else {
            target
        };
        Self {
            target,
            step: step.max(1),
            value: 0,
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn is_finished(&self) -> bool {
        self.value >= self.target
    }

    /// Advance one frame and return the new value.
    pub fn tick(&mut self) -> u64 {
        self.value = self.value.saturating_add(self.step).min(self.target);
        self.value
    }
}

impl Iterator for CounterAnimation {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.is_finished() {
            None
        } else {
            Some(self.tick())
        }
    }
}

/// Fires once, the first time the observed element is visible enough.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibilityTrigger {
    fired: bool,
}

impl VisibilityTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed an intersection ratio. Returns true exactly once.
    pub fn observe(&mut self, ratio: f64) -> bool {
        if self.fired || ratio < VISIBILITY_THRESHOLD {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Group thousands with commas: `1240` → `"1,240"`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_and_frames() {
        let animation = CounterAnimation::new(1240, 1800);
        // 1800 / 16 = 112.5 frames, 1240 / 112.5 = 11.02.. -> 12
        assert_eq!(animation.step(), 12);

        let values: Vec<u64> = animation.collect();
        assert_eq!(values.len(), 104);
        assert_eq!(values.first(), Some(&12));
        assert_eq!(values.last(), Some(&1240));
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_small_target_clamps() {
        let mut animation = CounterAnimation::new(38, 1800);
        assert_eq!(animation.step(), 1);
        let last = animation.by_ref().last();
        assert_eq!(last, Some(38));
        assert!(animation.is_finished());
        assert_eq!(animation.tick(), 38);
    }

    #[test]
    fn test_zero_target_and_zero_duration() {
        assert_eq!(CounterAnimation::new(0, 1800).count(), 0);
        let values: Vec<u64> = CounterAnimation::new(412, 0).collect();
        assert_eq!(values, vec![412]);
    }

    #[test]
    fn test_trigger_fires_once() {
        let mut trigger = VisibilityTrigger::new();
        assert!(!trigger.observe(0.2));
        assert!(trigger.observe(0.5));
        assert!(!trigger.observe(1.0));
        assert!(trigger.has_fired());
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(412), "412");
        assert_eq!(format_count(1240), "1,240");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }
}
