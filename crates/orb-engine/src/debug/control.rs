/// Range and step of a tunable value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ControlSpec {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    /// Display name; the field name is used when `None`.
    pub label: Option<&'static str>,
}

impl ControlSpec {
    pub const fn new(min: f32, max: f32, step: f32) -> Self {
        Self {
            min,
            max,
            step,
            label: None,
        }
    }

    pub const fn labeled(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    /// Moves `value` by `steps` increments, clamped to `[min, max]`.
    pub fn apply(&self, value: f32, steps: i32) -> f32 {
        (value + steps as f32 * self.step).clamp(self.min, self.max)
    }
}

/// A keyboard edit targeting one control.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ControlEdit {
    pub folder: super::FolderId,
    pub field: &'static str,
    pub spec: ControlSpec,
    /// Signed number of steps; `Shift` multiplies by 10.
    pub steps: i32,
}

impl ControlEdit {
    pub fn apply(&self, value: f32) -> f32 {
        self.spec.apply(value, self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_steps_and_clamps() {
        let spec = ControlSpec::new(0.0, 1.0, 0.25);
        assert_eq!(spec.apply(0.5, 1), 0.75);
        assert_eq!(spec.apply(0.5, -1), 0.25);
        assert_eq!(spec.apply(0.5, 10), 1.0);
        assert_eq!(spec.apply(0.5, -10), 0.0);
    }

    #[test]
    fn clamps_out_of_range_start() {
        let spec = ControlSpec::new(0.0, 0.001, 0.000001);
        assert_eq!(spec.apply(0.5, 0), 0.001);
    }
}
