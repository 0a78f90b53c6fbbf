//! Circular drag input: maps a pointer position around a dial to a value.

use serde::Serialize;

/// Which body metric the dial edits during onboarding.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    Weight,
    Height,
}

impl MetricKind {
    pub fn scale(&self) -> RadialScale {
        match self {
            MetricKind::Weight => RadialScale::new(30, 150),
            MetricKind::Height => RadialScale::new(130, 220),
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MetricKind::Weight => "kg",
            MetricKind::Height => "cm",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MetricKind::Weight => "Ağırlık",
            MetricKind::Height => "Boy",
        }
    }

    /// Render state of this metric's dial showing `value`.
    pub fn dial(&self, value: i32, center: (f64, f64), radius: f64) -> MetricDial {
        let scale = self.scale();
        let value = value.clamp(scale.min, scale.max);
        MetricDial {
            kind: *self,
            label: self.label(),
            unit: self.unit(),
            value,
            min: scale.min,
            max: scale.max,
            handle: scale.handle_position(value, center, radius),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricDial {
    pub kind: MetricKind,
    pub label: &'static str,
    pub unit: &'static str,
    pub value: i32,
    pub min: i32,
    pub max: i32,
    /// Knob center in the dial's coordinate space.
    pub handle: (f64, f64),
}

/// A full turn of the dial covers `min..=max`, with 0° at twelve o'clock
/// increasing clockwise (screen coordinates, y pointing down).
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RadialScale {
    pub min: i32,
    pub max: i32,
}

impl RadialScale {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    fn range(&self) -> f64 {
        f64::from(self.max - self.min)
    }

    /// Dial angle in degrees `[0, 360)` of `value`.
    pub fn angle_of(&self, value: i32) -> f64 {
        if self.max == self.min {
            return 0.0;
        }
        f64::from(value - self.min) / self.range() * 360.0
    }

    /// Value under `pointer`, or `None` when the move is rejected.
    ///
    /// A move more than 180° away from the current value's angle is dropped
    /// instead of wrapped, so dragging across twelve o'clock cannot jump
    /// between the two ends of the scale.
    pub fn value_for_pointer(
        &self,
        current: i32,
        pointer: (f64, f64),
        center: (f64, f64),
    ) -> Option<i32> {
        let (dx, dy) = (pointer.0 - center.0, pointer.1 - center.1);
        let mut angle = dy.atan2(dx).to_degrees() + 90.0;
        if angle < 0.0 {
            angle += 360.0;
        }

        if (angle - self.angle_of(current)).abs() > 180.0 {
            return None;
        }

        let value = (angle / 360.0 * self.range()).round() as i32 + self.min;
        Some(value.clamp(self.min, self.max))
    }

    /// Where to draw the knob for `value` on a dial of `radius`.
    pub fn handle_position(&self, value: i32, center: (f64, f64), radius: f64) -> (f64, f64) {
        let radians = (self.angle_of(value) - 90.0).to_radians();
        (
            center.0 + radius * radians.cos(),
            center.1 + radius * radians.sin(),
        )
    }
}
