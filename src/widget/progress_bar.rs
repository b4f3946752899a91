//! Progress Bar: Horizontal percentage indicator.
//!
//! The bar fills `floor(width * value / 100)` cells with the fill color and
//! the rest with the unfilled color. A centered `NN%` label is overlaid when
//! the bar is wider than five cells.

/// Value and label state of a `ProgressBar` component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressState {
    /// Progress in percent, always within `0.0..=100.0`.
    value: f64,
    /// Whether the percentage label is drawn.
    show_label: bool,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::new(0.0, true)
    }
}

impl ProgressState {
    /// Minimum bar width (exclusive) for the label to be drawn.
    pub const LABEL_MIN_WIDTH: u16 = 5;

    /// Create a progress state; `value` is clamped.
    pub fn new(value: f64, show_label: bool) -> Self {
        Self {
            value: clamp_percent(value),
            show_label,
        }
    }

    /// Current progress in percent.
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Set the progress, clamped to `0..=100`. `NaN` reads as zero.
    pub fn set_value(&mut self, value: f64) {
        self.value = clamp_percent(value);
    }

    /// Whether the label is drawn.
    pub const fn show_label(&self) -> bool {
        self.show_label
    }

    /// Enable or disable the label.
    pub fn set_show_label(&mut self, show: bool) {
        self.show_label = show;
    }

    /// Number of filled cells in a bar `width` cells wide.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn filled_width(&self, width: u16) -> u16 {
        (f64::from(width) * self.value / 100.0).floor() as u16
    }

    /// The label text (`"42%"`), or `None` when it should not be drawn.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn label(&self, width: u16) -> Option<String> {
        (self.show_label && width > Self::LABEL_MIN_WIDTH)
            .then(|| format!("{}%", self.value.round() as u8))
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_is_clamped() {
        let mut progress = ProgressState::default();
        progress.set_value(150.0);
        assert!((progress.value() - 100.0).abs() < f64::EPSILON);
        progress.set_value(-5.0);
        assert!(progress.value().abs() < f64::EPSILON);
        progress.set_value(f64::NAN);
        assert!(progress.value().abs() < f64::EPSILON);

        let progress = ProgressState::new(250.0, true);
        assert!((progress.value() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_filled_width_floors() {
        let progress = ProgressState::new(33.0, true);
        assert_eq!(progress.filled_width(10), 3);
        assert_eq!(ProgressState::new(100.0, true).filled_width(7), 7);
        assert_eq!(ProgressState::new(0.0, true).filled_width(7), 0);
    }

    #[test]
    fn test_label_rules() {
        let progress = ProgressState::new(42.6, true);
        assert_eq!(progress.label(20).as_deref(), Some("43%"));
        assert_eq!(progress.label(5), None);
        assert_eq!(ProgressState::new(42.6, false).label(20), None);
    }
}
