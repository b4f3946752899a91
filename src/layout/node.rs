//! Layout node styles: sizing and flex alignment rules.
//!
//! Names parse the way CSS spells them. Unrecognised names never fail; they
//! resolve to the flex-start / column behaviour.

use std::convert::Infallible;
use std::str::FromStr;

/// Main axis of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FlexDirection {
    /// Children laid out left to right.
    Row,
    /// Children laid out top to bottom.
    #[default]
    Column,
}

impl FromStr for FlexDirection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "row" { Self::Row } else { Self::Column })
    }
}

/// Spacing of children along the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JustifyContent {
    /// Packed at the start.
    #[default]
    Start,
    /// Packed in the middle.
    Center,
    /// Packed at the end.
    End,
    /// First child at the start, last at the end, equal gaps between.
    SpaceBetween,
    /// Equal space around every child.
    SpaceAround,
}

impl FromStr for JustifyContent {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "center" => Self::Center,
            "flex-end" | "end" => Self::End,
            "space-between" => Self::SpaceBetween,
            "space-around" => Self::SpaceAround,
            _ => Self::Start,
        })
    }
}

/// Placement of children along the cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlignItems {
    /// Aligned to the cross-axis start.
    Start,
    /// Centered on the cross axis.
    Center,
    /// Aligned to the cross-axis end.
    End,
    /// Children without an explicit cross size fill the container.
    #[default]
    Stretch,
}

impl FromStr for AlignItems {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "center" => Self::Center,
            "flex-end" | "end" => Self::End,
            "stretch" => Self::Stretch,
            _ => Self::Start,
        })
    }
}

/// Sizing and alignment rules for one layout node.
///
/// Unset dimensions resolve to the engine's intrinsic size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayoutStyle {
    /// Explicit width in columns.
    pub width: Option<u16>,
    /// Explicit height in rows.
    pub height: Option<u16>,
    /// Main axis for children.
    pub flex_direction: FlexDirection,
    /// Main-axis spacing of children.
    pub justify_content: JustifyContent,
    /// Cross-axis placement of children.
    pub align_items: AlignItems,
}

impl LayoutStyle {
    /// Default style: intrinsic size, column, start, stretch.
    pub const fn new() -> Self {
        Self {
            width: None,
            height: None,
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Start,
            align_items: AlignItems::Stretch,
        }
    }

    /// Set an explicit width (builder pattern).
    #[must_use]
    pub const fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Set an explicit height (builder pattern).
    #[must_use]
    pub const fn with_height(mut self, height: u16) -> Self {
        self.height = Some(height);
        self
    }

    /// Set an explicit size (builder pattern).
    #[must_use]
    pub const fn with_size(self, width: u16, height: u16) -> Self {
        self.with_width(width).with_height(height)
    }

    /// Set the flex direction (builder pattern).
    #[must_use]
    pub const fn with_direction(mut self, direction: FlexDirection) -> Self {
        self.flex_direction = direction;
        self
    }

    /// Set the main-axis spacing (builder pattern).
    #[must_use]
    pub const fn with_justify(mut self, justify: JustifyContent) -> Self {
        self.justify_content = justify;
        self
    }

    /// Set the cross-axis alignment (builder pattern).
    #[must_use]
    pub const fn with_align(mut self, align: AlignItems) -> Self {
        self.align_items = align;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("row".parse::<FlexDirection>().unwrap(), FlexDirection::Row);
        assert_eq!("diagonal".parse::<FlexDirection>().unwrap(), FlexDirection::Column);
        assert_eq!(
            "space-between".parse::<JustifyContent>().unwrap(),
            JustifyContent::SpaceBetween
        );
        assert_eq!("flex-end".parse::<JustifyContent>().unwrap(), JustifyContent::End);
        assert_eq!("stretch".parse::<AlignItems>().unwrap(), AlignItems::Stretch);
        assert_eq!("baseline".parse::<AlignItems>().unwrap(), AlignItems::Start);
    }

    #[test]
    fn test_defaults() {
        let style = LayoutStyle::default();
        assert_eq!(style, LayoutStyle::new());
        assert_eq!(style.align_items, AlignItems::Stretch);
        assert_eq!(style.width, None);
    }
}
