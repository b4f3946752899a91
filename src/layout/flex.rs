//! Flex: Single-line flexbox distribution.
//!
//! Given a container's resolved size and its children's styles, compute each
//! child's parent-relative rectangle.
//!
//! # Algorithm
//!
//! 1. **Size**: main size is explicit or intrinsic; cross size is explicit,
//!    else the container's cross size under `stretch`, else intrinsic
//! 2. **Justify**: distribute free main-axis space per `justify_content`
//! 3. **Align**: offset each child on the cross axis per `align_items`
//!
//! All arithmetic is integer. Remainders from uneven gaps are spread by
//! rounding each offset down, so gaps differ by at most one cell.

use super::node::{AlignItems, FlexDirection, JustifyContent, LayoutStyle};
use super::rect::Rect;

/// Intrinsic size used for unset dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intrinsic {
    /// Default width in columns.
    pub width: u16,
    /// Default height in rows.
    pub height: u16,
}

/// Resolve the size of a node that has no parent constraints.
pub fn root_size(style: &LayoutStyle, intrinsic: Intrinsic) -> (u16, u16) {
    (
        style.width.unwrap_or(intrinsic.width),
        style.height.unwrap_or(intrinsic.height),
    )
}

/// Place `children` inside a `width` x `height` container styled `container`.
///
/// Returned rectangles are relative to the container and parallel `children`.
pub fn place_children(
    container: &LayoutStyle,
    width: u16,
    height: u16,
    children: &[LayoutStyle],
    intrinsic: Intrinsic,
) -> Vec<Rect> {
    let row = container.flex_direction == FlexDirection::Row;
    let (container_main, container_cross) = if row { (width, height) } else { (height, width) };

    // (main, cross) per child.
    let sizes: Vec<(u16, u16)> = children
        .iter()
        .map(|child| {
            let (main, cross, intrinsic_main, intrinsic_cross) = if row {
                (child.width, child.height, intrinsic.width, intrinsic.height)
            } else {
                (child.height, child.width, intrinsic.height, intrinsic.width)
            };
            let cross = match (cross, container.align_items) {
                (Some(explicit), _) => explicit,
                (None, AlignItems::Stretch) => container_cross,
                (None, _) => intrinsic_cross,
            };
            (main.unwrap_or(intrinsic_main), cross)
        })
        .collect();

    let main_offsets = justify(
        container.justify_content,
        container_main,
        &sizes.iter().map(|&(main, _)| main).collect::<Vec<_>>(),
    );

    sizes
        .iter()
        .zip(main_offsets)
        .map(|(&(main, cross), main_pos)| {
            let cross_pos = align(container.align_items, container_cross, cross);
            if row {
                Rect::new(main_pos, cross_pos, main, cross)
            } else {
                Rect::new(cross_pos, main_pos, cross, main)
            }
        })
        .collect()
}

/// Main-axis offsets of items with sizes `sizes` in a line of `available` cells.
#[allow(clippy::cast_possible_wrap)]
fn justify(policy: JustifyContent, available: u16, sizes: &[u16]) -> Vec<i32> {
    let n = sizes.len() as i64;
    let total: i64 = sizes.iter().map(|&s| i64::from(s)).sum();
    let free = i64::from(available) - total;

    // Space-* need at least two items and room to distribute.
    let policy = match policy {
        JustifyContent::SpaceBetween | JustifyContent::SpaceAround if n < 2 || free <= 0 => {
            JustifyContent::Start
        }
        other => other,
    };

    let mut offsets = Vec::with_capacity(sizes.len());
    let mut cursor = 0i64;
    for (i, &size) in sizes.iter().enumerate() {
        let i = i as i64;
        let extra = match policy {
            JustifyContent::Start => 0,
            JustifyContent::Center => free / 2,
            JustifyContent::End => free,
            JustifyContent::SpaceBetween => free * i / (n - 1),
            JustifyContent::SpaceAround => free * (2 * i + 1) / (2 * n),
        };
        offsets.push(clamp_i32(cursor + extra));
        cursor += i64::from(size);
    }
    offsets
}

/// Cross-axis offset of an item `size` cells long in a line `available` wide.
fn align(policy: AlignItems, available: u16, size: u16) -> i32 {
    let free = i32::from(available) - i32::from(size);
    match policy {
        AlignItems::Start | AlignItems::Stretch => 0,
        AlignItems::Center => free / 2,
        AlignItems::End => free,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn clamp_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTRINSIC: Intrinsic = Intrinsic {
        width: 100,
        height: 100,
    };

    fn row(justify: JustifyContent) -> LayoutStyle {
        LayoutStyle::new()
            .with_direction(FlexDirection::Row)
            .with_justify(justify)
    }

    fn sized(width: u16, height: u16) -> LayoutStyle {
        LayoutStyle::new().with_size(width, height)
    }

    #[test]
    fn test_row_start() {
        let rects = place_children(
            &row(JustifyContent::Start),
            30,
            4,
            &[sized(5, 1), sized(7, 1)],
            INTRINSIC,
        );
        assert_eq!(rects, vec![Rect::new(0, 0, 5, 1), Rect::new(5, 0, 7, 1)]);
    }

    #[test]
    fn test_column_center_and_end() {
        let column = LayoutStyle::new().with_justify(JustifyContent::Center);
        let rects = place_children(&column, 10, 10, &[sized(10, 4)], INTRINSIC);
        assert_eq!(rects[0].y, 3);

        let column = LayoutStyle::new().with_justify(JustifyContent::End);
        let rects = place_children(&column, 10, 10, &[sized(10, 4)], INTRINSIC);
        assert_eq!(rects[0].y, 6);
    }

    #[test]
    fn test_space_between() {
        let rects = place_children(
            &row(JustifyContent::SpaceBetween),
            20,
            1,
            &[sized(4, 1), sized(4, 1), sized(4, 1)],
            INTRINSIC,
        );
        let xs: Vec<i32> = rects.iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![0, 8, 16]);
    }

    #[test]
    fn test_space_between_single_child_at_start() {
        let rects = place_children(
            &row(JustifyContent::SpaceBetween),
            20,
            1,
            &[sized(4, 1)],
            INTRINSIC,
        );
        assert_eq!(rects[0].x, 0);
    }

    #[test]
    fn test_space_around() {
        let rects = place_children(
            &row(JustifyContent::SpaceAround),
            20,
            1,
            &[sized(4, 1), sized(4, 1)],
            INTRINSIC,
        );
        // 12 free cells: 3 before, 6 between, 3 after.
        assert_eq!(rects[0].x, 3);
        assert_eq!(rects[1].x, 13);
    }

    #[test]
    fn test_overflow_degrades_space_to_start() {
        let rects = place_children(
            &row(JustifyContent::SpaceAround),
            6,
            1,
            &[sized(4, 1), sized(4, 1)],
            INTRINSIC,
        );
        assert_eq!(rects[0].x, 0);
        assert_eq!(rects[1].x, 4);
    }

    #[test]
    fn test_stretch_fills_cross_axis() {
        let rects = place_children(
            &LayoutStyle::new(),
            40,
            20,
            &[LayoutStyle::new().with_height(3)],
            INTRINSIC,
        );
        assert_eq!(rects[0], Rect::new(0, 0, 40, 3));
    }

    #[test]
    fn test_explicit_cross_size_wins_over_stretch() {
        let rects = place_children(&LayoutStyle::new(), 40, 20, &[sized(10, 3)], INTRINSIC);
        assert_eq!(rects[0].width, 10);
    }

    #[test]
    fn test_align_center_and_end() {
        let container = row(JustifyContent::Start).with_align(AlignItems::Center);
        let rects = place_children(&container, 20, 9, &[sized(4, 3)], INTRINSIC);
        assert_eq!(rects[0].y, 3);

        let container = row(JustifyContent::Start).with_align(AlignItems::End);
        let rects = place_children(&container, 20, 9, &[sized(4, 3)], INTRINSIC);
        assert_eq!(rects[0].y, 6);
    }

    #[test]
    fn test_unset_main_size_uses_intrinsic() {
        let small = Intrinsic { width: 7, height: 2 };
        let container = row(JustifyContent::Start).with_align(AlignItems::Start);
        let rects = place_children(&container, 50, 10, &[LayoutStyle::new()], small);
        assert_eq!(rects[0], Rect::new(0, 0, 7, 2));
    }
}
