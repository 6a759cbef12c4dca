use crate::model::ConveyorSide;
use thiserror::Error;

pub const LINE_HEIGHT: u32 = 40;
pub const CURVES_WIDTH: u32 = 80;
pub const LINES_SPACING: u32 = 100;
pub const NAV_BUTTON_WIDTH: u32 = 40;
pub const ZOOM_HANDLE_WIDTH: u32 = 55;
pub const ZOOM_HANDLE_HEIGHT: u32 = 40;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid argument: bucket count must be positive")]
    NoBuckets,
    #[error("invalid argument: {available}px cannot give {buckets} buckets one pixel each")]
    TooNarrow { available: i64, buckets: usize },
    #[error("invalid argument: a {width}px wide carousel does not fit the drawing surface")]
    TooWide { width: u32 },
}

/// Integer pixel widths of the buckets of one line, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePartition {
    widths: Vec<u32>,
}

impl LinePartition {
    /// Splits `available_width` over `bucket_count` buckets so that the widths
    /// sum exactly to the available width. The rounding remainder goes to the
    /// leading buckets, one extra pixel each.
    pub fn new(available_width: i64, bucket_count: usize) -> Result<Self, LayoutError> {
        if bucket_count == 0 {
            return Err(LayoutError::NoBuckets);
        }
        if available_width < bucket_count as i64 {
            return Err(LayoutError::TooNarrow {
                available: available_width,
                buckets: bucket_count,
            });
        }

        let count = bucket_count as i64;
        let base = available_width / count;
        let remainder = (available_width - base * count) as usize;

        let widths = (0..bucket_count)
            .map(|i| {
                let extra = if i < remainder { 1 } else { 0 };
                (base + extra) as u32
            })
            .collect();

        Ok(Self { widths })
    }

    pub fn widths(&self) -> &[u32] {
        &self.widths
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.widths.iter().sum()
    }

    /// Index of the bucket that closes the line (drawn with a right border).
    pub fn last_index(&self) -> usize {
        self.widths.len() - 1
    }

    pub fn is_last(&self, index: usize) -> bool {
        index == self.last_index()
    }

    /// Left edge of every bucket relative to the start of the line.
    pub fn offsets(&self) -> impl Iterator<Item = u32> + '_ {
        self.widths.iter().scan(0, |x, w| {
            let left = *x;
            *x += w;
            Some(left)
        })
    }
}

/// Bucket counts of the two lines: the back line takes the extra bucket when
/// the ring size is odd.
pub fn line_counts(nb_buckets: usize) -> (usize, usize) {
    let front = nb_buckets / 2;
    (front, nb_buckets - front)
}

/// Where a ring slot is shown: its line and its index from the left.
///
/// Ring order runs along the front line left to right, then back along the
/// back line right to left, closing the loop through the end caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub side: ConveyorSide,
    pub index: usize,
}

pub fn placement(slot: usize, nb_buckets: usize) -> Option<Placement> {
    let (front, back) = line_counts(nb_buckets);
    if slot < front {
        Some(Placement {
            side: ConveyorSide::Front,
            index: slot,
        })
    } else if slot < nb_buckets {
        Some(Placement {
            side: ConveyorSide::Back,
            index: back - 1 - (slot - front),
        })
    } else {
        None
    }
}

pub fn slot_at(placement: Placement, nb_buckets: usize) -> Option<usize> {
    let (front, back) = line_counts(nb_buckets);
    match placement.side {
        ConveyorSide::Front if placement.index < front => Some(placement.index),
        ConveyorSide::Back if placement.index < back => Some(front + back - 1 - placement.index),
        _ => None,
    }
}

/// Pixel geometry of a whole carousel synoptic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselLayout {
    pub width: u32,
    pub height: u32,
    pub nb_buckets: usize,
    /// Visible width of the scroll area, one page of the synoptic.
    pub synoptic_width: u32,
    /// Width available to each line of buckets.
    pub buckets_width: u32,
    pub front: Option<LinePartition>,
    pub back: LinePartition,
}

impl CarouselLayout {
    pub fn new(width: u32, height: u32, nb_buckets: usize) -> Result<Self, LayoutError> {
        if nb_buckets == 0 {
            return Err(LayoutError::NoBuckets);
        }

        let synoptic_width = i64::from(width) - i64::from(NAV_BUTTON_WIDTH);
        let buckets_width = 2 * synoptic_width - 2 * i64::from(CURVES_WIDTH);
        // Scene coordinates are i32, the two-page content must fit in them.
        if i32::try_from(2 * synoptic_width).is_err() {
            return Err(LayoutError::TooWide { width });
        }

        let (front_count, back_count) = line_counts(nb_buckets);
        let back = LinePartition::new(buckets_width, back_count)?;
        // A single-bucket ring has an empty front line.
        let front = (front_count > 0)
            .then(|| LinePartition::new(buckets_width, front_count))
            .transpose()?;

        log::debug!(
            "carousel layout: {} buckets, {}px per line ({} front / {} back)",
            nb_buckets,
            buckets_width,
            front_count,
            back_count
        );

        let too_wide = |_| LayoutError::TooWide { width };
        Ok(Self {
            width,
            height,
            nb_buckets,
            synoptic_width: u32::try_from(synoptic_width).map_err(too_wide)?,
            buckets_width: u32::try_from(buckets_width).map_err(too_wide)?,
            front,
            back,
        })
    }

    pub fn line(&self, side: ConveyorSide) -> Option<&LinePartition> {
        match side {
            ConveyorSide::Front => self.front.as_ref(),
            ConveyorSide::Back => Some(&self.back),
        }
    }

    /// Full width of the scrollable content: two pages.
    pub fn content_width(&self) -> u32 {
        2 * self.synoptic_width
    }

    pub fn level_height(&self) -> u32 {
        2 * LINE_HEIGHT + LINES_SPACING
    }

    pub fn line_width(&self) -> u32 {
        self.back.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_distributes_remainder_first() {
        let p = LinePartition::new(10, 4).unwrap();
        assert_eq!(p.widths(), &[3, 3, 2, 2]);
        assert_eq!(p.total(), 10);
        assert_eq!(p.last_index(), 3);
        assert!(p.is_last(3));
        assert!(!p.is_last(0));
    }

    #[test]
    fn test_partition_exact_division() {
        let p = LinePartition::new(1000, 8).unwrap();
        assert!(p.widths().iter().all(|&w| w == 125));
    }

    #[test]
    fn test_partition_sum_and_spread() {
        for count in (1..=1000).step_by(7) {
            for width in (count as i64..=10_000).step_by(97) {
                let p = LinePartition::new(width, count).unwrap();
                assert_eq!(p.len(), count);
                assert_eq!(i64::from(p.total()), width, "width {width}, count {count}");

                let max = p.widths().iter().max().unwrap();
                let min = p.widths().iter().min().unwrap();
                assert!(max - min <= 1);
                assert!(*min >= 1);
            }
        }
    }

    #[test]
    fn test_partition_edges() {
        for count in [1, 2, 999, 1000] {
            for width in [count as i64, count as i64 + 1, 9_999, 10_000] {
                let p = LinePartition::new(width, count).unwrap();
                assert_eq!(i64::from(p.total()), width);
            }
        }
    }

    #[test]
    fn test_partition_is_deterministic() {
        let a = LinePartition::new(1337, 97).unwrap();
        let b = LinePartition::new(1337, 97).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_partition_rejects_invalid_input() {
        assert_eq!(LinePartition::new(100, 0), Err(LayoutError::NoBuckets));
        assert_eq!(
            LinePartition::new(3, 4),
            Err(LayoutError::TooNarrow {
                available: 3,
                buckets: 4
            })
        );
        assert!(LinePartition::new(-20, 4).is_err());
    }

    #[test]
    fn test_offsets() {
        let p = LinePartition::new(10, 4).unwrap();
        assert_eq!(p.offsets().collect::<Vec<_>>(), vec![0, 3, 6, 8]);
    }

    #[test]
    fn test_line_counts() {
        assert_eq!(line_counts(400), (200, 200));
        assert_eq!(line_counts(7), (3, 4));
        assert_eq!(line_counts(1), (0, 1));
    }

    #[test]
    fn test_placement_round_trip() {
        for n in [1, 2, 5, 400] {
            for slot in 0..n {
                let p = placement(slot, n).unwrap();
                assert_eq!(slot_at(p, n), Some(slot));
            }
            assert_eq!(placement(n, n), None);
        }
    }

    #[test]
    fn test_placement_forms_a_loop() {
        // front: slots 0 1 left to right, back: slots 4 3 2 left to right
        assert_eq!(
            placement(1, 5),
            Some(Placement {
                side: ConveyorSide::Front,
                index: 1
            })
        );
        assert_eq!(
            placement(2, 5),
            Some(Placement {
                side: ConveyorSide::Back,
                index: 2
            })
        );
        assert_eq!(
            placement(4, 5),
            Some(Placement {
                side: ConveyorSide::Back,
                index: 0
            })
        );
    }

    #[test]
    fn test_carousel_layout_geometry() {
        let layout = CarouselLayout::new(740, 182, 400).unwrap();
        assert_eq!(layout.synoptic_width, 700);
        assert_eq!(layout.buckets_width, 1240);
        assert_eq!(layout.content_width(), 1400);
        assert_eq!(layout.level_height(), 180);
        assert_eq!(layout.line_width(), 1240);
        assert_eq!(layout.front.as_ref().map(|f| f.total()), Some(1240));
        assert_eq!(layout.back.len(), 200);
    }

    #[test]
    fn test_carousel_layout_odd_ring() {
        let layout = CarouselLayout::new(740, 182, 7).unwrap();
        assert_eq!(layout.line(ConveyorSide::Front).map(|l| l.len()), Some(3));
        assert_eq!(layout.line(ConveyorSide::Back).map(|l| l.len()), Some(4));
    }

    #[test]
    fn test_carousel_layout_rejects_narrow_geometry() {
        assert_eq!(
            CarouselLayout::new(740, 182, 0),
            Err(LayoutError::NoBuckets)
        );
        // 2 * (150 - 40) - 160 = 60 px per line
        assert!(CarouselLayout::new(150, 182, 200).is_err());
        assert!(CarouselLayout::new(100, 182, 4).is_err());
    }

    #[test]
    fn test_carousel_layout_rejects_oversized_geometry() {
        assert_eq!(
            CarouselLayout::new(3_000_000_000, 182, 1),
            Err(LayoutError::TooWide {
                width: 3_000_000_000
            })
        );
        assert_eq!(
            CarouselLayout::new(u32::MAX, 182, 400),
            Err(LayoutError::TooWide { width: u32::MAX })
        );

        // largest width whose content still fits in i32 scene coordinates
        let widest = (i32::MAX as u32) / 2 + NAV_BUTTON_WIDTH;
        let layout = CarouselLayout::new(widest, 182, 2).unwrap();
        assert_eq!(layout.content_width(), (i32::MAX as u32) - 1);
        assert_eq!(
            u64::from(layout.buckets_width),
            2 * u64::from(layout.synoptic_width) - 2 * u64::from(CURVES_WIDTH)
        );
        assert!(CarouselLayout::new(widest + 1, 182, 2).is_err());
    }
}
