//! Splitting an ordered sequence across sections.

use crate::models::{FillMode, LayoutConfig, Slot};

/// Ordered slices, one per section, plus whatever was not handed out.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Distribution {
    /// One slice per section, in section order (possibly empty)
    pub buckets: Vec<Vec<Slot>>,
    /// Tail of the sequence that no section received
    pub remainder: Vec<Slot>,
}

/// Splits `slots` across `config.sections` buckets using the configured fill mode.
pub fn distribute(slots: Vec<Slot>, config: &LayoutConfig) -> Distribution {
    match config.fill_mode {
        FillMode::Contiguous => contiguous(slots, config.sections, config.section_capacity()),
        FillMode::Spread => spread(slots, config.sections),
    }
}

/// Fills sections strictly left to right, `capacity` slots each.
///
/// A section only receives anything once every earlier section is full.
pub fn contiguous(slots: Vec<Slot>, sections: usize, capacity: usize) -> Distribution {
    let mut rest = slots.into_iter();
    let buckets = (0..sections)
        .map(|_| rest.by_ref().take(capacity).collect())
        .collect();
    Distribution {
        buckets,
        remainder: rest.collect(),
    }
}

/// Sizes of the spread buckets: the first `total % sections` get one extra.
pub fn spread_sizes(total: usize, sections: usize) -> Vec<usize> {
    if sections == 0 {
        return Vec::new();
    }
    let base = total / sections;
    let remainder = total % sections;
    (0..sections)
        .map(|idx| base + usize::from(idx < remainder))
        .collect()
}

/// Splits the whole sequence into near-equal contiguous slices.
///
/// Slices may be larger than a section's capacity; the grid assigner reports
/// the excess.
pub fn spread(slots: Vec<Slot>, sections: usize) -> Distribution {
    let sizes = spread_sizes(slots.len(), sections);
    let mut rest = slots.into_iter();
    let buckets = sizes
        .into_iter()
        .map(|size| rest.by_ref().take(size).collect())
        .collect();
    Distribution {
        buckets,
        remainder: rest.collect(),
    }
}
