// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::Buffer;

/// How the span between mark and cursor is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RegionType {
    #[default]
    None,
    /// Character wise, used by emacs mark and vi `v`.
    Char,
    /// Whole lines, used by vi `V`.
    Line,
}

impl Buffer {
    /// The span covered by the region, or `None` when no region is active or no mark
    /// is set. A [`RegionType::Char`] region runs from the smaller of mark and cursor up
    /// to (not including) the larger one; with `inclusive` the char under the larger
    /// position is included too, as vi visual mode does. A [`RegionType::Line`] region
    /// grows to whole lines, including the newline that ends the last one.
    #[must_use]
    pub fn region_bounds(&self, region_type: RegionType, inclusive: bool) -> Option<Range<usize>> {
        let mark = self.mark()?;
        let (lo, hi) = if mark <= self.cursor() {
            (mark, self.cursor())
        } else {
            (self.cursor(), mark)
        };
        match region_type {
            RegionType::None => None,
            RegionType::Char => {
                let end = if inclusive { (hi + 1).min(self.len()) } else { hi };
                Some(lo..end)
            }
            RegionType::Line => Some(self.line_span(lo, hi)),
        }
    }

    /// Whole lines covering `lo..=hi`. The trailing newline is part of the span; for
    /// the last line, the newline before it is taken instead so that deleting the span
    /// leaves no empty line behind.
    #[must_use]
    pub fn line_span(&self, lo: usize, hi: usize) -> Range<usize> {
        let start = self.line_start(lo);
        let end = self.line_end(hi);
        if end < self.len() {
            start..end + 1
        } else if start > 0 {
            start - 1..end
        } else {
            start..end
        }
    }
}
