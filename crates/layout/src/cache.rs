//! Per-node memoization of layout results.
//!
//! A node is usually asked for its size several times per pass (min-content measure, max-content
//! measure, final layout under a definite size), so the cache keeps one entry for the final layout
//! plus a handful of measurement slots that do not clobber each other.

use crate::interface::{LayoutOutput, RunMode};
use trellis_types::{AvailableSpace, Size};

const MEASURE_SLOTS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq)]
struct CacheEntry<T> {
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
    content: T,
}

impl<T> CacheEntry<T> {
    /// A cached result answers a request when, per axis, the requested known size matches the
    /// cached known size (or the size that was produced), and an axis without a known size was
    /// computed under the same available space.
    fn answers(&self, cached_size: Size<f32>, known: Size<Option<f32>>, available: Size<AvailableSpace>) -> bool {
        (known.width == self.known_dimensions.width || known.width == Some(cached_size.width))
            && (known.height == self.known_dimensions.height || known.height == Some(cached_size.height))
            && (known.width.is_some() || self.available_space.width.is_roughly_equal(available.width))
            && (known.height.is_some() || self.available_space.height.is_roughly_equal(available.height))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cache {
    final_layout_entry: Option<CacheEntry<LayoutOutput>>,
    measure_entries: [Option<CacheEntry<Size<f32>>>; MEASURE_SLOTS],
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

impl Cache {
    pub const fn new() -> Self {
        Self {
            final_layout_entry: None,
            measure_entries: [None; MEASURE_SLOTS],
        }
    }

    /// Slot 0: both axes known. Slots 1-2: only width known, split by whether the height is
    /// measured at min-content. Slots 3-4: same for height. Slots 5-8: nothing known, split by
    /// min-content measuring per axis.
    fn slot(known: Size<Option<f32>>, available: Size<AvailableSpace>) -> usize {
        let min_content = |space: AvailableSpace| usize::from(space == AvailableSpace::MinContent);
        match (known.width.is_some(), known.height.is_some()) {
            (true, true) => 0,
            (true, false) => 1 + min_content(available.height),
            (false, true) => 3 + min_content(available.width),
            (false, false) => 5 + min_content(available.width) * 2 + min_content(available.height),
        }
    }

    pub fn get(
        &self,
        known_dimensions: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
        run_mode: RunMode,
    ) -> Option<LayoutOutput> {
        match run_mode {
            RunMode::PerformLayout => self
                .final_layout_entry
                .filter(|entry| entry.answers(entry.content.size, known_dimensions, available_space))
                .map(|entry| entry.content),
            RunMode::ComputeSize => self
                .measure_entries
                .iter()
                .flatten()
                .find(|entry| entry.answers(entry.content, known_dimensions, available_space))
                .map(|entry| LayoutOutput::from_outer_size(entry.content)),
            RunMode::PerformHiddenLayout => None,
        }
    }

    pub fn store(
        &mut self,
        known_dimensions: Size<Option<f32>>,
        available_space: Size<AvailableSpace>,
        run_mode: RunMode,
        output: LayoutOutput,
    ) {
        match run_mode {
            RunMode::PerformLayout => {
                self.final_layout_entry = Some(CacheEntry {
                    known_dimensions,
                    available_space,
                    content: output,
                });
            }
            RunMode::ComputeSize => {
                let slot = Self::slot(known_dimensions, available_space);
                self.measure_entries[slot] = Some(CacheEntry {
                    known_dimensions,
                    available_space,
                    content: output.size,
                });
            }
            RunMode::PerformHiddenLayout => {}
        }
    }

    pub fn clear(&mut self) {
        self.final_layout_entry = None;
        self.measure_entries = [None; MEASURE_SLOTS];
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.final_layout_entry.is_none() && self.measure_entries.iter().all(Option::is_none)
    }
}
