//! Pattern catalog
//!
//! A static table of vibration patterns, each tagged with the actuator
//! weight class it was tuned for. The index of an entry in the table is its
//! public pattern identifier, so entries must never be reordered once
//! deployed.

mod patterns;

pub use patterns::DEFAULT_PATTERNS;

/// One step of a vibration timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PatternStep {
    /// Drive strength, 0-100 % of full scale
    pub intensity_percent: u8,
    /// How long the step is held
    pub duration_ms: u16,
}

impl PatternStep {
    pub const fn new(intensity_percent: u8, duration_ms: u16) -> Self {
        Self {
            intensity_percent,
            duration_ms,
        }
    }
}

/// A catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PatternEntry {
    /// Actuator weight class (grams) this pattern is compatible with
    pub weight_class: u8,
    /// Ordered timeline
    pub steps: &'static [PatternStep],
}

impl PatternEntry {
    /// Total length of one pass through the timeline
    pub fn pass_duration_ms(&self) -> u32 {
        self.steps.iter().map(|s| u32::from(s.duration_ms)).sum()
    }
}

/// Read-only view over a pattern table
///
/// Identifiers are `u8`, so only the first 256 entries are addressable.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    entries: &'static [PatternEntry],
}

impl Catalog {
    /// Catalog over the built-in pattern table
    pub const DEFAULT: Catalog = Catalog::new(DEFAULT_PATTERNS);

    pub const fn new(entries: &'static [PatternEntry]) -> Self {
        Self { entries }
    }

    /// Look up a pattern by identifier
    pub fn get(&self, id: u8) -> Option<&'static PatternEntry> {
        self.entries.get(usize::from(id))
    }

    /// Identifiers of all patterns for a weight class, in catalog order
    pub fn matching(&self, weight_class: u8) -> impl Iterator<Item = u8> + '_ {
        self.entries
            .iter()
            .take(usize::from(u8::MAX) + 1)
            .enumerate()
            .filter(move |(_, e)| e.weight_class == weight_class)
            .map(|(i, _)| i as u8)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::DEFAULT
    }
}
