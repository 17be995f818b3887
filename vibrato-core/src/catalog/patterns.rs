//! Built-in pattern table
//!
//! Weight classes are actuator masses in grams as measured on the test rig.

use super::{PatternEntry, PatternStep};

const SINGLE_PULSE: &[PatternStep] = &[PatternStep::new(80, 500)];

const TRIPLE_TAP: &[PatternStep] = &[
    PatternStep::new(100, 200),
    PatternStep::new(0, 200),
    PatternStep::new(100, 200),
];

const DOUBLE_SOFT: &[PatternStep] = &[PatternStep::new(50, 300), PatternStep::new(50, 300)];

const SWELL: &[PatternStep] = &[PatternStep::new(70, 400), PatternStep::new(30, 400)];

const STEADY: &[PatternStep] = &[PatternStep::new(60, 1000)];

const HEARTBEAT: &[PatternStep] = &[
    PatternStep::new(100, 150),
    PatternStep::new(0, 100),
    PatternStep::new(100, 150),
    PatternStep::new(0, 600),
];

const RAMP: &[PatternStep] = &[
    PatternStep::new(30, 250),
    PatternStep::new(60, 250),
    PatternStep::new(90, 250),
    PatternStep::new(60, 250),
];

const BUZZ: &[PatternStep] = &[PatternStep::new(100, 100), PatternStep::new(0, 100)];

/// Built-in catalog; the index is the pattern identifier
pub const DEFAULT_PATTERNS: &[PatternEntry] = &[
    PatternEntry {
        weight_class: 60,
        steps: SINGLE_PULSE,
    },
    PatternEntry {
        weight_class: 40,
        steps: TRIPLE_TAP,
    },
    PatternEntry {
        weight_class: 60,
        steps: DOUBLE_SOFT,
    },
    PatternEntry {
        weight_class: 100,
        steps: SWELL,
    },
    PatternEntry {
        weight_class: 40,
        steps: STEADY,
    },
    PatternEntry {
        weight_class: 100,
        steps: HEARTBEAT,
    },
    PatternEntry {
        weight_class: 60,
        steps: RAMP,
    },
    PatternEntry {
        weight_class: 20,
        steps: BUZZ,
    },
];
