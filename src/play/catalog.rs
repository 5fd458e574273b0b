//! Catalog Tables
//!
//! The fixed pools every draw selects from. List position maps directly to an
//! RNG-selected index, so ordering here is load-bearing: reordering an entry
//! changes every play generated after it.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;

/// All selectable route names, in catalog order.
pub const ROUTE_NAMES: &[&str] = &[
    "curl",
    "drag",
    "slant",
    "corner",
    "streak",
    "out",
    "post",
    "flat",
    "wheel",
    "swing_left",
    "swing_right",
    "seam",
    "stop_n_go",
    "jerk",
    "double_out",
    "angle",
    "sail",
    "pivot",
    "sluggo",
    "chair",
    "block",
    "check_release",
];

/// Offensive formations and their allowed variants.
pub const FORMATIONS: &[(&str, &[&str])] = &[
    ("t", &["tight", "strong", "weak"]),
    ("i", &["pro", "power", "weak"]),
    ("pro", &["split", "slot", "tight"]),
    ("singleback", &["ace", "trips", "doubles"]),
    ("wing", &["right", "left", "stack"]),
    ("double wing", &["tight", "wide"]),
    ("gun", &["trips", "doubles", "bunch"]),
    ("pistol", &["base", "slot", "trips"]),
    ("tandem", &["slot", "wide"]),
];

/// Receiver spacing tags.
pub const FORMATION_TAGS: &[&str] = &["bunch", "x", "nasty"];

/// Base coverage numbers.
pub const BASE_COVERAGES: &[&str] = &["0", "1", "2", "3", "4", "6", "9"];

/// Single modifier phrases appended to a base coverage.
pub const COVERAGE_MODIFIERS: &[&str] = &[
    "press",
    "off man",
    "silver shoot pinch",
    "safety blitz",
    "hole",
    "buzz",
    "rat",
    "double",
    "willie bracket",
    "spy",
    "tampa",
    "high",
    "drop",
    "hard flat",
    "man",
    "cloud",
    "lb blitz",
    "cb zone blitz",
    "show 2",
    "show 4",
    "hard",
    "quarters",
    "flat",
    "match",
    "show",
];

/// Modifiers that stack pairwise on one base coverage.
pub const COVERAGE_STACKS: &[&str] = &[
    "press",
    "off man",
    "spy",
    "blitz",
    "show",
    "cloud",
    "drop",
    "hard flat",
    "match",
    "quarters",
];

/// The full derived coverage pool, built once at first use.
///
/// Every base alone, every base + single modifier, and every base + ordered
/// pair of distinct stack modifiers — deduplicated and sorted ascending so
/// the pool is an immutable ordered sequence. Any reimplementation must
/// reproduce this exact ordering; the RNG draws by index into it.
static COVERAGES: Lazy<Vec<String>> = Lazy::new(build_coverages);

fn build_coverages() -> Vec<String> {
    let mut pool = BTreeSet::new();
    for base in BASE_COVERAGES {
        pool.insert((*base).to_string());
        for modifier in COVERAGE_MODIFIERS {
            pool.insert(format!("{base} {modifier}"));
        }
        for stack_a in COVERAGE_STACKS {
            for stack_b in COVERAGE_STACKS {
                if stack_a == stack_b {
                    continue;
                }
                pool.insert(format!("{base} {stack_a} {stack_b}"));
            }
        }
    }
    pool.into_iter().collect()
}

/// The derived coverage pool, sorted and deduplicated.
pub fn coverages() -> &'static [String] {
    &COVERAGES
}
