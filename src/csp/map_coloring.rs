//! Map colouring: adjacent regions must get different colours.

use crate::csp::problem::Csp;
use log::warn;

/// Builds a colouring problem over `regions`.
///
/// Borders naming an unknown region are skipped with a warning.
#[must_use]
pub fn map_coloring(regions: &[&str], colors: &[&str], borders: &[(&str, &str)]) -> Csp<String> {
    let mut csp = Csp::new();
    let domain: Vec<String> = colors.iter().map(ToString::to_string).collect();
    for region in regions {
        csp.add_variable(*region, domain.clone());
    }
    for (a, b) in borders {
        match (csp.variable(a), csp.variable(b)) {
            (Some(xi), Some(xj)) => csp.add_not_equal(xi, xj),
            _ => warn!("border {a}-{b} mentions an unknown region"),
        }
    }
    csp
}

/// The mainland states and territories of Australia plus Tasmania.
pub const AUSTRALIA_REGIONS: [&str; 7] = ["WA", "NT", "SA", "Q", "NSW", "V", "T"];

/// Pairs of regions of Australia that share a border.
pub const AUSTRALIA_BORDERS: [(&str, &str); 9] = [
    ("WA", "NT"),
    ("WA", "SA"),
    ("NT", "SA"),
    ("NT", "Q"),
    ("SA", "Q"),
    ("SA", "NSW"),
    ("SA", "V"),
    ("Q", "NSW"),
    ("NSW", "V"),
];

/// The colours used for the Australia instance.
pub const THREE_COLORS: [&str; 3] = ["red", "green", "blue"];

/// The textbook Australia map with three colours.
#[must_use]
pub fn australia() -> Csp<String> {
    map_coloring(&AUSTRALIA_REGIONS, &THREE_COLORS, &AUSTRALIA_BORDERS)
}
