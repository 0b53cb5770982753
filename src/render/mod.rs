//! Text rendering of classification results
//!
//! Thin wrappers over the engine's outputs: a 9-line degree table with the
//! best-match list, a serde-friendly report for JSON output, and an ASCII
//! plot of the membership curves with the query marked. Nothing here feeds
//! back into the core.

use serde::{Deserialize, Serialize};

use crate::engine::IntersectionGrid;
use crate::variable::{AltitudeTerm, LinguisticTerm, LinguisticVariable, SpeedTerm};

/// Serializable summary of one classification query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// Queried altitude in meters
    pub altitude: f64,
    /// Queried speed in km/h
    pub speed: f64,
    /// Degree per combination, altitude-major canonical order
    pub degrees: Vec<CombinationDegree>,
    /// Maximum degree across the grid
    pub max_degree: f64,
    /// Every combination achieving the maximum exactly
    pub best: Vec<Combination>,
}

/// One (altitude-term, speed-term) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    pub altitude: AltitudeTerm,
    pub speed: SpeedTerm,
}

/// A combination with its intersection degree
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CombinationDegree {
    pub altitude: AltitudeTerm,
    pub speed: SpeedTerm,
    pub degree: f64,
}

impl ClassificationReport {
    /// Build a report from a query and its grid
    pub fn new(altitude: f64, speed: f64, grid: &IntersectionGrid) -> Self {
        let degrees = grid
            .iter()
            .map(|(alt, spd, v)| CombinationDegree {
                altitude: alt,
                speed: spd,
                degree: v.value(),
            })
            .collect();
        let best = grid
            .best_matches()
            .into_iter()
            .map(|(alt, spd)| Combination {
                altitude: alt,
                speed: spd,
            })
            .collect();
        ClassificationReport {
            altitude,
            speed,
            degrees,
            max_degree: grid.max().value(),
            best,
        }
    }
}

/// Format the 9-line degree table followed by the best-match list.
pub fn format_table(grid: &IntersectionGrid) -> String {
    let mut output = String::new();

    for (alt, spd, degree) in grid.iter() {
        output.push_str(&format!(
            "{} altitude & {} speed: {:.3}\n",
            alt, spd, degree.value()
        ));
    }

    output.push_str("Best combinations:\n");
    for (alt, spd) in grid.best_matches() {
        output.push_str(&format!("- {} altitude & {} speed\n", alt, spd));
    }

    output
}

/// Plot dimensions: one row per tenth of membership plus the axis row
const PLOT_ROWS: usize = 10;
const PLOT_COLS: usize = 60;

/// Render one variable's membership curves as an ASCII chart.
///
/// Each term's curve is drawn with its own glyph (first letter of the term
/// name), the query column is marked with `|`, and the winning term's degree
/// at the query is marked with `*`.
pub fn plot_variable<T: LinguisticTerm>(
    variable: &LinguisticVariable<T>,
    query: f64,
    winner: T,
) -> String {
    let universe = variable.universe();
    let span = universe.max() - universe.min();
    let col_of = |x: f64| -> usize {
        if span == 0.0 {
            return 0;
        }
        let frac = ((x - universe.min()) / span).clamp(0.0, 1.0);
        ((frac * (PLOT_COLS - 1) as f64).round() as usize).min(PLOT_COLS - 1)
    };
    let row_of = |degree: f64| -> usize {
        // row 0 is the top (degree 1.0)
        let frac = degree.clamp(0.0, 1.0);
        PLOT_ROWS - 1 - ((frac * (PLOT_ROWS - 1) as f64).round() as usize).min(PLOT_ROWS - 1)
    };

    let mut cells = vec![[' '; PLOT_COLS]; PLOT_ROWS];

    // Query column first so curves draw over it
    let query_col = col_of(query.clamp(universe.min(), universe.max()));
    for row in cells.iter_mut() {
        row[query_col] = '|';
    }

    for (term, curve) in variable.iter() {
        let glyph = term
            .name()
            .chars()
            .next()
            .unwrap_or('?')
            .to_ascii_uppercase();
        for &(x, degree) in curve.samples() {
            cells[row_of(degree.value())][col_of(x)] = glyph;
        }
    }

    // Winning membership at the query, drawn last
    let winning = variable.membership_at(winner, query).value();
    cells[row_of(winning)][query_col] = '*';

    let mut output = String::new();
    output.push_str(&format!(
        "{} (query {} -> {} = {:.3})\n",
        variable.name(),
        query,
        winner,
        winning
    ));
    for (i, row) in cells.iter().enumerate() {
        let degree = 1.0 - i as f64 / (PLOT_ROWS - 1) as f64;
        output.push_str(&format!("{:4.1} |", degree));
        output.extend(row.iter());
        output.push('\n');
    }
    output.push_str(&format!(
        "     +{}\n      {:<w$}{}\n",
        "-".repeat(PLOT_COLS),
        universe.min(),
        universe.max(),
        w = PLOT_COLS - format!("{}", universe.max()).len()
    ));

    output
}
