use std::fmt;

use formats::SimulationFile;
use layers::{MarkerClass, pressure_hue};
use serde::Serialize;

/// What the viewer would build from frame 0 of a simulation file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotSummary {
    pub frame_count: usize,
    pub rows: usize,
    pub cols: usize,
    pub cells: usize,
    pub pressure_min: Option<f64>,
    pub pressure_max: Option<f64>,
    /// Raw ramp output before wrapping into `[0, 1)`.
    pub hue_min: Option<f64>,
    pub hue_max: Option<f64>,
    /// Some cell hue falls outside `[0, 1)` and wraps around the color wheel.
    pub hue_wraps: bool,
    pub kayak_markers: usize,
    pub other_markers: usize,
}

pub fn summarize(file: &SimulationFile) -> SnapshotSummary {
    let grid = &file.first.pressure;
    let range = grid.min_max();
    // The ramp decreases with pressure.
    let hue_min = range.map(|(_, hi)| pressure_hue(hi));
    let hue_max = range.map(|(lo, _)| pressure_hue(lo));
    let hue_wraps = hue_min.is_some_and(|h| h < 0.0) || hue_max.is_some_and(|h| h >= 1.0);

    let kayak_markers = file
        .first
        .entities
        .keys()
        .filter(|name| MarkerClass::classify(name) == MarkerClass::Kayak)
        .count();

    SnapshotSummary {
        frame_count: file.frame_count,
        rows: grid.rows(),
        cols: grid.cols(),
        cells: grid.len(),
        pressure_min: range.map(|(lo, _)| lo),
        pressure_max: range.map(|(_, hi)| hi),
        hue_min,
        hue_max,
        hue_wraps,
        kayak_markers,
        other_markers: file.first.entities.len() - kayak_markers,
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
}

impl fmt::Display for SnapshotSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "frames:    {} (viewer shows frame 0)", self.frame_count)?;
        writeln!(
            f,
            "grid:      {} rows x {} cols ({} cells)",
            self.rows, self.cols, self.cells
        )?;
        writeln!(
            f,
            "pressure:  {} .. {}",
            fmt_opt(self.pressure_min),
            fmt_opt(self.pressure_max)
        )?;
        writeln!(
            f,
            "hue:       {} .. {}{}",
            fmt_opt(self.hue_min),
            fmt_opt(self.hue_max),
            if self.hue_wraps { " (wraps)" } else { "" }
        )?;
        write!(
            f,
            "markers:   {} kayak, {} other",
            self.kayak_markers, self.other_markers
        )
    }
}

#[cfg(test)]
mod tests {
    use super::summarize;
    use formats::parse_simulation;
    use pretty_assertions::assert_eq;

    #[test]
    fn summarizes_first_frame_only() {
        let file = parse_simulation(
            r#"[
                {"pressure": [[0,1],[2,3]], "entities": {"kayak_a": [0,0], "rock_b": [1,1]}},
                {"pressure": [[9]], "entities": {}}
            ]"#,
        )
        .unwrap();
        let s = summarize(&file);

        assert_eq!(s.frame_count, 2);
        assert_eq!((s.rows, s.cols, s.cells), (2, 2, 4));
        assert_eq!((s.pressure_min, s.pressure_max), (Some(0.0), Some(3.0)));
        assert!((s.hue_min.unwrap() - 0.4).abs() < 1e-12);
        assert!((s.hue_max.unwrap() - 0.7).abs() < 1e-12);
        assert!(!s.hue_wraps);
        assert_eq!((s.kayak_markers, s.other_markers), (1, 1));
    }

    #[test]
    fn high_pressure_is_flagged_as_wrapping() {
        let file = parse_simulation(r#"[{"pressure": [[0, 8]], "entities": {}}]"#).unwrap();
        let s = summarize(&file);
        assert!(s.hue_wraps);
        assert!(s.hue_min.unwrap() < 0.0);
    }

    #[test]
    fn empty_grid_has_no_ranges() {
        let file = parse_simulation(r#"[{"pressure": [], "entities": {"Kayak": [1, 2]}}]"#).unwrap();
        let s = summarize(&file);
        assert_eq!(s.cells, 0);
        assert_eq!(s.hue_min, None);
        assert!(!s.hue_wraps);
        assert_eq!((s.kayak_markers, s.other_markers), (0, 1));
    }

    #[test]
    fn text_report_mentions_wrapping() {
        let file = parse_simulation(r#"[{"pressure": [[-5]], "entities": {}}]"#).unwrap();
        let text = summarize(&file).to_string();
        assert!(text.contains("1 rows x 1 cols (1 cells)"), "{text}");
        assert!(text.contains("(wraps)"), "{text}");
    }
}
