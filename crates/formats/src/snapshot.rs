use std::collections::BTreeMap;
use std::fmt;

use serde::de::{IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::pressure_grid::PressureGrid;

pub const DEFAULT_SNAPSHOT_URL: &str = "simulation.json";

/// Ground-plane position of a named entity, `[x, z]` on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct EntityPosition {
    pub x: f64,
    pub z: f64,
}

impl EntityPosition {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }
}

impl From<[f64; 2]> for EntityPosition {
    fn from([x, z]: [f64; 2]) -> Self {
        Self { x, z }
    }
}

impl From<EntityPosition> for [f64; 2] {
    fn from(p: EntityPosition) -> Self {
        [p.x, p.z]
    }
}

/// One temporal frame of simulation output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub pressure: PressureGrid,
    /// Keyed by entity name; iterates in name order.
    pub entities: BTreeMap<String, EntityPosition>,
}

/// First frame of a simulation file plus how many frames the file holds.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationFile {
    pub first: Snapshot,
    pub frame_count: usize,
}

#[derive(Debug)]
pub enum SnapshotError {
    Json(serde_json::Error),
    NoFrames,
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Json(e) => write!(f, "invalid simulation file: {e}"),
            SnapshotError::NoFrames => write!(f, "simulation file contains no frames"),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Json(e) => Some(e),
            SnapshotError::NoFrames => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Json(e)
    }
}

/// Parse a simulation file (a JSON array of frames) and keep only frame 0.
///
/// Frame 0 is fully validated. Later frames are checked for JSON syntax and
/// counted, but never materialised.
pub fn parse_simulation(json: &str) -> Result<SimulationFile, SnapshotError> {
    let FirstFrame { first, frame_count } = serde_json::from_str(json)?;
    finish(first, frame_count)
}

pub fn parse_simulation_slice(bytes: &[u8]) -> Result<SimulationFile, SnapshotError> {
    let FirstFrame { first, frame_count } = serde_json::from_slice(bytes)?;
    finish(first, frame_count)
}

fn finish(first: Option<Snapshot>, frame_count: usize) -> Result<SimulationFile, SnapshotError> {
    let first = first.ok_or(SnapshotError::NoFrames)?;
    Ok(SimulationFile { first, frame_count })
}

struct FirstFrame {
    first: Option<Snapshot>,
    frame_count: usize,
}

impl<'de> Deserialize<'de> for FirstFrame {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(FirstFrameVisitor)
    }
}

struct FirstFrameVisitor;

impl<'de> Visitor<'de> for FirstFrameVisitor {
    type Value = FirstFrame;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of simulation frames")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let Some(first) = seq.next_element::<Snapshot>()? else {
            return Ok(FirstFrame {
                first: None,
                frame_count: 0,
            });
        };

        let mut frame_count = 1;
        while seq.next_element::<IgnoredAny>()?.is_some() {
            frame_count += 1;
        }

        Ok(FirstFrame {
            first: Some(first),
            frame_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityPosition, SnapshotError, parse_simulation, parse_simulation_slice};
    use pretty_assertions::assert_eq;

    const TWO_BY_TWO: &str = r#"[
        {
            "pressure": [[0, 1], [2, 3]],
            "entities": { "kayak_a": [0, 0], "rock_b": [1, 1] }
        }
    ]"#;

    #[test]
    fn parses_first_frame() {
        let file = parse_simulation(TWO_BY_TWO).expect("parse");
        assert_eq!(file.frame_count, 1);

        let snap = file.first;
        assert_eq!((snap.pressure.rows(), snap.pressure.cols()), (2, 2));
        assert_eq!(snap.pressure.get(1, 0), Some(2.0));
        assert_eq!(
            snap.entities.into_iter().collect::<Vec<_>>(),
            vec![
                ("kayak_a".to_string(), EntityPosition::new(0.0, 0.0)),
                ("rock_b".to_string(), EntityPosition::new(1.0, 1.0)),
            ]
        );
    }

    #[test]
    fn later_frames_are_counted_not_validated() {
        let json = r#"[
            { "pressure": [[1.5]], "entities": {} },
            { "pressure": "not checked", "extra": true },
            42
        ]"#;
        let file = parse_simulation(json).expect("parse");
        assert_eq!(file.frame_count, 3);
        assert_eq!(file.first.pressure.get(0, 0), Some(1.5));
    }

    #[test]
    fn unknown_fields_in_frame_are_ignored() {
        let json = r#"[{ "pressure": [], "entities": {}, "velocity": [[0]] }]"#;
        let file = parse_simulation(json).expect("parse");
        assert!(file.first.pressure.is_empty());
    }

    #[test]
    fn empty_file_has_no_frames() {
        assert!(matches!(parse_simulation("[]"), Err(SnapshotError::NoFrames)));
    }

    #[test]
    fn ragged_pressure_is_rejected() {
        let json = r#"[{ "pressure": [[0, 1], [2]], "entities": {} }]"#;
        let err = parse_simulation(json).unwrap_err();
        assert!(matches!(err, SnapshotError::Json(_)));
        assert!(err.to_string().contains("not rectangular"), "{err}");
    }

    #[test]
    fn missing_fields_are_rejected() {
        let err = parse_simulation(r#"[{ "pressure": [[0]] }]"#).unwrap_err();
        assert!(err.to_string().contains("entities"), "{err}");
    }

    #[test]
    fn entity_position_needs_two_numbers() {
        let json = r#"[{ "pressure": [], "entities": { "boat": [1, 2, 3] } }]"#;
        assert!(parse_simulation(json).is_err());
        let json = r#"[{ "pressure": [], "entities": { "boat": [1] } }]"#;
        assert!(parse_simulation(json).is_err());
    }

    #[test]
    fn top_level_must_be_an_array() {
        let err = parse_simulation(r#"{ "pressure": [], "entities": {} }"#).unwrap_err();
        assert!(matches!(err, SnapshotError::Json(_)));
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(parse_simulation_slice(b"<html>404</html>").is_err());
    }
}
