use std::fmt;

use serde::{Deserialize, Serialize};

/// Intensity tier of a workout block.
///
/// The backend sends the tier as a free-form label (or sometimes a bare
/// number). Anything we don't recognise is kept verbatim in `Unknown` so a
/// new label on the server never breaks plan loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawIntensity", into = "String")]
pub enum Zone {
    Recovery,
    Endurance,
    Tempo,
    Threshold,
    Sprint,
    Unknown(String),
}

/// Wire shape of an intensity tag: `"tempo"`, `"Z3"` or `3`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIntensity {
    Level(u64),
    Label(String),
}

impl From<RawIntensity> for Zone {
    fn from(raw: RawIntensity) -> Self {
        match raw {
            RawIntensity::Level(n) => Zone::parse(&n.to_string()),
            RawIntensity::Label(s) => Zone::parse(&s),
        }
    }
}

impl From<Zone> for String {
    fn from(zone: Zone) -> Self {
        zone.label().to_string()
    }
}

impl Zone {
    /// All known tiers, easiest first.
    pub const KNOWN: [Zone; 5] = [
        Zone::Recovery,
        Zone::Endurance,
        Zone::Tempo,
        Zone::Threshold,
        Zone::Sprint,
    ];

    /// Parse a label like "tempo", "Z3" or "3" (case-insensitive).
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "recovery" | "z1" | "1" => Zone::Recovery,
            "endurance" | "z2" | "2" => Zone::Endurance,
            "tempo" | "z3" | "3" => Zone::Tempo,
            "threshold" | "z4" | "4" => Zone::Threshold,
            "sprint" | "z5" | "5" => Zone::Sprint,
            _ => Zone::Unknown(label.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Zone::Recovery => "recovery",
            Zone::Endurance => "endurance",
            Zone::Tempo => "tempo",
            Zone::Threshold => "threshold",
            Zone::Sprint => "sprint",
            Zone::Unknown(label) => label,
        }
    }

    /// Zone number 1-5, None for unknown labels.
    pub fn number(&self) -> Option<u8> {
        match self {
            Zone::Recovery => Some(1),
            Zone::Endurance => Some(2),
            Zone::Tempo => Some(3),
            Zone::Threshold => Some(4),
            Zone::Sprint => Some(5),
            Zone::Unknown(_) => None,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number() {
            Some(n) => write!(f, "Z{n} {}", self.label()),
            None => write!(f, "{}", self.label()),
        }
    }
}

/// Goal pace (mph) for each zone.
///
/// Loaded from the `[zones]` table of config.toml; every field falls back
/// to the default below when missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaceTable {
    pub recovery: f64,
    pub endurance: f64,
    pub tempo: f64,
    pub threshold: f64,
    pub sprint: f64,
}

impl Default for PaceTable {
    fn default() -> Self {
        Self {
            recovery: 10.0,
            endurance: 13.0,
            tempo: 16.0,
            threshold: 19.0,
            sprint: 22.0,
        }
    }
}

impl PaceTable {
    /// Goal pace for a zone. Unknown zones have no target and map to 0.
    pub fn pace_for(&self, zone: &Zone) -> f64 {
        match zone {
            Zone::Recovery => self.recovery,
            Zone::Endurance => self.endurance,
            Zone::Tempo => self.tempo,
            Zone::Threshold => self.threshold,
            Zone::Sprint => self.sprint,
            Zone::Unknown(_) => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names_and_aliases() {
        assert_eq!(Zone::parse("tempo"), Zone::Tempo);
        assert_eq!(Zone::parse("Tempo"), Zone::Tempo);
        assert_eq!(Zone::parse("Z4"), Zone::Threshold);
        assert_eq!(Zone::parse("1"), Zone::Recovery);
        assert_eq!(Zone::parse(" sprint "), Zone::Sprint);
    }

    #[test]
    fn unknown_label_is_kept() {
        assert_eq!(Zone::parse("Climb"), Zone::Unknown("Climb".into()));
        assert_eq!(Zone::parse("Climb").label(), "Climb");
        assert_eq!(Zone::parse("Climb").number(), None);
    }

    #[test]
    fn deserialize_label_or_number() {
        let zones: Vec<Zone> = serde_json::from_str(r#"["z2", 5, "warmup"]"#).unwrap();
        assert_eq!(
            zones,
            vec![Zone::Endurance, Zone::Sprint, Zone::Unknown("warmup".into())]
        );
    }

    #[test]
    fn default_paces_increase_with_intensity() {
        let table = PaceTable::default();
        let paces: Vec<f64> = Zone::KNOWN.iter().map(|z| table.pace_for(z)).collect();
        assert!(paces.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn unknown_zone_has_no_pace() {
        let table = PaceTable::default();
        assert_eq!(table.pace_for(&Zone::Unknown("x".into())), 0.0);
    }

    #[test]
    fn display_includes_number() {
        assert_eq!(Zone::Tempo.to_string(), "Z3 tempo");
        assert_eq!(Zone::Unknown("cooldown".into()).to_string(), "cooldown");
    }
}
