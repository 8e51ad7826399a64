use std::fmt;

use serde::{Deserialize, Serialize};

use super::zones::Zone;

/// Identifier of a workout as the backend reports it.
///
/// The server has been seen returning both numeric and string ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanId {
    Number(u64),
    Name(String),
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanId::Number(n) => write!(f, "{n}"),
            PlanId::Name(s) => write!(f, "{s}"),
        }
    }
}

/// One timed segment of a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Length of the block in seconds.
    #[serde(rename = "time")]
    pub duration_secs: u32,
    pub intensity: Zone,
}

/// A workout: an ordered list of blocks. Never mutated after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    #[serde(rename = "workout")]
    pub id: PlanId,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl WorkoutPlan {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Total length of the workout in seconds, saturating at `u32::MAX`.
    pub fn total_secs(&self) -> u32 {
        self.secs_before(self.blocks.len())
    }

    /// Seconds of the plan that lie before block `index`.
    pub fn secs_before(&self, index: usize) -> u32 {
        self.blocks
            .iter()
            .take(index)
            .fold(0u32, |acc, b| acc.saturating_add(b.duration_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN_JSON: &str = r#"{
        "workout": 50,
        "blocks": [
            {"time": 120, "intensity": "recovery"},
            {"time": 60, "intensity": "sprint"},
            {"time": 90, "intensity": "z3"}
        ]
    }"#;

    #[test]
    fn parse_backend_payload() {
        let plan: WorkoutPlan = serde_json::from_str(PLAN_JSON).unwrap();
        assert_eq!(plan.id, PlanId::Number(50));
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.blocks[1].duration_secs, 60);
        assert_eq!(plan.blocks[2].intensity, Zone::Tempo);
    }

    #[test]
    fn string_id_and_missing_blocks() {
        let plan: WorkoutPlan = serde_json::from_str(r#"{"workout": "hills"}"#).unwrap();
        assert_eq!(plan.id.to_string(), "hills");
        assert!(plan.is_empty());
        assert_eq!(plan.total_secs(), 0);
    }

    #[test]
    fn durations() {
        let plan: WorkoutPlan = serde_json::from_str(PLAN_JSON).unwrap();
        assert_eq!(plan.total_secs(), 270);
        assert_eq!(plan.secs_before(0), 0);
        assert_eq!(plan.secs_before(2), 180);
        assert_eq!(plan.secs_before(10), 270);
    }

    #[test]
    fn huge_durations_saturate() {
        let plan: WorkoutPlan = serde_json::from_str(&format!(
            r#"{{"workout": 1, "blocks": [{{"time": {}, "intensity": 1}}, {{"time": 1, "intensity": 2}}]}}"#,
            u32::MAX
        ))
        .unwrap();
        assert_eq!(plan.total_secs(), u32::MAX);
        assert_eq!(plan.secs_before(1), u32::MAX);
    }
}
