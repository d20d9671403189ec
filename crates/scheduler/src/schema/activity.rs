//! Activity references attached to a schedule.

use serde::{Deserialize, Serialize};

/// A schedulable activity: a task or survey the participant performs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Activity {
    #[serde(default)]
    pub label: Option<String>,
    /// Stable identifier; feeds the occurrence identity hash.
    pub guid: String,
    pub activity_type: ActivityType,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Task,
    Survey,
}

impl Activity {
    /// The life-cycle event id recorded when this activity is completed.
    ///
    /// Task completions are recorded as `activity:{guid}:finished`, survey
    /// completions as `survey:{guid}:finished`.
    pub fn completion_event_id(&self) -> String {
        match self.activity_type {
            ActivityType::Task => format!("activity:{}:finished", self.guid),
            ActivityType::Survey => format!("survey:{}:finished", self.guid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_event_ids() {
        let task = Activity {
            label: None,
            guid: "AAA".to_string(),
            activity_type: ActivityType::Task,
        };
        let survey = Activity {
            label: None,
            guid: "BBB".to_string(),
            activity_type: ActivityType::Survey,
        };
        assert_eq!(task.completion_event_id(), "activity:AAA:finished");
        assert_eq!(survey.completion_event_id(), "survey:BBB:finished");
    }
}
