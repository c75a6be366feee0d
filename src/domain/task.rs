use crate::domain::id::TaskId;
use crate::error::TaskflowError;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Priority of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Rank used for sorting; higher is more urgent
    pub fn rank(&self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl FromStr for Priority {
    type Err = TaskflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(TaskflowError::InvalidPriority(s.to_string())),
        }
    }
}

/// A kanban task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task with a generated ID, stamped with the current time
    ///
    /// The timestamp is truncated to milliseconds, the precision it is
    /// persisted with.
    pub fn new(title: impl Into<String>, description: impl Into<String>, priority: Priority) -> Self {
        let now = Utc::now().trunc_subsecs(3);
        Self::with_id(TaskId::generate(), title, description, priority, now)
    }

    /// Creates a task from caller-supplied identity and timestamp
    pub fn with_id(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            priority,
            created_at,
        }
    }

    /// Checks whether the title or description contains `query`, ignoring case
    pub fn matches(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

/// ISO-8601 timestamps as written by browsers (`2024-01-01T10:00:00.000Z`).
///
/// Finer precision is written out in full so it survives a round trip.
/// Bare dates (`2024-01-01`) are also accepted and read as midnight UTC.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDate, SecondsFormat, Timelike, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn format(value: &DateTime<Utc>) -> String {
        let format = if value.nanosecond() % 1_000_000 == 0 {
            SecondsFormat::Millis
        } else {
            SecondsFormat::AutoSi
        };
        value.to_rfc3339_opts(format, true)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp '{raw}'")))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_task_new_generates_id() {
        let a = Task::new("A", "", Priority::Low);
        let b = Task::new("B", "", Priority::Low);

        assert_ne!(a.id, b.id);
        assert!(a.id.as_str().starts_with("task-"));
    }

    #[test]
    fn test_new_task_survives_serialization() {
        let task = Task::new("Round trip", "", Priority::High);
        let json = serde_json::to_string(&task).unwrap();

        assert_eq!(serde_json::from_str::<Task>(&json).unwrap(), task);
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!(Priority::from_str("high").unwrap(), Priority::High);
        assert_eq!(Priority::from_str("LOW").unwrap(), Priority::Low);
        assert!(Priority::from_str("urgent").is_err());
    }

    #[test]
    fn test_priority_rank_ordering() {
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
    }

    #[test]
    fn test_task_matches_title_and_description() {
        let task = Task::with_id(
            TaskId::from("task-1"),
            "Write Docs",
            "Cover the reorder resolver",
            Priority::Medium,
            fixed_time(),
        );

        assert!(task.matches("docs"));
        assert!(task.matches("RESOLVER"));
        assert!(task.matches(""));
        assert!(!task.matches("deploy"));
    }

    #[test]
    fn test_task_serialization_uses_camel_case() {
        let task = Task::with_id(
            TaskId::from("task-1"),
            "Test",
            "",
            Priority::High,
            fixed_time(),
        );
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["createdAt"], "2024-03-01T09:30:00.000Z");
        assert_eq!(json["priority"], "high");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_timestamp_keeps_sub_millisecond_precision() {
        let micros = fixed_time() + chrono::Duration::microseconds(123_456);
        let nanos = fixed_time() + chrono::Duration::nanoseconds(123_456_789);

        assert_eq!(timestamp::format(&micros), "2024-03-01T09:30:00.123456Z");
        assert_eq!(timestamp::format(&nanos), "2024-03-01T09:30:00.123456789Z");
        assert_eq!(timestamp::parse(&timestamp::format(&nanos)), Some(nanos));
    }

    #[test]
    fn test_deserialize_browser_dataset() {
        let json = r#"{
            "id": "task-new",
            "title": "New task",
            "description": "Details",
            "priority": "medium",
            "createdAt": "2023-01-01"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id.as_str(), "task-new");
        assert_eq!(
            task.created_at,
            Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_deserialize_rejects_garbage_timestamp() {
        let json = r#"{"id":"t","title":"x","description":"","priority":"low","createdAt":"yesterday"}"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }
}
