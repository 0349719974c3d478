use std::collections::BTreeMap;

use serde::Serialize;

use crate::site::LOCAL_TIMEZONE;

pub const SERIALIZER: &str = "json";

/// Connection parameters for the background task queue. The producer and
/// the workers read the same broker URL.
#[derive(Debug, Clone, Serialize)]
pub struct TaskQueueSettings {
    pub broker_url: String,
    pub accept_content: Vec<String>,
    pub task_serializer: String,
    pub result_serializer: String,
    pub timezone: String,
    /// Task name to schedule expression. Nothing is scheduled yet.
    pub beat_schedule: BTreeMap<String, String>,
}

impl TaskQueueSettings {
    pub fn new(broker_url: impl Into<String>) -> Self {
        Self {
            broker_url: broker_url.into(),
            accept_content: vec![SERIALIZER.to_string()],
            task_serializer: SERIALIZER.to_string(),
            result_serializer: SERIALIZER.to_string(),
            timezone: LOCAL_TIMEZONE.to_string(),
            beat_schedule: BTreeMap::new(),
        }
    }
}
