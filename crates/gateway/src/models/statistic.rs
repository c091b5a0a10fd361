use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{Record, RecordKind};

/// Site counter shown on the landing page ("540 students", "32 teachers").
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Statistic {
    pub id: String,
    pub label: String,
    pub value: i64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Statistic {
    const KIND: RecordKind = RecordKind::Statistic;
}
