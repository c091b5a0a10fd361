use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{Record, RecordKind};

/// Admission form submission from the public site.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: String,
    pub student_name: String,
    pub parent_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub previous_school: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Registration {
    const KIND: RecordKind = RecordKind::Registration;
}

/// Payload accepted from the public admissions form.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistration {
    pub student_name: String,
    pub parent_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub previous_school: Option<String>,
}
