use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{Record, RecordKind};

/// Message sent through the public contact form.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for ContactMessage {
    const KIND: RecordKind = RecordKind::ContactMessage;
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// School contact details. Singleton row addressed by
/// [`super::SINGLETON_ID`]; it may not exist until an editor first saves it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub id: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub maps_url: Option<String>,
}

impl Record for ContactInfo {
    const KIND: RecordKind = RecordKind::ContactInfo;
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactInfo {
    pub address: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub maps_url: Option<String>,
}
