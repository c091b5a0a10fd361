use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{Record, RecordKind};

/// Question/answer pair shown in the public accordion. The only managed
/// kind without an image.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct FaqItem {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for FaqItem {
    const KIND: RecordKind = RecordKind::Faq;
}
