use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::{Record, RecordKind};

/// Content of the "about us" page. Singleton row addressed by
/// [`super::SINGLETON_ID`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct AboutPageContent {
    pub id: String,
    pub title: String,
    pub history: String,
    pub vision: String,
    pub mission: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Record for AboutPageContent {
    const KIND: RecordKind = RecordKind::AboutPage;
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAboutPageContent {
    pub title: String,
    pub history: String,
    pub vision: String,
    pub mission: String,
    #[serde(default)]
    pub image_url: Option<String>,
}
