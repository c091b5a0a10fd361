use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use strum_macros::{Display, EnumString};
use ts_rs::TS;

use crate::{error::GatewayError, store::RecordGateway};

pub mod about;
pub mod achievement;
pub mod contact;
pub mod extracurricular;
pub mod facility;
pub mod faq;
pub mod gallery;
pub mod hero;
pub mod post;
pub mod registration;
pub mod staff;
pub mod statistic;

/// Well-known identifier of the singleton kinds (`contact_info`,
/// `about_page_content`); their row may not exist until first save.
pub const SINGLETON_ID: &str = "main";

/// Every content kind stored by the backend service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, TS, EnumString,
    Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecordKind {
    Post,
    Gallery,
    Staff,
    Extracurricular,
    Hero,
    Facility,
    Faq,
    Achievement,
    Registration,
    ContactMessage,
    ContactInfo,
    AboutPage,
    Statistic,
}

impl RecordKind {
    /// Stored table name on the backend service.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Post => "posts",
            Self::Gallery => "gallery_items",
            Self::Staff => "staff_members",
            Self::Extracurricular => "extracurriculars",
            Self::Hero => "hero_images",
            Self::Facility => "facilities",
            Self::Faq => "faqs",
            Self::Achievement => "achievements",
            Self::Registration => "registrations",
            Self::ContactMessage => "contact_messages",
            Self::ContactInfo => "contact_info",
            Self::AboutPage => "about_page_content",
            Self::Statistic => "statistics",
        }
    }

    /// Kinds addressed by [`SINGLETON_ID`] instead of a generated id.
    pub fn is_singleton(&self) -> bool {
        matches!(self, Self::ContactInfo | Self::AboutPage)
    }
}

/// Marker tying a typed record struct to its stored kind.
pub trait Record: Serialize + DeserializeOwned + Send {
    const KIND: RecordKind;
}

pub async fn list_records<T: Record>(gw: &dyn RecordGateway) -> Result<Vec<T>, GatewayError> {
    let rows = gw.list(T::KIND).await?;
    rows.into_iter().map(from_value).collect()
}

pub async fn find_record<T: Record>(
    gw: &dyn RecordGateway,
    id: &str,
) -> Result<Option<T>, GatewayError> {
    match gw.get(T::KIND, id).await? {
        Some(row) => Ok(Some(from_value(row)?)),
        None => Ok(None),
    }
}

pub async fn create_record<T: Record>(
    gw: &dyn RecordGateway,
    fields: &impl Serialize,
) -> Result<T, GatewayError> {
    let saved = gw.create(T::KIND, to_value(fields)?).await?;
    from_value(saved)
}

pub async fn upsert_singleton_record<T: Record>(
    gw: &dyn RecordGateway,
    fields: &impl Serialize,
) -> Result<T, GatewayError> {
    let saved = gw.upsert_singleton(T::KIND, to_value(fields)?).await?;
    from_value(saved)
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, GatewayError> {
    serde_json::from_value(value).map_err(|e| GatewayError::Serde(e.to_string()))
}

fn to_value(fields: &impl Serialize) -> Result<Value, GatewayError> {
    serde_json::to_value(fields).map_err(|e| GatewayError::Serde(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_kind_round_trips_through_strings() {
        assert_eq!(RecordKind::Post.to_string(), "post");
        assert_eq!(RecordKind::ContactMessage.to_string(), "contact_message");
        assert_eq!(RecordKind::from_str("gallery").unwrap(), RecordKind::Gallery);
        assert!(RecordKind::from_str("bogus").is_err());
    }

    #[test]
    fn test_singleton_kinds() {
        assert!(RecordKind::ContactInfo.is_singleton());
        assert!(RecordKind::AboutPage.is_singleton());
        assert!(!RecordKind::Post.is_singleton());
    }
}
