//! Record form lifecycle: turns an in-progress draft into a persisted
//! record.
//!
//! One instance backs one open form. The draft is consumed by `submit`,
//! which orchestrates convert → upload → merge URL → persist. Create vs
//! update is decided solely by whether the seeding record carries a
//! non-empty identifier, never by whether a record was passed at all. A
//! failed submit leaves the draft intact for a user-initiated retry.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};
use thiserror::Error;

use gateway::{FileStore, GatewayError, RecordGateway, StoredFile};

use super::{
    editing_session::FormKind,
    image_pipeline::{self, DEFAULT_QUALITY},
};

/// `Idle → Editing → Submitting → {Saved | Failed}`; `Failed` returns to
/// `Editing` on the next draft mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Editing,
    Submitting,
    Saved,
    Failed,
}

/// The dual-natured image reference of a draft. Exactly one of: no new file
/// chosen and the preview is the already-persisted URL, or a new file chosen
/// and the preview is a local rendering of it.
#[derive(Debug, Clone, PartialEq)]
enum ImageField {
    Unchanged(Option<String>),
    Pending { file: StoredFile, preview: String },
}

#[derive(Debug, Clone, Error)]
pub enum FormError {
    #[error("image upload failed: {0}")]
    Upload(#[source] GatewayError),
    #[error("save failed: {0}")]
    Save(#[source] GatewayError),
}

/// Partial-update notification propagated to the host on every draft
/// mutation, so it can keep a live preview of unsaved changes.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftChange {
    pub field: String,
    pub value: Value,
}

pub struct RecordForm {
    form_type: FormKind,
    item: Option<Value>,
    fields: Map<String, Value>,
    image: ImageField,
    phase: FormPhase,
    quality: f32,
}

impl RecordForm {
    /// Seed a form from an existing record (edit) or from empty defaults
    /// (create).
    pub fn new(form_type: FormKind, item: Option<Value>) -> Self {
        let mut fields = Map::new();
        let mut image_url = None;
        if let Some(Value::Object(map)) = &item {
            for (key, value) in map {
                match key.as_str() {
                    "id" | "createdAt" => {}
                    "imageUrl" => image_url = value.as_str().map(str::to_string),
                    _ => {
                        fields.insert(key.clone(), value.clone());
                    }
                }
            }
        }

        Self {
            form_type,
            item,
            fields,
            image: ImageField::Unchanged(image_url),
            phase: FormPhase::Idle,
            quality: DEFAULT_QUALITY,
        }
    }

    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = quality;
        self
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Identifier of the seeding record, when non-empty.
    pub fn item_id(&self) -> Option<&str> {
        self.item
            .as_ref()?
            .get("id")?
            .as_str()
            .filter(|id| !id.is_empty())
    }

    pub fn set_field(&mut self, field: &str, value: Value) -> DraftChange {
        self.phase = FormPhase::Editing;
        self.fields.insert(field.to_string(), value.clone());
        DraftChange {
            field: field.to_string(),
            value,
        }
    }

    /// Choose a new image file. The preview becomes a local data URL that
    /// stands in for the hosted URL until save.
    pub fn select_image(&mut self, file: StoredFile) -> DraftChange {
        self.phase = FormPhase::Editing;
        let preview = file.data_url();
        self.image = ImageField::Pending {
            preview: preview.clone(),
            file,
        };
        DraftChange {
            field: "imageUrl".to_string(),
            value: json!(preview),
        }
    }

    /// What the form renders for the image right now.
    pub fn image_preview(&self) -> Option<&str> {
        match &self.image {
            ImageField::Unchanged(url) => url.as_deref(),
            ImageField::Pending { preview, .. } => Some(preview),
        }
    }

    /// Persist the draft. `progress` receives coarse checkpoints in 0–100.
    ///
    /// A failed upload aborts the whole attempt before any create/update is
    /// issued; the local preview value is never persisted.
    pub async fn submit<G>(
        &mut self,
        gateway: &G,
        mut progress: impl FnMut(u8),
    ) -> Result<Value, FormError>
    where
        G: RecordGateway + FileStore + ?Sized,
    {
        self.phase = FormPhase::Submitting;
        progress(0);

        let image_url = match &self.image {
            ImageField::Pending { file, .. } => {
                let converted = image_pipeline::convert_to_webp(file, self.quality);
                progress(25);
                let url = match gateway.upload_file(&converted).await {
                    Ok(url) => url,
                    Err(e) => {
                        self.phase = FormPhase::Failed;
                        return Err(FormError::Upload(e));
                    }
                };
                progress(75);
                Some(url)
            }
            ImageField::Unchanged(existing) => match existing {
                Some(url) => Some(url.clone()),
                None if self.form_type.supports_image() && self.item_id().is_none() => {
                    Some(placeholder_image_url(Utc::now()))
                }
                None => None,
            },
        };

        let mut payload = Value::Object(self.fields.clone());
        if self.form_type.supports_image() {
            if let (Value::Object(map), Some(url)) = (&mut payload, image_url) {
                map.insert("imageUrl".to_string(), json!(url));
            }
        }

        let kind = self.form_type.record_kind();
        let result = match self.item_id() {
            Some(id) => gateway.update(kind, id, payload).await,
            None => gateway.create(kind, payload).await,
        };

        match result {
            Ok(saved) => {
                progress(100);
                self.phase = FormPhase::Saved;
                Ok(saved)
            }
            Err(e) => {
                self.phase = FormPhase::Failed;
                Err(FormError::Save(e))
            }
        }
    }
}

/// Time-seeded placeholder for records created without an image. Nothing
/// enforces "image required", and an empty URL would break the public grids.
pub fn placeholder_image_url(now: DateTime<Utc>) -> String {
    format!("https://picsum.photos/seed/{}/800/600", now.timestamp_millis())
}
