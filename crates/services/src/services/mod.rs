pub mod draft_store;
pub mod editing_session;
pub mod image_pipeline;
pub mod record_form;
