//! Read-only routes for the public site, plus the two public form
//! submissions (admissions, contact).

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::{get, post},
};
use gateway::models::{
    self,
    about::AboutPageContent,
    achievement::Achievement,
    contact::{ContactInfo, ContactMessage, CreateContactMessage},
    extracurricular::Extracurricular,
    facility::Facility,
    faq::FaqItem,
    gallery::GalleryItem,
    hero::HeroImage,
    post::Post,
    registration::{CreateRegistration, Registration},
    staff::StaffMember,
    statistic::Statistic,
};
use serde::Deserialize;
use utils::{
    pagination::{self, Page},
    response::ApiResponse,
};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<ResponseJson<ApiResponse<Page<Post>>>, ApiError> {
    let posts = models::list_records::<Post>(state.gateway.as_ref()).await?;
    Ok(ResponseJson(ApiResponse::success(pagination::paginate(
        &posts,
        query.page.unwrap_or(1),
        pagination::DEFAULT_PAGE_SIZE,
    ))))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ResponseJson<ApiResponse<Post>>, ApiError> {
    let post = models::find_record::<Post>(state.gateway.as_ref(), &id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(ResponseJson(ApiResponse::success(post)))
}

pub async fn list_gallery(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<ResponseJson<ApiResponse<Page<GalleryItem>>>, ApiError> {
    let items = models::list_records::<GalleryItem>(state.gateway.as_ref()).await?;
    Ok(ResponseJson(ApiResponse::success(pagination::paginate(
        &items,
        query.page.unwrap_or(1),
        pagination::DEFAULT_PAGE_SIZE,
    ))))
}

pub async fn list_achievements(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<ResponseJson<ApiResponse<Page<Achievement>>>, ApiError> {
    let items = models::list_records::<Achievement>(state.gateway.as_ref()).await?;
    Ok(ResponseJson(ApiResponse::success(pagination::paginate(
        &items,
        query.page.unwrap_or(1),
        pagination::DEFAULT_PAGE_SIZE,
    ))))
}

pub async fn list_staff(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<StaffMember>>>, ApiError> {
    let staff = models::list_records::<StaffMember>(state.gateway.as_ref()).await?;
    Ok(ResponseJson(ApiResponse::success(staff)))
}

pub async fn list_extracurriculars(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Extracurricular>>>, ApiError> {
    let items = models::list_records::<Extracurricular>(state.gateway.as_ref()).await?;
    Ok(ResponseJson(ApiResponse::success(items)))
}

pub async fn list_hero_images(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<HeroImage>>>, ApiError> {
    let items = models::list_records::<HeroImage>(state.gateway.as_ref()).await?;
    Ok(ResponseJson(ApiResponse::success(items)))
}

pub async fn list_facilities(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Facility>>>, ApiError> {
    let items = models::list_records::<Facility>(state.gateway.as_ref()).await?;
    Ok(ResponseJson(ApiResponse::success(items)))
}

pub async fn list_faqs(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<FaqItem>>>, ApiError> {
    let items = models::list_records::<FaqItem>(state.gateway.as_ref()).await?;
    Ok(ResponseJson(ApiResponse::success(items)))
}

pub async fn list_statistics(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Vec<Statistic>>>, ApiError> {
    let items = models::list_records::<Statistic>(state.gateway.as_ref()).await?;
    Ok(ResponseJson(ApiResponse::success(items)))
}

pub async fn get_contact_info(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Option<ContactInfo>>>, ApiError> {
    let info = models::find_record::<ContactInfo>(
        state.gateway.as_ref(),
        gateway::models::SINGLETON_ID,
    )
    .await?;
    Ok(ResponseJson(ApiResponse::success(info)))
}

pub async fn get_about(
    State(state): State<AppState>,
) -> Result<ResponseJson<ApiResponse<Option<AboutPageContent>>>, ApiError> {
    let about = models::find_record::<AboutPageContent>(
        state.gateway.as_ref(),
        gateway::models::SINGLETON_ID,
    )
    .await?;
    Ok(ResponseJson(ApiResponse::success(about)))
}

pub async fn create_registration(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateRegistration>,
) -> Result<ResponseJson<ApiResponse<Registration>>, ApiError> {
    let saved =
        models::create_record::<Registration>(state.gateway.as_ref(), &payload).await?;
    tracing::info!(id = %saved.id, "admission registration received");
    Ok(ResponseJson(ApiResponse::success(saved)))
}

pub async fn create_contact_message(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateContactMessage>,
) -> Result<ResponseJson<ApiResponse<ContactMessage>>, ApiError> {
    let saved =
        models::create_record::<ContactMessage>(state.gateway.as_ref(), &payload).await?;
    Ok(ResponseJson(ApiResponse::success(saved)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/{id}", get(get_post))
        .route("/gallery", get(list_gallery))
        .route("/achievements", get(list_achievements))
        .route("/staff", get(list_staff))
        .route("/extracurriculars", get(list_extracurriculars))
        .route("/hero-images", get(list_hero_images))
        .route("/facilities", get(list_facilities))
        .route("/faqs", get(list_faqs))
        .route("/statistics", get(list_statistics))
        .route("/contact-info", get(get_contact_info))
        .route("/about", get(get_about))
        .route("/registrations", post(create_registration))
        .route("/contact-messages", post(create_contact_message))
}
