use super::dto::{CreateGenreRequest, GenreQuery, GenreResponse, UpdateGenreRequest};
use super::service::GenreService;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::common::validation::{IdPath, ValidatedJson, ValidatedQuery};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

/// List all genres
#[utoipa::path(
    get,
    path = "/api/v1/genres",
    params(GenreQuery),
    responses(
        (status = 200, description = "List of genres ordered by name", body = ApiResponse<Vec<GenreResponse>>),
        (status = 400, description = "Bad Request")
    ),
    tag = "Genres"
)]
pub async fn list_genres(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<GenreQuery>,
) -> impl IntoResponse {
    match GenreService::find_all(&state, query.include_movies()).await {
        Ok(genres) => ApiSuccess(
            ApiResponse::success(genres, "Genres retrieved successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new genre
#[utoipa::path(
    post,
    path = "/api/v1/genres",
    request_body = CreateGenreRequest,
    responses(
        (status = 201, description = "Genre created", body = ApiResponse<GenreResponse>),
        (status = 400, description = "Bad Request"),
        (status = 409, description = "Genre already exists"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Genres"
)]
pub async fn create_genre(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateGenreRequest>,
) -> impl IntoResponse {
    match GenreService::create(&state, payload).await {
        Ok(genre) => ApiSuccess(
            ApiResponse::success(genre, "Genre created successfully"),
            StatusCode::CREATED,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Get genre by ID
#[utoipa::path(
    get,
    path = "/api/v1/genres/{id}",
    params(
        ("id" = i64, Path, description = "Genre ID"),
        GenreQuery
    ),
    responses(
        (status = 200, description = "Genre details", body = ApiResponse<GenreResponse>),
        (status = 404, description = "Genre not found")
    ),
    tag = "Genres"
)]
pub async fn get_genre(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedQuery(query): ValidatedQuery<GenreQuery>,
) -> impl IntoResponse {
    match GenreService::find_by_id(&state, id, query.include_movies()).await {
        Ok(genre) => ApiSuccess(
            ApiResponse::success(genre, "Genre retrieved successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Update genre
#[utoipa::path(
    patch,
    path = "/api/v1/genres/{id}",
    params(
        ("id" = i64, Path, description = "Genre ID"),
        GenreQuery
    ),
    request_body = UpdateGenreRequest,
    responses(
        (status = 200, description = "Genre updated", body = ApiResponse<GenreResponse>),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Genre not found"),
        (status = 409, description = "Genre name already taken"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Genres"
)]
pub async fn update_genre(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedQuery(query): ValidatedQuery<GenreQuery>,
    ValidatedJson(payload): ValidatedJson<UpdateGenreRequest>,
) -> impl IntoResponse {
    match GenreService::update(&state, id, payload, query.include_movies()).await {
        Ok(genre) => ApiSuccess(
            ApiResponse::success(genre, "Genre updated successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Delete genre
///
/// Linked movies are kept; only their association with this genre is removed.
#[utoipa::path(
    delete,
    path = "/api/v1/genres/{id}",
    params(
        ("id" = i64, Path, description = "Genre ID"),
        GenreQuery
    ),
    responses(
        (status = 200, description = "Genre deleted", body = ApiResponse<GenreResponse>),
        (status = 404, description = "Genre not found"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Genres"
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedQuery(query): ValidatedQuery<GenreQuery>,
) -> impl IntoResponse {
    match GenreService::remove(&state, id, query.include_movies()).await {
        Ok(genre) => ApiSuccess(
            ApiResponse::success(genre, "Genre deleted successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => e.into_response(),
    }
}
