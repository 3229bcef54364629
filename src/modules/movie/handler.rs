use super::dto::{CreateMovieRequest, GetMoviesQuery, MovieResponse, SearchMoviesQuery, UpdateMovieRequest};
use super::service::MovieService;
use crate::common::pagination::Paginated;
use crate::common::response::{ApiResponse, ApiSuccess};
use crate::common::validation::{IdPath, ValidatedJson, ValidatedQuery};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

#[utoipa::path(
    post,
    path = "/api/v1/movies",
    request_body = CreateMovieRequest,
    responses(
        (status = 201, description = "Movie Created", body = ApiResponse<MovieResponse>),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Referenced genre does not exist"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Movies"
)]
pub async fn create_movie(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateMovieRequest>,
) -> impl IntoResponse {
    match MovieService::create(&state, req).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Movie created successfully"), StatusCode::CREATED).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/movies",
    params(GetMoviesQuery),
    responses(
        (status = 200, description = "Paginated movies", body = ApiResponse<Paginated<MovieResponse>>),
        (status = 400, description = "Bad Request"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Movies"
)]
pub async fn list_movies(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<GetMoviesQuery>,
) -> impl IntoResponse {
    match MovieService::find_all(&state, query).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Movies retrieved successfully"), StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Search movies by title or genre name
#[utoipa::path(
    get,
    path = "/api/v1/movies/search",
    params(SearchMoviesQuery),
    responses(
        (status = 200, description = "Paginated search results", body = ApiResponse<Paginated<MovieResponse>>),
        (status = 400, description = "Bad Request"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Movies"
)]
pub async fn search_movies(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<SearchMoviesQuery>,
) -> impl IntoResponse {
    match MovieService::search(&state, query).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Movies retrieved successfully"), StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/movies/{id}",
    params(
        ("id" = i64, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Get Movie", body = ApiResponse<MovieResponse>),
        (status = 404, description = "Movie Not Found"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Movies"
)]
pub async fn get_movie(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> impl IntoResponse {
    match MovieService::find_by_id(&state, id).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Movie retrieved successfully"), StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    patch,
    path = "/api/v1/movies/{id}",
    params(
        ("id" = i64, Path, description = "Movie ID")
    ),
    request_body = UpdateMovieRequest,
    responses(
        (status = 200, description = "Movie Updated", body = ApiResponse<MovieResponse>),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Movie or referenced genre not found"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Movies"
)]
pub async fn update_movie(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<UpdateMovieRequest>,
) -> impl IntoResponse {
    match MovieService::update(&state, id, req).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Movie updated successfully"), StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/movies/{id}",
    params(
        ("id" = i64, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie Deleted", body = ApiResponse<MovieResponse>),
        (status = 404, description = "Movie Not Found"),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Movies"
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> impl IntoResponse {
    match MovieService::remove(&state, id).await {
        Ok(res) => ApiSuccess(ApiResponse::success(res, "Movie deleted successfully"), StatusCode::OK).into_response(),
        Err(e) => e.into_response(),
    }
}
