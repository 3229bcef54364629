use super::dto::{CreateGenreRequest, GenreResponse, UpdateGenreRequest};
use super::model::Genre;
use super::repository::GenreRepository;
use crate::common::error::{is_unique_violation, AppError, Result};
use crate::common::validation::normalize_genre_name;
use crate::modules::movie::model::Movie;
use crate::state::AppState;
use std::collections::HashMap;
use tracing::info;

pub struct GenreService;

impl GenreService {
    pub async fn create(state: &AppState, req: CreateGenreRequest) -> Result<GenreResponse> {
        const FAILED: &str = "Failed to create genre";
        let name = normalize_genre_name(&req.name);

        let existing = GenreRepository::find_by_name(&state.db, &name)
            .await
            .map_err(|e| AppError::internal(FAILED, e))?;
        if existing.is_some() {
            return Err(Self::already_exists(&name));
        }

        let genre = GenreRepository::create(&state.db, &name)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    Self::already_exists(&name)
                } else {
                    AppError::internal(FAILED, e)
                }
            })?;

        info!(genre_id = genre.id, name = %genre.name, "Genre created");
        Ok(GenreResponse::from(genre))
    }

    /// All genres ordered by name.
    pub async fn find_all(state: &AppState, include_movies: bool) -> Result<Vec<GenreResponse>> {
        if !include_movies {
            let genres = GenreRepository::find_all(&state.db).await?;
            return Ok(genres.into_iter().map(GenreResponse::from).collect());
        }

        let mut tx = state.db.begin().await?;
        let genres = GenreRepository::find_all(&mut *tx).await?;
        let links = GenreRepository::find_all_movie_links(&mut *tx).await?;
        tx.commit().await?;

        let mut movies_by_genre: HashMap<i64, Vec<Movie>> = HashMap::new();
        for link in links {
            movies_by_genre.entry(link.genre_id).or_default().push(link.movie);
        }

        Ok(genres
            .into_iter()
            .map(|g| {
                let movies = movies_by_genre.remove(&g.id).unwrap_or_default();
                GenreResponse::with_movies(g, Some(movies))
            })
            .collect())
    }

    pub async fn find_by_id(state: &AppState, id: i64, include_movies: bool) -> Result<GenreResponse> {
        let mut tx = state.db.begin().await?;
        let genre = GenreRepository::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| Self::not_found(id))?;
        let movies = if include_movies {
            Some(GenreRepository::find_movies(&mut *tx, id).await?)
        } else {
            None
        };
        tx.commit().await?;

        Ok(GenreResponse::with_movies(genre, movies))
    }

    /// Exact-name lookup used to verify genre references before linking.
    pub async fn find_by_name(state: &AppState, name: &str) -> Result<Genre> {
        GenreRepository::find_by_name(&state.db, name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Genre named \"{}\" not found", name)))
    }

    pub async fn update(
        state: &AppState,
        id: i64,
        req: UpdateGenreRequest,
        include_movies: bool,
    ) -> Result<GenreResponse> {
        const FAILED: &str = "Failed to update genre";

        let result: Result<GenreResponse> = async {
            let mut tx = state.db.begin().await?;

            let mut genre = GenreRepository::find_by_id(&mut *tx, id)
                .await?
                .ok_or_else(|| Self::not_found(id))?;

            if let Some(name) = req.name.as_deref().map(normalize_genre_name) {
                genre = GenreRepository::update_name(&mut *tx, id, &name)
                    .await
                    .map_err(|e| {
                        if is_unique_violation(&e) {
                            Self::already_exists(&name)
                        } else {
                            AppError::Database(e)
                        }
                    })?
                    .ok_or_else(|| Self::not_found(id))?;
            }

            let movies = if include_movies {
                Some(GenreRepository::find_movies(&mut *tx, id).await?)
            } else {
                None
            };
            tx.commit().await?;

            Ok(GenreResponse::with_movies(genre, movies))
        }
        .await;

        let genre = result.map_err(|e| e.or_internal(FAILED))?;
        info!(genre_id = id, name = %genre.name, "Genre updated");
        Ok(genre)
    }

    /// Deletes the genre and detaches it from every movie. Returns the genre as it was.
    pub async fn remove(state: &AppState, id: i64, include_movies: bool) -> Result<GenreResponse> {
        const FAILED: &str = "Failed to delete genre";

        let result: Result<GenreResponse> = async {
            let mut tx = state.db.begin().await?;

            let genre = GenreRepository::find_by_id(&mut *tx, id)
                .await?
                .ok_or_else(|| Self::not_found(id))?;
            let movies = if include_movies {
                Some(GenreRepository::find_movies(&mut *tx, id).await?)
            } else {
                None
            };

            if GenreRepository::delete(&mut *tx, id).await? == 0 {
                return Err(Self::not_found(id));
            }
            tx.commit().await?;

            Ok(GenreResponse::with_movies(genre, movies))
        }
        .await;

        let genre = result.map_err(|e| e.or_internal(FAILED))?;
        info!(genre_id = id, "Genre deleted");
        Ok(genre)
    }

    fn not_found(id: i64) -> AppError {
        AppError::NotFound(format!("Genre with id {} not found", id))
    }

    fn already_exists(name: &str) -> AppError {
        AppError::Conflict(format!("Genre named \"{}\" already exists", name))
    }
}
