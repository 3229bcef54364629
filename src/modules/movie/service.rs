use super::dto::{CreateMovieRequest, GetMoviesQuery, MovieResponse, MovieSort, SearchMoviesQuery, UpdateMovieRequest};
use super::model::{Movie, MovieFilter};
use super::repository::MovieRepository;
use crate::common::error::{AppError, Result};
use crate::common::pagination::{PageRequest, Paginated};
use crate::modules::genre::model::Genre;
use crate::modules::genre::service::GenreService;
use crate::state::AppState;
use futures_util::future::join_all;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

pub struct MovieService;

impl MovieService {
    /// Looks every distinct name up concurrently. All lookups run to completion;
    /// the first missing name (in name order) is reported.
    async fn resolve_genres(state: &AppState, names: &[String]) -> Result<Vec<Genre>> {
        let distinct: BTreeSet<&str> = names.iter().map(String::as_str).collect();
        let lookups = distinct
            .into_iter()
            .map(|name| GenreService::find_by_name(state, name));

        join_all(lookups).await.into_iter().collect()
    }

    pub async fn create(state: &AppState, req: CreateMovieRequest) -> Result<MovieResponse> {
        let result: Result<MovieResponse> = async {
            let genres = Self::resolve_genres(state, &req.genres).await?;
            let genre_ids: Vec<i64> = genres.iter().map(|g| g.id).collect();

            let mut tx = state.db.begin().await?;
            let movie = MovieRepository::create(&mut *tx, &req.title, &req.description, req.release_date).await?;
            MovieRepository::link_genres(&mut *tx, movie.id, &genre_ids).await?;
            let genres = MovieRepository::get_movie_genres(&mut *tx, movie.id).await?;
            tx.commit().await?;

            Ok(MovieResponse::new(movie, genres))
        }
        .await;

        let movie = result.map_err(|e| e.or_internal("Failed to create movie"))?;
        info!(movie_id = movie.id, title = %movie.title, "Movie created");
        Ok(movie)
    }

    pub async fn find_all(state: &AppState, query: GetMoviesQuery) -> Result<Paginated<MovieResponse>> {
        Self::list(state, query.filter(), query.sort(), query.page()).await
    }

    pub async fn search(state: &AppState, query: SearchMoviesQuery) -> Result<Paginated<MovieResponse>> {
        Self::list(state, query.filter(), query.sort(), query.page()).await
    }

    // Count, page and genre eager-load share one read transaction.
    async fn list(
        state: &AppState,
        filter: MovieFilter,
        sort: MovieSort,
        page: PageRequest,
    ) -> Result<Paginated<MovieResponse>> {
        debug!(?filter, ?sort, ?page, "Listing movies");

        let mut tx = state.db.begin().await?;
        let (movies, total) = MovieRepository::list(&mut *tx, &filter, sort, page).await?;
        let ids: Vec<i64> = movies.iter().map(|m| m.id).collect();
        let links = MovieRepository::get_genres_for_movies(&mut *tx, &ids).await?;
        tx.commit().await?;

        let mut genres_by_movie: HashMap<i64, Vec<Genre>> = HashMap::new();
        for link in links {
            genres_by_movie.entry(link.movie_id).or_default().push(Genre {
                id: link.genre_id,
                name: link.genre_name,
            });
        }

        let items = movies
            .into_iter()
            .map(|movie| {
                let genres = genres_by_movie.remove(&movie.id).unwrap_or_default();
                MovieResponse::new(movie, genres)
            })
            .collect();

        Ok(Paginated::new(items, page, total))
    }

    pub async fn find_by_id(state: &AppState, id: i64) -> Result<MovieResponse> {
        let mut tx = state.db.begin().await?;
        let movie = MovieRepository::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| Self::not_found(id))?;
        let genres = MovieRepository::get_movie_genres(&mut *tx, id).await?;
        tx.commit().await?;

        Ok(MovieResponse::new(movie, genres))
    }

    /// Applies field edits and the genre diff atomically. A name present in both
    /// `genres_to_add` and `genres_to_remove` ends up linked: removals run first.
    pub async fn update(state: &AppState, id: i64, req: UpdateMovieRequest) -> Result<MovieResponse> {
        let result: Result<MovieResponse> = async {
            let to_add = req.genres_to_add.unwrap_or_default();
            let to_remove = req.genres_to_remove.unwrap_or_default();

            let mut referenced = to_add.clone();
            referenced.extend(to_remove.iter().cloned());
            let ids_by_name: HashMap<String, i64> = Self::resolve_genres(state, &referenced)
                .await?
                .into_iter()
                .map(|g| (g.name, g.id))
                .collect();
            let genre_ids = |names: &[String]| -> Vec<i64> {
                names.iter().filter_map(|n| ids_by_name.get(n).copied()).collect()
            };
            let add_ids = genre_ids(&to_add[..]);
            let remove_ids = genre_ids(&to_remove[..]);

            let mut tx = state.db.begin().await?;
            let movie: Movie = MovieRepository::update_fields(
                &mut *tx,
                id,
                req.title.as_deref(),
                req.description.as_deref(),
                req.release_date,
            )
            .await?
            .ok_or_else(|| Self::not_found(id))?;

            MovieRepository::unlink_genres(&mut *tx, id, &remove_ids).await?;
            MovieRepository::link_genres(&mut *tx, id, &add_ids).await?;
            let genres = MovieRepository::get_movie_genres(&mut *tx, id).await?;
            tx.commit().await?;

            Ok(MovieResponse::new(movie, genres))
        }
        .await;

        let movie = result.map_err(|e| e.or_internal("Failed to update movie"))?;
        info!(movie_id = id, genres = ?movie.genre_names(), "Movie updated");
        Ok(movie)
    }

    /// Deletes the movie and its genre links, returning it as it was just before deletion.
    pub async fn remove(state: &AppState, id: i64) -> Result<MovieResponse> {
        let result: Result<MovieResponse> = async {
            let mut tx = state.db.begin().await?;
            let movie = MovieRepository::find_by_id(&mut *tx, id)
                .await?
                .ok_or_else(|| Self::not_found(id))?;
            let genres = MovieRepository::get_movie_genres(&mut *tx, id).await?;

            if MovieRepository::delete(&mut *tx, id).await? == 0 {
                return Err(Self::not_found(id));
            }
            tx.commit().await?;

            Ok(MovieResponse::new(movie, genres))
        }
        .await;

        let movie = result.map_err(|e| e.or_internal("Failed to delete movie"))?;
        info!(movie_id = id, "Movie deleted");
        Ok(movie)
    }

    fn not_found(id: i64) -> AppError {
        AppError::NotFound(format!("Movie with id {} not found", id))
    }
}
