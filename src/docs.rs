use utoipa::OpenApi;
use crate::common::pagination::{PaginationMeta, SortingDirection};
use crate::modules::genre::dto::*;
use crate::modules::genre::model::Genre;
use crate::modules::movie::dto::*;
use crate::modules::movie::model::{Movie, MoviesSortBy};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::genre::handler::list_genres,
        crate::modules::genre::handler::create_genre,
        crate::modules::genre::handler::get_genre,
        crate::modules::genre::handler::update_genre,
        crate::modules::genre::handler::delete_genre,
        crate::modules::movie::handler::create_movie,
        crate::modules::movie::handler::list_movies,
        crate::modules::movie::handler::search_movies,
        crate::modules::movie::handler::get_movie,
        crate::modules::movie::handler::update_movie,
        crate::modules::movie::handler::delete_movie,
    ),
    components(
        schemas(
            Genre, Movie, MoviesSortBy, SortingDirection, PaginationMeta,
            CreateGenreRequest, UpdateGenreRequest, GenreResponse,
            CreateMovieRequest, UpdateMovieRequest, MovieResponse,
        )
    ),
    tags(
        (name = "Genres", description = "Genre catalogue"),
        (name = "Movies", description = "Movie catalogue, filtering and search")
    )
)]
pub struct ApiDoc;
