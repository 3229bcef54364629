use crate::modules::movie::model::Movie;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

// A movie joined through movie_genres, keyed by the genre it was reached from
#[derive(Debug, FromRow, Clone)]
pub struct GenreMovieLink {
    pub genre_id: i64,
    #[sqlx(flatten)]
    pub movie: Movie,
}
