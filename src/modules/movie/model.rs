use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;
use utoipa::ToSchema;

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(with = "iso_date")]
    #[schema(value_type = String, format = Date)]
    pub release_date: Date,
}

// For query results joining genres
#[derive(Debug, FromRow, Clone)]
pub struct MovieGenreLink {
    pub movie_id: i64,
    pub genre_id: i64,
    pub genre_name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub enum MoviesSortBy {
    #[default]
    #[serde(rename = "id")]
    Id,
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "releaseDate")]
    ReleaseDate,
}

impl MoviesSortBy {
    pub fn column(&self) -> &'static str {
        match self {
            MoviesSortBy::Id => "m.id",
            MoviesSortBy::Title => "m.title_search",
            MoviesSortBy::ReleaseDate => "m.release_date",
        }
    }
}

/// Row filter for movie listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieFilter {
    /// Both criteria must hold when both are given.
    Match {
        title: Option<String>,
        genre: Option<String>,
    },
    /// Term found in the title or in any linked genre name.
    Search(String),
}

impl Default for MovieFilter {
    fn default() -> Self {
        MovieFilter::Match {
            title: None,
            genre: None,
        }
    }
}
