use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::model::{iso_date, Movie, MovieFilter, MoviesSortBy};
use crate::common::pagination::{PageRequest, SortingDirection};
use crate::common::validation::{normalize_genre_name, sanitize_genre_names, Sanitize};
use crate::modules::genre::model::Genre;

fn validate_genre_names(names: &[String]) -> Result<(), ValidationError> {
    if names.iter().any(|n| n.is_empty() || n.chars().count() > 50) {
        let mut err = ValidationError::new("genre_name_length");
        err.message = Some("Each genre name must be between 1 and 50 characters".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 1000, message = "Description must be between 1 and 1000 characters"))]
    pub description: String,
    #[serde(with = "iso_date")]
    #[schema(value_type = String, format = Date)]
    pub release_date: Date,
    #[validate(
        length(min = 1, message = "At least one genre is required"),
        custom(function = "validate_genre_names")
    )]
    pub genres: Vec<String>,
}

impl Sanitize for CreateMovieRequest {
    fn sanitize(self) -> Self {
        Self {
            genres: sanitize_genre_names(self.genres),
            ..self
        }
    }
}

/// Partial edit. Genre membership changes incrementally through the add/remove lists.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovieRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 1000, message = "Description must be between 1 and 1000 characters"))]
    pub description: Option<String>,
    #[serde(default, with = "iso_date::option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub release_date: Option<Date>,
    #[validate(custom(function = "validate_genre_names"))]
    pub genres_to_add: Option<Vec<String>>,
    #[validate(custom(function = "validate_genre_names"))]
    pub genres_to_remove: Option<Vec<String>>,
}

impl Sanitize for UpdateMovieRequest {
    fn sanitize(self) -> Self {
        Self {
            genres_to_add: self.genres_to_add.map(sanitize_genre_names),
            genres_to_remove: self.genres_to_remove.map(sanitize_genre_names),
            ..self
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GetMoviesQuery {
    /// Case-insensitive substring of the title
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    /// Case-insensitive substring of any linked genre name
    #[validate(length(min = 1, max = 50))]
    pub genre: Option<String>,
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<u32>,
    pub sort_by: Option<MoviesSortBy>,
    pub sorting_direction: Option<SortingDirection>,
}

impl GetMoviesQuery {
    pub fn filter(&self) -> MovieFilter {
        MovieFilter::Match {
            title: self.title.clone(),
            genre: self.genre.clone(),
        }
    }

    pub fn sort(&self) -> MovieSort {
        MovieSort::new(self.sort_by, self.sorting_direction)
    }

    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

impl Sanitize for GetMoviesQuery {
    fn sanitize(self) -> Self {
        Self {
            genre: self.genre.as_deref().map(normalize_genre_name),
            ..self
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchMoviesQuery {
    /// Term matched against the title or any linked genre name
    #[validate(length(min = 1, max = 255))]
    pub title_or_genre: String,
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<u32>,
    pub sort_by: Option<MoviesSortBy>,
    pub sorting_direction: Option<SortingDirection>,
}

impl SearchMoviesQuery {
    pub fn filter(&self) -> MovieFilter {
        MovieFilter::Search(self.title_or_genre.clone())
    }

    pub fn sort(&self) -> MovieSort {
        MovieSort::new(self.sort_by, self.sorting_direction)
    }

    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

impl Sanitize for SearchMoviesQuery {
    fn sanitize(self) -> Self {
        Self {
            title_or_genre: self.title_or_genre.trim().to_string(),
            ..self
        }
    }
}

/// Primary ordering; ties are always broken by id ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovieSort {
    pub by: MoviesSortBy,
    pub direction: SortingDirection,
}

impl MovieSort {
    pub fn new(by: Option<MoviesSortBy>, direction: Option<SortingDirection>) -> Self {
        Self {
            by: by.unwrap_or_default(),
            direction: direction.unwrap_or_default(),
        }
    }

    pub fn order_by_clause(&self) -> String {
        format!(
            " ORDER BY {} {}, m.id ASC",
            self.by.column(),
            self.direction.as_sql()
        )
    }
}

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(with = "iso_date")]
    #[schema(value_type = String, format = Date)]
    pub release_date: Date,
    pub genres: Vec<Genre>,
}

impl MovieResponse {
    pub fn new(movie: Movie, genres: Vec<Genre>) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            description: movie.description,
            release_date: movie.release_date,
            genres,
        }
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }
}
