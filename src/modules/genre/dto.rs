use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::common::validation::{normalize_genre_name, Sanitize};
use crate::modules::genre::model::Genre;
use crate::modules::movie::model::Movie;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateGenreRequest {
    #[validate(length(min = 1, max = 50, message = "Genre name must be between 1 and 50 characters"))]
    pub name: String,
}

impl Sanitize for CreateGenreRequest {
    fn sanitize(self) -> Self {
        Self {
            name: normalize_genre_name(&self.name),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateGenreRequest {
    #[validate(length(min = 1, max = 50, message = "Genre name must be between 1 and 50 characters"))]
    pub name: Option<String>,
}

impl Sanitize for UpdateGenreRequest {
    fn sanitize(self) -> Self {
        Self {
            name: self.name.as_deref().map(normalize_genre_name),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GenreQuery {
    /// Eager-load the movies linked to each genre
    pub include_movies: Option<bool>,
}

impl GenreQuery {
    pub fn include_movies(&self) -> bool {
        self.include_movies.unwrap_or(false)
    }
}

impl Sanitize for GenreQuery {
    fn sanitize(self) -> Self {
        self
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GenreResponse {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movies: Option<Vec<Movie>>,
}

impl GenreResponse {
    pub fn with_movies(genre: Genre, movies: Option<Vec<Movie>>) -> Self {
        Self {
            id: genre.id,
            name: genre.name,
            movies,
        }
    }
}

impl From<Genre> for GenreResponse {
    fn from(g: Genre) -> Self {
        Self::with_movies(g, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_is_normalized_before_validation() {
        let req = CreateGenreRequest { name: "  Film Noir ".into() }.sanitize();
        assert_eq!(req.name, "film noir");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn blank_name_fails_after_trimming() {
        let req = CreateGenreRequest { name: "   ".into() }.sanitize();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn update_without_name_is_valid() {
        assert!(UpdateGenreRequest::default().sanitize().validate().is_ok());
    }
}
