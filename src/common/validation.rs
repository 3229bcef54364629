use super::error::AppError;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Normalization applied to a request before it is validated.
pub trait Sanitize {
    fn sanitize(self) -> Self;
}

pub fn normalize_genre_name(name: &str) -> String {
    name.trim().to_lowercase()
}

pub fn sanitize_genre_names(names: Vec<String>) -> Vec<String> {
    names.iter().map(|n| normalize_genre_name(n)).collect()
}

/// JSON body that has been sanitized and validated.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Sanitize + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let value = value.sanitize();
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Query string that has been sanitized and validated.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate + Sanitize + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let value = value.sanitize();
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}

/// Positive integer `{id}` path segment.
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        if id < 1 {
            return Err(AppError::BadRequest(format!("id must be a positive integer, got {}", id)));
        }
        Ok(IdPath(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_names_are_trimmed_and_lowercased() {
        assert_eq!(normalize_genre_name("  Science Fiction "), "science fiction");
        assert_eq!(
            sanitize_genre_names(vec![" Action".into(), "DRAMA ".into()]),
            vec!["action".to_string(), "drama".to_string()]
        );
    }
}
