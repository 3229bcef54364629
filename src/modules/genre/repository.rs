use super::model::{Genre, GenreMovieLink};
use crate::modules::movie::model::Movie;
use sqlx::{SqliteConnection, SqliteExecutor};

pub struct GenreRepository;

impl GenreRepository {
    pub async fn create<'e>(executor: impl SqliteExecutor<'e>, name: &str) -> sqlx::Result<Genre> {
        sqlx::query_as::<_, Genre>(
            r#"
            INSERT INTO genres (name)
            VALUES (?)
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(executor)
        .await
    }

    pub async fn find_all<'e>(executor: impl SqliteExecutor<'e>) -> sqlx::Result<Vec<Genre>> {
        sqlx::query_as::<_, Genre>(
            r#"
            SELECT id, name
            FROM genres
            ORDER BY name ASC, id ASC
            "#,
        )
        .fetch_all(executor)
        .await
    }

    pub async fn find_by_id<'e>(executor: impl SqliteExecutor<'e>, id: i64) -> sqlx::Result<Option<Genre>> {
        sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn find_by_name<'e>(executor: impl SqliteExecutor<'e>, name: &str) -> sqlx::Result<Option<Genre>> {
        sqlx::query_as::<_, Genre>("SELECT id, name FROM genres WHERE name = ?")
            .bind(name)
            .fetch_optional(executor)
            .await
    }

    pub async fn update_name<'e>(executor: impl SqliteExecutor<'e>, id: i64, name: &str) -> sqlx::Result<Option<Genre>> {
        sqlx::query_as::<_, Genre>(
            r#"
            UPDATE genres
            SET name = ?
            WHERE id = ?
            RETURNING id, name
            "#,
        )
        .bind(name)
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Drops the genre's junction rows, then the genre itself. Linked movies are untouched.
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<u64> {
        sqlx::query("DELETE FROM movie_genres WHERE genre_id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        let result = sqlx::query("DELETE FROM genres WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn find_movies<'e>(executor: impl SqliteExecutor<'e>, genre_id: i64) -> sqlx::Result<Vec<Movie>> {
        sqlx::query_as::<_, Movie>(
            r#"
            SELECT m.id, m.title, m.description, m.release_date
            FROM movies m
            JOIN movie_genres mg ON m.id = mg.movie_id
            WHERE mg.genre_id = ?
            ORDER BY m.id ASC
            "#,
        )
        .bind(genre_id)
        .fetch_all(executor)
        .await
    }

    pub async fn find_all_movie_links<'e>(executor: impl SqliteExecutor<'e>) -> sqlx::Result<Vec<GenreMovieLink>> {
        sqlx::query_as::<_, GenreMovieLink>(
            r#"
            SELECT mg.genre_id, m.id, m.title, m.description, m.release_date
            FROM movie_genres mg
            JOIN movies m ON m.id = mg.movie_id
            ORDER BY mg.genre_id ASC, m.id ASC
            "#,
        )
        .fetch_all(executor)
        .await
    }
}
