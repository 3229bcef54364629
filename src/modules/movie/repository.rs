use super::dto::MovieSort;
use super::model::{Movie, MovieFilter, MovieGenreLink};
use crate::common::pagination::PageRequest;
use crate::modules::genre::model::Genre;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqliteExecutor};
use time::Date;

const MOVIE_COLUMNS: &str = "m.id, m.title, m.description, m.release_date";

// Correlated on the outer `m`; the caller closes the instr(...) call.
// Genre names are stored lowercased already.
const GENRE_NAME_MATCH: &str = "EXISTS (SELECT 1 FROM movie_genres mg JOIN genres g ON g.id = mg.genre_id \
     WHERE mg.movie_id = m.id AND instr(g.name, ";

const TITLE_MATCH: &str = "instr(m.title_search, ";

/// Case fold shared by stored titles and search terms. SQLite `lower()`
/// folds ASCII only.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

pub struct MovieRepository;

impl MovieRepository {
    pub async fn create<'e>(
        executor: impl SqliteExecutor<'e>,
        title: &str,
        description: &str,
        release_date: Date,
    ) -> sqlx::Result<Movie> {
        sqlx::query_as::<_, Movie>(
            r#"
            INSERT INTO movies (title, title_search, description, release_date)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, description, release_date
            "#,
        )
        .bind(title)
        .bind(fold_case(title))
        .bind(description)
        .bind(release_date)
        .fetch_one(executor)
        .await
    }

    pub async fn find_by_id<'e>(executor: impl SqliteExecutor<'e>, id: i64) -> sqlx::Result<Option<Movie>> {
        sqlx::query_as::<_, Movie>("SELECT id, title, description, release_date FROM movies WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Applies only the provided fields. `None` if the movie does not exist.
    pub async fn update_fields<'e>(
        executor: impl SqliteExecutor<'e>,
        id: i64,
        title: Option<&str>,
        description: Option<&str>,
        release_date: Option<Date>,
    ) -> sqlx::Result<Option<Movie>> {
        sqlx::query_as::<_, Movie>(
            r#"
            UPDATE movies
            SET
                title = COALESCE(?, title),
                title_search = COALESCE(?, title_search),
                description = COALESCE(?, description),
                release_date = COALESCE(?, release_date)
            WHERE id = ?
            RETURNING id, title, description, release_date
            "#,
        )
        .bind(title)
        .bind(title.map(fold_case))
        .bind(description)
        .bind(release_date)
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<u64> {
        sqlx::query("DELETE FROM movie_genres WHERE movie_id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        let result = sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn get_movie_genres<'e>(executor: impl SqliteExecutor<'e>, movie_id: i64) -> sqlx::Result<Vec<Genre>> {
        sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name
            FROM genres g
            JOIN movie_genres mg ON g.id = mg.genre_id
            WHERE mg.movie_id = ?
            ORDER BY g.name ASC
            "#,
        )
        .bind(movie_id)
        .fetch_all(executor)
        .await
    }

    pub async fn get_genres_for_movies<'e>(
        executor: impl SqliteExecutor<'e>,
        movie_ids: &[i64],
    ) -> sqlx::Result<Vec<MovieGenreLink>> {
        if movie_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT mg.movie_id, g.id AS genre_id, g.name AS genre_name \
             FROM movie_genres mg JOIN genres g ON g.id = mg.genre_id \
             WHERE mg.movie_id IN (",
        );
        let mut ids = qb.separated(", ");
        for id in movie_ids {
            ids.push_bind(*id);
        }
        ids.push_unseparated(") ORDER BY g.name ASC");

        qb.build_query_as::<MovieGenreLink>().fetch_all(executor).await
    }

    pub async fn link_genres<'e>(
        executor: impl SqliteExecutor<'e>,
        movie_id: i64,
        genre_ids: &[i64],
    ) -> sqlx::Result<()> {
        if genre_ids.is_empty() {
            return Ok(());
        }

        let mut qb = QueryBuilder::<Sqlite>::new("INSERT OR IGNORE INTO movie_genres (movie_id, genre_id) ");
        qb.push_values(genre_ids, |mut row, genre_id| {
            row.push_bind(movie_id).push_bind(*genre_id);
        });
        qb.build().execute(executor).await?;
        Ok(())
    }

    pub async fn unlink_genres<'e>(
        executor: impl SqliteExecutor<'e>,
        movie_id: i64,
        genre_ids: &[i64],
    ) -> sqlx::Result<()> {
        if genre_ids.is_empty() {
            return Ok(());
        }

        let mut qb = QueryBuilder::<Sqlite>::new("DELETE FROM movie_genres WHERE movie_id = ");
        qb.push_bind(movie_id);
        qb.push(" AND genre_id IN (");
        let mut ids = qb.separated(", ");
        for id in genre_ids {
            ids.push_bind(*id);
        }
        ids.push_unseparated(")");
        qb.build().execute(executor).await?;
        Ok(())
    }

    /// One page of movies plus the size of the whole filtered set.
    pub async fn list(
        conn: &mut SqliteConnection,
        filter: &MovieFilter,
        sort: MovieSort,
        page: PageRequest,
    ) -> sqlx::Result<(Vec<Movie>, u64)> {
        let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM movies m");
        push_filter(&mut count_qb, filter);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&mut *conn).await?;

        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM movies m", MOVIE_COLUMNS));
        push_filter(&mut qb, filter);
        qb.push(sort.order_by_clause());
        qb.push(" LIMIT ");
        qb.push_bind(page.limit());
        qb.push(" OFFSET ");
        qb.push_bind(page.offset());
        let movies = qb.build_query_as::<Movie>().fetch_all(&mut *conn).await?;

        Ok((movies, total.max(0) as u64))
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &MovieFilter) {
    match filter {
        MovieFilter::Match { title, genre } => {
            let mut keyword = " WHERE ";
            if let Some(title) = title {
                qb.push(keyword);
                qb.push(TITLE_MATCH);
                qb.push_bind(fold_case(title));
                qb.push(") > 0");
                keyword = " AND ";
            }
            if let Some(genre) = genre {
                qb.push(keyword);
                qb.push(GENRE_NAME_MATCH);
                qb.push_bind(fold_case(genre));
                qb.push(") > 0)");
            }
        }
        MovieFilter::Search(term) => {
            let term = fold_case(term);
            qb.push(" WHERE (");
            qb.push(TITLE_MATCH);
            qb.push_bind(term.clone());
            qb.push(") > 0 OR ");
            qb.push(GENRE_NAME_MATCH);
            qb.push_bind(term);
            qb.push(") > 0))");
        }
    }
}
