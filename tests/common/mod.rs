#![allow(dead_code)]

use movie_catalog::config::settings::AppConfig;
use movie_catalog::infrastructure::db::pool::run_migrations;
use movie_catalog::modules::genre::dto::CreateGenreRequest;
use movie_catalog::modules::genre::service::GenreService;
use movie_catalog::modules::movie::dto::{CreateMovieRequest, MovieResponse};
use movie_catalog::modules::movie::service::MovieService;
use movie_catalog::state::AppState;
use time::Date;

pub async fn init_state() -> AppState {
    const DB_URL: &str = "sqlite::memory:";
    // A single connection keeps the in-memory database alive and shared.
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect(DB_URL)
        .await
        .unwrap();
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let config = AppConfig {
        server_port: 0,
        database_url: DB_URL.to_string(),
        db_max_connections: 1,
    };
    AppState::new(config, pool)
}

pub async fn add_genres(state: &AppState, names: &[&str]) {
    for name in names {
        GenreService::create(state, CreateGenreRequest { name: name.to_string() })
            .await
            .unwrap();
    }
}

pub fn date(year: i32, month: u8, day: u8) -> Date {
    Date::from_calendar_date(year, month.try_into().unwrap(), day).unwrap()
}

pub fn new_movie(title: &str, genres: &[&str]) -> CreateMovieRequest {
    CreateMovieRequest {
        title: title.to_string(),
        description: format!("About {}", title),
        release_date: date(2000, 1, 1),
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

pub async fn add_movie(state: &AppState, title: &str, genres: &[&str]) -> MovieResponse {
    MovieService::create(state, new_movie(title, genres)).await.unwrap()
}

pub async fn count_rows(state: &AppState, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(&state.db)
        .await
        .unwrap()
}
