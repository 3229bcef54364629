mod common;

use common::{add_genres, add_movie, count_rows, date, init_state, new_movie};
use movie_catalog::common::error::AppError;
use movie_catalog::common::pagination::SortingDirection;
use movie_catalog::modules::movie::dto::{GetMoviesQuery, SearchMoviesQuery, UpdateMovieRequest};
use movie_catalog::modules::movie::model::MoviesSortBy;
use movie_catalog::modules::movie::service::MovieService;

fn titles(items: &[movie_catalog::modules::movie::dto::MovieResponse]) -> Vec<&str> {
    items.iter().map(|m| m.title.as_str()).collect()
}

#[tokio::test]
async fn test_create_links_genres() {
    let state = init_state().await;
    add_genres(&state, &["thriller", "crime"]).await;

    let mut req = new_movie("Heat", &["thriller", "crime", "crime"]);
    req.release_date = date(1995, 12, 15);
    let movie = MovieService::create(&state, req).await.unwrap();

    assert_eq!(movie.title, "Heat");
    assert_eq!(movie.release_date, date(1995, 12, 15));
    assert_eq!(movie.genre_names(), vec!["crime", "thriller"]);
    assert_eq!(count_rows(&state, "movie_genres").await, 2);
}

#[tokio::test]
async fn test_create_with_unknown_genre_persists_nothing() {
    let state = init_state().await;
    add_genres(&state, &["drama"]).await;

    let err = MovieService::create(&state, new_movie("Ghost", &["drama", "supernatural"]))
        .await
        .unwrap_err();
    assert!(matches!(&err, AppError::NotFound(m) if m.contains("supernatural")), "unexpected error: {err:?}");

    assert_eq!(count_rows(&state, "movies").await, 0);
    assert_eq!(count_rows(&state, "movie_genres").await, 0);
}

#[tokio::test]
async fn test_find_all_paginates_with_total_count() {
    let state = init_state().await;
    add_genres(&state, &["drama", "comedy"]).await;
    for i in 1..=25 {
        add_movie(&state, &format!("Drama {:02}", i), &["drama"]).await;
    }
    add_movie(&state, "Airplane!", &["comedy"]).await;

    let query = GetMoviesQuery {
        genre: Some("drama".into()),
        page: Some(2),
        page_size: Some(10),
        ..Default::default()
    };
    let page = MovieService::find_all(&state, query).await.unwrap();

    assert_eq!(page.items.len(), 10);
    assert_eq!(page.pagination.total_count, 25);
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.items[0].title, "Drama 11");
    assert_eq!(page.items[9].title, "Drama 20");
    assert!(page.items.iter().all(|m| m.genre_names() == vec!["drama"]));

    let last = MovieService::find_all(
        &state,
        GetMoviesQuery {
            genre: Some("DRAMA".into()),
            page: Some(3),
            page_size: Some(10),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(last.items.len(), 5);
    assert_eq!(last.pagination.total_count, 25);
}

#[tokio::test]
async fn test_sorting_breaks_ties_by_id() {
    let state = init_state().await;
    add_genres(&state, &["horror"]).await;
    let first = add_movie(&state, "The Thing", &["horror"]).await;
    let alien = add_movie(&state, "Alien", &["horror"]).await;
    let second = add_movie(&state, "The Thing", &["horror"]).await;

    for direction in [SortingDirection::Asc, SortingDirection::Desc] {
        let page = MovieService::find_all(
            &state,
            GetMoviesQuery {
                sort_by: Some(MoviesSortBy::Title),
                sorting_direction: Some(direction),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let ids: Vec<i64> = page.items.iter().map(|m| m.id).collect();
        match direction {
            SortingDirection::Asc => assert_eq!(ids, vec![alien.id, first.id, second.id]),
            SortingDirection::Desc => assert_eq!(ids, vec![first.id, second.id, alien.id]),
        }
    }
}

#[tokio::test]
async fn test_sort_by_release_date_descending() {
    let state = init_state().await;
    add_genres(&state, &["drama"]).await;
    for (title, year) in [("Middle", 1990), ("Newest", 2020), ("Oldest", 1950)] {
        let mut req = new_movie(title, &["drama"]);
        req.release_date = date(year, 6, 1);
        MovieService::create(&state, req).await.unwrap();
    }

    let page = MovieService::find_all(
        &state,
        GetMoviesQuery {
            sort_by: Some(MoviesSortBy::ReleaseDate),
            sorting_direction: Some(SortingDirection::Desc),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(titles(&page.items), vec!["Newest", "Middle", "Oldest"]);
}

#[tokio::test]
async fn test_filters_combine_with_and_search_with_or() {
    let state = init_state().await;
    add_genres(&state, &["drama", "comedy"]).await;
    add_movie(&state, "Drama Queen", &["comedy"]).await;
    add_movie(&state, "Heat", &["drama"]).await;
    add_movie(&state, "Up", &["comedy"]).await;

    let both = MovieService::find_all(
        &state,
        GetMoviesQuery {
            title: Some("drama".into()),
            genre: Some("drama".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(both.items.is_empty());
    assert_eq!(both.pagination.total_count, 0);

    let by_title = MovieService::find_all(
        &state,
        GetMoviesQuery {
            title: Some("QUEEN".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(titles(&by_title.items), vec!["Drama Queen"]);

    let found = MovieService::search(
        &state,
        SearchMoviesQuery {
            title_or_genre: "drama".into(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(titles(&found.items), vec!["Drama Queen", "Heat"]);
    assert_eq!(found.pagination.total_count, 2);
}

#[tokio::test]
async fn test_search_matches_genre_substring() {
    let state = init_state().await;
    add_genres(&state, &["science fiction", "romance"]).await;
    add_movie(&state, "Solaris", &["science fiction"]).await;
    add_movie(&state, "Notting Hill", &["romance"]).await;

    let found = MovieService::search(
        &state,
        SearchMoviesQuery {
            title_or_genre: "Fiction".into(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(titles(&found.items), vec!["Solaris"]);
    assert_eq!(found.items[0].genre_names(), vec!["science fiction"]);
}

#[tokio::test]
async fn test_find_by_id_not_found() {
    let state = init_state().await;
    let err = MovieService::find_by_id(&state, 42).await.unwrap_err();
    assert!(matches!(&err, AppError::NotFound(m) if m == "Movie with id 42 not found"));
}

#[tokio::test]
async fn test_update_fields_and_genre_diff() {
    let state = init_state().await;
    add_genres(&state, &["action", "comedy", "drama"]).await;
    let movie = add_movie(&state, "Rush Hour", &["action", "drama"]).await;

    let updated = MovieService::update(
        &state,
        movie.id,
        UpdateMovieRequest {
            title: Some("Rush Hour 2".into()),
            release_date: Some(date(2001, 8, 3)),
            genres_to_add: Some(vec!["comedy".into()]),
            genres_to_remove: Some(vec!["drama".into()]),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.title, "Rush Hour 2");
    assert_eq!(updated.description, movie.description);
    assert_eq!(updated.release_date, date(2001, 8, 3));
    assert_eq!(updated.genre_names(), vec!["action", "comedy"]);
}

#[tokio::test]
async fn test_update_add_wins_over_remove() {
    let state = init_state().await;
    add_genres(&state, &["action", "drama"]).await;
    let movie = add_movie(&state, "Gladiator", &["action"]).await;

    let updated = MovieService::update(
        &state,
        movie.id,
        UpdateMovieRequest {
            genres_to_add: Some(vec!["drama".into(), "action".into()]),
            genres_to_remove: Some(vec!["drama".into(), "action".into()]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.genre_names(), vec!["action", "drama"]);
}

#[tokio::test]
async fn test_update_with_unknown_genre_changes_nothing() {
    let state = init_state().await;
    add_genres(&state, &["drama"]).await;
    let movie = add_movie(&state, "Whiplash", &["drama"]).await;

    let err = MovieService::update(
        &state,
        movie.id,
        UpdateMovieRequest {
            title: Some("Renamed".into()),
            genres_to_add: Some(vec!["x".into()]),
            genres_to_remove: Some(vec!["drama".into()]),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(&err, AppError::NotFound(m) if m.contains("\"x\"")));

    let reloaded = MovieService::find_by_id(&state, movie.id).await.unwrap();
    assert_eq!(reloaded, movie);
}

#[tokio::test]
async fn test_update_missing_movie() {
    let state = init_state().await;
    let err = MovieService::update(&state, 7, UpdateMovieRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_remove_returns_movie_and_keeps_genres() {
    let state = init_state().await;
    add_genres(&state, &["drama", "music"]).await;
    let movie = add_movie(&state, "Amadeus", &["drama", "music"]).await;

    let removed = MovieService::remove(&state, movie.id).await.unwrap();
    assert_eq!(removed, movie);

    assert_eq!(count_rows(&state, "movies").await, 0);
    assert_eq!(count_rows(&state, "movie_genres").await, 0);
    assert_eq!(count_rows(&state, "genres").await, 2);

    let err = MovieService::find_by_id(&state, movie.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let err = MovieService::remove(&state, movie.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_title_match_folds_non_ascii_capitals() {
    let state = init_state().await;
    add_genres(&state, &["drama"]).await;
    add_movie(&state, "ÉCOLE DE NUIT", &["drama"]).await;
    add_movie(&state, "Ödipus", &["drama"]).await;
    add_movie(&state, "Heat", &["drama"]).await;

    for term in ["ÉCOLE", "école", "de nuit"] {
        let page = MovieService::find_all(
            &state,
            GetMoviesQuery {
                title: Some(term.into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(titles(&page.items), vec!["ÉCOLE DE NUIT"], "title filter {term:?}");
        assert_eq!(page.pagination.total_count, 1);
    }

    for term in ["Ödipus", "ÖDIPUS", "ödip"] {
        let found = MovieService::search(
            &state,
            SearchMoviesQuery {
                title_or_genre: term.into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(titles(&found.items), vec!["Ödipus"], "search {term:?}");
    }
}

#[tokio::test]
async fn test_title_match_follows_renamed_title() {
    let state = init_state().await;
    add_genres(&state, &["drama"]).await;
    let movie = add_movie(&state, "Draft", &["drama"]).await;

    MovieService::update(
        &state,
        movie.id,
        UpdateMovieRequest {
            title: Some("ÇA COMMENCE AUJOURD'HUI".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let by_new = MovieService::find_all(
        &state,
        GetMoviesQuery {
            title: Some("ça commence".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_new.pagination.total_count, 1);

    let by_old = MovieService::find_all(
        &state,
        GetMoviesQuery {
            title: Some("draft".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_old.pagination.total_count, 0);
}

#[tokio::test]
async fn test_sort_by_title_ignores_case() {
    let state = init_state().await;
    add_genres(&state, &["drama"]).await;
    for title in ["Zeta", "alpha", "Mid"] {
        add_movie(&state, title, &["drama"]).await;
    }

    let page = MovieService::find_all(
        &state,
        GetMoviesQuery {
            sort_by: Some(MoviesSortBy::Title),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(titles(&page.items), vec!["alpha", "Mid", "Zeta"]);
}

#[tokio::test]
async fn test_update_with_unknown_genre_to_remove_changes_nothing() {
    let state = init_state().await;
    add_genres(&state, &["drama", "comedy"]).await;
    let movie = add_movie(&state, "Whiplash", &["drama"]).await;

    let err = MovieService::update(
        &state,
        movie.id,
        UpdateMovieRequest {
            title: Some("Renamed".into()),
            genres_to_add: Some(vec!["comedy".into()]),
            genres_to_remove: Some(vec!["ghost".into()]),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(&err, AppError::NotFound(m) if m.contains("\"ghost\"")), "unexpected error: {err:?}");

    let reloaded = MovieService::find_by_id(&state, movie.id).await.unwrap();
    assert_eq!(reloaded, movie);
}

#[tokio::test]
async fn test_write_failures_surface_as_internal() {
    let state = init_state().await;
    add_genres(&state, &["drama"]).await;
    let movie = add_movie(&state, "Whiplash", &["drama"]).await;

    sqlx::query(
        "CREATE TRIGGER movies_read_only_insert BEFORE INSERT ON movies \
         BEGIN SELECT RAISE(ABORT, 'storage offline'); END",
    )
    .execute(&state.db)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TRIGGER movies_read_only_update BEFORE UPDATE ON movies \
         BEGIN SELECT RAISE(ABORT, 'storage offline'); END",
    )
    .execute(&state.db)
    .await
    .unwrap();

    let err = MovieService::create(&state, new_movie("Heat", &["drama"]))
        .await
        .unwrap_err();
    assert!(matches!(&err, AppError::Internal(m) if m == "Failed to create movie"), "unexpected error: {err:?}");
    assert!(!err.to_string().contains("storage offline"));
    assert_eq!(count_rows(&state, "movies").await, 1);

    let err = MovieService::update(
        &state,
        movie.id,
        UpdateMovieRequest {
            title: Some("Renamed".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(&err, AppError::Internal(m) if m == "Failed to update movie"), "unexpected error: {err:?}");

    let reloaded = MovieService::find_by_id(&state, movie.id).await.unwrap();
    assert_eq!(reloaded, movie);
}
