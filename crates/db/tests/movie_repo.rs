//! Integration tests for the catalog repositories and `PgMovieStore`.
//!
//! Exercises the SQL layer against a real database:
//! - Seeded genres and name ordering
//! - Movie create/find/list ordering
//! - Update keeping or replacing poster bytes
//! - Delete and the genre join
//! - Table constraints (poster size, genre foreign key)

use movies_core::catalog::NewMovie;
use movies_core::store::MovieStore;
use movies_db::repositories::{GenreRepo, MovieRepo};
use movies_db::PgMovieStore;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn genre_id(pool: &PgPool, name: &str) -> i64 {
    GenreRepo::list(pool)
        .await
        .unwrap()
        .into_iter()
        .find(|g| g.name == name)
        .unwrap_or_else(|| panic!("genre {name} should be seeded"))
        .id
}

fn new_movie(title: &str, rating: f64, genre_id: i64, poster: Vec<u8>) -> NewMovie {
    NewMovie {
        title: title.to_string(),
        year: 2010,
        rating,
        synopsis: format!("{title} synopsis"),
        genre_id,
        poster,
    }
}

// ---------------------------------------------------------------------------
// Genres
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_genres_are_seeded_and_ordered_by_name(pool: PgPool) {
    let genres = GenreRepo::list(&pool).await.unwrap();
    assert_eq!(genres.len(), 18);

    let names: Vec<&str> = genres.iter().map(|g| g.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert_eq!(names[0], "Action");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_genre_by_id(pool: PgPool) {
    let drama = genre_id(&pool, "Drama").await;

    let found = GenreRepo::find_by_id(&pool, drama).await.unwrap().unwrap();
    assert_eq!(found.name, "Drama");
    assert!(GenreRepo::find_by_id(&pool, 9_999).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_find_movie(pool: PgPool) {
    let scifi = genre_id(&pool, "Science Fiction").await;

    let created = MovieRepo::create(&pool, &new_movie("Inception", 8.8, scifi, vec![1; 500]))
        .await
        .unwrap();
    assert_eq!(created.title, "Inception");
    assert_eq!(created.genre_id, scifi);
    assert_eq!(created.poster.len(), 500);

    let found = MovieRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(found.rating, 8.8);
    assert_eq!(found.poster, vec![1; 500]);
    assert!(MovieRepo::find_by_id(&pool, created.id + 1).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_orders_by_rating_then_title(pool: PgPool) {
    let drama = genre_id(&pool, "Drama").await;
    for (title, rating) in [("Beta", 7.0), ("Alpha", 7.0), ("Top", 9.1), ("Low", 3.2)] {
        MovieRepo::create(&pool, &new_movie(title, rating, drama, vec![1]))
            .await
            .unwrap();
    }

    let titles: Vec<String> = MovieRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.title)
        .collect();
    assert_eq!(titles, ["Top", "Alpha", "Beta", "Low"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_with_genre_joins_name(pool: PgPool) {
    let horror = genre_id(&pool, "Horror").await;
    let created = MovieRepo::create(&pool, &new_movie("Alien", 8.5, horror, vec![7, 7]))
        .await
        .unwrap();

    let row = MovieRepo::find_with_genre(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.genre_name, "Horror");
    assert_eq!(row.movie.title, "Alien");
    assert_eq!(row.movie.poster, vec![7, 7]);

    assert!(MovieRepo::find_with_genre(&pool, created.id + 1)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_overwrites_fields(pool: PgPool) {
    let drama = genre_id(&pool, "Drama").await;
    let comedy = genre_id(&pool, "Comedy").await;
    let created = MovieRepo::create(&pool, &new_movie("Draft", 5.0, drama, vec![1, 2, 3]))
        .await
        .unwrap();

    let mut movie: movies_core::catalog::Movie = created.into();
    movie.title = "Final".to_string();
    movie.genre_id = comedy;
    movie.rating = 6.5;

    assert!(MovieRepo::update(&pool, &movie).await.unwrap());

    let stored = MovieRepo::find_by_id(&pool, movie.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Final");
    assert_eq!(stored.genre_id, comedy);
    assert_eq!(stored.rating, 6.5);
    assert_eq!(stored.poster, vec![1, 2, 3]);
    assert_eq!(stored.created_at, movie.created_at);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_row_returns_false(pool: PgPool) {
    let drama = genre_id(&pool, "Drama").await;
    let created = MovieRepo::create(&pool, &new_movie("Gone", 5.0, drama, vec![1]))
        .await
        .unwrap();
    let mut movie: movies_core::catalog::Movie = created.into();
    assert!(MovieRepo::delete(&pool, movie.id).await.unwrap());

    movie.title = "Ghost".to_string();
    assert!(!MovieRepo::update(&pool, &movie).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_reports_rows_affected(pool: PgPool) {
    let drama = genre_id(&pool, "Drama").await;
    let created = MovieRepo::create(&pool, &new_movie("Brief", 5.0, drama, vec![1]))
        .await
        .unwrap();

    assert!(MovieRepo::delete(&pool, created.id).await.unwrap());
    assert!(!MovieRepo::delete(&pool, created.id).await.unwrap());
    assert!(MovieRepo::find_by_id(&pool, created.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_empty_poster_is_rejected(pool: PgPool) {
    let drama = genre_id(&pool, "Drama").await;
    let result = MovieRepo::create(&pool, &new_movie("Blank", 5.0, drama, Vec::new())).await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_oversized_poster_is_rejected(pool: PgPool) {
    let drama = genre_id(&pool, "Drama").await;
    let result =
        MovieRepo::create(&pool, &new_movie("Huge", 5.0, drama, vec![0; 1_048_577])).await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_genre_violates_foreign_key(pool: PgPool) {
    let result = MovieRepo::create(&pool, &new_movie("Orphan", 5.0, 9_999, vec![1])).await;
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// PgMovieStore
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_store_round_trip_through_trait(pool: PgPool) {
    let store = PgMovieStore::new(pool.clone());
    let western = genre_id(&pool, "Western").await;

    let movie = store
        .insert_movie(&new_movie("Unforgiven", 8.2, western, vec![9; 10]))
        .await
        .unwrap();

    let details = store.find_movie_details(movie.id).await.unwrap().unwrap();
    assert_eq!(details.genre.name, "Western");
    assert_eq!(details.movie.poster, vec![9; 10]);

    let summaries = store.list_movies().await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].title, "Unforgiven");

    assert!(store.delete_movie(movie.id).await.unwrap());
    assert!(store.find_movie(movie.id).await.unwrap().is_none());
    assert!(!store.delete_movie(movie.id).await.unwrap());
}
