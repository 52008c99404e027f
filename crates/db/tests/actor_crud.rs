//! Integration tests for the actor repository.
//!
//! Exercises the repository against a real database:
//! - Identity assignment on create
//! - Unique (name, birth_date) enforcement
//! - Single-field patch updates
//! - Transactional delete of actor + association rows
//! - Left-join listing with movie titles

use assert_matches::assert_matches;
use kinotek_core::error::CatalogError;
use kinotek_db::models::actor::{ActorPatch, CreateActor};
use kinotek_db::models::movie::CreateMovie;
use kinotek_db::repositories::{ActorRepo, MovieRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_actor(name: &str, birth_date: &str) -> CreateActor {
    CreateActor {
        name: name.to_string(),
        sex: "m".to_string(),
        birth_date: birth_date.parse().unwrap(),
    }
}

fn new_movie(title: &str, actors: Vec<i64>) -> CreateMovie {
    CreateMovie {
        title: title.to_string(),
        description: String::new(),
        release_date: "2010-07-25".parse().unwrap(),
        rating: 8,
        actors,
    }
}

async fn association_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM actor_movie")
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Test: create assigns a storage identity
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn create_assigns_identity(pool: PgPool) {
    let actor = ActorRepo::create(&pool, &new_actor("Benedict Cumberbatch", "1976-07-19"))
        .await
        .unwrap();

    assert!(actor.id > 0);
    assert_eq!(actor.name, "Benedict Cumberbatch");
    assert_eq!(actor.sex, "m");
    assert_eq!(actor.birth_date.to_string(), "1976-07-19");
}

// ---------------------------------------------------------------------------
// Test: (name, birth_date) uniqueness
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn duplicate_name_and_birth_date_rejected(pool: PgPool) {
    ActorRepo::create(&pool, &new_actor("Martin Freeman", "1971-09-08"))
        .await
        .unwrap();

    let err = ActorRepo::create(&pool, &new_actor("Martin Freeman", "1971-09-08"))
        .await
        .unwrap_err();
    assert_matches!(err, CatalogError::ActorAlreadyExists);

    // Same name with a different birth date is a different person.
    ActorRepo::create(&pool, &new_actor("Martin Freeman", "1980-01-01"))
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Test: single-field patch updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn update_applies_each_field(pool: PgPool) {
    let actor = ActorRepo::create(&pool, &new_actor("Andrew Scott", "1976-10-21"))
        .await
        .unwrap();

    ActorRepo::update(&pool, actor.id, &ActorPatch::Name("Andrew G. Scott".into()))
        .await
        .unwrap();
    ActorRepo::update(&pool, actor.id, &ActorPatch::Sex("f".into()))
        .await
        .unwrap();
    ActorRepo::update(
        &pool,
        actor.id,
        &ActorPatch::BirthDate("1977-10-21".parse().unwrap()),
    )
    .await
    .unwrap();

    let (name, sex, birth_date): (String, String, chrono::NaiveDate) =
        sqlx::query_as("SELECT name, sex, birth_date FROM actors WHERE id = $1")
            .bind(actor.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(name, "Andrew G. Scott");
    assert_eq!(sex, "f");
    assert_eq!(birth_date.to_string(), "1977-10-21");
}

#[sqlx::test(migrations = "../../migrations")]
async fn update_unknown_id_fails(pool: PgPool) {
    let err = ActorRepo::update(&pool, 9999, &ActorPatch::Name("Nobody".into()))
        .await
        .unwrap_err();
    assert_matches!(err, CatalogError::ActorDoesNotExist { id: Some(9999) });
}

#[sqlx::test(migrations = "../../migrations")]
async fn update_into_uniqueness_collision_fails(pool: PgPool) {
    ActorRepo::create(&pool, &new_actor("Jude Law", "1972-12-29"))
        .await
        .unwrap();
    let other = ActorRepo::create(&pool, &new_actor("Jude Lawson", "1972-12-29"))
        .await
        .unwrap();

    let err = ActorRepo::update(&pool, other.id, &ActorPatch::Name("Jude Law".into()))
        .await
        .unwrap_err();
    assert_matches!(err, CatalogError::ActorAlreadyExists);
}

// ---------------------------------------------------------------------------
// Test: delete of a missing actor leaves the association relation untouched
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn delete_unknown_id_leaves_associations_untouched(pool: PgPool) {
    let actor = ActorRepo::create(&pool, &new_actor("Robert Downey Jr", "1965-04-04"))
        .await
        .unwrap();
    MovieRepo::create(&pool, &new_movie("Sherlock Holmes", vec![actor.id]))
        .await
        .unwrap();
    assert_eq!(association_count(&pool).await, 1);

    let err = ActorRepo::delete(&pool, 9999).await.unwrap_err();
    assert_matches!(err, CatalogError::ActorDoesNotExist { id: Some(9999) });
    assert_eq!(association_count(&pool).await, 1);
}

// ---------------------------------------------------------------------------
// Test: delete removes the actor and its associations atomically
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn delete_removes_actor_and_associations(pool: PgPool) {
    let holmes = ActorRepo::create(&pool, &new_actor("Robert Downey Jr", "1965-04-04"))
        .await
        .unwrap();
    let watson = ActorRepo::create(&pool, &new_actor("Jude Law", "1972-12-29"))
        .await
        .unwrap();
    MovieRepo::create(&pool, &new_movie("Sherlock Holmes", vec![holmes.id, watson.id]))
        .await
        .unwrap();

    ActorRepo::delete(&pool, holmes.id).await.unwrap();

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM actors WHERE id = $1")
        .bind(holmes.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
    assert_eq!(association_count(&pool).await, 1);

    let movies = MovieRepo::list_by_title(&pool).await.unwrap();
    assert_eq!(movies[0].actors, vec!["Jude Law"]);
}

// ---------------------------------------------------------------------------
// Test: an interrupted delete leaves both rows present
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn interrupted_delete_is_not_partially_durable(pool: PgPool) {
    use sqlx::Acquire;

    let actor = ActorRepo::create(&pool, &new_actor("Rachel McAdams", "1978-11-17"))
        .await
        .unwrap();
    MovieRepo::create(&pool, &new_movie("Sherlock Holmes", vec![actor.id]))
        .await
        .unwrap();

    // Replay the delete's first statement, then abandon the transaction
    // the way a cancelled call would: dropped without commit.
    let mut conn = pool.acquire().await.unwrap();
    {
        let mut tx = conn.begin().await.unwrap();
        sqlx::query("DELETE FROM actor_movie WHERE actor_id = $1")
            .bind(actor.id)
            .execute(&mut *tx)
            .await
            .unwrap();
    }

    let actors: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM actors WHERE id = $1")
        .bind(actor.id)
        .fetch_one(&mut *conn)
        .await
        .unwrap();
    assert_eq!(actors, 1);
    assert_eq!(association_count(&pool).await, 1);
}

// ---------------------------------------------------------------------------
// Test: listing aggregates movie titles, empty list for idle actors
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn list_aggregates_movie_titles(pool: PgPool) {
    let busy = ActorRepo::create(&pool, &new_actor("Benedict Cumberbatch", "1976-07-19"))
        .await
        .unwrap();
    let idle = ActorRepo::create(&pool, &new_actor("Zachary Quinto", "1977-06-02"))
        .await
        .unwrap();
    MovieRepo::create(&pool, &new_movie("Sherlock", vec![busy.id]))
        .await
        .unwrap();
    MovieRepo::create(&pool, &new_movie("The Imitation Game", vec![busy.id]))
        .await
        .unwrap();

    let listing = ActorRepo::list_with_movies(&pool).await.unwrap();
    assert_eq!(listing.len(), 2);

    // Ordered by name: Benedict before Zachary.
    assert_eq!(listing[0].actor.id, busy.id);
    assert_eq!(listing[0].movies, vec!["Sherlock", "The Imitation Game"]);
    assert_eq!(listing[1].actor.id, idle.id);
    assert!(listing[1].movies.is_empty());
}
