use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::Duration;
use locallibrary::db;
use locallibrary::domain::overdue;
use locallibrary::server;
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

// Helper to create a router over a fresh in-memory database
async fn setup_test_app() -> Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    server::build_router(db, &[])
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().uri(uri).method(method);
    let req = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    // Extractor rejections answer in plain text
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

// Creates Big Bob, English, the seven genres, and one book using the first
// `genre_count` genres. Returns the book id.
async fn create_test_book(app: &Router, genre_count: usize) -> i64 {
    let (status, author) = send(
        app,
        "POST",
        "/catalog/authors",
        Some(json!({"first_name": "Big", "last_name": "Bob"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, language) = send(
        app,
        "POST",
        "/catalog/languages",
        Some(json!({"name": "English"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let mut genre_ids = Vec::new();
    for name in [
        "Fantasy",
        "Fiction",
        "Non-Fiction",
        "Science Fiction",
        "Mystery",
        "Romance",
        "History",
    ] {
        let (status, genre) =
            send(app, "POST", "/catalog/genres", Some(json!({"name": name}))).await;
        assert_eq!(status, StatusCode::CREATED);
        genre_ids.push(genre["genre"]["id"].as_i64().unwrap());
    }

    let (status, book) = send(
        app,
        "POST",
        "/catalog/books",
        Some(json!({
            "title": "Lorem ipsum dolor",
            "summary": "Sit amet, consectetur adipiscing elit.",
            "isbn": "9781234567897",
            "author_id": author["author"]["id"],
            "language_id": language["language"]["id"],
            "genre": genre_ids.into_iter().take(genre_count).collect::<Vec<_>>(),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", book);
    book["book"]["id"].as_i64().unwrap()
}

async fn create_instance(app: &Router, book_id: i64, extra: Value) -> Value {
    let mut payload = json!({
        "book_id": book_id,
        "imprint": "Unlikely Imprint, 2016",
    });
    if let (Some(target), Some(fields)) = (payload.as_object_mut(), extra.as_object()) {
        for (k, v) in fields {
            target.insert(k.clone(), v.clone());
        }
    }
    let (status, body) = send(app, "POST", "/catalog/bookinstances", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["bookinstance"].clone()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app().await;
    let (status, body) = send(&app, "GET", "/catalog/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_author_detail_reports_display_and_url() {
    let app = setup_test_app().await;
    let (status, _) = send(
        &app,
        "POST",
        "/catalog/authors",
        Some(json!({"first_name": "Big", "last_name": "Bob", "date_of_death": "1999-12-31"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", "/catalog/author/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["author"]["display"], "Bob, Big");
    assert_eq!(body["author"]["url"], "/catalog/author/1");
    assert_eq!(body["author"]["date_of_death"], "1999-12-31");
}

#[tokio::test]
async fn test_authors_are_listed_by_last_name() {
    let app = setup_test_app().await;
    for (first, last) in [("Ursula", "Le Guin"), ("Big", "Bob"), ("Alice", "Bob")] {
        send(
            &app,
            "POST",
            "/catalog/authors",
            Some(json!({"first_name": first, "last_name": last})),
        )
        .await;
    }

    let (_, body) = send(&app, "GET", "/catalog/authors", None).await;
    let names: Vec<&str> = body["authors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["display"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bob, Alice", "Bob, Big", "Le Guin, Ursula"]);
}

#[tokio::test]
async fn test_overlong_and_missing_fields_are_rejected() {
    let app = setup_test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/catalog/authors",
        Some(json!({"first_name": "x".repeat(101), "last_name": "Bob"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("first_name"));

    let (status, _) = send(
        &app,
        "POST",
        "/catalog/authors",
        Some(json!({"first_name": "Big", "last_name": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/catalog/books",
        Some(json!({
            "title": "Short ISBN",
            "summary": "s",
            "isbn": "123",
            "author_id": 1,
            "language_id": 1,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_book_detail_shows_first_three_genres() {
    let app = setup_test_app().await;
    let book_id = create_test_book(&app, 4).await;
    assert_eq!(book_id, 1);

    let (status, body) = send(&app, "GET", "/catalog/book/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["display"], "Lorem ipsum dolor");
    assert_eq!(body["book"]["url"], "/catalog/book/1");
    assert_eq!(body["book"]["author"], "Bob, Big");
    assert_eq!(body["book"]["language"], "English");
    assert_eq!(body["book"]["genres"].as_array().unwrap().len(), 4);
    assert_eq!(body["book"]["display_genre"], "Fantasy, Fiction, Non-Fiction");
}

#[tokio::test]
async fn test_set_genres_collapses_duplicates() {
    let app = setup_test_app().await;
    let book_id = create_test_book(&app, 0).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/catalog/book/{}/genres", book_id),
        Some(json!({"genre": [5, 2, 5]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["display_genre"], "Fiction, Mystery");

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/catalog/book/{}/genres", book_id),
        Some(json!({"genre": [999]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_book_instance_lifecycle() {
    let app = setup_test_app().await;
    let book_id = create_test_book(&app, 3).await;

    let instance = create_instance(&app, book_id, json!({})).await;
    let id = instance["id"].as_str().unwrap().to_string();
    assert_eq!(instance["status"], "m");
    assert_eq!(instance["is_overdue"], false);
    assert_eq!(instance["display"], format!("{} (Lorem ipsum dolor)", id));
    assert_eq!(instance["url"], format!("/catalog/bookinstance/{}", id));

    let today = overdue::today();
    let detail = format!("/catalog/bookinstance/{}", id);

    // Due today is not overdue
    let (status, body) = send(&app, "PATCH", &detail, Some(json!({"due_back": today}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookinstance"]["is_overdue"], false);

    // Due a week ago is overdue whatever the status
    let (_, body) = send(
        &app,
        "PATCH",
        &detail,
        Some(json!({"due_back": today - Duration::weeks(1), "status": "a"})),
    )
    .await;
    assert_eq!(body["bookinstance"]["is_overdue"], true);
    assert_eq!(body["bookinstance"]["status_label"], "Available");

    // Due next week is not overdue
    let (_, body) = send(
        &app,
        "PATCH",
        &detail,
        Some(json!({"due_back": today + Duration::weeks(1)})),
    )
    .await;
    assert_eq!(body["bookinstance"]["is_overdue"], false);

    // Clearing the date leaves the status alone
    let (_, body) = send(&app, "PATCH", &detail, Some(json!({"due_back": null}))).await;
    assert_eq!(body["bookinstance"]["due_back"], Value::Null);
    assert_eq!(body["bookinstance"]["status"], "a");

    let (status, _) = send(&app, "DELETE", &detail, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", &detail, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_status_is_rejected() {
    let app = setup_test_app().await;
    let book_id = create_test_book(&app, 0).await;

    let (status, _) = send(
        &app,
        "POST",
        "/catalog/bookinstances",
        Some(json!({"book_id": book_id, "imprint": "x", "status": "z"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_overdue_listing_and_status_filter() {
    let app = setup_test_app().await;
    let book_id = create_test_book(&app, 0).await;
    let today = overdue::today();

    let late = create_instance(
        &app,
        book_id,
        json!({"status": "o", "due_back": today - Duration::days(1)}),
    )
    .await;
    create_instance(&app, book_id, json!({"status": "o", "due_back": today})).await;
    create_instance(&app, book_id, json!({"status": "a"})).await;

    let (status, body) = send(&app, "GET", "/catalog/bookinstances/overdue", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["bookinstances"][0]["id"], late["id"]);

    let (_, body) = send(&app, "GET", "/catalog/bookinstances?status=o", None).await;
    assert_eq!(body["total"], 2);

    let (_, body) = send(&app, "GET", "/catalog", None).await;
    assert_eq!(body["num_books"], 1);
    assert_eq!(body["num_instances"], 3);
    assert_eq!(body["num_instances_available"], 1);
    assert_eq!(body["num_authors"], 1);
    assert_eq!(body["num_genres"], 7);
}

#[tokio::test]
async fn test_book_with_instances_cannot_be_deleted() {
    let app = setup_test_app().await;
    let book_id = create_test_book(&app, 0).await;
    create_instance(&app, book_id, json!({})).await;

    let (status, body) = send(&app, "DELETE", &format!("/catalog/book/{}", book_id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("instance"));

    let (status, _) = send(&app, "GET", &format!("/catalog/book/{}", book_id), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_book_without_instances_can_be_deleted() {
    let app = setup_test_app().await;
    let book_id = create_test_book(&app, 2).await;

    let (status, _) = send(&app, "DELETE", &format!("/catalog/book/{}", book_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", &format!("/catalog/book/{}", book_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_isbn_is_rejected() {
    let app = setup_test_app().await;
    create_test_book(&app, 0).await;

    let (status, body) = send(
        &app,
        "POST",
        "/catalog/books",
        Some(json!({
            "title": "Another title",
            "summary": "Same number, different book.",
            "isbn": "9781234567897",
            "author_id": 1,
            "language_id": 1,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("isbn"));

    let (_, body) = send(&app, "GET", "/catalog/books", None).await;
    assert_eq!(body["books"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_language_is_rejected() {
    let app = setup_test_app().await;
    let (status, _) = send(&app, "POST", "/catalog/languages", Some(json!({"name": "French"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, "POST", "/catalog/languages", Some(json!({"name": "French"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleting_author_keeps_their_books() {
    let app = setup_test_app().await;
    let book_id = create_test_book(&app, 0).await;

    let (status, _) = send(&app, "DELETE", "/catalog/author/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", &format!("/catalog/book/{}", book_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["author_id"], Value::Null);
    assert_eq!(body["book"]["author"], Value::Null);
    assert_eq!(body["book"]["language"], "English");
}

#[tokio::test]
async fn test_duplicate_genre_is_rejected() {
    let app = setup_test_app().await;
    let (status, _) = send(&app, "POST", "/catalog/genres", Some(json!({"name": "Poetry"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, "POST", "/catalog/genres", Some(json!({"name": "Poetry"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_entities_return_not_found() {
    let app = setup_test_app().await;
    for uri in [
        "/catalog/author/999",
        "/catalog/book/999",
        "/catalog/genre/999",
        "/catalog/language/999",
        "/catalog/bookinstance/00000000-0000-4000-8000-000000000000",
    ] {
        let (status, _) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
    }

    let (status, _) = send(&app, "DELETE", "/catalog/author/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_schema_exposes_field_metadata() {
    let app = setup_test_app().await;
    let (status, body) = send(&app, "GET", "/catalog/schema", None).await;
    assert_eq!(status, StatusCode::OK);

    let died = body["author"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["name"] == "date_of_death")
        .unwrap();
    assert_eq!(died["verbose_name"], "Died");

    let status_field = body["bookinstance"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["name"] == "status")
        .unwrap();
    assert_eq!(status_field["max_length"], 1);
    assert_eq!(status_field["help_text"], "Book availability");
}
