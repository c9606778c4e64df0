use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn execute(db: &DatabaseConnection, sql: &str) -> Result<(), DbErr> {
    db.execute(Statement::from_string(
        db.get_database_backend(),
        sql.to_owned(),
    ))
    .await?;
    Ok(())
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // sqlx turns this on for new connections already; keep it explicit
    execute(db, "PRAGMA foreign_keys = ON").await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS authors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name VARCHAR(100) NOT NULL,
            last_name VARCHAR(100) NOT NULL,
            date_of_birth DATE,
            date_of_death DATE
        )
        "#,
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS languages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR(200) NOT NULL UNIQUE
        )
        "#,
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS genres (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR(200) NOT NULL UNIQUE
        )
        "#,
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title VARCHAR(200) NOT NULL,
            summary VARCHAR(2000) NOT NULL,
            isbn VARCHAR(13) NOT NULL UNIQUE,
            author_id INTEGER,
            language_id INTEGER,
            FOREIGN KEY (author_id) REFERENCES authors(id) ON DELETE SET NULL,
            FOREIGN KEY (language_id) REFERENCES languages(id) ON DELETE SET NULL
        )
        "#,
    )
    .await?;

    // Create book_genres junction table
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS book_genres (
            book_id INTEGER NOT NULL,
            genre_id INTEGER NOT NULL,
            PRIMARY KEY (book_id, genre_id),
            FOREIGN KEY (book_id) REFERENCES books(id) ON DELETE CASCADE,
            FOREIGN KEY (genre_id) REFERENCES genres(id) ON DELETE CASCADE
        )
        "#,
    )
    .await?;

    // Instance ids are v4 UUIDs stored as 16-byte blobs
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS book_instances (
            id BLOB PRIMARY KEY NOT NULL,
            book_id INTEGER NOT NULL,
            imprint VARCHAR(200) NOT NULL,
            due_back DATE,
            status VARCHAR(1) NOT NULL DEFAULT 'm'
                CHECK (status IN ('m', 'o', 'a', 'r')),
            FOREIGN KEY (book_id) REFERENCES books(id) ON DELETE RESTRICT
        )
        "#,
    )
    .await?;

    execute(
        db,
        "CREATE INDEX IF NOT EXISTS idx_book_instances_due_back ON book_instances(due_back)",
    )
    .await?;

    tracing::debug!("Catalog schema is up to date");

    Ok(())
}
