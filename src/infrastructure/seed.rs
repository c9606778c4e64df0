use chrono::{Duration, NaiveDate};
use sea_orm::*;
use uuid::Uuid;

use crate::domain::{LoanStatus, overdue};
use crate::models::{author, book, book_genres, book_instance, genre, language};

const GENRES: [&str; 7] = [
    "Fantasy",
    "Fiction",
    "Non-Fiction",
    "Science Fiction",
    "Mystery",
    "Romance",
    "History",
];

/// Populate an empty catalog with a few authors, books and copies.
///
/// Does nothing when authors already exist.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    if author::Entity::find().count(db).await? > 0 {
        tracing::info!("Catalog already has data, skipping demo seed");
        return Ok(());
    }

    let txn = db.begin().await?;

    // 1. Genres and languages
    let mut genres = Vec::with_capacity(GENRES.len());
    for name in GENRES {
        let genre = genre::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        genres.push(genre);
    }

    let english = language::ActiveModel {
        name: Set("English".to_owned()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    // 2. Authors
    let tolkien = author::ActiveModel {
        first_name: Set("John Ronald Reuel".to_owned()),
        last_name: Set("Tolkien".to_owned()),
        date_of_birth: Set(NaiveDate::from_ymd_opt(1892, 1, 3)),
        date_of_death: Set(NaiveDate::from_ymd_opt(1973, 9, 2)),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let le_guin = author::ActiveModel {
        first_name: Set("Ursula".to_owned()),
        last_name: Set("Le Guin".to_owned()),
        date_of_birth: Set(NaiveDate::from_ymd_opt(1929, 10, 21)),
        date_of_death: Set(NaiveDate::from_ymd_opt(2018, 1, 22)),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    // 3. Books with their genres (indexes into GENRES)
    let books = [
        (
            "The Hobbit",
            "Bilbo Baggins is swept into a quest to reclaim the dwarves' treasure from Smaug.",
            "9780261103344",
            tolkien.id,
            vec![0, 1],
        ),
        (
            "A Wizard of Earthsea",
            "A young mage unleashes a shadow on the world and must hunt it down.",
            "9780553383041",
            le_guin.id,
            vec![0, 1, 3],
        ),
    ];

    let today = overdue::today();
    for (title, summary, isbn, author_id, genre_indexes) in books {
        let book = book::ActiveModel {
            title: Set(title.to_owned()),
            summary: Set(summary.to_owned()),
            isbn: Set(isbn.to_owned()),
            author_id: Set(Some(author_id)),
            language_id: Set(Some(english.id)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for index in genre_indexes {
            book_genres::ActiveModel {
                book_id: Set(book.id),
                genre_id: Set(genres[index].id),
            }
            .insert(&txn)
            .await?;
        }

        // 4. One copy on the shelf, one out on loan and overdue
        let copies = [
            (LoanStatus::Available, None),
            (LoanStatus::OnLoan, Some(today - Duration::weeks(1))),
        ];
        for (status, due_back) in copies {
            book_instance::ActiveModel {
                id: Set(Uuid::new_v4()),
                book_id: Set(book.id),
                imprint: Set("Demo Imprint, 2016".to_owned()),
                due_back: Set(due_back),
                status: Set(status.code().to_owned()),
            }
            .insert(&txn)
            .await?;
        }
    }

    txn.commit().await?;
    Ok(())
}
