use crate::api;
use crate::domain;
use crate::services::catalog_service::CatalogSummary;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::catalog::index,
        api::catalog::field_schema,
        api::author::list_authors,
        api::author::create_author,
        api::author::get_author,
        api::author::delete_author,
        api::books::list_books,
        api::books::create_book,
        api::books::get_book,
        api::books::set_book_genres,
        api::books::delete_book,
        api::genre::list_genres,
        api::genre::create_genre,
        api::genre::get_genre,
        api::language::list_languages,
        api::language::create_language,
        api::language::get_language,
        api::book_instance::list_instances,
        api::book_instance::list_overdue,
        api::book_instance::create_instance,
        api::book_instance::get_instance,
        api::book_instance::update_instance,
        api::book_instance::delete_instance,
    ),
    components(
        schemas(
            CatalogSummary,
            domain::Author,
            domain::CreateAuthorInput,
            domain::Book,
            domain::CreateBookInput,
            domain::NamedEntry,
            domain::CreateNamedInput,
            domain::CreateBookInstanceInput,
            domain::schema::FieldSpec,
            api::books::SetGenresRequest,
            domain::BookInstance,
            domain::LoanStatus,
            domain::UpdateBookInstanceInput,
        )
    ),
    tags(
        (name = "locallibrary", description = "Local Library catalog API")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_every_catalog_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/catalog",
            "/catalog/health",
            "/catalog/schema",
            "/catalog/authors",
            "/catalog/author/{id}",
            "/catalog/books",
            "/catalog/book/{id}",
            "/catalog/book/{id}/genres",
            "/catalog/genres",
            "/catalog/genre/{id}",
            "/catalog/languages",
            "/catalog/language/{id}",
            "/catalog/bookinstances",
            "/catalog/bookinstances/overdue",
            "/catalog/bookinstance/{id}",
        ] {
            assert!(paths.contains_key(path), "{} is undocumented", path);
        }
        assert_eq!(paths.len(), 15);
        assert_eq!(paths["/catalog/bookinstance/{id}"].operations.len(), 3);
    }
}
