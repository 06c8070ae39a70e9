use crate::models::{Book, DiscoverFilters};

/// Check a book against the free-text search term
///
/// Matches case-insensitively against title, author, or genre.
#[inline]
pub fn matches_search(book: &Book, term: &str) -> bool {
    let term = term.to_lowercase();
    if term.is_empty() {
        return true;
    }

    book.title.to_lowercase().contains(&term)
        || book.author.to_lowercase().contains(&term)
        || book
            .genre
            .as_deref()
            .map(|g| g.to_lowercase().contains(&term))
            .unwrap_or(false)
}

/// Check a book against all discovery filters
#[inline]
pub fn matches_filters(book: &Book, filters: &DiscoverFilters) -> bool {
    if let Some(term) = &filters.search {
        if !matches_search(book, term) {
            return false;
        }
    }

    if let Some(genre) = &filters.genre {
        if book.genre.as_deref() != Some(genre.as_str()) {
            return false;
        }
    }

    if let Some(condition) = filters.condition {
        if book.condition != condition {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookCondition;

    fn create_book(title: &str, author: &str, genre: Option<&str>, condition: BookCondition) -> Book {
        Book {
            id: "b1".to_string(),
            title: title.to_string(),
            author: author.to_string(),
            isbn: None,
            condition,
            description: None,
            genre: genre.map(|g| g.to_string()),
            cover_url: None,
            available_for_swap: true,
            owner_id: "owner".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_search_matches_title_author_genre() {
        let book = create_book("Dune", "Frank Herbert", Some("Sci-Fi"), BookCondition::Good);

        assert!(matches_search(&book, "dune"));
        assert!(matches_search(&book, "herbert"));
        assert!(matches_search(&book, "sci"));
        assert!(!matches_search(&book, "austen"));
    }

    #[test]
    fn test_filters_genre_and_condition() {
        let book = create_book("Dune", "Frank Herbert", Some("Sci-Fi"), BookCondition::Good);

        let all = DiscoverFilters::default();
        assert!(matches_filters(&book, &all));

        let wrong_genre = DiscoverFilters {
            genre: Some("Romance".to_string()),
            ..Default::default()
        };
        assert!(!matches_filters(&book, &wrong_genre));

        let wrong_condition = DiscoverFilters {
            condition: Some(BookCondition::Poor),
            ..Default::default()
        };
        assert!(!matches_filters(&book, &wrong_condition));

        let exact = DiscoverFilters {
            search: Some("dune".to_string()),
            genre: Some("Sci-Fi".to_string()),
            condition: Some(BookCondition::Good),
        };
        assert!(matches_filters(&book, &exact));
    }

    #[test]
    fn test_filters_missing_genre_on_book() {
        let book = create_book("Dune", "Frank Herbert", None, BookCondition::Good);

        let wants_genre = DiscoverFilters {
            genre: Some("Sci-Fi".to_string()),
            ..Default::default()
        };
        assert!(!matches_filters(&book, &wants_genre));
    }
}
