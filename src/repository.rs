// Record repository: pure operations over a loaded collection, plus a
// storage-backed wrapper that runs each mutation as one load-modify-save.

use crate::book::{Book, Field, FieldValue};
use crate::coerce::{self, Edit};
use crate::storage::{Storage, StorageError};

/// One past the largest id in use, or 1 for an empty collection.
pub fn next_id(books: &[Book]) -> u64 {
    books.iter().map(|b| b.id).max().unwrap_or(0) + 1
}

pub fn find_by_id(books: &[Book], id: u64) -> Option<&Book> {
    books.iter().find(|b| b.id == id)
}

/// Drops every book with `id`. Returns false, leaving `books` untouched,
/// when there was none.
pub fn remove(books: &mut Vec<Book>, id: u64) -> bool {
    let before = books.len();
    books.retain(|b| b.id != id);
    books.len() != before
}

/// Appends a book built from raw creation input and returns a copy of it.
/// Fields without an entry in `values` are absent.
pub fn add(books: &mut Vec<Book>, values: &[(Field, String)]) -> Book {
    let mut book = Book::empty(next_id(books));
    for (field, raw) in values {
        book.set(*field, coerce::for_new(*field, raw));
    }
    books.push(book.clone());
    book
}

/// Applies raw update input to the book with `id`.
///
/// Each entry is run through [`coerce::decide`] against the field's
/// current value; fields without an entry are left alone. The id itself
/// is never touched. Returns `None` when no book has `id`.
pub fn update(books: &mut [Book], id: u64, edits: &[(Field, String)]) -> Option<Book> {
    let book = books.iter_mut().find(|b| b.id == id)?;
    for (field, raw) in edits {
        if let Edit::Set(value) = coerce::decide(book.get(*field), raw) {
            book.set(*field, value);
        }
    }
    Some(book.clone())
}

/// Repository over a [`Storage`] backend. Every mutating call loads the
/// whole collection, changes it in memory and saves it back, and skips
/// the save when nothing changed.
pub struct BookRepository<S> {
    storage: S,
}

impl<S: Storage> BookRepository<S> {
    pub fn new(storage: S) -> Self {
        BookRepository { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn list(&self) -> Result<Vec<Book>, StorageError> {
        self.storage.load()
    }

    pub fn get(&self, id: u64) -> Result<Option<Book>, StorageError> {
        let books = self.storage.load()?;
        Ok(find_by_id(&books, id).cloned())
    }

    pub fn add(&self, values: &[(Field, String)]) -> Result<Book, StorageError> {
        let mut books = self.storage.load()?;
        let book = add(&mut books, values);
        self.storage.save(&books)?;
        tracing::info!(id = book.id, "book added");
        Ok(book)
    }

    pub fn remove(&self, id: u64) -> Result<bool, StorageError> {
        let mut books = self.storage.load()?;
        if !remove(&mut books, id) {
            return Ok(false);
        }
        self.storage.save(&books)?;
        tracing::info!(id, "book removed");
        Ok(true)
    }

    pub fn update(&self, id: u64, edits: &[(Field, String)]) -> Result<Option<Book>, StorageError> {
        self.update_with(id, |field, _| Ok(edit_for(edits, field)))
    }

    /// Update driven by a callback. `input` is called once per field, in
    /// [`Field::ALL`] order, with the field's current value and returns the
    /// raw text to apply. The collection is loaded once and saved once.
    ///
    /// Errors from `input` abort the update without saving.
    pub fn update_with<F, E>(&self, id: u64, mut input: F) -> Result<Option<Book>, E>
    where
        F: FnMut(Field, Option<&FieldValue>) -> Result<String, E>,
        E: From<StorageError>,
    {
        let mut books = self.storage.load()?;
        let Some(existing) = find_by_id(&books, id) else {
            return Ok(None);
        };

        let mut edits = Vec::with_capacity(Field::ALL.len());
        for field in Field::ALL {
            edits.push((field, input(field, existing.get(field))?));
        }

        let updated = update(&mut books, id, &edits);
        self.storage.save(&books)?;
        tracing::info!(id, "book updated");
        Ok(updated)
    }
}

fn edit_for(edits: &[(Field, String)], field: Field) -> String {
    edits
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, raw)| raw.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Option<FieldValue> {
        Some(FieldValue::text(s))
    }

    fn orwell() -> Vec<(Field, String)> {
        vec![
            (Field::Author, "Orwell".to_string()),
            (Field::Title, "1984".to_string()),
        ]
    }

    #[test]
    fn test_next_id_is_one_past_max() {
        assert_eq!(next_id(&[]), 1);
        let books = vec![Book::empty(4), Book::empty(9), Book::empty(2)];
        assert_eq!(next_id(&books), 10);
        assert!(books.iter().all(|b| next_id(&books) > b.id));
    }

    #[test]
    fn test_find_by_id_returns_first_match() {
        let mut dup = Book::empty(2);
        dup.title = text("second");
        let books = vec![Book::empty(1), Book::empty(2), dup];
        assert_eq!(find_by_id(&books, 2), Some(&Book::empty(2)));
        assert_eq!(find_by_id(&books, 3), None);
    }

    #[test]
    fn test_remove_missing_id_is_idempotent() {
        let mut books = vec![Book::empty(1), Book::empty(2)];
        let before = books.clone();
        assert!(!remove(&mut books, 7));
        assert!(!remove(&mut books, 7));
        assert_eq!(books, before);
    }

    #[test]
    fn test_remove_existing_id() {
        let mut books = vec![Book::empty(1), Book::empty(2)];
        assert!(remove(&mut books, 1));
        assert_eq!(books, vec![Book::empty(2)]);
    }

    #[test]
    fn test_add_then_find_returns_same_record() {
        let mut books = vec![Book::empty(3)];
        let added = add(&mut books, &orwell());
        assert_eq!(added.id, 4);
        assert_eq!(find_by_id(&books, added.id), Some(&added));
        assert_eq!(added.author, text("Orwell"));
        assert_eq!(added.title, text("1984"));
        assert_eq!(added.series, None);
    }

    #[test]
    fn test_update_only_touches_fields_that_should_update() {
        let mut books = Vec::new();
        let mut original = add(&mut books, &orwell());
        original.number_in_series = Some(FieldValue::Int(1));
        books[0] = original.clone();

        let edits = vec![
            (Field::Author, "".to_string()),
            (Field::Title, "Animal Farm".to_string()),
            (Field::NumberInSeries, "null".to_string()),
            (Field::Language, " ".to_string()),
        ];
        let updated = update(&mut books, original.id, &edits).unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.author, text("Orwell"));
        assert_eq!(updated.title, text("Animal Farm"));
        assert_eq!(updated.number_in_series, None);
        assert_eq!(updated.language, None);
        assert_eq!(books[0], updated);
    }

    #[test]
    fn test_update_missing_id_is_none() {
        let mut books = vec![Book::empty(1)];
        assert_eq!(update(&mut books, 2, &orwell()), None);
        assert_eq!(books, vec![Book::empty(1)]);
    }

    #[test]
    fn test_repository_round_trip_through_storage() {
        let repo = BookRepository::new(MemoryStorage::new());
        let added = repo.add(&orwell()).unwrap();
        assert_eq!(repo.get(added.id).unwrap(), Some(added.clone()));

        let edits = vec![(Field::Title, "Animal Farm".to_string())];
        let updated = repo.update(added.id, &edits).unwrap().unwrap();
        assert_eq!(updated.title, text("Animal Farm"));
        assert_eq!(updated.author, text("Orwell"));

        assert!(repo.remove(added.id).unwrap());
        assert!(repo.list().unwrap().is_empty());
        assert_eq!(next_id(&repo.list().unwrap()), 1);
    }

    #[test]
    fn test_repository_skips_save_when_nothing_found() {
        let repo = BookRepository::new(MemoryStorage::with_books(vec![Book::empty(1)]));
        assert!(!repo.remove(5).unwrap());
        assert_eq!(repo.update(5, &orwell()).unwrap(), None);
        assert_eq!(repo.storage().save_count(), 0);
    }

    #[test]
    fn test_update_with_sees_current_values_in_field_order() {
        let repo = BookRepository::new(MemoryStorage::new());
        let added = repo.add(&orwell()).unwrap();

        let mut seen = Vec::new();
        let updated = repo
            .update_with(added.id, |field, current| {
                seen.push((field, current.cloned()));
                Ok::<_, StorageError>(String::new())
            })
            .unwrap()
            .unwrap();

        assert_eq!(updated, added);
        assert_eq!(seen.len(), Field::ALL.len());
        assert_eq!(seen[0], (Field::Author, text("Orwell")));
        assert_eq!(seen[1], (Field::Title, text("1984")));
        assert_eq!(seen[8], (Field::Year, None));
    }

    #[test]
    fn test_update_with_error_aborts_without_saving() {
        let repo = BookRepository::new(MemoryStorage::new());
        let added = repo.add(&orwell()).unwrap();
        let saves = repo.storage().save_count();

        let result = repo.update_with(added.id, |field, _| {
            if field == Field::Series {
                Err(anyhow::anyhow!("input closed"))
            } else {
                Ok("changed".to_string())
            }
        });

        assert!(result.is_err());
        assert_eq!(repo.storage().save_count(), saves);
        assert_eq!(repo.get(added.id).unwrap(), Some(added));
    }
}
