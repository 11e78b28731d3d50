use std::cmp::Ordering;

use crate::clients::catalog_client::CatalogClient;
use crate::model::draft::Draft;
use crate::model::movie::{FieldValue, Movie};
use crate::model::schema::{self, FieldKind, FieldSpec};

const LOAD_FAILED: &str = "Failed to load movies.";
const CREATE_FAILED: &str = "Failed to add movie.";
const DELETE_FAILED: &str = "Failed to delete movie.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The client's entire mutable state: the movie collection as last confirmed
/// by the backend, the view parameters, the draft form and the current error
/// message. Display order is always derived on demand, never cached.
///
/// Mutating actions borrow the engine exclusively for their whole async
/// lifetime, so a second create/delete/load cannot start while one is in
/// flight.
pub struct ViewState {
    client: CatalogClient,
    movies: Vec<Movie>,
    search: String,
    sort_field: &'static FieldSpec,
    sort_direction: SortDirection,
    draft: Draft,
    error: Option<String>,
    loading: bool,
}

impl ViewState {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            movies: Vec::new(),
            search: String::new(),
            sort_field: schema::default_sort_field(),
            sort_direction: SortDirection::Ascending,
            draft: Draft::empty(),
            error: None,
            loading: false,
        }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort_field(&self) -> &'static FieldSpec {
        self.sort_field
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Replaces the collection with the backend's full list. On failure the
    /// collection stays empty and the load-failure message is set; there is
    /// no retry.
    pub async fn load(&mut self) {
        self.error = None;
        self.loading = true;
        match self.client.list_movies().await {
            Ok(movies) => {
                log::info!("Loaded {} movies from the catalog", movies.len());
                self.movies = movies;
            }
            Err(e) => {
                log::error!("Loading movies failed: {}", e);
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
        self.loading = false;
    }

    /// The derived display order: a pure function of the collection and the
    /// view parameters. The collection itself is never reordered.
    pub fn visible_movies(&self) -> Vec<&Movie> {
        let mut rows: Vec<&Movie> = if self.search.trim().is_empty() {
            self.movies.iter().collect()
        } else {
            let query = self.search.to_lowercase();
            self.movies
                .iter()
                .filter(|movie| movie.title.to_lowercase().contains(&query))
                .collect()
        };

        let field = self.sort_field;
        let direction = self.sort_direction;
        // Vec::sort_by is stable, so equal keys keep their original order.
        rows.sort_by(|a, b| {
            let ordering = compare_by_field(a, b, field);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        rows
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Same field flips the direction; a new field becomes active and
    /// resets to ascending. Unknown names leave the parameters alone.
    pub fn toggle_sort(&mut self, field_name: &str) -> bool {
        let Some(field) = schema::field(field_name) else {
            return false;
        };
        if field.name == self.sort_field.name {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Ascending;
        }
        true
    }

    pub fn edit_draft(&mut self, field_name: &str, value: impl Into<String>) {
        self.draft.set(field_name, value);
    }

    /// Validates and submits the draft. Returns true when the backend
    /// confirmed the record; the collection only ever grows by what the
    /// backend echoed back.
    pub async fn submit(&mut self) -> bool {
        self.error = None;

        if !self.draft.missing_required().is_empty() {
            self.error = Some(required_fields_message());
            return false;
        }

        match self.client.create_movie(&self.draft.to_payload()).await {
            Ok(created) => {
                log::info!("Created movie {:?} ({:?})", created.title, created.movie_id);
                self.movies.push(created);
                self.draft = Draft::empty();
                true
            }
            Err(e) => {
                log::error!("Creating movie failed: {}", e);
                self.error = Some(CREATE_FAILED.to_string());
                false
            }
        }
    }

    /// Deletes by backend identifier. An absent identifier never reaches
    /// the network; deleting an identifier the backend no longer knows
    /// surfaces as a failure and leaves the collection untouched.
    pub async fn delete(&mut self, movie_id: Option<i64>) -> bool {
        let Some(movie_id) = movie_id else {
            log::warn!("Ignoring delete without a movie id");
            return false;
        };

        match self.client.delete_movie(movie_id).await {
            Ok(()) => {
                log::info!("Deleted movie {}", movie_id);
                self.movies.retain(|movie| movie.movie_id != Some(movie_id));
                true
            }
            Err(e) => {
                log::error!("Deleting movie {} failed: {}", movie_id, e);
                self.error = Some(DELETE_FAILED.to_string());
                false
            }
        }
    }
}

// Same wording no matter which of the required fields is blank.
fn required_fields_message() -> String {
    let labels: Vec<&str> = schema::MOVIE_FIELDS
        .iter()
        .filter(|f| f.required)
        .map(|f| f.label)
        .collect();
    format!("{} are required.", labels.join(" and "))
}

fn compare_by_field(a: &Movie, b: &Movie, field: &FieldSpec) -> Ordering {
    match field.kind {
        FieldKind::Integer | FieldKind::Decimal => {
            let left = numeric_key(a.field(field.name));
            let right = numeric_key(b.field(field.name));
            left.partial_cmp(&right).unwrap_or(Ordering::Equal)
        }
        FieldKind::Text | FieldKind::List => {
            text_key(a.field(field.name)).cmp(&text_key(b.field(field.name)))
        }
    }
}

// An absent numeric value sorts as 0.
fn numeric_key(value: FieldValue<'_>) -> f64 {
    match value {
        FieldValue::Number(n) => n,
        FieldValue::Text(t) => t.parse().unwrap_or(0.0),
        FieldValue::List(_) | FieldValue::Missing => 0.0,
    }
}

fn text_key(value: FieldValue<'_>) -> String {
    match value {
        FieldValue::Text(t) => t.to_string(),
        FieldValue::Number(n) => n.to_string(),
        FieldValue::List(items) => items.join(","),
        FieldValue::Missing => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, rating: Option<f64>, runtime_min: Option<i64>) -> Movie {
        Movie {
            movie_id: None,
            title: title.to_string(),
            genres: Vec::new(),
            actors: Vec::new(),
            director: None,
            runtime_min,
            rating,
        }
    }

    fn engine_with(movies: Vec<Movie>) -> ViewState {
        let mut state = ViewState::new(CatalogClient::new("http://localhost:8000/api"));
        state.movies = movies;
        state
    }

    fn visible_titles(state: &ViewState) -> Vec<String> {
        state
            .visible_movies()
            .iter()
            .map(|m| m.title.clone())
            .collect()
    }

    #[test]
    fn filters_titles_case_insensitively() {
        let mut state = engine_with(vec![
            movie("Inception", Some(8.7), None),
            movie("Up", Some(8.2), None),
        ]);
        state.set_search("in");
        assert_eq!(visible_titles(&state), vec!["Inception"]);

        state.set_search("");
        assert_eq!(visible_titles(&state), vec!["Inception", "Up"]);
    }

    #[test]
    fn whitespace_only_search_keeps_every_record() {
        let mut state = engine_with(vec![
            movie("Inception", None, None),
            movie("Up", None, None),
        ]);
        state.set_search("   ");
        assert_eq!(visible_titles(&state), vec!["Inception", "Up"]);
    }

    #[test]
    fn sorts_stably_on_equal_ratings() {
        let mut state = engine_with(vec![
            movie("First Five", Some(5.0), None),
            movie("Second Five", Some(5.0), None),
            movie("Three", Some(3.0), None),
        ]);
        state.toggle_sort("rating");
        assert_eq!(
            visible_titles(&state),
            vec!["Three", "First Five", "Second Five"]
        );
    }

    #[test]
    fn numeric_fields_sort_numerically_not_lexically() {
        let mut state = engine_with(vec![
            movie("Nine", None, Some(9)),
            movie("Ten", None, Some(10)),
            movie("Two", None, Some(2)),
        ]);
        state.toggle_sort("runtime_min");
        assert_eq!(visible_titles(&state), vec!["Two", "Nine", "Ten"]);
    }

    #[test]
    fn absent_numeric_values_sort_first_ascending() {
        let mut state = engine_with(vec![
            movie("Rated", Some(7.5), None),
            movie("Unrated", None, None),
        ]);
        state.toggle_sort("rating");
        assert_eq!(visible_titles(&state), vec!["Unrated", "Rated"]);
    }

    #[test]
    fn list_fields_sort_by_their_joined_text() {
        let mut a = movie("A", None, None);
        a.genres = vec!["Drama".to_string()];
        let mut b = movie("B", None, None);
        b.genres = vec!["Action".to_string(), "Drama".to_string()];
        let mut state = engine_with(vec![a, b]);
        state.toggle_sort("genre");
        assert_eq!(visible_titles(&state), vec!["B", "A"]);
    }

    #[test]
    fn toggling_flips_direction_and_switching_resets_it() {
        let mut state = engine_with(vec![
            movie("Alpha", Some(1.0), None),
            movie("Beta", Some(9.0), None),
        ]);
        let initial = visible_titles(&state);

        assert!(state.toggle_sort("title"));
        assert_eq!(state.sort_direction(), SortDirection::Descending);
        assert_eq!(visible_titles(&state), vec!["Beta", "Alpha"]);

        assert!(state.toggle_sort("title"));
        assert_eq!(state.sort_direction(), SortDirection::Ascending);
        assert_eq!(visible_titles(&state), initial);

        assert!(state.toggle_sort("rating"));
        assert_eq!(state.sort_field().name, "rating");
        assert_eq!(state.sort_direction(), SortDirection::Ascending);
    }

    #[test]
    fn unknown_sort_field_leaves_parameters_alone() {
        let mut state = engine_with(Vec::new());
        assert!(!state.toggle_sort("release_year"));
        assert_eq!(state.sort_field().name, "title");
        assert_eq!(state.sort_direction(), SortDirection::Ascending);
    }

    #[test]
    fn derive_never_reorders_the_collection() {
        let mut state = engine_with(vec![
            movie("Zodiac", Some(7.7), None),
            movie("Alien", Some(8.5), None),
        ]);
        state.toggle_sort("rating");
        let _ = state.visible_movies();
        let stored: Vec<&str> = state.movies().iter().map(|m| m.title.as_str()).collect();
        assert_eq!(stored, vec!["Zodiac", "Alien"]);
    }

    #[tokio::test]
    async fn submit_with_blank_required_fields_is_rejected_locally() {
        // The client points nowhere reachable, so a network attempt would
        // surface as a create failure rather than a validation message.
        let mut state = engine_with(vec![movie("Kept", Some(5.0), None)]);
        state.edit_draft("genre", "Horror");

        assert!(!state.submit().await);
        assert_eq!(state.error(), Some("Title and Rating are required."));
        assert_eq!(state.movies().len(), 1);
        assert_eq!(state.draft().get("genre"), "Horror");
    }

    #[tokio::test]
    async fn delete_without_an_id_is_a_local_noop() {
        let mut state = engine_with(vec![movie("Kept", Some(5.0), None)]);
        assert!(!state.delete(None).await);
        assert_eq!(state.movies().len(), 1);
        assert_eq!(state.error(), None);
    }
}
