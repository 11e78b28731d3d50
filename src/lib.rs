use std::io::{self, Write};

pub mod clients;
pub mod config;
pub mod engine;
pub mod model;
pub mod persisters;

use clients::catalog_client::CatalogClient;
use config::Config;
use engine::view_state::{SortDirection, ViewState};
use model::schema::{FieldKind, MOVIE_FIELDS};
use persisters::csv_writer::CsvWriter;

const EXPORT_FILE_NAME: &str = "movies.csv";

/// The interactive catalog session: one initial load, then a menu loop
/// driving the view-state engine until the user quits.
pub async fn run(config: Config) {
    log::info!("Using catalog backend at {}", config.api_base);
    let mut state = ViewState::new(CatalogClient::new(config.api_base));

    println!("Loading movies…");
    state.load().await;
    print_error(&state);
    print_table(&state);

    loop {
        println!();
        println!("My Movie Library");
        println!("1. List movies");
        println!("2. Search by title");
        println!("3. Sort by column");
        println!("4. Add a movie");
        println!("5. Delete a movie");
        println!("6. Export current view to {}", EXPORT_FILE_NAME);
        println!("7. Quit");

        let choice = match prompt("Choose an option: ") {
            Some(choice) => choice,
            None => break,
        };

        match choice.as_str() {
            "1" => print_table(&state),
            "2" => search(&mut state),
            "3" => sort(&mut state),
            "4" => add_movie(&mut state).await,
            "5" => delete_movie(&mut state).await,
            "6" => export_view(&state),
            "7" => break,
            _ => println!("Invalid choice. Try again."),
        }
    }

    log::info!("Goodbye!");
}

fn search(state: &mut ViewState) {
    if let Some(query) = prompt("Search by title (empty clears the filter): ") {
        state.set_search(query);
        print_table(state);
    }
}

fn sort(state: &mut ViewState) {
    let names: Vec<&str> = MOVIE_FIELDS.iter().map(|field| field.name).collect();
    println!("Sortable columns: {}", names.join(", "));
    if let Some(name) = prompt("Sort by: ") {
        if state.toggle_sort(&name) {
            print_table(state);
        } else {
            println!("Unknown column: {}", name);
        }
    }
}

async fn add_movie(state: &mut ViewState) {
    for field in MOVIE_FIELDS {
        let mut label = field.label.to_string();
        if field.required {
            label.push_str(" (required)");
        }
        if field.kind == FieldKind::List {
            label.push_str(" (comma-separated)");
        }
        match prompt(&format!("{}: ", label)) {
            Some(value) => state.edit_draft(field.name, value),
            None => return,
        }
    }

    if state.submit().await {
        println!("Movie added.");
        print_table(state);
    } else {
        print_error(state);
    }
}

async fn delete_movie(state: &mut ViewState) {
    let Some(raw) = prompt("Movie id to delete: ") else {
        return;
    };
    let movie_id = raw.parse::<i64>().ok();
    if movie_id.is_none() {
        println!("Nothing deleted; that is not a movie id.");
        return;
    }

    if state.delete(movie_id).await {
        println!("Movie deleted.");
        print_table(state);
    } else {
        print_error(state);
    }
}

fn export_view(state: &ViewState) {
    let rows = state.visible_movies();
    match CsvWriter::save_movies_to_csv(&rows, EXPORT_FILE_NAME) {
        Ok(()) => log::info!(
            "Exported {} movies to {}",
            rows.len(),
            EXPORT_FILE_NAME
        ),
        Err(e) => log::error!("Error when exporting movies: {:?}", e),
    }
}

fn print_table(state: &ViewState) {
    if state.is_loading() {
        println!("Loading movies…");
        return;
    }

    let rows = state.visible_movies();
    if rows.is_empty() {
        println!("No movies yet.");
        return;
    }

    let header: Vec<String> = MOVIE_FIELDS
        .iter()
        .map(|field| {
            if field.name == state.sort_field().name {
                let arrow = match state.sort_direction() {
                    SortDirection::Ascending => "↑",
                    SortDirection::Descending => "↓",
                };
                format!("{} {}", field.label, arrow)
            } else {
                field.label.to_string()
            }
        })
        .collect();
    println!("ID | {}", header.join(" | "));

    for movie in rows {
        let id = movie
            .movie_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        let cells: Vec<String> = MOVIE_FIELDS
            .iter()
            .map(|field| movie.display_value(field))
            .collect();
        println!("{} | {}", id, cells.join(" | "));
    }
}

fn print_error(state: &ViewState) {
    if let Some(message) = state.error() {
        println!("{}", message);
    }
}

fn prompt(message: &str) -> Option<String> {
    print!("{}", message);
    io::stdout().flush().expect("could not flush stdout");

    let mut user_input = String::new();
    match io::stdin().read_line(&mut user_input) {
        Ok(0) => None,
        Ok(_) => Some(user_input.trim_end_matches(['\r', '\n']).to_string()),
        Err(e) => {
            log::error!("Failed to read user input: {}", e);
            None
        }
    }
}
