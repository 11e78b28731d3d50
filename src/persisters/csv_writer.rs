use std::path::Path;

use csv::Writer;
use thiserror::Error;

use crate::model::movie::Movie;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write CSV file: {0}")]
    Csv(#[from] csv::Error),
    #[error("could not flush CSV file: {0}")]
    Flush(#[from] std::io::Error),
}

pub struct CsvWriter {}

impl CsvWriter {
    /// Writes the rows in the order given, which for an export of the
    /// current view means filter and sort already applied.
    pub fn save_movies_to_csv<P: AsRef<Path>>(
        movies: &[&Movie],
        file_name: P,
    ) -> Result<(), ExportError> {
        let mut wrt = Writer::from_path(file_name)?;
        wrt.write_record(Movie::csv_titles())?;
        for movie in movies {
            wrt.write_record(movie.to_csvable_array())?;
        }
        wrt.flush()?;
        Ok(())
    }
}
