//! The load-once menu parser.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use futures::future::{BoxFuture, FutureExt, Shared};
use menugrid_core::{
    Grid, GridError, MenuProfile, TextRun, cell_text, load_grid, split_items, text_runs,
};
use menugrid_parse::{DecodeError, DocumentDecoder, DocumentSource, LopdfDecoder};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::error::MenuError;
use crate::meal::MealPeriod;

/// Grid and text runs of a successfully loaded document.
#[derive(Debug)]
struct LoadedMenu {
    grid: Grid,
    runs: Vec<TextRun>,
}

/// One load of the document, awaited by every caller that arrives while it
/// runs.
type LoadAttempt = Shared<BoxFuture<'static, Result<Arc<LoadedMenu>, MenuError>>>;

/// Answers menu queries for one document.
///
/// Nothing is read until the first query. That query reads the source,
/// decodes it on the blocking thread pool and assembles the grid; the result
/// is kept for every later query. Concurrent first queries share the same
/// in-flight load. If loading fails the error is returned to every caller
/// that waited on that load and the parser stays unloaded, so the next query
/// starts a new one.
pub struct MenuParser {
    source: DocumentSource,
    profile: MenuProfile,
    decoder: Arc<dyn DocumentDecoder>,
    state: OnceCell<Arc<LoadedMenu>>,
    in_flight: Mutex<Option<LoadAttempt>>,
}

impl MenuParser {
    /// Parser using [`LopdfDecoder`] on the first page.
    pub fn new(source: impl Into<DocumentSource>, profile: MenuProfile) -> Self {
        Self::with_decoder(source, profile, LopdfDecoder::default())
    }

    pub fn with_decoder(
        source: impl Into<DocumentSource>,
        profile: MenuProfile,
        decoder: impl DocumentDecoder,
    ) -> Self {
        Self {
            source: source.into(),
            profile,
            decoder: Arc::new(decoder),
            state: OnceCell::new(),
            in_flight: Mutex::new(None),
        }
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    pub fn profile(&self) -> &MenuProfile {
        &self.profile
    }

    /// Whether a load has completed successfully.
    pub fn is_loaded(&self) -> bool {
        self.state.initialized()
    }

    /// Cleaned menu items for a day column and a meal token (`"lunch"` or
    /// `"dinner"`).
    ///
    /// Arguments are validated before the document is loaded.
    pub async fn get_menu(
        &self,
        day_index: usize,
        meal_period: &str,
    ) -> Result<Vec<String>, MenuError> {
        let meal: MealPeriod = meal_period.parse()?;
        self.menu(day_index, meal).await
    }

    /// Typed variant of [`get_menu`](Self::get_menu).
    pub async fn menu(
        &self,
        day_index: usize,
        meal: MealPeriod,
    ) -> Result<Vec<String>, MenuError> {
        let days = self.profile.grid.cols;
        if day_index >= days {
            return Err(MenuError::DayOutOfRange {
                day: day_index,
                days,
            });
        }
        let raw = self.raw_cell_text(meal.row(), day_index).await?;
        Ok(split_items(&raw, &self.profile.case_fixups))
    }

    /// Items for every day column of one meal, in column order.
    pub async fn week(&self, meal: MealPeriod) -> Result<Vec<Vec<String>>, MenuError> {
        let loaded = self.loaded().await?;
        let Some(row) = loaded.grid.row(meal.row()) else {
            return Err(GridError::CellOutOfRange {
                row: meal.row(),
                col: 0,
                rows: loaded.grid.rows(),
                cols: loaded.grid.cols(),
            }
            .into());
        };
        Ok(row
            .iter()
            .map(|cell| {
                let raw = cell_text(&loaded.runs, cell, self.profile.min_font_size);
                split_items(&raw, &self.profile.case_fixups)
            })
            .collect())
    }

    /// Concatenated text of the qualifying runs in a cell, before cleanup.
    pub async fn raw_cell_text(&self, row: usize, col: usize) -> Result<String, MenuError> {
        let loaded = self.loaded().await?;
        let cell = loaded.grid.checked_cell(row, col)?;
        Ok(cell_text(&loaded.runs, cell, self.profile.min_font_size))
    }

    /// The assembled grid, loading the document if needed.
    pub async fn grid(&self) -> Result<&Grid, MenuError> {
        Ok(&self.loaded().await?.grid)
    }

    async fn loaded(&self) -> Result<&LoadedMenu, MenuError> {
        if let Some(loaded) = self.state.get() {
            return Ok(loaded.as_ref());
        }

        let attempt = {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            // The state is published before the slot is cleared, so a load
            // that finished since the check above is visible here.
            if let Some(loaded) = self.state.get() {
                return Ok(loaded.as_ref());
            }
            match in_flight.as_ref() {
                Some(attempt) => attempt.clone(),
                None => {
                    let attempt = self.start_load();
                    *in_flight = Some(attempt.clone());
                    attempt
                }
            }
        };

        let outcome = match attempt.clone().await {
            Ok(loaded) => Ok(self.state.get_or_init(|| async move { loaded }).await),
            Err(e) => Err(e),
        };

        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if in_flight.as_ref().is_some_and(|current| current.ptr_eq(&attempt)) {
            *in_flight = None;
        }
        drop(in_flight);

        outcome.map(|loaded| loaded.as_ref())
    }

    fn start_load(&self) -> LoadAttempt {
        let source = self.source.clone();
        let profile = self.profile.clone();
        let decoder = Arc::clone(&self.decoder);
        async move { load(&source, &profile, decoder).await.map(Arc::new) }
            .boxed()
            .shared()
    }
}

async fn load(
    source: &DocumentSource,
    profile: &MenuProfile,
    decoder: Arc<dyn DocumentDecoder>,
) -> Result<LoadedMenu, MenuError> {
    let started = Instant::now();
    debug!(source = %source, profile = %profile.name, "loading menu");

    let result = decode_and_assemble(source, profile, decoder).await;
    match &result {
        Ok(loaded) => info!(
            source = %source,
            rows = loaded.grid.rows(),
            cols = loaded.grid.cols(),
            runs = loaded.runs.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "menu loaded"
        ),
        Err(e) => warn!(source = %source, error = %e, "menu load failed"),
    }
    result
}

async fn decode_and_assemble(
    source: &DocumentSource,
    profile: &MenuProfile,
    decoder: Arc<dyn DocumentDecoder>,
) -> Result<LoadedMenu, MenuError> {
    let bytes: Arc<[u8]> = match source {
        DocumentSource::Path(path) => tokio::fs::read(path)
            .await
            .map_err(DecodeError::from)?
            .into(),
        DocumentSource::Bytes(bytes) => Arc::clone(bytes),
    };

    let page = tokio::task::spawn_blocking(move || decoder.decode(&bytes))
        .await
        .map_err(|e| DecodeError::Task(e.to_string()))??;
    debug!(
        fills = page.fills.len(),
        texts = page.texts.len(),
        "page decoded"
    );

    let grid = load_grid(&page.fills, profile)?;
    let runs = text_runs(&page.texts, profile.text_y_offset);
    Ok(LoadedMenu { grid, runs })
}

impl std::fmt::Debug for MenuParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuParser")
            .field("source", &self.source)
            .field("profile", &self.profile.name)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
