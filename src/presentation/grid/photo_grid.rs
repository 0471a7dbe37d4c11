//! Photo grid bound to a list of image locators.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::domain::entities::ImageData;

use super::provider::{CellImage, CellTicket, GridImageEvent, GridImageProvider};

/// Display state of one grid cell.
#[derive(Debug, Clone)]
pub enum CellState {
    /// Waiting for an asynchronous load.
    Loading,
    /// Image ready for display.
    Image(ImageData),
    /// Load failed; the cell shows a placeholder.
    Placeholder,
}

impl CellState {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn image(&self) -> Option<&ImageData> {
        match self {
            Self::Image(image) => Some(image),
            _ => None,
        }
    }
}

/// What a call to [`PhotoGrid::refresh`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// First binding; every cell was requested.
    Created,
    /// Locator count changed; every cell was requested again.
    Rebound,
    /// Locator count unchanged; nothing was requested.
    Unchanged,
}

/// Grid of photo cells fed by a [`GridImageProvider`].
///
/// Owned by the presentation loop. Asynchronous results are applied through
/// [`PhotoGrid::apply`]; results from an older binding are discarded.
pub struct PhotoGrid {
    provider: Arc<GridImageProvider>,
    events: mpsc::UnboundedReceiver<GridImageEvent>,
    locators: Option<Vec<String>>,
    cells: Vec<CellState>,
    generation: u64,
}

impl PhotoGrid {
    /// Creates an unbound grid. `events` must be the receiver paired with the
    /// provider's sender.
    #[must_use]
    pub const fn new(
        provider: Arc<GridImageProvider>,
        events: mpsc::UnboundedReceiver<GridImageEvent>,
    ) -> Self {
        Self {
            provider,
            events,
            locators: None,
            cells: Vec::new(),
            generation: 0,
        }
    }

    /// Binds the grid to `locators`.
    ///
    /// Only a change in the number of locators triggers a rebind. A list of
    /// the same length is treated as unchanged even when its contents differ.
    pub async fn refresh(&mut self, locators: &[String]) -> RefreshOutcome {
        let outcome = match &self.locators {
            None => RefreshOutcome::Created,
            Some(current) if current.len() != locators.len() => RefreshOutcome::Rebound,
            Some(_) => {
                trace!(count = locators.len(), "Photo count unchanged, skipping refresh");
                return RefreshOutcome::Unchanged;
            }
        };

        self.bind(locators).await;
        debug!(count = locators.len(), generation = self.generation, ?outcome, "Photo grid bound");
        outcome
    }

    async fn bind(&mut self, locators: &[String]) {
        self.generation += 1;
        self.locators = Some(locators.to_vec());
        self.cells = vec![CellState::Loading; locators.len()];

        for (cell, locator) in locators.iter().enumerate() {
            let ticket = CellTicket::new(self.generation, cell);
            if let CellImage::Ready(image) = self.provider.resolve(ticket, locator).await {
                self.cells[cell] = CellState::Image(image);
            }
        }
    }

    /// Applies an asynchronous result. Returns false if it was stale.
    pub fn apply(&mut self, event: GridImageEvent) -> bool {
        if event.ticket.generation != self.generation {
            trace!(
                cell = event.ticket.cell,
                stale = event.ticket.generation,
                current = self.generation,
                "Dropping stale image event"
            );
            return false;
        }
        let Some(slot) = self.cells.get_mut(event.ticket.cell) else {
            return false;
        };
        *slot = match event.image {
            Some(image) => CellState::Image(image),
            None => CellState::Placeholder,
        };
        true
    }

    /// Applies every result already delivered. Returns how many cells changed.
    pub fn drain_ready(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            if self.apply(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Waits for the next result and applies it.
    /// Returns the changed cell, `Some(None)` for a stale result, or `None`
    /// once the provider is gone.
    pub async fn next_update(&mut self) -> Option<Option<usize>> {
        let event = self.events.recv().await?;
        let cell = event.ticket.cell;
        Some(self.apply(event).then_some(cell))
    }

    /// Waits until no cell is loading.
    pub async fn settle(&mut self) {
        while !self.is_settled() {
            if self.next_update().await.is_none() {
                break;
            }
        }
    }

    /// Returns true if no cell is waiting for an image.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.cells.iter().any(CellState::is_loading)
    }

    #[must_use]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&CellState> {
        self.cells.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Locators of the current binding.
    #[must_use]
    pub fn locators(&self) -> Option<&[String]> {
        self.locators.as_deref()
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}
