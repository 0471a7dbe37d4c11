//! Photo grid and its image provider.

mod photo_grid;
mod provider;

pub use photo_grid::{CellState, PhotoGrid, RefreshOutcome};
pub use provider::{
    CellImage, CellTicket, DEFAULT_MAX_CONCURRENT_FETCHES, GridImageEvent, GridImageProvider,
};
