pub mod args;
pub mod error;
pub mod favorites;
pub mod logging;
pub mod model;
pub mod storage;
pub mod directory {
    pub mod images;
    pub mod normalize;
    pub mod pagination;
    pub mod query;
    pub mod reconcile;

    pub use pagination::{PageError, PageMarker, page_markers, page_slice, total_pages};
    pub use query::{Gender, SortKey, ViewState};
    pub use reconcile::reconcile;
}
pub mod controller {
    pub mod directory;
    pub mod favorites;
    pub mod fighters;
    pub mod routes;
    pub mod upstream;
}
pub mod view {
    pub mod directory;
    pub mod profile;
}

pub const HTMX_PATH: &str = "https://cdn.jsdelivr.net/npm/htmx.org@2.0.8/dist/htmx.min.js";

pub use controller::routes::configure;
