mod error;
mod refresh;
mod snapshot;
mod tle_loader;

pub use error::CatalogError;
pub use refresh::spawn_refresh;
pub use snapshot::{Catalog, CatalogStore, SatelliteSummary};
pub use tle_loader::{parse_tle_text, TleLoader};
