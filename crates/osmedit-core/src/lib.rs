//! Editor core: the context operations run against, interaction modes, and
//! the operations themselves.

pub mod connection;
pub mod context;
mod error;
pub mod features;
pub mod history;
pub mod locale;
pub mod map;
pub mod mode;
pub mod operations;

pub use connection::{DataSource, TILE_ZOOM, Tile, TileCoverage};
pub use context::Context;
pub use error::{ContextError, Result};
pub use features::{Feature, FeatureFilter};
pub use history::{Edit, History};
pub use locale::{Catalog, EN_STRINGS, Locale};
pub use map::{MAX_ZOOM, MIN_EDITABLE_ZOOM, MapView, Viewport};
pub use mode::{DrawLine, Mode};
pub use operations::{Operation, SplitOperation};
