//! Option catalog wiring.
//!
//! Wraps `data/options.json` and `data/categories.json` so the generator can
//! load a validated snapshot once per run. Types here mirror the data files;
//! callers use `CatalogIndex` for lookups.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{CategoryCode, CategoryKey, OptionName};
pub use index::CatalogIndex;
pub use model::{Category, CategoryMap, OptionCatalog, OptionDescriptor};

pub use model::{load_categories_from_path, load_options_from_path};
