/// Dataset JSON parsing and normalization.
pub mod loader;
/// Country records, year snapshots and the loaded dataset.
pub mod model;
