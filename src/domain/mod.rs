// Domain layer - Data shapes and pure presentation logic
pub mod dates;
pub mod evolution;
pub mod format;
pub mod metrics;
pub mod palette;
pub mod records;
pub mod selection;
pub mod view;
