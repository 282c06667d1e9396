pub mod aggregate;
pub mod filter;
pub mod scan;

pub use aggregate::Aggregator;
pub use filter::{AuthorFilter, PathFilter};
pub use scan::{build_units, launch, run_unit, spinner};
