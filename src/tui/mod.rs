pub mod data;
pub mod run;
pub mod state;
pub mod views;

pub use data::{Contribution, DashboardData, FolderCount};
pub use run::run;
pub use state::{DashboardState, Focus};
pub use views::{heatmap_lines, weeks_fitting};
