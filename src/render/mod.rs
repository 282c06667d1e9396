pub mod grid;
pub mod palette;
pub mod text;

pub use grid::{cell_class, cell_text, Cell, CellClass, Grid, GridRow};
pub use palette::{TextPalette, TuiPalette};
pub use text::{print_result, render_grid, write_result};
