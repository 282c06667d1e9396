use crate::model::StatsResult;
use chrono::NaiveDate;
use std::io::{self, Write};

use super::grid::{Grid, CELL_WIDTH};
use super::palette::TextPalette;

const DATE_FORMAT: &str = "%B %d, %Y %H:%M:%S";

pub fn render_grid(grid: &Grid, palette: &TextPalette) -> String {
    let mut out = grid.month_header();
    out.push('\n');
    for row in &grid.rows {
        out.push_str(row.label);
        for cell in &row.cells {
            match cell {
                Some(cell) => out.push_str(&palette.cell(cell.class).apply_to(&cell.text).to_string()),
                None => out.push_str(&" ".repeat(CELL_WIDTH)),
            }
        }
        out.push('\n');
    }
    out
}

/// Header, date range and heatmap of one result. Failed results print their
/// diagnostic instead.
pub fn write_result<W: Write>(
    out: &mut W,
    result: &StatsResult,
    palette: &TextPalette,
    today: NaiveDate,
) -> io::Result<()> {
    if let Some(error) = &result.error {
        return writeln!(
            out,
            "{}",
            palette
                .error
                .apply_to(format!("Error scanning folder repository {}: {}", result.folder, error))
        );
    }
    let Some(window) = result.window.as_ref() else {
        return Ok(());
    };

    writeln!(out)?;
    if !result.options.silent {
        writeln!(out, "{}", palette.header.apply_to(&result.folder))?;
        writeln!(out)?;
    }
    writeln!(
        out,
        "Scanning for {} contributions from {} to {}",
        palette.message.apply_to(result.options.identity_label()),
        palette.message.apply_to(window.begin_of_scan.format(DATE_FORMAT)),
        palette.message.apply_to(window.end_of_scan.format(DATE_FORMAT)),
    )?;
    writeln!(out)?;

    if let Some(grid) = Grid::from_result(result, today, None) {
        write!(out, "{}", render_grid(&grid, palette))?;
    }
    Ok(())
}

pub fn print_result(result: &StatsResult, palette: &TextPalette, today: NaiveDate) -> io::Result<()> {
    if result.error.is_some() {
        let mut err = io::stderr().lock();
        return write_result(&mut err, result, palette, today);
    }
    let mut out = io::stdout().lock();
    write_result(&mut out, result, palette, today)
}
