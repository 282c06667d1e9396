use chrono::NaiveDate;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{BarChart, Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::render::grid::{Grid, CELL_WIDTH};
use crate::render::palette::TuiPalette;

use super::data::DashboardData;
use super::state::{DashboardState, Focus};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %:z";

pub fn draw_dashboard(
    f: &mut Frame,
    data: &DashboardData,
    state: &mut DashboardState,
    palette: &TuiPalette,
    today: NaiveDate,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(f.size());

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(rows[0]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(50),
        ])
        .split(rows[2]);

    draw_summary(f, top[0], data);
    draw_contributors(f, top[1], data, state, palette);
    draw_author_share(f, top[2], data, palette);
    draw_hours(f, rows[1], data);
    draw_weekdays(f, bottom[0], data);
    draw_folders(f, bottom[1], data, state, palette);
    draw_heatmap(f, bottom[2], data, palette, today);
}

fn focus_block<'a>(title: &'a str, focused: bool, palette: &TuiPalette) -> Block<'a> {
    let block = Block::default().title(title).borders(Borders::ALL);
    if focused {
        block.border_style(palette.selected_border)
    } else {
        block
    }
}

fn draw_summary(f: &mut Frame, area: Rect, data: &DashboardData) {
    let mut items = vec![
        ListItem::new(format!("BeginDate: {}", data.window.begin_of_scan.format(DATE_FORMAT))),
        ListItem::new(format!("EndDate: {}", data.window.end_of_scan.format(DATE_FORMAT))),
        ListItem::new(format!("Commits: {}", data.total_commits)),
        ListItem::new(format!("Analyzed repos: {}", data.analyzed_repos)),
        ListItem::new(format!("User analyzed: {}", data.identity)),
    ];
    if data.failed_units > 0 {
        items.push(ListItem::new(format!("Failed units: {}", data.failed_units)));
    }
    let list = List::new(items).block(Block::default().title("Global statistics").borders(Borders::ALL));
    f.render_widget(list, area);
}

fn draw_contributors(
    f: &mut Frame,
    area: Rect,
    data: &DashboardData,
    state: &mut DashboardState,
    palette: &TuiPalette,
) {
    let items: Vec<ListItem> = data
        .contributions
        .iter()
        .enumerate()
        .map(|(i, c)| {
            ListItem::new(Line::from(vec![
                Span::styled(c.author.clone(), Style::default().fg(palette.author_color(i))),
                Span::raw(": "),
                Span::styled(format!("+{}", c.additions), palette.additions),
                Span::raw(":"),
                Span::styled(format!("-{}", c.deletions), palette.deletions),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(focus_block("Contributors", state.focus == Focus::Contributors, palette))
        .highlight_style(palette.title);
    f.render_stateful_widget(list, area, &mut state.contributors);
}

fn draw_author_share(f: &mut Frame, area: Rect, data: &DashboardData, palette: &TuiPalette) {
    let labels: Vec<String> = (1..=data.contributions.len()).map(|i| format!("#{i}")).collect();
    let series: Vec<(&str, u64)> = labels
        .iter()
        .map(String::as_str)
        .zip(data.contributions.iter().map(|c| c.total()))
        .collect();

    let chart = BarChart::default()
        .block(Block::default().title("Committers").borders(Borders::ALL))
        .data(series.as_slice())
        .bar_width(4)
        .bar_gap(1)
        .bar_style(Style::default().fg(palette.author_color(0)));
    f.render_widget(chart, area);
}

fn draw_hours(f: &mut Frame, area: Rect, data: &DashboardData) {
    let labels = DashboardData::hour_labels();
    let series: Vec<(&str, u64)> = labels
        .iter()
        .map(String::as_str)
        .zip(data.hours.iter().copied())
        .collect();
    let bar_width = (area.width.saturating_sub(2) / 24).max(1);

    let chart = BarChart::default()
        .block(Block::default().title("Commits on daytime").borders(Borders::ALL))
        .data(series.as_slice())
        .bar_width(bar_width.saturating_sub(1).max(1))
        .bar_gap(1);
    f.render_widget(chart, area);
}

fn draw_weekdays(f: &mut Frame, area: Rect, data: &DashboardData) {
    let series = data.weekday_series();
    let bar_width = (area.width.saturating_sub(2) / 7).max(1);

    let chart = BarChart::default()
        .block(Block::default().title("Commits on weekday").borders(Borders::ALL))
        .data(series.as_slice())
        .bar_width(bar_width)
        .bar_gap(0);
    f.render_widget(chart, area);
}

fn draw_folders(
    f: &mut Frame,
    area: Rect,
    data: &DashboardData,
    state: &mut DashboardState,
    palette: &TuiPalette,
) {
    let items: Vec<ListItem> = data
        .folders
        .iter()
        .map(|entry| ListItem::new(format!("{}: {}", entry.folder, entry.commits)))
        .collect();

    let list = List::new(items)
        .block(focus_block("Repositories", state.focus == Focus::Folders, palette))
        .highlight_style(palette.title);
    f.render_stateful_widget(list, area, &mut state.folders);
}

/// Weeks of heatmap that fit in a panel `width` columns wide, borders included.
pub fn weeks_fitting(width: u16) -> usize {
    (width as usize).saturating_sub(2 + CELL_WIDTH) / CELL_WIDTH
}

pub fn heatmap_lines(grid: &Grid, palette: &TuiPalette) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(grid.month_header())];
    for row in &grid.rows {
        let mut spans = vec![Span::raw(row.label)];
        for cell in &row.cells {
            match cell {
                Some(cell) => spans.push(Span::styled(cell.text.clone(), palette.cell(cell.class))),
                None => spans.push(Span::raw(" ".repeat(CELL_WIDTH))),
            }
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn draw_heatmap(f: &mut Frame, area: Rect, data: &DashboardData, palette: &TuiPalette, today: NaiveDate) {
    let grid = Grid::build(
        &data.window,
        &data.merged.commits,
        today,
        Some(weeks_fitting(area.width)),
    );
    let heatmap = Paragraph::new(heatmap_lines(&grid, palette))
        .block(Block::default().title("Heatmap").borders(Borders::ALL));
    f.render_widget(heatmap, area);
}
