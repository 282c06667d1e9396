use super::grid::CellClass;
use ratatui::style::{Color, Modifier, Style as TuiStyle};

/// Console styles for plain-text output.
#[derive(Debug, Clone)]
pub struct TextPalette {
    pub today: console::Style,
    pub first_of_month: console::Style,
    pub empty: console::Style,
    pub low: console::Style,
    pub middle: console::Style,
    pub high: console::Style,
    pub header: console::Style,
    pub message: console::Style,
    pub error: console::Style,
}

impl Default for TextPalette {
    fn default() -> Self {
        Self {
            today: console::Style::new().white().on_magenta(),
            first_of_month: console::Style::new().cyan(),
            empty: console::Style::new(),
            low: console::Style::new(),
            middle: console::Style::new().green(),
            high: console::Style::new().yellow(),
            header: console::Style::new().magenta(),
            message: console::Style::new().green().on_black(),
            error: console::Style::new().red(),
        }
    }
}

impl TextPalette {
    pub fn cell(&self, class: CellClass) -> &console::Style {
        match class {
            CellClass::Today => &self.today,
            CellClass::FirstOfMonth => &self.first_of_month,
            CellClass::Empty => &self.empty,
            CellClass::Low => &self.low,
            CellClass::Middle => &self.middle,
            CellClass::High => &self.high,
        }
    }
}

/// Styles for the dashboard panels.
#[derive(Debug, Clone)]
pub struct TuiPalette {
    pub today: TuiStyle,
    pub first_of_month: TuiStyle,
    pub empty: TuiStyle,
    pub low: TuiStyle,
    pub middle: TuiStyle,
    pub high: TuiStyle,
    pub title: TuiStyle,
    pub selected_border: TuiStyle,
    pub additions: TuiStyle,
    pub deletions: TuiStyle,
    pub authors: Vec<Color>,
}

impl Default for TuiPalette {
    fn default() -> Self {
        Self {
            today: TuiStyle::default().fg(Color::White).bg(Color::Magenta),
            first_of_month: TuiStyle::default().fg(Color::Cyan),
            empty: TuiStyle::default().fg(Color::DarkGray),
            low: TuiStyle::default(),
            middle: TuiStyle::default().fg(Color::Green),
            high: TuiStyle::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            title: TuiStyle::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            selected_border: TuiStyle::default().fg(Color::Yellow),
            additions: TuiStyle::default().fg(Color::Green),
            deletions: TuiStyle::default().fg(Color::Red),
            authors: vec![
                Color::Red,
                Color::Green,
                Color::Yellow,
                Color::Blue,
                Color::Magenta,
                Color::Cyan,
                Color::White,
            ],
        }
    }
}

impl TuiPalette {
    pub fn cell(&self, class: CellClass) -> TuiStyle {
        match class {
            CellClass::Today => self.today,
            CellClass::FirstOfMonth => self.first_of_month,
            CellClass::Empty => self.empty,
            CellClass::Low => self.low,
            CellClass::Middle => self.middle,
            CellClass::High => self.high,
        }
    }

    pub fn author_color(&self, index: usize) -> Color {
        if self.authors.is_empty() {
            return Color::White;
        }
        self.authors[index % self.authors.len()]
    }
}
