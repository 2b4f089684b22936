//! Operation report
//!
//! One row per operation with its color and the number of faces and edges it
//! added, altered and removed, rendered as a boxed table.

use std::fmt;

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::ReportConfig;
use crate::history::History;
use crate::palette::AutoColor;

/// A report column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfoColumn {
    Index,
    Label,
    Kind,
    ColorHex,
    ColorName,
    FacesAdded,
    FacesAltered,
    FacesRemoved,
    EdgesAdded,
    EdgesAltered,
    EdgesRemoved,
}

impl InfoColumn {
    /// Every column
    pub const ALL: [InfoColumn; 11] = [
        Self::Index,
        Self::Label,
        Self::Kind,
        Self::ColorHex,
        Self::ColorName,
        Self::FacesAdded,
        Self::FacesAltered,
        Self::FacesRemoved,
        Self::EdgesAdded,
        Self::EdgesAltered,
        Self::EdgesRemoved,
    ];

    /// Columns shown unless configured otherwise
    ///
    /// The color columns are left out on purpose: rows are already tinted
    /// with their color. Rows still carry the color for `ColorHex` and
    /// `ColorName`.
    pub const DEFAULT: [InfoColumn; 9] = [
        Self::Index,
        Self::Label,
        Self::Kind,
        Self::FacesAdded,
        Self::FacesAltered,
        Self::FacesRemoved,
        Self::EdgesAdded,
        Self::EdgesAltered,
        Self::EdgesRemoved,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Self::Index => "idx",
            Self::Label => "label",
            Self::Kind => "type",
            Self::ColorHex => "color_hex",
            Self::ColorName => "color_name",
            Self::FacesAdded => "f+",
            Self::FacesAltered => "f~",
            Self::FacesRemoved => "f-",
            Self::EdgesAdded => "e+",
            Self::EdgesAltered => "e~",
            Self::EdgesRemoved => "e-",
        }
    }

    fn is_numeric(self) -> bool {
        !matches!(
            self,
            Self::Label | Self::Kind | Self::ColorHex | Self::ColorName
        )
    }
}

/// Summary of one operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub index: usize,
    pub id: String,
    pub kind: String,
    pub color: Color,
    /// Added, altered and removed faces
    pub faces: [usize; 3],
    /// Added, altered and removed edges
    pub edges: [usize; 3],
}

impl ReportRow {
    /// Text of a cell
    pub fn cell(&self, column: InfoColumn) -> String {
        match column {
            InfoColumn::Index => self.index.to_string(),
            InfoColumn::Label => self.id.clone(),
            InfoColumn::Kind => self.kind.clone(),
            InfoColumn::ColorHex => self.color.to_hex(),
            InfoColumn::ColorName => self.color.name().to_string(),
            InfoColumn::FacesAdded => self.faces[0].to_string(),
            InfoColumn::FacesAltered => self.faces[1].to_string(),
            InfoColumn::FacesRemoved => self.faces[2].to_string(),
            InfoColumn::EdgesAdded => self.edges[0].to_string(),
            InfoColumn::EdgesAltered => self.edges[1].to_string(),
            InfoColumn::EdgesRemoved => self.edges[2].to_string(),
        }
    }
}

/// Operation report
#[derive(Debug, Clone)]
pub struct Report {
    rows: Vec<ReportRow>,
    config: ReportConfig,
}

impl Report {
    /// Summarize a history
    ///
    /// Operations without an explicit color show the color `auto` gives them.
    pub fn from_history(history: &History, auto: &dyn AutoColor, config: &ReportConfig) -> Self {
        let total = history.len();
        let rows = history
            .iter()
            .map(|op| ReportRow {
                index: op.index(),
                id: op.id().to_string(),
                kind: op.kind().name().to_string(),
                color: op
                    .color()
                    .unwrap_or_else(|| auto.auto_color(op.index(), total)),
                faces: op.face_counts(),
                edges: op.edge_counts(),
            })
            .collect();
        Self {
            rows,
            config: config.clone(),
        }
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    fn widths(&self) -> Vec<usize> {
        self.config
            .columns
            .iter()
            .map(|column| {
                self.rows
                    .iter()
                    .map(|row| row.cell(*column).chars().count())
                    .chain(std::iter::once(column.header().chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

/// Horizontal rule such as `╒═══╤═══╕`
fn rule(widths: &[usize], left: char, middle: char, right: char) -> String {
    let mut line = String::new();
    line.push(left);
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            line.push(middle);
        }
        line.push_str(&"═".repeat(width + 2));
    }
    line.push(right);
    line
}

fn pad(text: &str, width: usize, numeric: bool) -> String {
    if numeric {
        format!("{text:>width$}")
    } else {
        format!("{text:<width$}")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.config.columns;
        let widths = self.widths();

        writeln!(f, "{}", rule(&widths, '╒', '╤', '╕'))?;
        let header: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(column, width)| pad(column.header(), *width, false))
            .collect();
        writeln!(f, "│ {} │", header.join(" │ "))?;
        writeln!(f, "{}", rule(&widths, '╞', '╪', '╡'))?;

        for row in &self.rows {
            let [r, g, b, _] = row.color.to_rgba8();
            let cells: Vec<String> = columns
                .iter()
                .zip(&widths)
                .map(|(column, width)| {
                    let text = pad(&row.cell(*column), *width, column.is_numeric());
                    if self.config.colored {
                        text.truecolor(r, g, b).to_string()
                    } else {
                        text
                    }
                })
                .collect();
            writeln!(f, "│ {} │", cells.join(" │ "))?;
        }

        write!(f, "{}", rule(&widths, '╘', '╧', '╛'))
    }
}
