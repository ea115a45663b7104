use crate::error::GraphError;
use crate::utils::*;
use log::{debug, info, warn};
use plotly::common::{Mode, Title};
use plotly::layout::themes::PLOTLY_WHITE;
use plotly::layout::{Axis, Layout};
use plotly::{Plot, Scatter};
use serde::Serialize;
use std::fs;
use std::path::Path;
pub mod error;
pub mod graphs_cli;
pub mod utils;

// constants
pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");
pub const COMMENT: char = '#';
pub const DELIMITER: u8 = b',';
pub const Y_TITLE: &str = "Value";
pub const OUTPUT_SUFFIX: &str = ".html";
/// One pass per pair, in this order.
/// The recorder logs share the csv layout, so both go through the same parser.
pub const SUFFIX_PAIRS: [SuffixPair; 2] = [
    SuffixPair {
        input: ".csv",
        output: OUTPUT_SUFFIX,
    },
    SuffixPair {
        input: ".log",
        output: OUTPUT_SUFFIX,
    },
];

/// A single parsed field.
/// Serialized as a json number, string or null, so missing values are gaps in the lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

/// The parsed input table, stored by column.
/// The first column is the key (time, tick, frame...) shared by all the other columns;
/// this is assumed from the layout and never checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub names: Vec<String>,
    pub columns: Vec<Vec<Cell>>,
}

impl Table {
    /// Read and parse the table at the given path.
    pub fn from_csv<P>(fin: P) -> Result<Table, GraphError>
    where
        P: AsRef<Path>,
    {
        let fin = fin.as_ref();
        let text = fs::read_to_string(fin).map_err(|e| GraphError::io(fin, e))?;
        Table::from_text(&text, fin)
    }

    /// Parse the table from text; origin is only used for the error messages.
    /// Comment lines are removed before parsing, so they never count as rows.
    /// Short rows are padded with missing cells, rows longer than the header are an error.
    pub fn from_text(text: &str, origin: &Path) -> Result<Table, GraphError> {
        let data = strip_comments(text);
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .flexible(true)
            .from_reader(data.as_bytes());
        let names: Vec<String> = reader
            .headers()
            .map_err(|e| GraphError::csv(origin, e))?
            .iter()
            .map(|h| h.to_owned())
            .collect();
        if names.is_empty() {
            return Err(GraphError::MissingHeader(origin.to_path_buf()));
        }
        let width = names.len();
        let mut columns: Vec<Vec<Cell>> = vec![Vec::new(); width];
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|e| GraphError::csv(origin, e))?;
            if record.len() > width {
                return Err(GraphError::RowTooLong {
                    path: origin.to_path_buf(),
                    row: i + 1,
                    found: record.len(),
                    expected: width,
                });
            }
            for (j, column) in columns.iter_mut().enumerate() {
                column.push(record.get(j).map_or(Cell::Missing, parse_cell));
            }
        }
        Ok(Table { names, columns })
    }

    pub fn key_name(&self) -> &str {
        &self.names[0]
    }

    pub fn n_rows(&self) -> usize {
        self.columns[0].len()
    }
}

/// One line of the chart, from one dependent column.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub x: Vec<Cell>,
    pub y: Vec<Cell>,
}

/// The chart document rendered for one input file.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub series: Vec<Series>,
}

impl Chart {
    /// One series for each column after the key, in column order,
    /// all sharing the key column as x.
    /// A table with only the key column gives a chart without series.
    pub fn from_table(title: &str, table: &Table) -> Chart {
        let key = &table.columns[0];
        let series = table
            .names
            .iter()
            .zip(table.columns.iter())
            .skip(1)
            .map(|(name, column)| Series {
                name: name.clone(),
                x: key.clone(),
                y: column.clone(),
            })
            .collect();
        Chart {
            title: title.to_owned(),
            x_title: table.key_name().to_owned(),
            y_title: String::from(Y_TITLE),
            series,
        }
    }

    /// Build the plotly figure: lines only, plotly_white theme,
    /// plotly.js inlined so the document renders offline.
    pub fn to_plot(&self) -> Plot {
        let layout = Layout::new()
            .template(&*PLOTLY_WHITE)
            .title(Title::new(&self.title))
            .x_axis(Axis::new().title(Title::new(&self.x_title)))
            .y_axis(Axis::new().title(Title::new(&self.y_title)));
        let mut plot = Plot::new();
        plot.use_local_plotly();
        for s in self.series.iter() {
            let trace = Scatter::new(s.x.clone(), s.y.clone())
                .mode(Mode::Lines)
                .name(&s.name);
            plot.add_trace(trace);
        }
        plot.set_layout(layout);
        plot
    }

    /// The standalone interactive html document.
    pub fn to_html(&self) -> String {
        self.to_plot().to_html()
    }

    /// Write the html document, failing on any I/O error.
    /// A failed write can leave a partial file behind.
    pub fn write_html<P>(&self, fout: P) -> Result<(), GraphError>
    where
        P: AsRef<Path>,
    {
        let fout = fout.as_ref();
        fs::write(fout, self.to_html()).map_err(|e| GraphError::io(fout, e))
    }
}

pub fn generate_notice(name: &str) -> String {
    format!("Generating HTML file for {}", name)
}

pub fn skip_notice(name: &str) -> String {
    format!("Skipping {}, HTML file already exists...", name)
}

/// Parse the input of the pair and write its chart to the output.
pub fn render_file(pair: &FilePair) -> Result<(), GraphError> {
    let name = pair.input_name();
    let table = Table::from_csv(&pair.input)?;
    debug!(
        "{}: {} columns, {} rows",
        name,
        table.names.len(),
        table.n_rows()
    );
    if table.n_rows() == 0 {
        warn!("{} has a header but no data rows, the chart will be empty", name);
    }
    let chart = Chart::from_table(&name, &table);
    println!("{}", generate_notice(&name));
    chart.write_html(&pair.output)
}

/// Render every matching file in dir, one pass per suffix pair.
/// Inputs whose output already exists are skipped and never touched again.
/// The first error stops the whole run; outputs written until then stay.
pub fn render_dir<P>(dir: P, suffix_pairs: &[SuffixPair]) -> Result<(), GraphError>
where
    P: AsRef<Path>,
{
    let dir = dir.as_ref();
    for suffixes in suffix_pairs.iter() {
        let inputs = find_files(dir, suffixes.input)?;
        info!(
            "found {} {} files in {:?}",
            inputs.len(),
            suffixes.input,
            dir
        );
        for fin in inputs.iter() {
            let pair = FilePair::new(fin, *suffixes);
            if pair.is_rendered() {
                println!("{}", skip_notice(&pair.input_name()));
                continue;
            }
            render_file(&pair)?;
        }
    }
    Ok(())
}
