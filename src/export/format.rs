//! Table writers, one per output format

use std::io::Write;

use serde_json::{Map, Value};

use crate::config::OutputFormat;
use crate::export::{Dataset, ExportError};

/// Write `dataset` to `out` in `format`.
pub fn write_dataset<W: Write>(
    format: OutputFormat,
    dataset: &Dataset,
    out: W,
) -> Result<(), ExportError> {
    match format {
        OutputFormat::Csv => write_csv(dataset, out),
        OutputFormat::Json => write_json(dataset, out),
        OutputFormat::Markdown => write_markdown(dataset, out),
        OutputFormat::Html => write_html(dataset, out),
    }
}

/// Text form of a cell: strings as-is, `null` empty, everything else as JSON.
#[must_use]
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn write_csv<W: Write>(dataset: &Dataset, out: W) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new().has_headers(true).from_writer(out);
    wtr.write_record(&dataset.columns)?;
    for row in &dataset.rows {
        wtr.write_record(row.iter().map(cell_text))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Array of objects keyed by column name.
fn write_json<W: Write>(dataset: &Dataset, mut out: W) -> Result<(), ExportError> {
    let records: Vec<Value> = dataset
        .rows
        .iter()
        .map(|row| {
            let object: Map<String, Value> = dataset
                .columns
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect();
            Value::Object(object)
        })
        .collect();
    serde_json::to_writer_pretty(&mut out, &records)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

fn markdown_cell(value: &Value) -> String {
    cell_text(value)
        .replace('|', "\\|")
        .replace(['\r', '\n'], " ")
}

fn write_markdown<W: Write>(dataset: &Dataset, mut out: W) -> Result<(), ExportError> {
    writeln!(out, "| {} |", dataset.columns.join(" | "))?;
    let rule: Vec<&str> = dataset.columns.iter().map(|_| "---").collect();
    writeln!(out, "|{}|", rule.join("|"))?;
    for row in &dataset.rows {
        let cells: Vec<String> = row.iter().map(markdown_cell).collect();
        writeln!(out, "| {} |", cells.join(" | "))?;
    }
    out.flush()?;
    Ok(())
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn write_html<W: Write>(dataset: &Dataset, mut out: W) -> Result<(), ExportError> {
    writeln!(out, "<table border=\"1\">")?;
    writeln!(out, "  <thead>")?;
    writeln!(out, "    <tr>")?;
    for column in &dataset.columns {
        writeln!(out, "      <th>{}</th>", escape_html(column))?;
    }
    writeln!(out, "    </tr>")?;
    writeln!(out, "  </thead>")?;
    writeln!(out, "  <tbody>")?;
    for row in &dataset.rows {
        writeln!(out, "    <tr>")?;
        for cell in row {
            writeln!(out, "      <td>{}</td>", escape_html(&cell_text(cell)))?;
        }
        writeln!(out, "    </tr>")?;
    }
    writeln!(out, "  </tbody>")?;
    writeln!(out, "</table>")?;
    out.flush()?;
    Ok(())
}
