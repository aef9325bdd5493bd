//! Mars/Earth comparison table scraper.
//!
//! Unlike the other scrapers this one does not use the browser: the facts
//! page is static, so the HTML is fetched directly and its first `<table>` is
//! re-rendered as a Bootstrap-styled table indexed by `Description`.
//!
//! Any failure here (transport, HTTP status, missing or oddly shaped table)
//! becomes `None`; a partial table is never returned.

use crate::utils::{collapse_whitespace, element_text, escape_html, truncate_for_log};
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use std::fmt::Write;
use tracing::{debug, info, instrument, warn};

/// Column labels assigned to the scraped table; the first becomes the index.
pub const COLUMNS: [&str; 3] = ["Description", "Mars", "Earth"];

const TABLE_CLASSES: &str = "table table-striped";

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());

/// Fetch the facts page and render its first table, or `None` on any failure.
#[instrument(level = "info", skip(client))]
pub async fn mars_facts(client: &Client, url: &str) -> Option<String> {
    match fetch_facts(client, url).await {
        Ok(Some(table)) => {
            info!(bytes = table.len(), "Rendered facts table");
            debug!(table = %truncate_for_log(&table, 300), "Facts table");
            Some(table)
        }
        Ok(None) => {
            warn!("Facts page has no usable table");
            None
        }
        Err(e) => {
            warn!(error = %e, "Facts fetch failed");
            None
        }
    }
}

async fn fetch_facts(client: &Client, url: &str) -> Result<Option<String>, Box<dyn Error>> {
    let html = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(parse_facts_table(&html))
}

/// Re-render the first table in `html`.
///
/// Header rows (the `<thead>`, or leading all-`<th>` rows without one) are
/// dropped and replaced by [`COLUMNS`]. Returns `None` when there is no
/// table, no body rows, or a body row that is not exactly three cells wide.
pub fn parse_facts_table(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let table = document.select(&TABLE).next()?;

    let rows: Vec<(bool, Vec<ElementRef<'_>>)> = table
        .select(&ROW)
        .filter(|row| belongs_to(*row, table))
        .map(|row| (in_thead(row), cells(row)))
        .collect();

    let has_thead = rows.iter().any(|(head, _)| *head);
    let mut leading_header = !has_thead;
    let mut body: Vec<Vec<String>> = Vec::new();
    for (head, row_cells) in rows {
        if head {
            continue;
        }
        if leading_header && is_all_th(&row_cells) {
            continue;
        }
        leading_header = false;
        body.push(
            row_cells
                .into_iter()
                .flat_map(|cell| {
                    let text = collapse_whitespace(&element_text(cell));
                    std::iter::repeat_n(text, colspan(cell))
                })
                .collect(),
        );
    }

    if body.is_empty() {
        debug!("Facts table has no body rows");
        return None;
    }
    if let Some(bad) = body.iter().find(|row| row.len() != COLUMNS.len()) {
        debug!(width = bad.len(), "Facts table row has the wrong number of cells");
        return None;
    }

    Some(render_table(&body))
}

/// The row's section (`thead`/`tbody`/`tfoot`) sits directly under `table`.
fn belongs_to(row: ElementRef<'_>, table: ElementRef<'_>) -> bool {
    row.parent()
        .and_then(|section| section.parent())
        .is_some_and(|t| t.id() == table.id())
}

fn in_thead(row: ElementRef<'_>) -> bool {
    row.parent()
        .and_then(ElementRef::wrap)
        .is_some_and(|section| section.value().name() == "thead")
}

fn cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .collect()
}

/// Number of columns a cell covers; a missing or unusable `colspan` is 1.
fn colspan(cell: ElementRef<'_>) -> usize {
    cell.value()
        .attr("colspan")
        .and_then(|span| span.trim().parse::<usize>().ok())
        .filter(|span| *span > 0)
        .unwrap_or(1)
}

fn is_all_th(row_cells: &[ElementRef<'_>]) -> bool {
    !row_cells.is_empty() && row_cells.iter().all(|cell| cell.value().name() == "th")
}

/// Render rows of `[description, mars, earth]` with `Description` as the index.
fn render_table(body: &[Vec<String>]) -> String {
    let mut out = String::new();
    writeln!(out, "<table border=\"1\" class=\"dataframe {TABLE_CLASSES}\">").unwrap();
    writeln!(out, "  <thead>").unwrap();
    writeln!(out, "    <tr style=\"text-align: right;\">").unwrap();
    writeln!(out, "      <th></th>").unwrap();
    for column in &COLUMNS[1..] {
        writeln!(out, "      <th>{column}</th>").unwrap();
    }
    writeln!(out, "    </tr>").unwrap();
    writeln!(out, "    <tr>").unwrap();
    writeln!(out, "      <th>{}</th>", COLUMNS[0]).unwrap();
    for _ in &COLUMNS[1..] {
        writeln!(out, "      <th></th>").unwrap();
    }
    writeln!(out, "    </tr>").unwrap();
    writeln!(out, "  </thead>").unwrap();
    writeln!(out, "  <tbody>").unwrap();
    for row in body {
        writeln!(out, "    <tr>").unwrap();
        writeln!(out, "      <th>{}</th>", escape_html(&row[0])).unwrap();
        for value in &row[1..] {
            writeln!(out, "      <td>{}</td>", escape_html(value)).unwrap();
        }
        writeln!(out, "    </tr>").unwrap();
    }
    writeln!(out, "  </tbody>").unwrap();
    write!(out, "</table>").unwrap();
    out
}
