use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::{debug, info};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::clean::{clean_title, is_weird, Cleaner};
use crate::metrics::{RunTracker, SourceStats};

/// Scraper exports, concatenated in this order before shuffling.
pub const SOURCE_FILES: &[&str] = &[
    "news_turnbackhoax fix.csv",
    "news_antaranews fix.csv",
    "news_kompascom fix.csv",
    "news_tempo fix.csv",
];
pub const SHUFFLE_SEED: u64 = 42;

pub const TITLE: &str = "title";
pub const NARASI: &str = "narasi";
pub const PENJELASAN: &str = "penjelasan";
pub const STATUS: &str = "status";

pub const DERIVED_COLUMNS: &[&str] = &[
    "clean_title",
    "clean_narasi",
    "clean_penjelasan",
    "final_text",
    "label",
];

/// Cell values spreadsheet/pandas exports use for "no value".
const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "<NA>", "N/A", "n/a", "NA", "NULL", "null", "NaN", "nan",
    "-NaN", "-nan", "None",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{file}: CSV must have columns 'title' and 'narasi' (missing '{column}')")]
    MissingTextColumn { file: String, column: &'static str },
    #[error("column 'status' not found in {file}")]
    MissingStatus { file: String },
}

fn cell(raw: &str) -> Option<String> {
    if NULL_MARKERS.contains(&raw.trim()) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// One scraper export as read from disk.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl SourceTable {
    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .with_context(|| format!("Failed to read header of {}", name))?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record =
                result.with_context(|| format!("Failed to read record {} in {}", idx, name))?;
            let row = (0..headers.len())
                .map(|i| record.get(i).and_then(cell))
                .collect();
            rows.push(row);
        }

        Ok(SourceTable {
            name: name.to_string(),
            headers,
            rows,
        })
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

pub fn read_source(path: &Path) -> Result<SourceTable> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open source file: {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    SourceTable::from_reader(&name, file)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanedRecord {
    pub source: String,
    /// Non-null original cells in header order.
    pub original: Vec<(String, String)>,
    pub clean_title: String,
    pub clean_narasi: String,
    pub clean_penjelasan: String,
    pub final_text: String,
    pub label: u8,
}

impl CleanedRecord {
    pub fn original(&self, column: &str) -> Option<&str> {
        self.original
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v.as_str())
    }
}

pub fn status_to_label(status: Option<&str>) -> u8 {
    match status {
        Some(s) if s.trim().to_lowercase() == "hoax" => 1,
        _ => 0,
    }
}

enum RowOutcome {
    Missing,
    Weird,
    Kept(CleanedRecord),
}

struct Columns {
    title: usize,
    narasi: usize,
    penjelasan: Option<usize>,
    status: Option<usize>,
}

fn clean_row(table: &SourceTable, cols: &Columns, row: &[Option<String>], cleaner: &Cleaner) -> RowOutcome {
    let get = |i: usize| row.get(i).and_then(|c| c.as_deref());
    let (Some(title), Some(narasi)) = (get(cols.title), get(cols.narasi)) else {
        return RowOutcome::Missing;
    };

    let clean_title = clean_title(title);
    let clean_narasi = cleaner.clean_body(narasi);
    let clean_penjelasan = cols
        .penjelasan
        .and_then(get)
        .map(|p| cleaner.clean_body(p))
        .unwrap_or_default();

    if is_weird(&clean_title, &clean_narasi, &clean_penjelasan) {
        return RowOutcome::Weird;
    }

    let final_text = format!("{} {} {}", clean_title, clean_narasi, clean_penjelasan)
        .trim()
        .to_string();
    let original = table
        .headers
        .iter()
        .zip(row)
        .filter_map(|(h, c)| c.as_ref().map(|v| (h.clone(), v.clone())))
        .collect();

    RowOutcome::Kept(CleanedRecord {
        source: table.name.clone(),
        original,
        clean_title,
        clean_narasi,
        clean_penjelasan,
        final_text,
        label: status_to_label(cols.status.and_then(get)),
    })
}

#[cfg(feature = "rayon")]
fn clean_rows(table: &SourceTable, cols: &Columns, cleaner: &Cleaner, pb: &ProgressBar) -> Vec<RowOutcome> {
    table
        .rows
        .par_iter()
        .map(|row| {
            let out = clean_row(table, cols, row, cleaner);
            pb.inc(1);
            out
        })
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn clean_rows(table: &SourceTable, cols: &Columns, cleaner: &Cleaner, pb: &ProgressBar) -> Vec<RowOutcome> {
    table
        .rows
        .iter()
        .map(|row| {
            let out = clean_row(table, cols, row, cleaner);
            pb.inc(1);
            out
        })
        .collect()
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Clean every row of one table, dropping rows with a missing title/body and
/// rows the quality filter rejects. Labels come from `status` when present.
pub fn preprocess(
    table: &SourceTable,
    cleaner: &Cleaner,
) -> Result<(Vec<CleanedRecord>, SourceStats), SchemaError> {
    let missing = |column| SchemaError::MissingTextColumn {
        file: table.name.clone(),
        column,
    };
    let cols = Columns {
        title: table.column(TITLE).ok_or_else(|| missing(TITLE))?,
        narasi: table.column(NARASI).ok_or_else(|| missing(NARASI))?,
        penjelasan: table.column(PENJELASAN),
        status: table.column(STATUS),
    };

    let pb = progress_bar(table.rows.len());
    pb.set_message(table.name.clone());
    let outcomes = clean_rows(table, &cols, cleaner, &pb);
    pb.finish_and_clear();

    let mut stats = SourceStats::new(&table.name);
    stats.loaded = table.rows.len();
    let mut records = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            RowOutcome::Missing => stats.dropped_missing += 1,
            RowOutcome::Weird => stats.dropped_weird += 1,
            RowOutcome::Kept(rec) => {
                stats.hoax += rec.label as usize;
                records.push(rec);
            }
        }
    }
    stats.kept = records.len();
    Ok((records, stats))
}

/// Labeled sub-dataset of one source; the source must carry `status`.
pub fn process_source(
    table: &SourceTable,
    cleaner: &Cleaner,
) -> Result<(Vec<CleanedRecord>, SourceStats), SchemaError> {
    if table.column(STATUS).is_none() {
        return Err(SchemaError::MissingStatus {
            file: table.name.clone(),
        });
    }
    preprocess(table, cleaner)
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Union of original columns across sources, first-seen order.
    pub passthrough: Vec<String>,
    pub records: Vec<CleanedRecord>,
}

impl Dataset {
    pub fn columns(&self) -> Vec<String> {
        self.passthrough
            .iter()
            .cloned()
            .chain(DERIVED_COLUMNS.iter().map(|c| c.to_string()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Process tables in order, concatenate, then shuffle once with `seed`.
pub fn assemble_tables(
    tables: &[SourceTable],
    seed: u64,
    cleaner: &Cleaner,
    tracker: &mut RunTracker,
) -> Result<Dataset> {
    let mut dataset = Dataset::default();
    for table in tables {
        let (records, stats) = process_source(table, cleaner)?;
        tracker.record(stats);
        for h in &table.headers {
            if !h.is_empty() && !dataset.passthrough.contains(h) {
                dataset.passthrough.push(h.clone());
            }
        }
        dataset.records.extend(records);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    dataset.records.shuffle(&mut rng);
    debug!(seed, rows = dataset.len(), "dataset shuffled");
    Ok(dataset)
}

/// Read every source under `data_dir` and assemble the combined dataset.
pub fn assemble(
    data_dir: &Path,
    sources: &[&str],
    seed: u64,
    cleaner: &Cleaner,
    tracker: &mut RunTracker,
) -> Result<Dataset> {
    let mut tables = Vec::with_capacity(sources.len());
    for source in sources {
        let path = data_dir.join(source);
        let table = read_source(&path)?;
        info!(file = %path.display(), rows = table.rows.len(), "loaded source");
        tables.push(table);
    }
    assemble_tables(&tables, seed, cleaner, tracker)
}

// ── Tests ──
