use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

use crate::dataset::Dataset;
use crate::metrics::SourceStats;

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create database dir: {}", dir.display()))?;
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS cleaned_news (
            id               INTEGER PRIMARY KEY,
            run_id           TEXT NOT NULL,
            position         INTEGER NOT NULL,
            source           TEXT NOT NULL,
            clean_title      TEXT NOT NULL,
            clean_narasi     TEXT NOT NULL,
            clean_penjelasan TEXT NOT NULL,
            final_text       TEXT NOT NULL,
            label            INTEGER NOT NULL CHECK(label IN (0, 1)),
            original         TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_cleaned_label ON cleaned_news(label);

        CREATE TABLE IF NOT EXISTS source_stats (
            id              INTEGER PRIMARY KEY,
            run_id          TEXT NOT NULL,
            source          TEXT NOT NULL,
            loaded          INTEGER NOT NULL,
            dropped_missing INTEGER NOT NULL,
            dropped_weird   INTEGER NOT NULL,
            kept            INTEGER NOT NULL,
            hoax            INTEGER NOT NULL,
            created_at      TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(run_id, source)
        );
        CREATE INDEX IF NOT EXISTS idx_stats_run ON source_stats(run_id);
        ",
    )?;
    Ok(())
}

/// Replace the stored dataset with `dataset`, keeping its row order.
pub fn save_dataset(conn: &Connection, run_id: &str, dataset: &Dataset) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM cleaned_news", [])?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO cleaned_news
             (run_id, position, source, clean_title, clean_narasi, clean_penjelasan, final_text, label, original)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;
        for (pos, r) in dataset.records.iter().enumerate() {
            let original: serde_json::Map<String, serde_json::Value> = r
                .original
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect();
            stmt.execute(rusqlite::params![
                run_id,
                pos as i64,
                r.source,
                r.clean_title,
                r.clean_narasi,
                r.clean_penjelasan,
                r.final_text,
                r.label,
                serde_json::to_string(&original)?,
            ])?;
        }
    }
    tx.commit()?;
    Ok(dataset.records.len())
}

pub fn insert_source_stats(conn: &Connection, run_id: &str, s: &SourceStats) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO source_stats
         (run_id, source, loaded, dropped_missing, dropped_weird, kept, hoax)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            run_id,
            s.source,
            s.loaded as i64,
            s.dropped_missing as i64,
            s.dropped_weird as i64,
            s.kept as i64,
            s.hoax as i64,
        ],
    )?;
    Ok(())
}

pub fn latest_run(conn: &Connection) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT run_id FROM source_stats ORDER BY id DESC LIMIT 1")?;
    let mut rows = stmt.query([])?;
    match rows.next()? {
        Some(row) => Ok(Some(row.get(0)?)),
        None => Ok(None),
    }
}

pub fn fetch_source_stats(conn: &Connection, run_id: &str) -> Result<Vec<SourceStats>> {
    let mut stmt = conn.prepare(
        "SELECT source, loaded, dropped_missing, dropped_weird, kept, hoax
         FROM source_stats WHERE run_id = ?1 ORDER BY id",
    )?;
    let rows = stmt
        .query_map([run_id], |row| {
            Ok(SourceStats {
                source: row.get(0)?,
                loaded: row.get::<_, i64>(1)? as usize,
                dropped_missing: row.get::<_, i64>(2)? as usize,
                dropped_weird: row.get::<_, i64>(3)? as usize,
                kept: row.get::<_, i64>(4)? as usize,
                hoax: row.get::<_, i64>(5)? as usize,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub struct LabelCounts {
    pub total: i64,
    pub hoax: i64,
    pub fact: i64,
}

pub fn label_counts(conn: &Connection) -> Result<LabelCounts> {
    let (total, hoax): (i64, i64) = conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(label), 0) FROM cleaned_news",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok(LabelCounts {
        total,
        hoax,
        fact: total - hoax,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CleanedRecord;

    fn memory() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn record(label: u8) -> CleanedRecord {
        CleanedRecord {
            source: "news_tempo fix.csv".into(),
            original: vec![("status".into(), if label == 1 { "hoax" } else { "fact" }.into())],
            clean_title: "judul berita ini".into(),
            clean_narasi: "isi".into(),
            clean_penjelasan: String::new(),
            final_text: "judul berita ini isi".into(),
            label,
        }
    }

    #[test]
    fn dataset_replaced_on_save() {
        let conn = memory();
        let ds = Dataset {
            passthrough: vec!["status".into()],
            records: vec![record(1), record(0), record(1)],
        };
        assert_eq!(save_dataset(&conn, "run-a", &ds).unwrap(), 3);
        assert_eq!(save_dataset(&conn, "run-b", &ds).unwrap(), 3);

        let counts = label_counts(&conn).unwrap();
        assert_eq!(counts.total, 3);
        assert_eq!(counts.hoax, 2);
        assert_eq!(counts.fact, 1);

        let original: String = conn
            .query_row("SELECT original FROM cleaned_news WHERE position = 0", [], |r| r.get(0))
            .unwrap();
        assert_eq!(original, r#"{"status":"hoax"}"#);
    }

    #[test]
    fn stats_roundtrip_latest_run() {
        let conn = memory();
        assert_eq!(latest_run(&conn).unwrap(), None);

        let mut s = SourceStats::new("news_kompascom fix.csv");
        s.loaded = 10;
        s.dropped_missing = 1;
        s.dropped_weird = 2;
        s.kept = 7;
        insert_source_stats(&conn, "run-1", &s).unwrap();
        insert_source_stats(&conn, "run-2", &s).unwrap();

        assert_eq!(latest_run(&conn).unwrap().as_deref(), Some("run-2"));
        assert_eq!(fetch_source_stats(&conn, "run-2").unwrap(), vec![s]);
    }
}
