use anyhow::Result;
use rusqlite::{Connection, params};

use crate::domain::history::{HistoryEntry, HistoryId};
use crate::store::repo::VerdictRepository;

pub struct SqliteRepo {
    conn: Connection,
}

impl SqliteRepo {
    pub fn open(path: &std::path::Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.migrate()?;
        Ok(repo)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;

            CREATE TABLE IF NOT EXISTS verdicts (
                id                INTEGER PRIMARY KEY AUTOINCREMENT,
                source            TEXT NOT NULL,
                subject           TEXT NOT NULL,
                status            TEXT NOT NULL,
                message           TEXT NOT NULL,
                signature         TEXT,
                timestamp         TEXT,
                verdict           TEXT,
                checked_at_epoch  INTEGER NOT NULL
            );
            "#,
        )?;
        Ok(())
    }
}

impl VerdictRepository for SqliteRepo {
    fn record(&self, entry: &HistoryEntry) -> Result<HistoryId> {
        self.conn.execute(
            r#"
            INSERT INTO verdicts
              (source, subject, status, message, signature, timestamp, verdict, checked_at_epoch)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                entry.source,
                entry.subject,
                entry.status.as_str(),
                entry.message,
                entry.signature,
                entry.timestamp,
                entry.verdict,
                entry.checked_at_epoch
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, source, subject, status, message, signature, timestamp, verdict, checked_at_epoch
            FROM verdicts
            ORDER BY checked_at_epoch DESC, id DESC
            LIMIT ?1
            "#,
        )?;

        let mut rows = stmt.query(params![limit as i64])?;
        let mut out = Vec::new();

        while let Some(r) = rows.next()? {
            let status: String = r.get(3)?;
            out.push(HistoryEntry {
                id: Some(r.get(0)?),
                source: r.get(1)?,
                subject: r.get(2)?,
                status: status.parse()?,
                message: r.get(4)?,
                signature: r.get(5)?,
                timestamp: r.get(6)?,
                verdict: r.get(7)?,
                checked_at_epoch: r.get(8)?,
            });
        }
        Ok(out)
    }

    fn prune_keep_recent(&self, keep: usize) -> Result<()> {
        self.conn.execute(
            r#"
            DELETE FROM verdicts
            WHERE id NOT IN (
              SELECT id FROM verdicts
              ORDER BY checked_at_epoch DESC, id DESC
              LIMIT ?1
            )
            "#,
            params![keep as i64],
        )?;
        Ok(())
    }
}
