use rusqlite::{Connection, OptionalExtension};
use crate::models::{Lead, PipelineStage};
use crate::store::{LeadStore, StoreError};

/// SQLite-backed lead store
pub struct SqliteLeadStore {
    conn: Connection,
}

impl SqliteLeadStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn lead_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Lead> {
        let stage_str: String = row.get(6)?;
        Ok(Lead {
            id: Some(row.get(0)?),
            uuid: row.get(1)?,
            name: row.get(2)?,
            company: row.get(3)?,
            email: row.get(4)?,
            phone: row.get(5)?,
            // Unknown slugs (hand-edited rows) fall back to the first stage
            // rather than poisoning the whole list
            stage: PipelineStage::from_str(&stage_str).unwrap_or(PipelineStage::NewLead),
            source: row.get(7)?,
            notes: row.get(8)?,
            last_contacted_ts: row.get(9)?,
            created_ts: row.get(10)?,
        })
    }
}

const LEAD_COLUMNS: &str =
    "id, uuid, name, company, email, phone, stage, source, notes, last_contacted_ts, created_ts";

impl LeadStore for SqliteLeadStore {
    fn list_leads(&self) -> Result<Vec<Lead>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM leads ORDER BY created_ts DESC, id DESC",
            LEAD_COLUMNS
        ))?;

        let rows = stmt.query_map([], Self::lead_from_row)?;

        let mut leads = Vec::new();
        for row in rows {
            leads.push(row?);
        }
        log::debug!("listed {} leads", leads.len());
        Ok(leads)
    }

    fn get_lead(&self, id: i64) -> Result<Option<Lead>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM leads WHERE id = ?1",
            LEAD_COLUMNS
        ))?;

        let lead = stmt.query_row([id], Self::lead_from_row).optional()?;
        Ok(lead)
    }

    fn insert_lead(&self, lead: &Lead) -> Result<Lead, StoreError> {
        self.conn.execute(
            "INSERT INTO leads (uuid, name, company, email, phone, stage, source, notes,
                    last_contacted_ts, created_ts)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            rusqlite::params![
                lead.uuid,
                lead.name,
                lead.company,
                lead.email,
                lead.phone,
                lead.stage.as_str(),
                lead.source,
                lead.notes,
                lead.last_contacted_ts,
                lead.created_ts,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        log::debug!("inserted lead {} ({})", id, lead.name);
        Ok(Lead {
            id: Some(id),
            ..lead.clone()
        })
    }

    fn update_lead(&self, lead: &Lead) -> Result<(), StoreError> {
        let id = match lead.id {
            Some(id) => id,
            None => return Err(StoreError::Database("lead has no id".to_string())),
        };

        let updated = self.conn.execute(
            "UPDATE leads SET name = ?1, company = ?2, email = ?3, phone = ?4,
                    stage = ?5, source = ?6, notes = ?7, last_contacted_ts = ?8
             WHERE id = ?9",
            rusqlite::params![
                lead.name,
                lead.company,
                lead.email,
                lead.phone,
                lead.stage.as_str(),
                lead.source,
                lead.notes,
                lead.last_contacted_ts,
                id,
            ],
        )?;

        if updated == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn update_lead_stage(
        &self,
        id: i64,
        stage: PipelineStage,
        last_contacted_ts: i64,
    ) -> Result<(), StoreError> {
        let updated = self.conn.execute(
            "UPDATE leads SET stage = ?1, last_contacted_ts = ?2 WHERE id = ?3",
            rusqlite::params![stage.as_str(), last_contacted_ts, id],
        )?;

        if updated == 0 {
            return Err(StoreError::NotFound(id));
        }
        log::debug!("lead {} -> {}", id, stage.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;

    fn test_store() -> SqliteLeadStore {
        SqliteLeadStore::new(DbConnection::connect_in_memory().unwrap())
    }

    #[test]
    fn test_insert_and_list() {
        let store = test_store();
        let mut lead = Lead::new("First".to_string());
        lead.created_ts = 100;
        store.insert_lead(&lead).unwrap();
        let mut lead2 = Lead::new("Second".to_string());
        lead2.created_ts = 200;
        store.insert_lead(&lead2).unwrap();

        let leads = store.list_leads().unwrap();
        assert_eq!(leads.len(), 2);
        // Newest first
        assert_eq!(leads[0].name, "Second");
        assert_eq!(leads[1].name, "First");
    }

    #[test]
    fn test_update_lead_stage() {
        let store = test_store();
        let stored = store.insert_lead(&Lead::new("Prospect".to_string())).unwrap();
        let id = stored.id.unwrap();

        store
            .update_lead_stage(id, PipelineStage::Qualified, 12345)
            .unwrap();

        let lead = store.get_lead(id).unwrap().unwrap();
        assert_eq!(lead.stage, PipelineStage::Qualified);
        assert_eq!(lead.last_contacted_ts, Some(12345));
    }

    #[test]
    fn test_update_lead_stage_missing_row() {
        let store = test_store();
        let err = store
            .update_lead_stage(999, PipelineStage::Won, 0)
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(999)));
    }

    #[test]
    fn test_update_lead_full_fields() {
        let store = test_store();
        let mut stored = store.insert_lead(&Lead::new("Prospect".to_string())).unwrap();
        stored.company = Some("Acme".to_string());
        stored.email = Some("sales@acme.test".to_string());
        stored.stage = PipelineStage::Negotiation;
        store.update_lead(&stored).unwrap();

        let lead = store.get_lead(stored.id.unwrap()).unwrap().unwrap();
        assert_eq!(lead.company.as_deref(), Some("Acme"));
        assert_eq!(lead.email.as_deref(), Some("sales@acme.test"));
        assert_eq!(lead.stage, PipelineStage::Negotiation);
    }

    #[test]
    fn test_get_missing_lead() {
        let store = test_store();
        assert!(store.get_lead(42).unwrap().is_none());
    }
}
