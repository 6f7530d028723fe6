use crate::callibri_types::CallRecord;
use crate::error::StorageError;
use crate::utils::parse_call_date;

use sqlx::types::time::PrimitiveDateTime;

/// A call as it is bound into the `calls` table.
#[derive(Debug, PartialEq, sqlx::FromRow)]
pub struct CallRow {
    pub date: PrimitiveDateTime,
    pub phone: String,
    pub status: String,
    pub comment: String,
    pub link_download: String,
    pub call_status: String,
    pub name: String,
    pub is_lid: i16,
    pub region: String,
    pub accurately: String,
    pub responsible_manager: String,
    pub lid_catcher: String,
}

impl TryFrom<&CallRecord> for CallRow {
    type Error = StorageError;

    fn try_from(record: &CallRecord) -> Result<Self, Self::Error> {
        let date = parse_call_date(&record.date).map_err(|source| StorageError::InvalidDate {
            value: record.date.clone(),
            source,
        })?;

        Ok(Self {
            date,
            phone: record.phone.clone(),
            status: record.status.clone(),
            comment: record.comment.clone(),
            link_download: record.link_download.clone(),
            call_status: record.call_status.clone(),
            name: record.name.clone(),
            is_lid: i16::from(record.is_lid),
            region: record.region.clone(),
            accurately: record.accurately.clone(),
            responsible_manager: record.responsible_manager.clone(),
            lid_catcher: record.lid_catcher.clone(),
        })
    }
}
