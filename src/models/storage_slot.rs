use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::storage_slots)]
#[diesel(primary_key(slot_key))]
pub struct StorageSlot {
    pub slot_key: String,
    pub payload: String,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::storage_slots)]
pub struct NewStorageSlot<'a> {
    pub slot_key: &'a str,
    pub payload: &'a str,
    pub updated_at: NaiveDateTime,
}

impl<'a> NewStorageSlot<'a> {
    /// Slot row stamped with the current time.
    pub fn new(slot_key: &'a str, payload: &'a str) -> Self {
        Self {
            slot_key,
            payload,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
