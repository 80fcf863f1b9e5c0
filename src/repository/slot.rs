use diesel::prelude::*;

use crate::{
    models::storage_slot::{NewStorageSlot, StorageSlot},
    repository::{DieselRepository, RepositoryResult, SlotReader, SlotWriter},
};

impl SlotReader for DieselRepository {
    fn read_slot(&self, key: &str) -> RepositoryResult<Option<String>> {
        use crate::schema::storage_slots;

        let mut conn = self.conn()?;
        let slot = storage_slots::table
            .find(key)
            .first::<StorageSlot>(&mut conn)
            .optional()?;

        Ok(slot.map(|slot| slot.payload))
    }
}

impl SlotWriter for DieselRepository {
    fn write_slot(&self, key: &str, payload: &str) -> RepositoryResult<()> {
        use crate::schema::storage_slots;

        let mut conn = self.conn()?;
        diesel::replace_into(storage_slots::table)
            .values(&NewStorageSlot::new(key, payload))
            .execute(&mut conn)?;

        Ok(())
    }
}
