use anyhow::Result;
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};

use crate::entities::{prelude::*, snapshots};
use crate::snapshot::SnapshotStorage;

pub struct SnapshotRepository {
    db: DatabaseConnection,
}

impl SnapshotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_document(&self, key: &str) -> Result<Option<String>> {
        let model = Snapshots::find_by_id(key.to_string()).one(&self.db).await?;
        Ok(model.map(|m| m.document))
    }

    pub async fn upsert_document(&self, key: &str, document: &str) -> Result<()> {
        let model = snapshots::ActiveModel {
            storage_key: ActiveValue::Set(key.to_string()),
            document: ActiveValue::Set(document.to_string()),
            updated_at: ActiveValue::Set(chrono::Utc::now().into()),
        };

        Snapshots::insert(model)
            .on_conflict(
                OnConflict::column(snapshots::Column::StorageKey)
                    .update_columns([snapshots::Column::Document, snapshots::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl SnapshotStorage for SnapshotRepository {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        self.find_document(key).await
    }

    async fn save(&self, key: &str, document: &str) -> Result<()> {
        self.upsert_document(key, document).await
    }
}
