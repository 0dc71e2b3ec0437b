use async_trait::async_trait;
use uuid::Uuid;

use super::{
    dto::PortfolioPatch,
    repo_types::{NewPortfolioItem, PortfolioItem},
};
use crate::{db::PgStore, error::StoreError, memory::MemoryStore};

#[async_trait]
pub trait PortfolioRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<PortfolioItem>, StoreError>;
    async fn get(&self, id: Uuid) -> Result<Option<PortfolioItem>, StoreError>;
    async fn create(&self, new: NewPortfolioItem) -> Result<PortfolioItem, StoreError>;
    /// Applies `patch` atomically. `None` when no item has this id.
    async fn update(
        &self,
        id: Uuid,
        patch: &PortfolioPatch,
    ) -> Result<Option<PortfolioItem>, StoreError>;
    /// Removes the item and returns it. `None` when no item has this id.
    async fn delete(&self, id: Uuid) -> Result<Option<PortfolioItem>, StoreError>;
}

const COLUMNS: &str = "id, title, category, project_url, repo_url, img_url, description, date";

#[async_trait]
impl PortfolioRepo for PgStore {
    async fn list(&self) -> Result<Vec<PortfolioItem>, StoreError> {
        let rows = sqlx::query_as::<_, PortfolioItem>(&format!(
            "SELECT {COLUMNS} FROM portfolio_items"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<PortfolioItem>, StoreError> {
        let row = sqlx::query_as::<_, PortfolioItem>(&format!(
            "SELECT {COLUMNS} FROM portfolio_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create(&self, new: NewPortfolioItem) -> Result<PortfolioItem, StoreError> {
        let row = sqlx::query_as::<_, PortfolioItem>(&format!(
            r#"
            INSERT INTO portfolio_items
                (title, category, project_url, repo_url, img_url, description, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(new.title)
        .bind(new.category)
        .bind(new.project_url)
        .bind(new.repo_url)
        .bind(new.img_url)
        .bind(new.description)
        .bind(new.date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &PortfolioPatch,
    ) -> Result<Option<PortfolioItem>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, PortfolioItem>(&format!(
            "SELECT {COLUMNS} FROM portfolio_items WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        // Dropping the transaction rolls it back.
        let Some(mut item) = current else {
            return Ok(None);
        };
        patch.apply(&mut item);

        let updated = sqlx::query_as::<_, PortfolioItem>(&format!(
            r#"
            UPDATE portfolio_items
               SET title = $2, category = $3, project_url = $4, repo_url = $5,
                   img_url = $6, description = $7, date = $8
             WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(item.id)
        .bind(&item.title)
        .bind(&item.category)
        .bind(&item.project_url)
        .bind(&item.repo_url)
        .bind(&item.img_url)
        .bind(&item.description)
        .bind(&item.date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<PortfolioItem>, StoreError> {
        let row = sqlx::query_as::<_, PortfolioItem>(&format!(
            "DELETE FROM portfolio_items WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}

fn title_taken(title: &str) -> StoreError {
    StoreError::Conflict(format!("portfolio item titled {title:?} already exists"))
}

#[async_trait]
impl PortfolioRepo for MemoryStore {
    async fn list(&self) -> Result<Vec<PortfolioItem>, StoreError> {
        Ok(self.portfolio.lock().await.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<PortfolioItem>, StoreError> {
        let items = self.portfolio.lock().await;
        Ok(items.iter().find(|i| i.id == id).cloned())
    }

    async fn create(&self, new: NewPortfolioItem) -> Result<PortfolioItem, StoreError> {
        let mut items = self.portfolio.lock().await;
        if items.iter().any(|i| i.title == new.title) {
            return Err(title_taken(&new.title));
        }
        let item = new.into_item(Uuid::new_v4());
        items.push(item.clone());
        Ok(item)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &PortfolioPatch,
    ) -> Result<Option<PortfolioItem>, StoreError> {
        let mut items = self.portfolio.lock().await;
        let Some(pos) = items.iter().position(|i| i.id == id) else {
            return Ok(None);
        };

        let mut merged = items[pos].clone();
        patch.apply(&mut merged);
        if items.iter().any(|i| i.id != id && i.title == merged.title) {
            return Err(title_taken(&merged.title));
        }

        items[pos] = merged.clone();
        Ok(Some(merged))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<PortfolioItem>, StoreError> {
        let mut items = self.portfolio.lock().await;
        Ok(items
            .iter()
            .position(|i| i.id == id)
            .map(|pos| items.remove(pos)))
    }
}
