use async_trait::async_trait;
use uuid::Uuid;

use super::{
    dto::BlogPatch,
    repo_types::{BlogItem, NewBlogItem},
};
use crate::{db::PgStore, error::StoreError, memory::MemoryStore};

#[async_trait]
pub trait BlogRepo: Send + Sync {
    async fn list(&self) -> Result<Vec<BlogItem>, StoreError>;
    async fn get(&self, id: Uuid) -> Result<Option<BlogItem>, StoreError>;
    async fn create(&self, new: NewBlogItem) -> Result<BlogItem, StoreError>;
    async fn update(&self, id: Uuid, patch: &BlogPatch) -> Result<Option<BlogItem>, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<Option<BlogItem>, StoreError>;
}

const COLUMNS: &str = "id, title, date, content, flavor_img_url, ref_url";

#[async_trait]
impl BlogRepo for PgStore {
    async fn list(&self) -> Result<Vec<BlogItem>, StoreError> {
        let rows = sqlx::query_as::<_, BlogItem>(&format!("SELECT {COLUMNS} FROM blog_items"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<BlogItem>, StoreError> {
        let row = sqlx::query_as::<_, BlogItem>(&format!(
            "SELECT {COLUMNS} FROM blog_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create(&self, new: NewBlogItem) -> Result<BlogItem, StoreError> {
        let row = sqlx::query_as::<_, BlogItem>(&format!(
            r#"
            INSERT INTO blog_items (title, date, content, flavor_img_url, ref_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(new.title)
        .bind(new.date)
        .bind(new.content)
        .bind(new.flavor_img_url)
        .bind(new.ref_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: Uuid, patch: &BlogPatch) -> Result<Option<BlogItem>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, BlogItem>(&format!(
            "SELECT {COLUMNS} FROM blog_items WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut item) = current else {
            return Ok(None);
        };
        patch.apply(&mut item);

        let updated = sqlx::query_as::<_, BlogItem>(&format!(
            r#"
            UPDATE blog_items
               SET title = $2, date = $3, content = $4, flavor_img_url = $5, ref_url = $6
             WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(item.id)
        .bind(&item.title)
        .bind(&item.date)
        .bind(&item.content)
        .bind(&item.flavor_img_url)
        .bind(&item.ref_url)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<BlogItem>, StoreError> {
        let row = sqlx::query_as::<_, BlogItem>(&format!(
            "DELETE FROM blog_items WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}

#[async_trait]
impl BlogRepo for MemoryStore {
    async fn list(&self) -> Result<Vec<BlogItem>, StoreError> {
        Ok(self.blog.lock().await.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<BlogItem>, StoreError> {
        Ok(self.blog.lock().await.iter().find(|b| b.id == id).cloned())
    }

    async fn create(&self, new: NewBlogItem) -> Result<BlogItem, StoreError> {
        let mut posts = self.blog.lock().await;
        if posts.iter().any(|b| b.title == new.title) {
            return Err(StoreError::Conflict(format!(
                "blog item titled {:?} already exists",
                new.title
            )));
        }
        let post = new.into_item(Uuid::new_v4());
        posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, id: Uuid, patch: &BlogPatch) -> Result<Option<BlogItem>, StoreError> {
        let mut posts = self.blog.lock().await;
        let Some(pos) = posts.iter().position(|b| b.id == id) else {
            return Ok(None);
        };

        let mut merged = posts[pos].clone();
        patch.apply(&mut merged);
        if posts.iter().any(|b| b.id != id && b.title == merged.title) {
            return Err(StoreError::Conflict(format!(
                "blog item titled {:?} already exists",
                merged.title
            )));
        }

        posts[pos] = merged.clone();
        Ok(Some(merged))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<BlogItem>, StoreError> {
        let mut posts = self.blog.lock().await;
        Ok(posts
            .iter()
            .position(|b| b.id == id)
            .map(|pos| posts.remove(pos)))
    }
}
