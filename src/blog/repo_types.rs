use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BlogItem {
    pub id: Uuid,
    pub title: String,
    pub date: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "flavorImgURL")]
    pub flavor_img_url: Option<String>,
    #[serde(rename = "refURL")]
    pub ref_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewBlogItem {
    pub title: String,
    pub date: Option<String>,
    pub content: Option<String>,
    pub flavor_img_url: Option<String>,
    pub ref_url: Option<String>,
}

impl NewBlogItem {
    pub fn into_item(self, id: Uuid) -> BlogItem {
        BlogItem {
            id,
            title: self.title,
            date: self.date,
            content: self.content,
            flavor_img_url: self.flavor_img_url,
            ref_url: self.ref_url,
        }
    }
}
