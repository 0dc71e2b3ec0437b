use serde::Deserialize;

use super::repo_types::BlogItem;

/// Partial update body for `PUT /blog/update/:id`. Absent or `null` fields
/// are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub date: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "flavorImgURL")]
    pub flavor_img_url: Option<String>,
    #[serde(rename = "refURL")]
    pub ref_url: Option<String>,
}

impl BlogPatch {
    pub fn apply(&self, item: &mut BlogItem) {
        if let Some(v) = &self.title {
            item.title = v.clone();
        }
        if let Some(v) = &self.date {
            item.date = Some(v.clone());
        }
        if let Some(v) = &self.content {
            item.content = Some(v.clone());
        }
        if let Some(v) = &self.flavor_img_url {
            item.flavor_img_url = Some(v.clone());
        }
        if let Some(v) = &self.ref_url {
            item.ref_url = Some(v.clone());
        }
    }
}
