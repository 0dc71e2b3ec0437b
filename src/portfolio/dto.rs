use serde::Deserialize;

use super::repo_types::PortfolioItem;

/// Partial update body for `PUT /portfolio/update/:id`.
///
/// A field that is absent or `null` leaves the stored value untouched;
/// any other value overwrites it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortfolioPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "projectURL")]
    pub project_url: Option<String>,
    #[serde(rename = "repoURL")]
    pub repo_url: Option<String>,
    #[serde(rename = "imgURL")]
    pub img_url: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

impl PortfolioPatch {
    pub fn apply(&self, item: &mut PortfolioItem) {
        if let Some(v) = &self.title {
            item.title = v.clone();
        }
        if let Some(v) = &self.category {
            item.category = v.clone();
        }
        overwrite(&mut item.project_url, &self.project_url);
        overwrite(&mut item.repo_url, &self.repo_url);
        overwrite(&mut item.img_url, &self.img_url);
        overwrite(&mut item.description, &self.description);
        overwrite(&mut item.date, &self.date);
    }
}

fn overwrite(slot: &mut Option<String>, value: &Option<String>) {
    if let Some(v) = value {
        *slot = Some(v.clone());
    }
}
