use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Portfolio record. Serializes to the public projection with the wire
/// field names, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PortfolioItem {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    #[serde(rename = "projectURL")]
    pub project_url: Option<String>,
    #[serde(rename = "repoURL")]
    pub repo_url: Option<String>,
    #[serde(rename = "imgURL")]
    pub img_url: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

/// Fields supplied when a portfolio item is created out-of-band.
#[derive(Debug, Clone, Default)]
pub struct NewPortfolioItem {
    pub title: String,
    pub category: String,
    pub project_url: Option<String>,
    pub repo_url: Option<String>,
    pub img_url: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
}

impl NewPortfolioItem {
    pub fn into_item(self, id: Uuid) -> PortfolioItem {
        PortfolioItem {
            id,
            title: self.title,
            category: self.category,
            project_url: self.project_url,
            repo_url: self.repo_url,
            img_url: self.img_url,
            description: self.description,
            date: self.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_uses_wire_names_in_order() {
        let item = NewPortfolioItem {
            title: "Site Redesign".into(),
            category: "web".into(),
            ..Default::default()
        }
        .into_item(Uuid::nil());

        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(
            json,
            r#"{"id":"00000000-0000-0000-0000-000000000000","title":"Site Redesign","category":"web","projectURL":null,"repoURL":null,"imgURL":null,"description":null,"date":null}"#
        );
    }
}
