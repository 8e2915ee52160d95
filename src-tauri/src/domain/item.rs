//! Item Entity
//!
//! A recyclable object with decomposition time, environmental damage and
//! recycling benefits.

use serde::{Deserialize, Serialize};
use super::entity::{Entity, DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    /// Owning category (must exist)
    pub category_id: String,
    pub name: String,
    pub image: String,
    /// Free text, e.g. "450 years"
    pub decompose_time: String,
    /// Environmental damage, in order
    #[serde(default)]
    pub results: Option<Vec<String>>,
    /// Benefits when recycled properly, in order
    #[serde(default)]
    pub benefits: Option<Vec<String>>,
}

impl Item {
    pub fn new(category_id: String, name: String, image: String, decompose_time: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            category_id,
            name,
            image,
            decompose_time,
            results: None,
            benefits: None,
        }
    }

    pub fn with_details(mut self, results: Vec<String>, benefits: Vec<String>) -> Self {
        self.results = non_empty(results);
        self.benefits = non_empty(benefits);
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        let required = [
            ("name", &self.name),
            ("decomposition time", &self.decompose_time),
            ("image", &self.image),
            ("category", &self.category_id),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::InvalidInput(format!("item {} is required", field)));
            }
        }
        Ok(())
    }
}

/// Trim entries, drop blanks, and collapse an empty list to `None`
fn non_empty(lines: Vec<String>) -> Option<Vec<String>> {
    let lines: Vec<String> = lines
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();
    (!lines.is_empty()).then_some(lines)
}

impl Entity for Item {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_drop_blank_lines() {
        let item = Item::new("plastic".into(), "Bottle".into(), "/b.png".into(), "450 years".into())
            .with_details(vec![" Harms sea life ".into(), "".into()], vec!["  ".into()]);

        assert_eq!(item.results, Some(vec!["Harms sea life".to_string()]));
        assert_eq!(item.benefits, None);
    }

    #[test]
    fn test_missing_decompose_time_rejected() {
        let item = Item::new("plastic".into(), "Bottle".into(), "/b.png".into(), "".into());
        let err = item.validate().unwrap_err();
        assert!(err.to_string().contains("decomposition time"));
    }
}
