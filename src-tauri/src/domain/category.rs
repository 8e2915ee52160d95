//! Category Entity
//!
//! A waste-type grouping ("Plastic", "Organic") that items belong to.

use serde::{Deserialize, Serialize};
use super::entity::{Entity, DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Opaque identifier
    pub id: String,
    pub name: String,
    /// Image reference (URL)
    pub image: String,
}

impl Category {
    pub fn new(name: String, image: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            image,
        }
    }

    /// Reject blank fields
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("category name is required".to_string()));
        }
        if self.image.trim().is_empty() {
            return Err(DomainError::InvalidInput("category image is required".to_string()));
        }
        Ok(())
    }
}

impl Entity for Category {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_creation() {
        let category = Category::new("Plastic".to_string(), "/img/plastic.png".to_string());
        assert_eq!(category.name, "Plastic");
        assert!(!category.id().is_empty());
        assert!(category.validate().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let category = Category::new("  ".to_string(), "/img/x.png".to_string());
        assert!(matches!(category.validate(), Err(DomainError::InvalidInput(_))));
    }
}
