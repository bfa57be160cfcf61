//! Business Record Module
//! The normalized row type produced by every load.

use serde::{Deserialize, Serialize};

/// Placeholder used when a row carries no usable `name`.
pub const UNKNOWN_BUSINESS: &str = "Unknown Business";

/// One normalized row of business-directory data.
///
/// `id` is the 1-based position of the row in the parsed file. It is
/// reassigned on every load and must not be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub id: u32,
    pub name: String,
    pub contact: String,
    pub description: String,
    pub phone: String,
    pub fax: String,
    pub website: String,
    pub addresses: String,
    pub tags: String,
    /// Demo flag, drawn at random on each load.
    pub verified: bool,
}

impl BusinessRecord {
    /// Tags split into individual services, blanks dropped.
    pub fn services(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_tags(tags: &str) -> BusinessRecord {
        BusinessRecord {
            id: 1,
            name: "Test".to_string(),
            contact: String::new(),
            description: String::new(),
            phone: String::new(),
            fax: String::new(),
            website: String::new(),
            addresses: String::new(),
            tags: tags.to_string(),
            verified: false,
        }
    }

    #[test]
    fn test_services_split_and_trimmed() {
        let record = record_with_tags("装修, 设计 ,, 施工,");
        assert_eq!(record.services(), vec!["装修", "设计", "施工"]);
    }

    #[test]
    fn test_services_empty_tags() {
        assert!(record_with_tags("").services().is_empty());
        assert!(record_with_tags(" , ").services().is_empty());
    }
}
