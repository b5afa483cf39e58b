pub const ALL_DOCUMENTS: &str = "all";

/// Which stored content a quiz or chat turn draws from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentSelector {
    All,
    Named(String),
}

impl DocumentSelector {
    pub fn parse(value: &str) -> Result<Self, String> {
        let value = value.trim();
        if value.is_empty() {
            return Err("Document name cannot be empty".to_string());
        }

        if value == ALL_DOCUMENTS {
            Ok(DocumentSelector::All)
        } else {
            Ok(DocumentSelector::Named(value.to_string()))
        }
    }

    /// Parses an optional selector, treating a missing or blank value as no selection.
    pub fn parse_optional(value: Option<&str>) -> Option<Self> {
        value.and_then(|v| Self::parse(v).ok())
    }

    pub fn as_str(&self) -> &str {
        match self {
            DocumentSelector::All => ALL_DOCUMENTS,
            DocumentSelector::Named(name) => name,
        }
    }
}

impl std::fmt::Display for DocumentSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_sentinel() {
        assert_eq!(DocumentSelector::parse("all").unwrap(), DocumentSelector::All);
        assert_eq!(
            DocumentSelector::parse("biology.pdf").unwrap(),
            DocumentSelector::Named("biology.pdf".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(DocumentSelector::parse("  ").is_err());
        assert_eq!(DocumentSelector::parse_optional(Some("")), None);
        assert_eq!(DocumentSelector::parse_optional(None), None);
    }

    #[test]
    fn test_as_str_round_trip() {
        assert_eq!(DocumentSelector::All.as_str(), "all");
        assert_eq!(
            DocumentSelector::Named("a.pdf".to_string()).to_string(),
            "a.pdf"
        );
    }
}
