//! Curated subject names that decide Category vs. Card-list

/// Ordered list of subject names, matched as case-insensitive substrings
#[derive(Debug, Clone)]
pub struct SubjectCatalog {
    subjects: Vec<String>,
}

impl SubjectCatalog {
    pub fn new<I, S>(subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            subjects: subjects
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// First subject contained in `name`; earlier entries take priority
    pub fn classify(&self, name: &str) -> Option<&str> {
        let lower = name.to_lowercase();
        self.subjects
            .iter()
            .find(|subject| lower.contains(subject.as_str()))
            .map(String::as_str)
    }

    /// Every subject contained in `name`, in list order
    pub fn matches(&self, name: &str) -> Vec<&str> {
        let lower = name.to_lowercase();
        self.subjects
            .iter()
            .filter(|subject| lower.contains(subject.as_str()))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_SUBJECTS;

    #[test]
    fn test_classify_is_case_insensitive_substring() {
        let catalog = SubjectCatalog::new(DEFAULT_SUBJECTS);
        assert_eq!(catalog.classify("Бестиарий"), Some("бестиарий"));
        assert_eq!(catalog.classify("Базовые Классы"), Some("классы"));
        assert_eq!(catalog.classify("Звездолёты"), Some("звездолёты"));
        assert_eq!(catalog.classify("Правила"), None);
    }

    #[test]
    fn test_first_match_wins() {
        let catalog = SubjectCatalog::new(["магия", "темы", "магия темы"]);
        assert_eq!(catalog.classify("Магия Темы"), Some("магия"));
        assert_eq!(catalog.matches("Магия Темы"), vec!["магия", "темы", "магия темы"]);
        assert!(catalog.matches("Расы").is_empty());
    }
}
