//! Keyword index: the static topic table the selector scores against.

use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use crate::action::{ChartId, QuickAction};
use crate::error::ChatError;

/// A canned reply payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Markdown-like body (bold, italic, inline code, headings, line breaks).
    pub text: String,
    pub charts: Vec<ChartId>,
    pub actions: Vec<QuickAction>,
}

impl Response {
    pub fn new(text: &str, charts: &[&str], actions: &[&str]) -> Self {
        Self {
            text: text.to_string(),
            charts: charts.iter().map(|c| ChartId::from(*c)).collect(),
            actions: actions.iter().map(|a| QuickAction::from(*a)).collect(),
        }
    }

    /// The category-less reply used when no keyword matches `message`.
    pub fn fallback(message: &str) -> Self {
        Self {
            text: format!(
                "I understand you're asking about \"{}\". \n\n{}",
                message, FALLBACK_BODY
            ),
            charts: Vec::new(),
            actions: vec![
                QuickAction::ViewDashboard,
                QuickAction::BrowseKnowledgeBase,
                QuickAction::ContactSupport,
            ],
        }
    }
}

const FALLBACK_BODY: &str = "While I can help with semiconductor manufacturing analysis, I might need more specific information to provide the most accurate insights. 

Here are some areas where I excel:
- 📊 Yield trend analysis and predictions
- 🔧 Equipment performance optimization  
- 🔍 Root cause analysis for defects
- 📈 Process parameter correlations
- ⚡ Real-time anomaly detection
- 📋 SOP and best practice recommendations

Could you please rephrase your question or provide more context? For example:
- \"What's the yield trend for Lot W2024-001?\"
- \"Which equipment needs attention?\"
- \"Analyze defects in the last 24 hours\"";

/// A topic bucket with trigger keywords and canned replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    keywords: Vec<String>,
    responses: Vec<Response>,
}

impl Category {
    /// Build a category. Keywords are stored lower-cased.
    ///
    /// Fails if there are no keywords, an empty keyword, or no responses.
    pub fn new(
        name: impl Into<String>,
        keywords: &[&str],
        responses: Vec<Response>,
    ) -> Result<Self, ChatError> {
        let name = name.into();
        if keywords.is_empty() {
            return Err(ChatError::InvalidIndex(format!(
                "category '{}' has no keywords",
                name
            )));
        }
        if keywords.iter().any(|k| k.is_empty()) {
            return Err(ChatError::InvalidIndex(format!(
                "category '{}' has an empty keyword",
                name
            )));
        }
        if responses.is_empty() {
            return Err(ChatError::InvalidIndex(format!(
                "category '{}' has no responses",
                name
            )));
        }
        Ok(Self {
            name,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            responses,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// Number of distinct keywords contained in an already lower-cased message.
    pub fn score(&self, normalized: &str) -> usize {
        self.keywords
            .iter()
            .filter(|k| normalized.contains(k.as_str()))
            .count()
    }
}

/// Ordered, read-only table of categories.
///
/// Table order is significant: it decides ties during selection.
#[derive(Debug, Clone)]
pub struct KeywordIndex {
    categories: Vec<Category>,
}

static BUILTIN: LazyLock<Arc<KeywordIndex>> = LazyLock::new(|| {
    Arc::new(KeywordIndex {
        categories: crate::builtin::categories(),
    })
});

impl KeywordIndex {
    /// Build an index, rejecting duplicate category names.
    pub fn new(categories: Vec<Category>) -> Result<Self, ChatError> {
        for (i, cat) in categories.iter().enumerate() {
            if categories[..i].iter().any(|c| c.name == cat.name) {
                return Err(ChatError::InvalidIndex(format!(
                    "duplicate category '{}'",
                    cat.name
                )));
            }
        }
        Ok(Self { categories })
    }

    /// The embedded fab-analytics table, built once per process.
    pub fn builtin() -> Arc<KeywordIndex> {
        Arc::clone(&BUILTIN)
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(text: &str) -> Response {
        Response::new(text, &[], &[])
    }

    #[test]
    fn test_builtin_table_order() {
        let index = KeywordIndex::builtin();
        let names: Vec<&str> = index.categories().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec!["yield", "equipment", "rootcause", "prediction", "correlation", "lineage"]
        );
    }

    #[test]
    fn test_builtin_invariants() {
        for cat in KeywordIndex::builtin().categories() {
            assert!(!cat.keywords().is_empty(), "{} has no keywords", cat.name());
            assert!(!cat.responses().is_empty(), "{} has no responses", cat.name());
            for kw in cat.keywords() {
                assert_eq!(kw, &kw.to_lowercase());
            }
        }
    }

    #[test]
    fn test_category_lookup() {
        let index = KeywordIndex::builtin();
        let eq = index.category("equipment").unwrap();
        assert!(eq.keywords().iter().any(|k| k == "stepper"));
        assert_eq!(eq.responses()[0].charts.len(), 2);
        assert!(index.category("weather").is_none());
    }

    #[test]
    fn test_category_rejects_empty_keywords() {
        let err = Category::new("x", &[], vec![reply("a")]).unwrap_err();
        assert!(matches!(err, ChatError::InvalidIndex(_)));
        assert!(Category::new("x", &["ok", ""], vec![reply("a")]).is_err());
    }

    #[test]
    fn test_category_rejects_no_responses() {
        assert!(Category::new("x", &["kw"], vec![]).is_err());
    }

    #[test]
    fn test_category_lowercases_keywords() {
        let cat = Category::new("x", &["CVD", "Stepper"], vec![reply("a")]).unwrap();
        assert_eq!(cat.keywords(), &["cvd".to_string(), "stepper".to_string()]);
    }

    #[test]
    fn test_score_counts_each_keyword_once() {
        let cat = Category::new("x", &["yield", "trend"], vec![reply("a")]).unwrap();
        assert_eq!(cat.score("yield yield yield"), 1);
        assert_eq!(cat.score("yield trend"), 2);
        assert_eq!(cat.score("nothing here"), 0);
    }

    #[test]
    fn test_index_rejects_duplicate_names() {
        let a = Category::new("dup", &["a"], vec![reply("a")]).unwrap();
        let b = Category::new("dup", &["b"], vec![reply("b")]).unwrap();
        assert!(KeywordIndex::new(vec![a, b]).is_err());
    }

    #[test]
    fn test_fallback_keeps_trailing_spaces() {
        let fb = Response::fallback("x");
        assert!(fb.text.contains("accurate insights. \n"));
        assert!(fb.text.contains("Equipment performance optimization  \n"));
    }

    #[test]
    fn test_fallback_echoes_message() {
        let fb = Response::fallback("asdkfj random text");
        assert!(fb.text.starts_with("I understand you're asking about \"asdkfj random text\"."));
        assert!(fb.charts.is_empty());
        assert_eq!(
            fb.actions,
            vec![
                QuickAction::ViewDashboard,
                QuickAction::BrowseKnowledgeBase,
                QuickAction::ContactSupport
            ]
        );
    }
}
