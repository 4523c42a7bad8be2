//! Response selector: keyword-overlap scoring over the [`KeywordIndex`].

use std::sync::Arc;

use rand::Rng;

use crate::index::{Category, KeywordIndex, Response};

/// Outcome of scoring a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Winning category, `None` for the fallback reply.
    pub category: Option<String>,
    /// Number of the winning category's keywords found in the message.
    pub score: usize,
    pub response: Response,
}

impl Selection {
    pub fn is_fallback(&self) -> bool {
        self.category.is_none()
    }
}

/// Picks the canned reply for a user message.
#[derive(Debug, Clone)]
pub struct ResponseSelector {
    index: Arc<KeywordIndex>,
}

impl Default for ResponseSelector {
    fn default() -> Self {
        Self::new(KeywordIndex::builtin())
    }
}

impl ResponseSelector {
    pub fn new(index: Arc<KeywordIndex>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &KeywordIndex {
        &self.index
    }

    /// Per-category keyword scores, in table order.
    pub fn score(&self, message: &str) -> Vec<(&str, usize)> {
        let normalized = message.to_lowercase();
        self.index
            .categories()
            .map(|c| (c.name(), c.score(&normalized)))
            .collect()
    }

    /// Select the reply for `message`.
    ///
    /// The category with the strictly highest score wins, so an earlier
    /// category keeps a tie. A best score of zero yields the fallback reply.
    /// Among the winner's responses one is drawn uniformly from `rng`.
    pub fn select<R: Rng>(&self, message: &str, rng: &mut R) -> Selection {
        let normalized = message.to_lowercase();

        let mut best: Option<(&Category, usize)> = None;
        for category in self.index.categories() {
            let score = category.score(&normalized);
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((category, score));
            }
        }

        match best {
            Some((category, score)) => {
                let responses = category.responses();
                let pick = rng.random_range(0..responses.len());
                tracing::debug!(category = category.name(), score, pick, "Matched category");
                Selection {
                    category: Some(category.name().to_string()),
                    score,
                    response: responses[pick].clone(),
                }
            }
            None => {
                tracing::debug!("No keyword matched, using fallback reply");
                Selection {
                    category: None,
                    score: 0,
                    response: Response::fallback(message),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn reply(text: &str) -> Response {
        Response::new(text, &[], &[])
    }

    #[test]
    fn test_yield_trend_question() {
        let selector = ResponseSelector::default();
        let sel = selector.select("What's the yield trend?", &mut rng());
        assert_eq!(sel.category.as_deref(), Some("yield"));
        assert_eq!(sel.score, 2);
        let yield_cat = selector.index().category("yield").unwrap();
        assert!(yield_cat.responses().contains(&sel.response));
    }

    #[test]
    fn test_gibberish_gets_fallback() {
        let sel = ResponseSelector::default().select("asdkfj random text", &mut rng());
        assert!(sel.is_fallback());
        assert_eq!(sel.score, 0);
        assert_eq!(sel.response, Response::fallback("asdkfj random text"));
    }

    #[test]
    fn test_empty_and_whitespace_get_fallback() {
        let selector = ResponseSelector::default();
        assert!(selector.select("", &mut rng()).is_fallback());
        assert!(selector.select("   \t\n", &mut rng()).is_fallback());
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let sel = ResponseSelector::default().select("CVD-02 STEPPER status", &mut rng());
        assert_eq!(sel.category.as_deref(), Some("equipment"));
        assert_eq!(sel.score, 2);
    }

    #[test]
    fn test_exclusive_keyword_selects_its_category() {
        let selector = ResponseSelector::default();
        let cases = [
            ("show the etcher", "equipment"),
            ("any defect today?", "rootcause"),
            ("forecast please", "prediction"),
            ("is there a relationship", "correlation"),
            ("where is the lineage", "lineage"),
        ];
        for (msg, expected) in cases {
            let sel = selector.select(msg, &mut rng());
            assert_eq!(sel.category.as_deref(), Some(expected), "message: {}", msg);
        }
    }

    #[test]
    fn test_shared_keyword_tie_goes_to_earlier_category() {
        let selector = ResponseSelector::default();
        // "analysis" is shared by yield and rootcause.
        assert_eq!(
            selector.select("analysis", &mut rng()).category.as_deref(),
            Some("yield")
        );
        // "performance" is shared by yield and equipment.
        assert_eq!(
            selector.select("performance", &mut rng()).category.as_deref(),
            Some("yield")
        );
    }

    #[test]
    fn test_higher_score_beats_table_order() {
        // equipment: tool + maintenance + performance (3) vs yield: performance (1)
        let sel =
            ResponseSelector::default().select("tool maintenance performance", &mut rng());
        assert_eq!(sel.category.as_deref(), Some("equipment"));
        assert_eq!(sel.score, 3);
    }

    #[test]
    fn test_tie_break_on_custom_index() {
        let index = KeywordIndex::new(vec![
            Category::new("first", &["alpha", "beta"], vec![reply("one")]).unwrap(),
            Category::new("second", &["beta", "gamma"], vec![reply("two")]).unwrap(),
        ])
        .unwrap();
        let selector = ResponseSelector::new(Arc::new(index));
        let sel = selector.select("beta", &mut rng());
        assert_eq!(sel.category.as_deref(), Some("first"));
        assert_eq!(sel.response.text, "one");

        let sel = selector.select("beta gamma", &mut rng());
        assert_eq!(sel.category.as_deref(), Some("second"));
    }

    #[test]
    fn test_seeded_rng_pins_choice_among_responses() {
        let index = KeywordIndex::new(vec![Category::new(
            "multi",
            &["wafer"],
            vec![reply("a"), reply("b"), reply("c")],
        )
        .unwrap()])
        .unwrap();
        let selector = ResponseSelector::new(Arc::new(index));

        let first = selector.select("wafer", &mut StdRng::seed_from_u64(99));
        let second = selector.select("wafer", &mut StdRng::seed_from_u64(99));
        assert_eq!(first, second);

        let mut r = rng();
        for _ in 0..50 {
            let sel = selector.select("wafer", &mut r);
            assert!(["a", "b", "c"].contains(&sel.response.text.as_str()));
        }
    }

    #[test]
    fn test_score_reports_every_category() {
        let selector = ResponseSelector::default();
        let scores = selector.score("yield trend analysis");
        assert_eq!(scores.len(), 6);
        assert_eq!(scores[0], ("yield", 3));
        assert_eq!(scores[2], ("rootcause", 1));
    }
}
