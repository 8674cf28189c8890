use crate::config::KeywordConfig;
use crate::taxonomy::{find_term, KeywordCategory};

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordMatch {
    pub category: KeywordCategory,
    /// Distinct terms in taxonomy order. Repeats in the text count once.
    pub terms: Vec<&'static str>,
    pub base_points: f64,
    pub extra_points: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeywordSignals {
    pub matches: Vec<KeywordMatch>,
    pub diversity_bonus: f64,
    pub position_bonus: f64,
    pub score: f64,
}

impl KeywordSignals {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn has(&self, category: KeywordCategory) -> bool {
        self.matches.iter().any(|hit| hit.category == category)
    }

    pub fn terms_for(&self, category: KeywordCategory) -> &[&'static str] {
        self.matches
            .iter()
            .find(|hit| hit.category == category)
            .map(|hit| hit.terms.as_slice())
            .unwrap_or(&[])
    }

    pub fn matched_terms(&self) -> Vec<&'static str> {
        let mut terms: Vec<&'static str> = Vec::new();
        for hit in &self.matches {
            for &term in &hit.terms {
                if !terms.contains(&term) {
                    terms.push(term);
                }
            }
        }
        terms
    }
}

#[derive(Debug, Clone)]
pub struct KeywordScorer {
    config: KeywordConfig,
}

impl KeywordScorer {
    pub fn new(config: KeywordConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, title: &str, description: &str) -> KeywordSignals {
        let title_lower = title.to_lowercase();
        let combined = format!("{} {}", title_lower, description.to_lowercase());

        let mut matches = Vec::new();
        let mut early_hit = false;

        for category in KeywordCategory::ALL {
            let terms: Vec<&'static str> = category
                .terms()
                .iter()
                .copied()
                .filter(|term| find_term(&combined, term).is_some())
                .collect();
            if terms.is_empty() {
                continue;
            }

            early_hit |= terms
                .iter()
                .any(|term| self.starts_early(&title_lower, term));

            let extra_terms = (terms.len() - 1).min(self.config.max_extra_terms);
            matches.push(KeywordMatch {
                category,
                base_points: self.config.base_points(category),
                extra_points: extra_terms as f64 * self.config.extra_term_bonus,
                terms,
            });
        }

        if matches.is_empty() {
            return KeywordSignals::default();
        }

        let diversity_bonus = ((matches.len() - 1) as f64 * self.config.diversity_bonus)
            .min(self.config.max_diversity_bonus);
        let position_bonus = if early_hit {
            self.config.position_bonus
        } else {
            0.0
        };
        let raw: f64 = matches
            .iter()
            .map(|hit| hit.base_points + hit.extra_points)
            .sum::<f64>()
            + diversity_bonus
            + position_bonus;

        KeywordSignals {
            matches,
            diversity_bonus,
            position_bonus,
            score: raw.min(self.config.cap).max(0.0),
        }
    }

    fn starts_early(&self, title_lower: &str, term: &str) -> bool {
        find_term(title_lower, term)
            .map(|offset| title_lower[..offset].chars().count() < self.config.position_window)
            .unwrap_or(false)
    }
}
