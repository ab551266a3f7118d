use crate::models::{Analysis, Product};

/// Points awarded by each matching rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    /// Per recommended ingredient present in the product
    pub ingredient_match: u32,
    /// Per recommendation whose category equals the product category
    pub category_match: u32,
    /// Per (concern, benefit) pair where the benefit mentions the concern
    pub concern_match: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            ingredient_match: 2,
            category_match: 3,
            concern_match: 2,
        }
    }
}

/// Ranks catalog products against a facial analysis
///
/// Scoring is additive and case-insensitive:
/// 1. For each recommendation, every recommended ingredient contained in
///    at least one product ingredient adds `ingredient_match`.
/// 2. For each recommendation, an exact category match adds `category_match`.
/// 3. For each concern, every product benefit containing it adds `concern_match`.
///
/// Products are then sorted by descending score, keeping catalog order on
/// ties, and truncated to `max_results`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scorer {
    weights: ScoringWeights,
    max_results: usize,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(ScoringWeights::default(), 4)
    }
}

/// Lowercased view of the parts of an analysis the scorer reads
struct NormalizedAnalysis {
    recommendations: Vec<(String, Vec<String>)>,
    concerns: Vec<String>,
}

impl NormalizedAnalysis {
    fn new(analysis: &Analysis) -> Self {
        Self {
            recommendations: analysis
                .recommendations
                .iter()
                .map(|rec| (normalize(&rec.category), normalize_all(&rec.ingredients)))
                .collect(),
            concerns: normalize_all(&analysis.concerns),
        }
    }
}

fn normalize(value: &str) -> String {
    value.to_lowercase()
}

fn normalize_all(values: &[String]) -> Vec<String> {
    values.iter().map(|v| normalize(v)).collect()
}

impl Scorer {
    pub fn new(weights: ScoringWeights, max_results: usize) -> Self {
        Self {
            weights,
            max_results,
        }
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Scores a single product against an analysis
    pub fn score(&self, analysis: &Analysis, product: &Product) -> u32 {
        self.score_normalized(&NormalizedAnalysis::new(analysis), product)
    }

    fn score_normalized(&self, analysis: &NormalizedAnalysis, product: &Product) -> u32 {
        let category = normalize(&product.category);
        let ingredients = normalize_all(&product.ingredients);
        let benefits = normalize_all(&product.benefits);

        let mut score = 0u32;

        for (rec_category, rec_ingredients) in &analysis.recommendations {
            for wanted in rec_ingredients {
                if ingredients.iter().any(|i| i.contains(wanted.as_str())) {
                    score = score.saturating_add(self.weights.ingredient_match);
                }
            }

            if category == *rec_category {
                score = score.saturating_add(self.weights.category_match);
            }
        }

        for concern in &analysis.concerns {
            let hits = benefits
                .iter()
                .filter(|b| b.contains(concern.as_str()))
                .count() as u32;
            score = score.saturating_add(hits.saturating_mul(self.weights.concern_match));
        }

        score
    }

    /// Scores every product and returns the best matches
    ///
    /// The catalog is left untouched; returned products are annotated copies.
    pub fn rank(&self, analysis: &Analysis, catalog: &[Product]) -> Vec<Product> {
        let normalized = NormalizedAnalysis::new(analysis);

        let mut scored: Vec<Product> = catalog
            .iter()
            .map(|product| product.with_match_score(self.score_normalized(&normalized, product)))
            .collect();

        // sort_by is stable, so equal scores keep catalog order
        scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        scored.truncate(self.max_results);

        tracing::debug!(
            analysis_id = analysis.id,
            catalog_size = catalog.len(),
            returned = scored.len(),
            top_score = scored.first().and_then(|p| p.match_score).unwrap_or(0),
            "Ranked products"
        );

        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{sample_products, FacialFeatures, Recommendation};
    use chrono::Utc;

    fn product(id: i32, category: &str, ingredients: &[&str], benefits: &[&str]) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            description: String::new(),
            category: category.to_string(),
            image_url: String::new(),
            price: 1000,
            benefits: benefits.iter().map(|s| s.to_string()).collect(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            suitable_for: vec![],
            match_score: None,
        }
    }

    fn recommendation(category: &str, ingredients: &[&str]) -> Recommendation {
        Recommendation {
            category: category.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn analysis(recommendations: Vec<Recommendation>, concerns: &[&str]) -> Analysis {
        Analysis {
            id: 1,
            image_url: String::new(),
            features: FacialFeatures::default(),
            skin_type: "combination".to_string(),
            concerns: concerns.iter().map(|s| s.to_string()).collect(),
            recommendations,
            created_at: Utc::now(),
        }
    }

    fn scores(products: &[Product]) -> Vec<u32> {
        products.iter().map(|p| p.match_score.unwrap()).collect()
    }

    fn ids(products: &[Product]) -> Vec<i32> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_category_match_is_case_insensitive() {
        let scorer = Scorer::default();
        let serum = product(1, "Serum", &[], &[]);
        let analysis = analysis(vec![recommendation("serum", &[])], &[]);

        assert_eq!(scorer.score(&analysis, &serum), 3);
    }

    #[test]
    fn test_category_match_is_exact_not_substring() {
        let scorer = Scorer::default();
        let serum = product(1, "serum", &[], &[]);
        let analysis = analysis(vec![recommendation("eye serum", &[])], &[]);

        assert_eq!(scorer.score(&analysis, &serum), 0);
    }

    #[test]
    fn test_ingredient_substring_match() {
        let scorer = Scorer::default();
        let p = product(1, "toner", &["Vitamin C Ester", "Niacinamide"], &[]);
        let analysis = analysis(vec![recommendation("serum", &["vitamin c"])], &[]);

        assert_eq!(scorer.score(&analysis, &p), 2);
    }

    #[test]
    fn test_ingredient_counts_once_per_recommended_ingredient() {
        let scorer = Scorer::default();
        let p = product(1, "toner", &["Vitamin C", "Vitamin C Ester"], &[]);
        let analysis = analysis(vec![recommendation("serum", &["vitamin c"])], &[]);

        assert_eq!(scorer.score(&analysis, &p), 2);
    }

    #[test]
    fn test_ingredient_counts_per_recommendation() {
        let scorer = Scorer::default();
        let p = product(1, "toner", &["Retinol"], &[]);
        let analysis = analysis(
            vec![
                recommendation("serum", &["retinol"]),
                recommendation("cream", &["RETINOL", "peptides"]),
            ],
            &[],
        );

        assert_eq!(scorer.score(&analysis, &p), 4);
    }

    #[test]
    fn test_concern_benefit_match() {
        let scorer = Scorer::default();
        let p = product(1, "toner", &[], &["Reduces Redness", "Hydration"]);
        let analysis = analysis(vec![], &["redness"]);

        assert_eq!(scorer.score(&analysis, &p), 2);
    }

    #[test]
    fn test_concern_counts_every_matching_benefit() {
        let scorer = Scorer::default();
        let p = product(1, "toner", &[], &["Deep Hydration", "Lasting Hydration"]);
        let analysis = analysis(vec![], &["hydration"]);

        assert_eq!(scorer.score(&analysis, &p), 4);
    }

    #[test]
    fn test_end_to_end_example() {
        let scorer = Scorer::default();
        let catalog = vec![
            product(1, "serum", &["Vitamin C"], &["Brightening"]),
            product(2, "cleanser", &["Aloe"], &["Gentle"]),
        ];
        let analysis = analysis(vec![recommendation("serum", &["vitamin c"])], &[]);

        let ranked = scorer.rank(&analysis, &catalog);
        assert_eq!(ids(&ranked), vec![1, 2]);
        assert_eq!(scores(&ranked), vec![5, 0]);
    }

    #[test]
    fn test_empty_inputs_give_zero_scores_in_catalog_order() {
        let scorer = Scorer::default();
        let catalog: Vec<Product> = (1..=6)
            .map(|id| product(id, "serum", &["Vitamin C"], &["Redness"]))
            .collect();
        let analysis = analysis(vec![], &[]);

        let ranked = scorer.rank(&analysis, &catalog);
        assert_eq!(ids(&ranked), vec![1, 2, 3, 4]);
        assert_eq!(scores(&ranked), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let scorer = Scorer::default();
        let catalog = vec![
            product(10, "cleanser", &[], &[]),
            product(11, "serum", &[], &[]),
            product(12, "cleanser", &[], &[]),
            product(13, "serum", &[], &[]),
        ];
        let analysis = analysis(vec![recommendation("serum", &[])], &[]);

        let ranked = scorer.rank(&analysis, &catalog);
        assert_eq!(ids(&ranked), vec![11, 13, 10, 12]);
    }

    #[test]
    fn test_result_is_bounded() {
        let scorer = Scorer::default();
        let analysis = analysis(vec![recommendation("serum", &["vitamin c"])], &["redness"]);

        for size in 0..8 {
            let catalog: Vec<Product> = (0..size).map(|id| product(id, "serum", &[], &[])).collect();
            assert_eq!(scorer.rank(&analysis, &catalog).len(), size.min(4) as usize);
        }
    }

    #[test]
    fn test_rank_is_sorted_and_deterministic() {
        let scorer = Scorer::default();
        let catalog = sample_products();
        let analysis = analysis(
            vec![
                recommendation("moisturizer", &["peptides", "hyaluronic acid"]),
                recommendation("serum", &["vitamin c", "niacinamide"]),
            ],
            &["dull", "brightening", "aging"],
        );

        let first = scorer.rank(&analysis, &catalog);
        let second = scorer.rank(&analysis, &catalog);
        assert_eq!(first, second);

        let s = scores(&first);
        assert!(s.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn test_rank_against_sample_catalog() {
        let scorer = Scorer::default();
        let analysis = analysis(vec![recommendation("serum", &["vitamin c"])], &["brightening"]);

        let ranked = scorer.rank(&analysis, &sample_products());
        // Glow Serum: 2 + 3 + 2, Face Cream: 2 + 2, then zero-score entries in catalog order
        assert_eq!(ids(&ranked), vec![2, 1, 3, 4]);
        assert_eq!(scores(&ranked), vec![7, 4, 0, 0]);
    }

    #[test]
    fn test_rank_does_not_mutate_catalog() {
        let scorer = Scorer::default();
        let catalog = sample_products();
        let analysis = analysis(vec![recommendation("serum", &["vitamin c"])], &[]);

        let _ = scorer.rank(&analysis, &catalog);
        assert_eq!(catalog, sample_products());
    }

    #[test]
    fn test_custom_weights_and_limit() {
        let scorer = Scorer::new(
            ScoringWeights {
                ingredient_match: 1,
                category_match: 10,
                concern_match: 0,
            },
            1,
        );
        let catalog = vec![
            product(1, "cleanser", &["Vitamin C"], &["Redness"]),
            product(2, "serum", &[], &[]),
        ];
        let analysis = analysis(vec![recommendation("serum", &["vitamin c"])], &["redness"]);

        let ranked = scorer.rank(&analysis, &catalog);
        assert_eq!(ids(&ranked), vec![2]);
        assert_eq!(scores(&ranked), vec![10]);
    }
}
