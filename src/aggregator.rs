// 📊 Category Aggregator - group, score, rank
//
// Pure functions of the record sequence: same input, same output.
// Ranking key = mean similarity across a category's records, where
// non-numeric scores are left out of BOTH the sum and the count.

use crate::parser::CompetitorRecord;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

// ============================================================================
// CATEGORY SET
// ============================================================================

/// All records sharing one category value, in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySet {
    pub name: String,
    /// Description of the first record seen for this category
    pub description: String,
    pub competitors: Vec<CompetitorRecord>,
}

impl CategorySet {
    pub fn mean_similarity(&self) -> Option<f64> {
        mean_similarity(&self.competitors)
    }

    /// Unique school names in first-appearance order
    pub fn school_names(&self) -> Vec<&str> {
        unique_school_names(&self.competitors)
    }
}

/// Group records by category, categories in first-appearance order.
pub fn group_by_category(records: &[CompetitorRecord]) -> Vec<CategorySet> {
    let mut sets: Vec<CategorySet> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let position = *positions.entry(record.category.as_str()).or_insert_with(|| {
            sets.push(CategorySet {
                name: record.category.clone(),
                description: record.description.clone(),
                competitors: Vec::new(),
            });
            sets.len() - 1
        });

        sets[position].competitors.push(record.clone());
    }

    sets
}

/// Arithmetic mean of the numeric similarity scores.
///
/// `[0.30, "N/A", 0.20]` → 0.25. Returns `None` when no score is numeric.
pub fn mean_similarity(records: &[CompetitorRecord]) -> Option<f64> {
    let (sum, count) = records
        .iter()
        .filter_map(|record| record.similarity())
        .fold((0.0, 0usize), |(sum, count), score| (sum + score, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Unique school names in first-appearance order
pub fn unique_school_names(records: &[CompetitorRecord]) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    records
        .iter()
        .map(|record| record.school_name.as_str())
        .filter(|name| seen.insert(*name))
        .collect()
}

// ============================================================================
// CATEGORY RANKING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRanking {
    /// 1-based priority; 1 is the most similar category
    pub priority: usize,
    pub category: String,
    pub mean_similarity: Option<f64>,
    pub record_count: usize,
}

/// Rank categories by descending mean similarity.
///
/// Ties keep first-appearance order (stable sort). Categories without any
/// numeric score sort after every scored category.
pub fn rank_categories(sets: &[CategorySet]) -> Vec<CategoryRanking> {
    let mut scored: Vec<(&CategorySet, Option<f64>)> = sets
        .iter()
        .map(|set| (set, set.mean_similarity()))
        .collect();

    scored.sort_by(|(_, a), (_, b)| compare_means(*a, *b));

    scored
        .into_iter()
        .enumerate()
        .map(|(index, (set, mean))| CategoryRanking {
            priority: index + 1,
            category: set.name.clone(),
            mean_similarity: mean,
            record_count: set.competitors.len(),
        })
        .collect()
}

fn compare_means(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ============================================================================
// AGGREGATE
// ============================================================================

/// Category sets plus their priority order, rebuilt from scratch per load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryIndex {
    /// Sets in first-appearance order
    pub sets: Vec<CategorySet>,
    /// Rankings in priority order
    pub ranking: Vec<CategoryRanking>,
}

impl CategoryIndex {
    pub fn build(records: &[CompetitorRecord]) -> Self {
        let sets = group_by_category(records);
        let ranking = rank_categories(&sets);
        CategoryIndex { sets, ranking }
    }

    /// The category selected when nothing has been chosen yet
    pub fn default_category(&self) -> Option<&str> {
        self.ranking.first().map(|r| r.category.as_str())
    }

    pub fn get(&self, category: &str) -> Option<&CategorySet> {
        self.sets.iter().find(|set| set.name == category)
    }

    /// Zero-based position of a category in priority order
    pub fn position(&self, category: &str) -> Option<usize> {
        self.ranking.iter().position(|r| r.category == category)
    }

    /// Category sets in priority order
    pub fn ranked_sets(&self) -> impl Iterator<Item = (&CategoryRanking, &CategorySet)> {
        self.ranking
            .iter()
            .filter_map(move |ranking| self.get(&ranking.category).map(|set| (ranking, set)))
    }

    pub fn category_names(&self) -> Vec<&str> {
        self.ranking.iter().map(|r| r.category.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str, school: &str, score: &str) -> CompetitorRecord {
        CompetitorRecord {
            category: category.to_string(),
            description: format!("{} description", category),
            rank: "1".to_string(),
            school_name: school.to_string(),
            similarity_score: score.to_string(),
            state: "Texas".to_string(),
            institution_type: "Private".to_string(),
            religion: None,
            acceptance_rate: "0.5".to_string(),
            niche_grade: "A".to_string(),
        }
    }

    #[test]
    fn test_mean_excludes_non_numeric_scores() {
        let records = vec![
            record("A", "One", "0.30"),
            record("A", "Two", "N/A"),
            record("A", "Three", "0.20"),
        ];

        let mean = mean_similarity(&records).unwrap();
        assert!((mean - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_mean_with_no_numeric_scores_is_none() {
        let records = vec![record("A", "One", ""), record("A", "Two", "N/A")];
        assert_eq!(mean_similarity(&records), None);
        assert_eq!(mean_similarity(&[]), None);
    }

    #[test]
    fn test_group_keeps_first_appearance_order() {
        let records = vec![
            record("B", "One", "0.1"),
            record("A", "Two", "0.2"),
            record("B", "Three", "0.3"),
        ];
        let sets = group_by_category(&records);

        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name, "B");
        assert_eq!(sets[0].competitors.len(), 2);
        assert_eq!(sets[0].description, "B description");
        assert_eq!(sets[1].name, "A");
    }

    #[test]
    fn test_rank_descending_by_mean() {
        let records = vec![
            record("Low", "One", "0.10"),
            record("High", "Two", "0.40"),
            record("Mid", "Three", "0.25"),
        ];
        let index = CategoryIndex::build(&records);

        assert_eq!(index.category_names(), vec!["High", "Mid", "Low"]);
        assert_eq!(index.ranking[0].priority, 1);
        assert_eq!(index.default_category(), Some("High"));
    }

    #[test]
    fn test_ties_keep_appearance_order() {
        let records = vec![
            record("First", "One", "0.20"),
            record("Second", "Two", "0.20"),
            record("Third", "Three", "0.20"),
        ];
        let index = CategoryIndex::build(&records);

        assert_eq!(index.category_names(), vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_unscored_categories_sort_last() {
        let records = vec![
            record("Unscored", "One", "N/A"),
            record("Scored", "Two", "0.01"),
        ];
        let index = CategoryIndex::build(&records);

        assert_eq!(index.category_names(), vec!["Scored", "Unscored"]);
        assert_eq!(index.ranking[1].mean_similarity, None);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let records = vec![
            record("A", "One", "0.3"),
            record("B", "Two", "0.3"),
            record("C", "Three", "0.3"),
            record("A", "Four", "0.3"),
        ];

        let first = CategoryIndex::build(&records);
        let second = CategoryIndex::build(&records);

        assert_eq!(first, second);
        assert_eq!(first.category_names(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_ranked_sets_follow_priority() {
        let records = vec![record("Low", "One", "0.1"), record("High", "Two", "0.9")];
        let index = CategoryIndex::build(&records);
        let names: Vec<&str> = index.ranked_sets().map(|(_, set)| set.name.as_str()).collect();

        assert_eq!(names, vec!["High", "Low"]);
        assert_eq!(index.position("Low"), Some(1));
        assert_eq!(index.position("Missing"), None);
    }

    #[test]
    fn test_unique_school_names() {
        let records = vec![
            record("A", "One", "0.1"),
            record("A", "Two", "0.1"),
            record("A", "One", "0.1"),
        ];

        assert_eq!(unique_school_names(&records), vec!["One", "Two"]);
    }

    #[test]
    fn test_empty_input() {
        let index = CategoryIndex::build(&[]);

        assert!(index.is_empty());
        assert_eq!(index.default_category(), None);
    }
}
