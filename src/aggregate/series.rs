// AggregatedSeries: per-topic (year, probability) points for one sector.
//
// Points keep the year they came from, so a chart never has to re-align
// probabilities with a separately filtered year list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{DocumentTopics, TopicSelection};

/// Topic id → (year, probability) points in corpus order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedSeries {
    pub topics: BTreeMap<usize, Vec<(String, f64)>>,
}

impl AggregatedSeries {
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn points(&self, topic: usize) -> &[(String, f64)] {
        self.topics.get(&topic).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Keep only the selected topics.
    pub fn restrict(mut self, selection: TopicSelection) -> Self {
        self.topics.retain(|&t, _| selection.includes(t));
        self
    }
}

/// Collect topic probabilities from documents whose year is selected.
///
/// An empty `selected_years` means no filter: every year is included.
pub fn aggregate(entries: &[DocumentTopics], selected_years: &[String]) -> AggregatedSeries {
    let mut series = AggregatedSeries::default();
    for entry in entries {
        if !selected_years.is_empty() && !selected_years.contains(&entry.year) {
            continue;
        }
        for &(topic, prob) in &entry.topics {
            series
                .topics
                .entry(topic)
                .or_default()
                .push((entry.year.clone(), prob));
        }
    }
    series
}

/// Mean probability per topic id in `0..num_topics`; 0.0 where a topic has no points.
pub fn combined_means(series: &AggregatedSeries, num_topics: usize) -> Vec<f64> {
    (0..num_topics)
        .map(|t| {
            let points = series.points(t);
            if points.is_empty() {
                0.0
            } else {
                points.iter().map(|(_, p)| p).sum::<f64>() / points.len() as f64
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<DocumentTopics> {
        vec![
            DocumentTopics {
                id: "2015-16_a.txt".to_string(),
                year: "2015-16".to_string(),
                topics: vec![(0, 0.6), (2, 0.3)],
            },
            DocumentTopics {
                id: "2016-17_b.txt".to_string(),
                year: "2016-17".to_string(),
                topics: vec![(0, 0.2), (1, 0.7)],
            },
        ]
    }

    #[test]
    fn test_year_filter_keeps_matching_documents() {
        let series = aggregate(&entries(), &["2016-17".to_string()]);
        assert_eq!(series.points(0), &[("2016-17".to_string(), 0.2)]);
        assert_eq!(series.points(1), &[("2016-17".to_string(), 0.7)]);
        assert!(series.points(2).is_empty());
    }

    #[test]
    fn test_empty_selection_means_all_years() {
        let all = aggregate(&entries(), &[]);
        let explicit = aggregate(&entries(), &["2015-16".to_string(), "2016-17".to_string()]);
        assert_eq!(all, explicit);
        assert_eq!(all.points(0).len(), 2);
    }

    #[test]
    fn test_selection_with_no_matches_is_empty() {
        let series = aggregate(&entries(), &["1999".to_string()]);
        assert!(series.is_empty());
    }

    #[test]
    fn test_restrict_to_one_topic() {
        let series = aggregate(&entries(), &[]).restrict(TopicSelection::Topic(1));
        assert_eq!(series.topics.len(), 1);
        assert_eq!(series.points(1).len(), 1);
    }

    #[test]
    fn test_combined_means() {
        let series = aggregate(&entries(), &[]);
        let means = combined_means(&series, 4);
        assert!((means[0] - 0.4).abs() < 1e-9);
        assert!((means[1] - 0.7).abs() < 1e-9);
        assert!((means[2] - 0.3).abs() < 1e-9);
        assert_eq!(means[3], 0.0);
    }
}
