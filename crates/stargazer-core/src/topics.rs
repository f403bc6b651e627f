// Topic aggregation across a set of starred repositories
use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::models::Repository;

/// One distinct topic and how many repositories carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicCount {
    pub topic: String,
    pub count: usize,
}

/// Collect every distinct topic with its repository count
///
/// Output is in first-seen order: repositories in input order, then each
/// repository's topics in the order given. A repository listing the same
/// topic twice still counts once.
pub fn aggregate(repos: &[Repository]) -> Vec<TopicCount> {
    let mut counts: Vec<TopicCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for repo in repos {
        let mut seen_here: HashSet<&str> = HashSet::new();

        for topic in &repo.topics {
            if !seen_here.insert(topic.as_str()) {
                continue;
            }

            match index.get(topic.as_str()) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(topic.as_str(), counts.len());
                    counts.push(TopicCount {
                        topic: topic.clone(),
                        count: 1,
                    });
                }
            }
        }
    }

    counts
}

/// Most common first; equal counts keep their first-seen order
pub fn sort_by_count(counts: &mut [TopicCount]) {
    counts.sort_by(|a, b| b.count.cmp(&a.count));
}
