use crate::domain::model::{JobPosting, Tier};
use std::collections::HashMap;

/// 依 (title, company) 去重，衝突時保留 strict
///
/// Output keeps first-seen key order. An upgraded record takes the slot of the
/// record it replaces.
pub fn deduplicate(postings: impl IntoIterator<Item = JobPosting>) -> Vec<JobPosting> {
    let mut retained: Vec<JobPosting> = Vec::new();
    let mut index_by_key: HashMap<(String, String), usize> = HashMap::new();

    for posting in postings {
        let key = posting.dedup_key();
        match index_by_key.get(&key) {
            None => {
                index_by_key.insert(key, retained.len());
                retained.push(posting);
            }
            Some(&index) => {
                let existing = &mut retained[index];
                if existing.tier == Tier::Wide && posting.tier == Tier::Strict {
                    tracing::debug!(
                        "Upgrading '{}' at {} from wide to strict",
                        posting.title,
                        posting.company
                    );
                    *existing = posting;
                }
            }
        }
    }

    retained
}
