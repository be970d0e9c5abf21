//! Bounded uniform headline sampling.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::{TrendsError, TrendsResult};
use crate::search::HeadlineSearch;
use crate::types::SampleSet;

/// Maximum number of headlines in a sample.
pub const SAMPLE_CAP: usize = 5;

/// Fetch every headline matching `keyword` in `year_month` and return a random
/// subset of at most [`SAMPLE_CAP`] of them.
///
/// Both parameters are required; an absent or empty one fails before the
/// backend is called. No candidates is an empty sample, not an error.
pub async fn sample_headlines(
    search: &dyn HeadlineSearch,
    keyword: Option<&str>,
    year_month: Option<&str>,
) -> TrendsResult<SampleSet> {
    let keyword = required(keyword, "keyword")?;
    let year_month = required(year_month, "year_month")?;

    let candidates = search.sample_candidates(keyword, year_month).await?;
    let total = candidates.len();
    let items = take_random(candidates, SAMPLE_CAP, &mut rand::rng());

    debug!(keyword, year_month, total, sampled = items.len(), "Sampled headlines");

    Ok(SampleSet {
        keyword: keyword.to_string(),
        year_month: year_month.to_string(),
        items,
    })
}

/// Uniformly permute `items` and keep the first `cap`.
pub fn take_random<T, R: Rng + ?Sized>(mut items: Vec<T>, cap: usize, rng: &mut R) -> Vec<T> {
    items.shuffle(rng);
    items.truncate(cap);
    items
}

fn required<'a>(value: Option<&'a str>, name: &'static str) -> TrendsResult<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(TrendsError::MissingParameter(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{headline, MockHeadlineSearch};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn take_random_caps_size() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 0..12 {
            let items: Vec<usize> = (0..n).collect();
            let picked = take_random(items, SAMPLE_CAP, &mut rng);
            assert_eq!(picked.len(), n.min(SAMPLE_CAP));

            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), picked.len());
            assert!(picked.iter().all(|i| *i < n));
        }
    }

    #[test]
    fn take_random_under_cap_keeps_everything() {
        let mut rng = StdRng::seed_from_u64(42);
        let picked = take_random(vec!["a", "b", "c"], SAMPLE_CAP, &mut rng);
        let as_set: HashSet<_> = picked.into_iter().collect();
        assert_eq!(as_set, HashSet::from(["a", "b", "c"]));
    }

    #[test]
    fn take_random_reaches_every_position() {
        // Each element should land first at some point over many draws
        let mut rng = StdRng::seed_from_u64(1);
        let mut firsts = HashSet::new();
        for _ in 0..500 {
            let picked = take_random((0..8).collect::<Vec<u8>>(), SAMPLE_CAP, &mut rng);
            firsts.insert(picked[0]);
        }
        assert_eq!(firsts.len(), 8);
    }

    #[tokio::test]
    async fn sample_is_capped_subset_of_candidates() {
        let candidates: Vec<_> = (1..=9).map(|i| headline(&format!("Storm {i}"), 2020, 1, i)).collect();
        let search = MockHeadlineSearch::new().on_samples("storm", "2020-01", candidates.clone());

        let sample = sample_headlines(&search, Some("storm"), Some("2020-01"))
            .await
            .unwrap();

        assert_eq!(sample.keyword, "storm");
        assert_eq!(sample.year_month, "2020-01");
        assert_eq!(sample.items.len(), SAMPLE_CAP);
        assert!(sample.items.iter().all(|h| candidates.contains(h)));
    }

    #[tokio::test]
    async fn small_candidate_set_is_returned_whole() {
        let candidates = vec![headline("A", 2020, 1, 1), headline("B", 2020, 1, 2)];
        let search = MockHeadlineSearch::new().on_samples("storm", "2020-01", candidates.clone());

        let sample = sample_headlines(&search, Some("storm"), Some("2020-01"))
            .await
            .unwrap();

        let got: HashSet<_> = sample.items.iter().map(|h| h.headline.clone()).collect();
        assert_eq!(got, HashSet::from(["A".to_string(), "B".to_string()]));
    }

    #[tokio::test]
    async fn no_candidates_is_empty_sample() {
        let search = MockHeadlineSearch::new();
        let sample = sample_headlines(&search, Some("nothing"), Some("1900-01"))
            .await
            .unwrap();
        assert!(sample.items.is_empty());
    }

    #[tokio::test]
    async fn missing_parameters_skip_backend() {
        let search = MockHeadlineSearch::new();

        let err = sample_headlines(&search, Some("storm"), None).await.unwrap_err();
        assert!(matches!(err, TrendsError::MissingParameter("year_month")));

        let err = sample_headlines(&search, None, Some("2020-01")).await.unwrap_err();
        assert!(matches!(err, TrendsError::MissingParameter("keyword")));

        let err = sample_headlines(&search, Some(""), Some("2020-01")).await.unwrap_err();
        assert!(matches!(err, TrendsError::MissingParameter("keyword")));

        assert!(search.calls().is_empty());
    }

    #[tokio::test]
    async fn backend_failure_propagates() {
        let search = MockHeadlineSearch::new().failing("storm");
        let err = sample_headlines(&search, Some("storm"), Some("2020-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, TrendsError::Backend(_)));
    }
}
