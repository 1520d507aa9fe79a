// Search orchestration: external lookup -> local enrichment -> sort
use bizscout_store::LocalStore;
use tracing::{debug, info, warn};

use crate::{
    lookup::BusinessLookup,
    models::{combined_rating, BusinessDetail, BusinessSummary, SearchQuery, SortBy},
    Result,
};

/// What a search handler gets back. A failed lookup is not an error at this
/// level: the page renders an empty list with a "try again" indicator.
#[derive(Debug)]
pub struct SearchOutcome {
    pub businesses: Vec<BusinessSummary>,
    pub lookup_failed: bool,
}

/// Coordinates the read path: one lookup provider, enriched from the store.
pub struct SearchService {
    lookup: Box<dyn BusinessLookup>,
}

impl SearchService {
    pub fn new(lookup: Box<dyn BusinessLookup>) -> Self {
        Self { lookup }
    }

    /// Run a search. Lookup failures come back as an empty outcome with the
    /// flag set - no retry, no backoff.
    pub async fn search(&self, query: &SearchQuery, store: &LocalStore) -> Result<SearchOutcome> {
        let fetched = match self.lookup.search(&query.term, &query.location).await {
            Ok(businesses) => businesses,
            Err(e) => {
                warn!("Business lookup failed: {}", e);
                return Ok(SearchOutcome {
                    businesses: Vec::new(),
                    lookup_failed: true,
                });
            }
        };
        info!("Lookup returned {} businesses", fetched.len());

        let bookmarked = store.bookmarked_ids()?;

        let mut rows = Vec::with_capacity(fetched.len());
        for business in fetched {
            let stats = store.review_stats(&business.id)?;
            rows.push(BusinessSummary {
                is_bookmarked: bookmarked.contains(&business.id),
                local_review_count: stats.count,
                combined_rating: combined_rating(business.rating, stats.average),
                business,
            });
        }

        sort_summaries(&mut rows, query.sort);
        debug!("Returning {} enriched rows", rows.len());

        Ok(SearchOutcome {
            businesses: rows,
            lookup_failed: false,
        })
    }

    /// Detail page payload: fresh external record merged with local reviews
    /// and bookmark status.
    pub async fn detail(&self, id: &str, store: &LocalStore) -> Result<BusinessDetail> {
        let business = self.lookup.get(id).await?;

        let reviews = store.reviews_for(id)?;
        let stats = store.review_stats(id)?;

        Ok(BusinessDetail {
            is_bookmarked: store.is_bookmarked(id)?,
            combined_rating: combined_rating(business.rating, stats.average),
            total_reviews: business.review_count + stats.count,
            reviews,
            business,
        })
    }
}

/// Sort descending by the requested key, stable tie-break by name ascending.
pub fn sort_summaries(rows: &mut [BusinessSummary], sort: SortBy) {
    match sort {
        SortBy::Rating => rows.sort_by(|a, b| {
            b.combined_rating
                .partial_cmp(&a.combined_rating)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.business.name.cmp(&b.business.name))
        }),
        SortBy::Reviews => rows.sort_by(|a, b| {
            b.total_review_count()
                .cmp(&a.total_review_count())
                .then_with(|| a.business.name.cmp(&b.business.name))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lookup::MockBusinessLookup, models::Business, Error};

    fn business(id: &str, name: &str, rating: f64, review_count: u32) -> Business {
        Business {
            id: id.to_string(),
            name: name.to_string(),
            category: "Coffee & Tea".to_string(),
            location: "Waukee, IA".to_string(),
            rating,
            review_count,
            deals: Vec::new(),
        }
    }

    fn query(sort: SortBy) -> SearchQuery {
        SearchQuery {
            term: "coffee".to_string(),
            location: "Waukee, IA".to_string(),
            sort,
        }
    }

    #[tokio::test]
    async fn test_search_sorts_by_rating_descending() {
        let mut lookup = MockBusinessLookup::new();
        lookup.expect_search().returning(|_, _| {
            Ok(vec![
                business("a", "Mediocre Joe", 4.5, 10),
                business("b", "North Grounds", 4.8, 5),
            ])
        });

        let service = SearchService::new(Box::new(lookup));
        let store = LocalStore::in_memory().unwrap();

        let outcome = service.search(&query(SortBy::Rating), &store).await.unwrap();
        assert!(!outcome.lookup_failed);
        assert_eq!(outcome.businesses[0].business.name, "North Grounds");
        assert_eq!(outcome.businesses[1].business.name, "Mediocre Joe");
    }

    #[tokio::test]
    async fn test_search_ties_break_by_name_ascending() {
        let mut lookup = MockBusinessLookup::new();
        lookup.expect_search().returning(|_, _| {
            Ok(vec![
                business("a", "Zanzibar Coffee", 4.0, 10),
                business("b", "Arctic Brew", 4.0, 10),
                business("c", "Morning Mug", 4.0, 10),
            ])
        });

        let service = SearchService::new(Box::new(lookup));
        let store = LocalStore::in_memory().unwrap();

        let outcome = service.search(&query(SortBy::Rating), &store).await.unwrap();
        let names: Vec<_> = outcome
            .businesses
            .iter()
            .map(|s| s.business.name.as_str())
            .collect();
        assert_eq!(names, vec!["Arctic Brew", "Morning Mug", "Zanzibar Coffee"]);
    }

    #[tokio::test]
    async fn test_search_sorts_by_review_count_including_local() {
        let mut lookup = MockBusinessLookup::new();
        lookup.expect_search().returning(|_, _| {
            Ok(vec![
                business("a", "Busy Beans", 4.0, 20),
                business("b", "Quiet Cup", 4.0, 18),
            ])
        });

        let service = SearchService::new(Box::new(lookup));
        let store = LocalStore::in_memory().unwrap();
        // Three local reviews push Quiet Cup past Busy Beans
        store.add_review("b", 5, "great").unwrap();
        store.add_review("b", 4, "good").unwrap();
        store.add_review("b", 5, "stellar").unwrap();

        let outcome = service
            .search(&query(SortBy::Reviews), &store)
            .await
            .unwrap();
        assert_eq!(outcome.businesses[0].business.name, "Quiet Cup");
        assert_eq!(outcome.businesses[0].total_review_count(), 21);
    }

    #[tokio::test]
    async fn test_lookup_failure_yields_empty_outcome_with_flag() {
        let mut lookup = MockBusinessLookup::new();
        lookup
            .expect_search()
            .returning(|_, _| Err(Error::Validation("boom".into())));

        let service = SearchService::new(Box::new(lookup));
        let store = LocalStore::in_memory().unwrap();

        let outcome = service.search(&query(SortBy::Rating), &store).await.unwrap();
        assert!(outcome.lookup_failed);
        assert!(outcome.businesses.is_empty());
    }

    #[tokio::test]
    async fn test_search_enriches_with_bookmark_and_local_rating() {
        let mut lookup = MockBusinessLookup::new();
        lookup
            .expect_search()
            .returning(|_, _| Ok(vec![business("a", "North Grounds", 4.8, 112)]));

        let service = SearchService::new(Box::new(lookup));
        let store = LocalStore::in_memory().unwrap();
        store
            .add_bookmark("a", "North Grounds", "Waukee, IA", 4.8, 112)
            .unwrap();
        store.add_review("a", 3, "fine").unwrap();

        let outcome = service.search(&query(SortBy::Rating), &store).await.unwrap();
        let row = &outcome.businesses[0];
        assert!(row.is_bookmarked);
        assert_eq!(row.local_review_count, 1);
        // (4.8 + 3.0) / 2 = 3.9
        assert_eq!(row.combined_rating, 3.9);
    }

    #[tokio::test]
    async fn test_detail_returns_reviews_in_creation_order() {
        let mut lookup = MockBusinessLookup::new();
        lookup
            .expect_get()
            .returning(|_| Ok(business("a", "North Grounds", 4.8, 112)));

        let service = SearchService::new(Box::new(lookup));
        let store = LocalStore::in_memory().unwrap();
        store.add_review("a", 5, "first").unwrap();
        store.add_review("a", 2, "second").unwrap();
        store.add_review("other", 1, "unrelated").unwrap();

        let detail = service.detail("a", &store).await.unwrap();
        assert_eq!(detail.reviews.len(), 2);
        assert_eq!(detail.reviews[0].comment, "first");
        assert_eq!(detail.reviews[1].comment, "second");
        assert_eq!(detail.total_reviews, 114);
        assert!(!detail.is_bookmarked);
    }

    #[tokio::test]
    async fn test_detail_propagates_not_found() {
        let mut lookup = MockBusinessLookup::new();
        lookup
            .expect_get()
            .returning(|id| Err(Error::NotFound(id.to_string())));

        let service = SearchService::new(Box::new(lookup));
        let store = LocalStore::in_memory().unwrap();

        let err = service.detail("ghost", &store).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
