// Yelp provider implementation - bridges the API client with BusinessLookup
use async_trait::async_trait;
use bizscout_api::{BizApiClient, BizApiError, BizBusiness};

use crate::{lookup::BusinessLookup, models::Business, Error, Result};

/// Wrapper around BizApiClient that implements BusinessLookup
pub struct YelpProvider {
    client: BizApiClient,
}

impl YelpProvider {
    pub fn new(api_key: String) -> Result<Self> {
        let client = BizApiClient::new(api_key)?;
        Ok(Self { client })
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        let client = BizApiClient::with_base_url(api_key, base_url)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl BusinessLookup for YelpProvider {
    async fn search(&self, term: &str, location: &str) -> Result<Vec<Business>> {
        let businesses = self.client.search_businesses(term, location, None).await?;

        Ok(businesses.into_iter().map(wire_to_business).collect())
    }

    async fn get(&self, id: &str) -> Result<Business> {
        match self.client.get_business(id).await {
            Ok(business) => Ok(wire_to_business(business)),
            // The detail page treats a missing id as 404, not a generic
            // lookup failure
            Err(BizApiError::NotFound(_)) => Err(Error::NotFound(id.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

/// Convert a wire record into our internal Business model
fn wire_to_business(wire: BizBusiness) -> Business {
    let category = wire
        .categories
        .first()
        .map(|c| c.title.clone())
        .unwrap_or_else(|| "Other".to_string());

    let location = if wire.location.display_address.is_empty() {
        let mut parts = vec![wire.location.city, wire.location.state];
        parts.retain(|p| !p.is_empty());
        parts.join(", ")
    } else {
        wire.location.display_address.join(", ")
    };

    Business {
        id: wire.id,
        name: wire.name,
        category,
        location,
        rating: wire.rating,
        review_count: wire.review_count,
        deals: wire.deals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizscout_api::{BizCategory, BizLocation};

    fn wire(id: &str) -> BizBusiness {
        BizBusiness {
            id: id.to_string(),
            name: "North Grounds Coffee".to_string(),
            rating: 4.8,
            review_count: 112,
            location: BizLocation {
                display_address: vec!["123 Hickman Rd".into(), "Waukee, IA 50263".into()],
                city: "Waukee".into(),
                state: "IA".into(),
                zip_code: "50263".into(),
            },
            categories: vec![BizCategory {
                title: "Coffee & Tea".into(),
            }],
            deals: vec!["10% off cold brew".into()],
        }
    }

    #[test]
    fn test_wire_conversion() {
        let business = wire_to_business(wire("biz-1"));
        assert_eq!(business.id, "biz-1");
        assert_eq!(business.category, "Coffee & Tea");
        assert_eq!(business.location, "123 Hickman Rd, Waukee, IA 50263");
        assert_eq!(business.deals.len(), 1);
    }

    #[test]
    fn test_wire_conversion_fallbacks() {
        let mut raw = wire("biz-2");
        raw.categories.clear();
        raw.location.display_address.clear();

        let business = wire_to_business(raw);
        assert_eq!(business.category, "Other");
        assert_eq!(business.location, "Waukee, IA");
    }
}
