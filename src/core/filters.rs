use crate::models::{BrowseQuery, Restaurant};

/// Catalog browse constraints
#[derive(Debug, Clone, Default)]
pub struct RestaurantFilter {
    /// Cuisine name, compared ignoring case
    pub cuisine: Option<String>,
    /// Lowercased free-text search over name and cuisine
    pub search: Option<String>,
    pub max_wait_time: Option<u32>,
    pub promo_only: bool,
}

impl From<&BrowseQuery> for RestaurantFilter {
    fn from(query: &BrowseQuery) -> Self {
        Self {
            cuisine: non_blank(query.cuisine.as_deref()),
            search: non_blank(query.q.as_deref()).map(|q| q.to_lowercase()),
            max_wait_time: query.max_wait_time,
            promo_only: query.promo_only.unwrap_or(false),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Check if a restaurant passes every constraint of the filter
#[inline]
pub fn matches_filter(restaurant: &Restaurant, filter: &RestaurantFilter) -> bool {
    if let Some(cuisine) = &filter.cuisine {
        if !restaurant.cuisine.eq_ignore_ascii_case(cuisine) {
            return false;
        }
    }

    if let Some(search) = &filter.search {
        if !restaurant.name.to_lowercase().contains(search.as_str())
            && !restaurant.cuisine.to_lowercase().contains(search.as_str())
        {
            return false;
        }
    }

    if let Some(max_wait) = filter.max_wait_time {
        if restaurant.wait_time > max_wait {
            return false;
        }
    }

    if filter.promo_only && !restaurant.has_promo {
        return false;
    }

    true
}

/// Apply a filter, keeping catalog order
pub fn filter_restaurants(restaurants: Vec<Restaurant>, filter: &RestaurantFilter) -> Vec<Restaurant> {
    restaurants
        .into_iter()
        .filter(|r| matches_filter(r, filter))
        .collect()
}
