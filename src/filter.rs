//! In-memory list filtering and sorting
//!
//! The admin pages fetch whole collections and narrow them client-side:
//! substring search over a handful of fields, equality filters, and a small
//! set of sort orders. These pure functions capture that pipeline so it can
//! be reused and tested without a browser.

use crate::model::{Accommodation, Professional, Viewing};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccommodationSort {
    /// `date_posted` descending
    #[default]
    Newest,
    PriceLowToHigh,
    PriceHighToLow,
    /// `rooms` descending
    Rooms,
}

/// Search/filter/sort settings for the accommodation list.
#[derive(Clone, Debug, Default)]
pub struct AccommodationQuery {
    /// Case-insensitive substring match over residence_id, location,
    /// residence_type and owner.
    pub search: Option<String>,
    pub residence_type: Option<String>,
    pub location: Option<String>,
    pub sort: AccommodationSort,
}

pub fn filter_accommodations(
    items: &[Accommodation],
    query: &AccommodationQuery,
) -> Vec<Accommodation> {
    let mut filtered: Vec<Accommodation> = items
        .iter()
        .filter(|acc| {
            if let Some(term) = &query.search {
                let term = term.to_lowercase();
                let matched = acc.residence_id.to_lowercase().contains(&term)
                    || acc.location.to_lowercase().contains(&term)
                    || acc.residence_type.to_lowercase().contains(&term)
                    || acc.owner.to_lowercase().contains(&term);
                if !matched {
                    return false;
                }
            }
            if let Some(residence_type) = &query.residence_type {
                if &acc.residence_type != residence_type {
                    return false;
                }
            }
            if let Some(location) = &query.location {
                if &acc.location != location {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect();

    match query.sort {
        AccommodationSort::Newest => {
            filtered.sort_by(|a, b| b.date_posted.cmp(&a.date_posted));
        }
        AccommodationSort::PriceLowToHigh => {
            filtered.sort_by(|a, b| a.rentals.total_cmp(&b.rentals));
        }
        AccommodationSort::PriceHighToLow => {
            filtered.sort_by(|a, b| b.rentals.total_cmp(&a.rentals));
        }
        AccommodationSort::Rooms => {
            filtered.sort_by(|a, b| b.rooms.cmp(&a.rooms));
        }
    }

    filtered
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProfessionalSort {
    /// `created_at` descending
    #[default]
    Newest,
    ExperienceLowToHigh,
    ExperienceHighToLow,
}

/// Search/filter/sort settings for the professionals list.
#[derive(Clone, Debug, Default)]
pub struct ProfessionalQuery {
    /// Case-insensitive substring match over professional_id, name, location
    /// and profession.
    pub search: Option<String>,
    pub profession: Option<String>,
    pub location: Option<String>,
    pub sort: ProfessionalSort,
}

pub fn filter_professionals(
    items: &[Professional],
    query: &ProfessionalQuery,
) -> Vec<Professional> {
    let mut filtered: Vec<Professional> = items
        .iter()
        .filter(|prof| {
            if let Some(term) = &query.search {
                let term = term.to_lowercase();
                let matched = prof.professional_id.to_lowercase().contains(&term)
                    || prof.name.to_lowercase().contains(&term)
                    || prof.location.to_lowercase().contains(&term)
                    || prof.profession.to_lowercase().contains(&term);
                if !matched {
                    return false;
                }
            }
            if let Some(profession) = &query.profession {
                if &prof.profession != profession {
                    return false;
                }
            }
            if let Some(location) = &query.location {
                if &prof.location != location {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect();

    match query.sort {
        ProfessionalSort::Newest => {
            filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }
        ProfessionalSort::ExperienceLowToHigh => {
            filtered.sort_by(|a, b| a.experience.cmp(&b.experience));
        }
        ProfessionalSort::ExperienceHighToLow => {
            filtered.sort_by(|a, b| b.experience.cmp(&a.experience));
        }
    }

    filtered
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewingSort {
    /// `date` descending
    #[default]
    Newest,
    FeeLowToHigh,
    FeeHighToLow,
}

pub fn sort_viewings(items: &[Viewing], sort: ViewingSort) -> Vec<Viewing> {
    let mut sorted: Vec<Viewing> = items.to_vec();
    match sort {
        ViewingSort::Newest => sorted.sort_by(|a, b| b.date.cmp(&a.date)),
        ViewingSort::FeeLowToHigh => sorted.sort_by(|a, b| a.fee.total_cmp(&b.fee)),
        ViewingSort::FeeHighToLow => sorted.sort_by(|a, b| b.fee.total_cmp(&a.fee)),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn accommodation(residence_id: &str, location: &str, rentals: f64, days_ago: i64) -> Accommodation {
        Accommodation {
            id: format!("doc-{residence_id}"),
            residence_id: residence_id.to_string(),
            image1: String::new(),
            image2: String::new(),
            image3: String::new(),
            image4: String::new(),
            image5: String::new(),
            image6: String::new(),
            residence_type: "cottage".to_string(),
            description: String::new(),
            rentals,
            location: location.to_string(),
            deposit: 200.0,
            rooms: 2,
            date_posted: Utc::now() - Duration::days(days_ago),
            owner: "T. Moyo".to_string(),
            owner_email: String::new(),
            owner_phone: String::new(),
            owner_address: String::new(),
            owner_id: String::new(),
        }
    }

    #[test]
    fn search_matches_across_fields_case_insensitively() {
        let items = vec![
            accommodation("RES-1", "Unit A", 900.0, 1),
            accommodation("RES-2", "Unit B", 1100.0, 2),
        ];
        let query = AccommodationQuery {
            search: Some("unit b".to_string()),
            ..Default::default()
        };
        let result = filter_accommodations(&items, &query);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].residence_id, "RES-2");
    }

    #[test]
    fn location_filter_is_exact() {
        let items = vec![
            accommodation("RES-1", "Unit A", 900.0, 1),
            accommodation("RES-2", "Unit AB", 1100.0, 2),
        ];
        let query = AccommodationQuery {
            location: Some("Unit A".to_string()),
            ..Default::default()
        };
        let result = filter_accommodations(&items, &query);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].residence_id, "RES-1");
    }

    #[test]
    fn price_sort_orders_by_rentals() {
        let items = vec![
            accommodation("RES-1", "Unit A", 1300.0, 1),
            accommodation("RES-2", "Unit A", 800.0, 2),
            accommodation("RES-3", "Unit A", 1000.0, 3),
        ];
        let query = AccommodationQuery {
            sort: AccommodationSort::PriceLowToHigh,
            ..Default::default()
        };
        let result = filter_accommodations(&items, &query);
        let ids: Vec<&str> = result.iter().map(|a| a.residence_id.as_str()).collect();
        assert_eq!(ids, ["RES-2", "RES-3", "RES-1"]);
    }

    #[test]
    fn default_sort_is_newest_first() {
        let items = vec![
            accommodation("RES-OLD", "Unit A", 900.0, 10),
            accommodation("RES-NEW", "Unit A", 900.0, 0),
        ];
        let result = filter_accommodations(&items, &AccommodationQuery::default());
        assert_eq!(result[0].residence_id, "RES-NEW");
    }

    #[test]
    fn viewing_fee_sort() {
        let base = Viewing {
            id: "v1".to_string(),
            residence_id: "a".to_string(),
            request_id: 1,
            fee: 20.0,
            date: Utc::now(),
        };
        let cheap = Viewing {
            id: "v2".to_string(),
            request_id: 2,
            fee: 5.0,
            ..base.clone()
        };
        let sorted = sort_viewings(&[base, cheap], ViewingSort::FeeLowToHigh);
        assert_eq!(sorted[0].id, "v2");
    }
}
