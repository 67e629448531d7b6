use crate::models::listingmodel::Listing;

/// What a user's favorites have in common. Built only from a non-empty
/// favorite set; no favorites means no content signal at all.
#[derive(Debug, Clone)]
pub struct ContentProfile<'a> {
    pub region: String,
    pub listing_type: Option<String>,
    pub mean_price: f64,
    pub mean_area: f64,
    pub favorites: &'a [Listing],
}

impl<'a> ContentProfile<'a> {
    pub fn from_favorites(favorites: &'a [Listing]) -> Option<Self> {
        if favorites.is_empty() {
            return None;
        }

        let region = most_frequent(favorites.iter().map(|l| l.region.as_str()))?;
        let listing_type = most_frequent(favorites.iter().filter_map(|l| l.listing_type.as_deref()));

        let count = favorites.len() as f64;
        let mean_price = favorites.iter().map(Listing::price_value).sum::<f64>() / count;
        let mean_area = favorites.iter().map(|l| l.area).sum::<f64>() / count;

        Some(Self {
            region,
            listing_type,
            mean_price,
            mean_area,
            favorites,
        })
    }
}

/// Most common value; on a tie the value seen first wins.
fn most_frequent<'v>(values: impl Iterator<Item = &'v str>) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, n) in counts {
        if best.map_or(true, |(_, top)| n > top) {
            best = Some((value, n));
        }
    }
    best.map(|(value, _)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::listingmodel::fixtures::listing;

    #[test]
    fn empty_favorites_yield_no_profile() {
        assert!(ContentProfile::from_favorites(&[]).is_none());
    }

    #[test]
    fn profile_takes_dominant_values_and_means() {
        let mut a = listing("Rabat", "4000", 80.0);
        a.listing_type = Some("APARTMENT".into());
        let b = listing("Fes", "6000", 120.0);
        let mut c = listing("Rabat", "5000", 100.0);
        c.listing_type = Some("APARTMENT".into());
        let favorites = vec![a, b, c];

        let profile = ContentProfile::from_favorites(&favorites).unwrap();
        assert_eq!(profile.region, "Rabat");
        assert_eq!(profile.listing_type.as_deref(), Some("APARTMENT"));
        assert!((profile.mean_price - 5000.0).abs() < 1e-9);
        assert!((profile.mean_area - 100.0).abs() < 1e-9);
        assert_eq!(profile.favorites.len(), 3);
    }

    #[test]
    fn region_tie_goes_to_first_seen() {
        let favorites = vec![
            listing("Tanger", "3000", 50.0),
            listing("Agadir", "3000", 50.0),
        ];

        let profile = ContentProfile::from_favorites(&favorites).unwrap();
        assert_eq!(profile.region, "Tanger");
        assert!(profile.listing_type.is_none());
    }
}
