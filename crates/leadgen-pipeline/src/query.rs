//! Search query construction for a (city, category) pair.

/// Synonym terms per known category, in fetch order.
const CATEGORY_TERMS: &[(&str, &[&str])] = &[
    ("HVAC", &["HVAC", "air conditioning", "heating cooling", "AC repair", "furnace repair"]),
    ("Plumbing", &["plumber", "plumbing services", "drain cleaning", "pipe repair"]),
    ("Electrical", &["electrician", "electrical services", "wiring", "electrical repair"]),
    ("Legal Services", &["lawyer", "attorney", "law firm", "legal services"]),
    ("Real Estate", &["real estate agent", "realtor", "property management"]),
    ("Restaurant", &["restaurant", "dining", "food service", "cafe"]),
    ("Auto Repair", &["auto repair", "car service", "mechanic", "automotive"]),
    ("Dentist", &["dentist", "dental office", "orthodontist", "dental care"]),
    ("Roofing", &["roofing", "roofer", "roof repair", "roofing contractor"]),
    ("Landscaping", &["landscaping", "lawn care", "gardening", "landscape design"]),
    ("Cleaning Services", &["cleaning service", "house cleaning", "commercial cleaning"]),
    ("Pest Control", &["pest control", "exterminator", "bug control"]),
    ("Insurance", &["insurance", "insurance agent", "insurance agency"]),
    ("Accounting", &["accountant", "accounting", "tax service", "CPA"]),
    ("Marketing", &["marketing", "advertising", "digital marketing"]),
    ("IT Services", &["IT services", "computer repair", "tech support"]),
    ("Fitness", &["gym", "fitness center", "personal trainer"]),
    ("Veterinarian", &["veterinarian", "vet", "animal hospital"]),
    ("Chiropractor", &["chiropractor", "chiropractic", "spine care"]),
    ("Physical Therapy", &["physical therapy", "physical therapist", "rehabilitation"]),
];

/// The single default query: `"{category} {city}"`.
#[must_use]
pub fn primary_query(city: &str, category: &str) -> String {
    format!("{} {}", category.trim(), city.trim())
}

/// One `"{term} in {city_name}"` query per synonym of `category`, where
/// `city_name` is the part of `city` before the first comma.
///
/// Category lookup is exact; unknown categories yield a single query using
/// the lowercased category.
#[must_use]
pub fn expanded_queries(city: &str, category: &str) -> Vec<String> {
    let city_name = city.split(',').next().unwrap_or(city).trim();
    let category = category.trim();

    match CATEGORY_TERMS.iter().find(|(name, _)| *name == category) {
        Some((_, terms)) => terms
            .iter()
            .map(|term| format!("{term} in {city_name}"))
            .collect(),
        None => vec![format!("{} in {city_name}", category.to_lowercase())],
    }
}
