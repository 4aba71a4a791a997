//! Static region tables
//!
//! Lookups are keyed by normalized text (trimmed, lowercased). Broad regions
//! such as continents geocode poorly, so they map to a well-covered city.

/// Normalize user text for table lookups
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Geocoder-friendly substitute for a common place name
pub fn synonym(normalized: &str) -> Option<&'static str> {
    let substitute = match normalized {
        "paris" => "Eiffel Tower, Paris",
        "london" => "Big Ben, London",
        "new york" => "Times Square, New York",
        "tokyo" => "Shibuya Crossing, Tokyo",
        "sydney" => "Sydney Opera House, Sydney",
        "africa" => "Cairo, Egypt",
        "asia" => "Tokyo, Japan",
        "europe" => "Paris, France",
        "north america" => "New York, USA",
        "south america" => "Rio de Janeiro, Brazil",
        "australia" => "Sydney, Australia",
        "antarctica" => "McMurdo Station, Antarctica",
        "middle east" => "Dubai, UAE",
        "canada" => "Toronto, Canada",
        _ => return None,
    };
    Some(substitute)
}

/// Hint shown while a broad region is being searched
pub fn tip(normalized: &str) -> Option<&'static str> {
    let tip = match normalized {
        "africa" => "Note: Try specific cities like Cairo, Egypt or Cape Town, South Africa",
        "asia" => "Note: Try specific cities like Tokyo, Japan or Bangkok, Thailand",
        "europe" => "Note: Try specific cities like Paris, France or London, UK",
        "north america" => "Note: Try specific cities like New York, USA or Toronto, Canada",
        "south america" => {
            "Note: Try specific cities like Rio de Janeiro, Brazil or Buenos Aires, Argentina"
        }
        "australia" => "Note: Try specific cities like Sydney, Australia or Melbourne, Australia",
        "middle east" => "Note: Try specific cities like Dubai, UAE or Istanbul, Turkey",
        "canada" => "Note: Try specific cities like Toronto, Vancouver, or Montreal",
        _ => return None,
    };
    Some(tip)
}

/// Candidates geocoded in order when a region yields no results
pub fn fallbacks(normalized: &str) -> &'static [&'static str] {
    match normalized {
        "africa" => &["Cairo, Egypt", "Cape Town, South Africa", "Lagos, Nigeria"],
        "asia" => &["Tokyo, Japan", "Bangkok, Thailand", "Singapore"],
        "europe" => &["Paris, France", "London, UK", "Rome, Italy"],
        "north america" => &["New York, USA", "Toronto, Canada", "Mexico City, Mexico"],
        "south america" => &["Rio de Janeiro, Brazil", "Buenos Aires, Argentina", "Lima, Peru"],
        "australia" => &["Sydney, Australia", "Melbourne, Australia", "Brisbane, Australia"],
        "middle east" => &["Dubai, UAE", "Istanbul, Turkey", "Tel Aviv, Israel"],
        "canada" => &["Toronto, Canada", "Vancouver, Canada", "Montreal, Canada"],
        _ => &[],
    }
}

/// Suggested alternative when no imagery exists near a region
pub fn imagery_suggestion(normalized: &str) -> Option<&'static str> {
    let suggestion = match normalized {
        "africa" => "Cairo, Egypt or Cape Town, South Africa",
        "asia" => "Tokyo, Japan or Bangkok, Thailand",
        "europe" => "Paris, France or London, UK",
        "north america" => "New York, USA or Toronto, Canada",
        "south america" => "Rio de Janeiro, Brazil or Buenos Aires, Argentina",
        "australia" => "Sydney, Australia or Melbourne, Australia",
        "middle east" => "Dubai, UAE or Istanbul, Turkey",
        "antarctica" => "McMurdo Station, Antarctica (limited coverage)",
        "canada" => "Toronto, Canada, Vancouver, Canada or Montreal, Canada",
        _ => return None,
    };
    Some(suggestion)
}

/// Suggestion used when no table entry matches
pub const GENERIC_SUGGESTION: &str = "\"Eiffel Tower, Paris\" or \"Times Square, New York\"";
