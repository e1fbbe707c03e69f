//! US state and territory postal codes.
//!
//! The price table names states by postal code while the town list spells
//! them out; both sides are keyed on the full name.

/// Postal code to full name, sorted by code.
const STATE_NAMES: &[(&str, &str)] = &[
    ("AK", "Alaska"),
    ("AL", "Alabama"),
    ("AR", "Arkansas"),
    ("AS", "American Samoa"),
    ("AZ", "Arizona"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DC", "District of Columbia"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("GU", "Guam"),
    ("HI", "Hawaii"),
    ("IA", "Iowa"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("MA", "Massachusetts"),
    ("MD", "Maryland"),
    ("ME", "Maine"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MO", "Missouri"),
    ("MP", "Northern Mariana Islands"),
    ("MS", "Mississippi"),
    ("MT", "Montana"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("NE", "Nebraska"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NV", "Nevada"),
    ("NY", "New York"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("PR", "Puerto Rico"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VA", "Virginia"),
    ("VI", "Virgin Islands"),
    ("VT", "Vermont"),
    ("WA", "Washington"),
    ("WI", "Wisconsin"),
    ("WV", "West Virginia"),
    ("WY", "Wyoming"),
];

/// Full name for a postal code, case-insensitive.
pub fn state_name(code: &str) -> Option<&'static str> {
    if code.len() != 2 {
        return None;
    }
    let code = code.to_ascii_uppercase();
    STATE_NAMES
        .binary_search_by(|&(c, _)| c.cmp(code.as_str()))
        .ok()
        .map(|idx| STATE_NAMES[idx].1)
}

/// Replace a postal code with the full state name; other values pass through.
pub fn normalize_state(state: &str) -> &str {
    state_name(state).unwrap_or(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sorted_and_unique() {
        assert!(STATE_NAMES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_state_name() {
        assert_eq!(state_name("MI"), Some("Michigan"));
        assert_eq!(state_name("oh"), Some("Ohio"));
        assert_eq!(state_name("DC"), Some("District of Columbia"));
        assert_eq!(state_name("ZZ"), None);
        assert_eq!(state_name("Ohio"), None);
        assert_eq!(state_name(""), None);
    }

    #[test]
    fn test_normalize_state() {
        assert_eq!(normalize_state("NY"), "New York");
        assert_eq!(normalize_state("New York"), "New York");
        assert_eq!(normalize_state("XX"), "XX");
    }
}
