//! Doctor roster filtering for the selection step that precedes booking.

use std::collections::BTreeMap;

use crate::models::doctor::{Doctor, Specialty};

const TITLE_PREFIXES: [&str; 4] = ["doctor ", "dr. ", "dr.", "dr "];

/// Display name without a leading title such as `Dr.`.
pub fn strip_title(name: &str) -> &str {
    let trimmed = name.trim_start();
    for prefix in TITLE_PREFIXES {
        if trimmed.len() >= prefix.len()
            && trimmed.is_char_boundary(prefix.len())
            && trimmed[..prefix.len()].eq_ignore_ascii_case(prefix)
        {
            return trimmed[prefix.len()..].trim_start();
        }
    }
    trimmed
}

/// Case-insensitive substring match against the untitled name.
pub fn matches_query(doctor: &Doctor, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty() || strip_title(&doctor.name).to_lowercase().contains(&query)
}

/// Filters the roster by specialty and free text, keeping input order.
///
/// `None` means no specialty has been picked yet and yields nothing, so the
/// patient always narrows by specialty first.
pub fn filter(doctors: &[Doctor], specialty: Option<Specialty>, query: Option<&str>) -> Vec<Doctor> {
    let Some(specialty) = specialty else {
        return Vec::new();
    };

    doctors
        .iter()
        .filter(|doctor| doctor.specialty == specialty)
        .filter(|doctor| query.is_none_or(|query| matches_query(doctor, query)))
        .cloned()
        .collect()
}

/// Buckets doctors by the uppercase first letter of their untitled name.
pub fn group_by_initial(doctors: Vec<Doctor>) -> BTreeMap<char, Vec<Doctor>> {
    let mut groups: BTreeMap<char, Vec<Doctor>> = BTreeMap::new();
    for doctor in doctors {
        let initial = strip_title(&doctor.name)
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('#');
        groups.entry(initial).or_default().push(doctor);
    }
    groups
}
