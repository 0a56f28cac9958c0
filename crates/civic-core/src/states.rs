//! US state lookup used to key map tallies and to normalise form input.
//!
//! Boundary GeoJSON identifies states by full name and counties by FIPS
//! code, while form submissions carry a postal code. Everything is joined on
//! the two-letter postal code.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsState {
  pub name: &'static str,
  pub code: &'static str,
  pub fips: &'static str,
}

const fn st(name: &'static str, code: &'static str, fips: &'static str) -> UsState {
  UsState { name, code, fips }
}

/// The 50 states, the District of Columbia and Puerto Rico, in the order the
/// contact form lists them.
pub const STATES: &[UsState] = &[
  st("Alabama", "AL", "01"),
  st("Alaska", "AK", "02"),
  st("Arizona", "AZ", "04"),
  st("Arkansas", "AR", "05"),
  st("California", "CA", "06"),
  st("Colorado", "CO", "08"),
  st("Connecticut", "CT", "09"),
  st("Delaware", "DE", "10"),
  st("Florida", "FL", "12"),
  st("Georgia", "GA", "13"),
  st("Hawaii", "HI", "15"),
  st("Idaho", "ID", "16"),
  st("Illinois", "IL", "17"),
  st("Indiana", "IN", "18"),
  st("Iowa", "IA", "19"),
  st("Kansas", "KS", "20"),
  st("Kentucky", "KY", "21"),
  st("Louisiana", "LA", "22"),
  st("Maine", "ME", "23"),
  st("Maryland", "MD", "24"),
  st("Massachusetts", "MA", "25"),
  st("Michigan", "MI", "26"),
  st("Minnesota", "MN", "27"),
  st("Mississippi", "MS", "28"),
  st("Missouri", "MO", "29"),
  st("Montana", "MT", "30"),
  st("Nebraska", "NE", "31"),
  st("Nevada", "NV", "32"),
  st("New Hampshire", "NH", "33"),
  st("New Jersey", "NJ", "34"),
  st("New Mexico", "NM", "35"),
  st("New York", "NY", "36"),
  st("North Carolina", "NC", "37"),
  st("North Dakota", "ND", "38"),
  st("Ohio", "OH", "39"),
  st("Oklahoma", "OK", "40"),
  st("Oregon", "OR", "41"),
  st("Pennsylvania", "PA", "42"),
  st("Rhode Island", "RI", "44"),
  st("South Carolina", "SC", "45"),
  st("South Dakota", "SD", "46"),
  st("Tennessee", "TN", "47"),
  st("Texas", "TX", "48"),
  st("Utah", "UT", "49"),
  st("Vermont", "VT", "50"),
  st("Virginia", "VA", "51"),
  st("Washington", "WA", "53"),
  st("West Virginia", "WV", "54"),
  st("Wisconsin", "WI", "55"),
  st("Wyoming", "WY", "56"),
  st("District of Columbia", "DC", "11"),
  st("Puerto Rico", "PR", "72"),
];

/// State preselected on the contact form.
pub const DEFAULT_STATE: &str = "PA";

/// Resolve a full name, postal code or FIPS code to the postal code.
///
/// Matching is case-insensitive; FIPS codes may omit the leading zero.
pub fn normalize_state(input: &str) -> Option<&'static str> {
  lookup(input).map(|s| s.code)
}

/// Like [`normalize_state`] but returns the whole table entry.
pub fn lookup(input: &str) -> Option<&'static UsState> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return None;
  }

  if trimmed.bytes().all(|b| b.is_ascii_digit()) {
    let fips = format!("{trimmed:0>2}");
    return STATES.iter().find(|s| s.fips == fips);
  }

  STATES
    .iter()
    .find(|s| s.code.eq_ignore_ascii_case(trimmed) || s.name.eq_ignore_ascii_case(trimmed))
}

/// Full state name for a county feature's `STATEFP`.
pub fn name_for_fips(fips: &str) -> Option<&'static str> {
  let fips = fips.trim();
  STATES.iter().find(|s| s.fips == fips).map(|s| s.name)
}

/// Count recognised state values per postal code. Unrecognised values are
/// skipped.
pub fn tally_states<'a, I>(values: I) -> BTreeMap<&'static str, u64>
where
  I: IntoIterator<Item = &'a str>,
{
  let mut counts = BTreeMap::new();
  for code in values.into_iter().filter_map(normalize_state) {
    *counts.entry(code).or_insert(0) += 1;
  }
  counts
}
