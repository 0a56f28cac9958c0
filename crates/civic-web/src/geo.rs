//! Boundary GeoJSON proxy for the state map.
//!
//! The upstream documents are fetched on every request and annotated before
//! they reach the browser: state features gain `abbr`, `count` and `fill`,
//! county features gain `STATE`. A failed fetch is logged and answered with
//! an empty `FeatureCollection` so the map still renders.

use std::collections::BTreeMap;

use axum::{Json, extract::State};
use civic_core::{
  states::{name_for_fips, normalize_state, tally_states},
  store::InquiryStore,
};
use serde_json::{Map, Value, json};

use crate::{AppState, Error, Result};

pub const STATES_URL: &str =
  "https://raw.githubusercontent.com/PublicaMundi/MappingAPI/master/data/geojson/us-states.json";
pub const COUNTIES_URL: &str = "https://gist.githubusercontent.com/sdwfrost/d1c73f91dd9d175998ed166eb216994a/raw/e89c35f308cee7e2e5a784e1d3afc5d449e9e4bb/counties.geojson";

/// Fill for a state with no inquiries.
pub const EMPTY_FILL: &str = "#eeeeee";

/// Choropleth bucket for an inquiry count.
pub fn fill_color(count: u64) -> &'static str {
  match count {
    0 => EMPTY_FILL,
    1..=4 => "#bfdbfe",
    5..=9 => "#3b82f6",
    _ => "#1e3a8a",
  }
}

pub fn empty_collection() -> Value { json!({ "type": "FeatureCollection", "features": [] }) }

/// Apply `f` to the `properties` object of every feature, creating it when
/// absent.
fn for_each_properties(doc: &mut Value, mut f: impl FnMut(&mut Map<String, Value>)) {
  let Some(features) = doc.get_mut("features").and_then(Value::as_array_mut) else {
    return;
  };
  for feature in features {
    let Some(feature) = feature.as_object_mut() else { continue };
    let props = feature
      .entry("properties")
      .or_insert_with(|| Value::Object(Map::new()));
    if !props.is_object() {
      *props = Value::Object(Map::new());
    }
    if let Some(props) = props.as_object_mut() {
      f(props);
    }
  }
}

/// Join state features (keyed by full `name`) with per-code tallies.
pub fn annotate_states(doc: &mut Value, tallies: &BTreeMap<&'static str, u64>) {
  for_each_properties(doc, |props| {
    let name = props
      .get("name")
      .and_then(Value::as_str)
      .unwrap_or_default()
      .to_owned();
    let abbr = normalize_state(&name).map(str::to_owned).unwrap_or(name);
    let count = tallies.get(abbr.as_str()).copied().unwrap_or(0);
    props.insert("abbr".into(), json!(abbr));
    props.insert("count".into(), json!(count));
    props.insert("fill".into(), json!(fill_color(count)));
  });
}

/// Give county features (keyed by `STATEFP`) their state's full name.
pub fn annotate_counties(doc: &mut Value) {
  for_each_properties(doc, |props| {
    let fips = props
      .get("STATEFP")
      .and_then(Value::as_str)
      .unwrap_or_default()
      .to_owned();
    let state = name_for_fips(&fips).map(str::to_owned).unwrap_or(fips);
    props.insert("STATE".into(), json!(state));
  });
}

async fn fetch(client: &reqwest::Client, url: &str) -> Result<Value> {
  let resp = client.get(url).send().await?;
  let status = resp.status();
  if !status.is_success() {
    return Err(Error::UpstreamStatus(status));
  }
  Ok(resp.json().await?)
}

async fn fetch_or_empty(client: &reqwest::Client, url: &str) -> Value {
  match fetch(client, url).await {
    Ok(doc) => doc,
    Err(e) => {
      tracing::warn!(url, error = %e, "boundary fetch failed");
      empty_collection()
    }
  }
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// `GET /map/states.geojson`
pub async fn states<S>(State(state): State<AppState<S>>) -> Json<Value>
where
  S: InquiryStore + Clone + 'static,
{
  let mut doc = fetch_or_empty(&state.http, &state.config.states_geojson_url).await;

  let values = match state.store.list_states().await {
    Ok(values) => values,
    Err(e) => {
      tracing::error!(error = %e, "failed to load state column");
      Vec::new()
    }
  };
  let tallies = tally_states(values.iter().map(String::as_str));

  annotate_states(&mut doc, &tallies);
  Json(doc)
}

/// `GET /map/counties.geojson`
pub async fn counties<S>(State(state): State<AppState<S>>) -> Json<Value>
where
  S: InquiryStore + Clone + 'static,
{
  let mut doc = fetch_or_empty(&state.http, &state.config.counties_geojson_url).await;
  annotate_counties(&mut doc);
  Json(doc)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn buckets() {
    assert_eq!(fill_color(0), EMPTY_FILL);
    assert_eq!(fill_color(1), fill_color(4));
    assert_ne!(fill_color(4), fill_color(5));
    assert_eq!(fill_color(5), fill_color(9));
    assert_ne!(fill_color(9), fill_color(10));
    assert_eq!(fill_color(10), fill_color(10_000));
  }

  #[test]
  fn states_are_joined_by_name() {
    let mut doc = json!({
      "type": "FeatureCollection",
      "features": [
        { "type": "Feature", "properties": { "name": "Pennsylvania" }, "geometry": null },
        { "type": "Feature", "properties": { "name": "Ohio" }, "geometry": null },
        { "type": "Feature", "properties": { "name": "Atlantis" }, "geometry": null },
      ]
    });
    let tallies = tally_states(["PA", "pa", "Pennsylvania", "PA", "42", "PA"]);

    annotate_states(&mut doc, &tallies);

    let pa = &doc["features"][0]["properties"];
    assert_eq!(pa["abbr"], "PA");
    assert_eq!(pa["count"], 6);
    assert_eq!(pa["fill"], fill_color(6));
    assert_eq!(pa["name"], "Pennsylvania");

    let oh = &doc["features"][1]["properties"];
    assert_eq!(oh["count"], 0);
    assert_eq!(oh["fill"], EMPTY_FILL);

    // Unknown names keep the raw name as their key.
    assert_eq!(doc["features"][2]["properties"]["abbr"], "Atlantis");
  }

  #[test]
  fn counties_get_state_names() {
    let mut doc = json!({
      "features": [
        { "properties": { "STATEFP": "42", "NAME": "Erie" } },
        { "properties": { "STATEFP": "99" } },
        { "geometry": null },
      ]
    });
    annotate_counties(&mut doc);
    assert_eq!(doc["features"][0]["properties"]["STATE"], "Pennsylvania");
    assert_eq!(doc["features"][1]["properties"]["STATE"], "99");
    assert_eq!(doc["features"][2]["properties"]["STATE"], "");
  }

  #[test]
  fn documents_without_features_are_left_alone() {
    let mut doc = empty_collection();
    annotate_counties(&mut doc);
    assert_eq!(doc, empty_collection());
  }
}
