//! `GET /map`: choropleth of inquiry volume by state.
//!
//! Rendering happens in the browser with Mapbox GL; the boundary documents
//! come from the annotated `/map/*.geojson` proxies.

use axum::{extract::State, response::Html};
use civic_core::store::InquiryStore;

use super::layout::page;
use crate::{AppState, geo};

const MAPBOX_VERSION: &str = "v3.6.0";

const SCRIPT: &str = r##"
const map = new mapboxgl.Map({
  container: "map",
  style: "mapbox://styles/mapbox/light-v11",
  center: [-98.5795, 39.8283],
  projection: "mercator",
  zoom: 3,
});

function firstSymbolId() {
  for (const layer of map.getStyle().layers) {
    if (layer.type === "symbol") return layer.id;
  }
  return undefined;
}

map.on("load", () => {
  const before = firstSymbolId();

  map.addSource("states", { type: "geojson", data: "/map/states.geojson" });
  map.addLayer({
    id: "state-fills",
    type: "fill",
    source: "states",
    paint: { "fill-color": ["coalesce", ["get", "fill"], EMPTY_FILL], "fill-opacity": 0.7 },
  }, before);
  map.addLayer({
    id: "state-borders",
    type: "line",
    source: "states",
    paint: { "line-color": "#666", "line-width": 1 },
  }, before);

  map.addSource("counties", { type: "geojson", data: "/map/counties.geojson" });
  map.addLayer({
    id: "county-fills",
    type: "fill",
    source: "counties",
    minzoom: 5,
    paint: { "fill-color": EMPTY_FILL, "fill-opacity": 0.5 },
  }, before);
  map.addLayer({
    id: "county-borders",
    type: "line",
    source: "counties",
    minzoom: 5,
    paint: { "line-color": "#666", "line-width": 1 },
  }, before);

  const popup = new mapboxgl.Popup({ closeButton: false, closeOnClick: false });
  map.on("mousemove", "state-fills", (e) => {
    const p = e.features && e.features[0] && e.features[0].properties;
    if (!p) return;
    const strong = document.createElement("strong");
    strong.textContent = `${p.name} (${p.abbr})`;
    const div = document.createElement("div");
    div.append(strong, document.createElement("br"), `Emails: ${p.count || 0}`);
    popup.setLngLat(e.lngLat).setDOMContent(div).addTo(map);
  });
  map.on("mouseleave", "state-fills", () => popup.remove());
});
"##;

pub fn render(token: &str) -> Html<String> {
  let head = format!(
    "<link href=\"https://api.mapbox.com/mapbox-gl-js/{MAPBOX_VERSION}/mapbox-gl.css\" rel=\"stylesheet\">\
     <script src=\"https://api.mapbox.com/mapbox-gl-js/{MAPBOX_VERSION}/mapbox-gl.js\"></script>"
  );

  let legend = format!(
    "<div class=\"muted\">Email Count Scale: \
     <span style=\"color:{}\">&#9632;</span> 1 \
     <span style=\"color:{}\">&#9632;</span> 5 \
     <span style=\"color:{}\">&#9632;</span> 10+</div>",
    geo::fill_color(1),
    geo::fill_color(5),
    geo::fill_color(10),
  );

  let body = if token.is_empty() {
    format!(
      "<h1>Email Volume by State</h1><div class=\"card\">\
       <p class=\"error\">Map token is not configured; set <code>mapbox_token</code>.</p>{legend}</div>"
    )
  } else {
    // Embedded as JSON string literals; `</` must not end the script element.
    let token_js = serde_json::Value::from(token).to_string().replace("</", "<\\/");
    let empty_js = serde_json::Value::from(geo::EMPTY_FILL).to_string();
    format!(
      "<h1>Email Volume by State</h1><div class=\"card\">\
       <div id=\"map\" style=\"width:100%;height:400px;border-radius:0.5rem\"></div>{legend}</div>\
       <script>mapboxgl.accessToken = {token_js};\nconst EMPTY_FILL = {empty_js};\n{SCRIPT}</script>"
    )
  };

  page("Map", "/map", &head, &body)
}

pub async fn handler<S>(State(state): State<AppState<S>>) -> Html<String>
where
  S: InquiryStore + Clone + 'static,
{
  render(&state.config.mapbox_token)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn token_is_embedded_as_string_literal() {
    let Html(html) = render("pk.abc\"</script>");
    assert!(html.contains(r#"mapboxgl.accessToken = "pk.abc\"<\/script>";"#));
    assert!(html.contains("/map/states.geojson"));
  }

  #[test]
  fn script_keeps_layer_paint_intact() {
    let Html(html) = render("pk.abc");
    assert_eq!(html.matches(r##""line-color": "#666""##).count(), 2);
    assert!(html.contains("map.on(\"mouseleave\", \"state-fills\""));
    assert!(html.contains("const EMPTY_FILL = \"#eeeeee\";"));
  }

  #[test]
  fn missing_token_shows_notice() {
    let Html(html) = render("");
    assert!(html.contains("Map token is not configured"));
    assert!(!html.contains("mapboxgl.accessToken"));
  }
}
