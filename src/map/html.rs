//! Renders a [`MapContext`] into a standalone Leaflet page.
//!
//! The page carries the whole context as an inline JSON document; a short
//! script turns it into tile layers, circle markers, the layer switcher and
//! the legend control.

use crate::map::context::MapContext;
use crate::map::marker::escape_html;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};

const LEAFLET_VERSION: &str = "1.9.4";

const PAGE_SCRIPT: &str = r#"
  (function () {
    const ctx = JSON.parse(document.getElementById("map-data").textContent);
    const map = L.map(ctx.container_id).setView(ctx.viewport.center, ctx.viewport.zoom);

    const baseMaps = {};
    ctx.base_layers.forEach(function (layer, i) {
      const options = { attribution: layer.attribution };
      if (layer.subdomains) options.subdomains = layer.subdomains;
      if (layer.max_zoom) options.maxZoom = layer.max_zoom;
      const tiles = L.tileLayer(layer.url_template, options);
      baseMaps[layer.name] = tiles;
      if (i === ctx.active_layer) tiles.addTo(map);
    });
    L.control.layers(baseMaps).addTo(map);

    ctx.markers.forEach(function (m) {
      L.circleMarker(m.position, {
        radius: m.radius,
        fillColor: m.fill_color,
        color: m.color,
        weight: m.weight,
        opacity: m.opacity,
        fillOpacity: m.fill_opacity
      }).bindPopup(m.popup).addTo(map);
    });

    const legend = L.control({ position: ctx.legend.position });
    legend.onAdd = function () {
      const div = L.DomUtil.create("div", "info legend");
      div.innerHTML = ctx.legend_html;
      return div;
    };
    legend.addTo(map);
  })();
"#;

const PAGE_STYLE: &str = r#"
    html, body { height: 100%; margin: 0; padding: 0; }
    #map { height: 100%; width: 100%; }
    .legend {
      background: white;
      padding: 8px;
      font-size: 14px;
      line-height: 18px;
      box-shadow: 0 0 5px rgba(0,0,0,0.3);
    }
"#;

#[derive(serde::Serialize)]
struct PageData<'a> {
    #[serde(flatten)]
    context: &'a MapContext,
    legend_html: String,
}

/// Serializes page data so it can sit inside a `<script>` element: `</` and
/// `<!--` in feed text must not terminate or confuse the element.
fn script_safe_json(ctx: &MapContext) -> Result<String> {
    let data = PageData {
        context: ctx,
        legend_html: ctx.legend.to_html(),
    };
    let json = serde_json::to_string(&data)?;
    Ok(json.replace("</", "<\\/").replace("<!--", "\\u003c!--"))
}

pub fn render_page(ctx: &MapContext, title: &str, generated_at: DateTime<Utc>) -> Result<String> {
    let data = script_safe_json(ctx)?;
    let title = escape_html(title);
    let container = escape_html(&ctx.container_id);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <meta name="generator" content="quake-map {version}" />
  <title>{title}</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@{leaflet}/dist/leaflet.css" />
  <style>{style}</style>
</head>
<body>
  <!-- {count} events, generated {generated} -->
  <div id="{container}"></div>
  <script src="https://unpkg.com/leaflet@{leaflet}/dist/leaflet.js"></script>
  <script type="application/json" id="map-data">{data}</script>
  <script>{script}</script>
</body>
</html>
"#,
        version = env!("CARGO_PKG_VERSION"),
        title = title,
        leaflet = LEAFLET_VERSION,
        style = PAGE_STYLE,
        count = ctx.markers().len(),
        generated = generated_at.to_rfc3339(),
        container = container,
        data = data,
        script = PAGE_SCRIPT,
    ))
}
