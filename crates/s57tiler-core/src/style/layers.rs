//! Style layers for the chart's S-57 object classes.
//!
//! Layers are emitted in paint order: areas first, then lines, then labels and symbols.

use serde_json::{Value, json};

use super::palette::{BACKGROUND, Palette, STRUCTURE_FILL};
use super::{DepthUnit, SOURCE};

/// Every layer of a style, bottom to top.
pub fn style_layers(palette: &Palette, depth: DepthUnit) -> Vec<Value> {
    let mut layers = vec![background()];
    layers.extend(seaare(palette));
    layers.extend(depare(palette));
    layers.extend(depcnt(palette));
    layers.extend(structures(palette));
    layers.extend(soundg(palette, depth));
    layers.extend(boyspp());
    layers.extend(lights());
    layers
}

fn background() -> Value {
    json!({
        "id": "background",
        "type": "background",
        "paint": {
            "background-color": BACKGROUND,
            "background-opacity": 1
        }
    })
}

fn fill(id: &str, source_layer: &str, filter: Value, color: &str) -> Value {
    json!({
        "id": id,
        "type": "fill",
        "source": SOURCE,
        "source-layer": source_layer,
        "filter": filter,
        "paint": { "fill-color": color }
    })
}

fn line(id: &str, source_layer: &str, filter: Value, color: &str, width: f64) -> Value {
    json!({
        "id": id,
        "type": "line",
        "source": SOURCE,
        "source-layer": source_layer,
        "filter": filter,
        "paint": {
            "line-color": color,
            "line-width": width
        }
    })
}

fn polygons() -> Value {
    json!(["any", ["==", "$type", "Polygon"]])
}

fn outlines() -> Value {
    json!(["any", ["==", "$type", "Polygon"], ["==", "$type", "LineString"]])
}

fn points() -> Value {
    json!(["any", ["==", "$type", "Point"]])
}

fn seaare(palette: &Palette) -> Vec<Value> {
    vec![fill("SEAARE_fill", "SEAARE", polygons(), palette.chwht)]
}

/// Shallower bands are drawn later so they cover the deeper ones.
fn depare(palette: &Palette) -> Vec<Value> {
    vec![
        fill(
            "DEPARE_fill_2",
            "DEPARE",
            json!(["all", ["==", "$type", "Polygon"], ["<=", "DRVAL1", 9.0]]),
            palette.depmd,
        ),
        fill(
            "DEPARE_fill_1",
            "DEPARE",
            json!(["all", ["==", "$type", "Polygon"], ["<=", "DRVAL1", 3.0]]),
            palette.depvs,
        ),
        fill(
            "DEPARE_fill_0",
            "DEPARE",
            json!([
                "all",
                ["==", "$type", "Polygon"],
                ["<", "DRVAL1", 0.0],
                ["<=", "DRVAL2", 0.0]
            ]),
            palette.depit,
        ),
        line("DEPARE_line", "DEPARE", outlines(), palette.cstln, 0.5),
    ]
}

fn depcnt(palette: &Palette) -> Vec<Value> {
    vec![line(
        "DEPCNT_line",
        "DEPCNT",
        json!(["all", ["==", "$type", "LineString"]]),
        palette.cstln,
        0.5,
    )]
}

/// Shoreline constructions, pontoons, hulks and land.
fn structures(palette: &Palette) -> Vec<Value> {
    vec![
        line("SLCONS_line", "SLCONS", json!(["all"]), palette.cstln, 1.0),
        fill("PONTON_fill", "PONTON", polygons(), STRUCTURE_FILL),
        line("PONTON_line", "PONTON", outlines(), palette.cstln, 1.0),
        fill("HULKES_fill", "HULKES", polygons(), STRUCTURE_FILL),
        line("HULKES_line", "HULKES", outlines(), palette.cstln, 1.5),
        fill("LNDARE_fill", "LNDARE", polygons(), palette.landa),
        line("LNDARE_line", "LNDARE", outlines(), palette.cstln, 2.0),
    ]
}

fn sounding_color(palette: &Palette) -> Value {
    json!(["case", ["<=", ["get", "METERS"], 9.0], palette.sndg2, palette.sndg1])
}

fn sounding(id: &str, field: &str, anchor: &str, palette: &Palette) -> Value {
    json!({
        "id": id,
        "type": "symbol",
        "source": SOURCE,
        "source-layer": "SOUNDG",
        "filter": points(),
        "layout": {
            "text-font": ["Roboto Bold"],
            "text-anchor": anchor,
            "text-justify": "center",
            "text-field": ["get", field],
            "text-allow-overlap": true,
            "text-ignore-placement": true,
            "text-size": 11,
            "symbol-placement": "point"
        },
        "paint": {
            "text-color": sounding_color(palette),
            "text-halo-color": palette.chwht,
            "text-halo-width": 1.5
        }
    })
}

fn soundg(palette: &Palette, depth: DepthUnit) -> Vec<Value> {
    match depth {
        DepthUnit::Fathoms => vec![
            sounding("soundg_fathoms", "FATHOMS", "bottom-right", palette),
            json!({
                "id": "soundg_fathoms_feet",
                "type": "symbol",
                "source": SOURCE,
                "source-layer": "SOUNDG",
                "filter": ["all", ["==", "$type", "Point"], ["!=", "FATHOMS_FT", 0]],
                "layout": {
                    "text-font": ["Roboto Bold"],
                    "text-anchor": "top-left",
                    "text-offset": [0.1, -0.7],
                    "text-justify": "center",
                    "text-field": ["get", "FATHOMS_FT"],
                    "text-allow-overlap": true,
                    "text-ignore-placement": true,
                    "text-size": 9,
                    "symbol-placement": "point"
                },
                "paint": { "text-color": sounding_color(palette) }
            }),
        ],
        DepthUnit::Feet => vec![sounding("soundg_feet", "FEET", "center", palette)],
        DepthUnit::Meters => vec![sounding("soundg_meters", "METERS", "center", palette)],
    }
}

fn boyspp() -> Vec<Value> {
    vec![json!({
        "id": "BOYSPP_point",
        "type": "symbol",
        "source": SOURCE,
        "source-layer": "BOYSPP",
        "filter": points(),
        "layout": {
            "icon-image": "BOYPIL01",
            "icon-keep-upright": true,
            "symbol-placement": "point"
        }
    })]
}

/// Light flares pick their sprite from the `SY` property set during export.
fn lights() -> Vec<Value> {
    vec![json!({
        "id": "LIGHTS_point",
        "type": "symbol",
        "source": SOURCE,
        "source-layer": "LIGHTS",
        "filter": points(),
        "layout": {
            "icon-image": ["get", "SY"],
            "icon-keep-upright": false,
            "icon-anchor": "top-left",
            "icon-allow-overlap": true,
            "symbol-placement": "point"
        }
    })]
}
