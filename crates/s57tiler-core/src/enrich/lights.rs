use geojson::{Geometry, JsonObject};
use serde_json::Value;

use super::colour::Colour;

/// Picks the light flare symbol for a list of light colours.
#[must_use]
pub fn light_symbol(colours: &[Colour]) -> &'static str {
    match colours {
        [Colour::Red] => "LIGHTS11",
        [Colour::Green] => "LIGHTS12",
        [Colour::Yellow] => "LIGHTS13",
        _ => "LIGHTDEF",
    }
}

/// Adds the `SY` symbol property to a `LIGHTS` feature.
pub fn process_lights(geometry: Geometry, properties: &mut JsonObject) -> Geometry {
    let symbol = light_symbol(&Colour::from_properties(properties));
    properties.insert("SY".to_string(), Value::String(symbol.to_string()));
    geometry
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::Value as GeoValue;
    use serde_json::json;

    #[test]
    fn test_single_colour_symbols() {
        assert_eq!(light_symbol(&[Colour::Red]), "LIGHTS11");
        assert_eq!(light_symbol(&[Colour::Green]), "LIGHTS12");
        assert_eq!(light_symbol(&[Colour::Yellow]), "LIGHTS13");
    }

    #[test]
    fn test_other_lights_use_default_symbol() {
        assert_eq!(light_symbol(&[]), "LIGHTDEF");
        assert_eq!(light_symbol(&[Colour::White]), "LIGHTDEF");
        assert_eq!(light_symbol(&[Colour::Red, Colour::Green]), "LIGHTDEF");
    }

    #[test]
    fn test_process_lights_sets_sy() {
        let geometry = Geometry::new(GeoValue::Point(vec![-122.4, 47.7]));
        let mut properties = JsonObject::new();
        properties.insert("COLOUR".to_string(), json!(["4"]));

        let out = process_lights(geometry.clone(), &mut properties);

        assert_eq!(out, geometry);
        assert_eq!(properties.get("SY"), Some(&json!("LIGHTS12")));
    }
}
