use geojson::JsonObject;
use serde_json::Value;

/// S-57 `COLOUR` attribute values.
///
/// | ID | Meaning |
/// |----|---------|
/// | 1 | white |
/// | 2 | black |
/// | 3 | red |
/// | 4 | green |
/// | 5 | blue |
/// | 6 | yellow |
/// | 7 | grey |
/// | 8 | brown |
/// | 9 | amber |
/// | 10 | violet |
/// | 11 | orange |
/// | 12 | magenta |
/// | 13 | pink |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colour {
    White,
    Black,
    Red,
    Green,
    Blue,
    Yellow,
    Grey,
    Brown,
    Amber,
    Violet,
    Orange,
    Magenta,
    Pink,
}

impl Colour {
    /// Maps an attribute code to a colour.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Colour> {
        let colour = match code {
            1 => Colour::White,
            2 => Colour::Black,
            3 => Colour::Red,
            4 => Colour::Green,
            5 => Colour::Blue,
            6 => Colour::Yellow,
            7 => Colour::Grey,
            8 => Colour::Brown,
            9 => Colour::Amber,
            10 => Colour::Violet,
            11 => Colour::Orange,
            12 => Colour::Magenta,
            13 => Colour::Pink,
            _ => return None,
        };
        Some(colour)
    }

    /// Reads the `COLOUR` list of a feature.
    ///
    /// The driver reports list attributes as string lists, or as a single comma separated
    /// string when `LIST_AS_STRING` is on. Unknown codes are dropped.
    #[must_use]
    pub fn from_properties(properties: &JsonObject) -> Vec<Colour> {
        let codes: Vec<i64> = match properties.get("COLOUR") {
            Some(Value::Array(items)) => items.iter().filter_map(code_of).collect(),
            Some(Value::String(list)) => list
                .split(',')
                .filter_map(|code| code.trim().parse().ok())
                .collect(),
            Some(Value::Number(n)) => n.as_i64().into_iter().collect(),
            _ => Vec::new(),
        };
        codes.into_iter().filter_map(Colour::from_code).collect()
    }
}

fn code_of(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
