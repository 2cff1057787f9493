//! `"name:value"` specs used by header, cookie and server-variable
//! conditions.

/// A parsed `name:value` comparand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderSpec {
    pub name: String,
    pub value: String,
}

/// Splits at the first `:`, trimming both sides. Without a `:` the whole
/// trimmed input is the name and the value is empty; an absent input yields
/// an empty name and value.
pub fn parse_header_spec(name_value: Option<&str>) -> HeaderSpec {
    let Some(name_value) = name_value else {
        return HeaderSpec {
            name: String::new(),
            value: String::new(),
        };
    };

    match name_value.split_once(':') {
        Some((name, value)) => HeaderSpec {
            name: name.trim().to_string(),
            value: value.trim().to_string(),
        },
        None => HeaderSpec {
            name: name_value.trim().to_string(),
            value: String::new(),
        },
    }
}
