use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    Text(String),
}

/// Accepts `null`, `""`, `12` and `"12"`; the empty string reads as `None`.
///
/// Select widgets and some backend serializers hand IDs over as strings.
pub fn deserialize_optional_id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<i64>,
{
    let opt: Option<NumberOrString> = Option::deserialize(deserializer)?;
    match opt {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(T::from(n))),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(|n| Some(T::from(n)))
            .map_err(serde::de::Error::custom),
    }
}
