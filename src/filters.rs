use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer};

/// Free-text search term, lowercased once. An empty or blank term matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Search(Option<String>);

impl Search {
    pub fn new(raw: Option<&str>) -> Self {
        match raw {
            Some(t) if !t.trim().is_empty() => Search(Some(t.trim().to_lowercase())),
            _ => Search(None),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Case-insensitive substring match against any of `fields`.
    pub fn matches<'a, I>(&self, fields: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let Some(term) = self.0.as_deref() else {
            return true;
        };
        fields.into_iter().any(|f| f.to_lowercase().contains(term))
    }
}

/// Equality filter; `None` is "any".
pub fn equals<T: PartialEq + ?Sized>(wanted: Option<&T>, actual: &T) -> bool {
    wanted.map(|w| w == actual).unwrap_or(true)
}

/// Blank strings from the UI's "all" option mean no filter.
pub fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// `deserialize_with` for enum-valued select filters: a blank or missing
/// value is "all", anything else must name a variant.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            T::deserialize(IntoDeserializer::<D::Error>::into_deserializer(raw.trim().to_string())).map(Some)
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordKind;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct KindFilter {
        #[serde(deserialize_with = "blank_as_none")]
        kind: Option<RecordKind>,
    }

    #[test]
    fn empty_search_is_a_no_op() {
        assert!(Search::new(None).matches(["anything"]));
        assert!(Search::new(Some("   ")).matches(["anything"]));
        assert!(Search::new(Some("")).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let s = Search::new(Some("SILVA"));
        assert!(s.matches(["Ana Silva", "ana@x.com"]));
        assert!(s.matches(["Pedro", "pedro.silva@x.com"]));
        assert!(!s.matches(["Pedro Costa", "pedro@x.com"]));
    }

    #[test]
    fn search_term_is_trimmed() {
        let s = Search::new(Some("silva "));
        assert!(s.matches(["Ana Silva"]));
    }

    #[test]
    fn blank_select_is_no_filter() {
        let parse = |v: serde_json::Value| serde_json::from_value::<KindFilter>(v).map(|f| f.kind);
        assert_eq!(parse(serde_json::json!({"kind": ""})).expect("blank"), None);
        assert_eq!(parse(serde_json::json!({"kind": null})).expect("null"), None);
        assert_eq!(parse(serde_json::json!({})).expect("missing"), None);
        assert_eq!(
            parse(serde_json::json!({"kind": "income"})).expect("income"),
            Some(RecordKind::Income)
        );
        assert!(parse(serde_json::json!({"kind": "gift"})).is_err());
    }

    #[test]
    fn search_handles_accented_text() {
        let s = Search::new(Some("matemática"));
        assert!(s.matches(["Livros de Matemática"]));
    }

    #[test]
    fn equality_filter() {
        assert!(equals::<str>(None, "x"));
        assert!(equals(Some("x"), "x"));
        assert!(!equals(Some("y"), "x"));
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(Some(" a ")), Some("a"));
    }
}
