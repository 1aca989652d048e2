use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Broad family a transformer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransformerClass {
    Generic,
    Http,
    Llm,
    Rag,
    Translate,
    Speech,
}

impl TransformerClass {
    pub const ALL: [TransformerClass; 6] = [
        TransformerClass::Generic,
        TransformerClass::Http,
        TransformerClass::Llm,
        TransformerClass::Rag,
        TransformerClass::Translate,
        TransformerClass::Speech,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TransformerClass::Generic => "GENERIC",
            TransformerClass::Http => "HTTP",
            TransformerClass::Llm => "LLM",
            TransformerClass::Rag => "RAG",
            TransformerClass::Translate => "TRANSLATE",
            TransformerClass::Speech => "SPEECH",
        }
    }
}

impl fmt::Display for TransformerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Execution model of a transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransformerType {
    /// Stateless message-in, message-out transform.
    Generic,
    /// Participates in a state machine and may branch the flow.
    State,
}

impl TransformerType {
    pub const ALL: [TransformerType; 2] = [TransformerType::Generic, TransformerType::State];

    pub fn as_str(self) -> &'static str {
        match self {
            TransformerType::Generic => "GENERIC",
            TransformerType::State => "STATE",
        }
    }
}

impl fmt::Display for TransformerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated `config.json` document, one per leaf directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformerSpec {
    pub name: String,
    pub class: TransformerClass,
    #[serde(rename = "type")]
    pub kind: TransformerType,
    pub description: String,
    pub config: ConfigDeclaration,
    pub version: String,
}

/// Parameters a transformer instance accepts.
///
/// Maps are ordered so that serialized output does not depend on the key
/// order of the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDeclaration {
    /// Field name to type description; always required.
    pub required: BTreeMap<String, String>,
    /// Field name to type description; never required.
    pub optional: BTreeMap<String, String>,
    /// Fields whose required-ness depends on other fields.
    pub conditional: BTreeMap<String, ConditionalRule>,
}

impl ConfigDeclaration {
    /// True if `field` appears in any of the three categories.
    pub fn declares(&self, field: &str) -> bool {
        self.required.contains_key(field)
            || self.optional.contains_key(field)
            || self.conditional.contains_key(field)
    }
}

/// Required-ness rule for a conditional field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalRule {
    #[serde(rename = "type")]
    pub field_type: String,
    /// Required if any of these fields is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_absent: Option<Vec<String>>,
    /// Required if any of these fields is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_present: Option<Vec<String>>,
}

impl ConditionalRule {
    /// All field names this rule depends on, `ifAbsent` first.
    pub fn referenced_fields(&self) -> impl Iterator<Item = &str> {
        self.if_absent
            .iter()
            .flatten()
            .chain(self.if_present.iter().flatten())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_names() {
        let spec = TransformerSpec {
            name: "HTTP_GET".to_string(),
            class: TransformerClass::Http,
            kind: TransformerType::Generic,
            description: "Performs a GET request".to_string(),
            config: ConfigDeclaration {
                required: BTreeMap::from([("url".to_string(), "string".to_string())]),
                optional: BTreeMap::new(),
                conditional: BTreeMap::from([(
                    "body".to_string(),
                    ConditionalRule {
                        field_type: "object".to_string(),
                        if_absent: Some(vec!["query".to_string()]),
                        if_present: None,
                    },
                )]),
            },
            version: "0.0.1".to_string(),
        };

        let json = serde_json::to_value(&spec).expect("spec should serialize");
        assert_eq!(json["class"], "HTTP");
        assert_eq!(json["type"], "GENERIC");
        assert_eq!(json["config"]["conditional"]["body"]["type"], "object");
        assert_eq!(json["config"]["conditional"]["body"]["ifAbsent"][0], "query");
        assert!(json["config"]["conditional"]["body"]
            .get("ifPresent")
            .is_none());
    }

    #[test]
    fn enum_names_round_trip_through_as_str() {
        for class in TransformerClass::ALL {
            let json = serde_json::to_value(class).unwrap();
            assert_eq!(json, class.as_str());
        }
        for kind in TransformerType::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.as_str());
        }
    }

    #[test]
    fn referenced_fields_lists_absent_then_present() {
        let rule = ConditionalRule {
            field_type: "string".to_string(),
            if_absent: Some(vec!["a".to_string(), "b".to_string()]),
            if_present: Some(vec!["c".to_string()]),
        };
        assert_eq!(rule.referenced_fields().collect::<Vec<_>>(), ["a", "b", "c"]);
    }
}
