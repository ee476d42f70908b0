use std::path::Path;

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ContextError;

/// The résumé as it is read from its JSON file. Every field is optional and may hold a placeholder,
/// this struct does not sanitize anything: that happens when the résumé is turned into lines.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeRecord {
    #[serde(deserialize_with = "lenient_entry")]
    pub basics: Basics,
    #[serde(deserialize_with = "lenient_text_list")]
    pub highlights: Vec<Option<String>>,
    #[serde(deserialize_with = "lenient_list")]
    pub experience: Vec<Experience>,
    #[serde(deserialize_with = "lenient_list")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "lenient_list")]
    pub skills: Vec<SkillGroup>,
    #[serde(deserialize_with = "lenient_list")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "lenient_text_list")]
    pub certifications: Vec<Option<String>>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Basics {
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub headline: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub links: Vec<Link>,
}

/// A labelled URL, used both for the links of the header and for the evidence of a project.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    #[serde(deserialize_with = "lenient_text")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub url: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub org: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub role: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub start: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub end: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_text_list")]
    pub summary: Vec<Option<String>>,
    #[serde(deserialize_with = "lenient_text_list")]
    pub achievements: Vec<Option<String>>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub context: Option<String>,
    #[serde(deserialize_with = "lenient_text_list")]
    pub actions: Vec<Option<String>>,
    #[serde(deserialize_with = "lenient_text")]
    pub result: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub evidence: Vec<Link>,
    #[serde(deserialize_with = "lenient_text")]
    pub reflection: Option<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillGroup {
    #[serde(deserialize_with = "lenient_text")]
    pub group: Option<String>,
    #[serde(deserialize_with = "lenient_text_list")]
    pub items: Vec<Option<String>>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    #[serde(deserialize_with = "lenient_text")]
    pub school: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub degree: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub major: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub start: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub end: Option<String>,
}

impl ResumeRecord {
    /// Reads and parses the résumé found at the given path.
    pub fn from_path(resume_path: &Path) -> Result<ResumeRecord, ContextError> {
        let resume_content = std::fs::read(resume_path).map_err(|error| {
            ContextError::with_error(format!("Failed to read the résumé {:?}", resume_path), &error)
        })?;
        ResumeRecord::from_slice(&resume_content).map_err(|error| ContextError {
            context: format!("Failed to parse the résumé {:?}", resume_path),
            source_error: error.source_error,
        })
    }

    /// Parses the résumé from the raw bytes of its JSON representation.
    pub fn from_slice(resume_content: &[u8]) -> Result<ResumeRecord, ContextError> {
        serde_json::from_slice(resume_content)
            .map_err(|error| ContextError::with_error("Failed to parse the résumé", &error))
    }
}

/// Converts a scalar JSON value into its textual form. Objects and arrays have no such form.
fn scalar_to_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(boolean) => Some(boolean.to_string()),
        Value::Null => None,
        Value::Array(_) | Value::Object(_) => {
            log::warn!("Ignoring a non-scalar value where text was expected");
            None
        }
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_to_text))
}

/// Reads a list of scalars, a value which is not a list is read as an empty list.
fn lenient_text_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Option<String>>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(values)) => Ok(values.into_iter().map(scalar_to_text).collect()),
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(_) => {
            log::warn!("Ignoring a non-array value where a list of text was expected");
            Ok(Vec::new())
        }
    }
}

/// Reads a list of entries, where `null` entries are read as empty ones and a value which
/// is not a list is read as an empty list.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(values)) => values
            .into_iter()
            .map(|value| match value {
                Value::Null => Ok(T::default()),
                value => serde_json::from_value(value).map_err(D::Error::custom),
            })
            .collect(),
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(_) => {
            log::warn!("Ignoring a non-array value where a list of entries was expected");
            Ok(Vec::new())
        }
    }
}

/// Reads a single entry, where `null` is read as an empty entry.
fn lenient_entry<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(map)) => {
            serde_json::from_value(Value::Object(map)).map_err(D::Error::custom)
        }
        Some(Value::Null) | None => Ok(T::default()),
        Some(_) => {
            log::warn!("Ignoring a non-object value where an entry was expected");
            Ok(T::default())
        }
    }
}
