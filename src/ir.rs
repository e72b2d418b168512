use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One employee as delivered by the data layer. Everything besides the two
/// structural fields is carried through untouched for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(
        default,
        alias = "manager",
        deserialize_with = "deserialize_optional_id"
    )]
    pub manager_id: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl EmployeeRecord {
    pub fn new(id: impl Into<String>, manager_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            manager_id: manager_id.map(str::to_string),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    fn text_attribute(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|key| self.attributes.get(*key))
            .filter_map(Value::as_str)
            .map(str::trim)
            .find(|value| !value.is_empty())
    }

    /// Name shown on the node box; falls back to the id.
    pub fn display_name(&self) -> String {
        if let Some(full) = self.text_attribute(&["fullName", "full_name"]) {
            return full.to_string();
        }
        let first = self.text_attribute(&["firstName", "first_name"]);
        let last = self.text_attribute(&["lastName", "last_name"]);
        match (first, last) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.to_string(),
            (None, None) => self.id.clone(),
        }
    }

    pub fn job_title(&self) -> Option<&str> {
        self.text_attribute(&["jobTitle", "job_title", "positionTitle", "position_title"])
    }

    pub fn initials(&self) -> String {
        self.display_name()
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Number(val) => val.to_string(),
            RawId::Text(val) => val,
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(RawId::into_string)
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(RawId::into_string))
}

/// Parse the ordered employee array handed over by the data layer.
pub fn parse_records(input: &str) -> Result<Vec<EmployeeRecord>, serde_json::Error> {
    serde_json::from_str(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_and_integer_ids() {
        let input = r#"[
            {"id": 1, "manager": null, "first_name": "Awa", "last_name": "Diop"},
            {"id": "2", "managerId": 1, "jobTitle": "DRH"}
        ]"#;
        let records = parse_records(input).unwrap();
        assert_eq!(records[0].id, "1");
        assert_eq!(records[0].manager_id, None);
        assert_eq!(records[1].id, "2");
        assert_eq!(records[1].manager_id.as_deref(), Some("1"));
        assert_eq!(records[1].job_title(), Some("DRH"));
    }

    #[test]
    fn missing_manager_is_none() {
        let records = parse_records(r#"[{"id": "ceo"}]"#).unwrap();
        assert_eq!(records[0].manager_id, None);
        assert!(records[0].attributes.is_empty());
    }

    #[test]
    fn display_name_prefers_full_name() {
        let record = EmployeeRecord::new("7", None)
            .with_attribute("firstName", "Awa")
            .with_attribute("lastName", "Diop");
        assert_eq!(record.display_name(), "Awa Diop");
        assert_eq!(record.initials(), "AD");

        let record = record.with_attribute("fullName", "Dr. Awa Diop");
        assert_eq!(record.display_name(), "Dr. Awa Diop");

        let bare = EmployeeRecord::new("x9", None);
        assert_eq!(bare.display_name(), "x9");
    }
}
