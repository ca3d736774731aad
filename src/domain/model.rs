use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Fixed date-time layout used by every date field of the API.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn serialize_datetime<S: Serializer>(
    value: &Option<NaiveDateTime>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(dt) => serializer.collect_str(&dt.format(DATETIME_FORMAT)),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct State {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legislature_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_chamber_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_chamber_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_chamber_term: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_chamber_term: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_chamber_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_chamber_title: Option<String>,
    pub sessions: Vec<Session>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(
        serialize_with = "serialize_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDateTime>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sponsor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub sponsor_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One legislator's position in a roll call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecificVote {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub vote_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vote {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_id: Option<Value>,
    #[serde(
        serialize_with = "serialize_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chamber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yes_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<bool>,
    /// `None` when the response carried no roll call at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll: Option<Vec<SpecificVote>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Version {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chamber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_id: Option<String>,
    #[serde(
        serialize_with = "serialize_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub first_action: Option<NaiveDateTime>,
    #[serde(
        serialize_with = "serialize_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_action: Option<NaiveDateTime>,
    pub actions: Vec<Action>,
    pub sponsors: Vec<Sponsor>,
    pub votes: Vec<Vote>,
    pub versions: Vec<Version>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Loosely-typed contact record; the API gives no fixed schema for these.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ContactInfo(pub Map<String, Value>);

impl ContactInfo {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Role {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chamber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<Value>,
    pub contact_info: Vec<ContactInfo>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legislator {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    pub roles: Vec<Role>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct District {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chamber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    pub legislators: Vec<Legislator>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Free-form field rendered as text, without JSON quoting for strings.
pub fn scalar_text(value: &Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&scalar_text(&self.name))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(or_empty(&self.name))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", or_empty(&self.actor), or_empty(&self.action))
    }
}

impl fmt::Display for Sponsor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(or_empty(&self.full_name))
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vote on '{}'", or_empty(&self.motion))
    }
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", or_empty(&self.bill_id), or_empty(&self.title))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} district {}",
            or_empty(&self.state),
            or_empty(&self.chamber),
            scalar_text(&self.session),
            scalar_text(&self.district)
        )
    }
}

impl fmt::Display for Legislator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(or_empty(&self.full_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_display_forms() {
        let bill = Bill {
            title: Some("An Act concerning clean energy".to_string()),
            state: Some("nc".to_string()),
            session: Some(json!("2009")),
            chamber: Some("upper".to_string()),
            bill_id: Some("SB 1".to_string()),
            first_action: None,
            last_action: None,
            actions: vec![],
            sponsors: vec![],
            votes: vec![],
            versions: vec![],
            extra: Map::new(),
        };
        assert_eq!(bill.to_string(), "SB 1: An Act concerning clean energy");

        let role = Role {
            state: Some("nc".to_string()),
            session: Some(json!("2009")),
            chamber: Some("upper".to_string()),
            district: Some(json!(16)),
            contact_info: vec![],
            extra: Map::new(),
        };
        assert_eq!(role.to_string(), "nc upper 2009 district 16");
    }

    #[test]
    fn test_datetime_serializes_in_api_format() {
        let action = Action {
            actor: Some("upper".to_string()),
            action: Some("Filed".to_string()),
            date: NaiveDate::from_ymd_opt(2009, 2, 3).and_then(|d| d.and_hms_opt(14, 5, 0)),
            extra: Map::new(),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["date"], "2009-02-03 14:05:00");
        assert_eq!(action.to_string(), "upper: Filed");
    }
}
