//! Raw JSON to typed entity graph.
//!
//! Every entity owns a `Hydrate` impl that lists its date fields and nested
//! fields explicitly. Keys not named by the impl are kept in `extra`.

use crate::domain::model::{
    Action, Bill, ContactInfo, District, Legislator, Role, Session, Sponsor, SpecificVote, State,
    Version, Vote, DATETIME_FORMAT,
};
use crate::utils::error::{FiftyStatesError, Result};
use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub trait Hydrate: Sized {
    /// Entity name used in error messages.
    const ENTITY: &'static str;

    fn hydrate(raw: Value) -> Result<Self>;
}

/// Hydrate a top-level JSON array, as returned by the search endpoints.
pub fn hydrate_list<T: Hydrate>(raw: Value) -> Result<Vec<T>> {
    match raw {
        Value::Array(items) => items.into_iter().map(T::hydrate).collect(),
        other => Err(FiftyStatesError::DecodeError {
            entity: T::ENTITY,
            message: format!("expected a JSON array, got {}", json_kind(&other)),
        }),
    }
}

pub fn parse_datetime(field: &str, value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).map_err(|_| {
        FiftyStatesError::FormatError {
            field: field.to_string(),
            value: value.to_string(),
        }
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The remaining keys of one raw JSON object while its entity is built.
struct Fields {
    entity: &'static str,
    map: Map<String, Value>,
}

impl Fields {
    fn new(entity: &'static str, raw: Value) -> Result<Self> {
        match raw {
            Value::Object(map) => Ok(Self { entity, map }),
            other => Err(FiftyStatesError::DecodeError {
                entity,
                message: format!("expected a JSON object, got {}", json_kind(&other)),
            }),
        }
    }

    // null counts as absent for dates and nested lists
    fn take(&mut self, key: &str) -> Option<Value> {
        match self.map.remove(key) {
            None | Some(Value::Null) => None,
            value => value,
        }
    }

    /// Typed copy of a scalar. A null, or a value of another JSON type, is
    /// left in `extra` as decoded.
    fn scalar<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let value = match self.map.get(key) {
            None | Some(Value::Null) => return None,
            Some(value) => value.clone(),
        };
        match serde_json::from_value(value) {
            Ok(typed) => {
                self.map.remove(key);
                Some(typed)
            }
            Err(e) => {
                tracing::debug!("Keeping {}.{} untyped: {}", self.entity, key, e);
                None
            }
        }
    }

    fn datetime(&mut self, key: &str) -> Result<Option<NaiveDateTime>> {
        let field = format!("{}.{}", self.entity, key);
        match self.take(key) {
            None => Ok(None),
            Some(Value::String(text)) => parse_datetime(&field, &text).map(Some),
            Some(other) => Err(FiftyStatesError::FormatError {
                field,
                value: other.to_string(),
            }),
        }
    }

    fn optional_list<T: Hydrate>(&mut self, key: &str) -> Result<Option<Vec<T>>> {
        match self.take(key) {
            None => Ok(None),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(T::hydrate)
                .collect::<Result<Vec<T>>>()
                .map(Some),
            Some(other) => Err(FiftyStatesError::DecodeError {
                entity: self.entity,
                message: format!(
                    "field `{}` must be an array of {} objects, got {}",
                    key,
                    T::ENTITY,
                    json_kind(&other)
                ),
            }),
        }
    }

    fn list<T: Hydrate>(&mut self, key: &str) -> Result<Vec<T>> {
        Ok(self.optional_list(key)?.unwrap_or_default())
    }

    fn finish(self) -> Map<String, Value> {
        self.map
    }
}

impl Hydrate for Session {
    const ENTITY: &'static str = "Session";

    fn hydrate(raw: Value) -> Result<Self> {
        let mut fields = Fields::new(Self::ENTITY, raw)?;
        Ok(Self {
            name: fields.scalar("name"),
            start_year: fields.scalar("start_year"),
            end_year: fields.scalar("end_year"),
            extra: fields.finish(),
        })
    }
}

impl Hydrate for State {
    const ENTITY: &'static str = "State";

    fn hydrate(raw: Value) -> Result<Self> {
        let mut fields = Fields::new(Self::ENTITY, raw)?;
        let sessions = fields.list("sessions")?;
        Ok(Self {
            name: fields.scalar("name"),
            abbreviation: fields.scalar("abbreviation"),
            legislature_name: fields.scalar("legislature_name"),
            upper_chamber_name: fields.scalar("upper_chamber_name"),
            lower_chamber_name: fields.scalar("lower_chamber_name"),
            upper_chamber_term: fields.scalar("upper_chamber_term"),
            lower_chamber_term: fields.scalar("lower_chamber_term"),
            upper_chamber_title: fields.scalar("upper_chamber_title"),
            lower_chamber_title: fields.scalar("lower_chamber_title"),
            sessions,
            extra: fields.finish(),
        })
    }
}

impl Hydrate for Action {
    const ENTITY: &'static str = "Action";

    fn hydrate(raw: Value) -> Result<Self> {
        let mut fields = Fields::new(Self::ENTITY, raw)?;
        let date = fields.datetime("date")?;
        Ok(Self {
            actor: fields.scalar("actor"),
            action: fields.scalar("action"),
            date,
            extra: fields.finish(),
        })
    }
}

impl Hydrate for Sponsor {
    const ENTITY: &'static str = "Sponsor";

    fn hydrate(raw: Value) -> Result<Self> {
        let mut fields = Fields::new(Self::ENTITY, raw)?;
        Ok(Self {
            leg_id: fields.scalar("leg_id"),
            full_name: fields.scalar("full_name"),
            sponsor_type: fields.scalar("type"),
            extra: fields.finish(),
        })
    }
}

impl Hydrate for SpecificVote {
    const ENTITY: &'static str = "SpecificVote";

    fn hydrate(raw: Value) -> Result<Self> {
        let mut fields = Fields::new(Self::ENTITY, raw)?;
        Ok(Self {
            full_name: fields.scalar("full_name"),
            vote_type: fields.scalar("type"),
            extra: fields.finish(),
        })
    }
}

impl Hydrate for Vote {
    const ENTITY: &'static str = "Vote";

    fn hydrate(raw: Value) -> Result<Self> {
        let mut fields = Fields::new(Self::ENTITY, raw)?;
        let date = fields.datetime("date")?;
        let roll = fields.optional_list("roll")?;
        Ok(Self {
            vote_id: fields.scalar("vote_id"),
            date,
            chamber: fields.scalar("chamber"),
            motion: fields.scalar("motion"),
            yes_count: fields.scalar("yes_count"),
            no_count: fields.scalar("no_count"),
            other_count: fields.scalar("other_count"),
            passed: fields.scalar("passed"),
            roll,
            extra: fields.finish(),
        })
    }
}

impl Hydrate for Version {
    const ENTITY: &'static str = "Version";

    fn hydrate(raw: Value) -> Result<Self> {
        let mut fields = Fields::new(Self::ENTITY, raw)?;
        Ok(Self {
            url: fields.scalar("url"),
            name: fields.scalar("name"),
            extra: fields.finish(),
        })
    }
}

impl Hydrate for Bill {
    const ENTITY: &'static str = "Bill";

    fn hydrate(raw: Value) -> Result<Self> {
        let mut fields = Fields::new(Self::ENTITY, raw)?;
        let first_action = fields.datetime("first_action")?;
        let last_action = fields.datetime("last_action")?;
        let actions = fields.list("actions")?;
        let sponsors = fields.list("sponsors")?;
        let votes = fields.list("votes")?;
        let versions = fields.list("versions")?;
        Ok(Self {
            title: fields.scalar("title"),
            state: fields.scalar("state"),
            session: fields.scalar("session"),
            chamber: fields.scalar("chamber"),
            bill_id: fields.scalar("bill_id"),
            first_action,
            last_action,
            actions,
            sponsors,
            votes,
            versions,
            extra: fields.finish(),
        })
    }
}

impl Hydrate for ContactInfo {
    const ENTITY: &'static str = "ContactInfo";

    fn hydrate(raw: Value) -> Result<Self> {
        Fields::new(Self::ENTITY, raw).map(|fields| Self(fields.finish()))
    }
}

impl Hydrate for Role {
    const ENTITY: &'static str = "Role";

    fn hydrate(raw: Value) -> Result<Self> {
        let mut fields = Fields::new(Self::ENTITY, raw)?;
        let contact_info = fields.list("contact_info")?;
        Ok(Self {
            state: fields.scalar("state"),
            session: fields.scalar("session"),
            chamber: fields.scalar("chamber"),
            district: fields.scalar("district"),
            contact_info,
            extra: fields.finish(),
        })
    }
}

impl Hydrate for Legislator {
    const ENTITY: &'static str = "Legislator";

    fn hydrate(raw: Value) -> Result<Self> {
        let mut fields = Fields::new(Self::ENTITY, raw)?;
        let roles = fields.list("roles")?;
        Ok(Self {
            leg_id: fields.scalar("leg_id"),
            full_name: fields.scalar("full_name"),
            first_name: fields.scalar("first_name"),
            last_name: fields.scalar("last_name"),
            middle_name: fields.scalar("middle_name"),
            suffix: fields.scalar("suffix"),
            party: fields.scalar("party"),
            roles,
            extra: fields.finish(),
        })
    }
}

impl Hydrate for District {
    const ENTITY: &'static str = "District";

    fn hydrate(raw: Value) -> Result<Self> {
        let mut fields = Fields::new(Self::ENTITY, raw)?;
        let legislators = fields.list("legislators")?;
        Ok(Self {
            state: fields.scalar("state"),
            session: fields.scalar("session"),
            chamber: fields.scalar("chamber"),
            name: fields.scalar("name"),
            legislators,
            extra: fields.finish(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    fn sample_bill() -> Value {
        json!({
            "title": "An Act to promote clean energy",
            "state": "nc",
            "session": "2009",
            "chamber": "upper",
            "bill_id": "SB 1",
            "first_action": "2009-01-28 00:00:00",
            "last_action": "2009-06-30 17:45:12",
            "type": ["bill"],
            "actions": [
                {"actor": "upper", "action": "Filed", "date": "2009-01-28 00:00:00"},
                {"actor": "upper", "action": "Passed 1st Reading", "date": "2009-01-29 09:30:00"}
            ],
            "sponsors": [
                {"leg_id": "NCL000001", "full_name": "Martin Nesbitt", "type": "primary"}
            ],
            "votes": [
                {
                    "vote_id": 4,
                    "date": "2009-03-11 12:00:00",
                    "chamber": "upper",
                    "motion": "Second Reading",
                    "yes_count": 48,
                    "no_count": 0,
                    "other_count": 2,
                    "passed": true,
                    "roll": [{"full_name": "Martin Nesbitt", "type": "yes"}]
                }
            ],
            "versions": [
                {"url": "http://www.ncga.state.nc.us/Sessions/2009/Bills/Senate/HTML/S1v1.html", "name": "Filed"}
            ]
        })
    }

    #[test]
    fn test_hydrate_bill_graph() {
        let bill = Bill::hydrate(sample_bill()).unwrap();

        assert_eq!(bill.bill_id.as_deref(), Some("SB 1"));
        let first = bill.first_action.unwrap();
        assert_eq!((first.year(), first.month(), first.day()), (2009, 1, 28));
        let last = bill.last_action.unwrap();
        assert_eq!((last.hour(), last.minute(), last.second()), (17, 45, 12));

        assert_eq!(bill.actions.len(), 2);
        assert_eq!(bill.actions[1].action.as_deref(), Some("Passed 1st Reading"));
        assert_eq!(bill.actions[1].date.unwrap().hour(), 9);
        assert_eq!(bill.sponsors[0].sponsor_type.as_deref(), Some("primary"));
        assert_eq!(bill.votes[0].yes_count, Some(48));
        assert_eq!(bill.votes[0].passed, Some(true));
        let roll = bill.votes[0].roll.as_ref().unwrap();
        assert_eq!(roll[0].vote_type.as_deref(), Some("yes"));
        assert_eq!(bill.versions[0].name.as_deref(), Some("Filed"));
        assert_eq!(bill.extra.get("type"), Some(&json!(["bill"])));
    }

    #[test]
    fn test_scalar_fields_survive_reserialization() {
        let raw = sample_bill();
        let bill = Bill::hydrate(raw.clone()).unwrap();
        let back = serde_json::to_value(&bill).unwrap();

        for key in ["title", "state", "session", "chamber", "bill_id", "type"] {
            assert_eq!(back[key], raw[key], "field {key}");
        }
        assert_eq!(back["first_action"], raw["first_action"]);
        assert_eq!(back["votes"][0]["yes_count"], raw["votes"][0]["yes_count"]);
        assert_eq!(back["sponsors"][0]["type"], raw["sponsors"][0]["type"]);
    }

    #[test]
    fn test_missing_and_empty_nested_lists() {
        let bill = Bill::hydrate(json!({"bill_id": "HB 2", "votes": []})).unwrap();
        assert!(bill.votes.is_empty());
        assert!(bill.actions.is_empty());
        assert!(bill.sponsors.is_empty());
        assert!(bill.first_action.is_none());

        let bill = Bill::hydrate(json!({"bill_id": "HB 3", "votes": null})).unwrap();
        assert!(bill.votes.is_empty());
    }

    #[test]
    fn test_vote_without_roll() {
        let vote = Vote::hydrate(json!({
            "vote_id": 7,
            "date": "2009-04-01 10:00:00",
            "motion": "Adopt amendment"
        }))
        .unwrap();
        assert!(vote.roll.is_none());
        assert_eq!(vote.to_string(), "Vote on 'Adopt amendment'");

        let vote = Vote::hydrate(json!({"roll": []})).unwrap();
        assert_eq!(vote.roll, Some(vec![]));
    }

    #[test]
    fn test_malformed_date_is_format_error() {
        let err = Action::hydrate(json!({"actor": "lower", "date": "03/11/2009"})).unwrap_err();
        match err {
            FiftyStatesError::FormatError { field, value } => {
                assert_eq!(field, "Action.date");
                assert_eq!(value, "03/11/2009");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let mut raw = sample_bill();
        raw["votes"][0]["date"] = json!("2009-03-11");
        assert!(Bill::hydrate(raw).unwrap_err().is_format_error());

        let err = Vote::hydrate(json!({"date": 20090311})).unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_legislator_roles_and_contact_info() {
        let legislator = Legislator::hydrate(json!({
            "leg_id": "NCL000123",
            "full_name": "Jane Q. Doe",
            "first_name": "Jane",
            "last_name": "Doe",
            "middle_name": "Q.",
            "suffix": null,
            "party": "Democrat",
            "roles": [{
                "state": "nc",
                "session": "2009",
                "chamber": "upper",
                "district": "16",
                "contact_info": [
                    {"phone": "919-555-0100", "office": "Legislative Building"},
                    {"email": "jane.doe@example.org"}
                ]
            }]
        }))
        .unwrap();

        assert!(legislator.suffix.is_none());
        assert_eq!(legislator.to_string(), "Jane Q. Doe");
        let role = &legislator.roles[0];
        assert_eq!(role.contact_info.len(), 2);
        assert_eq!(role.contact_info[0].get_str("phone"), Some("919-555-0100"));
        assert_eq!(
            role.contact_info[1].get_str("email"),
            Some("jane.doe@example.org")
        );
    }

    #[test]
    fn test_state_sessions_and_district_legislators() {
        let state = State::hydrate(json!({
            "name": "North Carolina",
            "abbreviation": "nc",
            "upper_chamber_term": 2,
            "sessions": [
                {"name": "2009", "start_year": 2009, "end_year": 2010}
            ]
        }))
        .unwrap();
        assert_eq!(state.to_string(), "North Carolina");
        assert_eq!(state.sessions[0].start_year, Some(2009));
        assert_eq!(state.sessions[0].to_string(), "2009");

        let district = District::hydrate(json!({
            "state": "nc",
            "name": "16",
            "legislators": [{"full_name": "Jane Q. Doe", "roles": []}]
        }))
        .unwrap();
        assert_eq!(district.legislators.len(), 1);
        assert!(district.legislators[0].roles.is_empty());
    }

    #[test]
    fn test_wrong_shapes_are_decode_errors() {
        let err = Bill::hydrate(json!(["not", "an", "object"])).unwrap_err();
        assert!(matches!(err, FiftyStatesError::DecodeError { entity: "Bill", .. }));

        let err = Bill::hydrate(json!({"actions": {"actor": "upper"}})).unwrap_err();
        assert!(matches!(err, FiftyStatesError::DecodeError { .. }));

        assert!(hydrate_list::<Bill>(json!({"bills": []})).is_err());
    }

    #[test]
    fn test_explicit_null_scalars_survive_reserialization() {
        let raw = json!({"full_name": "Jane", "roles": [], "suffix": null, "party": null});
        let legislator = Legislator::hydrate(raw.clone()).unwrap();

        assert!(legislator.suffix.is_none());
        let back = serde_json::to_value(&legislator).unwrap();
        assert_eq!(back.get("suffix"), Some(&Value::Null));
        assert_eq!(back, raw);
    }

    #[test]
    fn test_numeric_identifiers_pass_through() {
        let mut raw = sample_bill();
        raw["sponsors"][0]["leg_id"] = json!(1234);
        raw["session"] = json!(2009);
        let bill = Bill::hydrate(raw.clone()).unwrap();

        assert_eq!(bill.sponsors[0].leg_id, Some(json!(1234)));
        assert_eq!(bill.session, Some(json!(2009)));
        let back = serde_json::to_value(&bill).unwrap();
        assert_eq!(back["sponsors"][0]["leg_id"], json!(1234));

        let role = Role::hydrate(json!({
            "state": "nc", "session": "2009", "chamber": "upper", "district": 16
        }))
        .unwrap();
        assert_eq!(role.district, Some(json!(16)));
        assert_eq!(role.to_string(), "nc upper 2009 district 16");
    }

    #[test]
    fn test_mistyped_scalar_is_kept_as_decoded() {
        let raw = json!({"motion": "Concur", "yes_count": "many", "passed": "yes"});
        let vote = Vote::hydrate(raw.clone()).unwrap();

        assert!(vote.yes_count.is_none());
        assert!(vote.passed.is_none());
        assert_eq!(vote.extra.get("yes_count"), Some(&json!("many")));
        assert_eq!(serde_json::to_value(&vote).unwrap(), raw);
    }
}
