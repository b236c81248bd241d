use std::fmt;

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Key addressing a person; identity lives outside the record.
pub type PersonId = i64;

/// Stored per key.
///
/// Decoding is lenient: `null` is a zero record, field names match
/// case-insensitively (later duplicates win), missing or `null` fields keep
/// their zero values and unknown fields are ignored.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub first_name: String,
    pub second_name: String,
    pub age: i64,
}

enum Field {
    FirstName,
    SecondName,
    Age,
}

impl Field {
    fn matching(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "firstname" => Some(Self::FirstName),
            "secondname" => Some(Self::SecondName),
            "age" => Some(Self::Age),
            _ => None,
        }
    }
}

struct PersonVisitor;

impl<'de> Visitor<'de> for PersonVisitor {
    type Value = Person;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a person object or null")
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Person, E> {
        Ok(Person::default())
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Person, E> {
        Ok(Person::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Person, A::Error> {
        let mut person = Person::default();
        while let Some(key) = map.next_key::<String>()? {
            match Field::matching(&key) {
                Some(Field::FirstName) => {
                    if let Some(v) = map.next_value::<Option<String>>()? { person.first_name = v; }
                }
                Some(Field::SecondName) => {
                    if let Some(v) = map.next_value::<Option<String>>()? { person.second_name = v; }
                }
                Some(Field::Age) => {
                    if let Some(v) = map.next_value::<Option<i64>>()? { person.age = v; }
                }
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(person)
    }
}

impl<'de> Deserialize<'de> for Person {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PersonVisitor)
    }
}

impl Person {
    /// Decode the first JSON value of a request body. Trailing bytes after
    /// a complete value are ignored.
    pub fn from_json(body: &[u8]) -> Result<Self, ServiceError> {
        match serde_json::Deserializer::from_slice(body).into_iter::<Person>().next() {
            Some(Ok(person)) => Ok(person),
            Some(Err(e)) => Err(ServiceError::InvalidBody(e.to_string())),
            None => Err(ServiceError::InvalidBody("empty body".into())),
        }
    }
}

/// Parse a path segment as a decimal key (an optional sign is accepted).
pub fn parse_key(raw: &str) -> Result<PersonId, ServiceError> {
    raw.parse::<PersonId>().map_err(|_| ServiceError::InvalidKey(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> Person {
        Person { first_name: "Ada".into(), second_name: "Lovelace".into(), age: 36 }
    }

    #[test]
    fn serializes_with_camel_case_fields_in_order() {
        let json = serde_json::to_string(&ada()).unwrap();
        assert_eq!(json, r#"{"firstName":"Ada","secondName":"Lovelace","age":36}"#);
    }

    #[test]
    fn from_json_reads_request_shape() {
        let p = Person::from_json(br#"{"firstName":"Ada","secondName":"Lovelace","age":36}"#).unwrap();
        assert_eq!(p, ada());
    }

    #[test]
    fn from_json_defaults_missing_fields_and_ignores_extra() {
        let p = Person::from_json(br#"{"firstName":"Ada","nickname":"Countess"}"#).unwrap();
        assert_eq!(p, Person { first_name: "Ada".into(), ..Person::default() });
    }

    #[test]
    fn from_json_treats_null_as_zero_record() {
        assert_eq!(Person::from_json(b"null").unwrap(), Person::default());
        let p = Person::from_json(br#"{"firstName":null,"age":3}"#).unwrap();
        assert_eq!(p, Person { age: 3, ..Person::default() });
    }

    #[test]
    fn from_json_matches_field_names_case_insensitively() {
        let p = Person::from_json(br#"{"FirstName":"Ada","SECONDNAME":"Lovelace","AGE":36}"#).unwrap();
        assert_eq!(p, ada());
        // later duplicates win, whatever their case
        let p = Person::from_json(br#"{"firstName":"Augusta","FIRSTNAME":"Ada"}"#).unwrap();
        assert_eq!(p.first_name, "Ada");
    }

    #[test]
    fn stored_map_decodes_through_same_rules() {
        let map: std::collections::BTreeMap<PersonId, Person> =
            serde_json::from_str(r#"{"1": {"firstName": "Ada", "secondName": "Lovelace", "age": 36}}"#).unwrap();
        assert_eq!(map.get(&1), Some(&ada()));
    }

    #[test]
    fn from_json_takes_first_value_only() {
        let p = Person::from_json(b"{\"age\": 1}\n{\"age\": 2}").unwrap();
        assert_eq!(p.age, 1);
    }

    #[test]
    fn from_json_rejects_bad_bodies() {
        let bodies: [&[u8]; 6] = [b"", b"   ", b"{", b"[1,2]", br#"{"age":"old"}"#, br#""Ada""#];
        for body in bodies {
            assert!(
                matches!(Person::from_json(body), Err(ServiceError::InvalidBody(_))),
                "body {:?} should be rejected",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn parse_key_accepts_signed_decimals() {
        assert_eq!(parse_key("1").unwrap(), 1);
        assert_eq!(parse_key("+42").unwrap(), 42);
        assert_eq!(parse_key("-7").unwrap(), -7);
    }

    #[test]
    fn parse_key_rejects_non_integers() {
        for raw in ["abc", "", "1.5", " 1", "0x10", "99999999999999999999"] {
            assert!(matches!(parse_key(raw), Err(ServiceError::InvalidKey(_))), "{raw:?}");
        }
    }
}
