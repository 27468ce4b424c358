use lazy_static::lazy_static;
use regex::Regex;
use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum IdError {
    #[error("Does not match as {id_type} id: {input:?}")]
    BadFormat { id_type: &'static str, input: String },
    #[error("{id_type} id out of range: {input}")]
    OutOfRange { id_type: &'static str, input: String },
}

fn integer_prefix_regex() -> &'static Regex {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^\s*([+-]?[0-9]+)").unwrap();
    }
    &*RE
}

/// Parses the leading integer of `input`, ignoring surrounding whitespace
/// and anything after the digits ("12", " 12 ", "12abc" are all 12).
pub fn parse_integer_prefix(id_type: &'static str, input: &str) -> Result<i64, IdError> {
    let caps = integer_prefix_regex()
        .captures(input)
        .ok_or_else(|| IdError::BadFormat {
            id_type,
            input: input.to_string(),
        })?;
    let digits = &caps[1];
    digits.parse::<i64>().map_err(|_| IdError::OutOfRange {
        id_type,
        input: input.to_string(),
    })
}

/// Common surface of the typed entity ids.
pub trait EntityId: Copy + Ord + fmt::Debug + fmt::Display {
    const ID_TYPE: &'static str;

    /// Whether this id names an entity at all. Zero is the "unset" value
    /// callers send for a missing id.
    fn is_present(self) -> bool;
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $id_type:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub i64);

        impl $name {
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl EntityId for $name {
            const ID_TYPE: &'static str = $id_type;

            fn is_present(self) -> bool {
                self.0 != 0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> i64 {
                value.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(parse_integer_prefix($id_type, s)?))
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_i64(self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer
                    .deserialize_any(IdVisitor { id_type: $id_type })
                    .map($name)
            }
        }
    };
}

// Ids arrive as JSON numbers in entity fields but as strings when they are
// object keys or route params, so accept either.
struct IdVisitor {
    id_type: &'static str,
}

impl<'de> Visitor<'de> for IdVisitor {
    type Value = i64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{} id as integer or numeric string", self.id_type)
    }

    fn visit_i64<E>(self, value: i64) -> Result<i64, E>
    where
        E: de::Error,
    {
        Ok(value)
    }

    fn visit_u64<E>(self, value: u64) -> Result<i64, E>
    where
        E: de::Error,
    {
        i64::try_from(value).map_err(|_| {
            E::custom(IdError::OutOfRange {
                id_type: self.id_type,
                input: value.to_string(),
            })
        })
    }

    fn visit_str<E>(self, value: &str) -> Result<i64, E>
    where
        E: de::Error,
    {
        parse_integer_prefix(self.id_type, value).map_err(E::custom)
    }
}

define_id!(
    /// Server id of a meeting.
    MeetingId,
    "Meeting"
);
define_id!(
    /// Server id of an agenda item. Globally unique.
    AgendaItemId,
    "AgendaItem"
);
define_id!(
    /// Unique only within the owning agenda item.
    ProposalId,
    "Proposal"
);
define_id!(
    /// Unique only within the owning proposal.
    AmendmentId,
    "Amendment"
);
define_id!(MeetingInvitationId, "MeetingInvitation");
define_id!(TopicId, "Topic");
define_id!(StackEntryId, "StackEntry");
define_id!(
    /// Identity of a user account: session user, participants, contacts,
    /// invitees and stack entry owners all share this id space.
    UserId,
    "User"
);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_parse_plain_integer() {
        assert_eq!("42".parse::<AgendaItemId>().unwrap(), AgendaItemId(42));
        assert_eq!("-3".parse::<TopicId>().unwrap(), TopicId(-3));
    }

    #[test]
    fn test_parse_ignores_whitespace_and_trailing_junk() {
        assert_eq!(" 7 ".parse::<MeetingId>().unwrap(), MeetingId(7));
        assert_eq!("12abc".parse::<MeetingId>().unwrap(), MeetingId(12));
        assert_eq!("+5".parse::<UserId>().unwrap(), UserId(5));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(
            "abc".parse::<ProposalId>(),
            Err(IdError::BadFormat {
                id_type: "Proposal",
                input: "abc".to_string()
            })
        );
        assert!("".parse::<ProposalId>().is_err());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(matches!(
            "99999999999999999999".parse::<AmendmentId>(),
            Err(IdError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_zero_is_not_present() {
        assert!(!AgendaItemId(0).is_present());
        assert!(AgendaItemId(1).is_present());
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let from_number: UserId = serde_json::from_str("17").unwrap();
        let from_string: UserId = serde_json::from_str("\"17\"").unwrap();
        assert_eq!(from_number, UserId(17));
        assert_eq!(from_string, UserId(17));
        assert!(serde_json::from_str::<UserId>("\"nope\"").is_err());
        assert!(serde_json::from_str::<UserId>("true").is_err());
    }

    #[test]
    fn test_ids_as_map_keys() {
        let map: BTreeMap<TopicId, u32> =
            serde_json::from_str(r#"{"10": 1, "2": 2}"#).unwrap();
        let keys: Vec<TopicId> = map.keys().copied().collect();
        assert_eq!(keys, vec![TopicId(2), TopicId(10)]);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"2":2,"10":1}"#);
    }

    proptest! {
        #[test]
        fn test_display_then_parse_is_identity(n in any::<i64>()) {
            let id = MeetingId(n);
            prop_assert_eq!(id.to_string().parse::<MeetingId>().unwrap(), id);
        }

        #[test]
        fn test_trailing_text_is_ignored(n in 0i64..1_000_000, tail in "[a-z ]{0,8}") {
            let input = format!("{}{}", n, tail);
            prop_assert_eq!(input.parse::<AgendaItemId>().unwrap(), AgendaItemId(n));
        }
    }
}
