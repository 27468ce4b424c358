//! Client-side state snapshot of the meetings app.
//!
//! The store replaces a [`State`] wholesale whenever server data arrives, so
//! everything here is read-only once deserialized. Entities sit behind
//! [`Arc`] so derived views can hand out shared references instead of
//! copies.

use meetings_ref::{
    AgendaItemId, AmendmentId, MeetingId, MeetingInvitationId, ProposalId, StackEntryId, TopicId,
    UserId,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, DefaultOnError};
use std::{collections::BTreeMap, sync::Arc};

/// Locally known copies of server entities, keyed by id.
///
/// Iterates in ascending id order, which is the order integer-keyed objects
/// come back from the server.
pub type Cache<K, V> = BTreeMap<K, Arc<V>>;

/// ISO 8601 timestamp as sent by the server. Compared as text, which orders
/// correctly for the fixed-width format the server emits.
pub type Timestamp = String;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize, V: Serialize",
    deserialize = "K: Deserialize<'de> + Ord, V: Deserialize<'de>"
))]
pub struct EntitySlice<K, V> {
    #[serde(default = "BTreeMap::new")]
    pub cache: Cache<K, V>,
    /// The "current" entity for views called without an explicit id.
    #[serde(default = "Option::default")]
    pub selected: Option<K>,
}

impl<K, V> Default for EntitySlice<K, V> {
    fn default() -> Self {
        Self {
            cache: BTreeMap::new(),
            selected: None,
        }
    }
}

impl<K: Ord, V> EntitySlice<K, V> {
    pub fn get(&self, id: &K) -> Option<&Arc<V>> {
        self.cache.get(id)
    }

    pub fn get_selected(&self) -> Option<&Arc<V>> {
        self.selected.as_ref().and_then(|id| self.cache.get(id))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Votes {
    #[serde(default)]
    pub up: u32,
    #[serde(default)]
    pub down: u32,
}

impl Votes {
    pub fn net(&self) -> i64 {
        i64::from(self.up) - i64::from(self.down)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicVotes {
    #[serde(default)]
    pub up: u32,
    #[serde(default)]
    pub down: u32,
    #[serde(default)]
    pub meh: u32,
}

impl TopicVotes {
    pub const MEH_WEIGHT: f64 = 0.25;

    /// `up - down + 0.25 * meh`
    pub fn score(&self) -> f64 {
        f64::from(self.up) - f64::from(self.down) + Self::MEH_WEIGHT * f64::from(self.meh)
    }
}

/// A user as embedded inside another entity (invitee, stack entry owner).
#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub full_name: Option<String>,
}

#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Meeting {
    pub id: MeetingId,
    #[serde(default)]
    pub title: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub description: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub inserted_at: Option<Timestamp>,
}

/// A member's place in the speaking queue of an agenda item.
#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StackEntry {
    pub id: StackEntryId,
    pub owner: UserRef,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub inserted_at: Option<Timestamp>,
}

#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgendaItem {
    pub id: AgendaItemId,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub meeting_id: Option<MeetingId>,
    #[serde(default)]
    pub name: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub description: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub votes: Votes,
    #[serde(default)]
    pub stack_entries: Vec<StackEntry>,
    #[serde(default)]
    pub proposals: Cache<ProposalId, Proposal>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub inserted_at: Option<Timestamp>,
}

impl AgendaItem {
    pub fn proposal(&self, id: ProposalId) -> Option<&Arc<Proposal>> {
        self.proposals.get(&id)
    }

    pub fn has_stack_owner(&self, user_id: UserId) -> bool {
        self.stack_entries
            .iter()
            .any(|entry| entry.owner.id == user_id)
    }
}

#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    #[serde(default)]
    pub text: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub author: Option<UserRef>,
    #[serde(default)]
    pub amendments: Cache<AmendmentId, Amendment>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub inserted_at: Option<Timestamp>,
}

impl Proposal {
    pub fn amendment(&self, id: AmendmentId) -> Option<&Arc<Amendment>> {
        self.amendments.get(&id)
    }
}

#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Amendment {
    pub id: AmendmentId,
    #[serde(default)]
    pub text: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub author: Option<UserRef>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub inserted_at: Option<Timestamp>,
}

#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MeetingParticipant {
    pub id: UserId,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub email: Option<String>,
}

#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MeetingInvitation {
    pub id: MeetingInvitationId,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub meeting_id: Option<MeetingId>,
    pub invitee: UserRef,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub inviter: Option<UserRef>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub accepted: Option<bool>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub inserted_at: Option<Timestamp>,
}

#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub votes: TopicVotes,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub inserted_at: Option<Timestamp>,
}

#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserData {
    pub id: UserId,
    #[serde(default)]
    pub full_name: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub email: Option<String>,
}

#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Contact {
    pub id: UserId,
    #[serde(default)]
    pub full_name: String,
    #[serde_as(deserialize_as = "DefaultOnError")]
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub is_logged_in: bool,
    #[serde(default)]
    pub user_data: Option<Arc<UserData>>,
    #[serde(default)]
    pub contacts: Vec<Arc<Contact>>,
    /// The session user's own invitations, separate from the meeting-wide
    /// invitation cache.
    #[serde(default)]
    pub meeting_invitations: Cache<MeetingInvitationId, MeetingInvitation>,
}

/// Presentation state. Opaque to the view layer and passed through as-is.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ui {
    #[serde(default)]
    pub snackbar: Arc<Value>,
    #[serde(default)]
    pub nav_drawer: Arc<Value>,
    #[serde(default)]
    pub header: Arc<Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    #[serde(default)]
    pub meetings: EntitySlice<MeetingId, Meeting>,
    #[serde(default)]
    pub agenda_items: EntitySlice<AgendaItemId, AgendaItem>,
    #[serde(default)]
    pub meeting_participants: EntitySlice<UserId, MeetingParticipant>,
    #[serde(default)]
    pub meeting_invitations: EntitySlice<MeetingInvitationId, MeetingInvitation>,
    #[serde(default)]
    pub topics: EntitySlice<TopicId, Topic>,
    #[serde(default)]
    pub session: Session,
    #[serde(default)]
    pub ui: Arc<Ui>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state() -> State {
        serde_json::from_value(json!({
            "meetings": {
                "cache": {
                    "3": { "id": 3, "title": "Board", "inserted_at": "2017-09-01T10:00:00" }
                },
                "selected": 3
            },
            "agendaItems": {
                "cache": {
                    "7": {
                        "id": "7",
                        "name": "Budget",
                        "status": "open",
                        "votes": { "up": 4, "down": 1 },
                        "stack_entries": [
                            { "id": 1, "owner": { "id": 11, "full_name": "Ada" } }
                        ],
                        "proposals": {
                            "1": {
                                "id": 1,
                                "text": "Spend less",
                                "amendments": {
                                    "1": { "id": 1, "text": "Spend much less" }
                                }
                            }
                        }
                    }
                },
                "selected": null
            },
            "topics": {
                "cache": {
                    "1": { "id": 1, "votes": { "up": 10, "down": 2, "meh": 4 } }
                }
            },
            "session": {
                "isLoggedIn": true,
                "userData": { "id": 11, "full_name": "Ada", "email": 12 },
                "contacts": [{ "id": 12, "full_name": "Grace" }]
            },
            "ui": { "navDrawer": { "open": false } }
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_snapshot() {
        let state = state();

        let meeting = state.meetings.get_selected().unwrap();
        assert_eq!(meeting.title, "Board");

        assert_eq!(state.agenda_items.selected, None);
        let item = state.agenda_items.get(&AgendaItemId(7)).unwrap();
        assert_eq!(item.votes.net(), 3);
        assert!(item.has_stack_owner(UserId(11)));
        assert!(!item.has_stack_owner(UserId(12)));

        let proposal = item.proposal(ProposalId(1)).unwrap();
        let amendment = proposal.amendment(AmendmentId(1)).unwrap();
        assert_eq!(amendment.text, "Spend much less");

        // malformed optional fields fall back to absent
        let user = state.session.user_data.as_ref().unwrap();
        assert_eq!(user.email, None);
        assert!(state.session.is_logged_in);

        assert_eq!(*state.ui.nav_drawer, json!({ "open": false }));
        assert_eq!(*state.ui.header, Value::Null);
    }

    #[test]
    fn test_missing_slices_default_to_empty() {
        let state: State = serde_json::from_value(json!({})).unwrap();
        assert!(state.meetings.cache.is_empty());
        assert!(state.meetings.get_selected().is_none());
        assert!(state.session.user_data.is_none());
        assert!(!state.session.is_logged_in);
    }

    #[test]
    fn test_absent_fields_stay_absent() {
        let state = state();

        let meeting = state.meetings.get_selected().unwrap();
        assert_eq!(meeting.inserted_at.as_deref(), Some("2017-09-01T10:00:00"));

        let item = state.agenda_items.get(&AgendaItemId(7)).unwrap();
        assert_eq!(item.status.as_deref(), Some("open"));
        assert_eq!(item.inserted_at, None);
        assert_eq!(item.proposal(ProposalId(1)).unwrap().inserted_at, None);

        let participant: MeetingParticipant =
            serde_json::from_value(json!({ "id": 4, "full_name": null })).unwrap();
        assert_eq!(participant.full_name, None);
    }

    #[test]
    fn test_topic_score_weights_meh() {
        let state = state();
        let topic = state.topics.get(&TopicId(1)).unwrap();
        assert_eq!(topic.votes.score(), 9.0);
    }

    #[test]
    fn test_net_votes_can_be_negative() {
        let votes = Votes { up: 1, down: 3 };
        assert_eq!(votes.net(), -2);
    }
}
