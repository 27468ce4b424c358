//! Parameter objects, one per view family.
//!
//! Every field is optional and every type is `Default` (all fields absent).
//! Which absences are errors and which fall back to something is decided by
//! the view; see the docs on each method of [`Views`](crate::Views).

use meetings_ref::{AgendaItemId, AmendmentId, MeetingId, MeetingInvitationId, ProposalId, TopicId};
use std::{convert::Infallible, str::FromStr};

/// Requested ordering for list views.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortCriteria {
    #[default]
    InsertedAt,
    Votes,
}

impl FromStr for SortCriteria {
    type Err = Infallible;

    // anything but "votes" means the default order
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "votes" => SortCriteria::Votes,
            _ => SortCriteria::InsertedAt,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProposalsParams {
    pub agenda_item_id: Option<AgendaItemId>,
}

impl ProposalsParams {
    pub fn new(agenda_item_id: AgendaItemId) -> Self {
        Self {
            agenda_item_id: Some(agenda_item_id),
        }
    }
}

/// Used by both the proposal lookup and the amendment listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProposalParams {
    pub agenda_item_id: Option<AgendaItemId>,
    pub proposal_id: Option<ProposalId>,
}

impl ProposalParams {
    pub fn new(agenda_item_id: AgendaItemId, proposal_id: ProposalId) -> Self {
        Self {
            agenda_item_id: Some(agenda_item_id),
            proposal_id: Some(proposal_id),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AmendmentParams {
    pub agenda_item_id: Option<AgendaItemId>,
    pub proposal_id: Option<ProposalId>,
    pub amendment_id: Option<AmendmentId>,
}

impl AmendmentParams {
    pub fn new(
        agenda_item_id: AgendaItemId,
        proposal_id: ProposalId,
        amendment_id: AmendmentId,
    ) -> Self {
        Self {
            agenda_item_id: Some(agenda_item_id),
            proposal_id: Some(proposal_id),
            amendment_id: Some(amendment_id),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MeetingInvitationParams {
    pub meeting_invitation_id: Option<MeetingInvitationId>,
}

impl MeetingInvitationParams {
    pub fn new(meeting_invitation_id: MeetingInvitationId) -> Self {
        Self {
            meeting_invitation_id: Some(meeting_invitation_id),
        }
    }
}

/// Without an id the selected meeting is used.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MeetingParams {
    pub meeting_id: Option<MeetingId>,
}

impl MeetingParams {
    pub fn new(meeting_id: MeetingId) -> Self {
        Self {
            meeting_id: Some(meeting_id),
        }
    }
}

/// Without an id the selected agenda item is used.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AgendaItemParams {
    pub agenda_item_id: Option<AgendaItemId>,
}

impl AgendaItemParams {
    pub fn new(agenda_item_id: AgendaItemId) -> Self {
        Self {
            agenda_item_id: Some(agenda_item_id),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TopicParams {
    pub topic_id: Option<TopicId>,
}

impl TopicParams {
    pub fn new(topic_id: TopicId) -> Self {
        Self {
            topic_id: Some(topic_id),
        }
    }
}

/// Accepted by the meeting, agenda item and topic listings. Only topics
/// honour it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListParams {
    pub sort_criteria: Option<SortCriteria>,
}

impl ListParams {
    pub fn sorted_by(sort_criteria: SortCriteria) -> Self {
        Self {
            sort_criteria: Some(sort_criteria),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusParams {
    pub status: Option<String>,
}

impl StatusParams {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_criteria_from_str() {
        assert_eq!("votes".parse::<SortCriteria>(), Ok(SortCriteria::Votes));
        assert_eq!("inserted_at".parse::<SortCriteria>(), Ok(SortCriteria::InsertedAt));
        assert_eq!("VOTES".parse::<SortCriteria>(), Ok(SortCriteria::InsertedAt));
    }

    #[test]
    fn defaults_are_empty() {
        assert_eq!(ProposalsParams::default().agenda_item_id, None);
        assert_eq!(AmendmentParams::default().amendment_id, None);
        assert_eq!(ListParams::default().sort_criteria, None);
        assert_eq!(StatusParams::default().status, None);
    }
}
