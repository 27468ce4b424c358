//! Memoized derived views over the meetings app [`State`].
//!
//! Construct one [`Views`] when the application starts and pass it to
//! whatever renders state. Every view owns a single last-call slot: calling
//! it again with the same `Arc<State>` and equal parameters returns the
//! previously computed value (the same `Arc` for entities and listings).
//! Any other call recomputes and replaces the slot.
//!
//! Composite views ([`Views::uninvited_contacts`], [`Views::is_user_in_stack`])
//! are keyed on the outputs of the views they are built from, so they only
//! recompute when one of those outputs changes. Listings feeding a composite
//! are compared entity by entity.
//!
//! Listings ordered by creation time put entities without an `inserted_at`
//! last.

use meetings_model::{
    AgendaItem, Amendment, Contact, Meeting, MeetingInvitation, MeetingParticipant, Proposal,
    State, Topic, Ui, UserData,
};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error as ThisError;

mod memo;
pub mod params;
mod select;
use self::memo::{ByElements, ByValue, Memo};
pub use self::params::*;
pub use self::select::Listing;
use self::select::*;

#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ViewError {
    #[error("View {view} requires parameter {param}")]
    MissingParam {
        view: &'static str,
        param: &'static str,
    },
}

type StateKey = Arc<State>;
type ParamsKey<P> = (Arc<State>, ByValue<P>);

pub struct Views {
    ui: Memo<StateKey, Arc<Ui>>,
    snackbar: Memo<StateKey, Arc<Value>>,
    nav_drawer: Memo<StateKey, Arc<Value>>,
    header: Memo<StateKey, Arc<Value>>,
    proposals: Memo<ParamsKey<ProposalsParams>, Listing<Proposal>>,
    proposal: Memo<ParamsKey<ProposalParams>, Option<Arc<Proposal>>>,
    amendments: Memo<ParamsKey<ProposalParams>, Listing<Amendment>>,
    amendment: Memo<ParamsKey<AmendmentParams>, Option<Arc<Amendment>>>,
    meeting_participants: Memo<StateKey, Listing<MeetingParticipant>>,
    meeting_invitations: Memo<StateKey, Listing<MeetingInvitation>>,
    meeting_invitation: Memo<ParamsKey<MeetingInvitationParams>, Option<Arc<MeetingInvitation>>>,
    user_meeting_invitations: Memo<StateKey, Listing<MeetingInvitation>>,
    user_meeting_invitation:
        Memo<ParamsKey<MeetingInvitationParams>, Option<Arc<MeetingInvitation>>>,
    is_user_logged_in: Memo<StateKey, bool>,
    user_data: Memo<StateKey, Option<Arc<UserData>>>,
    user_contacts: Memo<StateKey, Listing<Contact>>,
    uninvited_contacts:
        Memo<(ByElements<Contact>, ByElements<MeetingInvitation>), Listing<Contact>>,
    meeting: Memo<ParamsKey<MeetingParams>, Option<Arc<Meeting>>>,
    meetings: Memo<ParamsKey<ListParams>, Listing<Meeting>>,
    agenda_items: Memo<ParamsKey<ListParams>, Listing<AgendaItem>>,
    filtered_agenda_items: Memo<ParamsKey<StatusParams>, Listing<AgendaItem>>,
    agenda_item: Memo<ParamsKey<AgendaItemParams>, Option<Arc<AgendaItem>>>,
    is_user_in_stack: Memo<(Option<Arc<UserData>>, Option<Arc<AgendaItem>>), bool>,
    topic: Memo<ParamsKey<TopicParams>, Option<Arc<Topic>>>,
    topics: Memo<ParamsKey<ListParams>, Listing<Topic>>,
}

fn params_key<P: Clone>(state: &Arc<State>, params: &P) -> ParamsKey<P> {
    (state.clone(), ByValue(params.clone()))
}

impl Views {
    pub fn new() -> Self {
        Self {
            ui: Memo::new("ui"),
            snackbar: Memo::new("snackbar"),
            nav_drawer: Memo::new("nav_drawer"),
            header: Memo::new("header"),
            proposals: Memo::new("proposals"),
            proposal: Memo::new("proposal"),
            amendments: Memo::new("amendments"),
            amendment: Memo::new("amendment"),
            meeting_participants: Memo::new("meeting_participants"),
            meeting_invitations: Memo::new("meeting_invitations"),
            meeting_invitation: Memo::new("meeting_invitation"),
            user_meeting_invitations: Memo::new("user_meeting_invitations"),
            user_meeting_invitation: Memo::new("user_meeting_invitation"),
            is_user_logged_in: Memo::new("is_user_logged_in"),
            user_data: Memo::new("user_data"),
            user_contacts: Memo::new("user_contacts"),
            uninvited_contacts: Memo::new("uninvited_contacts"),
            meeting: Memo::new("meeting"),
            meetings: Memo::new("meetings"),
            agenda_items: Memo::new("agenda_items"),
            filtered_agenda_items: Memo::new("filtered_agenda_items"),
            agenda_item: Memo::new("agenda_item"),
            is_user_in_stack: Memo::new("is_user_in_stack"),
            topic: Memo::new("topic"),
            topics: Memo::new("topics"),
        }
    }

    // ui

    pub fn ui(&mut self, state: &Arc<State>) -> Arc<Ui> {
        self.ui.get_or_compute(state.clone(), || select_ui(state))
    }

    pub fn snackbar(&mut self, state: &Arc<State>) -> Arc<Value> {
        self.snackbar
            .get_or_compute(state.clone(), || select_snackbar(state))
    }

    pub fn nav_drawer(&mut self, state: &Arc<State>) -> Arc<Value> {
        self.nav_drawer
            .get_or_compute(state.clone(), || select_nav_drawer(state))
    }

    pub fn header(&mut self, state: &Arc<State>) -> Arc<Value> {
        self.header
            .get_or_compute(state.clone(), || select_header(state))
    }

    // proposals and amendments

    /// Proposals of an agenda item, oldest first.
    ///
    /// Fails if `agenda_item_id` is absent. An agenda item that is not
    /// cached yields an empty listing.
    pub fn proposals(
        &mut self,
        state: &Arc<State>,
        params: &ProposalsParams,
    ) -> Result<Listing<Proposal>, ViewError> {
        self.proposals
            .try_get_or_compute(params_key(state, params), || {
                select_proposals(state, params)
            })
    }

    /// Fails if either id is absent; `None` if the agenda item or the
    /// proposal is not cached.
    pub fn proposal(
        &mut self,
        state: &Arc<State>,
        params: &ProposalParams,
    ) -> Result<Option<Arc<Proposal>>, ViewError> {
        self.proposal
            .try_get_or_compute(params_key(state, params), || select_proposal(state, params))
    }

    /// Amendments of a proposal, oldest first.
    ///
    /// Fails if either id is absent; empty if the agenda item or the
    /// proposal is not cached.
    pub fn amendments(
        &mut self,
        state: &Arc<State>,
        params: &ProposalParams,
    ) -> Result<Listing<Amendment>, ViewError> {
        self.amendments
            .try_get_or_compute(params_key(state, params), || {
                select_amendments(state, params)
            })
    }

    /// Fails if any id is absent; `None` if anything along the
    /// agenda item / proposal / amendment path is not cached.
    pub fn amendment(
        &mut self,
        state: &Arc<State>,
        params: &AmendmentParams,
    ) -> Result<Option<Arc<Amendment>>, ViewError> {
        self.amendment
            .try_get_or_compute(params_key(state, params), || {
                select_amendment(state, params)
            })
    }

    // participants and invitations

    /// Meeting participants other than the session user, by full name
    /// descending.
    pub fn meeting_participants(&mut self, state: &Arc<State>) -> Listing<MeetingParticipant> {
        self.meeting_participants
            .get_or_compute(state.clone(), || select_meeting_participants(state))
    }

    pub fn meeting_invitations(&mut self, state: &Arc<State>) -> Listing<MeetingInvitation> {
        self.meeting_invitations
            .get_or_compute(state.clone(), || select_meeting_invitations(state))
    }

    pub fn meeting_invitation(
        &mut self,
        state: &Arc<State>,
        params: &MeetingInvitationParams,
    ) -> Option<Arc<MeetingInvitation>> {
        self.meeting_invitation
            .get_or_compute(params_key(state, params), || {
                select_meeting_invitation(state, params)
            })
    }

    /// The session user's own invitations, oldest first.
    pub fn user_meeting_invitations(&mut self, state: &Arc<State>) -> Listing<MeetingInvitation> {
        self.user_meeting_invitations
            .get_or_compute(state.clone(), || select_user_meeting_invitations(state))
    }

    pub fn user_meeting_invitation(
        &mut self,
        state: &Arc<State>,
        params: &MeetingInvitationParams,
    ) -> Option<Arc<MeetingInvitation>> {
        self.user_meeting_invitation
            .get_or_compute(params_key(state, params), || {
                select_user_meeting_invitation(state, params)
            })
    }

    // session

    pub fn is_user_logged_in(&mut self, state: &Arc<State>) -> bool {
        self.is_user_logged_in
            .get_or_compute(state.clone(), || select_is_user_logged_in(state))
    }

    pub fn user_data(&mut self, state: &Arc<State>) -> Option<Arc<UserData>> {
        self.user_data
            .get_or_compute(state.clone(), || select_user_data(state))
    }

    pub fn user_contacts(&mut self, state: &Arc<State>) -> Listing<Contact> {
        self.user_contacts
            .get_or_compute(state.clone(), || select_user_contacts(state))
    }

    /// Contacts without a meeting invitation addressed to them.
    ///
    /// Recomputes only when a contact or an invitation changes, not on
    /// every new state.
    pub fn uninvited_contacts(&mut self, state: &Arc<State>) -> Listing<Contact> {
        let contacts = self.user_contacts(state);
        let invitations = self.meeting_invitations(state);

        self.uninvited_contacts.get_or_compute(
            (ByElements(contacts.clone()), ByElements(invitations.clone())),
            || select_uninvited_contacts(&contacts, &invitations),
        )
    }

    // meetings

    /// The meeting with `meeting_id`, or the selected meeting when no id
    /// is given.
    pub fn meeting(&mut self, state: &Arc<State>, params: &MeetingParams) -> Option<Arc<Meeting>> {
        self.meeting
            .get_or_compute(params_key(state, params), || select_meeting(state, params))
    }

    /// All meetings, oldest first. `sort_criteria` is ignored.
    pub fn meetings(&mut self, state: &Arc<State>, params: &ListParams) -> Listing<Meeting> {
        self.meetings
            .get_or_compute(params_key(state, params), || select_meetings(state, params))
    }

    // agenda items

    /// All agenda items, highest net vote score first. `sort_criteria` is
    /// ignored.
    pub fn agenda_items(&mut self, state: &Arc<State>, params: &ListParams) -> Listing<AgendaItem> {
        self.agenda_items
            .get_or_compute(params_key(state, params), || {
                select_agenda_items(state, params)
            })
    }

    /// Agenda items whose status equals `status`, in the same order as
    /// [`agenda_items`](Self::agenda_items). No status matches the items
    /// that have none.
    pub fn filtered_agenda_items(
        &mut self,
        state: &Arc<State>,
        params: &StatusParams,
    ) -> Listing<AgendaItem> {
        self.filtered_agenda_items
            .get_or_compute(params_key(state, params), || {
                select_filtered_agenda_items(state, params)
            })
    }

    /// The agenda item with `agenda_item_id`, or the selected agenda item
    /// when no id is given.
    pub fn agenda_item(
        &mut self,
        state: &Arc<State>,
        params: &AgendaItemParams,
    ) -> Option<Arc<AgendaItem>> {
        self.agenda_item
            .get_or_compute(params_key(state, params), || {
                select_agenda_item(state, params)
            })
    }

    /// Whether the session user is queued to speak on the agenda item
    /// resolved like [`agenda_item`](Self::agenda_item).
    pub fn is_user_in_stack(&mut self, state: &Arc<State>, params: &AgendaItemParams) -> bool {
        let user_data = self.user_data(state);
        let agenda_item = self.agenda_item(state, params);

        self.is_user_in_stack
            .get_or_compute((user_data.clone(), agenda_item.clone()), || {
                select_is_user_in_stack(user_data.as_deref(), agenda_item.as_deref())
            })
    }

    // topics

    pub fn topic(&mut self, state: &Arc<State>, params: &TopicParams) -> Option<Arc<Topic>> {
        self.topic
            .get_or_compute(params_key(state, params), || select_topic(state, params))
    }

    /// All topics. [`SortCriteria::Votes`] orders by
    /// `up - down + 0.25 * meh` descending; anything else oldest first.
    pub fn topics(&mut self, state: &Arc<State>, params: &ListParams) -> Listing<Topic> {
        self.topics
            .get_or_compute(params_key(state, params), || select_topics(state, params))
    }
}

impl Default for Views {
    fn default() -> Self {
        Self::new()
    }
}
