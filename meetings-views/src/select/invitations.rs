use meetings_model::{Cache, MeetingInvitation, State};
use meetings_ref::MeetingInvitationId;
use std::sync::Arc;

use crate::params::MeetingInvitationParams;
use crate::select::*;

fn invitations_by_inserted_at(
    cache: &Cache<MeetingInvitationId, MeetingInvitation>,
) -> Listing<MeetingInvitation> {
    by_inserted_at(cache.values(), |invitation| invitation.inserted_at.as_ref())
}

fn find_invitation(
    cache: &Cache<MeetingInvitationId, MeetingInvitation>,
    params: &MeetingInvitationParams,
) -> Option<Arc<MeetingInvitation>> {
    params
        .meeting_invitation_id
        .and_then(|id| cache.get(&id).cloned())
}

pub(crate) fn select_meeting_invitations(state: &State) -> Listing<MeetingInvitation> {
    invitations_by_inserted_at(&state.meeting_invitations.cache)
}

pub(crate) fn select_meeting_invitation(
    state: &State,
    params: &MeetingInvitationParams,
) -> Option<Arc<MeetingInvitation>> {
    find_invitation(&state.meeting_invitations.cache, params)
}

pub(crate) fn select_user_meeting_invitations(state: &State) -> Listing<MeetingInvitation> {
    invitations_by_inserted_at(&state.session.meeting_invitations)
}

pub(crate) fn select_user_meeting_invitation(
    state: &State,
    params: &MeetingInvitationParams,
) -> Option<Arc<MeetingInvitation>> {
    find_invitation(&state.session.meeting_invitations, params)
}
