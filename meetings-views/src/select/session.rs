use meetings_model::{Contact, MeetingInvitation, State, UserData};
use std::sync::Arc;

use crate::select::*;

pub(crate) fn select_is_user_logged_in(state: &State) -> bool {
    state.session.is_logged_in
}

pub(crate) fn select_user_data(state: &State) -> Option<Arc<UserData>> {
    state.session.user_data.clone()
}

pub(crate) fn select_user_contacts(state: &State) -> Listing<Contact> {
    state.session.contacts.iter().cloned().collect()
}

/// Contacts that no invitation points at.
pub(crate) fn select_uninvited_contacts(
    contacts: &Listing<Contact>,
    invitations: &Listing<MeetingInvitation>,
) -> Listing<Contact> {
    contacts
        .iter()
        .filter(|contact| {
            !invitations
                .iter()
                .any(|invitation| invitation.invitee.id == contact.id)
        })
        .cloned()
        .collect()
}
