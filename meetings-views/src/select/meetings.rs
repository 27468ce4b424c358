use meetings_model::{Meeting, State};
use std::sync::Arc;

use crate::params::{ListParams, MeetingParams};
use crate::select::*;

pub(crate) fn select_meeting(state: &State, params: &MeetingParams) -> Option<Arc<Meeting>> {
    let meeting = match present(params.meeting_id) {
        Some(meeting_id) => state.meetings.get(&meeting_id),
        None => state.meetings.get_selected(),
    };
    meeting.cloned()
}

// sort criteria are accepted but meetings are always in creation order
pub(crate) fn select_meetings(state: &State, _params: &ListParams) -> Listing<Meeting> {
    by_inserted_at(state.meetings.cache.values(), |meeting| meeting.inserted_at.as_ref())
}
