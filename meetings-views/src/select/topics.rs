use meetings_model::{State, Topic};
use std::sync::Arc;

use crate::params::{ListParams, SortCriteria, TopicParams};
use crate::select::*;

pub(crate) fn select_topic(state: &State, params: &TopicParams) -> Option<Arc<Topic>> {
    params
        .topic_id
        .and_then(|topic_id| state.topics.get(&topic_id).cloned())
}

pub(crate) fn select_topics(state: &State, params: &ListParams) -> Listing<Topic> {
    let topics = state.topics.cache.values();

    match params.sort_criteria.unwrap_or_default() {
        SortCriteria::Votes => sorted_listing(topics, |a, b| {
            b.votes.score().total_cmp(&a.votes.score())
        }),
        SortCriteria::InsertedAt => by_inserted_at(topics, |topic| topic.inserted_at.as_ref()),
    }
}
