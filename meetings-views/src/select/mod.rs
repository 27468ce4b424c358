use itertools::Itertools;
use meetings_model::Timestamp;
use meetings_ref::EntityId;
use std::{cmp::Ordering, sync::Arc};

use crate::ViewError;

mod agenda_items;
mod invitations;
mod meetings;
mod participants;
mod proposals;
mod session;
mod topics;
mod ui;
pub(crate) use self::agenda_items::*;
pub(crate) use self::invitations::*;
pub(crate) use self::meetings::*;
pub(crate) use self::participants::*;
pub(crate) use self::proposals::*;
pub(crate) use self::session::*;
pub(crate) use self::topics::*;
pub(crate) use self::ui::*;

/// Ordered snapshot of entities produced by a list view.
pub type Listing<T> = Arc<[Arc<T>]>;

pub(crate) fn empty_listing<T>() -> Listing<T> {
    Arc::from(Vec::new())
}

/// Drops ids that name nothing (unset or zero).
pub(crate) fn present<I: EntityId>(id: Option<I>) -> Option<I> {
    id.filter(|id| id.is_present())
}

pub(crate) fn required<I: EntityId>(
    view: &'static str,
    param: &'static str,
    id: Option<I>,
) -> Result<I, ViewError> {
    present(id).ok_or(ViewError::MissingParam { view, param })
}

/// Stable sort into a fresh listing; ties keep iteration order.
pub(crate) fn sorted_listing<'a, T: 'a>(
    items: impl Iterator<Item = &'a Arc<T>>,
    compare: impl FnMut(&Arc<T>, &Arc<T>) -> Ordering,
) -> Listing<T> {
    items.cloned().sorted_by(compare).collect()
}

/// Ascending order with absent values after every present one.
pub(crate) fn absent_last<T: Ord + ?Sized>(a: Option<&T>, b: Option<&T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Descending order with absent values before every present one.
pub(crate) fn absent_first_desc<T: Ord + ?Sized>(a: Option<&T>, b: Option<&T>) -> Ordering {
    absent_last(b, a)
}

/// Oldest first; entities without a timestamp go last.
pub(crate) fn by_inserted_at<'a, T: 'a>(
    items: impl Iterator<Item = &'a Arc<T>>,
    inserted_at: impl Fn(&T) -> Option<&Timestamp>,
) -> Listing<T> {
    sorted_listing(items, |a, b| absent_last(inserted_at(&**a), inserted_at(&**b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use meetings_ref::TopicId;
    use proptest::prelude::*;

    #[test]
    fn required_rejects_absent_and_zero() {
        assert_eq!(
            required::<TopicId>("topic", "topic_id", None),
            Err(ViewError::MissingParam {
                view: "topic",
                param: "topic_id"
            })
        );
        assert!(required("topic", "topic_id", Some(TopicId(0))).is_err());
        assert_eq!(required("topic", "topic_id", Some(TopicId(3))), Ok(TopicId(3)));
    }

    #[test]
    fn absent_values_sort_last_ascending_and_first_descending() {
        let a = "a".to_string();
        let b = "b".to_string();

        assert_eq!(absent_last(Some(&a), Some(&b)), Ordering::Less);
        assert_eq!(absent_last(Some(&b), None), Ordering::Less);
        assert_eq!(absent_last::<String>(None, Some(&a)), Ordering::Greater);
        assert_eq!(absent_last::<String>(None, None), Ordering::Equal);

        assert_eq!(absent_first_desc(Some(&a), Some(&b)), Ordering::Greater);
        assert_eq!(absent_first_desc::<String>(None, Some(&b)), Ordering::Less);
        assert_eq!(absent_first_desc(Some(&a), None), Ordering::Greater);
    }

    proptest! {
        #[test]
        fn inserted_at_order_is_stable(stamps in prop::collection::vec(prop::option::of(0u8..4), 0..24)) {
            let items: Vec<Arc<(usize, Option<Timestamp>)>> = stamps
                .iter()
                .enumerate()
                .map(|(index, stamp)| Arc::new((index, stamp.map(|stamp| format!("2017-01-0{}", stamp)))))
                .collect();

            let listing = by_inserted_at(items.iter(), |item| item.1.as_ref());

            prop_assert_eq!(listing.len(), items.len());
            for pair in listing.windows(2) {
                prop_assert_ne!(
                    absent_last(pair[0].1.as_ref(), pair[1].1.as_ref()),
                    Ordering::Greater
                );
                if pair[0].1 == pair[1].1 {
                    prop_assert!(pair[0].0 < pair[1].0);
                }
            }
        }
    }
}
