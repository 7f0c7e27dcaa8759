//! Choosing which existing room a new room links to

use crate::config::LinkStrategy;
use crate::rng::RandomSource;

use super::room::Room;

/// Index of the room in `existing` whose center is closest to `candidate`'s
/// center. Ties go to the earliest room. Sentinels are skipped.
pub fn nearest_index(candidate: &Room, existing: &[Room]) -> Option<usize> {
    let target = candidate.center();
    let mut best: Option<(usize, i64)> = None;
    for (i, room) in existing.iter().enumerate() {
        if room.is_sentinel() {
            continue;
        }
        let d = room.center().distance_squared(target);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Nearest existing room by center distance.
///
/// # Panics
///
/// Panics if `existing` holds no placed room. The start room always exists
/// before any other room is linked, so reaching this is a generator bug.
pub fn nearest_room<'a>(candidate: &Room, existing: &'a [Room]) -> &'a Room {
    match nearest_index(candidate, existing) {
        Some(i) => &existing[i],
        None => panic!("nearest_room called with no placed rooms (candidate {candidate})"),
    }
}

/// Index of the room a new room should link to under `strategy`.
///
/// # Panics
///
/// Panics if `existing` holds no placed room.
pub fn link_index(
    strategy: LinkStrategy,
    candidate: &Room,
    existing: &[Room],
    rng: &mut impl RandomSource,
) -> usize {
    let found = match strategy {
        LinkStrategy::Nearest => nearest_index(candidate, existing),
        LinkStrategy::Random => {
            let placed = existing.iter().filter(|r| !r.is_sentinel()).count();
            if placed == 0 {
                None
            } else {
                let pick = rng.index(placed);
                existing
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| !r.is_sentinel())
                    .nth(pick)
                    .map(|(i, _)| i)
            }
        }
    };
    match found {
        Some(i) => i,
        None => panic!("cannot link {candidate}: no placed rooms to link to"),
    }
}
