//! Ordering rules for a route's landmarks.
//!
//! Every function here returns a sequence whose `order` fields are exactly
//! `0..n` and match the vector positions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entities::Landmark;
use crate::error::{validation_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

fn renumber(sequence: &mut [Landmark]) {
    for (index, landmark) in sequence.iter_mut().enumerate() {
        landmark.order = index as u32;
    }
}

/// Sorts by `order` and renumbers. Equal orders keep their vector position.
pub fn normalize(mut sequence: Vec<Landmark>) -> Vec<Landmark> {
    sequence.sort_by_key(|landmark| landmark.order);
    renumber(&mut sequence);
    sequence
}

pub fn is_contiguous(sequence: &[Landmark]) -> bool {
    sequence
        .iter()
        .enumerate()
        .all(|(index, landmark)| landmark.order as usize == index)
}

pub fn append(mut sequence: Vec<Landmark>, mut item: Landmark) -> Vec<Landmark> {
    item.order = sequence.len() as u32;
    sequence.push(item);
    sequence
}

/// Removing an id that is not present leaves the sequence as it was.
pub fn remove_by_id(sequence: Vec<Landmark>, id: &str) -> Vec<Landmark> {
    let mut remaining = normalize(sequence);
    remaining.retain(|landmark| landmark.id != id);
    renumber(&mut remaining);
    remaining
}

/// Renumbers `ordering` by position. It must hold exactly the ids of
/// `sequence`; foreign, missing or repeated ids are rejected.
pub fn reorder(sequence: &[Landmark], mut ordering: Vec<Landmark>) -> Result<Vec<Landmark>, Error> {
    let mut expected: HashMap<&str, bool> = sequence
        .iter()
        .map(|landmark| (landmark.id.as_str(), false))
        .collect();

    for landmark in ordering.iter() {
        match expected.get_mut(landmark.id.as_str()) {
            None => {
                return Err(validation_error(format!(
                    "landmark {} is not part of this route",
                    landmark.id
                )))
            }
            Some(true) => {
                return Err(validation_error(format!(
                    "landmark {} appears more than once",
                    landmark.id
                )))
            }
            Some(seen) => *seen = true,
        }
    }

    if ordering.len() != sequence.len() {
        return Err(validation_error(format!(
            "expected {} landmarks in the new order, got {}",
            sequence.len(),
            ordering.len()
        )));
    }

    renumber(&mut ordering);
    Ok(ordering)
}

/// Moves the landmark at `index` one step. Moves past either end do nothing.
pub fn move_adjacent(sequence: Vec<Landmark>, index: usize, direction: Direction) -> Vec<Landmark> {
    let mut sequence = normalize(sequence);

    let target = match direction {
        Direction::Up => index.checked_sub(1),
        Direction::Down => index.checked_add(1),
    };

    if let Some(target) = target {
        if index < sequence.len() && target < sequence.len() {
            sequence.swap(index, target);
            renumber(&mut sequence);
        }
    }

    sequence
}
