//! Ordering strategies.
//!
//! Each strategy is a pure function over the roster. Strategies that leave
//! deliberate gaps (serpentine, alternate) produce [`Slot`]s, where `None` is an
//! empty seat that still occupies a position in the sequence.
//!
//! Serpentine depends on the grid a person lands in, so [`arrange`] only sorts
//! for it; the engine snakes each section's share once it has been distributed.

use crate::models::{LayoutConfig, OrderingStrategy, Person, Slot};
use rand::Rng;
use std::cmp::Ordering;

/// A roster put in order, ready for distribution.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arrangement {
    /// Ordered people and empty seats
    pub slots: Vec<Slot>,
    /// People the strategy left out entirely
    pub excluded: Vec<Person>,
}

impl Arrangement {
    fn from_people(people: Vec<Person>) -> Self {
        Self {
            slots: people.into_iter().map(Some).collect(),
            excluded: Vec::new(),
        }
    }

    /// Number of people (not empty seats) in the sequence.
    pub fn people_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }
}

/// Orders the roster with the strategy selected in `config`.
///
/// `rng` is only consulted by [`OrderingStrategy::Random`].
pub fn arrange<R: Rng + ?Sized>(
    roster: &[Person],
    config: &LayoutConfig,
    rng: &mut R,
) -> Arrangement {
    let people = roster.to_vec();
    match config.strategy {
        OrderingStrategy::Sequential | OrderingStrategy::Serpentine => {
            Arrangement::from_people(sequential(people))
        }
        OrderingStrategy::Alternate => Arrangement {
            slots: alternate(sequential(people), config.total_capacity()),
            excluded: Vec::new(),
        },
        OrderingStrategy::EvenOdd => Arrangement::from_people(even_odd(people)),
        OrderingStrategy::GenderAlternating => {
            let excluded = roster
                .iter()
                .filter(|p| gender_group(p).is_none())
                .cloned()
                .collect();
            Arrangement {
                slots: gender_alternating(people).into_iter().map(Some).collect(),
                excluded,
            }
        }
        OrderingStrategy::Random => Arrangement::from_people(shuffle(people, rng)),
    }
}

/// Compares two people by numeric id.
///
/// Pairs where either id is not a number compare equal. This is not a total
/// order on mixed rosters, so it must only be used with [`stable_sort_by`].
fn compare_numeric_ids(a: &Person, b: &Person) -> Ordering {
    match (a.numeric_id(), b.numeric_id()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    }
}

/// Stable ascending sort by numeric id.
///
/// Fully ascending when every id is numeric. Non-numeric ids never move
/// relative to their neighbours because they compare equal to everything.
pub fn sequential(people: Vec<Person>) -> Vec<Person> {
    stable_sort_by(people, compare_numeric_ids)
}

/// Bottom-up stable merge sort.
///
/// Unlike `slice::sort_by`, this never panics or misbehaves when the comparator
/// is not a total order; it just yields some deterministic permutation.
fn stable_sort_by<T, F>(items: Vec<T>, mut compare: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut runs: Vec<Vec<T>> = items.into_iter().map(|item| vec![item]).collect();
    while runs.len() > 1 {
        let mut merged = Vec::with_capacity(runs.len().div_ceil(2));
        let mut pairs = runs.into_iter();
        while let Some(left) = pairs.next() {
            match pairs.next() {
                Some(right) => merged.push(merge_runs(left, right, &mut compare)),
                None => merged.push(left),
            }
        }
        runs = merged;
    }
    runs.pop().unwrap_or_default()
}

fn merge_runs<T, F>(left: Vec<T>, right: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        out.extend(next);
    }
    out
}

/// Lays people out on a `rows × cols` grid, reversing every odd row.
///
/// Rows past the end of the roster are padded with empty seats. People beyond
/// `rows × cols` follow the grid unchanged.
pub fn serpentine(people: Vec<Person>, rows: usize, cols: usize) -> Vec<Slot> {
    let mut people = people.into_iter();
    let mut slots = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        let mut line: Vec<Slot> = (0..cols).map(|_| people.next()).collect();
        if row % 2 == 1 {
            line.reverse();
        }
        slots.extend(line);
    }
    slots.extend(people.map(Some));
    slots
}

/// Seats people in every other slot of a `total_seats` long sequence.
///
/// Odd slots stay empty. People who do not fit follow the sequence so they are
/// reported as pending rather than lost.
pub fn alternate(people: Vec<Person>, total_seats: usize) -> Vec<Slot> {
    let mut slots: Vec<Slot> = vec![None; total_seats];
    let mut people = people.into_iter();
    for slot in slots.iter_mut().step_by(2) {
        match people.next() {
            Some(person) => *slot = Some(person),
            None => break,
        }
    }
    slots.extend(people.map(Some));
    slots
}

/// Takes one from each group in turn, starting with `first`, then appends
/// whatever is left of the longer group.
fn interleave(first: Vec<Person>, second: Vec<Person>) -> Vec<Person> {
    let mut out = Vec::with_capacity(first.len() + second.len());
    let mut first = first.into_iter();
    let mut second = second.into_iter();
    loop {
        match (first.next(), second.next()) {
            (None, None) => break,
            (a, b) => out.extend(a.into_iter().chain(b)),
        }
    }
    out
}

fn has_even_id(person: &Person) -> bool {
    person.numeric_id().is_some_and(|n| n % 2.0 == 0.0)
}

/// Interleaves even and odd ids, even first. Non-numeric ids count as odd.
pub fn even_odd(people: Vec<Person>) -> Vec<Person> {
    let (even, odd): (Vec<_>, Vec<_>) = people.into_iter().partition(has_even_id);
    interleave(even, odd)
}

/// Gender group used by [`gender_alternating`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenderGroup {
    /// Gender starts with `m` (any case)
    Male,
    /// Gender starts with `f` (any case)
    Female,
}

/// Classifies a person's gender field, or `None` if it fits neither group.
pub fn gender_group(person: &Person) -> Option<GenderGroup> {
    let gender = person.gender.to_lowercase();
    if gender.starts_with('m') {
        Some(GenderGroup::Male)
    } else if gender.starts_with('f') {
        Some(GenderGroup::Female)
    } else {
        None
    }
}

/// Interleaves male and female entries, male first.
///
/// Anyone whose gender is neither is dropped from the output.
pub fn gender_alternating(people: Vec<Person>) -> Vec<Person> {
    let mut males = Vec::new();
    let mut females = Vec::new();
    for person in people {
        match gender_group(&person) {
            Some(GenderGroup::Male) => males.push(person),
            Some(GenderGroup::Female) => females.push(person),
            None => {}
        }
    }
    interleave(males, females)
}

/// Fisher–Yates shuffle.
pub fn shuffle<R: Rng + ?Sized>(mut people: Vec<Person>, rng: &mut R) -> Vec<Person> {
    for i in (1..people.len()).rev() {
        let j = rng.random_range(0..=i);
        people.swap(i, j);
    }
    people
}
