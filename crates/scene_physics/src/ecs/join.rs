//! Sorted merge-join over component arrays
//!
//! Every component array is sorted by entity id, so the entities present in
//! two or three arrays can be found in one linear pass: keep a cursor per
//! array, step whichever cursor sits on the smaller id, and call back when
//! all cursors agree. Invalid rows are stepped over wherever they appear.
//!
//! The walk stops as soon as any cursor runs off the end of its array.
//! Rows left in the tail of the longer arrays are never visited, which is
//! exactly right for an inner join: nothing past the end of the shortest
//! array can have a partner in it.

use std::cmp::Ordering;

use super::Component;

/// Visit every entity valid in both `a` and `b`, in ascending order
///
/// Returns the number of joined entities.
pub fn join2<A, B, F>(a: &[A], b: &[B], mut visit: F) -> usize
where
    A: Component,
    B: Component,
    F: FnMut(&A, &B),
{
    let (mut i, mut j) = (0, 0);
    let mut joined = 0;

    while i < a.len() && j < b.len() {
        if !a[i].is_valid() {
            i += 1;
            continue;
        }
        if !b[j].is_valid() {
            j += 1;
            continue;
        }

        match a[i].entity().cmp(&b[j].entity()) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                visit(&a[i], &b[j]);
                joined += 1;
                i += 1;
                j += 1;
            }
        }
    }

    joined
}

/// Mutable form of [`join2`]
pub fn join2_mut<A, B, F>(a: &mut [A], b: &mut [B], mut visit: F) -> usize
where
    A: Component,
    B: Component,
    F: FnMut(&mut A, &mut B),
{
    let (mut i, mut j) = (0, 0);
    let mut joined = 0;

    while i < a.len() && j < b.len() {
        if !a[i].is_valid() {
            i += 1;
            continue;
        }
        if !b[j].is_valid() {
            j += 1;
            continue;
        }

        match a[i].entity().cmp(&b[j].entity()) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                visit(&mut a[i], &mut b[j]);
                joined += 1;
                i += 1;
                j += 1;
            }
        }
    }

    joined
}

/// Visit every entity valid in all three arrays, in ascending order
pub fn join3_mut<A, B, C, F>(a: &mut [A], b: &mut [B], c: &mut [C], mut visit: F) -> usize
where
    A: Component,
    B: Component,
    C: Component,
    F: FnMut(&mut A, &mut B, &mut C),
{
    let (mut i, mut j, mut k) = (0, 0, 0);
    let mut joined = 0;

    while i < a.len() && j < b.len() && k < c.len() {
        if !a[i].is_valid() {
            i += 1;
            continue;
        }
        if !b[j].is_valid() {
            j += 1;
            continue;
        }
        if !c[k].is_valid() {
            k += 1;
            continue;
        }

        let (ea, eb, ec) = (a[i].entity(), b[j].entity(), c[k].entity());
        let target = ea.max(eb).max(ec);

        if ea == target && eb == target && ec == target {
            visit(&mut a[i], &mut b[j], &mut c[k]);
            joined += 1;
            i += 1;
            j += 1;
            k += 1;
            continue;
        }

        // Catch every lagging cursor up towards the largest id
        if ea < target {
            i += 1;
        }
        if eb < target {
            j += 1;
        }
        if ec < target {
            k += 1;
        }
    }

    joined
}
