//! Dependency Comparator.
//!
//! Decides whether a memo must recompute or an effect must run by comparing
//! the dependency list stored in a slot with the one supplied this render.

use super::value::Dep;

/// Dependency list as stored in a memo or effect slot.
#[derive(Debug, Clone, Default)]
pub enum StoredDeps {
    /// The slot has never run. Never equal to anything.
    #[default]
    NeverRun,
    /// Last run had no list: run on every render.
    Always,
    List(Vec<Dep>),
}

impl StoredDeps {
    pub fn from_deps(deps: Option<Vec<Dep>>) -> Self {
        match deps {
            Some(list) => StoredDeps::List(list),
            None => StoredDeps::Always,
        }
    }
}

/// Outcome of comparing two dependency lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepsComparison {
    Equal,
    Changed,
    /// Lengths differ. Counts as changed, but usually an authoring bug.
    ShapeChanged { previous: usize, next: usize },
}

impl DepsComparison {
    pub fn is_equal(self) -> bool {
        self == DepsComparison::Equal
    }
}

/// Compare a stored list against the list supplied this render.
pub fn compare_deps(previous: &StoredDeps, next: Option<&[Dep]>) -> DepsComparison {
    let (previous, next) = match (previous, next) {
        (StoredDeps::NeverRun, _) | (StoredDeps::Always, _) | (_, None) => {
            return DepsComparison::Changed;
        }
        (StoredDeps::List(previous), Some(next)) => (previous, next),
    };

    if previous.len() != next.len() {
        return DepsComparison::ShapeChanged {
            previous: previous.len(),
            next: next.len(),
        };
    }

    if previous.iter().zip(next).all(|(a, b)| a.same(b)) {
        DepsComparison::Equal
    } else {
        DepsComparison::Changed
    }
}

/// `true` only when both lists are present, the same length and element-wise equal.
pub fn shallow_equal(previous: &StoredDeps, next: Option<&[Dep]>) -> bool {
    compare_deps(previous, next).is_equal()
}
