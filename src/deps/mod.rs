//! Dependency Comparator - dependency lists and shallow equality.
//!
//! Every memo and effect slot remembers the dependency list it last ran
//! with. On the next render the new list is compared element by element:
//! - primitives by value (floats by same-value, so `NaN` equals `NaN`)
//! - shared allocations (`Rc`) by address
//! - no recursion into composite values
//!
//! A missing list (`ALWAYS`) never compares equal, an empty list always
//! does after the first run.

mod compare;
mod shallow;
mod value;

pub use compare::{compare_deps, shallow_equal, DepsComparison, StoredDeps};
pub use shallow::ShallowEq;
pub use value::{Dep, Deps, RefIdentity, ALWAYS};
