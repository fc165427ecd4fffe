//! Dependency values.
//!
//! A [`Dep`] is one entry of a dependency list. Primitives compare by value,
//! shared allocations compare by address. Nothing is compared deeply.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// A dependency list. `None` means "no list supplied": the hook runs on
/// every render. `Some(vec![])` runs once.
pub type Deps = Option<Vec<Dep>>;

/// Dependency list that never compares equal: recompute on every render.
pub const ALWAYS: Deps = None;

// =============================================================================
// Dep
// =============================================================================

/// One dependency value.
#[derive(Clone)]
pub enum Dep {
    Unit,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    /// Strings are primitives: compared by content.
    Str(Rc<str>),
    /// Shared allocation: compared by address.
    Ref(RefIdentity),
}

impl Dep {
    /// Identity/value equality. Floats follow the same-value rule: `NaN`
    /// equals `NaN`, `0.0` and `-0.0` differ.
    pub fn same(&self, other: &Dep) -> bool {
        match (self, other) {
            (Dep::Unit, Dep::Unit) => true,
            (Dep::Bool(a), Dep::Bool(b)) => a == b,
            (Dep::Int(a), Dep::Int(b)) => a == b,
            (Dep::UInt(a), Dep::UInt(b)) => a == b,
            (Dep::Float(a), Dep::Float(b)) => same_float(*a, *b),
            (Dep::Char(a), Dep::Char(b)) => a == b,
            (Dep::Str(a), Dep::Str(b)) => a == b,
            (Dep::Ref(a), Dep::Ref(b)) => a.addr == b.addr,
            _ => false,
        }
    }
}

impl PartialEq for Dep {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl fmt::Debug for Dep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dep::Unit => f.write_str("Unit"),
            Dep::Bool(v) => write!(f, "Bool({v})"),
            Dep::Int(v) => write!(f, "Int({v})"),
            Dep::UInt(v) => write!(f, "UInt({v})"),
            Dep::Float(v) => write!(f, "Float({v})"),
            Dep::Char(v) => write!(f, "Char({v:?})"),
            Dep::Str(v) => write!(f, "Str({v:?})"),
            Dep::Ref(r) => write!(f, "Ref({:p})", r.addr),
        }
    }
}

/// Same-value float comparison.
pub(crate) fn same_float(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
}

// =============================================================================
// Reference Identity
// =============================================================================

/// Address of a shared allocation, kept alive so the address cannot be
/// reused while the dependency list still holds it.
#[derive(Clone)]
pub struct RefIdentity {
    addr: *const (),
    _keep_alive: Rc<dyn Any>,
}

impl RefIdentity {
    pub fn of<T: ?Sized + 'static>(rc: &Rc<T>) -> Self {
        Self {
            addr: Rc::as_ptr(rc) as *const (),
            _keep_alive: Rc::new(Rc::clone(rc)),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

macro_rules! dep_from {
    ($variant:ident as $repr:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Dep {
                fn from(value: $t) -> Self {
                    Dep::$variant(value as $repr)
                }
            }
        )*
    };
}

dep_from!(Int as i64: i8, i16, i32, i64, isize);
dep_from!(UInt as u64: u8, u16, u32, u64, usize);
dep_from!(Float as f64: f32, f64);

impl From<()> for Dep {
    fn from(_: ()) -> Self {
        Dep::Unit
    }
}

impl From<bool> for Dep {
    fn from(value: bool) -> Self {
        Dep::Bool(value)
    }
}

impl From<char> for Dep {
    fn from(value: char) -> Self {
        Dep::Char(value)
    }
}

impl From<&str> for Dep {
    fn from(value: &str) -> Self {
        Dep::Str(Rc::from(value))
    }
}

impl From<String> for Dep {
    fn from(value: String) -> Self {
        Dep::Str(Rc::from(value))
    }
}

impl From<&String> for Dep {
    fn from(value: &String) -> Self {
        Dep::Str(Rc::from(value.as_str()))
    }
}

impl From<Rc<str>> for Dep {
    fn from(value: Rc<str>) -> Self {
        Dep::Str(value)
    }
}

impl<T: ?Sized + 'static> From<&Rc<T>> for Dep {
    fn from(value: &Rc<T>) -> Self {
        Dep::Ref(RefIdentity::of(value))
    }
}

// =============================================================================
// deps! macro
// =============================================================================

/// Build a dependency list.
///
/// ```ignore
/// cx.use_effect(move || { /* ... */ }, deps![])?;          // once
/// cx.use_memo(move || total(&items), deps![&items, tax])?; // on change
/// cx.use_effect(move || { /* ... */ }, ALWAYS)?;           // every render
/// ```
#[macro_export]
macro_rules! deps {
    () => {
        ::core::option::Option::Some(::std::vec::Vec::<$crate::Dep>::new())
    };
    ($($dep:expr),+ $(,)?) => {
        ::core::option::Option::Some(::std::vec![$($crate::Dep::from($dep)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_compare_by_value() {
        assert!(Dep::from(3i32).same(&Dep::from(3i64)));
        assert!(Dep::from("a").same(&Dep::from(String::from("a"))));
        assert!(!Dep::from(3u8).same(&Dep::from(3i8)));
        assert!(!Dep::from(true).same(&Dep::from(false)));
        assert!(Dep::from(()).same(&Dep::Unit));
    }

    #[test]
    fn test_float_same_value() {
        assert!(Dep::from(f64::NAN).same(&Dep::from(f64::NAN)));
        assert!(!Dep::from(0.0f64).same(&Dep::from(-0.0f64)));
        assert!(Dep::from(1.5f32).same(&Dep::from(1.5f64)));
    }

    #[test]
    fn test_rc_compares_by_address() {
        let a = Rc::new(vec![1, 2, 3]);
        let b = Rc::new(vec![1, 2, 3]);

        assert!(Dep::from(&a).same(&Dep::from(&Rc::clone(&a))));
        assert!(!Dep::from(&a).same(&Dep::from(&b)));
    }

    #[test]
    fn test_unsized_rc() {
        let f: Rc<dyn Fn()> = Rc::new(|| {});
        let g: Rc<dyn Fn()> = Rc::new(|| {});

        assert_eq!(Dep::from(&f), Dep::from(&f));
        assert_ne!(Dep::from(&f), Dep::from(&g));
    }

    #[test]
    fn test_deps_macro() {
        let empty: Deps = deps![];
        assert_eq!(empty.map(|d| d.len()), Some(0));

        let list = deps![1, "two", 3.0];
        assert_eq!(list, Some(vec![Dep::Int(1), Dep::from("two"), Dep::Float(3.0)]));

        assert!(ALWAYS.is_none());
    }
}
