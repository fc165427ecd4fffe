//! Shallow equality for props.
//!
//! The memo-component wrapper compares props key by key with
//! [`ShallowEq`]: primitives by value, shared allocations by address.

use std::rc::Rc;

use super::value::{same_float, Dep};

/// One-level equality: no recursion into shared values.
pub trait ShallowEq {
    fn shallow_eq(&self, other: &Self) -> bool;
}

macro_rules! shallow_eq_by_value {
    ($($t:ty),*) => {
        $(
            impl ShallowEq for $t {
                fn shallow_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

shallow_eq_by_value!(
    (), bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, str, String
);

impl ShallowEq for f32 {
    fn shallow_eq(&self, other: &Self) -> bool {
        same_float(f64::from(*self), f64::from(*other))
    }
}

impl ShallowEq for f64 {
    fn shallow_eq(&self, other: &Self) -> bool {
        same_float(*self, *other)
    }
}

impl<T: ?Sized> ShallowEq for Rc<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(self), Rc::as_ptr(other))
    }
}

impl<T: ?Sized + ShallowEq> ShallowEq for &T {
    fn shallow_eq(&self, other: &Self) -> bool {
        (**self).shallow_eq(*other)
    }
}

impl<T: ShallowEq> ShallowEq for Option<T> {
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.shallow_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl ShallowEq for Dep {
    fn shallow_eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

macro_rules! shallow_eq_tuple {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name: ShallowEq),+> ShallowEq for ($($name,)+) {
            fn shallow_eq(&self, other: &Self) -> bool {
                $(self.$idx.shallow_eq(&other.$idx))&&+
            }
        }
    };
}

shallow_eq_tuple!(A.0);
shallow_eq_tuple!(A.0, B.1);
shallow_eq_tuple!(A.0, B.1, C.2);
shallow_eq_tuple!(A.0, B.1, C.2, D.3);
shallow_eq_tuple!(A.0, B.1, C.2, D.3, E.4);

/// Implement [`ShallowEq`] for a props struct, comparing the listed fields.
///
/// ```ignore
/// struct ChildProps {
///     on_click: Callback,
///     label: String,
/// }
///
/// impl_shallow_eq!(ChildProps { on_click, label });
/// ```
#[macro_export]
macro_rules! impl_shallow_eq {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::ShallowEq for $ty {
            fn shallow_eq(&self, other: &Self) -> bool {
                true $(&& $crate::ShallowEq::shallow_eq(&self.$field, &other.$field))*
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Props {
        label: String,
        items: Rc<Vec<u32>>,
        count: Option<u8>,
    }

    crate::impl_shallow_eq!(Props { label, items, count });

    #[test]
    fn test_props_struct() {
        let items = Rc::new(vec![1, 2]);
        let a = Props { label: "x".into(), items: items.clone(), count: Some(1) };
        let b = Props { label: "x".into(), items: items.clone(), count: Some(1) };
        assert!(a.shallow_eq(&b));

        let c = Props { label: "x".into(), items: Rc::new(vec![1, 2]), count: Some(1) };
        assert!(!a.shallow_eq(&c), "equal contents in a new allocation are a change");

        let d = Props { label: "y".into(), items, count: Some(1) };
        assert!(!a.shallow_eq(&d));
    }

    #[test]
    fn test_tuples_and_unit() {
        assert!(().shallow_eq(&()));
        assert!((1, "a").shallow_eq(&(1, "a")));
        assert!(!(1, "a").shallow_eq(&(1, "b")));
    }

    #[test]
    fn test_closures_by_address() {
        let f: Rc<dyn Fn()> = Rc::new(|| {});
        let g = f.clone();
        let h: Rc<dyn Fn()> = Rc::new(|| {});
        assert!(f.shallow_eq(&g));
        assert!(!f.shallow_eq(&h));
    }

    #[test]
    fn test_float_nan() {
        assert!(f64::NAN.shallow_eq(&f64::NAN));
        assert!(!0.0f64.shallow_eq(&-0.0));
    }
}
