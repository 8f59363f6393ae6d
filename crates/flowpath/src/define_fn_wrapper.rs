// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Generates a clonable, thread-safe wrapper around a user-provided closure.
///
/// The wrapper stores the closure in an `Arc<dyn Fn...>` so options holding callbacks stay
/// cheap to clone and can be shared across tasks.
///
/// # Syntax
///
/// ```rust,ignore
/// define_fn_wrapper!(RetryIf(Fn(error: &Error) -> bool));
/// define_fn_wrapper!(OnProgress<R>(Fn(args: ProgressArgs<'_, R>)));
/// ```
///
/// The generated type has:
/// - `new<F>(callback: F) -> Self` where `F: Fn(...) + Send + Sync + 'static`
/// - `call(&self, args...) -> ReturnType` to invoke the wrapped closure
/// - `Clone` and `Debug` implementations
macro_rules! define_fn_wrapper {
    ($name:ident$(<$($generics:ident),*>)?(Fn($($param_name:ident: $param_ty:ty),*) -> $return_ty:ty)) => {
        pub(crate) struct $name$(<$($generics),*>)?(std::sync::Arc<dyn Fn($($param_ty),*) -> $return_ty + Send + Sync>);

        impl$(<$($generics),*>)? $name$(<$($generics),*>)? {
            pub(crate) fn new<F>(callback: F) -> Self
            where
                F: Fn($($param_ty),*) -> $return_ty + Send + Sync + 'static,
            {
                Self(std::sync::Arc::new(callback))
            }

            pub(crate) fn call(&self, $($param_name: $param_ty),*) -> $return_ty {
                (self.0)($($param_name),*)
            }
        }

        impl$(<$($generics),*>)? Clone for $name$(<$($generics),*>)? {
            fn clone(&self) -> Self {
                Self(std::sync::Arc::clone(&self.0))
            }
        }

        impl$(<$($generics),*>)? std::fmt::Debug for $name$(<$($generics),*>)? {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name)).finish()
            }
        }
    };

    // Without a return type the closure returns unit.
    ($name:ident$(<$($generics:ident),*>)?(Fn($($param_name:ident: $param_ty:ty),*))) => {
        $crate::define_fn_wrapper!($name$(<$($generics),*>)?(Fn($($param_name: $param_ty),*) -> ()));
    };
}

pub(crate) use define_fn_wrapper;

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::fmt::Debug;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    define_fn_wrapper!(InOut<In, Out>(Fn(input: &In) -> Out));
    define_fn_wrapper!(Notify(Fn(value: u32)));

    #[test]
    fn static_assertions() {
        static_assertions::assert_impl_all!(InOut<String, String>: Send, Sync, Debug, Clone);
        static_assertions::assert_impl_all!(Notify: Send, Sync, Debug, Clone);
    }

    #[test]
    fn call_ok() {
        let wrapper = InOut::new(|input: &String| input.len());

        assert_eq!(wrapper.call(&"hello".to_string()), 5);
        assert_eq!(wrapper.clone().call(&"hi".to_string()), 2);
    }

    #[test]
    fn unit_wrapper_invokes_closure() {
        let total = Arc::new(AtomicU32::new(0));
        let total_clone = Arc::clone(&total);
        let wrapper = Notify::new(move |value| {
            total_clone.fetch_add(value, Ordering::SeqCst);
        });

        wrapper.call(3);
        wrapper.call(4);

        assert_eq!(total.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn debug_ok() {
        let wrapper = Notify::new(|_| {});

        assert_eq!(format!("{wrapper:?}"), "Notify");
    }
}
