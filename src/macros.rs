//! Hook record builder macros
//!
//! Per-node hooks and modules are records of optional callbacks. These
//! macros generate the repetitive `on_xxx` setters and the installed-hook
//! listing used by `Debug`. All macros use `paste` internally for
//! identifier concatenation.

/// Generate `on_xxx` builder setters and an `installed()` listing for a
/// record of `Option<Rc<dyn Fn(..)>>` fields.
///
/// # Generated methods per field:
/// - `on_xxx(self, hook) -> Self` - store `hook` in field `xxx`
/// - `has_xxx(&self) -> bool` - whether the hook is set
///
/// Plus `installed(&self)`, the names of all set hooks in declaration order.
///
/// # Example
/// ```ignore
/// impl<H: Host> NodeHooks<H> {
///     impl_hook_builders! {
///         insert: (&VNode<H>),
///         update: (&VNode<H>, &VNode<H>),
///     }
/// }
/// ```
macro_rules! impl_hook_builders {
    ($($name:ident : ($($arg:ty),* $(,)?)),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Set the `" $name "` hook"]
                #[must_use]
                pub fn [<on_ $name>]<F>(mut self, hook: F) -> Self
                where
                    F: Fn($($arg),*) + 'static,
                {
                    self.$name = Some(::std::rc::Rc::new(hook));
                    self
                }

                #[doc = "Check whether the `" $name "` hook is set"]
                pub fn [<has_ $name>](&self) -> bool {
                    self.$name.is_some()
                }
            )*

            /// Names of the hooks that are set, in declaration order
            pub fn installed(&self) -> ::smallvec::SmallVec<[&'static str; 8]> {
                let mut names = ::smallvec::SmallVec::new();
                $(
                    if self.$name.is_some() {
                        names.push(stringify!($name));
                    }
                )*
                names
            }
        }
    };
}

pub(crate) use impl_hook_builders;
