/// Implements `Zeroize` from a wipe closure, a `Drop` that calls it and the
/// `ZeroizeOnDrop` marker.
///
/// ```ignore
/// zeroize_on_drop!(IbeMasterSecret, |secret| secret.s.zeroize());
/// ```
macro_rules! zeroize_on_drop {
    ($type:ty, |$this:ident| $wipe:expr) => {
        impl zeroize::Zeroize for $type {
            fn zeroize(&mut self) {
                let $this = self;
                $wipe;
                std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
            }
        }

        impl Drop for $type {
            fn drop(&mut self) {
                zeroize::Zeroize::zeroize(self);
            }
        }

        impl zeroize::ZeroizeOnDrop for $type {}
    };
}
