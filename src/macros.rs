#[macro_export]
macro_rules! growvec {
    () => {
        $crate::GrowVec::new()
    };

    ($capacity:expr, [$($elem:expr),*$(,)?]) => {{
        let mut __v__ = $crate::GrowVec::with_capacity($capacity);
        $(
            __v__.push($elem);
        )*
        __v__
    }};

    ($elem:expr ; $len:expr) => {{
        let mut __v__ = $crate::GrowVec::with_capacity($len);
        for _ in 0 .. $len {
            __v__.push(::std::clone::Clone::clone(&$elem));
        }
        __v__
    }};

    // this is last because everything can match this
    ($($elem:expr),+$(,)?) => {{
        $crate::GrowVec::from(::std::vec![$($elem),*])
    }};
}
