/// A copy of vec![] that constructs a [`crate::VecSet`].
#[macro_export]
macro_rules! vecset {
    () => {
        $crate::VecSet::new()
    };
    ($($x:expr),+ $(,)?) => {{
        let mut __set = $crate::VecSet::new();
        $( let _ = __set.insert($x); )*
        __set
    }};
}
