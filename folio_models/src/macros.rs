macro_rules! nutype_string {
    ($(#[$meta:meta])* $ident:ident $(( $($args:tt)* ))?) => {
        #[::nutype::nutype(
            $($($args)*,)?
            derive(
                Debug,
                Clone,
                PartialEq,
                Eq,
                Deref,
                From,
                AsRef,
                Display,
                Serialize,
                Deserialize
            )
        )]
        $(#[$meta])*
        pub struct $ident(String);
    };
}

pub(crate) use nutype_string;
