/// Constructors for single-field `String` newtypes: `new` from anything
/// string-like and `From<&str>` next to the derived `From<String>`.
#[macro_export]
macro_rules! impl_string_newtype {
    ($($name:ident),+ $(,)?) => {
        $(
            impl $name {
                pub fn new(s: impl Into<String>) -> Self {
                    Self(s.into())
                }
            }

            impl From<&str> for $name {
                fn from(s: &str) -> Self {
                    Self::new(s)
                }
            }
        )+
    };
}
