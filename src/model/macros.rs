/// Generate `ALL`, `as_str`, `Display`, `From<T> for String`, and
/// `TryFrom<String> for T` for a closed, fieldless enum. Unknown strings
/// return an error.
///
/// The enum must already have its definition with derives. Add
/// `#[serde(into = "String", try_from = "String")]` to the enum to get
/// Serialize/Deserialize through these impls.
macro_rules! string_enum {
    ($name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $str,)+
                }
            }

            /// Position of this variant in [`Self::ALL`].
            pub fn index(&self) -> usize {
                Self::ALL
                    .iter()
                    .position(|v| v == self)
                    .unwrap_or_default()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(v: $name) -> Self {
                v.as_str().to_string()
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                match s.as_str() {
                    $($str => Ok($name::$variant),)+
                    other => Err(format!("unknown {}: {other}", stringify!($name))),
                }
            }
        }
    };
}
