use serde::de::DeserializeOwned;

/// Conversion of raw request data into a typed slot value.
///
/// This is the type-level half of parameter binding: it classifies a type as
/// body-bound or not and knows how to parse it. Where the raw data comes from
/// is decided by [`ParameterBinder`](super::ParameterBinder).
pub trait BindValue: Sized + Send + 'static {
    /// Whether values of this type are read from the request body by default.
    const BODY_BASED: bool = false;

    /// Parse a route, query or header value. `None` means the value was absent.
    fn parse_value(raw: Option<&str>) -> Option<Self>;

    /// Parse the drained request body.
    ///
    /// Defaults to treating the body as a single UTF-8 value.
    fn parse_body(body: &[u8]) -> Option<Self> {
        Self::parse_value(Some(std::str::from_utf8(body).ok()?))
    }
}

macro_rules! bind_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BindValue for $ty {
                #[inline]
                fn parse_value(raw: Option<&str>) -> Option<Self> {
                    raw?.parse().ok()
                }
            }
        )*
    };
}

bind_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, String,
);

/// Optional slots bind to `None` when the value is absent, and fail when it is
/// present but malformed.
impl<T: BindValue> BindValue for Option<T> {
    const BODY_BASED: bool = T::BODY_BASED;

    fn parse_value(raw: Option<&str>) -> Option<Self> {
        match raw {
            None => Some(None),
            Some(_) => T::parse_value(raw).map(Some),
        }
    }

    fn parse_body(body: &[u8]) -> Option<Self> {
        if body.is_empty() {
            Some(None)
        } else {
            T::parse_body(body).map(Some)
        }
    }
}

/// JSON payload.
///
/// As a parameter type it is body-bound and deserialized with `serde_json`.
/// As a handler result it is serialized to an `application/json` response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: DeserializeOwned + Send + 'static> BindValue for Json<T> {
    const BODY_BASED: bool = true;

    /// A JSON document passed in a route, query or header value.
    fn parse_value(raw: Option<&str>) -> Option<Self> {
        serde_json::from_str(raw?).ok().map(Json)
    }

    fn parse_body(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok().map(Json)
    }
}
