use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CacheSpec, ConfigError};

/// One vary-by dimension of a cache key.
///
/// Every axis contributes at most one tagged segment, `"_#<tag>:<value>"`,
/// to the composed key.
///
/// # Variants
///
/// * `Language` - Current language, always part of the key
/// * `Area` - Route area, always part of the key when the route carries one
/// * `Data` - Identity of the data item bound to the unit
/// * `Device` - Resolved device name
/// * `Login` - Whether the visitor is authenticated
/// * `User` - Visitor's user name
/// * `Parameters` - Invocation parameters of the unit
/// * `QueryString` - Query string of the active request
///
/// # Compatibility
///
/// The tag of every axis and the position of every axis in
/// [`Axis::DEFAULT_ORDER`] are part of the identity of every key ever
/// produced. Changing either makes old and new keys for the same variant
/// differ, which silently invalidates the whole output cache.
///
/// # Examples
///
/// ```
/// use varykey_core::Axis;
///
/// assert_eq!(Axis::Device.tag(), "dev");
///
/// let axis: Axis = "parm".parse().unwrap();
/// assert_eq!(axis, Axis::Parameters);
///
/// let axis: Axis = "QueryString".parse().unwrap();
/// assert_eq!(axis, Axis::QueryString);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Axis {
    Language,
    Area,
    Data,
    Device,
    Login,
    User,
    Parameters,
    QueryString,
}

impl Axis {
    /// The composition order used unless a composer is explicitly reordered.
    pub const DEFAULT_ORDER: [Axis; 8] = [
        Axis::Language,
        Axis::Area,
        Axis::Data,
        Axis::Device,
        Axis::Login,
        Axis::User,
        Axis::Parameters,
        Axis::QueryString,
    ];

    /// Tag written between `_#` and `:` in the key.
    pub const fn tag(self) -> &'static str {
        match self {
            Axis::Language => "lang",
            Axis::Area => "area",
            Axis::Data => "data",
            Axis::Device => "dev",
            Axis::Login => "login",
            Axis::User => "user",
            Axis::Parameters => "parm",
            Axis::QueryString => "qs",
        }
    }

    /// Returns true if this axis contributes to a key for the given spec.
    ///
    /// Language and area are not gated by a flag; the other six axes are.
    ///
    /// ```
    /// use varykey_core::{Axis, CacheSpec};
    ///
    /// let spec = CacheSpec::none().with_device(true);
    /// assert!(Axis::Language.is_enabled(&spec));
    /// assert!(Axis::Device.is_enabled(&spec));
    /// assert!(!Axis::User.is_enabled(&spec));
    /// ```
    pub fn is_enabled(self, spec: &CacheSpec) -> bool {
        match self {
            Axis::Language | Axis::Area => true,
            Axis::Data => spec.vary_by_data,
            Axis::Device => spec.vary_by_device,
            Axis::Login => spec.vary_by_login,
            Axis::User => spec.vary_by_user,
            Axis::Parameters => spec.vary_by_parameters,
            Axis::QueryString => spec.vary_by_query_string,
        }
    }

    /// Position of this axis in [`Axis::DEFAULT_ORDER`].
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Parses either the key tag (`"dev"`) or the axis name (`"device"`),
/// case-insensitively.
impl FromStr for Axis {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lang" | "language" => Ok(Axis::Language),
            "area" => Ok(Axis::Area),
            "data" => Ok(Axis::Data),
            "dev" | "device" => Ok(Axis::Device),
            "login" => Ok(Axis::Login),
            "user" => Ok(Axis::User),
            "parm" | "parameters" | "params" => Ok(Axis::Parameters),
            "qs" | "querystring" | "query_string" => Ok(Axis::QueryString),
            _ => Err(ConfigError::UnknownAxis(s.to_string())),
        }
    }
}

impl TryFrom<String> for Axis {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Axis> for &'static str {
    fn from(axis: Axis) -> Self {
        axis.tag()
    }
}
