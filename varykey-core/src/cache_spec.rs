use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// The set of vary-by flags carried by a renderable unit.
///
/// Each flag switches one gated axis on. Flags are independent and any
/// combination is legal. The order in which flags are set has no effect on
/// the composed key: segments are always placed in the composer's fixed
/// axis order.
///
/// # Examples
///
/// ```
/// use varykey_core::CacheSpec;
///
/// let spec = CacheSpec::none().with_user(true).with_device(true);
/// assert!(spec.vary_by_device);
/// assert!(spec.vary_by_user);
/// assert!(!spec.vary_by_data);
///
/// // Parsing from a flag list
/// let parsed: CacheSpec = "device | user".parse().unwrap();
/// assert_eq!(parsed, spec);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSpec {
    pub vary_by_data: bool,
    pub vary_by_device: bool,
    pub vary_by_login: bool,
    pub vary_by_user: bool,
    pub vary_by_parameters: bool,
    pub vary_by_query_string: bool,
}

impl CacheSpec {
    /// No gated axis enabled. Keys still carry language and area.
    pub const fn none() -> Self {
        Self {
            vary_by_data: false,
            vary_by_device: false,
            vary_by_login: false,
            vary_by_user: false,
            vary_by_parameters: false,
            vary_by_query_string: false,
        }
    }

    /// Every gated axis enabled.
    pub const fn all() -> Self {
        Self {
            vary_by_data: true,
            vary_by_device: true,
            vary_by_login: true,
            vary_by_user: true,
            vary_by_parameters: true,
            vary_by_query_string: true,
        }
    }

    pub const fn with_data(mut self, on: bool) -> Self {
        self.vary_by_data = on;
        self
    }

    pub const fn with_device(mut self, on: bool) -> Self {
        self.vary_by_device = on;
        self
    }

    pub const fn with_login(mut self, on: bool) -> Self {
        self.vary_by_login = on;
        self
    }

    pub const fn with_user(mut self, on: bool) -> Self {
        self.vary_by_user = on;
        self
    }

    pub const fn with_parameters(mut self, on: bool) -> Self {
        self.vary_by_parameters = on;
        self
    }

    pub const fn with_query_string(mut self, on: bool) -> Self {
        self.vary_by_query_string = on;
        self
    }

    /// Returns true if no gated axis is enabled.
    pub fn is_empty(&self) -> bool {
        *self == Self::none()
    }
}

/// Parses a flag list such as `"data|device"` or `"login, user"`.
///
/// Flags are case-insensitive and may be separated by `|`, `,` or
/// whitespace. Each flag accepts its axis tag (`dev`), its axis name
/// (`device`) or the `VaryBy` form (`VaryByDevice`). The empty string
/// parses to [`CacheSpec::none`].
impl FromStr for CacheSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut spec = CacheSpec::none();

        for raw in s.split(|c: char| c == '|' || c == ',' || c.is_whitespace()) {
            if raw.is_empty() {
                continue;
            }

            let flag = raw.to_ascii_lowercase();
            let flag = flag.strip_prefix("varyby").unwrap_or(&flag);
            let flag = flag.strip_prefix("vary_by_").unwrap_or(flag);

            match flag {
                "data" => spec.vary_by_data = true,
                "dev" | "device" => spec.vary_by_device = true,
                "login" => spec.vary_by_login = true,
                "user" => spec.vary_by_user = true,
                "parm" | "params" | "parameters" => spec.vary_by_parameters = true,
                "qs" | "querystring" | "query_string" => spec.vary_by_query_string = true,
                _ => return Err(ConfigError::UnknownFlag(raw.to_string())),
            }
        }

        Ok(spec)
    }
}
