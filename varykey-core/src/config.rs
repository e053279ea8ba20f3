use serde::{Deserialize, Serialize};

use crate::{Axis, ConfigError, KeyComposer};

/// Declarative composer settings, e.g. loaded from a site's configuration file.
///
/// Axes are written by their key tag or name (`"lang"`, `"device"`, `"qs"`...).
/// Leaving `order` out keeps [`Axis::DEFAULT_ORDER`].
///
/// # Examples
///
/// ```
/// use varykey_core::{Axis, ComposerConfig, KeyComposer};
///
/// let config: ComposerConfig = serde_json::from_str(r#"{ "name": "intranet" }"#).unwrap();
/// let composer = KeyComposer::from_config(&config).unwrap();
///
/// assert_eq!(composer.name(), Some("intranet"));
/// assert_eq!(composer.order(), &Axis::DEFAULT_ORDER);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComposerConfig {
    pub name: Option<String>,
    pub order: Option<Vec<Axis>>,
}

impl KeyComposer {
    /// Builds a composer with default resolvers from `config`.
    pub fn from_config(config: &ComposerConfig) -> Result<Self, ConfigError> {
        let mut builder = KeyComposer::builder();
        if let Some(name) = &config.name {
            builder = builder.name(name.clone());
        }
        if let Some(order) = &config.order {
            builder = builder.order(order.iter().copied());
        }
        builder.build()
    }
}
