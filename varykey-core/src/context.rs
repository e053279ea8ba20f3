//! Request-scoped facts read by the composer.
//!
//! The host resolves language, route area, device, identity and query string
//! and hands them to the composer explicitly. Nothing here reads ambient or
//! process-wide state.

use std::borrow::Cow;

/// Read-only access to the request facts the vary-by axes depend on.
///
/// The composer only calls the methods of axes that are enabled for the unit
/// being keyed, so an implementation may resolve each fact lazily.
///
/// # Host contract
///
/// * `language` is expected to be non-empty
/// * `device_name` always yields a name (the default device when nothing matched)
/// * `user_name` always yields a name (the anonymous user when unauthenticated)
/// * `query_string` is `None` when no site or request is active
pub trait VarySource {
    fn language(&self) -> Cow<'_, str>;

    fn route_area(&self) -> Option<Cow<'_, str>>;

    fn device_name(&self) -> Cow<'_, str>;

    fn is_logged_in(&self) -> bool;

    fn user_name(&self) -> Cow<'_, str>;

    fn query_string(&self) -> Option<Cow<'_, [(String, String)]>>;
}

/// An owned snapshot of request facts, built once per request by the host.
///
/// # Examples
///
/// ```
/// use varykey_core::{VaryContext, VarySource};
///
/// let ctx = VaryContext::new("en")
///     .with_device("Default")
///     .with_query_pair("page", "2");
///
/// assert_eq!(ctx.language(), "en");
/// assert!(!ctx.is_logged_in());
/// assert_eq!(ctx.query_string().unwrap().len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VaryContext {
    pub language: String,
    pub route_area: Option<String>,
    pub device_name: String,
    pub is_logged_in: bool,
    pub user_name: String,
    pub query_string: Option<Vec<(String, String)>>,
}

impl VaryContext {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.route_area = Some(area.into());
        self
    }

    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device_name = device.into();
        self
    }

    /// Marks the visitor as authenticated under the given user name.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user_name = user.into();
        self.is_logged_in = true;
        self
    }

    /// Sets the user name without changing the login state.
    pub fn with_user_name(mut self, user: impl Into<String>) -> Self {
        self.user_name = user.into();
        self
    }

    pub fn with_logged_in(mut self, logged_in: bool) -> Self {
        self.is_logged_in = logged_in;
        self
    }

    /// Appends one pair to the query string, activating it if absent.
    pub fn with_query_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string
            .get_or_insert_with(Vec::new)
            .push((key.into(), value.into()));
        self
    }

    pub fn with_query_string(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query_string = Some(pairs);
        self
    }
}

impl VarySource for VaryContext {
    fn language(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.language)
    }

    fn route_area(&self) -> Option<Cow<'_, str>> {
        self.route_area.as_deref().map(Cow::Borrowed)
    }

    fn device_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.device_name)
    }

    fn is_logged_in(&self) -> bool {
        self.is_logged_in
    }

    fn user_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.user_name)
    }

    fn query_string(&self) -> Option<Cow<'_, [(String, String)]>> {
        self.query_string.as_deref().map(Cow::Borrowed)
    }
}
