//! Navigation tokens.

use std::fmt;

use serde::{Serialize, Serializer};

/// The ten screens of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Overview of all stages and steps.
    Progress,
    /// Application status.
    Application,
    /// Shift choice and confirmation.
    Shift,
    /// Document readiness.
    Docs,
    /// Appointment details.
    Appointment,
    /// First-day preparation.
    FirstDay,
    /// Contact people.
    Contacts,
    /// Notifications.
    Inbox,
    /// Account details.
    Profile,
    /// Frequently asked questions.
    Help,
}

impl Route {
    /// Every route, in menu order.
    pub const ALL: [Self; 10] = [
        Self::Progress,
        Self::Application,
        Self::Shift,
        Self::Docs,
        Self::Appointment,
        Self::FirstDay,
        Self::Contacts,
        Self::Inbox,
        Self::Profile,
        Self::Help,
    ];

    /// Where absent and unknown tokens lead.
    pub const DEFAULT: Self = Self::Progress;

    /// The navigation token of the route.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Progress => "progress",
            Self::Application => "application",
            Self::Shift => "shift",
            Self::Docs => "docs",
            Self::Appointment => "appointment",
            Self::FirstDay => "first-day",
            Self::Contacts => "contacts",
            Self::Inbox => "inbox",
            Self::Profile => "profile",
            Self::Help => "help",
        }
    }

    /// Exact-match lookup of a navigation token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.token() == token)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

/// The outcome of resolving a navigation token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The token names a screen (an absent token names the default screen).
    Matched(Route),
    /// The token is unknown; navigate to `to` instead. `to` is always a
    /// matched route, so following a redirect never redirects again.
    Redirect {
        /// The unrecognized token.
        from: String,
        /// The route to navigate to.
        to: Route,
    },
}

impl Resolution {
    /// The route that ends up rendered.
    #[must_use]
    pub fn route(&self) -> Route {
        match self {
            Self::Matched(route) | Self::Redirect { to: route, .. } => *route,
        }
    }
}

/// Resolves a raw navigation token.
#[must_use]
pub fn resolve(token: Option<&str>) -> Resolution {
    match token.map(str::trim).filter(|t| !t.is_empty()) {
        None => Resolution::Matched(Route::DEFAULT),
        Some(token) => Route::from_token(token).map_or_else(
            || Resolution::Redirect {
                from: token.to_owned(),
                to: Route::DEFAULT,
            },
            Resolution::Matched,
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_every_token_resolves_to_its_route() {
        for route in Route::ALL {
            assert_eq!(resolve(Some(route.token())), Resolution::Matched(route));
        }
    }

    #[test]
    fn test_tokens_are_unique() {
        let tokens: HashSet<&str> = Route::ALL.iter().map(|r| r.token()).collect();
        assert_eq!(tokens.len(), Route::ALL.len());
    }

    #[test]
    fn test_absent_or_blank_token_is_default_without_redirect() {
        assert_eq!(resolve(None), Resolution::Matched(Route::Progress));
        assert_eq!(resolve(Some("  ")), Resolution::Matched(Route::Progress));
    }

    #[test]
    fn test_unknown_token_redirects_once_to_default() {
        let resolution = resolve(Some("payroll"));

        assert_eq!(
            resolution,
            Resolution::Redirect {
                from: "payroll".into(),
                to: Route::Progress
            }
        );
        assert_eq!(
            resolve(Some(resolution.route().token())),
            Resolution::Matched(Route::Progress)
        );
    }

    #[test]
    fn test_tokens_match_exactly() {
        assert!(matches!(resolve(Some("Shift")), Resolution::Redirect { .. }));
        assert!(matches!(resolve(Some("first_day")), Resolution::Redirect { .. }));
    }
}
