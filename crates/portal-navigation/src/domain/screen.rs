//! Screen view models.
//!
//! A [`Screen`] is the complete, self-contained result of one render: it
//! replaces whatever was shown before.

use portal_progression::domain::progression::StageProgress;
use serde::Serialize;

use super::route::Route;

/// The two-part page header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Page title.
    pub title: String,
    /// Page subtitle.
    pub subtitle: String,
}

impl Header {
    /// Builds a header.
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }
}

/// Emphasis of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Neutral information.
    Info,
    /// Something is complete.
    Success,
    /// Something needs attention.
    Warning,
}

/// A checklist row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    /// Step or item id.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Completion flag.
    pub done: bool,
}

/// A label/value row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detail {
    /// Row label.
    pub label: String,
    /// Row value.
    pub value: String,
}

impl Detail {
    /// Builds a row.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One selectable shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftOption {
    /// Stored choice value.
    pub choice: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Working hours.
    pub hours: &'static str,
    /// Whether this is the current choice.
    pub selected: bool,
}

/// A contact card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactCard {
    /// Role label.
    pub role: &'static str,
    /// Name.
    pub name: String,
    /// Phone number.
    pub phone: String,
    /// Email address.
    pub email: String,
}

/// An inbox row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InboxItem {
    /// Notification id.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Message text.
    pub body: String,
    /// Call-to-action label.
    pub action: String,
    /// The screen the call to action opens.
    pub route: Route,
}

/// A link to another screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Link text.
    pub label: String,
    /// Target screen.
    pub route: Route,
}

impl Link {
    /// Builds a link.
    pub fn new(label: impl Into<String>, route: Route) -> Self {
        Self {
            label: label.into(),
            route,
        }
    }
}

/// One piece of screen content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// A short message.
    Notice {
        /// Emphasis.
        tone: Tone,
        /// Message text.
        text: String,
    },
    /// A list of items with completion flags.
    Checklist {
        /// Rows.
        items: Vec<ChecklistItem>,
    },
    /// Label/value rows.
    Details {
        /// Rows.
        rows: Vec<Detail>,
    },
    /// The shift picker.
    ShiftOptions {
        /// Options in display order.
        options: Vec<ShiftOption>,
        /// Whether the current choice is confirmed.
        confirmed: bool,
    },
    /// Contact cards.
    ContactCards {
        /// Cards in role order.
        cards: Vec<ContactCard>,
    },
    /// Notification list.
    Inbox {
        /// Rows in stored order.
        items: Vec<InboxItem>,
    },
    /// Links to other screens.
    Links {
        /// Links in display order.
        links: Vec<Link>,
    },
}

impl Block {
    /// Builds a notice.
    pub fn notice(tone: Tone, text: impl Into<String>) -> Self {
        Self::Notice {
            tone,
            text: text.into(),
        }
    }
}

/// An action the screen accepts, with whether its control is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionSlot {
    /// Wire name of the action.
    pub action: &'static str,
    /// Control label.
    pub label: String,
    /// Whether the control can be used right now.
    pub enabled: bool,
    /// The step id or shift choice the control is bound to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<&'static str>,
}

/// A fully rendered screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Screen {
    /// The route that was rendered.
    pub route: Route,
    /// Page header.
    pub header: Header,
    /// Stage indicator, re-derived on every render.
    pub stages: Vec<StageProgress>,
    /// Body content.
    pub body: Vec<Block>,
    /// Actions the screen accepts.
    pub actions: Vec<ActionSlot>,
}

impl Screen {
    /// The slot for `action` bound to `target`, if the screen offers one.
    #[must_use]
    pub fn action(&self, action: &str, target: Option<&str>) -> Option<&ActionSlot> {
        self.actions
            .iter()
            .find(|slot| slot.action == action && slot.target == target)
    }
}
