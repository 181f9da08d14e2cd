// Notification preferences, goals and the reminders they drive.
//
// `Notifier` reads and writes through an injected `KeyValueStore` and
// returns `Notification` values. Showing them (desktop toast, terminal
// line, push) is up to the caller.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::store::KeyValueStore;

pub const PREFERENCES_KEY: &str = "activity-tracker-notifications";
pub const LAST_REMINDER_KEY: &str = "activity-tracker-last-reminder";
pub const GOALS_KEY: &str = "activity-tracker-goals";
pub const PERMISSION_KEY: &str = "activity-tracker-permission";

/// Local hour during which the daily activity reminder fires.
pub const REMINDER_HOUR: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub activity_reminders: bool,
    pub weekly_summary: bool,
    pub goal_alerts: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            activity_reminders: true,
            weekly_summary: true,
            goal_alerts: false,
        }
    }
}

impl NotificationPreferences {
    pub fn get(&self, kind: PreferenceKind) -> bool {
        match kind {
            PreferenceKind::ActivityReminders => self.activity_reminders,
            PreferenceKind::WeeklySummary => self.weekly_summary,
            PreferenceKind::GoalAlerts => self.goal_alerts,
        }
    }

    fn set(&mut self, kind: PreferenceKind, enabled: bool) {
        match kind {
            PreferenceKind::ActivityReminders => self.activity_reminders = enabled,
            PreferenceKind::WeeklySummary => self.weekly_summary = enabled,
            PreferenceKind::GoalAlerts => self.goal_alerts = enabled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKind {
    ActivityReminders,
    WeeklySummary,
    GoalAlerts,
}

impl PreferenceKind {
    /// Plural noun used in confirmation messages.
    pub fn describe(&self) -> &'static str {
        match self {
            PreferenceKind::ActivityReminders => "activity reminders",
            PreferenceKind::WeeklySummary => "weekly summaries",
            PreferenceKind::GoalAlerts => "goal alerts",
        }
    }
}

impl FromStr for PreferenceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reminders" | "activity-reminders" => Ok(PreferenceKind::ActivityReminders),
            "summary" | "weekly-summary" => Ok(PreferenceKind::WeeklySummary),
            "goals" | "goal-alerts" => Ok(PreferenceKind::GoalAlerts),
            _ => Err(format!(
                "Unknown preference: {s}. Valid values are: reminders, summary, goals"
            )),
        }
    }
}

/// Whether the user has allowed notifications at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationPermission {
    /// Never asked.
    #[default]
    Default,
    Granted,
    Denied,
}

impl NotificationPermission {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationPermission::Default => "default",
            NotificationPermission::Granted => "granted",
            NotificationPermission::Denied => "denied",
        }
    }
}

impl FromStr for NotificationPermission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(NotificationPermission::Default),
            "granted" | "grant" => Ok(NotificationPermission::Granted),
            "denied" | "deny" => Ok(NotificationPermission::Denied),
            _ => Err(format!(
                "Unknown permission: {s}. Valid values are: granted, denied, default"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Reminder,
    Summary,
    Goal,
    Settings,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotificationKind::Reminder => "reminder",
            NotificationKind::Summary => "summary",
            NotificationKind::Goal => "goal",
            NotificationKind::Settings => "settings",
        };
        write!(f, "{s}")
    }
}

/// A notification ready to be shown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub kind: NotificationKind,
    /// Replaces earlier notifications with the same tag.
    pub tag: String,
    /// Goal alerts stay on screen until dismissed.
    pub require_interaction: bool,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            kind,
            tag: format!("activity-tracker-{kind}"),
            require_interaction: kind == NotificationKind::Goal,
        }
    }
}

/// Targets the user wants to be alerted about. Unset or zero means no goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posts: Option<u64>,
}

/// Current values compared against `Goals`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalSnapshot {
    pub followers: u64,
    pub likes: u64,
    pub posts: u64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WeeklySummary {
    pub followers: u64,
    pub likes: u64,
    pub posts: u64,
    pub engagement_rate: f64,
}

/// Result of changing a preference.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// Enabling needs notification permission first. Nothing was saved.
    PermissionRequired,
    Saved { confirmation: Option<Notification> },
}

/// True during the hour the daily reminder should go out.
pub fn reminder_due(now: NaiveDateTime) -> bool {
    now.hour() == REMINDER_HOUR
}

/// Preference-driven notification logic over an injected store.
pub struct Notifier {
    store: Arc<dyn KeyValueStore>,
    username: Option<String>,
}

impl Notifier {
    pub fn new(store: Arc<dyn KeyValueStore>, username: Option<String>) -> Self {
        Self { store, username }
    }

    pub fn permission(&self) -> Result<NotificationPermission> {
        Ok(self
            .store
            .get(PERMISSION_KEY)?
            .and_then(|s| s.parse().ok())
            .unwrap_or_default())
    }

    pub fn set_permission(&self, permission: NotificationPermission) -> Result<()> {
        self.store.set(PERMISSION_KEY, permission.as_str())
    }

    fn granted(&self) -> Result<bool> {
        Ok(self.permission()? == NotificationPermission::Granted)
    }

    /// Saved preferences, or the defaults when nothing valid is stored.
    pub fn preferences(&self) -> Result<NotificationPreferences> {
        let Some(raw) = self.store.get(PREFERENCES_KEY)? else {
            return Ok(NotificationPreferences::default());
        };
        match serde_json::from_str(&raw) {
            Ok(prefs) => Ok(prefs),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable notification preferences");
                Ok(NotificationPreferences::default())
            }
        }
    }

    /// Turn one notification type on or off.
    ///
    /// Enabling requires granted permission. A successful enable comes back
    /// with a confirmation notification.
    pub fn update_preference(&self, kind: PreferenceKind, enabled: bool) -> Result<UpdateOutcome> {
        let granted = self.granted()?;
        if enabled && !granted {
            return Ok(UpdateOutcome::PermissionRequired);
        }

        let mut prefs = self.preferences()?;
        prefs.set(kind, enabled);
        self.store
            .set(PREFERENCES_KEY, &serde_json::to_string(&prefs)?)?;
        debug!(preference = kind.describe(), enabled, "Updated notification preference");

        let confirmation = enabled.then(|| {
            Notification::new(
                "Notifications Enabled",
                format!("You will now receive {}.", kind.describe()),
                NotificationKind::Settings,
            )
        });
        Ok(UpdateOutcome::Saved { confirmation })
    }

    /// The daily "time to post" reminder, at most once per calendar day.
    pub fn activity_reminder(&self, now: NaiveDateTime) -> Result<Option<Notification>> {
        if !self.preferences()?.activity_reminders || !self.granted()? {
            return Ok(None);
        }

        let today = now.date().to_string();
        if self.store.get(LAST_REMINDER_KEY)?.as_deref() == Some(today.as_str()) {
            return Ok(None);
        }
        self.store.set(LAST_REMINDER_KEY, &today)?;

        let name = self.username.as_deref().unwrap_or("there");
        Ok(Some(Notification::new(
            "Time to Post! 📝",
            format!(
                "Hey {name}! Don't forget to share something with your Farcaster community today."
            ),
            NotificationKind::Reminder,
        )))
    }

    pub fn weekly_summary(&self, summary: &WeeklySummary) -> Result<Option<Notification>> {
        if !self.preferences()?.weekly_summary || !self.granted()? {
            return Ok(None);
        }

        Ok(Some(Notification::new(
            "Your Weekly Summary 📊",
            format!(
                "This week: {} followers, {} likes, {} posts. Engagement rate: {} per cast",
                summary.followers, summary.likes, summary.posts, summary.engagement_rate
            ),
            NotificationKind::Summary,
        )))
    }

    pub fn goals(&self) -> Result<Goals> {
        let Some(raw) = self.store.get(GOALS_KEY)? else {
            return Ok(Goals::default());
        };
        match serde_json::from_str(&raw) {
            Ok(goals) => Ok(goals),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable goals");
                Ok(Goals::default())
            }
        }
    }

    pub fn set_goals(&self, goals: &Goals) -> Result<()> {
        self.store.set(GOALS_KEY, &serde_json::to_string(goals)?)
    }

    /// One alert per goal the snapshot has reached.
    pub fn check_goals(&self, current: &GoalSnapshot) -> Result<Vec<Notification>> {
        if !self.preferences()?.goal_alerts || !self.granted()? {
            return Ok(Vec::new());
        }

        let goals = self.goals()?;
        let checks = [
            ("followers", current.followers, goals.followers),
            ("likes", current.likes, goals.likes),
            ("posts", current.posts, goals.posts),
        ];

        Ok(checks
            .into_iter()
            .filter_map(|(name, achieved, target)| match target {
                Some(t) if t > 0 && achieved >= t => Some(Notification::new(
                    "Goal Achieved! 🎉",
                    format!("Congratulations! You've reached your {name} goal of {t}!"),
                    NotificationKind::Goal,
                )),
                _ => None,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferences_use_camel_case_keys() {
        let json = serde_json::to_string(&NotificationPreferences::default()).unwrap();
        assert_eq!(
            json,
            r#"{"activityReminders":true,"weeklySummary":true,"goalAlerts":false}"#
        );
    }

    #[test]
    fn goal_notifications_require_interaction() {
        let n = Notification::new("t", "b", NotificationKind::Goal);
        assert!(n.require_interaction);
        assert_eq!(n.tag, "activity-tracker-goal");
        assert!(!Notification::new("t", "b", NotificationKind::Reminder).require_interaction);
    }

    #[test]
    fn parses_preference_names() {
        assert_eq!("goals".parse::<PreferenceKind>(), Ok(PreferenceKind::GoalAlerts));
        assert!("bogus".parse::<PreferenceKind>().is_err());
    }
}
