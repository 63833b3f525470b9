//! Engine configuration shared by the task, team and statistics services.

/// Tunable behaviour of the services.
///
/// # Examples
///
/// ```
/// use teamboard::config::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert!(config.enforce_assignee_membership);
/// assert_eq!(config.statistics_window_days, 7);
///
/// let legacy = EngineConfig::legacy();
/// assert!(!legacy.enforce_assignee_membership);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of calendar days covered by the rolling statistics series,
    /// today included.
    pub statistics_window_days: u32,
    /// Whether a task assignee must be a member of the owning team.
    pub enforce_assignee_membership: bool,
    /// Display name reported for users the directory cannot resolve.
    pub unknown_user_name: String,
    /// Email reported for users the directory cannot resolve.
    pub unknown_user_email: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            statistics_window_days: 7,
            enforce_assignee_membership: true,
            unknown_user_name: "Unknown User".to_owned(),
            unknown_user_email: "unknown@example.com".to_owned(),
        }
    }
}

impl EngineConfig {
    /// Creates a configuration matching the permissive legacy behaviour,
    /// where assignees are not checked against team membership.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            enforce_assignee_membership: false,
            ..Self::default()
        }
    }

    /// Sets the statistics window length. Zero is clamped to one day.
    #[must_use]
    pub fn with_statistics_window_days(mut self, days: u32) -> Self {
        self.statistics_window_days = days.max(1);
        self
    }
}
