use serde::Serialize;

/// Counts shared by every dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub contacts_count: i64,
    pub companies_count: i64,
}

/// Landing page figures for a regular user. Recomputed on every request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserDashboardStats {
    #[serde(flatten)]
    pub base: DashboardStats,
    pub favorites_count: i64,
    pub upcoming_birthdays: i64,
    /// Size of the look-ahead window the birthday count was computed over.
    pub birthday_window_days: i64,
}

/// Admin panel figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AdminDashboardStats {
    #[serde(flatten)]
    pub base: DashboardStats,
    pub users_count: i64,
}
