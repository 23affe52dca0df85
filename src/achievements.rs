//! Achievement catalog.
//!
//! Mutation responses name unlocked achievements by key; the catalog maps
//! those keys to the display strings the service's gallery uses, so the
//! celebration toast can show "First entry 🏁" instead of `first_entry`.

pub struct Achievement {
    pub key: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub blurb: &'static str,
}

const fn row(
    key: &'static str,
    title: &'static str,
    icon: &'static str,
    blurb: &'static str,
) -> Achievement {
    Achievement {
        key,
        title,
        icon,
        blurb,
    }
}

pub const CATALOG: &[Achievement] = &[
    row("first_entry", "First entry", "🏁", "Log your first weight."),
    row("first_week", "First week", "🗓️", "7 logs total."),
    row("streak_3", "On a roll (3)", "🔥", "3-day streak."),
    row("streak_7", "Streak legend (7)", "⚡", "7-day streak."),
    row("streak_14", "Two weeks!", "🏅", "14-day streak."),
    row("streak_30", "Month machine", "💪", "30-day streak."),
    row("early_bird", "Early bird", "🌅", "Logged before 08:00 three times."),
    row("night_owl", "Night owl", "🌙", "Logged after 22:00 three times."),
    row("first_kilo_lost", "First kilo down", "📉", "Lost ≥1 kg since start."),
    row("five_kilos_lost", "High five", "🖐️", "Lost ≥5 kg since start."),
    row("goal_halfway", "Halfway hero", "🚀", "Halfway to goal."),
    row("goal_crusher", "Goal crusher", "👑", "Reached goal!"),
    row("weekend_warrior", "Weekend warrior", "🛡️", "Sat & Sun logs, 3 weekends in a row."),
    row("comeback_kid", "Comeback kid", "🔁", "Return after 7+ day gap."),
    row("consistency_queen", "Consistency queen", "👑", "20 logs in 30 days."),
    row("hydration_hero", "Hydration hero", "💧", "10 consecutive logs (now drink water)."),
    row("graph_gazer", "Graph gazer", "📊", "Opened dashboard 20 times."),
    row("data_ninja", "Data ninja", "🥷", "Edited entries 5+ times."),
    row("share_the_wins", "Share the wins", "📤", "Exported your data."),
    row("clean_sheet", "Clean sheet", "🧼", "Logged every day for a calendar month."),
    row("new_month_new_me", "New month, new me", "🆕", "First log of a month for 3 months."),
    row("bounce_back", "Bounce back", "🧠", "After +2 kg uptick, logged next day."),
    row("plateau_breaker", "Plateau breaker", "🪨", "14 days flat then drop ≥0.5 kg."),
];

pub fn find(key: &str) -> Option<&'static Achievement> {
    CATALOG.iter().find(|a| a.key == key)
}

/// Display form for toasts: title plus icon, or the raw key when the
/// service sends one the catalog does not know.
pub fn display_name(key: &str) -> String {
    match find(key) {
        Some(a) => format!("{} {}", a.title, a.icon),
        None => key.to_string(),
    }
}
