//! Application Configuration

use crate::domain::calendar::Calendar;
use crate::domain::entity::BadgeDefinition;

/// Habit application configuration
#[derive(Debug, Clone)]
pub struct HabitConfig {
    /// Where calendar days begin and end
    pub calendar: Calendar,
    /// Badge set created for every new account
    pub badges: Vec<BadgeDefinition>,
}

impl Default for HabitConfig {
    fn default() -> Self {
        Self {
            calendar: Calendar::Local,
            badges: default_badges(),
        }
    }
}

/// The stock badge catalogue: 1, 7, 21 and 100 days
pub fn default_badges() -> Vec<BadgeDefinition> {
    vec![
        BadgeDefinition::new("初出茅庐", "完成第一次打卡", "🌱", 1),
        BadgeDefinition::new("坚持不懈", "累计打卡7天", "🔥", 7),
        BadgeDefinition::new("习惯养成", "累计打卡21天", "⭐", 21),
        BadgeDefinition::new("自律大师", "累计打卡100天", "👑", 100),
    ]
}
