pub mod categories;
pub mod subscription_durations;
pub mod subscription_statuses;
