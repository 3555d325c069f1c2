pub mod aggregation;
pub mod subscription_lifecycle;
