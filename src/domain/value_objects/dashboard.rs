use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{enums::categories::Category, inscriptions::InscriptionDto};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Juin", "Juil", "Août", "Sep", "Oct", "Nov", "Déc",
];

pub const DASHBOARD_LIST_LIMIT: usize = 5;
pub const RECENT_LIMIT: usize = 5;
pub const DEFAULT_MONTHS: usize = 6;
pub const ALLOWED_PERIODS: [u32; 4] = [1, 3, 6, 12];

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct CategoryCounts {
    pub child: usize,
    pub woman: usize,
    pub adult: usize,
    pub total: usize,
}

impl CategoryCounts {
    pub fn add(&mut self, category: Option<Category>) {
        match category {
            Some(Category::Child) => self.child += 1,
            Some(Category::Woman) => self.woman += 1,
            Some(Category::Adult) => self.adult += 1,
            None => {}
        }
        self.total += 1;
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub revenue: Decimal,
    pub inscriptions: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OfferingRollup {
    pub offering: String,
    pub members: usize,
    pub revenue: Decimal,
    pub average_per_member: Decimal,
    pub child: usize,
    pub woman: usize,
    pub adult: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CoachRollup {
    pub coach: String,
    pub members: usize,
    pub revenue: Decimal,
    pub average_per_member: Decimal,
    pub offerings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExpirationOverview {
    pub expired: Vec<InscriptionDto>,
    pub expiring_soon: Vec<InscriptionDto>,
    pub expired_count: usize,
    pub expiring_soon_count: usize,
    pub expired_by_category: CategoryCounts,
    pub expiring_soon_by_category: CategoryCounts,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardOverviewDto {
    pub categories: CategoryCounts,
    pub active_count: usize,
    pub total_revenue: Decimal,
    pub monthly: Vec<MonthlyBucket>,
    pub recent: Vec<InscriptionDto>,
    pub expirations: ExpirationOverview,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatisticsQuery {
    pub months: Option<u32>,
    pub category: Option<Category>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatisticsDto {
    pub months: u32,
    pub category: Option<Category>,
    pub monthly: Vec<MonthlyBucket>,
    pub categories: CategoryCounts,
    pub offerings: Vec<OfferingRollup>,
    pub coaches: Vec<CoachRollup>,
    pub expirations: ExpirationOverview,
    pub total_clients: usize,
    pub total_revenue: Decimal,
    pub average_monthly_revenue: Decimal,
}
