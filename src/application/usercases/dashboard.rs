use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::{
    application::usercases::{UseCaseError, UseCaseResult},
    domain::{
        repositories::{inscriptions::InscriptionRepository, offers::OfferRepository},
        services::aggregation,
        value_objects::dashboard::{
            ALLOWED_PERIODS, DEFAULT_MONTHS, DashboardOverviewDto, StatisticsDto,
            StatisticsQuery,
        },
    },
};

pub struct DashboardUseCase<I, O>
where
    I: InscriptionRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
{
    inscription_repository: Arc<I>,
    offer_repository: Arc<O>,
}

impl<I, O> DashboardUseCase<I, O>
where
    I: InscriptionRepository + Send + Sync + 'static,
    O: OfferRepository + Send + Sync + 'static,
{
    pub fn new(inscription_repository: Arc<I>, offer_repository: Arc<O>) -> Self {
        Self {
            inscription_repository,
            offer_repository,
        }
    }

    pub async fn overview(&self, now: DateTime<Utc>) -> UseCaseResult<DashboardOverviewDto> {
        let records = self.inscription_repository.list_all().await.map_err(|err| {
            error!(db_error = ?err, "dashboard: failed to load inscriptions");
            UseCaseError::Storage(err)
        })?;

        info!(records = records.len(), "dashboard: overview computed");
        Ok(aggregation::dashboard_overview(&records, now))
    }

    pub async fn statistics(
        &self,
        query: StatisticsQuery,
        now: DateTime<Utc>,
    ) -> UseCaseResult<StatisticsDto> {
        let months = query.months.unwrap_or(DEFAULT_MONTHS as u32);
        if !ALLOWED_PERIODS.contains(&months) {
            warn!(months, "dashboard: unsupported statistics period");
            return Err(UseCaseError::validation(format!(
                "months must be one of {ALLOWED_PERIODS:?}"
            )));
        }

        let records = self.inscription_repository.list_all().await.map_err(|err| {
            error!(db_error = ?err, "dashboard: failed to load inscriptions");
            UseCaseError::Storage(err)
        })?;
        let offers = self.offer_repository.list_all().await.map_err(|err| {
            error!(db_error = ?err, "dashboard: failed to load offers");
            UseCaseError::Storage(err)
        })?;

        info!(
            months,
            category = ?query.category,
            records = records.len(),
            "dashboard: statistics computed"
        );
        Ok(aggregation::statistics(
            &records,
            &offers,
            months,
            query.category,
            now,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::domain::{
        entities::{inscriptions::InscriptionEntity, offers::OfferEntity},
        repositories::{inscriptions::MockInscriptionRepository, offers::MockOfferRepository},
        services::subscription_lifecycle::LifecycleError,
        value_objects::enums::categories::Category,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap()
    }

    fn inscription(
        category: Category,
        offer_name: &str,
        month: u32,
        price: i64,
    ) -> InscriptionEntity {
        let start_date = NaiveDate::from_ymd_opt(2024, month, 1).unwrap();
        InscriptionEntity {
            id: Uuid::new_v4(),
            category: category.as_str().to_string(),
            last_name: "Nom".to_string(),
            first_name: "Prenom".to_string(),
            age: 12,
            birth_date: None,
            phone: "20 000 000".to_string(),
            health_notes: None,
            offer_id: None,
            offer_name: offer_name.to_string(),
            duration_months: 1,
            start_date,
            end_date: start_date.checked_add_months(chrono::Months::new(1)).unwrap(),
            total_price: Some(Decimal::from(price)),
            created_at: now(),
            updated_at: now(),
        }
    }

    fn coached_offer() -> OfferEntity {
        OfferEntity {
            id: Uuid::new_v4(),
            name: "Karate".to_string(),
            coach: Some("Karim".to_string()),
            category: Category::Child.as_str().to_string(),
            price: Decimal::from(40),
            description: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn records() -> Vec<InscriptionEntity> {
        vec![
            inscription(Category::Child, "Karate", 3, 40),
            inscription(Category::Child, "Karate", 6, 40),
            inscription(Category::Woman, "Zumba", 5, 60),
            inscription(Category::Adult, "Musculation", 6, 80),
        ]
    }

    #[tokio::test]
    async fn overview_summarises_all_inscriptions() {
        let mut inscription_repo = MockInscriptionRepository::new();
        let offer_repo = MockOfferRepository::new();
        inscription_repo
            .expect_list_all()
            .times(1)
            .returning(|| Ok(records()));

        let usecase = DashboardUseCase::new(Arc::new(inscription_repo), Arc::new(offer_repo));

        let overview = usecase.overview(now()).await.unwrap();

        assert_eq!(overview.categories.child, 2);
        assert_eq!(overview.categories.total, 4);
        assert_eq!(overview.total_revenue, Decimal::from(220));
        assert_eq!(overview.monthly.len(), 3);
        assert_eq!(overview.expirations.expired_count, 2);
    }

    #[tokio::test]
    async fn statistics_default_to_six_months() {
        let mut inscription_repo = MockInscriptionRepository::new();
        let mut offer_repo = MockOfferRepository::new();
        inscription_repo.expect_list_all().returning(|| Ok(records()));
        offer_repo
            .expect_list_all()
            .returning(|| Ok(vec![coached_offer()]));

        let usecase = DashboardUseCase::new(Arc::new(inscription_repo), Arc::new(offer_repo));

        let stats = usecase
            .statistics(StatisticsQuery::default(), now())
            .await
            .unwrap();

        assert_eq!(stats.months, 6);
        assert_eq!(stats.total_clients, 4);
        assert_eq!(stats.total_revenue, Decimal::from(220));
        assert_eq!(stats.coaches.len(), 1);
        assert_eq!(stats.coaches[0].members, 2);
        assert_eq!(stats.coaches[0].revenue, Decimal::from(80));
    }

    #[tokio::test]
    async fn statistics_reject_unknown_period() {
        let mut inscription_repo = MockInscriptionRepository::new();
        let offer_repo = MockOfferRepository::new();
        inscription_repo.expect_list_all().never();

        let usecase = DashboardUseCase::new(Arc::new(inscription_repo), Arc::new(offer_repo));

        let query = StatisticsQuery {
            months: Some(4),
            category: None,
        };
        let result = usecase.statistics(query, now()).await;

        assert!(matches!(
            result,
            Err(UseCaseError::Lifecycle(LifecycleError::Validation(_)))
        ));
    }
}
