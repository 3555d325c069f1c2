//! Read-only reporting views over the full set of inscriptions.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{
    entities::{inscriptions::InscriptionEntity, offers::OfferEntity},
    services::subscription_lifecycle,
    value_objects::{
        dashboard::{
            CategoryCounts, CoachRollup, DASHBOARD_LIST_LIMIT, DEFAULT_MONTHS,
            DashboardOverviewDto, ExpirationOverview, MONTH_LABELS, MonthlyBucket,
            OfferingRollup, RECENT_LIMIT, StatisticsDto,
        },
        enums::{categories::Category, subscription_statuses::SubscriptionStatus},
        inscriptions::{InscriptionDto, InscriptionFilter},
    },
};

/// Stored price, with missing prices counted as zero.
pub fn price_of(record: &InscriptionEntity) -> Decimal {
    record.total_price.unwrap_or(Decimal::ZERO)
}

pub fn total_revenue(records: &[InscriptionEntity]) -> Decimal {
    records.iter().map(price_of).sum()
}

pub fn count_by_category(records: &[InscriptionEntity]) -> CategoryCounts {
    let mut counts = CategoryCounts::default();
    for record in records {
        counts.add(record.category());
    }
    counts
}

fn average_per_member(revenue: Decimal, members: usize) -> Decimal {
    if members == 0 {
        return Decimal::ZERO;
    }
    (revenue / Decimal::from(members))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

pub fn active_count(records: &[InscriptionEntity], now: DateTime<Utc>) -> usize {
    records
        .iter()
        .filter(|record| {
            subscription_lifecycle::classify(record.end_date, now) != SubscriptionStatus::Expired
        })
        .count()
}

/// Expired list is ordered latest end date first, expiring-soon list soonest first.
/// `limit` caps the lists only; the counts always cover every record.
pub fn expiration_overview(
    records: &[InscriptionEntity],
    now: DateTime<Utc>,
    limit: Option<usize>,
) -> ExpirationOverview {
    let mut expired: Vec<&InscriptionEntity> = Vec::new();
    let mut expiring_soon: Vec<&InscriptionEntity> = Vec::new();
    let mut expired_by_category = CategoryCounts::default();
    let mut expiring_soon_by_category = CategoryCounts::default();

    for record in records {
        match subscription_lifecycle::classify(record.end_date, now) {
            SubscriptionStatus::Expired => {
                expired_by_category.add(record.category());
                expired.push(record);
            }
            SubscriptionStatus::ExpiringSoon => {
                expiring_soon_by_category.add(record.category());
                expiring_soon.push(record);
            }
            SubscriptionStatus::Active => {}
        }
    }

    expired.sort_by(|a, b| b.end_date.cmp(&a.end_date));
    expiring_soon.sort_by(|a, b| a.end_date.cmp(&b.end_date));

    let limit = limit.unwrap_or(usize::MAX);
    let to_dtos = |list: &[&InscriptionEntity]| -> Vec<InscriptionDto> {
        list.iter()
            .take(limit)
            .map(|record| InscriptionDto::from_entity((*record).clone(), now))
            .collect()
    };

    ExpirationOverview {
        expired: to_dtos(&expired),
        expiring_soon: to_dtos(&expiring_soon),
        expired_count: expired.len(),
        expiring_soon_count: expiring_soon.len(),
        expired_by_category,
        expiring_soon_by_category,
    }
}

/// Revenue and enrolment count per start month, oldest first, keeping the last `keep` months
/// that have at least one enrolment.
pub fn monthly_series(records: &[InscriptionEntity], keep: usize) -> Vec<MonthlyBucket> {
    let mut buckets: BTreeMap<(i32, u32), (Decimal, usize)> = BTreeMap::new();
    for record in records {
        let key = (record.start_date.year(), record.start_date.month());
        let bucket = buckets.entry(key).or_insert((Decimal::ZERO, 0));
        bucket.0 += price_of(record);
        bucket.1 += 1;
    }

    let skip = buckets.len().saturating_sub(keep);
    buckets
        .into_iter()
        .skip(skip)
        .map(|((year, month), (revenue, inscriptions))| MonthlyBucket {
            year,
            month,
            label: MONTH_LABELS[(month - 1) as usize].to_string(),
            revenue,
            inscriptions,
        })
        .collect()
}

pub fn offering_rollup(records: &[InscriptionEntity]) -> Vec<OfferingRollup> {
    let mut groups: BTreeMap<&str, (Decimal, CategoryCounts)> = BTreeMap::new();
    for record in records {
        let group = groups
            .entry(record.offer_name.as_str())
            .or_insert((Decimal::ZERO, CategoryCounts::default()));
        group.0 += price_of(record);
        group.1.add(record.category());
    }

    groups
        .into_iter()
        .map(|(offering, (revenue, counts))| OfferingRollup {
            offering: offering.to_string(),
            members: counts.total,
            revenue,
            average_per_member: average_per_member(revenue, counts.total),
            child: counts.child,
            woman: counts.woman,
            adult: counts.adult,
        })
        .collect()
}

/// Coach totals come from the offer catalog: every offer with a coach contributes the
/// inscriptions that carry its name and category.
pub fn coach_rollup(records: &[InscriptionEntity], offers: &[OfferEntity]) -> Vec<CoachRollup> {
    let mut coaches: BTreeMap<&str, (usize, Decimal, BTreeSet<&str>)> = BTreeMap::new();

    for offer in offers {
        let Some(coach) = offer.coach.as_deref().map(str::trim).filter(|c| !c.is_empty()) else {
            continue;
        };
        let category = offer.category();

        let entry = coaches
            .entry(coach)
            .or_insert((0, Decimal::ZERO, BTreeSet::new()));
        entry.2.insert(offer.name.as_str());

        for record in records
            .iter()
            .filter(|record| record.offer_name == offer.name && record.category() == category)
        {
            entry.0 += 1;
            entry.1 += price_of(record);
        }
    }

    coaches
        .into_iter()
        .map(|(coach, (members, revenue, offerings))| CoachRollup {
            coach: coach.to_string(),
            members,
            revenue,
            average_per_member: average_per_member(revenue, members),
            offerings: offerings.into_iter().map(str::to_string).collect(),
        })
        .collect()
}

pub fn most_recent(
    records: &[InscriptionEntity],
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<InscriptionDto> {
    let mut sorted: Vec<&InscriptionEntity> = records.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
        .into_iter()
        .take(limit)
        .map(|record| InscriptionDto::from_entity(record.clone(), now))
        .collect()
}

pub fn filter_inscriptions(
    records: &[InscriptionEntity],
    filter: &InscriptionFilter,
    now: DateTime<Utc>,
) -> Vec<InscriptionDto> {
    let search = filter
        .search
        .as_deref()
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty());
    let offering = filter
        .offering
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());

    records
        .iter()
        .filter(|record| filter.category.is_none() || record.category() == filter.category)
        .filter(|record| offering.is_none_or(|name| record.offer_name == name))
        .filter(|record| {
            search.as_deref().is_none_or(|term| {
                record.last_name.to_lowercase().contains(term)
                    || record.first_name.to_lowercase().contains(term)
            })
        })
        .map(|record| InscriptionDto::from_entity(record.clone(), now))
        .filter(|dto| filter.status.is_none_or(|status| dto.status == status))
        .collect()
}

pub fn dashboard_overview(
    records: &[InscriptionEntity],
    now: DateTime<Utc>,
) -> DashboardOverviewDto {
    DashboardOverviewDto {
        categories: count_by_category(records),
        active_count: active_count(records, now),
        total_revenue: total_revenue(records),
        monthly: monthly_series(records, DEFAULT_MONTHS),
        recent: most_recent(records, RECENT_LIMIT, now),
        expirations: expiration_overview(records, now, Some(DASHBOARD_LIST_LIMIT)),
    }
}

/// Full statistics report, optionally narrowed to one category.
pub fn statistics(
    records: &[InscriptionEntity],
    offers: &[OfferEntity],
    months: u32,
    category: Option<Category>,
    now: DateTime<Utc>,
) -> StatisticsDto {
    let scoped: Vec<InscriptionEntity> = match category {
        Some(category) => records
            .iter()
            .filter(|record| record.category() == Some(category))
            .cloned()
            .collect(),
        None => records.to_vec(),
    };

    let monthly = monthly_series(&scoped, months as usize);
    let total_revenue: Decimal = monthly.iter().map(|bucket| bucket.revenue).sum();
    let average_monthly_revenue = if monthly.is_empty() {
        Decimal::ZERO
    } else {
        (total_revenue / Decimal::from(monthly.len()))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    };
    let categories = count_by_category(&scoped);

    StatisticsDto {
        months,
        category,
        monthly,
        categories,
        offerings: offering_rollup(&scoped),
        coaches: coach_rollup(&scoped, offers),
        expirations: expiration_overview(&scoped, now, None),
        total_clients: categories.total,
        total_revenue,
        average_monthly_revenue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap()
    }

    fn record(
        category: Category,
        offer_name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        total_price: Option<i64>,
    ) -> InscriptionEntity {
        let created_at = start_date.and_hms_opt(8, 0, 0).unwrap().and_utc();
        InscriptionEntity {
            id: Uuid::new_v4(),
            category: category.as_str().to_string(),
            last_name: "Nom".to_string(),
            first_name: "Prenom".to_string(),
            age: 30,
            birth_date: None,
            phone: "20 000 000".to_string(),
            health_notes: None,
            offer_id: None,
            offer_name: offer_name.to_string(),
            duration_months: 1,
            start_date,
            end_date,
            total_price: total_price.map(Decimal::from),
            created_at,
            updated_at: created_at,
        }
    }

    fn offer(name: &str, coach: Option<&str>, category: Category) -> OfferEntity {
        OfferEntity {
            id: Uuid::new_v4(),
            name: name.to_string(),
            coach: coach.map(str::to_string),
            category: category.as_str().to_string(),
            price: Decimal::from(60),
            description: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    fn sample() -> Vec<InscriptionEntity> {
        vec![
            record(Category::Child, "Karate", date(2024, 1, 10), date(2024, 2, 10), Some(50)),
            record(Category::Woman, "Zumba", date(2024, 5, 20), date(2024, 6, 20), Some(60)),
            record(Category::Adult, "Musculation", date(2024, 6, 1), date(2024, 9, 1), Some(150)),
            record(Category::Adult, "Musculation", date(2024, 5, 14), date(2024, 6, 14), None),
            record(Category::Woman, "Zumba", date(2023, 12, 5), date(2024, 6, 15), Some(60)),
        ]
    }

    #[test]
    fn counts_one_per_category() {
        let records = vec![
            record(Category::Child, "Karate", date(2024, 1, 1), date(2024, 2, 1), Some(50)),
            record(Category::Woman, "Zumba", date(2024, 1, 1), date(2024, 2, 1), Some(60)),
            record(Category::Adult, "Boxe", date(2024, 1, 1), date(2024, 2, 1), Some(70)),
        ];

        assert_eq!(
            count_by_category(&records),
            CategoryCounts {
                child: 1,
                woman: 1,
                adult: 1,
                total: 3
            }
        );
    }

    #[test]
    fn revenue_treats_missing_prices_as_zero() {
        assert_eq!(total_revenue(&sample()), Decimal::from(320));
    }

    #[test]
    fn expirations_are_partitioned_and_sorted() {
        let overview = expiration_overview(&sample(), now(), None);

        assert_eq!(overview.expired_count, 2);
        assert_eq!(overview.expiring_soon_count, 2);
        assert_eq!(overview.expired[0].end_date, date(2024, 6, 14));
        assert_eq!(overview.expired[1].end_date, date(2024, 2, 10));
        assert_eq!(overview.expiring_soon[0].end_date, date(2024, 6, 15));
        assert_eq!(overview.expiring_soon[1].end_date, date(2024, 6, 20));
        assert_eq!(overview.expired_by_category.child, 1);
        assert_eq!(overview.expired_by_category.adult, 1);
        assert_eq!(overview.expiring_soon_by_category.woman, 2);
    }

    #[test]
    fn expiration_limit_caps_lists_but_not_counts() {
        let overview = expiration_overview(&sample(), now(), Some(1));

        assert_eq!(overview.expired.len(), 1);
        assert_eq!(overview.expiring_soon.len(), 1);
        assert_eq!(overview.expired_count, 2);
        assert_eq!(overview.expiring_soon_count, 2);
    }

    #[test]
    fn monthly_series_is_chronological_across_years() {
        let series = monthly_series(&sample(), 6);

        let keys: Vec<(i32, u32, &str)> = series
            .iter()
            .map(|b| (b.year, b.month, b.label.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (2023, 12, "Déc"),
                (2024, 1, "Jan"),
                (2024, 5, "Mai"),
                (2024, 6, "Juin"),
            ]
        );
        assert_eq!(series[2].revenue, Decimal::from(60));
        assert_eq!(series[2].inscriptions, 2);
    }

    #[test]
    fn monthly_series_keeps_the_latest_buckets() {
        let records: Vec<InscriptionEntity> = (1..=12)
            .map(|month| {
                record(
                    Category::Adult,
                    "Musculation",
                    date(2023, month, 1),
                    date(2023, month, 28),
                    Some(10),
                )
            })
            .collect();

        let series = monthly_series(&records, 6);

        assert_eq!(series.len(), 6);
        assert_eq!(series[0].month, 7);
        assert_eq!(series[5].month, 12);
    }

    #[test]
    fn offering_rollup_groups_by_name() {
        let rollup = offering_rollup(&sample());

        let musculation = rollup
            .iter()
            .find(|r| r.offering == "Musculation")
            .unwrap();
        assert_eq!(musculation.members, 2);
        assert_eq!(musculation.revenue, Decimal::from(150));
        assert_eq!(musculation.average_per_member, Decimal::from(75));
        assert_eq!(musculation.adult, 2);

        let zumba = rollup.iter().find(|r| r.offering == "Zumba").unwrap();
        assert_eq!(zumba.woman, 2);
        assert_eq!(zumba.average_per_member, Decimal::from(60));
    }

    #[test]
    fn coach_rollup_matches_offer_name_and_category() {
        let offers = vec![
            offer("Zumba", Some("Sana"), Category::Woman),
            offer("Musculation", Some("Sana"), Category::Adult),
            offer("Karate", Some("Karim"), Category::Adult),
            offer("Yoga", Some("  "), Category::Woman),
            offer("Natation", None, Category::Child),
        ];

        let rollup = coach_rollup(&sample(), &offers);

        assert_eq!(rollup.len(), 2);

        // The Karate inscription is a child one, the Karate offer is for adults.
        let karim = &rollup[0];
        assert_eq!(karim.coach, "Karim");
        assert_eq!(karim.members, 0);
        assert_eq!(karim.average_per_member, Decimal::ZERO);

        let sana = &rollup[1];
        assert_eq!(sana.members, 4);
        assert_eq!(sana.revenue, Decimal::from(270));
        assert_eq!(sana.average_per_member, Decimal::from(68));
        assert_eq!(sana.offerings, vec!["Musculation".to_string(), "Zumba".to_string()]);
    }

    #[test]
    fn most_recent_orders_by_creation() {
        let recent = most_recent(&sample(), 2, now());

        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].start_date, date(2024, 6, 1));
        assert_eq!(recent[1].start_date, date(2024, 5, 20));
    }

    #[test]
    fn filters_combine() {
        let mut records = sample();
        records[1].last_name = "Ben Ali".to_string();

        let by_search = filter_inscriptions(
            &records,
            &InscriptionFilter {
                search: Some("ben".to_string()),
                ..Default::default()
            },
            now(),
        );
        assert_eq!(by_search.len(), 1);
        assert_eq!(by_search[0].last_name, "Ben Ali");

        let expiring_women = filter_inscriptions(
            &records,
            &InscriptionFilter {
                category: Some(Category::Woman),
                status: Some(SubscriptionStatus::ExpiringSoon),
                ..Default::default()
            },
            now(),
        );
        assert_eq!(expiring_women.len(), 2);

        let musculation = filter_inscriptions(
            &records,
            &InscriptionFilter {
                offering: Some("Musculation".to_string()),
                status: Some(SubscriptionStatus::Active),
                ..Default::default()
            },
            now(),
        );
        assert_eq!(musculation.len(), 1);
        assert_eq!(musculation[0].end_date, date(2024, 9, 1));
    }

    #[test]
    fn dashboard_overview_headlines() {
        let overview = dashboard_overview(&sample(), now());

        assert_eq!(overview.categories.total, 5);
        assert_eq!(overview.active_count, 3);
        assert_eq!(overview.total_revenue, Decimal::from(320));
        assert_eq!(overview.recent.len(), 5);
        assert_eq!(overview.monthly.len(), 4);
    }

    #[test]
    fn statistics_scope_to_category_and_period() {
        let offers = vec![offer("Zumba", Some("Sana"), Category::Woman)];

        let stats = statistics(&sample(), &offers, 1, Some(Category::Woman), now());

        assert_eq!(stats.total_clients, 2);
        assert_eq!(stats.categories.woman, 2);
        assert_eq!(stats.monthly.len(), 1);
        assert_eq!(stats.monthly[0].month, 5);
        assert_eq!(stats.total_revenue, Decimal::from(60));
        assert_eq!(stats.average_monthly_revenue, Decimal::from(60));
        assert_eq!(stats.coaches[0].members, 2);
    }

    #[test]
    fn aggregation_is_repeatable() {
        let records = sample();
        let offers = vec![offer("Zumba", Some("Sana"), Category::Woman)];

        assert_eq!(dashboard_overview(&records, now()), dashboard_overview(&records, now()));
        assert_eq!(
            statistics(&records, &offers, 6, None, now()),
            statistics(&records, &offers, 6, None, now())
        );
    }
}
