//! 인메모리 저장소.
//!
//! 라우트 테스트에서 PostgreSQL 없이 두 저장소 트레이트를 제공하기 위한 구현입니다.
//! 조건과 정렬은 [`Clause::matches`]/[`SortOrder::compare`]로 평가되므로
//! SQL 구현과 같은 결과 집합을 반환합니다.

use async_trait::async_trait;
use invest_core::{Investment, Investor};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::investments::{InvestmentFilter, InvestmentMeasure, InvestmentQuery, InvestmentRepository};
use super::investors::{InvestorFilter, InvestorQuery, InvestorRepository};
use super::{RepositoryError, RepositoryResult};

#[derive(Default)]
struct Tables {
    investors: BTreeMap<i32, Investor>,
    investments: BTreeMap<i32, Investment>,
    next_investor_id: i32,
    next_investment_id: i32,
}

/// 투자자/투자 인메모리 저장소.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장소 장애를 흉내냅니다. 이후 모든 호출이 `Database` 오류를 반환합니다.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> RepositoryResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

fn mean(values: impl Iterator<Item = Decimal>) -> Decimal {
    let (sum, count) = values.fold((Decimal::ZERO, 0i64), |(sum, n), v| (sum + v, n + 1));
    if count == 0 {
        Decimal::ZERO
    } else {
        sum / Decimal::from(count)
    }
}

#[async_trait]
impl InvestorRepository for InMemoryStore {
    async fn get_by_id(&self, id: i32) -> RepositoryResult<Option<Investor>> {
        self.ensure_available()?;
        Ok(self.tables.read().await.investors.get(&id).cloned())
    }

    async fn add(&self, mut investor: Investor) -> RepositoryResult<Investor> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;
        tables.next_investor_id += 1;
        investor.id = tables.next_investor_id;
        tables.investors.insert(investor.id, investor.clone());
        Ok(investor)
    }

    async fn update(&self, investor: Investor) -> RepositoryResult<()> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;
        match tables.investors.get_mut(&investor.id) {
            Some(slot) => {
                *slot = investor;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: i32) -> RepositoryResult<()> {
        self.ensure_available()?;
        self.tables
            .write()
            .await
            .investors
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    async fn find(&self, query: &InvestorQuery) -> RepositoryResult<Vec<Investor>> {
        self.ensure_available()?;
        Ok(query.apply(self.tables.read().await.investors.values()))
    }

    async fn count(&self, filter: &InvestorFilter) -> RepositoryResult<i64> {
        self.ensure_available()?;
        let tables = self.tables.read().await;
        Ok(tables.investors.values().filter(|i| filter.matches(i)).count() as i64)
    }

    async fn sum_balance(&self, filter: &InvestorFilter) -> RepositoryResult<Decimal> {
        self.ensure_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .investors
            .values()
            .filter(|i| filter.matches(i))
            .map(|i| i.total_balance)
            .sum())
    }

    async fn average_balance(&self, filter: &InvestorFilter) -> RepositoryResult<Decimal> {
        self.ensure_available()?;
        let tables = self.tables.read().await;
        Ok(mean(
            tables
                .investors
                .values()
                .filter(|i| filter.matches(i))
                .map(|i| i.total_balance),
        ))
    }
}

#[async_trait]
impl InvestmentRepository for InMemoryStore {
    async fn get_by_id(&self, id: i32) -> RepositoryResult<Option<Investment>> {
        self.ensure_available()?;
        Ok(self.tables.read().await.investments.get(&id).cloned())
    }

    async fn add(&self, mut investment: Investment) -> RepositoryResult<Investment> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;
        if !tables.investors.contains_key(&investment.investor_id) {
            return Err(RepositoryError::InvestorNotFound(investment.investor_id));
        }
        tables.next_investment_id += 1;
        investment.id = tables.next_investment_id;
        tables.investments.insert(investment.id, investment.clone());
        Ok(investment)
    }

    async fn update(&self, investment: Investment) -> RepositoryResult<()> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;
        if !tables.investors.contains_key(&investment.investor_id) {
            return Err(RepositoryError::InvestorNotFound(investment.investor_id));
        }
        match tables.investments.get_mut(&investment.id) {
            Some(slot) => {
                *slot = investment;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: i32) -> RepositoryResult<()> {
        self.ensure_available()?;
        self.tables
            .write()
            .await
            .investments
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    async fn find(&self, query: &InvestmentQuery) -> RepositoryResult<Vec<Investment>> {
        self.ensure_available()?;
        Ok(query.apply(self.tables.read().await.investments.values()))
    }

    async fn count(&self, filter: &InvestmentFilter) -> RepositoryResult<i64> {
        self.ensure_available()?;
        let tables = self.tables.read().await;
        Ok(tables.investments.values().filter(|i| filter.matches(i)).count() as i64)
    }

    async fn sum(
        &self,
        measure: InvestmentMeasure,
        filter: &InvestmentFilter,
    ) -> RepositoryResult<Decimal> {
        self.ensure_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .investments
            .values()
            .filter(|i| filter.matches(i))
            .map(|i| measure.value_of(i))
            .sum())
    }

    async fn average(
        &self,
        measure: InvestmentMeasure,
        filter: &InvestmentFilter,
    ) -> RepositoryResult<Decimal> {
        self.ensure_available()?;
        let tables = self.tables.read().await;
        Ok(mean(
            tables
                .investments
                .values()
                .filter(|i| filter.matches(i))
                .map(|i| measure.value_of(i)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InvestmentCriteria, InvestorCriteria};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn investor(name: &str, balance: Decimal, profile: &str, birth: NaiveDate) -> Investor {
        Investor {
            id: 0,
            name: name.to_string(),
            tax_id: "000".to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            birth_date: birth,
            total_balance: balance,
            risk_profile: profile.to_string(),
        }
    }

    fn investment(investor_id: i32, kind: &str, profitability: Decimal, value: Decimal) -> Investment {
        Investment {
            id: 0,
            name: format!("{} {}", kind, profitability),
            kind: kind.to_string(),
            initial_value: dec!(1000),
            current_value: value,
            profitability,
            start_date: date(2024, 1, 15),
            maturity_date: None,
            investor_id,
            status: "Ativo".to_string(),
        }
    }

    async fn seeded() -> InMemoryStore {
        let store = InMemoryStore::new();
        InvestorRepository::add(&store, investor("Ana", dec!(1000.50), "Moderado", date(1990, 5, 1)))
            .await
            .unwrap();
        InvestorRepository::add(&store, investor("Bruno", dec!(5000), "Agressivo", date(1980, 2, 1)))
            .await
            .unwrap();
        InvestorRepository::add(&store, investor("Carla", dec!(250), "moderado", date(2000, 9, 9)))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_add_assigns_id_and_round_trips() {
        let store = InMemoryStore::new();
        let input = investor("Ana", dec!(10), "Moderado", date(1990, 5, 1));

        let created = InvestorRepository::add(&store, input.clone()).await.unwrap();
        assert_ne!(created.id, 0);

        let fetched = InvestorRepository::get_by_id(&store, created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(Investor { id: 0, ..fetched }, input);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_is_not_found() {
        let store = seeded().await;
        let mut ghost = investor("Ghost", dec!(1), "Moderado", date(1990, 1, 1));
        ghost.id = 99;

        assert!(matches!(
            InvestorRepository::update(&store, ghost).await,
            Err(RepositoryError::NotFound)
        ));
        assert!(matches!(
            InvestorRepository::delete(&store, 99).await,
            Err(RepositoryError::NotFound)
        ));
        assert!(InvestorRepository::delete(&store, 1).await.is_ok());
        assert_eq!(InvestorRepository::get_all(&store).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_investment_requires_existing_investor() {
        let store = seeded().await;

        let result = InvestmentRepository::add(&store, investment(42, "CDB", dec!(5), dec!(1050))).await;
        assert!(matches!(result, Err(RepositoryError::InvestorNotFound(42))));
        assert!(InvestmentRepository::get_all(&store).await.unwrap().is_empty());

        let created = InvestmentRepository::add(&store, investment(1, "CDB", dec!(5), dec!(1050)))
            .await
            .unwrap();

        let mut moved = created.clone();
        moved.investor_id = 42;
        assert!(matches!(
            InvestmentRepository::update(&store, moved).await,
            Err(RepositoryError::InvestorNotFound(42))
        ));
        let stored = InvestmentRepository::get_by_id(&store, created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.investor_id, 1);
    }

    #[tokio::test]
    async fn test_investor_search_and_aggregates() {
        let store = seeded().await;

        let all = InvestorRepository::search(&store, InvestorCriteria::default())
            .await
            .unwrap();
        let names: Vec<&str> = all.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Bruno", "Carla"]);

        let moderate = InvestorRepository::search(
            &store,
            InvestorCriteria {
                risk_profile: Some("MODERADO".to_string()),
                min_balance: Some(dec!(500)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(moderate.len(), 1);
        assert_eq!(moderate[0].name, "Ana");

        assert_eq!(store.total_balance().await.unwrap(), dec!(6250.50));
        assert_eq!(store.count_by_risk_profile("moderado").await.unwrap(), 2);
        assert_eq!(
            store.average_balance_by_risk_profile("Moderado").await.unwrap(),
            dec!(625.25)
        );
        assert_eq!(
            store.average_balance_by_risk_profile("Inexistente").await.unwrap(),
            Decimal::ZERO
        );
    }

    #[tokio::test]
    async fn test_investor_name_criterion_is_not_trimmed() {
        let store = InMemoryStore::new();
        for name in ["Ana Souza", "Souza Lima"] {
            InvestorRepository::add(&store, investor(name, dec!(100), "Moderado", date(1990, 1, 1)))
                .await
                .unwrap();
        }

        let found = InvestorRepository::search(
            &store,
            InvestorCriteria {
                name: Some(" souza".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let names: Vec<&str> = found.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Ana Souza"]);

        // 빈 문자열만 조건 없음으로 취급
        let all = InvestorRepository::search(
            &store,
            InvestorCriteria {
                name: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_investor_ranges() {
        let store = seeded().await;

        let by_balance = store.get_by_balance_range(dec!(250), dec!(1000.50)).await.unwrap();
        let names: Vec<&str> = by_balance.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Carla"]);

        let by_age = store.get_by_age_range(30, 40, date(2024, 1, 1)).await.unwrap();
        let names: Vec<&str> = by_age.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Ana"]);

        let by_email = store.get_by_email("bruno@example.com").await.unwrap();
        assert_eq!(by_email.map(|i| i.name), Some("Bruno".to_string()));
    }

    #[tokio::test]
    async fn test_investment_queries() {
        let store = seeded().await;
        for (owner, kind, profit, value) in [
            (1, "CDB", dec!(10), dec!(1100)),
            (1, "LCI", dec!(4), dec!(1040)),
            (2, "cdb", dec!(12), dec!(1120)),
            (3, "Ações", dec!(-8), dec!(920)),
        ] {
            InvestmentRepository::add(&store, investment(owner, kind, profit, value))
                .await
                .unwrap();
        }

        let top = store.top_profitable(2).await.unwrap();
        let profits: Vec<Decimal> = top.iter().map(|i| i.profitability).collect();
        assert_eq!(profits, vec![dec!(12), dec!(10)]);

        assert_eq!(store.get_by_investor(1).await.unwrap().len(), 2);
        assert_eq!(store.get_by_kind("CDB").await.unwrap().len(), 2);
        assert_eq!(store.count_by_kind("cdb").await.unwrap(), 2);
        assert_eq!(store.average_profitability_by_kind("CDB").await.unwrap(), dec!(11));
        assert_eq!(store.average_profitability_by_kind("FII").await.unwrap(), Decimal::ZERO);
        assert_eq!(store.total_initial_value().await.unwrap(), dec!(4000));
        assert_eq!(store.total_current_value().await.unwrap(), dec!(4180));

        let by_value = store.get_by_value_range(dec!(1000), dec!(1100)).await.unwrap();
        let values: Vec<Decimal> = by_value.iter().map(|i| i.current_value).collect();
        assert_eq!(values, vec![dec!(1100), dec!(1040)]);

        let losses = store
            .get_by_profitability_range(dec!(-10), dec!(0))
            .await
            .unwrap();
        assert_eq!(losses.len(), 1);

        let searched = InvestmentRepository::search(
            &store,
            InvestmentCriteria {
                kind: Some("cdb".to_string()),
                min_profitability: Some(dec!(11)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(searched.len(), 1);
        assert_eq!(searched[0].investor_id, 2);

        let period = store
            .get_by_period(date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();
        assert_eq!(period.len(), 4);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails() {
        let store = seeded().await;
        store.set_unavailable(true);

        assert!(matches!(
            InvestorRepository::get_all(&store).await,
            Err(RepositoryError::Database(_))
        ));
    }
}
