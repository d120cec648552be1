//! 조건 조합기.
//!
//! 선택적 조건들을 AND로 묶은 [`Filter`]와 정렬/개수 제한을 더한 [`Query`]를 정의합니다.
//! 각 조건은 SQL 조각(바인딩 포함)과 메모리 상 평가를 모두 제공하므로
//! Postgres 구현과 인메모리 구현이 같은 의미를 공유합니다.
//!
//! ```ignore
//! let filter = Filter::all()
//!     .and_text(criteria.name, InvestorClause::NameContains)
//!     .and_some(criteria.min_balance, InvestorClause::BalanceAtLeast);
//! ```

use sqlx::{Postgres, QueryBuilder};

/// 단일 조건.
pub trait Clause: Send + Sync {
    /// 조건이 평가하는 레코드 타입
    type Record;

    /// `WHERE` 절에 들어갈 조각을 추가합니다.
    fn push_sql(&self, builder: &mut QueryBuilder<'_, Postgres>);

    /// 레코드가 조건을 만족하는지 평가합니다.
    fn matches(&self, record: &Self::Record) -> bool;
}

/// 고정 정렬 순서.
pub trait SortOrder: Send + Sync {
    type Record;

    /// `ORDER BY` 뒤에 올 SQL (동률은 id 오름차순).
    fn sql(&self) -> &'static str;

    /// 메모리 상 비교.
    fn compare(&self, a: &Self::Record, b: &Self::Record) -> std::cmp::Ordering;
}

/// 조건의 논리곱. 비어 있으면 모든 레코드를 통과시킵니다.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter<C> {
    clauses: Vec<C>,
}

impl<C> Default for Filter<C> {
    fn default() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }
}

impl<C> Filter<C> {
    /// 제약 없는 필터.
    pub fn all() -> Self {
        Self::default()
    }

    /// 조건을 추가합니다.
    #[must_use]
    pub fn and(mut self, clause: C) -> Self {
        self.clauses.push(clause);
        self
    }

    /// 값이 있을 때만 조건을 추가합니다.
    #[must_use]
    pub fn and_some<V>(self, value: Option<V>, clause: impl FnOnce(V) -> C) -> Self {
        match value {
            Some(value) => self.and(clause(value)),
            None => self,
        }
    }

    /// 비어 있지 않은 문자열이 있을 때만 조건을 추가합니다. 값은 주어진 그대로 사용합니다.
    #[must_use]
    pub fn and_text(self, value: Option<String>, clause: impl FnOnce(String) -> C) -> Self {
        self.and_some(value.filter(|v| !v.is_empty()), clause)
    }

    pub fn clauses(&self) -> &[C] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl<C: Clause> Filter<C> {
    /// ` WHERE a AND b ...`를 추가합니다. 조건이 없으면 아무것도 추가하지 않습니다.
    pub fn push_where(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        for (i, clause) in self.clauses.iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            clause.push_sql(builder);
        }
    }

    /// 모든 조건을 만족하는지 평가합니다.
    pub fn matches(&self, record: &C::Record) -> bool {
        self.clauses.iter().all(|clause| clause.matches(record))
    }
}

/// 필터 + 정렬 + 개수 제한.
#[derive(Debug, Clone, PartialEq)]
pub struct Query<C, O> {
    pub filter: Filter<C>,
    pub order: O,
    pub limit: Option<i64>,
}

impl<C, O> Query<C, O> {
    pub fn new(filter: Filter<C>, order: O) -> Self {
        Self {
            filter,
            order,
            limit: None,
        }
    }

    #[must_use]
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl<C, O, T> Query<C, O>
where
    C: Clause<Record = T>,
    O: SortOrder<Record = T>,
    T: Clone,
{
    /// `base`(예: `SELECT ... FROM investors`)에 조건/정렬/제한을 붙인 쿼리를 만듭니다.
    pub fn to_select<'args>(&self, base: &str) -> QueryBuilder<'args, Postgres> {
        let mut builder = QueryBuilder::new(base);
        self.filter.push_where(&mut builder);
        builder.push(" ORDER BY ").push(self.order.sql());
        if let Some(limit) = self.limit {
            builder.push(" LIMIT ").push_bind(limit);
        }
        builder
    }

    /// 메모리 상 레코드에 같은 의미를 적용합니다.
    pub fn apply<'a>(&self, records: impl IntoIterator<Item = &'a T>) -> Vec<T>
    where
        T: 'a,
    {
        let mut matched: Vec<T> = records
            .into_iter()
            .filter(|record| self.filter.matches(record))
            .cloned()
            .collect();
        matched.sort_by(|a, b| self.order.compare(a, b));
        if let Some(limit) = self.limit {
            matched.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        }
        matched
    }
}

/// `expr`(예: `COUNT(*)`, `COALESCE(SUM(x), 0)`)를 필터와 함께 집계하는 쿼리.
pub fn aggregate<'args, C: Clause>(
    expr: &str,
    table: &str,
    filter: &Filter<C>,
) -> QueryBuilder<'args, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM {}", expr, table));
    filter.push_where(&mut builder);
    builder
}

/// 대소문자 무시 부분 문자열 조건.
pub(crate) fn push_contains_ci(
    builder: &mut QueryBuilder<'_, Postgres>,
    column: &str,
    needle: &str,
) {
    builder
        .push("POSITION(LOWER(")
        .push_bind(needle.to_string())
        .push(format!(") IN LOWER({})) > 0", column));
}

/// 대소문자 무시 일치 조건.
pub(crate) fn push_equals_ci(builder: &mut QueryBuilder<'_, Postgres>, column: &str, value: &str) {
    builder
        .push(format!("LOWER({}) = LOWER(", column))
        .push_bind(value.to_string())
        .push(")");
}

pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub(crate) fn equals_ci(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
