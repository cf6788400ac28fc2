//! `PostgreSQL` beer store.
//!
//! Queries are checked at runtime (`query_as` with `FromRow` rows), so the
//! crate builds without a live database. The style enum travels as text and is
//! cast to `brewery.beer_style` in SQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use brewery_core::{
    Beer, BeerId, BeerSort, BeerSortKey, BeerStyle, Direction, Page, PageRequest, Pageable,
};

use super::{BeerStore, RepositoryError};

const BEER_COLUMNS: &str = "id, beer_name, beer_style::text AS beer_style, upc, \
     quantity_on_hand, price, created_date, last_modified_date";

const INSERTION_ORDER: &str = "created_date, id";

#[derive(sqlx::FromRow)]
struct BeerRow {
    id: Uuid,
    beer_name: String,
    beer_style: String,
    upc: String,
    quantity_on_hand: i32,
    price: Decimal,
    created_date: DateTime<Utc>,
    last_modified_date: DateTime<Utc>,
}

impl TryFrom<BeerRow> for Beer {
    type Error = RepositoryError;

    fn try_from(row: BeerRow) -> Result<Self, Self::Error> {
        let beer_style: BeerStyle = row.beer_style.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid style in database: {e}"))
        })?;

        Ok(Self {
            id: BeerId::new(row.id),
            beer_name: row.beer_name,
            beer_style,
            upc: row.upc,
            quantity_on_hand: row.quantity_on_hand,
            price: row.price,
            created_date: row.created_date,
            last_modified_date: row.last_modified_date,
        })
    }
}

fn into_beers(rows: Vec<BeerRow>) -> Result<Vec<Beer>, RepositoryError> {
    rows.into_iter().map(Beer::try_from).collect()
}

const fn sort_column(key: BeerSortKey) -> &'static str {
    match key {
        BeerSortKey::BeerName => "beer_name",
        BeerSortKey::BeerStyle => "beer_style",
        BeerSortKey::Upc => "upc",
        BeerSortKey::QuantityOnHand => "quantity_on_hand",
        BeerSortKey::Price => "price",
        BeerSortKey::CreatedDate => "created_date",
        BeerSortKey::LastModifiedDate => "last_modified_date",
    }
}

/// `ORDER BY` clause for `sort`, falling back to insertion order.
fn order_by(sort: Option<BeerSort>) -> String {
    match sort {
        Some(sort) => {
            let direction = match sort.direction {
                Direction::Asc => "ASC",
                Direction::Desc => "DESC",
            };
            format!("{} {direction}, {INSERTION_ORDER}", sort_column(sort.key))
        }
        None => INSERTION_ORDER.to_string(),
    }
}

fn to_count(value: i64) -> Result<u64, RepositoryError> {
    u64::try_from(value)
        .map_err(|_| RepositoryError::DataCorruption(format!("negative row count: {value}")))
}

// PageRequest bounds the offset by MAX_OFFSET, which is i64::MAX.
fn limit_offset(request: PageRequest) -> (i64, i64) {
    let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
    (i64::from(request.size()), offset)
}

/// Beer store over the `brewery.beer` table.
#[derive(Clone)]
pub struct PgBeerStore {
    pool: PgPool,
}

impl PgBeerStore {
    /// Create a new store over `pool`.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete every beer, returning how many rows were removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM brewery.beer")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl BeerStore for PgBeerStore {
    async fn find_by_id(&self, id: BeerId) -> Result<Option<Beer>, RepositoryError> {
        let row: Option<BeerRow> = sqlx::query_as(&format!(
            "SELECT {BEER_COLUMNS} FROM brewery.beer WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Beer::try_from).transpose()
    }

    async fn find_all(
        &self,
        request: PageRequest,
        sort: Option<BeerSort>,
    ) -> Result<Page<Beer>, RepositoryError> {
        let (limit, offset) = limit_offset(request);

        let rows: Vec<BeerRow> = sqlx::query_as(&format!(
            "SELECT {BEER_COLUMNS} FROM brewery.beer ORDER BY {} LIMIT $1 OFFSET $2",
            order_by(sort)
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = self.count().await?;
        Ok(Page::new(into_beers(rows)?, request, total))
    }

    async fn find_all_by_name(
        &self,
        name: &str,
        pageable: Pageable,
    ) -> Result<Page<Beer>, RepositoryError> {
        match pageable {
            Pageable::Unpaged => {
                let rows: Vec<BeerRow> = sqlx::query_as(&format!(
                    "SELECT {BEER_COLUMNS} FROM brewery.beer WHERE beer_name = $1 \
                     ORDER BY {INSERTION_ORDER}"
                ))
                .bind(name)
                .fetch_all(&self.pool)
                .await?;

                Ok(Page::unpaged(into_beers(rows)?))
            }
            Pageable::Paged(request) => {
                let (limit, offset) = limit_offset(request);

                let rows: Vec<BeerRow> = sqlx::query_as(&format!(
                    "SELECT {BEER_COLUMNS} FROM brewery.beer WHERE beer_name = $1 \
                     ORDER BY {INSERTION_ORDER} LIMIT $2 OFFSET $3"
                ))
                .bind(name)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

                let (total,): (i64,) =
                    sqlx::query_as("SELECT COUNT(*) FROM brewery.beer WHERE beer_name = $1")
                        .bind(name)
                        .fetch_one(&self.pool)
                        .await?;

                Ok(Page::new(into_beers(rows)?, request, to_count(total)?))
            }
        }
    }

    async fn save(&self, beer: Beer) -> Result<Beer, RepositoryError> {
        let row: BeerRow = sqlx::query_as(&format!(
            "INSERT INTO brewery.beer \
                 (id, beer_name, beer_style, upc, quantity_on_hand, price, \
                  created_date, last_modified_date) \
             VALUES ($1, $2, $3::brewery.beer_style, $4, $5, $6, $7, $8) \
             ON CONFLICT (id) DO UPDATE SET \
                 beer_name = EXCLUDED.beer_name, \
                 beer_style = EXCLUDED.beer_style, \
                 upc = EXCLUDED.upc, \
                 quantity_on_hand = EXCLUDED.quantity_on_hand, \
                 price = EXCLUDED.price, \
                 last_modified_date = $9 \
             RETURNING {BEER_COLUMNS}"
        ))
        .bind(beer.id)
        .bind(&beer.beer_name)
        .bind(beer.beer_style.code())
        .bind(&beer.upc)
        .bind(beer.quantity_on_hand)
        .bind(beer.price)
        .bind(beer.created_date)
        .bind(beer.last_modified_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Beer::try_from(row)
    }

    async fn delete_by_id(&self, id: BeerId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM brewery.beer WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM brewery.beer")
            .fetch_one(&self.pool)
            .await?;
        to_count(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_by_default_is_insertion_order() {
        assert_eq!(order_by(None), "created_date, id");
    }

    #[test]
    fn test_order_by_sort() {
        let sort = BeerSort::new(BeerSortKey::QuantityOnHand, Direction::Desc);
        assert_eq!(order_by(Some(sort)), "quantity_on_hand DESC, created_date, id");
    }

    #[test]
    fn test_limit_offset_at_largest_page() {
        let request = PageRequest::new(u32::MAX, 25).unwrap();
        assert_eq!(limit_offset(request), (25, i64::from(u32::MAX) * 25));
    }

    #[test]
    fn test_negative_count_is_corruption() {
        assert!(matches!(
            to_count(-1),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
