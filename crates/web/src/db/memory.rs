//! Process-local beer store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use brewery_core::{Beer, BeerId, BeerSort, Page, PageRequest, Pageable};

use super::{BeerStore, RepositoryError};

/// Beer store backed by a `Vec` behind a `tokio` `RwLock`.
///
/// Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryBeerStore {
    beers: RwLock<Vec<Beer>>,
}

impl InMemoryBeerStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All beers in insertion order, then stably re-sorted by `sort`.
    async fn ordered(&self, sort: Option<BeerSort>) -> Vec<Beer> {
        let mut beers = self.beers.read().await.clone();
        beers.sort_by(|a, b| {
            a.created_date
                .cmp(&b.created_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        if let Some(sort) = sort {
            beers.sort_by(|a, b| sort.compare(a, b));
        }
        beers
    }
}

fn slice_page(beers: Vec<Beer>, request: PageRequest) -> Page<Beer> {
    let total = beers.len() as u64;
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let size = usize::try_from(request.size()).unwrap_or(usize::MAX);
    let content = beers.into_iter().skip(offset).take(size).collect();
    Page::new(content, request, total)
}

#[async_trait]
impl BeerStore for InMemoryBeerStore {
    async fn find_by_id(&self, id: BeerId) -> Result<Option<Beer>, RepositoryError> {
        let beers = self.beers.read().await;
        Ok(beers.iter().find(|b| b.id == id).cloned())
    }

    async fn find_all(
        &self,
        request: PageRequest,
        sort: Option<BeerSort>,
    ) -> Result<Page<Beer>, RepositoryError> {
        Ok(slice_page(self.ordered(sort).await, request))
    }

    async fn find_all_by_name(
        &self,
        name: &str,
        pageable: Pageable,
    ) -> Result<Page<Beer>, RepositoryError> {
        let matches: Vec<Beer> = self
            .ordered(None)
            .await
            .into_iter()
            .filter(|b| b.beer_name == name)
            .collect();

        Ok(match pageable {
            Pageable::Paged(request) => slice_page(matches, request),
            Pageable::Unpaged => Page::unpaged(matches),
        })
    }

    async fn save(&self, mut beer: Beer) -> Result<Beer, RepositoryError> {
        let mut beers = self.beers.write().await;
        if let Some(existing) = beers.iter_mut().find(|b| b.id == beer.id) {
            beer.created_date = existing.created_date;
            beer.last_modified_date = Utc::now();
            existing.clone_from(&beer);
        } else {
            beers.push(beer.clone());
        }
        Ok(beer)
    }

    async fn delete_by_id(&self, id: BeerId) -> Result<(), RepositoryError> {
        self.beers.write().await.retain(|b| b.id != id);
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.beers.read().await.len() as u64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use brewery_core::{BeerInput, BeerSortKey, BeerStyle, Direction};
    use chrono::{DateTime, Duration, TimeZone};
    use rust_decimal::Decimal;

    fn beer(name: &str, created: DateTime<Utc>) -> Beer {
        BeerInput {
            beer_name: Some(name.to_string()),
            beer_style: Some(BeerStyle::Lager),
            upc: Some("0083783375213".to_string()),
            quantity_on_hand: Some(10),
            price: Some(Decimal::new(999, 2)),
            ..BeerInput::default()
        }
        .into_new_beer(created)
        .unwrap()
    }

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    async fn store_with(n: i64) -> InMemoryBeerStore {
        let store = InMemoryBeerStore::new();
        for i in 0..n {
            let created = base() + Duration::seconds(i);
            store.save(beer(&format!("Beer {i:02}"), created)).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_paging_totals() {
        let store = store_with(30).await;
        let page = store
            .find_all(PageRequest::new(0, 25).unwrap(), None)
            .await
            .unwrap();

        assert_eq!(page.content().len(), 25);
        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.total_elements(), 30);

        let second = store
            .find_all(PageRequest::new(1, 25).unwrap(), None)
            .await
            .unwrap();
        assert_eq!(second.content().len(), 5);
        assert_eq!(second.content()[0].beer_name, "Beer 25");
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty() {
        let store = store_with(3).await;
        let page = store
            .find_all(PageRequest::new(50, 25).unwrap(), None)
            .await
            .unwrap();
        assert!(page.content().is_empty());
        assert_eq!(page.total_elements(), 3);
        assert_eq!(page.number(), 50);
    }

    #[tokio::test]
    async fn test_sort_descending() {
        let store = store_with(5).await;
        let sort = BeerSort::new(BeerSortKey::BeerName, Direction::Desc);
        let page = store
            .find_all(PageRequest::new(0, 2).unwrap(), Some(sort))
            .await
            .unwrap();
        let names: Vec<_> = page.content().iter().map(|b| b.beer_name.as_str()).collect();
        assert_eq!(names, vec!["Beer 04", "Beer 03"]);
    }

    #[tokio::test]
    async fn test_save_update_keeps_created_date() {
        let store = InMemoryBeerStore::new();
        let saved = store.save(beer("Original", base())).await.unwrap();

        let mut changed = saved.clone();
        changed.beer_name = "Renamed".to_string();
        changed.created_date = base() + Duration::days(300);
        let updated = store.save(changed).await.unwrap();

        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.created_date, base());
        assert!(updated.last_modified_date > saved.last_modified_date);
        assert_eq!(store.count().await.unwrap(), 1);

        let fetched = store.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_delete_absent_is_noop() {
        let store = store_with(2).await;
        store.delete_by_id(BeerId::generate()).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete_then_find() {
        let store = InMemoryBeerStore::new();
        let saved = store.save(beer("Short Lived", base())).await.unwrap();
        store.delete_by_id(saved.id).await.unwrap();
        assert!(store.find_by_id(saved.id).await.unwrap().is_none());
        store.delete_by_id(saved.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_find_all_by_name_unpaged() {
        let store = store_with(3).await;
        store.save(beer("Beer 01", base() + Duration::days(1))).await.unwrap();

        let page = store
            .find_all_by_name("Beer 01", Pageable::Unpaged)
            .await
            .unwrap();
        assert_eq!(page.content().len(), 2);
        assert_eq!(page.total_pages(), 1);

        let none = store
            .find_all_by_name("beer 01", Pageable::Unpaged)
            .await
            .unwrap();
        assert!(none.content().is_empty());
    }

    #[tokio::test]
    async fn test_find_all_by_name_paged() {
        let store = InMemoryBeerStore::new();
        for day in 0..3 {
            store.save(beer("Twin", base() + Duration::days(day))).await.unwrap();
        }
        store.save(beer("Other", base())).await.unwrap();

        let request = PageRequest::new(1, 2).unwrap();
        let page = store
            .find_all_by_name("Twin", Pageable::Paged(request))
            .await
            .unwrap();
        assert_eq!(page.content().len(), 1);
        assert_eq!(page.total_elements(), 3);
        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.content()[0].created_date, base() + Duration::days(2));
    }
}
