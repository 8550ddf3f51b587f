//! In-process catalog used by tests and local experiments.

use crate::{CatalogSink, RemoteOperationError};
use price_types::ProductId;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct MemoryProduct {
    barcode: String,
    price: f64,
}

#[derive(Debug, Default)]
struct State {
    products: BTreeMap<ProductId, MemoryProduct>,
    next_id: ProductId,
    failing_search: HashSet<String>,
    failing_write: HashSet<String>,
    search_calls: usize,
    write_calls: usize,
}

/// A catalog held in memory, with optional injected failures per barcode.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    state: Mutex<State>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn add_product(&self, barcode: &str, price: f64) -> ProductId {
        let mut state = self.state();
        state.next_id += 1;
        let id = state.next_id;
        state.products.insert(
            id,
            MemoryProduct {
                barcode: barcode.to_string(),
                price,
            },
        );
        id
    }

    pub fn price_of(&self, id: ProductId) -> Option<f64> {
        self.state().products.get(&id).map(|p| p.price)
    }

    /// Make every search for `barcode` fail with a server error.
    pub fn fail_search_for(&self, barcode: &str) {
        self.state().failing_search.insert(barcode.to_string());
    }

    /// Make every write touching a product with `barcode` fail with a server error.
    pub fn fail_write_for(&self, barcode: &str) {
        self.state().failing_write.insert(barcode.to_string());
    }

    pub fn search_calls(&self) -> usize {
        self.state().search_calls
    }

    pub fn write_calls(&self) -> usize {
        self.state().write_calls
    }
}

#[async_trait::async_trait]
impl CatalogSink for MemoryCatalog {
    async fn search_by_barcode(
        &self,
        barcode: &str,
    ) -> Result<Vec<ProductId>, RemoteOperationError> {
        let mut state = self.state();
        state.search_calls += 1;

        if state.failing_search.contains(barcode) {
            return Err(RemoteOperationError::Server {
                code: 200,
                message: format!("search rejected for barcode {barcode}"),
            });
        }

        Ok(state
            .products
            .iter()
            .filter(|(_, p)| p.barcode == barcode)
            .map(|(id, _)| *id)
            .collect())
    }

    async fn write_price(
        &self,
        product_ids: &[ProductId],
        price: f64,
    ) -> Result<(), RemoteOperationError> {
        let mut state = self.state();
        state.write_calls += 1;

        for id in product_ids {
            match state.products.get(id) {
                Some(p) if state.failing_write.contains(&p.barcode) => {
                    return Err(RemoteOperationError::Server {
                        code: 200,
                        message: format!("write rejected for product {id}"),
                    });
                }
                Some(_) => {}
                None => {
                    return Err(RemoteOperationError::Server {
                        code: 200,
                        message: format!("Record does not exist or has been deleted: {id}"),
                    });
                }
            }
        }

        for id in product_ids {
            if let Some(p) = state.products.get_mut(id) {
                p.price = price;
            }
        }
        Ok(())
    }
}
