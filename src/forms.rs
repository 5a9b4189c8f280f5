//! Session-scoped cache of the in-progress loan application and the derived
//! financial preview. In the browser original this lived in sessionStorage;
//! for a native client the process lifetime plays the role of the tab, so
//! plain process memory is the right scope.

use std::sync::Mutex;

use crate::models::{FinancialEntry, LoanForm};

#[derive(Default)]
struct CacheInner {
    draft: Option<LoanForm>,
    financial_data: Vec<FinancialEntry>,
}

/// Holds the form being edited between the input and confirm steps. Cleared
/// on login, logout and credential invalidation so stale data from a prior
/// session is never shown to a new one.
#[derive(Default)]
pub struct FormCache {
    inner: Mutex<CacheInner>,
}

impl FormCache {
    pub fn new() -> Self {
        FormCache::default()
    }

    pub fn set_draft(&self, form: LoanForm) {
        self.inner.lock().unwrap().draft = Some(form);
    }

    pub fn draft(&self) -> Option<LoanForm> {
        self.inner.lock().unwrap().draft.clone()
    }

    pub fn set_financial_data(&self, data: Vec<FinancialEntry>) {
        self.inner.lock().unwrap().financial_data = data;
    }

    pub fn financial_data(&self) -> Vec<FinancialEntry> {
        self.inner.lock().unwrap().financial_data.clone()
    }

    /// Drop everything. Idempotent.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.draft = None;
        inner.financial_data.clear();
    }
}
