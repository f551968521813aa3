use api::config::AdminConfig;
use api::report::ReportsClient;
use std::ops::Deref;
use std::sync::Arc;

#[derive(Debug)]
pub struct AppStateData {
    pub config: AdminConfig,
    pub reports: ReportsClient,
}

/// Stable, non-reactive state shared through context.
#[derive(Clone, Debug)]
pub struct AppState(Arc<AppStateData>);

impl Deref for AppState {
    type Target = AppStateData;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq for AppState {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl AppState {
    pub fn new(config: AdminConfig) -> Self {
        let reports = ReportsClient::new(config.reports_url.clone());
        Self(Arc::new(AppStateData { config, reports }))
    }
}
