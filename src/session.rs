// 🧭 Dashboard Session - the single owner of all browsing state
//
// Front ends hold one Dashboard and go through its methods; nothing else
// mutates the filter selection or the curation overlay.

use crate::config::DashboardConfig;
use crate::error::LoginError;
use crate::loader::{Dataset, LoadCoordinator, LoadTicket};
use crate::overlay::{suggest_additions, CurationOverlay};
use crate::projection::{
    project_map, project_summary, CategoryFilter, MapProjection, SummaryProjection, Viewport,
    ViewportTracker,
};
use crate::registry::CollegeRegistry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

// ============================================================================
// LOGIN
// ============================================================================

/// Signed-in analyst. There is no real authentication behind this.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    /// Local part of the email address
    pub name: String,
    pub email: String,
    pub session_id: String,
    pub signed_in_at: DateTime<Utc>,
}

/// Accept any non-empty email + password pair, exactly as typed.
pub fn login(email: &str, password: &str) -> Result<User, LoginError> {
    if email.is_empty() || password.is_empty() {
        return Err(LoginError::MissingCredentials);
    }

    let name = email.split('@').next().unwrap_or(email).to_string();
    info!(user = %name, "analyst signed in");

    Ok(User {
        name,
        email: email.to_string(),
        session_id: uuid::Uuid::new_v4().to_string(),
        signed_in_at: Utc::now(),
    })
}

// ============================================================================
// DASHBOARD
// ============================================================================

#[derive(Debug, Clone)]
pub enum LoadState {
    /// No dataset has been applied yet; projections are unavailable
    Loading,
    Ready(Dataset),
}

/// Map projection together with the viewport it should be shown in
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    #[serde(flatten)]
    pub projection: MapProjection,
    pub viewport: Option<Viewport>,
    /// True when this call moved the viewport
    pub refit: bool,
}

pub struct Dashboard {
    registry: &'static CollegeRegistry,
    config: DashboardConfig,
    state: LoadState,
    selection: Option<CategoryFilter>,
    overlay: CurationOverlay,
    viewport: ViewportTracker,
    loads: LoadCoordinator,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        Dashboard::with_registry(config, CollegeRegistry::global())
    }

    pub fn with_registry(config: DashboardConfig, registry: &'static CollegeRegistry) -> Self {
        let viewport = ViewportTracker::new(config.viewport_policy());
        Dashboard {
            registry,
            config,
            state: LoadState::Loading,
            selection: None,
            overlay: CurationOverlay::new(),
            viewport,
            loads: LoadCoordinator::new(),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn registry(&self) -> &'static CollegeRegistry {
        self.registry
    }

    // ------------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------------

    /// Start a (re)load. The current dataset stays visible until the result
    /// of the newest load is applied.
    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = self.loads.begin();
        debug!(ticket = ticket.id(), "competitor data load started");
        ticket
    }

    /// Apply a load result if `ticket` is still the newest load.
    ///
    /// Returns false (and drops the dataset) for stale tickets.
    pub fn finish_load(&mut self, ticket: LoadTicket, dataset: Dataset) -> bool {
        if !self.loads.accept(ticket) {
            debug!(ticket = ticket.id(), "dropping stale load result");
            return false;
        }

        if let Some(CategoryFilter::Category(name)) = &self.selection {
            if dataset.categories.get(name).is_none() {
                self.selection = None;
            }
        }

        self.state = LoadState::Ready(dataset);
        true
    }

    /// Convenience for callers that load synchronously
    pub fn load_now(&mut self, dataset: Dataset) -> bool {
        let ticket = self.begin_load();
        self.finish_load(ticket, dataset)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn reload_pending(&self) -> bool {
        self.loads.in_flight()
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match &self.state {
            LoadState::Loading => None,
            LoadState::Ready(dataset) => Some(dataset),
        }
    }

    // ------------------------------------------------------------------------
    // Filter selection
    // ------------------------------------------------------------------------

    /// Categories in priority order
    pub fn available_filters(&self) -> Vec<String> {
        self.dataset()
            .map(|d| d.categories.category_names().into_iter().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Explicit selection, or the top-priority category when none was made
    pub fn active_filter(&self) -> Option<CategoryFilter> {
        if let Some(selection) = &self.selection {
            return Some(selection.clone());
        }

        self.dataset()
            .and_then(|d| d.categories.default_category())
            .map(|category| CategoryFilter::Category(category.to_string()))
    }

    pub fn select_filter(&mut self, filter: CategoryFilter) {
        debug!(filter = %filter, "filter selected");
        self.selection = Some(filter);
    }

    // ------------------------------------------------------------------------
    // Curation
    // ------------------------------------------------------------------------

    pub fn overlay(&self) -> &CurationOverlay {
        &self.overlay
    }

    pub fn remove_school(&mut self, name: &str) -> bool {
        self.overlay.remove(name)
    }

    pub fn restore_school(&mut self, name: &str) -> bool {
        self.overlay.restore(name)
    }

    pub fn add_school(&mut self, name: &str) -> bool {
        self.overlay.add(name)
    }

    /// Registry schools the analyst may add for `query`
    pub fn suggestions(&self, query: &str) -> Vec<&'static str> {
        let records = self.dataset().map(|d| d.records.as_slice()).unwrap_or(&[]);
        suggest_additions(self.registry, records, &self.overlay, query, self.config.suggestion_limit)
    }

    // ------------------------------------------------------------------------
    // Projections
    // ------------------------------------------------------------------------

    /// Geographic projection for the active filter; `None` while loading.
    pub fn map_view(&mut self) -> Option<MapView> {
        let filter = self.active_filter().unwrap_or(CategoryFilter::All);
        let dataset = match &self.state {
            LoadState::Loading => return None,
            LoadState::Ready(dataset) => dataset,
        };

        let projection = project_map(
            &dataset.records,
            &dataset.categories,
            self.registry,
            &self.overlay,
            &filter,
        );
        let refit = self.viewport.observe(&projection);

        Some(MapView {
            projection,
            viewport: self.viewport.current().copied(),
            refit,
        })
    }

    /// Per-category tables over the shared overlay; `None` while loading.
    pub fn summary_view(&self) -> Option<SummaryProjection> {
        self.dataset()
            .map(|dataset| project_summary(&dataset.categories, &self.overlay))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = "Category,Description,Rank,School Name,Similarity Score,State,Type,Religion,Acceptance Rate,Niche Grade
Faith-Based Alternatives,Religious peers,1,Oral Roberts University,0.30,Oklahoma,Private,Christian,0.567,B
Faith-Based Alternatives,Religious peers,2,Baylor University,0.10,Texas,Private,Baptist,0.46,A-
Regional Powerhouses,Big neighbours,1,University of Oklahoma,0.12,Oklahoma,Public,,0.73,A";

    fn ready_dashboard() -> Dashboard {
        let mut dashboard = Dashboard::new(DashboardConfig::default());
        dashboard.load_now(Dataset::from_csv_text("test", DATA));
        dashboard
    }

    fn marker_names(view: &MapView) -> Vec<String> {
        view.projection.markers.iter().map(|m| m.name.clone()).collect()
    }

    #[test]
    fn test_login_extracts_display_name() {
        let user = login("jane.doe@utulsa.edu", "secret").unwrap();

        assert_eq!(user.name, "jane.doe");
        assert_eq!(user.email, "jane.doe@utulsa.edu");
        assert!(!user.session_id.is_empty());
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert_eq!(login("", "secret"), Err(LoginError::MissingCredentials));
        assert_eq!(login("a@b.c", ""), Err(LoginError::MissingCredentials));
        assert_eq!(
            LoginError::MissingCredentials.to_string(),
            "Please enter both email and password"
        );
    }

    #[test]
    fn test_login_accepts_whitespace_as_typed() {
        assert!(login("a@b.c", "   ").is_ok());
        assert_eq!(login(" jo@b.c", "pw").unwrap().name, " jo");
    }

    #[test]
    fn test_login_without_at_sign_uses_whole_email() {
        assert_eq!(login("analyst", "pw").unwrap().name, "analyst");
    }

    #[test]
    fn test_projections_blocked_while_loading() {
        let mut dashboard = Dashboard::new(DashboardConfig::default());

        assert!(dashboard.is_loading());
        assert!(dashboard.map_view().is_none());
        assert!(dashboard.summary_view().is_none());
        assert!(dashboard.available_filters().is_empty());
    }

    #[test]
    fn test_default_filter_is_top_priority_category() {
        let dashboard = ready_dashboard();

        assert_eq!(
            dashboard.active_filter(),
            Some(CategoryFilter::Category("Faith-Based Alternatives".to_string()))
        );
        assert_eq!(
            dashboard.available_filters(),
            vec!["Faith-Based Alternatives".to_string(), "Regional Powerhouses".to_string()]
        );
    }

    #[test]
    fn test_end_to_end_curation_scenario() {
        let mut dashboard = ready_dashboard();

        let view = dashboard.map_view().unwrap();
        assert_eq!(marker_names(&view), vec!["Oral Roberts University", "Baylor University"]);
        assert_eq!(view.projection.home.name, "The University of Tulsa");

        dashboard.remove_school("Baylor University");
        let view = dashboard.map_view().unwrap();
        assert_eq!(marker_names(&view), vec!["Oral Roberts University"]);

        assert!(dashboard.suggestions("rice").contains(&"Rice University"));
        dashboard.add_school("Rice University");

        dashboard.select_filter(CategoryFilter::All);
        let all = dashboard.map_view().unwrap();
        assert!(marker_names(&all).contains(&"Rice University".to_string()));

        let summary = dashboard.summary_view().unwrap();
        let faith = &summary.tables[0];
        assert_eq!(faith.category, "Faith-Based Alternatives");
        assert!(faith.rows.iter().all(|r| r.school_name != "Rice University"));
    }

    #[test]
    fn test_summary_honors_removals_from_shared_overlay() {
        // The summary reads the same overlay the map writes to
        let mut dashboard = ready_dashboard();
        let before = dashboard.summary_view().unwrap().total_competitors;

        dashboard.remove_school("Baylor University");
        let after = dashboard.summary_view().unwrap();

        assert_eq!(before, 3);
        assert_eq!(after.total_competitors, 2);
        assert_eq!(after.total_categories, 2);

        dashboard.restore_school("Baylor University");
        assert_eq!(dashboard.summary_view().unwrap().total_competitors, 3);
    }

    #[test]
    fn test_added_schools_stay_out_of_summary() {
        let mut dashboard = ready_dashboard();
        dashboard.add_school("Rice University");

        let summary = dashboard.summary_view().unwrap();
        assert_eq!(summary.total_competitors, 3);
    }

    #[test]
    fn test_suggestions_skip_added_schools() {
        let mut dashboard = ready_dashboard();
        dashboard.add_school("Rice University");

        assert!(dashboard.suggestions("rice").is_empty());
        assert!(dashboard.suggestions("baylor").is_empty());
    }

    #[test]
    fn test_stale_load_is_ignored() {
        let mut dashboard = Dashboard::new(DashboardConfig::default());
        let first = dashboard.begin_load();
        let second = dashboard.begin_load();

        assert!(dashboard.finish_load(second, Dataset::from_csv_text("second", DATA)));
        assert!(!dashboard.finish_load(first, Dataset::empty("first")));
        assert_eq!(dashboard.dataset().unwrap().source, "second");
        assert_eq!(dashboard.dataset().unwrap().records.len(), 3);
    }

    #[test]
    fn test_reload_keeps_overlay_and_falls_back_for_missing_selection() {
        let mut dashboard = ready_dashboard();
        dashboard.remove_school("Baylor University");
        dashboard.select_filter(CategoryFilter::Category("Regional Powerhouses".to_string()));

        let only_faith = "Category,Description,Rank,School Name,Similarity Score,State,Type,Religion,Acceptance Rate,Niche Grade
Faith-Based Alternatives,Religious peers,2,Baylor University,0.10,Texas,Private,Baptist,0.46,A-";
        dashboard.load_now(Dataset::from_csv_text("reload", only_faith));

        assert!(dashboard.overlay().is_removed("Baylor University"));
        assert_eq!(
            dashboard.active_filter(),
            Some(CategoryFilter::Category("Faith-Based Alternatives".to_string()))
        );
    }

    #[test]
    fn test_failed_load_shows_empty_views() {
        let mut dashboard = Dashboard::new(DashboardConfig::default());
        dashboard.load_now(crate::loader::load_dataset(std::path::Path::new("missing.csv")));

        assert!(!dashboard.is_loading());
        let summary = dashboard.summary_view().unwrap();
        assert_eq!(summary.total_categories, 0);
        assert_eq!(summary.total_competitors, 0);
        assert!(dashboard.map_view().unwrap().projection.markers.is_empty());
    }

    #[test]
    fn test_map_view_reports_refit() {
        let mut dashboard = ready_dashboard();

        assert!(dashboard.map_view().unwrap().refit);
        assert!(!dashboard.map_view().unwrap().refit);

        dashboard.select_filter(CategoryFilter::All);
        let view = dashboard.map_view().unwrap();
        assert!(view.refit);
        assert!(view.viewport.is_some());
    }
}
