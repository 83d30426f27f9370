// Market Intelligence Dashboard - Core Library
// Exposes all modules for use in the TUI, the API server, and tests

pub mod error;
pub mod parser;
pub mod registry;      // Static college coordinate table
pub mod aggregator;    // Category grouping + priority ranking
pub mod overlay;       // Session-local removals / additions
pub mod projection;    // Map + summary views
pub mod config;
pub mod loader;        // CSV file → Dataset, last load wins
pub mod session;       // Login + Dashboard state

// Re-export commonly used types
pub use error::{LoadError, LoginError};
pub use parser::{
    CompetitorRecord, RawRecord,
    parse_csv, parse_competitors,
    EXPECTED_HEADERS,
};
pub use registry::{CollegeLocation, CollegeRegistry, HOME_INSTITUTION};
pub use aggregator::{
    CategoryIndex, CategoryRanking, CategorySet,
    group_by_category, mean_similarity, rank_categories, unique_school_names,
};
pub use overlay::{CurationOverlay, suggest_additions};
pub use projection::{
    Bounds, CategoryFilter, CategoryTable, MapProjection, Marker, MarkerOrigin,
    RankTier, SimilarityLabel, SummaryProjection, SummaryRow,
    Viewport, ViewportPolicy, ViewportTracker,
    format_acceptance_rate, project_map, project_summary,
};
pub use config::DashboardConfig;
pub use loader::{Dataset, LoadCoordinator, LoadTicket, load_dataset, spawn_load};
pub use session::{Dashboard, LoadState, MapView, User, login};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
