// 🗺️ View Projections - read-only views over data + registry + overlay
//
// Geographic: one marker per resolved school, plus the home marker, plus a
// viewport covering all of them.
// Tabular: one ranked table per category with display-ready cells.
//
// Neither projection mutates anything it is given.

use crate::aggregator::{unique_school_names, CategoryIndex};
use crate::overlay::CurationOverlay;
use crate::parser::CompetitorRecord;
use crate::registry::{CollegeLocation, CollegeRegistry, HOME_INSTITUTION};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Accent colors assigned to categories by priority position
pub const ACCENT_COLORS: [&str; 5] = ["#FB5A00", "#FF9B00", "#835000", "#FF90E7", "#8CA6FF"];

pub const HOME_COLOR: &str = "#009266";

/// Shown in place of an absent value
pub const PLACEHOLDER: &str = "—";

// ============================================================================
// CATEGORY FILTER
// ============================================================================

/// What the map is showing: one category, or every category at once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    All,
    Category(String),
}

impl CategoryFilter {
    /// Only the exact value `all` selects every category; anything else,
    /// `All` included, names a category.
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Category(name) => name.as_str(),
        }
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Category(name) => Some(name.as_str()),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// MARKERS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerOrigin {
    /// The analyst's own institution
    Home,
    /// A school from the loaded data
    Dataset,
    /// A school injected through the curation overlay
    Added,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub state: String,
    pub color: &'static str,
    pub origin: MarkerOrigin,
}

impl Marker {
    fn from_location(location: &CollegeLocation, color: &'static str, origin: MarkerOrigin) -> Self {
        Marker {
            name: location.name.to_string(),
            latitude: location.latitude,
            longitude: location.longitude,
            state: location.state.to_string(),
            color,
            origin,
        }
    }

    pub fn home() -> Self {
        Marker::from_location(&HOME_INSTITUTION, HOME_COLOR, MarkerOrigin::Home)
    }

    /// Only non-home markers carry a remove control
    pub fn is_removable(&self) -> bool {
        self.origin != MarkerOrigin::Home
    }
}

// ============================================================================
// BOUNDS
// ============================================================================

/// Geographic bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Smallest box covering every point; `None` for no points
    pub fn covering<I>(points: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        points.into_iter().fold(None, |acc, (lat, lng)| {
            Some(match acc {
                None => Bounds { south: lat, west: lng, north: lat, east: lng },
                Some(b) => Bounds {
                    south: b.south.min(lat),
                    west: b.west.min(lng),
                    north: b.north.max(lat),
                    east: b.east.max(lng),
                },
            })
        })
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.south + self.north) / 2.0, (self.west + self.east) / 2.0)
    }

    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    pub fn lng_span(&self) -> f64 {
        self.east - self.west
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.south && latitude <= self.north && longitude >= self.west && longitude <= self.east
    }

    /// Grow each side by `ratio` of the span, and to at least `min_span`
    /// degrees on each axis, keeping the center fixed.
    pub fn padded(&self, ratio: f64, min_span: f64) -> Bounds {
        let (lat_center, lng_center) = self.center();
        let lat_half = (self.lat_span() * (1.0 + 2.0 * ratio)).max(min_span) / 2.0;
        let lng_half = (self.lng_span() * (1.0 + 2.0 * ratio)).max(min_span) / 2.0;

        Bounds {
            south: (lat_center - lat_half).max(-90.0),
            west: (lng_center - lng_half).max(-180.0),
            north: (lat_center + lat_half).min(90.0),
            east: (lng_center + lng_half).min(180.0),
        }
    }
}

// ============================================================================
// VIEWPORT
// ============================================================================

/// How a fitted viewport pads and caps its zoom
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportPolicy {
    /// Fraction of the span added on every side
    pub padding_ratio: f64,
    /// Closest zoom level a fit may reach (web-map tile levels)
    pub max_zoom: u8,
}

impl Default for ViewportPolicy {
    fn default() -> Self {
        ViewportPolicy {
            padding_ratio: 0.1,
            max_zoom: 10,
        }
    }
}

impl ViewportPolicy {
    /// Longitude span of one tile at `max_zoom`; a fit never gets tighter
    pub fn min_span(&self) -> f64 {
        360.0 / f64::from(1u32 << self.max_zoom.min(30))
    }

    pub fn fit(&self, bounds: &Bounds) -> Viewport {
        let fitted = bounds.padded(self.padding_ratio, self.min_span());
        let span = fitted.lng_span().max(fitted.lat_span()).max(f64::EPSILON);
        let zoom = (360.0 / span).log2().floor().clamp(0.0, f64::from(self.max_zoom)) as u8;

        Viewport { bounds: fitted, zoom }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub bounds: Bounds,
    pub zoom: u8,
}

/// Refits the viewport only when the visible marker set changes.
///
/// An empty marker set leaves the previous viewport in place.
#[derive(Debug, Clone, Default)]
pub struct ViewportTracker {
    policy: ViewportPolicy,
    visible: Vec<String>,
    current: Option<Viewport>,
    refits: u64,
}

impl ViewportTracker {
    pub fn new(policy: ViewportPolicy) -> Self {
        ViewportTracker {
            policy,
            ..Default::default()
        }
    }

    /// Feed the latest projection. Returns true when the viewport was refit.
    pub fn observe(&mut self, projection: &MapProjection) -> bool {
        let visible: Vec<String> = projection.markers.iter().map(|m| m.name.clone()).collect();

        if visible == self.visible && self.current.is_some() {
            return false;
        }
        self.visible = visible;

        if projection.markers.is_empty() {
            return false;
        }

        self.current = Some(self.policy.fit(&projection.bounds));
        self.refits += 1;
        true
    }

    pub fn current(&self) -> Option<&Viewport> {
        self.current.as_ref()
    }

    pub fn refits(&self) -> u64 {
        self.refits
    }

    pub fn policy(&self) -> &ViewportPolicy {
        &self.policy
    }
}

// ============================================================================
// GEOGRAPHIC PROJECTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapProjection {
    pub filter: String,
    /// Description of the selected category; `None` for `all`
    pub description: Option<String>,
    pub color: &'static str,
    pub home: Marker,
    /// Dataset markers first, then overlay additions; one per school
    pub markers: Vec<Marker>,
    /// Visible names the registry could not place
    pub unresolved: Vec<String>,
    /// Box covering home and every marker
    pub bounds: Bounds,
}

impl MapProjection {
    pub fn school_count(&self) -> usize {
        self.markers.len()
    }

    pub fn marker(&self, name: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.name == name)
    }
}

/// Marker color for a filter: the category's priority position picks the
/// accent, `all` (and unknown categories) use the first accent.
pub fn marker_color(index: &CategoryIndex, filter: &CategoryFilter) -> &'static str {
    let position = filter
        .category()
        .and_then(|category| index.position(category))
        .unwrap_or(0);

    ACCENT_COLORS[position % ACCENT_COLORS.len()]
}

/// Resolve the effective school set for `filter` through the registry.
pub fn project_map(
    records: &[CompetitorRecord],
    index: &CategoryIndex,
    registry: &CollegeRegistry,
    overlay: &CurationOverlay,
    filter: &CategoryFilter,
) -> MapProjection {
    let color = marker_color(index, filter);

    let (names, description) = match filter {
        CategoryFilter::All => (unique_school_names(records), None),
        CategoryFilter::Category(category) => match index.get(category) {
            Some(set) => (set.school_names(), Some(set.description.clone())),
            None => (Vec::new(), None),
        },
    };

    let mut seen: HashSet<&str> = HashSet::new();
    let mut markers = Vec::new();
    let mut unresolved = Vec::new();

    let dataset = names.into_iter().map(|name| (name, MarkerOrigin::Dataset));
    let additions = overlay.visible_additions().map(|name| (name, MarkerOrigin::Added));

    for (name, origin) in dataset.chain(additions) {
        if overlay.is_removed(name) || !seen.insert(name) {
            continue;
        }

        match registry.get(name) {
            Some(location) => markers.push(Marker::from_location(location, color, origin)),
            None => unresolved.push(name.to_string()),
        }
    }

    if !unresolved.is_empty() {
        debug!(filter = %filter, missing = unresolved.len(), "schools without registry coordinates left off the map");
    }

    let home = Marker::home();
    let bounds = Bounds::covering(
        std::iter::once(&home)
            .chain(markers.iter())
            .map(|m| (m.latitude, m.longitude)),
    )
    .unwrap_or(Bounds {
        south: home.latitude,
        west: home.longitude,
        north: home.latitude,
        east: home.longitude,
    });

    MapProjection {
        filter: filter.as_str().to_string(),
        description,
        color,
        home,
        markers,
        unresolved,
        bounds,
    }
}

// ============================================================================
// TABULAR PROJECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SimilarityLabel {
    VeryHigh,
    High,
    Medium,
    Low,
}

impl SimilarityLabel {
    /// > 0.25 Very High, [0.20, 0.25] High, [0.15, 0.20) Medium, else Low.
    /// A missing or non-numeric score labels as Low.
    pub fn from_score(score: Option<f64>) -> Self {
        match score {
            Some(s) if s > 0.25 => SimilarityLabel::VeryHigh,
            Some(s) if s >= 0.20 => SimilarityLabel::High,
            Some(s) if s >= 0.15 => SimilarityLabel::Medium,
            _ => SimilarityLabel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityLabel::VeryHigh => "Very High",
            SimilarityLabel::High => "High",
            SimilarityLabel::Medium => "Medium",
            SimilarityLabel::Low => "Low",
        }
    }
}

/// Badge tier for the rank column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RankTier {
    Top3,
    Top5,
    Top7,
    Rest,
}

impl RankTier {
    pub fn from_rank(rank: Option<u32>) -> Self {
        match rank {
            Some(r) if r <= 3 => RankTier::Top3,
            Some(r) if r <= 5 => RankTier::Top5,
            Some(r) if r <= 7 => RankTier::Top7,
            _ => RankTier::Rest,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RankTier::Top3 => ACCENT_COLORS[0],
            RankTier::Top5 => ACCENT_COLORS[1],
            RankTier::Top7 => ACCENT_COLORS[2],
            RankTier::Rest => ACCENT_COLORS[4],
        }
    }
}

/// Fraction → whole percentage, e.g. 0.567 → "57%"
pub fn format_acceptance_rate(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{}%", (rate * 100.0).round() as i64),
        None => PLACEHOLDER.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub rank: String,
    pub rank_tier: RankTier,
    pub school_name: String,
    pub state: String,
    pub institution_type: String,
    pub religion: String,
    pub similarity: String,
    pub acceptance_rate: String,
    pub niche_grade: String,
}

impl SummaryRow {
    pub fn from_record(record: &CompetitorRecord) -> Self {
        SummaryRow {
            rank: record.rank.clone(),
            rank_tier: RankTier::from_rank(record.rank_number()),
            school_name: record.school_name.clone(),
            state: record.state.clone(),
            institution_type: record.institution_type.clone(),
            religion: record
                .religion
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            similarity: SimilarityLabel::from_score(record.similarity()).as_str().to_string(),
            acceptance_rate: format_acceptance_rate(record.acceptance()),
            niche_grade: record.niche_grade.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTable {
    pub priority: usize,
    pub category: String,
    pub description: String,
    pub mean_similarity: Option<f64>,
    pub rows: Vec<SummaryRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryProjection {
    pub total_categories: usize,
    pub total_competitors: usize,
    /// Tables in priority order
    pub tables: Vec<CategoryTable>,
}

/// One table per category, removed schools filtered out.
///
/// Overlay additions have no category and never appear here.
pub fn project_summary(index: &CategoryIndex, overlay: &CurationOverlay) -> SummaryProjection {
    let tables: Vec<CategoryTable> = index
        .ranked_sets()
        .map(|(ranking, set)| CategoryTable {
            priority: ranking.priority,
            category: set.name.clone(),
            description: set.description.clone(),
            mean_similarity: ranking.mean_similarity,
            rows: overlay
                .retain_visible(&set.competitors)
                .map(SummaryRow::from_record)
                .collect(),
        })
        .collect();

    SummaryProjection {
        total_categories: tables.len(),
        total_competitors: tables.iter().map(|t| t.rows.len()).sum(),
        tables,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_competitors;

    const DATA: &str = "Category,Description,Rank,School Name,Similarity Score,State,Type,Religion,Acceptance Rate,Niche Grade
Faith-Based Alternatives,Religious peers,1,Oral Roberts University,0.30,Oklahoma,Private,Christian,0.567,B
Faith-Based Alternatives,Religious peers,2,Baylor University,0.10,Texas,Private,Baptist,0.46,A-
Regional Powerhouses,Big neighbours,1,University of Oklahoma,0.15,Oklahoma,Public,,0.73,A
Regional Powerhouses,Big neighbours,2,Nowhere State College,0.10,Kansas,Public,,0.9,C";

    fn fixture() -> (Vec<CompetitorRecord>, CategoryIndex) {
        let records = parse_competitors(DATA);
        let index = CategoryIndex::build(&records);
        (records, index)
    }

    fn names(projection: &MapProjection) -> Vec<&str> {
        projection.markers.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_category_projection_resolves_markers() {
        let (records, index) = fixture();
        let filter = CategoryFilter::parse("Faith-Based Alternatives");
        let map = project_map(&records, &index, CollegeRegistry::global(), &CurationOverlay::new(), &filter);

        assert_eq!(names(&map), vec!["Oral Roberts University", "Baylor University"]);
        assert_eq!(map.home.name, "The University of Tulsa");
        assert_eq!(map.description.as_deref(), Some("Religious peers"));
        assert_eq!(map.color, ACCENT_COLORS[0]);
    }

    #[test]
    fn test_unresolved_names_are_left_off_the_map() {
        let (records, index) = fixture();
        let filter = CategoryFilter::parse("Regional Powerhouses");
        let map = project_map(&records, &index, CollegeRegistry::global(), &CurationOverlay::new(), &filter);

        assert_eq!(names(&map), vec!["University of Oklahoma"]);
        assert_eq!(map.unresolved, vec!["Nowhere State College".to_string()]);
        assert_eq!(map.color, ACCENT_COLORS[1]);
    }

    #[test]
    fn test_removal_and_addition_flow() {
        let (records, index) = fixture();
        let registry = CollegeRegistry::global();
        let faith = CategoryFilter::parse("Faith-Based Alternatives");
        let mut overlay = CurationOverlay::new();

        overlay.remove("Baylor University");
        let map = project_map(&records, &index, registry, &overlay, &faith);
        assert_eq!(names(&map), vec!["Oral Roberts University"]);

        overlay.add("Rice University");
        let all = project_map(&records, &index, registry, &overlay, &CategoryFilter::All);
        assert!(names(&all).contains(&"Rice University"));
        assert_eq!(all.marker("Rice University").unwrap().origin, MarkerOrigin::Added);

        let summary = project_summary(&index, &overlay);
        let faith_table = summary.tables.iter().find(|t| t.category == "Faith-Based Alternatives").unwrap();
        assert!(faith_table.rows.iter().all(|r| r.school_name != "Rice University"));
        assert!(faith_table.rows.iter().all(|r| r.school_name != "Baylor University"));
    }

    #[test]
    fn test_additions_show_in_every_category() {
        let (records, index) = fixture();
        let mut overlay = CurationOverlay::new();
        overlay.add("Rice University");

        for category in index.category_names() {
            let filter = CategoryFilter::parse(category);
            let map = project_map(&records, &index, CollegeRegistry::global(), &overlay, &filter);
            assert_eq!(names(&map).last(), Some(&"Rice University"));
        }
    }

    #[test]
    fn test_addition_already_in_data_is_not_duplicated() {
        let (records, index) = fixture();
        let mut overlay = CurationOverlay::new();
        overlay.add("Baylor University");

        let map = project_map(&records, &index, CollegeRegistry::global(), &overlay, &CategoryFilter::All);
        let baylor = names(&map).iter().filter(|n| **n == "Baylor University").count();

        assert_eq!(baylor, 1);
    }

    #[test]
    fn test_all_filter_unions_categories_in_appearance_order() {
        let (records, index) = fixture();
        let map = project_map(&records, &index, CollegeRegistry::global(), &CurationOverlay::new(), &CategoryFilter::All);

        assert_eq!(
            names(&map),
            vec!["Oral Roberts University", "Baylor University", "University of Oklahoma"]
        );
        assert_eq!(map.description, None);
        assert_eq!(map.filter, "all");
    }

    #[test]
    fn test_unknown_category_shows_only_additions() {
        let (records, index) = fixture();
        let filter = CategoryFilter::parse("Not A Category");
        let map = project_map(&records, &index, CollegeRegistry::global(), &CurationOverlay::new(), &filter);

        assert!(map.markers.is_empty());
        assert_eq!(map.color, ACCENT_COLORS[0]);
    }

    #[test]
    fn test_bounds_cover_home_and_markers() {
        let (records, index) = fixture();
        let map = project_map(&records, &index, CollegeRegistry::global(), &CurationOverlay::new(), &CategoryFilter::All);

        assert!(map.bounds.contains(map.home.latitude, map.home.longitude));
        for marker in &map.markers {
            assert!(map.bounds.contains(marker.latitude, marker.longitude));
        }
    }

    #[test]
    fn test_viewport_refits_only_on_set_change() {
        let (records, index) = fixture();
        let registry = CollegeRegistry::global();
        let mut tracker = ViewportTracker::new(ViewportPolicy::default());
        let mut overlay = CurationOverlay::new();

        let map = project_map(&records, &index, registry, &overlay, &CategoryFilter::All);
        assert!(tracker.observe(&map));
        assert!(!tracker.observe(&map));

        overlay.remove("Baylor University");
        let map = project_map(&records, &index, registry, &overlay, &CategoryFilter::All);
        assert!(tracker.observe(&map));
        assert_eq!(tracker.refits(), 2);
    }

    #[test]
    fn test_viewport_keeps_previous_fit_when_empty() {
        let (records, index) = fixture();
        let registry = CollegeRegistry::global();
        let mut tracker = ViewportTracker::new(ViewportPolicy::default());
        let mut overlay = CurationOverlay::new();

        let map = project_map(&records, &index, registry, &overlay, &CategoryFilter::All);
        tracker.observe(&map);
        let before = *tracker.current().unwrap();

        for name in ["Oral Roberts University", "Baylor University", "University of Oklahoma"] {
            overlay.remove(name);
        }
        let empty = project_map(&records, &index, registry, &overlay, &CategoryFilter::All);

        assert!(!tracker.observe(&empty));
        assert_eq!(*tracker.current().unwrap(), before);
    }

    #[test]
    fn test_viewport_respects_max_zoom() {
        let policy = ViewportPolicy::default();
        let point = Bounds { south: 36.0, west: -96.0, north: 36.0, east: -96.0 };
        let viewport = policy.fit(&point);

        assert!(viewport.zoom <= policy.max_zoom);
        assert!(viewport.bounds.lng_span() >= policy.min_span() - 1e-12);
    }

    #[test]
    fn test_similarity_label_boundaries() {
        assert_eq!(SimilarityLabel::from_score(Some(0.30)).as_str(), "Very High");
        assert_eq!(SimilarityLabel::from_score(Some(0.25)).as_str(), "High");
        assert_eq!(SimilarityLabel::from_score(Some(0.20)).as_str(), "High");
        assert_eq!(SimilarityLabel::from_score(Some(0.1999)).as_str(), "Medium");
        assert_eq!(SimilarityLabel::from_score(Some(0.15)).as_str(), "Medium");
        assert_eq!(SimilarityLabel::from_score(Some(0.05)).as_str(), "Low");
        assert_eq!(SimilarityLabel::from_score(None).as_str(), "Low");
    }

    #[test]
    fn test_acceptance_rate_rendering() {
        assert_eq!(format_acceptance_rate(Some(0.567)), "57%");
        assert_eq!(format_acceptance_rate(Some(0.093)), "9%");
        assert_eq!(format_acceptance_rate(Some(1.0)), "100%");
        assert_eq!(format_acceptance_rate(None), PLACEHOLDER);
    }

    #[test]
    fn test_rank_tiers() {
        assert_eq!(RankTier::from_rank(Some(1)), RankTier::Top3);
        assert_eq!(RankTier::from_rank(Some(5)), RankTier::Top5);
        assert_eq!(RankTier::from_rank(Some(7)), RankTier::Top7);
        assert_eq!(RankTier::from_rank(Some(8)), RankTier::Rest);
        assert_eq!(RankTier::from_rank(None), RankTier::Rest);
    }

    #[test]
    fn test_summary_tables_follow_priority() {
        let (_, index) = fixture();
        let summary = project_summary(&index, &CurationOverlay::new());

        assert_eq!(summary.total_categories, 2);
        assert_eq!(summary.total_competitors, 4);
        assert_eq!(summary.tables[0].category, "Faith-Based Alternatives");
        assert_eq!(summary.tables[0].priority, 1);
        assert_eq!(summary.tables[1].category, "Regional Powerhouses");
    }

    #[test]
    fn test_summary_row_cells() {
        let (_, index) = fixture();
        let summary = project_summary(&index, &CurationOverlay::new());
        let oru = &summary.tables[0].rows[0];
        let ou = &summary.tables[1].rows[0];

        assert_eq!(oru.school_name, "Oral Roberts University");
        assert_eq!(oru.similarity, "Very High");
        assert_eq!(oru.acceptance_rate, "57%");
        assert_eq!(oru.religion, "Christian");
        assert_eq!(oru.rank_tier, RankTier::Top3);

        assert_eq!(ou.religion, PLACEHOLDER);
        assert_eq!(ou.similarity, "Medium");
    }

    #[test]
    fn test_summary_keeps_category_with_every_school_removed() {
        let (_, index) = fixture();
        let mut overlay = CurationOverlay::new();
        overlay.remove("Oral Roberts University");
        overlay.remove("Baylor University");

        let summary = project_summary(&index, &overlay);

        assert_eq!(summary.total_categories, 2);
        assert_eq!(summary.total_competitors, 2);
        assert!(summary.tables[0].rows.is_empty());
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::Category("ALL".to_string()));
        assert_eq!(CategoryFilter::parse(" all"), CategoryFilter::Category(" all".to_string()));
        assert_eq!(
            CategoryFilter::parse("Faith-Based Alternatives").category(),
            Some("Faith-Based Alternatives")
        );
    }

    #[test]
    fn test_category_named_all_is_not_the_union() {
        let data = "Category,Description,Rank,School Name,Similarity Score,State,Type,Religion,Acceptance Rate,Niche Grade
All,Literal category,1,Baylor University,0.2,Texas,Private,Baptist,0.46,A-
Other,Second,1,Rice University,0.3,Texas,Private,,0.09,A+";
        let records = parse_competitors(data);
        let index = CategoryIndex::build(&records);
        let registry = CollegeRegistry::global();
        let overlay = CurationOverlay::new();

        let named = project_map(&records, &index, registry, &overlay, &CategoryFilter::parse("All"));
        assert_eq!(names(&named), vec!["Baylor University"]);
        assert_eq!(named.filter, "All");

        let union = project_map(&records, &index, registry, &overlay, &CategoryFilter::parse("all"));
        assert_eq!(union.school_count(), 2);
    }

    #[test]
    fn test_only_home_marker_is_fixed() {
        let (records, index) = fixture();
        let map = project_map(&records, &index, CollegeRegistry::global(), &CurationOverlay::new(), &CategoryFilter::All);

        assert!(!map.home.is_removable());
        assert!(map.markers.iter().all(Marker::is_removable));
    }
}
