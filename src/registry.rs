// 📍 College Registry - static name → coordinate lookup
//
// Compiled into the binary, built once, never mutated.
// Lookups are EXACT: case-sensitive, no trimming, no fuzzy matching.
// A miss means "leave this school off the map", never an error.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// COLLEGE LOCATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CollegeLocation {
    /// Canonical name, the lookup key
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub state: &'static str,
}

/// The analyst's own institution. Always drawn on the map, never looked up.
pub const HOME_INSTITUTION: CollegeLocation = CollegeLocation {
    name: "The University of Tulsa",
    latitude: 36.1539,
    longitude: -95.9436,
    state: "Oklahoma",
};

// ============================================================================
// STATIC TABLE
// ============================================================================

/// Every college the map knows how to place, in display order.
pub const COLLEGES: &[CollegeLocation] = &[
    // Regional powerhouses
    CollegeLocation { name: "University of Oklahoma", latitude: 35.2058, longitude: -97.4458, state: "Oklahoma" },
    CollegeLocation { name: "Oklahoma State University", latitude: 36.1156, longitude: -97.0584, state: "Oklahoma" },
    CollegeLocation { name: "Texas Christian University", latitude: 32.7096, longitude: -97.3681, state: "Texas" },
    CollegeLocation { name: "Southern Methodist University", latitude: 32.8412, longitude: -96.7845, state: "Texas" },
    CollegeLocation { name: "University of Arkansas", latitude: 36.0686, longitude: -94.1748, state: "Arkansas" },
    CollegeLocation { name: "Tulane University", latitude: 29.9395, longitude: -90.1203, state: "Louisiana" },
    CollegeLocation { name: "Texas A&M University", latitude: 30.6187, longitude: -96.3365, state: "Texas" },
    CollegeLocation { name: "Baylor University", latitude: 31.5497, longitude: -97.1143, state: "Texas" },
    CollegeLocation { name: "Rice University", latitude: 29.7174, longitude: -95.4018, state: "Texas" },
    CollegeLocation { name: "University of Texas - Austin", latitude: 30.2849, longitude: -97.7341, state: "Texas" },

    // Faith-based alternatives
    CollegeLocation { name: "Oral Roberts University", latitude: 36.0373, longitude: -95.9145, state: "Oklahoma" },
    CollegeLocation { name: "Abilene Christian University", latitude: 32.4587, longitude: -99.7373, state: "Texas" },
    CollegeLocation { name: "Houston Christian University", latitude: 29.7177, longitude: -95.4990, state: "Texas" },
    CollegeLocation { name: "Oklahoma Baptist University", latitude: 34.7847, longitude: -96.9281, state: "Oklahoma" },
    CollegeLocation { name: "Oklahoma Christian University", latitude: 35.6595, longitude: -97.4714, state: "Oklahoma" },
    CollegeLocation { name: "Oklahoma City University", latitude: 35.5186, longitude: -97.5303, state: "Oklahoma" },
    CollegeLocation { name: "Ouachita Baptist University", latitude: 34.2321, longitude: -93.0665, state: "Arkansas" },

    // Elite national universities
    CollegeLocation { name: "Wheaton College - Illinois", latitude: 41.8625, longitude: -88.1070, state: "Illinois" },
    CollegeLocation { name: "Washington University in St. Louis", latitude: 38.6488, longitude: -90.3108, state: "Missouri" },
    CollegeLocation { name: "Grinnell College", latitude: 41.7450, longitude: -92.7213, state: "Iowa" },
    CollegeLocation { name: "University of Chicago", latitude: 41.7886, longitude: -87.5987, state: "Illinois" },
    CollegeLocation { name: "Vanderbilt University", latitude: 36.1447, longitude: -86.8027, state: "Tennessee" },
    CollegeLocation { name: "Case Western Reserve University", latitude: 41.5045, longitude: -81.6082, state: "Ohio" },
    CollegeLocation { name: "University of Notre Dame", latitude: 41.7036, longitude: -86.2388, state: "Indiana" },
    CollegeLocation { name: "Davidson College", latitude: 35.5007, longitude: -80.8468, state: "North Carolina" },
    CollegeLocation { name: "Duke University", latitude: 36.0014, longitude: -78.9382, state: "North Carolina" },

    // In-state access points
    CollegeLocation { name: "University of Central Oklahoma", latitude: 35.6573, longitude: -97.4719, state: "Oklahoma" },
    CollegeLocation { name: "Northeastern State University", latitude: 36.0548, longitude: -94.8858, state: "Oklahoma" },
    CollegeLocation { name: "Rogers State University", latitude: 36.3742, longitude: -95.6019, state: "Oklahoma" },
    CollegeLocation { name: "Oklahoma State University - Oklahoma City", latitude: 35.5308, longitude: -97.5303, state: "Oklahoma" },
    CollegeLocation { name: "East Central University", latitude: 34.8678, longitude: -96.7728, state: "Oklahoma" },
    CollegeLocation { name: "Southwestern Oklahoma State University", latitude: 35.5222, longitude: -99.3870, state: "Oklahoma" },
    CollegeLocation { name: "Southeastern Oklahoma State University", latitude: 34.0399, longitude: -96.6714, state: "Oklahoma" },
    CollegeLocation { name: "Northwestern Oklahoma State University", latitude: 36.7378, longitude: -98.8637, state: "Oklahoma" },

    // Selective private competitors
    CollegeLocation { name: "Trinity University", latitude: 29.4577, longitude: -98.4888, state: "Texas" },
    CollegeLocation { name: "Austin College", latitude: 33.6151, longitude: -96.5972, state: "Texas" },
    CollegeLocation { name: "Hendrix College", latitude: 35.0984, longitude: -92.4407, state: "Arkansas" },
    CollegeLocation { name: "Saint Louis University", latitude: 38.6355, longitude: -90.2350, state: "Missouri" },
    CollegeLocation { name: "Colorado School of Mines", latitude: 39.7508, longitude: -105.2210, state: "Colorado" },

    // Not in the current data file; reachable through the add control
    CollegeLocation { name: "University of Kansas", latitude: 38.9543, longitude: -95.2558, state: "Kansas" },
    CollegeLocation { name: "Kansas State University", latitude: 39.1911, longitude: -96.5776, state: "Kansas" },
    CollegeLocation { name: "University of Missouri", latitude: 38.9404, longitude: -92.3277, state: "Missouri" },
    CollegeLocation { name: "Missouri State University", latitude: 37.1954, longitude: -93.2903, state: "Missouri" },
    CollegeLocation { name: "University of Denver", latitude: 39.6779, longitude: -104.9619, state: "Colorado" },
    CollegeLocation { name: "Creighton University", latitude: 41.2619, longitude: -95.9450, state: "Nebraska" },
    CollegeLocation { name: "Butler University", latitude: 39.8403, longitude: -86.1686, state: "Indiana" },
    CollegeLocation { name: "Drake University", latitude: 41.6005, longitude: -93.6539, state: "Iowa" },
    CollegeLocation { name: "DePaul University", latitude: 41.9247, longitude: -87.6534, state: "Illinois" },
    CollegeLocation { name: "Marquette University", latitude: 43.0389, longitude: -87.9288, state: "Wisconsin" },
    CollegeLocation { name: "Loyola University Chicago", latitude: 41.9988, longitude: -87.6594, state: "Illinois" },
    CollegeLocation { name: "Xavier University", latitude: 39.1486, longitude: -84.4746, state: "Ohio" },
    CollegeLocation { name: "University of Dayton", latitude: 39.7400, longitude: -84.1779, state: "Ohio" },
    CollegeLocation { name: "Elon University", latitude: 36.1026, longitude: -79.5058, state: "North Carolina" },
    CollegeLocation { name: "Furman University", latitude: 34.9242, longitude: -82.4397, state: "South Carolina" },
    CollegeLocation { name: "Rhodes College", latitude: 35.1495, longitude: -90.0052, state: "Tennessee" },
    CollegeLocation { name: "Sewanee: The University of the South", latitude: 35.2025, longitude: -85.9203, state: "Tennessee" },
    CollegeLocation { name: "Samford University", latitude: 33.4655, longitude: -86.7946, state: "Alabama" },
    CollegeLocation { name: "Belmont University", latitude: 36.1365, longitude: -86.7967, state: "Tennessee" },
    CollegeLocation { name: "Texas Tech University", latitude: 33.5843, longitude: -101.8759, state: "Texas" },
    CollegeLocation { name: "University of North Texas", latitude: 33.2073, longitude: -97.1526, state: "Texas" },
    CollegeLocation { name: "Texas State University", latitude: 29.8886, longitude: -97.9391, state: "Texas" },
    CollegeLocation { name: "University of Houston", latitude: 29.7199, longitude: -95.3422, state: "Texas" },
    CollegeLocation { name: "Louisiana State University", latitude: 30.4133, longitude: -91.1800, state: "Louisiana" },
    CollegeLocation { name: "University of Mississippi", latitude: 34.3665, longitude: -89.5348, state: "Mississippi" },
    CollegeLocation { name: "Mississippi State University", latitude: 33.4557, longitude: -88.7918, state: "Mississippi" },
    CollegeLocation { name: "University of Alabama", latitude: 33.2098, longitude: -87.5692, state: "Alabama" },
    CollegeLocation { name: "Auburn University", latitude: 32.6010, longitude: -85.4883, state: "Alabama" },
    CollegeLocation { name: "University of Kentucky", latitude: 38.0297, longitude: -84.5037, state: "Kentucky" },
];

// ============================================================================
// COLLEGE REGISTRY
// ============================================================================

/// Read-only index over [`COLLEGES`].
///
/// The only way a school outside the data file reaches the map is through the
/// curation overlay naming an entry that already exists here.
pub struct CollegeRegistry {
    entries: &'static [CollegeLocation],
    index: HashMap<&'static str, usize>,
}

impl CollegeRegistry {
    /// Shared registry built from the compiled-in table on first use
    pub fn global() -> &'static CollegeRegistry {
        static REGISTRY: OnceLock<CollegeRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| CollegeRegistry::from_table(COLLEGES))
    }

    /// Build a registry over an arbitrary static table.
    ///
    /// A name listed twice keeps its first entry.
    pub fn from_table(entries: &'static [CollegeLocation]) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, college) in entries.iter().enumerate() {
            index.entry(college.name).or_insert(position);
        }

        CollegeRegistry { entries, index }
    }

    pub fn get(&self, name: &str) -> Option<&'static CollegeLocation> {
        let entries = self.entries;
        self.index.get(name).map(|&position| &entries[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Canonical names in table order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.iter().map(|college| college.name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static CollegeLocation> + '_ {
        let entries = self.entries;
        entries
            .iter()
            .enumerate()
            .filter(|(position, college)| self.index.get(college.name) == Some(position))
            .map(|(_, college)| college)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl Default for CollegeRegistry {
    fn default() -> Self {
        CollegeRegistry::from_table(COLLEGES)
    }
}

// ============================================================================
// TESTS
// ============================================================================
