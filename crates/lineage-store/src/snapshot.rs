//! JSON snapshot codec for the relationship graph
//!
//! On-disk format:
//!
//! ```json
//! {
//!   "headers": {"persons": ["id","name","gender"], "relations": ["id1","id2","relation"]},
//!   "persons":   [[0, "Ada", "f"], ...],
//!   "relations": [[0, 1, "Daughter"], ...]
//! }
//! ```
//!
//! Every directed edge is written, not deduplicated, so a round trip
//! reconstructs the exact edge multiset. Loading is best-effort: a
//! malformed row is skipped individually and counted in the returned
//! [`LoadReport`] while the rest of the document loads. That lenience is
//! confined to this codec; the graph's mutation API never downgrades
//! errors.

use std::fmt;
use std::fs;
use std::path::Path;

use lineage_core::{Gender, Lineage, PersonId, Relation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::StoreResult;

/// Column headers written at the top of every snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Headers {
    pub persons: Vec<String>,
    pub relations: Vec<String>,
}

impl Default for Headers {
    fn default() -> Self {
        Self {
            persons: ["id", "name", "gender"].map(String::from).to_vec(),
            relations: ["id1", "id2", "relation"].map(String::from).to_vec(),
        }
    }
}

/// On-disk snapshot document.
///
/// Rows stay loose JSON values so that one bad row never poisons the
/// whole table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub headers: Headers,
    #[serde(default)]
    pub persons: Vec<Value>,
    #[serde(default)]
    pub relations: Vec<Value>,
}

/// Row counts reported by a snapshot load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub persons_loaded: usize,
    pub persons_skipped: usize,
    pub relations_loaded: usize,
    pub relations_skipped: usize,
}

impl LoadReport {
    /// True when no row was dropped.
    pub fn is_clean(&self) -> bool {
        self.persons_skipped == 0 && self.relations_skipped == 0
    }

    pub fn skipped(&self) -> usize {
        self.persons_skipped + self.relations_skipped
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "loaded {} persons and {} relations",
            self.persons_loaded, self.relations_loaded
        )?;
        if !self.is_clean() {
            write!(f, " ({} malformed rows skipped)", self.skipped())?;
        }
        Ok(())
    }
}

impl Snapshot {
    /// Capture the full graph into a snapshot document.
    pub fn capture(lineage: &Lineage) -> Self {
        let persons = lineage
            .all_persons()
            .iter()
            .map(|person| json!([person.id.as_u64(), person.name.as_str(), person.gender.as_str()]))
            .collect();
        let relations = lineage
            .all_relations()
            .iter()
            .map(|(from, to, relation)| json!([from.as_u64(), to.as_u64(), relation.as_str()]))
            .collect();
        Self {
            headers: Headers::default(),
            persons,
            relations,
        }
    }

    /// Rebuild a graph from the snapshot, best-effort.
    ///
    /// Persons are created first, preserving their recorded ids (the
    /// graph's id counter advances past the maximum, so persons added
    /// later never collide). Relation rows are then replayed as raw edge
    /// insertions: the snapshot already contains each relationship as its
    /// complementary pair, so the mutation API's pairing checks are
    /// bypassed, though self-edges, unknown ids, and duplicate rows are
    /// still rejected and counted as skipped.
    pub fn restore(&self) -> (Lineage, LoadReport) {
        let mut lineage = Lineage::new();
        let mut report = LoadReport::default();

        for row in &self.persons {
            match parse_person_row(row) {
                Some((id, name, gender)) => match lineage.restore_person(id, name, gender) {
                    Ok(()) => report.persons_loaded += 1,
                    Err(err) => {
                        tracing::warn!("skipping person row {}: {}", row, err);
                        report.persons_skipped += 1;
                    }
                },
                None => {
                    tracing::warn!("skipping malformed person row: {}", row);
                    report.persons_skipped += 1;
                }
            }
        }

        for row in &self.relations {
            match parse_relation_row(row) {
                Some((from, to, relation)) => {
                    match lineage.restore_relation(from, to, relation) {
                        Ok(()) => report.relations_loaded += 1,
                        Err(err) => {
                            tracing::warn!("skipping relation row {}: {}", row, err);
                            report.relations_skipped += 1;
                        }
                    }
                }
                None => {
                    tracing::warn!("skipping malformed relation row: {}", row);
                    report.relations_skipped += 1;
                }
            }
        }

        (lineage, report)
    }
}

/// Serialize the graph to pretty-printed JSON at `path`.
pub fn save(lineage: &Lineage, path: &Path) -> StoreResult<()> {
    let snapshot = Snapshot::capture(lineage);
    let content = serde_json::to_string_pretty(&snapshot)?;
    fs::write(path, content)?;
    tracing::debug!(
        "saved {} persons and {} relations to {}",
        lineage.len(),
        lineage.relation_count(),
        path.display()
    );
    Ok(())
}

/// Load a graph from the JSON snapshot at `path`.
pub fn load(path: &Path) -> StoreResult<(Lineage, LoadReport)> {
    let content = fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&content)?;
    let (lineage, report) = snapshot.restore();
    if report.is_clean() {
        tracing::debug!("{} from {}", report, path.display());
    } else {
        tracing::warn!("partial load from {}: {}", path.display(), report);
    }
    Ok((lineage, report))
}

fn parse_person_row(row: &Value) -> Option<(PersonId, String, Gender)> {
    let columns = row_columns(row)?;
    let id = parse_id(&columns[0])?;
    let name = columns[1].as_str()?.to_string();
    let gender: Gender = columns[2].as_str()?.parse().ok()?;
    Some((id, name, gender))
}

fn parse_relation_row(row: &Value) -> Option<(PersonId, PersonId, Relation)> {
    let columns = row_columns(row)?;
    let from = parse_id(&columns[0])?;
    let to = parse_id(&columns[1])?;
    let relation: Relation = columns[2].as_str()?.parse().ok()?;
    Some((from, to, relation))
}

/// Both tables have three columns.
fn row_columns(row: &Value) -> Option<&Vec<Value>> {
    row.as_array().filter(|columns| columns.len() == 3)
}

/// Ids may be JSON numbers or numeric strings.
fn parse_id(value: &Value) -> Option<PersonId> {
    match value {
        Value::Number(n) => n.as_u64().map(PersonId),
        Value::String(s) => s.trim().parse().ok().map(PersonId),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineage_core::Gender;

    fn sample_lineage() -> Lineage {
        let mut lineage = Lineage::new();
        let father = lineage
            .add_person("Father", Gender::Male, None, None)
            .unwrap();
        let mother = lineage
            .add_person("Mother", Gender::Female, None, None)
            .unwrap();
        lineage
            .add_person("Child", Gender::Male, Some(father), Some(mother))
            .unwrap();
        lineage.add_spouse(father, mother).unwrap();
        lineage
    }

    #[test]
    fn test_round_trip_preserves_graph() {
        let original = sample_lineage();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lineage.json");

        save(&original, &path).unwrap();
        let (loaded, report) = load(&path).unwrap();

        assert!(report.is_clean());
        assert_eq!(loaded.len(), original.len());
        assert_eq!(loaded.relation_count(), original.relation_count());

        for person in original.all_persons() {
            let counterpart = loaded.person(person.id).unwrap();
            assert_eq!(counterpart.name, person.name);
            assert_eq!(counterpart.gender, person.gender);

            let original_view = original.view(person.id).unwrap();
            let loaded_view = loaded.view(person.id).unwrap();
            assert_eq!(
                loaded_view.parents().len(),
                original_view.parents().len()
            );
            assert_eq!(
                loaded_view.children().len(),
                original_view.children().len()
            );
            assert_eq!(
                loaded_view.spouse().is_some(),
                original_view.spouse().is_some()
            );
        }
    }

    #[test]
    fn test_ids_never_collide_after_load() {
        let original = sample_lineage();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lineage.json");

        save(&original, &path).unwrap();
        let (mut loaded, _) = load(&path).unwrap();

        let fresh = loaded.add_person("New", Gender::Female, None, None).unwrap();
        assert!(fresh.as_u64() > 2);
        assert!(original.person(fresh).is_none());
    }

    #[test]
    fn test_malformed_rows_are_skipped_and_counted() {
        let document = r#"{
            "headers": {"persons": ["id","name","gender"], "relations": ["id1","id2","relation"]},
            "persons": [
                [0, "Ada", "f"],
                ["1", "Alan", "m"],
                [2, "NoGender", "x"],
                [3, "", "f"],
                ["nope", "BadId", "m"],
                [4, "ShortRow"]
            ],
            "relations": [
                [0, 1, "Son"],
                [1, 0, "Mother"],
                [0, 0, "Wife"],
                [0, 9, "Son"],
                [1, 0, "Cousin"],
                [1, 0]
            ]
        }"#;

        let snapshot: Snapshot = serde_json::from_str(document).unwrap();
        let (lineage, report) = snapshot.restore();

        // Ada plus Alan (string id coerced); the rest are dropped.
        assert_eq!(report.persons_loaded, 2);
        assert_eq!(report.persons_skipped, 4);
        assert_eq!(lineage.len(), 2);

        // Only the well-formed complementary pair survives.
        assert_eq!(report.relations_loaded, 2);
        assert_eq!(report.relations_skipped, 4);
        assert_eq!(lineage.relation_count(), 2);
        assert!(!report.is_clean());
        assert_eq!(report.skipped(), 8);

        let ada = lineage.view(PersonId(0)).unwrap();
        assert_eq!(ada.sons().len(), 1);
        let alan = lineage.view(PersonId(1)).unwrap();
        assert_eq!(alan.mother().unwrap().id, PersonId(0));
    }

    #[test]
    fn test_missing_tables_load_empty() {
        let snapshot: Snapshot = serde_json::from_str("{}").unwrap();
        let (lineage, report) = snapshot.restore();
        assert!(lineage.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn test_load_rejects_unreadable_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(load(&path).is_err());
        assert!(load(&dir.path().join("absent.json")).is_err());
    }
}
