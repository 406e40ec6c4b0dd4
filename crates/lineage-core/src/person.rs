//! Person (node) types and the derived relative view

use crate::error::Error;
use crate::lineage::Lineage;
use crate::relation::Relation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a person.
///
/// Assigned by the graph at creation, monotonically increasing, never
/// reused even after the person is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(pub u64);

impl PersonId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PersonId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Gender of a person, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Short textual form, as written to snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "m",
            Gender::Female => "f",
        }
    }

    pub fn is_male(&self) -> bool {
        matches!(self, Gender::Male)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = Error;

    /// Accepts `m`/`male` and `f`/`female`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(Gender::Male),
            "f" | "female" => Ok(Gender::Female),
            _ => Err(Error::InvalidGender(s.to_string())),
        }
    }
}

/// A person in the lineage.
///
/// Plain node data. A person does not own its edges; relatives are derived
/// from the graph's edge set through [`PersonView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier
    pub id: PersonId,

    /// Person name (non-empty)
    pub name: String,

    /// Gender, immutable after creation
    pub gender: Gender,
}

impl Person {
    pub(crate) fn new(id: PersonId, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id,
            name: name.into(),
            gender,
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}({})", self.id, self.name)
    }
}

/// Borrow-based view of a person with typed relative accessors.
///
/// Handed out by [`Lineage::view`]. All accessors recompute from the graph's
/// edge set on each call, so a view created after a mutation always reflects
/// it; node degree is small enough that no caching is warranted.
#[derive(Debug, Clone, Copy)]
pub struct PersonView<'a> {
    lineage: &'a Lineage,
    person: &'a Person,
}

impl<'a> PersonView<'a> {
    pub(crate) fn new(lineage: &'a Lineage, person: &'a Person) -> Self {
        Self { lineage, person }
    }

    pub fn id(&self) -> PersonId {
        self.person.id
    }

    pub fn name(&self) -> &'a str {
        &self.person.name
    }

    pub fn gender(&self) -> Gender {
        self.person.gender
    }

    /// The underlying node data.
    pub fn person(&self) -> &'a Person {
        self.person
    }

    /// All persons this one has a directed edge to, with the edge label.
    fn outgoing(&self) -> impl Iterator<Item = (Relation, &'a Person)> + '_ {
        self.lineage.outgoing(self.person.id).filter_map(|edge| {
            self.lineage
                .person(edge.to)
                .map(|person| (edge.relation, person))
        })
    }

    fn related(&self, relation: Relation) -> Vec<&'a Person> {
        self.outgoing()
            .filter(|(label, _)| *label == relation)
            .map(|(_, person)| person)
            .collect()
    }

    fn unique_related(&self, relation: Relation) -> Option<&'a Person> {
        self.outgoing()
            .find(|(label, _)| *label == relation)
            .map(|(_, person)| person)
    }

    /// The recorded father, if any.
    pub fn father(&self) -> Option<&'a Person> {
        self.unique_related(Relation::Father)
    }

    /// The recorded mother, if any.
    pub fn mother(&self) -> Option<&'a Person> {
        self.unique_related(Relation::Mother)
    }

    /// Father first if present, then mother; 0 to 2 entries.
    pub fn parents(&self) -> Vec<&'a Person> {
        self.father().into_iter().chain(self.mother()).collect()
    }

    /// Sons then daughters, each in edge-creation order.
    pub fn children(&self) -> Vec<&'a Person> {
        let mut children = self.sons();
        children.extend(self.daughters());
        children
    }

    pub fn sons(&self) -> Vec<&'a Person> {
        self.related(Relation::Son)
    }

    pub fn daughters(&self) -> Vec<&'a Person> {
        self.related(Relation::Daughter)
    }

    pub fn husband(&self) -> Option<&'a Person> {
        self.unique_related(Relation::Husband)
    }

    pub fn wife(&self) -> Option<&'a Person> {
        self.unique_related(Relation::Wife)
    }

    /// The spouse regardless of gender, if any.
    pub fn spouse(&self) -> Option<&'a Person> {
        self.husband().or_else(|| self.wife())
    }

    /// Label of the directed edge from this person to `other`.
    ///
    /// `None` for unrelated pairs and for unknown ids; never an error.
    pub fn relation_with(&self, other: PersonId) -> Option<Relation> {
        self.lineage.relation_between(self.person.id, other)
    }

    /// All relatives grouped by relation kind, omitting empty kinds.
    pub fn relatives(&self) -> BTreeMap<Relation, Vec<&'a Person>> {
        let mut relatives: BTreeMap<Relation, Vec<&'a Person>> = BTreeMap::new();
        for (relation, person) in self.outgoing() {
            relatives.entry(relation).or_default().push(person);
        }
        relatives
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parsing() {
        assert_eq!("m".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("f".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("FEMALE".parse::<Gender>().unwrap(), Gender::Female);
        assert!(matches!(
            "x".parse::<Gender>(),
            Err(Error::InvalidGender(_))
        ));
        assert!("".parse::<Gender>().is_err());
    }

    #[test]
    fn test_person_display() {
        let person = Person::new(PersonId(3), "Ada", Gender::Female);
        assert_eq!(person.to_string(), "P3(Ada)");
    }
}
