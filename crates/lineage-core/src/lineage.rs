//! The relationship graph
//!
//! [`Lineage`] is the arena that owns every person node and every directed
//! labeled edge. All mutation goes through its invariant-checked entry
//! points, which create and destroy edges strictly in complementary pairs.
//! External callers hold plain [`PersonId`]s and read derived relatives
//! through [`PersonView`]s.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::limits::{self, MAX_TRAVERSAL_NODES};
use crate::person::{Gender, Person, PersonId, PersonView};
use crate::relation::Relation;
use crate::traversal;

/// A directed labeled edge: `to` is `from`'s `relation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Edge {
    pub from: PersonId,
    pub to: PersonId,
    pub relation: Relation,
}

/// The relationship graph.
#[derive(Debug, Clone, Default)]
pub struct Lineage {
    persons: HashMap<PersonId, Person>,
    /// Directed edges in insertion order; order is observable through
    /// `children()` and `all_relations()`.
    edges: Vec<Edge>,
    /// Next id to hand out. Only ever grows, so ids are never reused.
    next_id: u64,
}

impl Lineage {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Person lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a person, optionally linking parents in the same operation.
    ///
    /// The whole operation is atomic: if a parent link fails (for example
    /// two parents of the same gender), the new person is removed again and
    /// the error is returned. The consumed id is not reused.
    pub fn add_person(
        &mut self,
        name: impl Into<String>,
        gender: Gender,
        father: Option<PersonId>,
        mother: Option<PersonId>,
    ) -> Result<PersonId> {
        let name = name.into();
        limits::validate_person_name(&name)?;
        for parent in [father, mother].into_iter().flatten() {
            self.require(parent)?;
        }

        let id = PersonId(self.next_id);
        self.next_id += 1;
        self.persons.insert(id, Person::new(id, name, gender));
        tracing::debug!("created person {} ({})", id, gender);

        for parent in [father, mother].into_iter().flatten() {
            if let Err(err) = self.add_child(parent, id) {
                self.purge(id);
                return Err(err);
            }
        }

        Ok(id)
    }

    /// Remove a person and every edge incident to them.
    pub fn remove_person(&mut self, id: PersonId) -> Result<()> {
        self.require(id)?;
        self.purge(id);
        tracing::debug!("removed person {}", id);
        Ok(())
    }

    fn purge(&mut self, id: PersonId) {
        self.edges.retain(|edge| edge.from != id && edge.to != id);
        self.persons.remove(&id);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Linking / unlinking
    // ─────────────────────────────────────────────────────────────────────────

    /// Record `child` as a child of `parent`.
    ///
    /// Inserts the complementary edge pair (Son/Daughter one way,
    /// Father/Mother the other) atomically.
    pub fn add_child(&mut self, parent: PersonId, child: PersonId) -> Result<()> {
        if parent == child {
            return Err(Error::SelfRelation);
        }
        let parent_gender = self.require(parent)?.gender;
        let child_gender = self.require(child)?.gender;

        let parent_label = Relation::parent_label(parent_gender);
        let child_label = Relation::child_label(child_gender);

        if self
            .outgoing(child)
            .any(|edge| edge.relation == parent_label)
        {
            return Err(Error::DuplicateParent(parent_label));
        }
        if let Some(existing) = self
            .relation_between(parent, child)
            .or_else(|| self.relation_between(child, parent))
        {
            return Err(Error::DuplicateRelation(existing));
        }

        self.edges.push(Edge {
            from: parent,
            to: child,
            relation: child_label,
        });
        self.edges.push(Edge {
            from: child,
            to: parent,
            relation: parent_label,
        });
        tracing::debug!("linked {} as {} of {}", parent, parent_label, child);
        Ok(())
    }

    /// Record `parent` as a parent of `person`.
    pub fn add_parent(&mut self, person: PersonId, parent: PersonId) -> Result<()> {
        self.add_child(parent, person)
    }

    /// Record a marriage between `a` and `b`.
    ///
    /// Requires exactly one male and one female party, neither already
    /// married. Inserts the Husband/Wife edge pair atomically.
    pub fn add_spouse(&mut self, a: PersonId, b: PersonId) -> Result<()> {
        if a == b {
            return Err(Error::SelfRelation);
        }
        let gender_a = self.require(a)?.gender;
        let gender_b = self.require(b)?.gender;
        if gender_a == gender_b {
            return Err(Error::GenderMismatch);
        }
        if let Some(existing) = self
            .relation_between(a, b)
            .or_else(|| self.relation_between(b, a))
        {
            return Err(Error::DuplicateRelation(existing));
        }
        if self.spouse_of(a).is_some() || self.spouse_of(b).is_some() {
            return Err(Error::DuplicateSpouse);
        }

        let (husband, wife) = if gender_a.is_male() { (a, b) } else { (b, a) };
        self.edges.push(Edge {
            from: husband,
            to: wife,
            relation: Relation::Wife,
        });
        self.edges.push(Edge {
            from: wife,
            to: husband,
            relation: Relation::Husband,
        });
        tracing::debug!("linked spouses {} and {}", husband, wife);
        Ok(())
    }

    /// Remove the relationship between `a` and `b`.
    ///
    /// Removes both directions of the pair as one atomic operation. Fails
    /// with [`Error::RelationNotFound`] when no edge exists in either
    /// direction; unlinking unrelated persons is an error, not a no-op.
    pub fn remove_relative(&mut self, a: PersonId, b: PersonId) -> Result<()> {
        self.require(a)?;
        self.require(b)?;
        let linked = |edge: &Edge| {
            (edge.from == a && edge.to == b) || (edge.from == b && edge.to == a)
        };
        if !self.edges.iter().any(|edge| linked(edge)) {
            return Err(Error::RelationNotFound);
        }
        self.edges.retain(|edge| !linked(edge));
        tracing::debug!("unlinked {} and {}", a, b);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lookup
    // ─────────────────────────────────────────────────────────────────────────

    /// Node data for an id, `None` if absent.
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.persons.get(&id)
    }

    /// Relative view for an id, `None` if absent.
    pub fn view(&self, id: PersonId) -> Option<PersonView<'_>> {
        self.persons.get(&id).map(|person| PersonView::new(self, person))
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.persons.contains_key(&id)
    }

    fn require(&self, id: PersonId) -> Result<&Person> {
        self.person(id).ok_or(Error::PersonNotFound(id))
    }

    /// Case-insensitive substring match over all names, in id order.
    pub fn find_by_name(&self, fragment: &str) -> Vec<&Person> {
        let fragment = fragment.to_lowercase();
        self.all_persons()
            .into_iter()
            .filter(|person| person.name.to_lowercase().contains(&fragment))
            .collect()
    }

    /// Every person, in creation (id) order.
    pub fn all_persons(&self) -> Vec<&Person> {
        let mut persons: Vec<&Person> = self.persons.values().collect();
        persons.sort_by_key(|person| person.id);
        persons
    }

    /// Every directed edge as a triple, in insertion order.
    pub fn all_relations(&self) -> Vec<(PersonId, PersonId, Relation)> {
        self.edges
            .iter()
            .map(|edge| (edge.from, edge.to, edge.relation))
            .collect()
    }

    /// One triple per undirected pair, keeping the first-encountered
    /// direction's label and dropping the complementary duplicate.
    pub fn all_unique_relations(&self) -> Vec<(PersonId, PersonId, Relation)> {
        let mut seen: HashSet<(PersonId, PersonId)> = HashSet::new();
        let mut unique = Vec::new();
        for edge in &self.edges {
            if seen.contains(&(edge.from, edge.to)) || seen.contains(&(edge.to, edge.from)) {
                continue;
            }
            seen.insert((edge.from, edge.to));
            unique.push((edge.from, edge.to, edge.relation));
        }
        unique
    }

    /// Label of the directed edge from `from` to `to`, if one exists.
    pub fn relation_between(&self, from: PersonId, to: PersonId) -> Option<Relation> {
        self.edges
            .iter()
            .find(|edge| edge.from == from && edge.to == to)
            .map(|edge| edge.relation)
    }

    fn spouse_of(&self, id: PersonId) -> Option<PersonId> {
        self.outgoing(id)
            .find(|edge| edge.relation.is_spousal())
            .map(|edge| edge.to)
    }

    /// Number of persons.
    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    /// Number of directed edges.
    pub fn relation_count(&self) -> usize {
        self.edges.len()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Traversal
    // ─────────────────────────────────────────────────────────────────────────

    /// Shortest relational path from `from` to `to`, inclusive.
    ///
    /// Edges are walked in both directions, so the path ignores which side
    /// of a relationship each edge was recorded on. `shortest_path(a, a)`
    /// is `[a]`. Visitation is capped at [`MAX_TRAVERSAL_NODES`].
    pub fn shortest_path(&self, from: PersonId, to: PersonId) -> Result<Vec<PersonId>> {
        self.shortest_path_bounded(from, to, MAX_TRAVERSAL_NODES)
    }

    /// [`Lineage::shortest_path`] with a caller-supplied node visitation cap.
    pub fn shortest_path_bounded(
        &self,
        from: PersonId,
        to: PersonId,
        max_nodes: usize,
    ) -> Result<Vec<PersonId>> {
        self.require(from)?;
        self.require(to)?;
        traversal::bfs_path(self, from, to, max_nodes).ok_or(Error::NoPathFound)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Snapshot restore support
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a person under a caller-chosen id, advancing the id counter
    /// past it so later [`Lineage::add_person`] calls never collide.
    ///
    /// Exists for the snapshot codec; new persons go through `add_person`.
    pub fn restore_person(
        &mut self,
        id: PersonId,
        name: impl Into<String>,
        gender: Gender,
    ) -> Result<()> {
        let name = name.into();
        limits::validate_person_name(&name)?;
        if self.persons.contains_key(&id) {
            return Err(Error::DuplicateId(id));
        }
        self.persons.insert(id, Person::new(id, name, gender));
        self.next_id = self.next_id.max(id.as_u64() + 1);
        Ok(())
    }

    /// Insert one raw directed edge.
    ///
    /// Exists for the snapshot codec, which replays edges that already come
    /// in complementary pairs: parent-count, gender, and pairing checks are
    /// bypassed. Self-edges, unknown ids, and a duplicate edge between the
    /// ordered pair are still rejected.
    pub fn restore_relation(
        &mut self,
        from: PersonId,
        to: PersonId,
        relation: Relation,
    ) -> Result<()> {
        if from == to {
            return Err(Error::SelfRelation);
        }
        self.require(from)?;
        self.require(to)?;
        if let Some(existing) = self.relation_between(from, to) {
            return Err(Error::DuplicateRelation(existing));
        }
        self.edges.push(Edge { from, to, relation });
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Edge iteration (crate-internal)
    // ─────────────────────────────────────────────────────────────────────────

    pub(crate) fn outgoing(&self, id: PersonId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter(move |edge| edge.from == id)
    }

    /// Neighbors across both edge directions. Pair edges make most
    /// neighbors appear twice; traversal dedups via its visited set.
    pub(crate) fn neighbors(&self, id: PersonId) -> impl Iterator<Item = PersonId> + '_ {
        self.edges.iter().filter_map(move |edge| {
            if edge.from == id {
                Some(edge.to)
            } else if edge.to == id {
                Some(edge.from)
            } else {
                None
            }
        })
    }
}
