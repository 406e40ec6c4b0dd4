//! Kinship relation (edge label) vocabulary
//!
//! An edge `(from, to, relation)` reads as "`to` is `from`'s `relation`":
//! the label names what the target is to the source. Every real-world
//! relationship is stored as a complementary pair of directed edges, and
//! [`Relation::inverse`] is the total mapping between the two labels.

use crate::error::Error;
use crate::person::Gender;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six kinship edge labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Relation {
    Father,
    Mother,
    Son,
    Daughter,
    Husband,
    Wife,
}

impl Relation {
    /// All relation kinds, in display order.
    pub const ALL: [Relation; 6] = [
        Relation::Father,
        Relation::Mother,
        Relation::Son,
        Relation::Daughter,
        Relation::Husband,
        Relation::Wife,
    ];

    /// Textual form of the label, as written to snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Father => "Father",
            Relation::Mother => "Mother",
            Relation::Son => "Son",
            Relation::Daughter => "Daughter",
            Relation::Husband => "Husband",
            Relation::Wife => "Wife",
        }
    }

    /// Label pointing at a parent of the given gender.
    pub fn parent_label(gender: Gender) -> Relation {
        match gender {
            Gender::Male => Relation::Father,
            Gender::Female => Relation::Mother,
        }
    }

    /// Label pointing at a child of the given gender.
    pub fn child_label(gender: Gender) -> Relation {
        match gender {
            Gender::Male => Relation::Son,
            Gender::Female => Relation::Daughter,
        }
    }

    /// Label pointing at a spouse of the given gender.
    pub fn spouse_label(gender: Gender) -> Relation {
        match gender {
            Gender::Male => Relation::Husband,
            Gender::Female => Relation::Wife,
        }
    }

    /// True for `Father` and `Mother`.
    pub fn is_parental(&self) -> bool {
        matches!(self, Relation::Father | Relation::Mother)
    }

    /// True for `Son` and `Daughter`.
    pub fn is_filial(&self) -> bool {
        matches!(self, Relation::Son | Relation::Daughter)
    }

    /// True for `Husband` and `Wife`.
    pub fn is_spousal(&self) -> bool {
        matches!(self, Relation::Husband | Relation::Wife)
    }

    /// The label of the complementary edge.
    ///
    /// Given an edge `(a, b, self)`, returns the label of the paired edge
    /// `(b, a, _)`, which depends only on the relation class and on `a`'s
    /// gender (what `a` is to `b`).
    pub fn inverse(&self, source_gender: Gender) -> Relation {
        match self {
            Relation::Father | Relation::Mother => Relation::child_label(source_gender),
            Relation::Son | Relation::Daughter => Relation::parent_label(source_gender),
            Relation::Husband | Relation::Wife => Relation::spouse_label(source_gender),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relation {
    type Err = Error;

    /// Case-sensitive parse of the textual form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Father" => Ok(Relation::Father),
            "Mother" => Ok(Relation::Mother),
            "Son" => Ok(Relation::Son),
            "Daughter" => Ok(Relation::Daughter),
            "Husband" => Ok(Relation::Husband),
            "Wife" => Ok(Relation::Wife),
            _ => Err(Error::UnknownRelation(s.to_string())),
        }
    }
}
