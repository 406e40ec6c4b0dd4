//! Console rendering for prompt results

use lineage_core::{Lineage, Person, PersonId, PersonView, Relation};

/// One-line listing entry, e.g. `   0  Ada  (f)`.
pub fn person_line(person: &Person) -> String {
    format!("{:>4}  {}  ({})", person.id.as_u64(), person.name, person.gender)
}

/// Detail block for one person and their relatives.
pub fn print_person(view: &PersonView<'_>) {
    println!("  id:      {}", view.id());
    println!("  name:    {}", view.name());
    println!("  gender:  {}", view.gender());
    for (relation, relatives) in view.relatives() {
        let names: Vec<&str> = relatives
            .iter()
            .map(|person| person.name.as_str())
            .collect();
        println!("  {:<8} {}", label(relation), names.join(", "));
    }
}

/// `Ada -[Son]-> Alan`
pub fn relation_line(lineage: &Lineage, relation: (PersonId, PersonId, Relation)) -> String {
    let (from, to, label) = relation;
    format!(
        "{} -[{}]-> {}",
        name_of(lineage, from),
        label,
        name_of(lineage, to)
    )
}

/// `Ada -> Alan -> Grace`
pub fn path_line(lineage: &Lineage, path: &[PersonId]) -> String {
    path.iter()
        .map(|id| name_of(lineage, *id))
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn name_of(lineage: &Lineage, id: PersonId) -> String {
    match lineage.person(id) {
        Some(person) => person.name.clone(),
        None => format!("#{}", id),
    }
}

fn label(relation: Relation) -> &'static str {
    match relation {
        Relation::Father => "father:",
        Relation::Mother => "mother:",
        Relation::Son => "sons:",
        Relation::Daughter => "daughters:",
        Relation::Husband => "husband:",
        Relation::Wife => "wife:",
    }
}
