//! The interactive prompt loop
//!
//! Thin glue over the core: each one-line command maps onto one graph or
//! store operation. Core errors are printed and the loop continues; the
//! loop never terminates the process on a core error.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;

use lineage_core::{Lineage, PersonId};

use crate::files;
use crate::output;

/// Whether the loop keeps going after a command.
enum Flow {
    Continue,
    Exit,
}

/// One interactive session over a lineage.
pub struct Session {
    lineage: Lineage,
    data_dir: PathBuf,
    /// Set by every mutation, cleared by save/load; guards `exit` and
    /// lets `save` skip a no-op write.
    modified: bool,
}

impl Session {
    pub fn new(lineage: Lineage, data_dir: PathBuf) -> Self {
        Self {
            lineage,
            data_dir,
            modified: false,
        }
    }

    /// Drive the prompt until `exit` or end of input.
    pub fn run(&mut self, input: impl Iterator<Item = io::Result<String>>) -> anyhow::Result<()> {
        print_help();
        let mut input = input;
        loop {
            print!("# ");
            io::stdout().flush()?;
            let Some(line) = input.next() else {
                break;
            };
            let line = line?;
            match self.dispatch(line.trim()) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(err) => println!("error: {:#}", err),
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, line: &str) -> anyhow::Result<Flow> {
        let mut tokens = line.split_whitespace();
        let Some(command) = tokens.next() else {
            return Ok(Flow::Continue);
        };
        let args: Vec<&str> = tokens.collect();

        match command {
            "new" => self.add_new_person(&args)?,
            "addp" => {
                let (person, parent) = two_ids(&args)?;
                self.mutate(|lineage| lineage.add_parent(person, parent))?;
                println!("Parent added");
            }
            "addc" => {
                let (person, child) = two_ids(&args)?;
                self.mutate(|lineage| lineage.add_child(person, child))?;
                println!("Child added");
            }
            "adds" => {
                let (a, b) = two_ids(&args)?;
                self.mutate(|lineage| lineage.add_spouse(a, b))?;
                println!("Spouse added");
            }
            "rmrel" => {
                let (a, b) = two_ids(&args)?;
                self.mutate(|lineage| lineage.remove_relative(a, b))?;
                println!("Relation removed");
            }
            "rmperson" => {
                let id = one_id(&args)?;
                self.mutate(|lineage| lineage.remove_person(id))?;
                println!("Person removed");
            }
            "show" => self.show(&args)?,
            "showall" => self.show_all(),
            "showallrel" => self.show_all_relations(),
            "sp" => {
                let (from, to) = two_ids(&args)?;
                let path = self.lineage.shortest_path(from, to)?;
                println!("{}", output::path_line(&self.lineage, &path));
            }
            "save" => self.save(&args)?,
            "load" => self.load(&args)?,
            "help" => print_help(),
            "exit" => {
                if self.modified {
                    println!("Unsaved changes; `save` first or `exit!` to discard");
                } else {
                    return Ok(Flow::Exit);
                }
            }
            "exit!" => return Ok(Flow::Exit),
            _ => println!("Unknown command: {} (try `help`)", command),
        }
        Ok(Flow::Continue)
    }

    /// Run a mutation and mark the session dirty if it succeeded.
    fn mutate(
        &mut self,
        operation: impl FnOnce(&mut Lineage) -> lineage_core::Result<()>,
    ) -> anyhow::Result<()> {
        operation(&mut self.lineage)?;
        self.modified = true;
        Ok(())
    }

    fn add_new_person(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let (name, rest) = args
            .split_first()
            .context("usage: new <name> <m|f> [father-id] [mother-id]")?;
        let gender = rest
            .first()
            .context("usage: new <name> <m|f> [father-id] [mother-id]")?
            .parse()?;
        let father = rest.get(1).map(|token| parse_id(token)).transpose()?;
        let mother = rest.get(2).map(|token| parse_id(token)).transpose()?;

        let id = self
            .lineage
            .add_person(name.to_string(), gender, father, mother)?;
        self.modified = true;

        println!("Person added:");
        if let Some(view) = self.lineage.view(id) {
            output::print_person(&view);
        }
        Ok(())
    }

    fn show(&self, args: &[&str]) -> anyhow::Result<()> {
        let query = args.first().context("usage: show <id|name-fragment>")?;
        if query.chars().all(|c| c.is_ascii_digit()) {
            match self.lineage.view(parse_id(query)?) {
                Some(view) => output::print_person(&view),
                None => println!("No person with id {}", query),
            }
            return Ok(());
        }

        let matches = self.lineage.find_by_name(query);
        if matches.is_empty() {
            println!("No person matching {:?}", query);
        }
        for person in matches {
            if let Some(view) = self.lineage.view(person.id) {
                output::print_person(&view);
            }
        }
        Ok(())
    }

    fn show_all(&self) {
        println!("{} persons:", self.lineage.len());
        for person in self.lineage.all_persons() {
            println!("{}", output::person_line(person));
        }
    }

    fn show_all_relations(&self) {
        let relations = self.lineage.all_unique_relations();
        println!("{} relations:", relations.len());
        for relation in relations {
            println!("  {}", output::relation_line(&self.lineage, relation));
        }
    }

    fn save(&mut self, args: &[&str]) -> anyhow::Result<()> {
        if !self.modified {
            println!("No change since last save");
            return Ok(());
        }
        let path = match args.first() {
            Some(token) => PathBuf::from(token),
            None => files::timestamped_snapshot_path(&self.data_dir),
        };
        lineage_store::save(&self.lineage, &path)?;
        self.modified = false;
        println!("Saved to {}", path.display());
        Ok(())
    }

    fn load(&mut self, args: &[&str]) -> anyhow::Result<()> {
        let path = match args.first() {
            Some(token) => PathBuf::from(token),
            None => files::newest_snapshot(&self.data_dir)
                .with_context(|| format!("no snapshot found in {}", self.data_dir.display()))?,
        };
        let (lineage, report) = lineage_store::load(&path)?;
        self.lineage = lineage;
        self.modified = false;
        println!("{} from {}", report, path.display());
        Ok(())
    }
}

fn one_id(args: &[&str]) -> anyhow::Result<PersonId> {
    let [token] = args else {
        anyhow::bail!("expected one person id");
    };
    parse_id(token)
}

fn two_ids(args: &[&str]) -> anyhow::Result<(PersonId, PersonId)> {
    let [a, b] = args else {
        anyhow::bail!("expected two person ids");
    };
    Ok((parse_id(a)?, parse_id(b)?))
}

fn parse_id(token: &str) -> anyhow::Result<PersonId> {
    let id: u64 = token
        .parse()
        .with_context(|| format!("not a person id: {:?}", token))?;
    Ok(PersonId(id))
}

fn print_help() {
    println!(
        "Commands:\n\
         \x20 new <name> <m|f> [father-id] [mother-id]   add a person\n\
         \x20 addp <person-id> <parent-id>               add a parent\n\
         \x20 addc <person-id> <child-id>                add a child\n\
         \x20 adds <id> <id>                             add a spouse\n\
         \x20 rmrel <id> <id>                            remove a relation\n\
         \x20 rmperson <id>                              remove a person\n\
         \x20 show <id|name-fragment>                    find and show persons\n\
         \x20 showall                                    list all persons\n\
         \x20 showallrel                                 list all relations\n\
         \x20 sp <id> <id>                               shortest relational path\n\
         \x20 save [path]                                save a snapshot\n\
         \x20 load [path]                                load a snapshot\n\
         \x20 help                                       show this help\n\
         \x20 exit                                       leave the prompt"
    );
}
