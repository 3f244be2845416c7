//! Interactive menu over a cat store
//!
//! Reads commands line by line and writes all feedback to one output
//! stream. Store failures are reported and the loop keeps going; only
//! terminal I/O errors end it early.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use tracing::debug;

use super::store::{Cat, CatStore};
use crate::engine::cli::formatter::Printer;
use crate::engine::nosql::Document;

const MENU: [(char, &str); 8] = [
    ('1', "Show all cats"),
    ('2', "Find a cat by name"),
    ('3', "Update a cat's age by name"),
    ('4', "Add a feature to a cat by name"),
    ('5', "Delete a cat by name"),
    ('6', "Delete all cats"),
    ('7', "Add a new cat"),
    ('0', "Exit"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Console<'a, S: CatStore + ?Sized, R: BufRead, W: Write> {
    store: &'a S,
    input: R,
    out: Printer<W>,
}

impl<'a, S: CatStore + ?Sized, R: BufRead, W: Write> Console<'a, S, R, W> {
    pub fn new(store: &'a S, input: R, output: W) -> Self {
        Self { store, input, out: Printer::new(output) }
    }

    pub fn into_output(self) -> W {
        self.out.into_inner()
    }

    /// Run the menu until the user picks 0 or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Enter action number:")? else {
                self.out.blank()?;
                break;
            };
            if self.dispatch(choice.trim())? == Flow::Exit {
                break;
            }
        }
        self.out.line("Exiting.")
    }

    fn print_menu(&mut self) -> io::Result<()> {
        self.out.header("Choose an action")?;
        for (key, label) in MENU {
            self.out.line(&format!("{}. {}", key, label))?;
        }
        Ok(())
    }

    /// Ask for one line. `None` means end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        self.out.prompt(label)?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask for an integer until one parses.
    fn prompt_age(&mut self, label: &str) -> io::Result<Option<i64>> {
        loop {
            let Some(raw) = self.prompt(label)? else {
                return Ok(None);
            };
            match raw.trim().parse::<i64>() {
                Ok(age) => return Ok(Some(age)),
                Err(_) => self.out.warning("Age must be a number.")?,
            }
        }
    }

    fn dispatch(&mut self, choice: &str) -> io::Result<Flow> {
        match choice {
            "1" => self.show_all()?,
            "2" => {
                let Some(name) = self.prompt("Cat name:")? else { return Ok(Flow::Exit) };
                self.find(&name)?;
            }
            "3" => {
                let Some(name) = self.prompt("Cat name:")? else { return Ok(Flow::Exit) };
                let Some(age) = self.prompt_age("New age:")? else { return Ok(Flow::Exit) };
                self.update_age(&name, age)?;
            }
            "4" => {
                let Some(name) = self.prompt("Cat name:")? else { return Ok(Flow::Exit) };
                let Some(feature) = self.prompt("New feature:")? else { return Ok(Flow::Exit) };
                self.add_feature(&name, feature.trim())?;
            }
            "5" => {
                let Some(name) = self.prompt("Cat name:")? else { return Ok(Flow::Exit) };
                self.delete(&name)?;
            }
            "6" => {
                let Some(answer) = self.prompt("Delete ALL records? (yes/no):")? else {
                    return Ok(Flow::Exit);
                };
                if matches!(answer.trim().to_lowercase().as_str(), "yes" | "y") {
                    self.delete_all()?;
                } else {
                    self.out.info("Deletion cancelled.")?;
                }
            }
            "7" => {
                let Some(name) = self.prompt("Cat name:")? else { return Ok(Flow::Exit) };
                let Some(age) = self.prompt_age("Cat age:")? else { return Ok(Flow::Exit) };
                let Some(features) = self.prompt("Features, comma separated:")? else {
                    return Ok(Flow::Exit);
                };
                self.insert(Cat::new(&name, age, Cat::parse_features(&features)))?;
            }
            "0" => return Ok(Flow::Exit),
            _ => self.out.warning("Invalid choice. Try again.")?,
        }
        Ok(Flow::Continue)
    }

    /// Print a store failure; `None` tells the caller to stop this action.
    /// Logged at debug only; the message itself goes to the output.
    fn check<T, E: Display>(&mut self, action: &str, result: Result<T, E>) -> io::Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                debug!(action, error = %e, "store operation failed");
                self.out.error(&format!("{} failed: {}", action, e))?;
                Ok(None)
            }
        }
    }

    fn not_found(&mut self, name: &str) -> io::Result<()> {
        self.out.warning(&format!("Cat '{}' not found.", name))
    }

    fn show_all(&mut self) -> io::Result<()> {
        let result = self.store.list_all();
        let Some(docs) = self.check("Listing cats", result)? else { return Ok(()) };
        self.out.header("All cats")?;
        if docs.is_empty() {
            return self.out.item("(none)");
        }
        for doc in &docs {
            self.out.item(&describe(doc))?;
        }
        Ok(())
    }

    fn find(&mut self, name: &str) -> io::Result<()> {
        let result = self.store.find_by_name(name);
        match self.check("Finding cat", result)? {
            Some(Some(doc)) => {
                self.out.success(&format!("Cat '{}':", name))?;
                self.out.item(&describe(&doc))
            }
            Some(None) => self.not_found(name),
            None => Ok(()),
        }
    }

    fn update_age(&mut self, name: &str, age: i64) -> io::Result<()> {
        let result = self.store.set_age(name, age);
        match self.check("Updating age", result)? {
            Some(0) => self.not_found(name),
            Some(_) => self.out.success(&format!("Age of '{}' updated to {}.", name, age)),
            None => Ok(()),
        }
    }

    fn add_feature(&mut self, name: &str, feature: &str) -> io::Result<()> {
        let result = self.store.add_feature(name, feature);
        match self.check("Adding feature", result)? {
            Some(0) => self.not_found(name),
            Some(_) => self.out.success(&format!("Added feature '{}' to '{}'.", feature, name)),
            None => Ok(()),
        }
    }

    fn delete(&mut self, name: &str) -> io::Result<()> {
        let result = self.store.delete_by_name(name);
        match self.check("Deleting cat", result)? {
            Some(0) => self.not_found(name),
            Some(_) => self.out.success(&format!("Deleted cat '{}'.", name)),
            None => Ok(()),
        }
    }

    fn delete_all(&mut self) -> io::Result<()> {
        let result = self.store.delete_all();
        match self.check("Deleting all cats", result)? {
            Some(count) => self.out.success(&format!("Deleted {} record(s).", count)),
            None => Ok(()),
        }
    }

    fn insert(&mut self, cat: Cat) -> io::Result<()> {
        let result = self.store.insert_cat(&cat);
        match self.check("Adding cat", result)? {
            Some(id) => self.out.success(&format!("Added cat '{}' with id {}.", cat.name, id)),
            None => Ok(()),
        }
    }
}

/// One-line rendering: id followed by the record fields as JSON.
pub fn describe(doc: &Document) -> String {
    format!("[{}] {}", doc.id, doc.to_value())
}
