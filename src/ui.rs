// UI layer: a numbered text menu on top of `BookRepository`.
// Input goes through the `Console` trait so the same flows run against
// a real terminal (dialoguer) or any line-oriented reader/writer pair.

use crate::book::{Book, Field, Slot};
use crate::repository::BookRepository;
use crate::storage::Storage;
use anyhow::{Context, Result};
use dialoguer::Input;
use std::io::{BufRead, Write};

/// Line-based prompt and output channel used by the menu.
pub trait Console {
    /// Show `label` and read one line without its line terminator.
    /// Returns `None` once input is exhausted.
    fn prompt(&mut self, label: &str) -> Result<Option<String>>;

    /// Print one line of output.
    fn say(&mut self, line: &str) -> Result<()>;
}

/// Interactive terminal console backed by `dialoguer`.
#[derive(Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    pub fn new() -> Self {
        TerminalConsole
    }
}

impl Console for TerminalConsole {
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        // Empty input is meaningful here (it skips a field), so permit it.
        let line: String = Input::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()
            .context("Failed to read from terminal")?;
        Ok(Some(line))
    }

    fn say(&mut self, line: &str) -> Result<()> {
        println!("{}", line);
        Ok(())
    }
}

/// Console over plain readers and writers, used for piped input.
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LineConsole { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line).context("Failed to read input")? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }
}

/// Raised when the console runs out of input in the middle of a flow.
#[derive(Debug, thiserror::Error)]
#[error("input closed")]
struct InputClosed;

fn ask(console: &mut impl Console, label: &str) -> Result<String> {
    console.prompt(label)?.ok_or_else(|| InputClosed.into())
}

/// Main interactive menu. Runs until the user picks "Exit" or input ends.
///
/// Storage failures, including a corrupt backing file, end the loop with
/// an error; nothing is repaired or rewritten in that case.
pub fn main_menu<S: Storage, C: Console>(repo: &BookRepository<S>, console: &mut C) -> Result<()> {
    match run_menu(repo, console) {
        Err(e) if e.is::<InputClosed>() => Ok(()),
        other => other,
    }
}

fn run_menu<S: Storage, C: Console>(repo: &BookRepository<S>, console: &mut C) -> Result<()> {
    loop {
        console.say("1. List all books")?;
        console.say("2. Add book")?;
        console.say("3. Update book")?;
        console.say("4. Remove book")?;
        console.say("5. Exit")?;

        let choice = ask(console, "Enter number")?;
        match choice.trim() {
            "1" => handle_list(repo, console)?,
            "2" => handle_add(repo, console)?,
            "3" => handle_update_menu(repo, console)?,
            "4" => handle_remove(repo, console)?,
            "5" => return Ok(()),
            _ => console.say("Invalid choice")?,
        }
    }
}

fn handle_list<S: Storage>(repo: &BookRepository<S>, console: &mut impl Console) -> Result<()> {
    let books = repo.list()?;
    if books.is_empty() {
        return console.say("No books found.");
    }

    let mut last = String::new();
    for book in &books {
        last = book.summary();
        console.say(&last)?;
    }
    console.say(&"-".repeat(last.chars().count()))
}

/// Prompt for every field, then store the new book in one step.
fn handle_add<S: Storage>(repo: &BookRepository<S>, console: &mut impl Console) -> Result<()> {
    let mut values = Vec::with_capacity(Field::ALL.len());
    for field in Field::ALL {
        values.push((field, ask(console, field.key())?));
    }

    let book = repo.add(&values)?;
    console.say(&format!("Book added with ID {}.", book.id))
}

fn handle_update_menu<S: Storage>(
    repo: &BookRepository<S>,
    console: &mut impl Console,
) -> Result<()> {
    loop {
        console.say("1. Choose id")?;
        console.say("2. Return main menu")?;
        if ask(console, "Enter number")?.trim() != "1" {
            return Ok(());
        }

        let Some(id) = ask_id(console)? else {
            continue;
        };
        match handle_update(repo, console, id)? {
            Some(_) => console.say("Book updated.")?,
            None => console.say("No book found with this ID. Choose another ID or exit to menu.")?,
        }
    }
}

/// Walk the chosen book field by field, showing the current value.
fn handle_update<S: Storage>(
    repo: &BookRepository<S>,
    console: &mut impl Console,
    id: u64,
) -> Result<Option<Book>> {
    let Some(book) = repo.get(id)? else {
        return Ok(None);
    };
    console.say(&format!(
        "Chosen ID: {} - {} - {}",
        book.id,
        Slot(book.author.as_ref()),
        Slot(book.title.as_ref())
    ))?;
    console.say("Press Space or Enter to skip category, type \"null\" to clear field")?;

    repo.update_with::<_, anyhow::Error>(id, |field, current| {
        console.say(&format!("{}: {}", field, Slot(current)))?;
        ask(console, "New value")
    })
}

fn handle_remove<S: Storage>(repo: &BookRepository<S>, console: &mut impl Console) -> Result<()> {
    let Some(id) = ask_id(console)? else {
        return Ok(());
    };
    if repo.remove(id)? {
        console.say("Book removed.")
    } else {
        console.say("No book found with this ID.")
    }
}

/// Read a book id. Reports and returns `None` for non-numeric input.
fn ask_id(console: &mut impl Console) -> Result<Option<u64>> {
    let raw = ask(console, "Enter book ID")?;
    match raw.trim().parse::<u64>() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            console.say("Invalid ID.")?;
            Ok(None)
        }
    }
}
