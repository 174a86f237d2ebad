//! Line-oriented front-end for `PostsSession`. Reads commands from stdin on its own thread and
//! prints the view after each one.
use crate::browser::filters::FilterField;
use crate::browser::session::{
    ApplyFilters, CancelDelete, ConfirmDelete, EditFilter, GetView, GoToPage, Load,
    PostsSession, RequestDelete, ShowAuthor, StepPage, ToggleBody,
};
use actix::{Addr, MailboxError};
use anyhow::{anyhow, bail, Context};
use futures::executor::block_on;
use std::io::{BufRead, Write};
use std::str::FromStr;

pub const HELP: &str = "\
commands:
  title <text>     filter by title (applied after a short pause, show to see it)
  author <text>    filter by author name
  handle <text>    filter by author handle
  apply            apply filters now
  page <n> | next | prev
  delete <id>      ask to delete a post, then: yes | no
  expand <id>      show or hide a post's body
  user <id>        show a post's author, close to hide
  reload | show | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Filter(FilterField, String),
    Apply,
    Page(usize),
    Next,
    Prev,
    Delete(i32),
    Confirm,
    Cancel,
    Expand(i32),
    Author(i32),
    CloseAuthor,
    Reload,
    Show,
    Help,
    Quit,
}

fn number<T: FromStr>(arg: &str, what: &str) -> anyhow::Result<T> {
    arg.trim()
        .parse()
        .map_err(|_| anyhow!("expected {} but got {:?}", what, arg))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, arg) = match line.find(' ') {
            Some(i) => (&line[..i], &line[i + 1..]),
            None => (line.trim_end(), ""),
        };
        let command = match word {
            "title" => Command::Filter(FilterField::Title, arg.to_owned()),
            "author" => Command::Filter(FilterField::AuthorName, arg.to_owned()),
            "handle" => Command::Filter(FilterField::AuthorHandle, arg.to_owned()),
            "apply" => Command::Apply,
            "page" => Command::Page(number(arg, "a page number")?),
            "next" => Command::Next,
            "prev" => Command::Prev,
            "delete" => Command::Delete(number(arg, "a post id")?),
            "yes" | "y" => Command::Confirm,
            "no" | "n" => Command::Cancel,
            "expand" => Command::Expand(number(arg, "a post id")?),
            "user" => Command::Author(number(arg, "a post id")?),
            "close" => Command::CloseAuthor,
            "reload" => Command::Reload,
            "" | "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => bail!("unknown command {:?}, try help", other),
        };
        Ok(command)
    }
}

/// Send `command` to the session. Returns false on quit.
pub async fn dispatch(addr: &Addr<PostsSession>, command: Command) -> Result<bool, MailboxError> {
    match command {
        Command::Filter(field, value) => addr.send(EditFilter { field, value }).await?,
        Command::Apply => addr.send(ApplyFilters).await?,
        Command::Page(n) => addr.send(GoToPage(n)).await?,
        Command::Next => addr.send(StepPage(1)).await?,
        Command::Prev => addr.send(StepPage(-1)).await?,
        Command::Delete(id) => addr.send(RequestDelete(id)).await?,
        Command::Confirm => addr.send(ConfirmDelete).await?,
        Command::Cancel => addr.send(CancelDelete).await?,
        Command::Expand(id) => addr.send(ToggleBody(id)).await?,
        Command::Author(id) => addr.send(ShowAuthor(Some(id))).await?,
        Command::CloseAuthor => addr.send(ShowAuthor(None)).await?,
        Command::Reload => addr.send(Load).await?,
        Command::Show | Command::Help => {}
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn stopped(e: MailboxError) -> anyhow::Error {
    anyhow!("posts session stopped: {}", e)
}

/// Blocking loop; call it from a thread other than the session's.
pub fn run(addr: Addr<PostsSession>) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    block_on(addr.send(Load)).map_err(stopped)?;
    let view = block_on(addr.send(GetView)).map_err(stopped)?;
    println!("{}\n{}", HELP, view);
    for line in stdin.lock().lines() {
        let line = line.context("couldn't read stdin")?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        if command == Command::Help {
            println!("{}", HELP);
            continue;
        }
        if !block_on(dispatch(&addr, command)).map_err(stopped)? {
            break;
        }
        let view = block_on(addr.send(GetView)).map_err(stopped)?;
        print!("{}", view);
        stdout.lock().flush()?;
    }
    Ok(())
}
