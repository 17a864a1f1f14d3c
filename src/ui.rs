// UI layer: the search -> results -> select -> read loop. Each step is a
// `Step` value; `App::run` keeps applying them until one says exit.

use crate::api::WikiApi;
use crate::model::{decode_article, decode_search, SearchResponse};
use crate::output::write_article_to_file;
use crate::prompt::{is_yes, Prompt};
use crate::render::{print_article, print_results, Painter};
use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// The most recent search: the term as typed and what it returned.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub term: String,
    pub results: SearchResponse,
}

/// Settings fixed for the whole run.
#[derive(Debug, Clone)]
pub struct Options {
    pub limit: u32,
    pub write_to_file: bool,
    pub out_dir: PathBuf,
    /// Show a spinner while requests are in flight.
    pub progress: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            limit: 5,
            write_to_file: false,
            out_dir: PathBuf::from("."),
            progress: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    AskTerm,
    Search(String),
    Results,
    Select,
    Read(usize),
    ReturnToResults,
    Exit(u8),
}

/// Outcome of asking for an article index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexChoice {
    Index(usize),
    OutOfRange(i64),
    EndOfInput,
}

/// Ask until the answer parses as an integer, then check it against
/// `[0, max]`. Parse errors re-prompt; a value outside the range does not.
///
/// The upper bound is inclusive, so `max` itself is accepted even though
/// it is one past the last result.
pub fn prompt_for_index(
    prompt: &mut impl Prompt,
    out: &mut impl Write,
    painter: &Painter,
    max: usize,
) -> Result<IndexChoice> {
    loop {
        let Some(answer) = prompt.ask("Enter an index to read more:")? else {
            return Ok(IndexChoice::EndOfInput);
        };
        match answer.trim().parse::<i64>() {
            Ok(value) => {
                return Ok(match usize::try_from(value) {
                    Ok(index) if index <= max => IndexChoice::Index(index),
                    _ => IndexChoice::OutOfRange(value),
                });
            }
            Err(e) => writeln!(out, "{}", painter.input(&format!("{answer:?}: {e}")))?,
        }
    }
}

/// Interactive client. Generic over the API, the prompt and the output so
/// the whole loop can be driven from tests.
pub struct App<A, P, W> {
    api: A,
    prompt: P,
    out: W,
    painter: Painter,
    options: Options,
    session: Session,
}

impl<A: WikiApi, P: Prompt, W: Write> App<A, P, W> {
    pub fn new(api: A, prompt: P, out: W, painter: Painter, options: Options) -> Self {
        App {
            api,
            prompt,
            out,
            painter,
            options,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run until the user leaves. Returns the process exit code: 0 when the
    /// user declines to continue or input ends, 1 for an out-of-range index.
    /// Transport and filesystem failures come back as errors.
    pub fn run(&mut self, initial_term: Option<&str>) -> Result<u8> {
        let mut step = match initial_term {
            Some(term) if !term.is_empty() => Step::Search(term.to_string()),
            _ => Step::AskTerm,
        };
        loop {
            log::debug!("step: {step:?}");
            step = match step {
                Step::AskTerm => self.ask_term()?,
                Step::Search(term) => self.search(term)?,
                Step::Results => self.results()?,
                Step::Select => self.select()?,
                Step::Read(index) => self.read(index)?,
                Step::ReturnToResults => self.return_to_results()?,
                Step::Exit(code) => {
                    self.out.flush()?;
                    return Ok(code);
                }
            };
        }
    }

    fn ask_term(&mut self) -> Result<Step> {
        Ok(match self.prompt.ask("Enter a search string:")? {
            Some(term) => Step::Search(term.trim().to_string()),
            None => Step::Exit(0),
        })
    }

    fn search(&mut self, term: String) -> Result<Step> {
        writeln!(self.out, "{}", self.painter.input(&format!("Searching for:\t{term}")))?;
        let body = with_spinner(self.options.progress, "Searching...", || {
            self.api.search(&term, self.options.limit)
        })?;
        let results = decode_search(&body).unwrap_or_else(|e| {
            log::warn!("{e}");
            SearchResponse::default()
        });
        log::debug!("{} results for {term:?}", results.len());
        self.session = Session { term, results };
        Ok(Step::Results)
    }

    fn results(&mut self) -> Result<Step> {
        print_results(&mut self.out, &self.painter, &self.session.results)?;
        if !self.session.results.is_empty() {
            return Ok(Step::Select);
        }
        Ok(match self.prompt.ask("No results found. Try new search? (y/n)")? {
            Some(answer) if is_yes(&answer) => Step::AskTerm,
            _ => Step::Exit(0),
        })
    }

    fn select(&mut self) -> Result<Step> {
        let max = self.session.results.len();
        Ok(
            match prompt_for_index(&mut self.prompt, &mut self.out, &self.painter, max)? {
                IndexChoice::Index(index) => Step::Read(index),
                IndexChoice::OutOfRange(value) => {
                    log::debug!("index {value} outside [0, {max}]");
                    writeln!(self.out, "{}", self.painter.input("Invalid index."))?;
                    Step::Exit(1)
                }
                IndexChoice::EndOfInput => Step::Exit(0),
            },
        )
    }

    fn read(&mut self, index: usize) -> Result<Step> {
        let title = self
            .session
            .results
            .titles
            .get(index)
            .cloned()
            .ok_or_else(|| anyhow!("no search result at index {index}"))?;
        writeln!(self.out, "{}", self.painter.input(&format!("Reading entry: {index}")))?;

        let body = with_spinner(self.options.progress, "Loading article...", || {
            self.api.article(&title)
        })?;
        let page = decode_article(&body).unwrap_or_else(|e| {
            log::warn!("{e}");
            None
        });

        match page {
            Some(page) if self.options.write_to_file => {
                let path = write_article_to_file(&self.options.out_dir, &page)?;
                let msg = format!("Article written to {}", path.display());
                writeln!(self.out, "{}", self.painter.input(&msg))?;
            }
            Some(page) => print_article(&mut self.out, &self.painter, &page)?,
            None => {
                let msg = format!("No article content returned for {title}.");
                writeln!(self.out, "{}", self.painter.input(&msg))?;
            }
        }
        Ok(Step::ReturnToResults)
    }

    fn return_to_results(&mut self) -> Result<Step> {
        Ok(match self.prompt.ask("Return to results? (y/n)")? {
            Some(answer) if is_yes(&answer) => Step::Search(self.session.term.clone()),
            _ => Step::Exit(0),
        })
    }
}

/// Run `f` with a spinner showing `message` when `enabled`.
fn with_spinner<T>(
    enabled: bool,
    message: &'static str,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    if !enabled {
        return f();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let res = f();
    spinner.finish_and_clear();
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::LinePrompt;

    fn choose(input: &str, max: usize) -> (IndexChoice, String) {
        let mut prompt_out = Vec::new();
        let mut out = Vec::new();
        let mut prompt = LinePrompt::new(input.as_bytes(), &mut prompt_out, Painter::plain());
        let choice = prompt_for_index(&mut prompt, &mut out, &Painter::plain(), max).unwrap();
        (choice, String::from_utf8(out).unwrap())
    }

    #[test]
    fn index_prompt_repeats_until_a_number() {
        let (choice, out) = choose("abc\n\n2\n", 5);
        assert_eq!(choice, IndexChoice::Index(2));
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn index_prompt_trims_whitespace() {
        assert_eq!(choose("  3 \n", 5).0, IndexChoice::Index(3));
    }

    #[test]
    fn index_equal_to_count_passes_validation() {
        assert_eq!(choose("5\n", 5).0, IndexChoice::Index(5));
    }

    #[test]
    fn index_outside_range_is_rejected_without_reprompt() {
        assert_eq!(choose("6\n1\n", 5).0, IndexChoice::OutOfRange(6));
        assert_eq!(choose("-1\n1\n", 5).0, IndexChoice::OutOfRange(-1));
    }

    #[test]
    fn index_prompt_stops_at_end_of_input() {
        assert_eq!(choose("x\n", 5).0, IndexChoice::EndOfInput);
    }
}
