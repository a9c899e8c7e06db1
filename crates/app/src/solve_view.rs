//! Terminal rendition of the solving view.

use std::io::{self, BufRead, Write};

use portal_core::model::{QuestionKind, Route};
use services::{LeaveOutcome, SessionError, SessionLoopService, SolvingSession};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    Next,
    Previous,
    /// One-based question number.
    Jump(usize),
    Answer(String),
    /// One-based choice number.
    Choose(usize),
    Submit,
    Leave(Option<Route>),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    Empty,
    MissingArgument(&'static str),
    InvalidNumber(String),
    InvalidRoute(String),
    Unknown(String),
}

impl std::fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "type a command, or `help`"),
            Self::MissingArgument(cmd) => write!(f, "{cmd} needs an argument"),
            Self::InvalidNumber(raw) => write!(f, "not a positive number: {raw}"),
            Self::InvalidRoute(raw) => write!(f, "unknown page: {raw}"),
            Self::Unknown(raw) => write!(f, "unknown command: {raw}"),
        }
    }
}

fn positive(raw: &str) -> Result<usize, ParseCommandError> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ParseCommandError::InvalidNumber(raw.to_owned())),
    }
}

impl std::str::FromStr for ViewCommand {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(h, r)| (h, r.trim()));

        match head {
            "" => Err(ParseCommandError::Empty),
            "n" | "next" => Ok(Self::Next),
            "p" | "prev" => Ok(Self::Previous),
            "j" | "jump" if rest.is_empty() => Err(ParseCommandError::MissingArgument("jump")),
            "j" | "jump" => positive(rest).map(Self::Jump),
            "a" | "answer" => Ok(Self::Answer(rest.to_owned())),
            "c" | "choose" if rest.is_empty() => Err(ParseCommandError::MissingArgument("choose")),
            "c" | "choose" => positive(rest).map(Self::Choose),
            "s" | "submit" => Ok(Self::Submit),
            "q" | "leave" if rest.is_empty() => Ok(Self::Leave(None)),
            "q" | "leave" => rest
                .parse()
                .map(|route| Self::Leave(Some(route)))
                .map_err(|_| ParseCommandError::InvalidRoute(rest.to_owned())),
            "h" | "help" => Ok(Self::Help),
            other => Err(ParseCommandError::Unknown(other.to_owned())),
        }
    }
}

const HELP: &str = "\
commands:
  n | next              next question
  p | prev              previous question
  j | jump <k>          go to question k
  a | answer <text>     answer the current question
  c | choose <k>        pick choice k of a single-choice question
  s | submit            submit the attempt
  q | leave [page]      leave the session (e.g. `leave /assignments`)";

pub struct Terminal<R> {
    input: R,
}

impl<R: BufRead> Terminal<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Next input line without its line ending, or `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        print!("> ");
        io::stdout().flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_owned()))
    }

    pub fn ask(&mut self, question: &str) -> io::Result<bool> {
        println!("{question} [y/N]");
        Ok(self
            .read_line()?
            .is_some_and(|line| matches!(line.trim(), "y" | "Y" | "yes")))
    }
}

fn render(solving: &SolvingSession) {
    let session = solving.session();
    let question = session.current_question();
    let progress = session.progress();

    let strip: String = session
        .status_strip()
        .iter()
        .map(|cell| match (cell.current, cell.answered) {
            (true, _) => '▶',
            (false, true) => '●',
            (false, false) => '○',
        })
        .collect();

    println!();
    println!(
        "[{}/{}] {:>3.0}%  {strip}",
        progress.position,
        progress.total,
        progress.fraction * 100.0
    );
    println!("{}", question.prompt());
    if question.kind() == QuestionKind::SingleChoice {
        for (i, choice) in question.choices().iter().enumerate() {
            println!("  {}. {choice}", i + 1);
        }
    }
    match session.current_answer() {
        Some(answer) => println!("your answer: {answer}"),
        None => println!("(unanswered)"),
    }
    if session.is_last() {
        println!("last question: `submit` when ready");
    }
}

/// Ask to leave for `target`, prompting on the terminal if answers are unsaved.
///
/// A terminal read failure keeps the learner on the session and is returned.
fn leave<R: BufRead>(
    solving: &mut SolvingSession,
    target: Route,
    terminal: &mut Terminal<R>,
) -> io::Result<LeaveOutcome> {
    let mut answer = Ok(false);
    let outcome = solving.attempt_leave(target, |prompt| {
        answer = terminal.ask(prompt.message());
        matches!(answer, Ok(true))
    });
    answer?;
    Ok(outcome)
}

/// What ended the solving view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewExit {
    Redirect(String),
    Left(Route),
    EndOfInput,
}

/// Drive `solving` from terminal commands until it is submitted or left.
///
/// # Errors
///
/// Returns `io::Error` if the terminal cannot be read or written.
pub async fn run<R: BufRead>(
    session_loop: &SessionLoopService,
    mut solving: SolvingSession,
    terminal: &mut Terminal<R>,
) -> io::Result<ViewExit> {
    let detail = Route::detail_for(solving.container());
    render(&solving);

    loop {
        let Some(line) = terminal.read_line()? else {
            if solving.is_dirty() {
                tracing::warn!("input closed; unsaved answers dropped");
            }
            return Ok(ViewExit::EndOfInput);
        };

        let command = match line.parse::<ViewCommand>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match command {
            ViewCommand::Next => {
                if !solving.move_next() {
                    println!("already on the last question");
                }
            }
            ViewCommand::Previous => {
                if !solving.move_previous() {
                    println!("already on the first question");
                }
            }
            ViewCommand::Jump(k) => {
                if let Err(err) = solving.jump_to(k - 1) {
                    println!("{err}");
                    continue;
                }
            }
            ViewCommand::Answer(text) => {
                if let Err(err) = solving.record_answer(text) {
                    println!("{err}");
                    continue;
                }
            }
            ViewCommand::Choose(k) => {
                let choice = solving
                    .session()
                    .current_question()
                    .choices()
                    .get(k - 1)
                    .cloned();
                let Some(choice) = choice else {
                    println!("no choice {k} on this question");
                    continue;
                };
                if let Err(err) = solving.record_answer(choice) {
                    println!("{err}");
                    continue;
                }
            }
            ViewCommand::Submit => {
                let prompt = match solving.request_submit() {
                    Ok(prompt) => prompt,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                };
                if !terminal.ask(&prompt.message())? {
                    solving.cancel_submit();
                    continue;
                }
                match session_loop.confirm_submit(&mut solving).await {
                    Ok(outcome) => return Ok(ViewExit::Redirect(outcome.redirect.location())),
                    Err(SessionError::TransientSubmitFailure(reason)) => {
                        println!("could not submit ({reason}); your answers are kept, try again");
                    }
                    Err(err) => println!("{err}"),
                }
            }
            ViewCommand::Leave(target) => {
                let target = target.unwrap_or(detail);
                match leave(&mut solving, target, terminal)? {
                    LeaveOutcome::Navigate(route) => return Ok(ViewExit::Left(route)),
                    LeaveOutcome::Cancelled => println!("staying on this attempt"),
                }
            }
            ViewCommand::Help => {
                println!("{HELP}");
                continue;
            }
        }
        render(&solving);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::model::{Container, ContainerId, Question, QuestionId};
    use services::{AnswerPolicy, Session};

    #[test]
    fn parses_navigation_commands() {
        assert_eq!("n".parse::<ViewCommand>(), Ok(ViewCommand::Next));
        assert_eq!(" prev ".parse::<ViewCommand>(), Ok(ViewCommand::Previous));
        assert_eq!("jump 3".parse::<ViewCommand>(), Ok(ViewCommand::Jump(3)));
        assert_eq!(
            "j 0".parse::<ViewCommand>(),
            Err(ParseCommandError::InvalidNumber("0".into()))
        );
        assert_eq!(
            "jump".parse::<ViewCommand>(),
            Err(ParseCommandError::MissingArgument("jump"))
        );
    }

    #[test]
    fn answer_keeps_inner_spaces() {
        assert_eq!(
            "a  three quarters ".parse::<ViewCommand>(),
            Ok(ViewCommand::Answer("three quarters".into()))
        );
        assert_eq!("answer".parse::<ViewCommand>(), Ok(ViewCommand::Answer(String::new())));
    }

    #[test]
    fn leave_accepts_a_page() {
        assert_eq!("q".parse::<ViewCommand>(), Ok(ViewCommand::Leave(None)));
        assert_eq!(
            "leave /practice/10".parse::<ViewCommand>(),
            Ok(ViewCommand::Leave(Some(Route::PracticeDetail(ContainerId::new(10)))))
        );
        assert!(matches!(
            "leave /elsewhere".parse::<ViewCommand>(),
            Err(ParseCommandError::InvalidRoute(_))
        ));
    }

    struct BrokenInput;

    impl io::Read for BrokenInput {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed"))
        }
    }

    fn dirty_session() -> SolvingSession {
        let container = Container::assignment(ContainerId::new(1));
        let questions = vec![Question::short_text(QuestionId::new(1), "Name a river").unwrap()];
        let mut solving =
            SolvingSession::new(Session::new(container, questions).unwrap(), AnswerPolicy::Lenient);
        solving.record_answer("Nile").unwrap();
        solving
    }

    #[test]
    fn leave_prompt_read_error_is_returned_and_session_kept() {
        let mut solving = dirty_session();
        let mut terminal = Terminal::new(io::BufReader::new(BrokenInput));

        let err = leave(&mut solving, Route::Assignments, &mut terminal).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(solving.is_dirty());
        assert_eq!(solving.session().current_answer(), Some("Nile"));
    }

    #[test]
    fn leave_prompt_confirmation_navigates() {
        let mut solving = dirty_session();
        let mut terminal = Terminal::new(&b"y\n"[..]);

        let outcome = leave(&mut solving, Route::Assignments, &mut terminal).unwrap();
        assert_eq!(outcome, LeaveOutcome::Navigate(Route::Assignments));
        assert!(!solving.is_dirty());
    }

    #[test]
    fn terminal_ask_reads_yes() {
        let mut terminal = Terminal::new(&b"yes\nno\n"[..]);
        assert!(terminal.ask("sure?").unwrap());
        assert!(!terminal.ask("sure?").unwrap());
        assert!(!terminal.ask("sure?").unwrap());
    }
}
