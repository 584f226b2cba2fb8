#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;
extern crate regex_syntax;

extern crate libcustomlogger;
extern crate libfactors;

use std::error::Error;
use std::fmt;
use std::io::{self, Read, Write};
use std::process::{self, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use log::LogLevelFilter;
use regex_syntax::Expr;

use libfactors::tree::Node;

/// The graphviz child process is killed after this many seconds.
const GRAPHVIZ_TIMEOUT_SECS: u64 = 30;

#[derive(Debug)]
struct CliError {
    kind: CliErrorKind,
    error: Box<Error + Send + Sync>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CliErrorKind {
    ParseError,
    IoError(io::ErrorKind),
    GraphvizError,
}

impl CliError {
    fn graphviz(msg: &str) -> CliError {
        CliError {
            kind: CliErrorKind::GraphvizError,
            error: msg.to_string().into(),
        }
    }
}

impl From<regex_syntax::Error> for CliError {
    fn from(e: regex_syntax::Error) -> CliError {
        CliError {
            kind: CliErrorKind::ParseError,
            error: Box::new(e),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> CliError {
        CliError {
            kind: CliErrorKind::IoError(e.kind()),
            error: Box::new(e),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            CliErrorKind::ParseError => write!(f, "pattern error: {}", self.error),
            CliErrorKind::GraphvizError => write!(f, "graphviz error: {}", self.error),
            CliErrorKind::IoError(_) => self.error.fmt(f),
        }
    }
}

impl Error for CliError {
    fn description(&self) -> &str {
        self.error.description()
    }
}

fn main() {
    let matches = clap::App::new("factors")
        .version(crate_version!())
        .about("
Computes the literal factor sets of a regular expression.

Every string matching a pattern must contain certain literals in certain
positions; the Exact, Prefix, Suffix and Fragment sets name them, so a
multi-pattern literal filter can discard candidates before the real regex
engine runs. A component with no useful literal constraint prints as θ.")
        .setting(clap::AppSettings::SubcommandRequiredElseHelp)
        .arg(clap::Arg::with_name("verbose")
             .short("v")
             .long("verbose")
             .global(true)
             .help("enable debug logging on stderr"))
        .subcommand(clap::SubCommand::with_name("analyze")
             .about("print the factor sets of PATTERN")
             .arg(clap::Arg::with_name("PATTERN")
                  .help("an RE2-style regular expression")
                  .required(true)
                  .index(1)))
        .subcommand(clap::SubCommand::with_name("dot")
             .about("print the annotated parse tree in graphviz dot format")
             .arg(clap::Arg::with_name("PATTERN")
                  .help("an RE2-style regular expression")
                  .required(true)
                  .index(1))
             .arg(clap::Arg::with_name("svg")
                  .long("svg")
                  .help("render to SVG by piping through the graphviz `dot` command")))
        .get_matches();

    let level = if matches.is_present("verbose") {
        LogLevelFilter::Debug
    } else {
        LogLevelFilter::Info
    };
    libcustomlogger::init(level).expect("logger already installed");

    if let Err(e) = run(&matches) {
        let _ = writeln!(io::stderr(), "{}", e);
        process::exit(1);
    }
}

fn run(matches: &clap::ArgMatches) -> Result<(), CliError> {
    match matches.subcommand() {
        ("analyze", Some(sub)) => analyze_command(sub.value_of("PATTERN").unwrap_or("")),
        ("dot", Some(sub)) => {
            dot_command(sub.value_of("PATTERN").unwrap_or(""), sub.is_present("svg"))
        }
        _ => Ok(()),
    }
}

fn analyze_command(pattern: &str) -> Result<(), CliError> {
    let expr = Expr::parse(pattern)?;
    debug!("parsed `{}` as {:?}", pattern, expr);
    let f = libfactors::analyze(&expr);
    println!("Exact: {}", f.exact);
    println!("Prefix: {}", f.prefix);
    println!("Suffix: {}", f.suffix);
    println!("Fragment: {}", f.fragment);
    Ok(())
}

fn dot_command(pattern: &str, svg: bool) -> Result<(), CliError> {
    let expr = Expr::parse(pattern)?;
    let root = libfactors::parse_tree(&expr);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if svg {
        let rendered = render_svg(&root)?;
        out.write_all(&rendered)?;
    } else {
        root.dot(&mut out)?;
    }
    Ok(())
}

/// Pipes the dot text through `dot -Tsvg`, killing the child when it
/// exceeds the timeout.
fn render_svg(root: &Node) -> Result<Vec<u8>, CliError> {
    let mut child = Command::new("dot")
        .arg("-Tsvg")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = root.dot(&mut stdin) {
            let _ = child.kill();
            let _ = child.wait();
            return Err(CliError::from(e));
        }
    }

    let mut stdout = match child.stdout.take() {
        Some(s) => s,
        None => return Err(CliError::graphviz("no pipe from the dot process")),
    };
    // Drain the pipe off-thread so a large SVG can't deadlock the
    // child against the wait loop below.
    let reader = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stdout.read_to_end(&mut buf);
        buf
    });

    let deadline = Instant::now() + Duration::from_secs(GRAPHVIZ_TIMEOUT_SECS);
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            warn!(
                "graphviz did not finish within {}s, killing it",
                GRAPHVIZ_TIMEOUT_SECS
            );
            let _ = child.kill();
            let _ = child.wait();
            return Err(CliError::graphviz("timed out waiting for graphviz"));
        }
        thread::sleep(Duration::from_millis(50));
    };

    let rendered = reader.join().unwrap_or_else(|_| Vec::new());
    if !status.success() {
        return Err(CliError::graphviz("the dot process reported failure"));
    }
    Ok(rendered)
}
