// MiniJava: lexer and parse-tree printer for a reduced Java-like language

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info};
use ratatui::{backend::CrosstermBackend, Terminal};

use minijava::parser::{GrammarOptions, ParseTreeNode, Parser, Token};
use minijava::parser::options::DEFAULT_MAX_DEPTH;
use minijava::ui::App;

/// Lex and parse a MiniJava source file and print its parse tree.
#[derive(Debug, ClapParser)]
#[command(name = "minijava", version, about)]
struct Args {
    /// Source file to parse
    file: PathBuf,

    /// Print the token stream instead of the tree
    #[arg(long, conflicts_with_all = ["sexpr", "view"])]
    tokens: bool,

    /// Print the tree as a single s-expression
    #[arg(long, conflicts_with = "view")]
    sexpr: bool,

    /// Browse source, tokens and tree in a terminal UI
    #[arg(long)]
    view: bool,

    /// Require ';' after every variable declaration
    #[arg(long)]
    strict_semicolons: bool,

    /// Accept function declarations as class members
    #[arg(long)]
    class_functions: bool,

    /// Maximum nesting of parentheses, blocks and classes
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn grammar_options(&self) -> GrammarOptions {
        GrammarOptions::default()
            .with_strict_semicolons(self.strict_semicolons)
            .with_class_functions(self.class_functions)
            .with_max_depth(self.max_depth)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(&args.file)
        .map_err(|e| format!("cannot read '{}': {}", args.file.display(), e))?;
    debug!("read {} bytes from {}", source.len(), args.file.display());

    let tokens = minijava::tokenize(&source)?;
    if args.tokens {
        for token in &tokens {
            println!("{}\t{}\t{}", token.line, token.kind, token.lexeme);
        }
        return Ok(());
    }

    let tree = Parser::with_options(&tokens, args.grammar_options()).parse_program()?;
    info!(
        "parsed {}: {} tokens, {} nodes",
        args.file.display(),
        tokens.len(),
        tree.node_count()
    );

    if args.view {
        run_viewer(source, tokens, tree)?;
    } else if args.sexpr {
        println!("{}", tree.sexpr());
    } else {
        print!("{}", tree);
    }

    Ok(())
}

fn run_viewer(
    source: String,
    tokens: Vec<Token>,
    tree: ParseTreeNode,
) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(source, tokens, tree);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(Into::into)
}
