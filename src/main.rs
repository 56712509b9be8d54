/*!
Main binary for jsontree.
*/

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::generate;
use clap_verbosity_flag::Verbosity;
use std::io::{self, IsTerminal, stdout};
use std::path::PathBuf;

use jsontree::parser::{
    self, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT, ParseOptions,
};
use jsontree::tokenizer::{self, LexOptions};
use jsontree::{commands, utils};

/// Parse a JSON document into a value tree and print it.
#[derive(Parser)]
#[command(
    name = "jt",
    version,
    about,
    long_about = None,
    disable_help_subcommand = true
)]
struct Args {
    /// Optional subcommands
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(value_name = "FILE")]
    /// Optional path to JSON file. If omitted, reads from STDIN
    input: Option<PathBuf>,
    /// Do not pretty-print the output, instead use compact
    #[arg(long, action = ArgAction::SetTrue)]
    compact: bool,
    /// Print the token stream instead of the parsed value
    #[arg(long, action = ArgAction::SetTrue)]
    tokens: bool,
    /// Display depth of the input document
    #[arg(long, action = ArgAction::SetTrue)]
    depth: bool,
    /// Do not display the parsed value
    #[arg(short, long, action = ArgAction::SetTrue)]
    no_display: bool,
    /// Accept a lone leading `0` in numbers (`0`, `0.5`; `01` stays invalid)
    #[arg(long, action = ArgAction::SetTrue)]
    allow_zero: bool,
    /// Decode backslash escapes in strings (`\uXXXX` is kept as is)
    #[arg(long, action = ArgAction::SetTrue)]
    decode_escapes: bool,
    /// Maximum nesting depth of arrays and objects (at most 512)
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_MAX_DEPTH,
        value_parser = RangedU64ValueParser::<usize>::new()
            .range(..=MAX_DEPTH_LIMIT as u64)
    )]
    max_depth: usize,
    #[command(flatten)]
    verbose: Verbosity,
}

/// Available subcommands for `jt`
#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    /// Generate additional documentation and/or completions
    Generate(GenerateCommand),
}

/// Generate shell completions and man page
#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate shell completions for the given shell to stdout.
    Shell { shell: clap_complete::Shell },
    /// Generate man pages to output directory if specified, else the current
    /// directory.
    Man {
        /// The output directory to write the man pages.
        #[clap(short, long)]
        output_dir: Option<PathBuf>,
    },
}

/// Entry point for main binary.
///
/// Reads the whole input (file or piped STDIN) into one buffer, lexes it, then
/// parses the token stream. The first error aborts with a non-zero exit code
/// and nothing is printed for the document.
fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    match &args.command {
        Some(Commands::Generate(cmd)) => match cmd {
            GenerateCommand::Shell { shell } => {
                let mut cmd = Args::command();
                generate(*shell, &mut cmd, "jt", &mut stdout().lock());
            }
            GenerateCommand::Man { output_dir } => {
                let pages = commands::generate::generate_man_pages(
                    &Args::command(),
                    output_dir.clone(),
                )?;
                for path in pages {
                    println!("Generated: {}", path.display());
                }
            }
        },
        None => run(&args)?,
    }

    Ok(())
}

/// Lex, parse, and display the input document.
fn run(args: &Args) -> Result<()> {
    if args.input.is_none() && io::stdin().is_terminal() {
        // No piped input and no file specified
        let mut cmd = Args::command();
        return Ok(cmd.print_help()?);
    }
    let text = utils::read_input(args.input.as_deref(), io::stdin().lock())?;

    let lex_options = LexOptions {
        allow_lone_zero: args.allow_zero,
        decode_escapes: args.decode_escapes,
    };
    let tokens = tokenizer::lex_with(&text, lex_options)
        .context("Failed to tokenize JSON")?;

    if args.tokens {
        return utils::write_tokens(&mut stdout().lock(), &tokens);
    }

    let parse_options = ParseOptions {
        max_depth: args.max_depth,
    };
    let value = parser::parse_document(&tokens, &parse_options)
        .context("Failed to parse JSON")?;

    if args.depth {
        println!("Depth: {}", value.depth());
    }

    if !args.no_display {
        utils::write_colored_value(
            &mut stdout().lock(),
            &value,
            !args.compact,
        )?;
    }

    Ok(())
}
