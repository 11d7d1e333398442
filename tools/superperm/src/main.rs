use std::fs::File;
use std::io::BufWriter;
use std::io::stdout;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use log::info;

use superperm_automata::ExplorationStrategy;
use superperm_automata::Nfa;
use superperm_automata::build_automaton;
use superperm_automata::check_state_limit;
use superperm_automata::determinize;
use superperm_automata::write_aut;
use superperm_heuristics::SolutionAnalysis;
use superperm_heuristics::greedy_superpermutation;
use superperm_heuristics::overlap_superpermutation;
use superperm_io::SymbolEncoding;
use superperm_io::SymbolParseError;
use superperm_io::format_symbols;
use superperm_io::parse_symbols;
use superperm_tools::Version;
use superperm_tools::VersionFlag;
use superperm_tools::verbosity::VerbosityFlag;
use superperm_utilities::SuperpermError;
use superperm_utilities::Timing;

#[derive(clap::Parser, Debug)]
#[command(name = "superperm", about = "A command line tool for superpermutations")]
struct Cli {
    #[command(flatten)]
    version: VersionFlag,

    #[command(flatten)]
    verbosity: VerbosityFlag,

    #[command(subcommand)]
    commands: Option<Commands>,

    #[arg(long, global = true)]
    timings: bool,
}

/// Defines the subcommands for this tool.
#[derive(Debug, Subcommand)]
enum Commands {
    Info(InfoArgs),
    Check(CheckArgs),
    Generate(GenerateArgs),
    Analyse(AnalyseArgs),
}

#[derive(clap::Args, Debug)]
#[command(about = "Constructs the recognising automaton and prints its size")]
struct InfoArgs {
    /// The number of symbols in the alphabet.
    n: usize,

    #[arg(long, help = "Abort when the automaton would exceed this number of states")]
    max_states: Option<usize>,

    #[arg(long, value_enum, default_value_t = ExplorationStrategy::BreadthFirst)]
    strategy: ExplorationStrategy,

    #[arg(long, help = "Write the automaton in the Aldebaran format to this file, or '-' for stdout")]
    output: Option<String>,
}

#[derive(clap::Args, Debug)]
#[command(about = "Checks whether the given string is a superpermutation")]
struct CheckArgs {
    n: usize,

    /// The candidate, written as one digit per symbol.
    string: String,

    #[arg(long, help = "Symbols are written as 1 up to n instead of 0 up to n-1")]
    one_indexed: bool,

    #[arg(long, help = "Abort when the automaton would exceed this number of states")]
    max_states: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Method {
    Greedy,
    Overlap,
}

#[derive(clap::Args, Debug)]
#[command(about = "Constructs a superpermutation using a heuristic")]
struct GenerateArgs {
    n: usize,

    #[arg(long, value_enum, default_value_t = Method::Greedy)]
    method: Method,

    #[arg(long, help = "Symbols are written as 1 up to n instead of 0 up to n-1")]
    one_indexed: bool,

    #[arg(long, help = "Check the result using the recognising automaton")]
    verify: bool,
}

#[derive(clap::Args, Debug)]
#[command(about = "Prints the cycles and transitions visited by the given solution")]
struct AnalyseArgs {
    n: usize,

    string: String,

    #[arg(long, help = "Symbols are written as 1 up to n instead of 0 up to n-1")]
    one_indexed: bool,
}

fn encoding(one_indexed: bool) -> SymbolEncoding {
    if one_indexed {
        SymbolEncoding::OneIndexed
    } else {
        SymbolEncoding::ZeroIndexed
    }
}

fn main() -> Result<ExitCode, SuperpermError> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .parse_default_env()
        .init();

    if cli.version.into() {
        eprintln!("{}", Version);
        return Ok(ExitCode::SUCCESS);
    }

    let mut timing = Timing::new();
    let mut exit_code = ExitCode::SUCCESS;

    if let Some(command) = cli.commands {
        match command {
            Commands::Info(args) => {
                check_state_limit(args.n, args.max_states)?;
                let nfa = Nfa::superpermutation(args.n)?;
                println!("Number of NFA states: {}", nfa.num_of_states());
                println!("Number of NFA transitions: {}", nfa.num_of_transitions());

                let dfa = determinize(&nfa, args.strategy, args.max_states, &mut timing)?;
                println!("{dfa}");

                match args.output.as_deref() {
                    Some("-") => write_aut(&mut stdout(), &dfa)?,
                    Some(file) => {
                        let mut writer = BufWriter::new(File::create(file)?);
                        write_aut(&mut writer, &dfa)?;
                    }
                    None => {}
                }
            }
            Commands::Check(args) => {
                let input = parse_symbols(&args.string, args.n, encoding(args.one_indexed))?;
                let dfa = build_automaton(args.n, args.max_states, &mut timing)?;

                let mut timer = timing.start("check");
                let first = dfa.first_accepting_prefix_length(&input)?;
                timer.finish();

                match first {
                    Some(length) if length == input.len() => {
                        println!("The string is a superpermutation");
                    }
                    Some(length) => {
                        println!("The string is a superpermutation, already its prefix of length {length} is one");
                    }
                    None => {
                        println!("The string is not a superpermutation");
                        exit_code = ExitCode::FAILURE;
                    }
                }
            }
            Commands::Generate(args) => {
                let symbol_encoding = encoding(args.one_indexed);
                if args.n > symbol_encoding.max_alphabet_size() {
                    return Err(SymbolParseError::UnsupportedAlphabet {
                        num_of_symbols: args.n,
                        encoding: symbol_encoding,
                    }
                    .into());
                }

                let mut timer = timing.start("generate");
                let solution = match args.method {
                    Method::Greedy => greedy_superpermutation(args.n)?,
                    Method::Overlap => overlap_superpermutation(args.n)?,
                };
                timer.finish();

                info!("Constructed a superpermutation of length {}", solution.len());
                println!("{}", format_symbols(&solution, symbol_encoding));

                if args.verify {
                    let dfa = build_automaton(args.n, None, &mut timing)?;
                    if dfa.accepts(&solution)? {
                        info!("The automaton accepts the constructed superpermutation");
                    } else {
                        return Err("The constructed string is not accepted by the automaton".into());
                    }
                }
            }
            Commands::Analyse(args) => {
                let symbol_encoding = encoding(args.one_indexed);
                let solution = parse_symbols(&args.string, args.n, symbol_encoding)?;
                let analysis = SolutionAnalysis::new(&solution, args.n)?;

                for (index, cycle) in analysis.cycles().iter().enumerate() {
                    let rotations: Vec<String> = cycle
                        .iter()
                        .map(|rotation| format_symbols(rotation, symbol_encoding))
                        .collect();
                    println!("Cycle {index}: {}", rotations.join(" "));
                }

                for transition in analysis.transitions() {
                    println!(
                        "{} (cycle {}) -[{}]-> {} (cycle {})",
                        format_symbols(&transition.start_permutation, symbol_encoding),
                        transition.start_cycle,
                        transition.weight,
                        format_symbols(&transition.end_permutation, symbol_encoding),
                        transition.end_cycle
                    );
                }

                println!(
                    "Visited {} of the permutations in {} transitions",
                    analysis.num_of_visited(),
                    analysis.transitions().len()
                );
            }
        }
    }

    if cli.timings {
        timing.print();
    }

    Ok(exit_code)
}
