//! Wordle Entropy CLI
//!
//! Plays a game round by round, taking feedback from the operator or from a
//! known target word.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use wordle_entropy::{
    compare, load_word_lists, save_word_list, FeedbackPattern, FeedbackSource, GameReport,
    Outcome, RoundRecord, SolverConfig, SolverError, Suggestion, SuggestionSource, Word,
    WordPool, WordleSolver, DEFAULT_ROUNDS, DEFAULT_WORD_LENGTH,
};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// File of allowed guesses, one per line
    #[clap(long, default_value = "wordle-allowed-guesses.txt")]
    guesses: PathBuf,

    /// File of possible answers, one per line
    #[clap(long, default_value = "wordle-answers-alphabetical.txt")]
    answers: PathBuf,

    /// Word length
    #[clap(long, default_value_t = DEFAULT_WORD_LENGTH)]
    length: usize,

    /// Maximum number of rounds in a game
    #[clap(long, default_value_t = DEFAULT_ROUNDS)]
    rounds: usize,

    /// Upper bound on worker threads used for ranking
    #[clap(long)]
    threads: Option<usize>,

    /// Play this word first instead of ranking the opening round
    #[clap(long)]
    first_guess: Option<String>,

    /// Only guess words consistent with every clue so far
    #[clap(long)]
    hard: bool,

    /// More log output (-v, -vv, -vvv)
    #[clap(short, long, parse(from_occurrences))]
    verbose: usize,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play a game, entering the feedback for each guess (the default)
    Play {
        /// Compute feedback against this word instead of asking for it
        target: Option<String>,

        /// Choose every guess yourself instead of playing the suggestion
        #[clap(long)]
        manual: bool,

        /// Write the remaining guesses and answers here after every round
        #[clap(long, value_name = "DIR")]
        dump_dir: Option<PathBuf>,
    },
    /// Solve for a known word and print the guesses
    Solve { target: String },
    /// Show the best guesses for the opening round
    Suggest {
        #[clap(short = 'n', long, default_value_t = 10)]
        top: usize,
    },
    /// Solve every answer and report how many rounds each took
    Bench,
}

struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    fn new(message: &'static str) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let handle = thread::spawn(move || {
            let frames = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
            let mut i = 0;
            let mut stderr = io::stderr();
            while running_clone.load(Ordering::Relaxed) {
                let _ = write!(stderr, "\r{} {}", frames[i % frames.len()], message);
                let _ = stderr.flush();
                thread::sleep(Duration::from_millis(80));
                i += 1;
            }
            let _ = write!(stderr, "\r{}\r", " ".repeat(message.len() + 3));
            let _ = stderr.flush();
        });
        Self {
            running,
            handle: Some(handle),
        }
    }

    fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

/// Read one trimmed, lowercased line after printing `prompt`.
fn prompt(prompt: &str) -> Result<String, SolverError> {
    print!("{}: ", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed").into());
    }
    Ok(line.trim().to_lowercase())
}

fn describe(suggestion: &Suggestion) -> String {
    let note = if suggestion.is_possible_answer {
        "possible answer"
    } else {
        "not a possible answer"
    };
    match (suggestion.source, suggestion.entropy) {
        (SuggestionSource::FirstGuess, _) => {
            format!("Opening guess: {} ({})", suggestion.word, note)
        }
        (SuggestionSource::OnlyCandidate, _) => {
            format!("Only remaining answer: {}", suggestion.word)
        }
        (SuggestionSource::Entropy, Some(entropy)) => format!(
            "Best guess by entropy: {} ({:.3} bits, {})",
            suggestion.word, entropy, note
        ),
        (SuggestionSource::Entropy, None) => format!("Best guess: {}", suggestion.word),
    }
}

/// Interactive game: prints each round and asks for whatever is not known.
struct Console {
    word_length: usize,
    all_guesses: WordPool,
    target: Option<Word>,
    manual: bool,
    dump_dir: Option<PathBuf>,
}

impl FeedbackSource for Console {
    fn choose_guess(&mut self, round: usize, suggestion: Suggestion) -> Result<Word, SolverError> {
        println!("Round {}", round);
        println!("{}", describe(&suggestion));

        if !self.manual {
            return Ok(suggestion.word);
        }
        loop {
            let input = prompt("Word")?;
            match Word::parse(&input, self.word_length) {
                Ok(word) if self.all_guesses.contains(word.as_str()) => return Ok(word),
                Ok(_) => println!("Not a word!\n"),
                Err(e) => println!("Invalid: {}\n", e),
            }
        }
    }

    fn feedback(&mut self, _round: usize, guess: &Word) -> Result<FeedbackPattern, SolverError> {
        if let Some(target) = &self.target {
            return Ok(compare(target, guess));
        }
        loop {
            let input = prompt("Result")?;
            match FeedbackPattern::parse(&input, self.word_length) {
                Ok(pattern) => return Ok(pattern),
                Err(e) => println!("Invalid: {}\n", e),
            }
        }
    }

    fn round_finished(
        &mut self,
        record: &RoundRecord,
        solver: &WordleSolver,
    ) -> Result<(), SolverError> {
        println!(
            "{} {} {}",
            record.guess,
            record.pattern.to_symbol_string(),
            record.pattern
        );

        if record.pattern.is_win() {
            return Ok(());
        }

        println!("Remaining possibilities: {}", record.remaining);
        if record.remaining <= 10 {
            let words: Vec<&str> = solver.candidates().iter().map(Word::as_str).collect();
            println!("  {}", words.join(" "));
        }
        println!();

        if let Some(dir) = &self.dump_dir {
            save_word_list(
                solver.guesses(),
                dir.join(format!("guesses_filtered_{}.txt", record.round)),
            )?;
            save_word_list(
                solver.candidates(),
                dir.join(format!("answers_filtered_{}.txt", record.round)),
            )?;
        }
        Ok(())
    }
}

fn print_report(report: &GameReport) {
    for record in &report.rounds {
        println!(
            "Guess {}: {} → {}",
            record.round,
            record.guess.as_str().to_uppercase(),
            record.pattern
        );
    }
    println!();
    match report.outcome {
        Outcome::Solved { rounds } => println!("Solved in {} guesses.", rounds),
        Outcome::Exhausted => println!("Failed to solve within {} guesses.", report.rounds.len()),
    }
}

fn build_solver(cli: &Cli) -> Result<WordleSolver> {
    let mut config = SolverConfig::new()
        .with_word_length(cli.length)
        .with_rounds(cli.rounds)
        .with_hard_mode(cli.hard);
    if let Some(threads) = cli.threads {
        config = config.with_thread_limit(threads);
    }
    if let Some(first) = &cli.first_guess {
        let word = Word::parse(first, cli.length).context("invalid --first-guess")?;
        config = config.with_first_guess(word);
    }

    let lists = load_word_lists(&cli.guesses, &cli.answers, cli.length)
        .context("loading word lists")?;
    println!(
        "Loaded {} guesses and {} answers.",
        lists.guesses.len(),
        lists.answers.len()
    );

    let solver = WordleSolver::new(config, lists.guesses, lists.answers)?;
    if let Some(first) = &solver.config().first_guess {
        solver
            .lookup(first.as_str())
            .context("--first-guess is not in the guess list")?;
    }
    Ok(solver)
}

fn parse_target(solver: &WordleSolver, target: &str, length: usize) -> Result<Word> {
    let word = Word::parse(&target.to_lowercase(), length).context("invalid target word")?;
    if solver.lookup(word.as_str()).is_err() {
        bail!("The supplied target word, {}, is not a word!", word);
    }
    Ok(word)
}

fn run(cli: Cli) -> Result<()> {
    let mut solver = build_solver(&cli)?;

    match cli.command {
        None => play(&mut solver, &cli, None, false, None),
        Some(Command::Play {
            ref target,
            manual,
            ref dump_dir,
        }) => {
            let target = match target {
                Some(t) => Some(parse_target(&solver, t, cli.length)?),
                None => None,
            };
            play(&mut solver, &cli, target, manual, dump_dir.clone())
        }
        Some(Command::Solve { ref target }) => {
            let target = parse_target(&solver, target, cli.length)?;
            println!("Solving for: {}", target.as_str().to_uppercase());
            println!();

            let spinner = Spinner::new("Solving...");
            let report = solver.solve_for_target(&target);
            spinner.stop();
            print_report(&report?);
            Ok(())
        }
        Some(Command::Suggest { top }) => {
            let spinner = Spinner::new("Ranking guesses...");
            let guesses = solver.top_guesses(top);
            spinner.stop();

            let remaining = solver.remaining_count();
            println!();
            println!("Top {} guesses:", guesses.len());
            println!(
                "{:>4} {:>8} {:>8} {:>12} Possible?",
                "#", "Word", "Entropy", "Exp. Remain"
            );
            println!("{}", "-".repeat(50));
            for (i, analysis) in guesses.iter().enumerate() {
                println!(
                    "{:>4} {:>8} {:>8.3} {:>12.1} {}",
                    i + 1,
                    analysis.word.as_str().to_uppercase(),
                    analysis.entropy,
                    analysis.expected_remaining(remaining),
                    if analysis.is_possible_answer { "✓" } else { "" }
                );
            }
            println!();
            Ok(())
        }
        Some(Command::Bench) => {
            println!(
                "Running benchmark on all {} answers...",
                solver.all_answers().len()
            );

            let spinner = Spinner::new("Computing...");
            let start = Instant::now();
            let report = solver.benchmark();
            let elapsed = start.elapsed();
            spinner.stop();
            let report = report?;

            let total = report.games().max(1);
            println!("Guess distribution:");
            for (rounds, count) in &report.distribution {
                let pct = *count as f64 / total as f64 * 100.0;
                let bar = "█".repeat((*count * 40 / total).max(1));
                println!("  {:>2} guesses: {:>5} ({:>5.1}%) {}", rounds, count, pct, bar);
            }
            println!();
            println!("Average guesses: {:.3}", report.average_rounds());
            println!("Total words: {}", report.games());
            println!("Time elapsed: {:.2?}", elapsed);
            if report.exhausted > 0 {
                println!(
                    "Words not solved in {} guesses: {}",
                    solver.config().rounds,
                    report.exhausted
                );
            }
            Ok(())
        }
    }
}

fn play(
    solver: &mut WordleSolver,
    cli: &Cli,
    target: Option<Word>,
    manual: bool,
    dump_dir: Option<PathBuf>,
) -> Result<()> {
    if let Some(dir) = &dump_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating dump directory {}", dir.display()))?;
    }
    if target.is_none() {
        println!("Enter feedback as {} letters: g=green, y=yellow, b=black.", cli.length);
    }
    println!();

    let mut console = Console {
        word_length: cli.length,
        all_guesses: solver.all_guesses().clone(),
        target,
        manual,
        dump_dir,
    };
    let report = solver.play(&mut console)?;

    println!();
    match report.outcome {
        Outcome::Solved { rounds } => println!("Solved in {} rounds.", rounds),
        Outcome::Exhausted => println!("Not solved within {} rounds.", cli.rounds),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    run(cli)
}
