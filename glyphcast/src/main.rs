use clap::Parser as ClapParser;
use rand::{SeedableRng, rngs::StdRng};
use std::{
    fs,
    io::{self, Read, Write},
    path::PathBuf,
    process,
};

use glyphcast::{Configuration, Encoder, SymbolClass};

#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source file to encode
    #[arg(help = "The source file to encode (stdin if omitted)")]
    input: Option<PathBuf>,

    /// Write the encoded program here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Symbol classes the output may not contain, on top of letters
    #[arg(long, value_enum, value_delimiter = ',')]
    forbid: Vec<SymbolClass>,

    /// Symbol classes to allow again, letters included
    #[arg(long, value_enum, value_delimiter = ',')]
    permit: Vec<SymbolClass>,

    /// Emit the bare expression without alias bindings
    #[arg(long)]
    no_aliasing: bool,

    /// Characters alias names are built from, in preference order
    #[arg(long, default_value = "")]
    identifiers: String,

    /// Randomized compaction passes
    #[arg(
        short = 'n',
        long,
        default_value_t = 50,
        allow_negative_numbers = true
    )]
    iterations: i64,

    /// Seed for the compaction passes, for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Print input and output sizes to stderr
    #[arg(long)]
    stats: bool,

    /// Log each derivation
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn configuration(&self) -> Configuration {
        let forbidden =
            Configuration::default().forbid_all(self.forbid.iter().copied());
        self.permit
            .iter()
            .fold(forbidden, |config, class| config.permit(*class))
            .with_aliasing(!self.no_aliasing)
            .with_identifier_symbols(self.identifiers.chars())
    }
}

fn read_input(input: Option<&PathBuf>) -> io::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn write_output(output: Option<&PathBuf>, program: &str) -> io::Result<()> {
    match output {
        Some(path) => fs::write(path, program),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(program.as_bytes())?;
            stdout.write_all(b"\n")?;
            stdout.flush()
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level),
    )
    .init();

    let source = match read_input(cli.input.as_ref()) {
        Ok(source) => source,
        Err(err) => {
            let name = cli
                .input
                .as_ref()
                .map_or("stdin".to_string(), |path| path.display().to_string());
            eprintln!("Error reading '{}': {}", name, err);
            process::exit(1);
        }
    };

    let encoder = Encoder::new(cli.configuration());
    let encoded = match cli.seed {
        Some(seed) => encoder.encode_with_rng(
            &source,
            cli.iterations,
            &mut StdRng::seed_from_u64(seed),
        ),
        None => encoder.encode(&source, cli.iterations),
    };
    let program = match encoded {
        Ok(program) => program,
        Err(err) => {
            eprintln!("Error encoding: {}", err);
            process::exit(1);
        }
    };

    if let Err(err) = write_output(cli.output.as_ref(), &program) {
        eprintln!("Error writing output: {}", err);
        process::exit(1);
    }

    if cli.stats {
        let ratio = if source.is_empty() {
            0.0
        } else {
            program.len() as f64 / source.len() as f64
        };
        eprintln!(
            "input: {} bytes, output: {} bytes, ratio: {:.1}",
            source.len(),
            program.len(),
            ratio
        );
    }
}
