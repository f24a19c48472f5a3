//! Punto de entrada ("driver").
//!
//! Este módulo expone una CLI sobre [`tsqx::codegen::translate`]. La
//! salida traducida se escribe en stdout y los errores en stderr.

use anyhow::{self, bail, Context};
use clap::{self, crate_version, Arg, Command};

use std::{
    fs::File,
    io::{self, BufReader, Write},
};

use tsqx::{
    alias::Aliases,
    codegen::{self, TranslateError},
    config::{self, Config, RunFlags},
    error::Diagnostics,
};

fn main() -> anyhow::Result<()> {
    // Parsing de CLI
    let args = Command::new("tsqx")
        .version(crate_version!())
        .about("Translates TSQX figure descriptions into Asymptote")
        .arg(
            Arg::new("pre")
                .short('p')
                .long("pre")
                .help("Emit an Asymptote preamble"),
        )
        .arg(
            Arg::new("no-trans")
                .short('n')
                .long("no-trans")
                .help("Drop fill opacities"),
        )
        .arg(
            Arg::new("soft-label")
                .short('l')
                .long("soft-label")
                .help("Label points without dotting them by default"),
        )
        .arg(
            Arg::new("size")
                .short('s')
                .long("size")
                .takes_value(true)
                .value_name("SIZE")
                .default_value(config::DEFAULT_SIZE)
                .help("Picture size for the preamble"),
        )
        .arg(
            Arg::new("input")
                .index(1)
                .value_name("FILE")
                .help("Input file (stdin if absent)"),
        )
        .get_matches();

    let mut flags = RunFlags::empty();
    if args.is_present("pre") {
        flags |= RunFlags::PREAMBLE;
    }

    if args.is_present("no-trans") {
        flags |= RunFlags::NO_TRANSPARENCY;
    }

    if args.is_present("soft-label") {
        flags |= RunFlags::SOFT_LABEL;
    }

    let mut config = Config::with_flags(flags);
    if let Some(size) = args.value_of("size") {
        config.size = size.to_owned();
    }

    let aliases = Aliases::default();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    let result = match args.value_of("input") {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open for reading: {}", path))?;

            codegen::translate(BufReader::new(file), path, &config, &aliases, &mut output)
        }

        None => {
            let stdin = io::stdin();
            let input = stdin.lock();
            codegen::translate(input, "<stdin>", &config, &aliases, &mut output)
        }
    };

    match result {
        Ok(()) => Ok(()),

        Err(TranslateError::Syntax(error)) => {
            // El encabezado ya se emitió y debe preceder al reporte
            output.flush().context("Failed to flush stdout")?;
            eprint!("{}", Diagnostics::from(error).kind("Syntax error"));
            std::process::exit(1);
        }

        Err(TranslateError::Io(error)) => Err(error).context("Translation failed"),
        Err(error) => bail!("Translation failed: {}", error),
    }
}
