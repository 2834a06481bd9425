use anyhow::Result;
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::error;
use postmeta::build::generate;
use postmeta::config::Config;
use postmeta::validate::{render_reports, validate_directory, Format, Summary};
use std::path::{Path, PathBuf};

fn main() {
    let matches = App::new("postmeta")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate and validate post metadata for an HTML blog")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .global(true)
                .help("Increase log verbosity (repeatable)"),
        )
        .arg(
            Arg::with_name("project")
                .short("p")
                .long("project")
                .takes_value(true)
                .global(true)
                .help("Directory to search for postmeta.yaml (default: current directory)"),
        )
        .subcommand(
            SubCommand::with_name("generate")
                .about("Write posts.json from the posts directory")
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .takes_value(true)
                        .help("Override the output file"),
                ),
        )
        .subcommand(
            SubCommand::with_name("validate")
                .about("Check post files for missing or malformed metadata")
                .arg(
                    Arg::with_name("strict")
                        .long("strict")
                        .help("Treat warnings as failures"),
                )
                .arg(
                    Arg::with_name("html")
                        .long("html")
                        .help("Print the report as escaped HTML"),
                ),
        )
        .get_matches();

    let (name, sub) = matches.subcommand();
    let sub = match sub {
        Some(sub) => sub,
        None => std::process::exit(2),
    };

    // Global args land on whichever side of the subcommand they were given.
    let verbosity = matches
        .occurrences_of("verbose")
        .max(sub.occurrences_of("verbose"));
    if let Err(e) = postmeta::logging::init(verbosity) {
        eprintln!("postmeta: could not initialize logging: {}", e);
    }

    let project = sub
        .value_of("project")
        .or_else(|| matches.value_of("project"))
        .unwrap_or(".");

    let code = match run(name, sub, Path::new(project)) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            2
        }
    };
    std::process::exit(code);
}

fn run(name: &str, sub: &ArgMatches, project: &Path) -> Result<i32> {
    let mut config = Config::from_directory(project)?;

    match name {
        "generate" => {
            if let Some(output) = sub.value_of("output") {
                config.output_file = PathBuf::from(output);
            }
            let count = generate(&config)?;
            println!(
                "Wrote {} posts to {}",
                count,
                config.output_file.display()
            );
            Ok(0)
        }
        "validate" => {
            let reports = validate_directory(&config)?;
            let format = match sub.is_present("html") {
                true => Format::Html,
                false => Format::Text,
            };
            print!("{}", render_reports(&reports, format));
            Ok(Summary::of(&reports).exit_code(sub.is_present("strict")))
        }
        _ => Ok(2),
    }
}
