// Command-line interface for relit
//
// relit converts a literate program between its text source (prose with code in
// literal blocks) and its code source (code with prose in comments).
//
// The conversion direction, the output name and the language are guessed from
// the file names and can all be overridden:
//
//  relit foo.py.txt                 - text to code, writes foo.py
//  relit foo.py                     - code to text, writes foo.py.txt
//  relit -c script out.txt          - force code to text
//  relit - -t --language slang      - stdin to stdout
//  relit --diff foo.py.txt          - show how foo.py differs from the conversion
//
// Settings come from the embedded defaults, an optional relit.toml in the working
// directory, an explicit --config file and finally the command-line flags.

mod stream;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use relit_babel::diff::{diff, DiffTarget};
use relit_babel::{ConvertError, ConvertOptions, Direction, LanguageRegistry};
use relit_config::{ConfigError, Loader, OverwritePolicy, RelitConfig};
use stream::{StreamError, STDIO};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),
}

fn build_cli() -> Command {
    Command::new("relit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert literate programs between text and code sources")
        .long_about(
            "relit converts between the text source of a literate program\n\
            (prose, with code in '::' literal blocks) and its code source\n\
            (code, with prose in comments). Line numbers stay in sync.\n\n\
            The direction, output file and language are guessed from the file\n\
            names: 'foo.py.txt' converts to 'foo.py' and back.\n\n\
            Examples:\n  \
            relit foo.py.txt                 # text to code\n  \
            relit foo.py                     # code to text\n  \
            relit --strip foo.py.txt -       # only the code, to stdout\n  \
            relit --diff foo.py              # compare with foo.py.txt",
        )
        .arg(
            Arg::new("infile")
                .help("Input file ('-' for stdin)")
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("outfile")
                .help("Output file ('-' for stdout), guessed from the input name if omitted")
                .index(2)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("txt2code")
                .long("txt2code")
                .short('t')
                .help("Convert text source to code source")
                .action(ArgAction::SetTrue)
                .conflicts_with("code2txt"),
        )
        .arg(
            Arg::new("code2txt")
                .long("code2txt")
                .short('c')
                .help("Convert code source to text source")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("language")
                .long("language")
                .value_name("NAME")
                .help("Language of the code source (guessed from the file name if omitted)")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("comment-string")
                .long("comment-string")
                .value_name("MARKER")
                .help("Comment marker, overrides the language's one")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("code-indent")
                .long("code-indent")
                .value_name("N")
                .help("Indentation of code blocks in the text source")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("header-string")
                .long("header-string")
                .value_name("MARKER")
                .help("Marker that introduces a code header in the text source")
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("strip")
                .long("strip")
                .short('s')
                .help("Keep only the target language: drop comments or code")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("diff")
                .long("diff")
                .short('d')
                .help("Show differences to the existing output instead of writing it")
                .long_help(
                    "Print a unified diff between the existing output file and the\n\
                    conversion of the input. With '-' as output, convert there and\n\
                    back again and compare against the input.",
                )
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("overwrite")
                .long("overwrite")
                .value_name("POLICY")
                .help("Replace an existing output file: yes, update (if not newer) or no")
                .value_parser(["yes", "update", "no"]),
        )
        .arg(
            Arg::new("replace")
                .long("replace")
                .help("Rename the input to '<infile>~' after a successful conversion")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a relit.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Report repairs and state changes on stderr")
                .action(ArgAction::SetTrue),
        )
}

/// Everything a run needs, after guessing and overriding.
#[derive(Debug, Clone, PartialEq)]
struct Job {
    infile: String,
    outfile: String,
    options: ConvertOptions,
    overwrite: OverwritePolicy,
    replace: bool,
    diff: bool,
}

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    if let Err(err) = run(&matches) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let config = load_cli_config(matches)?;
    let registry = config.registry();
    let job = resolve_job(matches, &config, &registry)?;
    log::debug!(
        "{} -> {} ({:?}, language {})",
        job.infile,
        job.outfile,
        job.options.direction,
        job.options.language
    );

    if job.diff {
        return handle_diff(&job, &registry);
    }
    handle_convert(&job, &registry)
}

/// Flags that override a `[convert]` key, layered over every config file.
const CONVERT_OVERRIDES: &[(&str, &str)] = &[
    ("comment-string", "convert.comment_marker"),
    ("header-string", "convert.header_marker"),
    ("overwrite", "convert.overwrite"),
];

fn load_cli_config(matches: &ArgMatches) -> Result<RelitConfig, ConfigError> {
    let mut loader = Loader::new().with_optional_file("relit.toml");
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    for &(flag, key) in CONVERT_OVERRIDES {
        if let Some(value) = matches.get_one::<String>(flag) {
            loader = loader.set_override(key, value.as_str())?;
        }
    }
    if let Some(indent) = matches.get_one::<usize>("code-indent") {
        loader = loader.set_override("convert.code_indent", *indent as u64)?;
    }
    loader.build()
}

fn resolve_job(
    matches: &ArgMatches,
    config: &RelitConfig,
    registry: &LanguageRegistry,
) -> Result<Job, CliError> {
    let infile = matches
        .get_one::<String>("infile")
        .cloned()
        .ok_or(StreamError::MissingInput)?;
    let outfile_arg = matches.get_one::<String>("outfile").map(|s| s.as_str());

    let direction = if matches.get_flag("txt2code") {
        Direction::TextToCode
    } else if matches.get_flag("code2txt") {
        Direction::CodeToText
    } else {
        registry.guess_direction(&infile, outfile_arg)
    };

    let outfile = match outfile_arg {
        Some(outfile) => outfile.to_string(),
        None => registry.outfile_name(&infile, Some(direction)),
    };

    let language = match matches.get_one::<String>("language") {
        Some(language) => language.clone(),
        None => registry
            .guess_language(&infile, &outfile, direction)
            .unwrap_or_else(|| config.convert.language.clone()),
    };

    let options = config
        .convert_options(direction)
        .with_language(language)
        .with_strip(matches.get_flag("strip"));

    Ok(Job {
        infile,
        outfile,
        options,
        overwrite: config.convert.overwrite,
        replace: matches.get_flag("replace"),
        diff: matches.get_flag("diff"),
    })
}

/// Convert `infile` and write `outfile`, as far as the overwrite policy allows.
fn handle_convert(job: &Job, registry: &LanguageRegistry) -> Result<(), CliError> {
    stream::check_overwrite(&job.infile, &job.outfile, job.overwrite)?;
    let input = stream::read_input(&job.infile)?;
    let output = relit_babel::convert(&input, &job.options, registry)?;
    stream::write_output(&job.outfile, &output)?;
    log::info!("written to {}", job.outfile);
    stream::finish(&job.infile, &job.outfile, job.replace)?;
    Ok(())
}

/// Print how the existing output (or the input itself) differs from the conversion.
fn handle_diff(job: &Job, registry: &LanguageRegistry) -> Result<(), CliError> {
    let input = stream::read_input(&job.infile)?;
    let existing = if job.outfile == STDIO {
        None
    } else {
        Some(stream::read_input(&job.outfile)?)
    };
    let target = existing.as_deref().map(|text| DiffTarget {
        name: &job.outfile,
        text,
    });

    let outcome = diff(&input, &job.infile, target, &job.options, registry)?;
    match outcome.report {
        Some(report) => print!("{report}"),
        None => {
            println!("{}", outcome.old_name);
            println!("{}", outcome.new_name);
            println!("no differences found");
        }
    }
    Ok(())
}
