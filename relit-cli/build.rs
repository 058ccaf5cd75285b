use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of build_cli() in src/main.rs, kept to the flags completions need.
// Build scripts can't access src/ modules.
fn build_cli() -> Command {
    let flag = |name: &'static str, short: char, help: &'static str| {
        Arg::new(name)
            .long(name)
            .short(short)
            .help(help)
            .action(ArgAction::SetTrue)
    };
    let value = |name: &'static str, help: &'static str, hint: ValueHint| {
        Arg::new(name).long(name).help(help).value_hint(hint)
    };

    Command::new("relit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert literate programs between text and code sources")
        .arg(
            Arg::new("infile")
                .help("Input file ('-' for stdin)")
                .index(1)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("outfile")
                .help("Output file ('-' for stdout)")
                .index(2)
                .value_hint(ValueHint::FilePath),
        )
        .arg(flag("txt2code", 't', "Convert text source to code source"))
        .arg(flag("code2txt", 'c', "Convert code source to text source"))
        .arg(flag("strip", 's', "Keep only the target language"))
        .arg(flag("diff", 'd', "Show differences to the existing output"))
        .arg(flag("verbose", 'v', "Report repairs and state changes"))
        .arg(
            Arg::new("replace")
                .long("replace")
                .help("Rename the input to '<infile>~' after conversion")
                .action(ArgAction::SetTrue),
        )
        .arg(value("language", "Language of the code source", ValueHint::Other))
        .arg(value("comment-string", "Comment marker", ValueHint::Other))
        .arg(value("code-indent", "Indentation of code blocks", ValueHint::Other))
        .arg(value("header-string", "Code header marker", ValueHint::Other))
        .arg(value("config", "Path to a relit.toml", ValueHint::FilePath))
        .arg(
            Arg::new("overwrite")
                .long("overwrite")
                .help("Replace an existing output file")
                .value_parser(["yes", "update", "no"]),
        )
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = build_cli();

    generate_to(Bash, &mut cmd, "relit", &outdir)?;
    generate_to(Zsh, &mut cmd, "relit", &outdir)?;
    generate_to(Fish, &mut cmd, "relit", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
