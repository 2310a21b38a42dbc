pub mod check;
pub mod compile;
pub mod demo;
pub mod repl;

/// The Crumpet command line interface.
#[derive(structopt::StructOpt)]
pub enum Options {
    /// Check some files for errors.
    #[structopt(name = "check")]
    Check(check::Options),
    /// Compile a file to a C program built on closure records.
    #[structopt(name = "compile")]
    Compile(compile::Options),
    /// Run the built-in closure-record demonstration.
    #[structopt(name = "demo")]
    Demo,
    /// Runs the REPL/interactive mode.
    #[structopt(name = "repl")]
    Repl(repl::Options),
}

/// Run the CLI with the given options.
pub fn run(options: Options) -> anyhow::Result<()> {
    match options {
        Options::Check(options) => check::run(options)?,
        Options::Compile(options) => compile::run(options)?,
        Options::Demo => demo::run()?,
        Options::Repl(options) => repl::run(options)?,
    }

    Ok(())
}
