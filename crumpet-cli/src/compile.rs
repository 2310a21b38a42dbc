use codespan_reporting::files::SimpleFile;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use crumpet::lang::surface;
use crumpet::pass::{core_to_c, surface_to_core};
use crumpet::reporting::Message;
use std::path::PathBuf;

/// Compile a Crumpet source file to a C program.
#[derive(structopt::StructOpt)]
pub struct Options {
    /// The Crumpet source file to be compiled.
    #[structopt(name = "FILE")]
    file_name: PathBuf,
    /// Write the emitted C to the given file instead of standard output.
    #[structopt(short = "o", long = "output")]
    output: Option<PathBuf>,
}

pub fn run(options: Options) -> anyhow::Result<()> {
    let writer = StandardStream::stderr(ColorChoice::Always);
    let reporting_config = codespan_reporting::term::Config::default();

    let source = std::fs::read_to_string(&options.file_name)?;
    let file = SimpleFile::new(options.file_name.display().to_string(), source);

    let (messages_tx, messages_rx) = crossbeam_channel::unbounded();
    let mut state = surface_to_core::State::new(messages_tx.clone());

    let surface_term = match surface::Term::from_str(file.source()) {
        Ok(surface_term) => surface_term,
        Err(error) => {
            messages_tx.send(Message::from_lalrpop(error)).unwrap();
            surface::Term::from(surface::TermData::Error)
        }
    };

    let (core_term, _) = surface_to_core::from_surface(&mut state, &surface_term);

    let mut is_ok = true;
    for message in messages_rx.try_iter() {
        is_ok = false;
        codespan_reporting::term::emit(
            &mut writer.lock(),
            &reporting_config,
            &file,
            &message.to_diagnostic(),
        )?;
    }
    if !is_ok {
        return Err(anyhow::anyhow!(
            "errors found in {}",
            options.file_name.display(),
        ));
    }

    let pretty_alloc = pretty::BoxAllocator;
    let doc = core_to_c::from_term(&pretty_alloc, &core_term)?;
    let emitted = format!("{}", doc.1.pretty(80));

    log::debug!(
        "compiled {} to {} bytes of C",
        options.file_name.display(),
        emitted.len(),
    );

    match &options.output {
        Some(output) => std::fs::write(output, emitted)?,
        None => print!("{}", emitted),
    }

    Ok(())
}
