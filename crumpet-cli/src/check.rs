use codespan_reporting::diagnostic::Severity;
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use crumpet::lang::surface;
use crumpet::pass::surface_to_core;
use crumpet::reporting::Message;
use std::path::PathBuf;

/// Check some Crumpet source files.
#[derive(structopt::StructOpt)]
pub struct Options {
    /// The Crumpet source files to be checked.
    #[structopt(name = "FILE")]
    file_names: Vec<PathBuf>,
}

pub fn run(options: Options) -> anyhow::Result<()> {
    let writer = StandardStream::stderr(ColorChoice::Always);
    let reporting_config = codespan_reporting::term::Config::default();

    let mut is_ok = true;

    for file_name in &options.file_names {
        let source = std::fs::read_to_string(file_name)?;
        let file = SimpleFile::new(file_name.display().to_string(), source);

        let (messages_tx, messages_rx) = crossbeam_channel::unbounded();
        let mut state = surface_to_core::State::new(messages_tx.clone());

        let surface_term = match surface::Term::from_str(file.source()) {
            Ok(surface_term) => surface_term,
            Err(error) => {
                messages_tx.send(Message::from_lalrpop(error)).unwrap();
                surface::Term::from(surface::TermData::Error)
            }
        };

        let (_, _) = surface_to_core::from_surface(&mut state, &surface_term);
        log::debug!("checked {}", file_name.display());

        for message in messages_rx.try_iter() {
            let diagnostic = message.to_diagnostic();
            is_ok &= diagnostic.severity < Severity::Error;

            codespan_reporting::term::emit(
                &mut writer.lock(),
                &reporting_config,
                &file,
                &diagnostic,
            )?;
        }
    }

    match is_ok {
        true => Ok(()),
        false => Err(anyhow::anyhow!("errors found in supplied source files")),
    }
}
