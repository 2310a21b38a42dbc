const HISTORY_FILE_NAME: &str = "history";

/// The Crumpet REPL/interactive mode.
#[derive(structopt::StructOpt)]
pub struct Options {
    /// The prompt to display before expressions.
    #[structopt(long = "prompt", default_value = "> ")]
    pub prompt: String,
    /// Disable the welcome banner on startup.
    #[structopt(long = "no-banner")]
    pub no_banner: bool,
    /// Disable saving of command history on exit.
    #[structopt(long = "no-history")]
    pub no_history: bool,
}

fn print_welcome_banner() {
    const WELCOME_BANNER: &[&str] = &[
        r"                             _   ",
        r" __ _ _ _  _ _ __  _ __  ___| |_ ",
        r"/ _| '_| || | '  \| '_ \/ -_)  _|",
        r"\__|_|  \_,_|_|_|_| .__/\___|\__|",
        r"                   |_|           ",
        r"",
    ];

    for (i, line) in WELCOME_BANNER.iter().enumerate() {
        // warning on `env!` is a known issue
        #[allow(clippy::print_literal)]
        match i {
            2 => println!("{}   Version {}", line, env!("CARGO_PKG_VERSION")),
            3 => println!("{}   {}", line, env!("CARGO_PKG_HOMEPAGE")),
            _ => println!("{}", line.trim_end()),
        }
    }
}

fn term_width() -> usize {
    match term_size::dimensions() {
        Some((width, _)) => width,
        None => std::usize::MAX,
    }
}

/// Run the REPL with the given options.
pub fn run(options: Options) -> anyhow::Result<()> {
    use codespan_reporting::files::SimpleFile;
    use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
    use crumpet::lang::surface;
    use crumpet::pass::{core_to_pretty, surface_to_core};
    use rustyline::error::ReadlineError;
    use rustyline::{Config, Editor};

    let mut editor = {
        let config = Config::builder()
            .history_ignore_space(true)
            .history_ignore_dups(true)
            .build();

        Editor::<()>::with_config(config)
    };

    if !options.no_banner {
        print_welcome_banner()
    }

    let xdg_dirs = xdg::BaseDirectories::with_prefix("crumpet/repl")?;
    let history_path = xdg_dirs.get_data_home().join(HISTORY_FILE_NAME);

    if !options.no_history && editor.load_history(&history_path).is_err() {
        // No previous REPL history!
    }

    let pretty_alloc = pretty::BoxAllocator;
    let writer = StandardStream::stderr(ColorChoice::Always);
    let reporting_config = codespan_reporting::term::Config::default();

    loop {
        let file = match editor.readline(&options.prompt) {
            Ok(line) => SimpleFile::new("<input>", line),
            Err(ReadlineError::Interrupted) => {
                println!("Interrupted!");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(error) => return Err(error.into()),
        };

        if !options.no_history {
            editor.add_history_entry(file.source());
        }

        // TODO: add an `:emit` command for printing the compiled C
        let surface_term = match surface::Term::from_str(file.source()) {
            Ok(surface_term) => surface_term,
            Err(error) => {
                codespan_reporting::term::emit(
                    &mut writer.lock(),
                    &reporting_config,
                    &file,
                    &crumpet::reporting::Message::from_lalrpop(error).to_diagnostic(),
                )?;
                continue;
            }
        };

        let (messages_tx, messages_rx) = crossbeam_channel::unbounded();
        let mut state = surface_to_core::State::new(messages_tx);
        let (core_term, _) = surface_to_core::from_surface(&mut state, &surface_term);

        if !messages_rx.is_empty() {
            for message in messages_rx.try_iter() {
                codespan_reporting::term::emit(
                    &mut writer.lock(),
                    &reporting_config,
                    &file,
                    &message.to_diagnostic(),
                )?;
            }
        } else {
            let doc = core_to_pretty::from_term(&pretty_alloc, &core_term);

            println!("{}", doc.1.pretty(term_width()));
        }
    }

    if !options.no_history && !editor.history().is_empty() {
        let history_path = xdg_dirs.place_data_file(HISTORY_FILE_NAME)?;
        editor.save_history(&history_path)?;
    }

    println!("Bye bye");

    Ok(())
}
