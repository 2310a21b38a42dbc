use crumpet_cli::Options;
use structopt::StructOpt;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    crumpet_cli::run(Options::from_args())
}
