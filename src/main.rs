// Entrypoint for the CLI application.
// Keeps `main` small: parse flags, create the API client and hand it to
// the interactive loop. Fatal errors bubble up through `anyhow`.

use clap::Parser;
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use wiki_cli::api::WikiClient;
use wiki_cli::config::{Cli, VERSION};
use wiki_cli::prompt::{LinePrompt, Prompt, TerminalPrompt};
use wiki_cli::render::{print_header, Painter};
use wiki_cli::ui::{App, Options};

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let stdout_tty = io::stdout().is_terminal();
    let color = stdout_tty && !cli.no_color && std::env::var_os("NO_COLOR").is_none();
    let painter = Painter::new(color);

    let mut out = io::stdout();
    print_header(&mut out, &painter)?;
    if cli.version {
        println!("{}", painter.info(&format!("Version:\t{VERSION}")));
    }

    let api = WikiClient::new(&cli.api_url)?;
    log::debug!("using API at {}", api.base_url());

    // dialoguer needs a real terminal; piped input is read line by line.
    let prompt: Box<dyn Prompt> = if io::stdin().is_terminal() {
        Box::new(TerminalPrompt::new())
    } else {
        Box::new(LinePrompt::new(io::stdin().lock(), io::stdout(), painter))
    };

    let options = Options {
        limit: cli.limit,
        write_to_file: cli.write_to_file,
        out_dir: cli.out_dir.clone(),
        progress: stdout_tty,
    };
    let mut app = App::new(api, prompt, out, painter, options);
    let code = app.run(cli.initial_term())?;
    Ok(ExitCode::from(code))
}
