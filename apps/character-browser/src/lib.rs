//! Terminal host for the paginated character list.

pub mod browser;
pub mod options;
pub mod persistence;
pub mod terminal;

use std::io::{self, Write};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use charpage_ui::{render_text, Screen};

pub use browser::{Browser, Flow};
pub use options::{AppOptions, OptionsError};
pub use persistence::{PagePersistence, PersistenceError};
pub use terminal::Command;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Run the browser until the user quits or stdin closes.
pub fn run(options: AppOptions) -> anyhow::Result<()> {
    let mut browser = Browser::from_options(&options)?;
    let handle = browser.runtime_handle();

    let (commands_tx, commands) = mpsc::channel();
    terminal::spawn_stdin_reader(commands_tx, handle.dispatcher())
        .context("starting stdin reader")?;

    let mut out = io::stdout().lock();
    print_screen(&mut out, &browser.render()?)?;

    loop {
        handle.wait_for_work(POLL_INTERVAL);
        handle.drain_ui();

        for command in commands.try_iter() {
            if browser.handle(command) == Flow::Quit {
                log::info!("leaving on page {}", browser.page_state().get());
                return Ok(());
            }
        }

        if let Some(screen) = browser.refresh()? {
            print_screen(&mut out, &screen)?;
        }
    }
}

fn print_screen(out: &mut impl Write, screen: &Screen) -> io::Result<()> {
    writeln!(out)?;
    out.write_all(render_text(screen).as_bytes())?;
    writeln!(out, "{}", terminal::HELP)?;
    out.flush()
}
