use std::panic::PanicHookInfo;
use std::path::PathBuf;
use std::sync::OnceLock;

use color_eyre::{Result, config::PanicHook};
use tracing::error;

use crate::{config::get_data_dir, logging::LOG_FILE};

static INIT: OnceLock<()> = OnceLock::new();

/// Install the eyre report hook and a panic hook that puts the terminal back
/// before printing anything. Safe to call twice.
pub fn init() -> Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section(panic_section())
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .try_into_hooks()?;
    eyre_hook.install()?;

    std::panic::set_hook(Box::new(move |panic_info| {
        if let Err(r) = crate::tui::restore() {
            error!("Unable to exit Terminal: {:?}", r);
        }
        report(&panic_hook, panic_info);
        std::process::exit(libc::EXIT_FAILURE);
    }));

    let _ = INIT.set(());
    Ok(())
}

fn log_path() -> PathBuf {
    get_data_dir().join(LOG_FILE)
}

/// There is no issue tracker to send people to; point them at the log.
fn panic_section() -> String {
    format!(
        "This is a bug in {} {}. Details were written to {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        log_path().display()
    )
}

#[cfg_attr(debug_assertions, allow(dead_code))]
fn support_note() -> String {
    format!(
        "- Keep the crash report and the log file {}",
        log_path().display()
    )
}

fn report(panic_hook: &PanicHook, panic_info: &PanicHookInfo<'_>) {
    let msg = panic_hook.panic_report(panic_info).to_string();
    error!("Error: {}", strip_ansi_escapes::strip_str(&msg));

    #[cfg(not(debug_assertions))]
    {
        use human_panic::{handle_dump, metadata, print_msg};
        let metadata = metadata!().support(support_note());
        let file_path = handle_dump(&metadata, panic_info);
        if print_msg(file_path, &metadata).is_err() {
            eprintln!("{msg}");
        }
    }

    #[cfg(debug_assertions)]
    {
        better_panic::Settings::auto()
            .most_recent_first(false)
            .lineno_suffix(true)
            .verbosity(better_panic::Verbosity::Full)
            .create_panic_handler()(panic_info);
    }
}
