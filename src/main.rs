// SPDX-License-Identifier: MPL-2.0
use iced_player::app::{self, Flags};
use iced_player::logging;

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let log_level: Option<String> = args.opt_value_from_str("--log-level").unwrap_or_else(|err| {
        eprintln!("invalid --log-level: {err}");
        None
    });
    logging::init(logging::resolve_level(log_level.as_deref()));

    let flags = Flags {
        lang: opt_value(&mut args, "--lang"),
        config_dir: opt_value(&mut args, "--config-dir"),
        title: opt_value(&mut args, "--title"),
        duration_secs: opt_value(&mut args, "--duration"),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        log::warn!("ignoring unexpected arguments: {remaining:?}");
    }

    app::run(flags)
}

/// Reads an optional flag value, logging and ignoring malformed input.
fn opt_value<T>(args: &mut pico_args::Arguments, key: &'static str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    args.opt_value_from_str(key).unwrap_or_else(|err| {
        log::warn!("ignoring {key}: {err}");
        None
    })
}
