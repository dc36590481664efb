use std::env;

use cyclekit_core::error::{CoreError, Domain, ErrorKind, Payload, Result};
use cyclekit_core::lifecycle::LifecycleState;

pub const ENV_FROM: &str = "CYCLEKIT_FROM";
pub const ENV_TO: &str = "CYCLEKIT_TO";

/// What the tool should print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Hops from `from` to `to`.
    Path {
        from: LifecycleState,
        to: LifecycleState,
        exclude_last: bool,
    },
    /// Closest of the candidates from `from`.
    Closest {
        from: LifecycleState,
        candidates: Vec<LifecycleState>,
    },
    /// Every valid request with its hops.
    Table,
    Help,
}

#[derive(Debug)]
pub struct Config {
    pub mode: Mode,
}

impl Config {
    pub fn from_args() -> Result<Self> {
        Self::from_args_iter(env::args())
    }

    pub fn from_args_iter<I, S>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut from = env::var(ENV_FROM).ok();
        let mut to = env::var(ENV_TO).ok();
        let mut exclude_last = false;
        let mut closest: Option<String> = None;
        let mut table = false;

        let mut args = iter.into_iter();
        let _ = args.next();
        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            match arg {
                "-h" | "--help" => return Ok(Self { mode: Mode::Help }),
                "--from" => {
                    if let Some(value) = args.next() {
                        from = Some(value.as_ref().to_string());
                    }
                }
                "--to" => {
                    if let Some(value) = args.next() {
                        to = Some(value.as_ref().to_string());
                    }
                }
                "--closest" => {
                    if let Some(value) = args.next() {
                        closest = Some(value.as_ref().to_string());
                    }
                }
                "--exclude-last" => {
                    exclude_last = true;
                }
                "--table" => {
                    table = true;
                }
                _ if arg.starts_with("--from=") => {
                    from = Some(arg["--from=".len()..].to_string());
                }
                _ if arg.starts_with("--to=") => {
                    to = Some(arg["--to=".len()..].to_string());
                }
                _ if arg.starts_with("--closest=") => {
                    closest = Some(arg["--closest=".len()..].to_string());
                }
                _ => {}
            }
        }

        if table {
            return Ok(Self { mode: Mode::Table });
        }

        let from = from
            .ok_or_else(|| missing("--from"))?
            .parse::<LifecycleState>()?;

        let mode = match (closest, to) {
            (Some(list), _) => Mode::Closest {
                from,
                candidates: list
                    .split(',')
                    .filter(|s| !s.trim().is_empty())
                    .map(|s| s.parse::<LifecycleState>())
                    .collect::<Result<Vec<_>>>()?,
            },
            (None, Some(to)) => Mode::Path {
                from,
                to: to.parse::<LifecycleState>()?,
                exclude_last,
            },
            (None, None) => return Err(missing("--to or --closest")),
        };

        Ok(Self { mode })
    }
}

pub fn print_usage() {
    println!(
        "cyclekit_path --from <state> (--to <state> [--exclude-last] | --closest <state,state,...>)\n\
         cyclekit_path --table"
    );
}

fn missing(flag: &'static str) -> CoreError {
    CoreError::warn()
        .domain(Domain::Config)
        .kind(ErrorKind::InvalidArgument)
        .msg("missing required argument")
        .payload(Payload::Context {
            key: "argument",
            value: flag.into(),
        })
        .build()
}
