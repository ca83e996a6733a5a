use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// How much diagnostic output to emit on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Warnings and errors (default).
    #[default]
    Normal,
    /// Everything down to debug, including each git invocation.
    Verbose,
}

impl Verbosity {
    /// `--quiet` wins over `--verbose`.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        }
    }

    fn directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "boscaiolo=error",
            Verbosity::Normal => "boscaiolo=warn",
            Verbosity::Verbose => "boscaiolo=debug",
        }
    }
}

/// Initialize JSON logging on stderr.
///
/// `RUST_LOG` is honoured; the verbosity directive is added on top of it.
/// Stdout stays reserved for command output.
pub fn init_logging(verbosity: Verbosity) {
    let filter = match verbosity.directive().parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };

    // A subscriber may already be installed (e.g. in tests); keep it.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .try_init();
}
