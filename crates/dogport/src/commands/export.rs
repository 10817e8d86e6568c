//! `dogport export`: run the exporter against the configured deployment.

use tracing::{debug, error};

use dogport_core::{
    CollisionPolicy, ExportOptions, Exporter, FailurePolicy, FileSink, TableOutcome,
};

use crate::cli::{CollisionMode, ExportArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output::{self, Banners};

impl From<CollisionMode> for CollisionPolicy {
    fn from(mode: CollisionMode) -> Self {
        match mode {
            CollisionMode::Suffix => Self::Suffix,
            CollisionMode::Reject => Self::Reject,
            CollisionMode::Allow => Self::Allow,
        }
    }
}

pub async fn handle(args: ExportArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config()?;
    let profile_name = config::active_profile_name(global, &cfg);
    let client_config = config::resolve_client_config(global, &cfg, &profile_name)?;
    debug!(profile = %profile_name, endpoint = %client_config.endpoint, "resolved client config");

    let client = client_config.build_client()?;

    let options = ExportOptions {
        environment: args.environment,
        host_prefix: args.host_prefix,
        collision: args
            .on_collision
            .map_or(cfg.defaults.on_collision, CollisionPolicy::from),
        failure: if args.keep_going || cfg.defaults.keep_going {
            FailurePolicy::ContinueRemaining
        } else {
            FailurePolicy::AbortAll
        },
    };

    let mut banners = Banners::new(output::should_color(global.color), global.quiet);
    banners.started(&options.environment, &args.output_dir, &options.host_prefix);

    let report = Exporter::new(&client, FileSink::new(&args.output_dir), options)
        .run(&mut banners)
        .await?;

    output::print_output(&output::render_report(&report), global.quiet);
    banners.finished(&args.output_dir, &report);

    if report.is_success() {
        return Ok(());
    }

    let incomplete = report
        .tables
        .iter()
        .filter(|t| !matches!(t.outcome, TableOutcome::Success))
        .count()
        + report.not_attempted.len();

    match report.into_first_error() {
        Some((table, err)) => {
            error!(%table, error = %err, "table export failed");
            Err(CliError::from(err).with_profile(&profile_name))
        }
        None => Err(CliError::ExportIncomplete { failed: incomplete }),
    }
}
