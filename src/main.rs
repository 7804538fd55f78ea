use clap::Parser;
use d1query::cli::{Cli, Command, QueryArgs};
use d1query::client::{D1Client, ReqwestTransport};
use d1query::error::D1Error;
use d1query::format::{self, OutputFormat};
use d1query::verbose::{self, Timer};
use d1query::{config, format_detect, masking, output, params};
use serde_json::Value;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

fn main() {
    // Load .env file (optional, ignore if missing)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        output::print_error(&err);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), D1Error> {
    let args = cli.command.args();
    let app_config =
        config::load_from_query_args(args, cli.verbose, cli.show_secrets, cli.config.as_ref())?;
    let verbose = app_config.verbose;
    verbose::init_tracing(verbose);

    let sql = resolve_sql(args)?;
    let bind = params::parse_params(&args.params)?;

    // Detect output format before query (fail-fast on bad extension)
    let file_target = match &app_config.output_file {
        Some(path) => Some(format_detect::detect_format(path)?),
        None => None,
    };

    verbose::emit(
        verbose,
        &format!(
            "target: {}",
            masking::describe_connection(&app_config.connection, app_config.show_secrets)
        ),
    );

    let timeout = (app_config.timeout_secs > 0).then(|| Duration::from_secs(app_config.timeout_secs));
    let transport = ReqwestTransport::with_timeout(timeout)?;
    let client = D1Client::with_transport(app_config.connection.credentials(), transport)
        .with_api_base(app_config.connection.api_base.clone());

    verbose::emit(
        verbose,
        &format!("running {} with {} parameter(s)...", cli.command.name(), bind.len()),
    );
    let timer = Timer::start();
    let (value, rows) = dispatch(&client, &cli.command, &sql, &bind)?;
    verbose::emit(
        verbose,
        &format!("query complete ({}ms, {} rows)", timer.elapsed_ms(), rows),
    );

    emit_output(value, rows, file_target, app_config.format, verbose)
}

/// Run the subcommand's client operation and shape its output.
fn dispatch(
    client: &D1Client<ReqwestTransport>,
    command: &Command,
    sql: &str,
    bind: &[Value],
) -> Result<(Value, usize), D1Error> {
    match command {
        Command::Query(_) => {
            let result = client.query(sql, bind)?;
            Ok((format::query_summary(&result), result.count()))
        }
        Command::First(_) => {
            let rows: Vec<_> = client.first(sql, bind)?.into_iter().collect();
            Ok((format::rows_value(&rows), rows.len()))
        }
        Command::Get(_) => {
            let rows = client.get(sql, bind)?;
            Ok((format::rows_value(&rows), rows.len()))
        }
        Command::Value(_) => {
            let value = client.value(sql, bind)?;
            let rows = usize::from(value.is_some());
            Ok((format::keyed("value", value.unwrap_or(Value::Null)), rows))
        }
        Command::Execute(_) => {
            let affected = client.execute(sql, bind)?;
            Ok((format::keyed("rows_affected", Value::from(affected)), 0))
        }
    }
}

fn emit_output(
    value: Value,
    rows: usize,
    file_target: Option<(OutputFormat, PathBuf)>,
    stdout_format: OutputFormat,
    verbose: bool,
) -> Result<(), D1Error> {
    match file_target {
        Some((file_format, path)) => {
            verbose::emit(
                verbose,
                &format!("writing {} output to {}...", file_format.label(), path.display()),
            );
            let rendered = format::render(&value, file_format)?;
            output::write_file(&rendered, &path)?;
            output::print_summary(rows, &path, stdout_format)
        }
        None => {
            verbose::emit(verbose, &format!("formatting {} output...", stdout_format.label()));
            let rendered = format::render(&value, stdout_format)?;
            output::print_result(&rendered);
            Ok(())
        }
    }
}

fn resolve_sql(args: &QueryArgs) -> Result<String, D1Error> {
    if let Some(ref sql) = args.sql {
        return Ok(sql.clone());
    }
    if let Some(ref path) = args.sql_file {
        let content = std::fs::read_to_string(path).map_err(|e| D1Error::Input {
            message: format!("cannot read SQL file {}: {}", path.display(), e),
        })?;
        return Ok(content);
    }
    Err(D1Error::Input {
        message: "no SQL provided — use positional argument or --file".to_string(),
    })
}
