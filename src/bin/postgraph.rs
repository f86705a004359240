use std::{
    env,
    io::{self, BufRead, IsTerminal, Write},
    process,
};

use postgraph::{
    EntityKind, PostGraphError,
    cli::CommandLineConfig,
    fixtures::save_store,
    mutation::Mutator,
    operation::{execute, parse_operation},
    safety::run_integrity_checks,
    store::Store,
};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    let args: Vec<String> = env::args().collect();
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let config = match CommandLineConfig::from_args(&arg_refs) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };
    if config.help {
        println!("{}", CommandLineConfig::help());
        return;
    }

    if config.command == "check" {
        process::exit(run_check(&config));
    }

    let (mut store, mut mutator) = match config.store.build() {
        Ok(built) => built,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    let code = match run_command(&mut store, &mut mutator, &config) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("command failed: {err}");
            process::exit(1);
        }
    };
    if let Some(path) = &config.save {
        if let Err(err) = save_store(&store, path) {
            eprintln!("{err}");
            process::exit(1);
        }
    }
    process::exit(code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

/// `check` reads snapshots unaudited so it can report what is wrong with them.
fn run_check(config: &CommandLineConfig) -> i32 {
    let store = match config.store.build_for_audit() {
        Ok(store) => store,
        Err(err) => {
            eprintln!("{err}");
            return 2;
        }
    };
    let report = run_integrity_checks(&store);
    if let Err(err) = print_json(&report) {
        eprintln!("command failed: {err}");
        return 1;
    }
    if report.has_issues() { 1 } else { 0 }
}

fn run_command(
    store: &mut Store,
    mutator: &mut Mutator,
    config: &CommandLineConfig,
) -> Result<i32, PostGraphError> {
    let query = config.command_args.first().map(String::as_str);
    match config.command.as_str() {
        "status" => {
            println!(
                "users={} posts={} comments={}",
                store.len(EntityKind::User),
                store.len(EntityKind::Post),
                store.len(EntityKind::Comment)
            );
            Ok(0)
        }
        "users" => print_json(&store.query().list_users(query)).map(|_| 0),
        "posts" => print_json(&store.query().list_posts(query)).map(|_| 0),
        "comments" => print_json(&store.query().list_comments(query)).map(|_| 0),
        "run" => run_operations(store, mutator).map(|_| 0),
        other => Err(PostGraphError::invalid_input(format!(
            "unknown command {other}"
        ))),
    }
}

fn run_operations(store: &mut Store, mutator: &mut Mutator) -> Result<(), PostGraphError> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| PostGraphError::invalid_input(e.to_string()))?;
        if line.trim().is_empty() {
            continue;
        }
        let outcome = parse_operation(&line).and_then(|op| execute(store, mutator, op));
        let response = match outcome {
            Ok(value) => json!({ "ok": value }),
            Err(err) => error_json(&err),
        };
        writeln!(stdout, "{response}").map_err(|e| PostGraphError::invalid_input(e.to_string()))?;
    }
    Ok(())
}

fn error_json(err: &PostGraphError) -> Value {
    json!({ "error": { "kind": err.kind(), "message": err.to_string() } })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), PostGraphError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| PostGraphError::invalid_input(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}
