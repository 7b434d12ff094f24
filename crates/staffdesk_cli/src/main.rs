//! Interactive terminal front end for staffdesk.
//!
//! # Responsibility
//! - Render the two screens (entry, management) over stdin/stdout.
//! - Collect labeled field input and dispatch commands synchronously.
//!
//! # Invariants
//! - The output area shows only the most recent command reply.
//! - Fields keep their text until a successful mutating command clears the
//!   ones it consumed.

use log::warn;
use staffdesk_core::db::open_db;
use staffdesk_core::{
    core_version, default_log_level, init_logging, Command, CommandContext, CommandExecutor,
    EmployeeService, FieldValues, SqliteEmployeeRepository,
};
use std::io::{self, BufRead, Write};

const DB_FILE: &str = "staffdesk.db";
const EXPORT_FILE: &str = "employee_data.csv";
const LOG_DIR_NAME: &str = "logs";

fn main() {
    if let Err(message) = run() {
        eprintln!("staffdesk: {message}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    init_file_logging();

    let conn = open_db(DB_FILE).map_err(|err| format!("failed to open `{DB_FILE}`: {err}"))?;
    let repo = SqliteEmployeeRepository::try_new(&conn)
        .map_err(|err| format!("database `{DB_FILE}` is not usable: {err}"))?;
    let service = EmployeeService::new(repo);
    let executor = CommandExecutor::new(service, CommandContext::new(EXPORT_FILE, true));

    let stdin = io::stdin();
    let mut input = stdin.lock();

    if !entry_screen(&mut input)? {
        return Ok(());
    }
    management_screen(&executor, &mut input)
}

/// Logging is ambient; a failed bootstrap must not block the user.
fn init_file_logging() {
    let log_dir = std::env::current_dir()
        .map(|cwd| cwd.join(LOG_DIR_NAME))
        .ok();
    let Some(log_dir) = log_dir.and_then(|dir| dir.to_str().map(str::to_string)) else {
        eprintln!("staffdesk: cannot resolve a log directory; continuing without file logs");
        return;
    };

    if let Err(message) = init_logging(default_log_level(), &log_dir) {
        eprintln!("staffdesk: logging disabled: {message}");
    }
}

/// Entry screen: one action, entering the management screen.
///
/// Returns `false` when the user quits before entering.
fn entry_screen(input: &mut impl BufRead) -> Result<bool, String> {
    println!("Welcome to staffdesk {} — employee records", core_version());
    println!();
    print!("Press Enter to open the management screen, or type 'q' to quit: ");
    flush_stdout()?;

    match read_line(input)? {
        Some(line) if line.trim().eq_ignore_ascii_case("q") => Ok(false),
        Some(_) => Ok(true),
        None => Ok(false),
    }
}

/// Management screen: output area, command menu, field prompts.
fn management_screen(
    executor: &CommandExecutor<SqliteEmployeeRepository<'_>>,
    input: &mut impl BufRead,
) -> Result<(), String> {
    let mut fields = FieldValues::new();
    let mut output_area = String::from("Ready.");

    loop {
        println!();
        println!("========================================");
        println!("{output_area}");
        println!("========================================");
        for (index, command) in Command::ALL.iter().enumerate() {
            println!("{:>2}) {}", index + 1, command.label());
        }
        println!(" q) Quit");
        print!("Select an option: ");
        flush_stdout()?;

        let Some(choice) = read_line(input)? else {
            return Ok(());
        };
        let choice = choice.trim().to_string();
        if choice.eq_ignore_ascii_case("q") {
            return Ok(());
        }

        let Some(command) = select_command(&choice) else {
            output_area = format!("Unknown option '{choice}'.");
            continue;
        };

        prompt_fields(command, &mut fields, input)?;
        let reply = executor.execute(command, &fields);
        fields.apply_clear(&reply);
        output_area = reply.message;
    }
}

fn select_command(choice: &str) -> Option<Command> {
    let index: usize = choice.parse().ok()?;
    Command::ALL.get(index.checked_sub(1)?).copied()
}

/// Prompts for each field the command reads.
///
/// A field already holding text shows its value; entering nothing keeps it.
fn prompt_fields(
    command: Command,
    fields: &mut FieldValues,
    input: &mut impl BufRead,
) -> Result<(), String> {
    for field in command.fields() {
        let current = fields.get(*field).to_string();
        if current.is_empty() {
            print!("{}: ", field.label());
        } else {
            print!("{} [{current}]: ", field.label());
        }
        flush_stdout()?;

        match read_line(input)? {
            Some(line) if !line.trim().is_empty() => fields.set(*field, line.trim()),
            Some(_) => {}
            None => {
                warn!("event=input module=cli status=eof");
                return Ok(());
            }
        }
    }
    Ok(())
}

/// Reads one line; `None` means end of input.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>, String> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|err| format!("failed to read input: {err}"))?;
    if read == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

fn flush_stdout() -> Result<(), String> {
    io::stdout()
        .flush()
        .map_err(|err| format!("failed to flush output: {err}"))
}
