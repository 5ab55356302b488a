use customer_directory::{Config, DirectoryScreen, DraftField, HttpDirectoryClient};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "Commands: add | set <field> <value> | create | cancel | refresh | quit
Fields: firstName, lastName, businessName, email";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Add,
    Set(DraftField, String),
    Create,
    Cancel,
    Refresh,
    Quit,
    Help,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    match verb {
        "add" => Ok(Command::Add),
        "set" => {
            let (field, value) = rest.trim_start().split_once(' ').unwrap_or((rest.trim(), ""));
            let field = field.parse::<DraftField>().map_err(|e| e.to_string())?;
            Ok(Command::Set(field, value.trim().to_string()))
        }
        "create" => Ok(Command::Create),
        "cancel" => Ok(Command::Cancel),
        "refresh" => Ok(Command::Refresh),
        "quit" | "exit" => Ok(Command::Quit),
        "help" | "" => Ok(Command::Help),
        other => Err(format!("unknown command '{}'", other)),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env()?;
    let client = HttpDirectoryClient::new(config.directory_endpoint, config.request_timeout)?;
    log::info!("Using customer directory at {}", client.endpoint());

    let screen = DirectoryScreen::new(client);

    screen.mount().await;
    println!("{}\n\n{}", screen.render(), HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            Command::Add => screen.creation().open_dialog(),
            Command::Set(field, value) => screen.creation().update_field(field, value),
            Command::Create => {
                // Failures stay visible in the dialog; nothing else to do here.
                if let Err(e) = screen.creation().submit().await {
                    log::debug!("submission rejected: {}", e);
                }
            }
            Command::Cancel => screen.creation().close_dialog(),
            Command::Refresh => {
                screen.directory().revalidate().await;
            }
            Command::Quit => break,
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
        }
        println!("{}", screen.render());
    }

    Ok(())
}
