use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use colored::Colorize;
use cyoa_core::transport::{DirStorage, decode_query, load_stored_adventure, read_adventure_file};
use cyoa_core::{Adventure, ControlToken, CoreError};
use cyoa_export::control_token_url;
use cyoa_player::view::RETURN_TO_START;
use cyoa_player::{BattleAction, Mode, NavigationController, PlayerConfig, View};
use log::info;

/// Where the adventure comes from.
pub enum Source {
    /// A JSON file.
    File(PathBuf),
    /// A share link or bare query string.
    Link(String),
    /// A storage directory holding the shared key.
    Storage(PathBuf),
    /// Nothing was given.
    None,
}

/// Session options from the command line.
pub struct Options {
    pub scene: Option<String>,
    pub seed: Option<u64>,
    pub fast: bool,
    pub prompt: bool,
}

pub fn run(source: Source, options: Options) -> Result<(), String> {
    let mut config = PlayerConfig::default();
    if let Some(seed) = options.seed {
        config = config.with_seed(seed);
    }
    if let Some(scene) = options.scene {
        config = config.with_initial_scene(scene);
    }

    let mut controller = NavigationController::new(config);
    match load(source)? {
        Ok(adventure) => controller.load(adventure),
        Err(e) => controller.fail_load(&e),
    }

    let mut screen = Screen::default();
    screen.show(&controller.view());
    if options.prompt {
        println!("  Type a number to choose, 'help' for commands, 'quit' to exit.\n");
    }

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    while controller.is_live() {
        if options.prompt {
            print!("> ");
            io::stdout().flush().map_err(|e| e.to_string())?;
        }

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match execute(&mut controller, input) {
            Ok(Step::Continue) => {}
            Ok(Step::Help) => {
                print_help();
                continue;
            }
            Ok(Step::Quit) => break,
            Err(e) => {
                println!("  {}", e.yellow());
                continue;
            }
        }

        screen.show(&controller.view());
        settle(&mut controller, &mut screen, options.fast);
    }

    controller.shutdown();
    Ok(())
}

/// Decode the source. The outer error aborts the command; the inner one is
/// shown on the error screen.
fn load(source: Source) -> Result<Result<Adventure, CoreError>, String> {
    match source {
        Source::File(path) => match read_adventure_file(&path) {
            Err(CoreError::Storage(e)) => Err(format!("cannot read {}: {e}", path.display())),
            other => Ok(other),
        },
        Source::Link(query) => Ok(decode_query(&query).map(|shared| {
            info!("playing \"{}\" from link", shared.meta.title);
            shared.adventure
        })),
        Source::Storage(dir) => match load_stored_adventure(&DirStorage::new(&dir)) {
            Ok(Some(adventure)) => Ok(Ok(adventure)),
            Ok(None) => Err(format!("no stored adventure in {}", dir.display())),
            Err(CoreError::Storage(e)) => Err(format!("cannot read {}: {e}", dir.display())),
            Err(e) => Ok(Err(e)),
        },
        Source::None => Err("no adventure given (pass a file, --link, or --storage)".into()),
    }
}

enum Step {
    Continue,
    Help,
    Quit,
}

fn execute(controller: &mut NavigationController, input: &str) -> Result<Step, String> {
    let command = input.to_ascii_lowercase();
    match command.as_str() {
        "q" | "quit" | "exit" => return Ok(Step::Quit),
        "h" | "help" | "?" => return Ok(Step::Help),
        "a" | "attack" => controller.attack().map_err(|e| e.to_string())?,
        "d" | "defend" => controller.defend().map_err(|e| e.to_string())?,
        "r" | "restart" => controller.return_to_start().map_err(|e| e.to_string())?,
        _ => {
            let number: usize = command
                .parse()
                .map_err(|_| format!("unknown command: {input}"))?;
            choose_number(controller, number)?;
        }
    }
    Ok(Step::Continue)
}

/// Numbers pick whatever the current screen lists, starting at 1.
fn choose_number(controller: &mut NavigationController, number: usize) -> Result<(), String> {
    let index = number
        .checked_sub(1)
        .ok_or_else(|| format!("invalid choice: {number}"))?;
    match controller.mode() {
        Mode::Empty => {
            let token = WELCOME_ACTIONS
                .get(index)
                .ok_or_else(|| format!("invalid choice: {number}"))?;
            controller.leave(*token);
            Ok(())
        }
        Mode::Error(_) if index == 0 => controller.return_to_start().map_err(|e| e.to_string()),
        _ => controller.choose(index).map_err(|e| e.to_string()),
    }
}

const WELCOME_ACTIONS: [ControlToken; 2] = [ControlToken::MakeYourOwn, ControlToken::GoHome];

/// Run pending battle steps, sleeping for their delays unless `fast`.
fn settle(controller: &mut NavigationController, screen: &mut Screen, fast: bool) {
    while let Some(wait) = controller.next_due_in_ms() {
        if !fast {
            thread::sleep(Duration::from_millis(wait));
        }
        controller.advance(wait);
        screen.show(&controller.view());
    }
}

fn print_help() {
    println!("  <number>      pick a choice");
    println!("  a, attack     attack during a battle");
    println!("  d, defend     defend during a battle");
    println!("  r, restart    return to start from an error");
    println!("  q, quit       leave the adventure\n");
}

fn token_label(token: ControlToken) -> &'static str {
    match token {
        ControlToken::MakeYourOwn => "Make your own",
        ControlToken::GoHome => "Go home",
    }
}

/// Prints views, showing only new battle log lines.
#[derive(Default)]
struct Screen {
    log_shown: usize,
}

impl Screen {
    fn show(&mut self, view: &View) {
        match view {
            View::Loading => println!("  Loading..."),
            View::Welcome { actions } => {
                self.log_shown = 0;
                println!("  {}", "Welcome! This adventure has no scenes yet.".bold());
                for (i, token) in actions.iter().enumerate() {
                    println!("  {}. {}", (i + 1).to_string().cyan(), token_label(*token));
                }
            }
            View::Scene { text, choices, .. } => {
                self.log_shown = 0;
                println!();
                for line in text.lines() {
                    println!("  {line}");
                }
                println!();
                if choices.is_empty() {
                    println!("  {}", "The End.".dimmed());
                }
                for (i, choice) in choices.iter().enumerate() {
                    println!("  {}. {choice}", (i + 1).to_string().cyan());
                }
            }
            View::Battle(panel) => {
                if self.log_shown > panel.log.len() {
                    self.log_shown = 0;
                }
                if self.log_shown == 0 {
                    println!();
                    println!("  {} {}", "Battle:".bold(), panel.enemy_name.bold().red());
                }
                for line in &panel.log[self.log_shown..] {
                    println!("  {line}");
                }
                self.log_shown = panel.log.len();

                if !panel.actions.is_empty() {
                    println!(
                        "  You {}/{} | {} {}/{}",
                        panel.player_health.to_string().green(),
                        panel.player_max_health,
                        panel.enemy_name,
                        panel.enemy_health.to_string().red(),
                        panel.enemy_max_health
                    );
                    let actions: Vec<String> = panel
                        .actions
                        .iter()
                        .map(|action| match action {
                            BattleAction::Attack => format!("[a] {}", action.label()),
                            BattleAction::Defend => format!("[d] {}", action.label()),
                        })
                        .collect();
                    println!("  {}", actions.join("  "));
                }
            }
            View::Error { message } => {
                self.log_shown = 0;
                println!("  {}", message.red());
                println!("  {}. {RETURN_TO_START}", "1".cyan());
            }
            View::Exited { destination } => {
                println!(
                    "  Leaving for {} ({})",
                    token_label(*destination),
                    control_token_url(*destination)
                );
            }
        }
    }
}
