// src/cli/chat.rs — Interactive terminal session

use crate::core::journal::SAVED_MESSAGE;
use crate::core::mood::LEGEND;
use crate::core::resources::{self, HELPLINES};
use crate::core::session::Session;
use crate::core::tasks::TaskBoard;
use crate::core::turn::Companion;

/// What the REPL should do with one line of input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Empty,
    Command { name: &'a str, arg: &'a str },
    Message(&'a str),
}

fn classify_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if trimmed == "quit" || trimmed == "exit" || trimmed == "/quit" {
        return Input::Quit;
    }
    if trimmed.is_empty() {
        return Input::Empty;
    }
    if trimmed.starts_with('/') {
        let (name, arg) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
        return Input::Command {
            name,
            arg: arg.trim(),
        };
    }
    Input::Message(trimmed)
}

/// Run the chat REPL against a single in-process session.
pub async fn run_chat(companion: Companion, task_names: &[String]) -> anyhow::Result<()> {
    let mut session = Session::new(task_names);

    eprintln!(
        "wellness-companion v{} | {} via {} | type /help for commands\n",
        env!("CARGO_PKG_VERSION"),
        companion.settings().model,
        companion.provider_name(),
    );
    eprintln!("How are you feeling? Share what's on your mind.\n");

    while let Some(line) = read_input() {
        match classify_input(&line) {
            Input::Quit => break,
            Input::Empty => continue,
            Input::Command { name, arg } => handle_slash_command(name, arg, &mut session),
            Input::Message(text) => {
                match companion.submit(session.conversation.get_mut(), text).await {
                    Ok(reply) => println!("{}\n", reply),
                    Err(e) if e.is_upstream() => {
                        eprintln!("[gateway] {} (your message was kept, try again)", e);
                        continue;
                    }
                    Err(e) => {
                        eprintln!("[error] {}", e);
                        continue;
                    }
                }

                // Reply is already on screen; the label only feeds /mood.
                companion.record_mood(session.mood.get_mut(), text).await;
            }
        }
    }

    let (done, total) = session.tasks.get_mut().progress();
    eprintln!(
        "\nSession: {} turn(s), {} mood sample(s), {}/{} goals done",
        session.conversation.get_mut().completed_turns(),
        session.mood.get_mut().len(),
        done,
        total,
    );
    Ok(())
}

fn read_input() -> Option<String> {
    use std::io::{self, BufRead, Write};

    print!("> ");
    io::stdout().flush().ok();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line),
        Err(_) => None,
    }
}

fn handle_slash_command(cmd: &str, arg: &str, session: &mut Session) {
    match cmd {
        "/tasks" => print_tasks(session.tasks.get_mut()),

        "/done" => {
            if arg.is_empty() {
                eprintln!("  Usage: /done <task name>");
                print_tasks(session.tasks.get_mut());
            } else {
                match session.tasks.get_mut().toggle(arg) {
                    Ok(true) => eprintln!("  [x] {}", arg),
                    Ok(false) => eprintln!("  [ ] {}", arg),
                    Err(e) => eprintln!("  {}", e),
                }
            }
        }

        "/mood" => {
            let mood = session.mood.get_mut();
            if mood.is_empty() {
                eprintln!("  No mood samples yet.");
            } else {
                eprintln!("  Mood journey:");
                for point in mood.trend() {
                    eprintln!("  {}  {}", point.time, "*".repeat(point.level as usize));
                }
                if let Some(avg) = mood.average() {
                    eprintln!("  Average: {:.1}", avg);
                }
                eprintln!("  {}", LEGEND);
            }
        }

        "/journal" => match session.journal.get_mut().save(arg) {
            Ok(_) => eprintln!("  {}", SAVED_MESSAGE),
            Err(_) => eprintln!("  Usage: /journal <your thoughts>"),
        },

        "/breathe" => {
            let pattern = resources::four_seven_eight();
            eprintln!("  {} technique: {}", pattern.name, pattern.description);
            for step in &pattern.steps {
                eprintln!("    {} ({}s)", step.cue, step.seconds);
            }
        }

        "/help" => {
            eprintln!("Slash commands:");
            eprintln!("  /tasks             Show today's wellness goals");
            eprintln!("  /done <task>       Toggle a goal");
            eprintln!("  /mood              Show your mood journey");
            eprintln!("  /journal <text>    Save a private journal note");
            eprintln!("  /breathe           Guided 4-7-8 breathing");
            eprintln!("  /help              Show this help");
            eprintln!("  /quit, quit, exit  End session");
            eprintln!();
            eprintln!("Need to talk to someone?");
            for h in HELPLINES {
                eprintln!("  {}: {}", h.name, h.phone);
            }
        }

        _ => {
            eprintln!("Unknown command: {}. Type /help for commands.", cmd);
        }
    }
}

fn print_tasks(tasks: &TaskBoard) {
    let (done, total) = tasks.progress();
    eprintln!("  Daily wellness goals ({}/{}):", done, total);
    for task in tasks.tasks() {
        let mark = if task.done { "x" } else { " " };
        eprintln!("  [{}] {}", mark, task.name);
    }
}
