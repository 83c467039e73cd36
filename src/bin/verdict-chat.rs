//! Interactive chat application for the VerdictAI legal assistant.
//!
//! This binary provides a REPL interface for asking legal questions against
//! a VerdictAI backend, with account commands for logging in and out.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage against the default backend
//! verdict-chat
//!
//! # Point at a specific backend
//! verdict-chat --api-url https://verdict.example.com/
//!
//! # Keep the token somewhere non-default
//! verdict-chat --token-file /tmp/verdict-token
//!
//! # Disable colors (useful for piping output)
//! verdict-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/login <username>` - Log in (password prompted)
//! - `/register <username>` - Create an account and log in
//! - `/logout` - Forget the stored token
//! - `/whoami` - Show the current session
//! - `/clear` - Clear conversation history
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use verdict::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatController, help_text, parse_command,
};
use verdict::Session;
use verdict::types::Credentials;

struct Printer {
    use_color: bool,
}

impl Printer {
    fn info(&self, message: &str) {
        if self.use_color {
            println!("\x1b[2m{}\x1b[0m", message);
        } else {
            println!("{}", message);
        }
    }

    fn error(&self, message: &str) {
        if self.use_color {
            eprintln!("\x1b[31m{}\x1b[0m", message);
        } else {
            eprintln!("{}", message);
        }
    }
}

/// Main entry point for the verdict-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("verdict-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let printer = Printer {
        use_color: config.use_color,
    };

    let client = config.client()?;
    let transcript_path = config.transcript_path.clone();
    let mut controller = ChatController::new(client.clone());
    let mut rl = DefaultEditor::new()?;

    println!("VerdictAI Legal Assistant (backend: {})", client.base_url());
    match client.authenticated() {
        Some(session) => printer.info(&format!("Logged in as {}", session.username)),
        None => printer.info("Not logged in. Use /login <username> or /register <username>."),
    }
    println!("Type /help for commands, /quit to exit\n");

    if let Some(greeting) = controller.last_answer() {
        println!("Verdict: {}\n", greeting);
    }

    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Clear => {
                            controller.clear();
                            printer.info("Conversation cleared.");
                        }
                        ChatCommand::Login(username) => {
                            match prompt_credentials(&mut rl, &username, false) {
                                Ok(credentials) => {
                                    match client.sign_in(&credentials).await {
                                        Ok(session) => print_session(&printer, &session),
                                        Err(err) => printer.error(&err.to_string()),
                                    }
                                }
                                Err(err) => printer.error(&err),
                            }
                        }
                        ChatCommand::Register(username) => {
                            match prompt_credentials(&mut rl, &username, true) {
                                Ok(credentials) => match client.register(&credentials).await {
                                    Ok(user) => {
                                        printer
                                            .info(&format!("Account created for {}", user.username));
                                        match client.sign_in(&credentials).await {
                                            Ok(session) => print_session(&printer, &session),
                                            Err(err) => printer.error(&err.to_string()),
                                        }
                                    }
                                    Err(err) => printer.error(&err.to_string()),
                                },
                                Err(err) => printer.error(&err),
                            }
                        }
                        ChatCommand::Logout => {
                            client.sign_out();
                            printer.info("Logged out.");
                        }
                        ChatCommand::WhoAmI => match client.authenticated() {
                            Some(session) => print_session(&printer, &session),
                            None => printer.info("Not logged in."),
                        },
                        ChatCommand::Stats => {
                            print_stats(&controller);
                        }
                        ChatCommand::SaveTranscript(path) => {
                            match controller.save_transcript_to(&path) {
                                Ok(_) => {
                                    printer.info(&format!("Transcript saved to {}", path))
                                }
                                Err(err) => printer
                                    .error(&format!("Failed to save transcript: {}", err)),
                            }
                        }
                        ChatCommand::LoadTranscript(path) => {
                            match controller.load_transcript_from(&path) {
                                Ok(_) => {
                                    printer.info(&format!("Transcript loaded from {}", path))
                                }
                                Err(err) => printer
                                    .error(&format!("Failed to load transcript: {}", err)),
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            printer.error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - send to the backend
                controller.send(line).await;
                if let Some(answer) = controller.last_answer() {
                    println!("Verdict: {}\n", answer);
                }
                if let Some(path) = &transcript_path {
                    if let Err(err) = controller.save_transcript_to(path) {
                        printer.error(&format!("Failed to auto-save transcript: {}", err));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                printer.error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn prompt_credentials(
    rl: &mut DefaultEditor,
    username: &str,
    confirm: bool,
) -> Result<Credentials, String> {
    let password = rl
        .readline("Password: ")
        .map_err(|err| format!("Input error: {}", err))?;
    let credentials = Credentials::new(username, password.trim());
    if confirm {
        let confirmation = rl
            .readline("Confirm password: ")
            .map_err(|err| format!("Input error: {}", err))?;
        credentials
            .validate_with_confirmation(confirmation.trim())
            .map_err(|err| err.to_string())?;
    } else {
        credentials.validate().map_err(|err| err.to_string())?;
    }
    Ok(credentials)
}

fn print_session(printer: &Printer, session: &Session) {
    match session.expires_at_ms {
        Some(expires_at_ms) => printer.info(&format!(
            "Logged in as {} (session expires at {} ms since epoch)",
            session.username, expires_at_ms
        )),
        None => printer.info(&format!("Logged in as {}", session.username)),
    }
}

fn print_stats(controller: &ChatController) {
    let stats = controller.stats();
    println!("    Session Statistics:");
    println!("      Messages: {}", stats.message_count);
    println!("      Questions asked: {}", stats.request_count);
    println!("      Fallback answers: {}", stats.fallback_count);
    println!("      State: {:?}", stats.state);
}
