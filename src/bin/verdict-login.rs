//! Command-line tool for managing a VerdictAI session.
//!
//! This binary covers the account lifecycle without entering the chat REPL:
//! create an account, log in, inspect the current session, and log out.
//!
//! # Usage
//!
//! ```bash
//! # Log in and store the token
//! verdict-login --username ada --password hunter2
//!
//! # Create the account first, then log in
//! verdict-login --register --username ada --password hunter2
//!
//! # Show who the stored token belongs to
//! verdict-login --whoami
//!
//! # Forget the stored token
//! verdict-login --logout
//! ```
//!
//! The backend is selected with `--api-url` or the VERDICT_API_URL
//! environment variable; the token location with `--token-file` or
//! VERDICT_TOKEN_FILE.

use std::sync::Arc;

use arrrg::CommandLine;
use arrrg_derive::CommandLine;

use verdict::types::Credentials;
use verdict::{FileTokenStore, TokenStore, Verdict};

/// Command-line arguments for the verdict-login tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
struct Args {
    /// Backend base URL.
    #[arrrg(optional, "Backend base URL (default: $VERDICT_API_URL)", "URL")]
    api_url: Option<String>,

    /// Token file location.
    #[arrrg(optional, "Token file (default: $VERDICT_TOKEN_FILE)", "PATH")]
    token_file: Option<String>,

    /// Username to authenticate as.
    #[arrrg(optional, "Username", "NAME")]
    username: Option<String>,

    /// Password to authenticate with.
    #[arrrg(optional, "Password", "PASSWORD")]
    password: Option<String>,

    /// Register the account before logging in.
    #[arrrg(flag, "Create the account before logging in")]
    register: bool,

    /// Show the current session and exit.
    #[arrrg(flag, "Show the current session and exit")]
    whoami: bool,

    /// Clear the stored token and exit.
    #[arrrg(flag, "Clear the stored token and exit")]
    logout: bool,
}

/// Main entry point for the verdict-login command-line tool.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = Args::from_command_line_relaxed("verdict-login [OPTIONS]");

    let store: Option<Arc<dyn TokenStore>> = args
        .token_file
        .as_ref()
        .map(|path| Arc::new(FileTokenStore::at(path)) as Arc<dyn TokenStore>);
    let client = Verdict::with_options(args.api_url.clone(), None, store)?;

    if args.logout {
        client.sign_out();
        println!("Logged out.");
        return Ok(());
    }

    if args.whoami {
        match client.authenticated() {
            Some(session) => println!("Logged in as {}", session.username),
            None => {
                println!("Not logged in.");
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let (Some(username), Some(password)) = (args.username, args.password) else {
        eprintln!("Error: --username and --password are required to log in");
        std::process::exit(1);
    };
    let credentials = Credentials::new(username, password);

    if args.register {
        let user = client.register(&credentials).await?;
        println!("Account created for {}", user.username);
    }

    let session = client.sign_in(&credentials).await?;
    println!("Logged in as {}", session.username);

    Ok(())
}
