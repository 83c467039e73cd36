//! Minimal example: log in and ask a single question.
//!
//! Run with a backend at $VERDICT_API_URL (or http://localhost:8000/):
//!
//! ```bash
//! cargo run --example basic_ask
//! ```

use verdict::Verdict;
use verdict::types::Credentials;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Verdict::new(None)?;

    let credentials = Credentials::new("ada", "hunter2");
    match client.sign_in(&credentials).await {
        Ok(session) => println!("Logged in as {}", session.username),
        Err(err) => println!("Proceeding without a session: {}", err),
    }

    let response = client.ask("What is a tort?").await?;
    println!("{}", response.answer);

    Ok(())
}
