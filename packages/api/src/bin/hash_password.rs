//! Print an Argon2 PHC string for `APP_ADMIN__PASSWORD_HASH`.
//!
//! Usage: `cargo run -p api --bin hash_password -- <password>`

use std::process::ExitCode;

fn main() -> ExitCode {
    let Some(password) = std::env::args().nth(1) else {
        eprintln!("usage: hash_password <password>");
        return ExitCode::FAILURE;
    };

    match api::auth::hash_password(&password) {
        Ok(hash) => {
            println!("{hash}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
