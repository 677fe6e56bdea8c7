//! Print an Argon2 hash for `admin.password_hash`
//!
//! Usage: hash-password <password>

use fleetsite_server::services::auth::hash_password;

fn main() -> anyhow::Result<()> {
    let password = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: hash-password <password>"))?;

    let hash = hash_password(&password)?;
    println!("{}", hash);
    Ok(())
}
