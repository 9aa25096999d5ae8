use crate::config::AdminSeed;
use crate::database::UserRepository;
use crate::services::auth_service::{self, AuthSettings};

/// Creates the initial administrator from `ADMIN_*` settings.
/// Skips when not configured or when the email is already registered.
pub async fn seed_initial_admin(
    users: &dyn UserRepository,
    settings: &AuthSettings,
    seed: Option<&AdminSeed>,
) {
    let seed = match seed {
        Some(seed) => seed,
        None => {
            log::info!("👑 Admin seed: ADMIN_EMAIL/ADMIN_NAME/ADMIN_PASSWORD not set, skipping");
            return;
        }
    };

    match auth_service::ensure_admin(users, settings, &seed.name, &seed.email, &seed.password).await {
        Ok(true) => log::info!("   ✅ Initial administrator created: {}", seed.email),
        Ok(false) => log::info!("👑 Admin seed: {} already exists, skipping", seed.email),
        Err(e) => log::error!("   ❌ Failed to seed initial administrator: {}", e),
    }
}
