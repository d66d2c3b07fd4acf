use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 数据库为空时创建默认机构账号
async fn seed_institution(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} account(s), skipping institution seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No accounts found in database, creating default institution account...");
        }
        Err(e) => {
            warn!("Failed to count accounts: {}, skipping institution seed", e);
            return;
        }
    }

    // 优先读取环境变量，否则生成随机密码
    let password = std::env::var("INSTITUTION_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  INSTITUTION PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated institution password: {}", pwd);
        warn!("  Please save this password or set INSTITUTION_PASSWORD");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!(
                "Failed to hash institution password: {}, skipping institution seed",
                e
            );
            return;
        }
    };

    let request = CreateUserRequest {
        username: "institution".to_string(),
        email: "institution@localhost".to_string(),
        password: password_hash,
        role: UserRole::Institution,
        display_name: Some("Instituição".to_string()),
        institution_id: None,
        email_verified: true,
    };

    match storage.create_user(request).await {
        Ok(user) => {
            info!(
                "Default institution account created (ID: {}, username: {})",
                user.id, user.username
            );
        }
        Err(e) => {
            warn!("Failed to create institution account: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    seed_institution(&storage).await;

    StartupContext { storage }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_password_length_and_charset() {
        let pwd = generate_random_password(16);
        assert_eq!(pwd.chars().count(), 16);
        assert!(pwd.chars().all(|c| c.is_ascii_alphanumeric() || "!@#$%".contains(c)));
    }
}
