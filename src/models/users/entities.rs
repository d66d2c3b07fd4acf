use serde::{Deserialize, Serialize};

// 账号角色
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Professor,   // 教授
    Institution, // 机构（管理其名下的教授）
}

impl UserRole {
    pub const PROFESSOR: &'static str = "professor";
    pub const INSTITUTION: &'static str = "institution";
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Perfil inválido: '{s}'. Perfis suportados: professor, institution"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Professor => write!(f, "{}", UserRole::PROFESSOR),
            UserRole::Institution => write!(f, "{}", UserRole::INSTITUTION),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::PROFESSOR => Ok(UserRole::Professor),
            UserRole::INSTITUTION => Ok(UserRole::Institution),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 账号状态
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,    // 活跃
    Inactive,  // 非活跃
    Suspended, // 暂停
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Status inválido: '{s}'. Status suportados: active, inactive, suspended"
            ))
        })
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
            UserStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(format!("Invalid user status: {s}")),
        }
    }
}

// 账号实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub email_verified: bool,
    pub display_name: Option<String>,
    // 教授所属机构
    pub institution_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn is_institution(&self) -> bool {
        self.role == UserRole::Institution
    }

    /// 当前账号能否管理某个教授名下的资源
    ///
    /// 教授只能管理自己的资源；机构可以管理其名下教授的资源
    pub fn can_manage(&self, owner: &User) -> bool {
        if self.id == owner.id {
            return true;
        }
        self.is_institution() && owner.institution_id == Some(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, role: UserRole, institution_id: Option<i64>) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            email_verified: true,
            display_name: None,
            institution_id,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_role_round_trip_through_strings() {
        assert_eq!("professor".parse::<UserRole>(), Ok(UserRole::Professor));
        assert_eq!(UserRole::Institution.to_string(), "institution");
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_deserialize_error_is_portuguese() {
        let err = serde_json::from_str::<UserRole>("\"admin\"").unwrap_err();
        assert!(err.to_string().contains("Perfil inválido"));
    }

    #[test]
    fn test_can_manage() {
        let institution = user(1, UserRole::Institution, None);
        let own_professor = user(2, UserRole::Professor, Some(1));
        let other_professor = user(3, UserRole::Professor, Some(99));

        assert!(own_professor.can_manage(&own_professor));
        assert!(institution.can_manage(&own_professor));
        assert!(!institution.can_manage(&other_professor));
        assert!(!own_professor.can_manage(&other_professor));
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let mut u = user(5, UserRole::Professor, None);
        u.password_hash = "secret-hash".to_string();
        let json = serde_json::to_string(&u).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("\"role\":\"professor\""));
    }
}
