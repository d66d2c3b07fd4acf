//! 账号实体（教授与机构）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub email_verified: bool,
    pub display_name: Option<String>,
    pub institution_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::classrooms::Entity")]
    Classrooms,
    #[sea_orm(has_many = "super::dossiers::Entity")]
    Dossiers,
    #[sea_orm(has_many = "super::notifications::Entity")]
    Notifications,
}

impl Related<super::classrooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classrooms.def()
    }
}

impl Related<super::dossiers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dossiers.def()
    }
}

impl Related<super::notifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::{User, UserRole, UserStatus};

        User {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            role: self
                .role
                .parse::<UserRole>()
                .unwrap_or(UserRole::Professor),
            status: self
                .status
                .parse::<UserStatus>()
                .unwrap_or(UserStatus::Inactive),
            email_verified: self.email_verified,
            display_name: self.display_name,
            institution_id: self.institution_id,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{UserRole, UserStatus};

    #[test]
    fn test_into_user_falls_back_on_unknown_values() {
        let model = Model {
            id: 1,
            username: "someone".into(),
            email: "someone@example.com".into(),
            password_hash: "hash".into(),
            role: "superuser".into(),
            status: "???".into(),
            email_verified: false,
            display_name: None,
            institution_id: Some(9),
            created_at: 1_700_000_000,
            updated_at: 1_700_000_000,
        };
        let user = model.into_user();
        assert_eq!(user.role, UserRole::Professor);
        assert_eq!(user.status, UserStatus::Inactive);
        assert_eq!(user.institution_id, Some(9));
        assert_eq!(user.created_at.timestamp(), 1_700_000_000);
    }
}
