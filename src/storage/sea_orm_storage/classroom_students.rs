//! 班级名单存储操作

use super::{SeaOrmStorage, page_and_size};
use crate::entity::appraisals::{Column as AppraisalColumn, Entity as Appraisals};
use crate::entity::classroom_students::{ActiveModel, Column, Entity as ClassroomStudents};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{DossierSystemError, Result};
use crate::models::{
    PaginationInfo,
    classrooms::{
        entities::{ClassroomStudent, RosterEntry},
        responses::RosterResponse,
    },
    students::entities::Student,
};
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 学生加入班级；重复加入时返回 Conflict
    pub async fn enroll_student_impl(
        &self,
        classroom_id: i64,
        student_id: i64,
    ) -> Result<ClassroomStudent> {
        let model = ActiveModel {
            classroom_id: Set(classroom_id),
            student_id: Set(student_id),
            joined_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DossierSystemError::from_write_err("学生加入班级失败", e))?;

        Ok(result.into_classroom_student())
    }

    pub async fn get_enrollment_impl(
        &self,
        classroom_id: i64,
        student_id: i64,
    ) -> Result<Option<ClassroomStudent>> {
        let result = ClassroomStudents::find()
            .filter(
                Condition::all()
                    .add(Column::ClassroomId.eq(classroom_id))
                    .add(Column::StudentId.eq(student_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("查询班级名单失败: {e}")))?;

        Ok(result.map(|m| m.into_classroom_student()))
    }

    /// 分页列出班级名单（按学生姓名排序）
    pub async fn list_roster_with_pagination_impl(
        &self,
        classroom_id: i64,
        page: Option<i64>,
        size: Option<i64>,
    ) -> Result<RosterResponse> {
        let (page, size) = page_and_size(page, size);

        let select = ClassroomStudents::find()
            .find_also_related(Students)
            .filter(Column::ClassroomId.eq(classroom_id))
            .order_by_asc(StudentColumn::Name)
            .order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            DossierSystemError::database_operation(format!("查询班级名单总数失败: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            DossierSystemError::database_operation(format!("查询班级名单页数失败: {e}"))
        })?;
        let rows = paginator.fetch_page(page - 1).await.map_err(|e| {
            DossierSystemError::database_operation(format!("查询班级名单失败: {e}"))
        })?;

        let items = rows
            .into_iter()
            .filter_map(|(enrollment, student)| {
                student.map(|s| RosterEntry {
                    enrollment_id: enrollment.id,
                    joined_at: crate::entity::to_datetime(enrollment.joined_at),
                    student: s.into_student(),
                })
            })
            .collect();

        Ok(RosterResponse {
            pagination: PaginationInfo::new(page, size, total, pages),
            items,
        })
    }

    /// 班级全部学生
    pub async fn list_roster_students_impl(&self, classroom_id: i64) -> Result<Vec<Student>> {
        let students = Students::find()
            .filter(
                StudentColumn::Id.in_subquery(
                    Query::select()
                        .column(Column::StudentId)
                        .from(ClassroomStudents)
                        .and_where(Column::ClassroomId.eq(classroom_id))
                        .to_owned(),
                ),
            )
            .order_by_asc(StudentColumn::Name)
            .order_by_asc(StudentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("查询班级学生失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 移出学生，并删除其在该班级的评估
    pub async fn remove_student_from_classroom_impl(
        &self,
        classroom_id: i64,
        student_id: i64,
    ) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("开启事务失败: {e}")))?;

        Appraisals::delete_many()
            .filter(AppraisalColumn::ClassroomId.eq(classroom_id))
            .filter(AppraisalColumn::StudentId.eq(student_id))
            .exec(&txn)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("删除学生评估失败: {e}")))?;

        let result = ClassroomStudents::delete_many()
            .filter(Column::ClassroomId.eq(classroom_id))
            .filter(Column::StudentId.eq(student_id))
            .exec(&txn)
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("移出学生失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| DossierSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
