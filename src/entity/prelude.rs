//! 预导入模块，方便使用

pub use super::appraisals::{
    ActiveModel as AppraisalActiveModel, Entity as Appraisals, Model as AppraisalModel,
};
pub use super::classroom_students::{
    ActiveModel as ClassroomStudentActiveModel, Entity as ClassroomStudents,
    Model as ClassroomStudentModel,
};
pub use super::classrooms::{
    ActiveModel as ClassroomActiveModel, Entity as Classrooms, Model as ClassroomModel,
};
pub use super::dossiers::{ActiveModel as DossierActiveModel, Entity as Dossiers, Model as DossierModel};
pub use super::evaluation_methods::{
    ActiveModel as EvaluationMethodActiveModel, Entity as EvaluationMethods,
    Model as EvaluationMethodModel,
};
pub use super::evaluation_types::{
    ActiveModel as EvaluationTypeActiveModel, Entity as EvaluationTypes,
    Model as EvaluationTypeModel,
};
pub use super::evaluations::{
    ActiveModel as EvaluationActiveModel, Entity as Evaluations, Model as EvaluationModel,
};
pub use super::notifications::{
    ActiveModel as NotificationActiveModel, Entity as Notifications, Model as NotificationModel,
};
pub use super::questions::{
    ActiveModel as QuestionActiveModel, Entity as Questions, Model as QuestionModel,
};
pub use super::sections::{ActiveModel as SectionActiveModel, Entity as Sections, Model as SectionModel};
pub use super::students::{ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
