//! 档案评分
//!
//! 每个章节：所选选项分值之和 / 章节问题数（未作答的问题计入分母，贡献 0），
//! 再乘以 `weight / 100`；总分为各章节贡献之和。没有问题的章节贡献 0。
//! 不属于该档案的问题、不属于该评价方法的选项均被忽略。结果不做舍入。

use std::collections::HashMap;

use crate::models::appraisals::responses::{QuestionReport, SectionReport};
use crate::models::dossiers::entities::DossierDetail;

#[derive(Debug)]
pub struct Scorecard {
    pub sections: Vec<SectionReport>,
    pub total_score: f64,
}

impl Scorecard {
    /// 档案中的每个问题都有作答
    pub fn is_complete(&self) -> bool {
        self.sections
            .iter()
            .all(|section| section.answered_count == section.question_count)
    }
}

/// `answers`: question_id -> evaluation_type_id
pub fn score_dossier(dossier: &DossierDetail, answers: &HashMap<i64, i64>) -> Scorecard {
    let mut total_score = 0.0;
    let mut sections = Vec::with_capacity(dossier.sections.len());

    for detail in &dossier.sections {
        let mut sum = 0.0;
        let mut answered_count = 0;
        let mut questions = Vec::with_capacity(detail.questions.len());

        for question in &detail.questions {
            let chosen = answers
                .get(&question.id)
                .and_then(|type_id| dossier.evaluation_method.find_type(*type_id));

            if let Some(option) = chosen {
                sum += option.value;
                answered_count += 1;
            }

            questions.push(QuestionReport {
                question_id: question.id,
                text: question.text.clone(),
                evaluation_type_id: chosen.map(|option| option.id),
                option_name: chosen.map(|option| option.name.clone()),
                value: chosen.map(|option| option.value),
            });
        }

        let question_count = detail.questions.len();
        let average = if question_count == 0 {
            0.0
        } else {
            sum / question_count as f64
        };
        let contribution = average * detail.section.weight / 100.0;
        total_score += contribution;

        sections.push(SectionReport {
            section_id: detail.section.id,
            name: detail.section.name.clone(),
            weight: detail.section.weight,
            question_count,
            answered_count,
            average,
            contribution,
            questions,
        });
    }

    Scorecard {
        sections,
        total_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dossiers::entities::{Dossier, Question, Section, SectionDetail};
    use crate::models::evaluation_methods::entities::{
        EvaluationMethod, EvaluationMethodDetail, EvaluationType,
    };

    const METHOD_ID: i64 = 1;

    fn method(values: &[(i64, f64)]) -> EvaluationMethodDetail {
        let now = chrono::Utc::now();
        EvaluationMethodDetail {
            method: EvaluationMethod {
                id: METHOD_ID,
                name: "Escala".to_string(),
                description: None,
                created_by: None,
                created_at: now,
                updated_at: now,
            },
            types: values
                .iter()
                .enumerate()
                .map(|(position, (id, value))| EvaluationType {
                    id: *id,
                    method_id: METHOD_ID,
                    name: format!("Opção {id}"),
                    value: *value,
                    position: position as i32,
                })
                .collect(),
        }
    }

    // sections: (section_id, weight, question ids)
    fn dossier(types: &[(i64, f64)], sections: &[(i64, f64, &[i64])]) -> DossierDetail {
        let now = chrono::Utc::now();
        DossierDetail {
            dossier: Dossier {
                id: 1,
                professor_id: 1,
                name: "Dossiê".to_string(),
                description: None,
                evaluation_method_id: METHOD_ID,
                created_at: now,
                updated_at: now,
            },
            evaluation_method: method(types),
            sections: sections
                .iter()
                .enumerate()
                .map(|(position, (id, weight, questions))| SectionDetail {
                    section: Section {
                        id: *id,
                        dossier_id: 1,
                        name: format!("Seção {id}"),
                        description: None,
                        weight: *weight,
                        position: position as i32,
                    },
                    questions: questions
                        .iter()
                        .enumerate()
                        .map(|(q_pos, qid)| Question {
                            id: *qid,
                            section_id: *id,
                            text: format!("Questão {qid}"),
                            position: q_pos as i32,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    fn answers(pairs: &[(i64, i64)]) -> HashMap<i64, i64> {
        pairs.iter().copied().collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_weighted_section_averages() {
        // 选项 10 -> 10 分，11 -> 5 分，12 -> 0 分
        let rubric = dossier(
            &[(10, 10.0), (11, 5.0), (12, 0.0)],
            &[(1, 60.0, &[100, 101]), (2, 40.0, &[200])],
        );
        let card = score_dossier(&rubric, &answers(&[(100, 10), (101, 11), (200, 12)]));

        // (10 + 5) / 2 * 0.6 + 0 / 1 * 0.4 = 4.5
        assert_close(card.sections[0].average, 7.5);
        assert_close(card.sections[0].contribution, 4.5);
        assert_close(card.sections[1].contribution, 0.0);
        assert_close(card.total_score, 4.5);
        assert!(card.is_complete());
    }

    #[test]
    fn test_unanswered_questions_count_in_denominator() {
        let rubric = dossier(&[(10, 10.0)], &[(1, 100.0, &[100, 101, 102, 103])]);
        let card = score_dossier(&rubric, &answers(&[(100, 10)]));

        // 10 / 4 * 1.0
        assert_close(card.total_score, 2.5);
        assert_eq!(card.sections[0].answered_count, 1);
        assert_eq!(card.sections[0].question_count, 4);
        assert!(!card.is_complete());
    }

    #[test]
    fn test_section_without_questions_contributes_zero() {
        let rubric = dossier(&[(10, 8.0)], &[(1, 50.0, &[]), (2, 50.0, &[100])]);
        let card = score_dossier(&rubric, &answers(&[(100, 10)]));

        assert_close(card.sections[0].average, 0.0);
        assert_close(card.sections[0].contribution, 0.0);
        assert_close(card.total_score, 4.0);
        assert!(card.is_complete());
    }

    #[test]
    fn test_foreign_questions_and_options_are_ignored() {
        let rubric = dossier(&[(10, 10.0)], &[(1, 100.0, &[100])]);
        // 问题 999 不在档案中；选项 77 不属于评价方法
        let card = score_dossier(&rubric, &answers(&[(999, 10), (100, 77)]));

        assert_close(card.total_score, 0.0);
        assert_eq!(card.sections[0].answered_count, 0);
        assert_eq!(card.sections[0].questions[0].evaluation_type_id, None);
    }

    #[test]
    fn test_weights_below_one_hundred_cap_the_total() {
        let rubric = dossier(&[(10, 10.0)], &[(1, 30.0, &[100]), (2, 20.0, &[200])]);
        let card = score_dossier(&rubric, &answers(&[(100, 10), (200, 10)]));

        assert_close(card.total_score, 5.0);
    }

    #[test]
    fn test_no_rounding_is_applied() {
        let rubric = dossier(&[(10, 10.0), (11, 0.0)], &[(1, 100.0, &[100, 101, 102])]);
        let card = score_dossier(&rubric, &answers(&[(100, 10), (101, 11), (102, 11)]));

        assert_close(card.total_score, 10.0 / 3.0);
    }

    #[test]
    fn test_empty_dossier_scores_zero_and_is_complete() {
        let rubric = dossier(&[(10, 10.0)], &[]);
        let card = score_dossier(&rubric, &HashMap::new());

        assert_close(card.total_score, 0.0);
        assert!(card.sections.is_empty());
        assert!(card.is_complete());
    }

    #[test]
    fn test_question_report_carries_chosen_option() {
        let rubric = dossier(&[(10, 10.0), (11, 5.0)], &[(1, 100.0, &[100, 101])]);
        let card = score_dossier(&rubric, &answers(&[(101, 11)]));

        let questions = &card.sections[0].questions;
        assert_eq!(questions[0].value, None);
        assert_eq!(questions[1].evaluation_type_id, Some(11));
        assert_eq!(questions[1].option_name.as_deref(), Some("Opção 11"));
        assert_eq!(questions[1].value, Some(5.0));
    }
}
